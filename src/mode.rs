//! Display mode state machine
//!
//! The view is the only value that crosses from the polling loop into the
//! tick interrupt. Each field of [`DisplayFormatState`] has exactly one
//! writer, so plain atomic loads and stores are enough and no read-modify-
//! write is ever needed (the Cortex-M0+ has none):
//!
//! - `view`: written by the polling loop, read by the tick interrupt
//! - `animation`: written and read by the tick interrupt

use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use crate::error::ViewError;

/// Which pair of views a build cycles through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Variant {
    /// Time and date, or time and a simulated step counter
    Pedometer,
    /// 24-hour or 12-hour time
    TwelveHour,
}

impl Variant {
    pub const fn default_view(self) -> View {
        match self {
            Variant::Pedometer => View::TimeDate,
            Variant::TwelveHour => View::Hour24,
        }
    }

    pub const fn contains(self, view: View) -> bool {
        matches!(
            (self, view),
            (Variant::Pedometer, View::TimeDate | View::Pedometer)
                | (Variant::TwelveHour, View::Hour24 | View::Hour12)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum View {
    TimeDate = 0,
    Pedometer = 1,
    Hour24 = 2,
    Hour12 = 3,
}

impl View {
    /// The view one button press leads to.
    pub const fn next(self) -> View {
        match self {
            View::TimeDate => View::Pedometer,
            View::Pedometer => View::TimeDate,
            View::Hour24 => View::Hour12,
            View::Hour12 => View::Hour24,
        }
    }

    /// Views that step the pedometer and flip the icon every tick
    pub const fn is_animated(self) -> bool {
        matches!(self, View::Pedometer)
    }
}

impl From<View> for u8 {
    fn from(view: View) -> u8 {
        view as u8
    }
}

impl TryFrom<u8> for View {
    type Error = ViewError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(View::TimeDate),
            1 => Ok(View::Pedometer),
            2 => Ok(View::Hour24),
            3 => Ok(View::Hour12),
            other => Err(ViewError::Unknown(other)),
        }
    }
}

/// View selection and animation bit shared between the two contexts
#[derive(Debug)]
pub struct DisplayFormatState {
    variant: Variant,
    view: AtomicU8,
    animation: AtomicBool,
}

impl DisplayFormatState {
    pub const fn new(variant: Variant) -> Self {
        Self {
            variant,
            view: AtomicU8::new(variant.default_view() as u8),
            animation: AtomicBool::new(false),
        }
    }

    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// Current view. A byte that does not decode to one of this variant's
    /// views reads as the default view.
    pub fn view(&self) -> View {
        View::try_from(self.view.load(Ordering::Acquire))
            .ok()
            .filter(|view| self.variant.contains(*view))
            .unwrap_or(self.variant.default_view())
    }

    /// Moves to the next view. Polling context only.
    pub fn advance_view(&self) -> View {
        let next = self.view().next();
        self.view.store(next.into(), Ordering::Release);
        next
    }

    pub fn animation(&self) -> bool {
        self.animation.load(Ordering::Acquire)
    }

    /// Flips the animation bit and returns the new value. Tick context only.
    pub fn toggle_animation(&self) -> bool {
        let next = !self.animation.load(Ordering::Relaxed);
        self.animation.store(next, Ordering::Release);
        next
    }
}
