//! Tick scheduler
//!
//! Everything that happens once per second, in the timer interrupt:
//! acknowledge the interrupt, re-arm the alarm, advance the clock, run the
//! per-tick mode update, render.
//!
//! The clock, the step counter and the render caches belong to this context
//! alone. The only cross-context input is the [`DisplayFormatState`].
//!
//! Ticks are not queued. If rendering ever overruns the period the timer is
//! re-armed one period from now and the missed second is lost; the watch then
//! runs slow. This is reported as [`Rearm::Overrun`] and not corrected.

use crate::clock::WatchTime;
use crate::config::Layout;
use crate::display::PanelDriver;
use crate::face::WatchFace;
use crate::mode::{DisplayFormatState, View};
use crate::pedometer::StepCounter;

/// How the alarm was re-armed for the next tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rearm {
    /// Next deadline is one period after the previous one
    OnTime,
    /// The next deadline had already passed; re-armed from now
    Overrun,
}

/// Next absolute deadline after the one at `deadline` fired, seen at `now`.
/// Times are in timer counts. Only a next deadline that is already due counts
/// as an overrun; it is replaced by one period from `now`.
pub const fn next_deadline(deadline: u64, now: u64, period: u64) -> (u64, Rearm) {
    let next = deadline + period;
    if next > now {
        (next, Rearm::OnTime)
    } else {
        (now + period, Rearm::Overrun)
    }
}

/// Hardware periodic timer
pub trait TickTimer {
    /// Clears the pending interrupt request.
    fn acknowledge(&mut self);

    /// Schedules the next interrupt.
    fn rearm(&mut self) -> Rearm;
}

#[derive(Debug, Clone)]
pub struct TickScheduler {
    time: WatchTime,
    steps: StepCounter,
    face: WatchFace,
    shown: Option<View>,
    overruns: u32,
}

impl TickScheduler {
    pub const fn new(layout: Layout) -> Self {
        Self {
            time: WatchTime::BOOT,
            steps: StepCounter::new(),
            face: WatchFace::new(layout),
            shown: None,
            overruns: 0,
        }
    }

    pub const fn time(&self) -> &WatchTime {
        &self.time
    }

    pub const fn steps(&self) -> u32 {
        self.steps.steps()
    }

    /// View drawn by the last render
    pub const fn shown(&self) -> Option<View> {
        self.shown
    }

    /// Ticks lost to render overruns since boot
    pub const fn overruns(&self) -> u32 {
        self.overruns
    }

    /// Interrupt entry point.
    pub fn on_interrupt<T, P>(
        &mut self,
        timer: &mut T,
        format: &DisplayFormatState,
        panel: &mut P,
    ) -> Rearm
    where
        T: TickTimer,
        P: PanelDriver,
    {
        timer.acknowledge();
        let rearm = timer.rearm();
        if rearm == Rearm::Overrun {
            self.overruns = self.overruns.wrapping_add(1);
            #[cfg(feature = "defmt")]
            defmt::warn!("tick overran its period ({} so far)", self.overruns);
        }

        self.tick(format, panel);
        rearm
    }

    /// One second: advance, per-tick mode update, render.
    pub fn tick<P: PanelDriver>(&mut self, format: &DisplayFormatState, panel: &mut P) {
        self.time.advance();

        if format.view().is_animated() {
            self.steps.step();
            format.toggle_animation();
        }

        self.render(format, panel);
    }

    /// Draws the current view without advancing anything.
    pub fn render<P: PanelDriver>(&mut self, format: &DisplayFormatState, panel: &mut P) {
        let view = format.view();
        if self.shown != Some(view) {
            #[cfg(feature = "defmt")]
            defmt::debug!("view {} -> {}", self.shown, view);
            self.shown = Some(view);
        }

        self.face
            .render(panel, view, &self.time, self.steps.steps(), format.animation());
    }

    /// Forgets what is on the panel, e.g. after it was cleared.
    pub fn invalidate(&mut self) {
        self.face.invalidate();
    }
}
