//! Push-button debouncer
//!
//! Runs in the polling loop. A press is an active-low level that is still
//! low one settle interval after the falling edge was seen. After a press the
//! debouncer stays latched until the button has been seen released for a
//! settle interval too, so contact bounce on either edge never produces a
//! second event.

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::InputPin;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceConfig {
    /// Wait between the edge and the confirming re-sample
    pub settle_ms: u32,
    /// Extra dead time after a confirmed press, 0 to rely on the release edge alone
    pub holdoff_ms: u32,
}

impl DebounceConfig {
    pub const DEFAULT: DebounceConfig = DebounceConfig {
        settle_ms: 50,
        holdoff_ms: 500,
    };
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone)]
pub struct Debouncer {
    config: DebounceConfig,
    latched: bool,
    holdoff_pending: bool,
}

impl Debouncer {
    pub const fn new(config: DebounceConfig) -> Self {
        Self {
            config,
            latched: false,
            holdoff_pending: false,
        }
    }

    pub const fn is_latched(&self) -> bool {
        self.latched
    }

    /// Samples the button once. Returns `true` exactly once per confirmed press.
    pub fn poll<B, D>(&mut self, button: &B, delay: &mut D) -> bool
    where
        B: InputPin,
        D: DelayMs<u32>,
    {
        if self.holdoff_pending {
            self.holdoff_pending = false;
            delay.delay_ms(self.config.holdoff_ms);
        }

        let pressed = is_pressed(button);
        if pressed == self.latched {
            return false;
        }

        delay.delay_ms(self.config.settle_ms);
        if is_pressed(button) != pressed {
            return false;
        }

        self.latched = pressed;
        if pressed {
            self.holdoff_pending = self.config.holdoff_ms > 0;
        }
        pressed
    }
}

/// Active low. A failed read counts as released.
fn is_pressed<B: InputPin>(button: &B) -> bool {
    button.is_low().unwrap_or(false)
}
