//! Periodic timer arithmetic
//!
//! A tick timer counts `reference_hz / prescaler` per second and interrupts
//! every `reload` counts, so the period is `prescaler * reload / reference_hz`
//! seconds. For a target rate the reload is `reference_hz / (prescaler * rate)`,
//! rounded to the nearest count; the smallest prescaler whose reload still
//! fits the counter gives the finest resolution.
//!
//! Two worked cases:
//!
//! - 4 MHz instruction clock, 1:1/1:8/1:64/1:256 prescaler and a 16-bit
//!   period register: 1:64 gives 62 500 counts, exactly 1 s. With only
//!   1:256 available it is 15 625 counts (period register 15 624).
//! - RP2040 timer: 12 MHz crystal divided by the watchdog tick generator
//!   to 1 MHz, no prescaler, 32-bit alarm: 1 000 000 counts.

use crate::error::TimerError;

/// RP2040 timer count rate, 12 MHz XOSC / 12
pub const RP2040_TIMER_HZ: u32 = 1_000_000;

/// Nominal tick rate of the watch
pub const TICK_HZ: u32 = 1;

/// Divider settings for one periodic interrupt
///
/// Only built by [`TimerPlan::for_rate`], so the reference clock, prescaler
/// and reload are always non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerPlan {
    reference_hz: u32,
    prescaler: u32,
    reload: u32,
}

impl TimerPlan {
    /// Picks the smallest prescaler from `prescalers` whose reload for
    /// `rate_hz` is at most `max_reload` counts.
    pub fn for_rate(
        reference_hz: u32,
        rate_hz: u32,
        prescalers: &[u32],
        max_reload: u32,
    ) -> Result<Self, TimerError> {
        if reference_hz == 0 || rate_hz == 0 {
            return Err(TimerError::ZeroRate);
        }

        let mut candidates = prescalers.iter().copied().filter(|p| *p > 0);
        candidates
            .find_map(|prescaler| {
                let divisor = prescaler as u64 * rate_hz as u64;
                let reload = (reference_hz as u64 + divisor / 2) / divisor;
                (reload > 0 && reload <= max_reload as u64).then_some(Self {
                    reference_hz,
                    prescaler,
                    reload: reload as u32,
                })
            })
            .ok_or(TimerError::NoFit { max_reload })
    }

    pub const fn reference_hz(&self) -> u32 {
        self.reference_hz
    }

    pub const fn prescaler(&self) -> u32 {
        self.prescaler
    }

    /// Counts per period
    pub const fn reload(&self) -> u32 {
        self.reload
    }

    /// Value for a period register that counts from 0 up to and including it
    pub const fn period_register(&self) -> u32 {
        self.reload - 1
    }

    /// Reference clock cycles per period
    pub const fn period_cycles(&self) -> u64 {
        self.prescaler as u64 * self.reload as u64
    }

    pub const fn period_us(&self) -> u64 {
        self.period_cycles() * 1_000_000 / self.reference_hz as u64
    }

    /// Deviation of the achieved period from `1 / rate_hz`, in parts per million.
    /// Positive means slow.
    pub fn error_ppm(&self, rate_hz: u32) -> i64 {
        let achieved = self.period_cycles() as i128 * rate_hz as i128;
        let ideal = self.reference_hz as i128;
        ((achieved - ideal) * 1_000_000 / ideal) as i64
    }
}
