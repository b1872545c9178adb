//! Boundary errors
//!
//! Nothing on the tick path can fail. These are returned only where values
//! enter the core from outside: building a time, planning the tick timer and
//! decoding the shared view byte.

use thiserror::Error;

/// A `WatchTime` field outside its calendar range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeError {
    #[error("month {0} outside 1..=12")]
    Month(u8),
    #[error("day {day} outside 1..={max}")]
    Day { day: u8, max: u8 },
    #[error("hour {0} outside 0..=23")]
    Hour(u8),
    #[error("minute {0} outside 0..=59")]
    Minute(u8),
    #[error("second {0} outside 0..=59")]
    Second(u8),
}

/// No usable divider for the requested tick rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerError {
    #[error("reference clock and tick rate must be non-zero")]
    ZeroRate,
    #[error("no prescaler gives a reload count of at most {max_reload}")]
    NoFit { max_reload: u32 },
}

/// Byte in the shared view cell that names no view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ViewError {
    #[error("unknown view code {0}")]
    Unknown(u8),
}
