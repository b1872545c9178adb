//! Time-keeping and differential-rendering core of a small OLED watch
//!
//! Two execution contexts share this crate:
//!
//! - the 1 Hz timer interrupt, which owns a [`tick::TickScheduler`]: clock,
//!   step counter and render caches
//! - the polling loop, which owns a [`debounce::Debouncer`] and is the only
//!   writer of the view in [`mode::DisplayFormatState`]
//!
//! Nothing here touches hardware directly. The panel is reached through
//! [`display::PanelDriver`], the button through `embedded-hal` traits, so the
//! whole core runs and is tested on the host.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod clock;
pub mod config;
pub mod debounce;
pub mod display;
pub mod error;
pub mod face;
pub mod mode;
pub mod pedometer;
pub mod render;
pub mod tick;
pub mod timer;

pub use clock::WatchTime;
pub use display::{GlyphPanel, PanelDriver};
pub use mode::{DisplayFormatState, Variant, View};
pub use tick::{Rearm, TickScheduler, TickTimer};
