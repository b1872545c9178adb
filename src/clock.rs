//! Calendar clock
//!
//! A day/month/hour/minute/second counter with no year and a fixed
//! 28-day February. The tick context is the only writer.

use core::fmt::Write;

use heapless::String;

use crate::error::TimeError;

/// Days per month, January first. February is fixed at 28.
pub const DAYS_IN_MONTH: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// "HH:MM:SS"
pub type TimeText = String<8>;
/// "DD/MM"
pub type DateText = String<5>;

/// Number of days in `month` (1-based).
pub const fn days_in_month(month: u8) -> u8 {
    DAYS_IN_MONTH[(month.wrapping_sub(1) % 12) as usize]
}

/// Half of the day in 12-hour mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    pub const fn as_str(self) -> &'static str {
        match self {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        }
    }
}

/// Time of day plus day and month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WatchTime {
    day: u8,
    month: u8,
    hour: u8,
    minute: u8,
    second: u8,
}

impl WatchTime {
    /// 01/01 00:00:00, the power-on value.
    pub const BOOT: WatchTime = WatchTime {
        day: 1,
        month: 1,
        hour: 0,
        minute: 0,
        second: 0,
    };

    /// Builds a time, rejecting any field outside its calendar range.
    pub fn new(day: u8, month: u8, hour: u8, minute: u8, second: u8) -> Result<Self, TimeError> {
        if !(1..=12).contains(&month) {
            return Err(TimeError::Month(month));
        }
        let max = days_in_month(month);
        if !(1..=max).contains(&day) {
            return Err(TimeError::Day { day, max });
        }
        if hour >= 24 {
            return Err(TimeError::Hour(hour));
        }
        if minute >= 60 {
            return Err(TimeError::Minute(minute));
        }
        if second >= 60 {
            return Err(TimeError::Second(second));
        }

        Ok(Self {
            day,
            month,
            hour,
            minute,
            second,
        })
    }

    pub const fn day(&self) -> u8 {
        self.day
    }

    pub const fn month(&self) -> u8 {
        self.month
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    pub const fn second(&self) -> u8 {
        self.second
    }

    /// Advances by one second, carrying through minute, hour, day and month.
    pub fn advance(&mut self) {
        self.second += 1;
        if self.second >= 60 {
            self.second = 0;
            self.add_minute();
        }
    }

    fn add_minute(&mut self) {
        self.minute += 1;
        if self.minute >= 60 {
            self.minute = 0;
            self.add_hour();
        }
    }

    fn add_hour(&mut self) {
        self.hour += 1;
        if self.hour >= 24 {
            self.hour = 0;
            self.add_day();
        }
    }

    fn add_day(&mut self) {
        self.day += 1;
        if self.day > days_in_month(self.month) {
            self.day = 1;
            self.month += 1;
            if self.month > 12 {
                self.month = 1;
            }
        }
    }

    /// Hour on a 12-hour dial: midnight and noon both read 12.
    pub const fn hour_12(&self) -> (u8, Meridiem) {
        let meridiem = if self.hour < 12 {
            Meridiem::Am
        } else {
            Meridiem::Pm
        };
        match self.hour % 12 {
            0 => (12, meridiem),
            h => (h, meridiem),
        }
    }

    pub fn time_24(&self) -> TimeText {
        hms(self.hour, self.minute, self.second)
    }

    pub fn time_12(&self) -> (TimeText, Meridiem) {
        let (hour, meridiem) = self.hour_12();
        (hms(hour, self.minute, self.second), meridiem)
    }

    pub fn date(&self) -> DateText {
        let mut text = DateText::new();
        // Two-digit fields always fit the buffer
        let _ = write!(text, "{:02}/{:02}", self.day, self.month);
        text
    }
}

impl Default for WatchTime {
    fn default() -> Self {
        Self::BOOT
    }
}

fn hms(hour: u8, minute: u8, second: u8) -> TimeText {
    let mut text = TimeText::new();
    let _ = write!(text, "{:02}:{:02}:{:02}", hour, minute, second);
    text
}
