//! Time-of-day and date presentation for the segmented display.
//!
//! The dot between hours and minutes blinks with the seconds: even seconds
//! show it, odd seconds hide it. In twelve-hour format the hour is reduced
//! modulo 12 with hour zero shown as 12, suffixed AM or PM.

use core::fmt::Write;

use crate::hal::{DateTime, DisplayText};
use crate::settings::ClockFormat;

/// Formats the time of day for the display.
pub fn format_clock(datetime: &DateTime, format: ClockFormat) -> DisplayText {
    let mut text = DisplayText::new();
    let with_dot = datetime.second % 2 == 0;
    match format {
        ClockFormat::TwentyFourHour => {
            if with_dot {
                let _ = write!(text, " {:02}.{:02}", datetime.hour, datetime.minute);
            } else {
                let _ = write!(text, " {:02}{:02}", datetime.hour, datetime.minute);
            }
        }
        ClockFormat::TwelveHour => {
            let suffix = if datetime.hour < 12 { "AM" } else { "PM" };
            let mut hour = datetime.hour % 12;
            if hour == 0 {
                hour = 12;
            }
            if with_dot {
                let _ = write!(text, "{:02}.{:02}{}", hour, datetime.minute, suffix);
            } else {
                let _ = write!(text, "{:02}{:02}{}", hour, datetime.minute, suffix);
            }
        }
    }
    text
}

/// Formats the day-of-month with its abbreviated month name.
pub fn format_date(day: u8, month_name: &str) -> DisplayText {
    let mut text = DisplayText::new();
    let _ = write!(text, "{day:02} {month_name}");
    text
}

/// Formats the year for the year editor.
pub fn format_year(year: u16) -> DisplayText {
    let mut text = DisplayText::new();
    let _ = write!(text, "{year}");
    text
}
