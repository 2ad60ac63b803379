//! Generic digit-driven numeric editing.
//!
//! Four dedicated buttons produce signed deltas (short press positive, long
//! press negative). Each editable field owns a pure application function
//! mapping `(current value, delta)` to the new value, including that field's
//! clamp or wrap policy. The renderers call these and never carry range logic
//! themselves.

use crate::input::ButtonId;
use crate::settings::ImuTrim;

/// Signed delta produced by one digit button press.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DigitDelta {
    Add1000,
    Add100,
    Add10,
    Add1,
    Sub1000,
    Sub100,
    Sub10,
    Sub1,
}

impl DigitDelta {
    /// Signed numeric weight of this delta.
    pub const fn value(self) -> i32 {
        match self {
            DigitDelta::Add1000 => 1_000,
            DigitDelta::Add100 => 100,
            DigitDelta::Add10 => 10,
            DigitDelta::Add1 => 1,
            DigitDelta::Sub1000 => -1_000,
            DigitDelta::Sub100 => -100,
            DigitDelta::Sub10 => -10,
            DigitDelta::Sub1 => -1,
        }
    }

    /// Maps a digit button press to its delta; `None` for non-digit buttons.
    pub const fn from_button(button: ButtonId, long_press: bool) -> Option<Self> {
        match (button, long_press) {
            (ButtonId::Thousands, false) => Some(DigitDelta::Add1000),
            (ButtonId::Thousands, true) => Some(DigitDelta::Sub1000),
            (ButtonId::Hundreds, false) => Some(DigitDelta::Add100),
            (ButtonId::Hundreds, true) => Some(DigitDelta::Sub100),
            (ButtonId::Tens, false) => Some(DigitDelta::Add10),
            (ButtonId::Tens, true) => Some(DigitDelta::Sub10),
            (ButtonId::Units, false) => Some(DigitDelta::Add1),
            (ButtonId::Units, true) => Some(DigitDelta::Sub1),
            _ => None,
        }
    }
}

/// Year snapped to when an edit leaves the supported range.
pub const DEFAULT_YEAR: u16 = 2025;
/// Oldest supported year.
pub const YEAR_MIN: u16 = 1986;
/// Newest supported year.
pub const YEAR_MAX: u16 = 2100;
/// Highest settable speed limit.
pub const SPEED_LIMIT_MAX: u16 = 400;
/// Highest settable odometer reading in kilometres.
pub const ODOMETER_MAX_KM: u32 = 999_999;
/// Highest settable oil temperature limit.
pub const MAX_TEMPERATURE_LIMIT: u16 = 150;
/// Last position of the settings-menu cursor.
pub const SETTING_CURSOR_MAX: u8 = 9;

/// Applies a delta to the time of day. The two big digits move hours, the two
/// small ones minutes; both fields wrap.
pub fn apply_time(hour: u8, minute: u8, delta: DigitDelta) -> (u8, u8) {
    let (hour_change, minute_change): (i16, i16) = match delta {
        DigitDelta::Add1000 => (10, 0),
        DigitDelta::Add100 => (1, 0),
        DigitDelta::Add10 => (0, 10),
        DigitDelta::Add1 => (0, 1),
        DigitDelta::Sub1000 => (-10, 0),
        DigitDelta::Sub100 => (-1, 0),
        DigitDelta::Sub10 => (0, -10),
        DigitDelta::Sub1 => (0, -1),
    };
    let hour = (i16::from(hour) + hour_change).rem_euclid(24) as u8;
    let minute = (i16::from(minute) + minute_change).rem_euclid(60) as u8;
    (hour, minute)
}

/// Applies a delta to the year. Only the two small digits participate; a
/// result outside the supported range snaps to [`DEFAULT_YEAR`].
pub fn apply_year(year: u16, delta: DigitDelta) -> u16 {
    let change: i32 = match delta {
        DigitDelta::Add10 | DigitDelta::Sub10 | DigitDelta::Add1 | DigitDelta::Sub1 => {
            delta.value()
        }
        _ => return year,
    };
    let year = i32::from(year) + change;
    if year > i32::from(YEAR_MAX) || year < i32::from(YEAR_MIN) {
        DEFAULT_YEAR
    } else {
        year as u16
    }
}

/// Applies a delta to the calendar date. The two big digits move the month,
/// the two small ones the day; either field snaps to 1 when it leaves its
/// range.
pub fn apply_date(month: u8, day: u8, delta: DigitDelta) -> (u8, u8) {
    let (month_change, day_change): (i16, i16) = match delta {
        DigitDelta::Add1000 => (10, 0),
        DigitDelta::Add100 => (1, 0),
        DigitDelta::Add10 => (0, 10),
        DigitDelta::Add1 => (0, 1),
        DigitDelta::Sub1000 => (-10, 0),
        DigitDelta::Sub100 => (-1, 0),
        DigitDelta::Sub10 => (0, -10),
        DigitDelta::Sub1 => (0, -1),
    };
    let mut month = i16::from(month) + month_change;
    let mut day = i16::from(day) + day_change;
    if !(1..=31).contains(&day) {
        day = 1;
    }
    if !(1..=12).contains(&month) {
        month = 1;
    }
    (month as u8, day as u8)
}

/// Applies a delta to the speed limit; out of range snaps to zero. The
/// thousands digit does not participate.
pub fn apply_speed_limit(limit: u16, delta: DigitDelta) -> u16 {
    let change = match delta {
        DigitDelta::Add1000 | DigitDelta::Sub1000 => return limit,
        other => other.value(),
    };
    let limit = i32::from(limit) + change;
    if limit < 0 || limit > i32::from(SPEED_LIMIT_MAX) {
        0
    } else {
        limit as u16
    }
}

/// Digit group targeted by the two-stage odometer editor.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum OdometerStage {
    /// Editing the three leading digits (steps of 1 000 km and up).
    Thousands,
    /// Editing the three trailing digits (steps of 1 km and up).
    Hundreds,
}

/// Applies a delta to the odometer in kilometres. Each stage has its own
/// delta-to-magnitude table; overflow or underflow past the six-digit range
/// snaps to zero.
pub fn apply_odometer(stage: OdometerStage, kilometres: u32, delta: DigitDelta) -> u32 {
    let change: i64 = match stage {
        OdometerStage::Thousands => match delta {
            DigitDelta::Add100 => 100_000,
            DigitDelta::Add10 => 10_000,
            DigitDelta::Add1 => 1_000,
            DigitDelta::Sub100 => -100_000,
            DigitDelta::Sub10 => -10_000,
            DigitDelta::Sub1 => -1_000,
            DigitDelta::Add1000 | DigitDelta::Sub1000 => return kilometres,
        },
        OdometerStage::Hundreds => i64::from(delta.value()),
    };
    let kilometres = i64::from(kilometres) + change;
    if kilometres < 0 || kilometres > i64::from(ODOMETER_MAX_KM) {
        0
    } else {
        kilometres as u32
    }
}

/// Applies a delta to the oil temperature limit; out of range snaps to zero.
/// The thousands digit carries the same weight as the units digit.
pub fn apply_max_temperature(limit: u16, delta: DigitDelta) -> u16 {
    let change = match delta {
        DigitDelta::Add1000 => 1,
        DigitDelta::Sub1000 => -1,
        other => other.value(),
    };
    let limit = i32::from(limit) + change;
    if limit < 0 || limit > i32::from(MAX_TEMPERATURE_LIMIT) {
        0
    } else {
        limit as u16
    }
}

/// Applies a delta to the settings-menu cursor. Only the units digit
/// participates; out of range snaps to zero.
pub fn apply_setting_cursor(cursor: u8, delta: DigitDelta) -> u8 {
    let change = match delta {
        DigitDelta::Add1 => 1,
        DigitDelta::Sub1 => -1,
        _ => return cursor,
    };
    let cursor = i16::from(cursor) + change;
    if cursor < 0 || cursor > i16::from(SETTING_CURSOR_MAX) {
        0
    } else {
        cursor as u8
    }
}

/// Applies a ±1 delta to an enumerated index over `count` entries; leaving
/// the range snaps back to the first entry.
pub fn apply_wrapping_index(index: u8, count: u8, delta: DigitDelta) -> u8 {
    let change = match delta {
        DigitDelta::Add1 => 1,
        DigitDelta::Sub1 => -1,
        _ => return index,
    };
    let index = i16::from(index) + change;
    if index < 0 || index >= i16::from(count) {
        0
    } else {
        index as u8
    }
}

/// Applies a ±1 delta to the display brightness; leaving 0..=15 snaps to 0.
pub fn apply_display_brightness(level: u8, delta: DigitDelta) -> u8 {
    let change = match delta {
        DigitDelta::Add1 => 1,
        DigitDelta::Sub1 => -1,
        _ => return level,
    };
    let level = i16::from(level) + change;
    if level >= 16 || level < 0 { 0 } else { level as u8 }
}

/// Applies a ±10/±1 delta to the backlight brightness; leaving 0..=14 snaps
/// to 1.
pub fn apply_backlight_brightness(level: u8, delta: DigitDelta) -> u8 {
    let change = match delta {
        DigitDelta::Add10 | DigitDelta::Sub10 | DigitDelta::Add1 | DigitDelta::Sub1 => {
            delta.value()
        }
        _ => return level,
    };
    let level = i32::from(level) + change;
    if level >= 15 || level < 0 { 1 } else { level as u8 }
}

/// Applies a ±1 delta to the equipped sensor count; leaving 1..=3 snaps to 1.
pub fn apply_sensor_count(count: u8, delta: DigitDelta) -> u8 {
    let change = match delta {
        DigitDelta::Add1 => 1,
        DigitDelta::Sub1 => -1,
        _ => return count,
    };
    let count = i16::from(count) + change;
    if !(1..=3).contains(&count) { 1 } else { count as u8 }
}

/// Applies a ±10/±1 delta to the auto-off delay in hours; leaving 1..=24
/// snaps to 1.
pub fn apply_auto_off(hours: u8, delta: DigitDelta) -> u8 {
    let change = match delta {
        DigitDelta::Add10 | DigitDelta::Sub10 | DigitDelta::Add1 | DigitDelta::Sub1 => {
            delta.value()
        }
        _ => return hours,
    };
    let hours = i32::from(hours) + change;
    if !(1..=24).contains(&hours) { 1 } else { hours as u8 }
}

/// Applies a delta to the accelerometer trim: the tens digit moves the X
/// offset, the units digit the Z offset, each by one tenth of a g and each
/// clamped to stay inside [-10, 10).
pub fn apply_imu_trim(trim: ImuTrim, delta: DigitDelta) -> ImuTrim {
    let mut trim = trim;
    match delta {
        DigitDelta::Add10 | DigitDelta::Sub10 => {
            let step: i8 = if delta == DigitDelta::Add10 { 1 } else { -1 };
            let next = trim.x_tenths + step;
            if (-10..10).contains(&next) {
                trim.x_tenths = next;
            }
        }
        DigitDelta::Add1 | DigitDelta::Sub1 => {
            let step: i8 = if delta == DigitDelta::Add1 { 1 } else { -1 };
            let next = trim.z_tenths + step;
            if (-10..10).contains(&next) {
                trim.z_tenths = next;
            }
        }
        _ => {}
    }
    trim
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digit_buttons_map_to_signed_deltas() {
        assert_eq!(
            DigitDelta::from_button(ButtonId::Thousands, false),
            Some(DigitDelta::Add1000)
        );
        assert_eq!(
            DigitDelta::from_button(ButtonId::Thousands, true),
            Some(DigitDelta::Sub1000)
        );
        assert_eq!(
            DigitDelta::from_button(ButtonId::Units, true),
            Some(DigitDelta::Sub1)
        );
        assert_eq!(DigitDelta::from_button(ButtonId::Set, false), None);
    }

    #[test]
    fn time_digits_wrap_hours_and_minutes() {
        assert_eq!(apply_time(23, 59, DigitDelta::Add1), (23, 0));
        assert_eq!(apply_time(23, 59, DigitDelta::Add100), (0, 59));
        assert_eq!(apply_time(0, 0, DigitDelta::Sub1), (0, 59));
        assert_eq!(apply_time(0, 0, DigitDelta::Sub1000), (14, 0));
        assert_eq!(apply_time(12, 55, DigitDelta::Add10), (12, 5));
    }

    #[test]
    fn year_snaps_to_default_outside_range() {
        assert_eq!(apply_year(2024, DigitDelta::Add1), 2025);
        assert_eq!(apply_year(2095, DigitDelta::Add10), DEFAULT_YEAR);
        assert_eq!(apply_year(1990, DigitDelta::Sub10), DEFAULT_YEAR);
        assert_eq!(apply_year(2100, DigitDelta::Sub1), 2099);
        // Big digits are ignored for the year field.
        assert_eq!(apply_year(2024, DigitDelta::Add1000), 2024);
    }

    #[test]
    fn date_digits_snap_to_first() {
        assert_eq!(apply_date(12, 1, DigitDelta::Add100), (1, 1));
        assert_eq!(apply_date(1, 31, DigitDelta::Add1), (1, 1));
        assert_eq!(apply_date(1, 1, DigitDelta::Sub1), (1, 1));
        assert_eq!(apply_date(3, 12, DigitDelta::Add10), (3, 22));
        assert_eq!(apply_date(3, 25, DigitDelta::Add10), (3, 1));
    }

    #[test]
    fn speed_limit_wraps_to_zero_past_400() {
        assert_eq!(apply_speed_limit(395, DigitDelta::Add100), 0);
        assert_eq!(apply_speed_limit(0, DigitDelta::Sub1), 0);
        assert_eq!(apply_speed_limit(120, DigitDelta::Add10), 130);
        assert_eq!(apply_speed_limit(120, DigitDelta::Add1000), 120);
    }

    #[test]
    fn odometer_thousands_stage_overflows_to_zero() {
        assert_eq!(
            apply_odometer(OdometerStage::Thousands, 999_900, DigitDelta::Add100),
            0
        );
        assert_eq!(
            apply_odometer(OdometerStage::Thousands, 5_000, DigitDelta::Add1),
            6_000
        );
        assert_eq!(
            apply_odometer(OdometerStage::Thousands, 5_000, DigitDelta::Sub100),
            0
        );
        // The thousands digit button has no mapping in this stage.
        assert_eq!(
            apply_odometer(OdometerStage::Thousands, 5_000, DigitDelta::Add1000),
            5_000
        );
    }

    #[test]
    fn odometer_hundreds_stage_uses_identity_weights() {
        assert_eq!(
            apply_odometer(OdometerStage::Hundreds, 123_456, DigitDelta::Add1000),
            124_456
        );
        assert_eq!(
            apply_odometer(OdometerStage::Hundreds, 10, DigitDelta::Sub100),
            0
        );
        assert_eq!(
            apply_odometer(OdometerStage::Hundreds, 999_999, DigitDelta::Add1),
            0
        );
    }

    #[test]
    fn max_temperature_treats_thousands_as_units() {
        assert_eq!(apply_max_temperature(90, DigitDelta::Add1000), 91);
        assert_eq!(apply_max_temperature(90, DigitDelta::Sub1000), 89);
        assert_eq!(apply_max_temperature(145, DigitDelta::Add10), 0);
        assert_eq!(apply_max_temperature(0, DigitDelta::Sub1), 0);
    }

    #[test]
    fn setting_cursor_stays_inside_its_range() {
        assert_eq!(apply_setting_cursor(9, DigitDelta::Add1), 0);
        assert_eq!(apply_setting_cursor(0, DigitDelta::Sub1), 0);
        assert_eq!(apply_setting_cursor(4, DigitDelta::Add1), 5);
        assert_eq!(apply_setting_cursor(4, DigitDelta::Add10), 4);
    }

    #[test]
    fn wrapping_index_snaps_to_zero() {
        assert_eq!(apply_wrapping_index(2, 3, DigitDelta::Add1), 0);
        assert_eq!(apply_wrapping_index(0, 3, DigitDelta::Sub1), 0);
        assert_eq!(apply_wrapping_index(0, 3, DigitDelta::Add1), 1);
    }

    #[test]
    fn brightness_rules_match_their_ranges() {
        assert_eq!(apply_display_brightness(15, DigitDelta::Add1), 0);
        assert_eq!(apply_display_brightness(0, DigitDelta::Sub1), 0);
        assert_eq!(apply_display_brightness(7, DigitDelta::Add1), 8);

        assert_eq!(apply_backlight_brightness(14, DigitDelta::Add1), 1);
        assert_eq!(apply_backlight_brightness(0, DigitDelta::Sub1), 1);
        assert_eq!(apply_backlight_brightness(4, DigitDelta::Add10), 14);
    }

    #[test]
    fn sensor_count_and_auto_off_snap_to_one() {
        assert_eq!(apply_sensor_count(3, DigitDelta::Add1), 1);
        assert_eq!(apply_sensor_count(1, DigitDelta::Sub1), 1);
        assert_eq!(apply_sensor_count(1, DigitDelta::Add1), 2);

        assert_eq!(apply_auto_off(24, DigitDelta::Add1), 1);
        assert_eq!(apply_auto_off(1, DigitDelta::Sub1), 1);
        assert_eq!(apply_auto_off(14, DigitDelta::Add10), 24);
        assert_eq!(apply_auto_off(20, DigitDelta::Add10), 1);
    }

    #[test]
    fn imu_trim_clamps_each_axis() {
        let trim = ImuTrim::default();
        let trim = apply_imu_trim(trim, DigitDelta::Add10);
        assert_eq!(trim.x_tenths, 1);
        assert_eq!(trim.z_tenths, 0);

        let trim = apply_imu_trim(trim, DigitDelta::Sub1);
        assert_eq!(trim.z_tenths, -1);

        let mut saturated = ImuTrim {
            x_tenths: 9,
            z_tenths: -10,
        };
        saturated = apply_imu_trim(saturated, DigitDelta::Add10);
        assert_eq!(saturated.x_tenths, 9);
        saturated = apply_imu_trim(saturated, DigitDelta::Sub1);
        assert_eq!(saturated.z_tenths, -10);
    }
}
