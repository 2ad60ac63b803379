//! The display-mode catalog.
//!
//! Exactly one [`Mode`] is active at any instant. The controller's
//! dispatchers and the threshold monitor are the only places that assign it;
//! everything else matches on the variant. Edit sub-modes and the two alarm
//! takeovers hold the mode-switch lock for as long as they are active.

use crate::input::ButtonId;
use crate::lexicon::Word;

/// One display/behavior state of the controller.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Mode {
    Hour,
    Date,
    SetHour,
    SetYear,
    SetDate,
    Speed,
    SetLimit,
    AlarmOverspeed,
    Acceleration,
    LapTiming,
    Odometer,
    SetOdometerThousands,
    SetOdometerHundreds,
    Stopwatch,
    Pressure,
    Temperature,
    SetMaxTemperature,
    AlarmOverheat,
    Voltage,
    Altitude,
    Heading,
    GSensor,
    SettingMenu,
    SetLanguage,
    SetClockFormat,
    SetUnit,
    SwUpdate,
    SetDisplayBrightness,
    SetSensorCount,
    SetAutoOff,
    SetBacklightBrightness,
    SetImuTrim,
}

impl Mode {
    /// `true` for the two threshold-takeover modes.
    pub const fn is_alarm(self) -> bool {
        matches!(self, Mode::AlarmOverspeed | Mode::AlarmOverheat)
    }

    /// `true` for every mode whose render consumes the pending digit delta.
    pub const fn accepts_digits(self) -> bool {
        matches!(
            self,
            Mode::SetHour
                | Mode::SetYear
                | Mode::SetDate
                | Mode::SetLimit
                | Mode::SetOdometerThousands
                | Mode::SetOdometerHundreds
                | Mode::SetMaxTemperature
                | Mode::SettingMenu
                | Mode::SetLanguage
                | Mode::SetClockFormat
                | Mode::SetUnit
                | Mode::SetDisplayBrightness
                | Mode::SetSensorCount
                | Mode::SetAutoOff
                | Mode::SetBacklightBrightness
                | Mode::SetImuTrim
        )
    }

    /// The mode-switch button whose recent release makes this mode display
    /// its name instead of live data, if it has one.
    pub const fn selector(self) -> Option<ButtonId> {
        match self {
            Mode::Hour | Mode::Date => Some(ButtonId::Clock),
            Mode::Speed => Some(ButtonId::Speed),
            Mode::Acceleration => Some(ButtonId::Accel),
            Mode::LapTiming => Some(ButtonId::Lap),
            Mode::Odometer => Some(ButtonId::Odometer),
            Mode::Stopwatch => Some(ButtonId::Stopwatch),
            Mode::Pressure | Mode::Temperature | Mode::Voltage => Some(ButtonId::Sensors),
            Mode::GSensor | Mode::Heading | Mode::Altitude => Some(ButtonId::Nav),
            _ => None,
        }
    }

    /// Translated display name for the label affordance, if the mode has
    /// one. Setting editors use fixed spellings instead.
    pub const fn word(self) -> Option<Word> {
        match self {
            Mode::Hour => Some(Word::Hour),
            Mode::Date => Some(Word::Date),
            Mode::Speed => Some(Word::Speed),
            Mode::Acceleration => Some(Word::Accel),
            Mode::LapTiming => Some(Word::Lap),
            Mode::Odometer => Some(Word::Odo),
            Mode::Stopwatch => Some(Word::Timer),
            Mode::Pressure => Some(Word::Oil),
            Mode::Temperature => Some(Word::Temp),
            Mode::Voltage => Some(Word::Volt),
            Mode::Altitude => Some(Word::Alt),
            Mode::Heading => Some(Word::Hdg),
            Mode::GSensor => Some(Word::GSens),
            _ => None,
        }
    }

    /// The setting editor behind each settings-menu cursor position.
    /// Position 9 is unassigned and leaves the menu where it is.
    pub const fn setting_editor(cursor: u8) -> Option<Mode> {
        match cursor {
            0 => Some(Mode::SetLanguage),
            1 => Some(Mode::SetClockFormat),
            2 => Some(Mode::SetUnit),
            3 => Some(Mode::SwUpdate),
            4 => Some(Mode::SetDisplayBrightness),
            5 => Some(Mode::SetSensorCount),
            6 => Some(Mode::SetAutoOff),
            7 => Some(Mode::SetBacklightBrightness),
            8 => Some(Mode::SetImuTrim),
            _ => None,
        }
    }

    /// Fixed spelling shown when the set button was just released inside a
    /// setting editor.
    pub const fn editor_label(self) -> Option<&'static str> {
        match self {
            Mode::SetLimit => None, // translated, handled by the renderer
            Mode::SetMaxTemperature => Some(" MAX."),
            Mode::SetLanguage => Some("LANGUA."),
            Mode::SetClockFormat => Some("12/24"),
            Mode::SetUnit => Some("UNIT"),
            Mode::SwUpdate => Some("UPDATE"),
            Mode::SetDisplayBrightness => Some("BRIGHT"),
            Mode::SetSensorCount => Some("SENS.NB"),
            Mode::SetAutoOff => Some("AUT.OFF"),
            Mode::SetBacklightBrightness => Some("BCKLGT"),
            Mode::SetImuTrim => Some("G.ERROR"),
            _ => None,
        }
    }
}
