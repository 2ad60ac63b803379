//! User-configurable settings: keys, typed values, and documented defaults.
//!
//! The persistence backend is a collaborator (§ external interfaces); the
//! engine reads and writes through [`SettingsStore`] and never assumes a key
//! is present. Every accessor on [`SettingsExt`] falls back to the documented
//! default when the store reports the key missing or holds a value of the
//! wrong shape.

use crate::units::UnitSystem;

/// Display language selected in the settings menu.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Language {
    #[default]
    English,
    French,
    German,
}

impl Language {
    /// Number of selectable languages.
    pub const COUNT: u8 = 3;

    /// Deterministic index for the settings editor.
    pub const fn as_index(self) -> u8 {
        match self {
            Language::English => 0,
            Language::French => 1,
            Language::German => 2,
        }
    }

    /// Attempts to construct a [`Language`] from a raw index.
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Language::English),
            1 => Some(Language::French),
            2 => Some(Language::German),
            _ => None,
        }
    }

    /// Two-letter code shown while editing the language setting.
    pub const fn code(self) -> &'static str {
        match self {
            Language::English => "EN",
            Language::French => "FR",
            Language::German => "DE",
        }
    }
}

/// Clock presentation format.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ClockFormat {
    #[default]
    TwentyFourHour,
    TwelveHour,
}

impl ClockFormat {
    /// The other format; the editor toggles between the two.
    pub const fn toggled(self) -> Self {
        match self {
            ClockFormat::TwentyFourHour => ClockFormat::TwelveHour,
            ClockFormat::TwelveHour => ClockFormat::TwentyFourHour,
        }
    }

    /// Spelling shown while editing the clock format setting.
    pub const fn display_name(self) -> &'static str {
        match self {
            ClockFormat::TwentyFourHour => "24H",
            ClockFormat::TwelveHour => "12AMPM",
        }
    }
}

/// Accelerometer calibration offsets in tenths of a g.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ImuTrim {
    pub x_tenths: i8,
    pub z_tenths: i8,
}

/// Key identifying one persisted setting.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SettingKey {
    ClockFormat,
    Unit,
    Language,
    DisplayBrightness,
    BacklightBrightness,
    SensorCount,
    AutoOffHours,
    ImuTrim,
    Odometer,
}

impl SettingKey {
    /// Number of distinct keys; storage backends size their tables with this.
    pub const COUNT: usize = 9;

    /// Deterministic index for table-backed stores.
    pub const fn as_index(self) -> usize {
        match self {
            SettingKey::ClockFormat => 0,
            SettingKey::Unit => 1,
            SettingKey::Language => 2,
            SettingKey::DisplayBrightness => 3,
            SettingKey::BacklightBrightness => 4,
            SettingKey::SensorCount => 5,
            SettingKey::AutoOffHours => 6,
            SettingKey::ImuTrim => 7,
            SettingKey::Odometer => 8,
        }
    }
}

/// Typed value stored under a [`SettingKey`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SettingValue {
    ClockFormat(ClockFormat),
    Unit(UnitSystem),
    Language(Language),
    /// Brightness levels, 0..=15.
    Level(u8),
    /// Equipped analog sensor count, 1..=3.
    Count(u8),
    /// Auto-off delay in hours, 1..=24.
    Hours(u8),
    Trim(ImuTrim),
    /// Odometer reading in tenths of a kilometre.
    OdometerTenths(u32),
}

/// Persistence collaborator. A missing key is reported as `None`, never as an
/// error; the engine substitutes the documented default.
pub trait SettingsStore {
    /// Reads the stored value for `key`, if any.
    fn read(&self, key: SettingKey) -> Option<SettingValue>;

    /// Stores `value` under `key`.
    fn write(&mut self, key: SettingKey, value: SettingValue);
}

/// Default display brightness level.
pub const DEFAULT_DISPLAY_BRIGHTNESS: u8 = 8;
/// Default backlight brightness level.
pub const DEFAULT_BACKLIGHT_BRIGHTNESS: u8 = 4;
/// Default equipped sensor count (battery voltage only).
pub const DEFAULT_SENSOR_COUNT: u8 = 1;
/// Default auto-off delay in hours.
pub const DEFAULT_AUTO_OFF_HOURS: u8 = 2;

/// Typed accessors with documented fallbacks, available on every store.
pub trait SettingsExt: SettingsStore {
    fn clock_format(&self) -> ClockFormat {
        match self.read(SettingKey::ClockFormat) {
            Some(SettingValue::ClockFormat(format)) => format,
            _ => ClockFormat::default(),
        }
    }

    fn unit(&self) -> UnitSystem {
        match self.read(SettingKey::Unit) {
            Some(SettingValue::Unit(system)) => system,
            _ => UnitSystem::default(),
        }
    }

    fn language(&self) -> Language {
        match self.read(SettingKey::Language) {
            Some(SettingValue::Language(language)) => language,
            _ => Language::default(),
        }
    }

    fn display_brightness(&self) -> u8 {
        match self.read(SettingKey::DisplayBrightness) {
            Some(SettingValue::Level(level)) => level,
            _ => DEFAULT_DISPLAY_BRIGHTNESS,
        }
    }

    fn backlight_brightness(&self) -> u8 {
        match self.read(SettingKey::BacklightBrightness) {
            Some(SettingValue::Level(level)) => level,
            _ => DEFAULT_BACKLIGHT_BRIGHTNESS,
        }
    }

    fn sensor_count(&self) -> u8 {
        match self.read(SettingKey::SensorCount) {
            Some(SettingValue::Count(count)) => count,
            _ => DEFAULT_SENSOR_COUNT,
        }
    }

    fn auto_off_hours(&self) -> u8 {
        match self.read(SettingKey::AutoOffHours) {
            Some(SettingValue::Hours(hours)) => hours,
            _ => DEFAULT_AUTO_OFF_HOURS,
        }
    }

    fn imu_trim(&self) -> ImuTrim {
        match self.read(SettingKey::ImuTrim) {
            Some(SettingValue::Trim(trim)) => trim,
            _ => ImuTrim::default(),
        }
    }

    fn odometer_tenths(&self) -> u32 {
        match self.read(SettingKey::Odometer) {
            Some(SettingValue::OdometerTenths(tenths)) => tenths,
            _ => 0,
        }
    }
}

impl<S: SettingsStore + ?Sized> SettingsExt for S {}
