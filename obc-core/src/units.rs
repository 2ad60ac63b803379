//! Unit-system metadata used by the renderers.
//!
//! The full conversion tables live with the collaborators; the engine only
//! needs the display acronyms, the choice of speed reading, and the couple of
//! conversions that appear directly in rendered values.

use crate::hal::SpeedOverGround;

/// Metres-to-feet factor for the altitude display.
pub const FEET_PER_METRE: f32 = 3.280_84;

/// Unit system selected in the settings menu.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    /// Number of selectable unit systems.
    pub const COUNT: u8 = 2;

    /// Deterministic index for the settings editor.
    pub const fn as_index(self) -> u8 {
        match self {
            UnitSystem::Metric => 0,
            UnitSystem::Imperial => 1,
        }
    }

    /// Attempts to construct a [`UnitSystem`] from a raw index.
    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(UnitSystem::Metric),
            1 => Some(UnitSystem::Imperial),
            _ => None,
        }
    }

    /// Spelling shown in the settings menu.
    pub const fn display_name(self) -> &'static str {
        match self {
            UnitSystem::Metric => "METRIC",
            UnitSystem::Imperial => "IMPERI.",
        }
    }

    /// Speed reading matching this unit system.
    pub fn speed_of(self, speed: SpeedOverGround) -> f32 {
        match self {
            UnitSystem::Metric => speed.kmh,
            UnitSystem::Imperial => speed.mph,
        }
    }

    pub const fn speed_acronym(self) -> &'static str {
        match self {
            UnitSystem::Metric => "KMH",
            UnitSystem::Imperial => "MPH",
        }
    }

    pub const fn pressure_acronym(self) -> &'static str {
        match self {
            UnitSystem::Metric => "BAR",
            UnitSystem::Imperial => "PSI",
        }
    }

    pub const fn temperature_acronym(self) -> &'static str {
        match self {
            UnitSystem::Metric => "C",
            UnitSystem::Imperial => "F",
        }
    }

    pub const fn altitude_acronym(self) -> &'static str {
        match self {
            UnitSystem::Metric => "M",
            UnitSystem::Imperial => "FT",
        }
    }

    /// Altitude in display units from the metres the receiver reports.
    pub fn altitude_from_metres(self, metres: f32) -> f32 {
        match self {
            UnitSystem::Metric => metres,
            UnitSystem::Imperial => metres * FEET_PER_METRE,
        }
    }
}
