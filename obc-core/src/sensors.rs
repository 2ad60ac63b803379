//! Conversion math for the analog engine-bay sensors.
//!
//! The formulas reproduce the deployed calibration exactly: oil pressure is a
//! linear transform of the 1.5x-scaled sender voltage with a 4 psi noise
//! floor, oil temperature inverts the thermistor divider through the
//! Steinhart-Hart coefficients of the fitted NTC, and battery voltage is a
//! 3x divider. A numerical failure in the thermistor inversion substitutes
//! [`TEMPERATURE_FALLBACK_K`] and continues; temperatures below the display
//! sentinel render as NODATA.

use core::fmt::Write;

use heapless::Vec;
use micromath::F32Ext;

use crate::hal::{AccelVector, DisplayText};
use crate::settings::ImuTrim;
use crate::units::UnitSystem;

/// Pressures below this read as zero (sender noise floor).
pub const PRESSURE_NOISE_FLOOR_PSI: f32 = 4.0;
/// psi to bar.
pub const PSI_TO_BAR: f32 = 0.068_948;
/// Kelvin substituted when the thermistor inversion fails numerically.
pub const TEMPERATURE_FALLBACK_K: f32 = 222.0;
/// Temperatures below this many display degrees render as NODATA.
pub const TEMPERATURE_SENTINEL: f32 = -50.0;

/// Thermistor series resistance term.
const THERMISTOR_SCALE: f32 = 39_600.0;
/// Steinhart-Hart coefficient A of the fitted NTC.
const STEINHART_A: f32 = 1.291_780_7e-3;
/// Steinhart-Hart coefficient B of the fitted NTC.
const STEINHART_B: f32 = 2.612_878_3e-4;
/// Steinhart-Hart coefficient C of the fitted NTC.
const STEINHART_C: f32 = 1.568_295_9e-7;

/// Oil pressure in psi from the sender pin voltage.
pub fn oil_pressure_psi(pin_voltage: f32) -> f32 {
    let sender_voltage = (pin_voltage * 1.5).abs();
    let psi = (sender_voltage - 0.25) * 150.0 / 4.0;
    if psi < PRESSURE_NOISE_FLOOR_PSI {
        0.0
    } else {
        psi
    }
}

/// Oil pressure in display units, rounded to one decimal.
pub fn oil_pressure(pin_voltage: f32, unit: UnitSystem) -> f32 {
    let psi = oil_pressure_psi(pin_voltage);
    let value = match unit {
        UnitSystem::Metric => psi * PSI_TO_BAR,
        UnitSystem::Imperial => psi,
    };
    round_tenths(value)
}

/// Oil temperature in kelvin from the thermistor pin voltage.
pub fn oil_temperature_kelvin(pin_voltage: f32) -> f32 {
    if pin_voltage <= 0.0 {
        return TEMPERATURE_FALLBACK_K;
    }
    let resistance = THERMISTOR_SCALE * (1.0 / pin_voltage - 10.0 / 33.0);
    if resistance <= 0.0 {
        return TEMPERATURE_FALLBACK_K;
    }
    let ln_r = resistance.ln();
    let inverse = STEINHART_A + STEINHART_B * ln_r + STEINHART_C * ln_r * ln_r * ln_r;
    if !inverse.is_finite() || inverse <= 0.0 {
        return TEMPERATURE_FALLBACK_K;
    }
    1.0 / inverse
}

/// Oil temperature in display degrees (Celsius or Fahrenheit).
pub fn oil_temperature(pin_voltage: f32, unit: UnitSystem) -> f32 {
    let celsius = oil_temperature_kelvin(pin_voltage) - 273.15;
    match unit {
        UnitSystem::Metric => celsius,
        UnitSystem::Imperial => celsius * 1.8 + 32.0,
    }
}

/// Battery voltage from the divider pin voltage.
pub fn battery_voltage(pin_voltage: f32) -> f32 {
    pin_voltage * 3.0
}

/// Longitudinal/vertical g magnitude with the calibration trim applied.
pub fn g_magnitude(accel: AccelVector, trim: ImuTrim) -> f32 {
    let x = accel.x + f32::from(trim.x_tenths) / 10.0;
    let z = accel.z + f32::from(trim.z_tenths) / 10.0;
    (x * x + z * z).sqrt()
}

/// Formats a temperature in display degrees, with the NODATA sentinel.
pub fn format_temperature(value: f32, unit: UnitSystem) -> DisplayText {
    let mut text = DisplayText::new();
    if value < TEMPERATURE_SENTINEL {
        let _ = text.push_str("NODATA");
        return text;
    }
    let rounded = value.round() as i32;
    let acronym = unit.temperature_acronym();
    if rounded >= 100 {
        let _ = write!(text, "{rounded:>5}{acronym}");
    } else {
        let _ = write!(text, "{rounded:>4}{acronym}");
    }
    text
}

fn round_tenths(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}

/// Number of samples the averager can hold between display refreshes.
pub const AVERAGER_CAPACITY: usize = 16;

/// Collects sensor samples between display refreshes so slow-moving values
/// are shown as a short-window average rather than instantaneous noise.
#[derive(Debug, Default)]
pub struct ReadingAverager {
    samples: Vec<f32, AVERAGER_CAPACITY>,
}

impl ReadingAverager {
    pub const fn new() -> Self {
        Self {
            samples: Vec::new(),
        }
    }

    /// Records one sample; silently drops it when the window is full.
    pub fn push(&mut self, sample: f32) {
        let _ = self.samples.push(sample);
    }

    /// Number of samples currently held.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Mean of the held samples, if any.
    pub fn mean(&self) -> Option<f32> {
        if self.samples.is_empty() {
            return None;
        }
        let sum: f32 = self.samples.iter().sum();
        Some(sum / self.samples.len() as f32)
    }

    /// Discards the held samples.
    pub fn clear(&mut self) {
        self.samples.clear();
    }
}
