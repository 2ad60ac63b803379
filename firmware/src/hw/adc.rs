//! Analog sender inputs: oil temperature, oil pressure, battery divider.
//!
//! Returns pin voltages only; the conversion formulas live in
//! `obc_core::sensors`.

use embassy_stm32::adc::Adc;
use embassy_stm32::peripherals::{ADC1, PB0, PB1, PB2};
use obc_core::hal::{AdcChannel, AnalogInputs};

/// Full-scale reference voltage.
const VREF: f32 = 3.3;
/// Twelve-bit conversion range.
const FULL_SCALE: f32 = 4_095.0;

pub struct SenderInputs {
    adc: Adc<'static, ADC1>,
    temperature_pin: PB0,
    pressure_pin: PB1,
    battery_pin: PB2,
}

impl SenderInputs {
    pub fn new(adc: Adc<'static, ADC1>, temperature_pin: PB0, pressure_pin: PB1, battery_pin: PB2) -> Self {
        Self {
            adc,
            temperature_pin,
            pressure_pin,
            battery_pin,
        }
    }
}

impl AnalogInputs for SenderInputs {
    fn voltage(&mut self, channel: AdcChannel) -> f32 {
        let raw = match channel {
            AdcChannel::OilTemperature => self.adc.blocking_read(&mut self.temperature_pin),
            AdcChannel::OilPressure => self.adc.blocking_read(&mut self.pressure_pin),
            AdcChannel::Battery => self.adc.blocking_read(&mut self.battery_pin),
        };
        f32::from(raw) * VREF / FULL_SCALE
    }
}
