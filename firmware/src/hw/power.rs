//! Power-hold latch and status LED.
//!
//! The latch pin keeps the supply alive after the ignition drops; releasing
//! it is what actually powers the unit down once the display is cleared.

use embassy_stm32::gpio::Output;
use obc_core::hal::PowerLatch;

pub struct PowerPins {
    latch: Output<'static>,
    led: Output<'static>,
}

impl PowerPins {
    pub fn new(latch: Output<'static>, led: Output<'static>) -> Self {
        Self { latch, led }
    }
}

impl PowerLatch for PowerPins {
    fn set_power(&mut self, on: bool) {
        if on {
            self.latch.set_high();
            self.led.set_high();
        } else {
            self.latch.set_low();
            self.led.set_low();
        }
    }
}
