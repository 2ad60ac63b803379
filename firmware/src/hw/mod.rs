//! Thin hardware adapters implementing the `obc-core` collaborator traits.
//!
//! Each adapter owns only the register traffic needed to satisfy its narrow
//! trait; every policy decision lives in the core. The I2C bus is shared by
//! the display, RTC, and IMU through a `RefCell` — all of them are driven
//! from the single controller task, so no cross-task locking is required.

use core::cell::RefCell;

use embassy_stm32::i2c::I2c;
use embassy_stm32::mode::Blocking;
use obc_core::hal::Board;

use crate::instant::ObcInstant;
use crate::lexicon::Translations;

pub mod adc;
pub mod display;
pub mod gps;
pub mod imu;
pub mod power;
pub mod rtc;
pub mod settings;
pub mod update;
pub mod watchdog;

/// The blocking I2C bus shared by the panel peripherals.
pub type SharedI2c = RefCell<I2c<'static, Blocking>>;

/// Concrete collaborator bundle handed to the controller.
pub struct ObcBoard {
    pub display: display::SegDisplay,
    pub rtc: rtc::Ds3231,
    pub imu: imu::Mpu6050,
    pub adc: adc::SenderInputs,
    pub gps: gps::GpsFrontEnd,
    pub settings: settings::RamSettingsStore,
    pub watchdog: watchdog::IwdgFeeder,
    pub power: power::PowerPins,
    pub updater: update::SystemUpdater,
}

impl Board for ObcBoard {
    type Instant = ObcInstant;
    type Display = display::SegDisplay;
    type Rtc = rtc::Ds3231;
    type Imu = imu::Mpu6050;
    type Adc = adc::SenderInputs;
    type Gps = gps::GpsFrontEnd;
    type Store = settings::RamSettingsStore;
    type Dog = watchdog::IwdgFeeder;
    type Power = power::PowerPins;
    type Updater = update::SystemUpdater;
    type Words = Translations;

    fn display(&mut self) -> &mut Self::Display {
        &mut self.display
    }

    fn rtc(&mut self) -> &mut Self::Rtc {
        &mut self.rtc
    }

    fn imu(&mut self) -> &mut Self::Imu {
        &mut self.imu
    }

    fn adc(&mut self) -> &mut Self::Adc {
        &mut self.adc
    }

    fn gps(&mut self) -> &mut Self::Gps {
        &mut self.gps
    }

    fn settings(&mut self) -> &mut Self::Store {
        &mut self.settings
    }

    fn watchdog(&mut self) -> &mut Self::Dog {
        &mut self.watchdog
    }

    fn power(&mut self) -> &mut Self::Power {
        &mut self.power
    }

    fn updater(&mut self) -> &mut Self::Updater {
        &mut self.updater
    }

    fn lexicon(&self) -> &Translations {
        &Translations
    }
}
