//! Independent watchdog feeder.
//!
//! The alarm takeover contract requires a feed at least once per second;
//! the window below leaves comfortable margin over that.

use embassy_stm32::peripherals::IWDG;
use embassy_stm32::wdg::IndependentWatchdog;
use obc_core::hal::Watchdog;

/// Watchdog timeout in microseconds.
const WATCHDOG_TIMEOUT_US: u32 = 5_000_000;

pub struct IwdgFeeder {
    watchdog: IndependentWatchdog<'static, IWDG>,
}

impl IwdgFeeder {
    pub fn new(peripheral: IWDG) -> Self {
        let mut watchdog = IndependentWatchdog::new(peripheral, WATCHDOG_TIMEOUT_US);
        watchdog.unleash();
        Self { watchdog }
    }
}

impl Watchdog for IwdgFeeder {
    fn feed(&mut self) {
        self.watchdog.pet();
    }
}
