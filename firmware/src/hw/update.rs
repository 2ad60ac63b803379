//! Firmware update surface.
//!
//! The transfer machinery (access point, HTTP, image download) is an
//! external component; this adapter only hands control over and performs the
//! system reset the update mode requests.

use obc_core::hal::UpdateAgent;

pub struct SystemUpdater;

impl UpdateAgent for SystemUpdater {
    fn begin_update(&mut self) {
        defmt::info!("update: handing over to the update agent");
    }

    fn restart(&mut self) {
        defmt::info!("update: system reset requested");
        cortex_m::peripheral::SCB::sys_reset();
    }
}
