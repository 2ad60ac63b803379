//! The cooperative controller loop.
//!
//! Drains pending button edges, runs one scheduler tick, then paces itself
//! on the tick outcome: the regular frame period, the one-second alarm
//! dwell, or a plain wait-for-input while powered down. Every wait races the
//! edge queue, so a press lands in the engine the moment it happens — which
//! is what lets a set press break an alarm hold on the alarm's next pass.

use embassy_futures::select::{Either, select};
use embassy_time::Timer;
use obc_core::controller::{ObcController, TickOutcome};
use portable_atomic::Ordering;

use crate::hw::ObcBoard;
use crate::instant::ObcInstant;

use super::{DROPPED_EDGES, EdgeReceiver};

/// Frame period of the cooperative loop.
const TICK_PERIOD_MS: u64 = 25;
/// Alarm alternation dwell.
const ALARM_DWELL_MS: u64 = 1_000;

#[embassy_executor::task]
pub async fn run(mut controller: ObcController<ObcBoard>, events: EdgeReceiver) -> ! {
    defmt::info!("obc: controller task started");
    loop {
        while let Ok(raw) = events.try_receive() {
            controller.handle_edge(raw.button, raw.edge, raw.at);
        }

        let dropped = DROPPED_EDGES.swap(0, Ordering::Relaxed);
        if dropped > 0 {
            defmt::warn!("obc: {} button edges dropped", dropped);
        }

        let dwell_ms = match controller.tick(ObcInstant::now()) {
            TickOutcome::Rendered => TICK_PERIOD_MS,
            TickOutcome::AlarmDwell => ALARM_DWELL_MS,
            TickOutcome::Unpowered => {
                // Idle until a wake press arrives; the dispatcher decides
                // whether it powers the system back up.
                let raw = events.receive().await;
                controller.handle_edge(raw.button, raw.edge, raw.at);
                continue;
            }
        };

        // Race the dwell against the edge queue so input is classified the
        // moment it arrives instead of at the next frame boundary.
        if let Either::Second(raw) = select(Timer::after_millis(dwell_ms), events.receive()).await
        {
            controller.handle_edge(raw.button, raw.edge, raw.at);
        }
    }
}
