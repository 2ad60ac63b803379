//! One task per physical button: waits on the EXTI edge, stamps it, and
//! forwards it to the controller task.
//!
//! The timestamp is captured here, next to the interrupt, so debounce and
//! long-press classification in the core are immune to queue latency. A full
//! queue drops the edge; the debouncer treats a lost bounce the same as a
//! suppressed one.

use embassy_stm32::exti::ExtiInput;
use obc_core::input::{BUTTON_COUNT, ButtonId, Edge};
use portable_atomic::Ordering;

use crate::instant::ObcInstant;

use super::{DROPPED_EDGES, EdgeSender, RawEdge};

#[embassy_executor::task(pool_size = BUTTON_COUNT)]
pub async fn run(mut pin: ExtiInput<'static>, button: ButtonId, events: EdgeSender) {
    loop {
        pin.wait_for_any_edge().await;
        let at = ObcInstant::now();
        let edge = if pin.is_low() {
            Edge::Pressed
        } else {
            Edge::Released
        };
        if events.try_send(RawEdge { button, edge, at }).is_err() {
            DROPPED_EDGES.fetch_add(1, Ordering::Relaxed);
        }
    }
}
