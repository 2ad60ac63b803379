//! GPS front end.
//!
//! Sentence parsing happens outside this crate; whatever drives the receiver
//! publishes decoded fixes into the shared [`FixCell`]. The controller-facing
//! adapter snapshots the cell on `refresh`, which is the only point where a
//! new fix becomes visible to the render path — exactly the cadence the
//! scheduler's checkpoints expect.

use core::cell::Cell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::ThreadModeRawMutex;
use obc_core::hal::{GpsFix, GpsReceiver};

/// Shared slot the external sentence decoder publishes into.
pub struct FixCell {
    inner: Mutex<ThreadModeRawMutex, Cell<Option<GpsFix>>>,
}

impl FixCell {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Cell::new(None)),
        }
    }

    /// Publishes a decoded fix, or `None` on signal loss.
    pub fn publish(&self, fix: Option<GpsFix>) {
        self.inner.lock(|cell| cell.set(fix));
    }

    fn snapshot(&self) -> Option<GpsFix> {
        self.inner.lock(Cell::get)
    }
}

impl Default for FixCell {
    fn default() -> Self {
        Self::new()
    }
}

pub struct GpsFrontEnd {
    cell: &'static FixCell,
    latest: Option<GpsFix>,
}

impl GpsFrontEnd {
    pub const fn new(cell: &'static FixCell) -> Self {
        Self { cell, latest: None }
    }
}

impl GpsReceiver for GpsFrontEnd {
    fn has_fix(&self) -> bool {
        self.latest.is_some()
    }

    fn fix(&self) -> Option<GpsFix> {
        self.latest
    }

    fn refresh(&mut self) {
        self.latest = self.cell.snapshot();
    }
}
