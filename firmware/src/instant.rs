//! Monotonic timestamp binding between Embassy and `obc-core`.
//!
//! The engine is generic over its instant type; this newtype carries
//! Embassy's monotonic clock across that seam, converting to and from
//! `core::time::Duration` at the boundary.

#![allow(dead_code)]

use core::ops::{Add, Sub};
use core::time::Duration;

use embassy_time::Instant;
use obc_core::hal::Monotonic;

/// Embassy-backed instant satisfying the engine's [`Monotonic`] contract.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct ObcInstant(Instant);

impl ObcInstant {
    /// Captures the current monotonic time.
    pub fn now() -> Self {
        Self(Instant::now())
    }

    /// Returns the wrapped Embassy instant.
    pub const fn into_embassy(self) -> Instant {
        self.0
    }
}

impl From<Instant> for ObcInstant {
    fn from(instant: Instant) -> Self {
        Self(instant)
    }
}

impl Monotonic for ObcInstant {
    fn since(self, earlier: Self) -> Duration {
        let micros = self.0.as_micros().saturating_sub(earlier.0.as_micros());
        Duration::from_micros(micros)
    }

    fn advance(self, amount: Duration) -> Self {
        Self(self.0 + core_duration_to_embassy(amount))
    }
}

/// Converts a core duration to Embassy's representation, saturating.
pub fn core_duration_to_embassy(duration: Duration) -> embassy_time::Duration {
    let micros = u64::try_from(duration.as_micros()).unwrap_or(u64::MAX);
    embassy_time::Duration::from_micros(micros)
}

// Keep the Add/Sub surface aligned with what Embassy offers so task code can
// mix deadline math freely.
impl Add<embassy_time::Duration> for ObcInstant {
    type Output = Self;

    fn add(self, rhs: embassy_time::Duration) -> Self {
        Self(self.0 + rhs)
    }
}

impl Sub<ObcInstant> for ObcInstant {
    type Output = embassy_time::Duration;

    fn sub(self, rhs: ObcInstant) -> embassy_time::Duration {
        self.0 - rhs.0
    }
}
