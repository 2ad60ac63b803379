//! Geofenced lap timing on top of [`TimerEngine`].
//!
//! The first position sample after a session starts becomes the start line.
//! Because the scheduler runs much faster than the receiver updates,
//! consecutive duplicate coordinates are ignored; every distinct sample feeds
//! a proximity gate that completes a lap when the car re-enters the capture
//! radius after having moved out past the release radius (the hysteresis
//! keeps GPS scatter at the line from double-counting).

use core::time::Duration;

use heapless::Vec;
use micromath::F32Ext;

use crate::hal::{Monotonic, Position};
use crate::stopwatch::TimerEngine;

/// Re-entering this close to the start line completes the lap.
pub const LAP_CAPTURE_RADIUS_M: f32 = 25.0;
/// The car must first move at least this far from the start line.
pub const LAP_RELEASE_RADIUS_M: f32 = 50.0;
/// How long each post-lap display stage (lap time, delay, lap count) holds.
pub const LAP_STAGE_HOLD: Duration = Duration::from_secs(3);

/// Metres per degree of latitude.
const METRES_PER_DEGREE: f32 = 111_320.0;
const DEGREES_TO_RADIANS: f32 = core::f32::consts::PI / 180.0;

/// Flat-earth distance between two fixes, adequate at track scale.
pub fn distance_metres(a: Position, b: Position) -> f32 {
    let north = ((b.latitude - a.latitude) as f32) * METRES_PER_DEGREE;
    let mid_latitude = ((a.latitude + b.latitude) / 2.0) as f32 * DEGREES_TO_RADIANS;
    let east = ((b.longitude - a.longitude) as f32) * METRES_PER_DEGREE * mid_latitude.cos();
    (north * north + east * east).sqrt()
}

/// Start-line proximity gate with leave/return hysteresis.
#[derive(Copy, Clone, Debug, Default)]
struct ProximityGate {
    start: Option<Position>,
    outside: bool,
}

impl ProximityGate {
    fn set_start(&mut self, position: Position) {
        self.start = Some(position);
        self.outside = false;
    }

    const fn has_start(&self) -> bool {
        self.start.is_some()
    }

    fn clear(&mut self) {
        self.start = None;
        self.outside = false;
    }

    /// Feeds one distinct position sample; `true` when a lap just completed.
    fn observe(&mut self, position: Position) -> bool {
        let Some(start) = self.start else {
            return false;
        };
        let distance = distance_metres(start, position);
        if self.outside && distance <= LAP_CAPTURE_RADIUS_M {
            self.outside = false;
            return true;
        }
        if distance >= LAP_RELEASE_RADIUS_M {
            self.outside = true;
        }
        false
    }
}

/// What the lap-timer display should show during a hold stage.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LapDisplay {
    /// The just-completed lap time.
    LapTime,
    /// Delay against the fastest lap.
    Delay,
    /// Completed lap count.
    LapCount,
    /// Fastest lap of the finished session.
    FastestLap,
}

/// Lap timing session state.
pub struct LapTimer<I> {
    timer: TimerEngine<I>,
    gate: ProximityGate,
    previous_sample: Option<Position>,
    lap_count: u16,
    lap_time: Duration,
    fastest: Option<(Duration, u16)>,
    delay_millis: i64,
    stages: Vec<LapDisplay, 3>,
    stages_from: Option<I>,
}

impl<I: Monotonic> LapTimer<I> {
    pub const fn new() -> Self {
        Self {
            timer: TimerEngine::new(),
            gate: ProximityGate {
                start: None,
                outside: false,
            },
            previous_sample: None,
            lap_count: 0,
            lap_time: Duration::ZERO,
            fastest: None,
            delay_millis: 0,
            stages: Vec::new(),
            stages_from: None,
        }
    }

    /// Discards the whole session: laps, fastest lap, start line.
    pub fn reset(&mut self) {
        self.timer.reset();
        self.gate.clear();
        self.previous_sample = None;
        self.lap_count = 0;
        self.lap_time = Duration::ZERO;
        self.fastest = None;
        self.delay_millis = 0;
        self.stages.clear();
        self.stages_from = None;
    }

    /// Starts timing; the start line is set by the first position sample.
    pub fn start(&mut self, now: I) {
        self.timer.start(now);
    }

    /// Ends the session and queues the summary display stages.
    pub fn end(&mut self, now: I) {
        self.timer.stop(now);
        self.stages.clear();
        let _ = self.stages.push(LapDisplay::LapCount);
        if self.fastest.is_some() {
            let _ = self.stages.push(LapDisplay::FastestLap);
        }
        self.stages_from = Some(now);
    }

    pub const fn is_running(&self) -> bool {
        self.timer.is_running()
    }

    pub const fn lap_count(&self) -> u16 {
        self.lap_count
    }

    pub const fn lap_time(&self) -> Duration {
        self.lap_time
    }

    pub const fn fastest(&self) -> Option<(Duration, u16)> {
        self.fastest
    }

    pub const fn delay_millis(&self) -> i64 {
        self.delay_millis
    }

    /// Live elapsed time within the current lap.
    pub fn current_lap_elapsed(&self, now: I) -> Duration {
        self.timer.lap_elapsed(now)
    }

    /// Feeds one position sample. Duplicates of the previous sample are
    /// ignored entirely. Returns `true` when this sample completed a lap.
    pub fn observe_position(&mut self, position: Position, now: I) -> bool {
        if !self.timer.is_running() {
            return false;
        }
        if !self.gate.has_start() {
            self.gate.set_start(position);
            self.previous_sample = Some(position);
            return false;
        }
        if self
            .previous_sample
            .is_some_and(|previous| previous == position)
        {
            return false;
        }
        self.previous_sample = Some(position);
        if self.gate.observe(position) {
            self.complete_lap(now);
            return true;
        }
        false
    }

    /// Display stage currently active after a completed lap or a finished
    /// session, if any.
    pub fn display_stage(&self, now: I) -> Option<LapDisplay> {
        let from = self.stages_from?;
        let stage = (now.since(from).as_millis() / LAP_STAGE_HOLD.as_millis()) as usize;
        self.stages.get(stage).copied()
    }

    fn complete_lap(&mut self, now: I) {
        self.timer.lap(now);
        self.lap_time = self.timer.captured();
        self.lap_count += 1;

        let previous_fastest = self.fastest;
        if let Some((fastest_time, _)) = previous_fastest {
            self.delay_millis =
                self.lap_time.as_millis() as i64 - fastest_time.as_millis() as i64;
            if self.lap_time < fastest_time {
                self.fastest = Some((self.lap_time, self.lap_count));
            }
        } else {
            self.delay_millis = 0;
            self.fastest = Some((self.lap_time, self.lap_count));
        }

        self.stages.clear();
        let _ = self.stages.push(LapDisplay::LapTime);
        if previous_fastest.is_some() {
            let _ = self.stages.push(LapDisplay::Delay);
        }
        let _ = self.stages.push(LapDisplay::LapCount);
        self.stages_from = Some(now);
    }
}

impl<I: Monotonic> Default for LapTimer<I> {
    fn default() -> Self {
        Self::new()
    }
}
