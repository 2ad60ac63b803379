//! Monotonic stopwatch primitive.
//!
//! One engine instance backs the free-running stopwatch, another the
//! acceleration timer, and the lap timer embeds a third. The engine never
//! reads a clock itself; every operation takes the current instant so the
//! same code runs under the firmware tick and the test suite's mock clock.

use core::fmt::Write;
use core::time::Duration;

use crate::hal::{DisplayText, Monotonic};

/// How long a captured result (lap split, final acceleration time) stays on
/// the display before live data resumes.
pub const RESULT_HOLD: Duration = Duration::from_secs(3);

/// Stopwatch state machine.
///
/// `elapsed` accumulates across stop/start cycles until `reset`. A hold
/// window freezes the most recent captured value on the display; resetting
/// the engine keeps the window alive so a final result can outlive the run
/// that produced it.
#[derive(Copy, Clone, Debug)]
pub struct TimerEngine<I> {
    resumed_at: Option<I>,
    accumulated: Duration,
    started: bool,
    lap_mark: Duration,
    captured: Duration,
    hold_until: Option<I>,
}

impl<I: Monotonic> TimerEngine<I> {
    pub const fn new() -> Self {
        Self {
            resumed_at: None,
            accumulated: Duration::ZERO,
            started: false,
            lap_mark: Duration::ZERO,
            captured: Duration::ZERO,
            hold_until: None,
        }
    }

    /// Starts the session, or resumes it after a stop.
    pub fn start(&mut self, now: I) {
        if !self.started {
            self.started = true;
            self.accumulated = Duration::ZERO;
            self.lap_mark = Duration::ZERO;
        }
        self.resumed_at = Some(now);
    }

    /// Stops the session, freezing the elapsed value.
    pub fn stop(&mut self, now: I) {
        self.accumulated = self.elapsed(now);
        self.resumed_at = None;
    }

    /// Clears the run state. The current hold window and captured value
    /// survive so a just-captured result stays visible.
    pub fn reset(&mut self) {
        self.started = false;
        self.resumed_at = None;
        self.accumulated = Duration::ZERO;
        self.lap_mark = Duration::ZERO;
    }

    pub const fn is_running(&self) -> bool {
        self.resumed_at.is_some()
    }

    /// `true` once `start` has been called and before `reset`.
    pub const fn is_started(&self) -> bool {
        self.started
    }

    /// Elapsed time: live while running, frozen otherwise.
    pub fn elapsed(&self, now: I) -> Duration {
        match self.resumed_at {
            Some(resumed) => self.accumulated + now.since(resumed),
            None => self.accumulated,
        }
    }

    /// Elapsed time since the last lap marker (the whole run when no lap has
    /// been recorded yet).
    pub fn lap_elapsed(&self, now: I) -> Duration {
        self.elapsed(now).saturating_sub(self.lap_mark)
    }

    /// Records a lap split relative to the previous marker and opens a
    /// [`RESULT_HOLD`] display window for it.
    pub fn lap(&mut self, now: I) {
        let elapsed = self.elapsed(now);
        self.captured = elapsed.saturating_sub(self.lap_mark);
        self.lap_mark = elapsed;
        self.hold_until = Some(now.advance(RESULT_HOLD));
    }

    /// Captures the current elapsed value and holds it for `hold`.
    pub fn capture(&mut self, now: I, hold: Duration) {
        self.captured = self.elapsed(now);
        self.hold_until = Some(now.advance(hold));
    }

    /// Most recently captured value (lap split or final time).
    pub const fn captured(&self) -> Duration {
        self.captured
    }

    /// `true` while a captured value should be displayed instead of live
    /// data.
    pub fn in_hold(&self, now: I) -> bool {
        self.hold_until.is_some_and(|deadline| now < deadline)
    }
}

impl<I: Monotonic> Default for TimerEngine<I> {
    fn default() -> Self {
        Self::new()
    }
}

/// Formats an elapsed duration: `M.SS.t` (minutes, seconds, tenths) under an
/// hour, `H.MM.SS` with reduced precision from one hour up.
pub fn format_elapsed(elapsed: Duration) -> DisplayText {
    let mut text = DisplayText::new();
    let total_seconds = elapsed.as_secs();
    if total_seconds < 3_600 {
        let minutes = total_seconds / 60;
        let seconds = total_seconds % 60;
        let tenths = elapsed.subsec_millis() / 100;
        let _ = write!(text, "{minutes:>2}.{seconds:02}.{tenths}");
    } else {
        let hours = total_seconds / 3_600;
        let minutes = (total_seconds % 3_600) / 60;
        let seconds = total_seconds % 60;
        let _ = write!(text, "{hours}.{minutes:02}.{seconds:02}");
    }
    text
}

/// Formats a signed split (the delay against the fastest lap), sign first.
pub fn format_signed_millis(millis: i64) -> DisplayText {
    let mut text = DisplayText::new();
    let sign = if millis < 0 { '-' } else { '+' };
    let magnitude = millis.unsigned_abs();
    let minutes = magnitude / 60_000;
    let seconds = (magnitude % 60_000) / 1_000;
    let tenths = (magnitude % 1_000) / 100;
    let _ = write!(text, "{sign}{minutes}.{seconds:02}.{tenths}");
    text
}
