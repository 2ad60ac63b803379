//! Scripted board used by the integration suites.
//!
//! Every collaborator records what the controller did to it (display frames,
//! blink changes, watchdog feeds, power transitions, setting writes) and
//! plays back whatever the test scripted (RTC time, GPS fixes, sensor
//! voltages). Time is a plain millisecond counter.

#![allow(
    dead_code,
    clippy::cast_possible_truncation,
    clippy::return_self_not_must_use
)]

use core::time::Duration;
use std::collections::VecDeque;

use obc_core::controller::ObcController;
use obc_core::hal::{
    AccelVector, AdcChannel, BlinkRate, Board, DateTime, GpsFix, InertialSensor, Monotonic,
    Position, PowerLatch, RtcClock, SegmentDisplay, SpeedOverGround, UpdateAgent, Watchdog,
};
use obc_core::input::{ButtonId, Edge};
use obc_core::lexicon::{Lexicon, Word};
use obc_core::settings::{Language, SettingKey, SettingValue, SettingsStore};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct MockInstant(pub u64);

impl MockInstant {
    pub fn millis(value: u64) -> Self {
        Self(value)
    }
}

impl Monotonic for MockInstant {
    fn since(self, earlier: Self) -> Duration {
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }

    fn advance(self, amount: Duration) -> Self {
        Self(self.0 + amount.as_millis() as u64)
    }
}

#[derive(Default)]
pub struct MockDisplay {
    buffer: String,
    pub frames: Vec<String>,
    pub blink_changes: Vec<u8>,
    pub fill_count: u32,
    brightness: u8,
}

impl MockDisplay {
    pub fn last_frame(&self) -> &str {
        self.frames.last().map_or("", String::as_str)
    }

    pub fn current_blink(&self) -> u8 {
        self.blink_changes.last().copied().unwrap_or(0)
    }
}

impl SegmentDisplay for MockDisplay {
    fn clear(&mut self) {
        self.buffer.clear();
    }

    fn put_text(&mut self, text: &str) {
        self.buffer = text.to_owned();
    }

    fn show(&mut self) {
        self.frames.push(self.buffer.clone());
    }

    fn fill(&mut self) {
        self.fill_count += 1;
    }

    fn set_brightness(&mut self, level: u8) {
        self.brightness = level;
    }

    fn brightness(&self) -> u8 {
        self.brightness
    }

    fn blink_rate(&mut self, rate: BlinkRate) {
        self.blink_changes.push(rate.rate());
    }
}

pub struct MockRtc {
    pub datetime: DateTime,
    pub writes: Vec<DateTime>,
}

impl Default for MockRtc {
    fn default() -> Self {
        Self {
            datetime: DateTime {
                year: 2025,
                month: 6,
                day: 14,
                weekday: 6,
                hour: 12,
                minute: 34,
                second: 0,
            },
            writes: Vec::new(),
        }
    }
}

impl RtcClock for MockRtc {
    fn datetime(&mut self) -> DateTime {
        self.datetime
    }

    fn set_datetime(&mut self, datetime: DateTime) {
        self.datetime = datetime;
        self.writes.push(datetime);
    }
}

#[derive(Default)]
pub struct MockImu {
    pub accel: AccelVector,
}

impl InertialSensor for MockImu {
    fn accel(&mut self) -> AccelVector {
        self.accel
    }
}

#[derive(Default)]
pub struct MockAdc {
    pub temperature_v: f32,
    pub pressure_v: f32,
    pub battery_v: f32,
}

impl obc_core::hal::AnalogInputs for MockAdc {
    fn voltage(&mut self, channel: AdcChannel) -> f32 {
        match channel {
            AdcChannel::OilTemperature => self.temperature_v,
            AdcChannel::OilPressure => self.pressure_v,
            AdcChannel::Battery => self.battery_v,
        }
    }
}

/// GPS playback: `current` is what the receiver holds; each `refresh` pops
/// the next scripted fix (or dropout) from the queue.
#[derive(Default)]
pub struct MockGps {
    pub current: Option<GpsFix>,
    pub queue: VecDeque<Option<GpsFix>>,
    pub refresh_count: usize,
}

impl obc_core::hal::GpsReceiver for MockGps {
    fn has_fix(&self) -> bool {
        self.current.is_some()
    }

    fn fix(&self) -> Option<GpsFix> {
        self.current
    }

    fn refresh(&mut self) {
        self.refresh_count += 1;
        if let Some(next) = self.queue.pop_front() {
            self.current = next;
        }
    }
}

/// Builds a fix moving at `kmh` at the given position.
pub fn fix_at(latitude: f64, longitude: f64, kmh: f32) -> GpsFix {
    GpsFix {
        speed: SpeedOverGround {
            knots: kmh / 1.852,
            mph: kmh / 1.609_344,
            kmh,
        },
        position: Position {
            latitude,
            longitude,
        },
        altitude_m: 120.0,
        course_deg: 45.0,
    }
}

pub fn fix_with_speed(kmh: f32) -> GpsFix {
    fix_at(45.618, 9.281, kmh)
}

#[derive(Default)]
pub struct MockStore {
    values: [Option<SettingValue>; SettingKey::COUNT],
    pub writes: Vec<(SettingKey, SettingValue)>,
}

impl MockStore {
    pub fn with(mut self, key: SettingKey, value: SettingValue) -> Self {
        self.values[key.as_index()] = Some(value);
        self
    }
}

impl SettingsStore for MockStore {
    fn read(&self, key: SettingKey) -> Option<SettingValue> {
        self.values[key.as_index()]
    }

    fn write(&mut self, key: SettingKey, value: SettingValue) {
        self.values[key.as_index()] = Some(value);
        self.writes.push((key, value));
    }
}

#[derive(Default)]
pub struct MockWatchdog {
    pub feed_count: usize,
}

impl Watchdog for MockWatchdog {
    fn feed(&mut self) {
        self.feed_count += 1;
    }
}

#[derive(Default)]
pub struct MockPowerLatch {
    pub transitions: Vec<bool>,
}

impl PowerLatch for MockPowerLatch {
    fn set_power(&mut self, on: bool) {
        self.transitions.push(on);
    }
}

#[derive(Default)]
pub struct MockUpdater {
    pub begin_count: usize,
    pub restart_count: usize,
}

impl UpdateAgent for MockUpdater {
    fn begin_update(&mut self) {
        self.begin_count += 1;
    }

    fn restart(&mut self) {
        self.restart_count += 1;
    }
}

pub struct TestLexicon;

impl Lexicon for TestLexicon {
    fn word(&self, _language: Language, word: Word) -> &'static str {
        match word {
            Word::Hour => "HOUR",
            Word::Date => "DATE",
            Word::Speed => "SPEED",
            Word::Signal => "SIGNAL",
            Word::Limit => "LIMIT",
            Word::Accel => "ACCEL",
            Word::Stop => "STOP",
            Word::Ready => "READY",
            Word::Lap => "LAP",
            Word::Odo => "ODO",
            Word::Timer => "TIMER",
            Word::Oil => "OIL",
            Word::Temp => "TEMP",
            Word::Volt => "VOLT",
            Word::Alt => "ALT",
            Word::Hdg => "HDG",
            Word::GSens => "G SENS",
        }
    }

    fn month(&self, _language: Language, month: u8) -> &'static str {
        const MONTHS: [&str; 12] = [
            "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
        ];
        MONTHS[usize::from(month.clamp(1, 12)) - 1]
    }
}

#[derive(Default)]
pub struct MockBoard {
    pub display: MockDisplay,
    pub rtc: MockRtc,
    pub imu: MockImu,
    pub adc: MockAdc,
    pub gps: MockGps,
    pub store: MockStore,
    pub watchdog: MockWatchdog,
    pub power: MockPowerLatch,
    pub updater: MockUpdater,
}

impl Board for MockBoard {
    type Instant = MockInstant;
    type Display = MockDisplay;
    type Rtc = MockRtc;
    type Imu = MockImu;
    type Adc = MockAdc;
    type Gps = MockGps;
    type Store = MockStore;
    type Dog = MockWatchdog;
    type Power = MockPowerLatch;
    type Updater = MockUpdater;
    type Words = TestLexicon;

    fn display(&mut self) -> &mut MockDisplay {
        &mut self.display
    }

    fn rtc(&mut self) -> &mut MockRtc {
        &mut self.rtc
    }

    fn imu(&mut self) -> &mut MockImu {
        &mut self.imu
    }

    fn adc(&mut self) -> &mut MockAdc {
        &mut self.adc
    }

    fn gps(&mut self) -> &mut MockGps {
        &mut self.gps
    }

    fn settings(&mut self) -> &mut MockStore {
        &mut self.store
    }

    fn watchdog(&mut self) -> &mut MockWatchdog {
        &mut self.watchdog
    }

    fn power(&mut self) -> &mut MockPowerLatch {
        &mut self.power
    }

    fn updater(&mut self) -> &mut MockUpdater {
        &mut self.updater
    }

    fn lexicon(&self) -> &TestLexicon {
        &TestLexicon
    }
}

pub type TestController = ObcController<MockBoard>;

/// Builds a controller over a default board at t = 0.
pub fn controller() -> TestController {
    ObcController::new(MockBoard::default(), MockInstant(0))
}

pub fn controller_with(board: MockBoard) -> TestController {
    ObcController::new(board, MockInstant(0))
}

/// Presses and releases a button with a 50 ms short press.
pub fn press(controller: &mut TestController, button: ButtonId, at_ms: u64) {
    controller.handle_edge(button, Edge::Pressed, MockInstant(at_ms));
    controller.handle_edge(button, Edge::Released, MockInstant(at_ms + 50));
}

/// Presses and releases a button with an 800 ms long press.
pub fn long_press(controller: &mut TestController, button: ButtonId, at_ms: u64) {
    controller.handle_edge(button, Edge::Pressed, MockInstant(at_ms));
    controller.handle_edge(button, Edge::Released, MockInstant(at_ms + 800));
}

/// Runs `count` scheduler ticks spaced `step_ms` apart starting at `from_ms`;
/// returns the timestamp after the last tick.
pub fn run_ticks(controller: &mut TestController, from_ms: u64, count: u32, step_ms: u64) -> u64 {
    let mut at = from_ms;
    for _ in 0..count {
        controller.tick(MockInstant(at));
        at += step_ms;
    }
    at
}
