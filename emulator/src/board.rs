//! Host-side collaborator implementations for desk-driving the controller.
//!
//! Everything scriptable is reachable through shared handles so the session
//! can inject fixes, sensor voltages, and clock jumps while the controller
//! owns the board.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use obc_core::hal::{
    AccelVector, AdcChannel, AnalogInputs, BlinkRate, Board, DateTime, GpsFix, InertialSensor,
    Monotonic, PowerLatch, RtcClock, SegmentDisplay, UpdateAgent, Watchdog,
};
use obc_core::lexicon::{Lexicon, Word};
use obc_core::settings::{Language, SettingKey, SettingValue, SettingsStore};

use core::time::Duration;

/// Simulated monotonic time in milliseconds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct SimInstant(pub u64);

impl Monotonic for SimInstant {
    fn since(self, earlier: Self) -> Duration {
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }

    fn advance(self, amount: Duration) -> Self {
        Self(self.0 + amount.as_millis() as u64)
    }
}

/// Display that records frames for the session to print.
#[derive(Default)]
pub struct HostDisplay {
    buffer: String,
    pub frames: Rc<RefCell<Vec<String>>>,
    brightness: Cell<u8>,
    pub blink: Rc<Cell<u8>>,
}

impl HostDisplay {
    pub fn new(frames: Rc<RefCell<Vec<String>>>) -> Self {
        Self {
            frames,
            ..Self::default()
        }
    }
}

impl SegmentDisplay for HostDisplay {
    fn clear(&mut self) {
        self.buffer.clear();
    }

    fn put_text(&mut self, text: &str) {
        self.buffer = text.to_owned();
    }

    fn show(&mut self) {
        self.frames.borrow_mut().push(self.buffer.clone());
    }

    fn fill(&mut self) {
        self.buffer = "########".to_owned();
    }

    fn set_brightness(&mut self, level: u8) {
        self.brightness.set(level);
    }

    fn brightness(&self) -> u8 {
        self.brightness.get()
    }

    fn blink_rate(&mut self, rate: BlinkRate) {
        self.blink.set(rate.rate());
    }
}

/// Wall clock derived from the simulated monotonic time.
pub struct HostRtc {
    base: DateTime,
    anchor_ms: u64,
    clock: Rc<Cell<u64>>,
}

impl HostRtc {
    pub fn new(clock: Rc<Cell<u64>>) -> Self {
        Self {
            base: DateTime {
                year: 2025,
                month: 6,
                day: 14,
                weekday: 6,
                hour: 12,
                minute: 0,
                second: 0,
            },
            anchor_ms: 0,
            clock,
        }
    }
}

impl RtcClock for HostRtc {
    fn datetime(&mut self) -> DateTime {
        let elapsed_s = (self.clock.get().saturating_sub(self.anchor_ms)) / 1_000;
        let total = u64::from(self.base.hour) * 3_600
            + u64::from(self.base.minute) * 60
            + u64::from(self.base.second)
            + elapsed_s;
        DateTime {
            hour: ((total / 3_600) % 24) as u8,
            minute: ((total / 60) % 60) as u8,
            second: (total % 60) as u8,
            ..self.base
        }
    }

    fn set_datetime(&mut self, datetime: DateTime) {
        self.base = datetime;
        self.anchor_ms = self.clock.get();
    }
}

#[derive(Default)]
pub struct HostImu {
    pub accel: Rc<Cell<AccelVector>>,
}

impl InertialSensor for HostImu {
    fn accel(&mut self) -> AccelVector {
        self.accel.get()
    }
}

#[derive(Default)]
pub struct HostAdc {
    pub volts: Rc<Cell<[f32; 3]>>,
}

impl AnalogInputs for HostAdc {
    fn voltage(&mut self, channel: AdcChannel) -> f32 {
        let volts = self.volts.get();
        match channel {
            AdcChannel::OilTemperature => volts[0],
            AdcChannel::OilPressure => volts[1],
            AdcChannel::Battery => volts[2],
        }
    }
}

/// GPS whose "receiver" is the session: `refresh` snapshots the shared cell.
#[derive(Default)]
pub struct HostGps {
    pub cell: Rc<Cell<Option<GpsFix>>>,
    latest: Option<GpsFix>,
}

impl HostGps {
    pub fn new(cell: Rc<Cell<Option<GpsFix>>>) -> Self {
        Self { cell, latest: None }
    }
}

impl obc_core::hal::GpsReceiver for HostGps {
    fn has_fix(&self) -> bool {
        self.latest.is_some()
    }

    fn fix(&self) -> Option<GpsFix> {
        self.latest
    }

    fn refresh(&mut self) {
        self.latest = self.cell.get();
    }
}

#[derive(Default)]
pub struct HostStore {
    values: RefCell<Vec<(SettingKey, SettingValue)>>,
}

impl SettingsStore for HostStore {
    fn read(&self, key: SettingKey) -> Option<SettingValue> {
        self.values
            .borrow()
            .iter()
            .find(|(stored, _)| *stored == key)
            .map(|(_, value)| *value)
    }

    fn write(&mut self, key: SettingKey, value: SettingValue) {
        let mut values = self.values.borrow_mut();
        if let Some(entry) = values.iter_mut().find(|(stored, _)| *stored == key) {
            entry.1 = value;
        } else {
            values.push((key, value));
        }
    }
}

#[derive(Default)]
pub struct HostWatchdog {
    pub feeds: Cell<u32>,
}

impl Watchdog for HostWatchdog {
    fn feed(&mut self) {
        self.feeds.set(self.feeds.get() + 1);
    }
}

#[derive(Default)]
pub struct HostPower {
    pub on: Rc<Cell<bool>>,
}

impl PowerLatch for HostPower {
    fn set_power(&mut self, on: bool) {
        self.on.set(on);
    }
}

#[derive(Default)]
pub struct HostUpdater;

impl UpdateAgent for HostUpdater {
    fn begin_update(&mut self) {
        println!("(update agent started)");
    }

    fn restart(&mut self) {
        println!("(system reset requested)");
    }
}

pub struct EnglishLexicon;

impl Lexicon for EnglishLexicon {
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

pub struct HostBoard {
    pub display: HostDisplay,
    pub rtc: HostRtc,
    pub imu: HostImu,
    pub adc: HostAdc,
    pub gps: HostGps,
    pub store: HostStore,
    pub watchdog: HostWatchdog,
    pub power: HostPower,
    pub updater: HostUpdater,
}

impl Board for HostBoard {
    type Instant = SimInstant;
    type Display = HostDisplay;
    type Rtc = HostRtc;
    type Imu = HostImu;
    type Adc = HostAdc;
    type Gps = HostGps;
    type Store = HostStore;
    type Dog = HostWatchdog;
    type Power = HostPower;
    type Updater = HostUpdater;
    type Words = EnglishLexicon;

    fn display(&mut self) -> &mut HostDisplay {
        &mut self.display
    }

    fn rtc(&mut self) -> &mut HostRtc {
        &mut self.rtc
    }

    fn imu(&mut self) -> &mut HostImu {
        &mut self.imu
    }

    fn adc(&mut self) -> &mut HostAdc {
        &mut self.adc
    }

    fn gps(&mut self) -> &mut HostGps {
        &mut self.gps
    }

    fn settings(&mut self) -> &mut HostStore {
        &mut self.store
    }

    fn watchdog(&mut self) -> &mut HostWatchdog {
        &mut self.watchdog
    }

    fn power(&mut self) -> &mut HostPower {
        &mut self.power
    }

    fn updater(&mut self) -> &mut HostUpdater {
        &mut self.updater
    }

    fn lexicon(&self) -> &EnglishLexicon {
        &EnglishLexicon
    }
}
