//! The display-mode controller and its cooperative scheduler step.
//!
//! One [`ObcController`] instance owns every piece of engine state and all
//! collaborator handles. The firmware loop feeds it debounced button edges
//! and calls [`ObcController::tick`] once per iteration; the returned
//! [`TickOutcome`] tells the loop how to pace the next iteration (normal
//! cadence, one-second alarm dwell, or idle until input while unpowered).
//! Nothing in here reads a clock or sleeps: every wait is a stored deadline
//! re-evaluated on the next tick, which is what keeps interrupt-driven input
//! responsive even while an alarm holds the display.

mod dispatch;
mod render;

use core::time::Duration;

use crate::digits::DigitDelta;
use crate::hal::{
    AnalogInputs as _, BlinkRate, Board, GpsReceiver as _, Monotonic, Position, PowerLatch as _,
    SegmentDisplay as _,
};
use crate::input::{ButtonBank, ButtonId, Edge};
use crate::laptimer::{self, LapTimer};
use crate::lexicon::{Lexicon as _, Word};
use crate::modes::Mode;
use crate::sensors::{self, ReadingAverager};
use crate::settings::{SettingKey, SettingValue, SettingsExt as _, SettingsStore as _};
use crate::stopwatch::TimerEngine;
use crate::threshold::ThresholdState;
use crate::units::UnitSystem;

/// Tick count at which the GPS is polled mid-cycle.
pub const TICK_MID_CHECKPOINT: u32 = 20;
/// Tick count at which all background work runs and the counter resets.
pub const TICK_FULL_CHECKPOINT: u32 = 40;
/// A mode shows its name while its selector released less than this ago.
pub const LABEL_AFFORDANCE_WINDOW: Duration = Duration::from_millis(700);
/// How long the full-segment dead-pixel check holds when entering the menu.
pub const MENU_FILL_DWELL: Duration = Duration::from_secs(2);
/// Dwell between alarm display alternations; the loop paces itself on this.
pub const ALARM_DWELL: Duration = Duration::from_secs(1);
/// How long the final acceleration time stays frozen on the display.
pub const ACCELERATION_HOLD: Duration = Duration::from_secs(4);
/// Speed at which the acceleration run ends.
pub const ACCELERATION_TARGET_KMH: f32 = 100.0;
/// Longitudinal g that detects the launch.
pub const LAUNCH_ACCELERATION_G: f32 = 0.5;
/// Below this ground speed the car counts as stationary.
pub const MOVING_THRESHOLD_KMH: f32 = 2.0;
/// Oil temperature display refresh period (readings are averaged inside it).
pub const TEMPERATURE_REFRESH: Duration = Duration::from_millis(1_000);
/// Oil pressure display refresh period.
pub const PRESSURE_REFRESH: Duration = Duration::from_millis(300);
/// Battery voltage display refresh period.
pub const VOLTAGE_REFRESH: Duration = Duration::from_millis(1_000);
/// G-sensor display refresh period.
pub const GSENSOR_REFRESH: Duration = Duration::from_millis(200);
/// Half-period of the odometer editor's digit-group blink.
pub const ODOMETER_GROUP_BLINK: Duration = Duration::from_millis(300);
/// Travelled distance is flushed to the odometer setting in these steps.
pub const ODOMETER_WRITE_STEP_M: f32 = 100.0;

/// How the firmware loop should pace itself after a tick.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TickOutcome {
    /// Normal frame; run the next tick at the regular cadence.
    Rendered,
    /// An alarm takeover is active; wait [`ALARM_DWELL`] before the next
    /// tick and keep draining input meanwhile.
    AlarmDwell,
    /// System is powered down; idle until a wake press arrives.
    Unpowered,
}

/// The on-board computer control engine.
pub struct ObcController<B: Board> {
    board: B,
    mode: Mode,
    mode_before_alarm: Mode,
    buttons: ButtonBank<B::Instant>,
    digit_pressed: Option<DigitDelta>,
    can_switch_function: bool,
    powered: bool,
    last_use: B::Instant,
    tick_count: u32,
    stopwatch: TimerEngine<B::Instant>,
    stopwatch_ack: bool,
    acceleration: TimerEngine<B::Instant>,
    laptimer: LapTimer<B::Instant>,
    speed_threshold: ThresholdState,
    temperature_threshold: ThresholdState,
    setting_cursor: u8,
    averager: ReadingAverager,
    last_refresh: Option<B::Instant>,
    group_blink_until: Option<B::Instant>,
    menu_fill_until: Option<B::Instant>,
    alarm_show_label: bool,
    update_started: bool,
    odometer_accum_m: f32,
    last_fix_position: Option<Position>,
}

impl<B: Board> ObcController<B> {
    /// Builds the controller, restores the persisted brightness, and closes
    /// the power latch.
    pub fn new(mut board: B, now: B::Instant) -> Self {
        let brightness = board.settings().display_brightness();
        board.display().set_brightness(brightness);
        board.power().set_power(true);
        Self {
            board,
            mode: Mode::Hour,
            mode_before_alarm: Mode::Hour,
            buttons: ButtonBank::new(),
            digit_pressed: None,
            can_switch_function: true,
            powered: true,
            last_use: now,
            tick_count: 0,
            stopwatch: TimerEngine::new(),
            stopwatch_ack: false,
            acceleration: TimerEngine::new(),
            laptimer: LapTimer::new(),
            speed_threshold: ThresholdState::new(),
            temperature_threshold: ThresholdState::new(),
            setting_cursor: 0,
            averager: ReadingAverager::new(),
            last_refresh: None,
            group_blink_until: None,
            menu_fill_until: None,
            alarm_show_label: true,
            update_started: false,
            odometer_accum_m: 0.0,
            last_fix_position: None,
        }
    }

    /// Currently active display mode.
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// `true` while the mode-switch dispatcher may change the active mode.
    pub const fn can_switch_function(&self) -> bool {
        self.can_switch_function
    }

    pub const fn is_powered(&self) -> bool {
        self.powered
    }

    /// Access to the board, mainly for host tooling and tests.
    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    /// Feeds one raw button edge from the interrupt layer. Runs the
    /// debouncer and, on an accepted release, the matching dispatcher.
    pub fn handle_edge(&mut self, button: ButtonId, edge: Edge, now: B::Instant) {
        if let Some(event) = self.buttons.on_edge(button, edge, now) {
            if event.button.is_mode_switch() {
                self.on_mode_switch(event);
            } else if event.button.is_digit() {
                self.on_digit(event);
            } else {
                self.on_set_reset(event);
            }
        }
    }

    /// One scheduler iteration: render the active mode, then run the
    /// checkpointed background work.
    pub fn tick(&mut self, now: B::Instant) -> TickOutcome {
        if !self.powered {
            return TickOutcome::Unpowered;
        }

        self.render(now);
        let outcome = if self.mode.is_alarm() {
            TickOutcome::AlarmDwell
        } else {
            TickOutcome::Rendered
        };

        self.tick_count += 1;
        if self.tick_count == TICK_MID_CHECKPOINT || self.tick_count == TICK_FULL_CHECKPOINT {
            self.board.gps().refresh();
            self.integrate_travel();
        }
        if self.tick_count >= TICK_FULL_CHECKPOINT {
            self.check_auto_off(now);
            if !self.mode.is_alarm() {
                self.check_overspeed_entry();
                self.check_overheat_entry();
            }
            self.tick_count = 0;
        }
        outcome
    }

    /// Clears the frame and writes `text`, when powered.
    fn show(&mut self, text: &str) {
        if self.powered {
            let display = self.board.display();
            display.clear();
            display.put_text(text);
            display.show();
        }
    }

    fn show_word(&mut self, word: Word) {
        let language = self.board.settings().language();
        let text = self.board.lexicon().word(language, word);
        self.show(text);
    }

    fn blink(&mut self, rate: BlinkRate) {
        self.board.display().blink_rate(rate);
    }

    /// Consumes the pending digit delta, if any.
    fn take_digit(&mut self) -> Option<DigitDelta> {
        self.digit_pressed.take()
    }

    fn unit(&mut self) -> UnitSystem {
        self.board.settings().unit()
    }

    fn enter_edit(&mut self, mode: Mode) {
        self.mode = mode;
        self.can_switch_function = false;
        self.blink(BlinkRate::Edit);
    }

    fn leave_edit(&mut self, mode: Mode) {
        self.mode = mode;
        self.can_switch_function = true;
        self.blink(BlinkRate::Off);
    }

    fn toggle_power(&mut self) {
        if self.powered {
            let display = self.board.display();
            display.clear();
            display.show();
            self.board.power().set_power(false);
            self.powered = false;
        } else {
            self.power_on();
        }
    }

    fn power_on(&mut self) {
        self.powered = true;
        self.board.power().set_power(true);
        let brightness = self.board.settings().display_brightness();
        self.board.display().set_brightness(brightness);
    }

    fn check_auto_off(&mut self, now: B::Instant) {
        let hours = self.board.settings().auto_off_hours();
        let delay = Duration::from_secs(u64::from(hours) * 3_600);
        if now.since(self.last_use) > delay {
            self.toggle_power();
        }
    }

    /// Live ground speed in display units, when a fix is held.
    fn current_speed(&mut self) -> Option<f32> {
        if !self.board.gps().has_fix() {
            return None;
        }
        let speed = self.board.gps().fix()?.speed;
        Some(self.unit().speed_of(speed))
    }

    /// Live oil temperature in display degrees.
    fn current_temperature(&mut self) -> f32 {
        let unit = self.unit();
        let pin = self
            .board
            .adc()
            .voltage(crate::hal::AdcChannel::OilTemperature);
        sensors::oil_temperature(pin, unit)
    }

    fn check_overspeed_entry(&mut self) {
        if self.mode == Mode::SetLimit || !self.can_switch_function {
            return;
        }
        if let Some(speed) = self.current_speed()
            && self.speed_threshold.exceeded_by(speed)
        {
            self.enter_alarm(Mode::AlarmOverspeed);
        }
    }

    fn check_overheat_entry(&mut self) {
        if self.mode == Mode::SetMaxTemperature || !self.can_switch_function {
            return;
        }
        if !self.temperature_threshold.active {
            return;
        }
        let temperature = self.current_temperature();
        if self.temperature_threshold.exceeded_by(temperature) {
            self.enter_alarm(Mode::AlarmOverheat);
        }
    }

    fn enter_alarm(&mut self, alarm: Mode) {
        self.mode_before_alarm = self.mode;
        self.mode = alarm;
        self.can_switch_function = false;
        self.alarm_show_label = true;
        self.blink(BlinkRate::Edit);
    }

    /// Restores the mode that was active before an alarm takeover.
    fn leave_alarm(&mut self) {
        self.blink(BlinkRate::Off);
        self.can_switch_function = true;
        self.mode = self.mode_before_alarm;
    }

    /// Accumulates travelled distance from successive fixes into the
    /// odometer setting, in tenth-kilometre steps.
    fn integrate_travel(&mut self) {
        if !self.board.gps().has_fix() {
            return;
        }
        let Some(fix) = self.board.gps().fix() else {
            return;
        };
        if let Some(previous) = self.last_fix_position {
            self.odometer_accum_m += laptimer::distance_metres(previous, fix.position);
        }
        self.last_fix_position = Some(fix.position);

        if self.odometer_accum_m >= ODOMETER_WRITE_STEP_M {
            let steps = (self.odometer_accum_m / ODOMETER_WRITE_STEP_M) as u32;
            self.odometer_accum_m -= steps as f32 * ODOMETER_WRITE_STEP_M;
            let tenths = self
                .board
                .settings()
                .odometer_tenths()
                .saturating_add(steps);
            self.board
                .settings()
                .write(SettingKey::Odometer, SettingValue::OdometerTenths(tenths));
        }
    }
}
