//! Button dispatchers: mode switching, digit entry, confirm/reset/power.
//!
//! Each accepted button release lands in exactly one of the three handlers
//! here. They only mutate controller state and request display side effects;
//! the heavy lifting happens in the next render.

use crate::digits::DigitDelta;
use crate::hal::{
    BlinkRate, Board, GpsReceiver as _, Monotonic, SegmentDisplay as _, UpdateAgent as _,
};
use crate::input::{ButtonEvent, ButtonId};
use crate::modes::Mode;
use crate::settings::SettingsExt as _;

use super::{MENU_FILL_DWELL, ObcController};

impl<B: Board> ObcController<B> {
    /// Mode-switch dispatcher, bound to the eight topic buttons. Ignored
    /// entirely while the lock flag is held; a press while unpowered wakes
    /// the system first.
    pub(super) fn on_mode_switch(&mut self, event: ButtonEvent<B::Instant>) {
        self.last_use = event.at;
        self.digit_pressed = None;
        if !self.powered {
            self.power_on();
        }
        if !self.can_switch_function {
            return;
        }
        match event.button {
            ButtonId::Clock => {
                self.mode = if self.mode == Mode::Hour {
                    Mode::Date
                } else {
                    Mode::Hour
                };
            }
            ButtonId::Speed => self.mode = Mode::Speed,
            ButtonId::Accel => self.mode = Mode::Acceleration,
            ButtonId::Lap => self.mode = Mode::LapTiming,
            ButtonId::Odometer => self.mode = Mode::Odometer,
            ButtonId::Stopwatch => self.on_stopwatch_button(event.at),
            ButtonId::Sensors => self.on_sensor_button(),
            ButtonId::Nav => {
                self.mode = match self.mode {
                    Mode::GSensor => Mode::Heading,
                    Mode::Heading => Mode::Altitude,
                    _ => Mode::GSensor,
                };
            }
            _ => {}
        }
    }

    /// Re-pressing the stopwatch selector inside the stopwatch mode marks a
    /// lap while running and resets after a stop; otherwise it enters the
    /// mode with the name label armed.
    fn on_stopwatch_button(&mut self, now: B::Instant) {
        if self.mode == Mode::Stopwatch {
            self.stopwatch_ack = true;
            if self.stopwatch.is_started() {
                if self.stopwatch.is_running() {
                    self.stopwatch.lap(now);
                } else {
                    self.stopwatch.reset();
                }
            }
        } else {
            self.mode = Mode::Stopwatch;
            self.stopwatch_ack = false;
        }
    }

    /// Sensor-group cycle, shaped by how many sensors are equipped:
    /// pressure, temperature, voltage with three, temperature and voltage
    /// with two, voltage alone with one.
    fn on_sensor_button(&mut self) {
        let count = self.board.settings().sensor_count();
        if count == 3 && !matches!(self.mode, Mode::Pressure | Mode::Temperature) {
            self.mode = Mode::Pressure;
        } else if count >= 2 && self.mode != Mode::Temperature {
            self.averager.clear();
            self.mode = Mode::Temperature;
        } else {
            self.mode = Mode::Voltage;
        }
    }

    /// Digit dispatcher. Inside an editing mode the press becomes the
    /// pending delta; outside, the thousands+tens chord opens the settings
    /// menu behind a full-segment dead-pixel check.
    pub(super) fn on_digit(&mut self, event: ButtonEvent<B::Instant>) {
        self.last_use = event.at;
        if self.mode.accepts_digits() {
            self.digit_pressed = DigitDelta::from_button(event.button, event.long_press);
        } else {
            let chorded = (event.button == ButtonId::Thousands
                && self.buttons.is_held(ButtonId::Tens))
                || (event.button == ButtonId::Tens && self.buttons.is_held(ButtonId::Thousands));
            if chorded {
                self.mode = Mode::SettingMenu;
                let display = self.board.display();
                display.fill();
                display.show();
                self.menu_fill_until = Some(event.at.advance(MENU_FILL_DWELL));
            }
        }
    }

    /// Confirm/reset dispatcher. Short press pairs the current mode with its
    /// edit, alarm-acknowledge, or timer action; long press toggles power
    /// when switching is currently permitted.
    pub(super) fn on_set_reset(&mut self, event: ButtonEvent<B::Instant>) {
        self.last_use = event.at;
        self.digit_pressed = None;

        if event.long_press {
            if self.can_switch_function {
                self.toggle_power();
            }
            return;
        }
        if !self.powered {
            self.power_on();
            return;
        }

        match self.mode {
            Mode::Hour => self.enter_edit(Mode::SetHour),
            Mode::SetHour => self.leave_edit(Mode::Hour),

            Mode::Date => self.enter_edit(Mode::SetYear),
            Mode::SetYear => self.mode = Mode::SetDate,
            Mode::SetDate => self.leave_edit(Mode::Date),

            Mode::Stopwatch => {
                if self.stopwatch.is_running() {
                    self.stopwatch.stop(event.at);
                } else {
                    self.stopwatch.start(event.at);
                }
            }

            Mode::LapTiming => {
                if self.laptimer.is_running() {
                    self.laptimer.end(event.at);
                } else if self.board.gps().has_fix() {
                    self.laptimer.reset();
                    self.laptimer.start(event.at);
                }
            }

            Mode::Acceleration => {
                if self.acceleration.is_started() {
                    self.acceleration.reset();
                }
            }

            Mode::Speed => self.enter_edit(Mode::SetLimit),
            Mode::SetLimit => {
                self.speed_threshold = self.speed_threshold.toggled();
                self.leave_edit(Mode::Speed);
            }
            Mode::AlarmOverspeed => {
                // The alarm render notices the disarm on its next pass and
                // restores the pre-alarm mode.
                self.speed_threshold.active = false;
                self.can_switch_function = true;
                self.blink(BlinkRate::Off);
            }

            Mode::Odometer => {
                self.blink(BlinkRate::Off);
                self.mode = Mode::SetOdometerThousands;
                self.can_switch_function = false;
            }
            Mode::SetOdometerThousands => {
                self.blink(BlinkRate::Off);
                self.mode = Mode::SetOdometerHundreds;
            }
            Mode::SetOdometerHundreds => {
                self.blink(BlinkRate::Off);
                self.mode = Mode::Odometer;
                self.can_switch_function = true;
            }

            Mode::Temperature => self.enter_edit(Mode::SetMaxTemperature),
            Mode::SetMaxTemperature => {
                self.temperature_threshold = self.temperature_threshold.toggled();
                self.leave_edit(Mode::Temperature);
            }
            Mode::AlarmOverheat => {
                self.temperature_threshold.active = false;
                self.can_switch_function = true;
                self.blink(BlinkRate::Off);
            }

            Mode::SettingMenu => {
                if let Some(editor) = Mode::setting_editor(self.setting_cursor) {
                    if editor == Mode::SwUpdate {
                        self.update_started = false;
                        self.mode = Mode::SwUpdate;
                        self.can_switch_function = false;
                    } else {
                        self.enter_edit(editor);
                    }
                }
            }
            Mode::SwUpdate => self.board.updater().restart(),
            Mode::SetLanguage
            | Mode::SetClockFormat
            | Mode::SetUnit
            | Mode::SetDisplayBrightness
            | Mode::SetSensorCount
            | Mode::SetAutoOff
            | Mode::SetBacklightBrightness
            | Mode::SetImuTrim => {
                self.can_switch_function = true;
                self.blink(BlinkRate::Off);
                self.mode = Mode::SettingMenu;
            }

            _ => {}
        }
    }
}
