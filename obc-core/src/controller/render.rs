//! Per-mode render functions.
//!
//! Every concrete mode follows the same frame contract: show the mode's name
//! while its selector button was released within the last 700 ms, otherwise
//! apply any pending digit delta (edit modes), then draw live data. Renders
//! run once per scheduler tick and never block; anything that must persist
//! between frames (refresh gates, blink phases, hold windows) is a stored
//! deadline.

use core::fmt::Write as _;
use core::time::Duration;

use crate::clock;
use crate::digits::{self, OdometerStage};
use crate::hal::{
    AdcChannel, AnalogInputs as _, BlinkRate, Board, DisplayText, GpsReceiver as _,
    InertialSensor as _, Monotonic, RtcClock as _, SegmentDisplay as _, UpdateAgent as _,
    Watchdog as _, zeros_before_number,
};
use crate::input::ButtonId;
use crate::laptimer::LapDisplay;
use crate::lexicon::{Lexicon as _, Word};
use crate::modes::Mode;
use crate::sensors;
use crate::settings::{Language, SettingKey, SettingValue, SettingsExt as _, SettingsStore as _};
use crate::stopwatch::{format_elapsed, format_signed_millis};

use super::{
    ACCELERATION_HOLD, ACCELERATION_TARGET_KMH, GSENSOR_REFRESH, LABEL_AFFORDANCE_WINDOW,
    LAUNCH_ACCELERATION_G, MOVING_THRESHOLD_KMH, ObcController, ODOMETER_GROUP_BLINK,
    PRESSURE_REFRESH, TEMPERATURE_REFRESH, VOLTAGE_REFRESH,
};

impl<B: Board> ObcController<B> {
    pub(super) fn render(&mut self, now: B::Instant) {
        // The dead-pixel fill shown when entering the settings menu owns the
        // display for its dwell.
        if let Some(until) = self.menu_fill_until {
            if now < until {
                return;
            }
            self.menu_fill_until = None;
        }

        match self.mode {
            Mode::Hour => self.render_hour(now),
            Mode::Date => self.render_date(now),
            Mode::SetHour => self.render_set_hour(),
            Mode::SetYear => self.render_set_year(),
            Mode::SetDate => self.render_set_date(),
            Mode::Speed => self.render_speed(now),
            Mode::SetLimit => self.render_set_limit(now),
            Mode::AlarmOverspeed => self.render_alarm_overspeed(),
            Mode::Acceleration => self.render_acceleration(now),
            Mode::LapTiming => self.render_lap_timing(now),
            Mode::Odometer => self.render_odometer(now),
            Mode::SetOdometerThousands => {
                self.render_set_odometer(OdometerStage::Thousands, now);
            }
            Mode::SetOdometerHundreds => {
                self.render_set_odometer(OdometerStage::Hundreds, now);
            }
            Mode::Stopwatch => self.render_stopwatch(now),
            Mode::Pressure => self.render_pressure(now),
            Mode::Temperature => self.render_temperature(now),
            Mode::SetMaxTemperature => self.render_set_max_temperature(now),
            Mode::AlarmOverheat => self.render_alarm_overheat(),
            Mode::Voltage => self.render_voltage(now),
            Mode::Altitude => self.render_altitude(now),
            Mode::Heading => self.render_heading(now),
            Mode::GSensor => self.render_gsensor(now),
            Mode::SettingMenu => self.render_setting_menu(),
            Mode::SetLanguage => self.render_set_language(now),
            Mode::SetClockFormat => self.render_set_clock_format(now),
            Mode::SetUnit => self.render_set_unit(now),
            Mode::SwUpdate => self.render_sw_update(now),
            Mode::SetDisplayBrightness => self.render_set_display_brightness(now),
            Mode::SetSensorCount => self.render_set_sensor_count(now),
            Mode::SetAutoOff => self.render_set_auto_off(now),
            Mode::SetBacklightBrightness => self.render_set_backlight(now),
            Mode::SetImuTrim => self.render_set_imu_trim(now),
        }
    }

    /// Shows the mode's translated name when its selector button was just
    /// released; returns `true` when the frame is done.
    fn label_if_due(&mut self, now: B::Instant) -> bool {
        if self
            .mode
            .selector()
            .is_some_and(|button| {
                self.buttons
                    .released_within(button, now, LABEL_AFFORDANCE_WINDOW)
            })
            && let Some(word) = self.mode.word()
        {
            self.show_word(word);
            return true;
        }
        false
    }

    /// `true` while the set button was released within the label window.
    fn set_label_due(&self, now: B::Instant) -> bool {
        self.buttons
            .released_within(ButtonId::Set, now, LABEL_AFFORDANCE_WINDOW)
    }

    /// Shows a setting editor's fixed label when the set button was just
    /// released; returns `true` when the frame is done.
    fn editor_label_if_due(&mut self, now: B::Instant) -> bool {
        if self.set_label_due(now)
            && let Some(label) = self.mode.editor_label()
        {
            self.show(label);
            return true;
        }
        false
    }

    /// Rate-limits a live value's redraw; the display keeps the previous
    /// frame between refreshes.
    fn refresh_due(&mut self, now: B::Instant, period: Duration) -> bool {
        match self.last_refresh {
            Some(last) if now.since(last) <= period => false,
            _ => {
                self.last_refresh = Some(now);
                true
            }
        }
    }

    fn render_hour(&mut self, now: B::Instant) {
        if self.label_if_due(now) {
            return;
        }
        let format = self.board.settings().clock_format();
        let datetime = self.board.rtc().datetime();
        self.show(&clock::format_clock(&datetime, format));
    }

    fn render_set_hour(&mut self) {
        if let Some(delta) = self.take_digit() {
            let mut datetime = self.board.rtc().datetime();
            let (hour, minute) = digits::apply_time(datetime.hour, datetime.minute, delta);
            datetime.hour = hour;
            datetime.minute = minute;
            datetime.second = 0;
            self.board.rtc().set_datetime(datetime);
        }
        let format = self.board.settings().clock_format();
        let datetime = self.board.rtc().datetime();
        self.show(&clock::format_clock(&datetime, format));
    }

    fn render_date(&mut self, now: B::Instant) {
        if self.label_if_due(now) {
            return;
        }
        let language = self.board.settings().language();
        let datetime = self.board.rtc().datetime();
        let month = self.board.lexicon().month(language, datetime.month);
        self.show(&clock::format_date(datetime.day, month));
    }

    fn render_set_year(&mut self) {
        if let Some(delta) = self.take_digit() {
            let mut datetime = self.board.rtc().datetime();
            datetime.year = digits::apply_year(datetime.year, delta);
            self.board.rtc().set_datetime(datetime);
        }
        let year = self.board.rtc().datetime().year;
        self.show(&clock::format_year(year));
    }

    fn render_set_date(&mut self) {
        if let Some(delta) = self.take_digit() {
            let mut datetime = self.board.rtc().datetime();
            let (month, day) = digits::apply_date(datetime.month, datetime.day, delta);
            datetime.month = month;
            datetime.day = day;
            self.board.rtc().set_datetime(datetime);
        }
        let language = self.board.settings().language();
        let datetime = self.board.rtc().datetime();
        let month = self.board.lexicon().month(language, datetime.month);
        self.show(&clock::format_date(datetime.day, month));
    }

    fn render_speed(&mut self, now: B::Instant) {
        if self.label_if_due(now) {
            return;
        }
        if self.set_label_due(now) {
            let text = if self.speed_threshold.active {
                "  ON  "
            } else {
                " OFF  "
            };
            self.show(text);
            return;
        }
        match self.current_speed() {
            Some(speed) => {
                let acronym = self.unit().speed_acronym();
                let mut text = DisplayText::new();
                let _ = write!(text, "{}{acronym}", speed as i32);
                self.show(&text);
            }
            None => self.show_word(Word::Signal),
        }
    }

    fn render_set_limit(&mut self, now: B::Instant) {
        if self.set_label_due(now) {
            self.show_word(Word::Limit);
            return;
        }
        if let Some(delta) = self.take_digit() {
            self.speed_threshold.limit =
                digits::apply_speed_limit(self.speed_threshold.limit, delta);
        }
        let limit = self.speed_threshold.limit;
        let acronym = self.unit().speed_acronym();
        let mut text = DisplayText::new();
        let _ = write!(text, "{limit}{acronym}");
        self.show(&text);
    }

    /// One overspeed alarm iteration. The loop paces these a second apart;
    /// interrupt input keeps landing in between, so a set press can disarm
    /// the threshold and the next pass restores the pre-alarm mode.
    fn render_alarm_overspeed(&mut self) {
        self.board.watchdog().feed();
        self.can_switch_function = false;
        self.blink(BlinkRate::Edit);
        self.board.gps().refresh();

        let Some(speed) = self.current_speed() else {
            self.leave_alarm();
            return;
        };
        if !self.speed_threshold.exceeded_by(speed) {
            self.leave_alarm();
            return;
        }
        if self.alarm_show_label {
            self.show_word(Word::Limit);
        } else {
            let acronym = self.unit().speed_acronym();
            let mut text = DisplayText::new();
            let _ = write!(text, "{}{acronym}", speed as i32);
            self.show(&text);
        }
        self.alarm_show_label = !self.alarm_show_label;
    }

    /// One overheat alarm iteration; same shape as the overspeed alarm.
    fn render_alarm_overheat(&mut self) {
        self.board.watchdog().feed();
        self.can_switch_function = false;
        self.blink(BlinkRate::Edit);

        let temperature = self.current_temperature();
        if !self.temperature_threshold.exceeded_by(temperature) {
            self.leave_alarm();
            return;
        }
        if self.alarm_show_label {
            self.show_word(Word::Temp);
        } else {
            let unit = self.unit();
            self.show(&sensors::format_temperature(temperature, unit));
        }
        self.alarm_show_label = !self.alarm_show_label;
    }

    fn render_acceleration(&mut self, now: B::Instant) {
        if self.label_if_due(now) {
            return;
        }
        if !self.board.gps().has_fix() {
            self.show_word(Word::Signal);
            return;
        }
        let Some(fix) = self.board.gps().fix() else {
            self.show_word(Word::Signal);
            return;
        };
        let kmh = fix.speed.kmh;

        let armed = !self.acceleration.is_running()
            && !self.acceleration.is_started()
            && !self.acceleration.in_hold(now);
        if armed {
            let accel = self.board.imu().accel();
            self.blink(BlinkRate::Off);
            self.can_switch_function = true;
            if kmh > MOVING_THRESHOLD_KMH {
                self.show_word(Word::Stop);
            } else {
                self.show_word(Word::Ready);
            }
            if accel.x > LAUNCH_ACCELERATION_G && kmh < MOVING_THRESHOLD_KMH {
                self.acceleration.start(now);
            }
            return;
        }

        if kmh >= ACCELERATION_TARGET_KMH && self.acceleration.is_running() {
            // Freeze the final time and hold it on the display.
            self.acceleration.capture(now, ACCELERATION_HOLD);
            self.blink(BlinkRate::Alert);
            self.can_switch_function = false;
            self.acceleration.reset();
        }
        if self.acceleration.in_hold(now) {
            self.show(&format_elapsed(self.acceleration.captured()));
        } else {
            self.show(&format_elapsed(self.acceleration.elapsed(now)));
        }
    }

    fn render_lap_timing(&mut self, now: B::Instant) {
        if self.label_if_due(now) {
            return;
        }
        if !self.board.gps().has_fix() {
            self.show_word(Word::Signal);
            return;
        }

        if self.laptimer.is_running() {
            if let Some(fix) = self.board.gps().fix() {
                self.laptimer.observe_position(fix.position, now);
            }
            match self.laptimer.display_stage(now) {
                Some(stage) => {
                    self.blink(BlinkRate::Alert);
                    self.can_switch_function = false;
                    self.render_lap_stage(stage);
                }
                None => {
                    self.can_switch_function = true;
                    self.blink(BlinkRate::Off);
                    let elapsed = self.laptimer.current_lap_elapsed(now);
                    self.show(&format_elapsed(elapsed));
                }
            }
        } else {
            match self.laptimer.display_stage(now) {
                Some(stage) => {
                    self.blink(BlinkRate::Alert);
                    self.can_switch_function = false;
                    self.render_lap_stage(stage);
                }
                None => {
                    self.blink(BlinkRate::Off);
                    self.can_switch_function = true;
                    self.show_word(Word::Ready);
                }
            }
        }
    }

    fn render_lap_stage(&mut self, stage: LapDisplay) {
        match stage {
            LapDisplay::LapTime => {
                let lap_time = self.laptimer.lap_time();
                self.show(&format_elapsed(lap_time));
            }
            LapDisplay::Delay => {
                let delay = self.laptimer.delay_millis();
                self.show(&format_signed_millis(delay));
            }
            LapDisplay::LapCount => {
                let count = self.laptimer.lap_count();
                let mut text = DisplayText::new();
                if self.laptimer.is_running() {
                    if count < 10 {
                        let _ = write!(text, "{count}  LAP");
                    } else {
                        let _ = write!(text, "{count} LAP");
                    }
                } else {
                    let _ = write!(text, "{count:>6}");
                }
                self.show(&text);
            }
            LapDisplay::FastestLap => {
                if let Some((fastest, _)) = self.laptimer.fastest() {
                    self.show(&format_elapsed(fastest));
                }
            }
        }
    }

    fn render_odometer(&mut self, now: B::Instant) {
        if self.label_if_due(now) {
            return;
        }
        let tenths = self.board.settings().odometer_tenths();
        let kilometres = tenths / 10;
        let fraction = tenths % 10;
        let mut text = DisplayText::new();
        if fraction != 0 {
            let mut value = DisplayText::new();
            let _ = write!(value, "{kilometres}.{fraction}");
            let _ = write!(text, "{:>7}", value.as_str());
        } else {
            let _ = write!(text, "{kilometres:>6}");
        }
        self.show(&text);
    }

    /// Two-stage odometer editor. The digit group being edited blinks by
    /// alternating the full value with a view that hides that group.
    fn render_set_odometer(&mut self, stage: OdometerStage, now: B::Instant) {
        let kilometres = self.board.settings().odometer_tenths() / 10;
        let mut plain = DisplayText::new();
        let _ = write!(plain, "{kilometres}");
        let padded = zeros_before_number(&plain, 6);

        let deadline = match self.group_blink_until {
            Some(deadline) => deadline,
            None => {
                let deadline = now.advance(ODOMETER_GROUP_BLINK + ODOMETER_GROUP_BLINK);
                self.group_blink_until = Some(deadline);
                deadline
            }
        };
        let remaining = deadline.since(now);

        let mut text = DisplayText::new();
        if remaining <= ODOMETER_GROUP_BLINK {
            match stage {
                OdometerStage::Thousands => {
                    let _ = write!(text, "{:>6}", &padded[3..]);
                }
                OdometerStage::Hundreds => {
                    let _ = text.push_str(&padded[..3]);
                }
            }
            if remaining <= Duration::from_millis(50) {
                self.group_blink_until =
                    Some(now.advance(ODOMETER_GROUP_BLINK + ODOMETER_GROUP_BLINK));
            }
        } else {
            let _ = text.push_str(&padded);
        }
        self.show(&text);

        if let Some(delta) = self.take_digit() {
            let updated = digits::apply_odometer(stage, kilometres, delta);
            self.board.settings().write(
                SettingKey::Odometer,
                SettingValue::OdometerTenths(updated * 10),
            );
        }
    }

    fn render_stopwatch(&mut self, now: B::Instant) {
        if !self.stopwatch_ack && self.label_if_due(now) {
            return;
        }
        if self.stopwatch.in_hold(now) {
            self.can_switch_function = false;
            self.blink(BlinkRate::Alert);
            self.show(&format_elapsed(self.stopwatch.captured()));
        } else {
            self.can_switch_function = true;
            self.blink(BlinkRate::Off);
            self.show(&format_elapsed(self.stopwatch.elapsed(now)));
        }
    }

    fn render_pressure(&mut self, now: B::Instant) {
        if self.label_if_due(now) {
            return;
        }
        if self.refresh_due(now, PRESSURE_REFRESH) {
            let unit = self.unit();
            let pin = self.board.adc().voltage(AdcChannel::OilPressure);
            let pressure = sensors::oil_pressure(pin, unit);
            let mut text = DisplayText::new();
            let _ = write!(text, "{pressure:.1} {}", unit.pressure_acronym());
            self.show(&text);
        }
    }

    fn render_temperature(&mut self, now: B::Instant) {
        if self.label_if_due(now) {
            return;
        }
        if self.set_label_due(now) {
            let text = if self.temperature_threshold.active {
                "  ON  "
            } else {
                " OFF  "
            };
            self.show(text);
            return;
        }
        let unit = self.unit();
        let sample = self.current_temperature();
        self.averager.push(sample);
        if self.refresh_due(now, TEMPERATURE_REFRESH) {
            if self.averager.len() > 2 {
                let value = self.averager.mean().unwrap_or(sample);
                self.averager.clear();
                self.show(&sensors::format_temperature(value, unit));
            } else {
                self.show(&sensors::format_temperature(sample, unit));
            }
        }
    }

    fn render_set_max_temperature(&mut self, now: B::Instant) {
        if self.editor_label_if_due(now) {
            return;
        }
        if let Some(delta) = self.take_digit() {
            self.temperature_threshold.limit =
                digits::apply_max_temperature(self.temperature_threshold.limit, delta);
        }
        let unit = self.unit();
        let limit = f32::from(self.temperature_threshold.limit);
        self.show(&sensors::format_temperature(limit, unit));
    }

    fn render_voltage(&mut self, now: B::Instant) {
        if self.label_if_due(now) {
            return;
        }
        if self.refresh_due(now, VOLTAGE_REFRESH) {
            let pin = self.board.adc().voltage(AdcChannel::Battery);
            let volts = sensors::battery_voltage(pin);
            let mut text = DisplayText::new();
            let _ = write!(text, " {volts:.1}V");
            self.show(&text);
        }
    }

    fn render_altitude(&mut self, now: B::Instant) {
        if self.label_if_due(now) {
            return;
        }
        match self.board.gps().fix() {
            Some(fix) if self.board.gps().has_fix() => {
                let unit = self.unit();
                let altitude = unit.altitude_from_metres(fix.altitude_m);
                let mut text = DisplayText::new();
                let _ = write!(text, "{}{}", altitude as i32, unit.altitude_acronym());
                self.show(&text);
            }
            _ => self.show_word(Word::Signal),
        }
    }

    fn render_heading(&mut self, now: B::Instant) {
        if self.label_if_due(now) {
            return;
        }
        match self.board.gps().fix() {
            Some(fix) if self.board.gps().has_fix() => {
                let mut text = DisplayText::new();
                let _ = write!(text, "{}{}", fix.course_deg as i32, fix.compass_direction());
                self.show(&text);
            }
            _ => self.show_word(Word::Signal),
        }
    }

    fn render_gsensor(&mut self, now: B::Instant) {
        if self.label_if_due(now) {
            return;
        }
        if self.refresh_due(now, GSENSOR_REFRESH) {
            let trim = self.board.settings().imu_trim();
            let accel = self.board.imu().accel();
            let magnitude = sensors::g_magnitude(accel, trim);
            let mut text = DisplayText::new();
            let _ = write!(text, " {magnitude:.1}G");
            self.show(&text);
        }
    }

    fn render_setting_menu(&mut self) {
        if let Some(delta) = self.take_digit() {
            self.setting_cursor = digits::apply_setting_cursor(self.setting_cursor, delta);
        }
        let cursor = self.setting_cursor;
        let mut text = DisplayText::new();
        let _ = write!(text, "SET  {cursor}");
        self.show(&text);
    }

    fn render_set_language(&mut self, now: B::Instant) {
        if self.editor_label_if_due(now) {
            return;
        }
        if let Some(delta) = self.take_digit() {
            let index = self.board.settings().language().as_index();
            let updated = digits::apply_wrapping_index(index, Language::COUNT, delta);
            if let Some(language) = Language::from_index(updated) {
                self.board
                    .settings()
                    .write(SettingKey::Language, SettingValue::Language(language));
            }
        }
        let code = self.board.settings().language().code();
        self.show(code);
    }

    fn render_set_clock_format(&mut self, now: B::Instant) {
        if self.editor_label_if_due(now) {
            return;
        }
        if let Some(delta) = self.take_digit()
            && matches!(delta, digits::DigitDelta::Add1 | digits::DigitDelta::Sub1)
        {
            let toggled = self.board.settings().clock_format().toggled();
            self.board
                .settings()
                .write(SettingKey::ClockFormat, SettingValue::ClockFormat(toggled));
        }
        let name = self.board.settings().clock_format().display_name();
        self.show(name);
    }

    fn render_set_unit(&mut self, now: B::Instant) {
        if self.editor_label_if_due(now) {
            return;
        }
        if let Some(delta) = self.take_digit() {
            let index = self.board.settings().unit().as_index();
            let updated =
                digits::apply_wrapping_index(index, crate::units::UnitSystem::COUNT, delta);
            if let Some(unit) = crate::units::UnitSystem::from_index(updated) {
                self.board
                    .settings()
                    .write(SettingKey::Unit, SettingValue::Unit(unit));
            }
        }
        let name = self.board.settings().unit().display_name();
        self.show(name);
    }

    fn render_sw_update(&mut self, now: B::Instant) {
        if self.editor_label_if_due(now) {
            return;
        }
        self.can_switch_function = false;
        self.show(" WIFI ");
        if !self.update_started {
            self.update_started = true;
            self.board.updater().begin_update();
        }
    }

    fn render_set_display_brightness(&mut self, now: B::Instant) {
        if self.editor_label_if_due(now) {
            return;
        }
        if let Some(delta) = self.take_digit() {
            let level = self.board.display().brightness();
            let updated = digits::apply_display_brightness(level, delta);
            self.board.display().set_brightness(updated);
            self.board
                .settings()
                .write(SettingKey::DisplayBrightness, SettingValue::Level(updated));
        }
        let level = self.board.display().brightness();
        let mut text = DisplayText::new();
        let _ = write!(text, "{level:>6}");
        self.show(&text);
    }

    fn render_set_sensor_count(&mut self, now: B::Instant) {
        if self.editor_label_if_due(now) {
            return;
        }
        if let Some(delta) = self.take_digit() {
            let count = self.board.settings().sensor_count();
            let updated = digits::apply_sensor_count(count, delta);
            self.board
                .settings()
                .write(SettingKey::SensorCount, SettingValue::Count(updated));
        }
        const SENSOR_SETS: [&str; 3] = ["V", "V+T", "V+T+P"];
        let count = self.board.settings().sensor_count();
        let index = usize::from(count.clamp(1, 3)) - 1;
        self.show(SENSOR_SETS[index]);
    }

    fn render_set_auto_off(&mut self, now: B::Instant) {
        if self.editor_label_if_due(now) {
            return;
        }
        if let Some(delta) = self.take_digit() {
            let hours = self.board.settings().auto_off_hours();
            let updated = digits::apply_auto_off(hours, delta);
            self.board
                .settings()
                .write(SettingKey::AutoOffHours, SettingValue::Hours(updated));
        }
        let hours = self.board.settings().auto_off_hours();
        let mut text = DisplayText::new();
        let _ = write!(text, "{hours}H");
        self.show(&text);
    }

    fn render_set_backlight(&mut self, now: B::Instant) {
        if self.editor_label_if_due(now) {
            return;
        }
        if let Some(delta) = self.take_digit() {
            let level = self.board.settings().backlight_brightness();
            let updated = digits::apply_backlight_brightness(level, delta);
            self.board.settings().write(
                SettingKey::BacklightBrightness,
                SettingValue::Level(updated),
            );
        }
        let level = self.board.settings().backlight_brightness();
        let mut text = DisplayText::new();
        let _ = write!(text, "{level:>6}");
        self.show(&text);
    }

    fn render_set_imu_trim(&mut self, now: B::Instant) {
        if self.editor_label_if_due(now) {
            return;
        }
        if let Some(delta) = self.take_digit() {
            let trim = self.board.settings().imu_trim();
            let updated = digits::apply_imu_trim(trim, delta);
            self.board
                .settings()
                .write(SettingKey::ImuTrim, SettingValue::Trim(updated));
        }
        let trim = self.board.settings().imu_trim();
        let mut text = DisplayText::new();
        let _ = write!(text, "X{}Z{}", trim.x_tenths, trim.z_tenths);
        self.show(&text);
    }
}
