//! Mode state-machine behavior driven end-to-end through button edges.

mod common;

use common::{MockInstant, controller, controller_with, long_press, press, MockBoard};
use obc_core::input::{ButtonId, Edge};
use obc_core::modes::Mode;
use obc_core::settings::{ClockFormat, SettingKey, SettingValue};

const MODE_SWITCH_BUTTONS: [ButtonId; 8] = [
    ButtonId::Clock,
    ButtonId::Speed,
    ButtonId::Accel,
    ButtonId::Lap,
    ButtonId::Odometer,
    ButtonId::Stopwatch,
    ButtonId::Sensors,
    ButtonId::Nav,
];

/// Presses every topic button and asserts the mode does not move.
fn assert_mode_locked(obc: &mut common::TestController, from_ms: u64) -> u64 {
    let mode = obc.mode();
    assert!(!obc.can_switch_function());
    let mut at = from_ms;
    for button in MODE_SWITCH_BUTTONS {
        press(obc, button, at);
        obc.tick(MockInstant(at + 60));
        assert_eq!(obc.mode(), mode, "lock violated by {button:?}");
        at += 300;
    }
    at
}

#[test]
fn hour_label_then_live_time() {
    let mut obc = controller();
    assert_eq!(obc.mode(), Mode::Hour);

    press(&mut obc, ButtonId::Speed, 1_000);
    assert_eq!(obc.mode(), Mode::Speed);

    press(&mut obc, ButtonId::Clock, 2_000);
    assert_eq!(obc.mode(), Mode::Hour);

    // Within 700 ms of the selector release: the mode announces itself.
    obc.tick(MockInstant(2_100));
    assert_eq!(obc.board_mut().display.last_frame(), "HOUR");

    // Past the window: live time, dot shown on the even second.
    obc.tick(MockInstant(2_800));
    assert_eq!(obc.board_mut().display.last_frame(), " 12.34");

    obc.board_mut().rtc.datetime.second = 1;
    obc.tick(MockInstant(2_825));
    assert_eq!(obc.board_mut().display.last_frame(), " 1234");
}

#[test]
fn twelve_hour_format_shows_midnight_as_twelve() {
    let board = MockBoard {
        store: common::MockStore::default().with(
            SettingKey::ClockFormat,
            SettingValue::ClockFormat(ClockFormat::TwelveHour),
        ),
        ..MockBoard::default()
    };
    let mut obc = controller_with(board);
    obc.board_mut().rtc.datetime.hour = 0;
    obc.board_mut().rtc.datetime.minute = 15;

    obc.tick(MockInstant(1_000));
    assert_eq!(obc.board_mut().display.last_frame(), "12.15AM");
}

#[test]
fn clock_pair_edits_hold_the_lock() {
    let mut obc = controller();

    press(&mut obc, ButtonId::Set, 1_000);
    assert_eq!(obc.mode(), Mode::SetHour);
    let at = assert_mode_locked(&mut obc, 1_400);

    press(&mut obc, ButtonId::Set, at);
    assert_eq!(obc.mode(), Mode::Hour);
    assert!(obc.can_switch_function());

    // Date chain: SetYear then SetDate, locked throughout.
    press(&mut obc, ButtonId::Clock, at + 300);
    assert_eq!(obc.mode(), Mode::Date);
    press(&mut obc, ButtonId::Set, at + 600);
    assert_eq!(obc.mode(), Mode::SetYear);
    let at = assert_mode_locked(&mut obc, at + 900);
    press(&mut obc, ButtonId::Set, at);
    assert_eq!(obc.mode(), Mode::SetDate);
    let at = assert_mode_locked(&mut obc, at + 300);
    press(&mut obc, ButtonId::Set, at);
    assert_eq!(obc.mode(), Mode::Date);
    assert!(obc.can_switch_function());
}

#[test]
fn speed_limit_edit_toggles_the_monitor() {
    let mut obc = controller();
    press(&mut obc, ButtonId::Speed, 1_000);
    press(&mut obc, ButtonId::Set, 1_300);
    assert_eq!(obc.mode(), Mode::SetLimit);
    let at = assert_mode_locked(&mut obc, 1_600);

    press(&mut obc, ButtonId::Set, at);
    assert_eq!(obc.mode(), Mode::Speed);
    assert!(obc.can_switch_function());

    // The set release is recent, so the speed mode reports the new armed
    // state of the monitor.
    obc.tick(MockInstant(at + 100));
    assert_eq!(obc.board_mut().display.last_frame(), "  ON  ");

    // A second edit round-trip disarms it again.
    press(&mut obc, ButtonId::Set, at + 1_000);
    press(&mut obc, ButtonId::Set, at + 1_300);
    obc.tick(MockInstant(at + 1_400));
    assert_eq!(obc.board_mut().display.last_frame(), " OFF  ");
}

#[test]
fn odometer_edit_is_a_two_stage_chain() {
    let mut obc = controller();
    press(&mut obc, ButtonId::Odometer, 1_000);
    press(&mut obc, ButtonId::Set, 1_300);
    assert_eq!(obc.mode(), Mode::SetOdometerThousands);
    let at = assert_mode_locked(&mut obc, 1_600);

    press(&mut obc, ButtonId::Set, at);
    assert_eq!(obc.mode(), Mode::SetOdometerHundreds);
    let at = assert_mode_locked(&mut obc, at + 300);

    press(&mut obc, ButtonId::Set, at);
    assert_eq!(obc.mode(), Mode::Odometer);
    assert!(obc.can_switch_function());
}

#[test]
fn sensor_cycle_with_three_sensors() {
    let board = MockBoard {
        store: common::MockStore::default()
            .with(SettingKey::SensorCount, SettingValue::Count(3)),
        ..MockBoard::default()
    };
    let mut obc = controller_with(board);

    press(&mut obc, ButtonId::Sensors, 1_000);
    assert_eq!(obc.mode(), Mode::Pressure);
    press(&mut obc, ButtonId::Sensors, 1_300);
    assert_eq!(obc.mode(), Mode::Temperature);
    press(&mut obc, ButtonId::Sensors, 1_600);
    assert_eq!(obc.mode(), Mode::Voltage);
    press(&mut obc, ButtonId::Sensors, 1_900);
    assert_eq!(obc.mode(), Mode::Pressure);
}

#[test]
fn sensor_cycle_with_one_sensor_stays_on_voltage() {
    let mut obc = controller();
    press(&mut obc, ButtonId::Sensors, 1_000);
    assert_eq!(obc.mode(), Mode::Voltage);
    press(&mut obc, ButtonId::Sensors, 1_300);
    assert_eq!(obc.mode(), Mode::Voltage);
}

#[test]
fn nav_cycle_walks_gsensor_heading_altitude() {
    let mut obc = controller();
    press(&mut obc, ButtonId::Nav, 1_000);
    assert_eq!(obc.mode(), Mode::GSensor);
    press(&mut obc, ButtonId::Nav, 1_300);
    assert_eq!(obc.mode(), Mode::Heading);
    press(&mut obc, ButtonId::Nav, 1_600);
    assert_eq!(obc.mode(), Mode::Altitude);
    press(&mut obc, ButtonId::Nav, 1_900);
    assert_eq!(obc.mode(), Mode::GSensor);
}

#[test]
fn digit_chord_opens_the_settings_menu_behind_the_fill() {
    let mut obc = controller();

    obc.handle_edge(ButtonId::Thousands, Edge::Pressed, MockInstant(1_000));
    obc.handle_edge(ButtonId::Tens, Edge::Pressed, MockInstant(1_010));
    obc.handle_edge(ButtonId::Tens, Edge::Released, MockInstant(1_060));
    assert_eq!(obc.mode(), Mode::SettingMenu);
    assert_eq!(obc.board_mut().display.fill_count, 1);
    obc.handle_edge(ButtonId::Thousands, Edge::Released, MockInstant(1_100));

    // The dead-pixel fill owns the display for its dwell.
    let frames_before = obc.board_mut().display.frames.len();
    obc.tick(MockInstant(1_500));
    obc.tick(MockInstant(2_500));
    assert_eq!(obc.board_mut().display.frames.len(), frames_before);

    obc.tick(MockInstant(3_100));
    assert_eq!(obc.board_mut().display.last_frame(), "SET  0");
}

#[test]
fn menu_cursor_steps_and_opens_editors() {
    let mut obc = controller();
    obc.handle_edge(ButtonId::Thousands, Edge::Pressed, MockInstant(1_000));
    obc.handle_edge(ButtonId::Tens, Edge::Pressed, MockInstant(1_010));
    obc.handle_edge(ButtonId::Tens, Edge::Released, MockInstant(1_060));
    obc.handle_edge(ButtonId::Thousands, Edge::Released, MockInstant(1_100));

    press(&mut obc, ButtonId::Units, 3_200);
    obc.tick(MockInstant(3_300));
    assert_eq!(obc.board_mut().display.last_frame(), "SET  1");

    // Cursor 1 is the clock-format editor; editors hold the lock.
    press(&mut obc, ButtonId::Set, 3_600);
    assert_eq!(obc.mode(), Mode::SetClockFormat);
    let at = assert_mode_locked(&mut obc, 3_900);

    press(&mut obc, ButtonId::Set, at);
    assert_eq!(obc.mode(), Mode::SettingMenu);
    assert!(obc.can_switch_function());
}

#[test]
fn pending_digit_is_consumed_exactly_once() {
    let mut obc = controller();
    press(&mut obc, ButtonId::Speed, 1_000);
    press(&mut obc, ButtonId::Set, 1_300);
    assert_eq!(obc.mode(), Mode::SetLimit);

    press(&mut obc, ButtonId::Hundreds, 2_500);
    obc.tick(MockInstant(2_600));
    assert_eq!(obc.board_mut().display.last_frame(), "100KMH");
    obc.tick(MockInstant(2_625));
    assert_eq!(obc.board_mut().display.last_frame(), "100KMH");
}

#[test]
fn long_digit_press_decrements() {
    let mut obc = controller();
    press(&mut obc, ButtonId::Speed, 1_000);
    press(&mut obc, ButtonId::Set, 1_300);

    press(&mut obc, ButtonId::Hundreds, 2_500);
    obc.tick(MockInstant(2_600));
    press(&mut obc, ButtonId::Tens, 2_900);
    obc.tick(MockInstant(3_000));
    assert_eq!(obc.board_mut().display.last_frame(), "110KMH");

    long_press(&mut obc, ButtonId::Tens, 3_300);
    obc.tick(MockInstant(4_200));
    assert_eq!(obc.board_mut().display.last_frame(), "100KMH");
}

#[test]
fn mode_switch_press_clears_the_pending_digit() {
    let mut obc = controller();
    press(&mut obc, ButtonId::Speed, 1_000);
    press(&mut obc, ButtonId::Set, 1_300);
    assert_eq!(obc.mode(), Mode::SetLimit);

    // Queue a delta, then hit a topic button before the next render. The
    // switch is ignored (locked) but the delta must still die with it.
    press(&mut obc, ButtonId::Hundreds, 2_500);
    press(&mut obc, ButtonId::Speed, 2_600);
    assert_eq!(obc.mode(), Mode::SetLimit);
    obc.tick(MockInstant(3_400));
    assert_eq!(obc.board_mut().display.last_frame(), "0KMH");
}

#[test]
fn stopwatch_selector_repress_laps_and_resets() {
    let mut obc = controller();
    press(&mut obc, ButtonId::Stopwatch, 1_000);
    assert_eq!(obc.mode(), Mode::Stopwatch);

    // Start, run 90 s, re-press the selector: lap marker.
    press(&mut obc, ButtonId::Set, 1_300);
    obc.tick(MockInstant(1_400));
    press(&mut obc, ButtonId::Stopwatch, 91_350);
    obc.tick(MockInstant(91_500));
    // The lap split is held on the display.
    assert_eq!(obc.board_mut().display.last_frame(), " 1.30.0");
    assert!(!obc.can_switch_function());

    // After the hold expires the live run resumes.
    obc.tick(MockInstant(95_000));
    assert!(obc.can_switch_function());

    // Stop, then re-press the selector: full reset.
    press(&mut obc, ButtonId::Set, 100_000);
    press(&mut obc, ButtonId::Stopwatch, 100_400);
    obc.tick(MockInstant(105_000));
    assert_eq!(obc.board_mut().display.last_frame(), " 0.00.0");
}
