//! Power latch behavior: long-press toggling, wake rules, and the lock's
//! veto on powering off mid-edit.

mod common;

use common::{MockInstant, controller, long_press, press};
use obc_core::controller::TickOutcome;
use obc_core::input::ButtonId;
use obc_core::modes::Mode;

#[test]
fn long_set_press_toggles_power() {
    let mut obc = controller();
    assert!(obc.is_powered());

    long_press(&mut obc, ButtonId::Set, 1_000);
    assert!(!obc.is_powered());
    // The display is left cleared on the way down.
    assert_eq!(obc.board_mut().display.last_frame(), "");
    assert_eq!(obc.board_mut().power.transitions.as_slice(), &[true, false]);

    long_press(&mut obc, ButtonId::Set, 3_000);
    assert!(obc.is_powered());
    assert_eq!(
        obc.board_mut().power.transitions.as_slice(),
        &[true, false, true]
    );
}

#[test]
fn long_press_is_ignored_while_editing() {
    let mut obc = controller();
    press(&mut obc, ButtonId::Set, 1_000);
    assert_eq!(obc.mode(), Mode::SetHour);

    long_press(&mut obc, ButtonId::Set, 2_000);
    assert!(obc.is_powered());
    assert_eq!(obc.mode(), Mode::SetHour);
}

#[test]
fn short_set_press_wakes_without_entering_an_edit() {
    let mut obc = controller();
    long_press(&mut obc, ButtonId::Set, 1_000);
    assert!(!obc.is_powered());

    press(&mut obc, ButtonId::Set, 3_000);
    assert!(obc.is_powered());
    // The wake press is consumed; the hour mode is not pushed into its
    // editor.
    assert_eq!(obc.mode(), Mode::Hour);
    assert_eq!(obc.tick(MockInstant(4_000)), TickOutcome::Rendered);
}

#[test]
fn digit_presses_do_not_wake() {
    let mut obc = controller();
    long_press(&mut obc, ButtonId::Set, 1_000);
    assert!(!obc.is_powered());

    press(&mut obc, ButtonId::Units, 3_000);
    press(&mut obc, ButtonId::Thousands, 3_300);
    assert!(!obc.is_powered());
    assert_eq!(obc.tick(MockInstant(3_500)), TickOutcome::Unpowered);
}

#[test]
fn topic_press_wakes_and_still_switches() {
    let mut obc = controller();
    long_press(&mut obc, ButtonId::Set, 1_000);
    assert!(!obc.is_powered());

    press(&mut obc, ButtonId::Lap, 3_000);
    assert!(obc.is_powered());
    assert_eq!(obc.mode(), Mode::LapTiming);
}
