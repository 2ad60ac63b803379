//! Lap-timer behavior driven through the controller: session control from
//! the set button, the staged hold displays, and the lock they impose.

mod common;

use common::{MockInstant, controller, fix_at, press};
use obc_core::input::ButtonId;
use obc_core::modes::Mode;

const TRACK_LAT: f64 = 45.618;
const TRACK_LON: f64 = 9.281;
const DEG_PER_METRE: f64 = 1.0 / 111_320.0;

fn at_line(offset_m: f64) -> Option<obc_core::hal::GpsFix> {
    Some(fix_at(TRACK_LAT + offset_m * DEG_PER_METRE, TRACK_LON, 80.0))
}

#[test]
fn session_needs_a_fix_to_start() {
    let mut obc = controller();
    press(&mut obc, ButtonId::Lap, 1_000);
    assert_eq!(obc.mode(), Mode::LapTiming);

    // No fix: the start request is ignored and the mode reports no signal.
    press(&mut obc, ButtonId::Set, 1_300);
    obc.tick(MockInstant(2_100));
    assert_eq!(obc.board_mut().display.last_frame(), "SIGNAL");

    // With a fix the session starts and live lap time replaces READY.
    obc.board_mut().gps.current = at_line(0.0);
    press(&mut obc, ButtonId::Set, 2_500);
    obc.tick(MockInstant(3_300));
    assert_eq!(obc.board_mut().display.last_frame(), " 0.00.7");
}

#[test]
fn completed_lap_locks_through_the_hold_chain() {
    let mut obc = controller();
    obc.board_mut().gps.current = at_line(0.0);

    press(&mut obc, ButtonId::Lap, 1_000);
    press(&mut obc, ButtonId::Set, 1_300);

    // First render anchors the start line on the current fix.
    obc.tick(MockInstant(2_100));

    // Out past the release radius, then back onto the line. The controller
    // reads whatever fix the receiver holds; the lap timer ignores repeats.
    obc.board_mut().gps.current = at_line(200.0);
    obc.tick(MockInstant(30_000));
    obc.tick(MockInstant(30_025));

    obc.board_mut().gps.current = at_line(2.0);
    obc.tick(MockInstant(91_350));
    // 91 350 - 1 350 = 90 s lap, held on the display.
    assert_eq!(obc.board_mut().display.last_frame(), " 1.30.0");
    assert!(!obc.can_switch_function());

    // Topic buttons are dead while the hold chain runs.
    press(&mut obc, ButtonId::Speed, 91_500);
    assert_eq!(obc.mode(), Mode::LapTiming);

    // First lap has no delay stage; next comes the lap count.
    obc.tick(MockInstant(94_500));
    assert_eq!(obc.board_mut().display.last_frame(), "1  LAP");

    // Chain exhausted: back to live timing, unlocked.
    obc.tick(MockInstant(97_500));
    assert!(obc.can_switch_function());
}

#[test]
fn ending_a_session_shows_count_then_fastest() {
    let mut obc = controller();
    obc.board_mut().gps.current = at_line(0.0);

    press(&mut obc, ButtonId::Lap, 1_000);
    press(&mut obc, ButtonId::Set, 1_300);
    obc.tick(MockInstant(2_100));

    obc.board_mut().gps.current = at_line(200.0);
    obc.tick(MockInstant(30_000));
    obc.board_mut().gps.current = at_line(2.0);
    obc.tick(MockInstant(91_350));

    // Let the hold chain finish, then stop the session.
    obc.tick(MockInstant(98_000));
    press(&mut obc, ButtonId::Set, 98_200);
    obc.tick(MockInstant(98_400));
    assert_eq!(obc.board_mut().display.last_frame(), "     1");

    obc.tick(MockInstant(101_400));
    assert_eq!(obc.board_mut().display.last_frame(), " 1.30.0");

    // Summary over: the stopped mode idles on READY.
    obc.tick(MockInstant(104_400));
    assert_eq!(obc.board_mut().display.last_frame(), "READY");
}

#[test]
fn parked_on_the_line_never_retriggers() {
    let mut obc = controller();
    obc.board_mut().gps.current = at_line(0.0);

    press(&mut obc, ButtonId::Lap, 1_000);
    press(&mut obc, ButtonId::Set, 1_300);
    obc.tick(MockInstant(2_100));

    obc.board_mut().gps.current = at_line(200.0);
    obc.tick(MockInstant(30_000));
    obc.board_mut().gps.current = at_line(2.0);
    obc.tick(MockInstant(91_350));
    assert_eq!(obc.board_mut().display.last_frame(), " 1.30.0");

    // The same fix keeps being served while the car sits on the line; the
    // hold chain must run out into live timing with the count still at one.
    obc.tick(MockInstant(101_000));
    obc.tick(MockInstant(102_000));
    assert!(obc.can_switch_function());

    // End the session: the summary shows a single completed lap.
    press(&mut obc, ButtonId::Set, 102_500);
    obc.tick(MockInstant(102_700));
    assert_eq!(obc.board_mut().display.last_frame(), "     1");
}
