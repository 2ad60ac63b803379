//! Edge-interrupt button debouncing and press classification.
//!
//! The firmware's interrupt layer forwards every raw edge together with the
//! timestamp captured in the handler; classification therefore never depends
//! on how quickly the main loop drains its queue. A rising edge is accepted
//! only when it lands more than [`DEBOUNCE_WINDOW`] after the previous
//! accepted release, and the accepted release classifies the press as long
//! when it lasted strictly longer than [`LONG_PRESS_THRESHOLD`].

use core::time::Duration;

use crate::hal::Monotonic;

/// Minimum gap between two accepted releases of the same button.
pub const DEBOUNCE_WINDOW: Duration = Duration::from_millis(200);

/// Press duration above which (exclusive) a release classifies as long.
pub const LONG_PRESS_THRESHOLD: Duration = Duration::from_millis(700);

/// Number of physical buttons on the panel.
pub const BUTTON_COUNT: usize = 13;

/// Identity of one physical button.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ButtonId {
    /// Time/date topic selector.
    Clock,
    /// Speed display selector.
    Speed,
    /// Acceleration timer selector.
    Accel,
    /// Lap timer selector.
    Lap,
    /// Odometer selector.
    Odometer,
    /// Free-running stopwatch selector.
    Stopwatch,
    /// Analog sensor group selector.
    Sensors,
    /// Compass/attitude group selector.
    Nav,
    /// Confirm/reset and power button.
    Set,
    /// Digit button worth 1000.
    Thousands,
    /// Digit button worth 100.
    Hundreds,
    /// Digit button worth 10.
    Tens,
    /// Digit button worth 1.
    Units,
}

/// Every button in index order.
pub const ALL_BUTTONS: [ButtonId; BUTTON_COUNT] = [
    ButtonId::Clock,
    ButtonId::Speed,
    ButtonId::Accel,
    ButtonId::Lap,
    ButtonId::Odometer,
    ButtonId::Stopwatch,
    ButtonId::Sensors,
    ButtonId::Nav,
    ButtonId::Set,
    ButtonId::Thousands,
    ButtonId::Hundreds,
    ButtonId::Tens,
    ButtonId::Units,
];

impl ButtonId {
    /// Deterministic index for per-button state tables.
    pub const fn as_index(self) -> usize {
        match self {
            ButtonId::Clock => 0,
            ButtonId::Speed => 1,
            ButtonId::Accel => 2,
            ButtonId::Lap => 3,
            ButtonId::Odometer => 4,
            ButtonId::Stopwatch => 5,
            ButtonId::Sensors => 6,
            ButtonId::Nav => 7,
            ButtonId::Set => 8,
            ButtonId::Thousands => 9,
            ButtonId::Hundreds => 10,
            ButtonId::Tens => 11,
            ButtonId::Units => 12,
        }
    }

    /// Attempts to construct a [`ButtonId`] from a raw index.
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < BUTTON_COUNT {
            Some(ALL_BUTTONS[index])
        } else {
            None
        }
    }

    /// Returns `true` for the buttons handled by the mode-switch dispatcher.
    pub const fn is_mode_switch(self) -> bool {
        matches!(
            self,
            ButtonId::Clock
                | ButtonId::Speed
                | ButtonId::Accel
                | ButtonId::Lap
                | ButtonId::Odometer
                | ButtonId::Stopwatch
                | ButtonId::Sensors
                | ButtonId::Nav
        )
    }

    /// Returns `true` for the four digit buttons.
    pub const fn is_digit(self) -> bool {
        matches!(
            self,
            ButtonId::Thousands | ButtonId::Hundreds | ButtonId::Tens | ButtonId::Units
        )
    }
}

/// Signal edge reported by the interrupt layer for a pulled-up, active-low
/// input: `Pressed` is the falling edge, `Released` the rising edge.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Edge {
    Pressed,
    Released,
}

/// Classified press produced by the debouncer, one per accepted release.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ButtonEvent<I> {
    pub button: ButtonId,
    pub long_press: bool,
    pub at: I,
}

/// Per-button transient press state.
#[derive(Copy, Clone, Debug)]
struct Debouncer<I> {
    pressed_at: Option<I>,
    released_at: Option<I>,
    held: bool,
}

impl<I: Monotonic> Debouncer<I> {
    const fn new() -> Self {
        Self {
            pressed_at: None,
            released_at: None,
            held: false,
        }
    }

    /// Feeds one raw edge. Returns the long-press classification when the
    /// edge is an accepted release.
    fn on_edge(&mut self, edge: Edge, now: I) -> Option<bool> {
        match edge {
            Edge::Pressed => {
                self.pressed_at = Some(now);
                self.held = true;
                None
            }
            Edge::Released => {
                self.held = false;
                if let Some(previous) = self.released_at
                    && now.since(previous) <= DEBOUNCE_WINDOW
                {
                    // Bounce: dropped without touching the accepted-release
                    // timestamp, so a burst of bounces stays suppressed.
                    return None;
                }
                self.released_at = Some(now);
                let pressed_at = self.pressed_at?;
                Some(now.since(pressed_at) > LONG_PRESS_THRESHOLD)
            }
        }
    }
}

/// One debouncer per physical button, plus the queries the mode renderers
/// need (held state for the settings chord, release recency for the
/// "what am I looking at" label affordance).
pub struct ButtonBank<I> {
    buttons: [Debouncer<I>; BUTTON_COUNT],
}

impl<I: Monotonic> ButtonBank<I> {
    pub const fn new() -> Self {
        Self {
            buttons: [Debouncer::new(); BUTTON_COUNT],
        }
    }

    /// Feeds one raw edge for `button`, yielding a classified event on an
    /// accepted release.
    pub fn on_edge(&mut self, button: ButtonId, edge: Edge, now: I) -> Option<ButtonEvent<I>> {
        self.buttons[button.as_index()]
            .on_edge(edge, now)
            .map(|long_press| ButtonEvent {
                button,
                long_press,
                at: now,
            })
    }

    /// Returns `true` while `button` is physically held down.
    pub fn is_held(&self, button: ButtonId) -> bool {
        self.buttons[button.as_index()].held
    }

    /// Returns `true` when `button` had an accepted release less than
    /// `window` ago.
    pub fn released_within(&self, button: ButtonId, now: I, window: Duration) -> bool {
        self.buttons[button.as_index()]
            .released_at
            .is_some_and(|released| now.since(released) < window)
    }
}

impl<I: Monotonic> Default for ButtonBank<I> {
    fn default() -> Self {
        Self::new()
    }
}
