//! Interactive session driving one controller instance against the host
//! board. Commands simulate button presses, the passage of time, and sensor
//! inputs; any display frames produced since the previous command are echoed
//! back.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use obc_core::controller::ObcController;
use obc_core::hal::{AccelVector, GpsFix, Position, SpeedOverGround};
use obc_core::input::{ButtonId, Edge};

use crate::board::{
    HostAdc, HostBoard, HostDisplay, HostGps, HostImu, HostPower, HostRtc, HostStore, HostUpdater,
    HostWatchdog, SimInstant,
};

/// Frame period used by `tick` and `run`, matching the firmware loop.
const TICK_MS: u64 = 25;

pub struct Session {
    controller: ObcController<HostBoard>,
    now_ms: u64,
    printed: usize,
    frames: Rc<RefCell<Vec<String>>>,
    clock: Rc<Cell<u64>>,
    gps: Rc<Cell<Option<GpsFix>>>,
    accel: Rc<Cell<AccelVector>>,
    volts: Rc<Cell<[f32; 3]>>,
    power: Rc<Cell<bool>>,
}

impl Session {
    pub fn new() -> Self {
        let frames = Rc::new(RefCell::new(Vec::new()));
        let clock = Rc::new(Cell::new(0_u64));
        let gps = Rc::new(Cell::new(None));
        let accel = Rc::new(Cell::new(AccelVector::default()));
        let volts = Rc::new(Cell::new([2.0, 0.4, 4.1]));
        let power = Rc::new(Cell::new(false));

        let board = HostBoard {
            display: HostDisplay::new(Rc::clone(&frames)),
            rtc: HostRtc::new(Rc::clone(&clock)),
            imu: HostImu {
                accel: Rc::clone(&accel),
            },
            adc: HostAdc {
                volts: Rc::clone(&volts),
            },
            gps: HostGps::new(Rc::clone(&gps)),
            store: HostStore::default(),
            watchdog: HostWatchdog::default(),
            power: HostPower {
                on: Rc::clone(&power),
            },
            updater: HostUpdater,
        };

        Self {
            controller: ObcController::new(board, SimInstant(0)),
            now_ms: 0,
            printed: 0,
            frames,
            clock,
            gps,
            accel,
            volts,
            power,
        }
    }

    pub fn handle_command(&mut self, input: &str) -> Vec<String> {
        let mut parts = input.split_whitespace();
        let command = parts.next().unwrap_or_default().to_ascii_lowercase();
        let args: Vec<&str> = parts.collect();

        let mut responses = match command.as_str() {
            "help" => return help_text(),
            "press" => self.press(&args, false),
            "hold" => self.press(&args, true),
            "chord" => self.chord(),
            "tick" => self.tick_n(args.first().and_then(|n| n.parse().ok()).unwrap_or(1)),
            "run" => {
                let millis: u64 = args.first().and_then(|n| n.parse().ok()).unwrap_or(1_000);
                self.tick_n((millis / TICK_MS).max(1))
            }
            "gps" => self.set_gps(&args),
            "nofix" => {
                self.gps.set(None);
                Vec::new()
            }
            "accel" => {
                let x: f32 = args.first().and_then(|v| v.parse().ok()).unwrap_or(0.0);
                self.accel.set(AccelVector { x, y: 0.0, z: 1.0 });
                Vec::new()
            }
            "volts" => self.set_volts(&args),
            "status" => self.status(),
            _ => vec![format!("unknown command `{command}`; try `help`")],
        };

        responses.extend(self.drain_frames());
        responses
    }

    fn advance(&mut self, millis: u64) {
        self.now_ms += millis;
        self.clock.set(self.now_ms);
    }

    fn now(&self) -> SimInstant {
        SimInstant(self.now_ms)
    }

    fn press(&mut self, args: &[&str], long: bool) -> Vec<String> {
        let Some(button) = args.first().copied().and_then(parse_button) else {
            return vec!["usage: press|hold <clock|speed|accel|lap|odo|stopwatch|sensors|nav|set|1000|100|10|1>".to_owned()];
        };
        // Clear of the debounce window even when commands arrive back to
        // back in simulated time.
        self.advance(210);
        self.controller.handle_edge(button, Edge::Pressed, self.now());
        self.advance(if long { 800 } else { 50 });
        self.controller
            .handle_edge(button, Edge::Released, self.now());
        self.tick_n(1)
    }

    fn chord(&mut self) -> Vec<String> {
        self.advance(210);
        self.controller
            .handle_edge(ButtonId::Thousands, Edge::Pressed, self.now());
        self.advance(10);
        self.controller
            .handle_edge(ButtonId::Tens, Edge::Pressed, self.now());
        self.advance(50);
        self.controller
            .handle_edge(ButtonId::Tens, Edge::Released, self.now());
        self.advance(10);
        self.controller
            .handle_edge(ButtonId::Thousands, Edge::Released, self.now());
        self.tick_n(1)
    }

    fn tick_n(&mut self, count: u64) -> Vec<String> {
        for _ in 0..count {
            self.advance(TICK_MS);
            self.controller.tick(self.now());
        }
        Vec::new()
    }

    fn set_gps(&mut self, args: &[&str]) -> Vec<String> {
        let kmh: f32 = args.first().and_then(|v| v.parse().ok()).unwrap_or(0.0);
        let latitude: f64 = args.get(1).and_then(|v| v.parse().ok()).unwrap_or(45.618);
        let longitude: f64 = args.get(2).and_then(|v| v.parse().ok()).unwrap_or(9.281);
        self.gps.set(Some(GpsFix {
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
        }));
        Vec::new()
    }

    fn set_volts(&mut self, args: &[&str]) -> Vec<String> {
        let mut volts = self.volts.get();
        for (slot, value) in volts.iter_mut().zip(args) {
            if let Ok(parsed) = value.parse() {
                *slot = parsed;
            }
        }
        self.volts.set(volts);
        Vec::new()
    }

    fn status(&mut self) -> Vec<String> {
        let mode = self.controller.mode();
        let powered = self.controller.is_powered();
        let latched = self.power.get();
        let switching = self.controller.can_switch_function();
        let board = self.controller.board_mut();
        let blink = board.display.blink.get();
        let feeds = board.watchdog.feeds.get();
        vec![format!(
            "t={}ms mode={mode:?} powered={powered} latch={latched} switching={switching} \
             blink={blink} watchdog_feeds={feeds}",
            self.now_ms
        )]
    }

    fn drain_frames(&mut self) -> Vec<String> {
        let fresh: Vec<String> = {
            let frames = self.frames.borrow();
            frames[self.printed..]
                .iter()
                .map(|frame| format!("[{frame}]"))
                .collect()
        };
        self.printed += fresh.len();
        fresh
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_button(name: &str) -> Option<ButtonId> {
    match name.to_ascii_lowercase().as_str() {
        "clock" => Some(ButtonId::Clock),
        "speed" => Some(ButtonId::Speed),
        "accel" => Some(ButtonId::Accel),
        "lap" => Some(ButtonId::Lap),
        "odo" => Some(ButtonId::Odometer),
        "stopwatch" | "timer" => Some(ButtonId::Stopwatch),
        "sensors" => Some(ButtonId::Sensors),
        "nav" => Some(ButtonId::Nav),
        "set" => Some(ButtonId::Set),
        "1000" => Some(ButtonId::Thousands),
        "100" => Some(ButtonId::Hundreds),
        "10" => Some(ButtonId::Tens),
        "1" => Some(ButtonId::Units),
        _ => None,
    }
}

fn help_text() -> Vec<String> {
    [
        "press <button>   short-press a panel button",
        "hold <button>    long-press a panel button",
        "chord            press 1000+10 together (settings menu)",
        "tick [n]         run n scheduler ticks (25 ms each)",
        "run [ms]         run scheduler ticks spanning ms",
        "gps <kmh> [lat lon]  publish a fix",
        "nofix            drop the fix",
        "accel <x_g>      set longitudinal acceleration",
        "volts <t> <p> <b>    set sender pin voltages",
        "status           show controller state",
        "exit             quit",
        "buttons: clock speed accel lap odo stopwatch sensors nav set 1000 100 10 1",
    ]
    .iter()
    .map(|&line| line.to_owned())
    .collect()
}
