use core::cell::RefCell;

use cortex_m::interrupt;
use cortex_m::register::primask;
use critical_section::{self, RawRestoreState};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_stm32 as hal;
use embassy_stm32::adc::Adc;
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::{Level, Output, Pull, Speed};
use embassy_stm32::i2c::I2c;
use embassy_stm32::time::Hertz;
use embassy_sync::blocking_mutex::raw::ThreadModeRawMutex;
use embassy_sync::channel::{Channel, Receiver, Sender};
use obc_core::controller::ObcController;
use obc_core::input::{ButtonId, Edge};
use static_cell::StaticCell;

use crate::hw::gps::FixCell;
use crate::hw::{self, ObcBoard, SharedI2c};
use crate::instant::ObcInstant;

mod input_task;
mod obc_task;

critical_section::set_impl!(InterruptCriticalSection);

struct InterruptCriticalSection;

unsafe impl critical_section::Impl for InterruptCriticalSection {
    unsafe fn acquire() -> RawRestoreState {
        let primask = primask::read();
        interrupt::disable();
        primask.is_active()
    }

    unsafe fn release(restore_state: RawRestoreState) {
        if restore_state {
            unsafe {
                interrupt::enable();
            }
        }
    }
}

/// Depth of the raw edge queue between the EXTI tasks and the controller.
pub const EDGE_QUEUE_DEPTH: usize = 16;

/// One timestamped edge as captured by a button task.
#[derive(Copy, Clone, Debug)]
pub struct RawEdge {
    pub button: ButtonId,
    pub edge: Edge,
    pub at: ObcInstant,
}

pub type EdgeQueue = Channel<ThreadModeRawMutex, RawEdge, EDGE_QUEUE_DEPTH>;
pub type EdgeSender = Sender<'static, ThreadModeRawMutex, RawEdge, EDGE_QUEUE_DEPTH>;
pub type EdgeReceiver = Receiver<'static, ThreadModeRawMutex, RawEdge, EDGE_QUEUE_DEPTH>;

static EDGE_QUEUE: EdgeQueue = Channel::new();
static I2C_BUS: StaticCell<SharedI2c> = StaticCell::new();
static FIX_CELL: FixCell = FixCell::new();

/// Edges lost to a full queue; written by the button tasks, drained and
/// reported by the controller task.
pub static DROPPED_EDGES: portable_atomic::AtomicU32 = portable_atomic::AtomicU32::new(0);

#[embassy_executor::main]
pub async fn main(spawner: Spawner) {
    let config = hal::Config::default();
    let p = hal::init(config);

    let i2c = I2c::new_blocking(p.I2C1, p.PB6, p.PB7, Hertz(100_000), Default::default());
    let bus: &'static SharedI2c = I2C_BUS.init(RefCell::new(i2c));

    let board = ObcBoard {
        display: hw::display::SegDisplay::new(bus),
        rtc: hw::rtc::Ds3231::new(bus),
        imu: hw::imu::Mpu6050::new(bus),
        adc: hw::adc::SenderInputs::new(Adc::new(p.ADC1), p.PB0, p.PB1, p.PB2),
        gps: hw::gps::GpsFrontEnd::new(&FIX_CELL),
        settings: hw::settings::RamSettingsStore::new(),
        watchdog: hw::watchdog::IwdgFeeder::new(p.IWDG),
        power: hw::power::PowerPins::new(
            Output::new(p.PB3, Level::High, Speed::Low),
            Output::new(p.PB4, Level::High, Speed::Low),
        ),
        updater: hw::update::SystemUpdater,
    };
    let controller = ObcController::new(board, ObcInstant::now());

    let sender = EDGE_QUEUE.sender();
    let buttons: [(ExtiInput<'static>, ButtonId); obc_core::input::BUTTON_COUNT] = [
        (ExtiInput::new(p.PA0, p.EXTI0, Pull::Up), ButtonId::Clock),
        (ExtiInput::new(p.PA1, p.EXTI1, Pull::Up), ButtonId::Speed),
        (ExtiInput::new(p.PA2, p.EXTI2, Pull::Up), ButtonId::Accel),
        (ExtiInput::new(p.PA3, p.EXTI3, Pull::Up), ButtonId::Lap),
        (ExtiInput::new(p.PA4, p.EXTI4, Pull::Up), ButtonId::Odometer),
        (ExtiInput::new(p.PA5, p.EXTI5, Pull::Up), ButtonId::Stopwatch),
        (ExtiInput::new(p.PA6, p.EXTI6, Pull::Up), ButtonId::Sensors),
        (ExtiInput::new(p.PA7, p.EXTI7, Pull::Up), ButtonId::Nav),
        (ExtiInput::new(p.PA8, p.EXTI8, Pull::Up), ButtonId::Set),
        (ExtiInput::new(p.PA9, p.EXTI9, Pull::Up), ButtonId::Thousands),
        (ExtiInput::new(p.PA10, p.EXTI10, Pull::Up), ButtonId::Hundreds),
        (ExtiInput::new(p.PA11, p.EXTI11, Pull::Up), ButtonId::Tens),
        (ExtiInput::new(p.PA12, p.EXTI12, Pull::Up), ButtonId::Units),
    ];
    for (pin, button) in buttons {
        spawner
            .spawn(input_task::run(pin, button, sender))
            .expect("failed to spawn button task");
    }

    spawner
        .spawn(obc_task::run(controller, EDGE_QUEUE.receiver()))
        .expect("failed to spawn controller task");

    core::future::pending::<()>().await;
}
