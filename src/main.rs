#![no_std]
#![no_main]

mod logging;

#[cfg(not(feature = "defmt_logger"))]
use panic_halt as _;
#[cfg(feature = "defmt_logger")]
use panic_probe as _;

const NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[rtic::app(device = stm32f4xx_hal::pac, dispatchers = [USART3])]
mod app {
    use super::*;

    use bonk_core::{Config, Machine};
    use bonk_hardware::{board::BonkBoard, led::OrangeLed, BonkHardware};
    use rtic_monotonics::stm32::{ExtU64, Tim2};

    const CONFIG: Config = Config::new();

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        machine: Machine,
        board: BonkBoard,
        heartbeat_led: OrangeLed,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local) {
        let hw = BonkHardware::init(ctx.device, ctx.core, &CONFIG);

        #[cfg(feature = "serial_logger")]
        if let Some(port) = hw.dbg_serial {
            logging::serial_logger::init(port);
        }
        logging::init(logging::Level::Info);
        log::info!("{} v{}", NAME, VERSION);

        let token = rtic_monotonics::create_stm32_tim2_monotonic_token!();
        Tim2::start(hw.timer_clock.raw(), token);

        if heartbeat::spawn().is_err() {
            log::error!("heartbeat already running");
        }

        (
            Shared {},
            Local {
                machine: Machine::new(CONFIG),
                board: hw.board,
                heartbeat_led: hw.heartbeat_led,
            },
        )
    }

    /// The bonk's control loop. Every tick blocks on the board's delay, the
    /// heartbeat preempts it.
    #[idle(local = [machine, board])]
    fn idle(ctx: idle::Context) -> ! {
        let machine = ctx.local.machine;
        let board = ctx.local.board;

        machine.start(board);
        loop {
            machine.tick(board);
        }
    }

    #[task(priority = 1, local = [heartbeat_led])]
    async fn heartbeat(ctx: heartbeat::Context) {
        loop {
            ctx.local.heartbeat_led.toggle();
            Tim2::delay(500.millis()).await;
        }
    }
}
