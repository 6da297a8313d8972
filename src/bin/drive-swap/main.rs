// $ cargo rb drive-swap
#![no_main]
#![no_std]

use drive_swap::handoff::Handoff;

/// The only state crossing between `tick` and `idle`.
static HANDOFF: Handoff = Handoff::new();

#[rtic::app(device = stm32f4xx_hal::pac)]
mod app {
    use super::HANDOFF;
    use drive_swap::{
        audio::{Beeper, Delay},
        board::{self, Buzzer, FlashStore, TickTimer, Wfi},
        config::{BootConfig, PRESS_THRESHOLD},
        mode::ModeController,
        routing::RoutingPins,
        tick::Ticker,
    };
    use stm32f4xx_hal::{
        gpio::{ErasedPin, Input, Output, PushPull},
        prelude::*,
    };
    const FREQ: u32 = 48_000_000;

    type SelectPin = ErasedPin<Output<PushPull>>;
    type Controller = ModeController<
        FlashStore,
        RoutingPins<SelectPin, SelectPin, SelectPin>,
        Beeper<'static, Buzzer, Wfi>,
    >;

    #[shared]
    struct Shared {}

    #[local]
    struct Local {
        timer: TickTimer,
        btn: ErasedPin<Input>,
        ticker: Ticker,
        controller: Controller,
    }

    #[init]
    fn init(ctx: init::Context) -> (Shared, Local, init::Monotonics) {
        let rcc = ctx.device.RCC.constrain();
        let clocks = rcc.cfgr.sysclk(FREQ.Hz()).freeze();

        let gpioa = ctx.device.GPIOA.split();
        let gpiob = ctx.device.GPIOB.split();
        let gpioc = ctx.device.GPIOC.split();

        // straps and button are pulled up, jumpers short to ground
        let cfg1 = gpiob.pb12.into_pull_up_input();
        let cfg2 = gpiob.pb13.into_pull_up_input();
        let cfg3 = gpiob.pb14.into_pull_up_input();
        let btn = gpioc.pc13.into_pull_up_input().erase();

        let routing = RoutingPins::new(
            gpiob.pb0.into_push_pull_output().erase(),
            gpiob.pb1.into_push_pull_output().erase(),
            gpioa.pa5.into_push_pull_output().erase(),
        );

        let (timer, buzzer) =
            board::tick_timer(ctx.device.TIM2, gpioa.pa0.into_alternate(), &clocks);
        let beeper = Beeper::new(buzzer, Delay::new(&HANDOFF, Wfi));

        // Interrupts are still disabled: nothing ticks until the mode is
        // restored and routed.
        let config = BootConfig::read(&cfg1, &cfg2, &cfg3);
        let store = FlashStore::new(ctx.device.FLASH);
        let controller = ModeController::boot(config, store, routing, beeper);

        (
            Shared {},
            Local {
                timer,
                btn,
                ticker: Ticker::new(PRESS_THRESHOLD),
                controller,
            },
            init::Monotonics(),
        )
    }

    #[idle(local = [controller])]
    fn idle(ctx: idle::Context) -> ! {
        let controller = ctx.local.controller;
        controller.boot_feedback();
        loop {
            match controller.poll(&HANDOFF) {
                Some(Ok(swapped)) => defmt::debug!("switched, swapped = {}", swapped),
                Some(Err(e)) => defmt::error!("mode not saved: {}", e),
                None => cortex_m::asm::wfi(),
            }
        }
    }

    #[task(binds = TIM2, local = [timer, btn, ticker])]
    fn tick(ctx: tick::Context) {
        let tick::LocalResources { timer, btn, ticker } = ctx.local;
        ticker.on_tick(&HANDOFF, btn.is_low());
        timer.clear_interrupt();
    }
}
