// $ cargo test --test straps
#![no_std]
#![no_main]

use drive_swap::config::BootConfig; // + global logger + panic handler
use stm32f4xx_hal::{
    gpio::{
        gpiob::{PB12, PB13, PB14},
        gpioc::PC13,
        Input,
    },
    pac,
    prelude::*,
};

struct State {
    cfg1: PB12<Input>,
    cfg2: PB13<Input>,
    cfg3: PB14<Input>,
    btn: PC13<Input>,
}

#[defmt_test::tests]
mod tests {
    use super::*;
    use defmt::{assert, assert_eq};

    #[init]
    fn init() -> State {
        let dp = pac::Peripherals::take().unwrap();
        let gpiob = dp.GPIOB.split();
        let gpioc = dp.GPIOC.split();
        State {
            cfg1: gpiob.pb12.into_pull_up_input(),
            cfg2: gpiob.pb13.into_pull_up_input(),
            cfg3: gpiob.pb14.into_pull_up_input(),
            btn: gpioc.pc13.into_pull_up_input(),
        }
    }

    // Leave all three straps open
    #[test]
    fn open_straps(state: &mut State) {
        let cfg = BootConfig::read(&state.cfg1, &state.cfg2, &state.cfg3);
        assert_eq!(
            cfg,
            BootConfig {
                beep_on_boot: false,
                save_last_mode: true,
                swap_on_start: true,
            }
        );
    }

    // Don't touch the button
    #[test]
    fn button_released(state: &mut State) {
        assert!(state.btn.is_high());
    }
}
