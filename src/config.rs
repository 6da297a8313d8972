//! Timing constants, marker format and boot straps.

use embedded_hal::digital::v2::InputPin;
use fugit::{HertzU32, MillisDurationU32};

/// Tick interrupt rate, also the buzzer tone frequency.
pub const TICK_RATE: HertzU32 = HertzU32::from_raw(2_000);
/// Counter clock of the tick timer after prescaling.
pub const TIMER_CLOCK: HertzU32 = HertzU32::from_raw(1_000_000);
/// Timer auto-reload period in counter clocks: 1 MHz / 500 -> 2 kHz.
pub const TICK_PERIOD: u32 = TIMER_CLOCK.raw() / TICK_RATE.raw();

/// Continuous hold required to toggle the mode.
pub const PRESS_THRESHOLD: u16 = ticks(MillisDurationU32::from_ticks(2_000));
/// Length of one beep and of the gap in a double beep.
pub const BEEP_TICKS: u16 = ticks(MillisDurationU32::from_ticks(100));
/// Quiet period before the boot beep.
pub const BOOT_SETTLE_TICKS: u16 = ticks(MillisDurationU32::from_ticks(300));

/// Store address of the marker byte.
pub const MARKER_ADDR: u16 = 0;
/// Marker value meaning "drives swapped"; anything else is normal.
pub const SWAP_MARKER: u8 = 0xA5;
pub const NORMAL_MARKER: u8 = 0x00;

/// Converts a duration to a number of ticks at [`TICK_RATE`].
pub const fn ticks(duration: MillisDurationU32) -> u16 {
    let ticks = duration.ticks() * TICK_RATE.raw() / 1_000;
    assert!(ticks <= u16::MAX as u32, "duration does not fit the tick counter");
    ticks as u16
}

/// Behaviour selected by the jumpers, read once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BootConfig {
    pub beep_on_boot: bool,
    pub save_last_mode: bool,
    pub swap_on_start: bool,
}

impl BootConfig {
    /// Samples the three straps (all with pull-ups).
    ///
    /// CFG1 jumpered to ground enables the boot beep, CFG2 and CFG3 left open
    /// enable saving the last mode and starting swapped respectively.
    /// A pin that fails to read counts as not jumpered.
    pub fn read<C1, C2, C3>(cfg1: &C1, cfg2: &C2, cfg3: &C3) -> Self
    where
        C1: InputPin,
        C2: InputPin,
        C3: InputPin,
    {
        Self {
            beep_on_boot: cfg1.is_low().unwrap_or(false),
            save_last_mode: cfg2.is_high().unwrap_or(true),
            swap_on_start: cfg3.is_high().unwrap_or(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    struct Strap(bool);

    impl InputPin for Strap {
        type Error = Infallible;

        fn is_high(&self) -> Result<bool, Self::Error> {
            Ok(self.0)
        }

        fn is_low(&self) -> Result<bool, Self::Error> {
            Ok(!self.0)
        }
    }

    #[test]
    fn durations_in_ticks() {
        assert_eq!(TICK_PERIOD, 500);
        assert_eq!(PRESS_THRESHOLD, 4000);
        assert_eq!(BEEP_TICKS, 200);
        assert_eq!(BOOT_SETTLE_TICKS, 600);
    }

    #[test]
    fn open_straps() {
        let cfg = BootConfig::read(&Strap(true), &Strap(true), &Strap(true));
        assert_eq!(
            cfg,
            BootConfig {
                beep_on_boot: false,
                save_last_mode: true,
                swap_on_start: true,
            }
        );
    }

    #[test]
    fn jumpered_straps() {
        let cfg = BootConfig::read(&Strap(false), &Strap(false), &Strap(false));
        assert_eq!(
            cfg,
            BootConfig {
                beep_on_boot: true,
                save_last_mode: false,
                swap_on_start: false,
            }
        );
    }
}
