//! STM32F411 drivers: the TIM2 tick and tone, the flash marker and sleep.
//!
//! TIM2 counts at 1 MHz and overflows every 500 counts. The update interrupt
//! is the 2 kHz tick; channel 1 compares at half period and drives the
//! buzzer on PA0 (AF1) with a 2 kHz square wave while enabled.

use stm32f4xx_hal::{
    flash::{self, FlashExt},
    gpio::{gpioa::PA0, Alternate},
    pac::{FLASH, RCC, TIM2},
    rcc::Clocks,
};

use crate::audio::{Idle, Tone};
use crate::config::{TICK_PERIOD, TIMER_CLOCK};
use crate::store::{marker, ByteStore};

/// Owned by the tick interrupt.
pub struct TickTimer {
    tim: TIM2,
}

impl TickTimer {
    /// Acknowledges the update interrupt. Last thing the tick handler does.
    pub fn clear_interrupt(&mut self) {
        self.tim.sr.modify(|_, w| w.uif().clear_bit());
    }
}

/// Owned by the foreground.
pub struct Buzzer {
    _pin: PA0<Alternate<1>>,
}

impl Tone for Buzzer {
    fn set_enabled(&mut self, enabled: bool) {
        // SAFETY: the foreground only touches CCER, the interrupt only SR.
        let tim = unsafe { &*TIM2::ptr() };
        tim.ccer.modify(|_, w| w.cc1e().bit(enabled));
    }
}

/// Starts TIM2 with the update interrupt enabled and the tone off.
///
/// The interrupt stays masked in the NVIC until RTIC leaves `init`.
pub fn tick_timer(tim: TIM2, pin: PA0<Alternate<1>>, clocks: &Clocks) -> (TickTimer, Buzzer) {
    let rcc = unsafe { &(*RCC::ptr()) };
    rcc.apb1enr.modify(|_, w| w.tim2en().set_bit());
    rcc.apb1rstr.modify(|_, w| w.tim2rst().set_bit());
    rcc.apb1rstr.modify(|_, w| w.tim2rst().clear_bit());

    // APB1 runs undivided at sysclk, so the timer clock equals hclk
    let psc = clocks.hclk().raw() / TIMER_CLOCK.raw() - 1;
    tim.psc.write(|w| w.psc().bits(psc as u16));
    tim.arr.write(|w| unsafe { w.bits(TICK_PERIOD - 1) });
    tim.ccr1.write(|w| unsafe { w.bits(TICK_PERIOD / 2) });
    tim.ccmr1_output()
        .modify(|_, w| unsafe { w.oc1m().bits(0b110).oc1pe().set_bit() });
    tim.ccer.modify(|_, w| w.cc1e().clear_bit());
    tim.egr.write(|w| w.ug().set_bit());
    tim.sr.modify(|_, w| w.uif().clear_bit());
    tim.dier.modify(|_, w| w.uie().set_bit());
    tim.cr1.modify(|_, w| w.arpe().set_bit().cen().set_bit());

    (TickTimer { tim }, Buzzer { _pin: pin })
}

/// Sleep until the next interrupt.
#[derive(Debug, Default, Clone, Copy)]
pub struct Wfi;

impl Idle for Wfi {
    fn idle(&mut self) {
        cortex_m::asm::wfi();
    }
}

/// Flash sector reserved for the marker by `memory.x`.
const MARKER_SECTOR: u8 = 7;
const MARKER_OFFSET: usize = 0x6_0000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    Erase,
    Program,
}

/// Marker storage in flash sector 7 (STM32F411xE only).
///
/// The sector is only erased when the new byte sets bits the stored one has
/// cleared (0x00 -> 0xA5); 0xFF -> 0xA5 -> 0x00 programs in place.
///
/// Flash operations run to completion before returning and stall the core,
/// ticks included, for the length of the sector erase.
pub struct FlashStore {
    flash: FLASH,
}

impl FlashStore {
    pub fn new(flash: FLASH) -> Self {
        Self { flash }
    }
}

impl ByteStore for FlashStore {
    type Error = FlashError;

    fn read_byte(&mut self, addr: u16) -> u8 {
        self.flash.read()[MARKER_OFFSET + usize::from(addr)]
    }

    fn write_byte(&mut self, addr: u16, value: u8) -> Result<(), FlashError> {
        let stored = self.read_byte(addr);
        if stored == value {
            return Ok(());
        }
        let mut unlocked = self.flash.unlocked();
        if marker::needs_erase(stored, value) {
            unlocked.erase(MARKER_SECTOR).map_err(|e: flash::Error| {
                debug!("sector erase: {}", defmt::Debug2Format(&e));
                FlashError::Erase
            })?;
        }
        unlocked
            .program(MARKER_OFFSET + usize::from(addr), [value].iter())
            .map_err(|e: flash::Error| {
                debug!("program: {}", defmt::Debug2Format(&e));
                FlashError::Program
            })
    }
}
