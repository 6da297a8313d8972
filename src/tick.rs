//! Work done on every timer tick, in interrupt context.

use crate::handoff::Handoff;
use crate::press::LongPress;

/// Everything the tick interrupt owns besides the hardware.
pub struct Ticker {
    press: LongPress,
}

impl Ticker {
    pub const fn new(press_threshold: u16) -> Self {
        Self {
            press: LongPress::new(press_threshold),
        }
    }

    /// Counts the delay down, then feeds the button level to the long-press
    /// detector. Never blocks. The caller acknowledges the interrupt after.
    pub fn on_tick(&mut self, handoff: &Handoff, pressed: bool) {
        handoff.count_down();
        let before = self.press.state();
        if self.press.tick(pressed) {
            handoff.raise();
        }
        let after = self.press.state();
        if after != before {
            trace!("button {} -> {}", before, after);
        }
    }

    #[cfg(test)]
    fn press_state(&self) -> crate::press::PressState {
        self.press.state()
    }
}
