//! Long-press detection by tick counting.
//!
//! The counter is reloaded on every tick the button reads released and
//! counts down while it reads pressed. Reaching zero fires once and then
//! stays latched until the next release, however long the hold lasts.
//! A release lasting less than one tick between samples goes unnoticed.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PressState {
    Released,
    Holding,
    /// Fired for the current hold, waiting for release.
    Latched,
}

pub struct LongPress {
    threshold: u16,
    remaining: u16,
}

impl LongPress {
    pub const fn new(threshold: u16) -> Self {
        assert!(threshold > 0);
        Self {
            threshold,
            remaining: threshold,
        }
    }

    /// Advance by one tick. Returns `true` on the tick that completes the
    /// long press.
    pub fn tick(&mut self, pressed: bool) -> bool {
        if !pressed {
            self.remaining = self.threshold;
            return false;
        }
        match self.remaining {
            0 => false,
            1 => {
                self.remaining = 0;
                true
            }
            _ => {
                self.remaining -= 1;
                false
            }
        }
    }

    pub fn state(&self) -> PressState {
        match self.remaining {
            0 => PressState::Latched,
            r if r == self.threshold => PressState::Released,
            _ => PressState::Holding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hold(detector: &mut LongPress, ticks: u32) -> u32 {
        (0..ticks).filter(|_| detector.tick(true)).count() as u32
    }

    #[test]
    fn fires_on_threshold_tick() {
        let mut detector = LongPress::new(4000);
        assert_eq!(hold(&mut detector, 3999), 0);
        assert_eq!(detector.state(), PressState::Holding);
        assert!(detector.tick(true));
        assert_eq!(detector.state(), PressState::Latched);
    }

    #[test]
    fn one_shot_per_hold() {
        let mut detector = LongPress::new(10);
        assert_eq!(hold(&mut detector, 1_000), 1);
        detector.tick(false);
        assert_eq!(detector.state(), PressState::Released);
        assert_eq!(hold(&mut detector, 10), 1);
    }

    #[test]
    fn short_press_never_fires() {
        let mut detector = LongPress::new(4000);
        assert_eq!(hold(&mut detector, 3999), 0);
        assert!(!detector.tick(false));
        assert_eq!(detector.state(), PressState::Released);
    }

    #[test]
    fn presses_do_not_accumulate() {
        let mut detector = LongPress::new(100);
        for _ in 0..10 {
            assert_eq!(hold(&mut detector, 60), 0);
            detector.tick(false);
        }
        assert_eq!(hold(&mut detector, 99), 0);
        assert_eq!(hold(&mut detector, 1), 1);
    }

    #[test]
    fn threshold_of_one() {
        let mut detector = LongPress::new(1);
        assert!(detector.tick(true));
        assert!(!detector.tick(true));
        assert!(!detector.tick(false));
        assert!(detector.tick(true));
    }
}
