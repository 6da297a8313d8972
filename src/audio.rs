//! Blocking tick delays and beep feedback.

use crate::config::BEEP_TICKS;
use crate::handoff::Handoff;

/// What the foreground does while waiting for the next tick.
pub trait Idle {
    fn idle(&mut self);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Spin;

impl Idle for Spin {
    fn idle(&mut self) {
        core::hint::spin_loop();
    }
}

pub trait Tone {
    fn set_enabled(&mut self, enabled: bool);
}

/// Blocking wait measured in ticks.
///
/// One delay at a time: `wait` borrows the delay mutably and cannot be
/// cancelled once started.
pub struct Delay<'h, I> {
    handoff: &'h Handoff,
    idle: I,
}

impl<'h, I: Idle> Delay<'h, I> {
    pub fn new(handoff: &'h Handoff, idle: I) -> Self {
        Self { handoff, idle }
    }

    /// Returns after at least `ticks` tick periods.
    pub fn wait(&mut self, ticks: u16) {
        self.handoff.arm_delay(ticks);
        while !self.handoff.delay_elapsed() {
            self.idle.idle();
        }
    }
}

/// Audible confirmation of the active mode.
pub trait Feedback {
    fn beep(&mut self, twice: bool);
    fn pause(&mut self, ticks: u16);
}

pub struct Beeper<'h, T, I> {
    tone: T,
    delay: Delay<'h, I>,
}

impl<'h, T: Tone, I: Idle> Beeper<'h, T, I> {
    pub fn new(mut tone: T, delay: Delay<'h, I>) -> Self {
        tone.set_enabled(false);
        Self { tone, delay }
    }

    fn chirp(&mut self) {
        self.tone.set_enabled(true);
        self.delay.wait(BEEP_TICKS);
        self.tone.set_enabled(false);
    }
}

impl<T: Tone, I: Idle> Feedback for Beeper<'_, T, I> {
    fn beep(&mut self, twice: bool) {
        self.chirp();
        if twice {
            self.delay.wait(BEEP_TICKS);
            self.chirp();
        }
    }

    fn pause(&mut self, ticks: u16) {
        self.delay.wait(ticks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::thread;

    // every idle call is one tick
    struct VirtualTicks<'a> {
        handoff: &'a Handoff,
        elapsed: &'a Cell<u32>,
    }

    impl Idle for VirtualTicks<'_> {
        fn idle(&mut self) {
            self.handoff.count_down();
            self.elapsed.set(self.elapsed.get() + 1);
        }
    }

    struct Recorder<'a> {
        elapsed: &'a Cell<u32>,
        log: &'a RefCell<Vec<(u32, bool)>>,
    }

    impl Tone for Recorder<'_> {
        fn set_enabled(&mut self, enabled: bool) {
            self.log.borrow_mut().push((self.elapsed.get(), enabled));
        }
    }

    #[test]
    fn wait_counts_ticks() {
        let handoff = Handoff::new();
        let elapsed = Cell::new(0);
        let mut delay = Delay::new(
            &handoff,
            VirtualTicks {
                handoff: &handoff,
                elapsed: &elapsed,
            },
        );
        delay.wait(600);
        assert_eq!(elapsed.get(), 600);
        delay.wait(0);
        assert_eq!(elapsed.get(), 600);
    }

    #[test]
    fn single_and_double_beep() {
        let handoff = Handoff::new();
        let elapsed = Cell::new(0);
        let log = RefCell::new(Vec::new());
        let delay = Delay::new(
            &handoff,
            VirtualTicks {
                handoff: &handoff,
                elapsed: &elapsed,
            },
        );
        let mut beeper = Beeper::new(
            Recorder {
                elapsed: &elapsed,
                log: &log,
            },
            delay,
        );

        beeper.beep(false);
        assert_eq!(*log.borrow(), [(0, false), (0, true), (200, false)]);

        log.borrow_mut().clear();
        beeper.beep(true);
        assert_eq!(
            *log.borrow(),
            [(200, true), (400, false), (600, true), (800, false)]
        );
    }

    #[test]
    fn spin_until_timer_thread_counts_down() {
        let handoff: &'static Handoff = Box::leak(Box::new(Handoff::new()));
        // ticks until the foreground raises the flag to say it is done
        let timer = thread::spawn(move || {
            while !handoff.is_pending() {
                handoff.count_down();
                thread::yield_now();
            }
        });

        let mut delay = Delay::new(handoff, Spin);
        delay.wait(50);
        delay.wait(50);
        assert!(handoff.delay_elapsed());

        handoff.raise();
        timer.join().unwrap();
    }
}
