//! State shared between the tick interrupt and the foreground loop.
//!
//! Only two values cross the boundary: the delay countdown and the pending
//! switch event. Both are single-word atomics, so neither side ever needs a
//! critical section.
//!
//! Ownership:
//! - the interrupt counts the delay down and raises the event,
//! - the foreground arms the delay (only while none is outstanding) and
//!   takes the event.

use core::sync::atomic::{AtomicBool, AtomicU16, Ordering};

pub struct Handoff {
    delay: AtomicU16,
    pending: AtomicBool,
}

impl Handoff {
    pub const fn new() -> Self {
        Self {
            delay: AtomicU16::new(0),
            pending: AtomicBool::new(false),
        }
    }

    /// Interrupt side: one tick elapsed.
    ///
    /// Plain load + store is enough since the foreground never writes the
    /// counter while it is non-zero.
    pub fn count_down(&self) {
        let remaining = self.delay.load(Ordering::Relaxed);
        if remaining > 0 {
            self.delay.store(remaining - 1, Ordering::Release);
        }
    }

    /// Interrupt side: a long press was detected.
    ///
    /// Raising an already pending event is a no-op: the slot holds one event.
    pub fn raise(&self) {
        self.pending.store(true, Ordering::Release);
    }

    /// Foreground side: start a countdown of `ticks`.
    pub fn arm_delay(&self, ticks: u16) {
        debug_assert!(self.delay_elapsed(), "delay already outstanding");
        self.delay.store(ticks, Ordering::Release);
    }

    /// Foreground side: has the armed countdown reached zero?
    pub fn delay_elapsed(&self) -> bool {
        self.delay.load(Ordering::Acquire) == 0
    }

    /// Foreground side: read and clear the pending event in one step, so an
    /// event raised while it is being handled is kept for the next poll.
    pub fn take_pending(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    #[cfg(test)]
    pub(crate) fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }
}

impl Default for Handoff {
    fn default() -> Self {
        Self::new()
    }
}
