//! The routing mode and the transaction that toggles it.

use crate::audio::Feedback;
use crate::config::{BootConfig, BOOT_SETTLE_TICKS, MARKER_ADDR};
use crate::handoff::Handoff;
use crate::routing::Route;
use crate::store::{marker, ByteStore};

/// Owns the mode and everything a toggle touches. Lives in the foreground.
pub struct ModeController<S, R, F> {
    config: BootConfig,
    drives_swapped: bool,
    store: S,
    route: R,
    feedback: F,
}

impl<S, R, F> ModeController<S, R, F>
where
    S: ByteStore,
    R: Route,
    F: Feedback,
{
    /// Restores the initial mode and routes it. Must run before the tick
    /// interrupt is enabled.
    pub fn boot(config: BootConfig, mut store: S, mut route: R, feedback: F) -> Self {
        let drives_swapped = if config.save_last_mode {
            marker::decode(store.read_byte(MARKER_ADDR))
        } else {
            config.swap_on_start
        };
        route.route(drives_swapped);
        info!("boot: {}, drives swapped: {}", config, drives_swapped);

        Self {
            config,
            drives_swapped,
            store,
            route,
            feedback,
        }
    }

    pub fn boot_feedback(&mut self) {
        if self.config.beep_on_boot {
            self.feedback.pause(BOOT_SETTLE_TICKS);
            self.feedback.beep(self.drives_swapped);
        }
    }

    /// Routing and feedback happen even if saving failed; the save error is
    /// reported afterwards.
    pub fn toggle(&mut self) -> Result<bool, S::Error> {
        self.drives_swapped = !self.drives_swapped;
        let saved = if self.config.save_last_mode {
            self.store
                .write_byte(MARKER_ADDR, marker::encode(self.drives_swapped))
        } else {
            Ok(())
        };

        self.route.route(self.drives_swapped);
        self.feedback.beep(self.drives_swapped);
        info!("drives swapped: {}", self.drives_swapped);

        saved.map(|()| self.drives_swapped)
    }

    /// The event is cleared before the toggle runs, so a press completed
    /// meanwhile is seen on the next poll.
    pub fn poll(&mut self, handoff: &Handoff) -> Option<Result<bool, S::Error>> {
        handoff.take_pending().then(|| self.toggle())
    }

    pub fn drives_swapped(&self) -> bool {
        self.drives_swapped
    }
}
