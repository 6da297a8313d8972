//! Long-press mode switch for a pair of drive-select lines.
//!
//! A 2 kHz timer interrupt samples the button and counts down delays; the
//! foreground loop picks up the long-press event and toggles the routing
//! mode, optionally persisting it and beeping to confirm.
#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod audio;
pub mod config;
pub mod handoff;
pub mod mode;
pub mod press;
pub mod routing;
pub mod store;
pub mod tick;

#[cfg(target_os = "none")]
pub mod board;

#[cfg(all(target_os = "none", feature = "defmt"))]
use defmt_rtt as _; // global logger

#[cfg(all(target_os = "none", feature = "defmt"))]
use panic_probe as _;

// same panicking *behavior* as `panic-probe` but doesn't print a panic message
// this prevents the panic message being printed *twice* when `defmt::panic` is invoked
#[cfg(all(target_os = "none", feature = "defmt"))]
#[defmt::panic_handler]
fn panic() -> ! {
    cortex_m::asm::udf()
}
