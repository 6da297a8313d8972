//! Mode to select-line mapping.

use embedded_hal::digital::v2::OutputPin;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pattern {
    pub sel0: bool,
    pub sel1: bool,
    pub indicator: bool,
}

impl Pattern {
    pub const NORMAL: Self = Self {
        sel0: true,
        sel1: false,
        indicator: false,
    };
    pub const SWAPPED: Self = Self {
        sel0: false,
        sel1: true,
        indicator: true,
    };

    pub const fn for_mode(swapped: bool) -> Self {
        if swapped {
            Self::SWAPPED
        } else {
            Self::NORMAL
        }
    }
}

pub trait Route {
    fn route(&mut self, swapped: bool);
}

pub struct RoutingPins<S0, S1, M> {
    sel0: S0,
    sel1: S1,
    indicator: M,
}

impl<S0, S1, M> RoutingPins<S0, S1, M>
where
    S0: OutputPin,
    S1: OutputPin,
    M: OutputPin,
{
    /// Takes the pins and drives the power-on levels: both selects high,
    /// indicator off, until a mode is routed.
    pub fn new(mut sel0: S0, mut sel1: S1, mut indicator: M) -> Self {
        sel0.set_high().ok();
        sel1.set_high().ok();
        indicator.set_low().ok();
        Self {
            sel0,
            sel1,
            indicator,
        }
    }

    #[cfg(test)]
    fn release(self) -> (S0, S1, M) {
        (self.sel0, self.sel1, self.indicator)
    }
}

fn drive<P: OutputPin>(pin: &mut P, high: bool) {
    if high {
        pin.set_high().ok();
    } else {
        pin.set_low().ok();
    }
}

impl<S0, S1, M> Route for RoutingPins<S0, S1, M>
where
    S0: OutputPin,
    S1: OutputPin,
    M: OutputPin,
{
    fn route(&mut self, swapped: bool) {
        let pattern = Pattern::for_mode(swapped);
        drive(&mut self.sel0, pattern.sel0);
        drive(&mut self.sel1, pattern.sel1);
        drive(&mut self.indicator, pattern.indicator);
        trace!("routing {}", pattern);
    }
}
