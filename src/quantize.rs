use crate::{Error, Result};

pub const DEFAULT_APPROXIMATION_MULTIPLIER: u32 = 1_000;

/// Upper bound for a single arc cost, leaving headroom for summing ~1M arcs in `i64`.
pub const MAX_ARC_COST: i64 = i64::MAX >> 20;

/// Turns real distances into the integer arc costs the solvers work with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CostQuantizer {
    multiplier: f64,
}

impl CostQuantizer {
    pub fn new(multiplier: u32) -> Result<Self> {
        if multiplier == 0 {
            return Err(Error::invalid_argument(
                "approximation_multiplier must be a positive integer.",
            ));
        }
        Ok(Self {
            multiplier: f64::from(multiplier),
        })
    }

    /// `floor(distance * multiplier)`, saturated to `[0, MAX_ARC_COST]`.
    pub fn quantize(&self, distance: f64) -> i64 {
        let scaled = (distance * self.multiplier).floor();
        if scaled >= MAX_ARC_COST as f64 {
            MAX_ARC_COST
        } else if scaled > 0.0 {
            scaled as i64
        } else {
            0
        }
    }
}

impl Default for CostQuantizer {
    fn default() -> Self {
        Self {
            multiplier: f64::from(DEFAULT_APPROXIMATION_MULTIPLIER),
        }
    }
}
