//! # Cutting Operations
//!
//! A [`CuttingOperation`] is one bar plus the number of times its exact
//! pattern is repeated. Operations are created with `reps = 1` during
//! placement; identical patterns are merged afterwards by comparing
//! [`Signature`]s.

use serde::{Deserialize, Serialize};

use crate::bar::{Bar, Waste};
use crate::errors::PlanResult;
use crate::parts::Part;

/// Canonical key for a cutting pattern.
///
/// Lengths are compared by their exact bit pattern. Parts on a bar are always
/// stored longest first, so equal signatures mean the same multiset of part
/// lengths in the same order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    stock_length: u64,
    waste_material: u64,
    waste_kerf: u64,
    part_lengths: Vec<u64>,
}

/// One row of the finished plan.
///
/// ## JSON Example
///
/// ```json
/// {
///   "reps": 2,
///   "stock_length": 96.0,
///   "parts": [
///     { "length": 56.75, "label": "Post stretcher" },
///     { "length": 20.0, "label": "Floor support" }
///   ],
///   "waste": { "material": 19.0, "kerf": 0.25 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutReport {
    /// How many bars are cut with this pattern
    pub reps: u32,

    /// Length of each bar
    pub stock_length: f64,

    /// Parts cut from each bar, longest first
    pub parts: Vec<Part>,

    /// Waste per bar
    pub waste: Waste,
}

/// A bar and its repetition count.
#[derive(Debug, Clone, PartialEq)]
pub struct CuttingOperation {
    bar: Bar,
    reps: u32,
}

impl CuttingOperation {
    /// Wrap a freshly granted bar.
    pub fn new(bar: Bar) -> Self {
        CuttingOperation { bar, reps: 1 }
    }

    /// The underlying bar.
    pub fn bar(&self) -> &Bar {
        &self.bar
    }

    /// How many bars share this pattern.
    pub fn reps(&self) -> u32 {
        self.reps
    }

    /// Count one more bar cut with this same pattern.
    pub(crate) fn add_rep(&mut self) {
        self.reps += 1;
    }

    /// Whether the part still fits on the bar.
    pub fn fits(&self, part: &Part) -> bool {
        self.bar.capacity(part)
    }

    /// Place a part on the bar. Fails exactly as [`Bar::place`] does.
    pub fn add_part(&mut self, part: Part) -> PlanResult<()> {
        self.bar.place(part)
    }

    /// Key that is equal for two operations exactly when their reports would
    /// be identical apart from `reps`.
    pub fn signature(&self) -> Signature {
        let waste = self.bar.waste();
        Signature {
            stock_length: self.bar.length.to_bits(),
            waste_material: waste.material.to_bits(),
            waste_kerf: waste.kerf.to_bits(),
            part_lengths: self.bar.parts().iter().map(|p| p.length.to_bits()).collect(),
        }
    }

    /// Snapshot of the operation for the output contract.
    pub fn report(&self) -> CutReport {
        CutReport {
            reps: self.reps,
            stock_length: self.bar.length,
            parts: self.bar.parts().to_vec(),
            waste: self.bar.waste(),
        }
    }
}
