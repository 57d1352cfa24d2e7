//! # Bar
//!
//! One physical stock piece being filled with parts. Each placed part costs
//! its own length plus one kerf width, so for every bar:
//!
//! ```text
//! length = Σ part.length + kerf × count(parts) + waste.material
//! ```
//!
//! ## Example
//!
//! ```rust
//! use cut_core::bar::Bar;
//! use cut_core::parts::Part;
//!
//! let mut bar = Bar::new(10.0, None, 1.0);
//! bar.place(Part::new(4.0)).unwrap();
//! bar.place(Part::new(4.0)).unwrap();
//!
//! let waste = bar.waste();
//! assert_eq!(waste.material, 0.0);
//! assert_eq!(waste.kerf, 2.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{PlanError, PlanResult};
use crate::parts::{sort_descending, Part};

/// Waste left on a finished bar.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Waste {
    /// Offcut left on the bar after all placements
    pub material: f64,

    /// Material turned to sawdust, one kerf per placed part
    pub kerf: f64,
}

/// A stock piece with the parts assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Stock length of this piece
    pub length: f64,

    /// Label of the stock definition it was granted from
    pub label: Option<String>,

    /// Saw kerf charged per placed part
    pub kerf: f64,

    /// Placed parts, longest first
    parts: Vec<Part>,

    /// Cached remaining capacity, refreshed on every placement
    remaining: f64,
}

impl Bar {
    /// Create an empty bar.
    pub fn new(length: f64, label: Option<String>, kerf: f64) -> Self {
        Bar {
            length,
            label,
            kerf,
            parts: Vec::new(),
            remaining: length,
        }
    }

    /// Parts placed so far, longest first.
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Length still available for another part.
    ///
    /// An empty bar reports its full length. Otherwise every placed part
    /// consumes its length plus one kerf.
    pub fn remaining_capacity(&self) -> f64 {
        if self.parts.is_empty() {
            return self.length;
        }
        let used: f64 = self.parts.iter().map(|p| p.length + self.kerf).sum();
        self.length - used
    }

    /// Whether `part` fits in the remaining capacity.
    pub fn capacity(&self, part: &Part) -> bool {
        part.length <= self.remaining
    }

    /// Place a part on the bar.
    ///
    /// # Errors
    ///
    /// * `PlanError::CapacityExceeded` - the part is longer than the
    ///   remaining capacity
    pub fn place(&mut self, part: Part) -> PlanResult<()> {
        if !self.capacity(&part) {
            return Err(PlanError::CapacityExceeded {
                part_length: part.length,
                remaining: self.remaining,
            });
        }

        self.parts.push(part);
        sort_descending(&mut self.parts);
        self.remaining = self.remaining_capacity();
        Ok(())
    }

    /// Material and kerf waste for the bar as it currently stands.
    pub fn waste(&self) -> Waste {
        Waste {
            material: self.remaining_capacity(),
            kerf: self.kerf * self.parts.len() as f64,
        }
    }

    /// Total length of the placed parts, excluding kerf.
    pub fn used_length(&self) -> f64 {
        self.parts.iter().map(|p| p.length).sum()
    }
}
