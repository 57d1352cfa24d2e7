//! # Stock Catalog and Ledger
//!
//! A [`StockDefinition`] describes one kind of stock bar the shop has on
//! hand, with either an unlimited or a finite supply. The [`StockLedger`]
//! owns the supply counters for a single planning run and is the only place
//! where they change.
//!
//! ## Supply semantics
//!
//! | `quantity` in input | Supply |
//! |---------------------|--------|
//! | absent / `null` / 0 | `Unlimited` |
//! | n > 0               | `Finite(n)` |
//!
//! ## Example
//!
//! ```rust
//! use cut_core::stock::{StockLedger, StockRequest};
//! use cut_core::parts::Part;
//!
//! let catalog = vec![StockRequest::finite(96.0, 1).with_label("2x4")];
//! let mut ledger = StockLedger::new(&catalog, 0.125);
//!
//! let bar = ledger.pull(&Part::new(53.0)).unwrap();
//! assert_eq!(bar.length, 96.0);
//! assert!(ledger.pull(&Part::new(53.0)).is_err());
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bar::Bar;
use crate::errors::{PlanError, PlanResult};
use crate::parts::Part;

/// How many bars of a definition remain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "count")]
pub enum Supply {
    /// Never runs out
    Unlimited,
    /// Exactly this many bars remain
    Finite(u32),
}

/// A stock definition inside a planning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockDefinition {
    /// Bar length
    pub length: f64,

    /// Optional label (e.g., "2x4", "1in EMT")
    pub label: Option<String>,

    /// Remaining supply; only ever decreases
    pub supply: Supply,
}

impl StockDefinition {
    /// Whether a new bar can be granted from this definition.
    pub fn has_supply(&self) -> bool {
        match self.supply {
            Supply::Unlimited => true,
            Supply::Finite(n) => n > 0,
        }
    }

    /// Consume one bar of supply.
    ///
    /// Callers must check [`has_supply`](Self::has_supply) first.
    ///
    /// # Errors
    ///
    /// * `PlanError::Exhausted` - the finite supply is already zero
    pub fn grant(&mut self) -> PlanResult<()> {
        match self.supply {
            Supply::Unlimited => Ok(()),
            Supply::Finite(0) => Err(PlanError::Exhausted {
                length: self.length,
            }),
            Supply::Finite(n) => {
                self.supply = Supply::Finite(n - 1);
                Ok(())
            }
        }
    }
}

/// A stock entry as it appears in the input contract.
///
/// ## JSON Example
///
/// ```json
/// { "length": 96.0, "label": "2x4", "quantity": null }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRequest {
    /// Bar length
    pub length: f64,

    /// Optional label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// Bars on hand. Absent, `null` or zero means unlimited.
    #[serde(default)]
    pub quantity: Option<u32>,
}

impl StockRequest {
    /// Stock with unlimited supply.
    pub fn unlimited(length: f64) -> Self {
        StockRequest {
            length,
            label: None,
            quantity: None,
        }
    }

    /// Stock with `quantity` bars on hand.
    pub fn finite(length: f64, quantity: u32) -> Self {
        StockRequest {
            length,
            label: None,
            quantity: Some(quantity),
        }
    }

    /// Attach a label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Supply implied by the requested quantity.
    pub fn supply(&self) -> Supply {
        match self.quantity {
            None | Some(0) => Supply::Unlimited,
            Some(n) => Supply::Finite(n),
        }
    }

    /// Convert to a fresh definition with a full supply counter.
    pub fn to_definition(&self) -> StockDefinition {
        StockDefinition {
            length: self.length,
            label: self.label.clone(),
            supply: self.supply(),
        }
    }

    /// Validate the stock length.
    pub fn validate(&self, index: usize) -> PlanResult<()> {
        if !self.length.is_finite() || self.length <= 0.0 {
            return Err(PlanError::invalid_input(
                format!("stock[{}].length", index),
                self.length.to_string(),
                "Stock length must be a positive number",
            ));
        }
        Ok(())
    }
}

/// Supply counters for one planning run.
///
/// Each run builds its own ledger from the catalog, so concurrent runs never
/// share counters.
#[derive(Debug, Clone)]
pub struct StockLedger {
    definitions: Vec<StockDefinition>,
    kerf: f64,
}

impl StockLedger {
    /// Build a ledger from the catalog, in catalog order.
    pub fn new(catalog: &[StockRequest], kerf: f64) -> Self {
        StockLedger {
            definitions: catalog.iter().map(StockRequest::to_definition).collect(),
            kerf,
        }
    }

    /// Current state of every definition, in catalog order.
    pub fn definitions(&self) -> &[StockDefinition] {
        &self.definitions
    }

    /// Grant a new bar from the definition at `index`.
    ///
    /// This is the only place supply counters are decremented.
    ///
    /// # Errors
    ///
    /// * `PlanError::Exhausted` - the definition has no supply left
    pub fn grant(&mut self, index: usize) -> PlanResult<Bar> {
        let definition = self.definitions.get_mut(index).ok_or_else(|| {
            PlanError::invalid_input("stock", index.to_string(), "No stock definition at this index")
        })?;
        definition.grant()?;
        debug!(
            length = definition.length,
            label = ?definition.label,
            supply = ?definition.supply,
            "granted new bar"
        );
        Ok(Bar::new(definition.length, definition.label.clone(), self.kerf))
    }

    /// Open a new bar for `part`.
    ///
    /// Scans definitions in catalog order and grants from the first one that
    /// is long enough and still has supply. Exactly one definition is
    /// decremented per call.
    ///
    /// # Errors
    ///
    /// * `PlanError::OutOfStock` - no definition is long enough with supply left
    pub fn pull(&mut self, part: &Part) -> PlanResult<Bar> {
        let index = self
            .definitions
            .iter()
            .position(|d| d.length >= part.length && d.has_supply())
            .ok_or_else(|| PlanError::out_of_stock(part.length, part.label.clone()))?;
        self.grant(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supply_from_quantity() {
        assert_eq!(StockRequest::unlimited(96.0).supply(), Supply::Unlimited);
        assert_eq!(StockRequest::finite(96.0, 0).supply(), Supply::Unlimited);
        assert_eq!(StockRequest::finite(96.0, 3).supply(), Supply::Finite(3));
    }

    #[test]
    fn test_null_quantity_deserializes_unlimited() {
        let json = r#"{ "length": 96, "label": "2x4", "quantity": null }"#;
        let stock: StockRequest = serde_json::from_str(json).unwrap();
        assert_eq!(stock.supply(), Supply::Unlimited);

        let json = r#"{ "length": 96 }"#;
        let stock: StockRequest = serde_json::from_str(json).unwrap();
        assert_eq!(stock.supply(), Supply::Unlimited);
    }

    #[test]
    fn test_definition_grant() {
        let mut def = StockRequest::finite(96.0, 1).to_definition();
        assert!(def.has_supply());
        def.grant().unwrap();
        assert!(!def.has_supply());
        assert_eq!(def.grant(), Err(PlanError::Exhausted { length: 96.0 }));
        assert_eq!(def.supply, Supply::Finite(0));
    }

    #[test]
    fn test_unlimited_never_blocks() {
        let mut def = StockRequest::unlimited(96.0).to_definition();
        for _ in 0..1000 {
            def.grant().unwrap();
        }
        assert!(def.has_supply());
    }

    #[test]
    fn test_pull_skips_short_and_empty() {
        let catalog = vec![
            StockRequest::finite(48.0, 5),
            StockRequest::finite(96.0, 1),
            StockRequest::unlimited(144.0),
        ];
        let mut ledger = StockLedger::new(&catalog, 0.0);

        // Too long for 48, takes the single 96
        assert_eq!(ledger.pull(&Part::new(60.0)).unwrap().length, 96.0);
        // 96 is now empty, falls through to 144
        assert_eq!(ledger.pull(&Part::new(60.0)).unwrap().length, 144.0);
        // Short part still prefers the first catalog entry
        assert_eq!(ledger.pull(&Part::new(10.0)).unwrap().length, 48.0);
    }

    #[test]
    fn test_pull_decrements_only_one_definition() {
        let catalog = vec![
            StockRequest::finite(96.0, 2),
            StockRequest::finite(120.0, 2),
        ];
        let mut ledger = StockLedger::new(&catalog, 0.0);
        ledger.pull(&Part::new(50.0)).unwrap();

        let supplies: Vec<Supply> = ledger.definitions().iter().map(|d| d.supply).collect();
        assert_eq!(supplies, vec![Supply::Finite(1), Supply::Finite(2)]);
    }

    #[test]
    fn test_pull_out_of_stock() {
        let catalog = vec![StockRequest::finite(96.0, 1)];
        let mut ledger = StockLedger::new(&catalog, 0.0);
        ledger.pull(&Part::new(50.0)).unwrap();
        let err = ledger.pull(&Part::labeled(50.0, "Rail")).unwrap_err();
        assert_eq!(err, PlanError::out_of_stock(50.0, Some("Rail".to_string())));
    }

    #[test]
    fn test_granted_bar_carries_kerf_and_label() {
        let catalog = vec![StockRequest::unlimited(96.0).with_label("2x4")];
        let mut ledger = StockLedger::new(&catalog, 0.125);
        let bar = ledger.grant(0).unwrap();
        assert_eq!(bar.kerf, 0.125);
        assert_eq!(bar.label.as_deref(), Some("2x4"));
        assert!(bar.parts().is_empty());
    }
}
