//! # Cut-List Planner
//!
//! Assigns every requested part to a stock bar using a two-tier first-fit
//! heuristic, then merges bars with identical cutting patterns.
//!
//! ## Algorithm
//!
//! 1. Expand part quantities and sort longest first (stable, so equal
//!    lengths keep their input order).
//! 2. For each part, place it on the first open bar with room for it, in the
//!    order the bars were opened.
//! 3. If no open bar fits, open a new bar from the first catalog entry that
//!    is long enough and has supply. If none exists the whole run fails with
//!    `OutOfStock`; no partial plan is returned.
//! 4. Merge bars with the same [`Signature`](crate::operation::Signature),
//!    keeping the first one and counting the rest as repetitions.
//!
//! The result is deterministic but not optimal: there is no backtracking.
//!
//! ## Example
//!
//! ```rust
//! use cut_core::planner::{generate, CutListInput};
//! use cut_core::parts::PartRequest;
//! use cut_core::stock::StockRequest;
//!
//! let input = CutListInput {
//!     kerf: 0.0,
//!     stock: vec![StockRequest::unlimited(100.0)],
//!     parts: vec![PartRequest::new(60.0, 1), PartRequest::new(40.0, 1)],
//! };
//!
//! let plan = generate(&input).unwrap();
//! assert_eq!(plan.total_operations, 1);
//! assert_eq!(plan.yield_pct, 100.0);
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::{PlanError, PlanResult};
use crate::operation::{CutReport, CuttingOperation, Signature};
use crate::parts::{expand_requests, Part, PartRequest};
use crate::stock::{StockLedger, StockRequest};

/// Input contract for a planning run.
///
/// ## JSON Example
///
/// ```json
/// {
///   "kerf": 0.125,
///   "stock": [{ "length": 96, "label": "2x4", "quantity": null }],
///   "parts": [
///     { "length": 53, "label": "Side floor joist", "quantity": 4 },
///     { "length": 56.75, "label": "Post stretcher", "quantity": 2 }
///   ]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CutListInput {
    /// Saw kerf charged once per placed part
    pub kerf: f64,

    /// Stock catalog, in preference order for new bars
    pub stock: Vec<StockRequest>,

    /// Required parts
    pub parts: Vec<PartRequest>,
}

impl CutListInput {
    /// Validate kerf and every length in the input.
    pub fn validate(&self) -> PlanResult<()> {
        if !self.kerf.is_finite() || self.kerf < 0.0 {
            return Err(PlanError::invalid_input(
                "kerf",
                self.kerf.to_string(),
                "Kerf must be zero or a positive number",
            ));
        }
        for (i, stock) in self.stock.iter().enumerate() {
            stock.validate(i)?;
        }
        for (i, part) in self.parts.iter().enumerate() {
            part.validate(i)?;
        }
        Ok(())
    }

    /// Number of individual parts after quantity expansion.
    pub fn part_count(&self) -> usize {
        self.parts.iter().map(PartRequest::count).sum()
    }
}

/// How many bars of one stock length a plan consumes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StockUsage {
    /// Stock bar length
    pub length: f64,

    /// Bars of that length consumed, counting repetitions
    pub count: u32,
}

/// Output contract of a planning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CutPlan {
    /// Number of individual parts placed
    pub total_parts: usize,

    /// Number of distinct cutting patterns
    pub total_operations: usize,

    /// Distinct cutting patterns, in the order they were first opened
    pub cuts: Vec<CutReport>,

    /// Bars consumed per stock length, in first-appearance order
    pub total_stock: Vec<StockUsage>,

    /// Percentage of consumed stock length that ends up in parts
    #[serde(rename = "yield")]
    pub yield_pct: f64,
}

impl CutPlan {
    /// Total number of bars cut, counting repetitions.
    pub fn bar_count(&self) -> u32 {
        self.cuts.iter().map(|c| c.reps).sum()
    }

    /// Total stock length consumed, counting repetitions.
    pub fn stock_length_used(&self) -> f64 {
        self.cuts.iter().map(|c| c.stock_length * f64::from(c.reps)).sum()
    }
}

/// Validate the input and plan it.
///
/// This is the entry point for the presentation layer.
pub fn generate(input: &CutListInput) -> PlanResult<CutPlan> {
    input.validate()?;
    plan(&input.parts, &input.stock, input.kerf)
}

/// Plan cuts for `parts` from `stock` with the given kerf.
///
/// The catalog is only read; supply counters live in a ledger owned by this
/// call.
///
/// # Errors
///
/// * `PlanError::OutOfStock` - some part fits no open bar and no stock
///   definition can supply a new one
/// * `PlanError::CapacityExceeded` - internal defect, a placement skipped its
///   fit check
pub fn plan(parts: &[PartRequest], stock: &[StockRequest], kerf: f64) -> PlanResult<CutPlan> {
    let parts = expand_requests(parts);
    let mut ledger = StockLedger::new(stock, kerf);

    let operations = assign(&parts, &mut ledger)?;
    let opened = operations.len();
    let merged = aggregate(operations);

    let cuts: Vec<CutReport> = merged.iter().map(CuttingOperation::report).collect();
    let plan = build_plan(&parts, cuts);

    info!(
        parts = plan.total_parts,
        bars = opened,
        patterns = plan.total_operations,
        yield_pct = plan.yield_pct,
        "cut list planned"
    );
    Ok(plan)
}

/// Place every part, opening bars as needed. Operations are returned in
/// creation order.
fn assign(parts: &[Part], ledger: &mut StockLedger) -> PlanResult<Vec<CuttingOperation>> {
    let mut operations: Vec<CuttingOperation> = Vec::new();

    for part in parts {
        if let Some(index) = operations.iter().position(|op| op.fits(part)) {
            debug!(length = part.length, bar = index, "placed on open bar");
            operations[index].add_part(part.clone())?;
            continue;
        }

        let bar = ledger.pull(part).inspect_err(|e| {
            warn!(length = part.length, label = ?part.label, "{}", e);
        })?;
        debug!(
            length = part.length,
            stock_length = bar.length,
            bar = operations.len(),
            "opened new bar"
        );
        let mut operation = CuttingOperation::new(bar);
        operation.add_part(part.clone())?;
        operations.push(operation);
    }

    Ok(operations)
}

/// Merge operations with identical signatures.
///
/// The first operation with a given signature is kept; later ones are
/// dropped and counted as repetitions. First-appearance order is preserved.
fn aggregate(operations: Vec<CuttingOperation>) -> Vec<CuttingOperation> {
    let mut merged: Vec<CuttingOperation> = Vec::new();
    let mut index_by_signature: HashMap<Signature, usize> = HashMap::new();

    for operation in operations {
        let signature = operation.signature();
        match index_by_signature.get(&signature).copied() {
            Some(i) => merged[i].add_rep(),
            None => {
                index_by_signature.insert(signature, merged.len());
                merged.push(operation);
            }
        }
    }

    merged
}

fn build_plan(parts: &[Part], cuts: Vec<CutReport>) -> CutPlan {
    let mut total_stock: Vec<StockUsage> = Vec::new();
    for cut in &cuts {
        match total_stock.iter_mut().find(|u| u.length == cut.stock_length) {
            Some(usage) => usage.count += cut.reps,
            None => total_stock.push(StockUsage {
                length: cut.stock_length,
                count: cut.reps,
            }),
        }
    }

    let mut plan = CutPlan {
        total_parts: parts.len(),
        total_operations: cuts.len(),
        cuts,
        total_stock,
        yield_pct: 0.0,
    };

    // An empty run opens no bars and keeps a zero yield
    let stock_total = plan.stock_length_used();
    if stock_total > 0.0 {
        let parts_total: f64 = parts.iter().map(|p| p.length).sum();
        plan.yield_pct = parts_total / stock_total * 100.0;
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(kerf: f64, stock: Vec<StockRequest>, parts: Vec<PartRequest>) -> CutListInput {
        CutListInput { kerf, stock, parts }
    }

    #[test]
    fn test_yield_without_kerf() {
        let plan = generate(&input(
            0.0,
            vec![StockRequest::unlimited(100.0)],
            vec![PartRequest::new(60.0, 1), PartRequest::new(40.0, 1)],
        ))
        .unwrap();

        assert_eq!(plan.total_operations, 1);
        assert_eq!(plan.cuts[0].waste.material, 0.0);
        assert_eq!(plan.yield_pct, 100.0);
    }

    #[test]
    fn test_yield_with_kerf() {
        let plan = generate(&input(
            1.0,
            vec![StockRequest::unlimited(10.0)],
            vec![PartRequest::new(4.0, 2)],
        ))
        .unwrap();

        assert_eq!(plan.total_operations, 1);
        let cut = &plan.cuts[0];
        assert_eq!(cut.reps, 1);
        assert_eq!(cut.waste.material, 0.0);
        assert_eq!(cut.waste.kerf, 2.0);
        assert!((plan.yield_pct - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_exhaustion_fails_whole_run() {
        let result = generate(&input(
            0.0,
            vec![StockRequest::finite(96.0, 1)],
            vec![PartRequest::new(50.0, 2)],
        ));
        assert!(matches!(result, Err(PlanError::OutOfStock { length, .. }) if length == 50.0));
    }

    #[test]
    fn test_part_longer_than_any_stock() {
        let result = generate(&input(
            0.0,
            vec![StockRequest::unlimited(96.0)],
            vec![PartRequest::new(120.0, 1).with_label("Ridge")],
        ));
        assert_eq!(
            result,
            Err(PlanError::out_of_stock(120.0, Some("Ridge".to_string())))
        );
    }

    #[test]
    fn test_identical_bars_aggregate() {
        let plan = generate(&input(
            0.0,
            vec![StockRequest::unlimited(96.0)],
            vec![PartRequest::new(53.0, 2), PartRequest::new(40.0, 2)],
        ))
        .unwrap();

        // 53 + 40 = 93 on each bar, two identical bars
        assert_eq!(plan.total_operations, 1);
        assert_eq!(plan.cuts[0].reps, 2);
        assert_eq!(plan.bar_count(), 2);
        assert_eq!(plan.total_parts, 4);
    }

    #[test]
    fn test_first_fit_reuses_earlier_bar() {
        // 70 opens bar 1, 60 opens bar 2, 25 goes back to bar 1
        let plan = generate(&input(
            0.0,
            vec![StockRequest::unlimited(96.0)],
            vec![
                PartRequest::new(70.0, 1),
                PartRequest::new(60.0, 1),
                PartRequest::new(25.0, 1),
            ],
        ))
        .unwrap();

        let lengths: Vec<Vec<f64>> = plan
            .cuts
            .iter()
            .map(|c| c.parts.iter().map(|p| p.length).collect())
            .collect();
        assert_eq!(lengths, vec![vec![70.0, 25.0], vec![60.0]]);
    }

    #[test]
    fn test_new_bars_follow_catalog_order() {
        // The 144 is listed first, so it is opened even though 96 would do
        let plan = generate(&input(
            0.0,
            vec![StockRequest::finite(144.0, 1), StockRequest::unlimited(96.0)],
            vec![PartRequest::new(90.0, 2)],
        ))
        .unwrap();

        let stock: Vec<f64> = plan.cuts.iter().map(|c| c.stock_length).collect();
        assert_eq!(stock, vec![144.0, 96.0]);
        assert_eq!(
            plan.total_stock,
            vec![
                StockUsage { length: 144.0, count: 1 },
                StockUsage { length: 96.0, count: 1 },
            ]
        );
    }

    #[test]
    fn test_total_stock_sums_reps_per_length() {
        let plan = generate(&input(
            0.0,
            vec![StockRequest::unlimited(96.0)],
            vec![PartRequest::new(90.0, 3), PartRequest::new(50.0, 1)],
        ))
        .unwrap();

        assert_eq!(plan.total_operations, 2);
        assert_eq!(plan.total_stock, vec![StockUsage { length: 96.0, count: 4 }]);
    }

    #[test]
    fn test_yield_counts_repeated_bars() {
        let plan = generate(&input(
            0.0,
            vec![StockRequest::unlimited(96.0)],
            vec![PartRequest::new(90.0, 3), PartRequest::new(50.0, 1)],
        ))
        .unwrap();

        // Three 90s on their own bars plus one 50: 320 of 4 x 96
        assert_eq!(plan.stock_length_used(), 384.0);
        assert!((plan.yield_pct - 320.0 / 384.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_parts() {
        let plan = generate(&input(0.125, vec![StockRequest::unlimited(96.0)], vec![])).unwrap();
        assert_eq!(plan.total_parts, 0);
        assert!(plan.cuts.is_empty());
        assert_eq!(plan.yield_pct, 0.0);
    }

    #[test]
    fn test_generate_validates() {
        let err = generate(&input(-0.1, vec![StockRequest::unlimited(96.0)], vec![])).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let err = generate(&input(
            0.0,
            vec![StockRequest::unlimited(96.0)],
            vec![PartRequest::new(0.0, 1)],
        ))
        .unwrap_err();
        assert!(matches!(err, PlanError::InvalidInput { ref field, .. } if field == "parts[0].length"));
    }

    #[test]
    fn test_catalog_not_mutated() {
        let stock = vec![StockRequest::finite(96.0, 1)];
        let parts = vec![PartRequest::new(50.0, 1)];
        plan(&parts, &stock, 0.0).unwrap();
        // A second run gets a fresh ledger with the full supply
        plan(&parts, &stock, 0.0).unwrap();
        assert_eq!(stock[0].quantity, Some(1));
    }

    #[test]
    fn test_yield_key_serialization() {
        let plan = generate(&input(
            0.0,
            vec![StockRequest::unlimited(100.0)],
            vec![PartRequest::new(50.0, 1)],
        ))
        .unwrap();
        let json = serde_json::to_value(&plan).unwrap();
        assert_eq!(json["yield"], 50.0);
        assert_eq!(json["total_parts"], 1);
        assert_eq!(json["cuts"][0]["waste"]["material"], 50.0);
    }
}
