//! # cut_core - Linear Cut-List Planning Engine
//!
//! `cut_core` is the computational heart of Linecut. Given a saw kerf, a
//! catalog of stock bar lengths and a list of required part lengths, it plans
//! which parts to cut from which bars, reports the waste on each bar and the
//! overall yield. All inputs and outputs are JSON-serializable.
//!
//! Planning is a single greedy pass: parts are taken longest first and each
//! goes on the first open bar with room, otherwise on a new bar pulled from
//! the catalog. A run never mutates its input, so planning the same input
//! twice gives the same plan. Failures come back as a [`PlanError`] that
//! serializes to JSON like everything else.
//!
//! ## Quick Start
//!
//! ```rust
//! use cut_core::{generate, CutListInput, PartRequest, StockRequest};
//!
//! let input = CutListInput {
//!     kerf: 0.125,
//!     stock: vec![StockRequest::unlimited(96.0).with_label("2x4")],
//!     parts: vec![
//!         PartRequest::new(53.0, 4).with_label("Side floor joist"),
//!         PartRequest::new(20.0, 2).with_label("Floor support"),
//!     ],
//! };
//!
//! let plan = generate(&input).unwrap();
//! assert_eq!(plan.total_parts, 6);
//!
//! let json = serde_json::to_string_pretty(&plan).unwrap();
//! assert!(json.contains("\"yield\""));
//! ```
//!
//! ## Modules
//!
//! - [`planner`] - Input/output contracts and the planning algorithm
//! - [`parts`] - Required parts and quantity expansion
//! - [`stock`] - Stock catalog, supply and the per-run ledger
//! - [`bar`] - A single stock bar and its waste accounting
//! - [`operation`] - Cutting patterns and their aggregation keys
//! - [`job`] - Job container with metadata and display settings
//! - [`file_io`] - Job and plan files with atomic saves
//! - [`report`] - Text and HTML rendering of plans
//! - [`units`] - Display units for lengths
//! - [`errors`] - Structured error types

pub mod bar;
pub mod errors;
pub mod file_io;
pub mod job;
pub mod operation;
pub mod parts;
pub mod planner;
pub mod report;
pub mod stock;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use errors::{PlanError, PlanResult};
pub use file_io::{load_input, load_job, save_job, save_plan};
pub use job::{CutJob, JobMetadata, JobSettings};
pub use parts::{Part, PartRequest};
pub use planner::{generate, plan, CutListInput, CutPlan, StockUsage};
pub use stock::{StockDefinition, StockLedger, StockRequest, Supply};
