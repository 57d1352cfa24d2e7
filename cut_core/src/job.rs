//! # Job Data Structures
//!
//! A `CutJob` is the root container saved to disk: the planner input plus
//! metadata and display settings. Jobs serialize to `.cut.json` files as
//! human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! CutJob
//! ├── meta: JobMetadata (version, id, name, timestamps)
//! ├── settings: JobSettings (display unit, precision)
//! └── input: CutListInput (kerf, stock catalog, parts)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use cut_core::job::CutJob;
//! use cut_core::planner::CutListInput;
//!
//! let job = CutJob::new("Deck framing", CutListInput::default());
//! let json = serde_json::to_string_pretty(&job).unwrap();
//! assert!(json.contains("Deck framing"));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::PlanResult;
use crate::parts::PartRequest;
use crate::planner::{generate, CutListInput, CutPlan};
use crate::stock::StockRequest;
use crate::units::LengthUnit;

/// Current schema version for job files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root job container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CutJob {
    /// Job metadata (version, id, name)
    pub meta: JobMetadata,

    /// Display settings
    #[serde(default)]
    pub settings: JobSettings,

    /// What to cut and what to cut it from
    pub input: CutListInput,
}

impl CutJob {
    /// Create a new job around an input.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cut_core::job::{CutJob, SCHEMA_VERSION};
    /// use cut_core::planner::CutListInput;
    ///
    /// let job = CutJob::new("Shed", CutListInput::default());
    /// assert_eq!(job.meta.version, SCHEMA_VERSION);
    /// ```
    pub fn new(name: impl Into<String>, input: CutListInput) -> Self {
        let now = Utc::now();
        CutJob {
            meta: JobMetadata {
                version: SCHEMA_VERSION.to_string(),
                id: Uuid::new_v4(),
                name: name.into(),
                created: now,
                modified: now,
            },
            settings: JobSettings::default(),
            input,
        }
    }

    /// A starter job: one unlimited 96" 2x4 and a handful of framing parts.
    pub fn sample(name: impl Into<String>, kerf: f64) -> Self {
        let input = CutListInput {
            kerf,
            stock: vec![StockRequest::unlimited(96.0).with_label("2x4")],
            parts: vec![
                PartRequest::new(53.0, 4).with_label("Side floor joist"),
                PartRequest::new(56.75, 2).with_label("Post stretcher"),
                PartRequest::new(20.0, 2).with_label("Floor support"),
            ],
        };
        CutJob::new(name, input)
    }

    /// Run the planner on this job's input.
    pub fn plan(&self) -> PlanResult<CutPlan> {
        generate(&self.input)
    }
}

/// Job metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Stable identifier for the job
    pub id: Uuid,

    /// Human-readable job name
    pub name: String,

    /// When the job was created
    pub created: DateTime<Utc>,

    /// When the job was last modified
    pub modified: DateTime<Utc>,
}

/// Display settings for a job.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JobSettings {
    /// Unit the lengths are expressed in
    #[serde(default)]
    pub unit: LengthUnit,

    /// Maximum decimals shown when rendering lengths
    #[serde(default = "default_precision")]
    pub precision: usize,
}

fn default_precision() -> usize {
    3
}

impl Default for JobSettings {
    fn default() -> Self {
        JobSettings {
            unit: LengthUnit::default(),
            precision: default_precision(),
        }
    }
}
