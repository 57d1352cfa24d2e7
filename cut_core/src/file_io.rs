//! # File I/O Module
//!
//! Handles job and plan files with safety features:
//! - **Atomic saves**: Write to .tmp, sync, rename to prevent corruption
//! - **Version validation**: Ensure schema compatibility
//!
//! ## File Format
//!
//! Jobs are saved as `.cut.json` files containing a [`CutJob`]. For quick
//! one-off runs, [`load_input`] also accepts a bare [`CutListInput`]
//! document without metadata.
//!
//! ## Example
//!
//! ```rust,no_run
//! use cut_core::file_io::{save_job, load_job};
//! use cut_core::job::CutJob;
//! use std::path::Path;
//!
//! let job = CutJob::sample("Deck", 0.125);
//! let path = Path::new("deck.cut.json");
//!
//! save_job(&job, path).unwrap();
//! let loaded = load_job(path).unwrap();
//! assert_eq!(loaded.meta.id, job.meta.id);
//! ```

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::errors::{PlanError, PlanResult};
use crate::job::{CutJob, SCHEMA_VERSION};
use crate::planner::{CutListInput, CutPlan};

/// Save a job to a file with atomic write semantics.
///
/// The save process:
/// 1. Serialize job to JSON
/// 2. Write to a temporary file (`<name>.tmp`)
/// 3. Sync to disk (fsync)
/// 4. Rename over the target (atomic on most filesystems)
pub fn save_job(job: &CutJob, path: &Path) -> PlanResult<()> {
    write_json_atomic(job, path)
}

/// Save a finished plan as JSON, atomically.
pub fn save_plan(plan: &CutPlan, path: &Path) -> PlanResult<()> {
    write_json_atomic(plan, path)
}

/// Load a job from a file.
///
/// # Returns
///
/// * `Ok(CutJob)` - Successfully loaded job
/// * `Err(PlanError::VersionMismatch)` - File version is incompatible
/// * `Err(PlanError::SerializationError)` - Invalid JSON
/// * `Err(PlanError::FileError)` - I/O error
pub fn load_job(path: &Path) -> PlanResult<CutJob> {
    let contents = read_file(path)?;

    let job: CutJob = serde_json::from_str(&contents).map_err(|e| PlanError::SerializationError {
        reason: format!("Invalid JSON in {}: {}", path.display(), e),
    })?;

    validate_version(&job.meta.version)?;

    Ok(job)
}

/// Load either a full job file or a bare input document.
///
/// A bare input is wrapped in a new job named after the file stem, with
/// default settings.
pub fn load_input(path: &Path) -> PlanResult<CutJob> {
    let contents = read_file(path)?;

    let value: serde_json::Value =
        serde_json::from_str(&contents).map_err(|e| PlanError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    if value.get("meta").is_some() {
        let job: CutJob = serde_json::from_value(value).map_err(|e| PlanError::SerializationError {
            reason: format!("Invalid job in {}: {}", path.display(), e),
        })?;
        validate_version(&job.meta.version)?;
        return Ok(job);
    }

    let input: CutListInput =
        serde_json::from_value(value).map_err(|e| PlanError::SerializationError {
            reason: format!("Invalid cut list input in {}: {}", path.display(), e),
        })?;
    debug!(path = %path.display(), "loaded bare cut list input");
    Ok(CutJob::new(job_name_for(path), input))
}

fn read_file(path: &Path) -> PlanResult<String> {
    fs::read_to_string(path)
        .map_err(|e| PlanError::file_error("read", path.display().to_string(), e.to_string()))
}

/// Job name derived from the file name, dropping `.json` and `.cut`.
fn job_name_for(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = name.strip_suffix(".json").unwrap_or(&name);
    let name = name.strip_suffix(".cut").unwrap_or(name);
    name.to_string()
}

/// Temp file path: the target file name with `.tmp` appended.
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name: OsString = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_json_atomic<T: Serialize>(value: &T, path: &Path) -> PlanResult<()> {
    let json = serde_json::to_string_pretty(value)?;
    let tmp_path = tmp_path_for(path);
    let tmp_err = |step: &str, e: std::io::Error| {
        PlanError::file_error(step, tmp_path.display().to_string(), e.to_string())
    };

    let mut tmp_file = File::create(&tmp_path).map_err(|e| tmp_err("create temp file", e))?;
    tmp_file
        .write_all(json.as_bytes())
        .and_then(|()| tmp_file.sync_all())
        .map_err(|e| tmp_err("write temp file", e))?;
    drop(tmp_file);

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(PlanError::file_error("replace", path.display().to_string(), e.to_string()));
    }

    debug!(path = %path.display(), bytes = json.len(), "saved");
    Ok(())
}

/// `(major, minor)` of a dotted version string; a missing minor reads as 0.
fn parse_version(version: &str) -> Option<(u32, u32)> {
    let mut fields = version.trim().split('.');
    let major = fields.next()?.parse().ok()?;
    let minor = match fields.next() {
        Some(field) => field.parse().ok()?,
        None => 0,
    };
    Some((major, minor))
}

/// Accept files written by this schema major. While the schema is still 0.x,
/// a newer minor may break the layout, so files from a later minor are refused.
fn validate_version(file_version: &str) -> PlanResult<()> {
    let compatible = match (parse_version(file_version), parse_version(SCHEMA_VERSION)) {
        (Some((0, file_minor)), Some((0, our_minor))) => file_minor <= our_minor,
        (Some((file_major, _)), Some((our_major, _))) => file_major == our_major,
        _ => false,
    };

    if compatible {
        Ok(())
    } else {
        Err(PlanError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        })
    }
}
