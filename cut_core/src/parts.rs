//! # Parts
//!
//! A [`Part`] is one required length to be cut. Callers request parts with a
//! quantity ([`PartRequest`]); the planner expands each request into that many
//! individual `Part` records before sorting and placing them.

use serde::{Deserialize, Serialize};

use crate::errors::{PlanError, PlanResult};

/// One required piece. Never mutated after expansion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    /// Required length
    pub length: f64,

    /// Optional user label (e.g., "Side floor joist")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Part {
    /// Create an unlabeled part.
    pub fn new(length: f64) -> Self {
        Part { length, label: None }
    }

    /// Create a labeled part.
    pub fn labeled(length: f64, label: impl Into<String>) -> Self {
        Part {
            length,
            label: Some(label.into()),
        }
    }
}

/// A requested part with quantity, as it appears in the input contract.
///
/// ## JSON Example
///
/// ```json
/// { "length": 53.0, "label": "Side floor joist", "quantity": 4 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartRequest {
    /// Required length
    pub length: f64,

    /// Optional user label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    /// How many pieces are needed. Absent or zero means one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

impl PartRequest {
    /// Create a request for `quantity` pieces of `length`.
    pub fn new(length: f64, quantity: u32) -> Self {
        PartRequest {
            length,
            label: None,
            quantity: Some(quantity),
        }
    }

    /// Attach a label to the request.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Number of individual parts this request expands to.
    pub fn count(&self) -> usize {
        match self.quantity {
            Some(0) | None => 1,
            Some(n) => n as usize,
        }
    }

    /// Expand into individual parts.
    pub fn expand(&self) -> impl Iterator<Item = Part> + '_ {
        (0..self.count()).map(move |_| Part {
            length: self.length,
            label: self.label.clone(),
        })
    }

    /// Validate the requested length.
    pub fn validate(&self, index: usize) -> PlanResult<()> {
        if !self.length.is_finite() || self.length <= 0.0 {
            return Err(PlanError::invalid_input(
                format!("parts[{}].length", index),
                self.length.to_string(),
                "Part length must be a positive number",
            ));
        }
        Ok(())
    }
}

/// Expand all requests and sort the result descending by length.
///
/// The sort is stable, so equal lengths keep their input order.
pub fn expand_requests(requests: &[PartRequest]) -> Vec<Part> {
    let mut parts: Vec<Part> = requests.iter().flat_map(|r| r.expand()).collect();
    sort_descending(&mut parts);
    parts
}

/// Stable descending sort by length.
pub(crate) fn sort_descending(parts: &mut [Part]) {
    parts.sort_by(|a, b| b.length.total_cmp(&a.length));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_quantity_is_one() {
        let json = r#"{ "length": 20.0, "label": "Floor support" }"#;
        let request: PartRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.count(), 1);
        assert_eq!(PartRequest::new(20.0, 0).count(), 1);
    }

    #[test]
    fn test_expand_keeps_label() {
        let request = PartRequest::new(53.0, 3).with_label("Joist");
        let parts: Vec<Part> = request.expand().collect();
        assert_eq!(parts.len(), 3);
        assert!(parts.iter().all(|p| p == &Part::labeled(53.0, "Joist")));
    }

    #[test]
    fn test_expand_requests_sorted_and_stable() {
        let requests = vec![
            PartRequest::new(20.0, 1).with_label("A"),
            PartRequest::new(53.0, 1).with_label("B"),
            PartRequest::new(20.0, 1).with_label("C"),
        ];
        let parts = expand_requests(&requests);
        let labels: Vec<_> = parts.iter().map(|p| p.label.as_deref().unwrap()).collect();
        assert_eq!(labels, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_validate_rejects_non_positive() {
        assert!(PartRequest::new(0.0, 1).validate(0).is_err());
        assert!(PartRequest::new(-4.0, 1).validate(0).is_err());
        assert!(PartRequest::new(f64::NAN, 1).validate(0).is_err());
        assert!(PartRequest::new(4.0, 1).validate(0).is_ok());
    }

    #[test]
    fn test_unlabeled_part_serialization() {
        let json = serde_json::to_string(&Part::new(12.5)).unwrap();
        assert_eq!(json, r#"{"length":12.5}"#);
    }
}
