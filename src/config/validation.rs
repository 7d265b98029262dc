//! Route source validation.
//!
//! # Responsibilities
//! - Semantic checks on parsed records (serde handles syntax)
//! - Name the offending service in every error
//!
//! # Design Decisions
//! - Stops at the first invalid record; the loader never builds a partial table
//! - Missing, null, and whitespace-only ids and paths count as empty

use thiserror::Error;

use crate::config::schema::ServiceRecord;
use crate::routing::Entry;

/// Why a service record was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidReason {
    #[error("record is empty")]
    MissingRecord,

    #[error("id is empty")]
    EmptyId,

    #[error("path is empty")]
    EmptyPath,
}

/// A record that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid config for {service}: {reason}")]
pub struct ValidationError {
    /// Logical service name the record was declared under.
    pub service: String,
    pub reason: InvalidReason,
}

impl ValidationError {
    fn new(service: &str, reason: InvalidReason) -> Self {
        Self {
            service: service.to_string(),
            reason,
        }
    }
}

/// Check one record declared under `service` and build its entry.
pub fn validate_record(
    service: &str,
    record: Option<&ServiceRecord>,
) -> Result<Entry, ValidationError> {
    let record = record.ok_or_else(|| ValidationError::new(service, InvalidReason::MissingRecord))?;

    let id = non_blank(&record.id)
        .ok_or_else(|| ValidationError::new(service, InvalidReason::EmptyId))?;
    let path = non_blank(&record.path)
        .ok_or_else(|| ValidationError::new(service, InvalidReason::EmptyPath))?;

    Ok(Entry::new(id, path))
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.trim().is_empty())
}
