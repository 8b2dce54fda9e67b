//! Opaque rich-text content.
//!
//! Document content is produced and consumed by an external editor. The
//! core treats it as an uninterpreted serialized payload with a schema
//! version tag and never parses its internal shape.

use serde::{Deserialize, Serialize};

/// Current schema version written for new content.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Versioned, uninterpreted rich-text payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichContent {
    /// Editor schema version, carried for forward migration.
    pub schema_version: i32,

    /// Serialized editor document. Opaque to the backend.
    pub payload: String,
}

impl RichContent {
    /// Wraps a serialized editor payload at the current schema version.
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            payload: payload.into(),
        }
    }

    /// Reconstitutes content from persistence at its stored version.
    pub fn from_parts(schema_version: i32, payload: String) -> Self {
        Self {
            schema_version,
            payload,
        }
    }

    /// An empty payload at the current schema version.
    pub fn empty() -> Self {
        Self::new("")
    }
}
