//! Operation Context
//!
//! Contains metadata about the current operation for tracing.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Context for an operation, carried into every log line a handler emits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationContext {
    /// Correlation ID for tracing one command through handler and engine
    pub correlation_id: Uuid,

    /// Where the command came from (e.g. "demo", "script:12")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl OperationContext {
    /// Create a new context with a fresh correlation ID
    pub fn new() -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            source: None,
        }
    }

    /// Create context with a caller-supplied correlation ID
    pub fn with_correlation_id(mut self, correlation_id: Uuid) -> Self {
        self.correlation_id = correlation_id;
        self
    }

    /// Create context with a source label
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Source label for log fields, `-` when unset
    pub fn source(&self) -> &str {
        self.source.as_deref().unwrap_or("-")
    }
}

impl Default for OperationContext {
    fn default() -> Self {
        Self::new()
    }
}
