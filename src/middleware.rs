//! Hooks around the adapter pipeline.
//!
//! Middleware sees the raw ALB event before it is decoded and the ALB result
//! after it is encoded (including error results).

use async_trait::async_trait;

use crate::models::{AdapterError, AlbEvent, AlbResult};

#[async_trait]
pub trait Middleware: Send + Sync {
    /// Runs before the event is decoded. Returning an error short-circuits
    /// the pipeline into a 400 result.
    ///
    /// # Errors
    ///
    /// Implementations return [`AdapterError::Middleware`] to reject an event.
    async fn on_event(&self, _event: &mut AlbEvent) -> Result<(), AdapterError> {
        Ok(())
    }

    /// Runs on every result before it is returned to the load balancer.
    async fn on_result(&self, _result: &mut AlbResult) {}
}

/// Adds a fixed header to every successful result.
#[derive(Debug, Clone)]
pub struct StaticResponseHeader {
    name: String,
    value: String,
}

impl StaticResponseHeader {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            value: value.into(),
        }
    }
}

#[async_trait]
impl Middleware for StaticResponseHeader {
    async fn on_result(&self, result: &mut AlbResult) {
        if let Some(headers) = result.headers.as_mut() {
            headers.insert(self.name.clone(), self.value.clone());
        }
    }
}
