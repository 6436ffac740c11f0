//! Error types for the ALB to GraphQL adapter.
//!
//! Every variant renders as its bare message: the message is what the load
//! balancer receives as the body of the 400 result, so no prefixes are added.

use std::fmt;

/// Message used when a response body is not a complete string.
pub const UNSUPPORTED_BODY_MESSAGE: &str = "Only complete body type supported";

/// Custom error type for the adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    /// The event could not be decoded (malformed JSON body
    /// or a payload that is not an ALB event)
    Decode(String),
    /// The executor produced a body shape the ALB encoder cannot emit
    UnsupportedResponseShape,
    /// The executor could not build a GraphQL request from the HTTP request
    BadRequest(String),
    /// The executor failed while producing a response
    Execution(String),
    /// A middleware rejected the event
    Middleware(String),
}

impl AdapterError {
    /// Short machine-readable name of the variant, used in logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Decode(_) => "DecodeError",
            Self::UnsupportedResponseShape => "UnsupportedResponseShape",
            Self::BadRequest(_) => "BadRequest",
            Self::Execution(_) => "ExecutionError",
            Self::Middleware(_) => "MiddlewareError",
        }
    }
}

impl fmt::Display for AdapterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode(msg)
            | Self::BadRequest(msg)
            | Self::Execution(msg)
            | Self::Middleware(msg) => write!(f, "{msg}"),
            Self::UnsupportedResponseShape => write!(f, "{UNSUPPORTED_BODY_MESSAGE}"),
        }
    }
}

impl std::error::Error for AdapterError {}

impl From<serde_json::Error> for AdapterError {
    fn from(error: serde_json::Error) -> Self {
        Self::Decode(error.to_string())
    }
}

impl From<anyhow::Error> for AdapterError {
    fn from(error: anyhow::Error) -> Self {
        Self::Execution(format!("{error:#}"))
    }
}
