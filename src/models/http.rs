//! Transport-independent HTTP request/response models.
//!
//! The adapter decodes load balancer events into [`HttpGraphQLRequest`] and
//! encodes [`HttpGraphQLResponse`] back into load balancer results. Executors
//! only ever see these types.

use futures::stream::BoxStream;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Header mapping with case-insensitive keys.
///
/// Keys are stored lowercased; setting an existing key replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap(BTreeMap<String, String>);

impl HeaderMap {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Sets `name` to `value`, returning the value it replaced.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> Option<String> {
        self.0.insert(name.to_ascii_lowercase(), value.into())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(&name.to_ascii_lowercase()).map(String::as_str)
    }

    /// Iterates entries sorted by lowercased name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for HeaderMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut headers = Self::new();
        for (name, value) in iter {
            headers.set(name.as_ref(), value);
        }
        headers
    }
}

impl IntoIterator for HeaderMap {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Request body after content-type interpretation.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    /// No body, or a content-type the adapter does not interpret
    #[default]
    Empty,
    /// Body parsed from an `application/json` payload
    Json(Value),
    /// Body passed through from a `text/plain` payload
    Text(String),
}

impl RequestBody {
    /// JSON view of the body; `Empty` is the empty string.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Empty => Value::String(String::new()),
            Self::Json(value) => value.clone(),
            Self::Text(text) => Value::String(text.clone()),
        }
    }
}

/// Normalized HTTP request handed to a GraphQL executor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HttpGraphQLRequest {
    pub method: String,
    pub headers: HeaderMap,
    pub body: RequestBody,
    /// Form-urlencoded query string, without the leading `?`
    pub search: String,
}

/// Response body produced by an executor.
pub enum ResponseBody {
    /// The entire payload as one string
    Complete(String),
    /// Payload delivered as a sequence of chunks (incremental delivery)
    Chunked(BoxStream<'static, String>),
}

impl ResponseBody {
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Complete(_) => "complete",
            Self::Chunked(_) => "chunked",
        }
    }
}

impl fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Complete(body) => f.debug_tuple("Complete").field(body).finish(),
            Self::Chunked(_) => f.write_str("Chunked(..)"),
        }
    }
}

/// Normalized HTTP response returned by a GraphQL executor.
#[derive(Debug)]
pub struct HttpGraphQLResponse {
    /// Status code; `None` means 200
    pub status: Option<u16>,
    pub headers: HeaderMap,
    pub body: ResponseBody,
}

impl HttpGraphQLResponse {
    /// Complete response with no explicit status.
    #[must_use]
    pub fn complete(body: impl Into<String>) -> Self {
        Self {
            status: None,
            headers: HeaderMap::new(),
            body: ResponseBody::Complete(body.into()),
        }
    }

    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }
}
