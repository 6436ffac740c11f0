//! Event adapters between a Lambda event source and the normalized HTTP
//! GraphQL request/response types.
//!
//! An adapter is a [`RequestDecoder`] paired with a [`ResponseEncoder`]. The
//! handler picks the pair through generic parameters, so there is no dynamic
//! dispatch on the hot path.

pub mod alb;

pub use alb::AlbEventRequestHandler;

use crate::models::{AdapterError, HeaderMap, HttpGraphQLRequest, HttpGraphQLResponse, RequestBody};

/// Turns a platform event into a normalized request.
///
/// Implementors provide one parser per request part; [`RequestDecoder::decode`]
/// runs them in order, handing the parsed headers to the body parser so it can
/// look at the content-type.
pub trait RequestDecoder<Event> {
    fn parse_http_method(&self, event: &Event) -> String;

    fn parse_headers(&self, event: &Event) -> HeaderMap;

    /// # Errors
    ///
    /// Returns [`AdapterError::Decode`] if the body cannot be decoded.
    fn parse_body(&self, event: &Event, headers: &HeaderMap) -> Result<RequestBody, AdapterError>;

    fn parse_query_params(&self, event: &Event) -> String;

    /// Decodes the whole event.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`RequestDecoder::parse_body`].
    fn decode(&self, event: &Event) -> Result<HttpGraphQLRequest, AdapterError> {
        let headers = self.parse_headers(event);
        let body = self.parse_body(event, &headers)?;
        Ok(HttpGraphQLRequest {
            method: self.parse_http_method(event),
            headers,
            body,
            search: self.parse_query_params(event),
        })
    }
}

/// Turns a normalized response, or a failure, into the platform's result.
pub trait ResponseEncoder<Output> {
    /// # Errors
    ///
    /// Returns [`AdapterError::UnsupportedResponseShape`] if the response body
    /// cannot be represented by the platform.
    fn success(&self, response: HttpGraphQLResponse) -> Result<Output, AdapterError>;

    /// Maps any failure raised while decoding, executing or encoding.
    fn error(&self, error: &AdapterError) -> Output;
}
