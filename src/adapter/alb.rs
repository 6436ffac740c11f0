use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use lambda_runtime::tracing::debug;
use std::collections::HashMap;

use super::{RequestDecoder, ResponseEncoder};
use crate::models::{
    AdapterError, AlbEvent, AlbResult, HeaderMap, HttpGraphQLResponse, RequestBody, ResponseBody,
};
use crate::utils::QueryStringBuilder;

/// Status used for every failure mapped into an ALB result.
pub const ERROR_STATUS: u16 = 400;

const CONTENT_TYPE: &str = "content-type";
const CONTENT_LENGTH: &str = "content-length";

/// Standard alphabet, padding optional, stray trailing bits accepted.
const BODY_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Decodes a base64 body without ever failing.
///
/// URL-safe symbols are accepted, whitespace and other stray characters are
/// skipped, and input ends at the first `=`. Invalid UTF-8 is replaced.
fn decode_base64_lossy(raw: &str) -> String {
    let mut symbols: String = raw
        .chars()
        .take_while(|c| *c != '=')
        .filter_map(|c| match c {
            '-' => Some('+'),
            '_' => Some('/'),
            c if c.is_ascii_alphanumeric() || c == '+' || c == '/' => Some(c),
            _ => None,
        })
        .collect();
    // a lone trailing symbol carries less than one byte
    if symbols.len() % 4 == 1 {
        symbols.pop();
    }
    let bytes = BODY_ENGINE.decode(&symbols).unwrap_or_default();
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Decoder and encoder for Application Load Balancer Lambda targets.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlbEventRequestHandler;

impl RequestDecoder<AlbEvent> for AlbEventRequestHandler {
    fn parse_http_method(&self, event: &AlbEvent) -> String {
        event.http_method.clone()
    }

    fn parse_headers(&self, event: &AlbEvent) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, value) in event.headers.iter().flat_map(|h| h.iter()) {
            headers.set(name, value.as_deref().unwrap_or_default());
        }
        headers
    }

    fn parse_body(&self, event: &AlbEvent, headers: &HeaderMap) -> Result<RequestBody, AdapterError> {
        let Some(raw) = event.body.as_deref().filter(|b| !b.is_empty()) else {
            return Ok(RequestBody::Empty);
        };

        let content_type = headers.get(CONTENT_TYPE);
        let is_json = content_type.is_some_and(|ct| ct.starts_with("application/json"));
        let is_text = content_type.is_some_and(|ct| ct.starts_with("text/plain"));
        if !is_json && !is_text {
            debug!(content_type = ?content_type, "Ignoring body with unsupported content-type");
            return Ok(RequestBody::Empty);
        }

        let text = if event.is_base64_encoded {
            decode_base64_lossy(raw)
        } else {
            raw.to_string()
        };

        if is_json {
            Ok(RequestBody::Json(serde_json::from_str(&text)?))
        } else {
            Ok(RequestBody::Text(text))
        }
    }

    fn parse_query_params(&self, event: &AlbEvent) -> String {
        let mut query = QueryStringBuilder::new();
        for (key, value) in event.query_string_parameters.iter().flat_map(|q| q.iter()) {
            query.append(key, value.as_deref().unwrap_or_default());
        }
        for (key, values) in event
            .multi_value_query_string_parameters
            .iter()
            .flat_map(|q| q.iter())
        {
            for value in values.iter().flatten() {
                query.append(key, value);
            }
        }
        query.finish()
    }
}

impl ResponseEncoder<AlbResult> for AlbEventRequestHandler {
    fn success(&self, response: HttpGraphQLResponse) -> Result<AlbResult, AdapterError> {
        let body = match response.body {
            ResponseBody::Complete(body) => body,
            other => {
                debug!(shape = other.kind(), "Rejecting non-complete response body");
                return Err(AdapterError::UnsupportedResponseShape);
            }
        };

        let mut headers: HashMap<String, String> = response.headers.into_iter().collect();
        headers.insert(CONTENT_LENGTH.to_string(), body.len().to_string());

        Ok(AlbResult {
            status_code: response.status.unwrap_or(200),
            headers: Some(headers),
            body,
        })
    }

    fn error(&self, error: &AdapterError) -> AlbResult {
        AlbResult {
            status_code: ERROR_STATUS,
            headers: None,
            body: error.to_string(),
        }
    }
}
