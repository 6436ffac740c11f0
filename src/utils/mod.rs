//! Utility functions shared across the application.
//!
//! Query strings handed to executors use `application/x-www-form-urlencoded`
//! serialization, so spaces become `+` and keys may repeat.

/// Encodes one key or value for a form-urlencoded query string.
///
/// Follows the WHATWG form-urlencoded byte set: ASCII alphanumerics and
/// `*-._` pass through, spaces become `+`, everything else is percent-encoded.
///
/// # Arguments
///
/// * `input` - The raw key or value
///
/// # Returns
///
/// The percent-encoded text.
#[must_use]
pub fn form_encode(input: &str) -> String {
    // `urlencoding` keeps `~` and escapes `*`; the form set does the opposite
    urlencoding::encode(input)
        .replace("%20", "+")
        .replace('~', "%7E")
        .replace("%2A", "*")
}

/// Builder for form-urlencoded query strings that keeps insertion order.
#[derive(Debug, Default, Clone)]
pub struct QueryStringBuilder {
    pairs: Vec<(String, String)>,
}

impl QueryStringBuilder {
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Appends a pair. Existing pairs with the same key are kept.
    pub fn append(&mut self, key: &str, value: &str) -> &mut Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    #[must_use]
    pub fn finish(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", form_encode(k), form_encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_encode() {
        assert_eq!(form_encode("a b"), "a+b");
        assert_eq!(form_encode("a+b"), "a%2Bb");
        assert_eq!(form_encode("x=1&y"), "x%3D1%26y");
        assert_eq!(form_encode("{ hello }"), "%7B+hello+%7D");
    }

    #[test]
    fn test_builder_keeps_repeated_keys() {
        let mut builder = QueryStringBuilder::new();
        builder.append("a", "1").append("b", "").append("a", "2");
        assert_eq!(builder.finish(), "a=1&b=&a=2");
    }

    #[test]
    fn test_form_encode_matches_form_byte_set() {
        assert_eq!(form_encode("x*y~z"), "x*y%7Ez");
        assert_eq!(form_encode("-._"), "-._");
        assert_eq!(form_encode("%2A"), "%252A");
    }

    #[test]
    fn test_empty_builder() {
        assert_eq!(QueryStringBuilder::new().finish(), "");
    }
}
