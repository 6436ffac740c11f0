use async_graphql::{Context, Object, SimpleObject};

use crate::models::HeaderMap;

/// Default name to use when no name is supplied
const DEFAULT_USER_NAME: &str = "there";

/// A request header as seen by the adapter.
#[derive(Debug, Clone, PartialEq, Eq, SimpleObject)]
pub struct Header {
    /// Lowercased header name
    pub name: String,
    pub value: String,
}

pub struct Query;

#[Object]
impl Query {
    /// Generates a friendly greeting.
    ///
    /// Uses `name` if provided and not blank, otherwise greets "there".
    #[graphql(cache_control(max_age = 60))]
    async fn greeting(&self, name: Option<String>) -> String {
        let name = name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .unwrap_or(DEFAULT_USER_NAME);
        format!("Hello, {name}!")
    }

    /// Headers of the HTTP request that carried this operation, sorted by name.
    async fn echo_headers(&self, ctx: &Context<'_>) -> Vec<Header> {
        ctx.data_opt::<HeaderMap>()
            .map(|headers| {
                headers
                    .iter()
                    .map(|(name, value)| Header {
                        name: name.to_string(),
                        value: value.to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}
