//! GraphQL execution behind a narrow HTTP-shaped trait.
//!
//! The adapter never touches GraphQL semantics; it hands a normalized request
//! to a [`GraphQLExecutor`] and encodes whatever comes back.

use async_graphql::{BatchRequest, ObjectType, Schema, SubscriptionType};
use async_trait::async_trait;
use lambda_runtime::tracing::debug;

use crate::models::{AdapterError, HttpGraphQLRequest, HttpGraphQLResponse, RequestBody};

/// Content-type of every GraphQL response produced by the schema executor.
pub const GRAPHQL_RESPONSE_CONTENT_TYPE: &str = "application/json; charset=utf-8";

const ALLOWED_METHODS: &str = "GET, POST";

/// Trait for executing normalized HTTP GraphQL requests.
///
/// This is the seam between the event adapter and the GraphQL server library,
/// and lets tests swap in a mock executor.
#[async_trait]
pub trait GraphQLExecutor: Send + Sync {
    /// Executes one HTTP GraphQL request.
    ///
    /// # Errors
    ///
    /// Returns [`AdapterError::BadRequest`] if no GraphQL request can be formed
    /// from the HTTP request, or [`AdapterError::Execution`] if the response
    /// cannot be produced.
    async fn execute(&self, request: HttpGraphQLRequest) -> Result<HttpGraphQLResponse, AdapterError>;
}

/// Builds the GraphQL request carried by an HTTP request.
///
/// Returns `Ok(None)` for methods GraphQL over HTTP does not use.
fn graphql_request(request: &HttpGraphQLRequest) -> Result<Option<BatchRequest>, AdapterError> {
    match request.method.to_ascii_uppercase().as_str() {
        "GET" => {
            let parsed = async_graphql::http::parse_query_string(&request.search)
                .map_err(|e| AdapterError::BadRequest(e.to_string()))?;
            if parsed.query.trim().is_empty() {
                return Err(AdapterError::BadRequest(
                    "GET query missing. Pass the operation in the `query` parameter.".to_string(),
                ));
            }
            Ok(Some(BatchRequest::Single(parsed)))
        }
        "POST" => match &request.body {
            RequestBody::Json(value) => serde_json::from_value::<BatchRequest>(value.clone())
                .map(Some)
                .map_err(|e| AdapterError::BadRequest(format!("Invalid GraphQL request body: {e}"))),
            RequestBody::Text(_) | RequestBody::Empty => Err(AdapterError::BadRequest(
                "POST body missing. Send a JSON body with `content-type: application/json`."
                    .to_string(),
            )),
        },
        _ => Ok(None),
    }
}

#[async_trait]
impl<Query, Mutation, Subscription> GraphQLExecutor for Schema<Query, Mutation, Subscription>
where
    Query: ObjectType + 'static,
    Mutation: ObjectType + 'static,
    Subscription: SubscriptionType + 'static,
{
    async fn execute(&self, request: HttpGraphQLRequest) -> Result<HttpGraphQLResponse, AdapterError> {
        let Some(batch) = graphql_request(&request)? else {
            debug!(method = %request.method, "Rejecting unsupported method");
            return Ok(HttpGraphQLResponse::complete(
                "GraphQL only supports GET and POST requests.",
            )
            .with_status(405)
            .with_header("allow", ALLOWED_METHODS)
            .with_header("content-type", "text/plain; charset=utf-8"));
        };

        let response = self.execute_batch(batch.data(request.headers)).await;
        let body = serde_json::to_string(&response)
            .map_err(|e| AdapterError::Execution(format!("Failed to serialize response: {e}")))?;

        let mut http_response = HttpGraphQLResponse::complete(body)
            .with_status(200)
            .with_header("content-type", GRAPHQL_RESPONSE_CONTENT_TYPE);
        if let Some(cache_control) = response.cache_control().value() {
            http_response.headers.set("cache-control", cache_control);
        }
        Ok(http_response)
    }
}
