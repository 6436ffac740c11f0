// Pipeline tests: ALB handler with a mocked executor and middleware
#![allow(clippy::unwrap_used, clippy::expect_used)]

use alb_graphql_lambda::executor::GraphQLExecutor;
use alb_graphql_lambda::handler::AlbGraphQLHandler;
use alb_graphql_lambda::middleware::{Middleware, StaticResponseHeader};
use alb_graphql_lambda::models::{
    AdapterError, AlbEvent, AlbResult, HeaderMap, HttpGraphQLRequest, HttpGraphQLResponse,
    RequestBody, ResponseBody,
};
use async_trait::async_trait;
use lambda_runtime::{Context, LambdaEvent};
use mockall::mock;
use mockall::predicate::function;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

mock! {
    pub Executor {}

    #[async_trait]
    impl GraphQLExecutor for Executor {
        async fn execute(&self, request: HttpGraphQLRequest) -> Result<HttpGraphQLResponse, AdapterError>;
    }
}

fn lambda_event(payload: Value) -> LambdaEvent<Value> {
    LambdaEvent {
        payload,
        context: Context::default(),
    }
}

fn json_post(body: &str) -> Value {
    json!({
        "httpMethod": "POST",
        "headers": {"content-type": "application/json", "x-tenant": "acme"},
        "queryStringParameters": {"debug": "1"},
        "body": body,
        "isBase64Encoded": false
    })
}

#[tokio::test]
async fn test_executor_receives_decoded_request() {
    let mut executor = MockExecutor::new();
    executor
        .expect_execute()
        .with(function(|request: &HttpGraphQLRequest| {
            request.method == "POST"
                && request.headers.get("x-tenant") == Some("acme")
                && request.search == "debug=1"
                && request.body == RequestBody::Json(json!({"query": "{ a }"}))
        }))
        .times(1)
        .returning(|_| Ok(HttpGraphQLResponse::complete(r#"{"data":{"a":1}}"#)));

    let handler = AlbGraphQLHandler::new(executor);
    let result = handler
        .handle(lambda_event(json_post(r#"{"query": "{ a }"}"#)))
        .await
        .unwrap();

    assert_eq!(result.status_code, 200);
    assert_eq!(result.body, r#"{"data":{"a":1}}"#);
    assert_eq!(result.headers.unwrap()["content-length"], "16");
}

#[tokio::test]
async fn test_executor_error_becomes_400() {
    let mut executor = MockExecutor::new();
    executor
        .expect_execute()
        .returning(|_| Err(AdapterError::Execution("schema exploded".to_string())));

    let handler = AlbGraphQLHandler::new(executor);
    let result = handler.handle(lambda_event(json_post("{}"))).await.unwrap();

    assert_eq!(
        result,
        AlbResult {
            status_code: 400,
            headers: None,
            body: "schema exploded".to_string(),
        }
    );
}

#[tokio::test]
async fn test_decode_error_skips_executor() {
    let mut executor = MockExecutor::new();
    executor.expect_execute().never();

    let handler = AlbGraphQLHandler::new(executor);
    let result = handler.handle(lambda_event(json_post("{oops"))).await.unwrap();

    assert_eq!(result.status_code, 400);
    assert!(result.headers.is_none());
}

#[tokio::test]
async fn test_chunked_response_becomes_400() {
    let mut executor = MockExecutor::new();
    executor.expect_execute().returning(|_| {
        Ok(HttpGraphQLResponse {
            status: None,
            headers: HeaderMap::new(),
            body: ResponseBody::Chunked(Box::pin(futures::stream::iter(vec![
                "{\"data\":".to_string(),
                "{}}".to_string(),
            ]))),
        })
    });

    let handler = AlbGraphQLHandler::new(executor);
    let result = handler.handle(lambda_event(json_post("{}"))).await.unwrap();

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({"statusCode": 400, "body": "Only complete body type supported"})
    );
}

/// Records hook calls and rewrites the method of every event.
struct Recorder {
    name: &'static str,
    calls: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl Middleware for Recorder {
    async fn on_event(&self, event: &mut AlbEvent) -> Result<(), AdapterError> {
        self.calls.lock().unwrap().push(format!("{}:event", self.name));
        event.http_method = "POST".to_string();
        Ok(())
    }

    async fn on_result(&self, result: &mut AlbResult) {
        self.calls.lock().unwrap().push(format!("{}:result", self.name));
        result.status_code += 1;
    }
}

struct Reject;

#[async_trait]
impl Middleware for Reject {
    async fn on_event(&self, _event: &mut AlbEvent) -> Result<(), AdapterError> {
        Err(AdapterError::Middleware("tenant not allowed".to_string()))
    }
}

#[tokio::test]
async fn test_middleware_runs_in_order_and_mutates() {
    let calls = Arc::new(Mutex::new(Vec::new()));
    let mut executor = MockExecutor::new();
    executor
        .expect_execute()
        .with(function(|request: &HttpGraphQLRequest| request.method == "POST"))
        .returning(|_| Ok(HttpGraphQLResponse::complete("ok")));

    let handler = AlbGraphQLHandler::new(executor)
        .with_middleware(Recorder {
            name: "first",
            calls: Arc::clone(&calls),
        })
        .with_middleware(Recorder {
            name: "second",
            calls: Arc::clone(&calls),
        })
        .with_middleware(StaticResponseHeader::new("X-Served-By", "alb"));

    let event = json!({"httpMethod": "PUT", "isBase64Encoded": false});
    let result = handler.handle(lambda_event(event)).await.unwrap();

    assert_eq!(result.status_code, 202);
    assert_eq!(result.headers.unwrap()["x-served-by"], "alb");
    assert_eq!(
        *calls.lock().unwrap(),
        vec!["first:event", "second:event", "first:result", "second:result"]
    );
}

#[tokio::test]
async fn test_middleware_rejection_is_400() {
    let mut executor = MockExecutor::new();
    executor.expect_execute().never();

    let handler = AlbGraphQLHandler::new(executor).with_middleware(Reject);
    let result = handler.handle(lambda_event(json_post("{}"))).await.unwrap();

    assert_eq!(result.status_code, 400);
    assert_eq!(result.body, "tenant not allowed");
}
