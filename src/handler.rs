use lambda_runtime::tracing::{debug, info, warn};
use lambda_runtime::{Diagnostic, LambdaEvent};
use serde_json::Value;
use std::sync::LazyLock;

use crate::adapter::{AlbEventRequestHandler, RequestDecoder, ResponseEncoder};
use crate::executor::GraphQLExecutor;
use crate::middleware::Middleware;
use crate::models::{AdapterError, AlbEvent, AlbResult};
use crate::schema::{DemoSchema, build_schema};

/// Lambda handler serving GraphQL behind an Application Load Balancer.
///
/// Composes a decoder, an encoder and an executor chosen at build time, plus
/// any number of middleware run in registration order.
pub struct AlbGraphQLHandler<E, D = AlbEventRequestHandler, R = AlbEventRequestHandler> {
    executor: E,
    decoder: D,
    encoder: R,
    middleware: Vec<Box<dyn Middleware>>,
}

impl<E: GraphQLExecutor> AlbGraphQLHandler<E> {
    /// Creates a handler using the ALB decoder and encoder.
    #[must_use]
    pub fn new(executor: E) -> Self {
        Self::with_adapter(executor, AlbEventRequestHandler, AlbEventRequestHandler)
    }
}

impl<E, D, R> AlbGraphQLHandler<E, D, R>
where
    E: GraphQLExecutor,
    D: RequestDecoder<AlbEvent> + Send + Sync,
    R: ResponseEncoder<AlbResult> + Send + Sync,
{
    #[must_use]
    pub fn with_adapter(executor: E, decoder: D, encoder: R) -> Self {
        Self {
            executor,
            decoder,
            encoder,
            middleware: Vec::new(),
        }
    }

    /// Appends a middleware; hooks run in the order they were added.
    #[must_use]
    pub fn with_middleware(mut self, middleware: impl Middleware + 'static) -> Self {
        self.middleware.push(Box::new(middleware));
        self
    }

    /// Decodes, executes and encodes one event.
    ///
    /// # Errors
    ///
    /// Returns the first failure raised by middleware, decoding, execution or
    /// encoding.
    pub async fn process(&self, payload: Value) -> Result<AlbResult, AdapterError> {
        let mut event: AlbEvent = serde_json::from_value(payload)
            .map_err(|e| AdapterError::Decode(format!("Invalid ALB event: {e}")))?;

        for middleware in &self.middleware {
            middleware.on_event(&mut event).await?;
        }

        let request = self.decoder.decode(&event)?;
        debug!(
            method = %request.method,
            search = %request.search,
            "Decoded ALB event"
        );

        let response = self.executor.execute(request).await?;
        self.encoder.success(response)
    }

    /// Lambda event handler. Always answers with an ALB result: every failure
    /// becomes a 400 whose body is the error message.
    /// Logs full event when `RUST_LOG=debug/trace`, only the request id otherwise.
    ///
    /// # Errors
    ///
    /// Never returns an error; the `Diagnostic` type only satisfies the runtime.
    pub async fn handle(&self, event: LambdaEvent<Value>) -> Result<AlbResult, Diagnostic> {
        let (payload, context) = event.into_parts();
        info!(request_id = %context.request_id, "Handling ALB event");
        debug!(payload = ?payload, "ALB event payload");

        let mut result = match self.process(payload).await {
            Ok(result) => result,
            Err(e) => {
                warn!(error_type = e.kind(), error = %e, "Request failed");
                self.encoder.error(&e)
            }
        };

        for middleware in &self.middleware {
            middleware.on_result(&mut result).await;
        }

        info!(status_code = result.status_code, "Returning ALB result");
        Ok(result)
    }
}

/// Handler for the bundled demo schema
static HANDLER: LazyLock<AlbGraphQLHandler<DemoSchema>> =
    LazyLock::new(|| AlbGraphQLHandler::new(build_schema()));

/// Lambda event handler serving the demo schema.
///
/// # Errors
///
/// Never returns an error; failures are encoded as 400 ALB results.
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<AlbResult, Diagnostic> {
    HANDLER.handle(event).await
}
