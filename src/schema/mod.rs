//! Demo GraphQL schema served by the Lambda binary.

pub mod query;

use async_graphql::{EmptyMutation, EmptySubscription, Schema};

pub use query::{Header, Query};

/// Schema type served by the bundled Lambda binary.
pub type DemoSchema = Schema<Query, EmptyMutation, EmptySubscription>;

/// Builds the demo schema.
#[must_use]
pub fn build_schema() -> DemoSchema {
    Schema::build(Query, EmptyMutation, EmptySubscription).finish()
}
