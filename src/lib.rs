//! Serve GraphQL from an AWS Lambda function behind an Application Load
//! Balancer.
//!
//! ALB events are decoded into transport-independent HTTP requests, executed
//! by a [`executor::GraphQLExecutor`] (an `async-graphql` schema by default)
//! and encoded back into ALB results.

pub mod adapter;
pub mod executor;
pub mod handler;
pub mod middleware;
pub mod models;
pub mod schema;
pub mod utils;
