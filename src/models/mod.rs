pub mod alb;
pub mod error;
pub mod http;

pub use alb::{AlbEvent, AlbResult, OrderedMap};
pub use error::AdapterError;
pub use http::{HeaderMap, HttpGraphQLRequest, HttpGraphQLResponse, RequestBody, ResponseBody};
