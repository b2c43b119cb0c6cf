//! HTTP transport shared by provider adapters.

mod http;

pub use crate::error::TransportError;
pub use http::{HttpResponse, HttpTransport};
