//! Integration tests with mock HTTP server

pub mod batch;
pub mod mock_server;
pub mod provider;
