#![allow(dead_code)]

use doc_client::{ApiBase, ApiClient};
use wiremock::MockServer;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn api_for(server: &MockServer) -> ApiClient {
    ApiClient::new(ApiBase::Fixed(server.uri()))
}

/// Nothing listens on the discard port, so every request fails to connect.
pub fn unreachable_api() -> ApiClient {
    ApiClient::new(ApiBase::Fixed("http://127.0.0.1:9".to_string()))
}
