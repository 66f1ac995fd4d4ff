pub mod models;
pub mod config;
pub mod api_client;
pub mod upload_controller;
pub mod query_controller;

pub use models::*;
pub use config::{ApiBase, API_BASE_ENV};
pub use api_client::ApiClient;
pub use upload_controller::{UploadController, UploadJob};
pub use query_controller::{QueryController, QueryJob, QueryView};
