use anyhow::Result;
use doc_client::{ApiClient, QueryController, UploadController};
use minijinja::Environment;
use std::sync::Arc;

use crate::page::{self, PageView};

pub type SharedState = Arc<AppState>;

/// The two independent controllers plus the page template.
pub struct AppState {
    pub upload: UploadController,
    pub query: QueryController,
    templates: Environment<'static>,
}

impl AppState {
    pub fn new(api: ApiClient) -> Result<Self> {
        Ok(Self {
            upload: UploadController::new(api.clone()),
            query: QueryController::new(api),
            templates: page::templates()?,
        })
    }

    pub fn view(&self) -> PageView {
        PageView::capture(&self.upload, &self.query)
    }

    pub fn render(&self) -> Result<String> {
        page::render(&self.templates, &self.view())
    }
}
