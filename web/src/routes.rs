use axum::{
    extract::{multipart::MultipartRejection, DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::{Html, Redirect},
    routing::{get, post},
    Form, Json, Router,
};
use doc_client::SelectedFile;
use serde::Deserialize;

use crate::config::WebConfig;
use crate::page::PageView;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct AskForm {
    #[serde(default)]
    pub query: String,
}

pub fn router(state: SharedState, config: &WebConfig) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/upload", post(upload))
        .route("/ask", post(ask))
        .route("/state", get(page_state))
        .route("/health", get(health))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .with_state(state)
}

async fn index(State(state): State<SharedState>) -> Result<Html<String>, (StatusCode, String)> {
    state.render().map(Html).map_err(|e| {
        log::error!("Failed to render page: {:#}", e);
        (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page".to_string())
    })
}

/// Starts an upload for the `file` field and sends the browser back to the
/// page, which shows the loading state until the backend answers. A body that
/// cannot be read, oversized ones included, ends in the upload error banner.
async fn upload(
    State(state): State<SharedState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Redirect {
    let file = match multipart {
        Ok(multipart) => read_file_field(multipart).await,
        Err(rejection) => Err(anyhow::anyhow!("{}", rejection.body_text())),
    };

    match file {
        Ok(file) => {
            if let Some(job) = state.upload.begin(file) {
                tokio::spawn(job.run());
            }
        }
        Err(e) => {
            state.upload.fail(&e);
        }
    }
    Redirect::to("/")
}

async fn read_file_field(mut multipart: Multipart) -> anyhow::Result<Option<SelectedFile>> {
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e.body_text()))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| anyhow::anyhow!("{}", e.body_text()))?;

        // Browsers post an unnamed empty part when nothing was picked.
        if !name.is_empty() {
            file = Some(SelectedFile::new(name, bytes.to_vec()));
        }
    }

    Ok(file)
}

async fn ask(State(state): State<SharedState>, Form(form): Form<AskForm>) -> Redirect {
    state.query.set_input(form.query);
    if let Some(job) = state.query.begin_submit() {
        tokio::spawn(job.run());
    }
    Redirect::to("/")
}

async fn page_state(State(state): State<SharedState>) -> Json<PageView> {
    Json(state.view())
}

async fn health() -> &'static str {
    "ok"
}
