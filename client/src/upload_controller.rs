use crate::api_client::ApiClient;
use crate::models::*;
use anyhow::Result;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

#[derive(Debug, Default)]
struct UploadState {
    status: UploadStatus,
    selected_file: Option<String>,
}

/// Drives the upload form: file input, loading flag and result banner.
pub struct UploadController {
    api: ApiClient,
    state: Arc<Mutex<UploadState>>,
}

impl UploadController {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(UploadState::default())),
        }
    }

    pub fn status(&self) -> UploadStatus {
        lock(&self.state).status.clone()
    }

    /// Name of the file currently held by the file input.
    pub fn selected_file(&self) -> Option<String> {
        lock(&self.state).selected_file.clone()
    }

    /// Puts the form into its loading state and returns the pending request.
    /// `None` when no file was picked.
    pub fn begin(&self, file: Option<SelectedFile>) -> Option<UploadJob> {
        let file = file?;
        let id = Uuid::new_v4();

        {
            let mut state = lock(&self.state);
            state.selected_file = Some(file.name.clone());
            state.status.loading = true;
            state.status.message = None;
        }
        log::info!("[upload {}] started for {}", id, file.name);

        Some(UploadJob {
            id,
            api: self.api.clone(),
            file,
            guard: LoadingGuard {
                state: self.state.clone(),
            },
        })
    }

    pub async fn handle_file_selected(&self, file: Option<SelectedFile>) -> Option<StatusMessage> {
        match self.begin(file) {
            Some(job) => Some(job.run().await),
            None => None,
        }
    }

    /// Records an upload that never reached the backend, e.g. a form body
    /// the host could not read.
    pub fn fail(&self, reason: &anyhow::Error) -> StatusMessage {
        log::error!("[upload] rejected before sending: {:#}", reason);
        let message = StatusMessage::error(UPLOAD_ERROR);

        let mut state = lock(&self.state);
        state.status.loading = false;
        state.status.message = Some(message.clone());
        message
    }
}

/// An upload in flight. Dropping it, finished or not, clears the loading flag.
pub struct UploadJob {
    id: Uuid,
    api: ApiClient,
    file: SelectedFile,
    guard: LoadingGuard,
}

impl UploadJob {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub async fn run(self) -> StatusMessage {
        let outcome = self.api.ingest_file(self.file).await;
        if let Err(e) = &outcome {
            log::error!("[upload {}] {:#}", self.id, e);
        }

        let (message, clear_input) = message_for(outcome);

        {
            let mut state = lock(&self.guard.state);
            state.status.message = Some(message.clone());
            if clear_input {
                state.selected_file = None;
            }
        }
        log::info!("[upload {}] finished: {}", self.id, message.text);

        message
    }
}

struct LoadingGuard {
    state: Arc<Mutex<UploadState>>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        lock(&self.state).status.loading = false;
    }
}

/// Maps an ingest outcome to its banner and whether the file input is cleared.
fn message_for(outcome: Result<IngestResponse>) -> (StatusMessage, bool) {
    match outcome {
        Ok(body) if body.success => {
            let text = non_empty(body.message).unwrap_or_else(|| DEFAULT_UPLOAD_SUCCESS.to_string());
            (StatusMessage::success(text), true)
        }
        Ok(body) => {
            let text = non_empty(body.error).unwrap_or_else(|| DEFAULT_UPLOAD_FAILURE.to_string());
            (StatusMessage::error(text), false)
        }
        Err(_) => (StatusMessage::error(UPLOAD_ERROR), false),
    }
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|t| !t.is_empty())
}

fn lock(state: &Mutex<UploadState>) -> MutexGuard<'_, UploadState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
