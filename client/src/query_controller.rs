use crate::api_client::ApiClient;
use crate::models::*;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

/// Snapshot of the query box and result pane.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryView {
    pub input: String,
    pub loading: bool,
    pub result: Option<QueryResult>,
    pub error: Option<String>,
}

pub struct QueryController {
    api: ApiClient,
    state: Arc<Mutex<QueryView>>,
}

impl QueryController {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: Arc::new(Mutex::new(QueryView::default())),
        }
    }

    pub fn set_input(&self, text: impl Into<String>) {
        lock(&self.state).input = text.into();
    }

    pub fn input(&self) -> String {
        lock(&self.state).input.clone()
    }

    pub fn result(&self) -> Option<QueryResult> {
        lock(&self.state).result.clone()
    }

    pub fn view(&self) -> QueryView {
        lock(&self.state).clone()
    }

    /// Takes the current input, clearing the box before anything is sent.
    /// Blank input submits nothing.
    pub fn begin_submit(&self) -> Option<QueryJob> {
        let query = {
            let mut state = lock(&self.state);
            if state.input.trim().is_empty() {
                return None;
            }
            state.loading = true;
            state.error = None;
            std::mem::take(&mut state.input)
        };

        let id = Uuid::new_v4();
        log::info!("[query {}] submitted: {}", id, query);

        Some(QueryJob {
            id,
            api: self.api.clone(),
            query,
            guard: LoadingGuard {
                state: self.state.clone(),
            },
        })
    }

    pub async fn submit(&self) -> Option<QueryResult> {
        self.begin_submit()?.run().await
    }

    pub async fn ask(&self, query: impl Into<String>) -> Option<QueryResult> {
        self.set_input(query);
        self.submit().await
    }
}

/// A query in flight. Dropping it clears the loading flag.
pub struct QueryJob {
    id: Uuid,
    api: ApiClient,
    query: String,
    guard: LoadingGuard,
}

impl QueryJob {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns the new result, or `None` when the request failed. A failure
    /// keeps the previous result on screen.
    pub async fn run(self) -> Option<QueryResult> {
        match self.api.query(&self.query).await {
            Ok(response) => {
                let result = QueryResult::from(response);
                log::info!(
                    "[query {}] answered from {} (confidence {:.2})",
                    self.id,
                    result.source,
                    result.confidence
                );
                let mut state = lock(&self.guard.state);
                state.result = Some(result.clone());
                state.error = None;
                Some(result)
            }
            Err(e) => {
                log::error!("[query {}] {:#}", self.id, e);
                lock(&self.guard.state).error = Some(QUERY_ERROR.to_string());
                None
            }
        }
    }
}

struct LoadingGuard {
    state: Arc<Mutex<QueryView>>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        lock(&self.state).loading = false;
    }
}

fn lock(state: &Mutex<QueryView>) -> MutexGuard<'_, QueryView> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
