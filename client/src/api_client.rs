use crate::config::ApiBase;
use crate::models::*;
use anyhow::{Context, Result};
use reqwest::multipart::{Form, Part};
use reqwest::Client;

/// Thin wrapper over the two backend endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base: ApiBase,
}

impl ApiClient {
    pub fn new(base: ApiBase) -> Self {
        Self {
            client: Client::new(),
            base,
        }
    }

    pub fn from_env() -> Self {
        Self::new(ApiBase::default())
    }

    pub fn base(&self) -> &ApiBase {
        &self.base
    }

    /// Sends the file as the `file` field of a multipart form. The body is
    /// decoded whatever the status code, the backend reports failures in it.
    pub async fn ingest_file(&self, file: SelectedFile) -> Result<IngestResponse> {
        let url = self.base.endpoint("ingest-file")?;

        log::debug!("POST {} ({} bytes)", url, file.bytes.len());
        let part = Part::bytes(file.bytes)
            .file_name(file.name)
            .mime_str("application/pdf")?;
        let form = Form::new().part("file", part);

        let response = self.client.post(&url).multipart(form).send().await?;
        let status = response.status();

        let body: IngestResponse = response
            .json()
            .await
            .with_context(|| format!("ingest-file returned undecodable body ({})", status))?;
        Ok(body)
    }

    pub async fn query(&self, query: &str) -> Result<QueryResponse> {
        let url = self.base.endpoint("query")?;
        let request = QueryRequest {
            query: query.to_string(),
        };

        log::debug!("POST {}", url);
        let response = self.client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(anyhow::anyhow!("query API error ({}): {}", status, error_text));
        }

        let query_response: QueryResponse = response
            .json()
            .await
            .context("query returned undecodable body")?;
        Ok(query_response)
    }
}
