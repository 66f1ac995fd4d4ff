use anyhow::Result;
use std::env;

pub const API_BASE_ENV: &str = "API_BASE_URL";

/// Where the backend lives. `Env` is re-read on every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiBase {
    Env(&'static str),
    Fixed(String),
}

impl Default for ApiBase {
    fn default() -> Self {
        ApiBase::Env(API_BASE_ENV)
    }
}

impl ApiBase {
    pub fn resolve(&self) -> Result<String> {
        let base = match self {
            ApiBase::Env(var) => env::var(var)
                .map_err(|_| anyhow::anyhow!("{} environment variable not set", var))?,
            ApiBase::Fixed(base) => base.clone(),
        };

        let base = base.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(anyhow::anyhow!("API base URL is empty"));
        }
        Ok(base.to_string())
    }

    pub fn endpoint(&self, path: &str) -> Result<String> {
        Ok(format!("{}/{}", self.resolve()?, path.trim_start_matches('/')))
    }
}
