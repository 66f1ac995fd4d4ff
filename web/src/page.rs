use anyhow::Result;
use doc_client::{QueryController, QueryView, StatusMessage, UploadController};
use minijinja::Environment;
use serde::Serialize;

const PAGE_TEMPLATE: &str = "page.html";

#[derive(Debug, Serialize)]
pub struct Banner {
    pub title: &'static str,
    pub text: String,
    pub destructive: bool,
}

impl From<StatusMessage> for Banner {
    fn from(message: StatusMessage) -> Self {
        Self {
            title: message.title(),
            destructive: message.is_error(),
            text: message.text,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UploadPane {
    pub loading: bool,
    pub selected_file: Option<String>,
    pub banner: Option<Banner>,
}

#[derive(Debug, Serialize)]
pub struct AnswerPane {
    pub content: String,
    pub source: String,
    pub confidence: f64,
    pub confidence_label: String,
}

#[derive(Debug, Serialize)]
pub struct QueryPane {
    pub input: String,
    pub loading: bool,
    pub answer: Option<AnswerPane>,
    pub banner: Option<Banner>,
}

/// Everything the page shows, taken from both controllers at one instant.
#[derive(Debug, Serialize)]
pub struct PageView {
    pub upload: UploadPane,
    pub query: QueryPane,
    pub refresh: bool,
}

impl PageView {
    pub fn capture(upload: &UploadController, query: &QueryController) -> Self {
        let status = upload.status();
        let upload = UploadPane {
            loading: status.loading,
            selected_file: upload.selected_file(),
            banner: status.message.map(Banner::from),
        };

        let QueryView {
            input,
            loading,
            result,
            error,
        } = query.view();
        let query = QueryPane {
            input,
            loading,
            answer: result.map(|r| AnswerPane {
                confidence_label: format!("{:.0}%", r.confidence * 100.0),
                content: r.content,
                source: r.source,
                confidence: r.confidence,
            }),
            banner: error.map(|e| Banner::from(StatusMessage::error(e))),
        };

        let refresh = upload.loading || query.loading;
        Self {
            upload,
            query,
            refresh,
        }
    }
}

pub fn templates() -> Result<Environment<'static>> {
    let mut env = Environment::new();
    env.add_template(PAGE_TEMPLATE, include_str!("../templates/page.html"))?;
    Ok(env)
}

pub fn render(env: &Environment<'static>, view: &PageView) -> Result<String> {
    let template = env.get_template(PAGE_TEMPLATE)?;
    Ok(template.render(view)?)
}
