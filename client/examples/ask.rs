use doc_client::{ApiClient, QueryController, SelectedFile, UploadController};
use std::env;

/// Usage: `cargo run --example ask -- [file.pdf] "question"`
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let question = args
        .pop()
        .ok_or_else(|| anyhow::anyhow!("usage: ask [file.pdf] \"question\""))?;

    let api = ApiClient::from_env();

    if let Some(path) = args.first() {
        println!("📄 Uploading {}", path);
        let uploads = UploadController::new(api.clone());
        let file = SelectedFile::from_path(path).await?;
        if let Some(message) = uploads.handle_file_selected(Some(file)).await {
            println!("{} {}", message.title(), message.text);
        }
    }

    println!("\n🔍 {}", question);
    let queries = QueryController::new(api);
    match queries.ask(question).await {
        Some(result) => {
            println!("{}", result.content);
            println!("Source: {} (confidence {:.2})", result.source, result.confidence);
        }
        None => {
            let error = queries.view().error.unwrap_or_default();
            println!("Error! {}", error);
        }
    }

    Ok(())
}
