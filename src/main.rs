use crouton_import::{ensure_http_url, ImportError, ImporterConfig, RecipeImporter};
use log::{debug, error};
use std::env;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Get the URL from command-line arguments
    let Some(url) = env::args().nth(1) else {
        eprintln!("Usage: crouton-import <url>");
        return ExitCode::from(2);
    };

    match run(&url).await {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Import failed: {e}");
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(url: &str) -> Result<String, ImportError> {
    ensure_http_url(url)?;
    let config = ImporterConfig::load()?;
    debug!("{:#?}", config);

    let recipe = RecipeImporter::builder()
        .url(url)
        .config(config)
        .build()
        .await?;

    Ok(serde_json::to_string_pretty(&recipe)?)
}
