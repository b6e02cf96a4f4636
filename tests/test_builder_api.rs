use async_trait::async_trait;
use crouton_import::{FetchedPage, ImportError, PageFetcher, RecipeImporter};
use std::sync::{Arc, Mutex};

struct RecordingFetcher {
    body: String,
    requested: Mutex<Vec<String>>,
}

#[async_trait]
impl PageFetcher for RecordingFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, ImportError> {
        self.requested.lock().unwrap().push(url.to_string());
        Ok(FetchedPage {
            body: self.body.clone(),
            final_url: url.to_string(),
            status: 200,
        })
    }
}

#[tokio::test]
async fn test_builder_without_source_fails() {
    let result = RecipeImporter::builder().build().await;
    assert!(matches!(result, Err(ImportError::BuilderError(_))));
}

#[tokio::test]
async fn test_builder_rejects_non_http_url() {
    let result = RecipeImporter::builder()
        .url("ftp://example.com/recipe")
        .build()
        .await;
    match result {
        Err(ImportError::InvalidInput(message)) => {
            assert_eq!(message, "Only HTTP/HTTPS URLs allowed")
        }
        other => panic!("expected InvalidInput, got {other:?}"),
    }
}

#[tokio::test]
async fn test_builder_html_source_makes_no_request() {
    let html = r#"
        <html><head><script type="application/ld+json">
            {"@type": "Recipe", "name": "Offline Tart", "recipeYield": "serves 8"}
        </script></head></html>
    "#;
    let recipe = RecipeImporter::builder()
        .html(html, "https://example.com/tart")
        .build()
        .await
        .unwrap();

    assert_eq!(recipe.title, "Offline Tart");
    assert_eq!(recipe.servings, 8);
    assert_eq!(recipe.source_url, "https://example.com/tart");
}

#[tokio::test]
async fn test_builder_uses_custom_fetcher() {
    let fetcher = Arc::new(RecordingFetcher {
        body: "<html><head><title>Plain Bread | Bakery</title></head></html>".to_string(),
        requested: Mutex::new(Vec::new()),
    });

    let recipe = RecipeImporter::builder()
        .url("https://bakery.example/bread")
        .fetcher(fetcher.clone())
        .build()
        .await
        .unwrap();

    assert_eq!(recipe.title, "Plain Bread");
    assert_eq!(
        *fetcher.requested.lock().unwrap(),
        vec!["https://bakery.example/bread".to_string()]
    );
}

#[tokio::test]
async fn test_builder_custom_user_agent_is_sent() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/r")
        .match_header("user-agent", "RecipeBox/3.1")
        .with_status(200)
        .with_body("<html><h1>Header Title</h1></html>")
        .create_async()
        .await;

    let recipe = RecipeImporter::builder()
        .url(format!("{}/r", server.url()))
        .user_agent("RecipeBox/3.1")
        .build()
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(recipe.title, "Header Title");
}
