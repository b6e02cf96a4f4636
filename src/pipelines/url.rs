use crate::error::ImportError;
use crate::extractors::{Extractor, HtmlClassExtractor, JsonLdExtractor, ParsingContext};
use crate::fetchers::PageFetcher;
use crate::model::ImportedRecipe;
use log::{debug, info};

/// Import the recipe at `url`
///
/// This pipeline:
/// 1. Fetches the page through `fetcher` (faults propagate unchanged)
/// 2. Tries structured-data extractors in order, first match wins
/// 3. Falls back to class-name heuristics, which always produce a record
///
/// The source URL of the result is `url`, not the post-redirect URL, unless
/// the page declares its own.
pub async fn process(url: &str, fetcher: &dyn PageFetcher) -> Result<ImportedRecipe, ImportError> {
    let page = fetcher.fetch(url).await?;
    debug!(
        "Fetched {} (HTTP {}, final URL {})",
        url, page.status, page.final_url
    );
    Ok(extract_recipe(&page.body, url))
}

/// Extract a recipe from an already-fetched document.
pub fn extract_recipe(html: &str, url: &str) -> ImportedRecipe {
    let context = ParsingContext::new(html, url);

    let extractors: Vec<Box<dyn Extractor>> = vec![Box::new(JsonLdExtractor)];
    for extractor in extractors {
        if let Some(recipe) = extractor.parse(&context) {
            info!("Imported \"{}\" from structured data", recipe.title);
            return recipe;
        }
    }

    let recipe = HtmlClassExtractor.extract(&context);
    info!(
        "Imported \"{}\" from page markup ({} ingredients, {} steps)",
        recipe.title,
        recipe.ingredients.len(),
        recipe.steps.len()
    );
    recipe
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetchers::FetchedPage;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticFetcher {
        body: &'static str,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl PageFetcher for StaticFetcher {
        async fn fetch(&self, url: &str) -> Result<FetchedPage, ImportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(FetchedPage {
                body: self.body.to_string(),
                final_url: format!("{url}?redirected"),
                status: 200,
            })
        }
    }

    struct FailingFetcher;

    #[async_trait]
    impl PageFetcher for FailingFetcher {
        async fn fetch(&self, _url: &str) -> Result<FetchedPage, ImportError> {
            Err(ImportError::OriginHttp { status: 404 })
        }
    }

    const MIXED_PAGE: &str = r#"
        <html><head>
            <title>Ignored | Site</title>
            <script type="application/ld+json">
                {"@type": "Recipe", "name": "Structured Pie", "recipeIngredient": ["1 cup sugar"]}
            </script>
        </head><body>
            <li class="ingredient">3 apples from the markup</li>
            <p class="instructions">Bake it the heuristic way, for an hour.</p>
        </body></html>
    "#;

    #[tokio::test]
    async fn test_structured_data_wins_over_markup() {
        let fetcher = StaticFetcher {
            body: MIXED_PAGE,
            calls: AtomicUsize::new(0),
        };
        let recipe = process("https://example.com/pie", &fetcher).await.unwrap();

        assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
        assert_eq!(recipe.title, "Structured Pie");
        assert_eq!(recipe.ingredients.len(), 1);
        assert_eq!(recipe.ingredients[0].name, "sugar");
        assert!(recipe.steps.is_empty());
        assert_eq!(recipe.source_url, "https://example.com/pie");
    }

    #[tokio::test]
    async fn test_fetch_fault_halts_pipeline() {
        let err = process("https://example.com/missing", &FailingFetcher)
            .await
            .unwrap_err();
        assert_eq!(err.origin_status(), Some(404));
    }

    #[test]
    fn test_malformed_only_falls_back_to_markup() {
        let html = r#"
            <html><head>
                <title>Fallback Stew - Site</title>
                <script type="application/ld+json">{"@type": "Recipe", "name": </script>
            </head><body>
                <li class="ingredient">1 onion</li>
            </body></html>
        "#;
        let recipe = extract_recipe(html, "https://example.com/stew");
        assert_eq!(recipe.title, "Fallback Stew");
        assert_eq!(recipe.ingredients[0].name, "1 onion");
        assert_eq!(recipe.ingredients[0].amount, None);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let first = serde_json::to_string(&extract_recipe(MIXED_PAGE, "https://example.com/pie"));
        let second = serde_json::to_string(&extract_recipe(MIXED_PAGE, "https://example.com/pie"));
        assert_eq!(first.unwrap(), second.unwrap());
    }
}
