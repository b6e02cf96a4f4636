//! Import recipes from third-party web pages.
//!
//! A page is fetched once, then read with the first strategy that applies:
//! embedded schema.org `Recipe` JSON-LD, or, failing that, class-name
//! heuristics over the markup. Any page that can be fetched yields a record;
//! only fetch faults are errors.

pub mod builder;
pub mod config;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod model;
pub mod normalizers;
pub mod pipelines;

pub use builder::{InputSource, RecipeImporter, RecipeImporterBuilder};
pub use config::ImporterConfig;
pub use error::{ImportError, NetworkFaultKind};
pub use fetchers::{FetchedPage, PageFetcher, RequestFetcher};
pub use model::{ImportedRecipe, Ingredient, Step};
pub use pipelines::extract_recipe;

use reqwest::Url;

/// Fetch `url` and extract its recipe with the default settings.
///
/// The caller is expected to have checked the URL (see [`ensure_http_url`]).
///
/// # Example
/// ```no_run
/// # async fn run() -> Result<(), crouton_import::ImportError> {
/// let recipe = crouton_import::import_from_url("https://example.com/recipe").await?;
/// println!("{} serves {}", recipe.title, recipe.servings);
/// # Ok(())
/// # }
/// ```
pub async fn import_from_url(url: &str) -> Result<ImportedRecipe, ImportError> {
    import_from_url_with_config(url, &ImporterConfig::default()).await
}

pub async fn import_from_url_with_config(
    url: &str,
    config: &ImporterConfig,
) -> Result<ImportedRecipe, ImportError> {
    let fetcher = RequestFetcher::new(config)?;
    pipelines::process(url, &fetcher).await
}

/// Check that `url` is an absolute http or https URL.
pub fn ensure_http_url(url: &str) -> Result<Url, ImportError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ImportError::InvalidInput("URL required".to_string()));
    }
    let parsed = Url::parse(url).map_err(|_| ImportError::InvalidInput("Invalid URL".to_string()))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        _ => Err(ImportError::InvalidInput(
            "Only HTTP/HTTPS URLs allowed".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_http_url() {
        assert!(ensure_http_url("https://example.com/recipe").is_ok());
        assert!(ensure_http_url("http://localhost:8080/a").is_ok());

        for bad in [
            "",
            "   ",
            "not a url",
            "/relative/path",
            "ftp://example.com/x",
            "file:///etc/passwd",
        ] {
            assert!(
                matches!(ensure_http_url(bad), Err(ImportError::InvalidInput(_))),
                "{bad} should be rejected"
            );
        }
    }
}
