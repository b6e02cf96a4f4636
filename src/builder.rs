use std::sync::Arc;
use std::time::Duration;

use crate::{
    ensure_http_url, pipelines, ImportError, ImportedRecipe, ImporterConfig, PageFetcher,
    RequestFetcher,
};

/// Represents the input source for a recipe
#[derive(Debug, Clone)]
pub enum InputSource {
    /// Fetch the page at a URL
    Url(String),
    /// Use HTML that was already fetched; `url` is recorded as the source
    Html { html: String, url: String },
}

/// Entry point for the builder API
pub struct RecipeImporter;

impl RecipeImporter {
    pub fn builder() -> RecipeImporterBuilder {
        RecipeImporterBuilder::default()
    }
}

/// Builder for configuring and executing recipe imports
#[derive(Default)]
pub struct RecipeImporterBuilder {
    source: Option<InputSource>,
    config: Option<ImporterConfig>,
    timeout: Option<Duration>,
    max_redirects: Option<usize>,
    user_agent: Option<String>,
    extract_error_pages: Option<bool>,
    fetcher: Option<Arc<dyn PageFetcher>>,
}

impl RecipeImporterBuilder {
    /// Set the input source to a URL
    ///
    /// # Example
    /// ```
    /// use crouton_import::RecipeImporter;
    ///
    /// let builder = RecipeImporter::builder()
    ///     .url("https://example.com/recipe");
    /// ```
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.source = Some(InputSource::Url(url.into()));
        self
    }

    /// Set the input source to HTML that was fetched elsewhere
    ///
    /// No request is made; `url` becomes the recipe's source URL unless the
    /// page declares one.
    ///
    /// # Example
    /// ```
    /// use crouton_import::RecipeImporter;
    ///
    /// let builder = RecipeImporter::builder()
    ///     .html("<html><title>Soup</title></html>", "https://example.com/soup");
    /// ```
    pub fn html(mut self, html: impl Into<String>, url: impl Into<String>) -> Self {
        self.source = Some(InputSource::Html {
            html: html.into(),
            url: url.into(),
        });
        self
    }

    /// Start from a loaded configuration instead of the defaults
    pub fn config(mut self, config: ImporterConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Set the total timeout for the HTTP request
    ///
    /// # Example
    /// ```
    /// use crouton_import::RecipeImporter;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeImporter::builder()
    ///     .url("https://example.com/recipe")
    ///     .timeout(Duration::from_secs(30));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    pub fn max_redirects(mut self, max: usize) -> Self {
        self.max_redirects = Some(max);
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Extract from non-empty error-status pages instead of failing with
    /// [`ImportError::OriginHttp`]
    pub fn extract_error_pages(mut self, enabled: bool) -> Self {
        self.extract_error_pages = Some(enabled);
        self
    }

    /// Use a custom fetcher; network settings on the builder are then ignored
    pub fn fetcher(mut self, fetcher: Arc<dyn PageFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    fn resolved_config(&self) -> ImporterConfig {
        let mut config = self.config.clone().unwrap_or_default();
        if let Some(max) = self.max_redirects {
            config.max_redirects = max;
        }
        if let Some(user_agent) = &self.user_agent {
            config.user_agent = user_agent.clone();
        }
        if let Some(enabled) = self.extract_error_pages {
            config.extract_error_pages = enabled;
        }
        config
    }

    /// Run the import
    ///
    /// # Errors
    /// * [`ImportError::BuilderError`] if no source was set
    /// * [`ImportError::InvalidInput`] if the URL is not absolute http(s)
    /// * any fetch fault from the fetcher
    pub async fn build(self) -> Result<ImportedRecipe, ImportError> {
        let config = self.resolved_config();
        let source = self.source.ok_or_else(|| {
            ImportError::BuilderError(
                "No input source specified. Use .url() or .html()".to_string(),
            )
        })?;

        match source {
            InputSource::Html { html, url } => Ok(pipelines::extract_recipe(&html, &url)),
            InputSource::Url(url) => {
                ensure_http_url(&url)?;
                match self.fetcher {
                    Some(fetcher) => pipelines::process(&url, fetcher.as_ref()).await,
                    None => {
                        let timeout = self.timeout.unwrap_or_else(|| config.timeout());
                        let fetcher = RequestFetcher::with_timeout(&config, timeout)?;
                        pipelines::process(&url, &fetcher).await
                    }
                }
            }
        }
    }
}
