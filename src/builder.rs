use std::sync::Arc;
use std::time::Duration;

use crate::api::{MealDbClient, RecipeSource};
use crate::{FinderConfig, RecipeFinder, SearchError, SearchOutcome};

/// Builder for configuring and running a single recipe search
#[derive(Default)]
pub struct RecipeSearchBuilder {
    ingredients: Option<String>,
    config: Option<FinderConfig>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    max_candidates: Option<usize>,
    fallback_enabled: Option<bool>,
    source: Option<Arc<dyn RecipeSource>>,
}

impl RecipeSearchBuilder {
    /// Set the comma separated ingredient list
    ///
    /// # Example
    /// ```
    /// use recipe_finder::RecipeSearch;
    ///
    /// let builder = RecipeSearch::builder()
    ///     .ingredients("tomato, garlic, basil");
    /// ```
    pub fn ingredients(mut self, ingredients: impl Into<String>) -> Self {
        self.ingredients = Some(ingredients.into());
        self
    }

    /// Start from an already loaded configuration instead of the defaults
    pub fn config(mut self, config: FinderConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Point the search at another TheMealDB-compatible service
    ///
    /// # Example
    /// ```
    /// use recipe_finder::RecipeSearch;
    ///
    /// let builder = RecipeSearch::builder()
    ///     .ingredients("chicken")
    ///     .base_url("http://localhost:8080/api/json/v1/1");
    /// ```
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set a timeout for HTTP requests
    ///
    /// # Example
    /// ```
    /// use recipe_finder::RecipeSearch;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeSearch::builder()
    ///     .ingredients("chicken")
    ///     .timeout(Duration::from_secs(5));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Cap how many candidates get a detail fetch
    pub fn max_candidates(mut self, max: usize) -> Self {
        self.max_candidates = Some(max);
        self
    }

    /// Report a failed primary lookup as an error instead of searching the
    /// offline table
    pub fn without_fallback(mut self) -> Self {
        self.fallback_enabled = Some(false);
        self
    }

    /// Use a custom recipe source; `base_url` and `timeout` are then ignored
    pub fn source(mut self, source: Arc<dyn RecipeSource>) -> Self {
        self.source = Some(source);
        self
    }

    fn resolved_config(&self) -> FinderConfig {
        let mut config = self.config.clone().unwrap_or_default();
        if let Some(url) = &self.base_url {
            config.api_base_url = url.clone();
        }
        if let Some(max) = self.max_candidates {
            config.max_candidates = max;
        }
        if let Some(enabled) = self.fallback_enabled {
            config.fallback_enabled = enabled;
        }
        config
    }

    /// Build the finder and run the search
    ///
    /// # Errors
    /// Returns `SearchError` if:
    /// - No ingredients were specified
    /// - `max_candidates` is zero
    /// - The HTTP client cannot be created
    /// - The primary lookup fails while fallback is disabled
    ///
    /// # Example
    /// ```no_run
    /// # use recipe_finder::RecipeSearch;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let outcome = RecipeSearch::builder()
    ///     .ingredients("tomato, basil")
    ///     .run()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run(self) -> Result<SearchOutcome, SearchError> {
        let ingredients = self.ingredients.clone().ok_or_else(|| {
            SearchError::BuilderError(
                "No ingredients specified. Use .ingredients()".to_string(),
            )
        })?;

        let config = self.resolved_config();
        if config.max_candidates == 0 {
            return Err(SearchError::BuilderError(
                "max_candidates must be at least 1".to_string(),
            ));
        }

        let source: Arc<dyn RecipeSource> = match self.source {
            Some(source) => source,
            None => {
                let timeout = self.timeout.unwrap_or_else(|| config.timeout_duration());
                Arc::new(MealDbClient::new(&config.api_base_url, timeout)?)
            }
        };
        let finder = RecipeFinder::with_source(source, &config);

        finder.search_text(&ingredients).await
    }
}

/// Main entry point for the builder API
pub struct RecipeSearch;

impl RecipeSearch {
    /// Creates a new builder for a recipe search
    ///
    /// # Example
    /// ```
    /// use recipe_finder::RecipeSearch;
    ///
    /// let builder = RecipeSearch::builder();
    /// ```
    pub fn builder() -> RecipeSearchBuilder {
        RecipeSearchBuilder::default()
    }
}
