pub mod api;
pub mod builder;
pub mod config;
pub mod error;
pub mod fallback;
pub mod model;
pub mod query;
pub mod render;
pub mod scoring;
pub mod search;

// Re-export commonly used types
pub use api::{MealDbClient, RecipeSource};
pub use builder::{RecipeSearch, RecipeSearchBuilder};
pub use config::FinderConfig;
pub use error::SearchError;
pub use model::{
    CandidateSummary, FanOutStats, IngredientLine, LocalMatch, LocalRecipe, RecipeDetail,
    ScoredRecipe, SearchOutcome,
};
pub use query::IngredientQuery;
pub use render::{HtmlRenderer, Renderer, TextRenderer};
pub use search::{RecipeFinder, SearchSession};

/// Search the default recipe service with a comma separated ingredient list
///
/// # Arguments
/// * `ingredients` - Raw user input, e.g. `"tomato, garlic, basil"`
///
/// # Returns
/// The terminal state of the search, ready to hand to a [`Renderer`]
pub async fn find_recipes(ingredients: &str) -> Result<SearchOutcome, SearchError> {
    RecipeSearch::builder().ingredients(ingredients).run().await
}

/// Search and render the result as plain text
pub async fn find_recipes_text(ingredients: &str) -> Result<String, SearchError> {
    let outcome = find_recipes(ingredients).await?;
    Ok(TextRenderer.render(&outcome))
}
