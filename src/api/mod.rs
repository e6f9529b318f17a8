mod mealdb;

pub use mealdb::{MealDbClient, MAX_INGREDIENT_SLOTS};

use crate::model::{CandidateSummary, RecipeDetail};
use crate::SearchError;
use async_trait::async_trait;

/// Read-only view of a remote recipe service
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Get the source name used in log lines
    fn source_name(&self) -> &str;

    /// List recipes that use the given ingredient.
    ///
    /// An empty list means the service answered but knows no such recipe.
    async fn filter_by_ingredient(
        &self,
        ingredient: &str,
    ) -> Result<Vec<CandidateSummary>, SearchError>;

    /// Fetch the full recipe for an id, `None` when the service has no entry
    async fn lookup_by_id(&self, id: &str) -> Result<Option<RecipeDetail>, SearchError>;
}
