use serde::Serialize;

use crate::IngredientQuery;

/// Minimal record returned by the ingredient filter lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CandidateSummary {
    pub id: String,
    pub name: String,
    pub thumbnail: String,
}

/// One ingredient slot of a recipe detail
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngredientLine {
    pub name: String,
    /// Empty when the service gave no measure for this slot
    pub measure: String,
}

/// Full recipe as returned by the lookup-by-id endpoint
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct RecipeDetail {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    /// Cuisine of origin
    pub area: Option<String>,
    pub thumbnail: String,
    pub instructions: String,
    pub video: Option<String>,
    pub ingredients: Vec<IngredientLine>,
}

/// A recipe detail together with how well it matched the query
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoredRecipe {
    pub detail: RecipeDetail,
    /// Number of requested terms found, the primary term always included
    pub match_count: usize,
    pub total_requested: usize,
    /// Requested terms that hit, in query order
    pub matched_terms: Vec<String>,
}

/// Entry of the built-in offline recipe table
#[derive(Debug, PartialEq, Eq)]
pub struct LocalRecipe {
    pub name: &'static str,
    pub ingredients: &'static [&'static str],
    pub instructions: &'static str,
    pub prep_time: &'static str,
    pub thumbnail: Option<&'static str>,
}

/// A local recipe that matched at least one requested term
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalMatch {
    pub recipe: &'static LocalRecipe,
    pub match_count: usize,
    pub total_requested: usize,
    pub matched_terms: Vec<String>,
}

/// What the detail fan-out observed once every fetch settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FanOutStats {
    pub requested: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Terminal state of a single search
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// The input held no ingredient terms
    EmptyQuery,
    /// The service is reachable but knows no recipe with the primary term
    PrimaryEmpty { term: String },
    /// Single-term search: capped candidates in service order, no scoring
    Summaries {
        query: IngredientQuery,
        candidates: Vec<CandidateSummary>,
    },
    /// Multi-term search: ranked recipes, empty when nothing combined
    Ranked {
        query: IngredientQuery,
        recipes: Vec<ScoredRecipe>,
        stats: FanOutStats,
    },
    /// Results from the offline table after the primary lookup failed
    Local {
        query: IngredientQuery,
        matches: Vec<LocalMatch>,
    },
    /// A newer search started before this one settled
    Superseded,
}

impl SearchOutcome {
    /// True when the outcome came from the offline table
    pub fn is_fallback(&self) -> bool {
        matches!(self, SearchOutcome::Local { .. })
    }

    /// Number of cards a renderer will show
    pub fn card_count(&self) -> usize {
        match self {
            SearchOutcome::Summaries { candidates, .. } => candidates.len(),
            SearchOutcome::Ranked { recipes, .. } => recipes.len(),
            SearchOutcome::Local { matches, .. } => matches.len(),
            _ => 0,
        }
    }
}
