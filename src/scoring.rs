use crate::model::{RecipeDetail, ScoredRecipe};
use crate::IngredientQuery;

/// Score a fetched recipe against the query.
///
/// The primary term always counts, since the recipe came back from the
/// primary filter lookup. A secondary term counts when it is a substring of
/// any ingredient name.
pub fn score(detail: RecipeDetail, query: &IngredientQuery) -> ScoredRecipe {
    let ingredient_names: Vec<String> = detail
        .ingredients
        .iter()
        .map(|line| line.name.to_lowercase())
        .collect();

    let mut matched_terms = vec![query.primary().to_string()];
    matched_terms.extend(
        query
            .secondary()
            .iter()
            .filter(|term| ingredient_names.iter().any(|name| name.contains(term.as_str())))
            .cloned(),
    );

    ScoredRecipe {
        detail,
        match_count: matched_terms.len(),
        total_requested: query.len(),
        matched_terms,
    }
}

/// Filter and order scored recipes for display.
///
/// With secondary terms present, recipes that only matched the primary term are
/// dropped. The rest are ordered by match count, highest first; ties keep
/// their incoming order.
pub fn rank(mut scored: Vec<ScoredRecipe>, query: &IngredientQuery) -> Vec<ScoredRecipe> {
    if query.has_secondary() {
        scored.retain(|recipe| recipe.match_count > 1);
    }
    // sort_by is stable
    scored.sort_by(|a, b| b.match_count.cmp(&a.match_count));
    scored
}

/// Score every settled detail and rank the result
pub fn score_and_rank(details: Vec<RecipeDetail>, query: &IngredientQuery) -> Vec<ScoredRecipe> {
    let scored = details
        .into_iter()
        .map(|detail| score(detail, query))
        .collect();
    rank(scored, query)
}

/// True when an ingredient line mentions any of the requested terms
pub fn ingredient_matches(ingredient: &str, terms: &[String]) -> bool {
    let ingredient = ingredient.to_lowercase();
    terms.iter().any(|term| ingredient.contains(term.as_str()))
}
