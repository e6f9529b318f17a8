use crate::api::RecipeSource;
use crate::model::{CandidateSummary, IngredientLine, RecipeDetail};
use crate::SearchError;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;

/// The lookup endpoint exposes this many numbered ingredient/measure slots
pub const MAX_INGREDIENT_SLOTS: usize = 20;

#[derive(Debug, Deserialize)]
struct MealsEnvelope<T> {
    // Absent and null both mean "no matches"
    meals: Option<Vec<T>>,
}

#[derive(Debug, Deserialize)]
struct MealSummary {
    #[serde(rename = "idMeal")]
    id: String,
    #[serde(rename = "strMeal")]
    name: String,
    #[serde(rename = "strMealThumb", default)]
    thumbnail: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MealRecord {
    #[serde(rename = "idMeal", default)]
    id: Option<String>,
    #[serde(rename = "strMeal")]
    name: String,
    #[serde(rename = "strCategory", default)]
    category: Option<String>,
    #[serde(rename = "strArea", default)]
    area: Option<String>,
    #[serde(rename = "strMealThumb", default)]
    thumbnail: Option<String>,
    #[serde(rename = "strInstructions", default)]
    instructions: Option<String>,
    #[serde(rename = "strYoutube", default)]
    video: Option<String>,
    // strIngredient1..20 / strMeasure1..20 and anything else we do not model
    #[serde(flatten)]
    slots: HashMap<String, Value>,
}

impl From<MealSummary> for CandidateSummary {
    fn from(meal: MealSummary) -> Self {
        CandidateSummary {
            id: meal.id,
            name: meal.name,
            thumbnail: meal.thumbnail.unwrap_or_default(),
        }
    }
}

impl MealRecord {
    fn into_detail(self, requested_id: &str) -> RecipeDetail {
        RecipeDetail {
            id: non_blank(self.id).unwrap_or_else(|| requested_id.to_string()),
            name: self.name,
            category: non_blank(self.category),
            area: non_blank(self.area),
            thumbnail: self.thumbnail.unwrap_or_default(),
            instructions: self.instructions.unwrap_or_default(),
            video: non_blank(self.video),
            ingredients: extract_ingredients(&self.slots),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn slot_text<'a>(slots: &'a HashMap<String, Value>, key: &str) -> Option<&'a str> {
    slots
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Collect the numbered ingredient slots.
///
/// Every slot is probed on its own: a blank slot is skipped, it does not end
/// the list.
pub(crate) fn extract_ingredients(slots: &HashMap<String, Value>) -> Vec<IngredientLine> {
    (1..=MAX_INGREDIENT_SLOTS)
        .filter_map(|i| {
            let name = slot_text(slots, &format!("strIngredient{i}"))?;
            let measure = slot_text(slots, &format!("strMeasure{i}")).unwrap_or_default();
            Some(IngredientLine {
                name: name.to_string(),
                measure: measure.to_string(),
            })
        })
        .collect()
}

/// HTTP client for TheMealDB-compatible services
pub struct MealDbClient {
    client: Client,
    base_url: String,
}

impl MealDbClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (compatible; RecipeFinder/0.1)")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_meals<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        param: &str,
    ) -> Result<Vec<T>, SearchError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {}?i={}", url, param);

        let body = self
            .client
            .get(&url)
            .query(&[("i", param)])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let envelope: MealsEnvelope<T> = serde_json::from_str(&body)?;
        Ok(envelope.meals.unwrap_or_default())
    }
}

#[async_trait]
impl RecipeSource for MealDbClient {
    fn source_name(&self) -> &str {
        "themealdb"
    }

    async fn filter_by_ingredient(
        &self,
        ingredient: &str,
    ) -> Result<Vec<CandidateSummary>, SearchError> {
        let meals: Vec<MealSummary> = self.get_meals("filter.php", ingredient).await?;
        Ok(meals.into_iter().map(CandidateSummary::from).collect())
    }

    async fn lookup_by_id(&self, id: &str) -> Result<Option<RecipeDetail>, SearchError> {
        let meals: Vec<MealRecord> = self.get_meals("lookup.php", id).await?;
        Ok(meals.into_iter().next().map(|meal| meal.into_detail(id)))
    }
}
