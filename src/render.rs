//! Turns a [`SearchOutcome`] into something a person can read.
//!
//! Renderers only borrow the outcome; the same outcome can be rendered any
//! number of times in any format.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::model::{CandidateSummary, LocalMatch, ScoredRecipe, SearchOutcome};
use crate::scoring::ingredient_matches;

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter at least one ingredient.";
pub const FALLBACK_NOTICE: &str =
    "The recipe service is unavailable. Showing recipes from the offline collection.";

/// Presentation side of a search
pub trait Renderer {
    fn render(&self, outcome: &SearchOutcome) -> String;
}

struct CardIngredient {
    text: String,
    matched: bool,
}

/// Format-neutral view of one recipe card
struct Card<'a> {
    name: &'a str,
    thumbnail: Option<&'a str>,
    badge: String,
    category: Option<&'a str>,
    area: Option<&'a str>,
    prep_time: Option<&'a str>,
    ingredients: Vec<CardIngredient>,
    instructions: Option<&'a str>,
    video: Option<&'a str>,
}

enum Document<'a> {
    Message(String),
    Cards {
        notice: Option<&'static str>,
        cards: Vec<Card<'a>>,
    },
    Nothing,
}

fn badge(matched: usize, total: usize) -> String {
    format!("{} of {} ingredients matched", matched, total)
}

fn non_empty(value: &str) -> Option<&str> {
    Some(value).filter(|v| !v.trim().is_empty())
}

fn summary_card(candidate: &CandidateSummary) -> Card<'_> {
    Card {
        name: &candidate.name,
        thumbnail: non_empty(&candidate.thumbnail),
        badge: badge(1, 1),
        category: None,
        area: None,
        prep_time: None,
        ingredients: Vec::new(),
        instructions: None,
        video: None,
    }
}

fn scored_card(recipe: &ScoredRecipe) -> Card<'_> {
    let detail = &recipe.detail;
    Card {
        name: &detail.name,
        thumbnail: non_empty(&detail.thumbnail),
        badge: badge(recipe.match_count, recipe.total_requested),
        category: detail.category.as_deref(),
        area: detail.area.as_deref(),
        prep_time: None,
        ingredients: detail
            .ingredients
            .iter()
            .map(|line| CardIngredient {
                text: format!("{} {}", line.measure, line.name).trim().to_string(),
                matched: ingredient_matches(&line.name, &recipe.matched_terms),
            })
            .collect(),
        instructions: non_empty(&detail.instructions),
        video: detail.video.as_deref(),
    }
}

fn local_card(local: &LocalMatch) -> Card<'static> {
    let recipe = local.recipe;
    Card {
        name: recipe.name,
        thumbnail: recipe.thumbnail,
        badge: badge(local.match_count, local.total_requested),
        category: None,
        area: None,
        prep_time: Some(recipe.prep_time),
        ingredients: recipe
            .ingredients
            .iter()
            .map(|ingredient| CardIngredient {
                text: ingredient.to_string(),
                matched: ingredient_matches(ingredient, &local.matched_terms),
            })
            .collect(),
        instructions: non_empty(recipe.instructions),
        video: None,
    }
}

fn layout(outcome: &SearchOutcome) -> Document<'_> {
    match outcome {
        SearchOutcome::EmptyQuery => Document::Message(EMPTY_QUERY_MESSAGE.to_string()),
        SearchOutcome::PrimaryEmpty { term } => {
            Document::Message(format!("No recipes found with {}.", term))
        }
        SearchOutcome::Summaries { candidates, .. } => Document::Cards {
            notice: None,
            cards: candidates.iter().map(summary_card).collect(),
        },
        SearchOutcome::Ranked { query, recipes, .. } => {
            if recipes.is_empty() {
                Document::Message(format!(
                    "No recipes found that combine {} with {}.",
                    query.primary(),
                    query.secondary().join(", ")
                ))
            } else {
                Document::Cards {
                    notice: None,
                    cards: recipes.iter().map(scored_card).collect(),
                }
            }
        }
        SearchOutcome::Local { query, matches } => {
            if matches.is_empty() {
                Document::Message(format!(
                    "No local recipes found for: {}.",
                    query.terms().join(", ")
                ))
            } else {
                Document::Cards {
                    notice: Some(FALLBACK_NOTICE),
                    cards: matches.iter().map(local_card).collect(),
                }
            }
        }
        SearchOutcome::Superseded => Document::Nothing,
    }
}

/// Plain text cards for terminals
#[derive(Debug, Default, Clone, Copy)]
pub struct TextRenderer;

impl TextRenderer {
    fn card(out: &mut String, card: &Card) {
        out.push_str(&format!("== {} ==\n", card.name));
        out.push_str(&format!("{}\n", card.badge));

        let origin: Vec<String> = [("Category", card.category), ("Origin", card.area)]
            .into_iter()
            .filter_map(|(label, value)| value.map(|v| format!("{}: {}", label, v)))
            .collect();
        if !origin.is_empty() {
            out.push_str(&format!("{}\n", origin.join(" | ")));
        }
        if let Some(prep_time) = card.prep_time {
            out.push_str(&format!("Prep time: {}\n", prep_time));
        }
        if let Some(thumbnail) = card.thumbnail {
            out.push_str(&format!("Image: {}\n", thumbnail));
        }
        if !card.ingredients.is_empty() {
            out.push_str("Ingredients:\n");
            for ingredient in &card.ingredients {
                let mark = if ingredient.matched { "*" } else { "-" };
                out.push_str(&format!("  {} {}\n", mark, ingredient.text));
            }
        }
        if let Some(instructions) = card.instructions {
            out.push_str("Instructions:\n");
            out.push_str(instructions.trim());
            out.push('\n');
        }
        if let Some(video) = card.video {
            out.push_str(&format!("Video: {}\n", video));
        }
    }
}

impl Renderer for TextRenderer {
    fn render(&self, outcome: &SearchOutcome) -> String {
        match layout(outcome) {
            Document::Nothing => String::new(),
            Document::Message(message) => format!("{}\n", message),
            Document::Cards { notice, cards } => {
                let mut out = String::new();
                if let Some(notice) = notice {
                    out.push_str(&format!("{}\n\n", notice));
                }
                for (i, card) in cards.iter().enumerate() {
                    if i > 0 {
                        out.push('\n');
                    }
                    Self::card(&mut out, card);
                }
                out
            }
        }
    }
}

/// HTML fragment with one `recipe-card` div per recipe
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    fn card(out: &mut String, card: &Card) {
        out.push_str("<div class=\"recipe-card\">\n");
        out.push_str(&format!("  <h2>{}</h2>\n", encode_text(card.name)));
        if let Some(thumbnail) = card.thumbnail {
            out.push_str(&format!(
                "  <img src=\"{}\" alt=\"{}\">\n",
                encode_double_quoted_attribute(thumbnail),
                encode_double_quoted_attribute(card.name)
            ));
        }
        out.push_str(&format!(
            "  <p class=\"match-badge\">{}</p>\n",
            encode_text(&card.badge)
        ));
        if let Some(category) = card.category {
            out.push_str(&format!(
                "  <p><strong>Category:</strong> {}</p>\n",
                encode_text(category)
            ));
        }
        if let Some(area) = card.area {
            out.push_str(&format!(
                "  <p><strong>Origin:</strong> {}</p>\n",
                encode_text(area)
            ));
        }
        if let Some(prep_time) = card.prep_time {
            out.push_str(&format!(
                "  <p><strong>Prep time:</strong> {}</p>\n",
                encode_text(prep_time)
            ));
        }
        if !card.ingredients.is_empty() {
            out.push_str("  <ul class=\"ingredients\">\n");
            for ingredient in &card.ingredients {
                if ingredient.matched {
                    out.push_str(&format!(
                        "    <li class=\"matched\">{}</li>\n",
                        encode_text(&ingredient.text)
                    ));
                } else {
                    out.push_str(&format!("    <li>{}</li>\n", encode_text(&ingredient.text)));
                }
            }
            out.push_str("  </ul>\n");
        }
        if let Some(instructions) = card.instructions {
            out.push_str(&format!(
                "  <p class=\"instructions\">{}</p>\n",
                encode_text(instructions.trim())
            ));
        }
        if let Some(video) = card.video {
            out.push_str(&format!(
                "  <a href=\"{}\" target=\"_blank\">Watch Video</a>\n",
                encode_double_quoted_attribute(video)
            ));
        }
        out.push_str("</div>\n");
    }
}

impl Renderer for HtmlRenderer {
    fn render(&self, outcome: &SearchOutcome) -> String {
        match layout(outcome) {
            Document::Nothing => String::new(),
            Document::Message(message) => format!("<p>{}</p>\n", encode_text(&message)),
            Document::Cards { notice, cards } => {
                let mut out = String::new();
                if let Some(notice) = notice {
                    out.push_str(&format!("<p class=\"notice\">{}</p>\n", encode_text(notice)));
                }
                for card in &cards {
                    Self::card(&mut out, card);
                }
                out
            }
        }
    }
}
