//! Offline recipe table used when the recipe service cannot be reached.

use log::debug;

use crate::model::{LocalMatch, LocalRecipe};
use crate::IngredientQuery;

pub static LOCAL_RECIPES: &[LocalRecipe] = &[
    LocalRecipe {
        name: "Classic Tomato Pasta",
        ingredients: &["pasta", "tomato", "garlic", "olive oil", "basil", "salt"],
        instructions: "Boil the pasta in salted water. Meanwhile soften sliced garlic in olive oil, \
            add chopped tomatoes and simmer for 10 minutes. Toss with the drained pasta and torn basil.",
        prep_time: "25 minutes",
        thumbnail: None,
    },
    LocalRecipe {
        name: "Garlic Butter Chicken",
        ingredients: &["chicken breast", "butter", "garlic", "lemon", "parsley", "salt", "pepper"],
        instructions: "Season the chicken and sear in butter until golden. Add minced garlic and a \
            squeeze of lemon, baste for a minute and finish with chopped parsley.",
        prep_time: "30 minutes",
        thumbnail: None,
    },
    LocalRecipe {
        name: "Vegetable Fried Rice",
        ingredients: &["rice", "egg", "carrot", "peas", "onion", "soy sauce", "vegetable oil"],
        instructions: "Scramble the egg in hot oil and set aside. Fry onion, carrot and peas, add \
            cold cooked rice and soy sauce, then fold the egg back in.",
        prep_time: "20 minutes",
        thumbnail: None,
    },
    LocalRecipe {
        name: "Spinach and Cheese Omelette",
        ingredients: &["egg", "spinach", "cheddar cheese", "milk", "butter", "salt"],
        instructions: "Whisk eggs with milk and salt. Wilt the spinach in butter, pour over the eggs, \
            scatter cheese and fold once set.",
        prep_time: "10 minutes",
        thumbnail: None,
    },
    LocalRecipe {
        name: "Beef and Potato Stew",
        ingredients: &["beef", "potato", "carrot", "onion", "beef stock", "thyme", "tomato paste"],
        instructions: "Brown the beef in batches, soften the onion, stir in tomato paste, then add \
            stock, potatoes, carrots and thyme. Simmer covered for 90 minutes.",
        prep_time: "2 hours",
        thumbnail: None,
    },
    LocalRecipe {
        name: "Banana Pancakes",
        ingredients: &["banana", "flour", "egg", "milk", "baking powder", "sugar"],
        instructions: "Mash the banana, whisk in egg and milk, then fold in flour, sugar and baking \
            powder. Cook spoonfuls on a hot buttered pan until bubbles form, flip once.",
        prep_time: "15 minutes",
        thumbnail: None,
    },
];

/// Match the query against the offline table.
///
/// A term hits a recipe when it is a substring of any of its ingredients.
/// Recipes without hits are left out; the rest are ordered by hit count,
/// highest first, keeping table order for ties.
pub fn match_local(query: &IngredientQuery) -> Vec<LocalMatch> {
    match_in(LOCAL_RECIPES, query)
}

pub(crate) fn match_in(table: &'static [LocalRecipe], query: &IngredientQuery) -> Vec<LocalMatch> {
    let mut matches: Vec<LocalMatch> = table
        .iter()
        .filter_map(|recipe| {
            let matched_terms: Vec<String> = query
                .terms()
                .iter()
                .filter(|term| {
                    recipe
                        .ingredients
                        .iter()
                        .any(|ingredient| ingredient.to_lowercase().contains(term.as_str()))
                })
                .cloned()
                .collect();

            if matched_terms.is_empty() {
                return None;
            }

            Some(LocalMatch {
                recipe,
                match_count: matched_terms.len(),
                total_requested: query.len(),
                matched_terms,
            })
        })
        .collect();

    matches.sort_by(|a, b| b.match_count.cmp(&a.match_count));
    debug!("{} local recipes matched {:?}", matches.len(), query.terms());
    matches
}
