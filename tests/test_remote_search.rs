use mockito::Matcher;
use recipe_finder::{
    FanOutStats, HtmlRenderer, RecipeSearch, Renderer, SearchError, SearchOutcome, TextRenderer,
};
use serde_json::{json, Value};

fn summaries(ids: &[u32]) -> String {
    let meals: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({
                "idMeal": id.to_string(),
                "strMeal": format!("Meal {id}"),
                "strMealThumb": format!("https://example.com/{id}.jpg")
            })
        })
        .collect();
    json!({ "meals": meals }).to_string()
}

fn detail(id: u32, name: &str, ingredients: &[&str]) -> String {
    let mut meal = json!({
        "idMeal": id.to_string(),
        "strMeal": name,
        "strCategory": "Chicken",
        "strArea": "British",
        "strMealThumb": format!("https://example.com/{id}.jpg"),
        "strInstructions": "Cook everything.",
        "strYoutube": "",
    });
    for slot in 1..=20 {
        let (ingredient, measure) = match ingredients.get(slot - 1) {
            Some(name) => (Value::from(*name), Value::from("1 tbsp")),
            None => (Value::from(""), Value::Null),
        };
        meal[format!("strIngredient{slot}")] = ingredient;
        meal[format!("strMeasure{slot}")] = measure;
    }
    json!({ "meals": [meal] }).to_string()
}

async fn mock_filter(server: &mut mockito::ServerGuard, term: &str, body: String) -> mockito::Mock {
    server
        .mock("GET", "/filter.php")
        .match_query(Matcher::UrlEncoded("i".into(), term.into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

async fn mock_lookup(server: &mut mockito::ServerGuard, id: u32, body: String) -> mockito::Mock {
    server
        .mock("GET", "/lookup.php")
        .match_query(Matcher::UrlEncoded("i".into(), id.to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}

#[tokio::test]
async fn test_single_ingredient_renders_summaries_without_lookup() {
    let mut server = mockito::Server::new_async().await;
    let _filter = mock_filter(&mut server, "chicken", summaries(&[1, 2, 3])).await;
    let lookup = server
        .mock("GET", "/lookup.php")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let outcome = RecipeSearch::builder()
        .ingredients("Chicken")
        .base_url(server.url())
        .run()
        .await
        .unwrap();

    match &outcome {
        SearchOutcome::Summaries { candidates, .. } => {
            let names: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();
            assert_eq!(names, ["Meal 1", "Meal 2", "Meal 3"]);
        }
        other => panic!("Expected summaries, got {other:?}"),
    }
    lookup.assert_async().await;
}

#[tokio::test]
async fn test_multi_ingredient_scores_filters_and_ranks() {
    let mut server = mockito::Server::new_async().await;
    let _filter = mock_filter(&mut server, "chicken", summaries(&[1, 2, 3])).await;
    let _one = mock_lookup(
        &mut server,
        1,
        detail(1, "Plain Chicken", &["Chicken", "Salt"]),
    )
    .await;
    let _two = mock_lookup(
        &mut server,
        2,
        detail(2, "Lemon Chicken", &["Chicken", "Lemon"]),
    )
    .await;
    let _three = mock_lookup(
        &mut server,
        3,
        detail(3, "Garlic Lemon Chicken", &["Chicken", "Garlic Cloves", "Lemon Juice"]),
    )
    .await;

    let outcome = RecipeSearch::builder()
        .ingredients("chicken, garlic, lemon, thyme")
        .base_url(server.url())
        .run()
        .await
        .unwrap();

    match &outcome {
        SearchOutcome::Ranked { recipes, stats, .. } => {
            let names: Vec<&str> = recipes.iter().map(|r| r.detail.name.as_str()).collect();
            assert_eq!(names, ["Garlic Lemon Chicken", "Lemon Chicken"]);
            assert_eq!(recipes[0].match_count, 3);
            assert_eq!(recipes[0].total_requested, 4);
            assert_eq!(recipes[1].match_count, 2);
            assert_eq!(stats.succeeded, 3);
        }
        other => panic!("Expected ranked results, got {other:?}"),
    }

    let text = TextRenderer.render(&outcome);
    assert!(text.contains("3 of 4 ingredients matched"));
    assert!(text.contains("Category: Chicken | Origin: British"));
    assert!(!text.contains("Plain Chicken"));
}

#[tokio::test]
async fn test_partial_detail_failures_still_aggregate() {
    let mut server = mockito::Server::new_async().await;
    let ids: Vec<u32> = (1..=15).collect();
    let _filter = mock_filter(&mut server, "beef", summaries(&ids)).await;

    let mut mocks = Vec::new();
    for id in &ids {
        let mock = match id {
            5 => server
                .mock("GET", "/lookup.php")
                .match_query(Matcher::UrlEncoded("i".into(), "5".into()))
                .with_status(500)
                .create_async()
                .await,
            11 => server
                .mock("GET", "/lookup.php")
                .match_query(Matcher::UrlEncoded("i".into(), "11".into()))
                .with_status(200)
                .with_body("not json")
                .create_async()
                .await,
            _ => mock_lookup(&mut server, *id, detail(*id, &format!("Beef {id}"), &["Beef", "Onion"])).await,
        };
        mocks.push(mock);
    }

    let outcome = RecipeSearch::builder()
        .ingredients("beef, onion")
        .base_url(server.url())
        .run()
        .await
        .unwrap();

    match outcome {
        SearchOutcome::Ranked { recipes, stats, .. } => {
            assert_eq!(recipes.len(), 13);
            assert_eq!(
                stats,
                FanOutStats {
                    requested: 15,
                    succeeded: 13,
                    failed: 2
                }
            );
        }
        other => panic!("Expected ranked results, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fan_out_capped_at_fifteen() {
    let mut server = mockito::Server::new_async().await;
    let ids: Vec<u32> = (1..=25).collect();
    let _filter = mock_filter(&mut server, "rice", summaries(&ids)).await;
    let lookups = server
        .mock("GET", "/lookup.php")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(detail(1, "Fried Rice", &["Rice", "Egg"]))
        .expect(15)
        .create_async()
        .await;

    let outcome = RecipeSearch::builder()
        .ingredients("rice, egg")
        .base_url(server.url())
        .run()
        .await
        .unwrap();

    assert_eq!(outcome.card_count(), 15);
    lookups.assert_async().await;
}

#[tokio::test]
async fn test_single_ingredient_summaries_capped_at_fifteen_in_order() {
    let mut server = mockito::Server::new_async().await;
    let ids: Vec<u32> = (1..=22).collect();
    let _filter = mock_filter(&mut server, "pork", summaries(&ids)).await;
    let lookup = server
        .mock("GET", "/lookup.php")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let outcome = RecipeSearch::builder()
        .ingredients("pork")
        .base_url(server.url())
        .run()
        .await
        .unwrap();

    match &outcome {
        SearchOutcome::Summaries { candidates, .. } => {
            let expected: Vec<String> = (1..=15).map(|id| id.to_string()).collect();
            let got: Vec<String> = candidates.iter().map(|c| c.id.clone()).collect();
            assert_eq!(got, expected);
        }
        other => panic!("Expected summaries, got {other:?}"),
    }
    lookup.assert_async().await;
}

#[tokio::test]
async fn test_primary_empty_is_not_fallback() {
    let mut server = mockito::Server::new_async().await;
    let _filter = mock_filter(&mut server, "unobtainium", r#"{"meals":null}"#.to_string()).await;

    let outcome = RecipeSearch::builder()
        .ingredients("Unobtainium, garlic")
        .base_url(server.url())
        .run()
        .await
        .unwrap();

    assert_eq!(
        outcome,
        SearchOutcome::PrimaryEmpty {
            term: "unobtainium".to_string()
        }
    );
    assert_eq!(
        TextRenderer.render(&outcome),
        "No recipes found with unobtainium.\n"
    );
}

#[tokio::test]
async fn test_no_combined_matches_message() {
    let mut server = mockito::Server::new_async().await;
    let _filter = mock_filter(&mut server, "chicken", summaries(&[1])).await;
    let _one = mock_lookup(&mut server, 1, detail(1, "Chicken Soup", &["Chicken"])).await;

    let outcome = RecipeSearch::builder()
        .ingredients("chicken, saffron")
        .base_url(server.url())
        .run()
        .await
        .unwrap();

    assert_eq!(outcome.card_count(), 0);
    assert_eq!(
        HtmlRenderer.render(&outcome),
        "<p>No recipes found that combine chicken with saffron.</p>\n"
    );
}

#[tokio::test]
async fn test_primary_server_error_falls_back() {
    let mut server = mockito::Server::new_async().await;
    let _filter = server
        .mock("GET", "/filter.php")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;

    let outcome = RecipeSearch::builder()
        .ingredients("tom")
        .base_url(server.url())
        .run()
        .await
        .unwrap();

    assert!(outcome.is_fallback());
}

#[tokio::test]
async fn test_primary_failure_without_fallback_propagates() {
    let result = RecipeSearch::builder()
        .ingredients("chicken")
        .base_url("http://127.0.0.1:1")
        .without_fallback()
        .run()
        .await;

    assert!(matches!(result, Err(SearchError::FetchError(_))));
}

#[tokio::test]
async fn test_identical_searches_give_identical_output() {
    let mut server = mockito::Server::new_async().await;
    let _filter = server
        .mock("GET", "/filter.php")
        .match_query(Matcher::UrlEncoded("i".into(), "beef".into()))
        .with_status(200)
        .with_body(summaries(&[1, 2]))
        .expect(2)
        .create_async()
        .await;
    let _one = mock_lookup(&mut server, 1, detail(1, "Beef Stew", &["Beef", "Onion"])).await;
    let _two = mock_lookup(&mut server, 2, detail(2, "Beef Wellington", &["Beef", "Mushroom"])).await;

    let mut rendered = Vec::new();
    for _ in 0..2 {
        let outcome = RecipeSearch::builder()
            .ingredients("beef, onion, mushroom")
            .base_url(server.url())
            .run()
            .await
            .unwrap();
        rendered.push(TextRenderer.render(&outcome));
    }

    assert_eq!(rendered[0], rendered[1]);
    assert!(rendered[0].contains("Beef Stew"));
    assert!(rendered[0].contains("Beef Wellington"));
}
