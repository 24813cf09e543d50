mod common;

use common::{Scripted, ScriptedModel, Sent, KYOTO_ITINERARY};
use serde_json::{json, Value};
use trip_planner::tools::{SearchBackend, SearchHit, SearchResults, NO_RESULTS_MARKER};
use trip_planner::{ExchangeStep, Itinerary, ItineraryRequest, Planner};

fn kyoto_request() -> ItineraryRequest {
    ItineraryRequest::new("Plan 2 days in Kyoto with good food")
}

#[tokio::test]
async fn test_direct_answer_without_search() {
    let model = ScriptedModel::new(vec![Scripted::text(KYOTO_ITINERARY)]);
    let planner = Planner::new(model.clone());

    let outcome = planner.plan(&kyoto_request()).await.unwrap();

    assert_eq!(outcome.itinerary.title, "Kyoto 2-Day Trip");
    assert_eq!(outcome.itinerary.days.len(), 2);
    assert_eq!(outcome.tool_rounds, 0);
    assert!(!outcome.used_search());
    assert!(model.tool_results().is_empty());
    assert_eq!(model.messages().len(), 1);
}

#[tokio::test]
async fn test_kyoto_search_round_feeds_results_back() {
    let model = ScriptedModel::new(vec![
        Scripted::search("best restaurants in Kyoto"),
        Scripted::text(KYOTO_ITINERARY),
    ]);
    let planner = Planner::new(model.clone());

    let outcome = planner.plan(&kyoto_request()).await.unwrap();
    assert_eq!(outcome.tool_rounds, 1);
    assert!(outcome.used_search());

    let results = model.tool_results();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].tool_name, "perform_web_search");

    let payload: Value = serde_json::from_str(&results[0].as_string()).unwrap();
    assert_eq!(
        payload,
        json!({
            "results": [
                {"name": "Kikunoi Roan", "rating": 4.5, "type": "Kaiseki"},
                {"name": "Gogyo Ramen", "rating": 4.3, "type": "Ramen"}
            ]
        })
    );
    assert_eq!(
        results[0].to_gemini_part()["functionResponse"]["response"]["content"],
        Value::String(results[0].as_string())
    );
}

#[tokio::test]
async fn test_unrecognized_query_returns_marker() {
    let model = ScriptedModel::new(vec![
        Scripted::search("weather in Reykjavik"),
        Scripted::text(KYOTO_ITINERARY),
    ]);
    let planner = Planner::new(model.clone());

    planner.plan(&kyoto_request()).await.unwrap();

    let payload: Value = serde_json::from_str(&model.tool_results()[0].as_string()).unwrap();
    assert_eq!(payload, json!({ "results": NO_RESULTS_MARKER }));
}

#[tokio::test]
async fn test_prompt_carries_request_and_previous_itinerary() {
    let model = ScriptedModel::new(vec![Scripted::text(KYOTO_ITINERARY)]);
    let planner = Planner::new(model.clone());

    planner.plan(&kyoto_request()).await.unwrap();
    let prompt = &model.messages()[0];
    assert!(prompt.contains("\"Plan 2 days in Kyoto with good food\""));
    assert!(prompt.contains("Previous itinerary: None"));

    let request: ItineraryRequest = serde_json::from_value(json!({
        "prompt": "Add a third day",
        "history": [],
        "currentItinerary": {"title": "Kyoto", "days": []}
    }))
    .unwrap();
    let model = ScriptedModel::new(vec![Scripted::text(KYOTO_ITINERARY)]);
    Planner::new(model.clone()).plan(&request).await.unwrap();
    let prompt = &model.messages()[0];
    assert!(prompt.contains("\"title\":\"Kyoto\""));
    assert!(!prompt.contains("Previous itinerary: None"));
}

#[tokio::test]
async fn test_session_is_offered_the_search_tool() {
    let model = ScriptedModel::new(vec![Scripted::text(KYOTO_ITINERARY)]);
    Planner::new(model.clone())
        .plan(&kyoto_request())
        .await
        .unwrap();

    match &model.sent()[0] {
        Sent::Started(declarations) => {
            assert_eq!(declarations.len(), 1);
            assert_eq!(declarations[0]["name"], "perform_web_search");
            assert_eq!(
                declarations[0]["parameters"]["required"],
                json!(["query"])
            );
        }
        other => panic!("expected session start, got {:?}", other),
    }
}

#[tokio::test]
async fn test_reply_that_is_not_json_fails() {
    let model = ScriptedModel::new(vec![Scripted::text("Sure! Here is your trip to Kyoto.")]);
    let err = Planner::new(model)
        .generate(&kyoto_request())
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "SCHEMA_VALIDATION_ERROR");
}

#[tokio::test]
async fn test_reply_missing_days_fails() {
    let reply = r#"{"title": "Kyoto", "startDate": "2025-04-10", "endDate": "2025-04-11"}"#;
    let model = ScriptedModel::new(vec![Scripted::text(reply)]);
    let err = Planner::new(model)
        .generate(&kyoto_request())
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "SCHEMA_VALIDATION_ERROR");
    assert!(err.to_string().contains("days"));
}

#[tokio::test]
async fn test_second_search_request_fails() {
    let model = ScriptedModel::new(vec![
        Scripted::search("restaurants in Kyoto"),
        Scripted::search("temples in Kyoto"),
        Scripted::text(KYOTO_ITINERARY),
    ]);
    let err = Planner::new(model.clone())
        .generate(&kyoto_request())
        .await
        .unwrap_err();

    assert_eq!(err.error_code(), "TOOL_INVOCATION_ERROR");
    assert_eq!(model.tool_results().len(), 1);
    assert_eq!(model.remaining(), 1);
}

#[tokio::test]
async fn test_transport_failure_propagates() {
    let model = ScriptedModel::new(vec![Scripted::TransportError(
        "HTTP 503 error: overloaded".to_string(),
    )]);
    let err = Planner::new(model)
        .generate(&kyoto_request())
        .await
        .unwrap_err();
    assert!(err.is_transport());
}

#[derive(Debug)]
struct FixedBackend;

impl SearchBackend for FixedBackend {
    fn search(&self, query: &str) -> SearchResults {
        SearchResults::hits(vec![SearchHit {
            name: format!("Result for {}", query),
            rating: 5.0,
            kind: "Test".to_string(),
        }])
    }
}

#[tokio::test]
async fn test_custom_search_backend() {
    let model = ScriptedModel::new(vec![
        Scripted::search("ramen in Osaka"),
        Scripted::text(KYOTO_ITINERARY),
    ]);
    let planner = Planner::new(model.clone()).with_search_backend(FixedBackend);

    let outcome = planner.plan(&kyoto_request()).await.unwrap();
    let payload: Value = serde_json::from_str(&model.tool_results()[0].as_string()).unwrap();
    assert_eq!(payload["results"][0]["name"], "Result for ramen in Osaka");

    let observed = outcome.steps.iter().any(|step| {
        matches!(step, ExchangeStep::Observation { tool_name, .. } if tool_name == "perform_web_search")
    });
    assert!(observed);
}

#[tokio::test]
async fn test_outcome_itinerary_matches_reply() {
    let model = ScriptedModel::new(vec![Scripted::text(KYOTO_ITINERARY)]);
    let itinerary = Planner::new(model)
        .generate(&kyoto_request())
        .await
        .unwrap();
    let expected: Itinerary = serde_json::from_str(KYOTO_ITINERARY).unwrap();
    assert_eq!(itinerary, expected);
}
