//! Test fixtures and factory functions for creating test data.

use serde_json::{json, Value};

/// Three cards across two categories.
pub fn geography_cards() -> Value {
    json!([
        { "id": 1, "front": "Paris", "back": "Capital of France", "category": "Geography" },
        { "id": 2, "front": "Resilient", "back": "Able to recover quickly", "category": "Vocabulary" },
        { "id": 3, "front": "Berlin", "back": "Capital of Germany", "category": "Geography" }
    ])
}

/// A backup document as produced by the export endpoint.
pub fn backup_document(cards: Value) -> String {
    json!({
        "version": "2.0",
        "exportDate": "2024-03-01T12:00:00.000Z",
        "cards": cards,
        "appName": "Flashy"
    })
    .to_string()
}

/// Start test request body.
pub fn start_test_request(category: &str, direction: &str, order: &str) -> Value {
    json!({ "category": category, "direction": direction, "order": order })
}

/// Answer request body.
pub fn answer_request(answer: &str) -> Value {
    json!({ "answer": answer })
}
