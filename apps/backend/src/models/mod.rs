//! API request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Re-export shared types from flashcard-core
pub use flashcard_core::{
    AnswerOutcome, Card, HighlightSegment, StorageInfo, TestDirection, TestOrder, TestReport,
    TestStatus,
};

// === Grading ===

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeRequest {
    pub submitted: String,
    pub expected: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeResponse {
    pub score: f64,
    pub is_correct: bool,
    pub submitted_normalized: String,
    pub expected_normalized: String,
    pub highlight: Vec<HighlightSegment>,
}

// === Cards ===

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardListResponse {
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveCardsRequest {
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveCardsResponse {
    pub saved: usize,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResponse {
    pub imported: usize,
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub categories: Vec<String>,
}

// === Test sessions ===

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartTestRequest {
    /// Category to test, "All" when omitted.
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub direction: TestDirection,
    #[serde(default)]
    pub order: TestOrder,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartTestResponse {
    pub id: Uuid,
    pub status: TestStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitAnswerRequest {
    pub answer: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvanceResponse {
    pub finished: bool,
    pub status: TestStatus,
}
