//! Answer grading endpoint

use axum::Json;

use crate::models::{GradeRequest, GradeResponse};
use flashcard_core::{grade as grade_answer, highlight};

/// POST /api/grade
pub async fn grade(Json(payload): Json<GradeRequest>) -> Json<GradeResponse> {
    let result = grade_answer(&payload.submitted, &payload.expected);
    let highlight = highlight(&payload.submitted, &payload.expected);

    tracing::debug!(score = result.score, correct = result.is_correct, "Graded answer");

    Json(GradeResponse {
        score: result.score,
        is_correct: result.is_correct,
        submitted_normalized: result.submitted_normalized,
        expected_normalized: result.expected_normalized,
        highlight,
    })
}
