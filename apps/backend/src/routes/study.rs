//! Test session endpoints

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use flashcard_core::types::ALL_CATEGORIES;
use flashcard_core::TestSession;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

fn unknown_session(id: Uuid) -> ApiError {
    ApiError::NotFound(format!("test session {}", id))
}

fn parse_start_request(body: &[u8]) -> Result<StartTestRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(StartTestRequest::default());
    }

    Json::<StartTestRequest>::from_bytes(body)
        .map(|Json(payload)| payload)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// POST /api/tests
/// An empty body starts a sequential test over every card
pub async fn start(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<StartTestResponse>)> {
    let payload = parse_start_request(&body)?;
    let category = payload
        .category
        .unwrap_or_else(|| ALL_CATEGORIES.to_string());
    let cards = state.with_store(|store| store.load()).await?;

    let session = {
        let mut rng = rand::thread_rng();
        TestSession::new(&cards, &category, payload.direction, payload.order, &mut rng)?
    };
    let status = session.status();
    let id = state.sessions.insert(session).await;

    tracing::info!("Started test {} over {} cards in {}", id, status.total, category);

    Ok((StatusCode::CREATED, Json(StartTestResponse { id, status })))
}

/// GET /api/tests/:id
pub async fn status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TestStatus>> {
    state
        .sessions
        .read(id, TestSession::status)
        .await
        .map(Json)
        .ok_or_else(|| unknown_session(id))
}

/// POST /api/tests/:id/answer
pub async fn answer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SubmitAnswerRequest>,
) -> Result<Json<AnswerOutcome>> {
    let outcome = state
        .sessions
        .update(id, |session| session.submit(&payload.answer))
        .await
        .ok_or_else(|| unknown_session(id))??;

    tracing::debug!(
        "Test {} answer graded {} (correct: {})",
        id,
        outcome.grade.score,
        outcome.grade.is_correct
    );

    Ok(Json(outcome))
}

/// POST /api/tests/:id/next
pub async fn next(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AdvanceResponse>> {
    let response = state
        .sessions
        .update(id, |session| {
            session.advance().map(|finished| AdvanceResponse {
                finished,
                status: session.status(),
            })
        })
        .await
        .ok_or_else(|| unknown_session(id))??;

    if response.finished {
        tracing::info!(
            "Test {} finished: {}/{} correct",
            id,
            response.status.tally.correct,
            response.status.tally.total
        );
    }

    Ok(Json(response))
}

/// GET /api/tests/:id/report
pub async fn report(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TestReport>> {
    state
        .sessions
        .read(id, TestSession::report)
        .await
        .map(Json)
        .ok_or_else(|| unknown_session(id))
}

/// DELETE /api/tests/:id
pub async fn end(State(state): State<AppState>, Path(id): Path<Uuid>) -> Result<StatusCode> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(unknown_session(id))
    }
}
