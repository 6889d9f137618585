//! Saved deck endpoints: load, save, clear, backup export/import

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use flashcard_core::{categories, export_cards, import_cards};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::AppState;

/// Suggested file name for downloaded backups.
pub const EXPORT_FILE_NAME: &str = "flashy-cards.json";

/// GET /api/cards
pub async fn list(State(state): State<AppState>) -> Result<Json<CardListResponse>> {
    let cards = state.with_store(|store| store.load()).await?;
    Ok(Json(CardListResponse { cards }))
}

/// PUT /api/cards
/// Replaces the whole saved deck
pub async fn save(
    State(state): State<AppState>,
    Json(payload): Json<SaveCardsRequest>,
) -> Result<Json<SaveCardsResponse>> {
    if let Some(card) = payload
        .cards
        .iter()
        .find(|c| c.front.trim().is_empty() || c.back.trim().is_empty())
    {
        return Err(ApiError::BadRequest(format!(
            "card {} needs both a front and a back",
            card.id
        )));
    }

    let cards = payload.cards;
    let saved = cards.len();
    state.with_store(move |store| store.save(&cards)).await??;

    Ok(Json(SaveCardsResponse {
        saved,
        saved_at: Utc::now(),
    }))
}

/// DELETE /api/cards
pub async fn clear(State(state): State<AppState>) -> Result<StatusCode> {
    state.with_store(|store| store.clear()).await??;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/cards/export
pub async fn export(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let cards = state.with_store(|store| store.load()).await?;
    let body = export_cards(&cards, Utc::now())
        .map_err(|e| ApiError::Store(e.into()))?;

    let disposition = format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME);
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

/// POST /api/cards/import
/// Body is a backup document; valid cards replace the saved deck
pub async fn import(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ImportResponse>> {
    let cards = import_cards(&body)?;
    let cards = state
        .with_store(move |store| store.save(&cards).map(|()| cards))
        .await??;

    tracing::info!("Imported {} flashcards", cards.len());

    Ok(Json(ImportResponse {
        imported: cards.len(),
        cards,
    }))
}

/// GET /api/categories
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<CategoriesResponse>> {
    let cards = state.with_store(|store| store.load()).await?;
    Ok(Json(CategoriesResponse {
        categories: categories(&cards),
    }))
}

/// GET /api/storage
pub async fn storage_info(State(state): State<AppState>) -> Result<Json<StorageInfo>> {
    state.with_store(|store| store.info()).await.map(Json)
}
