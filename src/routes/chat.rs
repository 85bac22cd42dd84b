use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;

use crate::content::chat::{ChatMessage, NewMessage};
use crate::error::{AppError, AppResult};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/chat", get(list).post(post_message))
        .route("/api/chat/{id}/reactions", post(react))
}

#[derive(Deserialize)]
struct ListQuery {
    story: Option<String>,
}

/// Messages for one story, or every story's messages grouped by slug.
async fn list(State(state): State<AppState>, Query(query): Query<ListQuery>) -> Response {
    match query.story {
        Some(slug) => Json(state.store.messages_for(&slug)).into_response(),
        None => Json(state.store.all_messages()).into_response(),
    }
}

async fn post_message(
    State(state): State<AppState>,
    Json(input): Json<NewMessage>,
) -> AppResult<Json<ChatMessage>> {
    if input.message.trim().is_empty() {
        return Err(AppError::BadRequest("message is required".into()));
    }
    if input.story_slug.trim().is_empty() {
        return Err(AppError::BadRequest("story_slug is required".into()));
    }
    let message = state.store.post_message(input)?;
    Ok(Json(message))
}

#[derive(Deserialize)]
struct ReactionInput {
    emoji: String,
}

async fn react(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<ReactionInput>,
) -> AppResult<Json<ChatMessage>> {
    if input.emoji.is_empty() {
        return Err(AppError::BadRequest("emoji is required".into()));
    }
    let message = state.store.add_reaction(&id, &input.emoji)?;
    Ok(Json(message))
}
