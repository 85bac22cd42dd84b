use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use crate::content::story::Story;
use crate::error::{AppError, AppResult};
use crate::extractors::AdminUser;
use crate::routes::SaveReceipt;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/stories", get(list).put(save))
        .route("/api/stories/{slug}", get(show))
}

async fn list(State(state): State<AppState>) -> Json<Vec<Story>> {
    Json(state.store.load_stories())
}

async fn show(State(state): State<AppState>, Path(slug): Path<String>) -> AppResult<Json<Story>> {
    state
        .store
        .load_stories()
        .into_iter()
        .find(|story| story.slug == slug)
        .map(Json)
        .ok_or(AppError::NotFound)
}

/// Replace the whole collection; slugs are normalized on the way in.
async fn save(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(stories): Json<Vec<Story>>,
) -> AppResult<Json<SaveReceipt>> {
    let stored = state.store.save_stories(stories)?;
    Ok(Json(SaveReceipt { stored }))
}
