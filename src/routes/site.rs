use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::content::site::{SiteData, SitePatch};
use crate::error::AppResult;
use crate::extractors::AdminUser;
use crate::routes::SaveReceipt;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/site", get(show).put(save))
}

/// Full merged site copy; this never fails.
async fn show(State(state): State<AppState>) -> Json<SiteData> {
    Json(state.store.load_site())
}

/// Apply a partial admin save over the current data.
async fn save(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(patch): Json<SitePatch>,
) -> AppResult<Json<SaveReceipt>> {
    let stored = state.store.save_site(patch)?;
    Ok(Json(SaveReceipt { stored }))
}
