use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::content::diy::DiyProject;
use crate::error::AppResult;
use crate::extractors::AdminUser;
use crate::routes::SaveReceipt;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/diy", get(list).put(save))
}

async fn list(State(state): State<AppState>) -> Json<Vec<DiyProject>> {
    Json(state.store.load_diy_projects())
}

async fn save(
    State(state): State<AppState>,
    _admin: AdminUser,
    Json(projects): Json<Vec<DiyProject>>,
) -> AppResult<Json<SaveReceipt>> {
    let stored = state.store.save_diy_projects(projects)?;
    Ok(Json(SaveReceipt { stored }))
}
