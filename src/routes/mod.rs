pub mod chat;
pub mod diy;
pub mod health;
pub mod site;
pub mod stories;

use axum::Router;
use serde::Serialize;

use crate::state::AppState;
use crate::store::StorageTier;

/// Where a save landed, echoed back so the admin console can tell the user
/// whether their edit reached the database or only local disk.
#[derive(Debug, Serialize)]
pub struct SaveReceipt {
    pub stored: StorageTier,
}

/// The full API surface.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(site::router())
        .merge(stories::router())
        .merge(diy::router())
        .merge(chat::router())
}
