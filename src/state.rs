use std::sync::Arc;

use crate::config::Config;
use crate::store::ContentStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ContentStore>,
    pub config: Config,
}
