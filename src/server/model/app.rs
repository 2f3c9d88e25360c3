use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::util::cache::ResponseCache;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub cache: Arc<ResponseCache>,
    pub base_url: String,
}
