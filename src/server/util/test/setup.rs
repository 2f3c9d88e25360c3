use std::sync::Arc;

use sea_orm::Database;
use tower_sessions::{MemoryStore, Session};

use crate::server::{model::app::AppState, util::cache::ResponseCache};

static TEST_BASE_URL: &str = "http://localhost:3000";

pub struct TestSetup {
    pub state: AppState,
    pub session: Session,
}

// Returns [`AppState`] & [`Session`] used across integration tests
pub async fn test_setup() -> TestSetup {
    let store = Arc::new(MemoryStore::default());
    let session = Session::new(None, store, None);

    let db = Database::connect("sqlite::memory:").await.unwrap();

    let state = AppState {
        db,
        cache: Arc::new(ResponseCache::new()),
        base_url: TEST_BASE_URL.to_string(),
    };

    TestSetup { state, session }
}
