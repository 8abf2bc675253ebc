pub mod error;
pub mod extract;
pub mod routes;

use axum::Router;
use db::DBService;
use tower_http::trace::TraceLayer;
use utils::sessions::SessionStore;

/// Everything the handlers need, built once in `main` and cloned per
/// request. Tests construct their own with an in-memory pool.
#[derive(Clone)]
pub struct AppState {
    pub db: DBService,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(db: DBService) -> Self {
        Self {
            db,
            sessions: SessionStore::new(),
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api", routes::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
