use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/entries", post(handlers::submit_form))
        .route("/cycles", get(handlers::cycles))
        .route("/api/entries", get(handlers::list_entries).post(handlers::create_entry))
        .route("/api/table", get(handlers::get_table))
        .route("/api/defaults", get(handlers::get_defaults))
        .with_state(state)
}
