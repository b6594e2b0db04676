pub mod app;
pub mod config;
pub mod cycle_log;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod normalizer;
pub mod state;
pub mod ui;

pub use app::router;
pub use config::resolve_bind_addr;
pub use cycle_log::CycleLog;
pub use normalizer::{normalize, normalize_at, Rejection};
pub use state::AppState;
