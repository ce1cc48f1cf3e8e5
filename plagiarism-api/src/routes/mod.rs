//! API route definitions

mod analyze;
mod health;

use axum::Router;
use crate::AppState;

/// Create all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(analyze::routes())
        .merge(health::routes())
}
