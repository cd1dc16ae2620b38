pub mod health;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /feedbacks         raw row listing (optional marca/versao/formato filters)
/// /feedbacks/{id}    single row
/// /report            full derived report (aggregates + option lists)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/feedbacks", get(handlers::feedbacks::list_feedbacks))
        .route("/feedbacks/{id}", get(handlers::feedbacks::get_feedback))
        .route("/report", get(handlers::report::feedback_report))
}
