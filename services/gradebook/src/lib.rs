pub mod config;
pub mod error;
pub mod routes_grades;
pub mod state;
pub mod store;

use std::path::Path;

use axum::{routing::{get, post, put}, Router};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::routes_grades::{delete_grade, get_grades, post_grade, put_grade};
use crate::state::SharedState;

/// JSON API under `/api`, static files from `static_dir` for everything else.
pub fn app(state: SharedState, static_dir: impl AsRef<Path>) -> Router {
    let api = Router::new()
        .route("/grades", get(get_grades))
        .route("/grade", post(post_grade))
        .route("/grade/:id", put(put_grade).delete(delete_grade));

    Router::new()
        .nest("/api", api)
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
