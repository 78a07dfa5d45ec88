use axum::{
    Router,
    routing::{delete, get, options, patch, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::store::MovieStore;

mod cors;
mod error;
mod movies;
pub mod validation;

pub use cors::{GateDecision, OriginGate};
pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MovieStore>,

    pub gate: OriginGate,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<MovieStore>, config: &Config) -> Self {
        Self {
            store,
            gate: OriginGate::new(config.server.cors_allowed_origins.clone()),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/movies", get(movies::list_movies))
        .route("/movies", post(movies::create_movie))
        .route("/movies", options(movies::preflight))
        .route("/movies/{id}", get(movies::get_movie))
        .route("/movies/{id}", patch(movies::update_movie))
        .route("/movies/{id}", delete(movies::delete_movie))
        .route("/movies/{id}", options(movies::preflight))
        .fallback(movies::not_found_fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
