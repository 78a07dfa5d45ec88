use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;

use super::validation::{validate_full, validate_partial};
use super::{ApiError, AppState};
use crate::models::Movie;

#[derive(Deserialize)]
pub struct ListQuery {
    pub genre: Option<String>,
}

fn request_origin(headers: &HeaderMap) -> Option<&str> {
    headers.get(header::ORIGIN).and_then(|v| v.to_str().ok())
}

/// An id this process never issued matches nothing; it is not a parse error.
fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::movie_not_found())
}

pub async fn list_movies(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListQuery>,
    request_headers: HeaderMap,
) -> (HeaderMap, Json<Vec<Movie>>) {
    let decision = state.gate.authorize(request_origin(&request_headers));

    let movies = match params.genre.as_deref() {
        Some(tag) => state.store.list_by_genre(tag).await,
        None => state.store.list().await,
    };

    (decision.headers(), Json(movies))
}

pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Movie>, ApiError> {
    let id = parse_id(&id)?;

    state
        .store
        .get(id)
        .await
        .map(Json)
        .ok_or_else(ApiError::movie_not_found)
}

pub async fn create_movie(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Movie>), ApiError> {
    let new_movie = validate_full(&body).map_err(ApiError::Validation)?;
    let movie = state.store.insert(new_movie).await;

    Ok((StatusCode::CREATED, Json(movie)))
}

pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Movie>), ApiError> {
    let patch = validate_partial(&body).map_err(ApiError::Validation)?;
    let id = parse_id(&id)?;
    let movie = state.store.update(id, patch).await?;

    Ok((StatusCode::CREATED, Json(movie)))
}

pub async fn delete_movie(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    request_headers: HeaderMap,
) -> Response {
    let decision = state.gate.authorize(request_origin(&request_headers));

    let outcome = match parse_id(&id) {
        Ok(id) => state.store.delete(id).await.map_err(ApiError::from),
        Err(err) => Err(err),
    };

    let mut response = match outcome {
        Ok(()) => Json(json!({ "message": "Movie deleted" })).into_response(),
        Err(err) => err.into_response(),
    };

    decision.apply(response.headers_mut());
    response
}

/// Always succeeds with an empty body; the gate alone decides which
/// negotiation headers the caller gets to see.
pub async fn preflight(
    State(state): State<Arc<AppState>>,
    request_headers: HeaderMap,
) -> (HeaderMap, StatusCode) {
    let decision = state.gate.preflight(request_origin(&request_headers));
    (decision.headers(), StatusCode::OK)
}

pub async fn not_found_fallback() -> ApiError {
    ApiError::NotFound("Not found".to_string())
}
