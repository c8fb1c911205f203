use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use std::sync::Arc;

use super::{ApiError, AppState, DataResponse, PostDetailsResponse};
use crate::models::post::{Post, PostInput};
use crate::services::PostError;

fn post_error(state: &AppState, err: PostError) -> ApiError {
    ApiError::from_post_error(err, state.config().server.legacy_not_found_status)
}

pub async fn list_posts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DataResponse<Vec<Post>>>, ApiError> {
    let posts = state
        .post_service()
        .list()
        .await
        .map_err(|e| post_error(&state, e))?;

    Ok(Json(DataResponse::new(posts)))
}

pub async fn create_post(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PostInput>, JsonRejection>,
) -> Result<(StatusCode, Json<DataResponse<Post>>), ApiError> {
    let Json(input) = payload?;

    let post = state
        .post_service()
        .create(input)
        .await
        .map_err(|e| post_error(&state, e))?;

    Ok((StatusCode::CREATED, Json(DataResponse::new(post))))
}

pub async fn get_post(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<PostDetailsResponse>, ApiError> {
    let Path(id) = id?;

    let post = state
        .post_service()
        .get(id)
        .await
        .map_err(|e| post_error(&state, e))?;

    Ok(Json(PostDetailsResponse { post }))
}

pub async fn update_post(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<PostInput>, JsonRejection>,
) -> Result<Json<DataResponse<Post>>, ApiError> {
    let Path(id) = id?;
    let Json(input) = payload?;

    let post = state
        .post_service()
        .update(id, input)
        .await
        .map_err(|e| post_error(&state, e))?;

    Ok(Json(DataResponse::new(post)))
}

pub async fn delete_post(
    State(state): State<Arc<AppState>>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let Path(id) = id?;

    state
        .post_service()
        .delete(id)
        .await
        .map_err(|e| post_error(&state, e))?;

    Ok(StatusCode::NO_CONTENT)
}
