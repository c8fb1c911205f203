use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use std::sync::Arc;
use tracing::info;

use super::validation::{validate_result_count, validate_search_query};
use super::{
    ApiError, AppState, BookshelfQuery, BookshelfResponse, PerTopicQuery, SearchQuery,
    SearchResponse,
};
use crate::services::bookshelf::split_topics;

/// `GET /search?topic=&max_results=`
pub async fn search_topic(
    State(state): State<Arc<AppState>>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Query(query) = query?;
    let defaults = &state.config().search;

    let topic = query
        .topic
        .unwrap_or_else(|| defaults.default_topic.clone());
    let trimmed = validate_search_query(&topic)?;

    let max_results = validate_result_count(
        "max_results",
        query.max_results.unwrap_or(defaults.default_max_results),
    )?;

    let results = state.search_service().search(trimmed, max_results).await;

    Ok(Json(SearchResponse { topic, results }))
}

/// `GET /bookshelf?topics=a,b&per_topic=`
pub async fn bookshelf(
    State(state): State<Arc<AppState>>,
    query: Result<Query<BookshelfQuery>, QueryRejection>,
) -> Result<Json<BookshelfResponse>, ApiError> {
    let Query(query) = query?;
    let defaults = &state.config().search;

    let topics = split_topics(query.topics.as_deref().unwrap_or(&defaults.default_topics));
    let per_topic = validate_result_count(
        "per_topic",
        query.per_topic.unwrap_or(defaults.default_per_topic),
    )?;

    build_bookshelf(&state, &topics, per_topic).await
}

/// `POST /bookshelf?per_topic=` with a JSON array of topics as the body.
pub async fn bookshelf_from_body(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PerTopicQuery>, QueryRejection>,
    payload: Result<Json<Vec<String>>, JsonRejection>,
) -> Result<Json<BookshelfResponse>, ApiError> {
    let Query(query) = query?;
    let Json(topics) = payload?;

    let per_topic = validate_result_count(
        "per_topic",
        query
            .per_topic
            .unwrap_or(state.config().search.default_per_topic),
    )?;

    build_bookshelf(&state, &topics, per_topic).await
}

async fn build_bookshelf(
    state: &AppState,
    topics: &[String],
    per_topic: usize,
) -> Result<Json<BookshelfResponse>, ApiError> {
    info!(topics = topics.len(), per_topic, "Building bookshelf");

    let resources = state
        .bookshelf_service()
        .resources(topics, per_topic)
        .await;

    Ok(Json(BookshelfResponse { resources }))
}
