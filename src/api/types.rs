use serde::{Deserialize, Serialize};

use crate::models::post::Post;
use crate::services::{BookshelfResource, SearchResult};

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub const fn new(data: T) -> Self {
        Self { data }
    }
}

#[derive(Debug, Serialize)]
pub struct PostDetailsResponse {
    #[serde(rename = "post details")]
    pub post: Post,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub topic: String,
    pub results: Vec<SearchResult>,
}

#[derive(Debug, Serialize)]
pub struct BookshelfResponse {
    pub resources: Vec<BookshelfResource>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub topic: Option<String>,
    pub max_results: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct BookshelfQuery {
    pub topics: Option<String>,
    pub per_topic: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct PerTopicQuery {
    pub per_topic: Option<usize>,
}
