use serde::{Deserialize, Serialize};

use crate::entities::post;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub published: bool,
}

impl From<post::Model> for Post {
    fn from(m: post::Model) -> Self {
        Self {
            id: m.id,
            title: m.title,
            content: m.content,
            published: m.published,
        }
    }
}

/// Request body for creating or replacing a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostInput {
    #[serde(default = "default_title")]
    pub title: String,
    pub content: String,
    #[serde(default = "default_true")]
    pub published: bool,
}

fn default_title() -> String {
    "Jane Doe".to_string()
}

fn default_true() -> bool {
    true
}
