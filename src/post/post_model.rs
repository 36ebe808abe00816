use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// A stored post. Field names on disk are camelCase (`writerId`,
/// `isDeleted`, ...). Title, content and due date are whatever the client
/// sent, including nothing at all.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: Option<String>,
    pub content: Option<String>,
    pub due_date: Option<String>,
    pub writer_id: ObjectId,
    pub writer_name: String,
    pub created_at: DateTime,
    #[serde(default)]
    pub is_deleted: bool,
}

/// Body of `POST /add` and `POST /edit/{id}`.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostInput {
    pub title: Option<String>,
    pub content: Option<String>,
    pub due_date: Option<String>,
}

/// JSON view of a post.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub title: Option<String>,
    pub content: Option<String>,
    pub due_date: Option<String>,
    pub writer_id: String,
    pub writer_name: String,
    pub created_at: String,
    pub is_deleted: bool,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        PostResponse {
            id: post.id.to_hex(),
            title: post.title,
            content: post.content,
            due_date: post.due_date,
            writer_id: post.writer_id.to_hex(),
            writer_name: post.writer_name,
            created_at: post
                .created_at
                .try_to_rfc3339_string()
                .unwrap_or_else(|_| post.created_at.timestamp_millis().to_string()),
            is_deleted: post.is_deleted,
        }
    }
}

/// One page of a user's visible posts.
#[derive(Debug, Clone, PartialEq)]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub current_page: u64,
    pub total_pages: u64,
}
