use std::sync::Arc;

use mongodb::bson::{DateTime, oid::ObjectId};

use crate::middleware::auth::CurrentUser;
use crate::post::post_model::{Post, PostInput, PostPage};
use crate::post::post_repository::PostRepository;
use crate::utils::error::CustomError;
use crate::utils::pagination::{Page, total_pages};

pub struct PostService {
    repository: Arc<dyn PostRepository>,
}

// Lookups, edits and deletes by id are not scoped to the owner: any
// logged-in user can reach any post whose id they know. Only `list` is
// owner-scoped.
impl PostService {
    pub fn new(repository: Arc<dyn PostRepository>) -> Self {
        PostService { repository }
    }

    /// The user's own, non-deleted posts. A page past the end is empty.
    pub async fn list(&self, user: &CurrentUser, page: Page) -> Result<PostPage, CustomError> {
        // Two separate reads; under concurrent writes the count may not
        // match the page contents exactly.
        let total = self.repository.count_visible(&user.id).await?;
        let posts = self.repository.find_visible(&user.id, page).await?;

        Ok(PostPage {
            posts,
            current_page: page.number(),
            total_pages: total_pages(total),
        })
    }

    pub async fn create(&self, user: &CurrentUser, input: PostInput) -> Result<ObjectId, CustomError> {
        let post = Post {
            id: ObjectId::new(),
            title: input.title,
            content: input.content,
            due_date: input.due_date,
            writer_id: user.id,
            writer_name: user.username.clone(),
            created_at: DateTime::now(),
            is_deleted: false,
        };

        self.repository.insert(&post).await?;
        Ok(post.id)
    }

    /// Soft-deleted posts are still returned here.
    pub async fn get(&self, id: &str) -> Result<Post, CustomError> {
        let id = parse_post_id(id)?;
        self.repository
            .find_by_id(&id)
            .await?
            .ok_or_else(|| CustomError::NotFoundError("Post not found".into()))
    }

    /// Editing also restores a soft-deleted post.
    pub async fn update(&self, id: &str, input: PostInput) -> Result<(), CustomError> {
        let id = parse_post_id(id)?;
        self.repository.overwrite(&id, input, DateTime::now()).await
    }

    pub async fn soft_delete(&self, id: &str) -> Result<(), CustomError> {
        let id = parse_post_id(id)?;
        self.repository.mark_deleted(&id).await
    }
}

/// A malformed id is a server error, not a 400 or 404.
fn parse_post_id(id: &str) -> Result<ObjectId, CustomError> {
    ObjectId::parse_str(id).map_err(|e| CustomError::internal("Invalid post ID", e))
}
