use std::cmp::Reverse;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::bson::{DateTime, Document, doc, oid::ObjectId};
use mongodb::{Client, Collection};
use tokio::sync::RwLock;

use crate::post::post_model::{Post, PostInput};
use crate::utils::error::CustomError;
use crate::utils::pagination::Page;

/// Storage operations behind [`crate::post::post_service::PostService`].
/// "Visible" always means owned by the writer and not soft-deleted; lookups
/// by id see every post.
#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn count_visible(&self, writer_id: &ObjectId) -> Result<u64, CustomError>;

    /// Newest first (`createdAt` desc, then `_id` desc).
    async fn find_visible(&self, writer_id: &ObjectId, page: Page)
    -> Result<Vec<Post>, CustomError>;

    async fn insert(&self, post: &Post) -> Result<(), CustomError>;

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Post>, CustomError>;

    /// Sets title, content and due date, stamps `createdAt`, and clears
    /// `isDeleted`. No-op when nothing matches.
    async fn overwrite(
        &self,
        id: &ObjectId,
        input: PostInput,
        now: DateTime,
    ) -> Result<(), CustomError>;

    /// Sets `isDeleted`. No-op when nothing matches.
    async fn mark_deleted(&self, id: &ObjectId) -> Result<(), CustomError>;
}

pub fn visible_to(writer_id: &ObjectId) -> Document {
    doc! { "writerId": writer_id, "isDeleted": { "$ne": true } }
}

pub fn newest_first() -> Document {
    doc! { "createdAt": -1, "_id": -1 }
}

pub fn overwrite_update(input: PostInput, now: DateTime) -> Document {
    doc! {
        "$set": {
            "title": input.title,
            "content": input.content,
            "dueDate": input.due_date,
            "createdAt": now,
            "isDeleted": false,
        }
    }
}

pub struct MongoPostRepository {
    collection: Collection<Post>,
}

impl MongoPostRepository {
    pub fn new(client: &Client, database: &str) -> Self {
        let collection = client.database(database).collection::<Post>("posts");
        MongoPostRepository { collection }
    }
}

#[async_trait]
impl PostRepository for MongoPostRepository {
    async fn count_visible(&self, writer_id: &ObjectId) -> Result<u64, CustomError> {
        self.collection
            .count_documents(visible_to(writer_id))
            .await
            .map_err(|e| CustomError::internal("Failed to count posts", e))
    }

    async fn find_visible(
        &self,
        writer_id: &ObjectId,
        page: Page,
    ) -> Result<Vec<Post>, CustomError> {
        let cursor = self
            .collection
            .find(visible_to(writer_id))
            .sort(newest_first())
            .skip(page.skip())
            .limit(page.limit())
            .await
            .map_err(|e| CustomError::internal("Failed to fetch posts", e))?;

        cursor
            .try_collect::<Vec<Post>>()
            .await
            .map_err(|e| CustomError::internal("Failed to fetch posts", e))
    }

    async fn insert(&self, post: &Post) -> Result<(), CustomError> {
        self.collection
            .insert_one(post)
            .await
            .map_err(|e| CustomError::internal("Failed to create post", e))?;
        Ok(())
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Post>, CustomError> {
        self.collection
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| CustomError::internal("Failed to fetch post", e))
    }

    async fn overwrite(
        &self,
        id: &ObjectId,
        input: PostInput,
        now: DateTime,
    ) -> Result<(), CustomError> {
        self.collection
            .update_one(doc! { "_id": id }, overwrite_update(input, now))
            .await
            .map_err(|e| CustomError::internal("Failed to update post", e))?;
        Ok(())
    }

    async fn mark_deleted(&self, id: &ObjectId) -> Result<(), CustomError> {
        self.collection
            .update_one(doc! { "_id": id }, doc! { "$set": { "isDeleted": true } })
            .await
            .map_err(|e| CustomError::internal("Failed to delete post", e))?;
        Ok(())
    }
}

/// Process-local post collection with the same filtering and ordering rules
/// as the MongoDB queries.
#[derive(Default)]
pub struct MemoryPostRepository {
    posts: RwLock<Vec<Post>>,
}

impl MemoryPostRepository {
    fn is_visible_to(post: &Post, writer_id: &ObjectId) -> bool {
        post.writer_id == *writer_id && !post.is_deleted
    }
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn count_visible(&self, writer_id: &ObjectId) -> Result<u64, CustomError> {
        let posts = self.posts.read().await;
        Ok(posts
            .iter()
            .filter(|p| Self::is_visible_to(p, writer_id))
            .count() as u64)
    }

    async fn find_visible(
        &self,
        writer_id: &ObjectId,
        page: Page,
    ) -> Result<Vec<Post>, CustomError> {
        let posts = self.posts.read().await;
        let mut visible: Vec<Post> = posts
            .iter()
            .filter(|p| Self::is_visible_to(p, writer_id))
            .cloned()
            .collect();
        visible.sort_by_key(|p| Reverse((p.created_at, p.id)));

        let skip = usize::try_from(page.skip()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.limit()).unwrap_or(0);
        Ok(visible.into_iter().skip(skip).take(limit).collect())
    }

    async fn insert(&self, post: &Post) -> Result<(), CustomError> {
        self.posts.write().await.push(post.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<Post>, CustomError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|p| p.id == *id).cloned())
    }

    async fn overwrite(
        &self,
        id: &ObjectId,
        input: PostInput,
        now: DateTime,
    ) -> Result<(), CustomError> {
        let mut posts = self.posts.write().await;
        if let Some(post) = posts.iter_mut().find(|p| p.id == *id) {
            post.title = input.title;
            post.content = input.content;
            post.due_date = input.due_date;
            post.created_at = now;
            post.is_deleted = false;
        }
        Ok(())
    }

    async fn mark_deleted(&self, id: &ObjectId) -> Result<(), CustomError> {
        let mut posts = self.posts.write().await;
        if let Some(post) = posts.iter_mut().find(|p| p.id == *id) {
            post.is_deleted = true;
        }
        Ok(())
    }
}
