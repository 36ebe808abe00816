use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::{Client, Collection};
use tokio::sync::RwLock;

use crate::user::model::User;
use crate::utils::error::CustomError;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Exact, case-sensitive match.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, CustomError>;
    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, CustomError>;
    async fn insert(&self, user: &User) -> Result<(), CustomError>;
}

pub struct MongoUserRepository {
    collection: Collection<User>,
}

impl MongoUserRepository {
    pub fn new(client: &Client, database: &str) -> Self {
        let collection = client.database(database).collection::<User>("users");
        MongoUserRepository { collection }
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, CustomError> {
        self.collection
            .find_one(doc! { "username": username })
            .await
            .map_err(|e| CustomError::internal("Failed to fetch user", e))
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, CustomError> {
        self.collection
            .find_one(doc! { "_id": id })
            .await
            .map_err(|e| CustomError::internal("Failed to fetch user", e))
    }

    async fn insert(&self, user: &User) -> Result<(), CustomError> {
        self.collection
            .insert_one(user)
            .await
            .map_err(|e| CustomError::internal("Failed to create user", e))?;
        Ok(())
    }
}

/// Process-local user table for tests and local runs without MongoDB.
#[derive(Default)]
pub struct MemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl MemoryUserRepository {
    pub fn with_users(users: Vec<User>) -> Self {
        MemoryUserRepository {
            users: RwLock::new(users),
        }
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, CustomError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: &ObjectId) -> Result<Option<User>, CustomError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == *id).cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), CustomError> {
        self.users.write().await.push(user.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[actix_web::test]
    async fn username_lookup_is_case_sensitive() {
        let repo = MemoryUserRepository::with_users(vec![User::new("alice", "pw1")]);

        assert!(repo.find_by_username("alice").await.unwrap().is_some());
        assert!(repo.find_by_username("Alice").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn inserted_user_is_found_by_id() {
        let repo = MemoryUserRepository::default();
        let bob = User::new("bob", "pw2");
        repo.insert(&bob).await.unwrap();

        assert_eq!(repo.find_by_id(&bob.id).await.unwrap(), Some(bob));
        assert!(repo.find_by_id(&ObjectId::new()).await.unwrap().is_none());
    }
}
