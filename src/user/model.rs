use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Account record. The password is stored and compared as plaintext; there
/// is no hashing anywhere in this service.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
    pub password: String,
}

impl User {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        User {
            id: ObjectId::new(),
            username: username.into(),
            password: password.into(),
        }
    }
}
