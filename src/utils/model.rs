use serde::Deserialize;

/// Login form body. Missing fields fall through to a failed lookup rather
/// than a 400, so every bad submission ends in the same redirect.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequests {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}
