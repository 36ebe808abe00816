#![allow(dead_code)]

use std::sync::Arc;

use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use actix_web::web;
use serde_json::Value;

use todoapp::post::post_repository::MemoryPostRepository;
use todoapp::post::post_service::PostService;
use todoapp::session::{MemorySessionStore, SessionSettings};
use todoapp::user::model::User;
use todoapp::user::repository::MemoryUserRepository;
use todoapp::user::service::AuthService;

pub struct TestState {
    pub auth: web::Data<AuthService>,
    pub posts: web::Data<PostService>,
}

/// Services backed by the in-memory repositories and session store.
pub fn state_with(users: Vec<User>) -> TestState {
    TestState {
        auth: web::Data::new(AuthService::new(
            Arc::new(MemoryUserRepository::with_users(users)),
            Arc::new(MemorySessionStore::default()),
            SessionSettings::default(),
        )),
        posts: web::Data::new(PostService::new(Arc::new(MemoryPostRepository::default()))),
    }
}

pub fn alice_and_bob() -> TestState {
    state_with(vec![User::new("alice", "pw1"), User::new("bob", "pw2")])
}

/// Builds the full application the way `main` does.
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($state.auth.clone())
                .app_data($state.posts.clone())
                .configure(todoapp::router::index::routes)
                .wrap(
                    actix_web::middleware::ErrorHandlers::new().handler(
                        actix_web::http::StatusCode::NOT_FOUND,
                        todoapp::middleware::not_found::not_found,
                    ),
                ),
        )
        .await
    };
}

/// POSTs the login form and returns the response.
macro_rules! login {
    ($app:expr, $username:expr, $password:expr) => {
        actix_web::test::call_service(
            &$app,
            actix_web::test::TestRequest::post()
                .uri("/login")
                .set_form([("username", $username), ("password", $password)])
                .to_request(),
        )
        .await
    };
}

pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|c| c.name() == "sid")
        .map(|c| c.into_owned())
}

pub fn location<B>(res: &ServiceResponse<B>) -> Option<String> {
    res.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

pub fn titles(list: &Value) -> Vec<String> {
    list["posts"]
        .as_array()
        .map(|posts| {
            posts
                .iter()
                .filter_map(|p| p["title"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
