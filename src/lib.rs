pub mod config;
pub mod database;
pub mod middleware;
pub mod post;
pub mod router;
pub mod session;
pub mod user;
pub mod utils;
