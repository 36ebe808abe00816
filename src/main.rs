use std::io;
use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::middleware::{ErrorHandlers, Logger};
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use env_logger::Env;
use log::{info, warn};

use todoapp::config::AppConfig;
use todoapp::database::{self, RedisService};
use todoapp::middleware::not_found::not_found;
use todoapp::post::post_repository::MongoPostRepository;
use todoapp::post::post_service::PostService;
use todoapp::router::index::routes;
use todoapp::session::{MemorySessionStore, SessionSettings, SessionStore};
use todoapp::user::repository::MongoUserRepository;
use todoapp::user::service::AuthService;

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env();

    let mongo_client = database::connect_to_mongo(&config.mongodb_uri)
        .await
        .map_err(io::Error::other)?;

    let sessions: Arc<dyn SessionStore> = match database::connect_to_redis(&config.redis_url).await
    {
        Ok(client) => Arc::new(RedisService::new(&client)),
        Err(e) => {
            warn!("Redis unavailable ({e}); sessions will be kept in memory");
            Arc::new(MemorySessionStore::default())
        }
    };

    let auth_service = web::Data::new(AuthService::new(
        Arc::new(MongoUserRepository::new(&mongo_client, &config.database_name)),
        sessions,
        SessionSettings::from(&config),
    ));
    let post_service = web::Data::new(PostService::new(Arc::new(MongoPostRepository::new(
        &mongo_client,
        &config.database_name,
    ))));

    if !config.seed_users.is_empty() {
        let created = auth_service
            .seed_users(&config.seed_users)
            .await
            .map_err(io::Error::other)?;
        info!("Seeded {created} user(s)");
    }

    info!("Starting server on http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(auth_service.clone())
            .app_data(post_service.clone())
            .configure(routes)
            .wrap(ErrorHandlers::new().handler(StatusCode::NOT_FOUND, not_found))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    info!("Server has stopped");

    Ok(())
}
