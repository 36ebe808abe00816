use super::controller::{login_page, login_user, logout_user};
use actix_web::web;

/// Routes reachable without a session.
pub fn user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/login")
            .route(web::get().to(login_page))
            .route(web::post().to(login_user)),
    );
}

/// Session routes that sit behind the login guard.
pub fn session_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/logout")
            .route(web::get().to(logout_user))
            .route(web::post().to(logout_user)),
    );
}
