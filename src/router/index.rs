use crate::middleware::auth::require_login;
use crate::post::post_index::post_routes;
use crate::user::index::{session_routes, user_routes};
use crate::utils::helpers::html_page;
use actix_web::middleware::from_fn;
use actix_web::{HttpResponse, web};

pub async fn landing_page() -> HttpResponse {
    html_page(include_str!("../../static/index.html"))
}

/// Public routes first; everything else goes through the login guard.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(landing_page));
    cfg.configure(user_routes);
    cfg.service(
        web::scope("")
            .wrap(from_fn(require_login))
            .configure(session_routes)
            .configure(post_routes),
    );
}
