use super::post_controller::{
    create_post, delete_post, edit_post_form, get_post, list_posts, update_post, write_page,
};
use actix_web::web;

/// Post routes. Registered inside the guarded scope, so every handler here
/// runs with a logged-in user.
pub fn post_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/list", web::get().to(list_posts))
        .route("/write", web::get().to(write_page))
        .route("/add", web::post().to(create_post))
        .route("/detail/{id}", web::get().to(get_post))
        .service(
            web::resource("/edit/{id}")
                .route(web::get().to(edit_post_form))
                .route(web::post().to(update_post)),
        )
        .route("/delete/{id}", web::delete().to(delete_post));
}
