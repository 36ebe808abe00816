use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::json;

use crate::middleware::auth::CurrentUser;
use crate::post::post_model::{PostInput, PostResponse};
use crate::post::post_service::PostService;
use crate::utils::error::CustomError;
use crate::utils::helpers::{
    FormOrJson, LIST_PATH, body_or_default, html_page, redirect, success_body,
};
use crate::utils::pagination::Page;

/// Post bodies arrive as HTML form posts or as JSON; no body at all means
/// every field is absent.
type PostBody = FormOrJson<PostInput>;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<String>,
}

/// GET /list?page=N
pub async fn list_posts(
    post_service: web::Data<PostService>,
    user: CurrentUser,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse, CustomError> {
    let page = Page::parse(query.page.as_deref());
    let result = post_service.list(&user, page).await?;

    let posts: Vec<PostResponse> = result.posts.into_iter().map(PostResponse::from).collect();

    Ok(HttpResponse::Ok().json(success_body(
        "Posts fetched successfully",
        json!({
            "user": user.username,
            "posts": posts,
            "currentPage": result.current_page,
            "totalPages": result.total_pages,
        }),
    )))
}

pub async fn write_page() -> HttpResponse {
    html_page(include_str!("../../static/write.html"))
}

/// POST /add
pub async fn create_post(
    post_service: web::Data<PostService>,
    user: CurrentUser,
    body: PostBody,
) -> Result<HttpResponse, CustomError> {
    let id = post_service.create(&user, body_or_default(body)).await?;
    log::debug!("User {} created post {}", user.username, id.to_hex());

    Ok(redirect(LIST_PATH))
}

/// GET /detail/{id}
pub async fn get_post(
    post_id: web::Path<String>,
    post_service: web::Data<PostService>,
    user: CurrentUser,
) -> Result<HttpResponse, CustomError> {
    let post = post_service.get(&post_id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(success_body(
        "Post fetched successfully",
        json!({ "user": user.username, "data": PostResponse::from(post) }),
    )))
}

/// GET /edit/{id}: the current values, for pre-filling the edit form.
pub async fn edit_post_form(
    post_id: web::Path<String>,
    post_service: web::Data<PostService>,
    user: CurrentUser,
) -> Result<HttpResponse, CustomError> {
    let post = post_service.get(&post_id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(success_body(
        "Post ready for editing",
        json!({ "user": user.username, "data": PostResponse::from(post) }),
    )))
}

/// POST /edit/{id}
pub async fn update_post(
    post_id: web::Path<String>,
    post_service: web::Data<PostService>,
    user: CurrentUser,
    body: PostBody,
) -> Result<HttpResponse, CustomError> {
    let post_id = post_id.into_inner();
    post_service.update(&post_id, body_or_default(body)).await?;
    log::debug!("User {} edited post {}", user.username, post_id);

    Ok(redirect(LIST_PATH))
}

/// DELETE /delete/{id}. Acknowledges whether or not a post matched.
pub async fn delete_post(
    post_id: web::Path<String>,
    post_service: web::Data<PostService>,
    user: CurrentUser,
) -> Result<HttpResponse, CustomError> {
    let post_id = post_id.into_inner();
    post_service.soft_delete(&post_id).await?;
    log::debug!("User {} deleted post {}", user.username, post_id);

    Ok(HttpResponse::Ok().json(success_body("Post deleted successfully", json!({}))))
}
