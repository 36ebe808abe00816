use actix_web::{HttpRequest, HttpResponse, web};
use log::info;

use crate::middleware::auth::{CurrentUser, session_token};
use crate::user::service::{AuthFailure, AuthService};
use crate::utils::error::CustomError;
use crate::utils::helpers::{
    FormOrJson, LIST_PATH, LOGIN_PATH, body_or_default, html_page, redirect,
};
use crate::utils::model::LoginRequests;

pub async fn login_page() -> HttpResponse {
    html_page(include_str!("../../static/login.html"))
}

/// POST /login, form or JSON body. Success sets the session cookie and goes to the list; any
/// credential failure goes back to the form without saying why.
pub async fn login_user(
    auth_service: web::Data<AuthService>,
    login_info: FormOrJson<LoginRequests>,
) -> Result<HttpResponse, CustomError> {
    let login_info: LoginRequests = body_or_default(login_info);
    let username = login_info.username.clone();

    match auth_service.login_fn(login_info).await {
        Ok(token) => Ok(HttpResponse::Found()
            .insert_header((actix_web::http::header::LOCATION, LIST_PATH))
            .cookie(auth_service.settings().cookie(&token))
            .finish()),
        Err(AuthFailure::Store(e)) => Err(e),
        Err(reason) => {
            info!("Login failed for {username:?}: {reason}");
            Ok(redirect(LOGIN_PATH))
        }
    }
}

pub async fn logout_user(
    req: HttpRequest,
    auth_service: web::Data<AuthService>,
    user: CurrentUser,
) -> Result<HttpResponse, CustomError> {
    if let Some(token) = session_token(&req, &auth_service) {
        auth_service.logout(&token).await?;
    }
    info!("User {} logged out", user.username);

    Ok(HttpResponse::Found()
        .insert_header((actix_web::http::header::LOCATION, LOGIN_PATH))
        .cookie(auth_service.settings().removal_cookie())
        .finish())
}
