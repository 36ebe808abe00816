use std::future::{Ready, ready};

use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{Payload, ServiceRequest, ServiceResponse};
use actix_web::middleware::Next;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest, ResponseError, web};
use log::warn;
use mongodb::bson::oid::ObjectId;

use crate::session::SessionToken;
use crate::user::model::User;
use crate::user::service::AuthService;
use crate::utils::error::CustomError;

/// The logged-in user, as resolved by [`require_login`]. Protected handlers
/// take this as an argument; it never carries the password.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentUser {
    pub id: ObjectId,
    pub username: String,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        CurrentUser {
            id: user.id,
            username: user.username,
        }
    }
}

impl FromRequest for CurrentUser {
    type Error = CustomError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<CurrentUser>()
                .cloned()
                .ok_or_else(|| CustomError::UnauthenticatedError("No session".into())),
        )
    }
}

/// Session token sent by the browser, if any.
pub fn session_token(req: &HttpRequest, auth: &AuthService) -> Option<SessionToken> {
    req.cookie(&auth.settings().cookie_name)
        .map(|cookie| SessionToken::from(cookie.value().to_string()))
}

/// Guard for every protected route: resolve the session cookie to a user
/// and stash it for [`CurrentUser`], or redirect to the login page. A store
/// failure while resolving the session is a 500, not a redirect.
pub async fn require_login<B: MessageBody>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error> {
    let Some(auth) = req.app_data::<web::Data<AuthService>>().cloned() else {
        let res = CustomError::internal("Session service unavailable", "AuthService not registered")
            .error_response();
        return Ok(req.into_response(res).map_into_right_body());
    };

    let user = match session_token(req.request(), &auth) {
        Some(token) => match auth.deserialize(&token).await {
            Ok(user) => user,
            Err(e) => {
                warn!("Session lookup failed: {e}");
                return Ok(req.into_response(e.error_response()).map_into_right_body());
            }
        },
        None => None,
    };

    match user {
        Some(user) => {
            req.extensions_mut().insert(CurrentUser::from(user));
            next.call(req).await.map(ServiceResponse::map_into_left_body)
        }
        None => {
            let res = CustomError::UnauthenticatedError("Login required".into()).error_response();
            Ok(req.into_response(res).map_into_right_body())
        }
    }
}
