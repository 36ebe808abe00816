use actix_web::web;

/// Where the guard and failed logins send the browser.
pub const LOGIN_PATH: &str = "/login";

pub const LIST_PATH: &str = "/list";

pub fn service_name() -> String {
    std::env::var("SERVICE_NAME").unwrap_or_else(|_| "todoapp".to_string())
}

/// Builds the `{success, message, httpStatusCode, service}` envelope used by
/// every JSON response, with `extra` merged in at the top level.
pub fn success_body(message: &str, extra: serde_json::Value) -> serde_json::Value {
    let mut body = serde_json::json!({
        "success": true,
        "message": message,
        "httpStatusCode": 200,
        "service": service_name(),
    });

    if let (Some(target), serde_json::Value::Object(fields)) = (body.as_object_mut(), extra) {
        target.extend(fields);
    }

    body
}

pub fn redirect(location: &str) -> actix_web::HttpResponse {
    actix_web::HttpResponse::Found()
        .insert_header((actix_web::http::header::LOCATION, location))
        .finish()
}

pub fn html_page(body: &'static str) -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok()
        .content_type(actix_web::http::header::ContentType::html())
        .body(body)
}

/// A body sent as an HTML form or as JSON. Wrapped in `Option`, a missing or
/// unparsable body extracts as `None` instead of rejecting the request.
pub type FormOrJson<T> = Option<web::Either<web::Form<T>, web::Json<T>>>;

/// The submitted fields, or all-absent fields when no usable body was sent.
pub fn body_or_default<T: Default>(body: FormOrJson<T>) -> T {
    match body {
        Some(web::Either::Left(form)) => form.into_inner(),
        Some(web::Either::Right(json)) => json.into_inner(),
        None => T::default(),
    }
}
