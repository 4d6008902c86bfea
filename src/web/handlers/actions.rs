//! JSON proxy endpoints. They forward credentials to the auth API with the
//! server-held key and turn a successful reply into the session cookie.

use super::{authenticate, ActionError, AuthOutcome, Message};
use crate::web::{
    client::{AuthApi, LoginRequest, RegisterRequest},
    session::{cleared_session_cookie, session_cookie},
};
use axum::{
    body::Bytes,
    extract::Extension,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, instrument};

pub const ONLY_POST: &str = "Only POST requests are allowed";

/// The body is JSON whatever the `Content-Type` says.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<T, ActionError> {
    serde_json::from_slice(body).map_err(|e| ActionError::internal(e.to_string()))
}

fn respond(jar: CookieJar, outcome: AuthOutcome) -> Response {
    match outcome {
        AuthOutcome::Authenticated { token, body } => {
            debug!("Authenticated, setting session cookie");

            (StatusCode::OK, jar.add(session_cookie(token)), Json(body)).into_response()
        }
        AuthOutcome::Rejected(reply) => {
            debug!("Auth API rejected the request: {}", reply.status);

            (reply.status, Json(reply.body)).into_response()
        }
    }
}

#[utoipa::path(
    post,
    path= "/api/login-action",
    request_body = LoginRequest,
    responses (
        (status = 200, description = "Login successful, session cookie set", body = Object, content_type = "application/json"),
        (status = 405, description = "Method other than POST", body = Message),
        (status = 500, description = "Malformed request or auth API response", body = Message),
    ),
    tag= "actions"
)]
// axum handler for login
#[instrument(skip_all)]
pub async fn login_action(
    jar: CookieJar,
    api: Extension<Arc<AuthApi>>,
    body: Bytes,
) -> Result<Response, ActionError> {
    let request: LoginRequest = parse_body(&body)?;

    debug!("request: {:?}", request);

    let reply = api.login(&request).await?;

    Ok(respond(jar, authenticate(reply)?))
}

#[utoipa::path(
    post,
    path= "/api/register-action",
    request_body = RegisterRequest,
    responses (
        (status = 200, description = "Registration successful, session cookie set", body = Object, content_type = "application/json"),
        (status = 405, description = "Method other than POST", body = Message),
        (status = 500, description = "Malformed request or auth API response", body = Message),
    ),
    tag= "actions"
)]
// axum handler for register
#[instrument(skip_all)]
pub async fn register_action(
    jar: CookieJar,
    api: Extension<Arc<AuthApi>>,
    body: Bytes,
) -> Result<Response, ActionError> {
    let request: RegisterRequest = parse_body(&body)?;

    debug!("request: {:?}", request);

    let reply = api.register(&request).await?;

    Ok(respond(jar, authenticate(reply)?))
}

#[utoipa::path(
    post,
    path= "/api/logout-action",
    responses (
        (status = 200, description = "Session cookie cleared", body = Message),
        (status = 405, description = "Method other than POST", body = Message),
    ),
    tag= "actions"
)]
// axum handler for logout
pub async fn logout_action(jar: CookieJar) -> impl IntoResponse {
    (
        jar.add(cleared_session_cookie()),
        Json(Message {
            message: "Logged out".to_string(),
        }),
    )
}

/// Fallback for every method other than POST on the action routes.
pub async fn method_not_allowed() -> ActionError {
    ActionError::new(StatusCode::METHOD_NOT_ALLOWED, ONLY_POST)
}
