pub mod health;
pub use self::health::health;

pub mod actions;
pub use self::actions::{login_action, logout_action, method_not_allowed, register_action};

pub mod feedback;
pub use self::feedback::{password_strength, validate};

pub mod forms;
pub use self::forms::{login_submit, logout_submit, register_submit};

pub mod pages;
pub use self::pages::{home_page, login_page, register_page, root};

// common types for the handlers
use crate::web::client::ApiReply;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;
use utoipa::ToSchema;

pub const UNKNOWN_ERROR: &str = "An unknown error occurred";

/// JSON error body: `{"message": "..."}`.
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub message: String,
}

/// Error for the JSON endpoints, rendered as `(status, {"message": ...})`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionError {
    pub status: StatusCode,
    pub message: String,
}

impl ActionError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            status,
            message: if message.is_empty() {
                UNKNOWN_ERROR.to_string()
            } else {
                message
            },
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }
}

/// Logs the whole context chain; the client only gets the outermost message.
impl From<anyhow::Error> for ActionError {
    fn from(err: anyhow::Error) -> Self {
        error!("{:#}", err);

        Self::internal(err.to_string())
    }
}

impl IntoResponse for ActionError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(Message {
                message: self.message,
            }),
        )
            .into_response()
    }
}

/// What an auth API reply means for the session.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    /// 2xx with a token: set the cookie and pass the body on.
    Authenticated { token: String, body: Value },
    /// Non-2xx: pass status and body on untouched.
    Rejected(ApiReply),
}

/// Classifies a reply from the auth API.
///
/// # Errors
/// A successful reply without an `accessToken` string is malformed.
pub fn authenticate(reply: ApiReply) -> Result<AuthOutcome, ActionError> {
    if !reply.is_success() {
        return Ok(AuthOutcome::Rejected(reply));
    }

    match reply.access_token() {
        Some(token) => Ok(AuthOutcome::Authenticated {
            token: token.to_string(),
            body: reply.body,
        }),
        None => {
            error!("auth API replied {} without an access token", reply.status);

            Err(ActionError::internal(
                "malformed response from auth API: missing accessToken",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_authenticate_success() {
        let reply = ApiReply {
            status: StatusCode::CREATED,
            body: json!({"accessToken": "tok", "user": {"email": "a@b.co"}}),
        };
        assert_eq!(
            authenticate(reply),
            Ok(AuthOutcome::Authenticated {
                token: "tok".to_string(),
                body: json!({"accessToken": "tok", "user": {"email": "a@b.co"}}),
            })
        );
    }

    #[test]
    fn test_authenticate_rejected() {
        let reply = ApiReply {
            status: StatusCode::UNAUTHORIZED,
            body: json!({"message": "Invalid credentials"}),
        };
        assert_eq!(
            authenticate(reply.clone()),
            Ok(AuthOutcome::Rejected(reply))
        );
    }

    #[test]
    fn test_authenticate_missing_token() {
        let reply = ApiReply {
            status: StatusCode::OK,
            body: json!({"ok": true}),
        };
        let Err(err) = authenticate(reply) else {
            panic!("expected error");
        };
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.message.contains("accessToken"));
    }

    #[test]
    fn test_empty_message_falls_back() {
        let err = ActionError::internal("");
        assert_eq!(err.message, UNKNOWN_ERROR);
    }

    #[test]
    fn test_anyhow_sends_only_outer_context() {
        let err: ActionError =
            anyhow::anyhow!("error sending request for url (http://10.0.0.7/auth/login)")
                .context("request to auth API failed")
                .into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "request to auth API failed");
    }
}
