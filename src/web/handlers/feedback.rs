//! Endpoints the pages call while the visitor types.

use super::ActionError;
use crate::{
    feedback::Feedback,
    validation::{validate_field, Field, Schema},
    web::templates::{Templates, STRENGTH},
};
use axum::{
    extract::{Extension, Form},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use utoipa::ToSchema;

#[derive(Deserialize, Default)]
pub struct StrengthForm {
    #[serde(default)]
    pub password: String,
}

/// Renders the strength bar and checklist for the submitted password.
// axum handler for password strength
pub async fn password_strength(
    templates: Extension<Arc<Templates>>,
    Form(form): Form<StrengthForm>,
) -> Response {
    let feedback = Feedback::for_password(&form.password);

    match templates.render(STRENGTH, &feedback) {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            error!("{:#}", err);

            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[derive(ToSchema, Deserialize, Debug)]
pub struct ValidateRequest {
    schema: String,
    field: String,
    #[serde(default)]
    value: String,
}

#[derive(ToSchema, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct ValidateResponse {
    #[schema(value_type = String)]
    pub field: Field,
    pub error: Option<String>,
}

#[utoipa::path(
    post,
    path= "/api/validate",
    request_body = ValidateRequest,
    responses (
        (status = 200, description = "Field checked, error is null when valid", body = ValidateResponse),
        (status = 400, description = "Unknown schema or field", body = super::Message),
    ),
    tag= "validation"
)]
// axum handler for validate
pub async fn validate(
    Json(request): Json<ValidateRequest>,
) -> Result<Json<ValidateResponse>, ActionError> {
    let schema: Schema = request.schema.parse().map_err(ActionError::bad_request)?;
    let field: Field = request.field.parse().map_err(ActionError::bad_request)?;

    if !schema.has(field) {
        return Err(ActionError::bad_request(format!(
            "unknown field for {}: {field}",
            request.schema
        )));
    }

    Ok(Json(ValidateResponse {
        field,
        error: validate_field(schema, field, &request.value).err(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{INVALID_EMAIL, INVALID_PASSWORD};
    use anyhow::Result;
    use axum::{
        body::{to_bytes, Body},
        http::{header::CONTENT_TYPE, Request},
        routing::post,
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app() -> Result<Router> {
        Ok(Router::new()
            .route("/password-strength", post(password_strength))
            .route("/api/validate", post(validate))
            .layer(Extension(Arc::new(Templates::new()?))))
    }

    async fn body_string(response: Response) -> Result<String> {
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        Ok(String::from_utf8(bytes.to_vec())?)
    }

    async fn check(payload: Value) -> Result<(StatusCode, Value)> {
        let response = app()?
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/validate")
                    .header(CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))?,
            )
            .await?;
        let status = response.status();
        let body = body_string(response).await?;
        Ok((status, serde_json::from_str(&body)?))
    }

    #[tokio::test]
    async fn test_password_strength_fragment() -> Result<()> {
        let response = app()?
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/password-strength")
                    .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from("password=abc123%21%40"))?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.starts_with("text/html")));
        let html = body_string(response).await?;
        assert!(html.contains("data-score=\"100\""));
        assert_eq!(html.matches("class=\"segment on teal\"").count(), 4);
        assert_eq!(html.matches("class=\"requirement met\"").count(), 4);
        Ok(())
    }

    #[tokio::test]
    async fn test_password_strength_without_field() -> Result<()> {
        let response = app()?
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/password-strength")
                    .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::empty())?,
            )
            .await?;

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_string(response).await?;
        assert!(html.contains("data-score=\"0\""));
        assert_eq!(html.matches("class=\"segment\"").count(), 4);
        Ok(())
    }

    #[tokio::test]
    async fn test_validate_fields() -> Result<()> {
        let (status, body) =
            check(json!({"schema": "login", "field": "email", "value": "user@example.com"}))
                .await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"field": "email", "error": null}));

        let (_, body) =
            check(json!({"schema": "login", "field": "email", "value": "user@example"})).await?;
        assert_eq!(body, json!({"field": "email", "error": INVALID_EMAIL}));

        let (_, body) =
            check(json!({"schema": "register", "field": "password", "value": "abcdefgh"}))
                .await?;
        assert_eq!(body, json!({"field": "password", "error": INVALID_PASSWORD}));

        let (_, body) = check(json!({"schema": "register", "field": "name", "value": ""})).await?;
        assert_eq!(body, json!({"field": "name", "error": null}));
        Ok(())
    }

    #[tokio::test]
    async fn test_validate_unknown_schema_or_field() -> Result<()> {
        let (status, body) =
            check(json!({"schema": "signup", "field": "email", "value": ""})).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().is_some());

        let (status, _) = check(json!({"schema": "login", "field": "phone", "value": ""})).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // name is only part of the register form
        let (status, _) = check(json!({"schema": "login", "field": "name", "value": "Ada"})).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        Ok(())
    }
}
