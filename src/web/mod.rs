#![allow(clippy::needless_for_each)]

use crate::{
    cli::{globals::GlobalArgs, telemetry},
    web::handlers::{
        actions::{__path_login_action, __path_logout_action, __path_register_action},
        feedback::{__path_validate, ValidateRequest, ValidateResponse},
        health::{Health, __path_health},
        Message,
    },
};
use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::{Extension, MatchedPath},
    http::{HeaderName, HeaderValue, Request},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{info, info_span, warn, Span};
use ulid::Ulid;
use utoipa::OpenApi;

pub mod client;
pub mod handlers;
pub mod session;
pub mod templates;

use self::{
    client::{AuthApi, LoginRequest, RegisterRequest},
    handlers::{
        health, home_page, login_action, login_page, login_submit, logout_action, logout_submit,
        method_not_allowed, password_strength, register_action, register_page, register_submit,
        root, validate,
    },
    templates::Templates,
};

#[derive(OpenApi)]
#[openapi(
    paths(health, login_action, register_action, logout_action, validate),
    components(schemas(
        Health,
        LoginRequest,
        RegisterRequest,
        Message,
        ValidateRequest,
        ValidateResponse
    )),
    tags(
        (name = "gatehouse", description = "Login front end for an external auth API")
    )
)]
struct ApiDoc;

#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

/// All routes with their middleware. `/health` sits outside the trace layer.
pub fn router(api: Arc<AuthApi>, templates: Arc<Templates>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/login", get(login_page).post(login_submit))
        .route("/register", get(register_page).post(register_submit))
        .route("/home", get(home_page))
        .route("/logout", post(logout_submit))
        .route("/password-strength", post(password_strength))
        .route("/api/validate", post(validate))
        .route(
            "/api/login-action",
            post(login_action).fallback(method_not_allowed),
        )
        .route(
            "/api/register-action",
            post(register_action).fallback(method_not_allowed),
        )
        .route(
            "/api/logout-action",
            post(logout_action).fallback(method_not_allowed),
        )
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(Extension(api))
                .layer(Extension(templates)),
        )
        .route("/health", get(health).options(health))
}

/// Start the server
/// # Errors
/// Return error if failed to start the server
pub async fn new(port: u16, globals: &GlobalArgs) -> Result<()> {
    let api = AuthApi::new(globals.api_url.clone(), globals.api_key.clone())?;

    let templates = Templates::new()?;

    let app = router(Arc::new(api), Arc::new(templates));

    let listener = TcpListener::bind(format!("::0:{port}"))
        .await
        .with_context(|| format!("Failed to bind port {port}"))?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Gracefully shutdown");

    telemetry::shutdown_tracer();

    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let (Ok(mut sigint), Ok(mut sigterm)) = (
            signal(SignalKind::interrupt()),
            signal(SignalKind::terminate()),
        ) else {
            warn!("Failed to install signal handlers, waiting for ctrl-c");
            let _ = tokio::signal::ctrl_c().await;
            return;
        };

        tokio::select! {
            _ = sigint.recv() => warn!("SIGINT received"),
            _ = sigterm.recv() => warn!("SIGTERM received"),
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for ctrl-c: {}", err);
        }
    }
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
