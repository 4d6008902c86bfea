//! Server-rendered pages and the session gate in front of them.

use crate::{
    feedback::Feedback,
    validation::{FieldErrors, FormInput, Schema},
    web::{
        session::{require_anonymous, require_session, HOME_PATH},
        templates::{Templates, HOME, LOGIN, REGISTER},
    },
};
use axum::{
    extract::Extension,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use std::sync::Arc;
use tracing::error;

/// Context of the login and register templates.
#[derive(Serialize, Debug, Default)]
pub struct FormView {
    pub title: &'static str,
    pub name: Option<String>,
    pub email: Option<String>,
    pub errors: FieldErrors,
    pub api_error: Option<String>,
    pub feedback: Option<Feedback>,
}

impl FormView {
    #[must_use]
    pub fn new(schema: Schema) -> Self {
        match schema {
            Schema::Login => Self {
                title: "Welcome back!",
                ..Self::default()
            },
            Schema::Register => Self {
                title: "Register",
                feedback: Some(Feedback::for_password("")),
                ..Self::default()
            },
        }
    }

    /// Keeps what the visitor typed, except the password.
    #[must_use]
    pub fn with_input(mut self, input: &FormInput) -> Self {
        self.name.clone_from(&input.name);
        self.email.clone_from(&input.email);
        self
    }
}

#[derive(Serialize)]
struct PageView {
    title: &'static str,
}

pub(super) const fn template_for(schema: Schema) -> &'static str {
    match schema {
        Schema::Login => LOGIN,
        Schema::Register => REGISTER,
    }
}

pub(super) fn render<T: Serialize>(
    templates: &Templates,
    name: &str,
    context: &T,
    status: StatusCode,
) -> Response {
    match templates.render(name, context) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(err) => {
            error!("{:#}", err);

            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn form_page(jar: &CookieJar, templates: &Templates, schema: Schema) -> Response {
    if let Err(redirect) = require_anonymous(jar) {
        return redirect.into_response();
    }

    render(
        templates,
        template_for(schema),
        &FormView::new(schema),
        StatusCode::OK,
    )
}

pub async fn root() -> Redirect {
    Redirect::to(HOME_PATH)
}

// axum handler for GET /login
pub async fn login_page(jar: CookieJar, templates: Extension<Arc<Templates>>) -> Response {
    form_page(&jar, &templates, Schema::Login)
}

// axum handler for GET /register
pub async fn register_page(jar: CookieJar, templates: Extension<Arc<Templates>>) -> Response {
    form_page(&jar, &templates, Schema::Register)
}

// axum handler for GET /home
pub async fn home_page(jar: CookieJar, templates: Extension<Arc<Templates>>) -> Response {
    if let Err(redirect) = require_session(&jar) {
        return redirect.into_response();
    }

    render(&templates, HOME, &PageView { title: "Home" }, StatusCode::OK)
}
