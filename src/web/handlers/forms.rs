//! Plain HTML form submissions. These work without JavaScript: validation
//! errors and API rejections come back as a re-rendered page.

use super::{
    authenticate,
    pages::{render, template_for, FormView},
    AuthOutcome, UNKNOWN_ERROR,
};
use crate::{
    validation::{FormInput, Schema},
    web::{
        client::{ApiReply, AuthApi, LoginRequest, RegisterRequest},
        session::{cleared_session_cookie, require_anonymous, session_cookie, HOME_PATH, LOGIN_PATH},
        templates::Templates,
    },
};
use anyhow::Result;
use axum::{
    extract::{Extension, Form},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;
use tracing::{debug, error, instrument};

async fn call_api(api: &AuthApi, schema: Schema, input: FormInput) -> Result<ApiReply> {
    let email = input.email.unwrap_or_default();
    let password = input.password.unwrap_or_default();

    match schema {
        Schema::Login => api.login(&LoginRequest { email, password }).await,
        Schema::Register => {
            api.register(&RegisterRequest {
                email,
                password,
                name: input.name,
            })
            .await
        }
    }
}

#[instrument(skip_all, fields(schema = ?schema))]
async fn submit(
    schema: Schema,
    jar: CookieJar,
    api: &AuthApi,
    templates: &Templates,
    input: FormInput,
) -> Response {
    if let Err(redirect) = require_anonymous(&jar) {
        return redirect.into_response();
    }

    debug!("input: {:?}", input);

    let template = template_for(schema);
    let mut view = FormView::new(schema).with_input(&input);

    if let Err(errors) = schema.validate(&input) {
        debug!("{} field(s) failed validation", errors.len());

        view.errors = errors;
        return render(templates, template, &view, StatusCode::UNPROCESSABLE_ENTITY);
    }

    let reply = match call_api(api, schema, input).await {
        Ok(reply) => reply,
        Err(err) => {
            error!("{:#}", err);

            view.api_error = Some(err.to_string());
            return render(templates, template, &view, StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    match authenticate(reply) {
        Ok(AuthOutcome::Authenticated { token, .. }) => {
            (jar.add(session_cookie(token)), Redirect::to(HOME_PATH)).into_response()
        }
        Ok(AuthOutcome::Rejected(reply)) => {
            debug!("Auth API rejected the form: {}", reply.status);

            view.api_error = Some(reply.message().unwrap_or_else(|| UNKNOWN_ERROR.to_string()));
            render(templates, template, &view, reply.status)
        }
        Err(err) => {
            view.api_error = Some(err.message);
            render(templates, template, &view, err.status)
        }
    }
}

// axum handler for POST /login
pub async fn login_submit(
    jar: CookieJar,
    api: Extension<Arc<AuthApi>>,
    templates: Extension<Arc<Templates>>,
    Form(input): Form<FormInput>,
) -> Response {
    submit(Schema::Login, jar, &api, &templates, input).await
}

// axum handler for POST /register
pub async fn register_submit(
    jar: CookieJar,
    api: Extension<Arc<AuthApi>>,
    templates: Extension<Arc<Templates>>,
    Form(input): Form<FormInput>,
) -> Response {
    submit(Schema::Register, jar, &api, &templates, input).await
}

// axum handler for POST /logout
pub async fn logout_submit(jar: CookieJar) -> impl IntoResponse {
    (jar.add(cleared_session_cookie()), Redirect::to(LOGIN_PATH))
}
