//! Session cookie and the page guards built on it.
//!
//! A visitor counts as signed in when the request carries a non-empty
//! `access_token` cookie. Nothing here validates the token; that is left to
//! the auth API and to whoever consumes the cookie downstream.

use axum::response::Redirect;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::fmt;

pub const SESSION_COOKIE: &str = "access_token";

pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const HOME_PATH: &str = "/home";

/// Value of the session cookie.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

/// Returns the session token if the cookie is present and not empty.
#[must_use]
pub fn session_token(jar: &CookieJar) -> Option<SessionToken> {
    jar.get(SESSION_COOKIE)
        .map(Cookie::value)
        .filter(|value| !value.is_empty())
        .map(|value| SessionToken(value.to_string()))
}

/// Guard for pages that need a session: without one the visitor is sent to
/// the login page.
///
/// # Errors
/// Returns the redirect to respond with when there is no session.
pub fn require_session(jar: &CookieJar) -> Result<SessionToken, Redirect> {
    session_token(jar).ok_or_else(|| Redirect::to(LOGIN_PATH))
}

/// Guard for the login and register pages: a visitor who already has a
/// session goes straight to the landing page.
///
/// # Errors
/// Returns the redirect to respond with when there is a session.
pub fn require_anonymous(jar: &CookieJar) -> Result<(), Redirect> {
    match session_token(jar) {
        Some(_) => Err(Redirect::to(HOME_PATH)),
        None => Ok(()),
    }
}

fn build_cookie(value: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, value))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .path("/")
        .build()
}

/// `access_token=<token>; HttpOnly; Secure; SameSite=None; Path=/`
#[must_use]
pub fn session_cookie(token: impl Into<String>) -> Cookie<'static> {
    build_cookie(token.into())
}

/// Same attributes as [`session_cookie`] with an empty value.
#[must_use]
pub fn cleared_session_cookie() -> Cookie<'static> {
    build_cookie(String::new())
}
