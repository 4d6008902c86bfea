//! # Gatehouse (login front end)
//!
//! `gatehouse` serves the login, registration and landing pages for an external
//! authentication API. Credential checks and token issuance happen upstream;
//! this crate only validates forms, gives password-strength feedback, guards
//! pages on the session cookie and proxies auth calls with a server-held key.
//!
//! ## Password strength
//!
//! [`strength::evaluate`] scores a password against a length penalty and three
//! character requirements (digit, letter, special symbol). Each unmet
//! condition costs 25 points, so a score is always one of 0, 25, 50, 75 or 100.
//! [`feedback::Feedback`] turns that score into a four segment bar and a
//! requirement checklist.
//!
//! ## Sessions
//!
//! The session is the `access_token` cookie set by the proxy endpoints. Pages
//! only test for its presence; the token itself is validated by the API and by
//! whoever consumes the cookie downstream.

pub mod cli;
pub mod feedback;
pub mod strength;
pub mod validation;
pub mod web;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
