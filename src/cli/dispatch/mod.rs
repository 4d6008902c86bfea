use crate::cli::{
    actions::{server::Args, Action},
    commands::{
        api::{ARG_API_KEY, ARG_API_URL},
        ARG_PORT,
    },
};
use anyhow::{Context, Result};
use secrecy::SecretString;
use url::Url;

/// # Errors
/// Returns an error if required arguments are missing.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);

    let api_url = matches
        .get_one::<Url>(ARG_API_URL)
        .cloned()
        .context("missing required argument: --api-url")?;

    let api_key = matches
        .get_one::<String>(ARG_API_KEY)
        .cloned()
        .map(SecretString::from)
        .context("missing required argument: --api-key")?;

    Ok(Action::Server(Args {
        port,
        api_url,
        api_key,
    }))
}
