use crate::{cli::globals::GlobalArgs, web};
use anyhow::Result;
use secrecy::SecretString;
use std::fmt;
use tracing::info;
use url::Url;

pub struct Args {
    pub port: u16,
    pub api_url: Url,
    pub api_key: SecretString,
}

impl fmt::Debug for Args {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Args")
            .field("port", &self.port)
            .field("api_url", &self.api_url.as_str())
            .field("api_key", &"***")
            .finish()
    }
}

/// Execute the server action.
/// # Errors
/// Returns an error if the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    info!(
        "{} {} - {} listen=tcp:{} api_url={}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        short_commit(crate::GIT_COMMIT_HASH),
        args.port,
        args.api_url
    );

    let globals = GlobalArgs::new(args.api_url, args.api_key);

    web::new(args.port, &globals).await
}

fn short_commit(hash: &str) -> &str {
    let trimmed = hash.trim();
    trimmed.get(..7).unwrap_or(trimmed)
}
