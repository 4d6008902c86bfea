use clap::{builder::ValueParser, Arg, Command};
use url::Url;

pub const ARG_API_URL: &str = "api-url";
pub const ARG_API_KEY: &str = "api-key";

/// Accepts only absolute http(s) URLs.
#[must_use]
pub fn validator_api_url() -> ValueParser {
    ValueParser::from(move |value: &str| -> std::result::Result<Url, String> {
        let url = Url::parse(value).map_err(|e| format!("invalid URL: {e}"))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(format!("unsupported scheme: {scheme}")),
        }
    })
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_URL)
                .long(ARG_API_URL)
                .help("Base URL of the auth API, example: https://auth.tld/v1")
                .env("GATEHOUSE_API_URL")
                .required(true)
                .value_parser(validator_api_url()),
        )
        .arg(
            Arg::new(ARG_API_KEY)
                .long(ARG_API_KEY)
                .help("Key sent to the auth API in the x-api-key header")
                .env("GATEHOUSE_API_KEY")
                .hide_env_values(true)
                .required(true),
        )
}
