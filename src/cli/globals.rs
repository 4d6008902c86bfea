use secrecy::SecretString;
use std::fmt;
use url::Url;

/// Settings shared by every handler: where the auth API lives and the key
/// that authorizes calls to it.
#[derive(Clone)]
pub struct GlobalArgs {
    pub api_url: Url,
    pub api_key: SecretString,
}

impl GlobalArgs {
    #[must_use]
    pub const fn new(api_url: Url, api_key: SecretString) -> Self {
        Self { api_url, api_key }
    }
}

impl fmt::Debug for GlobalArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobalArgs")
            .field("api_url", &self.api_url.as_str())
            .field("api_key", &"***")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_global_args() -> Result<(), url::ParseError> {
        let args = GlobalArgs::new(
            Url::parse("https://auth.example.com")?,
            SecretString::from("s3cret".to_string()),
        );
        assert_eq!(args.api_url.as_str(), "https://auth.example.com/");
        assert_eq!(args.api_key.expose_secret(), "s3cret");
        Ok(())
    }

    #[test]
    fn test_debug_redacts_key() -> Result<(), url::ParseError> {
        let args = GlobalArgs::new(
            Url::parse("https://auth.example.com")?,
            SecretString::from("s3cret".to_string()),
        );
        let debug = format!("{args:?}");
        assert!(debug.contains("auth.example.com"));
        assert!(!debug.contains("s3cret"));
        Ok(())
    }
}
