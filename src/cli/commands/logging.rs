use clap::{builder::ValueParser, Arg, ArgAction, Command};

pub const ARG_VERBOSITY: &str = "verbosity";
pub const ARG_LOG_JSON: &str = "log-json";

#[must_use]
pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_VERBOSITY)
                .short('v')
                .long("verbose")
                .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
                .env("GATEHOUSE_LOG_LEVEL")
                .global(true)
                .action(ArgAction::Count)
                .value_parser(validator_log_level()),
        )
        .arg(
            Arg::new(ARG_LOG_JSON)
                .long(ARG_LOG_JSON)
                .help("Emit log lines as JSON")
                .env("GATEHOUSE_LOG_JSON")
                .global(true)
                .action(ArgAction::SetTrue),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validator_log_level() {
        for (input, expected) in [
            ("0", 0),
            ("5", 5),
            ("ERROR", 0),
            ("warn", 1),
            ("Info", 2),
            ("debug", 3),
            ("trace", 4),
        ] {
            let matches = temp_env::with_vars([("GATEHOUSE_LOG_LEVEL", Some(input))], || {
                with_args(Command::new("test")).get_matches_from(vec!["test"])
            });
            assert_eq!(
                matches.get_one::<u8>(ARG_VERBOSITY).copied(),
                Some(expected),
                "{input}"
            );
        }
    }

    #[test]
    fn test_invalid_log_level() {
        let result = temp_env::with_vars([("GATEHOUSE_LOG_LEVEL", Some("loud"))], || {
            with_args(Command::new("test")).try_get_matches_from(vec!["test"])
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_log_json_flag() {
        temp_env::with_vars([("GATEHOUSE_LOG_JSON", None::<String>)], || {
            let command = with_args(Command::new("test"));
            let matches = command.clone().get_matches_from(vec!["test"]);
            assert_eq!(matches.get_one::<bool>(ARG_LOG_JSON).copied(), Some(false));

            let matches = command.clone().get_matches_from(vec!["test", "--log-json"]);
            assert_eq!(matches.get_one::<bool>(ARG_LOG_JSON).copied(), Some(true));
        });
        temp_env::with_vars([("GATEHOUSE_LOG_JSON", Some("true"))], || {
            let command = with_args(Command::new("test"));
            let matches = command.clone().get_matches_from(vec!["test"]);
            assert_eq!(matches.get_one::<bool>(ARG_LOG_JSON).copied(), Some(true));
        });
    }
}
