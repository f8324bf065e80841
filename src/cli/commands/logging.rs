use clap::{builder::ValueParser, Arg, ArgAction, Command};
use tracing::Level;

pub const ARG_VERBOSITY: &str = "verbosity";

/// Indexed by the number of `-v` flags.
const LEVELS: [Level; 5] = [
    Level::ERROR,
    Level::WARN,
    Level::INFO,
    Level::DEBUG,
    Level::TRACE,
];

/// Parse a `GATEKEEP_LOG_LEVEL` value: a level name in any case, or the
/// equivalent `-v` count (`0` for error up to `4` for trace).
///
/// # Errors
/// Returns a message listing the accepted names.
pub fn parse_log_level(value: &str) -> Result<u8, String> {
    let value = value.trim();

    let index = match value.parse::<usize>() {
        Ok(count) => (count < LEVELS.len()).then_some(count),
        Err(_) => LEVELS
            .iter()
            .position(|level| level.as_str().eq_ignore_ascii_case(value)),
    };

    index
        .and_then(|index| u8::try_from(index).ok())
        .ok_or_else(|| {
            format!("invalid log level {value:?}, expected error, warn, info, debug or trace")
        })
}

/// Tracing level for a verbosity count; counts past the table stay at trace.
#[must_use]
pub fn level(verbosity: u8) -> Level {
    LEVELS[usize::from(verbosity).min(LEVELS.len() - 1)]
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Increase log verbosity, or set GATEKEEP_LOG_LEVEL=error|warn|info|debug|trace")
            .env("GATEKEEP_LOG_LEVEL")
            .global(true)
            .action(ArgAction::Count)
            .value_parser(ValueParser::new(parse_log_level)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_parse_in_any_case() {
        assert_eq!(parse_log_level("error"), Ok(0));
        assert_eq!(parse_log_level("WARN"), Ok(1));
        assert_eq!(parse_log_level(" Info "), Ok(2));
        assert_eq!(parse_log_level("debug"), Ok(3));
        assert_eq!(parse_log_level("Trace"), Ok(4));
    }

    #[test]
    fn counts_parse_up_to_trace() {
        assert_eq!(parse_log_level("0"), Ok(0));
        assert_eq!(parse_log_level("4"), Ok(4));
        assert!(parse_log_level("5").is_err());
    }

    #[test]
    fn unknown_values_are_rejected() {
        for value in ["", "verbose", "-1", "warning"] {
            let err = parse_log_level(value).unwrap_err();
            assert!(err.contains("expected error, warn"), "{value}: {err}");
        }
    }

    #[test]
    fn level_saturates_at_trace() {
        assert_eq!(level(0), Level::ERROR);
        assert_eq!(level(1), Level::WARN);
        assert_eq!(level(2), Level::INFO);
        assert_eq!(level(3), Level::DEBUG);
        assert_eq!(level(4), Level::TRACE);
        assert_eq!(level(9), Level::TRACE);
    }
}
