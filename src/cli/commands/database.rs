use anyhow::{Context, Result};
use clap::{builder::BoolishValueParser, Arg, ArgAction, Command};
use secrecy::SecretString;

pub const ARG_DSN: &str = "dsn";
pub const ARG_DB_USERNAME: &str = "db-username";
pub const ARG_DB_PASSWORD: &str = "db-password";
pub const ARG_IN_MEMORY: &str = "in-memory";
pub const ARG_MAX_CONNECTIONS: &str = "max-connections";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_DSN)
                .short('d')
                .long(ARG_DSN)
                .help("Database connection string")
                .long_help(
                    "PostgreSQL connection string. --db-username and --db-password, when set, replace the credentials in the DSN.",
                )
                .env("GATEKEEP_DSN")
                .required_unless_present(ARG_IN_MEMORY),
        )
        .arg(
            Arg::new(ARG_DB_USERNAME)
                .long(ARG_DB_USERNAME)
                .help("Database username injected into the DSN")
                .env("GATEKEEP_DB_USERNAME"),
        )
        .arg(
            Arg::new(ARG_DB_PASSWORD)
                .long(ARG_DB_PASSWORD)
                .help("Database password injected into the DSN")
                .env("GATEKEEP_DB_PASSWORD")
                .hide_env_values(true),
        )
        .arg(
            Arg::new(ARG_IN_MEMORY)
                .long(ARG_IN_MEMORY)
                .help("Keep accounts in memory instead of PostgreSQL (lost on restart)")
                .env("GATEKEEP_IN_MEMORY")
                .action(ArgAction::SetTrue)
                .value_parser(BoolishValueParser::new()),
        )
        .arg(
            Arg::new(ARG_MAX_CONNECTIONS)
                .long(ARG_MAX_CONNECTIONS)
                .help("Maximum database pool connections")
                .env("GATEKEEP_MAX_CONNECTIONS")
                .default_value("5")
                .value_parser(clap::value_parser!(u32).range(1..)),
        )
}

#[derive(Debug)]
pub struct Options {
    pub dsn: Option<String>,
    pub username: Option<String>,
    pub password: Option<SecretString>,
    pub in_memory: bool,
    pub max_connections: u32,
}

impl Options {
    /// # Errors
    /// Returns an error if neither a DSN nor `--in-memory` was given.
    pub fn parse(matches: &clap::ArgMatches) -> Result<Self> {
        let in_memory = matches.get_flag(ARG_IN_MEMORY);
        let dsn = matches.get_one::<String>(ARG_DSN).cloned();

        if !in_memory {
            dsn.as_ref()
                .context("missing required argument: --dsn")?;
        }

        Ok(Self {
            dsn,
            username: matches.get_one::<String>(ARG_DB_USERNAME).cloned(),
            password: matches
                .get_one::<String>(ARG_DB_PASSWORD)
                .map(|password| SecretString::from(password.clone())),
            in_memory,
            max_connections: matches
                .get_one::<u32>(ARG_MAX_CONNECTIONS)
                .copied()
                .unwrap_or(5),
        })
    }
}
