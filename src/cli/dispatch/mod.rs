//! Map validated CLI arguments to the action the binary runs.

use crate::cli::actions::{server::Args, Action};
use crate::cli::commands::{database, ARG_PORT};
use anyhow::Result;

/// Map validated CLI matches to a server action.
///
/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let port = matches.get_one::<u16>(ARG_PORT).copied().unwrap_or(8080);
    let db = database::Options::parse(matches)?;

    Ok(Action::Server(Args {
        port,
        dsn: db.dsn,
        db_username: db.username,
        db_password: db.password,
        in_memory: db.in_memory,
        max_connections: db.max_connections,
    }))
}
