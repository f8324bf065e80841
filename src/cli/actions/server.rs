use crate::{
    api,
    auth::AuthHandler,
    hashing::Argon2Hasher,
    store::{CredentialStore, MemoryStore, PgStore},
};
use anyhow::{anyhow, Context, Result};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use tracing::{info, warn};
use url::Url;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: Option<String>,
    pub db_username: Option<String>,
    pub db_password: Option<SecretString>,
    pub in_memory: bool,
    pub max_connections: u32,
}

/// Execute the server action.
/// # Errors
/// Returns an error if the database cannot be reached or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let store: Arc<dyn CredentialStore> = if args.in_memory {
        warn!("Using in-memory credential store, accounts are lost on restart");

        Arc::new(MemoryStore::new())
    } else {
        let dsn = args
            .dsn
            .as_deref()
            .ok_or_else(|| anyhow!("missing required argument: --dsn"))?;
        let dsn = build_dsn(dsn, args.db_username.as_deref(), args.db_password.as_ref())?;

        let store = PgStore::connect(&dsn, args.max_connections).await?;
        store
            .ensure_schema()
            .await
            .context("Could not prepare database schema")?;

        info!("Connected to database");

        Arc::new(store)
    };

    let auth = AuthHandler::new(store, Arc::new(Argon2Hasher::new()))
        .context("Could not prepare password hasher")?;

    api::new(args.port, Arc::new(auth)).await
}

/// Replace the credentials embedded in `dsn` with the ones given on the
/// command line, if any.
fn build_dsn(dsn: &str, username: Option<&str>, password: Option<&SecretString>) -> Result<String> {
    let mut dsn = Url::parse(dsn).context("Invalid database connection string")?;

    if let Some(username) = username {
        dsn.set_username(username)
            .map_err(|()| anyhow!("Error setting username"))?;
    }

    if let Some(password) = password {
        dsn.set_password(Some(password.expose_secret()))
            .map_err(|()| anyhow!("Error setting password"))?;
    }

    Ok(dsn.to_string())
}
