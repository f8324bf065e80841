//! # Gatekeep
//!
//! Username and password registration and login over HTTP.
//!
//! - `POST /register` stores an Argon2id digest of the password and returns
//!   the new account's `{ id, username }`.
//! - `POST /login` checks a username and password and answers with a fixed
//!   message. No session, cookie or token is issued.
//!
//! Unknown usernames and wrong passwords produce the same `401` response.
//! Accounts live in PostgreSQL, or in memory with `--in-memory`.

pub mod api;
pub mod auth;
pub mod cli;
pub mod hashing;
pub mod store;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};
