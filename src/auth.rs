//! Local auth collaborator: an account registry plus a session file holding
//! the currently signed-in user ID. Commands check `current_user_id()` on
//! entry, the CLI analogue of an auth-state listener.

use crate::models::{Account, User};
use crate::store;
use sha2::{Digest, Sha256};
use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::PathBuf;
use thiserror::Error;

/// Authentication failures. Messages are shown to the user verbatim; every
/// other failure class in the app stays silent apart from logs.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("an account with this email already exists")]
    EmailTaken,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("not signed in (run `focusdo login` first)")]
    NotSignedIn,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn accounts_path() -> PathBuf {
    let mut p = store::db_path();
    p.pop();
    p.push("accounts.json");
    p
}

fn session_path() -> PathBuf {
    let mut p = store::db_path();
    p.pop();
    p.push("session");
    p
}

fn load_accounts() -> Vec<Account> {
    let path = accounts_path();
    if !path.exists() {
        return Vec::new();
    }
    let mut f = match OpenOptions::new().read(true).open(&path) {
        Ok(f) => f,
        Err(_) => return Vec::new(),
    };
    let mut s = String::new();
    if f.read_to_string(&mut s).is_err() {
        return Vec::new();
    }
    serde_json::from_str(&s).unwrap_or_else(|_| Vec::new())
}

fn save_accounts(accounts: &Vec<Account>) -> std::io::Result<()> {
    let s = serde_json::to_string_pretty(accounts).map_err(std::io::Error::other)?;
    let mut f = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(accounts_path())?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

fn digest_hex(input: &str) -> String {
    hex::encode(Sha256::digest(input.as_bytes()))
}

/// Not a hardened KDF; this is a local single-user tool.
fn hash_password(email: &str, password: &str) -> String {
    digest_hex(&format!("{}:{}", email, password))
}

/// Derives an opaque user ID from the email.
fn derive_user_id(email: &str) -> String {
    digest_hex(email)[..16].to_string()
}

/// Creates an account and its default user document, then signs in.
pub fn sign_up(email: &str, password: &str, name: &str) -> Result<String, AuthError> {
    let mut accounts = load_accounts();
    if accounts.iter().any(|a| a.email == email) {
        return Err(AuthError::EmailTaken);
    }
    let user_id = derive_user_id(email);
    accounts.push(Account {
        user_id: user_id.clone(),
        email: email.to_string(),
        name: name.to_string(),
        password_hash: hash_password(email, password),
    });
    save_accounts(&accounts)?;

    store::save_user(&User {
        user_id: user_id.clone(),
        name: name.to_string(),
        email: email.to_string(),
        categories: Vec::new(),
        settings: Default::default(),
    })?;

    write_session(&user_id)?;
    Ok(user_id)
}

/// Verifies the credentials and writes the session file.
pub fn sign_in(email: &str, password: &str) -> Result<String, AuthError> {
    let accounts = load_accounts();
    let account = accounts
        .iter()
        .find(|a| a.email == email)
        .ok_or(AuthError::InvalidCredentials)?;
    if account.password_hash != hash_password(email, password) {
        return Err(AuthError::InvalidCredentials);
    }
    write_session(&account.user_id)?;
    Ok(account.user_id.clone())
}

/// Removes the session file. Signing out while signed out is not an error.
pub fn sign_out() -> Result<(), AuthError> {
    let path = session_path();
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}

/// Returns the signed-in user ID, or `None` when signed out.
pub fn current_user_id() -> Option<String> {
    let mut s = String::new();
    let mut f = OpenOptions::new().read(true).open(session_path()).ok()?;
    f.read_to_string(&mut s).ok()?;
    let id = s.trim().to_string();
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

/// Like `current_user_id`, but an error when signed out.
pub fn require_user() -> Result<String, AuthError> {
    current_user_id().ok_or(AuthError::NotSignedIn)
}

fn write_session(user_id: &str) -> std::io::Result<()> {
    let mut f = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(session_path())?;
    f.write_all(user_id.as_bytes())?;
    Ok(())
}
