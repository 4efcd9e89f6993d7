pub mod auth;
pub mod config;
pub mod dashboard;
pub mod events;
pub mod notifications;
pub mod participants;
pub mod public;
pub mod users;

use anyhow::{Context, Result};

/// Prompt for a hidden value when it was not given on the command line.
pub fn password_or_prompt(password: Option<String>, label: &str) -> Result<String> {
    match password {
        Some(p) => Ok(p),
        None => rpassword::prompt_password(format!("{}: ", label))
            .context("Failed to read password"),
    }
}
