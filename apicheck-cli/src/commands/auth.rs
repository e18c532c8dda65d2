//! Anthropic API key management

use anyhow::{Result, bail};
use apicheck_models::auth::env_var_for_provider;
use clap::{Args, Subcommand};
use dialoguer::{Password, theme::ColorfulTheme};

use super::{PROVIDER, credential_store};

#[derive(Debug, Args)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub command: AuthCommand,
}

#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// Show where the API key comes from
    Status,
    /// Store an API key in the system keyring
    Set,
    /// Remove the stored API key from the keyring
    Delete,
}

pub fn run(args: AuthArgs) -> Result<()> {
    match args.command {
        AuthCommand::Status => status(),
        AuthCommand::Set => set(),
        AuthCommand::Delete => delete(),
    }
}

fn status() -> Result<()> {
    let store = credential_store();

    match store.credential_source(PROVIDER) {
        Some(source) => println!("API key for '{}': configured ({})", PROVIDER, source),
        None => {
            println!("API key for '{}': not configured", PROVIDER);
            println!();
            println!("Configure one with: apicheck auth set");
        }
    }
    Ok(())
}

fn set() -> Result<()> {
    let env_hint = env_var_for_provider(PROVIDER)
        .map(|v| format!(" (or set {})", v))
        .unwrap_or_default();

    println!("Enter API key for {}{}", PROVIDER, env_hint);

    let key = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("API key")
        .interact()?;

    if key.trim().is_empty() {
        bail!("API key cannot be empty");
    }

    credential_store().set(PROVIDER, key.trim())?;
    println!("API key for '{}' saved to keyring.", PROVIDER);
    Ok(())
}

fn delete() -> Result<()> {
    match credential_store().delete(PROVIDER) {
        Ok(()) => println!("API key for '{}' deleted.", PROVIDER),
        Err(apicheck_models::Error::CredentialsNotFound(_)) => {
            println!("No stored API key for '{}'.", PROVIDER)
        }
        Err(e) => bail!("Failed to delete API key: {}", e),
    }
    Ok(())
}
