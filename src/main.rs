// Entrypoint for the interactive CLI.
// - Keeps `main` small: read settings, build the client, hand it to the menu.
// - `UPLOADFLY_API_KEY` supplies the key (prompted for when unset) and
//   `UPLOADFLY_BASE_URL` optionally points at another deployment.

use anyhow::{Context, Result};
use dialoguer::Password;
use tracing_subscriber::EnvFilter;
use uploadfly::{ui::main_menu, ClientConfig, UploadflyClient};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let api_key = match std::env::var("UPLOADFLY_API_KEY") {
        Ok(key) if !key.trim().is_empty() => key,
        _ => Password::new().with_prompt("Uploadfly API key").interact()?,
    };

    let config = match std::env::var("UPLOADFLY_BASE_URL") {
        Ok(url) => ClientConfig::new(url),
        Err(_) => ClientConfig::default(),
    };

    let client =
        UploadflyClient::with_config(&api_key, config).context("Failed to create client")?;

    // Blocks until the user picks "Exit".
    main_menu(&client)?;
    Ok(())
}
