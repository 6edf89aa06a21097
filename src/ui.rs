// UI layer: a small interactive menu using `dialoguer`. Each flow collects
// its inputs, shows a spinner while the request is in flight and prints the
// JSON the API sent back.

use crate::api::UploadflyClient;
use crate::transport::Transport;
use crate::types::{DeleteResponse, ImageUploadOptions, UploadOptions, UploadResponse};
use anyhow::Result;
use dialoguer::{Confirm, Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;

/// Main interactive menu. Runs a select loop until the user chooses "Exit".
/// Request failures are printed and the loop continues; only terminal I/O
/// errors end it.
pub fn main_menu<T: Transport>(client: &UploadflyClient<T>) -> Result<()> {
    loop {
        let items = vec!["Upload file", "Upload image", "Delete file", "Exit"];
        let selection = Select::new().items(&items).default(0).interact()?;
        match selection {
            0 => handle_upload(client)?,
            1 => handle_image_upload(client)?,
            2 => handle_delete(client)?,
            3 => break,
            _ => {}
        }
    }
    Ok(())
}

fn handle_upload<T: Transport>(client: &UploadflyClient<T>) -> Result<()> {
    let path = prompt_path("File path")?;
    let mut options = UploadOptions::default();
    if let Some(name) = prompt_optional("Store as (blank keeps the file name)")? {
        options = options.with_filename(name);
    }

    let spinner = spinner("Uploading...");
    let outcome = client.upload(path, &options);
    spinner.finish_and_clear();

    match outcome {
        Ok(body) => report_upload(&body),
        Err(e) => println!("Upload failed: {}", e),
    }
    Ok(())
}

fn handle_image_upload<T: Transport>(client: &UploadflyClient<T>) -> Result<()> {
    let path = prompt_path("Image path")?;
    let mut options = ImageUploadOptions::default();
    if let Some(name) = prompt_optional("Store as (blank keeps the file name)")? {
        options = options.with_filename(name);
    }
    if Confirm::new()
        .with_prompt("Set resize hints?")
        .default(false)
        .interact()?
    {
        options.max_file_size = prompt_optional("Max file size, e.g. 2MB (blank for none)")?;
        options.width = prompt_dimension("Width in px (blank for none)")?;
        options.height = prompt_dimension("Height in px (blank for none)")?;
    }

    let spinner = spinner("Uploading image...");
    let outcome = client.image_upload(path, &options);
    spinner.finish_and_clear();

    match outcome {
        Ok(body) => report_upload(&body),
        Err(e) => println!("Image upload failed: {}", e),
    }
    Ok(())
}

fn handle_delete<T: Transport>(client: &UploadflyClient<T>) -> Result<()> {
    let url: String = Input::new().with_prompt("File URL").interact_text()?;
    if !Confirm::new()
        .with_prompt(format!("Delete {}?", url))
        .default(false)
        .interact()?
    {
        return Ok(());
    }

    let spinner = spinner("Deleting...");
    let outcome = client.delete(&url);
    spinner.finish_and_clear();

    match outcome {
        Ok(body) => {
            match DeleteResponse::from_value(&body) {
                Ok(res) => println!("{}", res.data.message),
                Err(_) => println!("Delete request accepted"),
            }
            print_json(&body);
        }
        Err(e) => println!("Delete failed: {}", e),
    }
    Ok(())
}

fn report_upload(body: &Value) {
    if let Ok(res) = UploadResponse::from_value(body) {
        println!("Uploaded {} -> {}", res.data.name, res.data.url);
    }
    print_json(body);
}

fn print_json(body: &Value) {
    match serde_json::to_string_pretty(body) {
        Ok(text) => println!("{}", text),
        Err(_) => println!("{}", body),
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn prompt_path(prompt: &str) -> Result<PathBuf> {
    let raw: String = Input::new().with_prompt(prompt).interact_text()?;
    Ok(expand_home(raw.trim()))
}

fn prompt_optional(prompt: &str) -> Result<Option<String>> {
    let raw: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()?;
    let raw = raw.trim();
    Ok((!raw.is_empty()).then(|| raw.to_string()))
}

fn prompt_dimension(prompt: &str) -> Result<Option<u32>> {
    loop {
        match prompt_optional(prompt)? {
            None => return Ok(None),
            Some(raw) => match raw.parse::<u32>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => println!("'{}' is not a whole number of pixels", raw),
            },
        }
    }
}

/// Expand a leading `~/` against the user's home directory.
fn expand_home(raw: &str) -> PathBuf {
    match (raw.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(raw),
    }
}
