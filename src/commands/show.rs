use anyhow::{anyhow, Context};
use chrono::{TimeZone, Utc};

use crate::reference::Reference;
use crate::storage::PasteStore;
use crate::App;

/// Print a stored paste straight from the store, bypassing HTTP.
pub async fn run(app: App, reference: &str) -> anyhow::Result<()> {
    let reference = Reference::from_path(&format!("/{reference}"))
        .ok_or_else(|| anyhow!("reference '{reference}' is too short"))?;

    let paste = app
        .store
        .get(reference.as_str())
        .await
        .context("failed to read from store")?
        .ok_or_else(|| anyhow!("no paste stored under '{reference}'"))?;

    match Utc.timestamp_opt(paste.expire, 0).single() {
        Some(expire) => eprintln!("ref: {reference}, expires: {expire}"),
        None => eprintln!("ref: {reference}, expires: {} (unix)", paste.expire),
    }
    println!("{}", paste.body);

    Ok(())
}
