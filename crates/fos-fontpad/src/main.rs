//! fOS Fontpad - Main Entry Point

use std::io::{BufRead, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use fos_fontpad::fonts::FontCatalog;
use fos_fontpad::{execute, Command, EditorConfig, FileStorage, MemoryStorage, Outcome, Storage, StyleSheetRegistry, TextEditor};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let catalog_path = args
        .next()
        .context("usage: fos-fontpad <catalog.json> [storage.json]")?;

    let mut config = EditorConfig::from_env();
    if let Some(path) = args.next() {
        config.storage_path = Some(path.into());
    }

    let catalog = FontCatalog::load(Path::new(&catalog_path))
        .with_context(|| format!("failed to load font catalog {}", catalog_path))?;

    let storage: Box<dyn Storage> = match &config.storage_path {
        Some(path) => match FileStorage::open(path) {
            Ok(storage) => Box::new(storage),
            Err(e) => {
                tracing::warn!("Cannot use storage {}: {}; state will not be kept", path.display(), e);
                Box::new(MemoryStorage::new())
            }
        },
        None => Box::new(MemoryStorage::new()),
    };

    let registry = StyleSheetRegistry::new();
    let mut editor = TextEditor::open(Arc::new(catalog), storage, registry, &config);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match Command::parse(&line).and_then(|command| execute(&mut editor, command)) {
            Ok(Outcome::Output(output)) if output.is_empty() => {}
            Ok(Outcome::Output(output)) => writeln!(stdout, "{}", output)?,
            Ok(Outcome::Quit) => break,
            Err(e) => eprintln!("error: {}", e),
        }
        stdout.flush()?;
    }

    tracing::info!("Session closed");
    Ok(())
}
