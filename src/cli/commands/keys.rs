//! Key store command handler.

use anyhow::Result;

use crate::cli::KeysCommand;
use crate::keystore::{KeyStore, mask_key};
use crate::ui::Style;

pub fn run_keys(command: KeysCommand) -> Result<()> {
    let mut store = KeyStore::open_default()?;

    match command {
        KeysCommand::List => print_keys(&store),
        KeysCommand::Add { key } => {
            if store.add(&key)? {
                store.save()?;
                crate::status!("{} Stored key {}", Style::success("✓"), mask_key(key.trim()));
            } else {
                crate::status!("Key {} is already stored", mask_key(key.trim()));
            }
        }
        KeysCommand::Remove { index } => {
            let removed = store.remove(index as usize - 1)?;
            store.save()?;
            crate::status!("{} Removed key {}", Style::success("✓"), mask_key(&removed));
        }
    }

    Ok(())
}

fn print_keys(store: &KeyStore) {
    if store.keys().is_empty() {
        println!("No API keys stored.");
        println!("Add one with: slidetl keys add <KEY>");
        return;
    }

    println!(
        "{} {}",
        Style::header("Stored API keys"),
        Style::secondary(store.path().display())
    );
    for (i, key) in store.keys().iter().enumerate() {
        let marker = if i == 0 { " (active)" } else { "" };
        println!(
            "  {}  {}{}",
            Style::label(i + 1),
            Style::value(mask_key(key)),
            Style::secondary(marker)
        );
    }
}
