use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

use crate::deck::ensure_pptx;

/// Largest presentation accepted as input (200 MB).
pub const MAX_INPUT_SIZE: u64 = 200 * 1024 * 1024;

pub struct InputReader;

impl InputReader {
    /// Reads a `.pptx` file into memory after checking its extension and size.
    pub fn read_presentation(path: &Path) -> Result<Vec<u8>> {
        ensure_pptx(path)?;

        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to access file: {}", path.display()))?;
        if !metadata.is_file() {
            bail!("Not a file: {}", path.display());
        }

        let size = metadata.len();
        if size > MAX_INPUT_SIZE {
            #[allow(clippy::cast_precision_loss)]
            let megabytes = size as f64 / 1024.0 / 1024.0;
            bail!(
                "Input size ({megabytes:.1} MB) exceeds maximum allowed size (200 MB).\n\n\
                 Consider splitting the presentation into smaller decks."
            );
        }

        fs::read(path).with_context(|| format!("Failed to read file: {}", path.display()))
    }
}
