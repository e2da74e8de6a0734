//! OPC package (zip container) access.

use std::io::{Cursor, Read, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use super::error::{DeckError, Result};

/// Largest decompressed size accepted for a single part (256 MiB).
pub const MAX_PART_SIZE: u64 = 256 * 1024 * 1024;

/// Largest decompressed size accepted for a whole package (1 GiB).
pub const MAX_PACKAGE_SIZE: u64 = 1024 * 1024 * 1024;

/// Decompression budget applied while reading a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeLimits {
    pub part: u64,
    pub total: u64,
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self {
            part: MAX_PART_SIZE,
            total: MAX_PACKAGE_SIZE,
        }
    }
}

#[derive(Debug, Clone)]
struct PackagePart {
    name: String,
    data: Vec<u8>,
    compression: CompressionMethod,
    is_dir: bool,
}

/// All entries of a `.pptx` container, in archive order.
#[derive(Debug, Clone)]
pub struct Package {
    parts: Vec<PackagePart>,
}

impl Package {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_bytes_with_limits(bytes, SizeLimits::default())
    }

    /// Reads every entry, failing once a part or the package as a whole
    /// decompresses past `limits`. Declared entry sizes are not trusted.
    pub fn from_bytes_with_limits(bytes: &[u8], limits: SizeLimits) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(bytes))?;
        let mut parts = Vec::with_capacity(archive.len());
        let mut total: u64 = 0;

        for index in 0..archive.len() {
            let mut entry = archive.by_index(index)?;
            let name = entry.name().to_string();
            let budget = limits.part.min(limits.total.saturating_sub(total));

            let mut data = Vec::new();
            entry
                .by_ref()
                .take(budget.saturating_add(1))
                .read_to_end(&mut data)?;

            let read = data.len() as u64;
            if read > budget {
                let limit = if read > limits.part {
                    limits.part
                } else {
                    limits.total
                };
                return Err(DeckError::TooLarge { part: name, limit });
            }
            total += read;

            parts.push(PackagePart {
                name,
                data,
                compression: entry.compression(),
                is_dir: entry.is_dir(),
            });
        }

        Ok(Self { parts })
    }

    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.parts
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.data.as_slice())
    }

    /// Replaces the contents of a part, appending it if it does not exist.
    pub fn set_part(&mut self, name: &str, data: Vec<u8>) {
        if let Some(part) = self.parts.iter_mut().find(|p| p.name == name) {
            part.data = data;
        } else {
            self.parts.push(PackagePart {
                name: name.to_string(),
                data,
                compression: CompressionMethod::Deflated,
                is_dir: false,
            });
        }
    }

    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.parts.iter().map(|p| p.name.as_str())
    }

    /// Serializes the package, keeping entry order and per-entry compression.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));

        for part in &self.parts {
            let method = match part.compression {
                CompressionMethod::Stored => CompressionMethod::Stored,
                _ => CompressionMethod::Deflated,
            };
            let options = SimpleFileOptions::default().compression_method(method);

            if part.is_dir {
                writer.add_directory(part.name.as_str(), options)?;
            } else {
                writer.start_file(part.name.as_str(), options)?;
                writer.write_all(&part.data)?;
            }
        }

        Ok(writer.finish()?.into_inner())
    }
}

/// Resolves a relationship target against the part that owns the relationship.
///
/// `("ppt/presentation.xml", "slides/slide1.xml")` -> `ppt/slides/slide1.xml`.
pub fn resolve_target(source_part: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return normalize(absolute);
    }
    let base = source_part.rsplit_once('/').map_or("", |(dir, _)| dir);
    if base.is_empty() {
        normalize(target)
    } else {
        normalize(&format!("{base}/{target}"))
    }
}

/// Name of the relationships part for a given part.
///
/// `ppt/presentation.xml` -> `ppt/_rels/presentation.xml.rels`.
pub fn rels_part_name(part: &str) -> String {
    match part.rsplit_once('/') {
        Some((dir, file)) => format!("{dir}/_rels/{file}.rels"),
        None => format!("_rels/{part}.rels"),
    }
}

fn normalize(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    segments.join("/")
}
