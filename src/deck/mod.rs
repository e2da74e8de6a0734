//! PowerPoint (`.pptx`) text extraction and rewriting.
//!
//! A presentation is opened from bytes, its text-bearing shapes are read into
//! [`Fragment`]s, and translated fragments are written back into a fresh copy
//! of the original bytes. Each fragment carries the [`ShapeKey`] of the shape
//! it came from, so the rewrite looks shapes up by key instead of relying on
//! two walks over the tree staying in step.

mod error;
mod extract;
mod package;
mod presentation;
mod rewrite;
mod slide;
mod xml;

use std::fmt;
use std::path::Path;

pub use error::{DeckError, Result};
pub use extract::{extract_fragments, fragment_texts};
pub use presentation::Presentation;
pub use rewrite::{
    DEFAULT_FONT_SIZE_PT, MAX_FONT_SIZE_PT, RewriteReport, render_translated, rewrite_presentation};
pub use slide::{LINE_BREAK, Slide, is_text_shape, shape_text};
pub use xml::Element;

/// The only container format accepted as input.
pub const PPTX_EXTENSION: &str = "pptx";

/// Identifies a shape: zero-based slide index and position among its shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeKey {
    pub slide: usize,
    pub position: usize,
}

impl fmt::Display for ShapeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slide {} shape {}", self.slide + 1, self.position + 1)
    }
}

/// Text of one text-bearing shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub key: ShapeKey,
    pub text: String,
}

impl Fragment {
    pub fn new(key: ShapeKey, text: impl Into<String>) -> Self {
        Self {
            key,
            text: text.into(),
        }
    }

    /// Same shape, different text.
    #[must_use]
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self::new(self.key, text)
    }
}

/// Fragments of one slide, in shape order.
pub type SlideFragments = Vec<Fragment>;

/// Rejects any input whose extension is not `.pptx` (case-insensitive).
pub fn ensure_pptx(path: &Path) -> Result<()> {
    let supported = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(PPTX_EXTENSION));

    if supported {
        Ok(())
    } else {
        Err(DeckError::UnsupportedFormat(path.display().to_string()))
    }
}
