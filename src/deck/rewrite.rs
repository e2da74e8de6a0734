use std::collections::HashMap;

use super::error::{DeckError, Result};
use super::presentation::Presentation;
use super::slide::{is_text_shape, set_font_size, set_shape_text};
use super::{ShapeKey, SlideFragments};

/// Font size applied to every run of a rewritten shape.
pub const DEFAULT_FONT_SIZE_PT: u32 = 10;

/// Largest font size DrawingML accepts (`sz` tops out at 400000 hundredths).
pub const MAX_FONT_SIZE_PT: u32 = 4000;

/// Outcome of a rewrite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteReport {
    /// Text shapes whose text was replaced.
    pub rewritten: usize,
    /// Text shapes left as they were because no fragment names them.
    pub untouched: usize,
}

/// Writes translated fragments into their shapes.
///
/// Every fragment must name an existing text shape, otherwise nothing is
/// modified and [`DeckError::Misaligned`] is returned. Text shapes without a
/// fragment keep their content.
pub fn rewrite_presentation(
    presentation: &mut Presentation,
    translated: &[SlideFragments],
    font_size_pt: u32,
) -> Result<RewriteReport> {
    let mut by_key: HashMap<ShapeKey, &str> = HashMap::new();
    for fragment in translated.iter().flatten() {
        let key = fragment.key;
        let qualifies = presentation
            .slides()
            .get(key.slide)
            .and_then(|slide| slide.shape(key.position))
            .is_some_and(is_text_shape);
        if !qualifies {
            return Err(DeckError::Misaligned { key });
        }
        by_key.insert(key, fragment.text.as_str());
    }

    let mut report = RewriteReport::default();
    for (slide_index, slide) in presentation.slides_mut().iter_mut().enumerate() {
        let positions: Vec<usize> = slide.text_shapes().map(|(position, _)| position).collect();

        for position in positions {
            let key = ShapeKey {
                slide: slide_index,
                position,
            };
            let Some(text) = by_key.get(&key) else {
                report.untouched += 1;
                continue;
            };
            if let Some(shape) = slide.shape_mut(position) {
                set_shape_text(shape, text);
                set_font_size(shape, font_size_pt);
                report.rewritten += 1;
            }
        }
    }

    Ok(report)
}

/// Re-opens the original bytes, writes the fragments and serializes the result.
pub fn render_translated(
    original: &[u8],
    translated: &[SlideFragments],
    font_size_pt: u32,
) -> Result<(Vec<u8>, RewriteReport)> {
    let mut presentation = Presentation::open(original)?;
    let report = rewrite_presentation(&mut presentation, translated, font_size_pt)?;
    Ok((presentation.into_bytes()?, report))
}
