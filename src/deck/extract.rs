use super::presentation::Presentation;
use super::slide::shape_text;
use super::{Fragment, ShapeKey, SlideFragments};

/// Reads the text of every text-bearing shape, one list per slide.
///
/// Slides without text shapes still get an (empty) entry so the outer list
/// always has one element per slide.
pub fn extract_fragments(presentation: &Presentation) -> Vec<SlideFragments> {
    presentation
        .slides()
        .iter()
        .enumerate()
        .map(|(slide, s)| {
            s.text_shapes()
                .map(|(position, shape)| {
                    Fragment::new(ShapeKey { slide, position }, shape_text(shape))
                })
                .collect()
        })
        .collect()
}

/// Plain text view of extracted fragments.
pub fn fragment_texts(slides: &[SlideFragments]) -> Vec<Vec<String>> {
    slides
        .iter()
        .map(|fragments| fragments.iter().map(|f| f.text.clone()).collect())
        .collect()
}
