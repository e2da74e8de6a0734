#![allow(clippy::unwrap_used)]
//! Extraction and rewrite of real `.pptx` packages.

mod common;

use common::{Shape, build_deck, read_part, slide_part};
use slidetl::deck::{
    DeckError, Fragment, LINE_BREAK, Presentation, ShapeKey, SlideFragments, extract_fragments,
    fragment_texts, render_translated,
};

fn sample_deck() -> Vec<u8> {
    build_deck(&[
        vec![
            Shape::text("Quarterly Review"),
            Shape::Picture,
            Shape::text("Revenue\nCosts"),
        ],
        vec![],
        vec![Shape::Table("cell text".to_string()), Shape::text("안녕")],
    ])
}

fn extract(bytes: &[u8]) -> Vec<SlideFragments> {
    extract_fragments(&Presentation::open(bytes).unwrap())
}

fn replace_texts(extracted: &[SlideFragments], map: impl Fn(&str) -> String) -> Vec<SlideFragments> {
    extracted
        .iter()
        .map(|fragments| fragments.iter().map(|f| f.with_text(map(&f.text))).collect())
        .collect()
}

#[test]
fn test_slides_follow_presentation_order() {
    let bytes = sample_deck();
    let presentation = Presentation::open(&bytes).unwrap();

    let parts: Vec<_> = presentation.slides().iter().map(|s| s.part_name()).collect();
    assert_eq!(
        parts,
        [slide_part(3, 0), slide_part(3, 1), slide_part(3, 2)]
    );
}

#[test]
fn test_extraction_covers_text_shapes_only() {
    let extracted = extract(&sample_deck());

    assert_eq!(
        fragment_texts(&extracted),
        vec![
            vec!["Quarterly Review".to_string(), "Revenue\nCosts".to_string()],
            vec![],
            vec!["안녕".to_string()],
        ]
    );

    let keys: Vec<ShapeKey> = extracted.iter().flatten().map(|f| f.key).collect();
    assert_eq!(
        keys,
        [
            ShapeKey { slide: 0, position: 0 },
            ShapeKey { slide: 0, position: 2 },
            ShapeKey { slide: 2, position: 1 },
        ]
    );
}

#[test]
fn test_identity_rewrite_preserves_text_and_other_parts() {
    let original = sample_deck();
    let extracted = extract(&original);

    let (output, report) = render_translated(&original, &extracted, 10).unwrap();

    assert_eq!(report.rewritten, 3);
    assert_eq!(report.untouched, 0);
    assert_eq!(extract(&output), extracted);
    for part in ["ppt/presentation.xml", "ppt/_rels/presentation.xml.rels", "[Content_Types].xml"] {
        assert_eq!(read_part(&output, part), read_part(&original, part), "{part}");
    }
}

#[test]
fn test_translated_text_lands_in_the_same_shapes() {
    let original = build_deck(&[vec![Shape::text("안녕"), Shape::text("테스트")]]);
    let extracted = extract(&original);
    let translated = replace_texts(&extracted, |text| match text {
        "안녕" => "Hello".to_string(),
        "테스트" => "Test".to_string(),
        other => other.to_string(),
    });

    let (output, _) = render_translated(&original, &translated, 10).unwrap();

    assert_eq!(
        fragment_texts(&extract(&output)),
        vec![vec!["Hello".to_string(), "Test".to_string()]]
    );
    let slide = String::from_utf8(read_part(&output, &slide_part(1, 0))).unwrap();
    assert!(slide.contains(r#"sz="1000""#));
    assert!(!slide.contains(r#"sz="2400""#));
}

#[test]
fn test_font_size_is_configurable() {
    let original = build_deck(&[vec![Shape::text("One\nTwo")]]);
    let extracted = extract(&original);

    let (output, _) = render_translated(&original, &extracted, 14).unwrap();

    let presentation = Presentation::open(&output).unwrap();
    let shape = presentation.slides()[0].shape(0).unwrap();
    let body = shape.child("txBody").unwrap();
    let sizes: Vec<String> = body
        .elements()
        .filter(|e| e.local_name() == "p")
        .flat_map(|p| p.elements().filter(|e| e.local_name() == "r"))
        .map(|r| r.child("rPr").unwrap().attribute("sz").unwrap().into_owned())
        .collect();
    assert_eq!(sizes, ["1400", "1400"]);
}

#[test]
fn test_non_text_shapes_are_untouched() {
    let original = sample_deck();
    let extracted = extract(&original);
    let translated = replace_texts(&extracted, str::to_uppercase);

    let (output, _) = render_translated(&original, &translated, 10).unwrap();

    let third = String::from_utf8(read_part(&output, &slide_part(3, 2))).unwrap();
    assert!(third.contains("<a:t>cell text</a:t>"));
    let first = String::from_utf8(read_part(&output, &slide_part(3, 0))).unwrap();
    assert!(first.contains(r#"<a:blip r:embed="rId9"/>"#));
    assert!(first.contains("QUARTERLY REVIEW"));

    // The empty slide was never modified.
    assert_eq!(
        read_part(&output, &slide_part(3, 1)),
        read_part(&original, &slide_part(3, 1))
    );
}

#[test]
fn test_breaks_and_markup_characters_survive() {
    let original = build_deck(&[vec![Shape::text("placeholder")]]);
    let extracted = extract(&original);
    let text = format!("R&D <beta>{LINE_BREAK}\"quoted\"\nsecond line");
    let translated = replace_texts(&extracted, |_| text.clone());

    let (output, _) = render_translated(&original, &translated, 10).unwrap();

    assert_eq!(fragment_texts(&extract(&output)), vec![vec![text]]);
}

#[test]
fn test_empty_translation_clears_shape() {
    let original = build_deck(&[vec![Shape::text("   ")]]);
    let extracted = extract(&original);
    let translated = replace_texts(&extracted, |_| String::new());

    let (output, _) = render_translated(&original, &translated, 10).unwrap();

    assert_eq!(fragment_texts(&extract(&output)), vec![vec![String::new()]]);
}

#[test]
fn test_shape_without_text_body_gets_one() {
    let original = build_deck(&[vec![Shape::Bare]]);
    let extracted = extract(&original);
    assert_eq!(fragment_texts(&extracted), vec![vec![String::new()]]);

    let translated = replace_texts(&extracted, |_| "Label".to_string());
    let (output, _) = render_translated(&original, &translated, 10).unwrap();

    assert_eq!(fragment_texts(&extract(&output)), vec![vec!["Label".to_string()]]);
}

#[test]
fn test_shapes_without_fragment_are_reported_untouched() {
    let original = build_deck(&[vec![Shape::text("keep me"), Shape::text("change me")]]);
    let extracted = extract(&original);
    let translated = vec![vec![extracted[0][1].with_text("changed")]];

    let (output, report) = render_translated(&original, &translated, 10).unwrap();

    assert_eq!(report.rewritten, 1);
    assert_eq!(report.untouched, 1);
    assert_eq!(
        fragment_texts(&extract(&output)),
        vec![vec!["keep me".to_string(), "changed".to_string()]]
    );
}

#[test]
fn test_fragment_for_non_text_shape_is_misaligned() {
    let original = sample_deck();
    let key = ShapeKey {
        slide: 0,
        position: 1,
    };
    let translated = vec![vec![Fragment::new(key, "not a text shape")]];

    let err = render_translated(&original, &translated, 10).unwrap_err();
    assert!(matches!(err, DeckError::Misaligned { key: k } if k == key));
}

#[test]
fn test_fragment_for_missing_slide_is_misaligned() {
    let original = sample_deck();
    let key = ShapeKey {
        slide: 7,
        position: 0,
    };
    let translated = vec![vec![Fragment::new(key, "nowhere")]];

    assert!(matches!(
        render_translated(&original, &translated, 10),
        Err(DeckError::Misaligned { .. })
    ));
}

#[test]
fn test_invalid_bytes_are_an_archive_error() {
    assert!(matches!(
        Presentation::open(b"definitely not a zip file"),
        Err(DeckError::Archive(_))
    ));
}

#[test]
fn test_missing_slide_part_is_reported() {
    let bytes = sample_deck();
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes.as_slice())).unwrap();
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    let missing = slide_part(3, 1);
    for i in 0..archive.len() {
        let file = archive.by_index(i).unwrap();
        if file.name() != missing {
            writer.raw_copy_file(file).unwrap();
        }
    }
    let truncated = writer.finish().unwrap().into_inner();

    assert!(matches!(
        Presentation::open(&truncated),
        Err(DeckError::MissingPart(name)) if name == missing
    ));
}
