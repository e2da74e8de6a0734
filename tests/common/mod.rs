#![allow(dead_code, clippy::unwrap_used)]
//! Builds small `.pptx` files for tests.

use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const NS: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;
const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// One child of a slide's shape tree.
#[derive(Debug, Clone)]
pub enum Shape {
    /// Text box; `\n` separates paragraphs.
    Text(String),
    /// Auto-shape without a text body.
    Bare,
    Picture,
    Table(String),
}

impl Shape {
    pub fn text(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

pub fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn shape_xml(id: usize, shape: &Shape) -> String {
    match shape {
        Shape::Text(text) => {
            let paragraphs: String = text
                .split('\n')
                .map(|line| {
                    format!(
                        r#"<a:p><a:r><a:rPr lang="ko-KR" sz="2400" b="1"/><a:t>{}</a:t></a:r></a:p>"#,
                        escape(line)
                    )
                })
                .collect();
            format!(
                r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="TextBox {id}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="100" cy="100"/></a:xfrm></p:spPr><p:txBody><a:bodyPr wrap="square"/><a:lstStyle/>{paragraphs}</p:txBody></p:sp>"#
            )
        }
        Shape::Bare => format!(
            r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="Rectangle {id}"/><p:cNvSpPr/><p:nvPr/></p:nvSpPr><p:spPr/></p:sp>"#
        ),
        Shape::Picture => format!(
            r#"<p:pic><p:nvPicPr><p:cNvPr id="{id}" name="Picture {id}"/><p:cNvPicPr/><p:nvPr/></p:nvPicPr><p:blipFill><a:blip r:embed="rId9"/></p:blipFill><p:spPr/></p:pic>"#
        ),
        Shape::Table(cell) => format!(
            r#"<p:graphicFrame><p:nvGraphicFramePr><p:cNvPr id="{id}" name="Table {id}"/><p:cNvGraphicFramePr/><p:nvPr/></p:nvGraphicFramePr><p:xfrm/><a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/table"><a:tbl><a:tr h="100"><a:tc><a:txBody><a:bodyPr/><a:p><a:r><a:t>{}</a:t></a:r></a:p></a:txBody></a:tc></a:tr></a:tbl></a:graphicData></a:graphic></p:graphicFrame>"#,
            escape(cell)
        ),
    }
}

pub fn slide_xml(shapes: &[Shape]) -> String {
    let body: String = shapes
        .iter()
        .enumerate()
        .map(|(i, shape)| shape_xml(i + 2, shape))
        .collect();
    format!(
        r#"{XML_DECL}<p:sld {NS}><p:cSld><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/>{body}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#
    )
}

const fn part_number(slide_count: usize, index: usize) -> usize {
    slide_count - index
}

/// Part name of the slide at `index` in presentation order.
pub fn slide_part(slide_count: usize, index: usize) -> String {
    format!("ppt/slides/slide{}.xml", part_number(slide_count, index))
}

/// Builds a presentation with one slide per entry of `slides`.
pub fn build_deck(slides: &[Vec<Shape>]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    let slide_overrides: String = (1..=slides.len())
        .map(|n| {
            format!(
                r#"<Override PartName="/ppt/slides/slide{n}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#
            )
        })
        .collect();
    let content_types = format!(
        r#"{XML_DECL}<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/>{slide_overrides}</Types>"#
    );

    let root_rels = format!(
        r#"{XML_DECL}<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="ppt/presentation.xml"/></Relationships>"#
    );

    // Part numbers run backwards (the first slide lives in the highest
    // numbered part), so only sldIdLst gives the presentation order.
    let slide_ids: String = (0..slides.len())
        .map(|i| {
            let part = part_number(slides.len(), i);
            format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 256 + i, part + 1)
        })
        .collect();
    let presentation = format!(
        r#"{XML_DECL}<p:presentation {NS}><p:sldIdLst>{slide_ids}</p:sldIdLst><p:sldSz cx="9144000" cy="6858000"/></p:presentation>"#
    );

    let slide_rels: String = (1..=slides.len())
        .map(|n| {
            format!(
                r#"<Relationship Id="rId{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide{n}.xml"/>"#,
                n + 1
            )
        })
        .collect();
    let presentation_rels = format!(
        r#"{XML_DECL}<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{slide_rels}</Relationships>"#
    );

    let mut write = |name: &str, data: &str| {
        zip.start_file(name, options).unwrap();
        zip.write_all(data.as_bytes()).unwrap();
    };
    write("[Content_Types].xml", &content_types);
    write("_rels/.rels", &root_rels);
    write("ppt/presentation.xml", &presentation);
    write("ppt/_rels/presentation.xml.rels", &presentation_rels);
    for (i, shapes) in slides.iter().enumerate() {
        write(&slide_part(slides.len(), i), &slide_xml(shapes));
    }

    zip.finish().unwrap().into_inner()
}

/// Raw content of one part of a package.
pub fn read_part(bytes: &[u8], name: &str) -> Vec<u8> {
    use std::io::Read;

    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut data = Vec::new();
    file.read_to_end(&mut data).unwrap();
    data
}
