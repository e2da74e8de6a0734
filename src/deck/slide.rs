//! Slide shape trees and the text of their shapes.

use super::rewrite::MAX_FONT_SIZE_PT;
use super::xml::{Element, Node, XmlDocument};

/// Character used for a soft line break (`a:br`) inside a paragraph.
pub const LINE_BREAK: char = '\u{000B}';

/// Default DrawingML namespace prefix for elements created from scratch.
const DRAWING_PREFIX: &str = "a";

/// Elements of `p:spTree` that are shapes; anything else is tree metadata.
const SHAPE_ELEMENTS: &[&str] = &["sp", "grpSp", "graphicFrame", "cxnSp", "pic", "contentPart"];

fn is_shape_element(element: &Element) -> bool {
    SHAPE_ELEMENTS.contains(&element.local_name())
}

/// Whether a shape carries text.
///
/// Only auto-shapes (`p:sp`, placeholders included) qualify. Extraction and
/// rewrite must both go through this predicate.
pub fn is_text_shape(shape: &Element) -> bool {
    shape.local_name() == "sp"
}

/// One slide part and its parsed XML.
#[derive(Debug, Clone)]
pub struct Slide {
    part_name: String,
    xml: XmlDocument,
    dirty: bool,
}

impl Slide {
    pub(crate) const fn new(part_name: String, xml: XmlDocument) -> Self {
        Self {
            part_name,
            xml,
            dirty: false,
        }
    }

    pub fn part_name(&self) -> &str {
        &self.part_name
    }

    pub(crate) const fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub(crate) const fn xml(&self) -> &XmlDocument {
        &self.xml
    }

    /// Shapes in document order.
    pub fn shapes(&self) -> impl Iterator<Item = &Element> {
        self.xml
            .root()
            .child("cSld")
            .and_then(|c| c.child("spTree"))
            .into_iter()
            .flat_map(|tree| tree.elements())
            .filter(|e| is_shape_element(e))
    }

    /// Text-bearing shapes with their position among all shapes.
    pub fn text_shapes(&self) -> impl Iterator<Item = (usize, &Element)> {
        self.shapes()
            .enumerate()
            .filter(|(_, shape)| is_text_shape(shape))
    }

    pub fn shape(&self, position: usize) -> Option<&Element> {
        self.shapes().nth(position)
    }

    /// Mutable access to a shape; marks the slide for re-serialization.
    pub fn shape_mut(&mut self, position: usize) -> Option<&mut Element> {
        self.dirty = true;
        self.xml
            .root_mut()
            .child_mut("cSld")
            .and_then(|c| c.child_mut("spTree"))
            .into_iter()
            .flat_map(|tree| tree.elements_mut())
            .filter(|e| is_shape_element(e))
            .nth(position)
    }
}

/// Text of a shape: paragraphs joined with `\n`, line breaks as [`LINE_BREAK`].
pub fn shape_text(shape: &Element) -> String {
    let Some(body) = shape.child("txBody") else {
        return String::new();
    };
    body.elements()
        .filter(|e| e.local_name() == "p")
        .map(paragraph_text)
        .collect::<Vec<_>>()
        .join("\n")
}

fn paragraph_text(paragraph: &Element) -> String {
    let mut text = String::new();
    for child in paragraph.elements() {
        match child.local_name() {
            "r" | "fld" => {
                if let Some(t) = child.child("t") {
                    text.push_str(&t.text());
                }
            }
            "br" => text.push(LINE_BREAK),
            _ => {}
        }
    }
    text
}

/// Replaces all paragraphs of a shape with `text`, one paragraph per line.
///
/// Runs are created without formatting; a missing text body is created.
pub fn set_shape_text(shape: &mut Element, text: &str) {
    let prefix = drawing_prefix(shape);
    let Some(body) = text_body_mut(shape, &prefix) else {
        return;
    };

    body.remove_elements(|e| e.local_name() == "p");
    for line in text.split('\n') {
        body.children
            .push(Node::Element(build_paragraph(&prefix, line)));
    }
}

/// Sets the size of every run in the shape, in whole points.
///
/// Sizes are clamped to `1..=MAX_FONT_SIZE_PT`.
pub fn set_font_size(shape: &mut Element, points: u32) {
    let size = (points.clamp(1, MAX_FONT_SIZE_PT) * 100).to_string();
    let Some(body) = shape.child_mut("txBody") else {
        return;
    };

    for paragraph in body.elements_mut().filter(|e| e.local_name() == "p") {
        for run in paragraph.elements_mut().filter(|e| e.local_name() == "r") {
            run_properties_mut(run).set_attribute("sz", &size);
        }
    }
}

fn drawing_prefix(shape: &Element) -> String {
    shape
        .child("txBody")
        .and_then(|body| body.elements().find_map(Element::prefix))
        .unwrap_or(DRAWING_PREFIX)
        .to_string()
}

fn qualified(prefix: Option<&str>, local: &str) -> String {
    prefix.map_or_else(|| local.to_string(), |p| format!("{p}:{local}"))
}

fn text_body_mut<'a>(shape: &'a mut Element, prefix: &str) -> Option<&'a mut Element> {
    if shape.child("txBody").is_none() {
        let mut body = Element::new(qualified(shape.prefix(), "txBody"));
        body.children
            .push(Node::Element(Element::new(format!("{prefix}:bodyPr"))));
        body.children
            .push(Node::Element(Element::new(format!("{prefix}:lstStyle"))));

        // CT_Shape keeps extLst last
        let at = shape
            .children
            .iter()
            .position(|n| matches!(n, Node::Element(e) if e.local_name() == "extLst"))
            .unwrap_or(shape.children.len());
        shape.children.insert(at, Node::Element(body));
    }
    shape.child_mut("txBody")
}

fn build_paragraph(prefix: &str, line: &str) -> Element {
    let mut paragraph = Element::new(format!("{prefix}:p"));
    for (index, segment) in line.split(LINE_BREAK).enumerate() {
        if index > 0 {
            paragraph
                .children
                .push(Node::Element(Element::new(format!("{prefix}:br"))));
        }
        if !segment.is_empty() {
            let mut run = Element::new(format!("{prefix}:r"));
            run.children.push(Node::Element(Element::with_text(
                format!("{prefix}:t"),
                segment,
            )));
            paragraph.children.push(Node::Element(run));
        }
    }
    paragraph
}

/// `a:rPr` of a run, created as its first child when absent.
fn run_properties_mut(run: &mut Element) -> &mut Element {
    let index = run
        .children
        .iter()
        .position(|n| matches!(n, Node::Element(e) if e.local_name() == "rPr"));

    let index = index.unwrap_or_else(|| {
        let name = qualified(run.prefix(), "rPr");
        run.children.insert(0, Node::Element(Element::new(name)));
        0
    });

    match &mut run.children[index] {
        Node::Element(properties) => properties,
        _ => unreachable!("index points at an element"),
    }
}
