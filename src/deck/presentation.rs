//! Opening and saving a `.pptx` presentation.

use super::error::{DeckError, Result};
use super::package::{Package, rels_part_name, resolve_target};
use super::slide::Slide;
use super::xml::{Element, XmlDocument};

const OFFICE_DOCUMENT_REL: &str = "/officeDocument";
const ROOT_RELS: &str = "_rels/.rels";

#[derive(Debug, Clone)]
struct Relationship {
    id: String,
    kind: String,
    target: String,
    external: bool,
}

/// A presentation: its package and its slides in presentation order.
#[derive(Debug, Clone)]
pub struct Presentation {
    package: Package,
    slides: Vec<Slide>,
}

impl Presentation {
    /// Opens a presentation from the bytes of a `.pptx` file.
    pub fn open(bytes: &[u8]) -> Result<Self> {
        let package = Package::from_bytes(bytes)?;

        let main_part = relationships(&package, ROOT_RELS)?
            .into_iter()
            .find(|rel| rel.kind.ends_with(OFFICE_DOCUMENT_REL) && !rel.external)
            .map(|rel| resolve_target("", &rel.target))
            .ok_or_else(|| DeckError::MissingPart("main presentation part".to_string()))?;

        let presentation = parse_part(&package, &main_part)?;
        let rels = relationships(&package, &rels_part_name(&main_part))?;

        let mut slides = Vec::new();
        let slide_ids = presentation
            .root()
            .child("sldIdLst")
            .into_iter()
            .flat_map(|list| list.elements())
            .filter(|e| e.local_name() == "sldId");

        for slide_id in slide_ids {
            let rel_id = relationship_id(slide_id)
                .ok_or_else(|| DeckError::xml(&main_part, "slide id without relationship"))?;
            let rel = rels
                .iter()
                .find(|rel| rel.id == rel_id)
                .ok_or_else(|| DeckError::MissingRelationship(rel_id.clone()))?;

            let part_name = resolve_target(&main_part, &rel.target);
            let xml = parse_part(&package, &part_name)?;
            slides.push(Slide::new(part_name, xml));
        }

        Ok(Self { package, slides })
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slides_mut(&mut self) -> &mut [Slide] {
        &mut self.slides
    }

    /// Serializes the presentation, consuming it.
    ///
    /// Only slides that were modified are re-serialized; every other part is
    /// written back unchanged.
    pub fn into_bytes(mut self) -> Result<Vec<u8>> {
        for slide in self.slides.iter().filter(|s| s.is_dirty()) {
            self.package
                .set_part(slide.part_name(), slide.xml().to_bytes());
        }
        self.package.to_bytes()
    }
}

fn parse_part(package: &Package, name: &str) -> Result<XmlDocument> {
    let bytes = package
        .part(name)
        .ok_or_else(|| DeckError::MissingPart(name.to_string()))?;
    XmlDocument::parse(name, bytes)
}

fn relationships(package: &Package, rels_part: &str) -> Result<Vec<Relationship>> {
    let doc = parse_part(package, rels_part)?;
    let rels = doc
        .root()
        .elements()
        .filter(|e| e.local_name() == "Relationship")
        .filter_map(|e| {
            Some(Relationship {
                id: e.attribute("Id")?.into_owned(),
                kind: e.attribute("Type")?.into_owned(),
                target: e.attribute("Target")?.into_owned(),
                external: e.attribute("TargetMode").as_deref() == Some("External"),
            })
        })
        .collect();
    Ok(rels)
}

/// The `r:id` of a `p:sldId`, whatever prefix the relationships namespace uses.
fn relationship_id(slide_id: &Element) -> Option<String> {
    slide_id
        .attributes
        .iter()
        .find(|(key, _)| key.split_once(':').is_some_and(|(_, local)| local == "id"))
        .and_then(|(key, _)| slide_id.attribute(key))
        .map(std::borrow::Cow::into_owned)
}
