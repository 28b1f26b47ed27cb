//! Worksheet pages and their derived status.
//!
//! # Responsibility
//! - Fetch page content through the hierarchy provider and load inks/images.
//! - Resolve tag name, timestamps and the inferred assignment date.
//!
//! # Invariants
//! - Inks are loaded before images; images reference inks by index.
//! - A page without a tag uses the configured default tag and its creation
//!   time as the last assignment time.
//! - Status flags are computed once at construction and never change.

use crate::classify::{is_active, is_changed, original_assignment_date};
use crate::model::image::{Image, IMAGE_NODE};
use crate::model::ink::{Ink, InkKind, INK_DRAWING_NODE, INK_WORD_NODE};
use crate::model::node::RawNode;
use crate::model::{BuildContext, ModelResult, SectionId};
use chrono::{DateTime, FixedOffset, NaiveDate};
use log::{debug, warn};

/// Element name of a page.
pub const PAGE_NODE: &str = "Page";
/// Attribute holding the provider's page identifier.
pub const PAGE_ID_ATTR: &str = "ID";

const TAG_NODE: &str = "Tag";
const TAG_DEF_NODE: &str = "TagDef";

/// One worksheet/assignment page.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    id: String,
    name: String,
    section: SectionId,
    tag_name: String,
    created_at: DateTime<FixedOffset>,
    last_modified_at: DateTime<FixedOffset>,
    last_assigned_at: DateTime<FixedOffset>,
    original_assignment_date: NaiveDate,
    active: bool,
    changed: bool,
    has_work: bool,
    images: Vec<Image>,
    inks: Vec<Ink>,
}

impl Page {
    /// Builds a classified page from its hierarchy node.
    ///
    /// Page content is fetched by the node's `ID`. Nodes without an id carry
    /// no fetchable content and are classified from the hierarchy node alone.
    pub(crate) fn build(
        node: &RawNode,
        section: SectionId,
        section_group_name: Option<&str>,
        ctx: &BuildContext<'_>,
    ) -> ModelResult<Self> {
        let id = node.attr_or(PAGE_ID_ATTR, "").to_string();
        let fetched;
        let content = if id.is_empty() {
            warn!("event=page_fetch module=model status=skip reason=missing_page_id");
            node
        } else {
            fetched = ctx.provider.page_content(&id)?;
            &fetched
        };

        let name = node
            .attr("name")
            .or_else(|| content.attr("name"))
            .unwrap_or("untitled")
            .to_string();
        let created_at = read_timestamp(content, node, "dateTime");
        let last_modified_at = read_timestamp(content, node, "lastModifiedTime");

        let tag = content.descendants_named(TAG_NODE).next();
        let tag_name = tag
            .and_then(|tag| resolve_tag_name(content, tag))
            .unwrap_or(ctx.classifier.default_tag.as_str())
            .to_string();
        let last_assigned_at = tag
            .and_then(|tag| tag.attr_timestamp("creationDate"))
            .unwrap_or(created_at);

        let inks = load_inks(content);
        let images: Vec<Image> = content
            .descendants_named(IMAGE_NODE)
            .map(|image| Image::from_node(image, &inks, ctx.classifier))
            .collect();

        let page = Self {
            original_assignment_date: original_assignment_date(
                section_group_name,
                created_at,
                last_assigned_at,
            ),
            active: is_active(last_modified_at, ctx.now, ctx.classifier),
            changed: is_changed(last_modified_at, last_assigned_at),
            has_work: images.iter().any(Image::has_work),
            id,
            name,
            section,
            tag_name,
            created_at,
            last_modified_at,
            last_assigned_at,
            images,
            inks,
        };

        debug!(
            "event=page_build module=model status=ok page_id={} images={} inks={} has_work={}",
            page.id,
            page.images.len(),
            page.inks.len(),
            page.has_work
        );
        Ok(page)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Owning section in the notebook arena.
    pub fn section(&self) -> SectionId {
        self.section
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn created_at(&self) -> DateTime<FixedOffset> {
        self.created_at
    }

    pub fn last_modified_at(&self) -> DateTime<FixedOffset> {
        self.last_modified_at
    }

    pub fn last_assigned_at(&self) -> DateTime<FixedOffset> {
        self.last_assigned_at
    }

    pub fn original_assignment_date(&self) -> NaiveDate {
        self.original_assignment_date
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    pub fn has_work(&self) -> bool {
        self.has_work
    }

    /// A page with no worksheet images is empty.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn inks(&self) -> &[Ink] {
        &self.inks
    }

    /// Inks overlapping one of this page's images.
    pub fn image_inks<'p>(&'p self, image: &'p Image) -> impl Iterator<Item = &'p Ink> + 'p {
        image.inks(&self.inks)
    }
}

fn read_timestamp(content: &RawNode, fallback: &RawNode, name: &str) -> DateTime<FixedOffset> {
    content
        .attr_timestamp(name)
        .or_else(|| fallback.attr_timestamp(name))
        .unwrap_or_default()
}

fn resolve_tag_name<'a>(content: &'a RawNode, tag: &RawNode) -> Option<&'a str> {
    let index = tag.attr("index")?;
    content
        .descendants_named(TAG_DEF_NODE)
        .find(|def| def.attr("index") == Some(index))
        .and_then(|def| def.attr("name"))
}

fn load_inks(content: &RawNode) -> Vec<Ink> {
    content
        .descendants()
        .filter_map(|node| match node.name() {
            INK_DRAWING_NODE => Some(Ink::from_node(node, InkKind::Drawing)),
            INK_WORD_NODE => Some(Ink::from_node(node, InkKind::Word)),
            _ => None,
        })
        .collect()
}
