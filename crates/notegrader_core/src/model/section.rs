//! Subject sections.
//!
//! # Invariants
//! - Only sections without a section group register their subject on the
//!   notebook; they declare the student's course load and load no pages.
//! - Sections inside a group use their subject for date matching only.

use crate::model::node::RawNode;
use crate::model::page::{Page, PAGE_NODE};
use crate::model::subject::Subject;
use crate::model::{BuildContext, ModelResult, Notebook, PageId, SectionGroupId, SectionId};

/// Element name of a section.
pub const SECTION_NODE: &str = "Section";

/// A subject folder holding worksheet pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    name: String,
    deleted: bool,
    subject: Option<Subject>,
    section_group: Option<SectionGroupId>,
    pages: Vec<PageId>,
}

impl Section {
    /// Loads the section into `notebook`, registering its subject or loading
    /// its pages depending on whether it sits in a section group.
    pub(crate) fn load(
        node: &RawNode,
        notebook: &mut Notebook,
        section_group: Option<SectionGroupId>,
        ctx: &BuildContext<'_>,
    ) -> ModelResult<SectionId> {
        let name = node.attr_or("name", "untitled").to_string();
        let subject = Subject::detect(&name);

        let section_id = notebook.push_section(Self {
            deleted: node.attr_flag("isInRecycleBin"),
            subject,
            section_group,
            pages: Vec::new(),
            name,
        });

        let Some(group_id) = section_group else {
            if let Some(subject) = subject {
                notebook.add_subject(subject);
            }
            return Ok(section_id);
        };

        let group_name = notebook.section_group(group_id).name().to_string();
        for page_node in node.children_named(PAGE_NODE) {
            let page = Page::build(page_node, section_id, Some(group_name.as_str()), ctx)?;
            let page_id = notebook.push_page(page);
            notebook.section_mut(section_id).pages.push(page_id);
        }
        Ok(section_id)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the section sits in the recycle bin.
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn subject(&self) -> Option<Subject> {
        self.subject
    }

    pub fn section_group(&self) -> Option<SectionGroupId> {
        self.section_group
    }

    pub fn page_ids(&self) -> &[PageId] {
        &self.pages
    }
}
