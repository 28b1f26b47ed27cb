//! Student notebooks: the root of one classified hierarchy.
//!
//! # Responsibility
//! - Own every section group, section and page of one notebook in flat arenas.
//! - Resolve parent back-references (page -> section -> section group).
//! - Answer page status queries used by the reports.
//!
//! # Invariants
//! - Arena ids are only valid for the notebook that issued them.
//! - Section-group sections precede top-level sections in `sections()`.
//! - The subject list holds no duplicates and keeps registration order.

use crate::model::node::RawNode;
use crate::model::page::Page;
use crate::model::section::{Section, SECTION_NODE};
use crate::model::section_group::{SectionGroup, SECTION_GROUP_NODE};
use crate::model::subject::Subject;
use crate::model::{BuildContext, ModelResult, PageId, SectionGroupId, SectionId};
use log::info;
use std::time::Instant;

/// Element name of a notebook.
pub const NOTEBOOK_NODE: &str = "Notebook";

/// One student's notebook with its fully classified contents.
#[derive(Debug, Clone, PartialEq)]
pub struct Notebook {
    name: String,
    subjects: Vec<Subject>,
    section_groups: Vec<SectionGroup>,
    sections: Vec<Section>,
    pages: Vec<Page>,
}

impl Notebook {
    /// Builds and classifies a notebook from its hierarchy node in one pass.
    ///
    /// Section groups flagged as the recycle bin are skipped.
    pub fn build(node: &RawNode, ctx: &BuildContext<'_>) -> ModelResult<Self> {
        let started_at = Instant::now();
        let mut notebook = Self {
            name: node.attr_or("name", "untitled").to_string(),
            subjects: Vec::new(),
            section_groups: Vec::new(),
            sections: Vec::new(),
            pages: Vec::new(),
        };

        for group_node in node.children_named(SECTION_GROUP_NODE) {
            if group_node.attr_flag("isRecycleBin") {
                continue;
            }
            SectionGroup::load(group_node, &mut notebook, ctx)?;
        }
        for section_node in node.children_named(SECTION_NODE) {
            Section::load(section_node, &mut notebook, None, ctx)?;
        }

        info!(
            "event=notebook_build module=model status=ok notebook={} section_groups={} sections={} pages={} subjects={} duration_ms={}",
            notebook.name,
            notebook.section_groups.len(),
            notebook.sections.len(),
            notebook.pages.len(),
            notebook.subjects.len(),
            started_at.elapsed().as_millis()
        );
        Ok(notebook)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Subjects the student is assigned, in registration order.
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn has_subject(&self, subject: Subject) -> bool {
        self.subjects.contains(&subject)
    }

    pub fn section_groups(&self) -> &[SectionGroup] {
        &self.section_groups
    }

    /// All sections, grouped ones first, then top-level ones.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn section_group(&self, id: SectionGroupId) -> &SectionGroup {
        &self.section_groups[id.index()]
    }

    pub fn section(&self, id: SectionId) -> &Section {
        &self.sections[id.index()]
    }

    pub fn page(&self, id: PageId) -> &Page {
        &self.pages[id.index()]
    }

    /// Sections of one group, in document order.
    pub fn sections_in<'a>(
        &'a self,
        group: &'a SectionGroup,
    ) -> impl Iterator<Item = &'a Section> + 'a {
        group.section_ids().iter().map(move |id| self.section(*id))
    }

    /// Pages of one section, in document order.
    pub fn pages_in<'a>(&'a self, section: &'a Section) -> impl Iterator<Item = &'a Page> + 'a {
        section.page_ids().iter().map(move |id| self.page(*id))
    }

    pub fn page_section(&self, page: &Page) -> &Section {
        self.section(page.section())
    }

    pub fn page_section_group(&self, page: &Page) -> Option<&SectionGroup> {
        self.page_section(page)
            .section_group()
            .map(|id| self.section_group(id))
    }

    /// Subject of the section the page is filed under.
    pub fn page_subject(&self, page: &Page) -> Option<Subject> {
        self.page_section(page).subject()
    }

    /// Pages satisfying `check`, in arena order.
    pub fn pages_where<F>(&self, check: F) -> Vec<&Page>
    where
        F: Fn(&Page) -> bool,
    {
        self.pages.iter().filter(|&page| check(page)).collect()
    }

    /// Whether any page satisfies `check`.
    pub fn has_pages_where<F>(&self, check: F) -> bool
    where
        F: Fn(&Page) -> bool,
    {
        self.pages.iter().any(check)
    }

    /// Pages changed since their tag was assigned that also carry work.
    pub fn ungraded_pages(&self) -> Vec<&Page> {
        self.pages_where(|page| page.is_changed() && page.has_work())
    }

    pub fn inactive_pages(&self) -> Vec<&Page> {
        self.pages_where(|page| !page.is_active())
    }

    pub fn empty_pages(&self) -> Vec<&Page> {
        self.pages_where(Page::is_empty)
    }

    /// Pages whose tag name contains `marker`, ignoring case.
    pub fn unreviewed_pages(&self, marker: &str) -> Vec<&Page> {
        let marker = marker.to_lowercase();
        self.pages_where(|page| page.tag_name().to_lowercase().contains(&marker))
    }

    pub(crate) fn add_subject(&mut self, subject: Subject) {
        if !self.subjects.contains(&subject) {
            self.subjects.push(subject);
        }
    }

    pub(crate) fn push_section_group(&mut self, group: SectionGroup) -> SectionGroupId {
        self.section_groups.push(group);
        SectionGroupId::new(self.section_groups.len() - 1)
    }

    pub(crate) fn push_section(&mut self, section: Section) -> SectionId {
        self.sections.push(section);
        SectionId::new(self.sections.len() - 1)
    }

    pub(crate) fn push_page(&mut self, page: Page) -> PageId {
        self.pages.push(page);
        PageId::new(self.pages.len() - 1)
    }

    pub(crate) fn section_group_mut(&mut self, id: SectionGroupId) -> &mut SectionGroup {
        &mut self.section_groups[id.index()]
    }

    pub(crate) fn section_mut(&mut self, id: SectionId) -> &mut Section {
        &mut self.sections[id.index()]
    }
}

/// Fetches the hierarchy and builds every notebook in it.
///
/// Notebooks whose name contains `excluded_marker` are skipped; an empty
/// marker excludes nothing. A notebook without a name reads as the marker
/// itself and is skipped too.
pub fn load_notebooks(ctx: &BuildContext<'_>, excluded_marker: &str) -> ModelResult<Vec<Notebook>> {
    let started_at = Instant::now();
    let hierarchy = ctx.provider.hierarchy()?;

    let mut notebooks = Vec::new();
    let roots = std::iter::once(&hierarchy)
        .filter(|node| node.is(NOTEBOOK_NODE))
        .chain(hierarchy.descendants_named(NOTEBOOK_NODE));
    for node in roots {
        let name = node.attr_or("name", excluded_marker);
        if !excluded_marker.is_empty() && name.contains(excluded_marker) {
            info!("event=notebook_build module=model status=skip notebook={name} reason=excluded");
            continue;
        }
        notebooks.push(Notebook::build(node, ctx)?);
    }

    info!(
        "event=hierarchy_load module=model status=ok notebooks={} duration_ms={}",
        notebooks.len(),
        started_at.elapsed().as_millis()
    );
    Ok(notebooks)
}
