//! Section groups: the per-weekday folders of a student notebook.

use crate::model::node::RawNode;
use crate::model::section::{Section, SECTION_NODE};
use crate::model::{BuildContext, ModelResult, Notebook, SectionGroupId, SectionId};
use once_cell::sync::Lazy;
use regex::Regex;

/// Element name of a section group.
pub const SECTION_GROUP_NODE: &str = "SectionGroup";

// "1) Monday", "2. Tuesday", "3 Wednesday"; multi-word tails are left alone.
static NUMBERED_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d+\W* \w+$").expect("valid numbered name regex"));

/// A grouping folder, typically named after a weekday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionGroup {
    name: String,
    sections: Vec<SectionId>,
}

impl SectionGroup {
    /// Loads the group and its sections into `notebook`.
    pub(crate) fn load(
        node: &RawNode,
        notebook: &mut Notebook,
        ctx: &BuildContext<'_>,
    ) -> ModelResult<SectionGroupId> {
        let group_id = notebook.push_section_group(Self {
            name: normalize_group_name(node.attr_or("name", "untitled")),
            sections: Vec::new(),
        });

        for section_node in node.children_named(SECTION_NODE) {
            let section_id = Section::load(section_node, notebook, Some(group_id), ctx)?;
            notebook.section_group_mut(group_id).sections.push(section_id);
        }
        Ok(group_id)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sections of this group, as ids into the owning notebook.
    pub fn section_ids(&self) -> &[SectionId] {
        &self.sections
    }
}

/// Strips a numeric ordering prefix such as `1) ` from a single-word name.
pub fn normalize_group_name(raw: &str) -> String {
    if NUMBERED_NAME_RE.is_match(raw) {
        if let Some((_, tail)) = raw.rsplit_once(' ') {
            return tail.to_string();
        }
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::normalize_group_name;

    #[test]
    fn strips_numbered_prefixes() {
        assert_eq!(normalize_group_name("1) Monday"), "Monday");
        assert_eq!(normalize_group_name("12. Friday"), "Friday");
        assert_eq!(normalize_group_name("3 Wednesday"), "Wednesday");
    }

    #[test]
    fn leaves_other_names_unmodified() {
        assert_eq!(normalize_group_name("Monday"), "Monday");
        assert_eq!(normalize_group_name("1) Monday Work"), "1) Monday Work");
        assert_eq!(normalize_group_name("1)Monday"), "1)Monday");
        assert_eq!(normalize_group_name("Week 1"), "Week 1");
    }
}
