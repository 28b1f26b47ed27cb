//! Provider reading an on-disk XML export of the notebook application.
//!
//! # Responsibility
//! - Read `hierarchy.xml` and `pages/<page-id>.xml` from an export directory.
//! - Convert XML elements into namespace-free [`RawNode`] trees.
//!
//! # Invariants
//! - Only element nodes are kept; text and comments are dropped.
//! - Page ids never escape the `pages/` directory.

use crate::model::node::RawNode;
use crate::provider::{HierarchyProvider, ProviderError, ProviderResult};
use log::{error, info};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// File name of the hierarchy skeleton inside an export directory.
pub const HIERARCHY_FILE_NAME: &str = "hierarchy.xml";
/// Directory holding one content file per page.
pub const PAGES_DIR_NAME: &str = "pages";

/// Hierarchy provider backed by an export directory.
#[derive(Debug, Clone)]
pub struct XmlExportProvider {
    root: PathBuf,
}

impl XmlExportProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of the content file for `page_id`.
    pub fn page_path(&self, page_id: &str) -> PathBuf {
        self.root
            .join(PAGES_DIR_NAME)
            .join(format!("{}.xml", sanitize_page_id(page_id)))
    }

    fn read_node(&self, path: &Path, event: &str) -> ProviderResult<RawNode> {
        let started_at = Instant::now();
        let display = path.display().to_string();
        let xml = std::fs::read_to_string(path).map_err(|err| {
            error!(
                "event={event} module=provider status=error source=xml path={display} error_code=read_failed error={err}"
            );
            ProviderError::Io {
                path: display.clone(),
                source: err,
            }
        })?;
        let node = parse_xml_node(&xml, &display)?;
        info!(
            "event={event} module=provider status=ok source=xml path={display} duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(node)
    }
}

impl HierarchyProvider for XmlExportProvider {
    fn hierarchy(&self) -> ProviderResult<RawNode> {
        self.read_node(&self.root.join(HIERARCHY_FILE_NAME), "hierarchy_fetch")
    }

    fn page_content(&self, page_id: &str) -> ProviderResult<RawNode> {
        let path = self.page_path(page_id);
        if !path.is_file() {
            error!(
                "event=page_fetch module=provider status=error source=xml page_id={page_id} error_code=page_not_found"
            );
            return Err(ProviderError::PageNotFound(page_id.to_string()));
        }
        self.read_node(&path, "page_fetch")
    }
}

impl RawNode {
    /// Parses an XML document into a raw node tree rooted at its root element.
    pub fn parse_xml(xml: &str) -> ProviderResult<RawNode> {
        parse_xml_node(xml, "inline document")
    }
}

/// Parses `xml`, naming `origin` in any error.
pub fn parse_xml_node(xml: &str, origin: &str) -> ProviderResult<RawNode> {
    let document = roxmltree::Document::parse(xml).map_err(|err| ProviderError::Xml {
        origin: origin.to_string(),
        message: err.to_string(),
    })?;
    Ok(convert_element(document.root_element()))
}

fn convert_element(element: roxmltree::Node<'_, '_>) -> RawNode {
    let mut node = RawNode::new(element.tag_name().name());
    for attribute in element.attributes() {
        node.set_attr(attribute.name(), attribute.value());
    }
    for child in element.children().filter(|child| child.is_element()) {
        node.push_child(convert_element(child));
    }
    node
}

/// Maps a page id onto a safe file stem.
///
/// Keeps ASCII alphanumerics, `-`, `_`, `{` and `}`; everything else becomes `_`.
pub fn sanitize_page_id(page_id: &str) -> String {
    page_id
        .chars()
        .map(|ch| match ch {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '{' | '}' => ch,
            _ => '_',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{parse_xml_node, sanitize_page_id};
    use crate::model::node::RawNode;
    use crate::provider::ProviderError;

    #[test]
    fn namespace_prefixes_are_dropped() {
        let xml = r#"<one:Notebooks xmlns:one="http://schemas.microsoft.com/office/onenote/2013/onenote">
            <one:Notebook name="Ada" ID="nb-1">
                <!-- comment -->
                <one:Section name="Math" />
            </one:Notebook>
        </one:Notebooks>"#;
        let root = RawNode::parse_xml(xml).unwrap();
        assert_eq!(root.name(), "Notebooks");
        let notebook = root.child("Notebook").unwrap();
        assert_eq!(notebook.attr("name"), Some("Ada"));
        assert_eq!(notebook.children().len(), 1);
        assert_eq!(notebook.children()[0].name(), "Section");
    }

    #[test]
    fn malformed_xml_reports_origin() {
        let err = parse_xml_node("<Page>", "pages/p1.xml").unwrap_err();
        match err {
            ProviderError::Xml { origin, .. } => assert_eq!(origin, "pages/p1.xml"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn page_ids_cannot_traverse_directories() {
        assert_eq!(sanitize_page_id("{AB-12}{1}{B0}"), "{AB-12}{1}{B0}");
        assert_eq!(sanitize_page_id("../../etc/passwd"), "______etc_passwd");
        assert_eq!(sanitize_page_id("a\\b:c"), "a_b_c");
    }
}
