//! In-memory hierarchy provider for fixtures and embedding callers.

use crate::model::node::RawNode;
use crate::provider::{HierarchyProvider, ProviderError, ProviderResult};
use log::error;
use std::collections::HashMap;

/// Provider serving a prebuilt hierarchy and page content map.
#[derive(Debug, Clone, Default)]
pub struct MemoryHierarchyProvider {
    hierarchy: RawNode,
    pages: HashMap<String, RawNode>,
}

impl MemoryHierarchyProvider {
    pub fn new(hierarchy: RawNode) -> Self {
        Self {
            hierarchy,
            pages: HashMap::new(),
        }
    }

    /// Registers the content returned for `page_id`.
    pub fn with_page(mut self, page_id: impl Into<String>, content: RawNode) -> Self {
        self.insert_page(page_id, content);
        self
    }

    pub fn insert_page(&mut self, page_id: impl Into<String>, content: RawNode) {
        self.pages.insert(page_id.into(), content);
    }
}

impl HierarchyProvider for MemoryHierarchyProvider {
    fn hierarchy(&self) -> ProviderResult<RawNode> {
        Ok(self.hierarchy.clone())
    }

    fn page_content(&self, page_id: &str) -> ProviderResult<RawNode> {
        match self.pages.get(page_id) {
            Some(content) => Ok(content.clone()),
            None => {
                error!(
                    "event=page_fetch module=provider status=error source=memory page_id={page_id} error_code=page_not_found"
                );
                Err(ProviderError::PageNotFound(page_id.to_string()))
            }
        }
    }
}
