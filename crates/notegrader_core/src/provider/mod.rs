//! Hierarchy provider contract and implementations.
//!
//! # Responsibility
//! - Define how the core obtains the notebook skeleton and per-page content.
//! - Keep acquisition details (files, parsing) outside the model.
//!
//! # Invariants
//! - Providers are read-only; every call returns a fresh owned snapshot.
//! - Failures abort the current report cycle; the core never retries.

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::model::node::RawNode;

pub mod memory;
pub mod xml;

pub use memory::MemoryHierarchyProvider;
pub use xml::XmlExportProvider;

/// Result type used by provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Errors from hierarchy providers.
#[derive(Debug)]
pub enum ProviderError {
    /// Export file could not be read.
    Io {
        path: String,
        source: std::io::Error,
    },
    /// Export content is not well-formed XML.
    Xml { origin: String, message: String },
    /// Requested page id is unknown to the provider.
    PageNotFound(String),
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read `{path}`: {source}"),
            Self::Xml { origin, message } => write!(f, "invalid xml in {origin}: {message}"),
            Self::PageNotFound(page_id) => write!(f, "page not found: {page_id}"),
        }
    }
}

impl Error for ProviderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Xml { .. } => None,
            Self::PageNotFound(_) => None,
        }
    }
}

/// Opaque source of the notebook hierarchy and page content.
pub trait HierarchyProvider {
    /// Returns the full notebook/section-group/section/page skeleton.
    fn hierarchy(&self) -> ProviderResult<RawNode>;
    /// Returns the content (tags, inks, images) of one page.
    fn page_content(&self, page_id: &str) -> ProviderResult<RawNode>;
}
