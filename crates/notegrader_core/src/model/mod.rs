//! Classified document hierarchy: notebook -> section group -> section -> page.
//!
//! # Responsibility
//! - Build a read-only, fully classified tree from provider nodes in one
//!   top-down pass.
//! - Expose parent back-references as arena ids rather than owning pointers.
//!
//! # Invariants
//! - Every section belongs to exactly one notebook and at most one group.
//! - Entities are immutable after construction; only the notebook subject list
//!   grows while the pass runs.
//! - A fresh tree is built for every report cycle; nothing is patched in place.

use crate::classify::ClassifierConfig;
use crate::provider::{HierarchyProvider, ProviderError};
use chrono::{DateTime, FixedOffset};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod image;
pub mod ink;
pub mod node;
pub mod notebook;
pub mod page;
pub mod section;
pub mod section_group;
pub mod subject;

pub use notebook::{load_notebooks, Notebook};

/// Result type used by hierarchy construction.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while building the hierarchy.
#[derive(Debug)]
pub enum ModelError {
    /// Hierarchy or page content could not be fetched.
    Provider(ProviderError),
}

impl Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Provider(err) => write!(f, "hierarchy provider failed: {err}"),
        }
    }
}

impl Error for ModelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Provider(err) => Some(err),
        }
    }
}

impl From<ProviderError> for ModelError {
    fn from(value: ProviderError) -> Self {
        Self::Provider(value)
    }
}

/// Inputs shared by every constructor during one build pass.
#[derive(Clone, Copy)]
pub struct BuildContext<'a> {
    /// Source of hierarchy and page content.
    pub provider: &'a dyn HierarchyProvider,
    /// Classification thresholds.
    pub classifier: &'a ClassifierConfig,
    /// Reference time for recency checks.
    pub now: DateTime<FixedOffset>,
}

impl<'a> BuildContext<'a> {
    pub fn new(
        provider: &'a dyn HierarchyProvider,
        classifier: &'a ClassifierConfig,
        now: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            provider,
            classifier,
            now,
        }
    }
}

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(usize);

        impl $name {
            pub(crate) fn new(index: usize) -> Self {
                Self(index)
            }

            /// Position in the owning notebook's arena.
            pub fn index(self) -> usize {
                self.0
            }
        }
    };
}

arena_id!(
    /// Section group handle within one notebook.
    SectionGroupId
);
arena_id!(
    /// Section handle within one notebook.
    SectionId
);
arena_id!(
    /// Page handle within one notebook.
    PageId
);
