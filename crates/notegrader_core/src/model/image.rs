//! Worksheet images placed on a page.

use crate::classify::{image_has_work, ClassifierConfig};
use crate::geometry::Rect;
use crate::model::ink::{extract_rect, Ink};
use crate::model::node::RawNode;

/// Element name of a page image.
pub const IMAGE_NODE: &str = "Image";

/// A scanned worksheet region and the ink marks drawn over it.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    rect: Rect,
    /// Indices into the owning page's ink list.
    ink_indices: Vec<usize>,
    has_work: bool,
}

impl Image {
    /// Builds an image from its node, selecting every page ink whose rectangle
    /// intersects the image.
    ///
    /// `page_inks` must be the fully loaded ink list of the owning page.
    pub fn from_node(node: &RawNode, page_inks: &[Ink], config: &ClassifierConfig) -> Self {
        let rect = extract_rect(node);
        let ink_indices: Vec<usize> = page_inks
            .iter()
            .enumerate()
            .filter(|(_, ink)| rect.intersects_with(ink.rect()))
            .map(|(index, _)| index)
            .collect();
        let has_work = image_has_work(
            &rect,
            ink_indices.iter().map(|&index| page_inks[index].rect()),
            config,
        );

        Self {
            rect,
            ink_indices,
            has_work,
        }
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }

    pub fn has_work(&self) -> bool {
        self.has_work
    }

    pub fn ink_count(&self) -> usize {
        self.ink_indices.len()
    }

    pub fn ink_indices(&self) -> &[usize] {
        &self.ink_indices
    }

    /// Resolves the overlapping inks against the owning page's ink list.
    pub fn inks<'p>(&'p self, page_inks: &'p [Ink]) -> impl Iterator<Item = &'p Ink> + 'p {
        self.ink_indices
            .iter()
            .filter_map(move |&index| page_inks.get(index))
    }
}
