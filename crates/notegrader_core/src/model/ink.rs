//! Handwritten marks on a page.

use crate::geometry::Rect;
use crate::model::node::RawNode;
use std::fmt::{Display, Formatter};

/// Element name of a free-form ink drawing.
pub const INK_DRAWING_NODE: &str = "InkDrawing";
/// Element name of a recognized handwriting word.
pub const INK_WORD_NODE: &str = "InkWord";

/// Whether an ink mark is a drawing or a recognized word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InkKind {
    Drawing,
    Word,
}

/// One handwritten mark with its bounding rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Ink {
    name: String,
    kind: InkKind,
    rect: Rect,
}

impl Ink {
    /// Builds an ink mark from an `InkDrawing` or `InkWord` node.
    ///
    /// Word rectangles are anchored at the negated ink origin; drawing
    /// rectangles come from `Position`/`Size` children.
    pub fn from_node(node: &RawNode, kind: InkKind) -> Self {
        match kind {
            InkKind::Word => Self {
                name: format!("[Text]: {}", node.attr_or("recognizedText", "")),
                kind,
                rect: Rect::new(
                    -node.attr_f32_or("inkOriginX", 0.0),
                    -node.attr_f32_or("inkOriginY", 0.0),
                    node.attr_f32_or("width", 0.0),
                    node.attr_f32_or("height", 0.0),
                ),
            },
            InkKind::Drawing => Self {
                name: "[Drawing]".to_string(),
                kind,
                rect: extract_rect(node),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> InkKind {
        self.kind
    }

    pub fn rect(&self) -> &Rect {
        &self.rect
    }
}

impl Display for Ink {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Reads a rectangle from `Position` (`x`, `y`) and `Size` (`width`, `height`)
/// children. Missing either child yields [`Rect::EMPTY`].
pub fn extract_rect(node: &RawNode) -> Rect {
    match (node.child("Position"), node.child("Size")) {
        (Some(position), Some(size)) => Rect::new(
            position.attr_f32_or("x", 0.0),
            position.attr_f32_or("y", 0.0),
            size.attr_f32_or("width", 0.0),
            size.attr_f32_or("height", 0.0),
        ),
        _ => Rect::EMPTY,
    }
}

#[cfg(test)]
mod tests {
    use super::{extract_rect, Ink, InkKind};
    use crate::geometry::Rect;
    use crate::model::node::RawNode;

    #[test]
    fn word_rect_negates_origin() {
        let node = RawNode::new("InkWord")
            .with_attr("recognizedText", "cat")
            .with_attr("inkOriginX", "-20.5")
            .with_attr("inkOriginY", "-4")
            .with_attr("width", "12")
            .with_attr("height", "6");
        let ink = Ink::from_node(&node, InkKind::Word);
        assert_eq!(ink.name(), "[Text]: cat");
        assert_eq!(*ink.rect(), Rect::new(20.5, 4.0, 12.0, 6.0));
    }

    #[test]
    fn drawing_rect_reads_position_and_size() {
        let node = RawNode::new("InkDrawing")
            .with_child(RawNode::new("Position").with_attr("x", "3").with_attr("y", "4"))
            .with_child(
                RawNode::new("Size")
                    .with_attr("width", "5")
                    .with_attr("height", "6"),
            );
        let ink = Ink::from_node(&node, InkKind::Drawing);
        assert_eq!(ink.to_string(), "[Drawing]");
        assert_eq!(*ink.rect(), Rect::new(3.0, 4.0, 5.0, 6.0));
    }

    #[test]
    fn missing_size_yields_empty_rect() {
        let node = RawNode::new("Image")
            .with_child(RawNode::new("Position").with_attr("x", "3").with_attr("y", "4"));
        assert_eq!(extract_rect(&node), Rect::EMPTY);
    }
}
