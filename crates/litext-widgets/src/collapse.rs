#![forbid(unsafe_code)]

//! Collapse toggles for border regions.
//!
//! A toggle is a small button prepended into a collapsible region. The
//! container owns it: every render removes the old toggles before creating
//! new ones.

use litext_core::dom::{Document, NodeId};
use litext_core::error::DomError;
use litext_layout::Region;

/// Class of the toggle button.
pub const COLLAPSE_TOGGLE_CLASS: &str = "collapse-toggle";

/// Class carried by a collapsed region element.
pub const COLLAPSED_CLASS: &str = "collapsed";

/// Glyph shown while the region is expanded.
pub const EXPANDED_GLYPH: &str = "\u{2796}";

/// Glyph shown while the region is collapsed.
pub const COLLAPSED_GLYPH: &str = "\u{2795}";

/// Glyph for a region in the given state.
#[must_use]
pub const fn glyph(collapsed: bool) -> &'static str {
    if collapsed {
        COLLAPSED_GLYPH
    } else {
        EXPANDED_GLYPH
    }
}

/// A toggle button attached to one region element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollapseToggle {
    node: NodeId,
    region: Region,
    element: NodeId,
    item_index: usize,
}

impl CollapseToggle {
    /// Create the button and prepend it into `element`.
    pub fn attach(
        doc: &mut Document,
        region: Region,
        element: NodeId,
        item_index: usize,
        collapsed: bool,
    ) -> Result<Self, DomError> {
        let node = doc.create_element("button");
        doc.add_class(node, COLLAPSE_TOGGLE_CLASS)?;
        doc.set_attribute(node, "type", "button")?;
        doc.set_attribute(node, "data-region", region.as_str())?;
        doc.prepend_child(element, node)?;
        let toggle = Self {
            node,
            region,
            element,
            item_index,
        };
        toggle.sync(doc, collapsed)?;
        Ok(toggle)
    }

    #[must_use]
    pub const fn node(&self) -> NodeId {
        self.node
    }

    #[must_use]
    pub const fn region(&self) -> Region {
        self.region
    }

    /// Index of the owning item in the container.
    #[must_use]
    pub const fn item_index(&self) -> usize {
        self.item_index
    }

    /// Whether an event target lies on this toggle.
    #[must_use]
    pub fn is_hit(&self, doc: &Document, target: NodeId) -> bool {
        doc.contains(self.node, target)
    }

    /// Write the collapsed class on the region and the glyph on the button.
    pub fn sync(&self, doc: &mut Document, collapsed: bool) -> Result<(), DomError> {
        doc.toggle_class(self.element, COLLAPSED_CLASS, Some(collapsed))?;
        doc.set_text_content(self.node, glyph(collapsed))
    }

    /// Destroy the button. The region element keeps its collapsed class.
    pub fn detach(self, doc: &mut Document) -> Result<(), DomError> {
        if doc.is_alive(self.node) {
            doc.remove(self.node)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_is_first_child_with_glyph() {
        let mut doc = Document::new();
        let west = doc.create_element("div");
        let content = doc.create_text("nav");
        doc.append_child(west, content).unwrap();

        let toggle = CollapseToggle::attach(&mut doc, Region::West, west, 0, false).unwrap();
        assert_eq!(doc.children(west)[0], toggle.node());
        assert_eq!(doc.text_content(toggle.node()), EXPANDED_GLYPH);
        assert!(!doc.has_class(west, COLLAPSED_CLASS));
    }

    #[test]
    fn sync_flips_class_and_glyph() {
        let mut doc = Document::new();
        let west = doc.create_element("div");
        let toggle = CollapseToggle::attach(&mut doc, Region::West, west, 0, false).unwrap();
        toggle.sync(&mut doc, true).unwrap();
        assert!(doc.has_class(west, COLLAPSED_CLASS));
        assert_eq!(doc.text_content(toggle.node()), COLLAPSED_GLYPH);
        toggle.sync(&mut doc, false).unwrap();
        assert!(!doc.has_class(west, COLLAPSED_CLASS));
    }

    #[test]
    fn hit_test_and_detach() {
        let mut doc = Document::new();
        let west = doc.create_element("div");
        let toggle = CollapseToggle::attach(&mut doc, Region::West, west, 3, true).unwrap();
        assert!(toggle.is_hit(&doc, toggle.node()));
        assert!(!toggle.is_hit(&doc, west));
        assert_eq!(toggle.item_index(), 3);
        toggle.detach(&mut doc).unwrap();
        assert!(doc.children(west).is_empty());
        assert!(doc.has_class(west, COLLAPSED_CLASS));
    }
}
