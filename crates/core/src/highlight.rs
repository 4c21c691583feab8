//! Active-section highlighting in the table of contents.
//!
//! On every scroll event the highlighter picks the last `h1`-`h3` whose top
//! is at or above `scrollY + offset` and marks the matching TOC link with
//! the `active` class. The marker is cleared from every TOC link first, so
//! re-running at the same position always yields the same single marker.

use crate::classes::ACTIVE;
use crate::enhancer::Setup;
use docnav_traits::{Lookup, Page, PageNode};
use std::rc::Rc;

#[derive(Clone)]
pub struct SectionHighlighter<P: Page> {
    page: P,
    offset: f64,
}

impl<P: Page> SectionHighlighter<P> {
    pub fn new(page: P, offset: f64) -> Self {
        Self { page, offset }
    }

    /// Highlight once for the current position, then on every scroll event.
    pub fn install(&self) -> Setup {
        self.highlight();
        let highlighter = self.clone();
        self.page.add_scroll_listener(Rc::new(move || {
            highlighter.highlight();
        }));
        Setup::Installed { bindings: 1 }
    }

    /// Recompute the active TOC link. Returns the id of the marked section.
    pub fn highlight(&self) -> Option<String> {
        let headings = self.page.headings();
        let scroll_pos = self.page.scroll_y() + self.offset;
        let current = current_section(headings.iter().map(PageNode::offset_top), scroll_pos)
            .map(|index| &headings[index]);

        for link in self.page.toc_links() {
            link.remove_class(ACTIVE);
        }

        let id = current.and_then(|heading| heading.id())?;
        match self.page.toc_link_for(&id) {
            Lookup::Found(link) => {
                link.add_class(ACTIVE);
                Some(id)
            }
            Lookup::Missing(region) => {
                log::trace!("Current section has no TOC entry: {region}");
                None
            }
        }
    }
}

/// Index of the last heading whose top offset is at or above `scroll_pos`.
///
/// Offsets are scanned in document order; later headings win ties.
pub fn current_section(offsets: impl IntoIterator<Item = f64>, scroll_pos: f64) -> Option<usize> {
    offsets
        .into_iter()
        .enumerate()
        .filter(|&(_, top)| top <= scroll_pos)
        .map(|(index, _)| index)
        .last()
}
