//! Page wrappers for exercising partial-failure paths.

use docnav_traits::{
    CodeBlock, DomError, InMemoryNode, InMemoryPage, Lookup, Page, ScrollListener,
};
use std::cell::Cell;
use std::rc::Rc;

/// An [`InMemoryPage`] whose `create_element` fails for the `nth` (0-based)
/// element of one tag, and succeeds for every other call.
#[derive(Clone)]
pub(crate) struct FlakyPage {
    inner: InMemoryPage,
    tag: &'static str,
    nth: usize,
    created: Rc<Cell<usize>>,
}

impl FlakyPage {
    pub(crate) fn failing_nth(inner: InMemoryPage, tag: &'static str, nth: usize) -> Self {
        Self {
            inner,
            tag,
            nth,
            created: Rc::new(Cell::new(0)),
        }
    }
}

impl Page for FlakyPage {
    type Node = InMemoryNode;

    fn fragment_links(&self) -> Vec<InMemoryNode> {
        self.inner.fragment_links()
    }

    fn element_by_id(&self, id: &str) -> Lookup<InMemoryNode> {
        self.inner.element_by_id(id)
    }

    fn headings(&self) -> Vec<InMemoryNode> {
        self.inner.headings()
    }

    fn toc_links(&self) -> Vec<InMemoryNode> {
        self.inner.toc_links()
    }

    fn toc_container(&self) -> Lookup<InMemoryNode> {
        self.inner.toc_container()
    }

    fn code_blocks(&self) -> Vec<CodeBlock<InMemoryNode>> {
        self.inner.code_blocks()
    }

    fn head(&self) -> Lookup<InMemoryNode> {
        self.inner.head()
    }

    fn body(&self) -> Lookup<InMemoryNode> {
        self.inner.body()
    }

    fn create_element(&self, tag: &str) -> Result<InMemoryNode, DomError> {
        if tag == self.tag {
            let index = self.created.get();
            self.created.set(index + 1);
            if index == self.nth {
                return Err(DomError::CreateElement {
                    tag: tag.to_string(),
                    message: "injected failure".to_string(),
                });
            }
        }
        self.inner.create_element(tag)
    }

    fn scroll_y(&self) -> f64 {
        self.inner.scroll_y()
    }

    fn add_scroll_listener(&self, listener: ScrollListener) {
        self.inner.add_scroll_listener(listener);
    }
}
