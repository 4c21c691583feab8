use docnav::{InMemoryNode, InMemoryPage, Page, PageNode, classes};

/// `href`s of every TOC link carrying the active marker
pub fn active_toc_links(page: &InMemoryPage) -> Vec<String> {
    page.toc_links()
        .into_iter()
        .filter(|link| link.has_class(classes::ACTIVE))
        .filter_map(|link| link.attribute("href"))
        .collect()
}

/// Every element carrying `class`, in document order
pub fn nodes_with_class(page: &InMemoryPage, class: &str) -> Vec<InMemoryNode> {
    page.all_nodes()
        .into_iter()
        .filter(|node| node.has_class(class))
        .collect()
}

/// The only element carrying `class`; panics if there are zero or several
pub fn single_with_class(page: &InMemoryPage, class: &str) -> InMemoryNode {
    let mut nodes = nodes_with_class(page, class);
    assert_eq!(nodes.len(), 1, "Expected exactly one '.{class}', found {}", nodes.len());
    nodes.remove(0)
}

/// Assert the set of active TOC links
#[macro_export]
macro_rules! assert_active_links {
    ($page:expr, $expected:expr) => {
        let active = $crate::common::page_assertions::active_toc_links(&$page);
        let expected: Vec<&str> = $expected.to_vec();
        assert_eq!(
            active, expected,
            "Active TOC links were {:?}, expected {:?}",
            active, expected
        );
    };
}

/// Assert that the mobile drawer and overlay are both open or both closed
#[macro_export]
macro_rules! assert_drawer_state {
    ($toc:expr, $overlay:expr, $open:expr) => {
        assert_eq!(
            $toc.has_class(docnav::classes::MOBILE_OPEN),
            $open,
            "TOC container open state"
        );
        assert_eq!(
            $overlay.has_class(docnav::classes::ACTIVE),
            $open,
            "overlay active state"
        );
    };
}
