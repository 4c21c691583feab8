//! Smooth scrolling for same-page anchor links.

use crate::enhancer::Setup;
use docnav_traits::{EventKind, Lookup, Page, PageNode, Region};
use std::rc::Rc;

/// Replaces the native jump-to-anchor with an animated scroll.
#[derive(Clone)]
pub struct SmoothScroller<P: Page> {
    page: P,
}

impl<P: Page> SmoothScroller<P> {
    pub fn new(page: P) -> Self {
        Self { page }
    }

    /// Subscribe to clicks on every fragment link currently in the page.
    pub fn install(&self) -> Setup {
        let links = self.page.fragment_links();
        for link in &links {
            let scroller = self.clone();
            let anchor = link.clone();
            link.add_listener(
                EventKind::Click,
                Rc::new(move |event| {
                    event.prevent_default();
                    let href = anchor.attribute("href").unwrap_or_default();
                    if let Lookup::Missing(region) = scroller.scroll_to(&href) {
                        log::trace!("No scroll target for '{href}': {region}");
                    }
                }),
            );
        }
        Setup::Installed {
            bindings: links.len(),
        }
    }

    /// Scroll the element addressed by `href` (`#id`) to the top of the viewport.
    ///
    /// Returns the target, or the region that could not be found.
    pub fn scroll_to(&self, href: &str) -> Lookup<P::Node> {
        let target = match fragment_id(href) {
            Some(id) => self.page.element_by_id(id),
            None => Lookup::Missing(Region::Element(String::new())),
        };
        if let Lookup::Found(node) = &target {
            node.scroll_into_view();
        }
        target
    }
}

/// The id part of a fragment reference; `None` for `#` or a non-fragment href.
pub fn fragment_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docnav_traits::{InMemoryNode, InMemoryPage};

    fn page_with_target() -> (InMemoryPage, InMemoryNode, InMemoryNode) {
        let link = InMemoryNode::new("a").with_attr("href", "#usage");
        let target = InMemoryNode::new("h2").with_id("usage");
        let page = InMemoryPage::new()
            .with_child(link.clone())
            .with_child(target.clone());
        (page, link, target)
    }

    #[test]
    fn test_fragment_id() {
        assert_eq!(fragment_id("#intro"), Some("intro"));
        assert_eq!(fragment_id("#"), None);
        assert_eq!(fragment_id("intro"), None);
        assert_eq!(fragment_id("/docs#intro"), None);
    }

    #[test]
    fn test_click_scrolls_smoothly_to_target() {
        let (page, link, target) = page_with_target();
        let setup = SmoothScroller::new(page).install();
        assert_eq!(setup, Setup::Installed { bindings: 1 });

        let event = link.click();
        assert!(event.default_prevented());
        assert_eq!(target.scroll_requests(), 1);
    }

    #[test]
    fn test_missing_target_still_prevents_default() {
        let link = InMemoryNode::new("a").with_attr("href", "#nowhere");
        let bystander = InMemoryNode::new("h2").with_id("elsewhere");
        let page = InMemoryPage::new()
            .with_child(link.clone())
            .with_child(bystander.clone());
        SmoothScroller::new(page).install();

        assert!(link.click().default_prevented());
        assert_eq!(bystander.scroll_requests(), 0);
    }

    #[test]
    fn test_bare_hash_is_a_no_op() {
        let link = InMemoryNode::new("a").with_attr("href", "#");
        let page = InMemoryPage::new().with_child(link.clone());
        let scroller = SmoothScroller::new(page);
        scroller.install();

        assert!(link.click().default_prevented());
        assert!(!scroller.scroll_to("#").is_found());
    }

    #[test]
    fn test_href_is_read_at_click_time() {
        let (page, link, _) = page_with_target();
        let later = InMemoryNode::new("h3").with_id("later");
        let page = page.with_child(later.clone());
        SmoothScroller::new(page).install();

        link.set_attribute("href", "#later").unwrap();
        link.click();
        assert_eq!(later.scroll_requests(), 1);
    }

    #[test]
    fn test_external_links_are_untouched() {
        let external = InMemoryNode::new("a").with_attr("href", "https://example.com/#x");
        let page = InMemoryPage::new().with_child(external.clone());
        let setup = SmoothScroller::new(page).install();

        assert_eq!(setup, Setup::Installed { bindings: 0 });
        assert_eq!(external.listener_count(EventKind::Click), 0);
        assert!(!external.click().default_prevented());
    }
}
