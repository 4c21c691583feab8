//! Slide-out table of contents for narrow viewports.
//!
//! Injects a toggle button, a media-query stylesheet and a dimming overlay.
//! The container's `mobile-open` class and the overlay's `active` class are
//! only ever written together through [`set_open`].

use crate::classes::{ACTIVE, MOBILE_OPEN, MOBILE_OVERLAY, MOBILE_TOC_TOGGLE};
use crate::config::EnhancerConfig;
use crate::enhancer::Setup;
use docnav_traits::{DomError, EventKind, Lookup, Page, PageNode};
use std::rc::Rc;

const TOGGLE_CSS: &str = "
    display: none;
    position: fixed;
    top: 20px;
    left: 20px;
    z-index: 1000;
    background: var(--secondary-color, #3498db);
    color: white;
    border: none;
    padding: 10px 15px;
    border-radius: 5px;
    cursor: pointer;
    font-size: 14px;
";

#[derive(Clone)]
pub struct MobileNav<P: Page> {
    page: P,
    breakpoint: u32,
    drawer_offset: u32,
    toggle_label: String,
}

impl<P: Page> MobileNav<P> {
    pub fn new(page: P, config: &EnhancerConfig) -> Self {
        Self {
            page,
            breakpoint: config.mobile_breakpoint,
            drawer_offset: config.drawer_offset,
            toggle_label: config.toggle_label.clone(),
        }
    }

    /// The `<style>` text injected into `<head>`. The toggle and the drawer
    /// only apply below `max-width: {breakpoint}px`.
    pub fn stylesheet(&self) -> String {
        let breakpoint = self.breakpoint;
        let offset = self.drawer_offset;
        format!(
            "
@media (max-width: {breakpoint}px) {{
    .mobile-toc-toggle {{
        display: block !important;
    }}

    #TOC, .toc, nav#TOC {{
        position: fixed;
        top: 0;
        left: -{offset}px;
        height: 100vh;
        z-index: 999;
        transition: left 0.3s ease;
        background: white;
        box-shadow: 2px 0 10px rgba(0,0,0,0.3);
    }}

    #TOC.mobile-open, .toc.mobile-open, nav#TOC.mobile-open {{
        left: 0;
    }}

    .mobile-overlay {{
        position: fixed;
        top: 0;
        left: 0;
        width: 100%;
        height: 100%;
        background: rgba(0,0,0,0.5);
        z-index: 998;
        display: none;
    }}

    .mobile-overlay.active {{
        display: block;
    }}
}}
"
        )
    }

    /// Inject the toggle, stylesheet and overlay. Skipped when the page has
    /// no table of contents.
    ///
    /// All three elements are built and wired while still detached, so a
    /// failure to create any of them leaves the page untouched.
    pub fn install(&self) -> Result<Setup, DomError> {
        let toc = match self.page.toc_container() {
            Lookup::Found(toc) => toc,
            Lookup::Missing(region) => return Ok(Setup::skipped(region)),
        };
        let head = self.page.head().required()?;
        let body = self.page.body().required()?;

        let toggle = self.page.create_element("button")?;
        toggle.set_text_content(&self.toggle_label);
        toggle.set_class_name(MOBILE_TOC_TOGGLE);
        toggle.set_css_text(TOGGLE_CSS);

        let style = self.page.create_element("style")?;
        style.set_text_content(&self.stylesheet());

        let overlay = self.page.create_element("div")?;
        overlay.set_class_name(MOBILE_OVERLAY);

        let (drawer, shade) = (toc.clone(), overlay.clone());
        toggle.add_listener(
            EventKind::Click,
            Rc::new(move |_| {
                let open = !drawer.has_class(MOBILE_OPEN);
                set_open(&drawer, &shade, open);
            }),
        );

        let (drawer, shade) = (toc, overlay.clone());
        overlay.add_listener(
            EventKind::Click,
            Rc::new(move |_| set_open(&drawer, &shade, false)),
        );

        head.append_child(&style)?;
        body.append_child(&overlay)?;
        body.prepend_child(&toggle)?;
        Ok(Setup::Installed { bindings: 2 })
    }
}

/// Open or close the drawer, keeping container and overlay markers in step.
pub fn set_open<N: PageNode>(toc: &N, overlay: &N, open: bool) {
    if open {
        toc.add_class(MOBILE_OPEN);
        overlay.add_class(ACTIVE);
    } else {
        toc.remove_class(MOBILE_OPEN);
        overlay.remove_class(ACTIVE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FlakyPage;
    use docnav_traits::{InMemoryNode, InMemoryPage, Region};

    fn page_with_toc() -> (InMemoryPage, InMemoryNode) {
        let toc = InMemoryNode::new("nav").with_id("TOC");
        let page = InMemoryPage::new()
            .with_child(InMemoryNode::new("main"))
            .with_child(toc.clone());
        (page, toc)
    }

    fn injected(page: &InMemoryPage) -> (InMemoryNode, InMemoryNode) {
        let body = page.body_node();
        let toggle = body.children()[0].clone();
        let overlay = body
            .children()
            .into_iter()
            .find(|n| n.has_class(MOBILE_OVERLAY))
            .unwrap();
        (toggle, overlay)
    }

    #[test]
    fn test_no_toc_is_full_no_op() {
        let page = InMemoryPage::new().with_child(InMemoryNode::new("main"));
        let before = page.all_nodes().len();
        let setup = MobileNav::new(page.clone(), &EnhancerConfig::default())
            .install()
            .unwrap();

        assert_eq!(setup, Setup::skipped(Region::TocContainer));
        assert_eq!(page.all_nodes().len(), before);
    }

    #[test]
    fn test_injects_toggle_style_and_overlay() {
        let (page, _) = page_with_toc();
        let nav = MobileNav::new(page.clone(), &EnhancerConfig::default());
        assert_eq!(nav.install().unwrap(), Setup::Installed { bindings: 2 });

        let (toggle, overlay) = injected(&page);
        assert_eq!(toggle.tag(), "button");
        assert!(toggle.has_class(MOBILE_TOC_TOGGLE));
        assert_eq!(toggle.text_content(), "☰ Table of Contents");
        assert_eq!(toggle.style("display").as_deref(), Some("none"));
        assert_eq!(toggle.style("position").as_deref(), Some("fixed"));
        assert!(!overlay.has_class(ACTIVE));

        let style = page.head_node().find_tag("style").unwrap();
        assert!(style.text_content().contains("@media (max-width: 768px)"));
        assert!(style.text_content().contains("left: -280px;"));
        assert!(style.text_content().contains(".mobile-overlay.active"));
    }

    #[test]
    fn test_toggle_round_trip() {
        let (page, toc) = page_with_toc();
        MobileNav::new(page.clone(), &EnhancerConfig::default())
            .install()
            .unwrap();
        let (toggle, overlay) = injected(&page);

        toggle.click();
        assert!(toc.has_class(MOBILE_OPEN));
        assert!(overlay.has_class(ACTIVE));

        toggle.click();
        assert!(!toc.has_class(MOBILE_OPEN));
        assert!(!overlay.has_class(ACTIVE));
    }

    #[test]
    fn test_overlay_click_always_closes() {
        let (page, toc) = page_with_toc();
        MobileNav::new(page.clone(), &EnhancerConfig::default())
            .install()
            .unwrap();
        let (toggle, overlay) = injected(&page);

        overlay.click();
        assert!(!toc.has_class(MOBILE_OPEN));
        assert!(!overlay.has_class(ACTIVE));

        toggle.click();
        overlay.click();
        overlay.click();
        assert!(!toc.has_class(MOBILE_OPEN));
        assert!(!overlay.has_class(ACTIVE));
    }

    #[test]
    fn test_toggle_resynchronizes_diverged_markers() {
        let (page, toc) = page_with_toc();
        MobileNav::new(page.clone(), &EnhancerConfig::default())
            .install()
            .unwrap();
        let (toggle, overlay) = injected(&page);

        overlay.add_class(ACTIVE);
        toggle.click();
        assert!(toc.has_class(MOBILE_OPEN));
        assert!(overlay.has_class(ACTIVE));
    }

    #[test]
    fn test_first_toc_container_wins() {
        let first = InMemoryNode::new("div").with_class("toc");
        let second = InMemoryNode::new("nav").with_id("TOC");
        let page = InMemoryPage::new()
            .with_child(first.clone())
            .with_child(second.clone());
        MobileNav::new(page.clone(), &EnhancerConfig::default())
            .install()
            .unwrap();
        let (toggle, _) = injected(&page);

        toggle.click();
        assert!(first.has_class(MOBILE_OPEN));
        assert!(!second.has_class(MOBILE_OPEN));
    }

    #[test]
    fn test_toggle_only_shown_below_breakpoint() {
        let (page, _) = page_with_toc();
        let css = MobileNav::new(page, &EnhancerConfig::default()).stylesheet();
        let media = css.find("@media (max-width: 768px)").unwrap();
        let toggle_rule = css.find(".mobile-toc-toggle {").unwrap();
        assert!(media < toggle_rule);
        assert!(css.contains("display: block !important;"));
        assert_eq!(css.matches("@media").count(), 1);
        assert!(TOGGLE_CSS.contains("display: none;"));
    }

    #[test]
    fn test_failed_creation_leaves_page_untouched() {
        for tag in ["button", "style", "div"] {
            let (page, toc) = page_with_toc();
            let before = page.all_nodes().len();
            let flaky = FlakyPage::failing_nth(page.clone(), tag, 0);
            let result = MobileNav::new(flaky, &EnhancerConfig::default()).install();

            assert!(matches!(result, Err(DomError::CreateElement { .. })), "{tag}");
            assert_eq!(page.all_nodes().len(), before, "{tag}");
            assert!(page.head_node().children().is_empty(), "{tag}");
            assert!(!toc.has_class(MOBILE_OPEN));
        }
    }

    #[test]
    fn test_custom_breakpoint_and_offset() {
        let (page, _) = page_with_toc();
        let config = EnhancerConfig {
            mobile_breakpoint: 1024,
            drawer_offset: 320,
            ..EnhancerConfig::default()
        };
        let nav = MobileNav::new(page, &config);
        let css = nav.stylesheet();
        assert!(css.contains("@media (max-width: 1024px)"));
        assert!(css.contains("left: -320px;"));
        assert!(!css.contains("768px"));
    }
}
