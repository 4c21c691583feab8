//! # docnav
//!
//! Navigation enhancements for static documentation pages.
//!
//! This crate re-exports the platform-agnostic core and the page/platform
//! abstraction. The browser build lives in `docnav-wasm`; everything here
//! can be driven natively against [`InMemoryPage`] and [`InMemoryPlatform`].
//!
//! ```
//! use docnav::{InMemoryNode, InMemoryPage, InMemoryPlatform, PageEnhancer};
//!
//! let page = InMemoryPage::new()
//!     .with_child(InMemoryNode::new("nav").with_id("TOC"))
//!     .with_child(InMemoryNode::new("h1").with_id("intro"));
//! let report = PageEnhancer::with_defaults(page, InMemoryPlatform::new())
//!     .install()
//!     .unwrap();
//! assert!(report.mobile_nav.is_installed());
//! ```

pub use docnav_traits as traits;

pub use docnav_core::{
    CodeCopier, Components, CopyFailurePolicy, CopyLabels, EnhanceError, EnhanceReport,
    EnhancerConfig, MobileNav, PageEnhancer, SectionHighlighter, Setup, SmoothScroller, classes,
    current_section, fragment_id,
};
pub use docnav_traits::{
    ClipboardBehavior, CodeBlock, DomError, DomEvent, EventKind, InMemoryNode, InMemoryPage,
    InMemoryPlatform, Listener, Lookup, Page, PageNode, Platform, PlatformError, Region,
};
