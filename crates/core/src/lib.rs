//! # docnav-core
//!
//! Platform-agnostic navigation enhancements for static documentation pages.
//!
//! - **scroll**: smooth scrolling for same-page anchor links
//! - **highlight**: marks the TOC entry of the section currently in view
//! - **mobile_nav**: slide-out table of contents for narrow viewports
//! - **code_copy**: copy-to-clipboard buttons on code blocks
//! - **enhancer**: installs all of the above exactly once per page
//!
//! ## Design Principle
//!
//! Nothing here touches a browser API directly. Components are generic over
//! [`Page`](docnav_traits::Page) and [`Platform`](docnav_traits::Platform),
//! and keep all of their state in the page (classes, labels, attributes)
//! rather than in script-level variables.

pub use docnav_traits as traits;

pub mod code_copy;
pub mod config;
pub mod enhancer;
pub mod error;
pub mod highlight;
pub mod mobile_nav;
pub mod scroll;

#[cfg(test)]
mod testing;

/// CSS classes read and written by the components.
pub mod classes {
    /// Current TOC link, and the open state of the mobile overlay.
    pub const ACTIVE: &str = "active";
    pub const MOBILE_OPEN: &str = "mobile-open";
    pub const MOBILE_TOC_TOGGLE: &str = "mobile-toc-toggle";
    pub const MOBILE_OVERLAY: &str = "mobile-overlay";
    pub const COPY_CODE_BTN: &str = "copy-code-btn";
}

pub use code_copy::{CodeCopier, CopyLabels};
pub use config::{Components, CopyFailurePolicy, EnhancerConfig};
pub use enhancer::{EnhanceReport, PageEnhancer, Setup};
pub use error::EnhanceError;
pub use highlight::{SectionHighlighter, current_section};
pub use mobile_nav::MobileNav;
pub use scroll::{SmoothScroller, fragment_id};
