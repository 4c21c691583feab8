//! The one-shot setup routine that wires all components into a page.

use crate::code_copy::CodeCopier;
use crate::config::EnhancerConfig;
use crate::error::EnhanceError;
use crate::highlight::SectionHighlighter;
use crate::mobile_nav::MobileNav;
use crate::scroll::SmoothScroller;
use docnav_traits::{DomError, Page, PageNode, Platform, Region};
use serde::Serialize;

/// Attribute set on `<body>` once a page has been enhanced.
pub const INSTALL_ATTRIBUTE: &str = "data-docnav";
pub const INSTALL_MARKER: &str = "enhanced";

/// Logged once after a successful install.
pub const READY_MESSAGE: &str = "docnav: enhanced navigation loaded successfully";

/// Outcome of setting up a single component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Setup {
    /// Listeners attached; `bindings` counts the elements wired up.
    Installed { bindings: usize },
    /// The page lacks the region this component works on.
    Skipped { region: String },
    /// Turned off in the configuration.
    Disabled,
    Failed { error: String },
}

impl Setup {
    pub fn skipped(region: Region) -> Self {
        Setup::Skipped {
            region: region.to_string(),
        }
    }

    pub fn is_installed(&self) -> bool {
        matches!(self, Setup::Installed { .. })
    }
}

/// Per-component outcomes of [`PageEnhancer::install`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhanceReport {
    pub smooth_scroll: Setup,
    pub section_highlight: Setup,
    pub mobile_nav: Setup,
    pub code_copy: Setup,
}

/// Installs every enabled component on a page exactly once.
///
/// All runtime state lives in the page itself (classes, labels and the
/// install marker on `<body>`), so the enhancer can be dropped after
/// [`install`](Self::install) returns.
pub struct PageEnhancer<P: Page, H: Platform> {
    page: P,
    platform: H,
    config: EnhancerConfig,
}

impl<P: Page, H: Platform> PageEnhancer<P, H> {
    pub fn new(page: P, platform: H, config: EnhancerConfig) -> Result<Self, EnhanceError> {
        config.validate()?;
        Ok(Self {
            page,
            platform,
            config,
        })
    }

    pub fn with_defaults(page: P, platform: H) -> Self {
        Self {
            page,
            platform,
            config: EnhancerConfig::default(),
        }
    }

    pub fn config(&self) -> &EnhancerConfig {
        &self.config
    }

    pub fn is_enhanced(&self) -> bool {
        self.page
            .body()
            .found()
            .and_then(|body| body.attribute(INSTALL_ATTRIBUTE))
            .is_some_and(|marker| marker == INSTALL_MARKER)
    }

    /// Run every component's setup against the current page.
    ///
    /// A component that fails to set up is reported as [`Setup::Failed`]
    /// without affecting the others.
    pub fn install(&self) -> Result<EnhanceReport, EnhanceError> {
        let body = self.page.body().required()?;
        if self.is_enhanced() {
            return Err(EnhanceError::AlreadyEnhanced);
        }

        let components = self.config.components;
        let page = &self.page;
        let report = EnhanceReport {
            smooth_scroll: run("smooth scroll", components.smooth_scroll, || {
                Ok(SmoothScroller::new(page.clone()).install())
            }),
            section_highlight: run("section highlight", components.section_highlight, || {
                Ok(SectionHighlighter::new(page.clone(), self.config.scroll_offset).install())
            }),
            mobile_nav: run("mobile nav", components.mobile_nav, || {
                MobileNav::new(page.clone(), &self.config).install()
            }),
            code_copy: run("code copy", components.code_copy, || {
                Ok(CodeCopier::new(page.clone(), self.platform.clone(), &self.config).install())
            }),
        };

        body.set_attribute(INSTALL_ATTRIBUTE, INSTALL_MARKER)?;
        log::debug!("Enhancement report: {report:?}");
        log::info!("{READY_MESSAGE}");
        Ok(report)
    }
}

fn run(name: &str, enabled: bool, setup: impl FnOnce() -> Result<Setup, DomError>) -> Setup {
    if !enabled {
        return Setup::Disabled;
    }
    match setup() {
        Ok(outcome) => outcome,
        Err(e) => {
            log::debug!("Failed to set up {name}: {e}");
            Setup::Failed {
                error: e.to_string(),
            }
        }
    }
}
