//! Copy-to-clipboard buttons for code blocks.

use crate::classes::COPY_CODE_BTN;
use crate::config::{CopyFailurePolicy, EnhancerConfig};
use crate::enhancer::Setup;
use docnav_traits::{CodeBlock, DomError, EventKind, Page, PageNode, Platform};
use std::rc::Rc;

const BUTTON_CSS: &str = "
    position: absolute;
    top: 10px;
    right: 10px;
    background: rgba(255,255,255,0.8);
    border: 1px solid #ddd;
    padding: 5px 10px;
    border-radius: 3px;
    cursor: pointer;
    font-size: 12px;
    opacity: 0;
    transition: opacity 0.3s ease;
";

/// Button labels for the idle, confirmed and failed states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyLabels {
    pub copy: String,
    pub copied: String,
    pub failed: String,
}

impl From<&EnhancerConfig> for CopyLabels {
    fn from(config: &EnhancerConfig) -> Self {
        Self {
            copy: config.copy_label.clone(),
            copied: config.copied_label.clone(),
            failed: config.failed_label.clone(),
        }
    }
}

#[derive(Clone)]
pub struct CodeCopier<P: Page, H: Platform> {
    page: P,
    platform: H,
    labels: Rc<CopyLabels>,
    reset_ms: u32,
    failure: CopyFailurePolicy,
}

impl<P: Page, H: Platform> CodeCopier<P, H> {
    pub fn new(page: P, platform: H, config: &EnhancerConfig) -> Self {
        Self {
            page,
            platform,
            labels: Rc::new(CopyLabels::from(config)),
            reset_ms: config.copy_reset_ms,
            failure: config.copy_failure,
        }
    }

    /// Attach a copy button to every `pre code` block.
    ///
    /// A block whose button cannot be created or inserted is skipped; the
    /// remaining blocks still get theirs.
    pub fn install(&self) -> Setup {
        let mut bindings = 0;
        for block in self.page.code_blocks() {
            match self.attach(&block) {
                Ok(_) => bindings += 1,
                Err(e) => log::debug!("Skipping copy button for {:?}: {e}", block.pre),
            }
        }
        Setup::Installed { bindings }
    }

    /// Inject the button for one block and wire its hover and click handlers.
    pub fn attach(&self, block: &CodeBlock<P::Node>) -> Result<P::Node, DomError> {
        let button = self.page.create_element("button")?;
        button.set_class_name(COPY_CODE_BTN);
        button.set_text_content(&self.labels.copy);
        button.set_css_text(BUTTON_CSS);

        block.pre.append_child(&button)?;
        block.pre.set_style("position", "relative");

        let shown = button.clone();
        block.pre.add_listener(
            EventKind::MouseEnter,
            Rc::new(move |_| shown.set_style("opacity", "1")),
        );
        let hidden = button.clone();
        block.pre.add_listener(
            EventKind::MouseLeave,
            Rc::new(move |_| hidden.set_style("opacity", "0")),
        );

        let copier = self.clone();
        let (code, target) = (block.code.clone(), button.clone());
        button.add_listener(
            EventKind::Click,
            Rc::new(move |_| copier.copy(&code, &target)),
        );

        Ok(button)
    }

    /// Copy the current text of `code`, then update `button` once the
    /// clipboard write settles.
    pub fn copy(&self, code: &P::Node, button: &P::Node) {
        let copier = self.clone();
        let button = button.clone();
        self.platform.write_clipboard(
            code.text_content(),
            Box::new(move |result| match result {
                Ok(()) => copier.show_transient(&button, &copier.labels.copied),
                Err(e) => {
                    log::debug!("Clipboard write failed: {e}");
                    if copier.failure == CopyFailurePolicy::Label {
                        copier.show_transient(&button, &copier.labels.failed);
                    }
                }
            }),
        );
    }

    /// Show `label`, then restore the idle label after the reset delay.
    fn show_transient(&self, button: &P::Node, label: &str) {
        button.set_text_content(label);
        let target = button.clone();
        let labels = Rc::clone(&self.labels);
        let revert = Box::new(move || target.set_text_content(&labels.copy));
        if let Err(e) = self.platform.set_timeout(self.reset_ms, revert) {
            log::debug!("Could not schedule label reset: {e}");
            button.set_text_content(&self.labels.copy);
        }
    }
}
