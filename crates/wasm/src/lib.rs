//! WebAssembly entry point for docnav.
//!
//! Loading the module enhances the current documentation page: smooth
//! scrolling for in-page links, TOC highlighting while scrolling, a
//! slide-out TOC on narrow screens and copy buttons on code blocks.
//!
//! # Architecture
//!
//! All behavior lives in `docnav-core`, which only knows the
//! [`Page`](docnav_traits::Page) and [`Platform`](docnav_traits::Platform)
//! traits. This crate supplies the browser implementations of those traits
//! and the JavaScript surface.
//!
//! ## Module Structure
//!
//! - [`page`] - `WebPage`/`WebNode` over `web_sys::Document`
//! - [`platform`] - async clipboard and `setTimeout`
//! - [`options`] - JS options object to `EnhancerConfig`
//! - [`error`] - Error types with JavaScript interop
//!
//! # Startup
//!
//! With the default `auto-start` feature the module installs itself with the
//! default configuration once `DOMContentLoaded` has fired (or immediately
//! if the document has already been parsed). Build without `auto-start` to
//! pass options explicitly:
//!
//! ```javascript
//! import init, { enhance } from './docnav_wasm.js';
//!
//! await init();
//! const report = enhance({ scrollOffset: 80, copyFailure: 'label' });
//! console.log(report.mobileNav.status);
//! ```

pub mod error;
pub mod options;
pub mod page;
pub mod platform;

pub use error::{DocNavError, ErrorCode};
pub use options::parse_options;
pub use page::{WebNode, WebPage};
pub use platform::WebPlatform;

use docnav_core::{EnhanceReport, EnhancerConfig, PageEnhancer};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// Initialize the WASM module.
///
/// Sets up panic hooks and console logging, then (with `auto-start`)
/// schedules the default install.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    #[cfg(feature = "console-logging")]
    {
        console_log::init_with_level(log::Level::Info).ok();
    }

    #[cfg(feature = "auto-start")]
    if let Err(e) = install_when_ready(EnhancerConfig::default()) {
        log::debug!("docnav auto-start failed: {e}");
    }
}

/// Enhance the current page with the given options object.
///
/// Returns the per-component report, e.g.
/// `{ smoothScroll: { status: "installed", bindings: 4 }, ... }`.
///
/// A page is enhanced at most once. With the default `auto-start` feature
/// the module has already installed itself with the default configuration,
/// so this call throws an `ALREADY_ENHANCED` error. Build with
/// `--no-default-features --features console-logging` to pass options here.
#[wasm_bindgen]
pub fn enhance(options: JsValue) -> Result<JsValue, JsValue> {
    let config = parse_options(&options)?;
    let page = WebPage::from_window()?;
    let report = install(&page, config)?;
    serde_wasm_bindgen::to_value(&report)
        .map_err(|e| DocNavError::config(format!("Failed to serialize report: {e}")).into())
}

/// Get the version of the docnav-wasm library.
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Install on `page` using the browser platform.
pub fn install(page: &WebPage, config: EnhancerConfig) -> Result<EnhanceReport, DocNavError> {
    let platform = WebPlatform::new(page.window().clone());
    let enhancer = PageEnhancer::new(page.clone(), platform, config)?;
    Ok(enhancer.install()?)
}

/// Install once the document has been parsed.
pub fn install_when_ready(config: EnhancerConfig) -> Result<(), DocNavError> {
    let page = WebPage::from_window()?;
    if page.document().ready_state() != "loading" {
        return install(&page, config).map(|_| ());
    }

    let document = page.document().clone();
    let on_ready = Closure::once_into_js(move || {
        if let Err(e) = install(&page, config) {
            log::debug!("docnav install failed: {e}");
        }
    });
    document
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
        .map_err(|e| DocNavError::dom(error::describe(&e)))
}
