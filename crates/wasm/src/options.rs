//! Conversion of JavaScript options objects into [`EnhancerConfig`].

use crate::error::DocNavError;
use docnav_core::EnhancerConfig;
use wasm_bindgen::prelude::*;

/// Read an options object such as `{ scrollOffset: 80, copyFailure: "label" }`.
///
/// `undefined` and `null` select the defaults. Unknown keys and invalid
/// values are reported as `CONFIG_ERROR`.
pub fn parse_options(options: &JsValue) -> Result<EnhancerConfig, DocNavError> {
    if options.is_undefined() || options.is_null() {
        return Ok(EnhancerConfig::default());
    }
    if !options.is_object() {
        return Err(DocNavError::config("options must be a plain object"));
    }
    let config: EnhancerConfig = serde_wasm_bindgen::from_value(options.clone())?;
    config.validate()?;
    Ok(config)
}
