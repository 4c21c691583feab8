//! Error handling for WASM bindings.
//!
//! Converts docnav's error types into JavaScript-friendly errors.

use docnav_core::EnhanceError;
use docnav_traits::DomError;
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// Error codes for TypeScript consumption.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Invalid options object
    Config,
    /// DOM query or mutation failure
    Dom,
    /// The page already carries the install marker
    AlreadyEnhanced,
    /// No `window`/`document` (e.g. running in a worker)
    NoWindow,
}

impl ErrorCode {
    fn as_js_code(&self) -> &'static str {
        match self {
            ErrorCode::Config => "CONFIG_ERROR",
            ErrorCode::Dom => "DOM_ERROR",
            ErrorCode::AlreadyEnhanced => "ALREADY_ENHANCED",
            ErrorCode::NoWindow => "NO_WINDOW",
        }
    }
}

/// A JavaScript-friendly error type.
///
/// Note: This is NOT a wasm_bindgen struct because we need custom
/// conversion to JavaScript Error objects.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct DocNavError {
    code: ErrorCode,
    message: String,
}

impl DocNavError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Config, message)
    }

    pub fn dom(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Dom, message)
    }

    pub fn no_window() -> Self {
        Self::new(ErrorCode::NoWindow, "No window/document available")
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<EnhanceError> for DocNavError {
    fn from(err: EnhanceError) -> Self {
        let code = match &err {
            EnhanceError::Config(_) => ErrorCode::Config,
            EnhanceError::Dom(_) => ErrorCode::Dom,
            EnhanceError::AlreadyEnhanced => ErrorCode::AlreadyEnhanced,
        };
        Self::new(code, err.to_string())
    }
}

impl From<DomError> for DocNavError {
    fn from(err: DomError) -> Self {
        Self::dom(err.to_string())
    }
}

impl From<serde_wasm_bindgen::Error> for DocNavError {
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        Self::config(err.to_string())
    }
}

impl From<DocNavError> for JsValue {
    fn from(err: DocNavError) -> Self {
        let js_error = js_sys::Error::new(&err.message);

        // Add the error code as a property
        js_sys::Reflect::set(
            &js_error,
            &"code".into(),
            &JsValue::from_str(err.code.as_js_code()),
        )
        .ok();

        js_error.into()
    }
}

/// Render a thrown JS value for log and error messages.
pub(crate) fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"))
}
