//! `Platform` implementation for the browser: async clipboard and `setTimeout`.

use crate::error::describe;
use docnav_traits::{Completion, Platform, PlatformError};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::Window;

#[derive(Debug, Clone)]
pub struct WebPlatform {
    window: Window,
}

impl WebPlatform {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    /// `navigator.clipboard`, which is absent outside secure contexts.
    fn clipboard(&self) -> Option<web_sys::Clipboard> {
        let navigator = self.window.navigator();
        js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard"))
            .ok()
            .filter(|value| !value.is_undefined() && !value.is_null())
            .map(|value| value.unchecked_into::<web_sys::Clipboard>())
    }
}

impl Platform for WebPlatform {
    fn write_clipboard(&self, text: String, done: Completion) {
        let promise = self.clipboard().map(|clipboard| clipboard.write_text(&text));
        spawn_local(async move {
            let outcome = match promise {
                Some(promise) => JsFuture::from(promise)
                    .await
                    .map(|_| ())
                    .map_err(|e| PlatformError::ClipboardRejected(describe(&e))),
                None => Err(PlatformError::ClipboardUnavailable),
            };
            done(outcome);
        });
    }

    fn set_timeout(
        &self,
        delay_ms: u32,
        callback: Box<dyn FnOnce()>,
    ) -> Result<(), PlatformError> {
        let handler = Closure::once_into_js(move || callback());
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                handler.unchecked_ref(),
                i32::try_from(delay_ms).unwrap_or(i32::MAX),
            )
            .map(|_| ())
            .map_err(|e| PlatformError::Timer(describe(&e)))
    }
}
