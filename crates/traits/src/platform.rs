//! Host services beyond the document itself: clipboard and timers.

use thiserror::Error;

/// Error type for host service calls.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    #[error("Clipboard is not available")]
    ClipboardUnavailable,

    #[error("Clipboard write was rejected: {0}")]
    ClipboardRejected(String),

    #[error("Failed to schedule timer: {0}")]
    Timer(String),
}

/// Continuation run once an asynchronous clipboard write settles.
pub type Completion = Box<dyn FnOnce(Result<(), PlatformError>)>;

/// A trait for the asynchronous host services used by the copy buttons.
///
/// Both operations return immediately; completion is reported through the
/// supplied callback on the host's event loop, never re-entrantly.
pub trait Platform: Clone + 'static {
    /// Write `text` to the system clipboard and report the outcome to `done`.
    fn write_clipboard(&self, text: String, done: Completion);

    /// Run `callback` once after `delay_ms` milliseconds.
    ///
    /// Timers cannot be cancelled.
    fn set_timeout(&self, delay_ms: u32, callback: Box<dyn FnOnce()>)
    -> Result<(), PlatformError>;
}
