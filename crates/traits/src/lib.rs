pub mod memory;
pub mod page;
pub mod platform;

pub use memory::{ClipboardBehavior, InMemoryNode, InMemoryPage, InMemoryPlatform};
pub use page::{
    CodeBlock, DomError, DomEvent, EventKind, Listener, Lookup, Page, PageNode, Region,
    ScrollListener,
};
pub use platform::{Completion, Platform, PlatformError};
