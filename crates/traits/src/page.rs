//! Page abstraction for the enhancement components.
//!
//! Instead of exposing a generic selector engine, a [`Page`] hands out the
//! handful of regions the components care about (fragment links, headings,
//! the table of contents, code blocks). Regions that may be absent come back
//! as a [`Lookup`], so "nothing to do" paths are explicit values rather than
//! silent skips.

use std::fmt::Debug;
use std::rc::Rc;
use thiserror::Error;

/// Error type for DOM mutation operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    #[error("Failed to create <{tag}> element: {message}")]
    CreateElement { tag: String, message: String },

    #[error("Failed to insert node: {0}")]
    Insert(String),

    #[error("Failed to set attribute '{name}': {message}")]
    Attribute { name: String, message: String },

    #[error("Required region is missing: {0}")]
    Missing(Region),
}

/// A named region of the page that a lookup can fail to find.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Region {
    /// The table-of-contents container (`#TOC`, `.toc`, `nav#TOC`).
    TocContainer,
    /// A TOC link pointing at the given fragment id.
    TocLink(String),
    /// An element addressed by id.
    Element(String),
    Head,
    Body,
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Region::TocContainer => write!(f, "table of contents"),
            Region::TocLink(id) => write!(f, "TOC link for '#{id}'"),
            Region::Element(id) => write!(f, "element '#{id}'"),
            Region::Head => write!(f, "<head>"),
            Region::Body => write!(f, "<body>"),
        }
    }
}

/// Result of looking up an optional page region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    Missing(Region),
}

impl<T> Lookup<T> {
    pub fn from_option(value: Option<T>, region: Region) -> Self {
        match value {
            Some(value) => Lookup::Found(value),
            None => Lookup::Missing(region),
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Lookup::Found(_))
    }

    pub fn found(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::Missing(_) => None,
        }
    }

    /// Converts a missing region into a [`DomError::Missing`].
    pub fn required(self) -> Result<T, DomError> {
        match self {
            Lookup::Found(value) => Ok(value),
            Lookup::Missing(region) => Err(DomError::Missing(region)),
        }
    }
}

/// Element events the components subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    MouseEnter,
    MouseLeave,
}

impl EventKind {
    /// The DOM event type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Click => "click",
            EventKind::MouseEnter => "mouseenter",
            EventKind::MouseLeave => "mouseleave",
        }
    }
}

/// The part of a dispatched event a listener can act on.
#[derive(Debug, Default)]
pub struct DomEvent {
    default_prevented: bool,
}

impl DomEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the host's default action (e.g. the native jump to an anchor).
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

pub type Listener = Rc<dyn Fn(&mut DomEvent)>;
pub type ScrollListener = Rc<dyn Fn()>;

/// A `<code>` element together with the `<pre>` block that encloses it.
#[derive(Debug, Clone)]
pub struct CodeBlock<N> {
    pub pre: N,
    pub code: N,
}

/// A handle to a single element.
///
/// Handles are cheap to clone and refer to the same underlying element, so
/// listeners can capture them freely.
pub trait PageNode: Clone + Debug + 'static {
    fn attribute(&self, name: &str) -> Option<String>;

    fn set_attribute(&self, name: &str, value: &str) -> Result<(), DomError>;

    /// The element id, treating an empty `id=""` as absent.
    fn id(&self) -> Option<String> {
        self.attribute("id").filter(|id| !id.is_empty())
    }

    fn has_class(&self, class: &str) -> bool;

    fn add_class(&self, class: &str);

    fn remove_class(&self, class: &str);

    /// Replace the whole class list.
    fn set_class_name(&self, class_name: &str);

    /// Concatenated text of the element and all of its descendants.
    fn text_content(&self) -> String;

    fn set_text_content(&self, text: &str);

    /// Replace the inline style declaration block.
    fn set_css_text(&self, css: &str);

    fn set_style(&self, property: &str, value: &str);

    fn style(&self, property: &str) -> Option<String>;

    /// Distance in pixels from the top of the offset parent.
    fn offset_top(&self) -> f64;

    fn append_child(&self, child: &Self) -> Result<(), DomError>;

    /// Insert `child` before the current first child.
    fn prepend_child(&self, child: &Self) -> Result<(), DomError>;

    /// Smoothly scroll the viewport until the element's top is aligned with its top.
    fn scroll_into_view(&self);

    fn add_listener(&self, kind: EventKind, listener: Listener);
}

/// The live document as seen by the enhancement components.
///
/// # Implementations
///
/// - `WebPage` (docnav-wasm): backed by `web_sys::Document`
/// - [`InMemoryPage`](crate::InMemoryPage): a small element tree for tests
pub trait Page: Clone + 'static {
    type Node: PageNode;

    /// Anchors whose `href` starts with `#`, in document order.
    fn fragment_links(&self) -> Vec<Self::Node>;

    fn element_by_id(&self, id: &str) -> Lookup<Self::Node>;

    /// `h1`, `h2` and `h3` elements in document order.
    fn headings(&self) -> Vec<Self::Node>;

    /// Links inside the table-of-contents region, in document order.
    fn toc_links(&self) -> Vec<Self::Node>;

    /// The first table-of-contents container in document order.
    fn toc_container(&self) -> Lookup<Self::Node>;

    /// Every `<code>` nested in a `<pre>`, paired with its nearest `<pre>`.
    fn code_blocks(&self) -> Vec<CodeBlock<Self::Node>>;

    fn head(&self) -> Lookup<Self::Node>;

    fn body(&self) -> Lookup<Self::Node>;

    /// Create a detached element.
    fn create_element(&self, tag: &str) -> Result<Self::Node, DomError>;

    /// Vertical scroll position of the viewport in pixels.
    fn scroll_y(&self) -> f64;

    fn add_scroll_listener(&self, listener: ScrollListener);

    /// The first TOC link whose `href` is exactly `#<id>`.
    fn toc_link_for(&self, id: &str) -> Lookup<Self::Node> {
        let href = format!("#{id}");
        let link = self
            .toc_links()
            .into_iter()
            .find(|link| link.attribute("href").as_deref() == Some(href.as_str()));
        Lookup::from_option(link, Region::TocLink(id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_from_option() {
        let found = Lookup::from_option(Some(1), Region::Body);
        assert!(found.is_found());
        assert_eq!(found.found(), Some(1));

        let missing: Lookup<i32> = Lookup::from_option(None, Region::TocContainer);
        assert!(!missing.is_found());
        assert_eq!(missing, Lookup::Missing(Region::TocContainer));
    }

    #[test]
    fn test_lookup_required() {
        let missing: Lookup<i32> = Lookup::Missing(Region::Head);
        assert_eq!(missing.required(), Err(DomError::Missing(Region::Head)));
        assert_eq!(Lookup::Found(7).required(), Ok(7));
    }

    #[test]
    fn test_event_prevent_default() {
        let mut event = DomEvent::new();
        assert!(!event.default_prevented());
        event.prevent_default();
        assert!(event.default_prevented());
    }

    #[test]
    fn test_event_kind_names() {
        assert_eq!(EventKind::Click.as_str(), "click");
        assert_eq!(EventKind::MouseEnter.as_str(), "mouseenter");
        assert_eq!(EventKind::MouseLeave.as_str(), "mouseleave");
    }

    #[test]
    fn test_dom_error_display() {
        let err = DomError::CreateElement {
            tag: "button".to_string(),
            message: "blocked".to_string(),
        };
        assert!(err.to_string().contains("<button>"));
        assert!(err.to_string().contains("blocked"));

        let err = DomError::Missing(Region::TocLink("intro".to_string()));
        assert!(err.to_string().contains("#intro"));
    }
}
