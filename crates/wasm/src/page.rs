//! `Page` implementation backed by the browser DOM.
//!
//! Region accessors are thin wrappers over `querySelectorAll` with the
//! selectors the components are specified against. Listener closures are
//! leaked on purpose: they live exactly as long as the page does.

use crate::error::{DocNavError, describe};
use docnav_traits::{
    CodeBlock, DomError, DomEvent, EventKind, Listener, Lookup, Page, PageNode, Region,
    ScrollListener,
};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlElement, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
    Window,
};

const FRAGMENT_LINKS: &str = r##"a[href^="#"]"##;
const HEADINGS: &str = "h1, h2, h3";
const TOC_LINKS: &str = "#TOC a, .toc a";
const TOC_CONTAINER: &str = "#TOC, .toc, nav#TOC";
const CODE_BLOCKS: &str = "pre code";

/// A handle to a DOM element.
#[derive(Debug, Clone)]
pub struct WebNode {
    element: Element,
}

impl WebNode {
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    fn html(&self) -> Option<&HtmlElement> {
        self.element.dyn_ref::<HtmlElement>()
    }
}

impl From<Element> for WebNode {
    fn from(element: Element) -> Self {
        Self::new(element)
    }
}

impl PageNode for WebNode {
    fn attribute(&self, name: &str) -> Option<String> {
        self.element.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<(), DomError> {
        self.element
            .set_attribute(name, value)
            .map_err(|e| DomError::Attribute {
                name: name.to_string(),
                message: describe(&e),
            })
    }

    fn has_class(&self, class: &str) -> bool {
        self.element.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        if let Err(e) = self.element.class_list().add_1(class) {
            log::trace!("classList.add('{class}') failed: {}", describe(&e));
        }
    }

    fn remove_class(&self, class: &str) {
        if let Err(e) = self.element.class_list().remove_1(class) {
            log::trace!("classList.remove('{class}') failed: {}", describe(&e));
        }
    }

    fn set_class_name(&self, class_name: &str) {
        self.element.set_class_name(class_name);
    }

    fn text_content(&self) -> String {
        self.element.text_content().unwrap_or_default()
    }

    fn set_text_content(&self, text: &str) {
        self.element.set_text_content(Some(text));
    }

    fn set_css_text(&self, css: &str) {
        if let Some(html) = self.html() {
            html.style().set_css_text(css);
        }
    }

    fn set_style(&self, property: &str, value: &str) {
        if let Some(html) = self.html() {
            if let Err(e) = html.style().set_property(property, value) {
                log::trace!("style.setProperty('{property}') failed: {}", describe(&e));
            }
        }
    }

    fn style(&self, property: &str) -> Option<String> {
        self.html()?
            .style()
            .get_property_value(property)
            .ok()
            .filter(|value| !value.is_empty())
    }

    fn offset_top(&self) -> f64 {
        self.html().map_or(0.0, |html| f64::from(html.offset_top()))
    }

    fn append_child(&self, child: &Self) -> Result<(), DomError> {
        self.element
            .append_child(&child.element)
            .map(|_| ())
            .map_err(|e| DomError::Insert(describe(&e)))
    }

    fn prepend_child(&self, child: &Self) -> Result<(), DomError> {
        let first = self.element.first_child();
        self.element
            .insert_before(&child.element, first.as_ref())
            .map(|_| ())
            .map_err(|e| DomError::Insert(describe(&e)))
    }

    fn scroll_into_view(&self) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        self.element
            .scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn add_listener(&self, kind: EventKind, listener: Listener) {
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
            let mut dom_event = DomEvent::new();
            listener(&mut dom_event);
            if dom_event.default_prevented() {
                event.prevent_default();
            }
        });
        match self
            .element
            .add_event_listener_with_callback(kind.as_str(), callback.as_ref().unchecked_ref())
        {
            Ok(()) => callback.forget(),
            Err(e) => log::debug!("addEventListener('{}') failed: {}", kind.as_str(), describe(&e)),
        }
    }
}

/// The browser document and its window.
#[derive(Debug, Clone)]
pub struct WebPage {
    window: Window,
    document: Document,
}

impl WebPage {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }

    /// Look up the global `window` and its `document`.
    pub fn from_window() -> Result<Self, DocNavError> {
        let window = web_sys::window().ok_or_else(DocNavError::no_window)?;
        let document = window.document().ok_or_else(DocNavError::no_window)?;
        Ok(Self::new(window, document))
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn select_all(&self, selector: &str) -> Vec<WebNode> {
        match self.document.query_selector_all(selector) {
            Ok(list) => (0..list.length())
                .filter_map(|index| list.get(index))
                .filter_map(|node| node.dyn_into::<Element>().ok())
                .map(WebNode::new)
                .collect(),
            Err(e) => {
                log::debug!("querySelectorAll('{selector}') failed: {}", describe(&e));
                Vec::new()
            }
        }
    }
}

impl Page for WebPage {
    type Node = WebNode;

    fn fragment_links(&self) -> Vec<WebNode> {
        self.select_all(FRAGMENT_LINKS)
    }

    fn element_by_id(&self, id: &str) -> Lookup<WebNode> {
        let element = if id.is_empty() {
            None
        } else {
            self.document.get_element_by_id(id)
        };
        Lookup::from_option(element.map(WebNode::new), Region::Element(id.to_string()))
    }

    fn headings(&self) -> Vec<WebNode> {
        self.select_all(HEADINGS)
    }

    fn toc_links(&self) -> Vec<WebNode> {
        self.select_all(TOC_LINKS)
    }

    fn toc_container(&self) -> Lookup<WebNode> {
        let element = self.document.query_selector(TOC_CONTAINER).ok().flatten();
        Lookup::from_option(element.map(WebNode::new), Region::TocContainer)
    }

    fn code_blocks(&self) -> Vec<CodeBlock<WebNode>> {
        self.select_all(CODE_BLOCKS)
            .into_iter()
            .filter_map(|code| {
                let pre = code.element.closest("pre").ok().flatten()?;
                Some(CodeBlock {
                    pre: WebNode::new(pre),
                    code,
                })
            })
            .collect()
    }

    fn head(&self) -> Lookup<WebNode> {
        let head = self.document.head().map(|head| WebNode::new(head.into()));
        Lookup::from_option(head, Region::Head)
    }

    fn body(&self) -> Lookup<WebNode> {
        let body = self.document.body().map(|body| WebNode::new(body.into()));
        Lookup::from_option(body, Region::Body)
    }

    fn create_element(&self, tag: &str) -> Result<WebNode, DomError> {
        self.document
            .create_element(tag)
            .map(WebNode::new)
            .map_err(|e| DomError::CreateElement {
                tag: tag.to_string(),
                message: describe(&e),
            })
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn add_scroll_listener(&self, listener: ScrollListener) {
        let callback = Closure::<dyn FnMut()>::new(move || listener());
        match self
            .window
            .add_event_listener_with_callback("scroll", callback.as_ref().unchecked_ref())
        {
            Ok(()) => callback.forget(),
            Err(e) => log::debug!("addEventListener('scroll') failed: {}", describe(&e)),
        }
    }
}
