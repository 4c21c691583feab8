//! In-memory implementations of [`Page`] and [`Platform`].
//!
//! These back every native test: the page is a small element tree with
//! explicit geometry, and the platform runs on a virtual clock with a
//! clipboard whose writes stay pending until they are settled.

use crate::page::{
    CodeBlock, DomError, DomEvent, EventKind, Listener, Lookup, Page, PageNode, Region,
    ScrollListener,
};
use crate::platform::{Completion, Platform, PlatformError};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::fmt::{self, Debug};
use std::rc::{Rc, Weak};

#[derive(Default)]
struct NodeData {
    tag: String,
    attributes: Vec<(String, String)>,
    classes: Vec<String>,
    text: String,
    styles: Vec<(String, String)>,
    offset_top: f64,
    children: Vec<InMemoryNode>,
    parent: Weak<RefCell<NodeData>>,
    listeners: HashMap<EventKind, Vec<Listener>>,
    scroll_requests: usize,
}

/// An element in an [`InMemoryPage`].
#[derive(Clone)]
pub struct InMemoryNode(Rc<RefCell<NodeData>>);

impl InMemoryNode {
    pub fn new(tag: &str) -> Self {
        Self(Rc::new(RefCell::new(NodeData {
            tag: tag.to_ascii_lowercase(),
            ..NodeData::default()
        })))
    }

    pub fn with_id(self, id: &str) -> Self {
        self.with_attr("id", id)
    }

    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.put_attribute(name, value);
        self
    }

    pub fn with_class(self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_text(self, text: &str) -> Self {
        self.0.borrow_mut().text = text.to_string();
        self
    }

    pub fn with_offset_top(self, offset_top: f64) -> Self {
        self.set_offset_top(offset_top);
        self
    }

    /// Append `child`, logging instead of failing when the insert is invalid.
    pub fn with_child(self, child: InMemoryNode) -> Self {
        if let Err(e) = self.append_child(&child) {
            log::debug!("InMemoryNode::with_child: {e}");
        }
        self
    }

    pub fn tag(&self) -> String {
        self.0.borrow().tag.clone()
    }

    pub fn classes(&self) -> Vec<String> {
        self.0.borrow().classes.clone()
    }

    pub fn children(&self) -> Vec<InMemoryNode> {
        self.0.borrow().children.clone()
    }

    pub fn parent(&self) -> Option<InMemoryNode> {
        self.0.borrow().parent.upgrade().map(InMemoryNode)
    }

    pub fn set_offset_top(&self, offset_top: f64) {
        self.0.borrow_mut().offset_top = offset_top;
    }

    /// The inline style serialized as `prop: value;` declarations.
    pub fn css_text(&self) -> String {
        self.0
            .borrow()
            .styles
            .iter()
            .map(|(property, value)| format!("{property}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// How many times `scroll_into_view` has been called on this node.
    pub fn scroll_requests(&self) -> usize {
        self.0.borrow().scroll_requests
    }

    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.0.borrow().listeners.get(&kind).map_or(0, Vec::len)
    }

    /// Run every listener registered for `kind` and return the event.
    pub fn dispatch(&self, kind: EventKind) -> DomEvent {
        let listeners = self
            .0
            .borrow()
            .listeners
            .get(&kind)
            .cloned()
            .unwrap_or_default();
        let mut event = DomEvent::new();
        for listener in listeners {
            listener(&mut event);
        }
        event
    }

    pub fn click(&self) -> DomEvent {
        self.dispatch(EventKind::Click)
    }

    /// The first descendant (depth-first, document order) with the given tag.
    pub fn find_tag(&self, tag: &str) -> Option<InMemoryNode> {
        self.descendants().into_iter().find(|node| node.tag() == tag)
    }

    /// All descendants in document order, excluding `self`.
    pub fn descendants(&self) -> Vec<InMemoryNode> {
        let mut out = Vec::new();
        self.collect_descendants(&mut out);
        out
    }

    fn collect_descendants(&self, out: &mut Vec<InMemoryNode>) {
        for child in self.children() {
            out.push(child.clone());
            child.collect_descendants(out);
        }
    }

    fn ancestors(&self) -> impl Iterator<Item = InMemoryNode> {
        std::iter::successors(self.parent(), InMemoryNode::parent)
    }

    fn closest_ancestor(&self, tag: &str) -> Option<InMemoryNode> {
        self.ancestors().find(|node| node.tag() == tag)
    }

    fn put_attribute(&self, name: &str, value: &str) {
        let mut data = self.0.borrow_mut();
        match data.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => data.attributes.push((name.to_string(), value.to_string())),
        }
    }

    fn is_toc_region(&self) -> bool {
        self.attribute("id").as_deref() == Some("TOC") || self.has_class("toc")
    }

    fn insert_child(&self, child: &InMemoryNode, at_front: bool) -> Result<(), DomError> {
        if Rc::ptr_eq(&self.0, &child.0) || self.ancestors().any(|a| Rc::ptr_eq(&a.0, &child.0))
        {
            return Err(DomError::Insert(format!(
                "<{}> cannot be inserted into its own subtree",
                child.tag()
            )));
        }
        if let Some(old_parent) = child.parent() {
            old_parent
                .0
                .borrow_mut()
                .children
                .retain(|c| !Rc::ptr_eq(&c.0, &child.0));
        }
        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
        let mut data = self.0.borrow_mut();
        if at_front {
            data.children.insert(0, child.clone());
        } else {
            data.children.push(child.clone());
        }
        Ok(())
    }
}

impl PartialEq for InMemoryNode {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Debug for InMemoryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();
        f.debug_struct("InMemoryNode")
            .field("tag", &data.tag)
            .field("attributes", &data.attributes)
            .field("classes", &data.classes)
            .finish()
    }
}

impl PageNode for InMemoryNode {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0
            .borrow()
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value.clone())
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<(), DomError> {
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(DomError::Attribute {
                name: name.to_string(),
                message: "invalid attribute name".to_string(),
            });
        }
        self.put_attribute(name, value);
        Ok(())
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == class)
    }

    fn add_class(&self, class: &str) {
        if !self.has_class(class) {
            self.0.borrow_mut().classes.push(class.to_string());
        }
    }

    fn remove_class(&self, class: &str) {
        self.0.borrow_mut().classes.retain(|c| c != class);
    }

    fn set_class_name(&self, class_name: &str) {
        self.0.borrow_mut().classes = class_name.split_whitespace().map(String::from).collect();
    }

    fn text_content(&self) -> String {
        let data = self.0.borrow();
        let mut text = data.text.clone();
        for child in &data.children {
            text.push_str(&child.text_content());
        }
        text
    }

    fn set_text_content(&self, text: &str) {
        let children = std::mem::take(&mut self.0.borrow_mut().children);
        for child in children {
            child.0.borrow_mut().parent = Weak::new();
        }
        self.0.borrow_mut().text = text.to_string();
    }

    fn set_css_text(&self, css: &str) {
        let styles = css
            .split(';')
            .filter_map(|decl| decl.split_once(':'))
            .map(|(property, value)| (property.trim().to_string(), value.trim().to_string()))
            .filter(|(property, _)| !property.is_empty())
            .collect();
        self.0.borrow_mut().styles = styles;
    }

    fn set_style(&self, property: &str, value: &str) {
        let mut data = self.0.borrow_mut();
        match data.styles.iter_mut().find(|(p, _)| p == property) {
            Some((_, existing)) => *existing = value.to_string(),
            None => data.styles.push((property.to_string(), value.to_string())),
        }
    }

    fn style(&self, property: &str) -> Option<String> {
        self.0
            .borrow()
            .styles
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, value)| value.clone())
    }

    fn offset_top(&self) -> f64 {
        self.0.borrow().offset_top
    }

    fn append_child(&self, child: &Self) -> Result<(), DomError> {
        self.insert_child(child, false)
    }

    fn prepend_child(&self, child: &Self) -> Result<(), DomError> {
        self.insert_child(child, true)
    }

    fn scroll_into_view(&self) {
        self.0.borrow_mut().scroll_requests += 1;
    }

    fn add_listener(&self, kind: EventKind, listener: Listener) {
        self.0
            .borrow_mut()
            .listeners
            .entry(kind)
            .or_default()
            .push(listener);
    }
}

struct PageState {
    root: InMemoryNode,
    head: InMemoryNode,
    body: InMemoryNode,
    scroll_y: Cell<f64>,
    scroll_listeners: RefCell<Vec<ScrollListener>>,
}

/// An in-memory document: `<html>` with a `<head>` and a `<body>`.
#[derive(Clone)]
pub struct InMemoryPage(Rc<PageState>);

impl InMemoryPage {
    pub fn new() -> Self {
        let head = InMemoryNode::new("head");
        let body = InMemoryNode::new("body");
        let root = InMemoryNode::new("html")
            .with_child(head.clone())
            .with_child(body.clone());
        Self(Rc::new(PageState {
            root,
            head,
            body,
            scroll_y: Cell::new(0.0),
            scroll_listeners: RefCell::new(Vec::new()),
        }))
    }

    /// Append `node` to `<body>`.
    pub fn with_child(self, node: InMemoryNode) -> Self {
        if let Err(e) = self.0.body.append_child(&node) {
            log::debug!("InMemoryPage::with_child: {e}");
        }
        self
    }

    pub fn head_node(&self) -> InMemoryNode {
        self.0.head.clone()
    }

    pub fn body_node(&self) -> InMemoryNode {
        self.0.body.clone()
    }

    /// Every element below `<html>` in document order.
    pub fn all_nodes(&self) -> Vec<InMemoryNode> {
        self.0.root.descendants()
    }

    /// Set the scroll position without notifying scroll listeners.
    pub fn set_scroll_y(&self, scroll_y: f64) {
        self.0.scroll_y.set(scroll_y);
    }

    /// Set the scroll position and fire a scroll event.
    pub fn scroll_to(&self, scroll_y: f64) {
        self.set_scroll_y(scroll_y);
        let listeners = self.0.scroll_listeners.borrow().clone();
        for listener in listeners {
            listener();
        }
    }

    pub fn scroll_listener_count(&self) -> usize {
        self.0.scroll_listeners.borrow().len()
    }

    fn find_all(&self, predicate: impl Fn(&InMemoryNode) -> bool) -> Vec<InMemoryNode> {
        self.all_nodes().into_iter().filter(|n| predicate(n)).collect()
    }
}

impl Default for InMemoryPage {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for InMemoryPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryPage")
            .field("scroll_y", &self.0.scroll_y.get())
            .field("nodes", &self.all_nodes().len())
            .finish()
    }
}

impl Page for InMemoryPage {
    type Node = InMemoryNode;

    fn fragment_links(&self) -> Vec<InMemoryNode> {
        self.find_all(|n| {
            n.tag() == "a" && n.attribute("href").is_some_and(|href| href.starts_with('#'))
        })
    }

    fn element_by_id(&self, id: &str) -> Lookup<InMemoryNode> {
        let node = if id.is_empty() {
            None
        } else {
            self.all_nodes()
                .into_iter()
                .find(|n| n.attribute("id").as_deref() == Some(id))
        };
        Lookup::from_option(node, Region::Element(id.to_string()))
    }

    fn headings(&self) -> Vec<InMemoryNode> {
        self.find_all(|n| matches!(n.tag().as_str(), "h1" | "h2" | "h3"))
    }

    fn toc_links(&self) -> Vec<InMemoryNode> {
        self.find_all(|n| n.tag() == "a" && n.ancestors().any(|a| a.is_toc_region()))
    }

    fn toc_container(&self) -> Lookup<InMemoryNode> {
        let node = self.all_nodes().into_iter().find(InMemoryNode::is_toc_region);
        Lookup::from_option(node, Region::TocContainer)
    }

    fn code_blocks(&self) -> Vec<CodeBlock<InMemoryNode>> {
        self.find_all(|n| n.tag() == "code")
            .into_iter()
            .filter_map(|code| {
                code.closest_ancestor("pre")
                    .map(|pre| CodeBlock { pre, code })
            })
            .collect()
    }

    fn head(&self) -> Lookup<InMemoryNode> {
        Lookup::Found(self.0.head.clone())
    }

    fn body(&self) -> Lookup<InMemoryNode> {
        Lookup::Found(self.0.body.clone())
    }

    fn create_element(&self, tag: &str) -> Result<InMemoryNode, DomError> {
        if tag.is_empty() || !tag.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(DomError::CreateElement {
                tag: tag.to_string(),
                message: "invalid tag name".to_string(),
            });
        }
        Ok(InMemoryNode::new(tag))
    }

    fn scroll_y(&self) -> f64 {
        self.0.scroll_y.get()
    }

    fn add_scroll_listener(&self, listener: ScrollListener) {
        self.0.scroll_listeners.borrow_mut().push(listener);
    }
}

/// How an [`InMemoryPlatform`] settles clipboard writes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ClipboardBehavior {
    #[default]
    Accept,
    Reject(String),
    Unavailable,
}

struct PendingTimer {
    due: u64,
    seq: u64,
    callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct PlatformState {
    now_ms: Cell<u64>,
    next_seq: Cell<u64>,
    timers: RefCell<Vec<PendingTimer>>,
    clipboard: RefCell<Option<String>>,
    pending_writes: RefCell<VecDeque<(String, Completion)>>,
    behavior: RefCell<ClipboardBehavior>,
}

/// A platform with a virtual clock and a manually settled clipboard.
///
/// Clipboard writes queue until [`settle_clipboard`](Self::settle_clipboard)
/// runs, and timers only fire from [`advance`](Self::advance).
#[derive(Clone, Default)]
pub struct InMemoryPlatform(Rc<PlatformState>);

impl InMemoryPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clipboard_behavior(self, behavior: ClipboardBehavior) -> Self {
        self.set_clipboard_behavior(behavior);
        self
    }

    pub fn set_clipboard_behavior(&self, behavior: ClipboardBehavior) {
        *self.0.behavior.borrow_mut() = behavior;
    }

    /// The text most recently accepted by the clipboard.
    pub fn clipboard_text(&self) -> Option<String> {
        self.0.clipboard.borrow().clone()
    }

    pub fn pending_writes(&self) -> usize {
        self.0.pending_writes.borrow().len()
    }

    /// Settle every queued clipboard write in order. Returns how many settled.
    pub fn settle_clipboard(&self) -> usize {
        let mut settled = 0;
        loop {
            let next = self.0.pending_writes.borrow_mut().pop_front();
            let Some((text, done)) = next else {
                break;
            };
            let behavior = self.0.behavior.borrow().clone();
            let outcome = match behavior {
                ClipboardBehavior::Accept => {
                    *self.0.clipboard.borrow_mut() = Some(text);
                    Ok(())
                }
                ClipboardBehavior::Reject(reason) => Err(PlatformError::ClipboardRejected(reason)),
                ClipboardBehavior::Unavailable => Err(PlatformError::ClipboardUnavailable),
            };
            done(outcome);
            settled += 1;
        }
        settled
    }

    pub fn now_ms(&self) -> u64 {
        self.0.now_ms.get()
    }

    pub fn pending_timers(&self) -> usize {
        self.0.timers.borrow().len()
    }

    /// Move the clock forward, firing due timers in (due time, schedule) order.
    ///
    /// Timers scheduled by a firing callback run in the same call if they
    /// fall due before the new time.
    pub fn advance(&self, ms: u64) {
        let target = self.now_ms() + ms;
        loop {
            let next = {
                let mut timers = self.0.timers.borrow_mut();
                let index = timers
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.due <= target)
                    .min_by_key(|(_, t)| (t.due, t.seq))
                    .map(|(i, _)| i);
                index.map(|i| timers.remove(i))
            };
            let Some(timer) = next else {
                break;
            };
            self.0.now_ms.set(timer.due);
            (timer.callback)();
        }
        self.0.now_ms.set(target);
    }
}

impl Debug for InMemoryPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryPlatform")
            .field("now_ms", &self.now_ms())
            .field("pending_timers", &self.pending_timers())
            .field("pending_writes", &self.pending_writes())
            .finish()
    }
}

impl Platform for InMemoryPlatform {
    fn write_clipboard(&self, text: String, done: Completion) {
        self.0.pending_writes.borrow_mut().push_back((text, done));
    }

    fn set_timeout(
        &self,
        delay_ms: u32,
        callback: Box<dyn FnOnce()>,
    ) -> Result<(), PlatformError> {
        let seq = self.0.next_seq.get();
        self.0.next_seq.set(seq + 1);
        self.0.timers.borrow_mut().push(PendingTimer {
            due: self.now_ms() + u64::from(delay_ms),
            seq,
            callback,
        });
        Ok(())
    }
}
