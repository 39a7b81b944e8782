//! Headless page used by the test suites.
//!
//! Elements form a plain tree of reference-counted nodes. Markup assigned with
//! `set_inner_html` is stored verbatim and never parsed, so a test builds the
//! elements it needs with the builder methods instead. Selectors support a
//! single compound selector: an optional tag followed by any number of
//! `.class`, `#id`, `[attr]` and `[attr='value']` parts.
//!
//! Time is virtual: [`MemoryDom::advance`] moves the clock and runs whatever
//! deferred tasks became due.

use core::{
    cell::{Cell, RefCell},
    fmt,
    time::Duration,
};
use std::{collections::BTreeMap, rc::Rc};

use shared_utils::escape_html;

use super::{Dom, Handler, ListenOptions, Node, Task};

struct Listener {
    event: String,
    options: ListenOptions,
    handler: Handler,
}

#[derive(Default)]
struct NodeData {
    tag: String,
    classes: Vec<String>,
    attributes: BTreeMap<String, String>,
    inner_html: String,
    text: String,
    value: Option<String>,
    disabled: bool,
    invalid: bool,
    validity_reports: usize,
    children: Vec<MemoryNode>,
    listeners: Vec<Listener>,
}

/// Element of the in-memory page.
#[derive(Clone)]
pub struct MemoryNode(Rc<RefCell<NodeData>>);

impl fmt::Debug for MemoryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();
        f.debug_struct("MemoryNode")
            .field("tag", &data.tag)
            .field("id", &data.attributes.get("id"))
            .field("classes", &data.classes)
            .field("children", &data.children.len())
            .finish()
    }
}

impl PartialEq for MemoryNode {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl MemoryNode {
    #[must_use]
    pub fn element(tag: &str) -> Self {
        Self(Rc::new(RefCell::new(NodeData {
            tag: tag.to_ascii_lowercase(),
            ..NodeData::default()
        })))
    }

    #[must_use]
    pub fn with_id(self, id: &str) -> Self {
        self.with_attr("id", id)
    }

    #[must_use]
    pub fn with_class(self, class: &str) -> Self {
        for name in class.split_whitespace() {
            self.add_class(name);
        }
        self
    }

    #[must_use]
    pub fn with_attr(self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    #[must_use]
    pub fn with_html(self, html: &str) -> Self {
        self.0.borrow_mut().inner_html = html.to_owned();
        self
    }

    #[must_use]
    pub fn with_value(self, value: &str) -> Self {
        self.set_value(value);
        self
    }

    #[must_use]
    pub fn with_child(self, child: Self) -> Self {
        self.append(child);
        self
    }

    pub fn append(&self, child: Self) {
        self.0.borrow_mut().children.push(child);
    }

    pub fn set_value(&self, value: &str) {
        self.0.borrow_mut().value = Some(value.to_owned());
    }

    /// Makes `check_validity` fail (or pass again) for this element.
    pub fn set_valid(&self, valid: bool) {
        self.0.borrow_mut().invalid = !valid;
    }

    #[must_use]
    pub fn text(&self) -> String {
        self.0.borrow().text.clone()
    }

    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.0.borrow().disabled
    }

    /// How many times `report_validity` was called.
    #[must_use]
    pub fn validity_reports(&self) -> usize {
        self.0.borrow().validity_reports
    }

    #[must_use]
    pub fn listener_count(&self, event: &str) -> usize {
        self.0
            .borrow()
            .listeners
            .iter()
            .filter(|listener| listener.event == event)
            .count()
    }

    /// Fires `event` on this element. Returns whether a handler asked for the
    /// default action to be prevented.
    pub fn dispatch(&self, event: &str) -> bool {
        let mut listeners = core::mem::take(&mut self.0.borrow_mut().listeners);
        let mut prevented = false;
        for listener in listeners.iter_mut().filter(|l| l.event == event) {
            prevented |= listener.options.prevent_default;
            (listener.handler)();
        }
        let mut data = self.0.borrow_mut();
        listeners.append(&mut data.listeners);
        data.listeners = listeners;
        prevented
    }

    /// Sets the value of a form control and fires `input` on it.
    pub fn input(&self, value: &str) {
        self.set_value(value);
        self.dispatch("input");
    }

    pub fn click(&self) {
        self.dispatch("click");
    }

    pub fn submit(&self) -> bool {
        self.dispatch("submit")
    }

    fn find_by_id(&self, id: &str) -> Option<Self> {
        let children = self.0.borrow().children.clone();
        children.into_iter().find_map(|child| {
            if child.attribute("id").as_deref() == Some(id) {
                Some(child)
            } else {
                child.find_by_id(id)
            }
        })
    }

    fn collect(&self, selector: &Selector, found: &mut Vec<Self>) {
        let children = self.0.borrow().children.clone();
        for child in children {
            if selector.matches(&child.0.borrow()) {
                found.push(child.clone());
            }
            child.collect(selector, found);
        }
    }
}

impl Node for MemoryNode {
    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == class)
    }

    fn toggle_class(&self, class: &str, on: bool) {
        let mut data = self.0.borrow_mut();
        let present = data.classes.iter().any(|c| c == class);
        if on && !present {
            data.classes.push(class.to_owned());
        } else if !on && present {
            data.classes.retain(|c| c != class);
        }
    }

    fn attribute(&self, name: &str) -> Option<String> {
        let data = self.0.borrow();
        if name == "class" {
            return (!data.classes.is_empty()).then(|| data.classes.join(" "));
        }
        data.attributes.get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let mut data = self.0.borrow_mut();
        if name == "class" {
            data.classes = value.split_whitespace().map(str::to_owned).collect();
        } else {
            data.attributes.insert(name.to_owned(), value.to_owned());
        }
    }

    fn inner_html(&self) -> String {
        self.0.borrow().inner_html.clone()
    }

    fn set_inner_html(&self, html: &str) {
        let mut data = self.0.borrow_mut();
        data.children.clear();
        data.text.clear();
        html.clone_into(&mut data.inner_html);
    }

    fn set_text(&self, text: &str) {
        let mut data = self.0.borrow_mut();
        data.children.clear();
        data.inner_html = escape_html(text);
        text.clone_into(&mut data.text);
    }

    fn value(&self) -> Option<String> {
        self.0.borrow().value.clone()
    }

    fn set_disabled(&self, disabled: bool) {
        self.0.borrow_mut().disabled = disabled;
    }

    fn check_validity(&self) -> bool {
        !self.0.borrow().invalid
    }

    fn report_validity(&self) {
        self.0.borrow_mut().validity_reports += 1;
    }

    fn query_all(&self, selector: &str) -> Vec<Self> {
        let mut found = Vec::new();
        if let Some(selector) = Selector::parse(selector) {
            self.collect(&selector, &mut found);
        }
        found
    }

    fn listen(&self, event: &str, options: ListenOptions, handler: Handler) {
        self.0.borrow_mut().listeners.push(Listener {
            event: event.to_owned(),
            options,
            handler,
        });
    }
}

struct Timer {
    due: Duration,
    seq: u64,
    task: Task,
}

struct PageState {
    root: MemoryNode,
    pathname: RefCell<String>,
    scroll_y: Cell<f64>,
    scroll_listeners: RefCell<Vec<Handler>>,
    now: Cell<Duration>,
    next_seq: Cell<u64>,
    timers: RefCell<Vec<Timer>>,
}

/// In-memory page: an element tree plus a viewport and a virtual clock.
#[derive(Clone)]
pub struct MemoryDom(Rc<PageState>);

impl fmt::Debug for MemoryDom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryDom")
            .field("pathname", &self.0.pathname.borrow())
            .field("scroll_y", &self.0.scroll_y.get())
            .field("now", &self.0.now.get())
            .field("pending_tasks", &self.pending_tasks())
            .finish_non_exhaustive()
    }
}

impl MemoryDom {
    #[must_use]
    pub fn new(pathname: &str) -> Self {
        Self(Rc::new(PageState {
            root: MemoryNode::element("body"),
            pathname: RefCell::new(pathname.to_owned()),
            scroll_y: Cell::new(0.0),
            scroll_listeners: RefCell::new(Vec::new()),
            now: Cell::new(Duration::ZERO),
            next_seq: Cell::new(0),
            timers: RefCell::new(Vec::new()),
        }))
    }

    #[must_use]
    pub fn body(&self) -> MemoryNode {
        self.0.root.clone()
    }

    /// Appends `node` to the body and returns it.
    pub fn append(&self, node: MemoryNode) -> MemoryNode {
        self.0.root.append(node.clone());
        node
    }

    pub fn set_pathname(&self, pathname: &str) {
        pathname.clone_into(&mut self.0.pathname.borrow_mut());
    }

    /// Sets the scroll offset without firing `scroll`, as when a page is
    /// restored mid-scroll.
    pub fn set_scroll_y(&self, offset: f64) {
        self.0.scroll_y.set(offset);
    }

    /// Scrolls the viewport and fires the window `scroll` listeners.
    pub fn scroll_to(&self, offset: f64) {
        self.0.scroll_y.set(offset);
        let mut listeners = core::mem::take(&mut *self.0.scroll_listeners.borrow_mut());
        for handler in &mut listeners {
            handler();
        }
        let mut current = self.0.scroll_listeners.borrow_mut();
        listeners.append(&mut current);
        *current = listeners;
    }

    #[must_use]
    pub fn scroll_listener_count(&self) -> usize {
        self.0.scroll_listeners.borrow().len()
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.0.now.get()
    }

    #[must_use]
    pub fn pending_tasks(&self) -> usize {
        self.0.timers.borrow().len()
    }

    /// Moves the virtual clock forward, running due tasks in schedule order.
    pub fn advance(&self, by: Duration) {
        let target = self.0.now.get() + by;
        loop {
            let next = {
                let mut timers = self.0.timers.borrow_mut();
                let earliest = timers
                    .iter()
                    .enumerate()
                    .filter(|(_, timer)| timer.due <= target)
                    .min_by_key(|(_, timer)| (timer.due, timer.seq))
                    .map(|(index, _)| index);
                earliest.map(|index| timers.remove(index))
            };
            let Some(timer) = next else { break };
            self.0.now.set(timer.due);
            (timer.task)();
        }
        self.0.now.set(target);
    }
}

impl Dom for MemoryDom {
    type Node = MemoryNode;

    fn element_by_id(&self, id: &str) -> Option<MemoryNode> {
        self.0.root.find_by_id(id)
    }

    fn query_all(&self, selector: &str) -> Vec<MemoryNode> {
        self.0.root.query_all(selector)
    }

    fn scroll_y(&self) -> f64 {
        self.0.scroll_y.get()
    }

    fn pathname(&self) -> String {
        self.0.pathname.borrow().clone()
    }

    fn on_scroll(&self, handler: Handler) {
        self.0.scroll_listeners.borrow_mut().push(handler);
    }

    fn defer(&self, delay: Duration, task: Task) {
        let seq = self.0.next_seq.get();
        self.0.next_seq.set(seq + 1);
        self.0.timers.borrow_mut().push(Timer {
            due: self.0.now.get() + delay,
            seq,
            task,
        });
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Selector {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, Option<String>)>,
}

impl Selector {
    fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() || has_combinator(input) {
            return None;
        }

        let mut selector = Self::default();
        let mut rest = input;
        let tag_end = rest.find(['.', '#', '[']).unwrap_or(rest.len());
        if tag_end > 0 {
            selector.tag = Some(rest[..tag_end].to_ascii_lowercase());
        }
        rest = &rest[tag_end..];

        while let Some(marker) = rest.chars().next() {
            match marker {
                '.' | '#' => {
                    let body = &rest[1..];
                    let end = body.find(['.', '#', '[']).unwrap_or(body.len());
                    let name = &body[..end];
                    if name.is_empty() {
                        return None;
                    }
                    if marker == '.' {
                        selector.classes.push(name.to_owned());
                    } else {
                        selector.id = Some(name.to_owned());
                    }
                    rest = &body[end..];
                }
                '[' => {
                    let end = rest.find(']')?;
                    let inner = &rest[1..end];
                    let attribute = match inner.split_once('=') {
                        Some((name, value)) => {
                            let value = value.trim().trim_matches(|c| c == '\'' || c == '"');
                            (name.trim().to_owned(), Some(value.to_owned()))
                        }
                        None => (inner.trim().to_owned(), None),
                    };
                    if attribute.0.is_empty() {
                        return None;
                    }
                    selector.attributes.push(attribute);
                    rest = &rest[end + 1..];
                }
                _ => return None,
            }
        }
        Some(selector)
    }

    fn matches(&self, node: &NodeData) -> bool {
        self.tag.as_ref().is_none_or(|tag| *tag == node.tag)
            && self
                .id
                .as_ref()
                .is_none_or(|id| node.attributes.get("id") == Some(id))
            && self
                .classes
                .iter()
                .all(|class| node.classes.iter().any(|c| c == class))
            && self.attributes.iter().all(|(name, expected)| {
                match (node.attributes.get(name), expected) {
                    (Some(actual), Some(expected)) => actual == expected,
                    (Some(_), None) => true,
                    (None, _) => false,
                }
            })
    }
}

/// Whether `input` combines several compound selectors. Characters inside
/// `[...]` belong to an attribute value and are ignored.
fn has_combinator(input: &str) -> bool {
    let mut depth = 0_usize;
    input.chars().any(|c| match c {
        '[' => {
            depth += 1;
            false
        }
        ']' => {
            depth = depth.saturating_sub(1);
            false
        }
        ' ' | '>' | '+' | '~' | ',' => depth == 0,
        _ => false,
    })
}
