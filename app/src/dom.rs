//! The page context every behaviour is wired against.
//!
//! [`Dom`] is the page (lookup, scroll position, location, timers) and [`Node`]
//! is a handle to one element in it. Behaviours only ever talk to these two
//! traits, so they run unchanged against the browser ([`web`]) and against the
//! in-memory page used by the test suites (`memory`, built for tests and with
//! the `testing` feature).

use core::time::Duration;

#[cfg(any(test, feature = "testing"))]
pub mod memory;
pub mod web;

/// Class used across the site to hide an element.
pub const HIDDEN_CLASS: &str = "hidden";

/// How an event handler is attached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenOptions {
    /// The handler never cancels the event; lets the browser scroll without waiting.
    pub passive: bool,
    /// Call `preventDefault()` before the handler runs.
    pub prevent_default: bool,
}

impl ListenOptions {
    pub const PASSIVE: Self = Self {
        passive: true,
        prevent_default: false,
    };

    pub const PREVENT_DEFAULT: Self = Self {
        passive: false,
        prevent_default: true,
    };
}

/// Boxed event handler. Handlers read whatever they need from the DOM when
/// they fire; nothing is passed in.
pub type Handler = Box<dyn FnMut()>;

/// A deferred task scheduled with [`Dom::defer`].
pub type Task = Box<dyn FnOnce()>;

/// Handle to a single element.
pub trait Node: Clone + 'static {
    fn has_class(&self, class: &str) -> bool;

    /// Adds `class` when `on` is true and removes it otherwise.
    fn toggle_class(&self, class: &str, on: bool);

    fn add_class(&self, class: &str) {
        self.toggle_class(class, true);
    }

    fn remove_class(&self, class: &str) {
        self.toggle_class(class, false);
    }

    fn attribute(&self, name: &str) -> Option<String>;

    fn set_attribute(&self, name: &str, value: &str);

    fn inner_html(&self) -> String;

    fn set_inner_html(&self, html: &str);

    fn set_text(&self, text: &str);

    /// Current value of a form control, `None` for other elements.
    fn value(&self) -> Option<String>;

    fn set_disabled(&self, disabled: bool);

    /// Runs constraint validation on a form. Non-form elements are always valid.
    fn check_validity(&self) -> bool;

    /// Shows the browser's validation feedback for a form.
    fn report_validity(&self);

    /// All descendants matching `selector`, in document order.
    fn query_all(&self, selector: &str) -> Vec<Self>;

    fn query(&self, selector: &str) -> Option<Self> {
        self.query_all(selector).into_iter().next()
    }

    /// Attaches `handler` to `event` for the lifetime of the page.
    fn listen(&self, event: &str, options: ListenOptions, handler: Handler);
}

/// The page as a whole.
pub trait Dom: Clone + 'static {
    type Node: Node;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    fn query_all(&self, selector: &str) -> Vec<Self::Node>;

    /// Vertical scroll offset of the viewport in CSS pixels.
    fn scroll_y(&self) -> f64;

    /// Path component of the current location.
    fn pathname(&self) -> String;

    /// Registers a passive window scroll listener.
    fn on_scroll(&self, handler: Handler);

    /// Runs `task` once after `delay`.
    fn defer(&self, delay: Duration, task: Task);
}
