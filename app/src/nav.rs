//! Header behaviours: mobile menu, shrink-on-scroll and the active link.
//!
//! The header is injected as a fragment, so everything here must run after
//! [`crate::fragments::inject_partial`] has completed.

use log::debug;

use crate::{
    config::{NavConfig, ShrinkClasses},
    dom::{Dom, HIDDEN_CLASS, ListenOptions, Node},
};

const ARIA_EXPANDED: &str = "aria-expanded";

/// Wires the hamburger button to the mobile navigation panel.
///
/// Returns `false` when either element is missing.
pub fn setup_mobile_menu<D: Dom>(dom: &D, config: &NavConfig) -> bool {
    let (Some(button), Some(panel)) = (
        dom.element_by_id(&config.menu_button_id),
        dom.element_by_id(&config.mobile_nav_id),
    ) else {
        debug!("mobile menu elements not found; skipping");
        return false;
    };

    {
        let trigger = button.clone();
        let panel = panel.clone();
        button.listen(
            "click",
            ListenOptions::default(),
            Box::new(move || {
                let was_hidden = panel.has_class(HIDDEN_CLASS);
                panel.toggle_class(HIDDEN_CLASS, !was_hidden);
                trigger.set_attribute(ARIA_EXPANDED, if was_hidden { "true" } else { "false" });
            }),
        );
    }

    for link in panel.query_all("a") {
        let button = button.clone();
        let panel = panel.clone();
        link.listen(
            "click",
            ListenOptions::default(),
            Box::new(move || {
                panel.add_class(HIDDEN_CLASS);
                button.set_attribute(ARIA_EXPANDED, "false");
            }),
        );
    }
    true
}

/// Applies the scrolled/resting class sets to the header and its inner row.
pub fn apply_shrink<N: Node>(header: &N, inner: &N, classes: &ShrinkClasses, scrolled: bool) {
    for class in &classes.header_scrolled {
        header.toggle_class(class, scrolled);
    }
    for class in &classes.header_resting {
        header.toggle_class(class, !scrolled);
    }
    for class in &classes.inner_scrolled {
        inner.toggle_class(class, scrolled);
    }
    for class in &classes.inner_resting {
        inner.toggle_class(class, !scrolled);
    }
}

/// Shrinks the sticky header once the page scrolls past the threshold.
///
/// The state is applied immediately as well, for pages restored mid-scroll.
pub fn setup_header_shrink<D: Dom>(dom: &D, config: &NavConfig) -> bool {
    let (Some(header), Some(inner)) = (
        dom.element_by_id(&config.header_id),
        dom.element_by_id(&config.header_inner_id),
    ) else {
        debug!("header elements not found; skipping shrink");
        return false;
    };

    let threshold = config.shrink_threshold;
    let classes = config.shrink_classes.clone();
    let page = dom.clone();
    let apply = move || apply_shrink(&header, &inner, &classes, page.scroll_y() > threshold);

    apply();
    dom.on_scroll(Box::new(apply));
    true
}

/// Highlights every navigation link whose `data-path` names the current page.
///
/// Returns the number of links marked active.
pub fn set_active_nav<D: Dom>(dom: &D, config: &NavConfig) -> usize {
    let page = shared_utils::last_path_segment(&dom.pathname(), &config.home_page);

    let mut marked = 0;
    for link in dom.query_all(&config.link_selector) {
        let path = shared_utils::normalize(link.attribute(&config.path_attribute).as_deref());
        if !path.is_empty() && path == page {
            link.add_class(&config.active_class);
            link.remove_class(&config.inactive_class);
            marked += 1;
        }
    }
    marked
}
