//! Placeholder submission UX for forms that have no backend yet.
//!
//! Opted-in forms validate natively, show a busy submit button for a fixed
//! delay and then reveal a confirmation message. Nothing is sent anywhere.

use core::cell::Cell;
use std::rc::Rc;

use log::{debug, info};
use shared_utils::escape_html;

use crate::{
    config::FormConfig,
    dom::{Dom, HIDDEN_CLASS, ListenOptions, Node},
};

/// Markup placed in the submit button while the fake submission runs.
#[must_use]
pub fn sending_markup(label: &str) -> String {
    format!(
        concat!(
            r#"<span class="inline-flex items-center gap-2">"#,
            r#"<span class="h-4 w-4 rounded-full border-2 border-white/60 "#,
            r#"border-t-white animate-spin"></span>"#,
            "{}</span>"
        ),
        escape_html(label)
    )
}

/// Attaches the placeholder submit behaviour to every opted-in form.
///
/// Forms without a submit button are left alone. Returns how many forms were wired.
pub fn setup_form_ux<D: Dom>(dom: &D, config: &FormConfig) -> usize {
    let mut wired = 0;
    for form in dom.query_all(&config.form_selector) {
        let Some(submit) = form.query(&config.submit_selector) else {
            debug!("opted-in form has no submit button; skipping");
            continue;
        };
        let message = form.query(&config.message_selector);
        let busy = Rc::new(Cell::new(false));

        let page = dom.clone();
        let target = form.clone();
        let config = config.clone();
        form.listen(
            "submit",
            ListenOptions::PREVENT_DEFAULT,
            Box::new(move || {
                if busy.get() {
                    return;
                }
                if !target.check_validity() {
                    target.report_validity();
                    return;
                }

                busy.set(true);
                submit.set_disabled(true);
                let previous = submit.inner_html();
                submit.set_inner_html(&sending_markup(&config.sending_label));

                let busy = busy.clone();
                let submit = submit.clone();
                let message = message.clone();
                let confirmation = config.confirmation.clone();
                page.defer(
                    config.delay(),
                    Box::new(move || {
                        submit.set_disabled(false);
                        submit.set_inner_html(&previous);
                        if let Some(message) = message {
                            message.remove_class(HIDDEN_CLASS);
                            message.set_text(&confirmation);
                        }
                        busy.set(false);
                        info!("placeholder form submission completed");
                    }),
                );
            }),
        );
        wired += 1;
    }
    wired
}
