//! Browser implementation of the page context, on top of `web-sys`.

use core::time::Duration;

use leptos::prelude::{document, set_timeout, window};
use log::warn;
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    AddEventListenerOptions, Element, Event, HtmlButtonElement, HtmlFormElement,
    HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, NodeList, RequestCache,
    RequestInit, Response,
};

use super::{Dom, Handler, ListenOptions, Node, Task};
use crate::{error::FragmentError, fragments::FetchText};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebNode(pub Element);

impl Node for WebNode {
    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn toggle_class(&self, class: &str, on: bool) {
        if let Err(err) = self.0.class_list().toggle_with_force(class, on) {
            warn!("could not toggle class {class:?}: {}", describe(&err));
        }
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if let Err(err) = self.0.set_attribute(name, value) {
            warn!("could not set attribute {name:?}: {}", describe(&err));
        }
    }

    fn inner_html(&self) -> String {
        self.0.inner_html()
    }

    fn set_inner_html(&self, html: &str) {
        self.0.set_inner_html(html);
    }

    fn set_text(&self, text: &str) {
        self.0.set_text_content(Some(text));
    }

    fn value(&self) -> Option<String> {
        if let Some(input) = self.0.dyn_ref::<HtmlInputElement>() {
            Some(input.value())
        } else if let Some(select) = self.0.dyn_ref::<HtmlSelectElement>() {
            Some(select.value())
        } else {
            self.0
                .dyn_ref::<HtmlTextAreaElement>()
                .map(HtmlTextAreaElement::value)
        }
    }

    fn set_disabled(&self, disabled: bool) {
        if let Some(button) = self.0.dyn_ref::<HtmlButtonElement>() {
            button.set_disabled(disabled);
        } else if disabled {
            self.set_attribute("disabled", "");
        } else if let Err(err) = self.0.remove_attribute("disabled") {
            warn!("could not clear disabled: {}", describe(&err));
        }
    }

    fn check_validity(&self) -> bool {
        self.0
            .dyn_ref::<HtmlFormElement>()
            .is_none_or(HtmlFormElement::check_validity)
    }

    fn report_validity(&self) {
        if let Some(form) = self.0.dyn_ref::<HtmlFormElement>() {
            form.report_validity();
        }
    }

    fn query_all(&self, selector: &str) -> Vec<Self> {
        match self.0.query_selector_all(selector) {
            Ok(list) => elements(&list),
            Err(err) => {
                warn!("bad selector {selector:?}: {}", describe(&err));
                Vec::new()
            }
        }
    }

    fn listen(&self, event: &str, options: ListenOptions, handler: Handler) {
        add_listener(&self.0, event, options, handler);
    }
}

/// The live browser page.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebDom;

impl Dom for WebDom {
    type Node = WebNode;

    fn element_by_id(&self, id: &str) -> Option<WebNode> {
        document().get_element_by_id(id).map(WebNode)
    }

    fn query_all(&self, selector: &str) -> Vec<WebNode> {
        match document().query_selector_all(selector) {
            Ok(list) => elements(&list),
            Err(err) => {
                warn!("bad selector {selector:?}: {}", describe(&err));
                Vec::new()
            }
        }
    }

    fn scroll_y(&self) -> f64 {
        window().scroll_y().unwrap_or_default()
    }

    fn pathname(&self) -> String {
        window().location().pathname().unwrap_or_default()
    }

    fn on_scroll(&self, handler: Handler) {
        add_listener(&window(), "scroll", ListenOptions::PASSIVE, handler);
    }

    fn defer(&self, delay: Duration, task: Task) {
        set_timeout(task, delay);
    }
}

/// Fetches fragments through `window.fetch` with the HTTP cache bypassed.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebFetch;

impl FetchText for WebFetch {
    async fn fetch_text(&self, url: &str) -> Result<String, FragmentError> {
        let init = RequestInit::new();
        init.set_method("GET");
        init.set_cache(RequestCache::NoStore);

        let response = JsFuture::from(window().fetch_with_str_and_init(url, &init))
            .await
            .map_err(|err| FragmentError::Network(describe(&err)))?;
        let response: Response = response
            .dyn_into()
            .map_err(|err| FragmentError::Network(describe(&err)))?;
        if !response.ok() {
            return Err(FragmentError::Status(response.status()));
        }

        let body = response
            .text()
            .map_err(|err| FragmentError::Body(describe(&err)))?;
        JsFuture::from(body)
            .await
            .map_err(|err| FragmentError::Body(describe(&err)))?
            .as_string()
            .ok_or_else(|| FragmentError::Body("response body is not text".to_owned()))
    }
}

fn add_listener(
    target: &web_sys::EventTarget,
    event: &str,
    options: ListenOptions,
    mut handler: Handler,
) {
    let prevent_default = options.prevent_default;
    let closure = Closure::<dyn FnMut(Event)>::new(move |ev: Event| {
        if prevent_default {
            ev.prevent_default();
        }
        handler();
    });

    let listener_options = AddEventListenerOptions::new();
    listener_options.set_passive(options.passive);
    if let Err(err) = target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        closure.as_ref().unchecked_ref(),
        &listener_options,
    ) {
        warn!("could not listen for {event:?}: {}", describe(&err));
    }
    // Listeners stay attached until the page unloads.
    closure.forget();
}

fn elements(list: &NodeList) -> Vec<WebNode> {
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .map(WebNode)
        .collect()
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}
