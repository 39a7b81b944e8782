//! This crate provides the WebAssembly (WASM) entry point for the BAC site.
//!
//! It initializes client-side logging and the panic hook, resolves the page
//! configuration, and hands control to [`app::boot`].

use app::{
    config::PageConfig,
    dom::web::{WebDom, WebFetch},
    year::SystemClock,
};
use leptos::prelude::document;
use wasm_bindgen::prelude::*;

/// Id of the optional `<script type="application/json">` holding a config override.
const CONFIG_ELEMENT_ID: &str = "page-config";

#[wasm_bindgen]
/// Boots the page controller.
///
/// Reads an optional JSON override from `#page-config`; a malformed override is
/// logged and the defaults are used instead.
pub fn boot() {
    init_logging();
    let config = embedded_config().unwrap_or_default();
    run(config);
}

#[wasm_bindgen]
/// Boots the page controller with an explicit JSON configuration override.
///
/// # Errors
///
/// Returns the configuration error as a JS string if `json` does not parse or
/// fails validation; nothing is wired in that case.
pub fn boot_with_config(json: &str) -> Result<(), JsValue> {
    init_logging();
    let config = PageConfig::from_json(json).map_err(|err| JsValue::from_str(&err.to_string()))?;
    run(config);
    Ok(())
}

fn init_logging() {
    // Initialize console logging for client-side debugging.
    _ = console_log::init_with_level(log::Level::Debug);
    console_error_panic_hook::set_once();
}

fn embedded_config() -> Option<PageConfig> {
    let json = document()
        .get_element_by_id(CONFIG_ELEMENT_ID)?
        .text_content()?;
    match PageConfig::from_json(&json) {
        Ok(config) => Some(config),
        Err(err) => {
            log::error!("ignoring #{CONFIG_ELEMENT_ID}: {err}");
            None
        }
    }
}

fn run(config: PageConfig) {
    wasm_bindgen_futures::spawn_local(async move {
        app::boot(&WebDom, &WebFetch, &SystemClock, &config).await;
    });
}
