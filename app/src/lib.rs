//! Page controller for the BAC static website.
//!
//! Every page loads the same WASM bundle, which calls [`boot`] once. Boot
//! injects the shared header and footer fragments, then wires the behaviours
//! that depend on them. Each behaviour looks up only the elements it needs and
//! silently does nothing when they are absent, so one bundle serves every page.

use log::info;

pub mod config;
pub mod dom;
pub mod error;
pub mod forms;
pub mod fragments;
pub mod nav;
pub mod portfolio;
pub mod year;

use crate::{
    config::PageConfig,
    dom::Dom,
    fragments::{FetchText, InjectOutcome, inject_partial},
    year::Clock,
};

/// Summary of what [`boot`] found and wired on the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootReport {
    pub header: InjectOutcome,
    pub footer: InjectOutcome,
    pub mobile_menu: bool,
    pub header_shrink: bool,
    pub active_links: usize,
    pub year: bool,
    pub forms: usize,
    /// Visible portfolio cards after the initial filter pass, if the page has a grid.
    pub portfolio_visible: Option<usize>,
}

/// Runs the page start-up sequence.
///
/// The header and footer are loaded one after the other and both are in place
/// before any behaviour is wired, since the navigation elements live inside
/// the header fragment.
pub async fn boot<D, F, C>(dom: &D, fetcher: &F, clock: &C, config: &PageConfig) -> BootReport
where
    D: Dom,
    F: FetchText,
    C: Clock,
{
    let fragments = &config.fragments;
    let template = &fragments.fallback_template;
    let header = inject_partial(dom, fetcher, &fragments.header, template).await;
    let footer = inject_partial(dom, fetcher, &fragments.footer, template).await;

    let report = BootReport {
        header,
        footer,
        mobile_menu: nav::setup_mobile_menu(dom, &config.nav),
        header_shrink: nav::setup_header_shrink(dom, &config.nav),
        active_links: nav::set_active_nav(dom, &config.nav),
        year: year::set_year(dom, config.year_id.as_ref(), clock),
        forms: forms::setup_form_ux(dom, &config.forms),
        portfolio_visible: portfolio::setup_portfolio_filters(dom, &config.portfolio),
    };
    info!("page controller ready: {report:?}");
    report
}
