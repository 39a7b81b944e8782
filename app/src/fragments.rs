//! Shared header/footer injection.
//!
//! Each page ships empty placeholders that are filled with markup fetched at
//! load time. A fragment that cannot be fetched is replaced by an inline
//! notice naming its URL so the rest of the page stays usable.

use log::{debug, warn};
use shared_utils::escape_html;

use crate::{
    config::{FragmentSource, URL_PLACEHOLDER},
    dom::{Dom, Node},
    error::FragmentError,
};

/// Source of fragment markup.
#[allow(async_fn_in_trait)]
pub trait FetchText {
    /// Fetches `url` bypassing the HTTP cache and returns the body text of a
    /// successful response.
    async fn fetch_text(&self, url: &str) -> Result<String, FragmentError>;
}

/// What [`inject_partial`] did with a placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectOutcome {
    Injected,
    Fallback,
    MissingTarget,
}

/// Renders the notice shown in place of a fragment that failed to load.
#[must_use]
pub fn fallback_markup(template: &str, url: &str) -> String {
    template.replace(URL_PLACEHOLDER, &escape_html(url))
}

/// Loads `source.url` into the element with id `source.target_id`.
///
/// Never fails: fetch errors are logged and rendered as the fallback notice.
pub async fn inject_partial<D, F>(
    dom: &D,
    fetcher: &F,
    source: &FragmentSource,
    fallback_template: &str,
) -> InjectOutcome
where
    D: Dom,
    F: FetchText,
{
    let Some(target) = dom.element_by_id(&source.target_id) else {
        debug!("no #{} placeholder; skipping {}", source.target_id, source.url);
        return InjectOutcome::MissingTarget;
    };

    match fetcher.fetch_text(&source.url).await {
        Ok(markup) => {
            target.set_inner_html(&markup);
            InjectOutcome::Injected
        }
        Err(err) => {
            warn!("failed to load fragment {}: {err}", source.url);
            target.set_inner_html(&fallback_markup(fallback_template, &source.url));
            InjectOutcome::Fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::FragmentConfig,
        dom::memory::{MemoryDom, MemoryNode},
    };

    struct Fixed(Result<&'static str, FragmentError>);

    impl FetchText for Fixed {
        async fn fetch_text(&self, _url: &str) -> Result<String, FragmentError> {
            self.0.clone().map(str::to_owned)
        }
    }

    fn page() -> (MemoryDom, MemoryNode) {
        let dom = MemoryDom::new("/index.html");
        let placeholder = dom.append(MemoryNode::element("div").with_id("site-header"));
        (dom, placeholder)
    }

    fn header() -> FragmentSource {
        FragmentConfig::default().header
    }

    #[test]
    fn successful_fetch_replaces_placeholder_content() {
        let (dom, placeholder) = page();
        let outcome = tokio_test::block_on(inject_partial(
            &dom,
            &Fixed(Ok("<header id=\"siteHeader\"></header>")),
            &header(),
            "{url}",
        ));

        assert_eq!(outcome, InjectOutcome::Injected);
        assert_eq!(placeholder.inner_html(), "<header id=\"siteHeader\"></header>");
    }

    #[test]
    fn http_error_renders_notice_with_url() {
        let (dom, placeholder) = page();
        let template = FragmentConfig::default().fallback_template;
        let outcome = tokio_test::block_on(inject_partial(
            &dom,
            &Fixed(Err(FragmentError::Status(404))),
            &header(),
            &template,
        ));

        assert_eq!(outcome, InjectOutcome::Fallback);
        assert!(placeholder.inner_html().contains("./partials/header.html"));
        assert!(placeholder.inner_html().starts_with("<div"));
    }

    #[test]
    fn network_error_renders_notice_with_url() {
        let (dom, placeholder) = page();
        let outcome = tokio_test::block_on(inject_partial(
            &dom,
            &Fixed(Err(FragmentError::Network("TypeError: Failed to fetch".into()))),
            &header(),
            "Could not load {url}",
        ));

        assert_eq!(outcome, InjectOutcome::Fallback);
        assert_eq!(placeholder.inner_html(), "Could not load ./partials/header.html");
    }

    #[test]
    fn missing_placeholder_is_skipped() {
        let dom = MemoryDom::new("/");
        let outcome = tokio_test::block_on(inject_partial(
            &dom,
            &Fixed(Ok("<p>never used</p>")),
            &header(),
            "{url}",
        ));
        assert_eq!(outcome, InjectOutcome::MissingTarget);
    }

    #[test]
    fn fallback_escapes_url() {
        assert_eq!(
            fallback_markup("<p>({url})</p>", "./p.html?a=1&b=<x>"),
            "<p>(./p.html?a=1&amp;b=&lt;x&gt;)</p>"
        );
    }
}
