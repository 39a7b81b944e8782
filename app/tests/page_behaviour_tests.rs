mod harness;

use core::time::Duration;

use app::boot;
use app::config::PageConfig;
use app::dom::memory::{MemoryDom, MemoryNode};
use app::dom::{HIDDEN_CLASS, Node};
use harness::{
    FOOTER_URL, FixedClock, HEADER_URL, HeaderElements, PortfolioPage, ScriptedFetch, footer_route,
};

struct BootedPage {
    dom: MemoryDom,
    page: PortfolioPage,
    header: HeaderElements,
}

fn booted(pathname: &str, initial_scroll: f64) -> BootedPage {
    let dom = MemoryDom::new(pathname);
    dom.set_scroll_y(initial_scroll);
    let page = PortfolioPage::mount(&dom);
    let header = HeaderElements::new();
    let year = MemoryNode::element("span").with_id("year");
    let fetch = ScriptedFetch::new(&dom)
        .route(HEADER_URL, header.route())
        .route(FOOTER_URL, footer_route(&year));
    tokio_test::block_on(boot(&dom, &fetch, &FixedClock(2030), &PageConfig::default()));
    BootedPage { dom, page, header }
}

fn is_shrunk(header: &HeaderElements) -> bool {
    header.site_header.has_class("shadow-soft")
        && header.site_header.has_class("bg-white/95")
        && header.site_header.has_class("border-slate-200/90")
        && !header.site_header.has_class("border-slate-200/70")
        && header.inner.has_class("py-3")
        && !header.inner.has_class("py-5")
}

fn is_resting(header: &HeaderElements) -> bool {
    !header.site_header.has_class("shadow-soft")
        && !header.site_header.has_class("bg-white/95")
        && !header.site_header.has_class("border-slate-200/90")
        && header.site_header.has_class("border-slate-200/70")
        && !header.inner.has_class("py-3")
        && header.inner.has_class("py-5")
}

#[cfg(test)]
mod page_behaviour_tests {
    use super::*;

    #[test]
    fn test_menu_toggle_negates_hidden_state() {
        let BootedPage { header, .. } = booted("/index.html", 0.0);

        for _ in 0..3 {
            let was_hidden = header.mobile_nav.has_class(HIDDEN_CLASS);
            header.menu_button.click();
            assert_eq!(header.mobile_nav.has_class(HIDDEN_CLASS), !was_hidden);
            assert_eq!(
                header.menu_button.attribute("aria-expanded"),
                Some(was_hidden.to_string())
            );
        }
    }

    #[test]
    fn test_menu_link_click_hides_panel() {
        let BootedPage { header, .. } = booted("/index.html", 0.0);

        header.menu_button.click();
        assert!(!header.mobile_nav.has_class(HIDDEN_CLASS));
        header.links[2].click();
        assert!(header.mobile_nav.has_class(HIDDEN_CLASS));
        assert_eq!(header.menu_button.attribute("aria-expanded").as_deref(), Some("false"));
    }

    #[test]
    fn test_header_shrink_follows_scroll() {
        let BootedPage { dom, header, .. } = booted("/index.html", 0.0);
        assert!(is_resting(&header));

        dom.scroll_to(120.0);
        assert!(is_shrunk(&header));

        dom.scroll_to(40.0);
        assert!(is_resting(&header));
    }

    #[test]
    fn test_header_shrunk_when_loaded_mid_scroll() {
        let BootedPage { header, .. } = booted("/index.html", 300.0);
        assert!(is_shrunk(&header));
    }

    #[test]
    fn test_active_link_matches_current_page_only() {
        let BootedPage { header, .. } = booted("/Portfolio.HTML", 0.0);

        assert!(header.links[1].has_class("text-primary"));
        assert!(!header.links[1].has_class("text-slate-700"));
        assert!(!header.links[0].has_class("text-primary"));
        assert!(!header.links[2].has_class("text-primary"));
    }

    #[test]
    fn test_portfolio_filters_by_sector_then_stage() {
        let BootedPage { page, .. } = booted("/portfolio.html", 0.0);
        assert_eq!(page.visible_cards(), 3);

        page.sector.input("fintech");
        assert_eq!(page.visible_cards(), 2);
        assert_eq!(page.count.text(), "2");

        page.stage.input("growth");
        assert_eq!(page.visible_cards(), 1);
        assert_eq!(page.count.text(), "1");
        assert!(!page.cards[2].has_class(HIDDEN_CLASS));

        page.sector.input("all");
        page.stage.input("all");
        page.query.input("  PATIENT ");
        assert_eq!(page.visible_cards(), 1);
        assert!(!page.cards[1].has_class(HIDDEN_CLASS));

        page.query.input("");
        assert_eq!(page.count.text(), "3");
    }

    #[test]
    fn test_form_submit_busy_then_confirmed() {
        let BootedPage { dom, page, .. } = booted("/portfolio.html", 0.0);
        let confirmation = PageConfig::default().forms.confirmation;

        assert!(page.form.submit());
        assert!(page.submit.is_disabled());
        assert_ne!(page.submit.inner_html(), "Request intro");

        dom.advance(Duration::from_millis(500));
        assert!(page.submit.is_disabled());
        assert!(page.message.has_class(HIDDEN_CLASS));

        dom.advance(Duration::from_millis(400));
        assert!(!page.submit.is_disabled());
        assert_eq!(page.submit.inner_html(), "Request intro");
        assert!(!page.message.has_class(HIDDEN_CLASS));
        assert_eq!(page.message.text(), confirmation);
    }

    #[test]
    fn test_invalid_form_is_not_submitted() {
        let BootedPage { dom, page, .. } = booted("/portfolio.html", 0.0);
        page.form.set_valid(false);

        page.form.submit();
        assert_eq!(page.form.validity_reports(), 1);
        assert!(!page.submit.is_disabled());

        dom.advance(Duration::from_secs(2));
        assert!(page.message.has_class(HIDDEN_CLASS));
    }
}
