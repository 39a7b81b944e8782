#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;

use app::dom::memory::{MemoryDom, MemoryNode};
use app::error::FragmentError;
use app::fragments::FetchText;
use app::year::Clock;

pub const HEADER_URL: &str = "./partials/header.html";
pub const FOOTER_URL: &str = "./partials/footer.html";

/// What a scripted fragment request answers with.
pub enum Route {
    /// Successful response. `elements` stand in for the nodes the markup
    /// introduces and are attached to the page when the fragment is fetched.
    Markup {
        html: String,
        elements: Vec<MemoryNode>,
    },
    Fail(FragmentError),
}

/// Fragment fetcher answering from a fixed route table and recording every
/// requested URL in order.
pub struct ScriptedFetch {
    dom: MemoryDom,
    routes: HashMap<String, Route>,
    requests: RefCell<Vec<String>>,
}

impl ScriptedFetch {
    pub fn new(dom: &MemoryDom) -> Self {
        Self {
            dom: dom.clone(),
            routes: HashMap::new(),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn route(mut self, url: &str, route: Route) -> Self {
        self.routes.insert(url.to_owned(), route);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl FetchText for ScriptedFetch {
    async fn fetch_text(&self, url: &str) -> Result<String, FragmentError> {
        self.requests.borrow_mut().push(url.to_owned());
        match self.routes.get(url) {
            Some(Route::Markup { html, elements }) => {
                for element in elements {
                    self.dom.append(element.clone());
                }
                Ok(html.clone())
            }
            Some(Route::Fail(err)) => Err(err.clone()),
            None => Err(FragmentError::Status(404)),
        }
    }
}

pub struct FixedClock(pub i32);

impl Clock for FixedClock {
    fn current_year(&self) -> i32 {
        self.0
    }
}

/// Elements normally delivered by the header fragment.
pub struct HeaderElements {
    pub site_header: MemoryNode,
    pub inner: MemoryNode,
    pub menu_button: MemoryNode,
    pub mobile_nav: MemoryNode,
    pub links: Vec<MemoryNode>,
}

impl HeaderElements {
    pub fn new() -> Self {
        let links: Vec<MemoryNode> = ["index.html", "portfolio.html", "contact.html"]
            .into_iter()
            .map(|path| {
                MemoryNode::element("a")
                    .with_class("navlink text-slate-700")
                    .with_attr("data-path", path)
                    .with_attr("href", path)
            })
            .collect();

        let mut mobile_nav = MemoryNode::element("nav").with_id("mobileNav").with_class("hidden");
        for link in &links {
            mobile_nav = mobile_nav.with_child(link.clone());
        }

        let menu_button = MemoryNode::element("button")
            .with_id("menuBtn")
            .with_attr("aria-expanded", "false");
        let inner = MemoryNode::element("div")
            .with_id("headerInner")
            .with_class("py-5")
            .with_child(menu_button.clone());
        let site_header = MemoryNode::element("header")
            .with_id("siteHeader")
            .with_class("border-slate-200/70")
            .with_child(inner.clone())
            .with_child(mobile_nav.clone());

        Self {
            site_header,
            inner,
            menu_button,
            mobile_nav,
            links,
        }
    }

    pub fn route(&self) -> Route {
        Route::Markup {
            html: "<header id=\"siteHeader\">…</header>".to_owned(),
            elements: vec![self.site_header.clone()],
        }
    }
}

/// Elements normally delivered by the footer fragment.
pub fn footer_route(year: &MemoryNode) -> Route {
    Route::Markup {
        html: "<footer>© <span id=\"year\"></span></footer>".to_owned(),
        elements: vec![MemoryNode::element("footer").with_child(year.clone())],
    }
}

/// A portfolio page body: filter controls, three cards and a contact form.
pub struct PortfolioPage {
    pub sector: MemoryNode,
    pub stage: MemoryNode,
    pub query: MemoryNode,
    pub count: MemoryNode,
    pub cards: Vec<MemoryNode>,
    pub form: MemoryNode,
    pub submit: MemoryNode,
    pub message: MemoryNode,
}

impl PortfolioPage {
    pub fn mount(dom: &MemoryDom) -> Self {
        dom.append(MemoryNode::element("div").with_id("site-header"));

        let sector = dom.append(
            MemoryNode::element("select")
                .with_id("filterSector")
                .with_value("all"),
        );
        let stage = dom.append(
            MemoryNode::element("select")
                .with_id("filterStage")
                .with_value("all"),
        );
        let query = dom.append(MemoryNode::element("input").with_id("filterQuery").with_value(""));
        let count = dom.append(MemoryNode::element("span").with_id("filterCount"));

        let cards: Vec<MemoryNode> = [
            ("Fintech", "Seed", "Ledgerly", "Invoice payments for small businesses"),
            ("Health", "Growth", "Pulse", "Remote patient monitoring"),
            ("Fintech", "Growth", "Vault", "Treasury automation"),
        ]
        .into_iter()
        .map(|(sector, stage, name, desc)| {
            MemoryNode::element("article")
                .with_attr("data-card", "portfolio")
                .with_attr("data-sector", sector)
                .with_attr("data-stage", stage)
                .with_attr("data-name", name)
                .with_attr("data-desc", desc)
        })
        .collect();
        let grid = dom.append(MemoryNode::element("section").with_id("portfolioGrid"));
        for card in &cards {
            grid.append(card.clone());
        }

        let submit = MemoryNode::element("button")
            .with_attr("type", "submit")
            .with_html("Request intro");
        let message = MemoryNode::element("p")
            .with_attr("data-form-message", "")
            .with_class("hidden");
        let form = dom.append(
            MemoryNode::element("form")
                .with_attr("data-ux", "loading")
                .with_child(MemoryNode::element("input").with_attr("type", "email"))
                .with_child(submit.clone())
                .with_child(message.clone()),
        );

        dom.append(MemoryNode::element("div").with_id("site-footer"));

        Self {
            sector,
            stage,
            query,
            count,
            cards,
            form,
            submit,
            message,
        }
    }

    pub fn visible_cards(&self) -> usize {
        use app::dom::{HIDDEN_CLASS, Node};
        self.cards.iter().filter(|card| !card.has_class(HIDDEN_CLASS)).count()
    }
}
