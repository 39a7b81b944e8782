//! Client-side filtering of the portfolio grid.

use std::rc::Rc;

use log::debug;
use shared_utils::normalize;

use crate::{
    config::PortfolioConfig,
    dom::{Dom, HIDDEN_CLASS, ListenOptions, Node},
};

const WILDCARD: &str = "all";

/// Filter attributes of one portfolio card, normalized.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortfolioCard {
    pub sector: String,
    pub stage: String,
    pub name: String,
    pub description: String,
}

impl PortfolioCard {
    #[must_use]
    pub fn new(sector: &str, stage: &str, name: &str, description: &str) -> Self {
        Self {
            sector: normalize(Some(sector)),
            stage: normalize(Some(stage)),
            name: normalize(Some(name)),
            description: normalize(Some(description)),
        }
    }

    /// Reads the card attributes named in `config` (`data-sector`,
    /// `data-stage`, `data-name` and `data-desc` by default).
    pub fn from_node<N: Node>(node: &N, config: &PortfolioConfig) -> Self {
        let read = |name: &str| normalize(node.attribute(name).as_deref());
        Self {
            sector: read(&config.sector_attribute),
            stage: read(&config.stage_attribute),
            name: read(&config.name_attribute),
            description: read(&config.description_attribute),
        }
    }
}

/// Current sector/stage/search selection. Empty or `"all"` matches anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    sector: String,
    stage: String,
    query: String,
}

impl FilterCriteria {
    #[must_use]
    pub fn new(sector: Option<&str>, stage: Option<&str>, query: Option<&str>) -> Self {
        Self {
            sector: normalize(sector),
            stage: normalize(stage),
            query: normalize(query),
        }
    }

    #[must_use]
    pub fn matches(&self, card: &PortfolioCard) -> bool {
        let sector_ok = is_wildcard(&self.sector) || card.sector == self.sector;
        let stage_ok = is_wildcard(&self.stage) || card.stage == self.stage;
        let query_ok = self.query.is_empty()
            || card.name.contains(&self.query)
            || card.description.contains(&self.query);
        sector_ok && stage_ok && query_ok
    }
}

fn is_wildcard(value: &str) -> bool {
    value.is_empty() || value == WILDCARD
}

struct PortfolioFilter<N> {
    cards: Vec<(N, PortfolioCard)>,
    sector: Option<N>,
    stage: Option<N>,
    query: Option<N>,
    count: Option<N>,
}

impl<N: Node> PortfolioFilter<N> {
    fn criteria(&self) -> FilterCriteria {
        let value = |control: &Option<N>| control.as_ref().and_then(Node::value);
        FilterCriteria::new(
            value(&self.sector).as_deref(),
            value(&self.stage).as_deref(),
            value(&self.query).as_deref(),
        )
    }

    fn apply(&self) -> usize {
        let criteria = self.criteria();
        let mut visible = 0;
        for (node, card) in &self.cards {
            let shown = criteria.matches(card);
            node.toggle_class(HIDDEN_CLASS, !shown);
            if shown {
                visible += 1;
            }
        }
        if let Some(count) = &self.count {
            count.set_text(&visible.to_string());
        }
        visible
    }
}

/// Wires the sector/stage/search controls to the portfolio grid and applies
/// the initial selection.
///
/// Returns the number of visible cards, or `None` when the page has no grid.
pub fn setup_portfolio_filters<D: Dom>(dom: &D, config: &PortfolioConfig) -> Option<usize> {
    let Some(grid) = dom.element_by_id(&config.grid_id) else {
        debug!("no #{} on this page; skipping filters", config.grid_id);
        return None;
    };

    let filter = Rc::new(PortfolioFilter {
        cards: grid
            .query_all(&config.card_selector)
            .into_iter()
            .map(|node| {
                let card = PortfolioCard::from_node(&node, config);
                (node, card)
            })
            .collect(),
        sector: dom.element_by_id(&config.sector_filter_id),
        stage: dom.element_by_id(&config.stage_filter_id),
        query: dom.element_by_id(&config.query_filter_id),
        count: dom.element_by_id(&config.count_id),
    });

    for control in [&filter.sector, &filter.stage, &filter.query].into_iter().flatten() {
        let filter = Rc::clone(&filter);
        control.listen(
            "input",
            ListenOptions::default(),
            Box::new(move || {
                filter.apply();
            }),
        );
    }

    Some(filter.apply())
}
