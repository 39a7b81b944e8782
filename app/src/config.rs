//! Page configuration.
//!
//! Every element id, selector, CSS class set, timing constant and UI string
//! the behaviours depend on lives here. The defaults match the markup shipped
//! with the site; a page may override any subset of them with a JSON blob.

use core::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

/// A shared markup fragment: where it goes and where it comes from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FragmentSource {
    pub target_id: String,
    pub url: String,
}

impl FragmentSource {
    #[must_use]
    pub fn new(target_id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            target_id: target_id.into(),
            url: url.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FragmentConfig {
    pub header: FragmentSource,
    pub footer: FragmentSource,
    /// Markup shown in place of a fragment that failed to load. `{url}` is
    /// replaced by the escaped fragment URL.
    pub fallback_template: String,
}

impl Default for FragmentConfig {
    fn default() -> Self {
        Self {
            header: FragmentSource::new("site-header", "./partials/header.html"),
            footer: FragmentSource::new("site-footer", "./partials/footer.html"),
            fallback_template: concat!(
                r#"<div class="mx-auto max-w-7xl px-6 py-4 text-sm text-slate-600">"#,
                "No se pudo cargar un componente compartido ({url}). ",
                "Revisá rutas relativas / GitHub Pages.",
                "</div>"
            )
            .to_owned(),
        }
    }
}

/// CSS classes toggled on the sticky header by the scroll position.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ShrinkClasses {
    /// Present on the header only while scrolled past the threshold.
    pub header_scrolled: Vec<String>,
    /// Present on the header only while at rest.
    pub header_resting: Vec<String>,
    pub inner_scrolled: Vec<String>,
    pub inner_resting: Vec<String>,
}

impl Default for ShrinkClasses {
    fn default() -> Self {
        Self {
            header_scrolled: strings(&["bg-white/95", "shadow-soft", "border-slate-200/90"]),
            header_resting: strings(&["border-slate-200/70"]),
            inner_scrolled: strings(&["py-3"]),
            inner_resting: strings(&["py-5"]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    pub menu_button_id: String,
    pub mobile_nav_id: String,
    pub header_id: String,
    pub header_inner_id: String,
    /// Vertical scroll offset, in CSS pixels, past which the header shrinks.
    pub shrink_threshold: f64,
    pub shrink_classes: ShrinkClasses,
    pub link_selector: String,
    pub path_attribute: String,
    pub home_page: String,
    pub active_class: String,
    pub inactive_class: String,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            menu_button_id: "menuBtn".to_owned(),
            mobile_nav_id: "mobileNav".to_owned(),
            header_id: "siteHeader".to_owned(),
            header_inner_id: "headerInner".to_owned(),
            shrink_threshold: 40.0,
            shrink_classes: ShrinkClasses::default(),
            link_selector: ".navlink".to_owned(),
            path_attribute: "data-path".to_owned(),
            home_page: shared_utils::DEFAULT_PAGE.to_owned(),
            active_class: "text-primary".to_owned(),
            inactive_class: "text-slate-700".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub form_selector: String,
    pub submit_selector: String,
    pub message_selector: String,
    /// How long the fake submission keeps the button busy, in milliseconds.
    pub delay_ms: u64,
    pub sending_label: String,
    pub confirmation: String,
}

impl FormConfig {
    #[must_use]
    pub const fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            form_selector: "form[data-ux='loading']".to_owned(),
            submit_selector: "button[type='submit']".to_owned(),
            message_selector: "[data-form-message]".to_owned(),
            delay_ms: 900,
            sending_label: "Enviando\u{2026}".to_owned(),
            confirmation: "Recibido. Este formulario aún no tiene backend conectado.".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PortfolioConfig {
    pub grid_id: String,
    pub card_selector: String,
    pub sector_filter_id: String,
    pub stage_filter_id: String,
    pub query_filter_id: String,
    pub count_id: String,
    pub sector_attribute: String,
    pub stage_attribute: String,
    pub name_attribute: String,
    /// Free-text description searched alongside the name.
    pub description_attribute: String,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            grid_id: "portfolioGrid".to_owned(),
            card_selector: "[data-card='portfolio']".to_owned(),
            sector_filter_id: "filterSector".to_owned(),
            stage_filter_id: "filterStage".to_owned(),
            query_filter_id: "filterQuery".to_owned(),
            count_id: "filterCount".to_owned(),
            sector_attribute: "data-sector".to_owned(),
            stage_attribute: "data-stage".to_owned(),
            name_attribute: "data-name".to_owned(),
            description_attribute: "data-desc".to_owned(),
        }
    }
}

/// Placeholder in [`FragmentConfig::fallback_template`] replaced by the URL.
pub const URL_PLACEHOLDER: &str = "{url}";

/// Top-level configuration handed to [`crate::boot`].
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub fragments: FragmentConfig,
    pub nav: NavConfig,
    pub forms: FormConfig,
    pub portfolio: PortfolioConfig,
    pub year_id: YearId,
}

/// Id of the element receiving the copyright year.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct YearId(pub String);

impl Default for YearId {
    fn default() -> Self {
        Self("year".to_owned())
    }
}

impl AsRef<str> for YearId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PageConfig {
    /// Parses a (possibly partial) JSON override on top of the defaults and
    /// validates the result.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] when [`PageConfig::validate`] fails.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the invariants the behaviours rely on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, source) in [
            ("fragments.header", &self.fragments.header),
            ("fragments.footer", &self.fragments.footer),
        ] {
            if source.target_id.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{name}.target_id is empty")));
            }
            if source.url.trim().is_empty() {
                return Err(ConfigError::Invalid(format!("{name}.url is empty")));
            }
        }
        if !self.fragments.fallback_template.contains(URL_PLACEHOLDER) {
            return Err(ConfigError::Invalid(format!(
                "fragments.fallback_template must contain {URL_PLACEHOLDER}"
            )));
        }
        if !self.nav.shrink_threshold.is_finite() || self.nav.shrink_threshold < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "nav.shrink_threshold must be a non-negative number, got {}",
                self.nav.shrink_threshold
            )));
        }
        Ok(())
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_owned()).collect()
}
