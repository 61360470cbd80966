//! Per-page board configuration.
//!
//! Defaults match the stock page; a page can point the board at another
//! backend or locale with `data-api-base` / `data-locale` on `<body>`.

use wt_api_types::DEFAULT_RECENT_LIMIT;

pub const DEFAULT_API_BASE: &str = "/api";
pub const DEFAULT_LOCALE: &str = "ru-RU";
pub const DEFAULT_STATS_REFRESH_MS: u32 = 30_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardConfig {
    pub api_base: String,
    pub locale: String,
    pub recent_limit: usize,
    pub stats_refresh_ms: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_owned(),
            locale: DEFAULT_LOCALE.to_owned(),
            recent_limit: DEFAULT_RECENT_LIMIT,
            stats_refresh_ms: DEFAULT_STATS_REFRESH_MS,
        }
    }
}

impl BoardConfig {
    /// Apply page overrides; blank values keep the default.
    pub fn with_overrides(api_base: Option<String>, locale: Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(base) = non_blank(api_base) {
            config.api_base = base;
        }
        if let Some(locale) = non_blank(locale) {
            config.locale = locale;
        }
        config
    }

    pub fn from_document() -> Self {
        let body = gloo_utils::document().body();
        let attr = |name: &str| body.as_ref().and_then(|b| b.get_attribute(name));
        Self::with_overrides(attr("data-api-base"), attr("data-locale"))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = BoardConfig::default();
        assert_eq!(config.api_base, "/api");
        assert_eq!(config.locale, "ru-RU");
        assert_eq!(config.recent_limit, 20);
        assert_eq!(config.stats_refresh_ms, 30_000);
    }

    #[test]
    fn page_attributes_override_defaults() {
        let config = BoardConfig::with_overrides(
            Some("https://wishes.example.org/api".into()),
            Some(" en-GB ".into()),
        );
        assert_eq!(config.api_base, "https://wishes.example.org/api");
        assert_eq!(config.locale, "en-GB");
    }

    #[test]
    fn blank_attributes_are_ignored() {
        let config = BoardConfig::with_overrides(Some("   ".into()), None);
        assert_eq!(config, BoardConfig::default());
    }
}
