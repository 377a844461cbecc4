#![forbid(unsafe_code)]

//! String catalog with locale fallback and interpolation.
//!
//! Lookup for `ko-KR` tries `ko-KR`, then the bare language `ko`, then
//! every locale in the fallback chain in order. The first hit wins.

use std::collections::{BTreeMap, BTreeSet};

/// All strings for one locale, keyed by dotted identifiers.
#[derive(Debug, Clone, Default)]
pub struct LocaleStrings {
    strings: BTreeMap<String, String>,
}

impl LocaleStrings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.strings.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.strings.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LocaleStrings {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut strings = Self::new();
        for (key, value) in iter {
            strings.insert(key, value);
        }
        strings
    }
}

#[derive(Debug, Clone, Default)]
pub struct StringCatalog {
    locales: BTreeMap<String, LocaleStrings>,
    fallback_chain: Vec<String>,
}

impl StringCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the strings for `locale`.
    pub fn add_locale(&mut self, locale: &str, strings: LocaleStrings) {
        self.locales.insert(locale.to_string(), strings);
    }

    /// Locales consulted, in order, when the requested one lacks a key.
    pub fn set_fallback_chain(&mut self, chain: Vec<String>) {
        self.fallback_chain = chain;
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.locales.keys().map(String::as_str)
    }

    pub fn has_locale(&self, locale: &str) -> bool {
        self.locales.contains_key(locale)
    }

    /// Look up `key`, walking the fallback order described in the module docs.
    pub fn get(&self, locale: &str, key: &str) -> Option<&str> {
        self.lookup_order(locale)
            .into_iter()
            .filter_map(|tag| self.locales.get(tag))
            .find_map(|strings| strings.get(key))
    }

    /// Look up `key` and substitute `{name}` placeholders from `args`.
    ///
    /// Substitution is a single pass: replacement values are never
    /// re-expanded, and placeholders without a matching arg are left as is.
    pub fn format(&self, locale: &str, key: &str, args: &[(&str, &str)]) -> Option<String> {
        self.get(locale, key).map(|template| interpolate(template, args))
    }

    fn lookup_order<'a>(&'a self, locale: &'a str) -> Vec<&'a str> {
        let mut order = vec![locale];
        if let Some((language, _)) = locale.split_once(['-', '_']) {
            order.push(language);
        }
        for fallback in &self.fallback_chain {
            if !order.contains(&fallback.as_str()) {
                order.push(fallback.as_str());
            }
        }
        order
    }

    /// Per-locale key coverage against the union of all keys.
    pub fn coverage_report(&self) -> CoverageReport {
        let all_keys: BTreeSet<&str> = self.locales.values().flat_map(LocaleStrings::keys).collect();
        let total_keys = all_keys.len();
        let locales = self
            .locales
            .iter()
            .map(|(locale, strings)| {
                let missing: Vec<String> = all_keys
                    .iter()
                    .filter(|key| strings.get(key).is_none())
                    .map(|key| key.to_string())
                    .collect();
                let present = total_keys - missing.len();
                let coverage_percent = if total_keys == 0 {
                    100.0
                } else {
                    present as f32 * 100.0 / total_keys as f32
                };
                LocaleCoverage {
                    locale: locale.clone(),
                    present,
                    missing,
                    coverage_percent,
                }
            })
            .collect();
        CoverageReport {
            total_keys,
            locales,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoverageReport {
    pub total_keys: usize,
    pub locales: Vec<LocaleCoverage>,
}

impl CoverageReport {
    pub fn is_complete(&self) -> bool {
        self.locales.iter().all(|lc| lc.missing.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LocaleCoverage {
    pub locale: String,
    pub present: usize,
    pub missing: Vec<String>,
    pub coverage_percent: f32,
}

fn interpolate(template: &str, args: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        let name = &after[..close];
        match args.iter().find(|(arg, _)| *arg == name) {
            Some((_, value)) => out.push_str(value),
            None => {
                out.push('{');
                out.push_str(name);
                out.push('}');
            }
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> StringCatalog {
        let mut catalog = StringCatalog::new();
        catalog.add_locale(
            "en",
            [
                ("button.predict", "Predict"),
                ("model.not_found", "{path} could not be found!"),
                ("footer", "Battery capacity predictor"),
            ]
            .into_iter()
            .collect(),
        );
        catalog.add_locale(
            "ko",
            [("button.predict", "예측하기"), ("model.not_found", "{path} 파일을 찾을 수 없습니다!")]
                .into_iter()
                .collect(),
        );
        catalog.set_fallback_chain(vec!["en".into()]);
        catalog
    }

    #[test]
    fn exact_locale_wins() {
        assert_eq!(catalog().get("ko", "button.predict"), Some("예측하기"));
    }

    #[test]
    fn region_falls_back_to_language() {
        assert_eq!(catalog().get("ko-KR", "button.predict"), Some("예측하기"));
        assert_eq!(catalog().get("ko_KR", "button.predict"), Some("예측하기"));
    }

    #[test]
    fn missing_key_falls_back_to_chain() {
        assert_eq!(catalog().get("ko", "footer"), Some("Battery capacity predictor"));
        assert_eq!(catalog().get("fr", "footer"), Some("Battery capacity predictor"));
        assert_eq!(catalog().get("ko", "nope"), None);
    }

    #[test]
    fn format_interpolates() {
        let text = catalog().format("en", "model.not_found", &[("path", "battery_model.json")]);
        assert_eq!(text.as_deref(), Some("battery_model.json could not be found!"));
    }

    #[test]
    fn interpolation_keeps_unknown_and_unclosed() {
        assert_eq!(interpolate("{a} {b}", &[("a", "1")]), "1 {b}");
        assert_eq!(interpolate("open { brace", &[]), "open { brace");
        assert_eq!(interpolate("{}", &[("", "x")]), "x");
    }

    #[test]
    fn coverage_reports_missing_keys() {
        let report = catalog().coverage_report();
        assert_eq!(report.total_keys, 3);
        assert!(!report.is_complete());
        let ko = report.locales.iter().find(|lc| lc.locale == "ko").expect("ko");
        assert_eq!(ko.missing, vec!["footer".to_string()]);
        assert_eq!(ko.present, 2);
    }
}
