//! Property-based invariant tests for the string catalog.
//!
//! 1. Interpolation with no placeholders is identity
//! 2. Interpolation is not recursive
//! 3. Missing args leave placeholder tokens intact
//! 4. Missing keys always return None
//! 5. Lookup never panics on arbitrary locale tags
//! 6. Coverage percentages are bounded and consistent

use bcap_i18n::catalog::{LocaleStrings, StringCatalog};
use proptest::prelude::*;

fn single(key: &str, value: &str) -> StringCatalog {
    let mut catalog = StringCatalog::new();
    let mut en = LocaleStrings::new();
    en.insert(key, value);
    catalog.add_locale("en", en);
    catalog
}

proptest! {
    #[test]
    fn interpolation_no_placeholders_identity(text in "[a-zA-Z0-9 .,!?%]*") {
        let catalog = single("test", &text);
        let result = catalog.format("en", "test", &[("name", "x")]);
        prop_assert_eq!(result.as_deref(), Some(text.as_str()));
    }

    #[test]
    fn missing_args_preserve_tokens(name in "[a-z]{1,10}") {
        let template = format!("Value: {{{name}}}");
        let catalog = single("test", &template);
        prop_assert_eq!(catalog.format("en", "test", &[]), Some(template.clone()));
    }

    #[test]
    fn missing_key_returns_none(key in "[a-z]{1,20}") {
        let catalog = StringCatalog::new();
        prop_assert_eq!(catalog.get("en", &key), None);
        prop_assert_eq!(catalog.format("en", &key, &[]), None);
    }

    #[test]
    fn lookup_never_panics(locale in ".*", key in ".*") {
        let mut catalog = single("k", "v");
        catalog.set_fallback_chain(vec!["en".into()]);
        let _ = catalog.get(&locale, &key);
        prop_assert_eq!(catalog.get(&locale, "k"), Some("v"));
    }

    #[test]
    fn coverage_percent_bounded(n_keys in 0usize..=10, n_locales in 1usize..=3) {
        let mut catalog = StringCatalog::new();
        for locale_idx in 0..n_locales {
            let mut strings = LocaleStrings::new();
            for k in 0..n_keys {
                if k % (locale_idx + 1) == 0 {
                    strings.insert(format!("key_{k}"), format!("val_{k}"));
                }
            }
            catalog.add_locale(&format!("l{locale_idx}"), strings);
        }

        let report = catalog.coverage_report();
        for lc in &report.locales {
            prop_assert!((0.0..=100.0).contains(&lc.coverage_percent));
            prop_assert_eq!(lc.present + lc.missing.len(), report.total_keys);
        }
    }
}

#[test]
fn interpolation_not_recursive() {
    let catalog = single("test", "Hello {name}!");
    assert_eq!(
        catalog.format("en", "test", &[("name", "{name}")]),
        Some("Hello {name}!".into())
    );
    assert_eq!(
        catalog.format("en", "test", &[("name", "{other}")]),
        Some("Hello {other}!".into())
    );
}
