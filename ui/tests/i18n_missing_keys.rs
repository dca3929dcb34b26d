use std::collections::{BTreeSet, HashSet};

/// Translation completeness test.
/// Ensures every non‑fallback locale provides *at least* the keys present
/// in the fallback (`en`) table, and that no file defines a key twice
/// (JSON parsers keep the last duplicate silently).
///
/// If you add a new locale:
/// 1. Create `ui/i18n/locales/<code>.json`
/// 2. Copy all keys from `en.json`
/// 3. Register it below and run `cargo test -p playfluence-ui`.
#[test]
fn all_locales_have_all_fallback_keys() {
    const EN: &str = include_str!("../i18n/locales/en.json");
    const ZH: &str = include_str!("../i18n/locales/zh.json");
    const JA: &str = include_str!("../i18n/locales/ja.json");

    let fallback_keys = extract_keys(EN);
    assert!(!fallback_keys.is_empty(), "Fallback (en) contains no keys.");
    assert_no_dup_keys(EN, "en");

    let locales: &[(&str, &str)] = &[
        ("zh", ZH),
        ("ja", JA),
        // Add new locales here.
    ];

    let mut failures = Vec::new();
    for (locale, src) in locales {
        assert_no_dup_keys(src, locale);

        let keys = extract_keys(src);
        let missing: BTreeSet<_> = fallback_keys.difference(&keys).cloned().collect();
        if !missing.is_empty() {
            failures.push(format!(
                "Locale {locale} is missing {} key(s):\n  {}",
                missing.len(),
                missing.into_iter().collect::<Vec<_>>().join("\n  ")
            ));
        }
    }

    if !failures.is_empty() {
        panic!(
            "Translation completeness check failed:\n\n{}\n\nHint: copy the missing keys from en.json, then translate.",
            failures.join("\n\n")
        );
    }
}

#[test]
fn page_titles_cover_every_locale() {
    const TITLES: &str = include_str!("../i18n/page-titles.json");
    let titles: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(TITLES).expect("page-titles.json parses");

    for (page, per_lang) in &titles {
        for lang in ["en", "zh", "ja"] {
            let title = per_lang.get(lang).and_then(|v| v.as_str()).unwrap_or_default();
            assert!(!title.is_empty(), "{page} has no {lang} title");
        }
    }
}

/// Keys of a flat `{ "key": "text" }` object.
fn extract_keys(src: &str) -> HashSet<String> {
    let map: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(src).expect("locale file is a JSON object");
    map.into_iter()
        .inspect(|(key, value)| {
            assert!(
                value.as_str().is_some_and(|text| !text.is_empty()),
                "{key} must map to non-empty text"
            )
        })
        .map(|(key, _)| key)
        .collect()
}

/// Assert no duplicate key definitions in a single locale file (line based:
/// one `"key": "text",` pair per line).
fn assert_no_dup_keys(src: &str, locale: &str) {
    let mut seen = HashSet::new();
    let mut dups = BTreeSet::new();

    for line in src.lines() {
        let line = line.trim();
        let Some(rest) = line.strip_prefix('"') else {
            continue;
        };
        let Some(end) = rest.find("\":") else {
            continue;
        };
        let key = &rest[..end];
        if !seen.insert(key.to_string()) {
            dups.insert(format!("{key}  (line: \"{line}\")"));
        }
    }

    if !dups.is_empty() {
        panic!(
            "Duplicate key definitions in {locale}:\n  {}",
            dups.into_iter().collect::<Vec<_>>().join("\n  ")
        );
    }
}
