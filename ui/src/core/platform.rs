//! Platform detection and locale signals.

use unic_langid::LanguageIdentifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Web,
    Native,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_arch = "wasm32") {
            Self::Web
        } else {
            Self::Native
        }
    }
}

/// The user's most preferred locale tag as reported by the host
/// (`navigator.languages` in the browser, the OS locale list natively).
pub fn locale_hint() -> Option<String> {
    requested_languages()
        .into_iter()
        .next()
        .map(|lang| lang.to_string())
}

/// Two-letter language subtag of a locale tag (`"zh-CN"` → `"zh"`).
pub fn primary_language(tag: &str) -> Option<String> {
    let id: LanguageIdentifier = tag.parse().ok()?;
    let language = id.language.as_str();
    (language != "und").then(|| language.to_ascii_lowercase())
}

#[cfg(target_arch = "wasm32")]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::WebLanguageRequester::requested_languages()
}

#[cfg(not(target_arch = "wasm32"))]
fn requested_languages() -> Vec<LanguageIdentifier> {
    i18n_embed::DesktopLanguageRequester::requested_languages()
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("zh-CN", Some("zh"))]
    #[case("zh-Hant-TW", Some("zh"))]
    #[case("ja", Some("ja"))]
    #[case("EN-us", Some("en"))]
    #[case("und", None)]
    #[case("not a tag", None)]
    fn primary_language_subtag(#[case] tag: &str, #[case] expected: Option<&str>) {
        assert_eq!(primary_language(tag).as_deref(), expected);
    }

    #[test]
    fn native_build_reports_native() {
        if cfg!(not(target_arch = "wasm32")) {
            assert_eq!(Platform::current(), Platform::Native);
        }
    }
}
