use dioxus::prelude::*;

use crate::config::LanguageOption;

/// Button row for choosing the page language.
///
/// Each button carries `data-lang`; the one matching `active` also gets the
/// `active` class. Clicking a button hands its code to `on_select`; the
/// caller performs the switch and feeds the new code back as `active`.
#[component]
pub fn LanguageSwitcher(
    languages: Vec<LanguageOption>,
    active: String,
    on_select: EventHandler<String>,
) -> Element {
    rsx! {
        div { class: "language-switcher",
            { languages.iter().map(|option| {
                let code = option.code.clone();
                let pressed = code == active;
                rsx! {
                    button {
                        key: "{option.code}",
                        r#type: "button",
                        class: button_class(&option.code, &active),
                        "data-lang": "{option.code}",
                        aria_pressed: "{pressed}",
                        onclick: move |_| on_select.call(code.clone()),
                        "{option.label}"
                    }
                }
            })}
        }
    }
}

pub fn button_class(code: &str, active: &str) -> &'static str {
    if code == active {
        "lang-btn active"
    } else {
        "lang-btn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_active_code_is_marked() {
        assert_eq!(button_class("zh", "zh"), "lang-btn active");
        assert_eq!(button_class("en", "zh"), "lang-btn");
        assert_eq!(button_class("fr", "zh"), "lang-btn");
    }
}
