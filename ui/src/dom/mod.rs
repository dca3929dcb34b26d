//! Keeping document text in step with the active language.
//!
//! The host document is reached only through [`HostDocument`]; the browser
//! implementation lives in `crate::web`, an in-memory one in [`memory`].
//! Hosts report inserted subtrees to [`Synchronizer::translate_inserted`],
//! which walks those subtrees and nothing else.

pub mod memory;
pub mod notify;
pub mod sync;

pub use memory::{MemoryDocument, NodeId};
pub use notify::{LanguageChanged, LanguageNotifier};
pub use sync::{start, InsertionQueue, Phase, Synchronizer};

/// Where translated text goes on an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSlot {
    Placeholder,
    Alt,
    Content,
}

/// The closed set of element kinds the synchronizer writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRole {
    /// `input` / `textarea`: text becomes placeholder guidance.
    FormInput,
    /// `img` that already carries an `alt` attribute.
    ImageWithAlt,
    /// `option` inside a `select`.
    SelectOption,
    Generic,
}

impl ElementRole {
    pub fn classify(tag: &str, has_alt: bool) -> Self {
        match tag.to_ascii_uppercase().as_str() {
            "INPUT" | "TEXTAREA" => Self::FormInput,
            "IMG" if has_alt => Self::ImageWithAlt,
            "OPTION" => Self::SelectOption,
            _ => Self::Generic,
        }
    }

    pub fn slot(self) -> TextSlot {
        match self {
            Self::FormInput => TextSlot::Placeholder,
            Self::ImageWithAlt => TextSlot::Alt,
            Self::SelectOption | Self::Generic => TextSlot::Content,
        }
    }
}

/// The live document, as seen by the synchronizer.
pub trait HostDocument {
    type Element: Clone;

    /// Every connected element carrying `attribute`, in document order.
    fn query_tracked(&self, attribute: &str) -> Vec<Self::Element>;

    /// `root` itself if it carries `attribute`, then its tracked descendants.
    fn tracked_in_subtree(&self, root: &Self::Element, attribute: &str) -> Vec<Self::Element>;

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    fn role(&self, element: &Self::Element) -> ElementRole;

    /// What `slot` currently shows; `None` when the slot attribute is absent.
    fn read(&self, element: &Self::Element, slot: TextSlot) -> Option<String>;

    fn write(&mut self, element: &Self::Element, slot: TextSlot, text: &str);

    fn write_attribute(&mut self, element: &Self::Element, name: &str, value: &str);

    fn set_title(&mut self, title: &str);

    /// The root element's `lang` attribute.
    fn set_language(&mut self, code: &str);

    fn pathname(&self) -> String;
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("INPUT", false, ElementRole::FormInput, TextSlot::Placeholder)]
    #[case("textarea", false, ElementRole::FormInput, TextSlot::Placeholder)]
    #[case("IMG", true, ElementRole::ImageWithAlt, TextSlot::Alt)]
    #[case("img", false, ElementRole::Generic, TextSlot::Content)]
    #[case("OPTION", false, ElementRole::SelectOption, TextSlot::Content)]
    #[case("SPAN", true, ElementRole::Generic, TextSlot::Content)]
    fn roles_map_to_slots(
        #[case] tag: &str,
        #[case] has_alt: bool,
        #[case] role: ElementRole,
        #[case] slot: TextSlot,
    ) {
        assert_eq!(ElementRole::classify(tag, has_alt), role);
        assert_eq!(role.slot(), slot);
    }
}
