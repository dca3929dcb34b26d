use wasm_bindgen::JsCast;
use web_sys::{Document, Element, NodeList};

use crate::dom::{ElementRole, HostDocument, TextSlot};
use crate::error::I18nError;

/// The page's live `document`.
#[derive(Debug, Clone)]
pub struct WebDocument {
    document: Document,
}

impl WebDocument {
    pub fn current() -> Result<Self, I18nError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or(I18nError::NoWindow)?;
        Ok(Self { document })
    }

    pub fn inner(&self) -> &Document {
        &self.document
    }
}

/// Element nodes of a node list; text and comment nodes are skipped.
pub(super) fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

impl HostDocument for WebDocument {
    type Element = Element;

    fn query_tracked(&self, attribute: &str) -> Vec<Element> {
        self.document
            .query_selector_all(&format!("[{attribute}]"))
            .map(|list| elements(&list))
            .unwrap_or_default()
    }

    fn tracked_in_subtree(&self, root: &Element, attribute: &str) -> Vec<Element> {
        let mut found = Vec::new();
        if root.has_attribute(attribute) {
            found.push(root.clone());
        }
        if let Ok(list) = root.query_selector_all(&format!("[{attribute}]")) {
            found.extend(elements(&list));
        }
        found
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn role(&self, element: &Element) -> ElementRole {
        ElementRole::classify(&element.tag_name(), element.has_attribute("alt"))
    }

    fn read(&self, element: &Element, slot: TextSlot) -> Option<String> {
        match slot {
            TextSlot::Placeholder => element.get_attribute("placeholder"),
            TextSlot::Alt => element.get_attribute("alt"),
            TextSlot::Content => element.text_content(),
        }
    }

    fn write(&mut self, element: &Element, slot: TextSlot, text: &str) {
        let result = match slot {
            TextSlot::Placeholder => element.set_attribute("placeholder", text),
            TextSlot::Alt => element.set_attribute("alt", text),
            TextSlot::Content => {
                element.set_text_content(Some(text));
                Ok(())
            }
        };
        if let Err(err) = result {
            tracing::debug!(?err, ?slot, "Could not write translated text");
        }
    }

    fn write_attribute(&mut self, element: &Element, name: &str, value: &str) {
        if let Err(err) = element.set_attribute(name, value) {
            tracing::debug!(?err, name, "Could not set attribute");
        }
    }

    fn set_title(&mut self, title: &str) {
        self.document.set_title(title);
    }

    fn set_language(&mut self, code: &str) {
        if let Some(root) = self.document.document_element() {
            if let Err(err) = root.set_attribute("lang", code) {
                tracing::debug!(?err, "Could not set document language");
            }
        }
    }

    fn pathname(&self) -> String {
        self.document
            .location()
            .and_then(|location| location.pathname().ok())
            .unwrap_or_default()
    }
}
