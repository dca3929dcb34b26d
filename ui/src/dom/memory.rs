//! A small arena-backed document for hosts without a browser DOM.
//!
//! Insertions under a connected parent are queued the way a mutation
//! observer would batch them; drain them with [`MemoryDocument::take_insertions`].

use std::collections::BTreeMap;

use super::{ElementRole, HostDocument, TextSlot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default)]
struct Node {
    tag: String,
    attributes: BTreeMap<String, String>,
    text: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    writes: usize,
}

#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
    body: NodeId,
    title: String,
    language: Option<String>,
    pathname: String,
    inserted: Vec<NodeId>,
}

impl MemoryDocument {
    pub fn new(pathname: &str) -> Self {
        let body = Node {
            tag: "BODY".into(),
            ..Node::default()
        };
        Self {
            nodes: vec![body],
            body: NodeId(0),
            title: String::new(),
            language: None,
            pathname: pathname.to_string(),
            inserted: Vec::new(),
        }
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// A detached element; attach it with [`append_child`](Self::append_child).
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.push(Node {
            tag: tag.to_ascii_uppercase(),
            ..Node::default()
        });
        NodeId(self.nodes.len() - 1)
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        self.nodes[id.0]
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    pub fn set_text(&mut self, id: NodeId, text: &str) {
        self.nodes[id.0].text = text.to_string();
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
        if self.is_connected(parent) {
            self.inserted.push(child);
        }
    }

    pub fn remove(&mut self, id: NodeId) {
        self.detach(id);
    }

    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == self.body {
                return true;
            }
            current = self.nodes[node.0].parent;
        }
        false
    }

    /// Subtree roots attached to the live tree since the last call.
    pub fn take_insertions(&mut self) -> Vec<NodeId> {
        std::mem::take(&mut self.inserted)
    }

    pub fn text(&self, id: NodeId) -> &str {
        &self.nodes[id.0].text
    }

    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes[id.0].attributes.get(name).map(String::as_str)
    }

    /// How many times the synchronizer wrote to this element.
    pub fn writes(&self, id: NodeId) -> usize {
        self.nodes[id.0].writes
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    pub fn set_pathname(&mut self, pathname: &str) {
        self.pathname = pathname.to_string();
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|child| *child != id);
        }
    }

    fn descendants(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[root.0].children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        out
    }
}

impl HostDocument for MemoryDocument {
    type Element = NodeId;

    fn query_tracked(&self, attribute: &str) -> Vec<NodeId> {
        self.descendants(self.body)
            .into_iter()
            .filter(|id| self.nodes[id.0].attributes.contains_key(attribute))
            .collect()
    }

    fn tracked_in_subtree(&self, root: &NodeId, attribute: &str) -> Vec<NodeId> {
        std::iter::once(*root)
            .chain(self.descendants(*root))
            .filter(|id| self.nodes[id.0].attributes.contains_key(attribute))
            .collect()
    }

    fn attribute(&self, element: &NodeId, name: &str) -> Option<String> {
        self.get_attribute(*element, name).map(str::to_string)
    }

    fn role(&self, element: &NodeId) -> ElementRole {
        let node = &self.nodes[element.0];
        ElementRole::classify(&node.tag, node.attributes.contains_key("alt"))
    }

    fn read(&self, element: &NodeId, slot: TextSlot) -> Option<String> {
        match slot {
            TextSlot::Placeholder => self.attribute(element, "placeholder"),
            TextSlot::Alt => self.attribute(element, "alt"),
            TextSlot::Content => Some(self.text(*element).to_string()),
        }
    }

    fn write(&mut self, element: &NodeId, slot: TextSlot, text: &str) {
        match slot {
            TextSlot::Placeholder => self.set_attribute(*element, "placeholder", text),
            TextSlot::Alt => self.set_attribute(*element, "alt", text),
            TextSlot::Content => {
                // Like `textContent`, replaces any child elements.
                for child in std::mem::take(&mut self.nodes[element.0].children) {
                    self.nodes[child.0].parent = None;
                }
                self.set_text(*element, text);
            }
        }
        self.nodes[element.0].writes += 1;
    }

    fn write_attribute(&mut self, element: &NodeId, name: &str, value: &str) {
        self.set_attribute(*element, name, value);
    }

    fn set_title(&mut self, title: &str) {
        self.title = title.to_string();
    }

    fn set_language(&mut self, code: &str) {
        self.language = Some(code.to_string());
    }

    fn pathname(&self) -> String {
        self.pathname.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_connected_insertions_are_queued() {
        let mut doc = MemoryDocument::new("/");
        let section = doc.create_element("section");
        let heading = doc.create_element("h2");
        doc.append_child(section, heading);
        assert!(doc.take_insertions().is_empty());

        doc.append_child(doc.body(), section);
        assert_eq!(doc.take_insertions(), vec![section]);
        assert!(doc.is_connected(heading));
    }

    #[test]
    fn removed_nodes_drop_out_of_queries() {
        let mut doc = MemoryDocument::new("/");
        let a = doc.create_element("p");
        doc.set_attribute(a, "data-i18n", "nav_home");
        doc.append_child(doc.body(), a);
        assert_eq!(doc.query_tracked("data-i18n"), vec![a]);

        doc.remove(a);
        assert!(doc.query_tracked("data-i18n").is_empty());
        assert!(!doc.is_connected(a));
    }

    #[test]
    fn subtree_query_includes_root_first() {
        let mut doc = MemoryDocument::new("/");
        let list = doc.create_element("ul");
        let item = doc.create_element("li");
        doc.set_attribute(list, "data-i18n", "a");
        doc.set_attribute(item, "data-i18n", "b");
        doc.append_child(list, item);
        assert_eq!(doc.tracked_in_subtree(&list, "data-i18n"), vec![list, item]);
    }
}
