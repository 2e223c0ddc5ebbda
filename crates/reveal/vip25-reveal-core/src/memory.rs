//! In-memory document for headless hosts and tests.
//!
//! Nodes live in document order in a flat list; layout boxes are given in
//! page coordinates alongside a scrollable viewport, so the document can feed
//! an [`crate::IntersectionRegistry`] directly.

use std::cell::{Cell, RefCell};

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::document::RevealDocument;
use crate::geometry::Rect;
use crate::style::{StyleBatch, StyleProperty};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Id for a position in document order, saturating at `u32::MAX`.
    fn at(index: usize) -> Self {
        NodeId(u32::try_from(index).unwrap_or(u32::MAX))
    }
}

#[derive(Debug)]
struct MemoryNode {
    key: String,
    classes: Vec<String>,
    attributes: RefCell<HashMap<String, String>>,
    children: Vec<NodeId>,
    rect: Cell<Option<Rect>>,
    style: RefCell<HashMap<StyleProperty, String>>,
}

#[derive(Debug, Deserialize)]
#[serde(try_from = "PageSpec")]
pub struct MemoryDocument {
    nodes: Vec<MemoryNode>,
    viewport: Cell<Rect>,
    style_log: RefCell<Vec<(NodeId, StyleBatch)>>,
}

/// Serialized page shape: nodes in document order, children referenced by key.
#[derive(Debug, Deserialize)]
struct PageSpec {
    #[serde(default = "default_viewport")]
    viewport: Rect,
    nodes: Vec<NodeSpec>,
}

#[derive(Debug, Deserialize)]
struct NodeSpec {
    id: String,
    #[serde(default)]
    classes: Vec<String>,
    #[serde(default)]
    attributes: HashMap<String, String>,
    #[serde(default)]
    children: Vec<String>,
    #[serde(default)]
    rect: Option<Rect>,
}

fn default_viewport() -> Rect {
    Rect::new(0.0, 0.0, 1280.0, 800.0)
}

impl TryFrom<PageSpec> for MemoryDocument {
    type Error = String;

    fn try_from(spec: PageSpec) -> Result<Self, Self::Error> {
        let mut doc = MemoryDocument::with_viewport(spec.viewport);
        let mut pending = Vec::with_capacity(spec.nodes.len());
        for node in spec.nodes {
            let classes: Vec<&str> = node.classes.iter().map(String::as_str).collect();
            let attrs: Vec<(&str, &str)> = node
                .attributes
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            if doc.node(&node.id).is_some() {
                return Err(format!("duplicate node id '{}'", node.id));
            }
            let id = doc.add_node(&node.id, &classes, &attrs);
            if let Some(rect) = node.rect {
                doc.set_rect(id, rect);
            }
            pending.push((id, node.children));
        }
        for (parent, children) in pending {
            for key in children {
                let child = doc
                    .node(&key)
                    .ok_or_else(|| format!("unknown child '{key}'"))?;
                doc.append_child(parent, child);
            }
        }
        Ok(doc)
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::with_viewport(default_viewport())
    }
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_viewport(viewport: Rect) -> Self {
        Self {
            nodes: Vec::new(),
            viewport: Cell::new(viewport),
            style_log: RefCell::new(Vec::new()),
        }
    }

    /// Append a node at the end of document order.
    pub fn add_node(&mut self, key: &str, classes: &[&str], attributes: &[(&str, &str)]) -> NodeId {
        let id = NodeId::at(self.nodes.len());
        self.nodes.push(MemoryNode {
            key: key.to_string(),
            classes: classes.iter().map(|c| c.to_string()).collect(),
            attributes: RefCell::new(
                attributes
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
            ),
            children: Vec::new(),
            rect: Cell::new(None),
            style: RefCell::new(HashMap::new()),
        });
        id
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(node) = self.nodes.get_mut(parent.0 as usize) {
            node.children.push(child);
        }
    }

    pub fn node(&self, key: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.key == key)
            .map(NodeId::at)
    }

    pub fn key(&self, id: NodeId) -> Option<&str> {
        self.get(id).map(|n| n.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn style(&self, id: NodeId, property: StyleProperty) -> Option<String> {
        self.get(id)?.style.borrow().get(&property).cloned()
    }

    /// Snapshot of the node's inline style.
    pub fn styles(&self, id: NodeId) -> HashMap<StyleProperty, String> {
        self.get(id)
            .map(|n| n.style.borrow().clone())
            .unwrap_or_default()
    }

    /// Every batch applied so far, in application order.
    pub fn style_log(&self) -> Vec<(NodeId, StyleBatch)> {
        self.style_log.borrow().clone()
    }

    pub fn clear_style_log(&self) {
        self.style_log.borrow_mut().clear();
    }

    pub fn set_rect(&self, id: NodeId, rect: Rect) {
        if let Some(node) = self.get(id) {
            node.rect.set(Some(rect));
        }
    }

    /// Layout box in page coordinates.
    pub fn rect(&self, id: NodeId) -> Option<Rect> {
        self.get(id)?.rect.get()
    }

    pub fn viewport(&self) -> Rect {
        self.viewport.get()
    }

    /// Move the viewport's top edge to page offset `y`.
    pub fn scroll_to(&self, y: f64) {
        let mut viewport = self.viewport.get();
        viewport.y = y;
        self.viewport.set(viewport);
    }

    fn get(&self, id: NodeId) -> Option<&MemoryNode> {
        self.nodes.get(id.0 as usize)
    }

    fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId::at)
    }
}

impl RevealDocument for MemoryDocument {
    type Node = NodeId;

    fn elements_with_class(&self, class: &str) -> Vec<NodeId> {
        self.ids()
            .filter(|id| {
                self.get(*id)
                    .map(|n| n.classes.iter().any(|c| c == class))
                    .unwrap_or(false)
            })
            .collect()
    }

    fn elements_with_attribute(&self, name: &str) -> Vec<NodeId> {
        self.ids()
            .filter(|id| {
                self.get(*id)
                    .map(|n| n.attributes.borrow().contains_key(name))
                    .unwrap_or(false)
            })
            .collect()
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        self.get(*node)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.get(*node)?.attributes.borrow().get(name).cloned()
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        if let Some(n) = self.get(*node) {
            n.attributes
                .borrow_mut()
                .insert(name.to_string(), value.to_string());
        }
    }

    fn apply_styles(&self, node: &NodeId, batch: &StyleBatch) {
        let Some(n) = self.get(*node) else {
            return;
        };
        let mut style = n.style.borrow_mut();
        for (property, value) in batch.iter() {
            if value.is_empty() {
                style.remove(&property);
            } else {
                style.insert(property, value.to_string());
            }
        }
        self.style_log.borrow_mut().push((*node, batch.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_ids_saturate() {
        assert_eq!(NodeId::at(7), NodeId(7));
        assert_eq!(NodeId::at(u32::MAX as usize), NodeId(u32::MAX));
        assert_eq!(NodeId::at(usize::MAX), NodeId(u32::MAX));
    }

    #[test]
    fn builds_from_json() {
        let doc: MemoryDocument = serde_json::from_str(
            r#"{
                "viewport": { "x": 0, "y": 0, "width": 800, "height": 600 },
                "nodes": [
                    { "id": "list", "attributes": { "data-animate-children": "fade-up" }, "children": ["a", "b"] },
                    { "id": "a", "classes": ["card"] },
                    { "id": "b", "classes": ["card"], "rect": { "x": 0, "y": 10, "width": 5, "height": 5 } }
                ]
            }"#,
        )
        .unwrap();
        let list = doc.node("list").unwrap();
        assert_eq!(doc.children(&list), vec![NodeId(1), NodeId(2)]);
        assert_eq!(doc.elements_with_class("card").len(), 2);
        assert_eq!(doc.elements_with_attribute("data-animate-children"), vec![list]);
        assert_eq!(doc.rect(NodeId(2)), Some(Rect::new(0.0, 10.0, 5.0, 5.0)));
        assert_eq!(doc.viewport().width, 800.0);
    }

    #[test]
    fn rejects_unknown_children() {
        let err = serde_json::from_str::<MemoryDocument>(
            r#"{ "nodes": [ { "id": "a", "children": ["ghost"] } ] }"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("unknown child 'ghost'"));
    }

    #[test]
    fn empty_style_value_clears_property() {
        let mut doc = MemoryDocument::new();
        let id = doc.add_node("x", &[], &[]);
        let mut batch = StyleBatch::new();
        batch.set(StyleProperty::Filter, "blur(8px)");
        doc.apply_styles(&id, &batch);
        assert_eq!(doc.style(id, StyleProperty::Filter).as_deref(), Some("blur(8px)"));

        let mut batch = StyleBatch::new();
        batch.set(StyleProperty::Filter, "");
        doc.apply_styles(&id, &batch);
        assert_eq!(doc.style(id, StyleProperty::Filter), None);
        assert_eq!(doc.style_log().len(), 2);
    }
}
