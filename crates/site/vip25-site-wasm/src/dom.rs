//! [`RevealDocument`] over the live DOM.

use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, NodeList};

use vip25_reveal_core::{RevealDocument, StyleBatch};

pub struct DomDocument {
    document: Document,
}

impl DomDocument {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        match self.document.query_selector_all(selector) {
            Ok(list) => elements(&list),
            Err(e) => {
                warn!("query '{selector}' failed: {e:?}");
                Vec::new()
            }
        }
    }
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Set inline style properties on an HTML element; other elements are skipped.
pub(crate) fn set_styles<'a>(element: &Element, writes: impl IntoIterator<Item = (&'a str, &'a str)>) {
    let Some(html) = element.dyn_ref::<HtmlElement>() else {
        return;
    };
    let style = html.style();
    for (name, value) in writes {
        if let Err(e) = style.set_property(name, value) {
            warn!("set {name}: {e:?}");
        }
    }
}

impl RevealDocument for DomDocument {
    type Node = Element;

    fn elements_with_class(&self, class: &str) -> Vec<Element> {
        self.query_all(&format!(".{class}"))
    }

    fn elements_with_attribute(&self, name: &str) -> Vec<Element> {
        self.query_all(&format!("[{name}]"))
    }

    fn children(&self, node: &Element) -> Vec<Element> {
        let children = node.children();
        (0..children.length())
            .filter_map(|i| children.item(i))
            .collect()
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        if let Err(e) = node.set_attribute(name, value) {
            warn!("set attribute {name}: {e:?}");
        }
    }

    fn apply_styles(&self, node: &Element, batch: &StyleBatch) {
        set_styles(node, batch.iter().map(|(p, v)| (p.css_name(), v)));
    }
}
