use crate::{NodeId, PropertyValue, VNode, upsert};

#[derive(Debug, Clone, PartialEq)]
struct ElementData {
    tag: String,
    attrs: Vec<(String, String)>,
    properties: Vec<(String, PropertyValue)>,
    children: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq)]
enum NodeData {
    Element(ElementData),
    Text(String),
}

/// Arena owning every node of one or more trees.
///
/// Mutations addressed to a node of the wrong kind (or to an id from another
/// document) are ignored; queries return `None` or nothing.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<NodeData>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn exists(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    pub fn create_element(&mut self, tag: impl Into<String>) -> NodeId {
        self.push(NodeData::Element(ElementData {
            tag: tag.into(),
            attrs: Vec::new(),
            properties: Vec::new(),
            children: Vec::new(),
        }))
    }

    pub fn create_text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeData::Text(text.into()))
    }

    fn push(&mut self, data: NodeData) -> NodeId {
        self.nodes.push(data);
        NodeId(self.nodes.len() - 1)
    }

    /// Materialize a `VNode` tree, returning the id of its root.
    pub fn build(&mut self, vnode: &VNode) -> NodeId {
        match vnode {
            VNode::Text(t) => self.create_text(t.clone()),
            VNode::Element {
                tag,
                props,
                children,
            } => {
                let id = self.create_element(tag.clone());
                for (k, v) in &props.attrs {
                    self.set_attribute(id, k.clone(), v.clone());
                }
                for (k, v) in &props.properties {
                    self.set_property(id, k.clone(), v.clone());
                }
                for c in children {
                    let child = self.build(c);
                    self.append_child(id, child);
                }
                id
            }
        }
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(e) = self.element_mut(parent) {
            e.children.push(child);
        }
    }

    fn element(&self, id: NodeId) -> Option<&ElementData> {
        match self.nodes.get(id.0)? {
            NodeData::Element(e) => Some(e),
            NodeData::Text(_) => None,
        }
    }

    fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match self.nodes.get_mut(id.0)? {
            NodeData::Element(e) => Some(e),
            NodeData::Text(_) => None,
        }
    }

    pub fn is_text(&self, id: NodeId) -> bool {
        matches!(self.nodes.get(id.0), Some(NodeData::Text(_)))
    }

    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.nodes.get(id.0)? {
            NodeData::Text(t) => Some(t),
            NodeData::Element(_) => None,
        }
    }

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(|e| e.tag.as_str())
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.element(id).map(|e| e.children.as_slice()).unwrap_or(&[])
    }

    pub fn attribute_names(&self, id: NodeId) -> Vec<String> {
        self.element(id)
            .map(|e| e.attrs.iter().map(|(k, _)| k.clone()).collect())
            .unwrap_or_default()
    }

    pub fn get_attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?
            .attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attribute(&mut self, id: NodeId, name: impl Into<String>, value: impl Into<String>) {
        if let Some(e) = self.element_mut(id) {
            upsert(&mut e.attrs, name.into(), value.into());
        }
    }

    /// `true` sets an empty-valued attribute, `false` removes it.
    pub fn set_bool_attribute(&mut self, id: NodeId, name: impl Into<String>, value: bool) {
        let name = name.into();
        if value {
            self.set_attribute(id, name, "");
        } else {
            self.remove_attribute(id, &name);
        }
    }

    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Option<String> {
        let e = self.element_mut(id)?;
        let pos = e.attrs.iter().position(|(k, _)| k == name)?;
        Some(e.attrs.remove(pos).1)
    }

    pub fn property_names(&self, id: NodeId) -> Vec<String> {
        self.element(id)
            .map(|e| e.properties.iter().map(|(k, _)| k.clone()).collect())
            .unwrap_or_default()
    }

    pub fn get_property_raw(&self, id: NodeId, name: &str) -> Option<&PropertyValue> {
        self.element(id)?
            .properties
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }

    pub fn set_property(
        &mut self,
        id: NodeId,
        name: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) {
        if let Some(e) = self.element_mut(id) {
            upsert(&mut e.properties, name.into(), value.into());
        }
    }

    pub fn remove_property(&mut self, id: NodeId, name: &str) -> Option<PropertyValue> {
        let e = self.element_mut(id)?;
        let pos = e.properties.iter().position(|(k, _)| k == name)?;
        Some(e.properties.remove(pos).1)
    }

    /// Whether `target` is `ancestor` itself or one of its descendants.
    pub fn contains(&self, ancestor: NodeId, target: NodeId) -> bool {
        if ancestor == target {
            return self.exists(target);
        }
        self.children(ancestor)
            .iter()
            .any(|&child| self.contains(child, target))
    }
}
