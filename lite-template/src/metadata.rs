//! Per-node side table consulted by the compiler.
//!
//! Metadata lives outside the node model, keyed by [`NodeId`], and is
//! created on first access.

use std::collections::BTreeMap;
use std::collections::HashMap;

use lite_dom::{Document, NodeId};

use crate::bindings::{Handler, ValueProvider};
use crate::component::LiteNode;
use crate::error::{Result, TemplateError};

/// Interpolation override of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Use the mode of the nearest ancestor (enabled at the root).
    #[default]
    Inherit,
    Enabled,
    Disabled,
}

impl Interpolation {
    pub fn resolve(self, inherited: bool) -> bool {
        match self {
            Interpolation::Inherit => inherited,
            Interpolation::Enabled => true,
            Interpolation::Disabled => false,
        }
    }
}

pub struct Listener<T> {
    pub handler: Handler<T>,
    /// `None` for a plain listener, otherwise expressions evaluated in the
    /// browser and forwarded to the handler.
    pub arguments: Option<Vec<String>>,
}

impl<T> Listener<T> {
    pub fn new(handler: Handler<T>) -> Self {
        Self {
            handler,
            arguments: None,
        }
    }

    pub fn with_arguments(handler: Handler<T>, arguments: Vec<String>) -> Self {
        Self {
            handler,
            arguments: Some(arguments),
        }
    }
}

impl<T> Clone for Listener<T> {
    fn clone(&self) -> Self {
        Self {
            handler: self.handler.clone(),
            arguments: self.arguments.clone(),
        }
    }
}

pub struct NodeMetadata<T> {
    pub interpolation: Interpolation,
    pub attributes: BTreeMap<String, ValueProvider<T>>,
    pub properties: BTreeMap<String, ValueProvider<T>>,
    listeners: BTreeMap<String, Listener<T>>,
}

impl<T> Default for NodeMetadata<T> {
    fn default() -> Self {
        Self {
            interpolation: Interpolation::Inherit,
            attributes: BTreeMap::new(),
            properties: BTreeMap::new(),
            listeners: BTreeMap::new(),
        }
    }
}

impl<T> NodeMetadata<T> {
    pub fn add_listener(&mut self, event_type: &str, listener: Listener<T>) -> Result<()> {
        if self.has_listener(event_type) {
            return Err(TemplateError::DuplicateListener {
                event_type: event_type.to_string(),
            });
        }
        self.listeners.insert(event_type.to_string(), listener);
        Ok(())
    }

    pub fn has_listener(&self, event_type: &str) -> bool {
        self.listeners.contains_key(event_type)
    }

    pub fn listeners(&self) -> &BTreeMap<String, Listener<T>> {
        &self.listeners
    }
}

pub struct MetadataStore<T> {
    nodes: HashMap<NodeId, NodeMetadata<T>>,
}

impl<T> Default for MetadataStore<T> {
    fn default() -> Self {
        Self {
            nodes: HashMap::new(),
        }
    }
}

impl<T> MetadataStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Metadata of `id`, if any was ever attached.
    pub fn get(&self, id: NodeId) -> Option<&NodeMetadata<T>> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut NodeMetadata<T> {
        self.nodes.entry(id).or_default()
    }

    pub fn interpolation(&self, id: NodeId) -> Interpolation {
        self.get(id).map(|m| m.interpolation).unwrap_or_default()
    }

    /// Fluent access to the bindings of one node.
    ///
    /// The node kind is not checked. The compiler reads no metadata for text
    /// nodes, so bindings attached to one are ignored.
    pub fn node<'a>(&'a mut self, document: &'a mut Document, id: NodeId) -> LiteNode<'a, T> {
        LiteNode::new(document, self.get_mut(id), id)
    }
}
