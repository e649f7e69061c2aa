use lite_dom::{Document, NodeId, PropertyValue};
use serde_json::Value;

use crate::bindings::{ValueProvider, handler};
use crate::error::Result;
use crate::metadata::{Interpolation, Listener, NodeMetadata};

/// Template bindings of a single node.
///
/// A literal value and a dynamic binding of the same name exclude each
/// other: setting one drops the other.
pub struct LiteNode<'a, T> {
    document: &'a mut Document,
    meta: &'a mut NodeMetadata<T>,
    id: NodeId,
}

impl<'a, T> LiteNode<'a, T> {
    pub(crate) fn new(document: &'a mut Document, meta: &'a mut NodeMetadata<T>, id: NodeId) -> Self {
        Self { document, meta, id }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }
}

impl<T: 'static> LiteNode<'_, T> {
    /// Treat `${...}` in this subtree as literal content.
    pub fn disable_interpolation(&mut self) -> &mut Self {
        self.meta.interpolation = Interpolation::Disabled;
        self
    }

    pub fn enable_interpolation(&mut self) -> &mut Self {
        self.meta.interpolation = Interpolation::Enabled;
        self
    }

    pub fn with_attribute(&mut self, name: &str, value: &str) -> &mut Self {
        self.document.set_attribute(self.id, name, value);
        self.meta.attributes.remove(name);
        self
    }

    pub fn with_bool_attribute(&mut self, name: &str, value: bool) -> &mut Self {
        self.document.set_bool_attribute(self.id, name, value);
        self.meta.attributes.remove(name);
        self
    }

    /// Bind an attribute to a value computed per item.
    pub fn with_attribute_binding(&mut self, name: &str, provider: ValueProvider<T>) -> &mut Self {
        self.meta.attributes.insert(name.to_string(), provider);
        self.document.remove_attribute(self.id, name);
        self
    }

    pub fn with_property(&mut self, name: &str, value: impl Into<PropertyValue>) -> &mut Self {
        self.document.set_property(self.id, name, value);
        self.meta.properties.remove(name);
        self
    }

    /// Bind an element property to a value computed per item.
    pub fn with_property_binding(&mut self, name: &str, provider: ValueProvider<T>) -> &mut Self {
        self.meta.properties.insert(name.to_string(), provider);
        self.document.remove_property(self.id, name);
        self
    }

    /// Listen for `event_type`, calling `f` with the item.
    pub fn with_listener<F>(&mut self, event_type: &str, f: F) -> Result<&mut Self>
    where
        F: Fn(&T) + 'static,
    {
        let listener = Listener::new(handler(move |item: &T, _: &[Value]| f(item)));
        self.meta.add_listener(event_type, listener)?;
        Ok(self)
    }

    /// Listen for `event_type`; each of `arguments` is evaluated in the
    /// browser and its value handed to `f`.
    pub fn with_listener_args<F, S>(&mut self, event_type: &str, f: F, arguments: &[S]) -> Result<&mut Self>
    where
        F: Fn(&T, &[Value]) + 'static,
        S: AsRef<str>,
    {
        let arguments = arguments.iter().map(|a| a.as_ref().to_string()).collect();
        let listener = Listener::with_arguments(handler(f), arguments);
        self.meta.add_listener(event_type, listener)?;
        Ok(self)
    }
}
