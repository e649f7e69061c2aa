//! Listeners synthesized for interactive controls.

use std::rc::Rc;

use lite_dom::{Document, NodeId};
use serde_json::Value;

use crate::bindings::handler;
use crate::metadata::Listener;

/// Decides which elements receive an automatic listener for their primary
/// activation event. A listener registered by the caller for the same event
/// type always wins.
pub trait ActivationPolicy<T> {
    fn event_type(&self) -> &str;
    fn applies_to(&self, document: &Document, node: NodeId) -> bool;
    fn listener(&self, node: NodeId) -> Listener<T>;
}

/// Activation listener for every element with a given tag.
pub struct TagActivation<T> {
    tag: String,
    event_type: String,
    forward: Rc<dyn Fn(NodeId, &T)>,
}

impl<T> TagActivation<T> {
    pub fn new<F>(tag: impl Into<String>, event_type: impl Into<String>, forward: F) -> Self
    where
        F: Fn(NodeId, &T) + 'static,
    {
        Self {
            tag: tag.into(),
            event_type: event_type.into(),
            forward: Rc::new(forward),
        }
    }
}

impl<T: 'static> ActivationPolicy<T> for TagActivation<T> {
    fn event_type(&self) -> &str {
        &self.event_type
    }

    fn applies_to(&self, document: &Document, node: NodeId) -> bool {
        document
            .tag(node)
            .is_some_and(|tag| tag.eq_ignore_ascii_case(&self.tag))
    }

    fn listener(&self, node: NodeId) -> Listener<T> {
        let forward = self.forward.clone();
        Listener::new(handler(move |item: &T, _: &[Value]| forward(node, item)))
    }
}
