//! Synthetic names for value providers and event handlers.

use std::collections::BTreeMap;
use std::rc::Rc;

use serde_json::{Map, Value};

/// Maps a rendered item to a value.
pub type ValueProvider<T> = Rc<dyn Fn(&T) -> Value>;

/// Receives the rendered item and the evaluated argument expressions.
pub type Handler<T> = Rc<dyn Fn(&T, &[Value])>;

/// Wrap a closure as a [`ValueProvider`].
pub fn provider<T, F>(f: F) -> ValueProvider<T>
where
    F: Fn(&T) -> Value + 'static,
{
    Rc::new(f)
}

/// Wrap a closure as a [`Handler`].
pub fn handler<T, F>(f: F) -> Handler<T>
where
    F: Fn(&T, &[Value]) + 'static,
{
    Rc::new(f)
}

/// Allocates `propertyN`/`functionN` names in first-seen order.
///
/// Ordinals count only synthetic allocations of each kind. A name already
/// taken by a caller-supplied property is skipped.
pub struct BindingRegistry<T> {
    properties: BTreeMap<String, ValueProvider<T>>,
    functions: BTreeMap<String, Handler<T>>,
    next_property: usize,
    next_function: usize,
}

impl<T> BindingRegistry<T> {
    pub fn new() -> Self {
        Self {
            properties: BTreeMap::new(),
            functions: BTreeMap::new(),
            next_property: 0,
            next_function: 0,
        }
    }

    /// Seed with properties referenced by name from the template text.
    pub fn with_named(named: &BTreeMap<String, ValueProvider<T>>) -> Self {
        let mut registry = Self::new();
        registry.properties.extend(named.iter().map(|(k, v)| (k.clone(), v.clone())));
        registry
    }

    pub fn add_property(&mut self, provider: ValueProvider<T>) -> String {
        let name = loop {
            let candidate = format!("property{}", self.next_property);
            self.next_property += 1;
            if !self.properties.contains_key(&candidate) {
                break candidate;
            }
        };
        self.properties.insert(name.clone(), provider);
        name
    }

    pub fn add_function(&mut self, handler: Handler<T>) -> String {
        let name = format!("function{}", self.next_function);
        self.next_function += 1;
        self.functions.insert(name.clone(), handler);
        name
    }

    pub fn finish(self) -> Bindings<T> {
        Bindings {
            properties: self.properties,
            functions: self.functions,
        }
    }
}

impl<T> Default for BindingRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Property and function bindings referenced by a compiled template.
pub struct Bindings<T> {
    properties: BTreeMap<String, ValueProvider<T>>,
    functions: BTreeMap<String, Handler<T>>,
}

impl<T> Bindings<T> {
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    pub fn property(&self, name: &str) -> Option<&ValueProvider<T>> {
        self.properties.get(name)
    }

    pub fn function(&self, name: &str) -> Option<&Handler<T>> {
        self.functions.get(name)
    }

    /// Evaluate every property binding against one item.
    pub fn resolve(&self, item: &T) -> Map<String, Value> {
        self.properties
            .iter()
            .map(|(name, provider)| (name.clone(), provider(item)))
            .collect()
    }

    /// Call the function bound to `name`. Returns `false` if there is none.
    pub fn invoke(&self, name: &str, item: &T, args: &[Value]) -> bool {
        match self.functions.get(name) {
            Some(handler) => {
                handler(item, args);
                true
            }
            None => false,
        }
    }
}
