use std::collections::BTreeMap;
use std::rc::Rc;

use lite_dom::{Document, NodeId, PropertyValue};
use log::{debug, trace};
use serde_json::Value;

use crate::bindings::{BindingRegistry, Bindings, ValueProvider};
use crate::error::{Result, TemplateError};
use crate::escape::{
    encode_attribute_value, encode_character_data, encode_expression, format_number, wrap_literal,
};
use crate::metadata::{Listener, MetadataStore};
use crate::policy::ActivationPolicy;

/// Output of one compilation: the template expression and the bindings its
/// placeholders refer to.
pub struct CompiledTemplate<T> {
    pub template: String,
    pub bindings: Bindings<T>,
}

/// Serializes node trees into a template expression.
///
/// A compiler is single-use: a second call to [`compile`](Self::compile)
/// fails with [`TemplateError::AlreadyCompiled`].
pub struct TemplateCompiler<'a, T> {
    document: &'a mut Document,
    metadata: &'a MetadataStore<T>,
    policies: &'a [Rc<dyn ActivationPolicy<T>>],
    out: String,
    registry: BindingRegistry<T>,
    compiled: bool,
}

impl<'a, T: 'static> TemplateCompiler<'a, T> {
    pub fn new(document: &'a mut Document, metadata: &'a MetadataStore<T>) -> Self {
        Self {
            document,
            metadata,
            policies: &[],
            out: String::new(),
            registry: BindingRegistry::new(),
            compiled: false,
        }
    }

    pub fn with_policies(mut self, policies: &'a [Rc<dyn ActivationPolicy<T>>]) -> Self {
        self.policies = policies;
        self
    }

    /// Compile `roots` in order. `named` properties are passed through to
    /// the bindings so that the template text can reference them directly.
    ///
    /// Literal attributes and properties shadowed by a dynamic binding are
    /// removed from the document.
    pub fn compile(
        &mut self,
        roots: &[NodeId],
        named: &BTreeMap<String, ValueProvider<T>>,
    ) -> Result<CompiledTemplate<T>> {
        if self.compiled {
            return Err(TemplateError::AlreadyCompiled);
        }
        self.compiled = true;

        self.registry = BindingRegistry::with_named(named);
        for &root in roots {
            self.write_node(root, true, "\n  ")?;
        }
        self.out.push('\n');

        let template = std::mem::take(&mut self.out);
        let bindings = std::mem::take(&mut self.registry).finish();
        debug!(
            "compiled {} root(s) into {} bytes, {} properties, {} functions",
            roots.len(),
            template.len(),
            bindings.property_names().count(),
            bindings.function_names().count()
        );
        Ok(CompiledTemplate { template, bindings })
    }

    fn write_node(&mut self, id: NodeId, inherited: bool, padding: &str) -> Result<()> {
        if let Some(text) = self.document.text(id) {
            self.out.push_str(padding);
            if inherited || (!text.contains("${") && !text.contains('`')) {
                self.out.push_str(&encode_character_data(text));
            } else {
                self.out.push_str(&wrap_literal(text));
            }
            return Ok(());
        }

        let tag = self
            .document
            .tag(id)
            .ok_or(TemplateError::UnknownNode(id))?
            .to_string();

        let interpolate = self.metadata.interpolation(id).resolve(inherited);
        if interpolate != inherited {
            trace!("<{tag}> {id}: interpolation {}", if interpolate { "enabled" } else { "disabled" });
        }

        self.out.push_str(padding);
        self.out.push('<');
        self.out.push_str(&tag);

        self.write_attribute_bindings(id);
        self.write_attributes(id, interpolate);
        self.write_property_bindings(id);
        self.write_properties(id, interpolate)?;
        self.write_listeners(id);

        self.out.push('>');

        let children = self.document.children(id).to_vec();
        if !children.is_empty() {
            let nested = format!("{padding}  ");
            for child in children {
                self.write_node(child, interpolate, &nested)?;
            }
            self.out.push_str(padding);
        }
        self.out.push_str(&format!("</{tag}>"));
        Ok(())
    }

    fn write_attribute_bindings(&mut self, id: NodeId) {
        let Some(meta) = self.metadata.get(id) else {
            return;
        };
        for (name, provider) in &meta.attributes {
            self.document.remove_attribute(id, name);
            let binding = self.registry.add_property(provider.clone());
            self.out.push_str(&format!(" {name}=${{item.{binding}}}"));
        }
    }

    fn write_attributes(&mut self, id: NodeId, interpolate: bool) {
        for name in self.document.attribute_names(id) {
            let value = self.document.get_attribute(id, &name).unwrap_or_default();
            self.out.push(' ');
            self.out.push_str(&name);
            if !value.is_empty() {
                self.out.push('=');
                if interpolate {
                    self.out.push_str(&encode_attribute_value(value));
                } else {
                    self.out.push_str(&wrap_literal(value));
                }
            }
        }
    }

    fn write_property_bindings(&mut self, id: NodeId) {
        let Some(meta) = self.metadata.get(id) else {
            return;
        };
        for (name, provider) in &meta.properties {
            self.document.remove_property(id, name);
            let binding = self.registry.add_property(provider.clone());
            self.out.push_str(&format!(" .{name}=${{item.{binding}}}"));
        }
    }

    fn write_properties(&mut self, id: NodeId, interpolate: bool) -> Result<()> {
        for name in self.document.property_names(id) {
            let Some(value) = self.document.get_property_raw(id, &name) else {
                continue;
            };
            let encoded = encode_property(&name, value, interpolate)?;
            self.out.push_str(&format!(" .{name}={encoded}"));
        }
        Ok(())
    }

    fn write_listeners(&mut self, id: NodeId) {
        let mut listeners: Vec<(String, Listener<T>)> = self
            .metadata
            .get(id)
            .map(|meta| {
                meta.listeners()
                    .iter()
                    .map(|(event, l)| (event.clone(), l.clone()))
                    .collect()
            })
            .unwrap_or_default();

        for policy in self.policies {
            let event_type = policy.event_type();
            if !policy.applies_to(self.document, id)
                || listeners.iter().any(|(event, _)| event == event_type)
            {
                continue;
            }
            trace!("{id}: synthesized '{event_type}' listener");
            listeners.push((event_type.to_string(), policy.listener(id)));
        }

        for (event_type, listener) in listeners {
            let function = self.registry.add_function(listener.handler);
            let (formal, actual) = match &listener.arguments {
                Some(arguments) => ("event", arguments.join(", ")),
                None => ("", String::new()),
            };
            self.out
                .push_str(&format!(" @{event_type}=${{({formal})=>{function}({actual})}}"));
        }
    }
}

fn encode_property(name: &str, value: &PropertyValue, interpolate: bool) -> Result<String> {
    Ok(match value {
        PropertyValue::String(s) | PropertyValue::Json(Value::String(s)) => {
            if interpolate {
                encode_expression(s, "${`", "`}")
            } else {
                wrap_literal(s)
            }
        }
        PropertyValue::Bool(b) | PropertyValue::Json(Value::Bool(b)) => format!("${{{b}}}"),
        PropertyValue::Number(n) => format!("${{{}}}", format_number(*n)),
        PropertyValue::Json(Value::Number(n)) => {
            let text = n.as_f64().map(format_number).unwrap_or_else(|| n.to_string());
            format!("${{{text}}}")
        }
        PropertyValue::Json(v @ (Value::Array(_) | Value::Object(_))) => format!("${{{v}}}"),
        PropertyValue::Json(Value::Null) => {
            return Err(TemplateError::UnsupportedValue {
                name: name.to_string(),
            });
        }
    })
}
