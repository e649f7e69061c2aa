use std::collections::BTreeMap;
use std::rc::Rc;

use lite_dom::{Document, NodeId};
use serde_json::Value;

use crate::bindings::ValueProvider;
use crate::compiler::{CompiledTemplate, TemplateCompiler};
use crate::component::LiteNode;
use crate::error::{Result, TemplateError};
use crate::metadata::MetadataStore;
use crate::policy::ActivationPolicy;

/// Renderer that uses a node tree as its template.
///
/// The tree is compiled lazily. Every change made through this type (or
/// through [`document_mut`](Self::document_mut)) discards the cached result,
/// so the next [`render`](Self::render) recompiles.
pub struct LiteRenderer<T> {
    document: Document,
    roots: Vec<NodeId>,
    metadata: MetadataStore<T>,
    properties: BTreeMap<String, ValueProvider<T>>,
    policies: Vec<Rc<dyn ActivationPolicy<T>>>,
    compiled: Option<Rc<CompiledTemplate<T>>>,
}

impl<T: 'static> LiteRenderer<T> {
    pub fn of(document: Document, roots: impl IntoIterator<Item = NodeId>) -> Result<Self> {
        let roots: Vec<NodeId> = roots.into_iter().collect();
        if roots.is_empty() {
            return Err(TemplateError::EmptyTemplate);
        }
        if let Some(&missing) = roots.iter().find(|&&r| !document.exists(r)) {
            return Err(TemplateError::UnknownNode(missing));
        }
        Ok(Self {
            document,
            roots,
            metadata: MetadataStore::new(),
            properties: BTreeMap::new(),
            policies: Vec::new(),
            compiled: None,
        })
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        self.compiled = None;
        &mut self.document
    }

    pub fn metadata(&self) -> &MetadataStore<T> {
        &self.metadata
    }

    /// Make `provider` available to the template as `${item.<name>}`.
    pub fn with_property(&mut self, name: &str, provider: ValueProvider<T>) -> &mut Self {
        self.properties.insert(name.to_string(), provider);
        self.compiled = None;
        self
    }

    pub fn with_activation_policy(&mut self, policy: Rc<dyn ActivationPolicy<T>>) -> &mut Self {
        self.policies.push(policy);
        self.compiled = None;
        self
    }

    /// Bind a property of `node` to a value computed per item.
    pub fn with_node_property(
        &mut self,
        node: NodeId,
        name: &str,
        provider: ValueProvider<T>,
    ) -> Result<&mut Self> {
        self.node(node)?.with_property_binding(name, provider);
        Ok(self)
    }

    /// Bind an attribute of `node` to a value computed per item.
    pub fn with_attribute(
        &mut self,
        node: NodeId,
        name: &str,
        provider: ValueProvider<T>,
    ) -> Result<&mut Self> {
        self.node(node)?.with_attribute_binding(name, provider);
        Ok(self)
    }

    /// Assign a fixed attribute value, which may contain placeholders.
    pub fn with_static_attribute(&mut self, node: NodeId, name: &str, value: &str) -> Result<&mut Self> {
        self.node(node)?.with_attribute(name, value);
        Ok(self)
    }

    pub fn with_listener<F>(&mut self, node: NodeId, event_type: &str, f: F) -> Result<&mut Self>
    where
        F: Fn(&T) + 'static,
    {
        self.node(node)?.with_listener(event_type, f)?;
        Ok(self)
    }

    pub fn with_listener_args<F, S>(
        &mut self,
        node: NodeId,
        event_type: &str,
        f: F,
        arguments: &[S],
    ) -> Result<&mut Self>
    where
        F: Fn(&T, &[Value]) + 'static,
        S: AsRef<str>,
    {
        self.node(node)?.with_listener_args(event_type, f, arguments)?;
        Ok(self)
    }

    /// Disable interpolation on every root.
    pub fn disable_interpolation(&mut self) -> &mut Self {
        for root in self.roots.clone() {
            self.metadata.node(&mut self.document, root).disable_interpolation();
        }
        self.compiled = None;
        self
    }

    pub fn disable_interpolation_for(&mut self, node: NodeId) -> Result<&mut Self> {
        self.node(node)?.disable_interpolation();
        Ok(self)
    }

    pub fn enable_interpolation_for(&mut self, node: NodeId) -> Result<&mut Self> {
        self.node(node)?.enable_interpolation();
        Ok(self)
    }

    /// Bindings of an element reachable from one of the roots.
    pub fn node(&mut self, node: NodeId) -> Result<LiteNode<'_, T>> {
        if !self.roots.iter().any(|&root| self.document.contains(root, node)) {
            return Err(TemplateError::ForeignNode(node));
        }
        if self.document.is_text(node) {
            return Err(TemplateError::TextNode(node));
        }
        self.compiled = None;
        Ok(self.metadata.node(&mut self.document, node))
    }

    /// Text of the template. Returns the cached text when [`render`](Self::render)
    /// has already compiled it, otherwise compiles without populating the cache.
    pub fn template_expression(&mut self) -> Result<String> {
        match &self.compiled {
            Some(compiled) => Ok(compiled.template.clone()),
            None => Ok(self.compile()?.template),
        }
    }

    /// The compiled template, compiling it if needed.
    pub fn render(&mut self) -> Result<Rc<CompiledTemplate<T>>> {
        if let Some(compiled) = &self.compiled {
            return Ok(compiled.clone());
        }
        let compiled = Rc::new(self.compile()?);
        self.compiled = Some(compiled.clone());
        Ok(compiled)
    }

    fn compile(&mut self) -> Result<CompiledTemplate<T>> {
        TemplateCompiler::new(&mut self.document, &self.metadata)
            .with_policies(&self.policies)
            .compile(&self.roots, &self.properties)
    }
}
