//! Compiles node trees annotated with dynamic bindings into a single
//! template expression: literal markup interleaved with `${...}`
//! placeholders, `.name=${...}` property bindings and `@type=${...}` event
//! bindings, accompanied by the value providers and handlers those
//! placeholders refer to.
//!
//! ```
//! use lite_dom::{h, text, Document};
//! use lite_template::{LiteRenderer, provider};
//! use serde_json::json;
//!
//! struct Person { name: String }
//!
//! let mut doc = Document::new();
//! let div = doc.build(&h("div", (), vec![text("Name: ${item.name}")]));
//! let mut renderer = LiteRenderer::<Person>::of(doc, [div]).unwrap();
//! renderer.with_property("name", provider(|p: &Person| json!(p.name)));
//!
//! let compiled = renderer.render().unwrap();
//! assert_eq!(compiled.template, "\n  <div>\n    Name: ${item.name}\n  </div>\n");
//! ```

pub mod bindings;
pub mod compiler;
pub mod component;
pub mod encoder;
pub mod error;
pub mod escape;
pub mod metadata;
pub mod policy;
pub mod renderer;

pub use bindings::{BindingRegistry, Bindings, Handler, ValueProvider, handler, provider};
pub use compiler::{CompiledTemplate, TemplateCompiler};
pub use component::LiteNode;
pub use error::{Result, TemplateError};
pub use metadata::{Interpolation, Listener, MetadataStore, NodeMetadata};
pub use policy::{ActivationPolicy, TagActivation};
pub use renderer::LiteRenderer;
