use lite_dom::NodeId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A compiler instance is single-use.
    #[error("template builder has already been compiled")]
    AlreadyCompiled,

    #[error("a listener for the event type '{event_type}' is already registered on the specified node")]
    DuplicateListener { event_type: String },

    #[error("node {0} is not a child of the template")]
    ForeignNode(NodeId),

    /// Bindings, listeners and interpolation overrides only apply to elements.
    #[error("node {0} is a text node")]
    TextNode(NodeId),

    #[error("node {0} does not exist in the document")]
    UnknownNode(NodeId),

    #[error("property '{name}' has a value of unsupported kind")]
    UnsupportedValue { name: String },

    #[error("a template needs at least one root node")]
    EmptyTemplate,
}

pub type Result<T> = std::result::Result<T, TemplateError>;
