use lite_dom::{Document, NodeId, PropertyValue};
use lite_template::{LiteRenderer, TemplateError, provider};
use log::info;
use pest::Parser;
use pest::iterators::Pair;
use serde_json::Value;
use thiserror::Error;

#[derive(pest_derive::Parser)]
#[grammar = "template.pest"]
struct MarkupParser;

#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("syntax error\n{0}")]
    Syntax(Box<pest::error::Error<Rule>>),
    #[error("closing tag </{found}> does not match <{expected}>")]
    MismatchedTag { expected: String, found: String },
    #[error("property '{name}' has unknown type '{kind}'")]
    UnknownKind { name: String, kind: String },
    #[error("invalid {kind} value for property '{name}': {value}")]
    InvalidValue {
        name: String,
        kind: String,
        value: String,
    },
    #[error("lite:interpolation expects 'on' or 'off', got '{0}'")]
    InterpolationMode(String),
    #[error("'{prefix}{name}' needs a value")]
    MissingValue { prefix: String, name: String },
    #[error("the markup contains no elements or text")]
    Empty,
    #[error(transparent)]
    Template(#[from] TemplateError),
}

/// Binding declared in the markup, applied once the tree is built.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    AttributeBinding { name: String, field: String },
    PropertyBinding { name: String, field: String },
    Listener {
        event_type: String,
        arguments: Option<Vec<String>>,
    },
    Interpolation(bool),
}

/// A parsed markup file: the node tree plus the bindings declared on it.
#[derive(Debug)]
pub struct Markup {
    pub document: Document,
    pub roots: Vec<NodeId>,
    pub directives: Vec<(NodeId, Directive)>,
}

pub fn parse_markup(source: &str) -> Result<Markup, MarkupError> {
    let mut pairs =
        MarkupParser::parse(Rule::document, source).map_err(|e| MarkupError::Syntax(Box::new(e)))?;
    let mut markup = Markup {
        document: Document::new(),
        roots: Vec::new(),
        directives: Vec::new(),
    };

    if let Some(document) = pairs.next() {
        for node in document.into_inner() {
            if let Some(id) = build_node(node, &mut markup)? {
                markup.roots.push(id);
            }
        }
    }
    if markup.roots.is_empty() {
        return Err(MarkupError::Empty);
    }
    Ok(markup)
}

impl Markup {
    /// Build a renderer over `serde_json::Value` items with every declared
    /// binding applied. Bound fields read `item[field]`.
    pub fn into_renderer(self) -> Result<LiteRenderer<Value>, MarkupError> {
        let mut renderer = LiteRenderer::of(self.document, self.roots)?;
        for (node, directive) in self.directives {
            match directive {
                Directive::AttributeBinding { name, field } => {
                    renderer.with_attribute(node, &name, field_provider(field))?;
                }
                Directive::PropertyBinding { name, field } => {
                    renderer.with_node_property(node, &name, field_provider(field))?;
                }
                Directive::Listener {
                    event_type,
                    arguments: None,
                } => {
                    let logged = event_type.clone();
                    renderer.with_listener(node, &event_type, move |item: &Value| {
                        info!("{logged} on {node}: item={item}");
                    })?;
                }
                Directive::Listener {
                    event_type,
                    arguments: Some(arguments),
                } => {
                    let logged = event_type.clone();
                    renderer.with_listener_args(
                        node,
                        &event_type,
                        move |item: &Value, args: &[Value]| {
                            info!("{logged} on {node}: item={item} args={args:?}");
                        },
                        arguments.as_slice(),
                    )?;
                }
                Directive::Interpolation(true) => {
                    renderer.enable_interpolation_for(node)?;
                }
                Directive::Interpolation(false) => {
                    renderer.disable_interpolation_for(node)?;
                }
            }
        }
        Ok(renderer)
    }
}

pub(crate) fn field_provider(field: String) -> lite_template::ValueProvider<Value> {
    provider(move |item: &Value| item.get(&field).cloned().unwrap_or(Value::Null))
}

fn build_node(pair: Pair<Rule>, markup: &mut Markup) -> Result<Option<NodeId>, MarkupError> {
    match pair.as_rule() {
        Rule::text => {
            let raw = pair.as_str().trim();
            if raw.is_empty() {
                return Ok(None);
            }
            Ok(Some(markup.document.create_text(decode_entities(raw))))
        }
        Rule::element => build_element(pair, markup).map(Some),
        _ => Ok(None),
    }
}

fn build_element(pair: Pair<Rule>, markup: &mut Markup) -> Result<NodeId, MarkupError> {
    let mut inner = pair.into_inner();
    let tag = inner
        .next()
        .map(|p| p.as_str().to_string())
        .unwrap_or_default();
    let id = markup.document.create_element(tag.as_str());

    for part in inner {
        match part.as_rule() {
            Rule::attribute => apply_attribute(part, id, markup)?,
            Rule::close_tag => {
                let found = part
                    .into_inner()
                    .next()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                if found != tag {
                    return Err(MarkupError::MismatchedTag {
                        expected: tag,
                        found,
                    });
                }
            }
            Rule::self_close => {}
            _ => {
                if let Some(child) = build_node(part, markup)? {
                    markup.document.append_child(id, child);
                }
            }
        }
    }
    Ok(id)
}

fn apply_attribute(pair: Pair<Rule>, id: NodeId, markup: &mut Markup) -> Result<(), MarkupError> {
    let mut prefix = "";
    let mut name = "";
    let mut value: Option<String> = None;
    for part in pair.into_inner() {
        match part.as_rule() {
            Rule::attr_prefix => prefix = part.as_str(),
            Rule::attr_name => name = part.as_str(),
            Rule::dq_inner | Rule::sq_inner => value = Some(decode_entities(part.as_str())),
            _ => {}
        }
    }

    let required = |value: Option<String>| {
        value.ok_or_else(|| MarkupError::MissingValue {
            prefix: prefix.to_string(),
            name: name.to_string(),
        })
    };

    match prefix {
        ":" => markup.directives.push((
            id,
            Directive::AttributeBinding {
                name: name.to_string(),
                field: required(value)?,
            },
        )),
        ":." => markup.directives.push((
            id,
            Directive::PropertyBinding {
                name: name.to_string(),
                field: required(value)?,
            },
        )),
        "@" => markup.directives.push((
            id,
            Directive::Listener {
                event_type: name.to_string(),
                arguments: value.as_deref().map(split_arguments),
            },
        )),
        "." => {
            let (name, kind) = name.split_once(':').unwrap_or((name, "string"));
            let property = typed_property(name, kind, &required(value)?)?;
            markup.document.set_property(id, name, property);
        }
        _ if name == "lite:interpolation" => {
            let mode = required(value)?;
            let enabled = match mode.as_str() {
                "on" => true,
                "off" => false,
                _ => return Err(MarkupError::InterpolationMode(mode)),
            };
            markup.directives.push((id, Directive::Interpolation(enabled)));
        }
        _ => match value {
            Some(value) => markup.document.set_attribute(id, name, value),
            None => markup.document.set_bool_attribute(id, name, true),
        },
    }
    Ok(())
}

fn typed_property(name: &str, kind: &str, value: &str) -> Result<PropertyValue, MarkupError> {
    let invalid = || MarkupError::InvalidValue {
        name: name.to_string(),
        kind: kind.to_string(),
        value: value.to_string(),
    };
    match kind {
        "string" => Ok(PropertyValue::String(value.to_string())),
        "bool" => match value {
            "true" => Ok(PropertyValue::Bool(true)),
            "false" => Ok(PropertyValue::Bool(false)),
            _ => Err(invalid()),
        },
        "number" => value
            .trim()
            .parse::<f64>()
            .map(PropertyValue::Number)
            .map_err(|_| invalid()),
        "json" => serde_json::from_str(value)
            .map(PropertyValue::Json)
            .map_err(|_| invalid()),
        _ => Err(MarkupError::UnknownKind {
            name: name.to_string(),
            kind: kind.to_string(),
        }),
    }
}

/// Split listener argument expressions on commas that are not nested in
/// brackets or quotes.
pub fn split_arguments(source: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0usize;

    for (i, c) in source.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None => match c {
                '\'' | '"' | '`' => quote = Some(c),
                '(' | '[' | '{' => depth += 1,
                ')' | ']' | '}' => depth = depth.saturating_sub(1),
                ',' if depth == 0 => {
                    out.push(&source[start..i]);
                    start = i + 1;
                }
                _ => {}
            },
        }
    }
    out.push(&source[start..]);

    out.into_iter()
        .map(str::trim)
        .filter(|arg| !arg.is_empty())
        .map(str::to_string)
        .collect()
}

fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_split_outside_nesting() {
        assert_eq!(
            split_arguments("event.detail, [1, 2], f(a, b), 'x,y'"),
            vec!["event.detail", "[1, 2]", "f(a, b)", "'x,y'"]
        );
        assert!(split_arguments("  ").is_empty());
    }

    #[test]
    fn entities_are_decoded_once() {
        assert_eq!(decode_entities("a &amp;lt; b &lt; c"), "a &lt; b < c");
    }
}
