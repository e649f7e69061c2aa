use anyhow::{Context, Result};
use lite_template::TagActivation;
use log::info;
use serde_json::Value;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::rc::Rc;

pub mod markup;

pub use markup::{parse_markup, Directive, Markup, MarkupError};

/// Compile a markup file into a template expression.
///
/// Each name in `properties` is exposed to the template as `${item.<name>}`,
/// read from the field of the same name. When `items` points to a JSON file
/// (an array of items or a single item), the property bindings resolved for
/// every item are appended after the template, one JSON object per line.
pub fn compile_cmd(
    input: &Path,
    properties: &[String],
    items: Option<&Path>,
    button_activation: bool,
) -> Result<String> {
    let src =
        fs::read_to_string(input).with_context(|| format!("failed to read {}", input.display()))?;
    compile_source(&src, properties, items, button_activation)
        .with_context(|| format!("failed to compile {}", input.display()))
}

pub fn compile_source(
    src: &str,
    properties: &[String],
    items: Option<&Path>,
    button_activation: bool,
) -> Result<String> {
    let mut renderer = parse_markup(src)?.into_renderer()?;
    for name in properties {
        renderer.with_property(name, markup::field_provider(name.clone()));
    }
    if button_activation {
        renderer.with_activation_policy(Rc::new(TagActivation::new(
            "button",
            "click",
            |node, item: &Value| info!("click on button {node}: item={item}"),
        )));
    }

    let compiled = renderer.render()?;
    let mut out = compiled.template.clone();

    if let Some(path) = items {
        for item in read_items(path)? {
            let resolved = compiled.bindings.resolve(&item);
            writeln!(out, "{}", Value::Object(resolved))?;
        }
    }
    Ok(out)
}

fn read_items(path: &Path) -> Result<Vec<Value>> {
    let txt =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let value: Value = serde_json::from_str(&txt)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    Ok(match value {
        Value::Array(items) => items,
        item => vec![item],
    })
}
