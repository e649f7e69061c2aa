//! Escaping policies for text content, attribute values and property values.

use crate::encoder;

/// Embed `value` as a backtick literal inside a single placeholder, so that
/// nothing in it is interpolated. A backslash is doubled, so it never
/// pairs with the escape of a following `$` or backtick.
pub fn wrap_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 6);
    out.push_str("${`");
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '`' => out.push_str("\\`"),
            '$' => out.push_str("\\$"),
            _ => out.push(c),
        }
    }
    out.push_str("`}");
    out
}

/// Keep well-formed placeholders in `value`, falling back to [`wrap_literal`].
pub fn encode_expression(value: &str, prefix: &str, suffix: &str) -> String {
    encoder::encode(value, prefix, suffix).unwrap_or_else(|| {
        log::warn!("unbalanced placeholder in {value:?}, emitting it as a literal");
        wrap_literal(value)
    })
}

/// Text content with interpolation left to the rendering engine.
///
/// Only `&` and `<` are escaped. A value opening with `${` is a placeholder
/// and is kept verbatim; a leading `\${` loses its backslash.
pub fn encode_character_data(value: &str) -> String {
    let value = if let Some(rest) = value.strip_prefix('\\').filter(|r| r.starts_with("${")) {
        rest
    } else if value.starts_with("${") {
        return value.to_string();
    } else {
        value
    };
    value.replace('&', "&amp;").replace('<', "&lt;")
}

/// Attribute value (including its quotes) in an interpolating context.
pub fn encode_attribute_value(value: &str) -> String {
    if value.contains("${") {
        return encode_expression(value, "\"", "\"");
    }
    let value = value.replace('&', "&amp;");
    if value.contains('"') && !value.contains('\'') {
        format!("'{value}'")
    } else {
        format!("\"{}\"", value.replace('"', "&quot;"))
    }
}

/// Text of a number as it appears inside a placeholder.
pub fn format_number(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if v.fract() == 0.0 && v.abs() < 1e7 {
        format!("{v:.1}")
    } else if v.abs() >= 1e-3 && v.abs() < 1e21 {
        v.to_string()
    } else {
        format!("{v:e}")
    }
}
