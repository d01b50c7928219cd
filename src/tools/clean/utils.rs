use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

// Lazy static regex for whitespace normalization
static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Remove zero-width characters that are invisible but can cause issues.
pub fn remove_zero_width_chars(text: &str) -> String {
    text.chars()
        .filter(|c| {
            !matches!(
                *c,
                '\u{200B}' | // Zero width space
                '\u{200C}' | // Zero width non-joiner
                '\u{200D}' | // Zero width joiner
                '\u{FEFF}'   // Zero width no-break space (BOM)
            )
        })
        .collect()
}

/// Remove control characters. Whitespace controls survive for the collapse step.
pub fn remove_control_chars(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || c.is_whitespace())
        .collect()
}

/// Collapse whitespace runs (spaces, tabs, newlines, NBSP) to a single space and trim.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text, " ").trim().to_string()
}

/// Read a non-negative integer from a JSON number or a formatted string
/// such as `"12,000"` or `"12000원"`.
pub fn value_as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64)),
        Value::String(s) => super::parse_digits(s),
        _ => None,
    }
}

/// Read a float from a JSON number or numeric string.
pub fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    }
}

/// Render a JSON scalar as a trimmed string. Objects and arrays yield `None`.
pub fn value_as_string(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// First key (in order) present on `obj` whose value coerces with `coerce`.
pub fn first_field<T, F>(obj: &Value, keys: &[&str], coerce: F) -> Option<T>
where
    F: Fn(&Value) -> Option<T>,
{
    keys.iter()
        .filter_map(|key| obj.get(*key))
        .find_map(|v| coerce(v))
}
