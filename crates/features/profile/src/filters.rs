//! Tera filters that turn template values into JavaScript literals.

use std::collections::HashMap;
use std::fmt::Write as _;

use tera::{Result, Value};

/// `{{ value | js_value }}`: booleans, numbers and `null` stay bare, strings are
/// double-quoted, arrays are emitted element by element.
pub(crate) fn js_value(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    literal(value, '"').map(Value::String)
}

/// `{{ module | js_id }}`: a single-quoted string, the spelling used for module ids.
pub(crate) fn js_id(value: &Value, _args: &HashMap<String, Value>) -> Result<Value> {
    let s = value.as_str().ok_or_else(|| tera::Error::msg("js_id filter expects a string"))?;
    Ok(Value::String(quote(s, '\'')))
}

fn literal(value: &Value, quote_char: char) -> Result<String> {
    match value {
        Value::Null => Ok("null".to_owned()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::String(s) => Ok(quote(s, quote_char)),
        Value::Array(items) => {
            let parts = items.iter().map(|v| literal(v, quote_char)).collect::<Result<Vec<_>>>()?;
            Ok(format!("[{}]", parts.join(", ")))
        },
        Value::Object(_) => Err(tera::Error::msg("js_value filter does not support objects")),
    }
}

/// Quotes `s` with `quote_char`, escaping what a JavaScript string literal requires.
pub(crate) fn quote(s: &str, quote_char: char) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote_char);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote_char => {
                out.push('\\');
                out.push(c);
            },
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", u32::from(c));
            },
            c => out.push(c),
        }
    }
    out.push(quote_char);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(filter: fn(&Value, &HashMap<String, Value>) -> Result<Value>, input: Value) -> String {
        filter(&input, &HashMap::new()).unwrap().as_str().unwrap().to_owned()
    }

    #[test]
    fn test_js_value_scalars() {
        assert_eq!(apply(js_value, Value::Bool(false)), "false");
        assert_eq!(apply(js_value, Value::from("shrinksafe")), "\"shrinksafe\"");
        assert_eq!(apply(js_value, Value::from(3)), "3");
        assert_eq!(apply(js_value, Value::Null), "null");
    }

    #[test]
    fn test_js_value_escapes_paths() {
        assert_eq!(apply(js_value, Value::from("C:\\Source\\\"x\"")), r#""C:\\Source\\\"x\"""#);
    }

    #[test]
    fn test_js_value_arrays() {
        let arr = Value::Array(vec![Value::from("a"), Value::Bool(true)]);
        assert_eq!(apply(js_value, arr), "[\"a\", true]");
    }

    #[test]
    fn test_js_id_single_quotes() {
        assert_eq!(apply(js_id, Value::from("dojo/dojo")), "'dojo/dojo'");
        assert_eq!(apply(js_id, Value::from("it's")), "'it\\'s'");
    }

    #[test]
    fn test_filters_reject_wrong_types() {
        assert!(js_id(&Value::Bool(true), &HashMap::new()).is_err());
        let object = Value::Object(tera::Map::new());
        assert!(js_value(&object, &HashMap::new()).is_err());
    }
}
