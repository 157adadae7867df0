//! Object-literal rendering and reading
//!
//! Style values are written as JavaScript object literals: identifier keys
//! unquoted, everything else quoted, strings double-quoted with JSON escapes,
//! two-space indentation. That output is valid JSON5, so the same bodies are
//! read back with the `json5` parser.

use serde_json::Value;

/// Render a value as an object literal at top-level indentation.
pub fn render_literal(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0);
    out
}

/// Parse an object/array literal body (delimiters included).
pub fn parse_literal(source: &str) -> Result<Value, json5::Error> {
    json5::from_str(source)
}

/// True if `key` can appear unquoted as a property name.
pub fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

fn write_value(out: &mut String, value: &Value, indent: usize) {
    match value {
        Value::Object(map) if map.is_empty() => out.push_str("{}"),
        Value::Array(items) if items.is_empty() => out.push_str("[]"),
        Value::Object(map) => {
            out.push_str("{\n");
            let last = map.len() - 1;
            for (i, (key, item)) in map.iter().enumerate() {
                pad(out, indent + 1);
                write_key(out, key);
                out.push_str(": ");
                write_value(out, item, indent + 1);
                if i != last {
                    out.push(',');
                }
                out.push('\n');
            }
            pad(out, indent);
            out.push('}');
        }
        Value::Array(items) => {
            out.push_str("[\n");
            let last = items.len() - 1;
            for (i, item) in items.iter().enumerate() {
                pad(out, indent + 1);
                write_value(out, item, indent + 1);
                if i != last {
                    out.push(',');
                }
                out.push('\n');
            }
            pad(out, indent);
            out.push(']');
        }
        // Display on scalars is their JSON form: quoted strings, bare numbers
        scalar => out.push_str(&scalar.to_string()),
    }
}

fn write_key(out: &mut String, key: &str) {
    if is_identifier(key) {
        out.push_str(key);
    } else {
        out.push_str(&Value::String(key.to_string()).to_string());
    }
}

fn pad(out: &mut String, indent: usize) {
    for _ in 0..indent {
        out.push_str("  ");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_flat_object() {
        let rendered = render_literal(&json!({"color": "red", "z_index": 3}));
        assert_eq!(rendered, "{\n  color: \"red\",\n  z_index: 3\n}");
    }

    #[test]
    fn test_render_nested_and_special_keys() {
        let value = json!({
            "$pseudoClasses": {"hover": {"color": "blue"}},
            "$dynamicValues": ["$width"],
            "min-width": "10px"
        });
        let rendered = render_literal(&value);
        assert_eq!(
            rendered,
            "{\n  $pseudoClasses: {\n    hover: {\n      color: \"blue\"\n    }\n  },\n  \
             $dynamicValues: [\n    \"$width\"\n  ],\n  \"min-width\": \"10px\"\n}"
        );
    }

    #[test]
    fn test_render_empty_containers() {
        assert_eq!(render_literal(&json!({})), "{}");
        assert_eq!(render_literal(&json!({"a": []})), "{\n  a: []\n}");
    }

    #[test]
    fn test_render_escapes_strings() {
        let rendered = render_literal(&json!({"content": "say \"hi\"\n"}));
        assert_eq!(rendered, "{\n  content: \"say \\\"hi\\\"\\n\"\n}");
    }

    #[test]
    fn test_parse_rendered_preserves_value() {
        let value = json!({
            "background_color": "#fff",
            "padding": 4,
            "visible": true,
            "$mediaQueries": {"tablet": {"font_size": "14px"}},
            "$advancedSelector": [{"child": {"$target": "span", "color": "red"}}],
            "data-state": null
        });
        let parsed = parse_literal(&render_literal(&value)).unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn test_parse_preserves_key_order() {
        let parsed = parse_literal("{ zeta: 1, alpha: 2, mid: 3 }").unwrap();
        let keys: Vec<_> = parsed.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_parse_hand_written_literal() {
        let parsed = parse_literal("{\n  // comment\n  color: 'red',\n  size: 2,\n}").unwrap();
        assert_eq!(parsed, json!({"color": "red", "size": 2}));
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("color"));
        assert!(is_identifier("$pseudoClasses"));
        assert!(is_identifier("_nested"));
        assert!(is_identifier("h1"));
        assert!(!is_identifier("min-width"));
        assert!(!is_identifier("1st"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("a b"));
    }
}
