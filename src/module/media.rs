//! Media-queries module editing
//!
//! The module holds one array aggregate of breakpoint records:
//! `export const MEDIA_QUERIES = [ { name, type, values }, ... ];`

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::foundations::{append_aggregate, splice_body};
use super::literal::parse_literal;
use super::scanner::{locate, BodyKind, Declaration};
use super::ModuleError;

/// A named media query record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaQuery {
    pub name: String,
    /// Media type, e.g. `screen` or `print`
    #[serde(rename = "type")]
    pub media_type: String,
    /// Feature values in the order given, e.g. `min-width: 768px`
    pub values: Map<String, Value>,
}

/// Names of the queries in the aggregate, in document order.
pub fn media_query_names(text: &str, aggregate: &str) -> Result<Vec<String>, ModuleError> {
    let Some(decl) = locate(text, aggregate)? else {
        return Ok(Vec::new());
    };
    let items = parse_items(text, &decl)?;
    Ok(items
        .iter()
        .filter_map(|item| item.get("name").and_then(Value::as_str))
        .map(str::to_string)
        .collect())
}

/// Append a query, creating the aggregate if the module has none.
pub fn add_media_query(
    text: &str,
    aggregate: &str,
    query: &MediaQuery,
) -> Result<String, ModuleError> {
    let record = serde_json::to_value(query).map_err(|e| ModuleError::Encode(e.to_string()))?;

    let Some(decl) = locate(text, aggregate)? else {
        return Ok(append_aggregate(text, aggregate, &Value::Array(vec![record])));
    };

    let mut items = parse_items(text, &decl)?;
    let duplicate =
        items.iter().any(|item| item.get("name").and_then(Value::as_str) == Some(&query.name));
    if duplicate {
        return Err(ModuleError::AlreadyExists { name: query.name.clone() });
    }
    items.push(record);

    Ok(splice_body(text, &decl, &Value::Array(items)))
}

fn parse_items(text: &str, decl: &Declaration) -> Result<Vec<Value>, ModuleError> {
    let shape_error =
        || ModuleError::AggregateShape { name: decl.name.clone(), expected: "an array" };
    if decl.kind != BodyKind::Array {
        return Err(shape_error());
    }
    match parse_literal(decl.body_source(text)) {
        Ok(Value::Array(items)) => Ok(items),
        Ok(_) => Err(shape_error()),
        Err(source) => Err(ModuleError::Literal { name: decl.name.clone(), source }),
    }
}
