//! Foundations module editing (CSS variables)
//!
//! The foundations module holds a single aggregate of categories:
//!
//! ```text
//! export const FOUNDATIONS = {
//!   colors: {
//!     primary: "#0055ff"
//!   }
//! };
//! ```
//!
//! Variable `colors.primary` compiles to the CSS custom property
//! `--colors-primary`.

use serde_json::{Map, Value};

use super::literal::{parse_literal, render_literal};
use super::scanner::{locate, BodyKind, Declaration};
use super::ModuleError;

/// CSS custom property name for a foundations variable
pub fn css_variable_name(category: &str, name: &str) -> String {
    format!("--{}-{}", category, name)
}

/// The foundations aggregate as found in a module.
#[derive(Debug, Clone, PartialEq)]
pub struct Foundations {
    /// Exact aggregate declaration source
    pub source: String,
    /// Parsed categories
    pub categories: Map<String, Value>,
}

/// Read the foundations aggregate. `Ok(None)` if the module has none.
pub fn read_variables(text: &str, aggregate: &str) -> Result<Option<Foundations>, ModuleError> {
    let Some(decl) = locate(text, aggregate)? else {
        return Ok(None);
    };
    let categories = parse_categories(text, &decl)?;
    Ok(Some(Foundations { source: decl.source(text).to_string(), categories }))
}

/// Add `category.name = value`, creating the aggregate and category as needed.
pub fn add_variable(
    text: &str,
    aggregate: &str,
    category: &str,
    name: &str,
    value: &Value,
) -> Result<String, ModuleError> {
    let Some(decl) = locate(text, aggregate)? else {
        let mut categories = Map::new();
        categories.insert(category.to_string(), single(name, value));
        return Ok(append_aggregate(text, aggregate, &Value::Object(categories)));
    };

    let mut categories = parse_categories(text, &decl)?;
    match categories.get_mut(category) {
        Some(Value::Object(vars)) => {
            if vars.contains_key(name) {
                return Err(ModuleError::AlreadyExists { name: format!("{}.{}", category, name) });
            }
            vars.insert(name.to_string(), value.clone());
        }
        Some(_) => {
            return Err(ModuleError::AggregateShape {
                name: format!("{}.{}", aggregate, category),
                expected: "an object",
            });
        }
        None => {
            categories.insert(category.to_string(), single(name, value));
        }
    }

    Ok(splice_body(text, &decl, &Value::Object(categories)))
}

/// Set the value of an existing `category.name`.
pub fn update_variable(
    text: &str,
    aggregate: &str,
    category: &str,
    name: &str,
    value: &Value,
) -> Result<String, ModuleError> {
    let missing = || ModuleError::NotFound { name: format!("{}.{}", category, name) };

    let decl = locate(text, aggregate)?.ok_or_else(missing)?;
    let mut categories = parse_categories(text, &decl)?;
    let slot = categories
        .get_mut(category)
        .and_then(Value::as_object_mut)
        .and_then(|vars| vars.get_mut(name))
        .ok_or_else(missing)?;
    *slot = value.clone();

    Ok(splice_body(text, &decl, &Value::Object(categories)))
}

fn single(name: &str, value: &Value) -> Value {
    let mut vars = Map::new();
    vars.insert(name.to_string(), value.clone());
    Value::Object(vars)
}

fn parse_categories(text: &str, decl: &Declaration) -> Result<Map<String, Value>, ModuleError> {
    if decl.kind != BodyKind::Object {
        return Err(ModuleError::AggregateShape { name: decl.name.clone(), expected: "an object" });
    }
    match parse_literal(decl.body_source(text)) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => {
            Err(ModuleError::AggregateShape { name: decl.name.clone(), expected: "an object" })
        }
        Err(source) => Err(ModuleError::Literal { name: decl.name.clone(), source }),
    }
}

/// Replace a declaration body with a freshly rendered value.
pub(crate) fn splice_body(text: &str, decl: &Declaration, value: &Value) -> String {
    let rendered = render_literal(value);
    let mut out = String::with_capacity(text.len() + rendered.len());
    out.push_str(&text[..decl.body.start]);
    out.push_str(&rendered);
    out.push_str(&text[decl.body.end..]);
    out
}

/// Append a new aggregate declaration to the end of the module.
pub(crate) fn append_aggregate(text: &str, aggregate: &str, value: &Value) -> String {
    let mut out = text.trim_end().to_string();
    if !out.is_empty() {
        out.push_str("\n\n");
    }
    out.push_str(&format!("export const {} = {};\n", aggregate, render_literal(value)));
    out
}
