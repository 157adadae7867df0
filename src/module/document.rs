//! Component registry module editing
//!
//! A [`GeneratedModule`] is the text of a theme module plus the name of its
//! aggregate export. Edits splice new text into the located spans and leave
//! everything else byte-for-byte intact. A failed edit never changes the text.

use serde_json::Value;

use super::aggregate::{append_member, member_names, normalize_separators, remove_member};
use super::literal::{is_identifier, parse_literal, render_literal};
use super::scanner::{declaration_names, locate, scan, BodyKind, Declaration};
use super::ModuleError;

/// A located declaration with its parsed body.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclarationEntry {
    pub name: String,
    /// Exact declaration source
    pub source: String,
    /// Parsed body, `None` if it is not a plain literal (spreads, references)
    pub value: Option<Value>,
}

/// Text of a generated module together with its aggregate export name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedModule {
    text: String,
    aggregate: String,
}

impl GeneratedModule {
    pub fn new(text: impl Into<String>, aggregate: impl Into<String>) -> Self {
        Self { text: text.into(), aggregate: aggregate.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn aggregate(&self) -> &str {
        &self.aggregate
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// Names of the individual declarations, in document order.
    pub fn names(&self) -> Result<Vec<String>, ModuleError> {
        Ok(declaration_names(&self.text, &self.aggregate)?)
    }

    /// Members currently listed in the aggregate, in order.
    pub fn aggregate_members(&self) -> Result<Vec<String>, ModuleError> {
        Ok(locate(&self.text, &self.aggregate)?
            .map(|d| member_names(d.body_source(&self.text)))
            .unwrap_or_default())
    }

    /// Fetch a declaration by name. The aggregate itself is not an entry.
    pub fn get(&self, name: &str) -> Result<DeclarationEntry, ModuleError> {
        self.check_name(name)?;
        let decl = self.find(name)?;
        Ok(DeclarationEntry {
            name: decl.name.clone(),
            source: decl.source(&self.text).to_string(),
            value: parse_literal(decl.body_source(&self.text)).ok(),
        })
    }

    /// Add a new declaration and register it in the aggregate.
    ///
    /// The declaration goes directly above the aggregate so the aggregate
    /// never references a binding declared after it.
    pub fn insert(&mut self, name: &str, value: &Value) -> Result<(), ModuleError> {
        self.check_name(name)?;

        let declarations = scan(&self.text)?;
        if declarations.iter().any(|d| d.name == name) {
            return Err(ModuleError::AlreadyExists { name: name.to_string() });
        }

        let rendered = format!("export const {} = {};\n", name, render_literal(value));
        let aggregate = declarations.iter().find(|d| d.name == self.aggregate);

        let text = match aggregate {
            Some(agg) => {
                self.check_aggregate_shape(agg)?;
                let body = append_member(agg.body_source(&self.text), name);
                let mut out = String::with_capacity(self.text.len() + rendered.len() + 16);
                out.push_str(&self.text[..agg.span.start]);
                out.push_str(&rendered);
                out.push('\n');
                out.push_str(&self.text[agg.span.start..agg.body.start]);
                out.push_str(&body);
                out.push_str(&self.text[agg.body.end..]);
                out
            }
            None => {
                let mut out = self.text.trim_end().to_string();
                if !out.is_empty() {
                    out.push_str("\n\n");
                }
                out.push_str(&rendered);
                out.push('\n');
                out.push_str(&format!("export const {} = {{\n  {}\n}};\n", self.aggregate, name));
                out
            }
        };

        self.text = text;
        Ok(())
    }

    /// Replace the body of an existing declaration. The aggregate is untouched.
    pub fn replace(&mut self, name: &str, value: &Value) -> Result<(), ModuleError> {
        self.check_name(name)?;
        let decl = self.find(name)?;
        let rendered = render_literal(value);

        let mut out = String::with_capacity(self.text.len() + rendered.len());
        out.push_str(&self.text[..decl.body.start]);
        out.push_str(&rendered);
        out.push_str(&self.text[decl.body.end..]);
        self.text = out;
        Ok(())
    }

    /// Remove a declaration and its aggregate entry.
    pub fn delete(&mut self, name: &str) -> Result<(), ModuleError> {
        self.check_name(name)?;
        let decl = self.find(name)?;

        let (start, end) = removal_range(&self.text, &decl);
        let mut text = String::with_capacity(self.text.len());
        text.push_str(&self.text[..start]);
        text.push_str(&self.text[end..]);

        if let Some(agg) = locate(&text, &self.aggregate)? {
            let body = agg.body_source(&text);
            let cleaned = match remove_member(body, name) {
                Some(without) => without,
                None => normalize_separators(body),
            };
            let mut out = String::with_capacity(text.len());
            out.push_str(&text[..agg.body.start]);
            out.push_str(&cleaned);
            out.push_str(&text[agg.body.end..]);
            text = out;
        }

        self.text = text;
        Ok(())
    }

    /// Only plain identifiers other than the aggregate can be edited.
    fn check_name(&self, name: &str) -> Result<(), ModuleError> {
        if !is_identifier(name) {
            return Err(ModuleError::InvalidName { name: name.to_string() });
        }
        if name == self.aggregate {
            return Err(ModuleError::ReservedName { name: name.to_string() });
        }
        Ok(())
    }

    fn find(&self, name: &str) -> Result<Declaration, ModuleError> {
        locate(&self.text, name)?.ok_or_else(|| ModuleError::NotFound { name: name.to_string() })
    }

    fn check_aggregate_shape(&self, agg: &Declaration) -> Result<(), ModuleError> {
        if agg.kind == BodyKind::Object {
            Ok(())
        } else {
            Err(ModuleError::AggregateShape { name: agg.name.clone(), expected: "an object" })
        }
    }
}

/// Range to cut for a declaration: the declaration itself, the rest of its
/// line if that is only whitespace, and one blank line above it.
fn removal_range(text: &str, decl: &Declaration) -> (usize, usize) {
    let mut end = decl.span.end;
    let rest = &text[end..];
    let trailing = rest.len() - rest.trim_start_matches([' ', '\t']).len();
    if rest[trailing..].starts_with('\n') {
        end += trailing + 1;
    } else if rest[trailing..].starts_with("\r\n") {
        end += trailing + 2;
    }

    let mut start = decl.span.start;
    let before = &text[..start];
    if before.ends_with("\n\n") {
        start -= 1;
    } else if before.ends_with("\r\n\r\n") {
        start -= 2;
    } else if before.is_empty() && text[end..].starts_with('\n') {
        // first declaration in the file: drop the blank line below instead
        end += 1;
    }
    (start, end)
}
