//! Top-level declaration scanner for generated modules
//!
//! Finds `export const NAME = { ... };` (or `[ ... ]`) declarations at the top
//! level of a TypeScript/JavaScript module. Delimiters are matched with a real
//! stack, skipping string literals and comments, so a body that happens to
//! contain `};` inside a string never truncates the match.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;
use thiserror::Error;

/// `export const NAME` with an optional type annotation, up to the `=` and
/// any whitespace before the body.
static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^export\s+const\s+([A-Za-z_$][A-Za-z0-9_$]*)\s*(?::[^=;{}]*)?=\s*")
        .expect("declaration header pattern is valid")
});

/// Optional `as const` and `;` after a body, on the same line.
static TERMINATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*(?:as[ \t]+const[ \t]*)?;?").expect("terminator pattern is valid")
});

/// Scan failure. Reported instead of guessing at a truncated match.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ScanError {
    /// A closing delimiter with no matching opener
    #[error("unexpected '{found}' at line {line}")]
    Unexpected { found: char, line: usize },
    /// A closing delimiter that does not match the innermost opener
    #[error("mismatched '{found}' at line {line} (expected '{expected}')")]
    Mismatched { found: char, expected: char, line: usize },
    /// An opener that is never closed
    #[error("unclosed '{open}' opened at line {line}")]
    Unclosed { open: char, line: usize },
    /// String literal or block comment that runs off the end of the line/document
    #[error("unterminated {what} starting at line {line}")]
    Unterminated { what: &'static str, line: usize },
}

/// Delimiter kind of a declaration body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// `{ ... }`
    Object,
    /// `[ ... ]`
    Array,
}

/// A located top-level declaration.
///
/// Offsets are byte offsets into the scanned text. `span` covers
/// `export` through the optional `;`, `body` covers the braces themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub span: Range<usize>,
    pub body: Range<usize>,
    pub kind: BodyKind,
}

impl Declaration {
    /// The full declaration source
    pub fn source<'a>(&self, text: &'a str) -> &'a str {
        &text[self.span.clone()]
    }

    /// The body source, delimiters included
    pub fn body_source<'a>(&self, text: &'a str) -> &'a str {
        &text[self.body.clone()]
    }
}

struct Pending {
    name: String,
    start: usize,
}

/// Scan a module and return every braced top-level declaration in order.
pub fn scan(text: &str) -> Result<Vec<Declaration>, ScanError> {
    let bytes = text.as_bytes();
    let mut declarations = Vec::new();
    let mut stack: Vec<(u8, usize)> = Vec::new();
    let mut pending: Option<Pending> = None;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'/' if bytes.get(i + 1) == Some(&b'/') => {
                i = skip_line_comment(bytes, i);
                continue;
            }
            b'/' if bytes.get(i + 1) == Some(&b'*') => {
                i = skip_block_comment(text, i)?;
                continue;
            }
            quote @ (b'\'' | b'"' | b'`') => {
                i = skip_string(text, i, quote)?;
                continue;
            }
            open @ (b'{' | b'[' | b'(') => stack.push((open, i)),
            close @ (b'}' | b']' | b')') => {
                let Some((open, at)) = stack.pop() else {
                    return Err(ScanError::Unexpected {
                        found: close as char,
                        line: line_of(text, i),
                    });
                };
                let expected = closing_for(open);
                if close != expected {
                    return Err(ScanError::Mismatched {
                        found: close as char,
                        expected: expected as char,
                        line: line_of(text, i),
                    });
                }
                if stack.is_empty() {
                    if let Some(p) = pending.take() {
                        let body_end = i + 1;
                        let end = body_end
                            + TERMINATOR.find(&text[body_end..]).map_or(0, |m| m.end());
                        let kind = if open == b'[' { BodyKind::Array } else { BodyKind::Object };
                        declarations.push(Declaration {
                            name: p.name,
                            span: p.start..end,
                            body: at..body_end,
                            kind,
                        });
                        i = end;
                        continue;
                    }
                }
            }
            b'e' if stack.is_empty() && pending.is_none() && is_word_start(bytes, i) => {
                if let Some(caps) = HEADER.captures(&text[i..]) {
                    let header_end = i + caps[0].len();
                    if matches!(bytes.get(header_end), Some(b'{') | Some(b'[')) {
                        pending = Some(Pending { name: caps[1].to_string(), start: i });
                    }
                    i = header_end;
                    continue;
                }
            }
            _ => {}
        }
        i += 1;
    }

    if let Some(&(open, at)) = stack.last() {
        return Err(ScanError::Unclosed { open: open as char, line: line_of(text, at) });
    }

    Ok(declarations)
}

/// Locate a named top-level declaration.
pub fn locate(text: &str, name: &str) -> Result<Option<Declaration>, ScanError> {
    Ok(scan(text)?.into_iter().find(|d| d.name == name))
}

/// Names of all top-level declarations in document order, except `exclude`
/// (the aggregate).
pub fn declaration_names(text: &str, exclude: &str) -> Result<Vec<String>, ScanError> {
    Ok(scan(text)?.into_iter().map(|d| d.name).filter(|n| n != exclude).collect())
}

fn closing_for(open: u8) -> u8 {
    match open {
        b'{' => b'}',
        b'[' => b']',
        _ => b')',
    }
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

fn is_word_start(bytes: &[u8], i: usize) -> bool {
    i == 0 || !is_ident_byte(bytes[i - 1])
}

fn skip_line_comment(bytes: &[u8], start: usize) -> usize {
    bytes[start..].iter().position(|&b| b == b'\n').map_or(bytes.len(), |p| start + p)
}

fn skip_block_comment(text: &str, start: usize) -> Result<usize, ScanError> {
    text[start + 2..]
        .find("*/")
        .map(|p| start + 2 + p + 2)
        .ok_or(ScanError::Unterminated { what: "comment", line: line_of(text, start) })
}

/// Skip a string literal starting at `start`, returning the offset after
/// its closing quote. Template literals may span lines; the others may not.
fn skip_string(text: &str, start: usize, quote: u8) -> Result<usize, ScanError> {
    let bytes = text.as_bytes();
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' if quote != b'`' => break,
            b if b == quote => return Ok(i + 1),
            _ => i += 1,
        }
    }
    Err(ScanError::Unterminated { what: "string", line: line_of(text, start) })
}

/// 1-indexed line number of a byte offset
pub(crate) fn line_of(text: &str, offset: usize) -> usize {
    text.as_bytes()[..offset.min(text.len())].iter().filter(|&&b| b == b'\n').count() + 1
}
