//! Aggregate declaration member lists
//!
//! The aggregate is the one export whose body lists the other declarations,
//! e.g. `export const BERNOVA_STYLES = { BUTTON, CARD };`. These helpers edit
//! that body in place, keeping existing entries verbatim.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static DOUBLED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",(?:\s*,)+").expect("doubled separator pattern is valid"));
static AFTER_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([\{\[])\s*,").expect("leading separator pattern is valid"));
static BEFORE_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r",(\s*[\}\]])").expect("trailing separator pattern is valid"));

/// One top-level entry of a member list, as a range into the body.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    range: Range<usize>,
}

/// Split the inside of `{ ... }` into trimmed, non-empty entry ranges
/// (relative to the full body, braces included).
fn entries(body: &str) -> Vec<Entry> {
    let bytes = body.as_bytes();
    if bytes.len() < 2 {
        return Vec::new();
    }
    let inner = 1..bytes.len() - 1;

    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut start = inner.start;
    let mut i = inner.start;

    let mut push = |from: usize, to: usize| {
        let slice = &body[from..to];
        let lead = slice.len() - slice.trim_start().len();
        let trimmed = slice.trim();
        if !trimmed.is_empty() {
            out.push(Entry { range: from + lead..from + lead + trimmed.len() });
        }
    };

    while i < inner.end {
        let b = bytes[i];
        if let Some(q) = quote {
            if b == b'\\' {
                i += 1;
            } else if b == q {
                quote = None;
            }
        } else {
            match b {
                b'\'' | b'"' | b'`' => quote = Some(b),
                b'{' | b'[' | b'(' => depth += 1,
                b'}' | b']' | b')' => depth = depth.saturating_sub(1),
                b',' if depth == 0 => {
                    push(start, i);
                    start = i + 1;
                }
                _ => {}
            }
        }
        i += 1;
    }
    push(start, inner.end);
    out
}

/// Name an entry binds in the aggregate: `NAME`, or `NAME` in `NAME: value`.
/// Spreads and computed keys have no name.
fn entry_name(entry: &str) -> Option<&str> {
    let key = match entry.split_once(':') {
        Some((key, _)) => key.trim(),
        None => entry.trim(),
    };
    let key = key.trim_matches(|c| c == '"' || c == '\'');
    if key.starts_with("...") || key.is_empty() {
        None
    } else {
        Some(key)
    }
}

/// Member names of an aggregate body, in order.
pub fn member_names(body: &str) -> Vec<String> {
    entries(body)
        .iter()
        .filter_map(|e| entry_name(&body[e.range.clone()]))
        .map(str::to_string)
        .collect()
}

/// Append `name` to the member list unless it is already present.
pub fn append_member(body: &str, name: &str) -> String {
    let list = entries(body);
    if list.iter().any(|e| entry_name(&body[e.range.clone()]) == Some(name)) {
        return body.to_string();
    }

    let Some(last) = list.last() else {
        let open = body.get(..1).unwrap_or("{");
        let close = body.get(body.len().saturating_sub(1)..).unwrap_or("}");
        return format!("{}\n  {}\n{}", open, name, close);
    };

    let separator = if body.contains('\n') { ",\n  " } else { ", " };
    let mut out = String::with_capacity(body.len() + name.len() + separator.len());
    out.push_str(&body[..last.range.end]);
    out.push_str(separator);
    out.push_str(name);
    out.push_str(&body[last.range.end..]);
    normalize_separators(&out)
}

/// Remove the entry binding `name`. Returns `None` if it is not a member.
pub fn remove_member(body: &str, name: &str) -> Option<String> {
    let list = entries(body);
    let target = list.iter().find(|e| entry_name(&body[e.range.clone()]) == Some(name))?;
    let cut = removal_range(body, &target.range);

    let mut out = String::with_capacity(body.len());
    out.push_str(&body[..cut.start]);
    out.push_str(&body[cut.end..]);
    let out = normalize_separators(&out);

    if entries(&out).is_empty() {
        let open = out.get(..1).unwrap_or("{");
        let close = out.get(out.len().saturating_sub(1)..).unwrap_or("}");
        return Some(format!("{}{}", open, close));
    }
    Some(out)
}

/// Span to cut for an entry. An entry alone on its line takes the whole
/// line with it; an inline entry takes one adjacent separator.
fn removal_range(body: &str, entry: &Range<usize>) -> Range<usize> {
    let is_blank = |c: char| c == ' ' || c == '\t';

    let after = &body[entry.end..];
    let mut tail = after.len() - after.trim_start_matches(is_blank).len();
    let has_comma = after[tail..].starts_with(',');
    if has_comma {
        tail += 1;
        tail += after[tail..].len() - after[tail..].trim_start_matches(is_blank).len();
    }
    let line_end = after[tail..].starts_with('\n') || after[tail..].starts_with("\r\n");

    let before = &body[..entry.start];
    let lead = before.trim_end_matches(is_blank);
    if line_end && lead.ends_with('\n') {
        let start = lead.len() - 1;
        let start = if lead[..start].ends_with('\r') { start - 1 } else { start };
        return start..entry.end + tail;
    }

    if has_comma {
        return entry.start..entry.end + tail;
    }
    let lead = before.trim_end();
    match lead.strip_suffix(',') {
        Some(rest) => rest.len()..entry.end,
        None => entry.clone(),
    }
}

/// Collapse doubled separators and drop separators directly after an
/// opening or before a closing delimiter. Idempotent.
pub fn normalize_separators(text: &str) -> String {
    let text = DOUBLED.replace_all(text, ",");
    let text = AFTER_OPEN.replace_all(&text, "$1");
    BEFORE_CLOSE.replace_all(&text, "$1").into_owned()
}
