//! Lua table literal encoder: converts a [`LuaValue`] tree into Lua source text.
//!
//! Layout rules:
//!
//! - **Mappings**: `{\n  key = value,\n  other = value\n}`, one entry per line,
//!   entries one indent deeper than the enclosing brace, absent values skipped
//! - **Sequences**: `{\n  [1] = a,\n  [2] = b\n}` with explicit 1-based indices
//! - **Keys**: bare when they are Lua identifiers, `["computed"]` otherwise
//! - **Strings**: never escaped; wrapped in `"..."` or the lowest safe long bracket
//! - **Numbers**: integers in decimal, floats always carry a `.` or exponent
//!
//! # Example
//! ```
//! use lua_table::{serialize, LuaValue};
//! let value = LuaValue::Sequence(vec![1.into(), 2.into()]);
//! assert_eq!(serialize(&value, 0).unwrap(), "{\n  [1] = 1,\n  [2] = 2\n}");
//! ```

use crate::error::{LuaError, Result};
use crate::value::{LuaValue, Mapping, Number};

/// One indentation unit.
pub const INDENT: &str = "  ";

/// Highest long bracket level tried before giving up (`[=========[`).
pub const MAX_LEVEL: usize = 9;

/// Words that cannot be used as bare field names.
const LUA_KEYWORDS: &[&str] = &[
    "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "goto", "if",
    "in", "local", "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
];

/// Serialize a value as a Lua literal. `indent_level` is the nesting depth of the
/// value itself: its closing brace is indented by that many [`INDENT`] units.
///
/// Fails only with [`LuaError::DelimiterExhausted`], which aborts the whole tree.
pub fn serialize(value: &LuaValue, indent_level: usize) -> Result<String> {
    let mut out = String::new();
    write_value(value, indent_level, &mut out)?;
    Ok(out)
}

/// Render a loadable data module: `return <literal>` followed by a newline.
pub fn to_module(value: &LuaValue) -> Result<String> {
    let mut out = String::from("return ");
    write_value(value, 0, &mut out)?;
    out.push('\n');
    Ok(out)
}

/// Encode a JSON document as a Lua literal (see [`LuaValue::from_json`] for the mapping).
pub fn encode(json: &str) -> Result<String> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    serialize(&LuaValue::from_json(value), 0)
}

/// Type dispatch. Every variant is handled; there is no stringify fallback here.
fn write_value(value: &LuaValue, level: usize, out: &mut String) -> Result<()> {
    match value {
        LuaValue::Absent => out.push_str("nil"),
        LuaValue::String(s) => write_string(s, out)?,
        LuaValue::Number(n) => out.push_str(&format_number(*n)),
        LuaValue::Mapping(map) => write_mapping(map, level, out)?,
        LuaValue::Sequence(items) => write_sequence(items, level, out)?,
    }
    Ok(())
}

/// Emit `key = value` lines for every present entry. A mapping with nothing to
/// emit collapses to `{}`.
fn write_mapping(map: &Mapping, level: usize, out: &mut String) -> Result<()> {
    let mut entries = Vec::with_capacity(map.len());
    for (key, value) in map.iter().filter(|(_, v)| !v.is_absent()) {
        let mut entry = encode_key(key)?;
        entry.push_str(" = ");
        write_value(value, level + 1, &mut entry)?;
        entries.push(entry);
    }
    write_table_body(&entries, level, out);
    Ok(())
}

/// Emit `[i] = value` lines. Absent items stay as `nil` so later indices don't shift.
fn write_sequence(items: &[LuaValue], level: usize, out: &mut String) -> Result<()> {
    let mut entries = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let mut entry = format!("[{}] = ", i + 1);
        write_value(item, level + 1, &mut entry)?;
        entries.push(entry);
    }
    write_table_body(&entries, level, out);
    Ok(())
}

/// Wrap pre-rendered entries in braces. Only the first line of each entry is
/// indented here; nested tables already indented their own lines and string
/// content must never be touched.
fn write_table_body(entries: &[String], level: usize, out: &mut String) {
    if entries.is_empty() {
        out.push_str("{}");
        return;
    }
    let entry_indent = make_indent(level + 1);
    out.push_str("{\n");
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            out.push_str(",\n");
        }
        out.push_str(&entry_indent);
        out.push_str(entry);
    }
    out.push('\n');
    out.push_str(&make_indent(level));
    out.push('}');
}

/// Bare identifier when possible, computed key otherwise. A computed key whose
/// literal is a long bracket gets inner spaces: `[[[x]]]` would lex as a long string.
fn encode_key(key: &str) -> Result<String> {
    if is_bare_key(key) {
        return Ok(key.to_string());
    }
    tracing::warn!(key, "strange key, emitting as computed key");
    let mut literal = String::new();
    write_string(key, &mut literal)?;
    if literal.starts_with('[') {
        Ok(format!("[ {literal} ]"))
    } else {
        Ok(format!("[{literal}]"))
    }
}

/// Test if a key can be emitted bare: `^[A-Za-z_][A-Za-z0-9_]*$` and not a keyword.
fn is_bare_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_') && !LUA_KEYWORDS.contains(&key)
}

/// A delimiter pair for a string literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    /// `"..."`
    Quote,
    /// `[` + N `=` + `[` ... `]` + N `=` + `]`
    LongBracket(usize),
}

impl Delimiter {
    pub fn open(self) -> String {
        match self {
            Delimiter::Quote => "\"".to_string(),
            Delimiter::LongBracket(level) => format!("[{}[", "=".repeat(level)),
        }
    }

    pub fn close(self) -> String {
        match self {
            Delimiter::Quote => "\"".to_string(),
            Delimiter::LongBracket(level) => format!("]{}]", "=".repeat(level)),
        }
    }
}

/// Pick the delimiter pair for `s`.
///
/// A quoted string is only safe when nothing in it would be read as a terminator,
/// a line break or an escape: besides `"` and `\n`, a `\r` or `\` also rules out
/// quotes (`a\b` is written `[[a\b]]`) because quoted content is never escaped
/// and Lua would otherwise reinterpret it. Otherwise levels `0..=MAX_LEVEL` are tried in order,
/// skipping any whose opener or closer appears in the content. The closer is
/// searched in `s + closer` so content ending in `]` or `]=` cannot fuse with it.
pub fn select_delimiter(s: &str) -> Result<Delimiter> {
    if !s.contains(['"', '\n', '\r', '\\']) {
        return Ok(Delimiter::Quote);
    }
    for level in 0..=MAX_LEVEL {
        let delim = Delimiter::LongBracket(level);
        let open = delim.open();
        let close = delim.close();
        if s.contains(&open) {
            continue;
        }
        let terminated = format!("{s}{close}");
        if terminated.find(&close) == Some(s.len()) {
            return Ok(delim);
        }
    }
    Err(LuaError::DelimiterExhausted {
        preview: s.chars().take(40).collect(),
    })
}

/// Emit `open + content + close`. Lua skips a line break right after a long
/// bracket opener, so content starting with one gets a sacrificial copy of it.
/// Repeating the same character keeps `\n\r` / `\r\n` from pairing up.
fn write_string(s: &str, out: &mut String) -> Result<()> {
    let delim = select_delimiter(s)?;
    out.push_str(&delim.open());
    if matches!(delim, Delimiter::LongBracket(_)) {
        if let Some(first @ ('\n' | '\r')) = s.chars().next() {
            out.push(first);
        }
    }
    out.push_str(s);
    out.push_str(&delim.close());
    Ok(())
}

/// Format a number so Lua reads back the same kind:
/// - Integers in plain decimal
/// - Finite floats in shortest roundtrip form, always with `.` or an exponent
/// - NaN and infinities as expressions, Lua has no literal for them
fn format_number(n: Number) -> String {
    match n {
        Number::Integer(i) => i.to_string(),
        Number::Float(f) if f.is_nan() => "0/0".to_string(),
        Number::Float(f) if f.is_infinite() => {
            if f > 0.0 {
                "math.huge".to_string()
            } else {
                "-math.huge".to_string()
            }
        }
        Number::Float(f) => format!("{f:?}"),
    }
}

/// Generate a 2-space-per-level indentation string.
fn make_indent(depth: usize) -> String {
    INDENT.repeat(depth)
}
