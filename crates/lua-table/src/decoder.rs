//! Lua table literal decoder: reads Lua data literals back into a [`LuaValue`].
//!
//! This is a reader for data, not a Lua interpreter. It accepts:
//!
//! - An optional leading `return` (data modules)
//! - Tables with named (`k = v`), computed (`[expr] = v`) and positional fields,
//!   separated by `,` or `;`, trailing separator allowed
//! - Short strings (`"..."`, `'...'`) with the usual Lua escapes
//! - Long strings at any level (`[==[ ... ]==]`), first line break dropped
//! - Decimal, float and hexadecimal numbers, `nil`, `0/0`, `math.huge`, `-math.huge`
//! - `--` comments, short and long
//!
//! # Key design decisions
//!
//! - **Table shape**: a table whose keys are exactly `1..=n` becomes a
//!   [`LuaValue::Sequence`]; string-keyed tables become [`Mapping`]s. `{}` reads
//!   as an empty mapping. Mixing integer and string keys is rejected.
//! - **Duplicate keys**: last one wins, at the position of the first.

use crate::error::{LuaError, Result};
use crate::value::{LuaValue, Mapping, Number};

/// Decode a Lua literal (optionally prefixed with `return`).
pub fn decode(text: &str) -> Result<LuaValue> {
    let mut parser = Parser { src: text, pos: 0 };
    parser.skip_trivia()?;
    parser.eat_word("return");
    parser.skip_trivia()?;
    let value = parser.parse_value()?;
    parser.skip_trivia()?;
    if parser.pos < parser.src.len() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(value)
}

/// Key of a table field before the table shape is known.
enum TableKey {
    Int(i64),
    Str(String),
}

struct Parser<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    fn peek(&self) -> Option<u8> {
        self.src.as_bytes().get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.src.as_bytes().get(self.pos + offset).copied()
    }

    /// Build a parse error at the current position (1-based line).
    fn error(&self, message: impl Into<String>) -> LuaError {
        let line = self.src[..self.pos.min(self.src.len())]
            .bytes()
            .filter(|&b| b == b'\n')
            .count()
            + 1;
        LuaError::LuaParse {
            line,
            message: message.into(),
        }
    }

    fn expect(&mut self, byte: u8) -> Result<()> {
        self.skip_trivia()?;
        if self.peek() == Some(byte) {
            self.pos += 1;
            Ok(())
        } else {
            Err(self.error(format!("expected '{}'", byte as char)))
        }
    }

    /// Consume `word` if it appears here as a whole word.
    fn eat_word(&mut self, word: &str) -> bool {
        if !self.rest().starts_with(word) {
            return false;
        }
        let next = self.src.as_bytes().get(self.pos + word.len());
        if next.is_some_and(|&b| is_ident_byte(b)) {
            return false;
        }
        self.pos += word.len();
        true
    }

    /// Skip whitespace and comments.
    fn skip_trivia(&mut self) -> Result<()> {
        loop {
            while self.peek().is_some_and(|b| b.is_ascii_whitespace()) {
                self.pos += 1;
            }
            if !self.rest().starts_with("--") {
                return Ok(());
            }
            self.pos += 2;
            if let Some(level) = self.long_bracket_level() {
                self.read_long_bracket(level)?;
            } else {
                match self.rest().find('\n') {
                    Some(nl) => self.pos += nl + 1,
                    None => self.pos = self.src.len(),
                }
            }
        }
    }

    fn parse_value(&mut self) -> Result<LuaValue> {
        self.skip_trivia()?;
        let Some(b) = self.peek() else {
            return Err(self.error("unexpected end of input"));
        };
        match b {
            b'{' => self.parse_table(),
            b'"' | b'\'' => self.parse_short_string().map(LuaValue::String),
            b'[' => match self.long_bracket_level() {
                Some(level) => self.read_long_bracket(level).map(LuaValue::String),
                None => Err(self.error("unexpected '['")),
            },
            _ if self.rest().starts_with("0/0") => {
                self.pos += 3;
                Ok(LuaValue::Number(Number::Float(f64::NAN)))
            }
            _ if self.rest().starts_with("-math.huge") => {
                self.pos += "-math.huge".len();
                Ok(LuaValue::Number(Number::Float(f64::NEG_INFINITY)))
            }
            _ if self.rest().starts_with("math.huge") => {
                self.pos += "math.huge".len();
                Ok(LuaValue::Number(Number::Float(f64::INFINITY)))
            }
            b'-' | b'.' | b'0'..=b'9' => self.parse_number().map(LuaValue::Number),
            _ if self.eat_word("nil") => Ok(LuaValue::Absent),
            _ => Err(self.error(format!("unexpected character '{}'", b as char))),
        }
    }

    fn parse_table(&mut self) -> Result<LuaValue> {
        self.expect(b'{')?;
        let mut fields: Vec<(TableKey, LuaValue)> = Vec::new();
        let mut next_index = 1i64;
        loop {
            self.skip_trivia()?;
            if self.peek() == Some(b'}') {
                self.pos += 1;
                break;
            }
            let field = self.parse_field(&mut next_index)?;
            fields.push(field);
            self.skip_trivia()?;
            match self.peek() {
                Some(b',') | Some(b';') => self.pos += 1,
                Some(b'}') => {}
                _ => return Err(self.error("expected ',' or '}' after table field")),
            }
        }
        self.build_table(fields)
    }

    fn parse_field(&mut self, next_index: &mut i64) -> Result<(TableKey, LuaValue)> {
        // Computed key, unless '[' opens a long string used as a positional value
        if self.peek() == Some(b'[') && self.long_bracket_level().is_none() {
            self.pos += 1;
            let key = match self.parse_value()? {
                LuaValue::String(s) => TableKey::Str(s),
                LuaValue::Number(Number::Integer(i)) => TableKey::Int(i),
                LuaValue::Number(Number::Float(f)) if f.fract() == 0.0 && f.is_finite() => {
                    TableKey::Int(f as i64)
                }
                _ => return Err(self.error("unsupported table key")),
            };
            self.expect(b']')?;
            self.expect(b'=')?;
            let value = self.parse_value()?;
            return Ok((key, value));
        }

        // Named field: identifier followed by a single '='
        if self.peek().is_some_and(|b| b.is_ascii_alphabetic() || b == b'_') {
            let start = self.pos;
            while self.peek().is_some_and(is_ident_byte) {
                self.pos += 1;
            }
            let name = &self.src[start..self.pos];
            self.skip_trivia()?;
            if self.peek() == Some(b'=') && self.peek_at(1) != Some(b'=') {
                self.pos += 1;
                let value = self.parse_value()?;
                return Ok((TableKey::Str(name.to_string()), value));
            }
            self.pos = start;
        }

        let value = self.parse_value()?;
        let key = TableKey::Int(*next_index);
        *next_index += 1;
        Ok((key, value))
    }

    /// Decide between sequence and mapping once all fields are known.
    fn build_table(&self, fields: Vec<(TableKey, LuaValue)>) -> Result<LuaValue> {
        if fields.is_empty() {
            return Ok(LuaValue::Mapping(Mapping::new()));
        }
        if fields.iter().all(|(k, _)| matches!(k, TableKey::Str(_))) {
            let map = fields
                .into_iter()
                .filter_map(|(k, v)| match k {
                    TableKey::Str(s) => Some((s, v)),
                    TableKey::Int(_) => None,
                })
                .collect::<Mapping>();
            return Ok(LuaValue::Mapping(map));
        }
        if fields.iter().any(|(k, _)| matches!(k, TableKey::Str(_))) {
            return Err(self.error("table mixes integer and string keys"));
        }

        let mut indexed: Vec<(i64, LuaValue)> = fields
            .into_iter()
            .filter_map(|(k, v)| match k {
                TableKey::Int(i) => Some((i, v)),
                TableKey::Str(_) => None,
            })
            .collect();
        // Stable sort: for a repeated index the later field ends up last and wins.
        indexed.sort_by_key(|(i, _)| *i);
        let mut items: Vec<LuaValue> = Vec::with_capacity(indexed.len());
        for (i, v) in indexed {
            let expected = items.len() as i64 + 1;
            if i == expected {
                items.push(v);
            } else if i == expected - 1 {
                if let Some(last) = items.last_mut() {
                    *last = v;
                }
            } else {
                return Err(self.error(format!("sequence index {i} is not contiguous")));
            }
        }
        Ok(LuaValue::Sequence(items))
    }

    /// If a long bracket opener starts here, return its level.
    fn long_bracket_level(&self) -> Option<usize> {
        let bytes = self.rest().as_bytes();
        if bytes.first() != Some(&b'[') {
            return None;
        }
        let level = bytes[1..].iter().take_while(|&&b| b == b'=').count();
        (bytes.get(1 + level) == Some(&b'[')).then_some(level)
    }

    /// Read a long bracket body, dropping one leading line break like Lua does.
    fn read_long_bracket(&mut self, level: usize) -> Result<String> {
        self.pos += level + 2;
        let rest = self.rest();
        let skip = if rest.starts_with("\r\n") || rest.starts_with("\n\r") {
            2
        } else if rest.starts_with(['\n', '\r']) {
            1
        } else {
            0
        };
        self.pos += skip;
        let close = format!("]{}]", "=".repeat(level));
        match self.rest().find(&close) {
            Some(end) => {
                let content = self.rest()[..end].to_string();
                self.pos += end + close.len();
                Ok(content)
            }
            None => Err(self.error("unfinished long string")),
        }
    }

    fn parse_short_string(&mut self) -> Result<String> {
        let quote = self.rest().chars().next().unwrap_or('"');
        self.pos += 1;
        let mut out = String::new();
        let mut chars = self.rest().char_indices();
        while let Some((i, ch)) = chars.next() {
            match ch {
                c if c == quote => {
                    self.pos += i + 1;
                    return Ok(out);
                }
                '\n' | '\r' => break,
                '\\' => {
                    let Some((_, esc)) = chars.next() else { break };
                    match esc {
                        'n' => out.push('\n'),
                        't' => out.push('\t'),
                        'r' => out.push('\r'),
                        'a' => out.push('\u{07}'),
                        'b' => out.push('\u{08}'),
                        'f' => out.push('\u{0C}'),
                        'v' => out.push('\u{0B}'),
                        '\\' | '"' | '\'' | '\n' => out.push(esc),
                        'x' => {
                            let hex: String = chars.by_ref().take(2).map(|(_, c)| c).collect();
                            let code = u8::from_str_radix(&hex, 16)
                                .map_err(|_| self.error("invalid \\x escape"))?;
                            out.push(char::from(code));
                        }
                        d if d.is_ascii_digit() => {
                            let mut code = d.to_digit(10).unwrap_or(0);
                            for _ in 0..2 {
                                match chars.clone().next() {
                                    Some((_, c)) if c.is_ascii_digit() => {
                                        code = code * 10 + c.to_digit(10).unwrap_or(0);
                                        chars.next();
                                    }
                                    _ => break,
                                }
                            }
                            let byte = u8::try_from(code)
                                .map_err(|_| self.error("decimal escape too large"))?;
                            out.push(char::from(byte));
                        }
                        other => {
                            return Err(self.error(format!("invalid escape '\\{other}'")));
                        }
                    }
                }
                c => out.push(c),
            }
        }
        Err(self.error("unfinished string"))
    }

    fn parse_number(&mut self) -> Result<Number> {
        let start = self.pos;
        let negative = self.peek() == Some(b'-');
        if negative {
            self.pos += 1;
        }
        let body_start = self.pos;
        let hex = self.rest().starts_with("0x") || self.rest().starts_with("0X");
        if hex {
            self.pos += 2;
        }
        while let Some(b) = self.peek() {
            let exponent_sign = !hex
                && (b == b'+' || b == b'-')
                && matches!(self.src.as_bytes()[self.pos - 1], b'e' | b'E');
            if b.is_ascii_alphanumeric() || b == b'.' || exponent_sign {
                self.pos += 1;
            } else {
                break;
            }
        }
        let body = &self.src[body_start..self.pos];
        let text = &self.src[start..self.pos];

        if hex {
            let digits = &body[2..];
            return i64::from_str_radix(digits, 16)
                .map(|n| Number::Integer(if negative { -n } else { n }))
                .map_err(|_| self.error(format!("invalid hex number '{text}'")));
        }
        if !body.contains(['.', 'e', 'E']) {
            if let Ok(i) = text.parse::<i64>() {
                return Ok(Number::Integer(i));
            }
        }
        text.parse::<f64>()
            .map(Number::Float)
            .map_err(|_| self.error(format!("invalid number '{text}'")))
    }
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
