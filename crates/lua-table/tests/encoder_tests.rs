/// Encoder contract tests for Lua table literals.
///
/// Covers delimiter selection, number formatting, mapping/sequence layout,
/// key emission and the JSON entry point.
use std::io;
use std::sync::{Arc, Mutex};

use lua_table::{
    encode, select_delimiter, serialize, to_module, Delimiter, LuaError, LuaValue, Mapping,
};
use tracing_subscriber::fmt::MakeWriter;

fn map(entries: Vec<(&str, LuaValue)>) -> LuaValue {
    LuaValue::Mapping(entries.into_iter().collect())
}

fn ser(value: LuaValue) -> String {
    serialize(&value, 0).unwrap()
}

/// A string carrying every long bracket opener and closer from level 0 to 9.
fn every_bracket() -> String {
    let mut s = String::from("\"");
    for n in 0..=9 {
        let eq = "=".repeat(n);
        s.push_str(&format!("[{eq}[ ]{eq}] "));
    }
    s
}

// ============================================================================
// Strings
// ============================================================================

#[test]
fn encode_plain_string_uses_quotes() {
    assert_eq!(ser("hello".into()), r#""hello""#);
}

#[test]
fn encode_empty_string() {
    assert_eq!(ser("".into()), r#""""#);
}

#[test]
fn encode_string_with_brackets_but_no_quote_uses_quotes() {
    assert_eq!(ser("a[[b]]c".into()), r#""a[[b]]c""#);
}

#[test]
fn encode_string_with_quote_uses_long_bracket() {
    assert_eq!(ser(r#"say "hi""#.into()), r#"[[say "hi"]]"#);
}

#[test]
fn encode_string_with_newline_uses_long_bracket() {
    assert_eq!(ser("line1\nline2".into()), "[[line1\nline2]]");
}

#[test]
fn encode_string_with_backslash_uses_long_bracket() {
    assert_eq!(ser(r"path\to".into()), r"[[path\to]]");
}

#[test]
fn encode_string_with_level_zero_brackets_escalates() {
    let s = r#"a "quote" and [[nested]] text"#;
    assert_eq!(ser(s.into()), format!("[=[{s}]=]"));
}

#[test]
fn encode_string_with_level_zero_and_one_escalates_to_two() {
    let s = "x\n[[a]] [=[b]=]";
    assert_eq!(ser(s.into()), format!("[==[{s}]==]"));
}

#[test]
fn encode_string_ending_in_bracket_skips_fusing_closer() {
    // `[[a"]]]` would close one character early
    assert_eq!(ser(r#"a"]"#.into()), r#"[=[a"]]=]"#);
}

#[test]
fn encode_string_starting_with_newline_keeps_it() {
    assert_eq!(ser("\nbody".into()), "[[\n\nbody]]");
}

#[test]
fn encode_string_exhausting_every_level_fails() {
    let err = serialize(&LuaValue::String(every_bracket()), 0).unwrap_err();
    assert!(matches!(err, LuaError::DelimiterExhausted { .. }));
}

#[test]
fn exhausted_string_nested_in_table_aborts_whole_tree() {
    let value = map(vec![
        ("ok", "fine".into()),
        ("bad", LuaValue::String(every_bracket())),
    ]);
    assert!(serialize(&value, 0).is_err());
}

#[test]
fn string_content_is_never_escaped() {
    let s = "tab\there \"q\" \\ end";
    let out = ser(s.into());
    assert!(out.contains(s), "content must appear verbatim: {out}");
}

// ============================================================================
// Delimiter selection
// ============================================================================

#[test]
fn select_delimiter_levels() {
    assert_eq!(select_delimiter("abc").unwrap(), Delimiter::Quote);
    assert_eq!(select_delimiter("a\"b").unwrap(), Delimiter::LongBracket(0));
    assert_eq!(
        select_delimiter("a\"]]b").unwrap(),
        Delimiter::LongBracket(1)
    );
}

#[test]
fn delimiter_open_and_close() {
    assert_eq!(Delimiter::Quote.open(), "\"");
    assert_eq!(Delimiter::LongBracket(0).open(), "[[");
    assert_eq!(Delimiter::LongBracket(2).open(), "[==[");
    assert_eq!(Delimiter::LongBracket(2).close(), "]==]");
}

#[test]
fn opener_inside_string_skips_level() {
    // The level 0 closer is absent but the opener is present
    assert_eq!(
        select_delimiter("\"[[ only opener").unwrap(),
        Delimiter::LongBracket(1)
    );
}

// ============================================================================
// Numbers
// ============================================================================

#[test]
fn encode_integer() {
    assert_eq!(ser(42.into()), "42");
}

#[test]
fn encode_negative_integer() {
    assert_eq!(ser((-7).into()), "-7");
}

#[test]
fn encode_float() {
    assert_eq!(ser(2.5.into()), "2.5");
}

#[test]
fn encode_whole_float_keeps_decimal_point() {
    assert_eq!(ser(1.0.into()), "1.0");
}

#[test]
fn encode_nan_and_infinities() {
    assert_eq!(ser(f64::NAN.into()), "0/0");
    assert_eq!(ser(f64::INFINITY.into()), "math.huge");
    assert_eq!(ser(f64::NEG_INFINITY.into()), "-math.huge");
}

// ============================================================================
// Mappings
// ============================================================================

#[test]
fn encode_single_entry_mapping() {
    assert_eq!(ser(map(vec![("b", "test".into())])), "{\n  b = \"test\"\n}");
}

#[test]
fn encode_mapping_preserves_insertion_order() {
    let value = map(vec![("z", 1.into()), ("a", 2.into()), ("m", 3.into())]);
    assert_eq!(ser(value), "{\n  z = 1,\n  a = 2,\n  m = 3\n}");
}

#[test]
fn encode_nested_mapping() {
    let value = map(vec![("a", map(vec![("b", 1.into())]))]);
    assert_eq!(ser(value), "{\n  a = {\n    b = 1\n  }\n}");
}

#[test]
fn encode_absent_value_omits_key() {
    let value = map(vec![("a", 1.into()), ("gone", LuaValue::Absent)]);
    let out = ser(value);
    assert_eq!(out, "{\n  a = 1\n}");
    assert!(!out.contains("gone"));
}

#[test]
fn encode_mapping_with_only_absent_values() {
    assert_eq!(ser(map(vec![("x", LuaValue::Absent)])), "{}");
}

#[test]
fn encode_empty_mapping() {
    assert_eq!(ser(LuaValue::Mapping(Mapping::new())), "{}");
}

#[test]
fn encode_at_deeper_indent_level() {
    let value = map(vec![("b", "test".into())]);
    assert_eq!(serialize(&value, 1).unwrap(), "{\n    b = \"test\"\n  }");
}

#[test]
fn multiline_string_inside_table_is_not_indented() {
    let value = map(vec![("d", "line1\nline2".into())]);
    assert_eq!(ser(value), "{\n  d = [[line1\nline2]]\n}");
}

// ============================================================================
// Keys
// ============================================================================

/// In-memory sink for formatted log lines.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Serialize with a subscriber installed for this thread and return what it logged.
fn ser_with_logs(value: LuaValue) -> (String, String) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();
    let lua = tracing::subscriber::with_default(subscriber, || serialize(&value, 0).unwrap());
    (lua, logs.contents())
}

#[test]
fn non_identifier_key_is_logged_as_strange() {
    let (lua, logs) = ser_with_logs(map(vec![("1foo", 1.into())]));
    assert_eq!(lua, "{\n  [\"1foo\"] = 1\n}");
    assert!(logs.contains("WARN"), "{logs}");
    assert!(logs.contains("strange key"), "{logs}");
    assert!(logs.contains("1foo"), "{logs}");
}

#[test]
fn identifier_key_is_not_logged() {
    let (lua, logs) = ser_with_logs(map(vec![("_on_started", 1.into())]));
    assert_eq!(lua, "{\n  _on_started = 1\n}");
    assert!(!logs.contains("strange key"), "{logs}");
}

#[test]
fn every_strange_key_is_logged_once() {
    let (_, logs) = ser_with_logs(map(vec![
        ("ok", 1.into()),
        ("two words", 2.into()),
        ("end", 3.into()),
    ]));
    assert_eq!(logs.matches("strange key").count(), 2, "{logs}");
}

#[test]
fn encode_non_identifier_key_as_computed() {
    assert_eq!(ser(map(vec![("1foo", 1.into())])), "{\n  [\"1foo\"] = 1\n}");
}

#[test]
fn encode_key_with_space_as_computed() {
    assert_eq!(
        ser(map(vec![("two words", 1.into())])),
        "{\n  [\"two words\"] = 1\n}"
    );
}

#[test]
fn encode_keyword_key_as_computed() {
    assert_eq!(ser(map(vec![("end", 1.into())])), "{\n  [\"end\"] = 1\n}");
}

#[test]
fn encode_long_bracket_key_with_spacing() {
    assert_eq!(
        ser(map(vec![("a\"b", 1.into())])),
        "{\n  [ [[a\"b]] ] = 1\n}"
    );
}

#[test]
fn encode_underscore_identifier_key_is_bare() {
    assert_eq!(
        ser(map(vec![("_on_started", 1.into())])),
        "{\n  _on_started = 1\n}"
    );
}

// ============================================================================
// Sequences
// ============================================================================

#[test]
fn encode_sequence() {
    let value = LuaValue::Sequence(vec![1.into(), 2.into()]);
    assert_eq!(ser(value), "{\n  [1] = 1,\n  [2] = 2\n}");
}

#[test]
fn encode_empty_sequence() {
    assert_eq!(ser(LuaValue::Sequence(vec![])), "{}");
}

#[test]
fn encode_sequence_of_mappings() {
    let value = LuaValue::Sequence(vec![map(vec![("a", 1.into())])]);
    assert_eq!(ser(value), "{\n  [1] = {\n    a = 1\n  }\n}");
}

#[test]
fn encode_absent_sequence_slot_as_nil() {
    let value = LuaValue::Sequence(vec![1.into(), LuaValue::Absent, 3.into()]);
    assert_eq!(ser(value), "{\n  [1] = 1,\n  [2] = nil,\n  [3] = 3\n}");
}

// ============================================================================
// Entry points
// ============================================================================

#[test]
fn to_module_prefixes_return() {
    let value = map(vec![("b", "test".into())]);
    assert_eq!(to_module(&value).unwrap(), "return {\n  b = \"test\"\n}\n");
}

#[test]
fn encode_json_document() {
    let json = r#"{"name":"Alice","tags":["a","b"],"x":null,"ok":true}"#;
    assert_eq!(
        encode(json).unwrap(),
        "{\n  name = \"Alice\",\n  tags = {\n    [1] = \"a\",\n    [2] = \"b\"\n  },\n  ok = \"true\"\n}"
    );
}

#[test]
fn encode_invalid_json_fails() {
    assert!(matches!(
        encode("{not json").unwrap_err(),
        LuaError::JsonParse(_)
    ));
}

#[test]
fn absent_at_top_level_is_nil() {
    assert_eq!(ser(LuaValue::Absent), "nil");
}
