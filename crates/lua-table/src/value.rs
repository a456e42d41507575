//! Value tree consumed by the serializer and produced by the decoder.
//!
//! Mirrors the shapes a Lua data table can take, with one extra variant:
//! [`LuaValue::Absent`] marks a mapping entry that must be left out of the
//! output entirely (the "omit null fields" case). Mappings use
//! `Vec<(String, LuaValue)>` to keep insertion order without pulling in `IndexMap`.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// A Lua number. Integers and floats stay distinct so `1` and `1.0` survive a roundtrip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
}

/// A node in the tree handed to [`crate::serialize`].
#[derive(Debug, Clone, PartialEq)]
pub enum LuaValue {
    /// Omit this entry. Written as `nil` where a position must be kept.
    Absent,
    String(String),
    Number(Number),
    Mapping(Mapping),
    /// Emitted with explicit 1-based indices.
    Sequence(Vec<LuaValue>),
}

/// String-keyed table with unique keys in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    entries: Vec<(String, LuaValue)>,
}

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. A replaced key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<LuaValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&LuaValue> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut LuaValue> {
        self.entries
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LuaValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<K: Into<String>, V: Into<LuaValue>> Extend<(K, V)> for Mapping {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K: Into<String>, V: Into<LuaValue>> FromIterator<(K, V)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Mapping::new();
        map.extend(iter);
        map
    }
}

impl IntoIterator for Mapping {
    type Item = (String, LuaValue);
    type IntoIter = std::vec::IntoIter<(String, LuaValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl LuaValue {
    /// Convert a JSON tree. `null` becomes [`LuaValue::Absent`]; booleans have no
    /// counterpart and fall back to their text form.
    pub fn from_json(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => LuaValue::Absent,
            Value::Bool(b) => LuaValue::String(b.to_string()),
            Value::Number(n) => match n.as_i64() {
                Some(i) => LuaValue::Number(Number::Integer(i)),
                None => LuaValue::Number(Number::Float(n.as_f64().unwrap_or(f64::NAN))),
            },
            Value::String(s) => LuaValue::String(s),
            Value::Array(arr) => {
                LuaValue::Sequence(arr.into_iter().map(LuaValue::from_json).collect())
            }
            Value::Object(map) => LuaValue::Mapping(
                map.into_iter()
                    .map(|(k, v)| (k, LuaValue::from_json(v)))
                    .collect(),
            ),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, LuaValue::Absent)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            LuaValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            LuaValue::Mapping(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[LuaValue]> {
        match self {
            LuaValue::Sequence(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for LuaValue {
    fn from(s: &str) -> Self {
        LuaValue::String(s.to_string())
    }
}

impl From<String> for LuaValue {
    fn from(s: String) -> Self {
        LuaValue::String(s)
    }
}

impl From<i64> for LuaValue {
    fn from(n: i64) -> Self {
        LuaValue::Number(Number::Integer(n))
    }
}

impl From<i32> for LuaValue {
    fn from(n: i32) -> Self {
        LuaValue::Number(Number::Integer(n.into()))
    }
}

impl From<usize> for LuaValue {
    fn from(n: usize) -> Self {
        match i64::try_from(n) {
            Ok(i) => LuaValue::Number(Number::Integer(i)),
            Err(_) => LuaValue::Number(Number::Float(n as f64)),
        }
    }
}

impl From<f64> for LuaValue {
    fn from(f: f64) -> Self {
        LuaValue::Number(Number::Float(f))
    }
}

impl From<Mapping> for LuaValue {
    fn from(m: Mapping) -> Self {
        LuaValue::Mapping(m)
    }
}

impl From<Vec<LuaValue>> for LuaValue {
    fn from(v: Vec<LuaValue>) -> Self {
        LuaValue::Sequence(v)
    }
}

impl<T: Into<LuaValue>> From<Option<T>> for LuaValue {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(LuaValue::Absent, Into::into)
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Number::Integer(i) => serializer.serialize_i64(i),
            Number::Float(f) => serializer.serialize_f64(f),
        }
    }
}

/// JSON view of the same tree: absent mapping entries are skipped, absent
/// sequence slots become `null`.
impl Serialize for LuaValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            LuaValue::Absent => serializer.serialize_unit(),
            LuaValue::String(s) => serializer.serialize_str(s),
            LuaValue::Number(n) => n.serialize(serializer),
            LuaValue::Mapping(map) => map.serialize(serializer),
            LuaValue::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
        }
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let present = self.entries.iter().filter(|(_, v)| !v.is_absent());
        let mut map = serializer.serialize_map(None)?;
        for (k, v) in present {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
