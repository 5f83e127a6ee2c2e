// Copyright 2025 Chisomo Makombo Sakala
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! The benchmark IR: the one document persisted between the two modes.
//!
//! Entries and argument slots are kept in insertion order, which is the order
//! the functions and their parameters were declared in. That order drives the
//! call-site argument order and the order of the registration lines.
use crate::error::IrFormatError;
use indexmap::IndexMap;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde_json::ser::PrettyFormatter;
use std::fmt;
use std::path::Path;

/// The literal a user filled into a slot.
///
/// `Text` values are quoted when rendered; `Number` and `Boolean` values are
/// emitted as bare tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlotValue {
  Text(String),
  Number(serde_json::Number),
  Boolean(bool),
}

impl SlotValue {
  pub fn is_text(&self) -> bool {
    matches!(self, SlotValue::Text(_))
  }
}

impl fmt::Display for SlotValue {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      SlotValue::Text(text) => f.write_str(text),
      SlotValue::Number(number) => write!(f, "{number}"),
      SlotValue::Boolean(flag) => write!(f, "{flag}"),
    }
  }
}

/// A `[type, value]` pair, stored as a two-element JSON array.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSlot {
  pub arg_type: String,
  pub value: SlotValue,
}

impl Serialize for ValueSlot {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    (&self.arg_type, &self.value).serialize(serializer)
  }
}

impl<'de> Deserialize<'de> for ValueSlot {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let (arg_type, value) = <(String, SlotValue)>::deserialize(deserializer)?;
    Ok(ValueSlot { arg_type, value })
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkEntry {
  pub function_name: String,
  pub bm_argument_values: IndexMap<String, ValueSlot>,
}

/// Benchmark identifier to entry, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BenchmarkIr {
  entries: IndexMap<String, BenchmarkEntry>,
}

impl BenchmarkIr {
  pub fn new() -> Self {
    Self::default()
  }

  /// Inserts `entry` under `key`. A repeated key keeps its original position
  /// and the previous entry is returned.
  pub fn insert(&mut self, key: String, entry: BenchmarkEntry) -> Option<BenchmarkEntry> {
    self.entries.insert(key, entry)
  }

  pub fn get(&self, key: &str) -> Option<&BenchmarkEntry> {
    self.entries.get(key)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&String, &BenchmarkEntry)> {
    self.entries.iter()
  }

  pub fn keys(&self) -> impl Iterator<Item = &String> {
    self.entries.keys()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Serializes as JSON with 4-space indentation and a trailing newline.
  pub fn to_pretty_json(&self) -> Result<String, IrFormatError> {
    let mut buf = Vec::new();
    let mut serializer =
      serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    self
      .serialize(&mut serializer)
      .map_err(IrFormatError::Serialize)?;
    buf.push(b'\n');

    String::from_utf8(buf)
      .map_err(|e| IrFormatError::Serialize(serde::ser::Error::custom(e)))
  }

  pub fn from_json_str(text: &str) -> Result<Self, IrFormatError> {
    serde_json::from_str(text).map_err(IrFormatError::Parse)
  }

  pub fn from_file(path: &Path) -> Result<Self, IrFormatError> {
    let text = std::fs::read_to_string(path).map_err(|source| IrFormatError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_json_str(&text)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const FILLED: &str = r#"{
    "BM_zeta": {
        "function_name": "zeta",
        "bm_argument_values": {
            "s": ["StringVal", "hello"],
            "n": ["int", 3],
            "x": ["DoubleVal", 2.5],
            "b": ["BooleanVal", true],
            "digits": ["StringVal", "42"]
        }
    },
    "BM_alpha": {
        "function_name": "alpha",
        "bm_argument_values": {}
    }
}"#;

  #[test]
  fn parse_preserves_order_and_kinds() {
    let ir = BenchmarkIr::from_json_str(FILLED).unwrap();
    let keys: Vec<_> = ir.keys().map(String::as_str).collect();
    assert_eq!(keys, ["BM_zeta", "BM_alpha"]);

    let zeta = ir.get("BM_zeta").unwrap();
    let names: Vec<_> = zeta.bm_argument_values.keys().map(String::as_str).collect();
    assert_eq!(names, ["s", "n", "x", "b", "digits"]);
    assert_eq!(zeta.bm_argument_values["s"].value, SlotValue::Text("hello".into()));
    assert_eq!(zeta.bm_argument_values["n"].value.to_string(), "3");
    assert_eq!(zeta.bm_argument_values["x"].value.to_string(), "2.5");
    assert_eq!(zeta.bm_argument_values["b"].value, SlotValue::Boolean(true));
    assert!(zeta.bm_argument_values["digits"].value.is_text());
  }

  #[test]
  fn serialization_round_trips() {
    let ir = BenchmarkIr::from_json_str(FILLED).unwrap();
    let text = ir.to_pretty_json().unwrap();
    assert_eq!(BenchmarkIr::from_json_str(&text).unwrap(), ir);
    assert!(text.contains("\n    \"BM_zeta\": {\n        \"function_name\": \"zeta\","));
    assert!(text.ends_with("}\n"));
  }

  #[test]
  fn empty_ir_serializes_as_empty_object() {
    assert_eq!(BenchmarkIr::new().to_pretty_json().unwrap(), "{}\n");
    assert!(BenchmarkIr::from_json_str("{}").unwrap().is_empty());
  }

  #[test]
  fn missing_function_name_is_rejected() {
    let err = BenchmarkIr::from_json_str(r#"{"BM_f": {"bm_argument_values": {}}}"#).unwrap_err();
    assert!(matches!(err, IrFormatError::Parse(_)));
    assert!(err.to_string().contains("function_name"));
  }

  #[test]
  fn malformed_slots_are_rejected() {
    for doc in [
      r#"{"BM_f": {"function_name": "f", "bm_argument_values": {"n": ["int"]}}}"#,
      r#"{"BM_f": {"function_name": "f", "bm_argument_values": {"n": ["int", 1, 2]}}}"#,
      r#"{"BM_f": {"function_name": "f", "bm_argument_values": {"n": ["int", null]}}}"#,
      r#"{"BM_f": {"function_name": "f", "bm_argument_values": {"n": "int"}}}"#,
      r#"{"BM_f": {"function_name": "f"}}"#,
      r#"["BM_f"]"#,
    ] {
      assert!(BenchmarkIr::from_json_str(doc).is_err(), "accepted: {doc}");
    }
  }

  #[test]
  fn duplicate_insert_keeps_first_position() {
    let entry = |name: &str| BenchmarkEntry {
      function_name: name.to_string(),
      bm_argument_values: IndexMap::new(),
    };
    let mut ir = BenchmarkIr::new();
    ir.insert("BM_a".into(), entry("a"));
    ir.insert("BM_b".into(), entry("b"));
    assert!(ir.insert("BM_a".into(), entry("a2")).is_some());
    let keys: Vec<_> = ir.keys().map(String::as_str).collect();
    assert_eq!(keys, ["BM_a", "BM_b"]);
    assert_eq!(ir.get("BM_a").unwrap().function_name, "a2");
  }
}
