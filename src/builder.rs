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
//! Template-generation mode: source file to unfilled benchmark IR.
use crate::config::Settings;
use crate::decompose::FunctionSignature;
use crate::error::UdfBenchError;
use crate::extract::extract_declarations;
use crate::ir::BenchmarkEntry;
use crate::ir::BenchmarkIr;
use crate::ir::SlotValue;
use crate::ir::ValueSlot;
use std::fs;
use std::path::Path;

/// Builds one entry per signature, keyed by `<bm_prefix><name>`, with a
/// placeholder in every slot.
pub fn build_ir<I>(signatures: I, settings: &Settings) -> BenchmarkIr
where
  I: IntoIterator<Item = FunctionSignature>,
{
  let mut ir = BenchmarkIr::new();

  for FunctionSignature { name, arguments } in signatures {
    let bm_argument_values = arguments
      .into_iter()
      .map(|arg| {
        let value = SlotValue::Text(settings.placeholder_for(&arg.arg_type));
        (
          arg.name,
          ValueSlot {
            arg_type: arg.arg_type,
            value,
          },
        )
      })
      .collect();

    let key = format!("{}{}", settings.bm_prefix, name);
    let entry = BenchmarkEntry {
      function_name: name,
      bm_argument_values,
    };
    if ir.insert(key.clone(), entry).is_some() {
      tracing::warn!(%key, "Duplicate declaration replaces the earlier entry");
    }
  }

  ir
}

/// Runs extract, decompose and build over `source`.
pub fn ir_from_source(source: &str, settings: &Settings) -> Result<BenchmarkIr, UdfBenchError> {
  let signatures = extract_declarations(source, &settings.marker)
    .iter()
    .map(|declaration| {
      tracing::debug!(
        name = %declaration.name,
        line = declaration.line,
        "Decomposing declaration"
      );
      FunctionSignature::try_from(declaration)
    })
    .collect::<Result<Vec<_>, _>>()?;

  Ok(build_ir(signatures, settings))
}

/// Reads `input_file` and returns the serialized IR.
///
/// With `require_matches`, a file without any marked declaration fails with
/// [`UdfBenchError::NoDeclarationsFound`]; otherwise it yields `{}`.
pub fn generate_template(
  input_file: &Path,
  settings: &Settings,
  require_matches: bool,
) -> Result<String, UdfBenchError> {
  tracing::info!("Scanning {} for '{}'", input_file.display(), settings.marker);

  let source = fs::read_to_string(input_file).map_err(|source| UdfBenchError::SourceRead {
    path: input_file.to_path_buf(),
    source,
  })?;

  let ir = ir_from_source(&source, settings)?;

  if ir.is_empty() {
    if require_matches {
      return Err(UdfBenchError::NoDeclarationsFound {
        marker: settings.marker.clone(),
        path: input_file.to_path_buf(),
      });
    }
    tracing::warn!("No declarations found in {}", input_file.display());
  }

  tracing::info!("Generated {} benchmark entries", ir.len());
  Ok(ir.to_pretty_json()?)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::error::ArgumentParseError;
  use std::io::Write;

  #[test]
  fn builds_entry_with_placeholders() {
    let src = "IMPALA_UDF_EXPORT FloatVal myFun(FunctionContext* context, const StringVal& s, int n);";
    let ir = ir_from_source(src, &Settings::default()).unwrap();

    let expected = BenchmarkIr::from_json_str(
      r#"{
        "BM_myFun": {
          "function_name": "myFun",
          "bm_argument_values": {
            "s": ["StringVal", "REPLACE_VALUE (type: StringVal)"],
            "n": ["int", "REPLACE_VALUE (type: int)"]
          }
        }
      }"#,
    )
    .unwrap();
    assert_eq!(ir, expected);
  }

  #[test]
  fn slot_count_is_parameter_count_minus_context() {
    let src = r#"
IMPALA_UDF_EXPORT
BooleanVal Is_An_Element(FunctionContext *context, const StringVal &string1,
                         const StringVal &string2, const StringVal &delimVal) {
}
"#;
    let ir = ir_from_source(src, &Settings::default()).unwrap();
    let entry = ir.get("BM_Is_An_Element").unwrap();
    let names: Vec<_> = entry.bm_argument_values.keys().map(String::as_str).collect();
    assert_eq!(names, ["string1", "string2", "delimVal"]);
  }

  #[test]
  fn comments_in_argument_list_do_not_become_slots() {
    let src = "IMPALA_UDF_EXPORT IntVal f(FunctionContext* context, // the input\n    const StringVal& s, int n /* count */)";
    let ir = ir_from_source(src, &Settings::default()).unwrap();
    let entry = ir.get("BM_f").unwrap();
    let names: Vec<_> = entry.bm_argument_values.keys().map(String::as_str).collect();
    assert_eq!(names, ["s", "n"]);
    assert_eq!(entry.bm_argument_values["s"].arg_type, "StringVal");
  }

  #[test]
  fn entries_follow_declaration_order() {
    let src = "IMPALA_UDF_EXPORT IntVal b(FunctionContext* c)\nIMPALA_UDF_EXPORT IntVal a(FunctionContext* c)";
    let ir = ir_from_source(src, &Settings::default()).unwrap();
    let keys: Vec<_> = ir.keys().map(String::as_str).collect();
    assert_eq!(keys, ["BM_b", "BM_a"]);
  }

  #[test]
  fn custom_prefix_and_placeholder() {
    let settings = Settings {
      bm_prefix: "BENCH_".to_string(),
      placeholder: "TODO".to_string(),
      ..Settings::default()
    };
    let src = "IMPALA_UDF_EXPORT IntVal f(FunctionContext* c, IntVal x)";
    let ir = ir_from_source(src, &settings).unwrap();
    let slot = &ir.get("BENCH_f").unwrap().bm_argument_values["x"];
    assert_eq!(slot.value, SlotValue::Text("TODO (type: IntVal)".to_string()));
  }

  #[test]
  fn odd_arguments_fail_the_whole_run() {
    let src = "IMPALA_UDF_EXPORT IntVal ok(FunctionContext* c)\nIMPALA_UDF_EXPORT IntVal bad(FunctionContext* c, unsigned int n)";
    let err = ir_from_source(src, &Settings::default()).unwrap_err();
    assert!(matches!(
      err,
      UdfBenchError::ArgumentParse(ArgumentParseError::OddTokenCount { .. })
    ));
  }

  #[test]
  fn empty_source_yields_empty_object() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "int helper(int x);").unwrap();

    let out = generate_template(file.path(), &Settings::default(), false).unwrap();
    assert_eq!(out, "{}\n");

    let err = generate_template(file.path(), &Settings::default(), true).unwrap_err();
    assert!(matches!(err, UdfBenchError::NoDeclarationsFound { .. }));
  }

  #[test]
  fn missing_source_is_a_read_error() {
    let err = generate_template(Path::new("no/such/file.cc"), &Settings::default(), false)
      .unwrap_err();
    assert!(matches!(err, UdfBenchError::SourceRead { .. }));
  }
}
