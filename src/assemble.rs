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
//! Joins rendered blocks into one compilable benchmark source file.
use crate::render::RenderedBenchmark;

const SYSTEM_INCLUDES: &[&str] = &[
  "benchmark/benchmark.h",
  "impala_udf/udf.h",
  "impala_udf/udf-test-harness.h",
];

const NAMESPACES: &[&str] = &["impala", "impala_udf"];

const ENTRY_POINT: &str = "BENCHMARK_MAIN();";

/// Preamble of the generated file: framework includes, the given project
/// headers, and the namespace declarations.
pub fn code_header(includes: &[String]) -> String {
  let mut header = String::from("\n");
  for include in SYSTEM_INCLUDES {
    header.push_str(&format!("#include <{include}>\n"));
  }
  for include in includes {
    header.push_str(&format!("#include \"{include}\"\n"));
  }
  header.push('\n');
  for namespace in NAMESPACES {
    header.push_str(&format!("using namespace {namespace};\n"));
  }
  header
}

/// Header, then every block, then one `BENCHMARK(..)` line per block and
/// the entry point. Blocks are not validated.
pub fn assemble(rendered: &[RenderedBenchmark], includes: &[String]) -> String {
  let mut code = code_header(includes);
  code.push('\n');

  for benchmark in rendered {
    code.push_str(&benchmark.block);
  }
  for benchmark in rendered {
    code.push_str(&format!("BENCHMARK({});\n", benchmark.bm_function_name));
  }
  code.push_str(ENTRY_POINT);
  code.push('\n');

  code
}

#[cfg(test)]
mod tests {
  use super::*;

  fn rendered(name: &str) -> RenderedBenchmark {
    RenderedBenchmark {
      bm_function_name: name.to_string(),
      block: format!("static void {name}(benchmark::State &state) {{}}\n"),
    }
  }

  #[test]
  fn header_lists_includes_and_namespaces() {
    let header = code_header(&["udf-bioutils.h".to_string()]);
    assert_eq!(
      header,
      "\n#include <benchmark/benchmark.h>\n#include <impala_udf/udf.h>\n#include <impala_udf/udf-test-harness.h>\n#include \"udf-bioutils.h\"\n\nusing namespace impala;\nusing namespace impala_udf;\n"
    );
  }

  #[test]
  fn registrations_follow_block_order_and_main_is_last() {
    let code = assemble(&[rendered("BM_b"), rendered("BM_a")], &[]);
    let lines: Vec<_> = code.lines().collect();

    let registrations: Vec<_> = lines
      .iter()
      .filter(|l| l.starts_with("BENCHMARK("))
      .collect();
    assert_eq!(registrations, [&"BENCHMARK(BM_b);", &"BENCHMARK(BM_a);"]);
    assert_eq!(lines.last(), Some(&"BENCHMARK_MAIN();"));
    assert_eq!(code.matches(ENTRY_POINT).count(), 1);
    assert!(code.find("static void BM_a").unwrap() < code.find("BENCHMARK(BM_b)").unwrap());
  }

  #[test]
  fn empty_input_still_has_entry_point() {
    let code = assemble(&[], &[]);
    assert!(code.ends_with("using namespace impala_udf;\n\nBENCHMARK_MAIN();\n"));
  }
}
