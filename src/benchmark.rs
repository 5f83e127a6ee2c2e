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
//! Code-generation mode: filled IR plus template to benchmark source.
use crate::assemble::assemble;
use crate::config::Settings;
use crate::error::UdfBenchError;
use crate::ir::BenchmarkIr;
use crate::render::CodeTemplate;
use crate::render::render_benchmarks;
use std::path::Path;

/// Renders `ir` through `template` and assembles the final source text.
pub fn code_from_ir(ir: &BenchmarkIr, template: &CodeTemplate, settings: &Settings) -> String {
  let rendered = render_benchmarks(ir, template, &settings.context_arg, &settings.placeholder);
  assemble(&rendered, &settings.includes)
}

/// Reads the IR document and the configured template, then generates code.
/// Nothing is returned unless every stage succeeds.
pub fn generate_code(ir_file: &Path, settings: &Settings) -> Result<String, UdfBenchError> {
  let span = tracing::info_span!("generate_code", template = %settings.template.display());
  let _enter = span.enter();

  let template = CodeTemplate::from_file(&settings.template)?;
  tracing::info!("Loading benchmark IR from {}", ir_file.display());
  let ir = BenchmarkIr::from_file(ir_file)?;

  if ir.is_empty() {
    tracing::warn!("IR document has no entries; emitting an empty harness");
  }

  let code = code_from_ir(&ir, &template, settings);
  tracing::info!("Generated {} benchmarks", ir.len());
  Ok(code)
}
