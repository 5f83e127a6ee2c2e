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
//! Two-slot code template and per-entry rendering.
//!
//! Templates use `${bm_function_name}` and `${function_call}` (the braces are
//! optional when the name is followed by a non-identifier character) and `$$`
//! for a literal dollar sign.
use crate::error::TemplateError;
use crate::ir::BenchmarkEntry;
use crate::ir::BenchmarkIr;
use crate::ir::SlotValue;
use std::fs;
use std::path::Path;

pub const SLOT_BM_FUNCTION_NAME: &str = "bm_function_name";
pub const SLOT_FUNCTION_CALL: &str = "function_call";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
  Text(String),
  BmFunctionName,
  FunctionCall,
}

/// A parsed template, guaranteed to contain both slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTemplate {
  segments: Vec<Segment>,
}

/// One rendered code block and the benchmark identifier it registers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBenchmark {
  pub bm_function_name: String,
  pub block: String,
}

impl CodeTemplate {
  pub fn from_file(path: &Path) -> Result<Self, TemplateError> {
    let text = fs::read_to_string(path).map_err(|source| TemplateError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    text.parse()
  }

  /// Substitutes both slots.
  pub fn render(&self, bm_function_name: &str, function_call: &str) -> String {
    let mut out = String::new();
    for segment in &self.segments {
      match segment {
        Segment::Text(text) => out.push_str(text),
        Segment::BmFunctionName => out.push_str(bm_function_name),
        Segment::FunctionCall => out.push_str(function_call),
      }
    }
    out
  }
}

impl std::str::FromStr for CodeTemplate {
  type Err = TemplateError;

  fn from_str(text: &str) -> Result<Self, Self::Err> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = text;

    while let Some(idx) = rest.find('$') {
      literal.push_str(&rest[..idx]);
      let offset = text.len() - rest.len() + idx;
      let after = &rest[idx + 1..];

      if let Some(tail) = after.strip_prefix('$') {
        literal.push('$');
        rest = tail;
        continue;
      }

      let (name, tail) = if let Some(braced) = after.strip_prefix('{') {
        let end = braced
          .find('}')
          .ok_or(TemplateError::InvalidPlaceholder { offset })?;
        let name = &braced[..end];
        if !is_identifier(name) {
          return Err(TemplateError::InvalidPlaceholder { offset });
        }
        (name, &braced[end + 1..])
      } else {
        let end = after
          .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
          .unwrap_or(after.len());
        let name = &after[..end];
        if !is_identifier(name) {
          return Err(TemplateError::InvalidPlaceholder { offset });
        }
        (name, &after[end..])
      };

      let slot = match name {
        SLOT_BM_FUNCTION_NAME => Segment::BmFunctionName,
        SLOT_FUNCTION_CALL => Segment::FunctionCall,
        other => {
          return Err(TemplateError::UnknownSlot {
            slot: other.to_string(),
            offset,
          });
        }
      };
      if !literal.is_empty() {
        segments.push(Segment::Text(std::mem::take(&mut literal)));
      }
      segments.push(slot);
      rest = tail;
    }
    literal.push_str(rest);
    if !literal.is_empty() {
      segments.push(Segment::Text(literal));
    }

    if !segments.contains(&Segment::BmFunctionName) {
      return Err(TemplateError::MissingSlot {
        slot: SLOT_BM_FUNCTION_NAME,
      });
    }
    if !segments.contains(&Segment::FunctionCall) {
      return Err(TemplateError::MissingSlot {
        slot: SLOT_FUNCTION_CALL,
      });
    }

    Ok(CodeTemplate { segments })
  }
}

fn is_identifier(name: &str) -> bool {
  let mut chars = name.chars();
  matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
    && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Builds `name(context, T1(v1), T2(v2));`. Text values are wrapped in
/// double quotes, other values are inserted as bare tokens.
pub fn function_call(entry: &BenchmarkEntry, context_arg: &str) -> String {
  let mut call = format!("{}({}", entry.function_name, context_arg);
  for slot in entry.bm_argument_values.values() {
    call.push_str(", ");
    call.push_str(&slot.arg_type);
    match &slot.value {
      SlotValue::Text(text) => {
        call.push_str("(\"");
        call.push_str(text);
        call.push_str("\")");
      }
      scalar => {
        call.push('(');
        call.push_str(&scalar.to_string());
        call.push(')');
      }
    }
  }
  call.push_str(");");
  call
}

/// Renders every entry of `ir`, in IR order. Each block ends with a newline.
pub fn render_benchmarks(
  ir: &BenchmarkIr,
  template: &CodeTemplate,
  context_arg: &str,
  placeholder: &str,
) -> Vec<RenderedBenchmark> {
  ir.iter()
    .map(|(bm_function_name, entry)| {
      for (arg, slot) in &entry.bm_argument_values {
        if matches!(&slot.value, SlotValue::Text(text) if text.starts_with(placeholder)) {
          tracing::warn!(%bm_function_name, %arg, "Argument still holds its placeholder value");
        }
      }

      let call = function_call(entry, context_arg);
      tracing::debug!(%bm_function_name, %call, "Rendering benchmark");

      let mut block = template.render(bm_function_name, &call);
      block.push('\n');
      RenderedBenchmark {
        bm_function_name: bm_function_name.clone(),
        block,
      }
    })
    .collect()
}
