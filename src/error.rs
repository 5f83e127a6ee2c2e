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
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error enum for the udf-bench library.
///
/// Every variant is raised at the stage boundary where it is detected and is
/// reported once by the binary; no stage retries.
#[derive(Error, Debug)]
pub enum UdfBenchError {
  #[error("Failed to read source file: {path}")]
  SourceRead {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("No declarations marked with '{marker}' found in {path}")]
  NoDeclarationsFound { marker: String, path: PathBuf },

  #[error("Failed to decompose arguments")]
  ArgumentParse(#[from] ArgumentParseError),

  #[error("Invalid code template")]
  Template(#[from] TemplateError),

  #[error("Invalid benchmark IR document")]
  IrFormat(#[from] IrFormatError),

  #[error("Configuration error")]
  Config(#[from] ConfigError),

  #[error("Failed to write output: {path}")]
  WriteOutput {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

/// Errors raised while splitting an argument list into type/name pairs.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ArgumentParseError {
  #[error("Function '{function}' has no context parameter (found {tokens} token(s))")]
  MissingContext { function: String, tokens: usize },

  #[error(
    "Function '{function}' has an odd number of tokens ({tokens}) after the context parameter: {arguments}"
  )]
  OddTokenCount {
    function: String,
    tokens: usize,
    arguments: String,
  },
}

/// Errors raised while loading or rendering the code template.
#[derive(Error, Debug)]
pub enum TemplateError {
  #[error("Failed to read template file: {path}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Template is missing required slot '${{{slot}}}'")]
  MissingSlot { slot: &'static str },

  #[error("Template references unknown slot '{slot}' at byte {offset}")]
  UnknownSlot { slot: String, offset: usize },

  #[error("Invalid placeholder in template at byte {offset}")]
  InvalidPlaceholder { offset: usize },
}

/// Errors raised while reading the benchmark IR document.
#[derive(Error, Debug)]
pub enum IrFormatError {
  #[error("Failed to read IR file: {path}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("Failed to parse IR JSON: {0}")]
  Parse(#[source] serde_json::Error),

  #[error("Failed to serialize IR: {0}")]
  Serialize(#[source] serde_json::Error),
}

/// Errors related to configuration resolution (src/config.rs).
#[derive(Error, Debug)]
pub enum ConfigError {
  #[error("Config file not found: {0}")]
  FileNotFound(PathBuf),

  #[error("Failed to extract settings: {0}")]
  Extract(#[from] Box<figment::Error>),

  #[error("Setting '{key}' must not be empty")]
  EmptyValue { key: &'static str },
}
