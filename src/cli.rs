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
use crate::config::Overrides;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
  name = "udfbench",
  version,
  about = "Generates Google-benchmark code for exported Impala UDFs"
)]
pub struct Cli {
  /// TOML config file. Defaults to ./udfbench.toml when present.
  #[arg(long, global = true, env = "UDFBENCH_CONFIG")]
  pub config: Option<PathBuf>,

  #[command(subcommand)]
  pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
  /// Scans a source file and prints a JSON template of its exported
  /// functions, with placeholder argument values to be filled in.
  GenerateTemplate(GenerateTemplateArgs),

  /// Generates benchmark source code from a filled JSON template.
  GenerateCode(GenerateCodeArgs),
}

#[derive(Debug, Args)]
pub struct GenerateTemplateArgs {
  /// C++ source or header file to scan.
  pub input_file: PathBuf,

  /// Annotation marking exported functions (default: IMPALA_UDF_EXPORT).
  #[arg(long)]
  pub marker: Option<String>,

  /// Fail when no marked declaration is found.
  #[arg(long)]
  pub require_matches: bool,

  /// Write the template here instead of stdout.
  #[arg(short, long)]
  pub output: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct GenerateCodeArgs {
  /// Filled JSON template produced by `generate-template`.
  pub ir_file: PathBuf,

  /// Code template file (default: benchmark/function_tmpl.txt).
  #[arg(short, long)]
  pub template: Option<PathBuf>,

  /// Write the generated code here instead of stdout.
  #[arg(short, long)]
  pub output: Option<PathBuf>,
}

impl From<&GenerateTemplateArgs> for Overrides {
  fn from(args: &GenerateTemplateArgs) -> Self {
    Overrides {
      marker: args.marker.clone(),
      template: None,
    }
  }
}

impl From<&GenerateCodeArgs> for Overrides {
  fn from(args: &GenerateCodeArgs) -> Self {
    Overrides {
      marker: None,
      template: args.template.clone(),
    }
  }
}
