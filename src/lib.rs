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

//! # udf-bench
//!
//! `udf-bench` turns exported Impala UDF declarations into Google-benchmark
//! harness code. It works in two separate runs with a hand-edited JSON
//! document in between:
//!
//! 1. `udfbench generate-template udf.cc > bench.json` scans the source for
//!    `IMPALA_UDF_EXPORT` declarations and writes one entry per function,
//!    with a placeholder for every argument.
//! 2. After the placeholders are replaced by literal values,
//!    `udfbench generate-code bench.json` renders each entry through a code
//!    template and prints the complete benchmark source.
//!
//! ## Core Modules
//!
//! * [`extract`]: Scanner that finds marked declarations in C++ source text.
//! * [`decompose`]: Splits an argument list into `(type, name)` pairs and drops
//!   the leading `FunctionContext` parameter.
//! * [`ir`]: The order-preserving JSON document shared by both runs.
//! * [`builder`]: Builds the IR from source text (`generate-template`).
//! * [`render`]: Parses the two-slot code template and renders call sites.
//! * [`assemble`]: Joins header, rendered blocks and registrations.
//! * [`benchmark`]: Runs the `generate-code` pipeline.
//! * [`cli`]: Defines the `clap`-based command-line interface.
//! * [`config`]: Layered settings (defaults, TOML file, env, flags) via `figment`.
//! * [`error`]: Defines the custom error types for the library.
//! * [`logging`]: Provides the `setup_tracing` utility.
//! * [`output`]: Writes results to stdout or a file.

pub mod assemble;
pub mod benchmark;
pub mod builder;
pub mod cli;
pub mod config;
pub mod decompose;
pub mod error;
pub mod extract;
pub mod ir;
pub mod logging;
pub mod output;
pub mod render;
