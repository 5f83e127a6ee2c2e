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
use Commands::GenerateCode;
use Commands::GenerateTemplate;
use anyhow::Result;
use clap::Parser;
use udf_bench::benchmark::generate_code;
use udf_bench::builder::generate_template;
use udf_bench::cli::Cli;
use udf_bench::cli::Commands;
use udf_bench::config::Overrides;
use udf_bench::config::Settings;
use udf_bench::logging::setup_tracing;
use udf_bench::output::write_output;

fn main() -> Result<()> {
  let _guard = setup_tracing()?;

  let Cli { config, command } = Cli::parse();
  let main_span = tracing::info_span!("udfbench");
  let _enter = main_span.enter();

  match command {
    GenerateTemplate(args) => {
      tracing::info!("Generating benchmark template...");

      let settings = Settings::load(config.as_deref(), &Overrides::from(&args))?;
      let template = generate_template(&args.input_file, &settings, args.require_matches)?;
      write_output(args.output.as_deref(), &template)?;
    }
    GenerateCode(args) => {
      tracing::info!("Generating benchmark code...");

      let settings = Settings::load(config.as_deref(), &Overrides::from(&args))?;
      let code = generate_code(&args.ir_file, &settings)?;
      write_output(args.output.as_deref(), &code)?;
    }
  }

  Ok(())
}
