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
use crate::error::ConfigError;
use crate::extract::DEFAULT_MARKER;
use figment::Figment;
use figment::providers::Env;
use figment::providers::Format;
use figment::providers::Serialized;
use figment::providers::Toml;
use serde::Deserialize;
use serde::Serialize;
use std::path::Path;
use std::path::PathBuf;

/// Config file picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "udfbench.toml";

/// Prefix for environment overrides, e.g. `UDFBENCH_MARKER`.
pub const ENV_PREFIX: &str = "UDFBENCH_";

// --- Default Values ---
fn default_marker() -> String {
  DEFAULT_MARKER.to_string()
}

fn default_bm_prefix() -> String {
  "BM_".to_string()
}

fn default_placeholder() -> String {
  "REPLACE_VALUE".to_string()
}

fn default_context_arg() -> String {
  "context".to_string()
}

fn default_template() -> PathBuf {
  PathBuf::from("benchmark/function_tmpl.txt")
}

fn default_includes() -> Vec<String> {
  vec!["uda-bioutils.h".to_string(), "udf-bioutils.h".to_string()]
}

/// Fully resolved settings shared by both modes.
///
/// Resolution order, later wins: built-in defaults, the TOML config file,
/// `UDFBENCH_*` environment variables, command-line flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
  /// Annotation that marks a declaration as a benchmark candidate.
  #[serde(default = "default_marker")]
  pub marker: String,

  /// Prefix of every benchmark identifier in the IR.
  #[serde(default = "default_bm_prefix")]
  pub bm_prefix: String,

  /// Leading text of the generated placeholder values.
  #[serde(default = "default_placeholder")]
  pub placeholder: String,

  /// Name of the context variable passed as first call argument.
  #[serde(default = "default_context_arg")]
  pub context_arg: String,

  /// Code template used by `generate-code`.
  #[serde(default = "default_template")]
  pub template: PathBuf,

  /// Project headers included by the generated file.
  #[serde(default = "default_includes")]
  pub includes: Vec<String>,
}

impl Default for Settings {
  fn default() -> Self {
    Settings {
      marker: default_marker(),
      bm_prefix: default_bm_prefix(),
      placeholder: default_placeholder(),
      context_arg: default_context_arg(),
      template: default_template(),
      includes: default_includes(),
    }
  }
}

/// Command-line values that take precedence over every other source.
#[derive(Debug, Default, Serialize)]
pub struct Overrides {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub marker: Option<String>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub template: Option<PathBuf>,
}

impl Settings {
  /// Builds the layered figment. An explicit `config_file` must exist; the
  /// default one is optional.
  pub fn figment(config_file: Option<&Path>, overrides: &Overrides) -> Result<Figment, ConfigError> {
    let toml = match config_file {
      Some(path) if !path.exists() => return Err(ConfigError::FileNotFound(path.to_path_buf())),
      Some(path) => Toml::file(path),
      None => Toml::file(DEFAULT_CONFIG_FILE),
    };

    Ok(
      Figment::from(Serialized::defaults(Settings::default()))
        .merge(toml)
        .merge(Env::prefixed(ENV_PREFIX).ignore(&["log_file", "config"]))
        .merge(Serialized::defaults(overrides)),
    )
  }

  pub fn load(config_file: Option<&Path>, overrides: &Overrides) -> Result<Self, ConfigError> {
    let settings: Settings = Self::figment(config_file, overrides)?
      .extract()
      .map_err(Box::new)?;
    settings.validate()?;

    tracing::debug!(?settings, "Resolved settings");
    Ok(settings)
  }

  fn validate(&self) -> Result<(), ConfigError> {
    let required = [
      ("marker", &self.marker),
      ("bm_prefix", &self.bm_prefix),
      ("context_arg", &self.context_arg),
    ];
    for (key, value) in required {
      if value.trim().is_empty() {
        return Err(ConfigError::EmptyValue { key });
      }
    }
    Ok(())
  }

  /// Placeholder stored in a fresh slot for an argument of `arg_type`.
  pub fn placeholder_for(&self, arg_type: &str) -> String {
    format!("{} (type: {})", self.placeholder, arg_type)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use figment::Jail;

  #[test]
  fn defaults_without_sources() {
    Jail::expect_with(|_jail| {
      let settings = Settings::load(None, &Overrides::default()).unwrap();
      assert_eq!(settings, Settings::default());
      assert_eq!(settings.placeholder_for("int"), "REPLACE_VALUE (type: int)");
      Ok(())
    });
  }

  #[test]
  fn layers_file_env_and_overrides() {
    Jail::expect_with(|jail| {
      jail.create_file(
        DEFAULT_CONFIG_FILE,
        r#"
          marker = "FILE_EXPORT"
          bm_prefix = "BENCH_"
          includes = ["udf-mathutils.h"]
        "#,
      )?;
      jail.set_env("UDFBENCH_BM_PREFIX", "ENV_");
      jail.set_env("UDFBENCH_LOG_FILE", "ignored.log");

      let settings = Settings::load(None, &Overrides::default()).unwrap();
      assert_eq!(settings.marker, "FILE_EXPORT");
      assert_eq!(settings.bm_prefix, "ENV_");
      assert_eq!(settings.includes, ["udf-mathutils.h"]);

      let overrides = Overrides {
        marker: Some("CLI_EXPORT".to_string()),
        template: Some(PathBuf::from("t.txt")),
      };
      let settings = Settings::load(None, &overrides).unwrap();
      assert_eq!(settings.marker, "CLI_EXPORT");
      assert_eq!(settings.template, PathBuf::from("t.txt"));
      Ok(())
    });
  }

  #[test]
  fn explicit_missing_config_is_an_error() {
    let err = Settings::load(Some(Path::new("does/not/exist.toml")), &Overrides::default());
    assert!(matches!(err, Err(ConfigError::FileNotFound(_))));
  }

  #[test]
  fn empty_marker_is_rejected() {
    Jail::expect_with(|jail| {
      jail.create_file(DEFAULT_CONFIG_FILE, "marker = \"  \"")?;
      let err = Settings::load(None, &Overrides::default()).unwrap_err();
      assert!(matches!(err, ConfigError::EmptyValue { key: "marker" }));
      Ok(())
    });
  }
}
