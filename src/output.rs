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
use crate::error::UdfBenchError;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

/// Writes the finished text to `path`, or to stdout when no path is given.
pub fn write_output(path: Option<&Path>, text: &str) -> Result<(), UdfBenchError> {
  match path {
    Some(path) => {
      fs::write(path, text).map_err(|source| UdfBenchError::WriteOutput {
        path: path.to_path_buf(),
        source,
      })?;
      tracing::info!("Output written to {}", path.display());
    }
    None => {
      let mut stdout = std::io::stdout().lock();
      stdout
        .write_all(text.as_bytes())
        .and_then(|()| stdout.flush())
        .map_err(|source| UdfBenchError::WriteOutput {
          path: PathBuf::from("<stdout>"),
          source,
        })?;
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn writes_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bench.cc");
    write_output(Some(&path), "BENCHMARK_MAIN();\n").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "BENCHMARK_MAIN();\n");
  }

  #[test]
  fn unwritable_path_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("bench.cc");
    let err = write_output(Some(&path), "x").unwrap_err();
    assert!(matches!(err, UdfBenchError::WriteOutput { .. }));
  }
}
