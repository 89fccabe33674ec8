/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

//! Config-file + environment loading for the `rrp` binary.

use std::path::{Path, PathBuf};

use rrp_core::RrpConfig;

/// Resolved configuration for one CLI invocation: the enumerated record from
/// `config.yaml` (with env overrides applied) plus the connection string
/// every command needs to open a [`rrp_db::DatabaseContext`].
#[derive(Debug, Clone)]
pub struct CliConfig {
  pub settings: RrpConfig,
  pub database_url: String,
}

impl CliConfig {
  /// Loads `config.yaml` from `path` (defaulting when absent), applies API-key
  /// env overrides, then resolves the database URL with the precedence
  /// `--db` flag > `DATABASE_URL` env > `database.default_path` in the file.
  pub fn load(path: Option<&Path>, db_override: Option<&str>) -> anyhow::Result<Self> {
    let settings = RrpConfig::from_file(path.unwrap_or_else(|| Path::new("config.yaml")))?.with_env_overrides();

    let database_url = db_override
      .map(str::to_string)
      .or_else(|| std::env::var("DATABASE_URL").ok())
      .unwrap_or_else(|| settings.database.default_path.clone());

    Ok(Self { settings, database_url })
  }
}

/// Default location checked when `--config` is not given.
pub fn default_config_path() -> PathBuf {
  PathBuf::from("config.yaml")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_load_falls_back_to_default_db_path_without_env() {
    std::env::remove_var("DATABASE_URL");
    let config = CliConfig::load(Some(Path::new("/nonexistent/config.yaml")), None).unwrap();
    assert_eq!(config.database_url, "rrp.db");
  }

  #[test]
  fn test_db_flag_takes_precedence_over_env() {
    std::env::set_var("DATABASE_URL", "postgres://env/db");
    let config =
      CliConfig::load(Some(Path::new("/nonexistent/config.yaml")), Some("postgres://flag/db")).unwrap();
    assert_eq!(config.database_url, "postgres://flag/db");
    std::env::remove_var("DATABASE_URL");
  }
}
