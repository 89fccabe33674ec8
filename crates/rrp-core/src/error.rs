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

use thiserror::Error;

/// Errors shared across the harvest, ensemble, and factor pipelines.
///
/// Each variant maps to one of the propagation classes described for the
/// pipeline: `ConfigMissing`/`ValidationError` abort the enclosing batch,
/// the rest are recovered at the smallest boundary that permits progress.
#[derive(Error, Debug)]
pub enum Error {
  #[error("Environment variable error: {0}")]
  EnvVar(#[from] std::env::VarError),

  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Required credential or prompt file missing: {0}")]
  ConfigMissing(String),

  #[error("Transient upstream failure: {0}")]
  TransientUpstream(String),

  #[error("Permanent upstream failure: {0}")]
  PermanentUpstream(String),

  #[error("Validation error: {0}")]
  ValidationError(String),

  #[error("Persistence error: {0}")]
  PersistenceError(String),

  #[error("Batch cancelled")]
  CancelledBatch,

  #[error("Serialization error")]
  Serde(#[from] serde_json::Error),

  #[error("YAML error")]
  Yaml(#[from] serde_yaml::Error),

  #[error("Date parsing error")]
  ParseDate(#[from] chrono::ParseError),

  #[error("Missing required field: {0}")]
  MissingField(String),

  #[error("Invalid API response: {0}")]
  InvalidResponse(String),

  #[error("Unexpected error: {0}")]
  Unexpected(String),

  #[error("HTTP error: {0}")]
  Http(String),

  #[error("Parse error: {0}")]
  Parse(String),
}

impl Error {
  /// True for the two kinds that are fatal to the enclosing batch/command.
  pub fn aborts_batch(&self) -> bool {
    matches!(self, Error::ConfigMissing(_) | Error::ValidationError(_))
  }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_error_display_config_missing() {
    let err = Error::ConfigMissing("OPENAI_API_KEY not set".to_string());
    assert_eq!(err.to_string(), "Required credential or prompt file missing: OPENAI_API_KEY not set");
  }

  #[test]
  fn test_error_display_validation() {
    let err = Error::ValidationError("sentiment out of range".to_string());
    assert_eq!(err.to_string(), "Validation error: sentiment out of range");
  }

  #[test]
  fn test_aborts_batch() {
    assert!(Error::ConfigMissing("x".into()).aborts_batch());
    assert!(Error::ValidationError("x".into()).aborts_batch());
    assert!(!Error::TransientUpstream("x".into()).aborts_batch());
    assert!(!Error::PersistenceError("x".into()).aborts_batch());
    assert!(!Error::CancelledBatch.aborts_batch());
  }

  #[test]
  fn test_error_from_env_var() {
    let env_err = std::env::VarError::NotPresent;
    let err = Error::from(env_err);
    assert!(matches!(err, Error::EnvVar(_)));
  }

  #[test]
  fn test_error_from_serde_json() {
    let json_err = serde_json::from_str::<String>("invalid").unwrap_err();
    let err = Error::from(json_err);
    assert!(matches!(err, Error::Serde(_)));
  }

  #[test]
  fn test_error_from_chrono_parse() {
    let parse_err = chrono::NaiveDate::parse_from_str("invalid", "%Y-%m-%d").unwrap_err();
    let err = Error::from(parse_err);
    assert!(matches!(err, Error::ParseDate(_)));
  }

  #[test]
  fn test_result_type_alias() {
    fn returns_ok() -> Result<i32> {
      Ok(42)
    }
    fn returns_err() -> Result<i32> {
      Err(Error::Config("test".to_string()))
    }
    assert_eq!(returns_ok().unwrap(), 42);
    assert!(returns_err().is_err());
  }
}
