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

#[derive(Error, Debug)]
pub enum LlmError {
  #[error("missing credential or prompt file: {0}")]
  ConfigMissing(String),

  #[error("request failed: {0}")]
  RequestFailed(#[from] reqwest::Error),

  #[error("rate limited by {model}, retry after {retry_after_secs}s")]
  RateLimitExceeded { model: String, retry_after_secs: u64 },

  #[error("upstream {model} returned {status}: {message}")]
  UpstreamError { model: String, status: u16, message: String },

  #[error("failed to parse {model} response: {0}")]
  ResponseParseFailed(String),

  #[error("persistence error: {0}")]
  Persistence(String),
}

impl From<LlmError> for rrp_core::Error {
  fn from(err: LlmError) -> Self {
    match err {
      LlmError::ConfigMissing(msg) => rrp_core::Error::ConfigMissing(msg),
      LlmError::RequestFailed(e) => rrp_core::Error::TransientUpstream(e.to_string()),
      LlmError::RateLimitExceeded { model, retry_after_secs } => {
        rrp_core::Error::TransientUpstream(format!("{model} rate limited, retry after {retry_after_secs}s"))
      }
      LlmError::UpstreamError { status, message, .. } if (500..600).contains(&status) || status == 429 => {
        rrp_core::Error::TransientUpstream(message)
      }
      LlmError::UpstreamError { model, status, message } => {
        rrp_core::Error::PermanentUpstream(format!("{model} {status}: {message}"))
      }
      LlmError::ResponseParseFailed(msg) => rrp_core::Error::PermanentUpstream(msg),
      LlmError::Persistence(msg) => rrp_core::Error::PersistenceError(msg),
    }
  }
}

pub type LlmResult<T> = Result<T, LlmError>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_missing_credential_maps_to_config_missing() {
    let err = LlmError::ConfigMissing("OPENAI_API_KEY".to_string());
    let core: rrp_core::Error = err.into();
    assert!(matches!(core, rrp_core::Error::ConfigMissing(_)));
  }

  #[test]
  fn test_server_error_maps_to_transient() {
    let err = LlmError::UpstreamError { model: "openai".to_string(), status: 503, message: "busy".to_string() };
    let core: rrp_core::Error = err.into();
    assert!(matches!(core, rrp_core::Error::TransientUpstream(_)));
  }

  #[test]
  fn test_client_error_maps_to_permanent() {
    let err = LlmError::UpstreamError { model: "openai".to_string(), status: 400, message: "bad".to_string() };
    let core: rrp_core::Error = err.into();
    assert!(matches!(core, rrp_core::Error::PermanentUpstream(_)));
  }
}
