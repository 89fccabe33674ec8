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
pub enum NewsError {
  #[error("HTTP request failed: {0}")]
  RequestFailed(#[from] reqwest::Error),

  #[error("RSS parsing error: {0}")]
  RssParseFailed(#[from] rss::Error),

  #[error("JSON parsing error: {0}")]
  JsonParseFailed(#[from] serde_json::Error),

  #[error("rate limited by {source}, retry after {retry_after_secs}s")]
  RateLimitExceeded { source: String, retry_after_secs: u64 },

  #[error("invalid document from {source}: {message}")]
  InvalidDocument { source: String, message: String },

  #[error("url resolution failed: {0}")]
  ResolutionFailed(String),

  #[error("persistence error: {0}")]
  Persistence(String),
}

impl From<NewsError> for rrp_core::Error {
  fn from(err: NewsError) -> Self {
    match err {
      NewsError::RequestFailed(_) | NewsError::RateLimitExceeded { .. } => {
        rrp_core::Error::TransientUpstream(err.to_string())
      }
      NewsError::RssParseFailed(_) | NewsError::JsonParseFailed(_) | NewsError::InvalidDocument { .. } => {
        rrp_core::Error::PermanentUpstream(err.to_string())
      }
      NewsError::ResolutionFailed(_) => rrp_core::Error::TransientUpstream(err.to_string()),
      NewsError::Persistence(msg) => rrp_core::Error::PersistenceError(msg),
    }
  }
}

pub type NewsResult<T> = Result<T, NewsError>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_rate_limit_display() {
    let err = NewsError::RateLimitExceeded { source: "gdelt".to_string(), retry_after_secs: 2 };
    assert!(err.to_string().contains("gdelt"));
  }

  #[test]
  fn test_invalid_document_maps_to_permanent_upstream() {
    let err = NewsError::InvalidDocument { source: "gdelt".to_string(), message: "bad json".to_string() };
    let core_err: rrp_core::Error = err.into();
    assert!(matches!(core_err, rrp_core::Error::PermanentUpstream(_)));
  }
}
