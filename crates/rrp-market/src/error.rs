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

//! Error types for market data ingestion and the factor engine.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketError {
  #[error("HTTP request failed: {0}")]
  RequestFailed(#[from] reqwest::Error),

  #[error("JSON parsing failed: {0}")]
  JsonParseFailed(#[from] serde_json::Error),

  #[error("rate limit exceeded for {0}")]
  RateLimitExceeded(String),

  #[error("invalid response from {provider}: {message}")]
  InvalidResponse { provider: String, message: String },

  #[error("not enough history for {asset_symbol}: need {needed} days, have {have}")]
  InsufficientHistory { asset_symbol: String, needed: usize, have: usize },

  #[error("persistence error: {0}")]
  Persistence(String),
}

impl From<MarketError> for rrp_core::Error {
  fn from(err: MarketError) -> Self {
    match err {
      MarketError::RateLimitExceeded(_) | MarketError::RequestFailed(_) => {
        rrp_core::Error::TransientUpstream(err.to_string())
      }
      MarketError::InvalidResponse { .. } | MarketError::JsonParseFailed(_) => {
        rrp_core::Error::PermanentUpstream(err.to_string())
      }
      MarketError::InsufficientHistory { .. } => rrp_core::Error::ValidationError(err.to_string()),
      MarketError::Persistence(msg) => rrp_core::Error::PersistenceError(msg),
    }
  }
}

pub type MarketResult<T> = Result<T, MarketError>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_rate_limit_error_display() {
    let err = MarketError::RateLimitExceeded("CoinGecko".to_string());
    assert!(err.to_string().contains("CoinGecko"));
  }

  #[test]
  fn test_insufficient_history_maps_to_validation_error() {
    let err = MarketError::InsufficientHistory { asset_symbol: "BTC".into(), needed: 30, have: 5 };
    let core_err: rrp_core::Error = err.into();
    assert!(matches!(core_err, rrp_core::Error::ValidationError(_)));
  }
}
