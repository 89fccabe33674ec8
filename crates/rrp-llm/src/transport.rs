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

//! HTTP transport shared by every LLM client: JSON POST with exponential
//! backoff on 429/5xx, immediate failure on other 4xx (§4.5).

use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{LlmError, LlmResult};

const BASE_DELAY_MS: u64 = 1000;

/// Builds a fresh request on every attempt (retries need an unsent builder)
/// and retries on 429/5xx up to `max_retries` times with exponential backoff.
pub async fn post_json_with_retry<F>(model: &str, max_retries: u32, make_request: F) -> LlmResult<Value>
where
  F: Fn() -> RequestBuilder,
{
  let mut last_err = None;

  for attempt in 1..=max_retries.max(1) {
    let response = match make_request().send().await {
      Ok(resp) => resp,
      Err(e) => {
        last_err = Some(LlmError::from(e));
        if attempt < max_retries {
          backoff(attempt).await;
        }
        continue;
      }
    };

    let status = response.status();
    if status == 429 || status.is_server_error() {
      let text = response.text().await.unwrap_or_default();
      warn!("{model} attempt {attempt} failed with {status}: {text}");
      last_err = Some(LlmError::RateLimitExceeded { model: model.to_string(), retry_after_secs: 1 << (attempt - 1) });
      if attempt < max_retries {
        backoff(attempt).await;
      }
      continue;
    }

    if !status.is_success() {
      let text = response.text().await.unwrap_or_default();
      return Err(LlmError::UpstreamError { model: model.to_string(), status: status.as_u16(), message: text });
    }

    let text = response.text().await?;
    debug!("{model} raw response: {text}");
    return serde_json::from_str(&text).map_err(|e| LlmError::ResponseParseFailed(format!("{model}: {e}")));
  }

  Err(last_err.unwrap_or(LlmError::UpstreamError {
    model: model.to_string(),
    status: 0,
    message: "exhausted retries".to_string(),
  }))
}

async fn backoff(attempt: u32) {
  tokio::time::sleep(Duration::from_millis(BASE_DELAY_MS * (1 << (attempt - 1)))).await;
}

pub fn new_http_client(timeout_secs: u64) -> Client {
  Client::builder()
    .timeout(Duration::from_secs(timeout_secs))
    .user_agent("rrp-llm/1.0")
    .build()
    .expect("failed to build HTTP client")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_new_http_client_builds() {
    let _client = new_http_client(20);
  }
}
