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

//! Google Gemini `generateContent` client (§4.5).

use async_trait::async_trait;
use reqwest::Client;
use rrp_core::config::LlmClientConfig;
use serde_json::{json, Value};

use crate::clients::{evaluate_completion, AutoscaleStep, ClientOutcome, LlmClient, RawCompletion};
use crate::error::{LlmError, LlmResult};
use crate::prompt::render_prompt;
use crate::transport::{new_http_client, post_json_with_retry};

pub struct GeminiClient {
  client: Client,
  config: LlmClientConfig,
}

impl GeminiClient {
  pub fn new(config: LlmClientConfig) -> Self {
    Self { client: new_http_client(config.timeout_secs), config }
  }

  fn endpoint(&self) -> String {
    let base = if self.config.endpoint.is_empty() {
      "https://generativelanguage.googleapis.com/v1beta/models"
    } else {
      self.config.endpoint.trim_end_matches('/')
    };
    format!("{base}/{}:generateContent", self.config.model)
  }
}

#[async_trait]
impl LlmClient for GeminiClient {
  async fn summarize_and_score(
    &self,
    asset_symbol: &str,
    url: &str,
    published_at: Option<&str>,
    title: Option<&str>,
  ) -> LlmResult<ClientOutcome> {
    let api_key =
      self.config.api_key.clone().ok_or_else(|| LlmError::ConfigMissing("GEMINI_API_KEY".to_string()))?;
    let user_prompt = render_prompt(&self.config.prompt_file, asset_symbol, url, published_at, title)?;
    let endpoint = self.endpoint();
    let url_with_key = format!("{endpoint}?key={api_key}");

    let mut max_tokens = self.config.max_tokens;
    loop {
      let body = json!({
        "contents": [{"parts": [{"text": &user_prompt}]}],
        "generationConfig": {
          "temperature": self.config.temperature,
          "maxOutputTokens": max_tokens,
          "response_mime_type": "application/json",
        },
      });

      let data = post_json_with_retry(&self.config.model, self.config.max_retries, || {
        self.client.post(&url_with_key).json(&body)
      })
      .await?;

      let completion = extract_completion(&data);
      match evaluate_completion(&self.config.model, &completion, max_tokens, &self.config)? {
        AutoscaleStep::Done(outcome) => return Ok(outcome),
        AutoscaleStep::Retry(next) => max_tokens = next,
      }
    }
  }

  fn model(&self) -> &str {
    &self.config.model
  }
}

fn extract_completion(data: &Value) -> RawCompletion {
  let candidate = data.get("candidates").and_then(Value::as_array).and_then(|c| c.first());
  let finish_reason = candidate.and_then(|c| c.get("finishReason")).and_then(Value::as_str);
  let content = candidate
    .and_then(|c| c.get("content"))
    .and_then(|c| c.get("parts"))
    .and_then(Value::as_array)
    .and_then(|parts| parts.first())
    .and_then(|p| p.get("text"))
    .and_then(Value::as_str)
    .map(str::to_string);
  RawCompletion { content, hit_token_limit: finish_reason == Some("MAX_TOKENS") }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_extract_completion_reads_parts_text() {
    let data = json!({"candidates": [{"content": {"parts": [{"text": "{\"relevance\": true}"}]}, "finishReason": "STOP"}]});
    let completion = extract_completion(&data);
    assert_eq!(completion.content.as_deref(), Some("{\"relevance\": true}"));
    assert!(!completion.hit_token_limit);
  }

  #[test]
  fn test_extract_completion_detects_max_tokens() {
    let data = json!({"candidates": [{"content": {"parts": [{"text": "partial"}]}, "finishReason": "MAX_TOKENS"}]});
    assert!(extract_completion(&data).hit_token_limit);
  }

  #[test]
  fn test_endpoint_includes_model_and_action() {
    let config = LlmClientConfig {
      model: "gemini-1.5-flash".to_string(),
      endpoint: String::new(),
      timeout_secs: 20,
      prompt_file: String::new(),
      max_tokens: 600,
      max_tokens_cap: 2000,
      auto_scale_max_tokens: true,
      temperature: 0.0,
      response_format: "json_object".to_string(),
      max_retries: 3,
      api_key: None,
    };
    let client = GeminiClient::new(config);
    assert!(client.endpoint().ends_with("gemini-1.5-flash:generateContent"));
  }
}
