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

//! xAI (Grok) chat-completions client, using a strict JSON schema response
//! format (§4.5).

use async_trait::async_trait;
use reqwest::Client;
use rrp_core::config::LlmClientConfig;
use serde_json::{json, Value};

use crate::clients::{evaluate_completion, AutoscaleStep, ClientOutcome, LlmClient, RawCompletion};
use crate::error::{LlmError, LlmResult};
use crate::prompt::render_prompt;
use crate::transport::{new_http_client, post_json_with_retry};

pub struct XaiClient {
  client: Client,
  config: LlmClientConfig,
}

impl XaiClient {
  pub fn new(config: LlmClientConfig) -> Self {
    Self { client: new_http_client(config.timeout_secs), config }
  }

  fn endpoint(&self) -> &str {
    if self.config.endpoint.is_empty() {
      "https://api.x.ai/v1/chat/completions"
    } else {
      &self.config.endpoint
    }
  }
}

#[async_trait]
impl LlmClient for XaiClient {
  async fn summarize_and_score(
    &self,
    asset_symbol: &str,
    url: &str,
    published_at: Option<&str>,
    title: Option<&str>,
  ) -> LlmResult<ClientOutcome> {
    let api_key = self.config.api_key.clone().ok_or_else(|| LlmError::ConfigMissing("XAI_API_KEY".to_string()))?;
    let user_prompt = render_prompt(&self.config.prompt_file, asset_symbol, url, published_at, title)?;
    let endpoint = self.endpoint().to_string();

    let mut max_tokens = self.config.max_tokens;
    loop {
      let body = json!({
        "model": self.config.model,
        "messages": [
          {"role": "system", "content": "You are a precise financial analyst."},
          {"role": "user", "content": &user_prompt},
        ],
        "temperature": self.config.temperature,
        "max_tokens": max_tokens,
        "response_format": {
          "type": "json_schema",
          "json_schema": {
            "name": "analysis_response",
            "schema": {
              "type": "object",
              "properties": {
                "relevance": {"type": "boolean"},
                "summary": {"type": "string"},
                "sentiment": {"type": "number", "minimum": -1, "maximum": 1},
              },
              "required": ["relevance", "summary", "sentiment"],
              "additionalProperties": false,
            },
          },
          "strict": true,
        },
      });

      let data = post_json_with_retry(&self.config.model, self.config.max_retries, || {
        self.client.post(&endpoint).bearer_auth(&api_key).json(&body)
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
  let content = data
    .get("choices")
    .and_then(Value::as_array)
    .and_then(|c| c.first())
    .and_then(|c| c.get("message"))
    .and_then(|m| m.get("content"))
    .and_then(Value::as_str)
    .map(str::to_string);
  let finish_reason = data
    .get("choices")
    .and_then(Value::as_array)
    .and_then(|c| c.first())
    .and_then(|c| c.get("finish_reason"))
    .and_then(Value::as_str);
  RawCompletion { content, hit_token_limit: finish_reason == Some("length") }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_extract_completion_reads_message_content() {
    let data = json!({"choices": [{"message": {"content": "{\"relevance\": false}"}, "finish_reason": "stop"}]});
    let completion = extract_completion(&data);
    assert_eq!(completion.content.as_deref(), Some("{\"relevance\": false}"));
  }

  #[test]
  fn test_default_endpoint_used_when_unconfigured() {
    let config = LlmClientConfig {
      model: "grok-beta".to_string(),
      endpoint: String::new(),
      timeout_secs: 20,
      prompt_file: String::new(),
      max_tokens: 1200,
      max_tokens_cap: 4096,
      auto_scale_max_tokens: true,
      temperature: 0.0,
      response_format: "json_object".to_string(),
      max_retries: 3,
      api_key: None,
    };
    let client = XaiClient::new(config);
    assert_eq!(client.endpoint(), "https://api.x.ai/v1/chat/completions");
  }
}
