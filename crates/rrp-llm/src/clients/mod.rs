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

//! Per-model LLM adapters, each producing a normalized `{relevance, sentiment,
//! summary}` triple from its own wire format (§4.5).

pub mod gemini;
pub mod openai;
pub mod xai;

use async_trait::async_trait;
use rrp_core::config::LlmClientConfig;
use serde_json::Value;

use crate::error::{LlmError, LlmResult};
use crate::normalize;

pub use gemini::GeminiClient;
pub use openai::OpenAiClient;
pub use xai::XaiClient;

/// Normalized output of a single client call, before ensemble aggregation.
#[derive(Debug, Clone)]
pub struct ClientOutcome {
  pub relevance: Option<bool>,
  pub sentiment: Option<f64>,
  pub summary: String,
}

#[async_trait]
pub trait LlmClient: Send + Sync {
  async fn summarize_and_score(
    &self,
    asset_symbol: &str,
    url: &str,
    published_at: Option<&str>,
    title: Option<&str>,
  ) -> LlmResult<ClientOutcome>;

  /// Model tag carried on every vote, e.g. `"gpt-4o-mini"`.
  fn model(&self) -> &str;
}

/// One raw completion attempt, before fence-stripping/JSON parsing.
pub(crate) struct RawCompletion {
  pub content: Option<String>,
  pub hit_token_limit: bool,
}

/// Outcome of evaluating one completion attempt against the output-token
/// auto-scaling rule (§4.5): an empty/truncated completion or a JSON parse
/// failure bumps `max_tokens` by +400 up to the cap and signals a retry.
pub(crate) enum AutoscaleStep {
  Done(ClientOutcome),
  Retry(u32),
}

pub(crate) fn evaluate_completion(
  model: &str,
  completion: &RawCompletion,
  current_max_tokens: u32,
  config: &LlmClientConfig,
) -> LlmResult<AutoscaleStep> {
  let can_retry = config.auto_scale_max_tokens && current_max_tokens < config.max_tokens_cap;
  let next_max_tokens = || (current_max_tokens + 400).min(config.max_tokens_cap);

  let content = match completion.content.as_deref() {
    Some(c) if !c.trim().is_empty() => c,
    _ => {
      return if can_retry {
        Ok(AutoscaleStep::Retry(next_max_tokens()))
      } else {
        Err(LlmError::ResponseParseFailed(format!("{model}: empty completion")))
      };
    }
  };

  let stripped = normalize::strip_json_fence(content);
  match serde_json::from_str::<Value>(stripped) {
    Ok(parsed) => Ok(AutoscaleStep::Done(ClientOutcome {
      relevance: normalize::normalize_relevance(parsed.get("relevance")),
      sentiment: normalize::normalize_sentiment(parsed.get("sentiment")),
      summary: normalize::normalize_summary(parsed.get("summary")),
    })),
    Err(e) => {
      if can_retry {
        Ok(AutoscaleStep::Retry(next_max_tokens()))
      } else {
        Err(LlmError::ResponseParseFailed(format!("{model}: {e}")))
      }
    }
  }
}
