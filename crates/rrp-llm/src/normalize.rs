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

//! Shared response normalization rules applied inside every LLM client (§4.5).

use serde_json::Value;

const TRUTHY: &[&str] = &["true", "1", "yes", "y", "ja"];
const FALSY: &[&str] = &["false", "0", "no", "n", "nein"];

/// Coerces a raw `relevance` value to `bool`. Unparseable values yield `None`
/// (undetermined), which callers that need a strict bool treat as `false`.
pub fn normalize_relevance(value: Option<&Value>) -> Option<bool> {
  match value? {
    Value::Bool(b) => Some(*b),
    Value::Number(n) => n.as_f64().map(|f| f != 0.0),
    Value::String(s) => {
      let lower = s.trim().to_ascii_lowercase();
      if TRUTHY.contains(&lower.as_str()) {
        Some(true)
      } else if FALSY.contains(&lower.as_str()) {
        Some(false)
      } else {
        None
      }
    }
    _ => None,
  }
}

/// Coerces a raw `sentiment` value to a float clamped to `[-1, 1]`.
pub fn normalize_sentiment(value: Option<&Value>) -> Option<f64> {
  let raw = match value? {
    Value::Number(n) => n.as_f64()?,
    Value::String(s) => s.trim().parse::<f64>().ok()?,
    _ => return None,
  };
  Some(raw.clamp(-1.0, 1.0))
}

pub fn normalize_summary(value: Option<&Value>) -> String {
  value.and_then(Value::as_str).unwrap_or_default().trim().to_string()
}

/// Strips a leading/trailing ```` ```json ... ``` ```` or ```` ``` ... ``` ```` fence, if present.
pub fn strip_json_fence(text: &str) -> &str {
  let trimmed = text.trim();
  let Some(inner) = trimmed.strip_prefix("```") else { return trimmed };
  let inner = inner.strip_prefix("json").unwrap_or(inner);
  inner.strip_suffix("```").unwrap_or(inner).trim()
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  #[test]
  fn test_normalize_relevance_truthy_strings() {
    assert_eq!(normalize_relevance(Some(&json!("yes"))), Some(true));
    assert_eq!(normalize_relevance(Some(&json!("Ja"))), Some(true));
  }

  #[test]
  fn test_normalize_relevance_falsy_strings() {
    assert_eq!(normalize_relevance(Some(&json!("no"))), Some(false));
  }

  #[test]
  fn test_normalize_relevance_numeric() {
    assert_eq!(normalize_relevance(Some(&json!(0))), Some(false));
    assert_eq!(normalize_relevance(Some(&json!(3))), Some(true));
  }

  #[test]
  fn test_normalize_relevance_unrecognized_is_none() {
    assert_eq!(normalize_relevance(Some(&json!("maybe"))), None);
    assert_eq!(normalize_relevance(None), None);
  }

  #[test]
  fn test_normalize_sentiment_clamps() {
    assert_eq!(normalize_sentiment(Some(&json!(5.0))), Some(1.0));
    assert_eq!(normalize_sentiment(Some(&json!(-5.0))), Some(-1.0));
    assert_eq!(normalize_sentiment(Some(&json!(0.3))), Some(0.3));
  }

  #[test]
  fn test_strip_json_fence_removes_language_tag() {
    let input = "```json\n{\"a\": 1}\n```";
    assert_eq!(strip_json_fence(input), "{\"a\": 1}");
  }

  #[test]
  fn test_strip_json_fence_passthrough_without_fence() {
    assert_eq!(strip_json_fence("{\"a\": 1}"), "{\"a\": 1}");
  }
}
