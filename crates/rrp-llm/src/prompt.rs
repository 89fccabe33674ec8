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

//! Loads and fills the `summarize_and_score` prompt template shared by every client.

use crate::error::{LlmError, LlmResult};

pub fn render_prompt(
  prompt_file: &str,
  asset_symbol: &str,
  url: &str,
  published_at: Option<&str>,
  title: Option<&str>,
) -> LlmResult<String> {
  let template = std::fs::read_to_string(prompt_file)
    .map_err(|e| LlmError::ConfigMissing(format!("prompt file {prompt_file}: {e}")))?;

  Ok(
    template
      .replace("{{asset_symbol}}", asset_symbol)
      .replace("{{url}}", url)
      .replace("{{published_at}}", published_at.unwrap_or("null"))
      .replace("{{title}}", title.unwrap_or("")),
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::io::Write;

  #[test]
  fn test_render_prompt_substitutes_all_placeholders() {
    let mut file = tempfile_like();
    write!(file.0, "{{{{asset_symbol}}}} {{{{url}}}} {{{{published_at}}}} {{{{title}}}}").unwrap();
    let rendered =
      render_prompt(&file.1, "BTC", "https://x.com/a", Some("2024-01-01T00:00:00Z"), Some("headline")).unwrap();
    assert_eq!(rendered, "BTC https://x.com/a 2024-01-01T00:00:00Z headline");
  }

  #[test]
  fn test_render_prompt_missing_file_errors() {
    let result = render_prompt("/nonexistent/prompt.txt", "BTC", "https://x.com", None, None);
    assert!(result.is_err());
  }

  fn tempfile_like() -> (std::fs::File, String) {
    let path = std::env::temp_dir().join(format!("rrp-llm-prompt-test-{:?}.txt", std::thread::current().id()));
    let file = std::fs::File::create(&path).unwrap();
    (file, path.to_string_lossy().to_string())
  }
}
