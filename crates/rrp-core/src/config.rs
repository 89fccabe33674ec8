/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-dot-]browne[-at-]dwightjbrowne[-dot-]com
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

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Statically declared configuration record, enumerating every option the
/// pipeline reads from `config.yaml`. Replaces free-form option lookup with
/// a typed record so every crate sees the same shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RrpConfig {
  pub database: DatabaseConfig,
  pub ensemble: EnsembleConfig,
  pub openai: LlmClientConfig,
  pub gemini: LlmClientConfig,
  pub xai: LlmClientConfig,
  pub gdelt: GdeltConfig,
  pub google_news: GoogleNewsConfig,
  pub news_query: NewsQueryConfig,
  pub news_domain_filter: NewsDomainFilterConfig,
  pub url_harvest: UrlHarvestConfig,
  pub coingecko: CoinGeckoConfig,
}

impl Default for RrpConfig {
  fn default() -> Self {
    Self {
      database: DatabaseConfig::default(),
      ensemble: EnsembleConfig::default(),
      openai: LlmClientConfig::default_for("gpt-4o-mini"),
      gemini: LlmClientConfig::default_for("gemini-1.5-flash"),
      xai: LlmClientConfig::default_for("grok-beta"),
      gdelt: GdeltConfig::default(),
      google_news: GoogleNewsConfig::default(),
      news_query: NewsQueryConfig::default(),
      news_domain_filter: NewsDomainFilterConfig::default(),
      url_harvest: UrlHarvestConfig::default(),
      coingecko: CoinGeckoConfig::default(),
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
  pub default_path: String,
}

impl Default for DatabaseConfig {
  fn default() -> Self {
    Self { default_path: "rrp.db".to_string() }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnsembleConfig {
  pub use_openai: bool,
  pub use_gemini: bool,
  pub use_xai: bool,
}

impl Default for EnsembleConfig {
  fn default() -> Self {
    Self { use_openai: true, use_gemini: false, use_xai: false }
  }
}

/// Shared shape for each LLM client's config block (`openai`/`gemini`/`xai`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmClientConfig {
  pub model: String,
  pub endpoint: String,
  pub timeout_secs: u64,
  pub prompt_file: String,
  pub max_tokens: u32,
  pub max_tokens_cap: u32,
  pub auto_scale_max_tokens: bool,
  pub temperature: f64,
  pub response_format: String,
  pub max_retries: u32,
  /// Never read from the config file; populated by [`RrpConfig::with_env_overrides`].
  pub api_key: Option<String>,
}

impl LlmClientConfig {
  fn default_for(model: &str) -> Self {
    Self {
      model: model.to_string(),
      endpoint: String::new(),
      timeout_secs: 20,
      prompt_file: "prompts/summarize_and_score.txt".to_string(),
      max_tokens: 600,
      max_tokens_cap: 2000,
      auto_scale_max_tokens: true,
      temperature: 0.0,
      response_format: "json_object".to_string(),
      max_retries: 3,
      api_key: None,
    }
  }
}

impl Default for LlmClientConfig {
  fn default() -> Self {
    Self::default_for("")
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GdeltConfig {
  pub enabled: bool,
  pub timeout_secs: u64,
  pub max_retries: u32,
}

impl Default for GdeltConfig {
  fn default() -> Self {
    Self { enabled: true, timeout_secs: 20, max_retries: 3 }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleNewsConfig {
  pub enabled: bool,
  pub hl: String,
  pub gl: String,
  pub ceid: String,
  pub timeout_secs: u64,
  pub resolve_redirects: bool,
}

impl Default for GoogleNewsConfig {
  fn default() -> Self {
    Self {
      enabled: true,
      hl: "en-US".to_string(),
      gl: "US".to_string(),
      ceid: "US:en".to_string(),
      timeout_secs: 20,
      resolve_redirects: true,
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsQueryConfig {
  pub major_assets_without_context: HashSet<String>,
  pub enforce_context_assets: HashSet<String>,
}

impl Default for NewsQueryConfig {
  fn default() -> Self {
    Self {
      major_assets_without_context: ["BTC", "ETH"].iter().map(|s| s.to_string()).collect(),
      enforce_context_assets: HashSet::new(),
    }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsDomainFilterConfig {
  pub enforce: bool,
}

impl Default for NewsDomainFilterConfig {
  fn default() -> Self {
    Self { enforce: false }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlHarvestConfig {
  pub max_workers: usize,
}

impl Default for UrlHarvestConfig {
  fn default() -> Self {
    Self { max_workers: 4 }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoinGeckoConfig {
  pub api_base: String,
  pub api_key: Option<String>,
  pub timeout_secs: u64,
  pub max_retries: u32,
  pub initial_backoff_ms: u64,
}

impl Default for CoinGeckoConfig {
  fn default() -> Self {
    Self {
      api_base: "https://api.coingecko.com/api/v3".to_string(),
      api_key: None,
      timeout_secs: 20,
      max_retries: 3,
      initial_backoff_ms: 1000,
    }
  }
}

impl RrpConfig {
  /// Load configuration from a YAML file, falling back to defaults (with a
  /// warning) when the file does not exist.
  pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    if !path.exists() {
      tracing::warn!(path = %path.display(), "config file not found, using defaults");
      return Ok(Self::default());
    }
    let contents = std::fs::read_to_string(path)
      .map_err(|e| crate::error::Error::Config(format!("reading {}: {e}", path.display())))?;
    let config: Self = serde_yaml::from_str(&contents)?;
    Ok(config)
  }

  /// Apply environment-variable overrides for API keys, matching §6's list
  /// of secrets that are never stored in the config file.
  pub fn with_env_overrides(mut self) -> Self {
    if let Ok(key) = std::env::var("COINGECKO_API_KEY") {
      self.coingecko.api_key = Some(key);
    }
    if let Ok(base) = std::env::var("COINGECKO_API_BASE") {
      self.coingecko.api_base = base;
    }
    if let Ok(key) = std::env::var("OPENAI_API_KEY") {
      self.openai.api_key = Some(key);
    }
    if let Ok(key) = std::env::var("GEMINI_API_KEY") {
      self.gemini.api_key = Some(key);
    }
    if let Ok(key) = std::env::var("XAI_API_KEY") {
      self.xai.api_key = Some(key);
    }
    self
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_config_has_openai_enabled() {
    let config = RrpConfig::default();
    assert!(config.ensemble.use_openai);
    assert!(!config.ensemble.use_gemini);
  }

  #[test]
  fn test_missing_file_falls_back_to_defaults() {
    let config = RrpConfig::from_file("/nonexistent/path/config.yaml").unwrap();
    assert_eq!(config.database.default_path, "rrp.db");
  }

  #[test]
  fn test_from_file_parses_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, "database:\n  default_path: custom.db\n").unwrap();
    let config = RrpConfig::from_file(&path).unwrap();
    assert_eq!(config.database.default_path, "custom.db");
    assert!(config.ensemble.use_openai);
  }

  #[test]
  fn test_env_override_for_coingecko_key() {
    std::env::set_var("COINGECKO_API_KEY", "test-key-123");
    let config = RrpConfig::default().with_env_overrides();
    assert_eq!(config.coingecko.api_key.as_deref(), Some("test-key-123"));
    std::env::remove_var("COINGECKO_API_KEY");
  }
}
