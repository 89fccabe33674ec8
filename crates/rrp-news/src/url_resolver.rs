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

//! Google News URL resolver: unwraps consent/interstitial pages to the
//! publisher URL (§4.3).

use async_trait::async_trait;
use rrp_core::config::GoogleNewsConfig;
use url::Url;

/// Outcome tag recorded per resolution call, for the metrics port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutcome {
  ResolvedPublisher,
  FallbackNews,
  HeadlessResolved,
  HeadlessUnavailable,
  Passthrough,
  ConsentMissingContinue,
  Error,
}

impl ResolveOutcome {
  pub fn as_str(self) -> &'static str {
    match self {
      ResolveOutcome::ResolvedPublisher => "resolved_publisher",
      ResolveOutcome::FallbackNews => "fallback_news",
      ResolveOutcome::HeadlessResolved => "headless_resolved",
      ResolveOutcome::HeadlessUnavailable => "headless_unavailable",
      ResolveOutcome::Passthrough => "passthrough",
      ResolveOutcome::ConsentMissingContinue => "consent_missing_continue",
      ResolveOutcome::Error => "error",
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveResult {
  pub url: Option<String>,
  pub outcome: ResolveOutcome,
}

/// Optional headless-browser fallback for URLs stuck behind an interstitial.
/// Not implemented in the core; injectable by the CLI/operator layer.
#[async_trait]
pub trait HeadlessResolveStrategy: Send + Sync {
  async fn resolve(&self, url: &str) -> Option<String>;
}

enum UrlState {
  Consent,
  NewsGoogle,
  Interstitial,
  Publisher,
}

fn classify(url: &Url) -> UrlState {
  let host = url.host_str().unwrap_or_default();
  if host.starts_with("consent.") || host.contains(".consent.") {
    return UrlState::Consent;
  }
  if host == "news.google.com" {
    let path = url.path();
    let has_interstitial_continue = url
      .query_pairs()
      .any(|(k, v)| k == "continue" && v.contains("news.google.com"));
    if path.starts_with("/sorry") || has_interstitial_continue {
      return UrlState::Interstitial;
    }
    return UrlState::NewsGoogle;
  }
  UrlState::Publisher
}

fn is_blocked_host(host: &str) -> bool {
  host == "news.google.com" || host.starts_with("consent.") || host.contains(".consent.")
}

pub struct UrlResolver {
  client: reqwest::Client,
  config: GoogleNewsConfig,
  headless: Option<Box<dyn HeadlessResolveStrategy>>,
}

impl UrlResolver {
  pub fn new(config: GoogleNewsConfig) -> Self {
    Self { client: reqwest::Client::new(), config, headless: None }
  }

  pub fn with_headless_strategy(mut self, strategy: Box<dyn HeadlessResolveStrategy>) -> Self {
    self.headless = Some(strategy);
    self
  }

  /// Bound on consent-redirect hops chased before giving up. A consent page
  /// should resolve in one hop; this only guards against a redirect loop.
  const MAX_CONSENT_HOPS: u8 = 5;

  pub async fn resolve(&self, input: &str) -> ResolveResult {
    let mut current = input.to_string();

    for _ in 0..Self::MAX_CONSENT_HOPS {
      let parsed = match Url::parse(&current) {
        Ok(u) => u,
        Err(_) => return ResolveResult { url: None, outcome: ResolveOutcome::Error },
      };

      match classify(&parsed) {
        UrlState::Consent => {
          let continue_url = parsed.query_pairs().find(|(k, _)| k == "continue").map(|(_, v)| v.to_string());
          match continue_url {
            Some(target) if !target.is_empty() => {
              current = target;
              continue;
            }
            _ => return ResolveResult { url: None, outcome: ResolveOutcome::ConsentMissingContinue },
          }
        }
        UrlState::NewsGoogle => return self.resolve_news_google(&parsed).await,
        UrlState::Interstitial => return self.resolve_interstitial(&current).await,
        UrlState::Publisher => {
          return ResolveResult { url: Some(current), outcome: ResolveOutcome::Passthrough };
        }
      }
    }

    ResolveResult { url: None, outcome: ResolveOutcome::Error }
  }

  async fn resolve_news_google(&self, parsed: &Url) -> ResolveResult {
    let mut url = parsed.clone();
    {
      let mut pairs = url.query_pairs_mut();
      pairs.clear();
      for (k, v) in parsed.query_pairs() {
        pairs.append_pair(&k, &v);
      }
      pairs.append_pair("hl", &self.config.hl);
      pairs.append_pair("gl", &self.config.gl);
      pairs.append_pair("ceid", &self.config.ceid);
    }

    let response = self
      .client
      .get(url.as_str())
      .timeout(std::time::Duration::from_secs(self.config.timeout_secs))
      .send()
      .await;

    match response {
      Ok(resp) => {
        let final_url = resp.url().clone();
        let host = final_url.host_str().unwrap_or_default();
        if is_blocked_host(host) {
          ResolveResult { url: None, outcome: ResolveOutcome::FallbackNews }
        } else {
          ResolveResult { url: Some(final_url.to_string()), outcome: ResolveOutcome::ResolvedPublisher }
        }
      }
      Err(_) => ResolveResult { url: None, outcome: ResolveOutcome::Error },
    }
  }

  async fn resolve_interstitial(&self, input: &str) -> ResolveResult {
    if let Some(strategy) = &self.headless {
      match strategy.resolve(input).await {
        Some(resolved) => ResolveResult { url: Some(resolved), outcome: ResolveOutcome::HeadlessResolved },
        None => ResolveResult { url: None, outcome: ResolveOutcome::HeadlessUnavailable },
      }
    } else {
      ResolveResult { url: None, outcome: ResolveOutcome::HeadlessUnavailable }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn config() -> GoogleNewsConfig {
    GoogleNewsConfig::default()
  }

  #[tokio::test]
  async fn test_publisher_url_passthrough() {
    let resolver = UrlResolver::new(config());
    let result = resolver.resolve("https://example.com/article").await;
    assert_eq!(result.outcome, ResolveOutcome::Passthrough);
    assert_eq!(result.url.as_deref(), Some("https://example.com/article"));
  }

  #[tokio::test]
  async fn test_consent_without_continue_fails() {
    let resolver = UrlResolver::new(config());
    let result = resolver.resolve("https://consent.google.com/ml?gl=US").await;
    assert_eq!(result.outcome, ResolveOutcome::ConsentMissingContinue);
  }

  #[tokio::test]
  async fn test_consent_with_continue_chases_the_redirect_chain() {
    // The consent page's `continue=` target lands back on an interstitial, so
    // resolution must keep chasing it rather than stopping at the raw
    // consent-redirect target.
    let resolver = UrlResolver::new(config());
    let result = resolver
      .resolve("https://consent.google.com/ml?continue=https://news.google.com/sorry/index?continue=https://news.google.com/rss/articles/abc")
      .await;
    assert_eq!(result.outcome, ResolveOutcome::HeadlessUnavailable);
    assert!(result.url.is_none());
  }

  #[tokio::test]
  async fn test_interstitial_without_headless_is_unavailable() {
    let resolver = UrlResolver::new(config());
    let result = resolver.resolve("https://news.google.com/sorry/index").await;
    assert_eq!(result.outcome, ResolveOutcome::HeadlessUnavailable);
  }

  #[tokio::test]
  async fn test_malformed_url_is_error() {
    let resolver = UrlResolver::new(config());
    let result = resolver.resolve("not a url").await;
    assert_eq!(result.outcome, ResolveOutcome::Error);
  }
}
