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

//! Google News RSS adapter: one feed fetch per criteria, window-filtered,
//! with optional publisher-link resolution (§4.2).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rrp_core::config::GoogleNewsConfig;
use rrp_models::{HarvestCriteria, RawDocument};
use std::sync::Arc;

use crate::adapters::NewsSourceAdapter;
use crate::error::NewsResult;
use crate::url_resolver::UrlResolver;

pub struct GoogleRssAdapter {
  client: reqwest::Client,
  config: GoogleNewsConfig,
  resolver: Option<Arc<UrlResolver>>,
}

impl GoogleRssAdapter {
  pub fn new(config: GoogleNewsConfig, resolver: Option<Arc<UrlResolver>>) -> Self {
    Self { client: reqwest::Client::new(), config, resolver }
  }

  fn feed_url(&self, rss_query: &str) -> String {
    format!(
      "https://news.google.com/rss/search?q={}&hl={}&gl={}&ceid={}",
      crate::adapters::urlencode(rss_query),
      self.config.hl,
      self.config.gl,
      self.config.ceid,
    )
  }
}

#[async_trait]
impl NewsSourceAdapter for GoogleRssAdapter {
  async fn fetch_documents(&self, rss_query: &str, criteria: &HarvestCriteria) -> NewsResult<Vec<RawDocument>> {
    if !self.config.enabled {
      return Ok(Vec::new());
    }

    let url = self.feed_url(rss_query);
    let response = self
      .client
      .get(&url)
      .timeout(std::time::Duration::from_secs(self.config.timeout_secs))
      .send()
      .await?;
    let bytes = response.bytes().await?;
    let channel = rss::Channel::read_from(&bytes[..])?;

    let mut documents = Vec::new();
    for item in channel.items() {
      let Some(link) = item.link() else { continue };
      let published_at = item.pub_date().and_then(parse_rfc2822_utc);
      if let Some(published_at) = published_at {
        if published_at < criteria.start || published_at > criteria.end {
          continue;
        }
      }

      let resolved_link = if self.config.resolve_redirects {
        match &self.resolver {
          Some(resolver) => resolver.resolve(link).await.url.unwrap_or_else(|| link.to_string()),
          None => link.to_string(),
        }
      } else {
        link.to_string()
      };

      let source_title = item.source().map(|s| s.title().unwrap_or_default().to_string());

      documents.push(RawDocument {
        url: Some(resolved_link),
        og_url: None,
        link: Some(link.to_string()),
        title: item.title().map(str::to_string),
        name: None,
        source: source_title.or_else(|| Some("google_rss".to_string())),
        source_name: Some("google_rss".to_string()),
        published_at: published_at.map(|dt| dt.to_rfc3339()),
        pub_date: item.pub_date().map(str::to_string),
        seen_at: None,
        raw: serde_json::json!({ "title": item.title(), "link": link }),
      });
    }

    Ok(documents)
  }

  fn source_name(&self) -> &'static str {
    "google_rss"
  }
}

fn parse_rfc2822_utc(input: &str) -> Option<DateTime<Utc>> {
  DateTime::parse_from_rfc2822(input).ok().map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_feed_url_includes_locale_params() {
    let adapter = GoogleRssAdapter::new(GoogleNewsConfig::default(), None);
    let url = adapter.feed_url("BTC crypto");
    assert!(url.contains("hl=en-US"));
    assert!(url.contains("gl=US"));
  }

  #[test]
  fn test_parse_rfc2822_utc() {
    let parsed = parse_rfc2822_utc("Mon, 01 Jan 2024 12:00:00 GMT");
    assert!(parsed.is_some());
  }
}
