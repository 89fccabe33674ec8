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

//! Collects, validates, dedupes, and persists candidate URLs (§4.4).

use chrono::Utc;
use rrp_core::config::{NewsDomainFilterConfig, NewsQueryConfig};
use rrp_db::models::NewUrlHarvestRow;
use rrp_db::{DomainPolicyRepository, HarvestRepository};
use rrp_models::{Asset, HarvestCounters, HarvestCriteria, RawDocument};
use tracing::warn;
use url::Url;

use crate::adapters::NewsSourceAdapter;
use crate::error::NewsResult;
use crate::query_builder;

const BLOCKED_EXTENSIONS: &[&str] = &[".jpg", ".png", ".gif", ".pdf"];

struct Canonical {
  url: String,
  title: String,
  source: String,
  published_at: chrono::NaiveDateTime,
}

fn first_some<'a>(options: &[&'a Option<String>]) -> Option<&'a str> {
  options.iter().find_map(|o| o.as_deref())
}

fn canonicalize(doc: &RawDocument) -> Option<Canonical> {
  let url = first_some(&[&doc.og_url, &doc.url, &doc.link])?.to_string();
  let title = first_some(&[&doc.title, &doc.name]).unwrap_or_default().to_string();
  let source = first_some(&[&doc.source, &doc.source_name]).unwrap_or_default().to_string();
  let published_raw = first_some(&[&doc.published_at, &doc.pub_date, &doc.seen_at]);
  let published_at = match published_raw {
    Some(raw) => rrp_core::time::parse_utc(raw).ok()?.naive_utc(),
    None => Utc::now().naive_utc(),
  };
  Some(Canonical { url, title, source, published_at })
}

fn is_valid_url(url: &str) -> bool {
  let Ok(parsed) = Url::parse(url) else { return false };
  if parsed.scheme() != "http" && parsed.scheme() != "https" {
    return false;
  }
  let path = parsed.path().to_ascii_lowercase();
  !BLOCKED_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Fans candidate documents in from every configured source adapter, then
/// validates, dedupes, and persists them.
pub struct HarvestOrchestrator {
  adapters: Vec<Box<dyn NewsSourceAdapter>>,
  news_query: NewsQueryConfig,
  domain_filter: NewsDomainFilterConfig,
}

impl HarvestOrchestrator {
  pub fn new(
    adapters: Vec<Box<dyn NewsSourceAdapter>>,
    news_query: NewsQueryConfig,
    domain_filter: NewsDomainFilterConfig,
  ) -> Self {
    Self { adapters, news_query, domain_filter }
  }

  pub async fn run(
    &self,
    asset: &Asset,
    criteria: &HarvestCriteria,
    harvest_repo: &impl HarvestRepository,
    domain_policy: &impl DomainPolicyRepository,
  ) -> NewsResult<HarvestCounters> {
    let core_query = query_builder::build_core(asset, &self.news_query);
    let rss_query =
      query_builder::build_rss_query(asset, &self.news_query, criteria.start.date_naive(), criteria.end.date_naive());

    let mut raw_docs = Vec::new();
    for adapter in &self.adapters {
      let query = if adapter.source_name() == "google_rss" { &rss_query } else { &core_query };
      match adapter.fetch_documents(query, criteria).await {
        Ok(mut docs) => raw_docs.append(&mut docs),
        Err(e) => warn!("source adapter {} failed: {e}", adapter.source_name()),
      }
    }

    let mut counters = HarvestCounters { total_docs: raw_docs.len(), ..Default::default() };

    for doc in &raw_docs {
      let Some(canonical) = canonicalize(doc) else {
        counters.rejected_invalid += 1;
        continue;
      };

      if !is_valid_url(&canonical.url) {
        counters.rejected_invalid += 1;
        continue;
      }

      let Ok(parsed) = Url::parse(&canonical.url) else {
        counters.rejected_invalid += 1;
        continue;
      };
      let host = parsed.host_str().unwrap_or_default().to_string();

      if self.domain_filter.enforce {
        match domain_policy.is_allowed(&asset.symbol, &host).await {
          Ok(true) => {}
          Ok(false) => {
            counters.rejected_invalid += 1;
            let _ = domain_policy.record_harvest(&asset.symbol, &host, false).await;
            continue;
          }
          Err(e) => {
            warn!("domain policy check failed for {host}: {e}");
            counters.rejected_invalid += 1;
            continue;
          }
        }
      }

      counters.after_assemble += 1;
      counters.after_dedupe += 1;

      let discovered_at = Utc::now().naive_utc();
      let new_row = NewUrlHarvestRow {
        url: &canonical.url,
        asset_symbol: &asset.symbol,
        source: &canonical.source,
        published_at: canonical.published_at,
        title: &canonical.title,
        discovered_at,
      };

      let stored = match harvest_repo.save_url_harvest(new_row).await {
        Ok(true) => {
          counters.saved += 1;
          true
        }
        Ok(false) => {
          counters.skipped_duplicates += 1;
          false
        }
        Err(e) => {
          warn!("failed to persist harvest candidate {}: {e}", canonical.url);
          counters.rejected_invalid += 1;
          false
        }
      };

      if let Err(e) = domain_policy.record_harvest(&asset.symbol, &host, stored).await {
        warn!("failed to record domain harvest stats for {host}: {e}");
      }
    }

    Ok(counters)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_is_valid_url_rejects_non_http_scheme() {
    assert!(!is_valid_url("ftp://example.com/a"));
  }

  #[test]
  fn test_is_valid_url_rejects_image_extension() {
    assert!(!is_valid_url("https://example.com/image.jpg"));
  }

  #[test]
  fn test_is_valid_url_accepts_plain_article() {
    assert!(is_valid_url("https://example.com/news/article"));
  }

  #[test]
  fn test_canonicalize_prefers_og_url_over_url_and_link() {
    let doc = RawDocument {
      url: Some("https://example.com/url".to_string()),
      og_url: Some("https://example.com/og".to_string()),
      link: Some("https://example.com/link".to_string()),
      title: Some("Title".to_string()),
      published_at: Some("2024-01-01T00:00:00Z".to_string()),
      ..Default::default()
    };
    let canonical = canonicalize(&doc).unwrap();
    assert_eq!(canonical.url, "https://example.com/og");
  }

  #[test]
  fn test_canonicalize_returns_none_without_any_url_field() {
    let doc = RawDocument::default();
    assert!(canonicalize(&doc).is_none());
  }
}
