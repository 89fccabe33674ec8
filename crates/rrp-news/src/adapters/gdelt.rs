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

//! GDELT Doc API adapter: one query per whole UTC day bucket (§4.2).

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, NaiveDate};
use rrp_models::{HarvestCriteria, RawDocument};
use serde_json::Value;
use tracing::warn;

use crate::adapters::NewsSourceAdapter;
use crate::error::{NewsError, NewsResult};

const MAX_ATTEMPTS: u32 = 3;
const MAX_RECORDS_CAP: usize = 250;

pub struct GdeltAdapter {
  client: reqwest::Client,
  api_base: String,
  timeout_secs: u64,
}

impl GdeltAdapter {
  pub fn new(timeout_secs: u64) -> Self {
    Self {
      client: reqwest::Client::new(),
      api_base: "https://api.gdeltproject.org/api/v2/doc/doc".to_string(),
      timeout_secs,
    }
  }

  /// Whole UTC day buckets: floor-day start inclusive, floor-day end exclusive.
  fn day_buckets(criteria: &HarvestCriteria) -> Vec<NaiveDate> {
    let start_day = criteria.start.date_naive();
    let end_day = criteria.end.date_naive();
    if end_day <= start_day {
      return Vec::new();
    }
    let mut buckets = Vec::new();
    let mut day = start_day;
    while day < end_day {
      buckets.push(day);
      day += ChronoDuration::days(1);
    }
    buckets
  }

  async fn fetch_bucket(&self, query: &str, day: NaiveDate, max_records: usize) -> NewsResult<Vec<RawDocument>> {
    let start = day.format("%Y%m%d000000");
    let end = day.format("%Y%m%d235959");
    let url = format!(
      "{}?query={}&mode=artlist&maxrecords={}&format=json&startdatetime={}&enddatetime={}",
      self.api_base,
      crate::adapters::urlencode(query),
      max_records,
      start,
      end
    );

    let mut last_err = None;
    for attempt in 1..=MAX_ATTEMPTS {
      match self
        .client
        .get(&url)
        .timeout(std::time::Duration::from_secs(self.timeout_secs))
        .send()
        .await
      {
        Ok(resp) if resp.status() == 429 || resp.status().is_server_error() => {
          last_err = Some(NewsError::RateLimitExceeded {
            source: "gdelt".to_string(),
            retry_after_secs: 1 << (attempt - 1),
          });
        }
        Ok(resp) if resp.status().is_success() => {
          let body = resp.text().await?;
          return Ok(match serde_json::from_str::<Value>(&body) {
            Ok(json) => parse_articles(&json, day),
            Err(e) => {
              warn!("gdelt bucket {day} returned non-JSON, treating as soft failure: {e}");
              Vec::new()
            }
          });
        }
        Ok(resp) => {
          return Err(NewsError::InvalidDocument {
            source: "gdelt".to_string(),
            message: format!("status {}", resp.status()),
          });
        }
        Err(e) => last_err = Some(NewsError::from(e)),
      }

      if attempt < MAX_ATTEMPTS {
        tokio::time::sleep(std::time::Duration::from_secs(1 << (attempt - 1))).await;
      }
    }

    Err(last_err.unwrap_or(NewsError::InvalidDocument {
      source: "gdelt".to_string(),
      message: "exhausted retries".to_string(),
    }))
  }
}

fn parse_articles(json: &Value, bucket_day: NaiveDate) -> Vec<RawDocument> {
  let published_at = format!("{}T00:00:00Z", bucket_day.format("%Y-%m-%d"));
  json
    .get("articles")
    .and_then(Value::as_array)
    .map(|articles| {
      articles
        .iter()
        .map(|a| RawDocument {
          url: a.get("url").and_then(Value::as_str).map(str::to_string),
          og_url: None,
          link: None,
          title: a.get("title").and_then(Value::as_str).map(str::to_string),
          name: None,
          source: a.get("domain").and_then(Value::as_str).map(str::to_string),
          source_name: None,
          published_at: Some(published_at.clone()),
          pub_date: None,
          seen_at: None,
          raw: a.clone(),
        })
        .collect()
    })
    .unwrap_or_default()
}

#[async_trait]
impl NewsSourceAdapter for GdeltAdapter {
  async fn fetch_documents(&self, query: &str, criteria: &HarvestCriteria) -> NewsResult<Vec<RawDocument>> {
    let buckets = Self::day_buckets(criteria);
    let per_day_limit = criteria.limit.unwrap_or(MAX_RECORDS_CAP);
    let max_records = per_day_limit.min(MAX_RECORDS_CAP);

    let mut documents = Vec::new();
    for day in buckets {
      match self.fetch_bucket(query, day, max_records).await {
        Ok(mut docs) => documents.append(&mut docs),
        Err(e) => warn!("gdelt bucket {day} failed: {e}"),
      }
    }
    Ok(documents)
  }

  fn source_name(&self) -> &'static str {
    "gdelt"
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{TimeZone, Utc};

  fn criteria(start_day: (i32, u32, u32), end_day: (i32, u32, u32)) -> HarvestCriteria {
    HarvestCriteria {
      asset_symbol: "BTC".to_string(),
      start: Utc.with_ymd_and_hms(start_day.0, start_day.1, start_day.2, 0, 0, 0).unwrap(),
      end: Utc.with_ymd_and_hms(end_day.0, end_day.1, end_day.2, 0, 0, 0).unwrap(),
      limit: None,
    }
  }

  #[test]
  fn test_day_buckets_span_multiple_days() {
    let c = criteria((2024, 1, 1), (2024, 1, 4));
    let buckets = GdeltAdapter::day_buckets(&c);
    assert_eq!(buckets.len(), 3);
    assert_eq!(buckets[0], NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    assert_eq!(buckets[2], NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
  }

  #[test]
  fn test_day_buckets_excludes_partial_end_day() {
    let c = HarvestCriteria {
      asset_symbol: "BTC".to_string(),
      start: Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
      end: Utc.with_ymd_and_hms(2024, 1, 3, 6, 0, 0).unwrap(),
      limit: None,
    };
    let buckets = GdeltAdapter::day_buckets(&c);
    assert_eq!(
      buckets,
      vec![NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()]
    );
  }

  #[test]
  fn test_day_buckets_zero_width_window_is_empty() {
    let c = criteria((2024, 1, 1), (2024, 1, 1));
    let buckets = GdeltAdapter::day_buckets(&c);
    assert!(buckets.is_empty());
  }

  #[test]
  fn test_parse_articles_stamps_bucket_midnight() {
    let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    let json = serde_json::json!({"articles": [{"url": "https://x.com/a", "title": "t", "domain": "x.com"}]});
    let docs = parse_articles(&json, day);
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].published_at.as_deref(), Some("2024-03-05T00:00:00Z"));
  }
}
