use chrono::{NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// An inbox candidate awaiting adjudication. Unique on `(url, asset_symbol)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlHarvest {
  pub id: i64,
  pub url: String,
  pub asset_symbol: String,
  pub source: String,
  pub published_at: NaiveDateTime,
  pub title: String,
  pub discovered_at: NaiveDateTime,
}

/// A raw document surfaced by a news source adapter, before canonicalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawDocument {
  pub url: Option<String>,
  pub og_url: Option<String>,
  pub link: Option<String>,
  pub title: Option<String>,
  pub name: Option<String>,
  pub source: Option<String>,
  pub source_name: Option<String>,
  pub published_at: Option<String>,
  pub pub_date: Option<String>,
  pub seen_at: Option<String>,
  pub raw: serde_json::Value,
}

/// An article that survived majority-relevant adjudication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarizedArticle {
  pub id: i64,
  pub url: String,
  pub asset_symbol: String,
  pub summary: String,
  /// Sentiment in `[-1, 1]`, rounded to 2 decimals at persistence time.
  pub sentiment: f64,
  pub model: String,
  pub published_at: NaiveDateTime,
  pub ingested_at: NaiveDateTime,
}

/// One client's normalized vote on one candidate, always persisted whether
/// the candidate ended up summarized or rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmVote {
  pub id: i64,
  /// Links to `SummarizedArticle.id` when the candidate was majority-relevant.
  pub article_id: Option<i64>,
  /// Links to the originating `UrlHarvest.url` otherwise.
  pub url: Option<String>,
  pub asset_symbol: String,
  pub model: String,
  pub relevance: bool,
  pub sentiment: Option<f64>,
  pub summary: String,
  /// Provenance: the harvest row this vote was adjudicated from.
  pub harvest_id: i64,
  pub created_at: NaiveDateTime,
}

/// Recorded when a candidate is majority-irrelevant or fails validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rejection {
  pub id: i64,
  pub url: String,
  pub asset_symbol: String,
  pub reason: String,
  pub source: String,
  pub context: String,
  pub model: String,
  pub details: serde_json::Value,
  pub created_at: NaiveDateTime,
}

/// Operator-maintained allow/deny policy for a `(asset, domain)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsDomainPolicy {
  pub asset_symbol: String,
  pub domain: String,
  pub allowed: bool,
}

/// Counters fed by the Harvest Orchestrator and the Ensemble Adjudicator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsDomainStats {
  pub asset_symbol: String,
  pub domain: String,
  pub harvested_total: i64,
  pub stored_total: i64,
  pub llm_accepted: i64,
  pub llm_rejected: i64,
}

/// Fixed reasons used when creating a [`Rejection`].
pub mod rejection_reason {
  pub const NO_ASSET_RELATION: &str = "no_asset_relation";
  pub const INVALID_URL: &str = "invalid_url";
  pub const DOMAIN_BLOCKED: &str = "domain_blocked";
}

/// Time window + fan-out parameters for a single `news harvest` invocation.
#[derive(Debug, Clone)]
pub struct HarvestCriteria {
  pub asset_symbol: String,
  pub start: chrono::DateTime<Utc>,
  pub end: chrono::DateTime<Utc>,
  pub limit: Option<usize>,
}

/// Counters returned by the Harvest Orchestrator per §4.4.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HarvestCounters {
  pub total_docs: usize,
  pub after_assemble: usize,
  pub after_dedupe: usize,
  pub saved: usize,
  pub skipped_duplicates: usize,
  pub rejected_invalid: usize,
}

/// Counters returned by the Summarize-Harvest use case per §4.7.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessResult {
  pub processed: usize,
  pub saved: usize,
  pub deleted_from_harvest: usize,
  pub errors: usize,
  pub rejected_irrelevant: usize,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_process_result_default_is_zeroed() {
    let result = ProcessResult::default();
    assert_eq!(result.processed, 0);
    assert_eq!(result.saved, 0);
  }

  #[test]
  fn test_rejection_reason_constants() {
    assert_eq!(rejection_reason::NO_ASSET_RELATION, "no_asset_relation");
  }
}
