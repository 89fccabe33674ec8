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

//! Summarize-Harvest use case (§4.7): adjudicates every pending harvest
//! candidate with the ensemble, persists the outcome, and retires the
//! harvest row. Runs sequentially or across a bounded worker pool.

use chrono::Utc;
use futures::stream::{self, StreamExt};
use rrp_db::models::{NewLlmVoteRow, NewRejectionRow, NewSummarizedArticleRow};
use rrp_db::{DomainPolicyRepository, HarvestRepository};
use rrp_models::news::rejection_reason;
use rrp_models::ProcessResult;
use tracing::{info, warn};
use url::Url;

use crate::ensemble::{Adjudication, EnsembleAdjudicator};
use crate::rate_limiter::RateLimiter;

/// Tuning knobs for one Summarize-Harvest invocation.
#[derive(Debug, Clone)]
pub struct SummarizeHarvestConfig {
  pub batch_limit: i64,
  pub progress_every: usize,
  pub parallel_workers: usize,
  pub requests_per_minute: u32,
}

impl Default for SummarizeHarvestConfig {
  fn default() -> Self {
    Self { batch_limit: 100, progress_every: 25, parallel_workers: 4, requests_per_minute: 60 }
  }
}

pub struct SummarizeHarvestUseCase {
  adjudicator: EnsembleAdjudicator,
  config: SummarizeHarvestConfig,
}

impl SummarizeHarvestUseCase {
  pub fn new(adjudicator: EnsembleAdjudicator, config: SummarizeHarvestConfig) -> Self {
    Self { adjudicator, config }
  }

  /// Processes the pending batch one candidate at a time.
  pub async fn process_batch(
    &self,
    harvest_repo: &impl HarvestRepository,
    domain_policy: &impl DomainPolicyRepository,
  ) -> ProcessResult {
    let batch = match harvest_repo.fetch_url_harvest_batch(self.config.batch_limit).await {
      Ok(rows) => rows,
      Err(e) => {
        warn!("failed to fetch harvest batch: {e}");
        return ProcessResult::default();
      }
    };

    let mut result = ProcessResult::default();
    for row in &batch {
      result.processed += 1;
      apply_candidate(&self.adjudicator, harvest_repo, domain_policy, row, &mut result).await;

      if result.processed % self.config.progress_every.max(1) == 0 {
        info!(
          "summarize-harvest progress: {}/{} saved={} rejected={} errors={}",
          result.processed,
          batch.len(),
          result.saved,
          result.rejected_irrelevant,
          result.errors
        );
      }
    }

    info!(
      "summarize-harvest batch complete: processed={} saved={} rejected={} errors={}",
      result.processed, result.saved, result.rejected_irrelevant, result.errors
    );
    result
  }

  /// Processes the pending batch across a bounded worker pool, all workers
  /// sharing one [`RateLimiter`] so the aggregate LLM request rate stays
  /// under `requests_per_minute` regardless of fan-out width.
  pub async fn process_batch_parallel<H, D>(&self, harvest_repo: H, domain_policy: D) -> ProcessResult
  where
    H: HarvestRepository + Clone + 'static,
    D: DomainPolicyRepository + Clone + 'static,
  {
    let batch = match harvest_repo.fetch_url_harvest_batch(self.config.batch_limit).await {
      Ok(rows) => rows,
      Err(e) => {
        warn!("failed to fetch harvest batch: {e}");
        return ProcessResult::default();
      }
    };
    let total = batch.len();

    let limiter = std::sync::Arc::new(RateLimiter::new(self.config.requests_per_minute));
    let progress_every = self.config.progress_every.max(1);
    let completed = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));

    let outcomes = stream::iter(batch)
      .map(|row| {
        let harvest_repo = harvest_repo.clone();
        let domain_policy = domain_policy.clone();
        let limiter = std::sync::Arc::clone(&limiter);
        let completed = std::sync::Arc::clone(&completed);
        let adjudicator = &self.adjudicator;

        async move {
          limiter.acquire().await;
          let mut partial = ProcessResult::default();
          apply_candidate(adjudicator, &harvest_repo, &domain_policy, &row, &mut partial).await;

          let done = completed.fetch_add(1, std::sync::atomic::Ordering::SeqCst) + 1;
          if done % progress_every == 0 {
            info!("summarize-harvest progress: {done}/{total}");
          }
          partial
        }
      })
      .buffer_unordered(self.config.parallel_workers.max(1))
      .collect::<Vec<_>>()
      .await;

    let mut result = ProcessResult { processed: outcomes.len(), ..Default::default() };
    for outcome in outcomes {
      result.saved += outcome.saved;
      result.deleted_from_harvest += outcome.deleted_from_harvest;
      result.errors += outcome.errors;
      result.rejected_irrelevant += outcome.rejected_irrelevant;
    }

    info!(
      "summarize-harvest parallel batch complete: processed={} saved={} rejected={} errors={}",
      result.processed, result.saved, result.rejected_irrelevant, result.errors
    );
    result
  }
}

/// Adjudicates one candidate and persists the outcome. Summary/rejection +
/// per-model votes + harvest-row deletion are treated as one unit: the
/// harvest row is only deleted once every write in the sequence succeeds, so
/// a failure midway leaves the row in place for the next batch to retry.
async fn apply_candidate(
  adjudicator: &EnsembleAdjudicator,
  harvest_repo: &impl HarvestRepository,
  domain_policy: &impl DomainPolicyRepository,
  row: &rrp_db::models::UrlHarvestRow,
  result: &mut ProcessResult,
) {
  let published_at = row.published_at.format("%Y-%m-%dT%H:%M:%SZ").to_string();
  let adjudication = match adjudicator
    .summarize_and_score(&row.asset_symbol, &row.url, Some(&published_at), Some(&row.title))
    .await
  {
    Ok(a) => a,
    Err(e) => {
      warn!("ensemble adjudication failed for {}: {e}", row.url);
      result.errors += 1;
      return;
    }
  };

  let domain = Url::parse(&row.url).ok().and_then(|u| u.host_str().map(str::to_string)).unwrap_or_default();

  if adjudication.relevance {
    if !persist_relevant(harvest_repo, row, &adjudication).await {
      result.errors += 1;
      return;
    }
    result.saved += 1;
  } else {
    if !persist_rejection(harvest_repo, row, &adjudication).await {
      result.errors += 1;
      return;
    }
    result.rejected_irrelevant += 1;
  }

  if let Err(e) = domain_policy.record_llm_decision(&row.asset_symbol, &domain, adjudication.relevance).await {
    warn!("failed to record domain policy decision for {domain}: {e}");
  }

  match harvest_repo.delete_url_harvest(row.id).await {
    Ok(()) => result.deleted_from_harvest += 1,
    Err(e) => warn!("failed to delete harvest row {}: {e}", row.id),
  }
}

async fn persist_relevant(
  harvest_repo: &impl HarvestRepository,
  row: &rrp_db::models::UrlHarvestRow,
  adjudication: &Adjudication,
) -> bool {
  let now = Utc::now().naive_utc();
  let sentiment = (adjudication.sentiment * 100.0).round() / 100.0;

  let article_id = match harvest_repo
    .save_summary(NewSummarizedArticleRow {
      url: &row.url,
      asset_symbol: &row.asset_symbol,
      summary: &adjudication.summary,
      sentiment,
      model: &adjudication.model,
      published_at: row.published_at,
      ingested_at: now,
    })
    .await
  {
    Ok(id) => id,
    Err(e) => {
      warn!("failed to save summary for {}: {e}", row.url);
      return false;
    }
  };

  for vote in &adjudication.votes {
    if let Err(e) = harvest_repo
      .save_vote(NewLlmVoteRow {
        article_id: Some(article_id),
        url: None,
        asset_symbol: &row.asset_symbol,
        model: &vote.model,
        relevance: vote.relevance,
        sentiment: vote.sentiment,
        summary: &vote.summary,
        harvest_id: row.id,
        created_at: now,
      })
      .await
    {
      warn!("failed to save vote from {} for {}: {e}", vote.model, row.url);
      return false;
    }
  }

  true
}

async fn persist_rejection(
  harvest_repo: &impl HarvestRepository,
  row: &rrp_db::models::UrlHarvestRow,
  adjudication: &Adjudication,
) -> bool {
  let now = Utc::now().naive_utc();
  let details = serde_json::json!({
    "votes": adjudication.votes.iter().map(|v| serde_json::json!({
      "model": v.model,
      "relevance": v.relevance,
      "sentiment": v.sentiment,
    })).collect::<Vec<_>>(),
  });

  if let Err(e) = harvest_repo
    .save_rejection(NewRejectionRow {
      url: &row.url,
      asset_symbol: &row.asset_symbol,
      reason: rejection_reason::NO_ASSET_RELATION,
      source: &row.source,
      context: "llm_ensemble",
      model: &adjudication.model,
      details,
      created_at: now,
    })
    .await
  {
    warn!("failed to save rejection for {}: {e}", row.url);
    return false;
  }

  for vote in &adjudication.votes {
    if let Err(e) = harvest_repo
      .save_vote(NewLlmVoteRow {
        article_id: None,
        url: Some(&row.url),
        asset_symbol: &row.asset_symbol,
        model: &vote.model,
        relevance: vote.relevance,
        sentiment: vote.sentiment,
        summary: &vote.summary,
        harvest_id: row.id,
        created_at: now,
      })
      .await
    {
      warn!("failed to save vote from {} for {}: {e}", vote.model, row.url);
      return false;
    }
  }

  true
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_default_config_has_sane_worker_count() {
    let config = SummarizeHarvestConfig::default();
    assert!(config.parallel_workers > 0);
    assert!(config.requests_per_minute > 0);
  }
}
