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

//! Ensemble Adjudicator: fans a candidate out to every configured client,
//! normalizes each response into a vote, and aggregates the votes into a
//! single adjudication (§4.6).

use tracing::warn;

use crate::clients::{ClientOutcome, LlmClient};
use crate::error::LlmResult;

/// One client's normalized vote, ready for persistence or aggregation.
#[derive(Debug, Clone)]
pub struct Vote {
  pub model: String,
  pub relevance: bool,
  pub sentiment: Option<f64>,
  pub summary: String,
}

/// The ensemble's combined verdict on one candidate.
#[derive(Debug, Clone)]
pub struct Adjudication {
  pub relevance: bool,
  pub sentiment: f64,
  pub summary: String,
  pub model: String,
  pub votes: Vec<Vote>,
}

pub struct EnsembleAdjudicator {
  clients: Vec<Box<dyn LlmClient>>,
}

impl EnsembleAdjudicator {
  pub fn new(clients: Vec<Box<dyn LlmClient>>) -> Self {
    Self { clients }
  }

  /// Calls every configured client. A single client's failure is logged and
  /// the client is omitted from the ensemble; it never fails the candidate.
  pub async fn summarize_and_score(
    &self,
    asset_symbol: &str,
    url: &str,
    published_at: Option<&str>,
    title: Option<&str>,
  ) -> LlmResult<Adjudication> {
    let mut votes = Vec::with_capacity(self.clients.len());

    for client in &self.clients {
      match client.summarize_and_score(asset_symbol, url, published_at, title).await {
        Ok(outcome) => votes.push(to_vote(client.model(), outcome)),
        Err(e) => warn!("{} vote failed for {url}: {e}", client.model()),
      }
    }

    Ok(aggregate(votes))
  }
}

/// Coerces a raw [`ClientOutcome`] into a persisted [`Vote`]: undetermined
/// relevance collapses to `false`, sentiment is rounded to 2 decimals.
fn to_vote(model: &str, outcome: ClientOutcome) -> Vote {
  Vote {
    model: model.to_string(),
    relevance: outcome.relevance.unwrap_or(false),
    sentiment: outcome.sentiment.map(|s| (s * 100.0).round() / 100.0),
    summary: outcome.summary,
  }
}

/// Majority relevance, mean sentiment over non-null votes, first non-empty
/// summary (preferring relevant votes), `"ensemble[<csv>]"` model label.
fn aggregate(votes: Vec<Vote>) -> Adjudication {
  let true_count = votes.iter().filter(|v| v.relevance).count();
  let false_count = votes.len() - true_count;
  let relevance = !votes.is_empty() && true_count >= false_count;

  let sentiments: Vec<f64> = votes.iter().filter_map(|v| v.sentiment).collect();
  // Defaults to neutral (0.0) rather than "no data" when every vote is null —
  // a documented deviation, see SPEC_FULL.md §9 item 4.
  let sentiment = if sentiments.is_empty() { 0.0 } else { sentiments.iter().sum::<f64>() / sentiments.len() as f64 };

  let summary = votes
    .iter()
    .filter(|v| v.relevance)
    .map(|v| v.summary.as_str())
    .find(|s| !s.is_empty())
    .or_else(|| votes.iter().map(|v| v.summary.as_str()).find(|s| !s.is_empty()))
    .unwrap_or_default()
    .to_string();

  let model = format!("ensemble[{}]", votes.iter().map(|v| v.model.as_str()).collect::<Vec<_>>().join(","));

  Adjudication { relevance, sentiment, summary, model, votes }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn vote(model: &str, relevance: bool, sentiment: Option<f64>, summary: &str) -> Vote {
    Vote { model: model.to_string(), relevance, sentiment, summary: summary.to_string() }
  }

  #[test]
  fn test_aggregate_majority_relevant_wins() {
    let votes = vec![vote("a", true, Some(0.5), "good"), vote("b", true, Some(0.3), "also good"), vote("c", false, Some(-0.1), "")];
    let result = aggregate(votes);
    assert!(result.relevance);
    assert_eq!(result.summary, "good");
  }

  #[test]
  fn test_aggregate_tie_counts_as_relevant() {
    let votes = vec![vote("a", true, Some(0.2), "s"), vote("b", false, Some(-0.2), "")];
    assert!(aggregate(votes).relevance);
  }

  #[test]
  fn test_aggregate_empty_votes_is_irrelevant() {
    let result = aggregate(vec![]);
    assert!(!result.relevance);
    assert_eq!(result.sentiment, 0.0);
    assert_eq!(result.model, "ensemble[]");
  }

  #[test]
  fn test_aggregate_sentiment_is_unrounded_mean() {
    let votes = vec![vote("a", true, Some(0.111), "x"), vote("b", true, Some(0.222), "y")];
    let result = aggregate(votes);
    assert!((result.sentiment - 0.1665).abs() < 1e-9);
  }

  #[test]
  fn test_aggregate_falls_back_to_any_summary_when_no_relevant_summary() {
    let votes = vec![vote("a", true, Some(0.0), ""), vote("b", false, Some(0.0), "irrelevant note")];
    assert_eq!(aggregate(votes).summary, "irrelevant note");
  }

  #[test]
  fn test_aggregate_model_label_joins_participating_clients() {
    let votes = vec![vote("gpt-4o-mini", true, Some(0.0), "x"), vote("gemini-1.5-flash", true, Some(0.0), "y")];
    assert_eq!(aggregate(votes).model, "ensemble[gpt-4o-mini,gemini-1.5-flash]");
  }

  #[test]
  fn test_to_vote_rounds_sentiment_to_two_decimals() {
    let outcome = ClientOutcome { relevance: Some(true), sentiment: Some(0.12345), summary: "s".to_string() };
    let vote = to_vote("m", outcome);
    assert_eq!(vote.sentiment, Some(0.12));
  }

  #[test]
  fn test_to_vote_coerces_undetermined_relevance_to_false() {
    let outcome = ClientOutcome { relevance: None, sentiment: None, summary: String::new() };
    let vote = to_vote("m", outcome);
    assert!(!vote.relevance);
  }
}
