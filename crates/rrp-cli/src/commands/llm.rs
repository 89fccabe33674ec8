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

//! `rrp llm process` (§4.7).

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use rrp_db::{DatabaseContext, HarvestRepository};
use rrp_llm::clients::{GeminiClient, LlmClient, OpenAiClient, XaiClient};
use rrp_llm::{EnsembleAdjudicator, SummarizeHarvestConfig, SummarizeHarvestUseCase};

use crate::config::CliConfig;

#[derive(Subcommand, Debug)]
pub enum LlmCommand {
  /// Adjudicates the pending harvest batch with the configured model ensemble.
  Process(ProcessArgs),
}

#[derive(Args, Debug)]
pub struct ProcessArgs {
  /// Asset this run's metrics and `--export-votes-csv` query are scoped to.
  /// The pending harvest batch itself is fetched globally (oldest first,
  /// across every asset) since persistence has no asset-scoped harvest
  /// query; `--asset` narrows output and export, not the batch fetched.
  #[arg(long)]
  pub asset: String,

  #[arg(long)]
  pub days: Option<i64>,

  #[arg(long)]
  pub from: Option<String>,

  #[arg(long)]
  pub to: Option<String>,

  #[arg(long)]
  pub db: Option<String>,

  #[arg(long)]
  pub limit: Option<i64>,

  #[arg(long)]
  pub parallel: bool,

  #[arg(long)]
  pub workers: Option<usize>,

  #[arg(long)]
  pub rate_limit: Option<u32>,

  /// Fetches and reports the pending batch size without calling any model
  /// or writing to the database.
  #[arg(long)]
  pub dry_run: bool,

  /// After processing, exports `--asset`'s most recent votes to this path.
  #[arg(long)]
  pub export_votes_csv: Option<PathBuf>,
}

pub async fn execute(cmd: LlmCommand, config: &CliConfig, verbose: bool) -> Result<()> {
  match cmd {
    LlmCommand::Process(args) => process(args, config, verbose).await,
  }
}

fn build_clients(config: &CliConfig) -> Vec<Box<dyn LlmClient>> {
  let settings = &config.settings;
  let mut clients: Vec<Box<dyn LlmClient>> = Vec::new();
  if settings.ensemble.use_openai {
    clients.push(Box::new(OpenAiClient::new(settings.openai.clone())));
  }
  if settings.ensemble.use_gemini {
    clients.push(Box::new(GeminiClient::new(settings.gemini.clone())));
  }
  if settings.ensemble.use_xai {
    clients.push(Box::new(XaiClient::new(settings.xai.clone())));
  }
  clients
}

async fn process(args: ProcessArgs, config: &CliConfig, _verbose: bool) -> Result<()> {
  let database_url = args.db.clone().unwrap_or_else(|| config.database_url.clone());
  let db = DatabaseContext::new(&database_url).context("opening database")?;
  let harvest_repo = db.news_repository();
  let domain_policy = db.domain_policy_repository();

  let batch_limit = args.limit.unwrap_or(100);

  if args.dry_run {
    let pending = harvest_repo.fetch_url_harvest_batch(batch_limit).await?;
    println!("dry-run: {} harvest row(s) pending (limit {batch_limit}), no model calls made", pending.len());
    return Ok(());
  }

  let clients = build_clients(config);
  anyhow::ensure!(!clients.is_empty(), "no LLM clients enabled; set ensemble.use_* in the config file");
  let adjudicator = EnsembleAdjudicator::new(clients);

  let mut sc_config = SummarizeHarvestConfig { batch_limit, ..SummarizeHarvestConfig::default() };
  if let Some(workers) = args.workers {
    sc_config.parallel_workers = workers;
  }
  if let Some(rate_limit) = args.rate_limit {
    sc_config.requests_per_minute = rate_limit;
  }

  let usecase = SummarizeHarvestUseCase::new(adjudicator, sc_config);

  let mode = if args.parallel { "parallel" } else { "sequential" };
  let started = Instant::now();
  let result = if args.parallel {
    usecase.process_batch_parallel(harvest_repo.clone(), domain_policy.clone()).await
  } else {
    usecase.process_batch(&harvest_repo, &domain_policy).await
  };
  let elapsed = started.elapsed();

  metrics::histogram!("summarize_duration_seconds", "asset_symbol" => args.asset.clone(), "mode" => mode)
    .record(elapsed.as_secs_f64());

  println!(
    "processed={} saved={} rejected={} errors={}",
    result.processed, result.saved, result.rejected_irrelevant, result.errors
  );

  if let Some(path) = args.export_votes_csv {
    export_votes_csv(&harvest_repo, &args.asset, batch_limit, &path).await?;
  }

  Ok(())
}

async fn export_votes_csv(
  harvest_repo: &impl rrp_db::HarvestRepository,
  asset_symbol: &str,
  limit: i64,
  path: &std::path::Path,
) -> Result<()> {
  let votes = harvest_repo.fetch_recent_votes(asset_symbol, limit).await?;

  let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
  for vote in votes {
    writer.serialize(VoteCsvRow {
      id: vote.id,
      url: vote.url.unwrap_or_default(),
      asset_symbol: vote.asset_symbol,
      model: vote.model,
      relevance: vote.relevance,
      sentiment: vote.sentiment.map(|s| format!("{s:.2}")).unwrap_or_default(),
      summary: vote.summary,
      created_at: vote.created_at.format("%Y-%m-%dT%H:%M:%SZ").to_string(),
      harvest_id: vote.harvest_id,
      article_id: vote.article_id,
    })?;
  }
  writer.flush().context("flushing votes CSV")?;

  println!("wrote votes CSV to {}", path.display());
  Ok(())
}

/// Column order and formatting for `--export-votes-csv`: floats to 2 decimal
/// places, ISO-8601 UTC timestamps, booleans as `true`/`false`.
#[derive(serde::Serialize)]
struct VoteCsvRow {
  id: i64,
  url: String,
  asset_symbol: String,
  model: String,
  relevance: bool,
  sentiment: String,
  summary: String,
  created_at: String,
  harvest_id: i64,
  article_id: Option<i64>,
}
