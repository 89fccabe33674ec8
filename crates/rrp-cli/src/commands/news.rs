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

//! `rrp news harvest` (§4.4).

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use clap::{Args, Subcommand};
use rrp_db::{AssetRepository, DatabaseContext};
use rrp_models::HarvestCriteria;
use rrp_news::adapters::{GdeltAdapter, GoogleRssAdapter};
use rrp_news::{HarvestOrchestrator, NewsSourceAdapter};
use rrp_news::url_resolver::UrlResolver;

use crate::config::CliConfig;

#[derive(Subcommand, Debug)]
pub enum NewsCommand {
  /// Collects candidate article URLs for an asset into the harvest inbox.
  Harvest(HarvestArgs),
}

#[derive(Args, Debug)]
pub struct HarvestArgs {
  #[arg(long)]
  pub asset: String,

  #[arg(long)]
  pub days: Option<i64>,

  #[arg(long)]
  pub from: Option<String>,

  #[arg(long)]
  pub to: Option<String>,

  #[arg(long, default_value = "all")]
  pub source: SourceFilter,

  #[arg(long)]
  pub limit: Option<usize>,

  #[arg(long)]
  pub db: Option<String>,

  #[arg(long)]
  pub rss_workers: Option<usize>,

  #[arg(long)]
  pub auto_migrate: bool,

  #[arg(long)]
  pub enforce_domain_filter: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SourceFilter {
  All,
  Gdelt,
  Rss,
}

fn resolve_window(days: Option<i64>, from: Option<&str>, to: Option<&str>) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
  if let (Some(from), Some(to)) = (from, to) {
    let start = rrp_core::time::parse_utc(from).context("parsing --from")?;
    let end = rrp_core::time::parse_utc(to).context("parsing --to")?;
    return Ok((start, end));
  }
  let end = Utc::now();
  let start = end - Duration::days(days.unwrap_or(7));
  Ok((start, end))
}

pub async fn execute(cmd: NewsCommand, config: &CliConfig, verbose: bool) -> Result<()> {
  match cmd {
    NewsCommand::Harvest(args) => harvest(args, config, verbose).await,
  }
}

async fn harvest(args: HarvestArgs, config: &CliConfig, _verbose: bool) -> Result<()> {
  let database_url = args.db.clone().unwrap_or_else(|| config.database_url.clone());

  if args.auto_migrate {
    let mut conn = rrp_db::establish_connection(&database_url)
      .with_context(|| format!("connecting to {database_url} for migration"))?;
    rrp_db::run_pending_migrations(&mut conn).map_err(|e| anyhow::anyhow!("running migrations: {e}"))?;
  }

  let db = DatabaseContext::new(&database_url).context("opening database")?;
  let asset_repo = db.asset_repository();
  let asset = asset_repo
    .load_asset(&args.asset)
    .await
    .with_context(|| format!("asset {} is not registered; seed it before harvesting", args.asset))?;

  let (start, end) = resolve_window(args.days, args.from.as_deref(), args.to.as_deref())?;

  let mut settings = config.settings.clone();
  if let Some(workers) = args.rss_workers {
    settings.url_harvest.max_workers = workers;
  }
  if args.enforce_domain_filter {
    settings.news_domain_filter.enforce = true;
  }

  let resolver = if settings.google_news.resolve_redirects {
    Some(Arc::new(UrlResolver::new(settings.google_news.clone())))
  } else {
    None
  };

  let mut adapters: Vec<Box<dyn NewsSourceAdapter>> = Vec::new();
  if matches!(args.source, SourceFilter::All | SourceFilter::Gdelt) && settings.gdelt.enabled {
    adapters.push(Box::new(GdeltAdapter::new(settings.gdelt.timeout_secs)));
  }
  if matches!(args.source, SourceFilter::All | SourceFilter::Rss) && settings.google_news.enabled {
    adapters.push(Box::new(GoogleRssAdapter::new(settings.google_news.clone(), resolver)));
  }

  let orchestrator =
    HarvestOrchestrator::new(adapters, settings.news_query.clone(), settings.news_domain_filter.clone());

  let harvest_repo = db.news_repository();
  let domain_policy = db.domain_policy_repository();
  let criteria = HarvestCriteria { asset_symbol: asset.symbol.clone(), start, end, limit: args.limit };

  let started = Instant::now();
  let counters = orchestrator.run(&asset, &criteria, &harvest_repo, &domain_policy).await?;
  let elapsed = started.elapsed();

  metrics::histogram!("harvest_duration_seconds", "asset_symbol" => asset.symbol.clone())
    .record(elapsed.as_secs_f64());

  println!(
    "harvested {}: docs={} saved={} duplicates={} rejected={}",
    asset.symbol, counters.total_docs, counters.saved, counters.skipped_duplicates, counters.rejected_invalid
  );
  Ok(())
}
