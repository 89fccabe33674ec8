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

//! `rrp market {ingest,history,factors,overview}` (§4.8-4.9).

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Subcommand, ValueEnum};
use rrp_db::{AssetRepository, DatabaseContext, MarketRepository};
use rrp_market::factor_engine::FactorEngineConfig;
use rrp_market::provider::CoinGeckoProvider;
use rrp_market::usecases::{fetch_overview, ingest_history_range, ingest_snapshot, run_factors};
use rrp_models::market::SentimentNormalization;

use crate::config::CliConfig;

#[derive(Subcommand, Debug)]
pub enum MarketCommand {
  /// Fetches one current snapshot per `--asset` and rolls it into a candle.
  Ingest(IngestArgs),
  /// Prints persisted daily candles for an asset over a date range.
  History(HistoryArgs),
  /// Computes and persists market factors over a date range.
  Factors(FactorsArgs),
  /// Shows the latest candles and factor snapshot for an asset.
  Overview(OverviewArgs),
}

#[derive(Args, Debug)]
pub struct IngestArgs {
  #[arg(long = "asset", required = true)]
  pub assets: Vec<String>,

  /// Quote currency; CoinGecko is the only provider wired today and only
  /// fetches USD snapshots, so this is accepted but currently fixed to usd.
  #[arg(long, default_value = "usd")]
  pub vs: String,

  #[arg(long, default_value = "CoinGecko")]
  pub provider: String,

  /// Overrides the asset's configured CoinGecko id for this run.
  #[arg(long = "provider-id")]
  pub provider_id: Option<String>,

  #[arg(long)]
  pub db: Option<String>,
}

#[derive(Args, Debug)]
pub struct HistoryArgs {
  #[arg(long)]
  pub asset: String,
  #[arg(long)]
  pub days: Option<i64>,
  #[arg(long = "from-ts")]
  pub from_ts: Option<String>,
  #[arg(long = "to-ts")]
  pub to_ts: Option<String>,
  #[arg(long, default_value = "usd")]
  pub vs: String,
  #[arg(long)]
  pub provider: Option<String>,
  #[arg(long)]
  pub db: Option<String>,
}

#[derive(Args, Debug)]
pub struct FactorsArgs {
  #[arg(long)]
  pub asset: String,
  #[arg(long)]
  pub days: Option<i64>,
  #[arg(long)]
  pub start: Option<String>,
  #[arg(long)]
  pub end: Option<String>,
  #[arg(long)]
  pub db: Option<String>,

  #[arg(long)]
  pub alpha: Option<f64>,
  #[arg(long = "window-vol")]
  pub window_vol: Option<usize>,
  #[arg(long = "window-sent")]
  pub window_sent: Option<usize>,
  #[arg(long = "ema-len")]
  pub ema_len: Option<usize>,
  #[arg(long)]
  pub norm: Option<NormArg>,
  #[arg(long = "winsor-alpha")]
  pub winsor_alpha: Option<f64>,
  #[arg(long)]
  pub var: Option<VarArg>,

  #[arg(long)]
  pub export: Option<PathBuf>,

  /// Computes factors and prints the count without persisting them.
  #[arg(long)]
  pub dry_run: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NormArg {
  Zscore,
  Winsor,
  Minmax,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VarArg {
  Param95,
  Emp95,
}

#[derive(Args, Debug)]
pub struct OverviewArgs {
  #[arg(long)]
  pub asset: String,
  #[arg(long)]
  pub start: String,
  #[arg(long)]
  pub end: String,
  #[arg(long, default_value = "table")]
  pub format: OverviewFormat,
  #[arg(long, default_value = "usd")]
  pub vs: String,
  #[arg(long)]
  pub db: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OverviewFormat {
  Table,
  Json,
}

pub async fn execute(cmd: MarketCommand, config: &CliConfig, verbose: bool) -> Result<()> {
  match cmd {
    MarketCommand::Ingest(args) => ingest(args, config, verbose).await,
    MarketCommand::History(args) => history(args, config, verbose).await,
    MarketCommand::Factors(args) => factors(args, config, verbose).await,
    MarketCommand::Overview(args) => overview(args, config, verbose).await,
  }
}

fn parse_day(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d").with_context(|| format!("invalid date {s:?}, expected YYYY-MM-DD"))
}

/// Resolves `--days N` against today, or an explicit `--from-ts`/`--to-ts`
/// pair (accepted as `YYYY-MM-DD`, matching every other date flag here).
fn resolve_day_range(days: Option<i64>, from_ts: Option<&str>, to_ts: Option<&str>) -> Result<(NaiveDate, NaiveDate)> {
  if let (Some(from_ts), Some(to_ts)) = (from_ts, to_ts) {
    return Ok((parse_day(from_ts)?, parse_day(to_ts)?));
  }
  let end = chrono::Utc::now().date_naive();
  let start = end - chrono::Duration::days(days.unwrap_or(30));
  Ok((start, end))
}

async fn ingest(args: IngestArgs, config: &CliConfig, _verbose: bool) -> Result<()> {
  anyhow::ensure!(args.vs == "usd", "only --vs usd is supported (CoinGecko provider fetches USD only)");
  anyhow::ensure!(
    args.provider.eq_ignore_ascii_case("coingecko"),
    "only --provider CoinGecko is supported"
  );

  let database_url = args.db.clone().unwrap_or_else(|| config.database_url.clone());
  let db = DatabaseContext::new(&database_url).context("opening database")?;
  let market_repo = db.market_repository();
  let asset_repo = db.asset_repository();

  let cg = &config.settings.coingecko;
  let provider = CoinGeckoProvider::new(cg.api_base.clone(), cg.api_key.clone(), cg.timeout_secs);

  for asset_symbol in &args.assets {
    let asset = asset_repo
      .load_asset(asset_symbol)
      .await
      .with_context(|| format!("asset {asset_symbol} is not registered"))?;
    let provider_id = args.provider_id.clone().or_else(|| asset.provider_ids.get("coingecko").cloned())
      .with_context(|| format!("asset {asset_symbol} has no coingecko provider id"))?;

    let snapshot = ingest_snapshot(&provider, &market_repo, asset_symbol, &provider_id).await?;
    ingest_history_range(&market_repo, vec![snapshot.clone()]).await?;

    println!(
      "ingested {}: price_usd={:.2} observed_at={}",
      snapshot.asset_symbol, snapshot.price_usd, snapshot.observed_at
    );
  }
  Ok(())
}

async fn history(args: HistoryArgs, config: &CliConfig, _verbose: bool) -> Result<()> {
  anyhow::ensure!(args.vs == "usd", "only --vs usd is supported (CoinGecko provider fetches USD only)");
  if let Some(provider) = &args.provider {
    anyhow::ensure!(provider.eq_ignore_ascii_case("coingecko"), "only --provider CoinGecko is supported");
  }

  let database_url = args.db.clone().unwrap_or_else(|| config.database_url.clone());
  let db = DatabaseContext::new(&database_url).context("opening database")?;
  let market_repo = db.market_repository();

  let (start, end) = resolve_day_range(args.days, args.from_ts.as_deref(), args.to_ts.as_deref())?;
  let candles = market_repo.fetch_daily_candles(&args.asset, start, end).await?;

  println!("day,open,high,low,close,volume,market_cap");
  for c in candles {
    println!(
      "{},{:.2},{:.2},{:.2},{:.2},{:.2},{}",
      c.day,
      c.open,
      c.high,
      c.low,
      c.close,
      c.volume,
      fmt_opt(c.market_cap)
    );
  }
  Ok(())
}

/// `--export-votes-csv`/`--export` style formatting for an optional factor:
/// two decimal places, blank when the engine had no data for the day.
fn fmt_opt(value: Option<f64>) -> String {
  value.map(|v| format!("{v:.2}")).unwrap_or_default()
}

fn resolve_config(args: &FactorsArgs) -> FactorEngineConfig {
  let mut c = FactorEngineConfig::default();
  if let Some(alpha) = args.alpha {
    c.alpha = alpha;
  }
  if let Some(w) = args.window_vol {
    c.vol_window = w;
  }
  if let Some(w) = args.window_sent {
    c.sentiment_window = w;
  }
  if let Some(l) = args.ema_len {
    c.ema_length = l;
  }
  if let Some(norm) = args.norm {
    c.sentiment_method = match norm {
      NormArg::Zscore => SentimentNormalization::Zscore,
      NormArg::Winsor => SentimentNormalization::Winsor,
      NormArg::Minmax => SentimentNormalization::Minmax,
    };
  }
  if let Some(q) = args.winsor_alpha {
    c.winsor_quantile = q;
  }
  if let Some(var) = args.var {
    c.var_parametric = matches!(var, VarArg::Param95);
  }
  c
}

async fn factors(args: FactorsArgs, config: &CliConfig, _verbose: bool) -> Result<()> {
  let database_url = args.db.clone().unwrap_or_else(|| config.database_url.clone());
  let db = DatabaseContext::new(&database_url).context("opening database")?;
  let market_repo = db.market_repository();

  let (start, end) = resolve_day_range(args.days, args.start.as_deref(), args.end.as_deref())?;
  let engine_config = resolve_config(&args);

  if args.dry_run {
    println!(
      "dry-run: would compute factors for {} over {start}..{end} (no persistence path exists \
       without writing; skipping entirely rather than writing anyway)",
      args.asset
    );
    return Ok(());
  }

  let started = Instant::now();
  let factors = run_factors(&market_repo, &args.asset, start, end, &engine_config).await?;
  let elapsed = started.elapsed();

  metrics::histogram!("compute_factors_duration_seconds", "asset_symbol" => args.asset.clone())
    .record(elapsed.as_secs_f64());

  println!("computed {} factor row(s) for {}", factors.len(), args.asset);

  if let Some(path) = args.export {
    export_factors_csv(&factors, &path)?;
  }
  Ok(())
}

fn export_factors_csv(factors: &[rrp_models::MarketFactorsDaily], path: &std::path::Path) -> Result<()> {
  let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {}", path.display()))?;
  for f in factors {
    writer.serialize(FactorsCsvRow {
      asset_symbol: f.asset_symbol.clone(),
      day: f.day.to_string(),
      ret_1d: fmt_opt(f.ret_1d),
      vol_30d: fmt_opt(f.realized_vol_30d),
      sharpe_30d: fmt_opt(f.sharpe_30d),
      sortino_30d: fmt_opt(f.sortino_30d),
      var_1d_95: fmt_opt(f.var95_30d),
      exp_return_30d: fmt_opt(f.expected_return_ema),
      sentiment_mean: fmt_opt(f.sentiment_mean),
      sentiment_norm: fmt_opt(f.sentiment_z),
      p_alpha: fmt_opt(f.p_alpha),
      alpha: format!("{:.2}", f.alpha),
    })?;
  }
  writer.flush().context("flushing factors CSV")?;
  println!("wrote factors CSV to {}", path.display());
  Ok(())
}

/// Column order for `market factors --export`: `asset_symbol,day,ret_1d,vol_30d,
/// sharpe_30d,sortino_30d,var_1d_95,exp_return_30d,sentiment_mean,sentiment_norm,
/// p_alpha,alpha`.
#[derive(serde::Serialize)]
struct FactorsCsvRow {
  asset_symbol: String,
  day: String,
  ret_1d: String,
  vol_30d: String,
  sharpe_30d: String,
  sortino_30d: String,
  var_1d_95: String,
  exp_return_30d: String,
  sentiment_mean: String,
  sentiment_norm: String,
  p_alpha: String,
  alpha: String,
}

async fn overview(args: OverviewArgs, config: &CliConfig, _verbose: bool) -> Result<()> {
  anyhow::ensure!(args.vs == "usd", "only --vs usd is supported (CoinGecko provider fetches USD only)");

  let database_url = args.db.clone().unwrap_or_else(|| config.database_url.clone());
  let db = DatabaseContext::new(&database_url).context("opening database")?;
  let market_repo = db.market_repository();

  let start = parse_day(&args.start)?;
  let end = parse_day(&args.end)?;
  let view = fetch_overview(&market_repo, &args.asset, start, end).await?;

  match args.format {
    OverviewFormat::Json => {
      let payload = serde_json::json!({
        "asset_symbol": view.asset_symbol,
        "candles": view.candles,
        "latest_factors": view.latest_factors,
      });
      println!("{}", serde_json::to_string_pretty(&payload)?);
    }
    OverviewFormat::Table => {
      println!("asset: {}", view.asset_symbol);
      println!("day,open,high,low,close,volume,market_cap");
      for c in &view.candles {
        println!(
          "{},{:.2},{:.2},{:.2},{:.2},{:.2},{}",
          c.day,
          c.open,
          c.high,
          c.low,
          c.close,
          c.volume,
          fmt_opt(c.market_cap)
        );
      }
      match &view.latest_factors {
        Some(f) => println!(
          "latest factors ({}): vol30={} sharpe30={} sortino30={} var95={} p_alpha={}",
          f.day,
          fmt_opt(f.realized_vol_30d),
          fmt_opt(f.sharpe_30d),
          fmt_opt(f.sortino_30d),
          fmt_opt(f.var95_30d),
          fmt_opt(f.p_alpha)
        ),
        None => println!("latest factors: none computed for this range"),
      }
    }
  }
  Ok(())
}
