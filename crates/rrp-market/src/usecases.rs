//! Use cases wiring the provider, rollup, and factor engine to persistence.
//! These back the `market ingest`/`history`/`factors`/`overview` CLI commands.

use chrono::NaiveDate;
use rrp_db::{MarketRepository, RepositoryError};
use rrp_models::{DailyCandle, MarketFactorsDaily, MarketSnapshot};

use crate::error::{MarketError, MarketResult};
use crate::factor_engine::{compute_factors, DailyInput, FactorEngineConfig};
use crate::provider::CoinGeckoProvider;
use crate::rollup::rollup_daily;
use crate::traits::MarketDataProvider;

impl From<RepositoryError> for MarketError {
  fn from(err: RepositoryError) -> Self {
    MarketError::Persistence(err.to_string())
  }
}

/// Fetches a fresh snapshot for `asset_symbol` and persists it directly.
pub async fn ingest_snapshot(
  provider: &CoinGeckoProvider,
  repo: &impl MarketRepository,
  asset_symbol: &str,
  provider_id: &str,
) -> MarketResult<MarketSnapshot> {
  let snapshot = provider.fetch_snapshot(asset_symbol, provider_id).await?;
  let new_row = rrp_db::models::NewMarketSnapshotRow {
    asset_symbol: &snapshot.asset_symbol,
    provider: &snapshot.provider,
    price_usd: snapshot.price_usd,
    volume_24h_usd: snapshot.volume_24h_usd,
    market_cap_usd: snapshot.market_cap_usd,
    observed_at: snapshot.observed_at,
  };
  repo.save_snapshot(new_row).await?;
  Ok(snapshot)
}

/// Rolls up a batch of snapshots into daily candles and upserts them.
pub async fn ingest_history_range(
  repo: &impl MarketRepository,
  snapshots: Vec<MarketSnapshot>,
) -> MarketResult<usize> {
  let candles = rollup_daily(snapshots);
  let rows: Vec<rrp_db::models::NewDailyCandleRow> = candles
    .iter()
    .map(|c| rrp_db::models::NewDailyCandleRow {
      asset_symbol: &c.asset_symbol,
      provider: &c.provider,
      vs_currency: &c.vs_currency,
      day: c.day,
      open: c.open,
      high: c.high,
      low: c.low,
      close: c.close,
      volume: c.volume,
      market_cap: c.market_cap,
    })
    .collect();
  let affected = repo.upsert_candles(&rows).await?;
  Ok(affected)
}

/// Computes and persists factors for `asset_symbol` over `[start, end]`.
pub async fn run_factors(
  repo: &impl MarketRepository,
  asset_symbol: &str,
  start: NaiveDate,
  end: NaiveDate,
  config: &FactorEngineConfig,
) -> MarketResult<Vec<MarketFactorsDaily>> {
  let returns = repo.fetch_daily_returns(asset_symbol, start, end).await?;
  let sentiment = repo.fetch_daily_sentiment(asset_symbol, start, end).await?;

  let mut days: Vec<NaiveDate> =
    returns.iter().map(|(d, _)| *d).chain(sentiment.iter().map(|(d, _)| *d)).collect();
  days.sort();
  days.dedup();

  let returns_map: std::collections::BTreeMap<NaiveDate, f64> = returns.into_iter().collect();
  let sentiment_map: std::collections::BTreeMap<NaiveDate, f64> = sentiment.into_iter().collect();

  let inputs: Vec<DailyInput> = days
    .iter()
    .map(|day| DailyInput {
      day: *day,
      return_t: returns_map.get(day).copied(),
      sentiment_t: sentiment_map.get(day).copied(),
      article_count: usize::from(sentiment_map.contains_key(day)),
    })
    .collect();

  let mut factors = compute_factors(&inputs, config);
  for factor in &mut factors {
    factor.asset_symbol = asset_symbol.to_uppercase();
  }

  let rows: Vec<rrp_db::models::NewMarketFactorsDailyRow> = factors
    .iter()
    .map(|f| rrp_db::models::NewMarketFactorsDailyRow {
      asset_symbol: &f.asset_symbol,
      day: f.day,
      ret_1d: f.ret_1d,
      realized_vol_30d: f.realized_vol_30d,
      sharpe_30d: f.sharpe_30d,
      sortino_30d: f.sortino_30d,
      var95_30d: f.var95_30d,
      expected_return_ema: f.expected_return_ema,
      sentiment_mean: f.sentiment_mean,
      sentiment_z: f.sentiment_z,
      alpha: f.alpha,
      p_alpha: f.p_alpha,
      p_omega: f.p_omega,
    })
    .collect();
  repo.upsert_market_factors(&rows).await?;

  Ok(factors)
}

/// Candle + most-recent factor snapshot for the `market overview` command.
pub struct MarketOverview {
  pub asset_symbol: String,
  pub candles: Vec<DailyCandle>,
  pub latest_factors: Option<MarketFactorsDaily>,
}

pub async fn fetch_overview(
  repo: &impl MarketRepository,
  asset_symbol: &str,
  start: NaiveDate,
  end: NaiveDate,
) -> MarketResult<MarketOverview> {
  let candle_rows = repo.fetch_daily_candles(asset_symbol, start, end).await?;
  let candles: Vec<DailyCandle> = candle_rows
    .into_iter()
    .map(|r| DailyCandle {
      asset_symbol: r.asset_symbol,
      provider: r.provider,
      vs_currency: r.vs_currency,
      day: r.day,
      open: r.open,
      high: r.high,
      low: r.low,
      close: r.close,
      volume: r.volume,
      market_cap: r.market_cap,
    })
    .collect();

  let latest_factors = repo
    .fetch_market_factors(asset_symbol, end)
    .await?
    .map(|r| MarketFactorsDaily {
      asset_symbol: r.asset_symbol,
      day: r.day,
      ret_1d: r.ret_1d,
      realized_vol_30d: r.realized_vol_30d,
      sharpe_30d: r.sharpe_30d,
      sortino_30d: r.sortino_30d,
      var95_30d: r.var95_30d,
      expected_return_ema: r.expected_return_ema,
      sentiment_mean: r.sentiment_mean,
      sentiment_z: r.sentiment_z,
      alpha: r.alpha,
      p_alpha: r.p_alpha,
      p_omega: r.p_omega,
    });

  Ok(MarketOverview { asset_symbol: asset_symbol.to_uppercase(), candles, latest_factors })
}
