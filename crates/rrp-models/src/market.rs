use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A single point-in-time price/volume observation from a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
  pub asset_symbol: String,
  pub provider: String,
  pub price_usd: f64,
  pub volume_24h_usd: Option<f64>,
  pub market_cap_usd: Option<f64>,
  pub observed_at: NaiveDateTime,
}

/// A daily OHLC + volume bar, upserted by `(asset_symbol, provider, vs_currency, day)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyCandle {
  pub asset_symbol: String,
  pub provider: String,
  pub vs_currency: String,
  pub day: NaiveDate,
  pub open: f64,
  pub high: f64,
  pub low: f64,
  pub close: f64,
  /// Summed across the rollup window, not averaged.
  pub volume: f64,
  /// Last non-null market cap observed in the day, scanning from the end.
  pub market_cap: Option<f64>,
}

/// One day's output of the Factor Engine, keyed by `(asset_symbol, day)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketFactorsDaily {
  pub asset_symbol: String,
  pub day: NaiveDate,
  /// Realized one-day return feeding `realized_vol_30d`/`sharpe_30d`/etc.
  pub ret_1d: Option<f64>,
  pub realized_vol_30d: Option<f64>,
  pub sharpe_30d: Option<f64>,
  pub sortino_30d: Option<f64>,
  pub var95_30d: Option<f64>,
  pub expected_return_ema: Option<f64>,
  /// Raw mean sentiment for the day, before normalization into `sentiment_z`.
  pub sentiment_mean: Option<f64>,
  pub sentiment_z: Option<f64>,
  /// Blend weight applied to expected return vs. normalized sentiment.
  pub alpha: f64,
  /// Composite blend of expected return and normalized sentiment.
  pub p_alpha: Option<f64>,
  /// Informational companion to `p_alpha`; not fed back into the blend.
  pub p_omega: Option<f64>,
}

/// Normalization method applied to raw daily mean sentiment before blending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SentimentNormalization {
  Zscore,
  Winsor,
  Minmax,
}

impl Default for SentimentNormalization {
  fn default() -> Self {
    Self::Zscore
  }
}

/// A single day's realized return and sentiment sample feeding the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailySample {
  pub day: NaiveDate,
  pub value: f64,
}
