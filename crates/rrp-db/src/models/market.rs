use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::{daily_candles, market_factors_daily, market_snapshots};

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = market_snapshots)]
#[diesel(primary_key(asset_symbol, provider, observed_at))]
pub struct MarketSnapshotRow {
  pub asset_symbol: String,
  pub provider: String,
  pub price_usd: f64,
  pub volume_24h_usd: Option<f64>,
  pub market_cap_usd: Option<f64>,
  pub observed_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = market_snapshots)]
pub struct NewMarketSnapshotRow<'a> {
  pub asset_symbol: &'a str,
  pub provider: &'a str,
  pub price_usd: f64,
  pub volume_24h_usd: Option<f64>,
  pub market_cap_usd: Option<f64>,
  pub observed_at: NaiveDateTime,
}

#[derive(Queryable, Selectable, Identifiable, AsChangeset, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = daily_candles)]
#[diesel(primary_key(asset_symbol, provider, vs_currency, day))]
pub struct DailyCandleRow {
  pub asset_symbol: String,
  pub provider: String,
  pub vs_currency: String,
  pub day: NaiveDate,
  pub open: f64,
  pub high: f64,
  pub low: f64,
  pub close: f64,
  pub volume: f64,
  pub market_cap: Option<f64>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = daily_candles)]
pub struct NewDailyCandleRow<'a> {
  pub asset_symbol: &'a str,
  pub provider: &'a str,
  pub vs_currency: &'a str,
  pub day: NaiveDate,
  pub open: f64,
  pub high: f64,
  pub low: f64,
  pub close: f64,
  pub volume: f64,
  pub market_cap: Option<f64>,
}

#[derive(Queryable, Selectable, Identifiable, AsChangeset, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = market_factors_daily)]
#[diesel(primary_key(asset_symbol, day))]
pub struct MarketFactorsDailyRow {
  pub asset_symbol: String,
  pub day: NaiveDate,
  pub ret_1d: Option<f64>,
  pub realized_vol_30d: Option<f64>,
  pub sharpe_30d: Option<f64>,
  pub sortino_30d: Option<f64>,
  pub var95_30d: Option<f64>,
  pub expected_return_ema: Option<f64>,
  pub sentiment_mean: Option<f64>,
  pub sentiment_z: Option<f64>,
  pub alpha: f64,
  pub p_alpha: Option<f64>,
  pub p_omega: Option<f64>,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = market_factors_daily)]
pub struct NewMarketFactorsDailyRow<'a> {
  pub asset_symbol: &'a str,
  pub day: NaiveDate,
  pub ret_1d: Option<f64>,
  pub realized_vol_30d: Option<f64>,
  pub sharpe_30d: Option<f64>,
  pub sortino_30d: Option<f64>,
  pub var95_30d: Option<f64>,
  pub expected_return_ema: Option<f64>,
  pub sentiment_mean: Option<f64>,
  pub sentiment_z: Option<f64>,
  pub alpha: f64,
  pub p_alpha: Option<f64>,
  pub p_omega: Option<f64>,
}
