//! Intraday snapshot -> daily candle rollup (§4.8).

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rrp_models::{DailyCandle, MarketSnapshot};

/// CoinGecko is the only priced provider this pipeline supports, and it is
/// queried in USD only (`provider.rs`'s `vs_currencies=usd`).
const VS_CURRENCY: &str = "usd";

/// Groups snapshots by UTC calendar day and folds each group into a candle.
///
/// `open`/`close` come from the chronologically first/last non-null price in
/// the day; `high`/`low` from the min/max; `volume` is the sum of
/// `volume_24h_usd` across the day's snapshots; `market_cap` is the last
/// non-null `market_cap_usd` in the day, scanning from the end.
pub fn rollup_daily(mut snapshots: Vec<MarketSnapshot>) -> Vec<DailyCandle> {
  snapshots.sort_by_key(|s| s.observed_at);

  let mut by_day: BTreeMap<NaiveDate, Vec<MarketSnapshot>> = BTreeMap::new();
  for snapshot in snapshots {
    by_day.entry(snapshot.observed_at.date()).or_default().push(snapshot);
  }

  by_day
    .into_iter()
    .filter_map(|(day, day_snapshots)| {
      let prices: Vec<f64> = day_snapshots.iter().map(|s| s.price_usd).collect();
      if prices.is_empty() {
        return None;
      }
      let open = *prices.first().unwrap();
      let close = *prices.last().unwrap();
      let high = prices.iter().cloned().fold(f64::MIN, f64::max);
      let low = prices.iter().cloned().fold(f64::MAX, f64::min);
      let volume = day_snapshots.iter().filter_map(|s| s.volume_24h_usd).sum();
      let market_cap = day_snapshots.iter().rev().find_map(|s| s.market_cap_usd);

      Some(DailyCandle {
        asset_symbol: day_snapshots[0].asset_symbol.clone(),
        provider: day_snapshots[0].provider.clone(),
        vs_currency: VS_CURRENCY.to_string(),
        day,
        open,
        high,
        low,
        close,
        volume,
        market_cap,
      })
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::NaiveDateTime;

  fn snapshot_with_cap(day: &str, hour: u32, price: f64, volume: f64, market_cap: Option<f64>) -> MarketSnapshot {
    let naive = NaiveDateTime::parse_from_str(
      &format!("{day} {hour:02}:00:00"),
      "%Y-%m-%d %H:%M:%S",
    )
    .unwrap();
    MarketSnapshot {
      asset_symbol: "BTC".into(),
      provider: "coingecko".into(),
      price_usd: price,
      volume_24h_usd: Some(volume),
      market_cap_usd: market_cap,
      observed_at: naive,
    }
  }

  fn snapshot(day: &str, hour: u32, price: f64, volume: f64) -> MarketSnapshot {
    snapshot_with_cap(day, hour, price, volume, None)
  }

  #[test]
  fn test_rollup_groups_by_day_and_sums_volume() {
    let snapshots = vec![
      snapshot("2024-01-01", 0, 100.0, 10.0),
      snapshot("2024-01-01", 12, 110.0, 20.0),
      snapshot("2024-01-02", 0, 120.0, 5.0),
    ];
    let candles = rollup_daily(snapshots);
    assert_eq!(candles.len(), 2);
    assert_eq!(candles[0].open, 100.0);
    assert_eq!(candles[0].close, 110.0);
    assert_eq!(candles[0].high, 110.0);
    assert_eq!(candles[0].low, 100.0);
    assert_eq!(candles[0].volume, 30.0);
    assert_eq!(candles[0].provider, "coingecko");
    assert_eq!(candles[0].vs_currency, "usd");
  }

  #[test]
  fn test_rollup_market_cap_is_last_non_null_in_day() {
    let snapshots = vec![
      snapshot_with_cap("2024-01-01", 0, 100.0, 10.0, Some(1_000.0)),
      snapshot_with_cap("2024-01-01", 8, 105.0, 10.0, None),
      snapshot_with_cap("2024-01-01", 16, 110.0, 10.0, Some(1_100.0)),
    ];
    let candles = rollup_daily(snapshots);
    assert_eq!(candles[0].market_cap, Some(1_100.0));
  }

  #[test]
  fn test_rollup_empty_input() {
    assert!(rollup_daily(vec![]).is_empty());
  }
}
