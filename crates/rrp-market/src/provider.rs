/*
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 */

//! CoinGecko market data provider, with the teacher's retry/backoff shape.

use async_trait::async_trait;
use chrono::Utc;
use rrp_models::MarketSnapshot;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{MarketError, MarketResult};
use crate::traits::MarketDataProvider;

const MAX_ATTEMPTS: u32 = 3;

pub struct CoinGeckoProvider {
  client: reqwest::Client,
  api_base: String,
  api_key: Option<String>,
  timeout: Duration,
}

impl CoinGeckoProvider {
  pub fn new(api_base: impl Into<String>, api_key: Option<String>, timeout_secs: u64) -> Self {
    Self {
      client: reqwest::Client::new(),
      api_base: api_base.into(),
      api_key,
      timeout: Duration::from_secs(timeout_secs),
    }
  }

  async fn get_with_retry(&self, url: &str) -> MarketResult<Value> {
    let mut last_err = None;
    for attempt in 1..=MAX_ATTEMPTS {
      let mut request = self.client.get(url).timeout(self.timeout);
      if let Some(api_key) = &self.api_key {
        request = request.header("x-cg-demo-api-key", api_key);
      }

      match request.send().await {
        Ok(response) if response.status() == 429 => {
          warn!("CoinGecko rate limited (attempt {attempt}/{MAX_ATTEMPTS})");
          last_err = Some(MarketError::RateLimitExceeded("CoinGecko".to_string()));
        }
        Ok(response) if response.status().is_success() => {
          return response.json::<Value>().await.map_err(MarketError::from);
        }
        Ok(response) => {
          last_err = Some(MarketError::InvalidResponse {
            provider: "coingecko".to_string(),
            message: format!("status {}", response.status()),
          });
        }
        Err(e) => {
          debug!("CoinGecko request error (attempt {attempt}/{MAX_ATTEMPTS}): {e}");
          last_err = Some(MarketError::from(e));
        }
      }

      if attempt < MAX_ATTEMPTS {
        tokio::time::sleep(Duration::from_secs(1 << (attempt - 1))).await;
      }
    }
    Err(last_err.unwrap_or(MarketError::InvalidResponse {
      provider: "coingecko".to_string(),
      message: "exhausted retries".to_string(),
    }))
  }
}

#[async_trait]
impl MarketDataProvider for CoinGeckoProvider {
  async fn fetch_snapshot(&self, asset_symbol: &str, provider_id: &str) -> MarketResult<MarketSnapshot> {
    let url = format!(
      "{}/simple/price?ids={}&vs_currencies=usd&include_market_cap=true&include_24hr_vol=true",
      self.api_base, provider_id
    );
    let body = self.get_with_retry(&url).await?;

    let coin = body.get(provider_id).ok_or_else(|| MarketError::InvalidResponse {
      provider: "coingecko".to_string(),
      message: format!("missing id {provider_id} in response"),
    })?;

    let price_usd = coin.get("usd").and_then(Value::as_f64).ok_or_else(|| MarketError::InvalidResponse {
      provider: "coingecko".to_string(),
      message: "missing usd price".to_string(),
    })?;
    let volume_24h_usd = coin.get("usd_24h_vol").and_then(Value::as_f64);
    let market_cap_usd = coin.get("usd_market_cap").and_then(Value::as_f64);

    Ok(MarketSnapshot {
      asset_symbol: asset_symbol.to_uppercase(),
      provider: self.source_name().to_string(),
      price_usd,
      volume_24h_usd,
      market_cap_usd,
      observed_at: Utc::now().naive_utc(),
    })
  }

  fn source_name(&self) -> &'static str {
    "coingecko"
  }
}
