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

//! # rrp-market
//!
//! Crypto market data ingestion, daily rollup, and the factor engine:
//!
//! - [`provider::CoinGeckoProvider`] — fetches point-in-time price/volume
//!   snapshots
//! - [`rollup::rollup_daily`] — folds a day's snapshots into a candle
//! - [`factor_engine::compute_factors`] — rolling volatility, Sharpe/Sortino,
//!   VaR, EMA expected return, and sentiment-normalized composite factors

pub mod error;
pub mod factor_engine;
pub mod provider;
pub mod rollup;
pub mod traits;
pub mod usecases;

pub use error::{MarketError, MarketResult};
pub use factor_engine::{compute_factors, DailyInput, FactorEngineConfig};
pub use provider::CoinGeckoProvider;
pub use rollup::rollup_daily;
pub use traits::MarketDataProvider;
pub use usecases::{fetch_overview, ingest_history_range, ingest_snapshot, run_factors, MarketOverview};
