/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-dot-]browne[-at-]dwightjbrowne[-dot-]com
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

//! # rrp-models
//!
//! Domain entities shared across the harvest, adjudication, and factor-engine
//! crates: tracked [`asset::Asset`]s, the news pipeline's inbox/output rows
//! in [`news`], and the market pipeline's snapshots/candles/factors in
//! [`market`].
//!
//! These are plain data types — no persistence or network code lives here,
//! only the shapes and the invariants documented on each field.

#![warn(clippy::all)]

pub mod asset;
pub mod market;
pub mod news;

pub use asset::Asset;
pub use market::{DailyCandle, DailySample, MarketFactorsDaily, MarketSnapshot, SentimentNormalization};
pub use news::{
  HarvestCounters, HarvestCriteria, LlmVote, NewsDomainPolicy, NewsDomainStats, ProcessResult,
  RawDocument, Rejection, SummarizedArticle, UrlHarvest,
};
