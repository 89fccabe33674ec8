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

//! # rrp-news
//!
//! The harvest side of the pipeline:
//!
//! - [`query_builder`] — boolean query construction from asset/aliases/negatives
//! - [`adapters`] — GDELT Doc API and Google News RSS source adapters
//! - [`url_resolver`] — Google News consent/interstitial unwrapping
//! - [`harvest_orchestrator`] — validates, dedupes, and persists candidates

pub mod adapters;
pub mod error;
pub mod harvest_orchestrator;
pub mod query_builder;
pub mod url_resolver;

pub use adapters::{GdeltAdapter, GoogleRssAdapter, NewsSourceAdapter};
pub use error::{NewsError, NewsResult};
pub use harvest_orchestrator::HarvestOrchestrator;
pub use url_resolver::{HeadlessResolveStrategy, ResolveOutcome, ResolveResult, UrlResolver};
