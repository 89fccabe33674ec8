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

//! # rrp-llm
//!
//! LLM client adapters (OpenAI, Gemini, xAI), the [`ensemble::EnsembleAdjudicator`]
//! that fans a candidate out to all of them and combines the votes, and the
//! [`usecases::SummarizeHarvestUseCase`] that drives adjudication over a
//! batch of harvested URLs.

pub mod clients;
pub mod ensemble;
pub mod error;
pub mod normalize;
pub mod prompt;
pub mod rate_limiter;
pub mod transport;
pub mod usecases;

pub use clients::{ClientOutcome, GeminiClient, LlmClient, OpenAiClient, XaiClient};
pub use ensemble::{Adjudication, EnsembleAdjudicator, Vote};
pub use error::{LlmError, LlmResult};
pub use rate_limiter::RateLimiter;
pub use usecases::{SummarizeHarvestConfig, SummarizeHarvestUseCase};
