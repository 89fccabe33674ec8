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

//! # rrp-core
//!
//! Shared foundation for the risk-profiling news/market pipeline crates:
//!
//! - [`Config`]/[`RrpConfig`] — the enumerated configuration record of §6
//! - [`Error`] and [`Result`] — unified error handling across harvest, LLM,
//!   and factor-engine crates
//! - [`numeric::Sentiment`]/[`numeric::UnitInterval`] — bounded numeric types
//!   enforcing the `[-1,1]`/`[0,1]` invariants

pub mod config;
pub mod error;
pub mod numeric;

pub use config::RrpConfig;
pub use error::{Error, Result};

/// UTC-discipline helpers: normalize at ingress (parse → UTC-aware), strip
/// to UTC-naive at persistence egress.
pub mod time {
  use chrono::{DateTime, NaiveDateTime, Utc};

  /// Parse an ISO-8601 timestamp, normalizing a bare `Z` suffix and treating
  /// naive results as already UTC.
  pub fn parse_utc(input: &str) -> crate::Result<DateTime<Utc>> {
    let normalized = input.replace('Z', "+00:00");
    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
      return Ok(dt.with_timezone(&Utc));
    }
    let naive = NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%dT%H:%M:%S%.f")
      .or_else(|_| NaiveDateTime::parse_from_str(&normalized, "%Y-%m-%d %H:%M:%S"))?;
    Ok(DateTime::from_naive_utc_and_offset(naive, Utc))
  }

  /// Strip an aware UTC timestamp to the naive form stored in every table.
  pub fn to_naive(dt: DateTime<Utc>) -> NaiveDateTime {
    dt.naive_utc()
  }
}

#[cfg(feature = "test-utils")]
pub mod test_utils;

#[cfg(test)]
mod tests {
  use super::time::parse_utc;

  #[test]
  fn test_parse_utc_z_suffix() {
    let dt = parse_utc("2024-01-01T12:00:00Z").unwrap();
    assert_eq!(dt.to_rfc3339(), "2024-01-01T12:00:00+00:00");
  }

  #[test]
  fn test_parse_utc_naive_treated_as_utc() {
    let dt = parse_utc("2024-01-01T12:00:00").unwrap();
    assert_eq!(dt.naive_utc().to_string(), "2024-01-01 12:00:00");
  }

  #[test]
  fn test_to_naive_roundtrip() {
    use chrono::{TimeZone, Utc};
    let dt = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    assert_eq!(super::time::to_naive(dt).to_string(), "2024-06-01 00:00:00");
  }
}
