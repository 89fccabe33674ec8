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

//! Bounded numeric newtypes enforcing the range invariants of §3: sentiment
//! in `[-1, 1]`, blend weights and relevance scores in `[0, 1]`. Construction
//! fails loudly (returns `Err`) rather than silently clamping, per spec.

use crate::error::{Error, Result};

/// A sentiment score constrained to `[-1.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Sentiment(f64);

impl Sentiment {
  pub fn new(value: f64) -> Result<Self> {
    if !(-1.0..=1.0).contains(&value) || value.is_nan() {
      return Err(Error::ValidationError(format!(
        "sentiment {value} out of range [-1, 1]"
      )));
    }
    Ok(Self(value))
  }

  /// Clamp rather than reject; used when normalizing raw LLM output per §4.5.
  pub fn clamped(value: f64) -> Self {
    Self(value.clamp(-1.0, 1.0))
  }

  pub fn get(self) -> f64 {
    self.0
  }

  pub fn round2(self) -> f64 {
    (self.0 * 100.0).round() / 100.0
  }
}

/// A blend weight or probability constrained to `[0.0, 1.0]` — covers ω, α,
/// and relevance scores.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct UnitInterval(f64);

impl UnitInterval {
  pub fn new(value: f64) -> Result<Self> {
    if !(0.0..=1.0).contains(&value) || value.is_nan() {
      return Err(Error::ValidationError(format!(
        "value {value} out of range [0, 1]"
      )));
    }
    Ok(Self(value))
  }

  pub fn get(self) -> f64 {
    self.0
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_sentiment_in_range() {
    assert!(Sentiment::new(0.5).is_ok());
    assert!(Sentiment::new(-1.0).is_ok());
    assert!(Sentiment::new(1.0).is_ok());
  }

  #[test]
  fn test_sentiment_out_of_range_rejected() {
    assert!(Sentiment::new(1.1).is_err());
    assert!(Sentiment::new(-1.1).is_err());
    assert!(Sentiment::new(f64::NAN).is_err());
  }

  #[test]
  fn test_sentiment_clamped() {
    assert_eq!(Sentiment::clamped(5.0).get(), 1.0);
    assert_eq!(Sentiment::clamped(-5.0).get(), -1.0);
  }

  #[test]
  fn test_sentiment_round2() {
    let s = Sentiment::new(0.12345).unwrap();
    assert_eq!(s.round2(), 0.12);
  }

  #[test]
  fn test_unit_interval() {
    assert!(UnitInterval::new(0.0).is_ok());
    assert!(UnitInterval::new(1.0).is_ok());
    assert!(UnitInterval::new(1.5).is_err());
    assert!(UnitInterval::new(-0.1).is_err());
  }
}
