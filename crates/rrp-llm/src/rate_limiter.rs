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

//! Shared rate limiter for the parallel Summarize-Harvest worker pool (§4.7):
//! a single `next_allowed` timestamp guarded by a mutex, advanced by
//! `60 / requests_per_minute` seconds plus `±5%` jitter on every `acquire`.

use rand::Rng;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

pub struct RateLimiter {
  interval: Duration,
  next_allowed: Mutex<Instant>,
}

impl RateLimiter {
  pub fn new(requests_per_minute: u32) -> Self {
    let rpm = requests_per_minute.max(1);
    let interval = Duration::from_secs_f64(60.0 / rpm as f64);
    Self { interval, next_allowed: Mutex::new(Instant::now()) }
  }

  /// Blocks the caller until its turn, then reserves the next slot.
  pub async fn acquire(&self) {
    let wait_until = {
      let mut next_allowed = self.next_allowed.lock().await;
      let now = Instant::now();
      let scheduled = (*next_allowed).max(now);

      let jitter_frac = rand::thread_rng().gen_range(-0.05..=0.05);
      let jittered = jitter(self.interval, jitter_frac);
      *next_allowed = scheduled + jittered;
      scheduled
    };

    tokio::time::sleep_until(wait_until).await;
  }
}

fn jitter(interval: Duration, frac: f64) -> Duration {
  let secs = interval.as_secs_f64() * (1.0 + frac);
  Duration::from_secs_f64(secs.max(0.0))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_interval_derived_from_requests_per_minute() {
    let limiter = RateLimiter::new(60);
    assert_eq!(limiter.interval, Duration::from_secs(1));
  }

  #[test]
  fn test_zero_rpm_does_not_panic() {
    let limiter = RateLimiter::new(0);
    assert_eq!(limiter.interval, Duration::from_secs(60));
  }

  #[test]
  fn test_jitter_stays_within_five_percent() {
    let base = Duration::from_secs(10);
    let high = jitter(base, 0.05);
    let low = jitter(base, -0.05);
    assert!(high.as_secs_f64() <= 10.5 + 1e-9);
    assert!(low.as_secs_f64() >= 9.5 - 1e-9);
  }

  #[tokio::test]
  async fn test_acquire_does_not_block_first_call() {
    let limiter = RateLimiter::new(60);
    let start = Instant::now();
    limiter.acquire().await;
    assert!(start.elapsed() < Duration::from_millis(100));
  }
}
