//! Rolling risk/return/sentiment factor computation (§4.9).

use chrono::NaiveDate;
use rrp_models::{MarketFactorsDaily, SentimentNormalization};

/// `W_v`/`L`/`W_s` window lengths and blend weights, all with the spec's defaults.
#[derive(Debug, Clone, Copy)]
pub struct FactorEngineConfig {
  pub vol_window: usize,
  pub ema_length: usize,
  pub sentiment_window: usize,
  pub sentiment_method: SentimentNormalization,
  /// VaR mode: `true` = parametric (`mu - 1.65*sd`), `false` = empirical 5th percentile.
  pub var_parametric: bool,
  /// Blend weight for `p_alpha = (1-alpha)*exp_return_norm + alpha*sentiment_norm`.
  pub alpha: f64,
  /// Blend weight for the informational `p_omega` sensitivity column.
  pub omega: f64,
  /// Winsorization quantile for the `winsor` sentiment method.
  pub winsor_quantile: f64,
  pub evidence_weighted: bool,
  pub evidence_beta: f64,
  pub evidence_cap: f64,
}

impl Default for FactorEngineConfig {
  fn default() -> Self {
    Self {
      vol_window: 30,
      ema_length: 30,
      sentiment_window: 90,
      sentiment_method: SentimentNormalization::Zscore,
      var_parametric: true,
      alpha: 0.5,
      omega: 0.5,
      winsor_quantile: 0.05,
      evidence_weighted: false,
      evidence_beta: 0.5,
      evidence_cap: 3.0,
    }
  }
}

/// One day's raw inputs to the engine: the realized return and the mean
/// sentiment + supporting-article count, when available.
#[derive(Debug, Clone, Copy)]
pub struct DailyInput {
  pub day: NaiveDate,
  pub return_t: Option<f64>,
  pub sentiment_t: Option<f64>,
  pub article_count: usize,
}

fn population_stddev(buffer: &[f64]) -> Option<f64> {
  if buffer.len() < 2 {
    return None;
  }
  let mean = buffer.iter().sum::<f64>() / buffer.len() as f64;
  let variance = buffer.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / buffer.len() as f64;
  Some(variance.sqrt())
}

fn mean(buffer: &[f64]) -> f64 {
  buffer.iter().sum::<f64>() / buffer.len() as f64
}

fn percentile(buffer: &[f64], p: f64) -> f64 {
  let mut sorted = buffer.to_vec();
  sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
  let idx = ((sorted.len() as f64 - 1.0) * p).round() as usize;
  sorted[idx.min(sorted.len() - 1)]
}

fn weighted_mean_std(values: &[f64], weights: &[f64]) -> Option<(f64, f64)> {
  if values.len() < 2 {
    return None;
  }
  let total_weight: f64 = weights.iter().sum();
  if total_weight <= 0.0 {
    return None;
  }
  let mean = values.iter().zip(weights).map(|(v, w)| v * w).sum::<f64>() / total_weight;
  let variance =
    values.iter().zip(weights).map(|(v, w)| w * (v - mean).powi(2)).sum::<f64>() / total_weight;
  Some((mean, variance.sqrt()))
}

/// Median of the strictly-positive values in `counts`, per the evidence-weight formula.
fn median_positive(counts: &[usize]) -> f64 {
  let mut positives: Vec<f64> = counts.iter().filter(|&&c| c > 0).map(|&c| c as f64).collect();
  if positives.is_empty() {
    return 1.0;
  }
  positives.sort_by(|a, b| a.partial_cmp(b).unwrap());
  let mid = positives.len() / 2;
  if positives.len() % 2 == 0 {
    (positives[mid - 1] + positives[mid]) / 2.0
  } else {
    positives[mid]
  }
}

/// Computes one [`MarketFactorsDaily`] row per input day, carrying rolling
/// buffers of returns/sentiment across the series in chronological order.
pub fn compute_factors(inputs: &[DailyInput], config: &FactorEngineConfig) -> Vec<MarketFactorsDaily> {
  let asset_symbol_placeholder = String::new();
  let mut out = Vec::with_capacity(inputs.len());

  let mut return_buffer: Vec<f64> = Vec::new();
  let mut sentiment_buffer: Vec<f64> = Vec::new();
  let mut weight_buffer: Vec<f64> = Vec::new();
  let mut exp_return_buffer: Vec<f64> = Vec::new();
  let mut ema: Option<f64> = None;
  let k = 2.0 / (config.ema_length as f64 + 1.0);

  let median_n = median_positive(&inputs.iter().map(|i| i.article_count).collect::<Vec<_>>());

  for input in inputs {
    if let Some(r) = input.return_t {
      return_buffer.push(r);
      if return_buffer.len() > config.vol_window {
        return_buffer.remove(0);
      }

      ema = Some(match ema {
        Some(prev) => prev + k * (r - prev),
        None => r,
      });
    }

    let realized_vol_30d = population_stddev(&return_buffer);
    let sharpe_30d = realized_vol_30d
      .filter(|v| *v != 0.0)
      .map(|v| mean(&return_buffer) / v);
    let sortino_30d = {
      let downside: Vec<f64> = return_buffer.iter().map(|r| r.min(0.0).powi(2)).collect();
      if downside.iter().any(|d| *d > 0.0) {
        let downside_rms = (downside.iter().sum::<f64>() / downside.len() as f64).sqrt();
        if downside_rms != 0.0 {
          Some(mean(&return_buffer) / downside_rms)
        } else {
          None
        }
      } else {
        None
      }
    };
    let var95_30d = if return_buffer.len() >= 2 {
      if config.var_parametric {
        let mu = mean(&return_buffer);
        let sd = population_stddev(&return_buffer).unwrap_or(0.0);
        Some(mu - 1.65 * sd)
      } else {
        Some(percentile(&return_buffer, 0.05))
      }
    } else {
      None
    };

    let expected_return_ema = ema;
    if let Some(er) = expected_return_ema {
      exp_return_buffer.push(er);
      if exp_return_buffer.len() > config.sentiment_window {
        exp_return_buffer.remove(0);
      }
    }
    let exp_return_norm = expected_return_ema.and_then(|er| {
      population_stddev(&exp_return_buffer).filter(|sd| *sd != 0.0).map(|sd| {
        let mu = mean(&exp_return_buffer);
        (er - mu) / sd
      })
    });

    let weight = if config.evidence_weighted {
      if input.article_count == 0 {
        0.0
      } else {
        (input.article_count as f64 / median_n).powf(config.evidence_beta).min(config.evidence_cap)
      }
    } else {
      1.0
    };

    if let Some(s) = input.sentiment_t {
      sentiment_buffer.push(s);
      weight_buffer.push(weight);
      if sentiment_buffer.len() > config.sentiment_window {
        sentiment_buffer.remove(0);
        weight_buffer.remove(0);
      }
    }

    let sentiment_z = input.sentiment_t.and_then(|s| {
      normalize_sentiment(s, &sentiment_buffer, &weight_buffer, config)
    });

    let p_alpha = match (exp_return_norm, sentiment_z) {
      (Some(e), Some(s)) => Some((1.0 - config.alpha) * e + config.alpha * s),
      (Some(e), None) => Some(e),
      (None, Some(s)) => Some(s),
      (None, None) => None,
    };

    let p_omega = p_alpha.and_then(|pa| sentiment_z.map(|s| (1.0 - config.omega) * pa + config.omega * s));

    out.push(MarketFactorsDaily {
      asset_symbol: asset_symbol_placeholder.clone(),
      day: input.day,
      ret_1d: input.return_t,
      realized_vol_30d,
      sharpe_30d,
      sortino_30d,
      var95_30d,
      expected_return_ema,
      sentiment_mean: input.sentiment_t,
      sentiment_z,
      alpha: config.alpha,
      p_alpha,
      p_omega,
    });
  }

  out
}

fn normalize_sentiment(
  x: f64,
  buffer: &[f64],
  weights: &[f64],
  config: &FactorEngineConfig,
) -> Option<f64> {
  match config.sentiment_method {
    SentimentNormalization::Zscore => {
      if config.evidence_weighted {
        weighted_mean_std(buffer, weights).filter(|(_, sd)| *sd != 0.0).map(|(mu, sd)| (x - mu) / sd)
      } else {
        population_stddev(buffer).filter(|sd| *sd != 0.0).map(|sd| (x - mean(buffer)) / sd)
      }
    }
    SentimentNormalization::Winsor => {
      if buffer.len() < 2 {
        return None;
      }
      let lo = percentile(buffer, config.winsor_quantile);
      let hi = percentile(buffer, 1.0 - config.winsor_quantile);
      let clipped_x = x.clamp(lo, hi);
      let clipped_buffer: Vec<f64> = buffer.iter().map(|v| v.clamp(lo, hi)).collect();
      population_stddev(&clipped_buffer)
        .filter(|sd| *sd != 0.0)
        .map(|sd| (clipped_x - mean(&clipped_buffer)) / sd)
    }
    SentimentNormalization::Minmax => {
      if buffer.is_empty() {
        return None;
      }
      let min = buffer.iter().cloned().fold(f64::MAX, f64::min);
      let max = buffer.iter().cloned().fold(f64::MIN, f64::max);
      if (max - min).abs() < f64::EPSILON {
        None
      } else {
        Some(2.0 * (x - min) / (max - min) - 1.0)
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Duration::days(offset)
  }

  #[test]
  fn test_single_day_has_no_vol_or_sharpe() {
    let inputs =
      vec![DailyInput { day: day(0), return_t: Some(0.01), sentiment_t: Some(0.2), article_count: 3 }];
    let factors = compute_factors(&inputs, &FactorEngineConfig::default());
    assert_eq!(factors.len(), 1);
    assert!(factors[0].realized_vol_30d.is_none());
    assert_eq!(factors[0].expected_return_ema, Some(0.01));
  }

  #[test]
  fn test_two_days_produces_vol_and_sharpe() {
    let inputs = vec![
      DailyInput { day: day(0), return_t: Some(0.01), sentiment_t: Some(0.1), article_count: 2 },
      DailyInput { day: day(1), return_t: Some(-0.02), sentiment_t: Some(-0.1), article_count: 2 },
    ];
    let factors = compute_factors(&inputs, &FactorEngineConfig::default());
    assert!(factors[1].realized_vol_30d.is_some());
    assert!(factors[1].sortino_30d.is_some());
  }

  #[test]
  fn test_minmax_undefined_when_flat() {
    let inputs = vec![
      DailyInput { day: day(0), return_t: Some(0.0), sentiment_t: Some(0.5), article_count: 1 },
      DailyInput { day: day(1), return_t: Some(0.0), sentiment_t: Some(0.5), article_count: 1 },
    ];
    let mut config = FactorEngineConfig::default();
    config.sentiment_method = SentimentNormalization::Minmax;
    let factors = compute_factors(&inputs, &config);
    assert!(factors[1].sentiment_z.is_none());
  }

  #[test]
  fn test_p_alpha_null_when_both_inputs_null() {
    let inputs = vec![DailyInput { day: day(0), return_t: None, sentiment_t: None, article_count: 0 }];
    let factors = compute_factors(&inputs, &FactorEngineConfig::default());
    assert!(factors[0].p_alpha.is_none());
  }
}
