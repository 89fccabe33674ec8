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

//! Boolean query construction from an asset's symbol/aliases/negatives (§4.1).

use chrono::NaiveDate;
use rrp_core::config::NewsQueryConfig;
use rrp_models::Asset;

const CONTEXT_TERMS: &[&str] = &["crypto", "cryptocurrency", "blockchain", "token", "defi", "nft"];

/// Single-word proper names that still need quoting, despite having no
/// internal whitespace.
const WELL_KNOWN_NAMES: &[&str] = &["Bitcoin", "Ethereum", "Polkadot", "Solana"];

fn well_known_long_name(symbol: &str) -> Option<&'static str> {
  match symbol {
    "BTC" => Some("Bitcoin"),
    "ETH" => Some("Ethereum"),
    "DOT" => Some("Polkadot"),
    "SOL" => Some("Solana"),
    _ => None,
  }
}

fn needs_quoting(term: &str) -> bool {
  term.contains(char::is_whitespace)
    || WELL_KNOWN_NAMES.iter().any(|name| name.eq_ignore_ascii_case(term))
}

fn render_term(term: &str) -> String {
  if needs_quoting(term) {
    format!("\"{term}\"")
  } else {
    term.to_string()
  }
}

fn group(terms: &[String]) -> String {
  match terms {
    [] => String::new(),
    [only] => render_term(only),
    many => {
      let rendered: Vec<String> = many.iter().map(|t| render_term(t)).collect();
      format!("({})", rendered.join(" OR "))
    }
  }
}

fn dedup_preserve_order(terms: Vec<String>) -> Vec<String> {
  let mut seen = std::collections::HashSet::new();
  terms.into_iter().filter(|t| seen.insert(t.clone())).collect()
}

fn requires_context(symbol: &str, config: &NewsQueryConfig) -> bool {
  if config.enforce_context_assets.contains(symbol) {
    true
  } else {
    !config.major_assets_without_context.contains(symbol)
  }
}

/// Builds the boolean query core (positives [AND context] [AND NOT negatives]).
pub fn build_core(asset: &Asset, config: &NewsQueryConfig) -> String {
  let mut positives = vec![asset.symbol.clone(), asset.symbol.to_lowercase()];
  if let Some(long_name) = well_known_long_name(&asset.symbol) {
    positives.push(long_name.to_string());
  }
  positives.extend(asset.aliases.iter().cloned());
  let positives = dedup_preserve_order(positives);

  let mut clauses = vec![group(&positives)];

  if requires_context(&asset.symbol, config) {
    let context_terms: Vec<String> = CONTEXT_TERMS.iter().map(|s| s.to_string()).collect();
    clauses.push(group(&context_terms));
  }

  let mut core = clauses.join(" AND ");

  if !asset.negative_terms.is_empty() {
    let negatives: Vec<String> = asset.negative_terms.iter().cloned().collect();
    core = format!("{core} AND NOT {}", group(&negatives));
  }

  core
}

/// The RSS variant: the core query plus an `after:`/`before:` date range.
pub fn build_rss_query(asset: &Asset, config: &NewsQueryConfig, start: NaiveDate, end: NaiveDate) -> String {
  format!("{} after:{} before:{}", build_core(asset, config), start, end)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn config() -> NewsQueryConfig {
    NewsQueryConfig::default()
  }

  #[test]
  fn test_bare_ticker_not_quoted() {
    let asset = Asset::new("ETH", "Ethereum");
    let query = build_core(&asset, &config());
    assert!(query.contains("ETH"));
    assert!(query.contains("\"Ethereum\""));
  }

  #[test]
  fn test_major_asset_skips_context() {
    let asset = Asset::new("BTC", "Bitcoin");
    let query = build_core(&asset, &config());
    assert!(!query.contains("crypto"));
  }

  #[test]
  fn test_non_major_asset_requires_context() {
    let asset = Asset::new("SOL", "Solana").with_negative_terms(["solar".to_string(), "peru".to_string()]);
    let query = build_core(&asset, &config());
    assert!(query.contains("crypto"));
    assert!(query.contains("AND NOT"));
    assert!(query.contains("solar"));
  }

  #[test]
  fn test_enforce_context_overrides_major_asset_exemption() {
    let mut cfg = config();
    cfg.major_assets_without_context.insert("BTC".to_string());
    cfg.enforce_context_assets.insert("BTC".to_string());
    let asset = Asset::new("BTC", "Bitcoin");
    let query = build_core(&asset, &cfg);
    assert!(query.contains("crypto"));
  }

  #[test]
  fn test_multiple_positives_grouped_with_or() {
    let asset = Asset::new("DOT", "Polkadot").with_aliases(["Polkadot Network".to_string()]);
    let query = build_core(&asset, &config());
    assert!(query.starts_with('('));
    assert!(query.contains(" OR "));
    assert!(query.contains("\"Polkadot Network\""));
  }

  #[test]
  fn test_rss_query_appends_date_range() {
    let asset = Asset::new("BTC", "Bitcoin");
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
    let query = build_rss_query(&asset, &config(), start, end);
    assert!(query.ends_with("after:2024-01-01 before:2024-01-31"));
  }
}
