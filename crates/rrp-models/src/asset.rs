use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A tracked crypto asset. Created at bootstrap; immutable from the core's
/// point of view — the alias/negative-term sets are operator-maintained but
/// never mutated by the harvest or adjudication paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
  /// Uppercase ticker symbol; the natural key.
  pub symbol: String,
  pub name: String,
  /// Alternate names the Query Builder folds into the positive term set.
  pub aliases: BTreeSet<String>,
  /// Exclusion terms the Query Builder folds into the negative set
  /// (e.g. `solar`, `peru` for `SOL`).
  pub negative_terms: BTreeSet<String>,
  /// Provider-specific id, e.g. CoinGecko's `bitcoin` for `BTC`.
  pub provider_ids: std::collections::BTreeMap<String, String>,
}

impl Asset {
  pub fn new(symbol: impl Into<String>, name: impl Into<String>) -> Self {
    Self {
      symbol: symbol.into().to_uppercase(),
      name: name.into(),
      aliases: BTreeSet::new(),
      negative_terms: BTreeSet::new(),
      provider_ids: Default::default(),
    }
  }

  pub fn with_aliases(mut self, aliases: impl IntoIterator<Item = String>) -> Self {
    self.aliases.extend(aliases);
    self
  }

  pub fn with_negative_terms(mut self, terms: impl IntoIterator<Item = String>) -> Self {
    self.negative_terms.extend(terms);
    self
  }

  pub fn provider_id(&self, provider: &str) -> Option<&str> {
    self.provider_ids.get(provider).map(String::as_str)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_symbol_uppercased() {
    let asset = Asset::new("btc", "Bitcoin");
    assert_eq!(asset.symbol, "BTC");
  }

  #[test]
  fn test_with_aliases_and_negatives() {
    let asset = Asset::new("SOL", "Solana")
      .with_aliases(["Solana".to_string()])
      .with_negative_terms(["solar".to_string(), "peru".to_string()]);
    assert!(asset.aliases.contains("Solana"));
    assert!(asset.negative_terms.contains("solar"));
  }
}
