pub mod assets;
pub mod market;
pub mod news;

pub use assets::{AssetAliasRow, AssetNegativeTermRow, AssetRow, NewAssetAliasRow, NewAssetNegativeTermRow, NewAssetRow};
pub use market::{
  DailyCandleRow, MarketFactorsDailyRow, MarketSnapshotRow, NewDailyCandleRow, NewMarketFactorsDailyRow,
  NewMarketSnapshotRow,
};
pub use news::{
  LlmVoteRow, NewLlmVoteRow, NewNewsDomainPolicyRow, NewRejectionRow, NewSummarizedArticleRow, NewUrlHarvestRow,
  NewsDomainPolicyRow, NewsDomainStatsRow, RejectionRow, SummarizedArticleRow, UrlHarvestRow,
};
