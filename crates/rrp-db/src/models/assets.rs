use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::{asset_aliases, asset_negative_terms, assets};

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = assets)]
#[diesel(primary_key(symbol))]
pub struct AssetRow {
  pub symbol: String,
  pub name: String,
  pub c_time: NaiveDateTime,
  pub m_time: NaiveDateTime,
}

#[derive(Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = assets)]
pub struct NewAssetRow<'a> {
  pub symbol: &'a str,
  pub name: &'a str,
  pub c_time: NaiveDateTime,
  pub m_time: NaiveDateTime,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = asset_aliases)]
#[diesel(primary_key(asset_symbol, alias))]
pub struct AssetAliasRow {
  pub asset_symbol: String,
  pub alias: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = asset_aliases)]
pub struct NewAssetAliasRow<'a> {
  pub asset_symbol: &'a str,
  pub alias: &'a str,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = asset_negative_terms)]
#[diesel(primary_key(asset_symbol, term))]
pub struct AssetNegativeTermRow {
  pub asset_symbol: String,
  pub term: String,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = asset_negative_terms)]
pub struct NewAssetNegativeTermRow<'a> {
  pub asset_symbol: &'a str,
  pub term: &'a str,
}
