use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema::{llm_votes, news_domain_policy, news_domain_stats, rejections, summarized_articles, url_harvests};

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = url_harvests)]
pub struct UrlHarvestRow {
  pub id: i64,
  pub url: String,
  pub asset_symbol: String,
  pub source: String,
  pub published_at: NaiveDateTime,
  pub title: String,
  pub discovered_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = url_harvests)]
pub struct NewUrlHarvestRow<'a> {
  pub url: &'a str,
  pub asset_symbol: &'a str,
  pub source: &'a str,
  pub published_at: NaiveDateTime,
  pub title: &'a str,
  pub discovered_at: NaiveDateTime,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = summarized_articles)]
pub struct SummarizedArticleRow {
  pub id: i64,
  pub url: String,
  pub asset_symbol: String,
  pub summary: String,
  pub sentiment: f64,
  pub model: String,
  pub published_at: NaiveDateTime,
  pub ingested_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = summarized_articles)]
pub struct NewSummarizedArticleRow<'a> {
  pub url: &'a str,
  pub asset_symbol: &'a str,
  pub summary: &'a str,
  pub sentiment: f64,
  pub model: &'a str,
  pub published_at: NaiveDateTime,
  pub ingested_at: NaiveDateTime,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = llm_votes)]
pub struct LlmVoteRow {
  pub id: i64,
  pub article_id: Option<i64>,
  pub url: Option<String>,
  pub asset_symbol: String,
  pub model: String,
  pub relevance: bool,
  pub sentiment: Option<f64>,
  pub summary: String,
  pub harvest_id: i64,
  pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = llm_votes)]
pub struct NewLlmVoteRow<'a> {
  pub article_id: Option<i64>,
  pub url: Option<&'a str>,
  pub asset_symbol: &'a str,
  pub model: &'a str,
  pub relevance: bool,
  pub sentiment: Option<f64>,
  pub summary: &'a str,
  pub harvest_id: i64,
  pub created_at: NaiveDateTime,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = rejections)]
pub struct RejectionRow {
  pub id: i64,
  pub url: String,
  pub asset_symbol: String,
  pub reason: String,
  pub source: String,
  pub context: String,
  pub model: String,
  pub details: serde_json::Value,
  pub created_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = rejections)]
pub struct NewRejectionRow<'a> {
  pub url: &'a str,
  pub asset_symbol: &'a str,
  pub reason: &'a str,
  pub source: &'a str,
  pub context: &'a str,
  pub model: &'a str,
  pub details: serde_json::Value,
  pub created_at: NaiveDateTime,
}

#[derive(Queryable, Selectable, Identifiable, AsChangeset, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = news_domain_policy)]
#[diesel(primary_key(asset_symbol, domain))]
pub struct NewsDomainPolicyRow {
  pub asset_symbol: String,
  pub domain: String,
  pub allowed: bool,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = news_domain_policy)]
pub struct NewNewsDomainPolicyRow<'a> {
  pub asset_symbol: &'a str,
  pub domain: &'a str,
  pub allowed: bool,
}

#[derive(Queryable, Selectable, Identifiable, AsChangeset, Debug, Clone, Serialize, Deserialize)]
#[diesel(table_name = news_domain_stats)]
#[diesel(primary_key(asset_symbol, domain))]
pub struct NewsDomainStatsRow {
  pub asset_symbol: String,
  pub domain: String,
  pub harvested_total: i64,
  pub stored_total: i64,
  pub llm_accepted: i64,
  pub llm_rejected: i64,
}
