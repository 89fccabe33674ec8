// @generated manually to match the tables created by the migrations in this crate.

diesel::table! {
    assets (symbol) {
        #[max_length = 20]
        symbol -> Varchar,
        name -> Text,
        c_time -> Timestamptz,
        m_time -> Timestamptz,
    }
}

diesel::table! {
    asset_aliases (asset_symbol, alias) {
        #[max_length = 20]
        asset_symbol -> Varchar,
        alias -> Text,
    }
}

diesel::table! {
    asset_negative_terms (asset_symbol, term) {
        #[max_length = 20]
        asset_symbol -> Varchar,
        term -> Text,
    }
}

diesel::table! {
    url_harvests (id) {
        id -> Int8,
        url -> Text,
        #[max_length = 20]
        asset_symbol -> Varchar,
        source -> Text,
        published_at -> Timestamp,
        title -> Text,
        discovered_at -> Timestamp,
    }
}

diesel::table! {
    summarized_articles (id) {
        id -> Int8,
        url -> Text,
        #[max_length = 20]
        asset_symbol -> Varchar,
        summary -> Text,
        sentiment -> Float8,
        #[max_length = 200]
        model -> Varchar,
        published_at -> Timestamp,
        ingested_at -> Timestamp,
    }
}

diesel::table! {
    llm_votes (id) {
        id -> Int8,
        article_id -> Nullable<Int8>,
        url -> Nullable<Text>,
        #[max_length = 20]
        asset_symbol -> Varchar,
        #[max_length = 100]
        model -> Varchar,
        relevance -> Bool,
        sentiment -> Nullable<Float8>,
        summary -> Text,
        harvest_id -> Int8,
        created_at -> Timestamp,
    }
}

diesel::table! {
    rejections (id) {
        id -> Int8,
        url -> Text,
        #[max_length = 20]
        asset_symbol -> Varchar,
        reason -> Text,
        source -> Text,
        context -> Text,
        #[max_length = 100]
        model -> Varchar,
        details -> Jsonb,
        created_at -> Timestamp,
    }
}

diesel::table! {
    news_domain_policy (asset_symbol, domain) {
        #[max_length = 20]
        asset_symbol -> Varchar,
        domain -> Text,
        allowed -> Bool,
    }
}

diesel::table! {
    news_domain_stats (asset_symbol, domain) {
        #[max_length = 20]
        asset_symbol -> Varchar,
        domain -> Text,
        harvested_total -> Int8,
        stored_total -> Int8,
        llm_accepted -> Int8,
        llm_rejected -> Int8,
    }
}

diesel::table! {
    market_snapshots (asset_symbol, provider, observed_at) {
        #[max_length = 20]
        asset_symbol -> Varchar,
        #[max_length = 50]
        provider -> Varchar,
        price_usd -> Float8,
        volume_24h_usd -> Nullable<Float8>,
        market_cap_usd -> Nullable<Float8>,
        observed_at -> Timestamp,
    }
}

diesel::table! {
    daily_candles (asset_symbol, provider, vs_currency, day) {
        #[max_length = 20]
        asset_symbol -> Varchar,
        #[max_length = 50]
        provider -> Varchar,
        #[max_length = 10]
        vs_currency -> Varchar,
        day -> Date,
        open -> Float8,
        high -> Float8,
        low -> Float8,
        close -> Float8,
        volume -> Float8,
        market_cap -> Nullable<Float8>,
    }
}

diesel::table! {
    market_factors_daily (asset_symbol, day) {
        #[max_length = 20]
        asset_symbol -> Varchar,
        day -> Date,
        ret_1d -> Nullable<Float8>,
        realized_vol_30d -> Nullable<Float8>,
        sharpe_30d -> Nullable<Float8>,
        sortino_30d -> Nullable<Float8>,
        var95_30d -> Nullable<Float8>,
        expected_return_ema -> Nullable<Float8>,
        sentiment_mean -> Nullable<Float8>,
        sentiment_z -> Nullable<Float8>,
        alpha -> Float8,
        p_alpha -> Nullable<Float8>,
        p_omega -> Nullable<Float8>,
    }
}

diesel::joinable!(asset_aliases -> assets (asset_symbol));
diesel::joinable!(asset_negative_terms -> assets (asset_symbol));
diesel::joinable!(url_harvests -> assets (asset_symbol));
diesel::joinable!(summarized_articles -> assets (asset_symbol));
diesel::joinable!(llm_votes -> assets (asset_symbol));
diesel::joinable!(rejections -> assets (asset_symbol));
diesel::joinable!(news_domain_policy -> assets (asset_symbol));
diesel::joinable!(news_domain_stats -> assets (asset_symbol));
diesel::joinable!(market_snapshots -> assets (asset_symbol));
diesel::joinable!(daily_candles -> assets (asset_symbol));
diesel::joinable!(market_factors_daily -> assets (asset_symbol));

diesel::allow_tables_to_appear_in_same_query!(
    assets,
    asset_aliases,
    asset_negative_terms,
    url_harvests,
    summarized_articles,
    llm_votes,
    rejections,
    news_domain_policy,
    news_domain_stats,
    market_snapshots,
    daily_candles,
    market_factors_daily,
);
