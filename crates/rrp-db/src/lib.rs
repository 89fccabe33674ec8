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

//! # rrp-db
//!
//! Postgres persistence for the risk-profiling pipeline, via Diesel with an
//! r2d2 connection pool.
//!
//! - [`schema`]/[`models`] — Diesel table definitions and row types
//! - [`repository`] — the [`repository::AssetRepository`],
//!   [`repository::HarvestRepository`], [`repository::MarketRepository`],
//!   and [`repository::DomainPolicyRepository`] ports, plus
//!   [`repository::DatabaseContext`] which wires them to a pool

pub mod connection;
pub mod migrate;
pub mod models;
pub mod repository;
pub mod schema;

pub use connection::establish_connection;
pub use diesel::prelude::*;
pub use migrate::run_pending as run_pending_migrations;
pub use repository::{
  AssetRepository, DatabaseContext, DomainPolicyRepository, HarvestRepository, MarketRepository,
  RepositoryError, RepositoryResult, Transactional,
};
