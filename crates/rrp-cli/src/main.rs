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

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;

mod commands;
mod config;
mod metrics;

use commands::{llm, market, news};
use config::CliConfig;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(name = "rrp")]
#[command(propagate_version = true)]
struct Cli {
  #[command(subcommand)]
  command: Commands,

  /// Path to the YAML config file.
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,

  /// Postgres connection string; overrides `DATABASE_URL` and the config file.
  #[arg(long, global = true)]
  db: Option<String>,

  /// Verbose output.
  #[arg(short, long, global = true)]
  verbose: bool,

  /// Port for the Prometheus `/metrics` HTTP listener. `0` disables it.
  #[arg(long, global = true, default_value_t = 9898)]
  metrics_port: u16,
}

#[derive(Subcommand, Debug)]
enum Commands {
  /// News harvest pipeline.
  News {
    #[command(subcommand)]
    cmd: news::NewsCommand,
  },
  /// LLM ensemble adjudication.
  Llm {
    #[command(subcommand)]
    cmd: llm::LlmCommand,
  },
  /// Market data ingestion and the factor engine.
  Market {
    #[command(subcommand)]
    cmd: market::MarketCommand,
  },
}

#[tokio::main]
async fn main() -> Result<()> {
  dotenv().ok();

  let cli = Cli::parse();

  let log_level = if cli.verbose { "debug" } else { "info" };
  tracing_subscriber::fmt().with_env_filter(log_level).init();

  if cli.metrics_port != 0 {
    metrics::install(cli.metrics_port);
  }

  let config = CliConfig::load(cli.config.as_deref(), cli.db.as_deref())?;

  match cli.command {
    Commands::News { cmd } => news::execute(cmd, &config, cli.verbose).await?,
    Commands::Llm { cmd } => llm::execute(cmd, &config, cli.verbose).await?,
    Commands::Market { cmd } => market::execute(cmd, &config, cli.verbose).await?,
  }

  Ok(())
}
