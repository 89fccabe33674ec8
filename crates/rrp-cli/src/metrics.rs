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

//! Prometheus `/metrics` endpoint for the counters/histograms of §6:
//! `api_requests_total`, `news_source_fetch_total`, `harvest_duration_seconds`,
//! `summarize_duration_seconds`, `compute_factors_duration_seconds`, and their
//! siblings. Every call site records through the `metrics` facade; this module
//! only wires the exporter that serves them.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use metrics_exporter_prometheus::PrometheusBuilder;

/// Installs the global recorder and starts the `/metrics` HTTP listener on
/// `port`. Safe to call once per process; a failed bind is logged and
/// non-fatal, since metrics are observability, not a command dependency.
pub fn install(port: u16) {
  let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), port);
  if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
    tracing::warn!("failed to start metrics exporter on {addr}: {e}");
  } else {
    tracing::info!("metrics exporter listening on {addr}");
  }
}
