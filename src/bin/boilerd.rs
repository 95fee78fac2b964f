// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `boilerd` - serves a simulated boiler over HTTP.

use std::net::SocketAddr;
use std::time::Duration;

use boiler_lib::engine::{RegulationConfig, RegulationEngine};
use boiler_lib::{ControlService, Temperature};
use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "boilerd", about = "Simulated boiler with an HTTP control interface")]
struct Cli {
    /// Address to bind the HTTP API to.
    #[arg(long, env = "BOILER_BIND", default_value = "0.0.0.0:8000")]
    bind: SocketAddr,

    /// Milliseconds between two regulation ticks.
    #[arg(long, env = "BOILER_TICK_MS", default_value_t = 5000)]
    tick_ms: u64,

    /// Measured temperature at startup.
    #[arg(long, env = "BOILER_INITIAL_TEMPERATURE", default_value = "21.5")]
    initial_temperature: Temperature,

    /// Setpoint at startup.
    #[arg(long, env = "BOILER_INITIAL_SETPOINT", default_value = "22.0")]
    initial_setpoint: Temperature,

    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, env = "BOILER_LOG", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let config = RegulationConfig::default()
        .with_tick_period(Duration::from_millis(cli.tick_ms))
        .with_initial_measured(cli.initial_temperature)
        .with_initial_setpoint(cli.initial_setpoint);
    let engine = RegulationEngine::new(config)?;

    info!(
        measured = %engine.read_measured(),
        setpoint = %engine.read_setpoint(),
        tick_ms = cli.tick_ms,
        "boiler initialized"
    );

    let app = boiler_lib::protocol::router(ControlService::with_engine(engine.clone()));
    let listener = TcpListener::bind(cli.bind).await?;
    info!(bind = %cli.bind, "starting boiler server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    engine.shutdown().await;
    info!("boiler stopped");
    Ok(())
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        tokio::select! {
            () = ctrl_c() => {},
            () = terminate() => {},
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c().await;
    }
}

async fn ctrl_c() {
    if let Err(err) = signal::ctrl_c().await {
        warn!(?err, "failed to install Ctrl+C handler");
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut term) => {
            term.recv().await;
        }
        Err(err) => {
            warn!(?err, "failed to install SIGTERM handler");
            std::future::pending::<()>().await;
        }
    }
}
