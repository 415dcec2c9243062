use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use crate::command::Command;

// ── RED metrics (request-driven) ────────────────────────────────

/// Counter: total commands executed. Labels: command, status.
pub const COMMANDS_TOTAL: &str = "venuehire_commands_total";

/// Histogram: command latency in seconds. Labels: command.
pub const COMMAND_DURATION_SECONDS: &str = "venuehire_command_duration_seconds";

/// Counter: input lines that could not be decoded into a command.
pub const INVALID_LINES_TOTAL: &str = "venuehire_invalid_lines_total";

// ── USE metrics (resource utilization) ──────────────────────────

/// Gauge: live reservations.
pub const RESERVATIONS_ACTIVE: &str = "venuehire_reservations_active";

/// Gauge: registered rooms across all venues.
pub const ROOMS_TOTAL: &str = "venuehire_rooms_total";

/// Install the tracing subscriber. Logs go to stderr; stdout carries replies.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("venuehire=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Install Prometheus metrics exporter on the given port. No-op if port is None.
pub fn init_metrics(port: Option<u16>) -> anyhow::Result<()> {
    let Some(port) = port else { return Ok(()) };
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();
    metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()?;
    tracing::info!("metrics endpoint: http://0.0.0.0:{port}/metrics");
    Ok(())
}

/// Map a Command variant to a short label for metrics.
pub fn command_label(cmd: &Command) -> &'static str {
    match cmd {
        Command::Room { .. } => "room",
        Command::Request(_) => "request",
        Command::Change(_) => "change",
        Command::Cancel { .. } => "cancel",
        Command::List { .. } => "list",
    }
}
