use tracing::{error, info};

use venuehire::config::Config;
use venuehire::engine::Engine;
use venuehire::{observability, session};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    observability::init_tracing();

    let config = Config::from_env()?;
    observability::init_metrics(config.metrics_port)?;

    info!("venuehire reading commands from stdin");
    info!("  overlap: {}", config.overlap.as_str());
    info!("  max_line_len: {}", config.max_line_len);
    info!(
        "  metrics: {}",
        config
            .metrics_port
            .map_or("disabled".to_string(), |p| format!("http://0.0.0.0:{p}/metrics"))
    );

    let mut engine = Engine::new(config.overlap);
    let stats = session::process_stream(
        tokio::io::stdin(),
        tokio::io::stdout(),
        &mut engine,
        config.max_line_len,
    )
    .await
    .inspect_err(|e| error!("session aborted: {e}"))?;

    info!(
        "end of input: {} lines, {} commands, {} replies, {} failed",
        stats.lines, stats.commands, stats.replies, stats.failures
    );
    info!(
        "final state: {} venues, {} rooms, {} reservations",
        engine.venue_names().len(),
        engine.room_count(),
        engine.reservation_count()
    );
    Ok(())
}
