/*
 * Charged Boids
 *
 * This application simulates a swarm of charged particles ("boids") that
 * push each other away at close range and pull each other together further
 * out. Boids appear over time or wherever the user clicks, and die of old age.
 *
 * Controls:
 * - Click or drag to spawn boids
 * - Space pauses, R randomizes the distances, C swaps the colors
 * - Escape quits
 */

use clap::Parser as _;
use color_eyre::eyre::Result;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _, Layer as _};

use charged_boids::cli_args::CliArgs;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli_args = CliArgs::parse();
    setup_logging(&cli_args.log_level)?;

    let config = cli_args.resolve_config()?;
    tracing::debug!("Launching with {config:?}");

    charged_boids::app::run(config);
    Ok(())
}

// Log to stderr. `BOIDS_LOG` takes full `RUST_LOG` style filters, otherwise
// only this crate logs, at `level`.
fn setup_logging(level: &str) -> Result<()> {
    let filters = match std::env::var("BOIDS_LOG") {
        Ok(user_filters) => tracing_subscriber::EnvFilter::builder()
            .with_default_directive("error".parse()?)
            .parse_lossy(user_filters),
        Err(_) => tracing_subscriber::EnvFilter::builder()
            .with_default_directive("off".parse()?)
            .parse_lossy("")
            .add_directive(format!("charged_boids={level}").parse()?),
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(filters);

    tracing_subscriber::registry().with(stderr_layer).init();

    Ok(())
}
