use std::error::Error;

use clarify_sim::application::{telemetry, SimulationRunner};
use clarify_sim::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    telemetry::init_tracing(&config.logging)?;

    tracing::info!(
        dataset = %config.simulation.dataset_path.display(),
        epochs = config.simulation.epochs,
        ranker = ?config.ranking.strategy,
        facets = ?config.facets.source,
        "Starting {} {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let format = config.output.format;
    let runner = SimulationRunner::from_config(config).await?;
    let output = runner.run().await;
    println!("{}", output.render(format)?);

    Ok(())
}
