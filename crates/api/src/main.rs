//! Weather Alert Pipeline - Main Entry Point
//!
//! Runs the full workflow for every configured region, or only for the
//! region keys given as arguments.

use anyhow::Context;
use api::{init_logging, AppConfig, WeatherPipeline};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    init_logging(&config.logging)?;

    info!("=== Weather Alert Pipeline v{} ===", env!("CARGO_PKG_VERSION"));

    let keys: Vec<String> = std::env::args().skip(1).collect();
    let mut pipeline = WeatherPipeline::new(config)?;

    let runs = if keys.is_empty() {
        pipeline.run_all().await?
    } else {
        let mut runs = Vec::with_capacity(keys.len());
        for key in &keys {
            runs.push(pipeline.run_region_key(key).await?);
        }
        runs
    };

    for run in &runs {
        println!(
            "{}: {} extreme event(s), alert {}",
            run.region.name_en,
            run.extreme_weather.detections.len(),
            match run.alert.bulletin() {
                Some(b) => b.id.as_str(),
                None => "not issued",
            }
        );
        for path in &run.artifacts {
            println!("  wrote {}", path.display());
        }
    }

    let (report, path) = pipeline.write_alert_report()?;
    println!(
        "Alert report: {} alert(s), saved to {}",
        report.total_alerts(),
        path.display()
    );

    Ok(())
}
