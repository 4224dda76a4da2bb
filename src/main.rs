mod cli;
mod settings;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use spotmap_core::{
    build_site_analysis,
    export::{export_stop_table, export_travel_times},
    loading::{load_stop_table, load_travel_times},
    routing::{OsrmClient, PathRefiner, StraightLine},
};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

use cli::{Cli, Command};
use settings::Settings;

fn main() -> Result<()> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Render {
            config,
            output,
            geojson,
            offline,
        } => {
            let settings = Settings::load(config.as_deref())?;
            let output = output.unwrap_or_else(|| settings.output.html.clone());
            render(&settings, &output, geojson.as_deref(), offline)
        }
        Command::Stops { config, output } => {
            let settings = Settings::load(config.as_deref())?;
            let analysis = settings.analysis_config();
            let table = load_stop_table(&analysis.routes_path, &analysis.bbox)
                .context("Failed to flatten routes")?;
            export_stop_table(&table, &output)
                .with_context(|| format!("Failed to write {}", output.display()))
        }
        Command::TravelTimes { input, output } => {
            let rows = load_travel_times(&input)
                .with_context(|| format!("Failed to read travel times from {}", input.display()))?;
            export_travel_times(&rows, &output)
                .with_context(|| format!("Failed to write {}", output.display()))
        }
    }
}

fn render(settings: &Settings, output: &Path, geojson: Option<&Path>, offline: bool) -> Result<()> {
    let analysis =
        build_site_analysis(&settings.analysis_config()).context("Failed to load inputs")?;

    let refiner: Box<dyn PathRefiner> = if offline || !settings.routing.enabled {
        info!("Routing disabled, drawing straight stop sequences");
        Box::new(StraightLine)
    } else {
        match OsrmClient::new(&settings.osrm_config()) {
            Ok(client) => Box::new(client),
            Err(e) => {
                warn!("Routing client unavailable, drawing straight stop sequences: {e}");
                Box::new(StraightLine)
            }
        }
    };

    let map = analysis.site_map(refiner.as_ref());
    map.write_html(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    if let Some(path) = geojson {
        let text = map.to_geojson_string()?;
        std::fs::write(path, text)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote GeoJSON layers to {}", path.display());
    }

    info!("Map saved to {}", output.display());
    Ok(())
}
