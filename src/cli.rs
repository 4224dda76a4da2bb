use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "spotmap",
    version,
    about = "Correlates tourist spots with nearby bus routes and renders a site analysis map"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Correlate spots with routes and write the HTML map
    Render {
        /// TOML settings file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// HTML output, overrides `[output] html`
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Also write the map layers as a GeoJSON FeatureCollection
        #[arg(long)]
        geojson: Option<PathBuf>,
        /// Draw straight stop sequences without calling the routing service
        #[arg(long)]
        offline: bool,
    },
    /// Flatten the routes file into a stop table CSV
    Stops {
        /// TOML settings file
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Flatten a travel time export into a CSV table
    TravelTimes {
        #[arg(short, long)]
        input: PathBuf,
        #[arg(short, long)]
        output: PathBuf,
    },
}
