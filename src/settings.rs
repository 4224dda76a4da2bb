use std::{fs, path::Path, path::PathBuf, time::Duration};

use anyhow::Context;
use serde::Deserialize;
use spotmap_core::{
    AnalysisConfig, BoundingBox, DEFAULT_CATCHMENT_KM, DEFAULT_ROAD_MATCH_KM,
    routing::OsrmConfig,
};

/// Contents of the optional TOML settings file. Every field has a default,
/// so an empty file is a valid configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub inputs: InputSettings,
    pub analysis: AnalysisSettings,
    pub bbox: BboxSettings,
    pub routing: RoutingSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputSettings {
    pub spots: PathBuf,
    pub spots_fallback: Option<PathBuf>,
    pub roads: Option<PathBuf>,
    pub routes: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisSettings {
    pub line_spots: Vec<String>,
    pub road_match_km: f64,
    pub catchment_km: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BboxSettings {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoutingSettings {
    pub enabled: bool,
    pub base_url: String,
    pub profile: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSettings {
    pub html: PathBuf,
}

impl Default for InputSettings {
    fn default() -> Self {
        let config = AnalysisConfig::default();
        Self {
            spots: config.spots_path,
            spots_fallback: config.spots_fallback_path,
            roads: config.roads_path,
            routes: config.routes_path,
        }
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        let mut line_spots: Vec<String> =
            AnalysisConfig::default().line_spots.into_iter().collect();
        line_spots.sort();
        Self {
            line_spots,
            road_match_km: DEFAULT_ROAD_MATCH_KM,
            catchment_km: DEFAULT_CATCHMENT_KM,
        }
    }
}

impl Default for BboxSettings {
    fn default() -> Self {
        let rect = BoundingBox::taichung().rect();
        Self {
            min_lat: rect.min().y,
            max_lat: rect.max().y,
            min_lon: rect.min().x,
            max_lon: rect.max().x,
        }
    }
}

impl Default for RoutingSettings {
    fn default() -> Self {
        let config = OsrmConfig::default();
        Self {
            enabled: true,
            base_url: config.base_url,
            profile: config.profile,
            timeout_secs: config.timeout.as_secs(),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            html: PathBuf::from("taichung_site_analysis.html"),
        }
    }
}

impl Settings {
    /// Reads settings from `path`, or returns the defaults when no path is given
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("Failed to parse settings file {}", path.display()))
    }

    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            spots_path: self.inputs.spots.clone(),
            spots_fallback_path: self.inputs.spots_fallback.clone(),
            roads_path: self.inputs.roads.clone(),
            routes_path: self.inputs.routes.clone(),
            line_spots: self.analysis.line_spots.iter().cloned().collect(),
            road_match_km: self.analysis.road_match_km,
            catchment_km: self.analysis.catchment_km,
            bbox: BoundingBox::new(
                self.bbox.min_lat,
                self.bbox.max_lat,
                self.bbox.min_lon,
                self.bbox.max_lon,
            ),
        }
    }

    pub fn osrm_config(&self) -> OsrmConfig {
        OsrmConfig {
            base_url: self.routing.base_url.clone(),
            profile: self.routing.profile.clone(),
            timeout: Duration::from_secs(self.routing.timeout_secs),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let settings: Settings = toml::from_str("").unwrap();
        let config = settings.analysis_config();

        assert_eq!(config.catchment_km, 0.5);
        assert_eq!(config.road_match_km, 1.0);
        assert_eq!(config.bbox, BoundingBox::taichung());
        assert!(config.line_spots.contains("公益路商圈"));
        assert_eq!(
            config.routes_path,
            PathBuf::from("data/merged_data/intercity_routes.json")
        );
        assert!(settings.routing.enabled);
        assert_eq!(settings.osrm_config().timeout, Duration::from_secs(5));
        assert_eq!(
            settings.output.html,
            PathBuf::from("taichung_site_analysis.html")
        );
    }

    #[test]
    fn partial_sections_override_only_what_they_name() {
        let settings: Settings = toml::from_str(
            r#"
            [inputs]
            routes = "routes.json"

            [analysis]
            catchment_km = 0.8
            line_spots = []

            [routing]
            enabled = false
            profile = "bus"
            "#,
        )
        .unwrap();

        let config = settings.analysis_config();
        assert_eq!(config.routes_path, PathBuf::from("routes.json"));
        assert_eq!(
            config.spots_path,
            PathBuf::from("data/merged_data/tourist_spot.json")
        );
        assert_eq!(config.catchment_km, 0.8);
        assert_eq!(config.road_match_km, 1.0);
        assert!(config.line_spots.is_empty());
        assert!(!settings.routing.enabled);
        assert_eq!(settings.osrm_config().profile, "bus");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<Settings>("[analysis]\ncatchment = 1.0").is_err());
    }

    #[test]
    fn load_reads_file_or_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spotmap.toml");
        fs::write(&path, "[output]\nhtml = \"out.html\"\n").unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.output.html, PathBuf::from("out.html"));
        assert!(Settings::load(None).is_ok());
        assert!(Settings::load(Some(&dir.path().join("absent.toml"))).is_err());
    }
}
