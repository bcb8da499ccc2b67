//! Configuration loading and typed config structures for the radar engine.
//!
//! The canonical configuration lives in `fishradar-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror
//! the YAML structure and a loader that reads, parses, and validates the
//! file. All fields carry working defaults, so an empty file (or no file
//! at all) yields a running engine.

use std::path::Path;

use fishradar_types::GeoPoint;
use fishradar_world::LakeBoundary;
use serde::Deserialize;

use crate::tick::RadarParams;

/// Upper bound for the retention windows, in seconds (one year).
///
/// Keeps the window-to-duration conversion trivially lossless.
const MAX_WINDOW_SECONDS: u64 = 31_536_000;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A field value fails validation.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level radar engine configuration.
///
/// Mirrors the structure of `fishradar-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RadarConfig {
    /// Engine-level settings (name, seed, tick pacing, demo fleet).
    #[serde(default)]
    pub simulation: SimulationSection,

    /// Radar model parameters (movement, detection, clustering, TTLs).
    #[serde(default)]
    pub radar: RadarSection,

    /// Lake geometry (dock and boundary ring).
    #[serde(default)]
    pub lake: LakeSection,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingSection,
}

impl RadarConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a field fails validation.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a field fails validation.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Build the validated lake boundary from the lake section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the ring or dock is unusable.
    pub fn boundary(&self) -> Result<LakeBoundary, ConfigError> {
        LakeBoundary::new(self.lake.boundary.clone(), self.lake.dock).map_err(|source| {
            ConfigError::Invalid {
                reason: format!("lake boundary rejected: {source}"),
            }
        })
    }

    /// Extract the radar parameters used by the tick cycle.
    pub fn params(&self) -> RadarParams {
        RadarParams {
            movement_step: self.radar.movement_step,
            detection_probability: self.radar.detection_probability,
            detection_jitter: self.radar.detection_jitter,
            cluster_eps: self.radar.cluster_eps,
            reading_window: seconds_to_duration(self.radar.reading_window_seconds),
            hotspot_ttl: seconds_to_duration(self.radar.hotspot_ttl_seconds),
        }
    }

    /// Validate field-level constraints and the lake geometry.
    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| Err(ConfigError::Invalid { reason });

        if self.simulation.tick_interval_ms == 0 {
            return invalid("tick_interval_ms must be at least 1".to_owned());
        }
        if !(self.radar.movement_step.is_finite() && self.radar.movement_step > 0.0) {
            return invalid(format!(
                "movement_step must be a positive finite number, got {}",
                self.radar.movement_step
            ));
        }
        if !(0.0..=1.0).contains(&self.radar.detection_probability) {
            return invalid(format!(
                "detection_probability must be within [0, 1], got {}",
                self.radar.detection_probability
            ));
        }
        if !(self.radar.detection_jitter.is_finite() && self.radar.detection_jitter >= 0.0) {
            return invalid(format!(
                "detection_jitter must be a non-negative finite number, got {}",
                self.radar.detection_jitter
            ));
        }
        if !(self.radar.cluster_eps.is_finite() && self.radar.cluster_eps > 0.0) {
            return invalid(format!(
                "cluster_eps must be a positive finite number, got {}",
                self.radar.cluster_eps
            ));
        }
        if self.radar.reading_window_seconds == 0 {
            return invalid("reading_window_seconds must be at least 1".to_owned());
        }
        if self.radar.reading_window_seconds >= self.radar.hotspot_ttl_seconds {
            return invalid(format!(
                "reading_window_seconds ({}) must be shorter than hotspot_ttl_seconds ({})",
                self.radar.reading_window_seconds, self.radar.hotspot_ttl_seconds
            ));
        }
        if self.radar.hotspot_ttl_seconds > MAX_WINDOW_SECONDS {
            return invalid(format!(
                "hotspot_ttl_seconds must not exceed {MAX_WINDOW_SECONDS}"
            ));
        }

        // Surface boundary problems at load time instead of first tick.
        self.boundary().map(|_| ())
    }
}

/// Engine-level configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SimulationSection {
    /// Human-readable engine name, used for logging only.
    #[serde(default = "default_name")]
    pub name: String,

    /// Random seed for reproducible runs.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Real-time milliseconds between ticks.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Stop after this many ticks (0 = run until stopped).
    #[serde(default)]
    pub max_ticks: u64,

    /// Number of demo voyages the engine launches at startup.
    #[serde(default = "default_demo_fleet_size")]
    pub demo_fleet_size: u32,
}

impl Default for SimulationSection {
    fn default() -> Self {
        Self {
            name: default_name(),
            seed: default_seed(),
            tick_interval_ms: default_tick_interval_ms(),
            max_ticks: 0,
            demo_fleet_size: default_demo_fleet_size(),
        }
    }
}

/// Radar model parameters.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RadarSection {
    /// Degrees of drift per tick; offsets are uniform in `[-step/2, +step/2]`.
    #[serde(default = "default_movement_step")]
    pub movement_step: f64,

    /// Chance per vessel per tick of a sonar contact, in `[0, 1]`.
    #[serde(default = "default_detection_probability")]
    pub detection_probability: f64,

    /// Degrees of jitter applied to a contact around the vessel.
    #[serde(default = "default_detection_jitter")]
    pub detection_jitter: f64,

    /// Readings within this distance chain into one hotspot group.
    #[serde(default = "default_cluster_eps")]
    pub cluster_eps: f64,

    /// Only readings newer than this many seconds feed clustering.
    #[serde(default = "default_reading_window_seconds")]
    pub reading_window_seconds: u64,

    /// Hotspots older than this many seconds are evicted.
    #[serde(default = "default_hotspot_ttl_seconds")]
    pub hotspot_ttl_seconds: u64,
}

impl Default for RadarSection {
    fn default() -> Self {
        Self {
            movement_step: default_movement_step(),
            detection_probability: default_detection_probability(),
            detection_jitter: default_detection_jitter(),
            cluster_eps: default_cluster_eps(),
            reading_window_seconds: default_reading_window_seconds(),
            hotspot_ttl_seconds: default_hotspot_ttl_seconds(),
        }
    }
}

/// Lake geometry configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LakeSection {
    /// Starting coordinate for voyages without a position.
    #[serde(default = "default_dock")]
    pub dock: GeoPoint,

    /// Ordered boundary vertex ring (implicitly closed).
    #[serde(default = "fishradar_world::default_ring")]
    pub boundary: Vec<GeoPoint>,
}

impl Default for LakeSection {
    fn default() -> Self {
        Self {
            dock: default_dock(),
            boundary: fishradar_world::default_ring(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingSection {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

/// Convert a window in seconds into a [`chrono::Duration`].
///
/// Capped at [`MAX_WINDOW_SECONDS`] so the conversion can never leave
/// the range `chrono` accepts, even for a config built by hand.
fn seconds_to_duration(seconds: u64) -> chrono::Duration {
    let capped = seconds.min(MAX_WINDOW_SECONDS);
    chrono::Duration::seconds(i64::try_from(capped).unwrap_or(0))
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

fn default_name() -> String {
    "Lake Radar".to_owned()
}

const fn default_seed() -> u64 {
    42
}

const fn default_tick_interval_ms() -> u64 {
    5_000
}

const fn default_demo_fleet_size() -> u32 {
    4
}

const fn default_movement_step() -> f64 {
    0.15
}

const fn default_detection_probability() -> f64 {
    0.4
}

const fn default_detection_jitter() -> f64 {
    0.000_01
}

const fn default_cluster_eps() -> f64 {
    0.000_2
}

const fn default_reading_window_seconds() -> u64 {
    10
}

const fn default_hotspot_ttl_seconds() -> u64 {
    15
}

const fn default_dock() -> GeoPoint {
    GeoPoint::new(29.0, 41.0)
}

fn default_log_level() -> String {
    "info".to_owned()
}
