use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::dsp::spectrum::TransformKind;
use crate::dsp::windowing::WindowKind;

/// Application configuration, loaded from a TOML file.
///
/// serde's `default` attribute means: if a field is missing from the TOML
/// file, use the value from the Default implementation instead of failing to
/// parse. This makes the config file optional — every field has a sensible
/// default, and CLI flags override whatever was loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Magnitude a spectrum bin must reach to count as a significant note.
    /// In normalized full-scale units (samples are scaled to [-1, 1] before
    /// analysis), with the orthonormal transform convention.
    pub threshold: f32,

    /// Duration of one analysis group for per-group dominant-note analysis,
    /// in seconds.
    pub group_duration_secs: f32,

    /// Reference pitch for A4, in Hz.
    pub reference_pitch_hz: f64,

    /// Window applied to each frame before the transform.
    pub window: WindowKind,

    /// Which frequency-domain transform to run.
    pub transform: TransformKind,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig::default(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            group_duration_secs: 0.1,
            reference_pitch_hz: 440.0,
            window: WindowKind::default(),
            transform: TransformKind::default(),
        }
    }
}

/// Load the application config.
///
/// An explicit `--config` path must exist and parse; otherwise
/// `notescan.toml` in the working directory is used if present, and defaults
/// apply when it isn't.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => {
            let fallback = Path::new("notescan.toml");
            if !fallback.exists() {
                return Ok(AppConfig::default());
            }
            fallback.to_path_buf()
        }
    };

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}
