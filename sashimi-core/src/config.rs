//! Plot configuration
//!
//! Loaded from TOML with defaults for every field, then checked once by
//! [`PlotConfig::validate`] before any geometry is computed.

use crate::error::{SashimiError, SashimiResult};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tick label transform for the y-axis. Geometry stays linear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogBase {
    #[default]
    None,
    Log2,
    Log10,
}

impl LogBase {
    pub fn base(self) -> Option<f64> {
        match self {
            LogBase::None => None,
            LogBase::Log2 => Some(2.0),
            LogBase::Log10 => Some(10.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Plot units consumed per exonic base is `1 / exon_scale`
    #[serde(default = "default_scale")]
    pub exon_scale: f64,

    /// Plot units consumed per intronic base is `1 / intron_scale`
    #[serde(default = "default_scale")]
    pub intron_scale: f64,

    /// Mirror minus-strand regions so they read 5' to 3'
    #[serde(default)]
    pub reverse_minus: bool,

    /// Bucket width for depth compression, in plot units
    #[serde(default = "default_resolution")]
    pub resolution: f64,

    /// Label each junction arc with its count
    #[serde(default = "default_true")]
    pub number_junctions: bool,

    #[serde(default = "default_font_size")]
    pub font_size: u32,

    #[serde(default = "default_font_size")]
    pub numbering_font_size: u32,

    #[serde(default = "default_nxticks")]
    pub nxticks: usize,

    #[serde(default = "default_nyticks")]
    pub nyticks: usize,

    #[serde(default = "default_true")]
    pub show_ylabel: bool,

    #[serde(default = "default_true")]
    pub show_xlabel: bool,

    #[serde(default)]
    pub log: LogBase,

    /// Stroke width of the least supported junction in a panel
    #[serde(default = "default_min_junction_width")]
    pub min_junction_width: f64,

    /// Junctions with fewer supporting reads are not drawn
    #[serde(default)]
    pub min_junction_count: f64,

    /// One y-axis bound for all panels instead of one per panel
    #[serde(default = "default_true")]
    pub share_y: bool,

    /// Show gene ids next to transcript ids
    #[serde(default = "default_true")]
    pub show_gene: bool,

    #[serde(default)]
    pub title: Option<String>,
}

// Default value functions
fn default_scale() -> f64 { 1.0 }
fn default_resolution() -> f64 { 0.5 }
fn default_true() -> bool { true }
fn default_font_size() -> u32 { 6 }
fn default_nxticks() -> usize { 4 }
fn default_nyticks() -> usize { 3 }
fn default_min_junction_width() -> f64 { 0.2 }

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            exon_scale: default_scale(),
            intron_scale: default_scale(),
            reverse_minus: false,
            resolution: default_resolution(),
            number_junctions: true,
            font_size: default_font_size(),
            numbering_font_size: default_font_size(),
            nxticks: default_nxticks(),
            nyticks: default_nyticks(),
            show_ylabel: true,
            show_xlabel: true,
            log: LogBase::None,
            min_junction_width: default_min_junction_width(),
            min_junction_count: 0.0,
            share_y: true,
            show_gene: true,
            title: None,
        }
    }
}

impl PlotConfig {
    /// Range checks. Every render entry point calls this first.
    pub fn validate(&self) -> SashimiResult<()> {
        let positive = [
            ("exon_scale", self.exon_scale),
            ("intron_scale", self.intron_scale),
            ("resolution", self.resolution),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SashimiError::configuration(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        if !self.min_junction_width.is_finite() || self.min_junction_width < 0.0 {
            return Err(SashimiError::configuration(format!(
                "min_junction_width must not be negative, got {}",
                self.min_junction_width
            )));
        }
        if self.min_junction_count.is_nan() {
            return Err(SashimiError::configuration("min_junction_count is NaN"));
        }
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: PlotConfig = toml::from_str(content).context("Failed to parse plot configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        log::info!("Loading plot configuration from: {}", path.display());
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Invalid configuration file: {}", path.display()))
    }

    /// Save configuration to a TOML file
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write configuration file: {}", path.display()))?;

        Ok(())
    }

    /// Generate example configuration file content
    pub fn example_toml() -> Result<String> {
        toml::to_string_pretty(&Self::default()).context("Failed to serialize default configuration")
    }
}
