//! Sashimi Core Library
//!
//! Data model, validated plot configuration and the coordinate transforms
//! shared by every panel of a sashimi plot: genome to plot scaling, depth
//! compression and cubic bezier evaluation.

pub mod bezier;
pub mod config;
pub mod coords;
pub mod depth;
pub mod error;
pub mod types;

// Re-export commonly used types and functions
pub use bezier::cubic_bezier;
pub use config::{LogBase, PlotConfig};
pub use coords::{clamp_index, ClampedIndex, CoordinateMap, CoordinateScaler};
pub use depth::DepthCompressor;
pub use error::{SashimiError, SashimiResult};
pub use types::{Exon, GenomicPos, GenomicRegion, Junction, Point, ReadDepthProfile, SamplePanel, Strand, Transcript};

/// Version information for the sashimi core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
