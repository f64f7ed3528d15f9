/*!
# Sashimi Layout

Turns a genomic region, its transcripts and per-sample read depth into a
[`Scene`]: filled coverage areas, junction arcs, axes and the transcript
track, all in plot units and ready for any drawing backend.

## Pipeline

1. The region is scaled once into a [`CoordinateMap`](sashimi_core::CoordinateMap)
   shared by every panel
2. Panel maxima are normalized into one y-axis bound (or one per panel)
3. Each panel gets its compressed coverage, junction arcs and labels
4. Transcripts are laid out one per row under the panels

[`SashimiPlot::render_batch`] renders independent regions in parallel.
*/

pub mod axis;
pub mod junction;
pub mod plot;
pub mod scene;
pub mod transcript;

pub use axis::{AxisBounds, AxisNormalizer, PanelExtent};
pub use junction::JunctionLayoutEngine;
pub use plot::{RenderRequest, SashimiPlot};
pub use scene::*;
pub use transcript::TranscriptLayout;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
