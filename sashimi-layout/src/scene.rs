/*!
# Scene Description

Plain value objects describing everything a renderer has to draw. Nothing in
here knows about pixels, fonts or file formats; coordinates are plot units
(x from the coordinate map, y in depth units for panels and row units for the
transcript track).
*/

use sashimi_core::types::{Junction, Point};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum VAlign {
    Top,
    Center,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLabel {
    pub anchor: Point,
    pub text: String,
    pub font_size: u32,
    pub h_align: HAlign,
    pub v_align: VAlign,
    /// `None` uses the renderer's default text color
    pub color: Option<String>,
    /// 0.0 leaves whatever is under the text box visible
    pub background_alpha: f64,
}

impl TextLabel {
    pub fn new<S: Into<String>>(anchor: Point, text: S, font_size: u32) -> Self {
        Self {
            anchor,
            text: text.into(),
            font_size,
            h_align: HAlign::Left,
            v_align: VAlign::Bottom,
            color: None,
            background_alpha: 0.0,
        }
    }

    pub fn aligned(mut self, h_align: HAlign, v_align: VAlign) -> Self {
        self.h_align = h_align;
        self.v_align = v_align;
        self
    }

    pub fn colored<S: Into<String>>(mut self, color: S) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// Area between a polyline and a horizontal baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilledArea {
    pub points: Vec<Point>,
    pub baseline: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BezierStroke {
    pub control_points: [Point; 4],
    pub width: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polyline {
    pub points: Vec<Point>,
    pub width: f64,
    pub color: String,
    pub dashed: bool,
}

impl Polyline {
    pub fn new<S: Into<String>>(points: Vec<Point>, width: f64, color: S) -> Self {
        Self {
            points,
            width,
            color: color.into(),
            dashed: false,
        }
    }

    pub fn dashed(mut self) -> Self {
        self.dashed = true;
        self
    }
}

/// Closed filled shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polygon {
    pub points: Vec<Point>,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ArcPlacement {
    /// Anchored on the coverage signal, bulging upwards
    Above,
    /// Anchored on the baseline, bulging downwards
    Below,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JunctionArc {
    pub junction: Junction,
    pub count: f64,
    pub placement: ArcPlacement,
    pub stroke: BezierStroke,
    /// Point on the arc at t = 0.5
    pub label_anchor: Point,
    pub label: Option<TextLabel>,
    pub start_clamped: bool,
    pub end_clamped: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTicks {
    pub positions: Vec<f64>,
    pub labels: Vec<String>,
}

impl AxisTicks {
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YAxis {
    /// Visible range, bottom to top
    pub range: (f64, f64),
    /// Extent of the drawn spine
    pub spine: (f64, f64),
    pub ticks: AxisTicks,
    pub label: Option<TextLabel>,
    /// Distance between the y label and the spine
    pub label_pad: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XAxis {
    pub range: (f64, f64),
    pub ticks: AxisTicks,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelScene {
    pub alias: String,
    pub color: String,
    /// `None` for panels without coverage data
    pub area: Option<FilledArea>,
    pub arcs: Vec<JunctionArc>,
    pub indicators: Vec<Polyline>,
    pub sample_label: Option<TextLabel>,
    pub y_axis: YAxis,
    pub x_axis: Option<XAxis>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptRow {
    pub transcript_id: String,
    pub row: usize,
    pub exons: Vec<Polygon>,
    pub intron: Polyline,
    pub arrows: Vec<Polyline>,
    pub labels: Vec<TextLabel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptTrack {
    pub rows: Vec<TranscriptRow>,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

/// Everything one render request produces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub title: Option<String>,
    pub x_range: (f64, f64),
    pub panels: Vec<PanelScene>,
    pub transcripts: Option<TranscriptTrack>,
    /// Grid rows the figure needs: one per panel plus the transcript track
    pub grid_rows: usize,
}

impl Scene {
    pub fn arc_count(&self) -> usize {
        self.panels.iter().map(|p| p.arcs.len()).sum()
    }
}
