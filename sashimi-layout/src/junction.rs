//! Junction arc layout
//!
//! Every junction becomes a cubic bezier between the plot positions of its two
//! ends. Arcs alternate between sitting on the coverage signal and hanging
//! below the baseline, longest junctions first, so nested junctions in a small
//! window do not stack on one another.

use crate::scene::{ArcPlacement, BezierStroke, HAlign, JunctionArc, TextLabel, VAlign};
use sashimi_core::bezier::cubic_bezier;
use sashimi_core::config::PlotConfig;
use sashimi_core::coords::CoordinateMap;
use sashimi_core::error::{SashimiError, SashimiResult};
use sashimi_core::types::{Junction, Point};
use std::cmp::Ordering;
use std::collections::HashMap;

pub const DEFAULT_MIN_WIDTH: f64 = 0.2;

#[derive(Debug, Clone, PartialEq)]
pub struct JunctionLayoutEngine {
    min_width: f64,
    min_count: f64,
    number_junctions: bool,
    font_size: u32,
}

impl Default for JunctionLayoutEngine {
    fn default() -> Self {
        Self {
            min_width: DEFAULT_MIN_WIDTH,
            min_count: f64::NEG_INFINITY,
            number_junctions: true,
            font_size: 6,
        }
    }
}

impl JunctionLayoutEngine {
    pub fn new(min_width: f64) -> Self {
        Self { min_width, ..Default::default() }
    }

    pub fn from_config(config: &PlotConfig) -> Self {
        Self {
            min_width: config.min_junction_width,
            min_count: config.min_junction_count,
            number_junctions: config.number_junctions,
            font_size: config.numbering_font_size,
        }
    }

    /// Junctions supported by fewer reads are skipped.
    pub fn with_min_count(mut self, min_count: f64) -> Self {
        self.min_count = min_count;
        self
    }

    pub fn with_labels(mut self, number_junctions: bool, font_size: u32) -> Self {
        self.number_junctions = number_junctions;
        self.font_size = font_size;
        self
    }

    /// Lay out one panel's junctions.
    ///
    /// `depth` is the panel's region-aligned depth array and `arc_height` the
    /// vertical reach of every arc, derived from the panel's axis bound.
    pub fn layout(
        &self,
        junctions: &HashMap<Junction, f64>,
        map: &CoordinateMap,
        depth: &[f64],
        arc_height: f64,
        color: &str,
    ) -> SashimiResult<Vec<JunctionArc>> {
        if depth.len() != map.len() {
            return Err(SashimiError::malformed(format!(
                "depth array has {} values, coordinate map has {}",
                depth.len(),
                map.len()
            )));
        }

        let ranked = self.rank(junctions);
        if ranked.is_empty() {
            return Ok(Vec::new());
        }

        let (min_count, max_count) = ranked
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, count)| (lo.min(count), hi.max(count)));

        let coords = map.coords();
        let mut arcs = Vec::with_capacity(ranked.len());
        for (rank, (junction, count)) in ranked.into_iter().enumerate() {
            let left = map.resolve(junction.start);
            let right = map.resolve(junction.end);
            if left.modified || right.modified {
                log::debug!("Junction {} reaches past the plotted region, clamping", junction);
            }
            let (x1, x2) = (coords[left.index], coords[right.index]);

            let placement = if rank % 2 == 0 { ArcPlacement::Above } else { ArcPlacement::Below };
            // a clamped end takes the height of its neighbouring control point
            let control_points = match placement {
                ArcPlacement::Above => {
                    let (d1, d2) = (depth[left.index], depth[right.index]);
                    [
                        Point::new(x1, if left.modified { d1 + arc_height } else { d1 }),
                        Point::new(x1, d1 + arc_height),
                        Point::new(x2, d2 + arc_height),
                        Point::new(x2, if right.modified { d2 + arc_height } else { d2 }),
                    ]
                }
                ArcPlacement::Below => [
                    Point::new(x1, if left.modified { -arc_height } else { 0.0 }),
                    Point::new(x1, -arc_height),
                    Point::new(x2, -arc_height),
                    Point::new(x2, if right.modified { -arc_height } else { 0.0 }),
                ],
            };

            let label_anchor = cubic_bezier(&control_points, 0.5);
            let label = self.number_junctions.then(|| {
                TextLabel::new(label_anchor, format_count(count), self.font_size).aligned(HAlign::Center, VAlign::Center)
            });

            arcs.push(JunctionArc {
                junction,
                count,
                placement,
                stroke: BezierStroke {
                    control_points,
                    width: stroke_width(count, min_count, max_count, self.min_width),
                    color: color.to_string(),
                },
                label_anchor,
                label,
                start_clamped: left.modified,
                end_clamped: right.modified,
            });
        }

        log::debug!(
            "Laid out {} junction arcs (counts {}..{})",
            arcs.len(),
            min_count,
            max_count
        );
        Ok(arcs)
    }

    /// Filter by count, then order by span descending, start and end ascending.
    fn rank(&self, junctions: &HashMap<Junction, f64>) -> Vec<(Junction, f64)> {
        let mut ranked: Vec<(Junction, f64)> = junctions
            .iter()
            .filter(|(_, count)| **count >= self.min_count)
            .map(|(&junction, &count)| (junction, count))
            .collect();
        ranked.sort_by(|(a, _), (b, _)| compare_for_layout(a, b));
        ranked
    }
}

fn compare_for_layout(a: &Junction, b: &Junction) -> Ordering {
    b.span()
        .cmp(&a.span())
        .then(a.start.cmp(&b.start))
        .then(a.end.cmp(&b.end))
}

/// `min_width` for the weakest junction, one unit more for the strongest.
pub fn stroke_width(count: f64, min_count: f64, max_count: f64, min_width: f64) -> f64 {
    let gap = max_count - min_count;
    if gap > 0.0 {
        min_width + (count - min_count) / gap
    } else {
        min_width
    }
}

/// Count rounded to two decimals; whole numbers print without a fraction.
pub fn format_count(count: f64) -> String {
    let rounded = (count * 100.0).round() / 100.0;
    format!("{}", rounded)
}
