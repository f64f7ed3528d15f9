//! Axis normalization
//!
//! Panels share one y scale so depths compare at a glance. The bound is the
//! rounded-up largest panel maximum, made even so ticks land on round values,
//! and an equal-height strip below the baseline (half the bound) is reserved
//! for the arcs drawn under it.

use crate::scene::{AxisTicks, XAxis};
use sashimi_core::config::{LogBase, PlotConfig};
use sashimi_core::coords::CoordinateMap;
use sashimi_core::types::Strand;

/// Bound used when no panel has any depth above zero
pub const MIN_UPPER_BOUND: f64 = 2.0;

/// Height of the placeholder glyph standing in for absent coverage
pub const NO_COVERAGE_GLYPH_HEIGHT: f64 = 1.0;

/// Visible headroom above the bound, leaves room for the sample label
pub const HEADROOM: f64 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelExtent {
    pub max_depth: f64,
    pub no_coverage: bool,
}

impl PanelExtent {
    pub fn new(max_depth: f64, no_coverage: bool) -> Self {
        Self { max_depth, no_coverage }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisBounds {
    pub upper: f64,
    /// Negative; space reserved below the baseline
    pub lower: f64,
    pub ticks: Vec<f64>,
    pub labels: Vec<String>,
    /// false for placeholder axes of panels without coverage
    pub quantitative: bool,
}

impl AxisBounds {
    /// Vertical reach of junction arcs: three quarters of the space below the baseline.
    pub fn arc_height(&self) -> f64 {
        -0.75 * self.lower
    }

    /// Range the panel shows, bottom to top.
    pub fn visible_range(&self) -> (f64, f64) {
        (self.lower, HEADROOM * self.upper)
    }

    pub fn spine(&self) -> (f64, f64) {
        (0.0, self.upper)
    }

    pub fn tick_marks(&self) -> AxisTicks {
        AxisTicks {
            positions: self.ticks.clone(),
            labels: self.labels.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxisNormalizer {
    nyticks: usize,
    log: LogBase,
    share_y: bool,
}

impl Default for AxisNormalizer {
    fn default() -> Self {
        Self { nyticks: 3, log: LogBase::None, share_y: true }
    }
}

impl AxisNormalizer {
    pub fn new(nyticks: usize, log: LogBase, share_y: bool) -> Self {
        Self { nyticks, log, share_y }
    }

    pub fn from_config(config: &PlotConfig) -> Self {
        Self::new(config.nyticks, config.log, config.share_y)
    }

    /// `ceil(max)`, bumped to the next even value; [`MIN_UPPER_BOUND`] when
    /// nothing rises above zero.
    pub fn upper_bound<I: IntoIterator<Item = f64>>(maxima: I) -> f64 {
        let max = maxima.into_iter().filter(|m| m.is_finite()).fold(0.0, f64::max);
        let mut upper = max.ceil();
        if upper <= 0.0 {
            return MIN_UPPER_BOUND;
        }
        if upper % 2.0 == 1.0 {
            upper += 1.0;
        }
        upper
    }

    /// One axis per panel. Quantitative panels share a bound unless `share_y`
    /// is off; panels without coverage get a placeholder.
    pub fn normalize(&self, extents: &[PanelExtent]) -> Vec<AxisBounds> {
        let shared = Self::upper_bound(extents.iter().filter(|e| !e.no_coverage).map(|e| e.max_depth));
        let axes: Vec<AxisBounds> = extents
            .iter()
            .map(|extent| {
                if extent.no_coverage {
                    self.placeholder()
                } else if self.share_y {
                    self.bounds(shared)
                } else {
                    self.bounds(Self::upper_bound([extent.max_depth]))
                }
            })
            .collect();
        log::debug!(
            "Normalized {} panel axes (shared bound {}, share_y {})",
            axes.len(),
            shared,
            self.share_y
        );
        axes
    }

    /// Axis with `nyticks + 1` evenly spaced ticks from 0 to `upper`.
    pub fn bounds(&self, upper: f64) -> AxisBounds {
        let ticks = linspace(0.0, upper, self.nyticks + 1);
        let labels = ticks.iter().map(|&t| self.tick_label(t)).collect();
        AxisBounds {
            upper,
            lower: -0.5 * upper,
            ticks,
            labels,
            quantitative: true,
        }
    }

    /// Same vertical proportions as a quantitative axis, no ticks.
    pub fn placeholder(&self) -> AxisBounds {
        let upper = 2.0 * NO_COVERAGE_GLYPH_HEIGHT;
        AxisBounds {
            upper,
            lower: -0.5 * upper,
            ticks: Vec::new(),
            labels: Vec::new(),
            quantitative: false,
        }
    }

    /// Label text for a tick. The log transform changes the text only.
    pub fn tick_label(&self, tick: f64) -> String {
        let value = match self.log.base() {
            Some(base) => base.powf(tick),
            None => tick,
        };
        if value <= 0.0 || !value.is_finite() {
            String::new()
        } else if value.fract() != 0.0 {
            format!("{:.1}", value)
        } else {
            format!("{:.0}", value)
        }
    }
}

/// `num` evenly spaced values over `[start, stop]`, both ends included.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            (0..num)
                .map(|i| if i == num - 1 { stop } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Genomic tick labels along the bottom of the last panel.
pub fn x_axis(map: &CoordinateMap, nxticks: usize, caption: Option<String>) -> XAxis {
    let positions = linspace(0.0, map.max_x() - 1.0, nxticks);
    let labels = positions.iter().map(|&x| map.gene_at(x).to_string()).collect();
    XAxis {
        range: (0.0, map.max_x()),
        ticks: AxisTicks { positions, labels },
        caption,
    }
}

pub fn x_caption(chromosome: &str, strand: Strand, log: LogBase) -> String {
    let mut caption = format!("Genomic coordinate ({}), \"{}\" strand", chromosome, strand);
    match log {
        LogBase::Log2 => caption.push_str(", y axis is log2 transformed"),
        LogBase::Log10 => caption.push_str(", y axis is log10 transformed"),
        LogBase::None => {}
    }
    caption
}

#[cfg(test)]
mod tests {
    use super::*;
    use sashimi_core::coords::CoordinateScaler;
    use sashimi_core::types::Exon;

    fn quantitative(maxima: &[f64]) -> Vec<PanelExtent> {
        maxima.iter().map(|&m| PanelExtent::new(m, false)).collect()
    }

    #[test]
    fn test_even_bound_unchanged() {
        assert_eq!(AxisNormalizer::upper_bound([3.0, 7.0, 10.0]), 10.0);
    }

    #[test]
    fn test_odd_bound_bumped() {
        assert_eq!(AxisNormalizer::upper_bound([3.0, 5.0]), 6.0);
        assert_eq!(AxisNormalizer::upper_bound([4.2]), 6.0);
    }

    #[test]
    fn test_degenerate_range_falls_back() {
        assert_eq!(AxisNormalizer::upper_bound([0.0, 0.0]), MIN_UPPER_BOUND);
        assert_eq!(AxisNormalizer::upper_bound(Vec::new()), MIN_UPPER_BOUND);
    }

    #[test]
    fn test_shared_bounds_and_ticks() {
        let axes = AxisNormalizer::new(4, LogBase::None, true).normalize(&quantitative(&[3.0, 7.0, 10.0]));
        assert_eq!(axes.len(), 3);
        for axis in &axes {
            assert_eq!(axis.upper, 10.0);
            assert_eq!(axis.lower, -5.0);
            assert_eq!(axis.ticks, vec![0.0, 2.5, 5.0, 7.5, 10.0]);
            assert_eq!(axis.labels, vec!["", "2.5", "5", "7.5", "10"]);
            assert_eq!(axis.arc_height(), 3.75);
            assert_eq!(axis.visible_range(), (-5.0, 12.0));
        }
    }

    #[test]
    fn test_per_panel_bounds() {
        let axes = AxisNormalizer::new(2, LogBase::None, false).normalize(&quantitative(&[3.0, 10.0]));
        assert_eq!(axes[0].upper, 4.0);
        assert_eq!(axes[1].upper, 10.0);
    }

    #[test]
    fn test_log_changes_labels_not_positions() {
        let linear = AxisNormalizer::new(2, LogBase::None, true).bounds(4.0);
        let log2 = AxisNormalizer::new(2, LogBase::Log2, true).bounds(4.0);
        assert_eq!(linear.ticks, log2.ticks);
        assert_eq!(linear.lower, log2.lower);
        assert_eq!(log2.labels, vec!["1", "4", "16"]);

        let log10 = AxisNormalizer::new(2, LogBase::Log10, true).bounds(2.0);
        assert_eq!(log10.labels, vec!["1", "10", "100"]);
    }

    #[test]
    fn test_overflowing_log_label_is_blank() {
        let normalizer = AxisNormalizer::new(1, LogBase::Log10, true);
        assert_eq!(normalizer.tick_label(400.0), "");
        assert_eq!(normalizer.tick_label(3.0), "1000");
    }

    #[test]
    fn test_no_coverage_placeholder() {
        let extents = vec![PanelExtent::new(8.0, false), PanelExtent::new(120.0, true)];
        let axes = AxisNormalizer::default().normalize(&extents);
        // the placeholder panel does not inflate the shared bound
        assert_eq!(axes[0].upper, 8.0);
        assert!(!axes[1].quantitative);
        assert!(axes[1].ticks.is_empty() && axes[1].labels.is_empty());
        assert_eq!(axes[1].upper, 2.0 * NO_COVERAGE_GLYPH_HEIGHT);
        assert_eq!(axes[1].lower, -0.5 * axes[1].upper);
    }

    #[test]
    fn test_linspace() {
        assert_eq!(linspace(0.0, 6.0, 4), vec![0.0, 2.0, 4.0, 6.0]);
        assert_eq!(linspace(0.0, 6.0, 1), vec![0.0]);
        assert!(linspace(0.0, 6.0, 0).is_empty());
    }

    #[test]
    fn test_x_axis_labels_genomic_positions() {
        let no_exons: &[Exon] = &[];
        let map = CoordinateScaler::new(1.0, 1.0, false)
            .unwrap()
            .scale(1000, 1100, Strand::Forward, no_exons)
            .unwrap();
        let axis = x_axis(&map, 4, None);
        assert_eq!(axis.ticks.positions, vec![0.0, 33.0, 66.0, 99.0]);
        assert_eq!(axis.ticks.labels, vec!["1000", "1033", "1066", "1099"]);
        assert_eq!(axis.range, (0.0, 100.0));
    }

    #[test]
    fn test_x_caption() {
        assert_eq!(
            x_caption("chr1", Strand::Reverse, LogBase::Log10),
            "Genomic coordinate (chr1), \"-\" strand, y axis is log10 transformed"
        );
    }
}
