//! Render driver
//!
//! Validates a request, builds the coordinate map and axis bounds once, then
//! lays out every sample panel and the transcript track against them.

use crate::axis::{x_axis, x_caption, AxisBounds, AxisNormalizer, PanelExtent};
use crate::junction::JunctionLayoutEngine;
use crate::scene::{FilledArea, HAlign, PanelScene, Polyline, Scene, TextLabel, VAlign, YAxis};
use crate::transcript::TranscriptLayout;
use rayon::prelude::*;
use sashimi_core::config::PlotConfig;
use sashimi_core::coords::{CoordinateMap, CoordinateScaler};
use sashimi_core::depth::DepthCompressor;
use sashimi_core::error::{SashimiError, SashimiResult};
use sashimi_core::types::{GenomicRegion, Point, SamplePanel};
use std::borrow::Cow;

/// Ylabel padding per character of the longest alias
const LABEL_PAD_PER_CHAR: f64 = 2.5;
const INDICATOR_WIDTH: f64 = 0.5;
const INDICATOR_COLOR: &str = "black";

/// One region and the samples to draw over it.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub region: GenomicRegion,
    pub panels: Vec<SamplePanel>,
}

impl RenderRequest {
    pub fn new(region: GenomicRegion, panels: Vec<SamplePanel>) -> Self {
        Self { region, panels }
    }
}

#[derive(Debug, Clone)]
pub struct SashimiPlot {
    config: PlotConfig,
    scaler: CoordinateScaler,
    compressor: DepthCompressor,
    junctions: JunctionLayoutEngine,
    normalizer: AxisNormalizer,
    transcripts: TranscriptLayout,
}

impl SashimiPlot {
    /// Fails with a configuration error before any geometry exists.
    pub fn new(config: PlotConfig) -> SashimiResult<Self> {
        config.validate()?;
        Ok(Self {
            scaler: CoordinateScaler::from_config(&config)?,
            compressor: DepthCompressor::new(config.resolution),
            junctions: JunctionLayoutEngine::from_config(&config),
            normalizer: AxisNormalizer::from_config(&config),
            transcripts: TranscriptLayout::from_config(&config),
            config,
        })
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    pub fn render(&self, region: &GenomicRegion, panels: &[SamplePanel]) -> SashimiResult<Scene> {
        log::info!(
            "Rendering {}:{}-{} ({}) with {} panels",
            region.chromosome,
            region.start,
            region.end,
            region.strand,
            panels.len()
        );
        validate_request(region, panels)?;

        let map = self.scaler.scale_region(region)?;
        let extents: Vec<PanelExtent> = panels
            .iter()
            .map(|p| PanelExtent::new(p.profile.max_depth(), p.no_coverage))
            .collect();
        let axes = self.normalizer.normalize(&extents);

        let label_pad = panels
            .iter()
            .map(|p| p.alias.chars().count())
            .max()
            .unwrap_or(0) as f64
            * LABEL_PAD_PER_CHAR;

        let mut scenes = Vec::with_capacity(panels.len());
        for (i, (panel, axis)) in panels.iter().zip(&axes).enumerate() {
            let is_last = i + 1 == panels.len();
            scenes.push(self.render_panel(region, panel, axis, &map, label_pad, is_last)?);
        }

        let transcripts = if region.transcripts.is_empty() {
            None
        } else {
            Some(self.transcripts.layout(&region.transcripts, &map))
        };

        let transcript_rows = if region.transcripts.len() > 1 {
            region.transcripts.len() / 2
        } else {
            1
        };

        let scene = Scene {
            title: self.config.title.clone(),
            x_range: (0.0, map.max_x()),
            grid_rows: panels.len() + transcript_rows,
            panels: scenes,
            transcripts,
        };
        log::info!(
            "Rendered {} panels, {} junction arcs",
            scene.panels.len(),
            scene.arc_count()
        );
        Ok(scene)
    }

    /// Render independent requests in parallel. Results keep input order.
    pub fn render_batch(&self, requests: &[RenderRequest]) -> Vec<SashimiResult<Scene>> {
        log::info!("Rendering batch of {} regions", requests.len());
        requests
            .par_iter()
            .map(|request| self.render(&request.region, &request.panels))
            .collect()
    }

    fn render_panel(
        &self,
        region: &GenomicRegion,
        panel: &SamplePanel,
        axis: &AxisBounds,
        map: &CoordinateMap,
        label_pad: f64,
        is_last: bool,
    ) -> SashimiResult<PanelScene> {
        let wiggle = &panel.profile.wiggle;

        let area = if panel.no_coverage {
            None
        } else {
            let points = self.compressor.compress_map(map, wiggle)?;
            log::debug!(
                "Panel {}: compressed {} depth values to {} points",
                panel.alias,
                wiggle.len(),
                points.len()
            );
            Some(FilledArea {
                points,
                baseline: 0.0,
                color: panel.color.clone(),
            })
        };

        // placeholder panels anchor arcs on the baseline whatever the profile holds
        let anchor_depth: Cow<'_, [f64]> = if panel.no_coverage {
            Cow::Owned(vec![0.0; wiggle.len()])
        } else {
            Cow::Borrowed(wiggle)
        };
        let arcs = self
            .junctions
            .layout(&panel.profile.junctions, map, &anchor_depth, axis.arc_height(), &panel.color)?;

        let indicators = region
            .sites
            .iter()
            .filter_map(|&site| {
                if site < region.start || site > region.end {
                    log::warn!("Indicator site {} is outside {}-{}, skipping", site, region.start, region.end);
                    return None;
                }
                let x = map.x_of(site);
                Some(
                    Polyline::new(
                        vec![Point::new(x, 0.0), Point::new(x, axis.upper)],
                        INDICATOR_WIDTH,
                        INDICATOR_COLOR,
                    )
                    .dashed(),
                )
            })
            .collect();

        let sample_label = panel.label.as_ref().map(|text| {
            TextLabel::new(Point::new(map.max_x(), axis.upper), text.as_str(), self.config.font_size)
                .aligned(HAlign::Right, VAlign::Bottom)
                .colored(panel.color.as_str())
        });

        let y_label = self.config.show_ylabel.then(|| {
            TextLabel::new(Point::new(0.0, axis.upper / 2.0), panel.alias.as_str(), self.config.font_size)
                .aligned(HAlign::Right, VAlign::Center)
        });

        let bottom_axis = is_last.then(|| {
            let caption = self
                .config
                .show_xlabel
                .then(|| x_caption(&region.chromosome, region.strand, self.config.log));
            x_axis(map, self.config.nxticks, caption)
        });

        Ok(PanelScene {
            alias: panel.alias.clone(),
            color: panel.color.clone(),
            area,
            arcs,
            indicators,
            sample_label,
            y_axis: YAxis {
                range: axis.visible_range(),
                spine: axis.spine(),
                ticks: axis.tick_marks(),
                label: y_label,
                label_pad,
            },
            x_axis: bottom_axis,
        })
    }
}

fn validate_request(region: &GenomicRegion, panels: &[SamplePanel]) -> SashimiResult<()> {
    region.validate()?;
    if panels.is_empty() {
        return Err(SashimiError::empty("no sample panels to render"));
    }
    for panel in panels {
        panel.profile.validate_against(region)?;
        if let Some(junction) = panel.profile.junctions.keys().find(|j| j.start >= j.end) {
            return Err(SashimiError::malformed(format!(
                "panel {} has junction {} with start not before end",
                panel.alias, junction
            )));
        }
    }
    Ok(())
}
