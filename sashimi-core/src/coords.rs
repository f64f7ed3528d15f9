//! Genome to plot coordinate mapping
//!
//! Each base of a region consumes `1 / exon_scale` plot units when exonic and
//! `1 / intron_scale` otherwise. Walking the region base by base and recording
//! the running total gives a monotonic map that shrinks introns and stretches
//! exons. Minus-strand regions can be walked from their 3' end instead so that
//! the plot always reads 5' to 3' left to right.

use crate::config::PlotConfig;
use crate::error::{SashimiError, SashimiResult};
use crate::types::*;
use std::collections::BTreeMap;

/// Index into a region-aligned array after clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClampedIndex {
    pub index: usize,
    /// The requested offset fell outside `[0, len - 1]`
    pub modified: bool,
}

/// Clamp a signed offset into `[0, len - 1]`, reporting whether it moved.
///
/// `len` must be non-zero.
pub fn clamp_index(offset: i64, len: usize) -> ClampedIndex {
    debug_assert!(len > 0);
    let last = len.saturating_sub(1) as i64;
    if offset < 0 {
        ClampedIndex { index: 0, modified: true }
    } else if offset > last {
        ClampedIndex { index: last as usize, modified: true }
    } else {
        ClampedIndex { index: offset as usize, modified: false }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateScaler {
    exon_scale: f64,
    intron_scale: f64,
    reverse_minus: bool,
}

impl CoordinateScaler {
    pub fn new(exon_scale: f64, intron_scale: f64, reverse_minus: bool) -> SashimiResult<Self> {
        for (name, value) in [("exon_scale", exon_scale), ("intron_scale", intron_scale)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SashimiError::configuration(format!(
                    "{} must be a positive number, got {}",
                    name, value
                )));
            }
        }
        Ok(Self { exon_scale, intron_scale, reverse_minus })
    }

    pub fn from_config(config: &PlotConfig) -> SashimiResult<Self> {
        Self::new(config.exon_scale, config.intron_scale, config.reverse_minus)
    }

    /// Build the map for `[start, end]` given the exonic intervals (inclusive).
    ///
    /// Exons reaching past either end are clipped; exons entirely outside are ignored.
    pub fn scale<'a, I>(&self, start: GenomicPos, end: GenomicPos, strand: Strand, exons: I) -> SashimiResult<CoordinateMap>
    where
        I: IntoIterator<Item = &'a Exon>,
    {
        if start > end {
            return Err(SashimiError::malformed(format!("region start {} is after end {}", start, end)));
        }
        let len = (end - start + 1) as usize;

        let mut exonic = vec![false; len];
        for exon in exons {
            if exon.end < start || exon.start > end {
                continue;
            }
            let first = (exon.start.max(start) - start) as usize;
            let last = (exon.end.min(end) - start) as usize;
            exonic[first..=last].iter_mut().for_each(|e| *e = true);
        }

        let exon_step = 1.0 / self.exon_scale;
        let intron_step = 1.0 / self.intron_scale;
        let steps: Vec<f64> = exonic
            .iter()
            .map(|&is_exon| if is_exon { exon_step } else { intron_step })
            .collect();

        let mirrored = self.reverse_minus && strand.is_reverse();
        let map = CoordinateMap::walk(start, steps, mirrored);
        log::debug!(
            "Scaled {} bases ({} exonic) to plot width {:.2}{}",
            len,
            exonic.iter().filter(|&&e| e).count(),
            map.total_width(),
            if mirrored { ", mirrored" } else { "" }
        );
        Ok(map)
    }

    pub fn scale_region(&self, region: &GenomicRegion) -> SashimiResult<CoordinateMap> {
        self.scale(region.start, region.end, region.strand, region.exons())
    }
}

/// Write-once mapping between region offsets and plot x.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateMap {
    start: GenomicPos,
    steps: Vec<f64>,
    genome_to_plot: Vec<f64>,
    plot_to_gene: BTreeMap<u64, GenomicPos>,
    total_width: f64,
    mirrored: bool,
}

impl CoordinateMap {
    /// Walk the offsets (descending when `mirrored`), recording the running
    /// plot x at each offset before advancing by its step.
    fn walk(start: GenomicPos, steps: Vec<f64>, mirrored: bool) -> Self {
        let len = steps.len();
        let mut genome_to_plot = vec![0.0; len];
        let mut plot_to_gene = BTreeMap::new();
        let mut x: f64 = 0.0;

        for i in 0..len {
            let offset = if mirrored { len - 1 - i } else { i };
            genome_to_plot[offset] = x;
            // first base to reach a bucket labels it
            plot_to_gene.entry(x.floor() as u64).or_insert(start + offset as GenomicPos);
            x += steps[offset];
        }

        Self {
            start,
            steps,
            genome_to_plot,
            plot_to_gene,
            total_width: x,
            mirrored,
        }
    }

    /// The same region walked from the opposite end.
    pub fn mirrored(&self) -> Self {
        Self::walk(self.start, self.steps.clone(), !self.mirrored)
    }

    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    pub fn len(&self) -> usize {
        self.genome_to_plot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genome_to_plot.is_empty()
    }

    pub fn start(&self) -> GenomicPos {
        self.start
    }

    pub fn end(&self) -> GenomicPos {
        self.start + self.len().saturating_sub(1) as GenomicPos
    }

    /// Plot x for every offset of the region, indexed by genomic offset.
    pub fn coords(&self) -> &[f64] {
        &self.genome_to_plot
    }

    /// Plot x values in walk order (ascending plot x).
    pub fn walk_order(&self) -> Vec<f64> {
        if self.mirrored {
            self.genome_to_plot.iter().rev().copied().collect()
        } else {
            self.genome_to_plot.clone()
        }
    }

    /// Sum of all per-base steps; the right edge of the last base.
    pub fn total_width(&self) -> f64 {
        self.total_width
    }

    /// Largest recorded plot x (the left edge of the last base walked).
    pub fn max_x(&self) -> f64 {
        self.genome_to_plot.iter().copied().fold(0.0, f64::max)
    }

    pub fn step_at(&self, offset: usize) -> Option<f64> {
        self.steps.get(offset).copied()
    }

    pub fn plot_x(&self, offset: usize) -> Option<f64> {
        self.genome_to_plot.get(offset).copied()
    }

    /// Resolve a genomic coordinate to an array index, clamping to the region.
    pub fn resolve(&self, pos: GenomicPos) -> ClampedIndex {
        clamp_index(pos as i64 - self.start as i64, self.len())
    }

    /// Plot x of a genomic coordinate, clamped to the region edges.
    pub fn x_of(&self, pos: GenomicPos) -> f64 {
        self.genome_to_plot[self.resolve(pos).index]
    }

    /// Genomic coordinate labelling the plot-x bucket `floor(x)`.
    ///
    /// Buckets skipped by steps wider than one unit fall back to the closest
    /// lower bucket.
    pub fn gene_at(&self, x: f64) -> GenomicPos {
        let bucket = if x <= 0.0 { 0 } else { x.floor() as u64 };
        self.plot_to_gene
            .range(..=bucket)
            .next_back()
            .or_else(|| self.plot_to_gene.iter().next())
            .map(|(_, &pos)| pos)
            .unwrap_or(self.start)
    }
}
