//! Depth signal compression
//!
//! Per-base depth is far denser than anything a plot can show once introns are
//! squeezed. Consecutive samples are pooled into buckets no wider than the
//! configured resolution and each bucket is replaced by its mean.

use crate::coords::CoordinateMap;
use crate::error::{SashimiError, SashimiResult};
use crate::types::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthCompressor {
    resolution: f64,
}

impl DepthCompressor {
    /// A non-positive resolution turns compression off.
    pub fn new(resolution: f64) -> Self {
        Self { resolution }
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Compress `depths` sampled at `coords` (walk order, ascending x).
    ///
    /// A bucket opens at the x of its first sample and keeps absorbing samples
    /// until one lies more than `resolution` away; that sample is the last one
    /// pooled and the next bucket opens at its x. A trailing partial bucket is
    /// emitted too.
    pub fn compress(&self, coords: &[f64], depths: &[f64]) -> SashimiResult<Vec<Point>> {
        if coords.len() != depths.len() {
            return Err(SashimiError::malformed(format!(
                "{} coordinates but {} depth values",
                coords.len(),
                depths.len()
            )));
        }
        if coords.is_empty() {
            return Ok(Vec::new());
        }
        if !(self.resolution > 0.0) || !self.resolution.is_finite() {
            return Ok(coords.iter().zip(depths).map(|(&x, &d)| Point::new(x, d)).collect());
        }

        let mut out = Vec::new();
        let mut bucket = Bucket::open(coords[0]);
        for (&x, &depth) in coords.iter().zip(depths) {
            bucket.push(depth);
            if (x - bucket.start).abs() > self.resolution {
                out.push(bucket.close());
                bucket = Bucket::open(x);
            }
        }
        if bucket.count > 0 {
            out.push(bucket.close());
        }

        log::debug!(
            "Compressed {} depth samples to {} points at resolution {}",
            coords.len(),
            out.len(),
            self.resolution
        );
        Ok(out)
    }

    /// Compress a region-aligned depth array along `map`, in ascending plot x.
    pub fn compress_map(&self, map: &CoordinateMap, wiggle: &[f64]) -> SashimiResult<Vec<Point>> {
        if wiggle.len() != map.len() {
            return Err(SashimiError::malformed(format!(
                "depth array has {} values, coordinate map has {}",
                wiggle.len(),
                map.len()
            )));
        }
        if map.is_mirrored() {
            let coords: Vec<f64> = map.coords().iter().rev().copied().collect();
            let depths: Vec<f64> = wiggle.iter().rev().copied().collect();
            self.compress(&coords, &depths)
        } else {
            self.compress(map.coords(), wiggle)
        }
    }
}

struct Bucket {
    start: f64,
    sum: f64,
    min: f64,
    max: f64,
    count: usize,
}

impl Bucket {
    fn open(start: f64) -> Self {
        Self {
            start,
            sum: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            count: 0,
        }
    }

    fn push(&mut self, depth: f64) {
        self.sum += depth;
        self.min = self.min.min(depth);
        self.max = self.max.max(depth);
        self.count += 1;
    }

    // the clamp keeps rounding in `sum` from leaving the sample range
    fn close(&self) -> Point {
        let mean = (self.sum / self.count as f64).clamp(self.min, self.max);
        Point::new(self.start, mean)
    }
}
