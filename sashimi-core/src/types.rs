use crate::error::{SashimiError, SashimiResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

pub type GenomicPos = u64;

/// A 2D point in plot space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    pub fn is_reverse(self) -> bool {
        matches!(self, Strand::Reverse)
    }
}

impl From<char> for Strand {
    fn from(c: char) -> Self {
        match c {
            '-' => Strand::Reverse,
            _ => Strand::Forward, // '+' and '.' both read as forward
        }
    }
}

impl From<Strand> for char {
    fn from(strand: Strand) -> Self {
        match strand {
            Strand::Forward => '+',
            Strand::Reverse => '-',
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", char::from(*self))
    }
}

/// Exon interval, inclusive genomic coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exon {
    pub start: GenomicPos,
    pub end: GenomicPos,
    pub strand: Strand,
}

impl Exon {
    pub fn new(start: GenomicPos, end: GenomicPos, strand: Strand) -> Self {
        Self { start, end, strand }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub id: String,
    pub gene: String,
    pub strand: Strand,
    pub start: GenomicPos,
    pub end: GenomicPos,
    pub exons: Vec<Exon>,
}

impl Transcript {
    pub fn new<S: Into<String>>(id: S, gene: S, strand: Strand, start: GenomicPos, end: GenomicPos) -> Self {
        Self {
            id: id.into(),
            gene: gene.into(),
            strand,
            start,
            end,
            exons: Vec::new(),
        }
    }

    pub fn with_exon(mut self, start: GenomicPos, end: GenomicPos) -> Self {
        self.exons.push(Exon::new(start, end, self.strand));
        self
    }

    /// Every exon must sit inside `[start, end]`.
    pub fn validate(&self) -> SashimiResult<()> {
        if self.start > self.end {
            return Err(SashimiError::malformed(format!(
                "transcript {} has start {} after end {}",
                self.id, self.start, self.end
            )));
        }
        for exon in &self.exons {
            if exon.start > exon.end || exon.start < self.start || exon.end > self.end {
                return Err(SashimiError::malformed(format!(
                    "exon {}-{} lies outside transcript {} ({}-{})",
                    exon.start, exon.end, self.id, self.start, self.end
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenomicRegion {
    pub chromosome: String,
    pub start: GenomicPos,
    pub end: GenomicPos,
    pub strand: Strand,
    pub transcripts: Vec<Transcript>,
    /// Positions highlighted with dashed indicator lines on every panel.
    #[serde(default)]
    pub sites: Vec<GenomicPos>,
}

impl GenomicRegion {
    pub fn new<S: Into<String>>(chromosome: S, start: GenomicPos, end: GenomicPos, strand: Strand) -> SashimiResult<Self> {
        if start > end {
            return Err(SashimiError::malformed(format!("region start {} is after end {}", start, end)));
        }
        Ok(Self {
            chromosome: chromosome.into(),
            start,
            end,
            strand,
            transcripts: Vec::new(),
            sites: Vec::new(),
        })
    }

    pub fn with_transcript(mut self, transcript: Transcript) -> Self {
        self.transcripts.push(transcript);
        self
    }

    pub fn with_site(mut self, site: GenomicPos) -> Self {
        self.sites.push(site);
        self
    }

    /// Number of bases covered, `end - start + 1`.
    pub fn len(&self) -> usize {
        (self.end - self.start + 1) as usize
    }

    /// Genomic span `end - start`; zero means there is nothing to lay out.
    pub fn span(&self) -> GenomicPos {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.span() == 0
    }

    /// All exons of all transcripts, in transcript order.
    pub fn exons(&self) -> impl Iterator<Item = &Exon> {
        self.transcripts.iter().flat_map(|t| t.exons.iter())
    }

    pub fn validate(&self) -> SashimiResult<()> {
        if self.start > self.end {
            return Err(SashimiError::malformed(format!(
                "region start {} is after end {}",
                self.start, self.end
            )));
        }
        if self.is_empty() {
            return Err(SashimiError::empty(format!(
                "region {}:{}-{} has zero length",
                self.chromosome, self.start, self.end
            )));
        }
        for transcript in &self.transcripts {
            transcript.validate()?;
        }
        Ok(())
    }
}

/// A splice junction, `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Junction {
    pub start: GenomicPos,
    pub end: GenomicPos,
}

impl Junction {
    pub fn new(start: GenomicPos, end: GenomicPos) -> SashimiResult<Self> {
        if start >= end {
            return Err(SashimiError::malformed(format!(
                "junction start {} must be before end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    pub fn span(&self) -> GenomicPos {
        self.end - self.start
    }
}

impl fmt::Display for Junction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Per-base read depth over a region plus junction counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadDepthProfile {
    pub start: GenomicPos,
    pub end: GenomicPos,
    pub wiggle: Vec<f64>,
    pub junctions: HashMap<Junction, f64>,
}

impl ReadDepthProfile {
    pub fn new(start: GenomicPos, end: GenomicPos, wiggle: Vec<f64>) -> SashimiResult<Self> {
        if start > end {
            return Err(SashimiError::malformed(format!("profile start {} is after end {}", start, end)));
        }
        if wiggle.is_empty() {
            return Err(SashimiError::empty("depth array is empty"));
        }
        let expected = (end - start + 1) as usize;
        if wiggle.len() != expected {
            return Err(SashimiError::malformed(format!(
                "depth array has {} values but {}-{} spans {} bases",
                wiggle.len(),
                start,
                end,
                expected
            )));
        }
        Ok(Self {
            start,
            end,
            wiggle,
            junctions: HashMap::new(),
        })
    }

    /// Profile with junction counts only, for count-table input. Depth is flat zero.
    pub fn from_junctions(start: GenomicPos, end: GenomicPos, junctions: HashMap<Junction, f64>) -> SashimiResult<Self> {
        if start > end {
            return Err(SashimiError::malformed(format!("profile start {} is after end {}", start, end)));
        }
        let len = (end - start + 1) as usize;
        Ok(Self {
            start,
            end,
            wiggle: vec![0.0; len],
            junctions,
        })
    }

    pub fn with_junction(mut self, junction: Junction, count: f64) -> Self {
        *self.junctions.entry(junction).or_insert(0.0) += count;
        self
    }

    pub fn max_depth(&self) -> f64 {
        self.wiggle.iter().copied().fold(0.0, f64::max)
    }

    /// Checks the profile lines up base-for-base with `region`.
    pub fn validate_against(&self, region: &GenomicRegion) -> SashimiResult<()> {
        if self.wiggle.is_empty() {
            return Err(SashimiError::empty("depth array is empty"));
        }
        if self.start != region.start || self.end != region.end {
            return Err(SashimiError::malformed(format!(
                "profile covers {}-{} but region is {}-{}",
                self.start, self.end, region.start, region.end
            )));
        }
        if self.wiggle.len() != region.len() {
            return Err(SashimiError::malformed(format!(
                "depth array has {} values, region spans {} bases",
                self.wiggle.len(),
                region.len()
            )));
        }
        Ok(())
    }
}

/// A profile plus how the caller wants it shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplePanel {
    pub profile: ReadDepthProfile,
    pub color: String,
    pub label: Option<String>,
    pub alias: String,
    /// Set when the profile has junction counts but no quantitative coverage.
    #[serde(default)]
    pub no_coverage: bool,
}

impl SamplePanel {
    pub fn new<S: Into<String>>(alias: S, color: S, profile: ReadDepthProfile) -> Self {
        Self {
            profile,
            color: color.into(),
            label: None,
            alias: alias.into(),
            no_coverage: false,
        }
    }

    pub fn with_label<S: Into<String>>(mut self, label: S) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn without_coverage(mut self) -> Self {
        self.no_coverage = true;
        self
    }
}
