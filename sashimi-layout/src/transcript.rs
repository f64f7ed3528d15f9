//! Transcript track layout
//!
//! One row per transcript under the sample panels: exon boxes, an intron
//! line across the transcript and chevrons along it showing the direction
//! of transcription.

use crate::scene::{Polygon, Polyline, TextLabel, TranscriptRow, TranscriptTrack};
use sashimi_core::config::PlotConfig;
use sashimi_core::coords::CoordinateMap;
use sashimi_core::types::{Point, Strand, Transcript};

/// Full height of an exon box, in row units
pub const EXON_HEIGHT: f64 = 0.3;
/// Arrow count for a transcript spanning the whole plot
pub const MAX_ARROWS: usize = 50;

const LINE_WIDTH: f64 = 0.5;
const GLYPH_COLOR: &str = "black";
const LABEL_OFFSET: f64 = 0.3;

#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptLayout {
    font_size: u32,
    show_gene: bool,
}

impl Default for TranscriptLayout {
    fn default() -> Self {
        Self { font_size: 6, show_gene: true }
    }
}

impl TranscriptLayout {
    pub fn new(font_size: u32, show_gene: bool) -> Self {
        Self { font_size, show_gene }
    }

    pub fn from_config(config: &PlotConfig) -> Self {
        Self::new(config.font_size, config.show_gene)
    }

    /// Rows follow the input order, starting at 0.
    pub fn layout(&self, transcripts: &[Transcript], map: &CoordinateMap) -> TranscriptTrack {
        let max_x = map.max_x();
        let rows: Vec<TranscriptRow> = transcripts
            .iter()
            .enumerate()
            .map(|(row, transcript)| self.layout_row(row, transcript, map, max_x))
            .collect();

        log::debug!(
            "Laid out {} transcript rows, {} arrows",
            rows.len(),
            rows.iter().map(|r| r.arrows.len()).sum::<usize>()
        );

        TranscriptTrack {
            rows,
            x_range: (0.0, max_x),
            y_range: (-0.5, transcripts.len() as f64 + 0.5),
        }
    }

    fn layout_row(&self, row: usize, transcript: &Transcript, map: &CoordinateMap, max_x: f64) -> TranscriptRow {
        let y = row as f64;
        let half = EXON_HEIGHT / 2.0;

        let exons = transcript
            .exons
            .iter()
            .map(|exon| {
                let (s, e) = (map.x_of(exon.start), map.x_of(exon.end));
                Polygon {
                    points: vec![
                        Point::new(s, y - half),
                        Point::new(e, y - half),
                        Point::new(e, y + half),
                        Point::new(s, y + half),
                    ],
                    color: GLYPH_COLOR.to_string(),
                }
            })
            .collect();

        let (x_start, x_end) = (map.x_of(transcript.start), map.x_of(transcript.end));
        let intron = Polyline::new(vec![Point::new(x_start, y), Point::new(x_end, y)], LINE_WIDTH, GLYPH_COLOR);

        let points_right = arrows_point_right(transcript.strand, map);
        let arrows = arrow_glyphs(x_start.min(x_end), (x_end - x_start).abs(), max_x, y, points_right);

        TranscriptRow {
            transcript_id: transcript.id.clone(),
            row,
            exons,
            intron,
            arrows,
            labels: self.labels(transcript, y, max_x),
        }
    }

    fn labels(&self, transcript: &Transcript, y: f64, max_x: f64) -> Vec<TextLabel> {
        let x = -LABEL_OFFSET * max_x;
        if self.show_gene {
            vec![
                TextLabel::new(Point::new(x, y + 0.15), transcript.gene.as_str(), self.font_size),
                TextLabel::new(Point::new(x, y - 0.25), transcript.id.as_str(), self.font_size),
            ]
        } else {
            vec![TextLabel::new(Point::new(x, y - 0.1), transcript.id.as_str(), self.font_size)]
        }
    }
}

/// Minus-strand transcripts point left unless the map already reads them 5' to 3'.
pub fn arrows_point_right(strand: Strand, map: &CoordinateMap) -> bool {
    strand == Strand::Forward || map.is_mirrored()
}

/// Evenly spaced chevrons over `[min_x, min_x + length]`, denser for longer
/// transcripts relative to the plot width.
fn arrow_glyphs(min_x: f64, length: f64, max_x: f64, y: f64, points_right: bool) -> Vec<Polyline> {
    if length <= 0.0 || max_x <= 0.0 {
        return Vec::new();
    }
    let count = (length / max_x * MAX_ARROWS as f64).ceil() as usize;
    let spread = 0.2 * length / count as f64;
    let tail = if points_right { -spread } else { spread };
    let rise = EXON_HEIGHT / 5.0;

    (0..count)
        .map(|i| {
            let loc = i as f64 * length / count as f64 + min_x;
            Polyline::new(
                vec![
                    Point::new(loc + tail, y - rise),
                    Point::new(loc, y),
                    Point::new(loc + tail, y + rise),
                ],
                LINE_WIDTH,
                GLYPH_COLOR,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sashimi_core::coords::CoordinateScaler;
    use sashimi_core::types::Exon;

    fn map(reverse_minus: bool, strand: Strand) -> CoordinateMap {
        let no_exons: &[Exon] = &[];
        CoordinateScaler::new(1.0, 1.0, reverse_minus)
            .unwrap()
            .scale(0, 99, strand, no_exons)
            .unwrap()
    }

    #[test]
    fn test_rows_increase() {
        let transcripts = vec![
            Transcript::new("tx1", "g1", Strand::Forward, 10, 60),
            Transcript::new("tx2", "g1", Strand::Forward, 20, 80),
            Transcript::new("tx3", "g2", Strand::Reverse, 0, 99),
        ];
        let track = TranscriptLayout::default().layout(&transcripts, &map(false, Strand::Forward));
        let rows: Vec<usize> = track.rows.iter().map(|r| r.row).collect();
        assert_eq!(rows, vec![0, 1, 2]);
        assert_eq!(track.y_range, (-0.5, 3.5));
        assert_eq!(track.x_range, (0.0, 99.0));
    }

    #[test]
    fn test_exon_boxes_and_intron() {
        let transcript = Transcript::new("tx1", "g1", Strand::Forward, 10, 60).with_exon(10, 20);
        let track = TranscriptLayout::default().layout(&[transcript], &map(false, Strand::Forward));
        let row = &track.rows[0];
        assert_eq!(
            row.exons[0].points,
            vec![
                Point::new(10.0, -0.15),
                Point::new(20.0, -0.15),
                Point::new(20.0, 0.15),
                Point::new(10.0, 0.15),
            ]
        );
        assert_eq!(row.intron.points, vec![Point::new(10.0, 0.0), Point::new(60.0, 0.0)]);
    }

    #[test]
    fn test_arrow_density() {
        let full = Transcript::new("full", "g", Strand::Forward, 0, 99);
        let track = TranscriptLayout::default().layout(&[full], &map(false, Strand::Forward));
        assert_eq!(track.rows[0].arrows.len(), MAX_ARROWS);

        // 49 of 99 units: ceil(24.7)
        let half = Transcript::new("half", "g", Strand::Forward, 10, 59);
        let track = TranscriptLayout::default().layout(&[half], &map(false, Strand::Forward));
        assert_eq!(track.rows[0].arrows.len(), 25);
        assert_eq!(track.rows[0].arrows[0].points[1], Point::new(10.0, 0.0));
    }

    #[test]
    fn test_arrow_direction_never_double_flips() {
        let forward = map(true, Strand::Forward);
        let mirrored = map(true, Strand::Reverse);
        assert!(arrows_point_right(Strand::Forward, &forward));
        assert!(!arrows_point_right(Strand::Reverse, &forward));
        assert!(arrows_point_right(Strand::Reverse, &mirrored));
        assert!(arrows_point_right(Strand::Forward, &mirrored));
    }

    #[test]
    fn test_forward_arrows_on_mirrored_map_point_right() {
        let transcript = Transcript::new("tx1", "g1", Strand::Forward, 0, 99);
        let track = TranscriptLayout::default().layout(&[transcript], &map(true, Strand::Reverse));
        for arrow in &track.rows[0].arrows {
            assert!(arrow.points[0].x < arrow.points[1].x);
        }
    }

    #[test]
    fn test_minus_strand_arrows_point_left_unmirrored() {
        let transcript = Transcript::new("tx1", "g1", Strand::Reverse, 0, 99);
        let track = TranscriptLayout::default().layout(&[transcript], &map(false, Strand::Reverse));
        let arrow = &track.rows[0].arrows[3];
        assert!(arrow.points[0].x > arrow.points[1].x);
    }

    #[test]
    fn test_minus_strand_arrows_on_mirrored_map() {
        let transcript = Transcript::new("tx1", "g1", Strand::Reverse, 0, 99);
        let track = TranscriptLayout::default().layout(&[transcript], &map(true, Strand::Reverse));
        let arrow = &track.rows[0].arrows[3];
        // tail sits left of the tip
        assert!(arrow.points[0].x < arrow.points[1].x);
    }

    #[test]
    fn test_labels() {
        let transcript = Transcript::new("tx1", "gene1", Strand::Forward, 0, 99);
        let with_gene = TranscriptLayout::new(8, true).layout(&[transcript.clone()], &map(false, Strand::Forward));
        let labels = &with_gene.rows[0].labels;
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[0].text, "gene1");
        assert_eq!(labels[0].anchor.y, 0.15);
        assert_eq!(labels[1].text, "tx1");
        assert_eq!(labels[1].anchor.y, -0.25);
        assert_eq!(labels[1].font_size, 8);
        assert!((labels[0].anchor.x + 29.7).abs() < 1e-9);

        let without = TranscriptLayout::new(8, false).layout(&[transcript], &map(false, Strand::Forward));
        let labels = &without.rows[0].labels;
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].anchor.y, -0.1);
    }

    #[test]
    fn test_transcript_wider_than_region_is_clamped() {
        let transcript = Transcript::new("tx1", "g1", Strand::Forward, 50, 500).with_exon(80, 400);
        let track = TranscriptLayout::default().layout(&[transcript], &map(false, Strand::Forward));
        let row = &track.rows[0];
        assert_eq!(row.intron.points[1], Point::new(99.0, 0.0));
        assert_eq!(row.exons[0].points[1].x, 99.0);
    }
}
