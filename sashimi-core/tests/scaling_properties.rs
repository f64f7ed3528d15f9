use proptest::prelude::*;
use sashimi_core::*;

fn exon_strategy(start: u64, end: u64) -> impl Strategy<Value = Vec<Exon>> {
    // allowed to poke past the region so clipping is exercised
    prop::collection::vec(
        (start.saturating_sub(20)..end + 20, 0u64..60).prop_map(|(s, len)| Exon::new(s, s + len, Strand::Forward)),
        0..6,
    )
}

fn region_strategy() -> impl Strategy<Value = (u64, u64, Vec<Exon>)> {
    (100u64..200, 1u64..400).prop_flat_map(|(start, span)| {
        let end = start + span;
        (Just(start), Just(end), exon_strategy(start, end))
    })
}

fn is_exonic(pos: u64, exons: &[Exon]) -> bool {
    exons.iter().any(|e| e.start <= pos && pos <= e.end)
}

proptest! {
    #[test]
    fn plot_coordinates_are_monotonic_and_sum_to_total(
        (start, end, exons) in region_strategy(),
        exon_scale in 0.1f64..10.0,
        intron_scale in 0.1f64..50.0,
        reverse in any::<bool>(),
    ) {
        let strand = if reverse { Strand::Reverse } else { Strand::Forward };
        let scaler = CoordinateScaler::new(exon_scale, intron_scale, true).unwrap();
        let map = scaler.scale(start, end, strand, &exons).unwrap();

        let walk = map.walk_order();
        prop_assert_eq!(walk.len(), (end - start + 1) as usize);
        prop_assert_eq!(walk[0], 0.0);
        for pair in walk.windows(2) {
            prop_assert!(pair[0] <= pair[1]);
        }

        let expected: f64 = (start..=end)
            .map(|pos| if is_exonic(pos, &exons) { 1.0 / exon_scale } else { 1.0 / intron_scale })
            .sum();
        let tolerance = 1e-9 * expected.max(1.0);
        prop_assert!((map.total_width() - expected).abs() < tolerance);

        let last_walked = if map.is_mirrored() { 0 } else { map.len() - 1 };
        let last_step = map.step_at(last_walked).unwrap();
        prop_assert!((walk[walk.len() - 1] + last_step - map.total_width()).abs() < tolerance);
    }

    #[test]
    fn double_mirror_reproduces_forward_map(
        (start, end, exons) in region_strategy(),
        exon_scale in 0.1f64..10.0,
        intron_scale in 0.1f64..50.0,
    ) {
        let forward = CoordinateScaler::new(exon_scale, intron_scale, false)
            .unwrap()
            .scale(start, end, Strand::Reverse, &exons)
            .unwrap();
        let twice = forward.mirrored().mirrored();
        prop_assert_eq!(forward.coords(), twice.coords());
        prop_assert!(!twice.is_mirrored());
    }

    #[test]
    fn compression_is_bounded_by_input(
        depths in prop::collection::vec(0.0f64..1000.0, 1..500),
        step in 0.01f64..3.0,
        resolution in 0.01f64..20.0,
    ) {
        let coords: Vec<f64> = (0..depths.len()).map(|i| i as f64 * step).collect();
        let out = DepthCompressor::new(resolution).compress(&coords, &depths).unwrap();

        let max = depths.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = depths.iter().copied().fold(f64::INFINITY, f64::min);
        prop_assert!(out.len() <= depths.len());
        prop_assert!(!out.is_empty());
        for point in &out {
            prop_assert!(point.y <= max && point.y >= min);
        }
        for pair in out.windows(2) {
            prop_assert!(pair[0].x < pair[1].x);
        }
    }
}

#[test]
fn identity_scaling_over_one_hundred_bases() {
    let no_exons: &[Exon] = &[];
    let map = CoordinateScaler::new(1.0, 1.0, false)
        .unwrap()
        .scale(5_000, 5_100, Strand::Forward, no_exons)
        .unwrap();
    let expected: Vec<f64> = (0..=100).map(f64::from).collect();
    assert_eq!(map.coords(), expected.as_slice());
}

#[test]
fn mirrored_compression_runs_left_to_right() {
    let region = GenomicRegion::new("chr2", 0, 9, Strand::Reverse).unwrap();
    let map = CoordinateScaler::new(1.0, 1.0, true).unwrap().scale_region(&region).unwrap();
    let wiggle: Vec<f64> = (0..10).map(f64::from).collect();

    let out = DepthCompressor::new(0.0).compress_map(&map, &wiggle).unwrap();
    assert_eq!(out.first(), Some(&Point::new(0.0, 9.0)));
    assert_eq!(out.last(), Some(&Point::new(9.0, 0.0)));
}
