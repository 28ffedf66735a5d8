use super::*;
use crate::fixtures::{LibraryBuilder, standing_kpts};

#[test]
fn tour_visits_nearest_first() {
    let b = LibraryBuilder::new(4)
        .segment(standing_kpts(0.20, 0.5, 1.0, 0.0, 1.0))
        .segment(standing_kpts(0.80, 0.5, 1.0, 0.0, 1.0))
        .segment(standing_kpts(0.30, 0.5, 1.0, 0.0, 1.0))
        .segment(standing_kpts(0.55, 0.5, 1.0, 0.0, 1.0));
    let lib = b.build();
    let windows = lib.windows.as_ref().unwrap();
    let order = reorder_segments(windows, &lib.sources, &lib.segments);
    assert_eq!(order, vec![0, 2, 3, 1]);
}

#[test]
fn tour_is_a_permutation() {
    let mut b = LibraryBuilder::new(2);
    for i in 0..7 {
        b = b.segment(standing_kpts(0.2 + 0.1 * ((i * 3) % 7) as f64 / 2.0, 0.5, 1.0, 0.0, 1.0));
    }
    let lib = b.build();
    let mut order = reorder_segments(lib.windows.as_ref().unwrap(), &lib.sources, &lib.segments);
    assert_eq!(order[0], 0);
    order.sort_unstable();
    assert_eq!(order, (0..7).collect::<Vec<_>>());
}

#[test]
fn centroid_is_pixel_midpoint() {
    let lib = LibraryBuilder::new(4)
        .segment(standing_kpts(0.5, 0.5, 1.0, 0.0, 1.0))
        .build();
    let c = segment_centroid(lib.windows.as_ref().unwrap(), &lib.sources, &lib.segments[0]);
    assert_eq!(c[0], Point::new(640.0, 144.0));
    assert_eq!(centroid_distance(&c, &c), 0.0);
}

#[test]
fn missing_sources_centroid_to_origin() {
    let lib = LibraryBuilder::new(4)
        .segment(standing_kpts(0.5, 0.5, 1.0, 0.0, 1.0))
        .without_source()
        .build();
    let c = segment_centroid(lib.windows.as_ref().unwrap(), &lib.sources, &lib.segments[0]);
    assert!(c.iter().all(|p| *p == Point::ZERO));
}
