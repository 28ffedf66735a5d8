use crate::{
    foundation::core::{KEYPOINT_COUNT, Point, Pose},
    geometry::normalize::denormalize,
    index::{
        model::{Segment, SourceMap, WindowsIndex},
        resolve::resolve_edge_frame,
    },
};

/// Pixel-space midpoint of a segment's first and last frame, per keypoint.
pub fn segment_centroid(
    windows: &WindowsIndex,
    sources: &SourceMap,
    segment: &Segment,
) -> [Point; KEYPOINT_COUNT] {
    let edge = |wi, from_end| {
        resolve_edge_frame(windows, sources, wi, from_end)
            .map(denormalize)
            .unwrap_or_default()
    };
    let (a, b): (Pose, Pose) = (edge(segment.start, false), edge(segment.end, true));
    std::array::from_fn(|i| {
        let (ka, kb) = (a.keypoints[i], b.keypoints[i]);
        Point::new((ka.x + kb.x) * 0.5, (ka.y + kb.y) * 0.5)
    })
}

/// Root-mean-square keypoint distance between two centroids.
pub fn centroid_distance(a: &[Point; KEYPOINT_COUNT], b: &[Point; KEYPOINT_COUNT]) -> f64 {
    let sum: f64 = a
        .iter()
        .zip(b)
        .map(|(p, q)| (*p - *q).hypot2())
        .sum();
    (sum / KEYPOINT_COUNT as f64).sqrt()
}

/// Greedy nearest-centroid tour starting at segment 0. Returns segment indices.
#[tracing::instrument(skip_all, fields(segments = segments.len()))]
pub fn reorder_segments(
    windows: &WindowsIndex,
    sources: &SourceMap,
    segments: &[Segment],
) -> Vec<usize> {
    if segments.is_empty() {
        return Vec::new();
    }

    let centroids: Vec<_> = segments
        .iter()
        .map(|s| segment_centroid(windows, sources, s))
        .collect();
    let mut used = vec![false; segments.len()];
    let mut order = Vec::with_capacity(segments.len());
    let mut cur = 0;
    used[0] = true;
    order.push(0);

    for _ in 1..segments.len() {
        let mut best: Option<(usize, f64)> = None;
        for (i, c) in centroids.iter().enumerate() {
            if used[i] {
                continue;
            }
            let d = centroid_distance(&centroids[cur], c);
            if best.is_none_or(|(_, bd)| d < bd) {
                best = Some((i, d));
            }
        }
        let Some((next, _)) = best else {
            break;
        };
        used[next] = true;
        order.push(next);
        cur = next;
    }
    order
}

#[cfg(test)]
#[path = "../../tests/unit/index/order.rs"]
mod tests;
