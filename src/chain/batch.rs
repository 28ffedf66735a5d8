use crate::{
    blend::curve::SeamCurve,
    chain::boundary::stitch,
    foundation::core::{Canvas, PoseFrame, PoseSample},
    geometry::transform::SegmentTransform,
    index::{
        model::{Segment, SourceMap, WindowsIndex},
        resolve::{resolve_edge_frame, resolve_segment_frames},
    },
};

/// Concatenate `list` into one continuous sequence.
///
/// Each segment after the first is rescaled and shifted so its start pose continues
/// the previous segment's end pose as drawn; `blend_n` interpolated frames are placed
/// at every seam. The running transform carries across the whole list.
#[tracing::instrument(skip(windows, sources, list), fields(segments = list.len()))]
pub fn chain_segments(
    windows: &WindowsIndex,
    sources: &SourceMap,
    list: &[Segment],
    blend_n: usize,
    fallback: Canvas,
) -> Vec<PoseFrame> {
    let mut out = Vec::new();
    let mut running = SegmentTransform::IDENTITY;
    let mut prev: Option<&Segment> = None;

    for seg in list {
        if let Some(p) = prev {
            let prev_end = resolve_edge_frame(windows, sources, p.end, true);
            let next_start = resolve_edge_frame(windows, sources, seg.start, false);
            let seam = stitch(
                prev_end.map(|f| f as &dyn PoseSample),
                running,
                next_start.map(|f| f as &dyn PoseSample),
                blend_n,
                SeamCurve::Linear,
            );
            running = seam.transform;
            out.extend(seam.blend);
        }
        out.extend(resolve_segment_frames(
            windows, sources, seg, running, fallback,
        ));
        prev = Some(seg);
    }

    tracing::debug!(frames = out.len(), "chained segments");
    out
}

#[cfg(test)]
#[path = "../../tests/unit/chain/batch.rs"]
mod tests;
