//! Readers for the three recorded inputs: windows index, segment list, source frames.

/// JSON documents: windows index and segment list.
pub mod json;
/// Newline-delimited recorded frames.
pub mod jsonl;

use std::path::Path;

use crate::{foundation::error::PoseChainResult, index::model::SegmentLibrary};

/// Load a complete library.
///
/// Without `windows` or `frames` the library still loads; streaming then degrades to
/// placeholder frames or skips unresolvable segments.
#[tracing::instrument(skip_all)]
pub fn load_library(
    windows: Option<&Path>,
    segments: &Path,
    frames: Option<&Path>,
) -> PoseChainResult<SegmentLibrary> {
    let windows = windows.map(json::load_windows_index).transpose()?;
    let segments = json::load_segments(segments)?;
    let sources = match frames {
        Some(p) => jsonl::load_sources(p)?,
        None => Default::default(),
    };
    tracing::debug!(
        segments = segments.len(),
        sources = sources.len(),
        windows = windows.as_ref().map_or(0, |w| w.windows.len()),
        "loaded segment library"
    );
    Ok(SegmentLibrary::new(windows, sources, segments))
}
