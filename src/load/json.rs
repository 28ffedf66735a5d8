use std::{fs::File, io::BufReader, path::Path};

use crate::{
    foundation::error::{PoseChainError, PoseChainResult},
    index::model::{Segment, WindowsIndex},
};

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum SegmentsDoc {
    List(Vec<Segment>),
    Wrapped { segments: Vec<Segment> },
}

pub(crate) fn open(path: &Path) -> PoseChainResult<BufReader<File>> {
    let f = File::open(path)
        .map_err(|e| PoseChainError::load(format!("open '{}': {e}", path.display())))?;
    Ok(BufReader::new(f))
}

/// Parse a windows index from JSON.
pub fn windows_index_from_reader<R: std::io::Read>(r: R) -> PoseChainResult<WindowsIndex> {
    serde_json::from_reader(r)
        .map_err(|e| PoseChainError::serde(format!("parse windows index JSON: {e}")))
}

/// Read a windows index file.
pub fn load_windows_index(path: &Path) -> PoseChainResult<WindowsIndex> {
    windows_index_from_reader(open(path)?)
}

/// Parse a segment list: either a bare array or an object with a `segments` array.
pub fn segments_from_reader<R: std::io::Read>(r: R) -> PoseChainResult<Vec<Segment>> {
    let doc: SegmentsDoc = serde_json::from_reader(r)
        .map_err(|e| PoseChainError::serde(format!("parse segments JSON: {e}")))?;
    Ok(match doc {
        SegmentsDoc::List(segments) | SegmentsDoc::Wrapped { segments } => segments,
    })
}

/// Read a segment list file.
pub fn load_segments(path: &Path) -> PoseChainResult<Vec<Segment>> {
    segments_from_reader(open(path)?)
}

#[cfg(test)]
#[path = "../../tests/unit/load/json.rs"]
mod tests;
