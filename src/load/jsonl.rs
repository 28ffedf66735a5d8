use std::{
    fs,
    io::{BufRead, Write},
    path::Path,
};

use crate::{
    foundation::{
        core::{PoseFrame, RawFrame},
        error::{PoseChainError, PoseChainResult},
    },
    index::model::{SourceMap, source_key},
    load::json::open,
};

/// Key used for frames that carry no `seq_id`.
pub const UNKNOWN_SEQ: &str = "unknown";

/// Parse newline-delimited frames. Blank lines are ignored; malformed lines are skipped.
pub fn parse_jsonl<R: BufRead>(r: R) -> PoseChainResult<Vec<RawFrame>> {
    let mut frames = Vec::new();
    for (i, line) in r.lines().enumerate() {
        let line =
            line.map_err(|e| PoseChainError::load(format!("read JSONL line {}: {e}", i + 1)))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<RawFrame>(line) {
            Ok(frame) => frames.push(frame),
            Err(e) => tracing::warn!(line = i + 1, error = %e, "skipping malformed JSONL line"),
        }
    }
    Ok(frames)
}

/// Split one combined recording by `seq_id`, keeping per-sequence order.
pub fn group_by_seq_id(frames: Vec<RawFrame>) -> SourceMap {
    let mut map = SourceMap::new();
    for frame in frames {
        let key = frame.seq_id.clone().unwrap_or_else(|| UNKNOWN_SEQ.to_string());
        map.entry(key).or_default().push(frame);
    }
    map
}

/// Load every `*.jsonl` file in `dir`, keyed by file stem.
#[tracing::instrument(skip_all, fields(dir = %dir.display()))]
pub fn load_source_dir(dir: &Path) -> PoseChainResult<SourceMap> {
    let entries = fs::read_dir(dir)
        .map_err(|e| PoseChainError::load(format!("read dir '{}': {e}", dir.display())))?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| PoseChainError::load(format!("read dir entry: {e}")))?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|x| x == "jsonl") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut map = SourceMap::new();
    for path in paths {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            tracing::warn!(path = %path.display(), "skipping non UTF-8 file name");
            continue;
        };
        let frames = parse_jsonl(open(&path)?)?;
        tracing::debug!(source = source_key(name), frames = frames.len(), "loaded source");
        map.insert(source_key(name).to_string(), frames);
    }
    Ok(map)
}

/// Load sources from a directory of per-file JSONL, or one combined JSONL grouped by `seq_id`.
pub fn load_sources(path: &Path) -> PoseChainResult<SourceMap> {
    if path.is_dir() {
        load_source_dir(path)
    } else {
        Ok(group_by_seq_id(parse_jsonl(open(path)?)?))
    }
}

/// Write frames as JSONL in the recorded-frame shape, with normalized keypoints.
pub fn write_jsonl<W: Write>(frames: &[PoseFrame], mut w: W) -> PoseChainResult<()> {
    for frame in frames {
        serde_json::to_writer(&mut w, &RawFrame::from(frame))
            .map_err(|e| PoseChainError::serde(format!("encode frame: {e}")))?;
        w.write_all(b"\n")
            .map_err(|e| anyhow::Error::new(e).context("write frame"))?;
    }
    w.flush()
        .map_err(|e| anyhow::Error::new(e).context("flush frames"))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/load/jsonl.rs"]
mod tests;
