use std::{collections::BTreeMap, path::Path};

use crate::foundation::core::RawFrame;

/// Window length used when an index does not declare one.
pub const DEFAULT_WINDOW: usize = 32;

/// Recorded frames per source file, keyed by file stem.
pub type SourceMap = BTreeMap<String, Vec<RawFrame>>;

/// Fixed-width windows over the source recordings.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WindowsIndex {
    /// Frames per window.
    #[serde(default)]
    pub window: usize,
    /// Step between consecutive window starts.
    #[serde(default)]
    pub stride: usize,
    /// Source files the windows were cut from.
    #[serde(default)]
    pub files: Vec<String>,
    /// Window records, addressed by position.
    #[serde(default)]
    pub windows: Vec<WindowRecord>,
}

impl WindowsIndex {
    /// Effective window length.
    pub fn window_len(&self) -> usize {
        if self.window == 0 {
            DEFAULT_WINDOW
        } else {
            self.window
        }
    }
}

/// One window: a source file and a starting frame offset inside it.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WindowRecord {
    /// Source file name, as written by the recorder.
    #[serde(default)]
    pub file: String,
    /// First frame of the window inside the source file.
    #[serde(default)]
    pub start: i64,
}

impl WindowRecord {
    /// Key of this window's source in a [`SourceMap`].
    pub fn source_key(&self) -> &str {
        source_key(&self.file)
    }

    /// Index of the window's last frame, `None` when it does not fit in an `i64`.
    pub fn last_frame(&self, window_len: usize) -> Option<i64> {
        let len = i64::try_from(window_len.max(1)).ok()?;
        self.start.checked_add(len - 1)
    }
}

/// File name without directories or extension.
pub fn source_key(file: &str) -> &str {
    Path::new(file)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(file)
}

/// A precomputed nearest neighbour in embedding space.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NextCandidate {
    /// Index into the segment list.
    pub segment_index: i64,
    /// Embedding distance; smaller is smoother. `null` reads as `0`.
    #[serde(default, deserialize_with = "crate::foundation::core::lenient_f64")]
    pub distance: f64,
}

/// A playable clip spanning windows `start..=end`.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Segment {
    /// First window index.
    pub start: usize,
    /// Last window index (inclusive).
    pub end: usize,
    /// Cluster tag, opaque to playback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<serde_json::Value>,
    /// Successor candidates, nearest first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub next_candidates: Vec<NextCandidate>,
}

/// Immutable inputs shared by every playback session.
#[derive(Clone, Debug, Default)]
pub struct SegmentLibrary {
    /// Window index; `None` puts streaming into placeholder mode.
    pub windows: Option<WindowsIndex>,
    /// Recorded frames per source file.
    pub sources: SourceMap,
    /// Segments in source order.
    pub segments: Vec<Segment>,
}

impl SegmentLibrary {
    /// Bundle the three loaded inputs.
    pub fn new(windows: Option<WindowsIndex>, sources: SourceMap, segments: Vec<Segment>) -> Self {
        Self {
            windows,
            sources,
            segments,
        }
    }

    /// `true` when a window index is available.
    pub fn has_windows(&self) -> bool {
        self.windows.is_some()
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// `true` when there are no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
