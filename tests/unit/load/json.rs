use std::io::Cursor;

use super::*;

#[test]
fn windows_index_parses() {
    let w = windows_index_from_reader(Cursor::new(
        r#"{"window":4,"stride":2,"files":["a.jsonl"],"windows":[{"file":"a.jsonl","start":0},{"file":"a.jsonl","start":2}]}"#,
    ))
    .unwrap();
    assert_eq!(w.window_len(), 4);
    assert_eq!(w.windows.len(), 2);
    assert_eq!(w.windows[1].source_key(), "a");
}

#[test]
fn missing_window_length_uses_default() {
    let w = windows_index_from_reader(Cursor::new(r#"{"windows":[]}"#)).unwrap();
    assert_eq!(w.window_len(), crate::index::model::DEFAULT_WINDOW);
}

#[test]
fn segments_accept_bare_array_and_wrapper() {
    let bare = segments_from_reader(Cursor::new(
        r#"[{"start":0,"end":1,"label":3},{"start":2,"end":2,"next_candidates":[{"segment_index":0,"distance":0.4}]}]"#,
    ))
    .unwrap();
    assert_eq!(bare.len(), 2);
    assert_eq!(bare[1].next_candidates[0].segment_index, 0);

    let wrapped =
        segments_from_reader(Cursor::new(r#"{"segments":[{"start":0,"end":1,"label":3}]}"#))
            .unwrap();
    assert_eq!(wrapped[0], bare[0]);
}

#[test]
fn malformed_segments_are_serde_errors() {
    let err = segments_from_reader(Cursor::new(r#"{"segs":[]}"#)).unwrap_err();
    assert!(err.to_string().contains("serialization error:"));
}

#[test]
fn missing_file_is_a_load_error() {
    let err = load_segments(Path::new("tests/data/does-not-exist.json")).unwrap_err();
    assert!(err.to_string().contains("load error:"));
}

#[test]
fn null_candidate_distance_reads_as_zero() {
    let segs = segments_from_reader(Cursor::new(
        r#"[{"start":0,"end":0,"next_candidates":[{"segment_index":1,"distance":null},{"segment_index":2}]}]"#,
    ))
    .unwrap();
    let d: Vec<f64> = segs[0].next_candidates.iter().map(|c| c.distance).collect();
    assert_eq!(d, vec![0.0, 0.0]);
}
