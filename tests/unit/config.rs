use super::*;

#[test]
fn defaults_match_documented_values() {
    let c = StreamConfig::default();
    assert_eq!(c.blend_n, 8);
    assert_eq!((c.buffer_low, c.buffer_target), (240, 720));
    assert_eq!((c.compact_threshold, c.compact_keep_prev), (1000, 2));
    assert!(c.reorder && c.prefer_embedded_next && !c.check_bounds);
    assert_eq!(c.candidate_pick, CandidatePick::Random);
    assert_eq!(c.canvas(), Canvas::new(1280, 720));
    assert_eq!(c.max_height_ratio, 0.8);
    assert_eq!(c.min_confidence, 0.2);
    assert_eq!(c.check_bounds_sample_rate, 1);
    assert!(c.validate().is_ok());
}

#[test]
fn partial_json_fills_defaults() {
    let c = Config::from_json(
        r#"{"stream":{"blendN":4,"candidatePick":"best","checkBounds":true},"playback":{"speed":2.0}}"#,
    )
    .unwrap();
    assert_eq!(c.stream.blend_n, 4);
    assert_eq!(c.stream.candidate_pick, CandidatePick::Best);
    assert!(c.stream.check_bounds);
    assert_eq!(c.stream.buffer_target, 720);
    assert_eq!(c.playback.speed, 2.0);
    assert_eq!(c.playback.fallback_fps, 30.0);
}

#[test]
fn snake_case_keys_are_accepted() {
    let c = Config::from_json(
        r#"{"stream":{"buffer_low":10,"buffer_target":20,"check_bounds_sample_rate":3},"playback":{"live_blend_n":2}}"#,
    )
    .unwrap();
    assert_eq!((c.stream.buffer_low, c.stream.buffer_target), (10, 20));
    assert_eq!(c.stream.check_bounds_sample_rate, 3);
    assert_eq!(c.playback.live_blend_n, 2);
}

#[test]
fn empty_object_is_the_default_config() {
    assert_eq!(Config::from_json("{}").unwrap(), Config::default());
}

#[test]
fn invalid_values_are_rejected() {
    let bad = [
        r#"{"stream":{"bufferLow":100,"bufferTarget":50}}"#,
        r#"{"stream":{"checkBoundsSampleRate":0}}"#,
        r#"{"stream":{"canvasH":0}}"#,
        r#"{"stream":{"maxHeightRatio":-1}}"#,
        r#"{"playback":{"speed":0}}"#,
    ];
    for s in bad {
        let err = Config::from_json(s).unwrap_err();
        assert!(err.to_string().contains("validation error:"), "{s}");
    }
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = Config::from_json("{ nope").unwrap_err();
    assert!(err.to_string().contains("serialization error:"));
}

#[test]
fn missing_file_is_a_load_error() {
    let err = Config::load("target/definitely/missing/config.json").unwrap_err();
    assert!(err.to_string().contains("load error:"));
}
