use super::*;

const DIAL: &str = r#"{
  "frames": [
    {"frame_type": "initial", "rotation_number": 0, "position": 50, "password": 0},
    {"frame_type": "rotation_start", "rotation_number": 1, "position": 50, "password": 0,
     "instruction": "L68", "distance": 68, "direction": "L", "progress": 0.0},
    {"frame_type": "zero_pass", "rotation_number": 1, "position": 0, "password": 1, "progress": 0.7},
    {"frame_type": "rotation_end", "rotation_number": 1, "position": 82, "password": 1, "progress": 1.0},
    {"frame_type": "final", "rotation_number": 1, "position": 82, "password": 1}
  ],
  "total_rotations": 1,
  "final_password": 1
}"#;

const SCANNER: &str = r#"{
  "puzzle_day": 2,
  "part": 2,
  "ranges": [{"index": 0, "start": 11, "end": 22}],
  "frames": [
    {"frame_type": "range_start", "range_index": 0, "range_start": 11, "range_end": 22,
     "range_progress": 0.0, "global_sum": 0, "global_invalids": 0},
    {"frame_type": "invalid_hit", "range_index": 0, "range_start": 11, "range_end": 22,
     "range_progress": 0.5, "number": 11, "digits": "11", "match": true,
     "global_sum": 11, "global_invalids": 1}
  ],
  "final_sum": 11,
  "total_invalid": 1
}"#;

const TRACKS: &str = r#"{
  "puzzle": {"title": "Sorting", "description": "bubble sort"},
  "theme": {"primaryMood": "calm", "backgroundStyle": "light", "fontStyle": "serif"},
  "config": {"fps": 30, "maxDurationSec": 4},
  "timeline": [
    {"step": 0, "phase": "start", "tracks": [{"id": "a", "label": "array", "values": [3, 1, 2]}]},
    {"step": 1, "tracks": [{"id": "a", "label": "array", "values": [1, 3, "x"]}]}
  ]
}"#;

#[test]
fn dial_log_parses_with_default_config() {
    let doc = TraceDocument::from_json_str(DIAL).unwrap();
    assert_eq!(doc.kind(), DocumentKind::Dial);
    assert_eq!(doc.config, SamplingConfig::default());
    assert_eq!(doc.timeline.len(), 5);

    let frames = doc.timeline.frames();
    assert_eq!(frames[2].kind, FrameKind::ZeroPass);
    assert!(frames[2].is_important());
    assert!(!frames[1].is_important());
    let Payload::Dial(d) = &frames[1].payload else {
        panic!("expected dial payload");
    };
    assert_eq!(d.instruction.as_deref(), Some("L68"));
    assert_eq!(d.direction, Some(crate::timeline::frame::Direction::Left));
    assert_eq!(
        doc.meta,
        DocumentMeta::Dial {
            total_rotations: 1,
            final_password: 1
        }
    );
}

#[test]
fn scanner_log_maps_range_progress() {
    let doc = TraceDocument::from_json_str(SCANNER).unwrap();
    assert_eq!(doc.kind(), DocumentKind::Scanner);
    let hit = &doc.timeline.frames()[1];
    assert_eq!(hit.progress, Some(0.5));
    let Payload::Scanner(s) = &hit.payload else {
        panic!("expected scanner payload");
    };
    assert_eq!(s.matched, Some(true));
    assert_eq!(s.global_sum, 11);
}

#[test]
fn track_log_reads_short_config_names() {
    let doc = TraceDocument::from_json_str(TRACKS).unwrap();
    assert_eq!(doc.kind(), DocumentKind::Tracks);
    assert_eq!(doc.config.frames_per_second, 30);
    assert_eq!(doc.config.max_duration_seconds, 4.0);
    assert_eq!(doc.title(), "Sorting");
    let DocumentMeta::Tracks { theme, .. } = &doc.meta else {
        panic!("expected track meta");
    };
    assert_eq!(theme.background_style, BackgroundStyle::Light);
    assert_eq!(theme.font_style, FontStyle::Serif);
}

#[test]
fn long_config_names_are_accepted() {
    let text = r#"{
      "configuration": {"framesPerSecond": 24, "maxDurationSeconds": 2.5},
      "frames": [{"frame_type": "initial", "rotation_number": 0, "position": 50, "password": 0}]
    }"#;
    let doc = TraceDocument::from_json_str(text).unwrap();
    assert_eq!(doc.config.max_frame_count(), 60);
}

#[test]
fn shape_violations_are_malformed_input() {
    let cases = [
        "not json",
        "[1, 2, 3]",
        r#"{"hello": 1}"#,
        r#"{"frames": 3}"#,
        r#"{"timeline": []}"#,
        r#"{"puzzle_day": 3, "part": 2, "frames": [], "ranges": []}"#,
        r#"{"puzzle_day": 2, "part": 2, "frames": []}"#,
        r#"{"frames": [{"frame_type": "scan_tick", "rotation_number": 0, "position": 1, "password": 0}]}"#,
        r#"{"config": {"fps": 30, "maxDurationSec": 1},
            "timeline": [{"step": 1, "tracks": []}, {"step": 1, "tracks": []}]}"#,
    ];
    for text in cases {
        let err = TraceDocument::from_json_str(text).unwrap_err();
        assert!(
            matches!(err, ReelError::MalformedInput(_)),
            "expected malformed input for {text}, got {err}"
        );
    }
}

#[test]
fn bad_config_values_are_invalid_configuration() {
    let text = r#"{"config": {"fps": 0, "maxDurationSec": 1}, "timeline": []}"#;
    assert!(matches!(
        TraceDocument::from_json_str(text),
        Err(ReelError::InvalidConfiguration(_))
    ));

    let text = r#"{"config": {"fps": 30, "maxDurationSec": -1}, "timeline": []}"#;
    assert!(matches!(
        TraceDocument::from_json_str(text),
        Err(ReelError::InvalidConfiguration(_))
    ));
}

#[test]
fn empty_timeline_parses() {
    let text = r#"{"config": {"fps": 30, "maxDurationSec": 1}, "timeline": []}"#;
    let doc = TraceDocument::from_json_str(text).unwrap();
    assert!(doc.timeline.is_empty());
}
