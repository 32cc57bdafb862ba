use super::*;
use crate::timeline::frame::{Frame, Track, TrackValue};

fn dial(index: u64, kind: FrameKind, position: f64) -> Frame {
    Frame {
        index,
        kind,
        important: false,
        progress: None,
        payload: Payload::Dial(DialState {
            rotation_number: 1,
            position,
            password: 0,
            instruction: None,
            distance: None,
            direction: None,
            passes_in_rotation: None,
            lands_on_zero: None,
        }),
    }
}

fn scanner(index: u64, kind: FrameKind) -> Frame {
    Frame {
        index,
        kind,
        important: false,
        progress: Some(0.5),
        payload: Payload::Scanner(ScannerState {
            range_index: 0,
            range_start: 11,
            range_end: 22,
            number: Some(1212),
            digits: Some("1212".to_owned()),
            repeat_count: Some(2),
            chunk_length: Some(2),
            candidate_chunk: Some("12".to_owned()),
            matched: Some(true),
            global_sum: 1212,
            global_invalids: 1,
            range_invalids: Some(1),
            inspected: Some(3),
            message: None,
        }),
    }
}

fn tracks(index: u64, progress: f64) -> Frame {
    Frame {
        index,
        kind: FrameKind::Step,
        important: false,
        progress: Some(progress),
        payload: Payload::Tracks(TrackState {
            phase: None,
            tracks: vec![Track {
                id: "a".to_owned(),
                label: "A".to_owned(),
                values: vec![TrackValue::Number(1.0), TrackValue::Text("x".to_owned())],
            }],
        }),
    }
}

fn still(frame: Frame) -> PlaybackView {
    PlaybackView::still(&[frame], 0).unwrap()
}

fn px(r: &RasterRenderer, x: u32, y: u32) -> [u8; 4] {
    r.frame().pixel(x, y).unwrap()
}

#[test]
fn raster_matches_canvas_size() {
    let canvas = Canvas::new(320, 180).unwrap();
    let mut r = RasterRenderer::new(canvas, SceneTheme::default());
    r.render(&still(dial(0, FrameKind::Initial, 0.0))).unwrap();
    let frame = r.raster().unwrap();
    assert_eq!((frame.width, frame.height), (320, 180));
    assert_eq!(frame.data.len(), 320 * 180 * 4);
}

#[test]
fn dial_scene_draws_background_and_hub() {
    let theme = SceneTheme::default();
    let mut r = RasterRenderer::new(Canvas::new(128, 72).unwrap(), theme);
    r.render(&still(dial(0, FrameKind::PositionUpdate, 25.0))).unwrap();
    assert_eq!(px(&r, 0, 0), theme.dial.background.to_array());
    assert_eq!(px(&r, 64, 33), theme.dial.marker.to_array());
}

#[test]
fn zero_landing_flashes_then_decays() {
    let mut r = RasterRenderer::new(Canvas::new(64, 36).unwrap(), SceneTheme::default());
    let view = still(dial(3, FrameKind::ZeroLand, 0.0));
    r.render(&view).unwrap();
    assert_eq!(r.flash, 1.0);
    r.render(&view).unwrap();
    assert!((r.flash - 0.95).abs() < 1e-9);
}

#[test]
fn trail_keeps_recent_positions_only() {
    let mut r = RasterRenderer::new(Canvas::new(64, 36).unwrap(), SceneTheme::default());
    for i in 0..40 {
        r.render(&still(dial(i, FrameKind::PositionUpdate, i as f64)))
            .unwrap();
    }
    assert_eq!(r.trail.len(), TRAIL_LEN);
    assert_eq!(r.trail.back(), Some(&39.0));
}

#[test]
fn scanner_scene_uses_gradient_background() {
    let theme = SceneTheme::default();
    let mut r = RasterRenderer::new(Canvas::new(128, 72).unwrap(), theme);
    r.render(&still(scanner(0, FrameKind::ScanTick))).unwrap();
    assert_eq!(px(&r, 0, 0), theme.scanner.background_top.to_array());
    assert_eq!(r.flash, 0.0);

    r.render(&still(scanner(1, FrameKind::InvalidHit))).unwrap();
    assert_eq!(r.flash, 1.0);
    assert_ne!(px(&r, 0, 0), theme.scanner.background_top.to_array());
}

#[test]
fn track_progress_bar_follows_progress() {
    let theme = SceneTheme::default();
    let canvas = Canvas::REFERENCE;

    let mut r = RasterRenderer::new(canvas, theme);
    r.render(&still(tracks(0, 1.0))).unwrap();
    assert_eq!(px(&r, 600, 677), theme.tracks.accent.to_array());

    r.render(&still(tracks(1, 0.0))).unwrap();
    assert_ne!(px(&r, 600, 677), theme.tracks.accent.to_array());
}

#[test]
fn layout_letterboxes_wide_canvas() {
    let l = Layout::new(Canvas::new(2560, 720).unwrap());
    assert_eq!(l.scale, 1.0);
    assert_eq!(l.point(Point::ORIGIN), Point::new(640.0, 0.0));
}
