use super::*;
use crate::timeline::frame::{FrameKind, Payload, TrackState};

fn step(index: u64) -> Frame {
    Frame {
        index,
        kind: FrameKind::Step,
        important: false,
        progress: None,
        payload: Payload::Tracks(TrackState::default()),
    }
}

#[test]
fn strictly_increasing_indices_are_required() {
    assert!(Timeline::new(vec![step(0), step(1), step(5)]).is_ok());
    assert!(matches!(
        Timeline::new(vec![step(0), step(2), step(2)]),
        Err(ReelError::MalformedInput(_))
    ));
    assert!(Timeline::new(vec![step(3), step(1)]).is_err());
}

#[test]
fn plain_tracks_do_not_define_importance() {
    let tl = Timeline::new(vec![step(0), step(1)]).unwrap();
    assert!(!tl.defines_importance());
    assert_eq!(tl.important_count(), 0);

    let mut flagged = step(2);
    flagged.important = true;
    let tl = Timeline::new(vec![step(0), step(1), flagged]).unwrap();
    assert!(tl.defines_importance());
    assert_eq!(tl.important_count(), 1);
}

#[test]
fn empty_timeline_is_valid_data() {
    let tl = Timeline::new(Vec::new()).unwrap();
    assert!(tl.is_empty());
    assert_eq!(tl.len(), 0);
}
