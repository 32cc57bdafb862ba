use super::*;
use crate::foundation::error::ReelError;
use crate::timeline::frame::{DialState, FrameKind, Payload, TrackState};

fn track_frame(index: u64) -> Frame {
    Frame {
        index,
        kind: FrameKind::Step,
        important: false,
        progress: None,
        payload: Payload::Tracks(TrackState::default()),
    }
}

fn dial_frame(index: u64, kind: FrameKind) -> Frame {
    Frame {
        index,
        kind,
        important: false,
        progress: None,
        payload: Payload::Dial(DialState {
            rotation_number: 1,
            position: (index % 100) as f64,
            password: 0,
            instruction: None,
            distance: None,
            direction: None,
            passes_in_rotation: None,
            lands_on_zero: None,
        }),
    }
}

fn tracks(n: u64) -> Timeline {
    Timeline::new((0..n).map(track_frame).collect()).unwrap()
}

fn cfg(fps: u32, secs: f64) -> SamplingConfig {
    SamplingConfig::new(fps, secs).unwrap()
}

fn indices(s: &SampledTimeline) -> Vec<u64> {
    s.original_indices()
}

#[test]
fn empty_timeline_samples_to_nothing() {
    let s = sample(&tracks(0), &cfg(60, 1.0)).unwrap();
    assert!(s.is_empty());
    assert_eq!(s.stride, 1);
    assert_eq!(s.source_len, 0);
}

#[test]
fn short_timeline_is_returned_unchanged() {
    let mut end = dial_frame(2, FrameKind::Final);
    end.important = true;
    let tl = Timeline::new(vec![
        dial_frame(0, FrameKind::Initial),
        dial_frame(1, FrameKind::PositionUpdate),
        end,
    ])
    .unwrap();

    let s = sample(&tl, &cfg(60, 1.0)).unwrap();
    assert_eq!(s.stride, 1);
    assert_eq!(s.frames, tl.frames());
}

#[test]
fn thousand_ordinary_frames_use_stride_ten() {
    let tl = tracks(1000);
    let s = sample(&tl, &cfg(10, 10.0)).unwrap();
    assert_eq!(s.policy, SamplingPolicy::Uniform);
    assert_eq!(s.stride, 10);
    assert_eq!(s.len(), 101);
    assert_eq!(s.frames.first().unwrap().index, 0);
    assert_eq!(s.frames.last().unwrap().index, 999);
    assert_eq!(indices(&s)[1], 10);
}

#[test]
fn final_frame_is_not_duplicated_when_stride_aligned() {
    let s = sample(&tracks(7), &cfg(3, 1.0)).unwrap();
    assert_eq!(s.stride, 3);
    assert_eq!(indices(&s), vec![0, 3, 6]);

    let s = sample(&tracks(9), &cfg(4, 1.0)).unwrap();
    assert_eq!(s.stride, 3);
    assert_eq!(indices(&s), vec![0, 3, 6, 8]);
}

#[test]
fn important_frames_survive_striding() {
    let events = [3u64, 457, 458, 998];
    let frames: Vec<Frame> = (0..1000u64)
        .map(|i| {
            if events.contains(&i) {
                dial_frame(i, FrameKind::ZeroPass)
            } else {
                dial_frame(i, FrameKind::PositionUpdate)
            }
        })
        .collect();
    let tl = Timeline::new(frames).unwrap();

    let s = sample(&tl, &cfg(10, 10.0)).unwrap();
    assert_eq!(s.policy, SamplingPolicy::PreserveImportant);
    let kept = indices(&s);
    for e in events {
        assert!(kept.contains(&e), "important frame {e} was dropped");
    }
    assert!(kept.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(kept.first(), Some(&0));
    assert_eq!(kept.last(), Some(&999));
}

#[test]
fn uniform_policy_can_drop_events() {
    let frames: Vec<Frame> = (0..100u64)
        .map(|i| {
            let kind = if i == 5 {
                FrameKind::ZeroLand
            } else {
                FrameKind::PositionUpdate
            };
            dial_frame(i, kind)
        })
        .collect();
    let s = sample_with_policy(&frames, &cfg(10, 1.0), SamplingPolicy::Uniform).unwrap();
    assert!(!indices(&s).contains(&5));

    let s = sample_with_policy(&frames, &cfg(10, 1.0), SamplingPolicy::PreserveImportant).unwrap();
    assert!(indices(&s).contains(&5));
}

#[test]
fn zero_budget_still_yields_first_and_last() {
    let s = sample(&tracks(5), &cfg(1, 0.5)).unwrap();
    assert_eq!(s.stride, 5);
    assert_eq!(indices(&s), vec![0, 4]);
    assert_eq!(stride_for(5, 0), 5);
    assert_eq!(stride_for(1, 100), 1);
}

#[test]
fn invalid_configuration_is_rejected_before_sampling() {
    let bad = SamplingConfig {
        frames_per_second: 0,
        max_duration_seconds: 1.0,
    };
    assert!(matches!(
        sample(&tracks(10), &bad),
        Err(ReelError::InvalidConfiguration(_))
    ));
}

#[test]
fn sampling_is_deterministic_and_bounded() {
    for (n, fps, secs) in [(1u64, 1, 1.0), (250, 7, 3.0), (1001, 30, 1.0), (64, 64, 1.0)] {
        let tl = tracks(n);
        let c = cfg(fps, secs);
        let a = sample(&tl, &c).unwrap();
        let b = sample(&tl, &c).unwrap();
        assert_eq!(a, b);
        assert!(a.len() <= tl.len());
        assert!(a.len() <= c.max_frame_count().max(1) + 1);
        assert_eq!(a.frames.first(), tl.frames().first());
        assert_eq!(a.frames.last(), tl.frames().last());
    }
}
