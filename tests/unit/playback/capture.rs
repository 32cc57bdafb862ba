use super::*;
use crate::foundation::error::ReelError;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Default)]
struct Calls {
    begins: u32,
    pushes: Vec<u64>,
    ends: u32,
}

struct Recording {
    calls: Rc<RefCell<Calls>>,
    fail_end: bool,
}

impl FrameSink for Recording {
    fn begin(&mut self, _cfg: SinkConfig) -> ReelResult<()> {
        self.calls.borrow_mut().begins += 1;
        Ok(())
    }

    fn push_frame(&mut self, idx: u64, _frame: &FrameRGBA) -> ReelResult<()> {
        self.calls.borrow_mut().pushes.push(idx);
        Ok(())
    }

    fn end(&mut self) -> ReelResult<()> {
        self.calls.borrow_mut().ends += 1;
        if self.fail_end {
            return Err(ReelError::capture("disk full"));
        }
        Ok(())
    }
}

fn session(fail_end: bool) -> (CaptureSession, Rc<RefCell<Calls>>) {
    let calls = Rc::new(RefCell::new(Calls::default()));
    let sink = Recording {
        calls: Rc::clone(&calls),
        fail_end,
    };
    let cfg = SinkConfig {
        width: 2,
        height: 2,
        fps: 30,
    };
    (CaptureSession::new(Box::new(sink), cfg), calls)
}

#[test]
fn push_before_open_is_ignored() {
    let (mut s, calls) = session(false);
    s.push(&FrameRGBA::filled(2, 2, [0, 0, 0, 255])).unwrap();
    assert!(calls.borrow().pushes.is_empty());
}

#[test]
fn indices_increase_from_zero() {
    let (mut s, calls) = session(false);
    s.open().unwrap();
    let frame = FrameRGBA::filled(2, 2, [1, 2, 3, 255]);
    s.push(&frame).unwrap();
    s.push(&frame).unwrap();
    assert_eq!(calls.borrow().pushes, vec![0, 1]);
    assert_eq!(s.frames_pushed(), 2);
}

#[test]
fn close_then_drop_ends_once() {
    let (mut s, calls) = session(false);
    s.open().unwrap();
    s.close().unwrap();
    s.close().unwrap();
    drop(s);
    assert_eq!(calls.borrow().ends, 1);
}

#[test]
fn drop_closes_open_session() {
    let (mut s, calls) = session(false);
    s.open().unwrap();
    drop(s);
    assert_eq!(calls.borrow().ends, 1);
}

#[test]
fn failed_close_is_not_retried() {
    let (mut s, calls) = session(true);
    s.open().unwrap();
    assert!(matches!(s.close(), Err(ReelError::Capture(_))));
    assert!(!s.is_open());
    drop(s);
    assert_eq!(calls.borrow().ends, 1);
}
