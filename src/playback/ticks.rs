use std::time::{Duration, Instant};

/// Supplies the elapsed time (milliseconds) observed by each playback tick.
///
/// Returning `None` ends a driven run.
pub trait TickSource {
    fn next_tick(&mut self) -> Option<f64>;
}

impl<F> TickSource for F
where
    F: FnMut() -> Option<f64>,
{
    fn next_tick(&mut self) -> Option<f64> {
        self()
    }
}

/// Deterministic ticks of a constant interval, optionally bounded.
#[derive(Clone, Debug)]
pub struct FixedTicks {
    interval_ms: f64,
    remaining: Option<u64>,
}

impl FixedTicks {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            remaining: None,
        }
    }

    /// Stop after `count` ticks.
    pub fn limited(mut self, count: u64) -> Self {
        self.remaining = Some(count);
        self
    }
}

impl TickSource for FixedTicks {
    fn next_tick(&mut self) -> Option<f64> {
        match &mut self.remaining {
            Some(0) => None,
            Some(n) => {
                *n -= 1;
                Some(self.interval_ms)
            }
            None => Some(self.interval_ms),
        }
    }
}

/// Wall-clock ticks paced to a target interval.
///
/// Each call sleeps until the next deadline and reports the time actually elapsed since the
/// previous tick.
#[derive(Debug)]
pub struct RealtimeTicks {
    interval: Duration,
    last: Option<Instant>,
}

impl RealtimeTicks {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last: None,
        }
    }

    pub fn from_fps(fps: u32) -> Self {
        Self::new(Duration::from_secs_f64(1.0 / f64::from(fps.max(1))))
    }
}

impl TickSource for RealtimeTicks {
    fn next_tick(&mut self) -> Option<f64> {
        let Some(last) = self.last else {
            self.last = Some(Instant::now());
            return Some(self.interval.as_secs_f64() * 1000.0);
        };
        let deadline = last + self.interval;
        let now = Instant::now();
        if deadline > now {
            std::thread::sleep(deadline - now);
        }
        let now = Instant::now();
        self.last = Some(now);
        Some(now.duration_since(last).as_secs_f64() * 1000.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/ticks.rs"]
mod tests;
