//! Playback timing: state transitions, tick sources, capture lifecycle and the driver.

pub(crate) mod capture;
pub(crate) mod driver;
pub(crate) mod state;
pub(crate) mod ticks;
