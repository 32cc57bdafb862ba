//! Frame-budget sampling of long timelines.

pub(crate) mod sampler;
