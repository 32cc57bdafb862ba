use std::collections::BTreeMap;

use crate::{
    animation::ease::clamp_unit,
    foundation::core::Rgba8,
    timeline::frame::{Frame, Payload},
};

/// Dial positions live in `[0, DIAL_MODULUS)`.
pub const DIAL_MODULUS: f64 = 100.0;

/// How a scalar moves between two frames.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Interp {
    Linear,
    /// Value defined modulo `modulus`; travels along the shorter arc.
    Circular { modulus: f64 },
}

/// Interpolation contract for blended value types.
pub trait Lerp: Sized {
    /// Interpolate from `a` to `b` with normalized factor `t` in `[0, 1]`.
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Rgba8 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        fn lerp_u8(a: u8, b: u8, t: f64) -> u8 {
            let a = f64::from(a);
            let b = f64::from(b);
            (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
        }

        Self {
            r: lerp_u8(a.r, b.r, t),
            g: lerp_u8(a.g, b.g, t),
            b: lerp_u8(a.b, b.b, t),
            a: lerp_u8(a.a, b.a, t),
        }
    }
}

/// Blend `from` toward `to`. `t` is clamped to `[0, 1]`.
///
/// A circular mode with a non-positive or non-finite modulus degrades to linear.
pub fn interpolate(from: f64, to: f64, t: f64, interp: Interp) -> f64 {
    let t = clamp_unit(t);
    match interp {
        Interp::Circular { modulus } if modulus.is_finite() && modulus > 0.0 => {
            let mut diff = to - from;
            if diff > modulus / 2.0 {
                diff -= modulus;
            } else if diff < -modulus / 2.0 {
                diff += modulus;
            }
            wrap(from + diff * t, modulus)
        }
        Interp::Linear | Interp::Circular { .. } => f64::lerp(&from, &to, t),
    }
}

/// Normalize `v` into `[0, modulus)`.
pub fn wrap(v: f64, modulus: f64) -> f64 {
    let r = v.rem_euclid(modulus);
    // rem_euclid can round up to exactly `modulus` for tiny negative inputs.
    if r >= modulus { r - modulus } else { r }
}

/// Interpolated scalar fields keyed by field name.
pub type FieldValues = BTreeMap<String, f64>;

/// Numeric fields of `frame` and the interpolation each one uses.
pub fn numeric_fields(frame: &Frame) -> Vec<(String, f64, Interp)> {
    let mut out = Vec::new();
    match &frame.payload {
        Payload::Dial(d) => {
            out.push((
                "position".to_owned(),
                d.position,
                Interp::Circular {
                    modulus: DIAL_MODULUS,
                },
            ));
            out.push(("password".to_owned(), d.password as f64, Interp::Linear));
            out.push((
                "rotation_number".to_owned(),
                f64::from(d.rotation_number),
                Interp::Linear,
            ));
        }
        Payload::Scanner(s) => {
            out.push(("global_sum".to_owned(), s.global_sum as f64, Interp::Linear));
            out.push((
                "global_invalids".to_owned(),
                s.global_invalids as f64,
                Interp::Linear,
            ));
            out.push((
                "range_index".to_owned(),
                f64::from(s.range_index),
                Interp::Linear,
            ));
        }
        Payload::Tracks(t) => {
            for track in &t.tracks {
                for (i, v) in track.values.iter().enumerate() {
                    if let Some(n) = v.as_number() {
                        out.push((format!("{}[{i}]", track.id), n, Interp::Linear));
                    }
                }
            }
        }
    }
    if let Some(p) = frame.progress {
        out.push(("progress".to_owned(), p, Interp::Linear));
    }
    out
}

/// Blend every numeric field of `to` from its value in `from`.
///
/// Fields absent (or non-numeric) in `from` take the `to` value.
pub fn interpolate_frames(from: &Frame, to: &Frame, t: f64) -> FieldValues {
    let start: BTreeMap<String, f64> = numeric_fields(from)
        .into_iter()
        .map(|(name, v, _)| (name, v))
        .collect();

    numeric_fields(to)
        .into_iter()
        .map(|(name, target, interp)| {
            let value = match start.get(&name) {
                Some(&s) => interpolate(s, target, t, interp),
                None => target,
            };
            (name, value)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interp.rs"]
mod tests;
