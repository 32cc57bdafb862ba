/// Easing applied to interpolation progress before values are blended.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Progress is used as-is.
    #[default]
    Linear,
    /// Cubic ease-in/out, used for dial rotation.
    InOutCubic,
}

impl Ease {
    /// Apply this easing to normalized progress `t`. Input and output are clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = clamp_unit(t);
        let eased = match self {
            Self::Linear => t,
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        };
        clamp_unit(eased)
    }
}

/// Cubic ease-in/out.
pub fn ease(t: f64) -> f64 {
    Ease::InOutCubic.apply(t)
}

/// Clamp to `[0, 1]`, mapping NaN to 0.
pub(crate) fn clamp_unit(t: f64) -> f64 {
    if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
