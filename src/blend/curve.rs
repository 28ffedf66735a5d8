/// How the blend parameter advances across the frames of one seam.
///
/// Every curve fixes `0` and `1`, so the first and last blend frames still sit strictly
/// between the two boundary poses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeamCurve {
    /// Constant velocity through the seam.
    #[default]
    Linear,
    /// Hermite `3t² - 2t³`: zero velocity at both boundary poses, so the figure leaves the
    /// outgoing clip and settles into the incoming one without a visible kink.
    Smoothstep,
}

impl SeamCurve {
    /// Blend weight of the incoming pose at seam position `t`.
    pub fn weight(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Smoothstep => t * t * (3.0 - 2.0 * t),
        }
    }

    /// Weights for the `n` blend frames of a seam: `weight(i / (n + 1))` for `i = 1..=n`.
    pub fn weights(self, n: usize) -> impl Iterator<Item = f64> {
        let steps = (n + 1) as f64;
        (1..=n).map(move |i| self.weight(i as f64 / steps))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/blend/curve.rs"]
mod tests;
