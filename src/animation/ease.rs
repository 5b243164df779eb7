/// Easing curves over normalized progress.
///
/// Every curve maps `0 -> 0` and `1 -> 1` and is monotonic non-decreasing in between.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Ease {
    /// `t`
    Linear,
    /// `t^2`
    InQuad,
    /// `1 - (1 - t)^2`
    OutQuad,
    /// Quadratic in, quadratic out.
    InOutQuad,
    /// `t^3`
    InCubic,
    /// `1 - (1 - t)^3`
    #[default]
    OutCubic,
    /// Cubic in, cubic out.
    InOutCubic,
}

impl Ease {
    /// Apply the curve to `t`, clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InCubic => t * t * t,
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
        }
    }
}

/// One reading of an [`EasingClock`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EaseSample {
    /// Linear progress in `[0, 1]`.
    pub progress: f64,
    /// Eased progress in `[0, 1]`.
    pub eased: f64,
}

impl EaseSample {
    /// Whether the clock has reached the end of its duration.
    pub fn is_complete(self) -> bool {
        self.progress >= 1.0
    }
}

/// Maps elapsed milliseconds onto eased progress over a fixed duration.
///
/// Sampling is pure and total: a non-positive or non-finite duration reads as already complete,
/// and a NaN elapsed time reads as the start.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EasingClock {
    duration_ms: f64,
    ease: Ease,
}

impl EasingClock {
    /// Build a clock over `duration_ms` using `ease`.
    pub fn new(duration_ms: f64, ease: Ease) -> Self {
        Self { duration_ms, ease }
    }

    /// Cubic ease-out clock, the curve used for the hinge by default.
    pub fn out_cubic(duration_ms: f64) -> Self {
        Self::new(duration_ms, Ease::OutCubic)
    }

    /// Configured duration in milliseconds.
    pub fn duration_ms(self) -> f64 {
        self.duration_ms
    }

    /// Configured easing curve.
    pub fn ease(self) -> Ease {
        self.ease
    }

    /// `clamp(elapsed_ms / duration_ms, 0, 1)`.
    pub fn progress(self, elapsed_ms: f64) -> f64 {
        if !self.duration_ms.is_finite() || self.duration_ms <= 0.0 {
            return 1.0;
        }
        if elapsed_ms.is_nan() {
            return 0.0;
        }
        (elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Progress and eased progress for `elapsed_ms`.
    pub fn sample(self, elapsed_ms: f64) -> EaseSample {
        let progress = self.progress(elapsed_ms);
        EaseSample {
            progress,
            eased: self.ease.apply(progress),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
