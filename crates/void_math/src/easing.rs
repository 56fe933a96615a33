//! Easing curves
//!
//! Every curve maps progress in `[0, 1]` to an eased factor. Curves that
//! overshoot (none of the built-ins do) would still be clamped by callers.

use crate::consts::PI;

/// Named easing curve
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    #[default]
    Linear,
    /// `sin(2 * PI * t)`, used for looping hover bobbing
    SineWave,
    EaseOutCubic,
    EaseInOutCubic,
    EaseOutBounce,
}

impl Easing {
    /// Evaluate the curve at `t`
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::SineWave => (2.0 * PI * t).sin(),
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseOutBounce => ease_out_bounce(t),
        }
    }
}

fn ease_out_bounce(t: f32) -> f32 {
    const N1: f32 = 7.5625;
    const D1: f32 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::EaseOutCubic,
            Easing::EaseInOutCubic,
            Easing::EaseOutBounce,
        ] {
            assert_relative_eq!(easing.apply(0.0), 0.0, epsilon = 1e-5);
            assert_relative_eq!(easing.apply(1.0), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn test_sine_wave_loops() {
        assert_relative_eq!(Easing::SineWave.apply(0.25), 1.0, epsilon = 1e-5);
        assert_relative_eq!(Easing::SineWave.apply(0.75), -1.0, epsilon = 1e-5);
    }
}
