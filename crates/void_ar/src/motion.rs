//! Time-driven scalar interpolation
//!
//! [`Motion`] turns discrete input deltas into smooth per-frame values.
//! Each `set_end_delta` starts a new eased transition from wherever the
//! value currently is, so rapid successive deltas compose without snapping.

use serde::{Deserialize, Serialize};
use void_math::{circulate, clamp, lerp, Easing};

/// Default transition duration in milliseconds
pub const DEFAULT_DURATION_MS: f32 = 300.0;

/// Inclusive value range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f32,
    pub max: f32,
}

impl Range {
    /// No clamping
    pub const INFINITE: Self = Self {
        min: f32::NEG_INFINITY,
        max: f32::INFINITY,
    };

    /// `[0, 1]`
    pub const UNIT: Self = Self { min: 0.0, max: 1.0 };

    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        clamp(value, self.min, self.max)
    }
}

impl Default for Range {
    fn default() -> Self {
        Self::INFINITE
    }
}

/// Single-scalar interpolator
#[derive(Debug, Clone)]
pub struct Motion {
    duration: f32,
    looping: bool,
    range: Range,
    easing: Easing,
    start: f32,
    end: f32,
    val: f32,
    progress: f32,
    activated: bool,
}

impl Motion {
    /// Create an inactive motion resting at 0 (clamped into the default
    /// infinite range)
    pub fn new(duration_ms: f32) -> Self {
        Self {
            duration: duration_ms,
            looping: false,
            range: Range::INFINITE,
            easing: Easing::EaseOutCubic,
            start: 0.0,
            end: 0.0,
            val: 0.0,
            progress: 0.0,
            activated: false,
        }
    }

    /// Set looping (builder pattern)
    pub fn with_loop(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    /// Set the clamping range and re-anchor inside it (builder pattern)
    pub fn with_range(mut self, range: Range) -> Self {
        self.range = range;
        let val = self.val;
        self.reset(val);
        self
    }

    /// Set the easing curve (builder pattern)
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    #[inline]
    pub fn val(&self) -> f32 {
        self.val
    }

    #[inline]
    pub fn start(&self) -> f32 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> f32 {
        self.end
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    #[inline]
    pub fn range(&self) -> Range {
        self.range
    }

    #[inline]
    pub fn is_activated(&self) -> bool {
        self.activated
    }

    pub fn set_duration(&mut self, duration_ms: f32) {
        self.duration = duration_ms;
    }

    /// Advance by `delta_ms` and return how much the value changed.
    ///
    /// An inactive motion returns 0 and leaves its value untouched.
    pub fn update(&mut self, delta_ms: f32) -> f32 {
        if !self.activated {
            return 0.0;
        }

        let prev = self.val;
        let step = if self.duration > 0.0 {
            delta_ms.max(0.0) / self.duration
        } else {
            1.0
        };
        let next = self.progress + step;

        self.progress = if self.looping {
            circulate(next, 0.0, 1.0)
        } else {
            clamp(next, 0.0, 1.0)
        };

        self.val = lerp(self.start, self.end, self.easing.apply(self.progress));

        if !self.looping && self.progress >= 1.0 {
            self.val = self.end;
            self.activated = false;
        }

        self.val - prev
    }

    /// Re-anchor at `value` (clamped into the range) with no transition
    pub fn reset(&mut self, value: f32) {
        let value = self.range.clamp(value);
        self.start = value;
        self.end = value;
        self.val = value;
        self.progress = 0.0;
        self.activated = false;
    }

    /// Start a new transition from the current value toward `end + delta`
    pub fn set_end_delta(&mut self, delta: f32) {
        self.start = self.val;
        self.end = self.range.clamp(self.end + delta);
        self.progress = 0.0;
        self.activated = true;
    }
}

impl Default for Motion {
    fn default() -> Self {
        Self::new(DEFAULT_DURATION_MS)
    }
}
