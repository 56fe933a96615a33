//! Lift, bob and bounce offset for a dragged model

use void_math::Easing;

use crate::config::ArConfig;
use crate::motion::Motion;

/// Offset of a dragged model from its surface.
///
/// While dragging the model rises to `hover_height` and bobs around it;
/// on release it drops back onto the surface with a bounce.
#[derive(Debug, Clone)]
pub struct HoverLift {
    height: f32,
    amplitude: f32,
    lift: Motion,
    bob: Motion,
    bounce: Motion,
    bouncing: bool,
}

impl HoverLift {
    pub fn new(config: &ArConfig) -> Self {
        Self {
            height: config.hover_height,
            amplitude: config.hover_amplitude,
            lift: Motion::new(config.lift_duration_ms).with_easing(Easing::EaseOutCubic),
            bob: Motion::new(config.hover_period_ms)
                .with_loop(true)
                .with_easing(Easing::SineWave),
            bounce: Motion::new(config.bounce_duration_ms).with_easing(Easing::EaseOutBounce),
            bouncing: false,
        }
    }

    /// Rise off the surface, continuing from wherever the model is now
    pub fn start(&mut self) {
        let current = self.offset();
        self.bouncing = false;
        self.bounce.reset(0.0);

        self.lift.reset(current);
        self.lift.set_end_delta(self.height - current);

        self.bob.reset(0.0);
        if self.amplitude != 0.0 {
            self.bob.set_end_delta(self.amplitude);
        }
    }

    /// Drop back to the surface
    pub fn release(&mut self) {
        let current = self.offset();
        self.lift.reset(0.0);
        self.bob.reset(0.0);

        self.bounce.reset(current);
        if current != 0.0 {
            self.bounce.set_end_delta(-current);
            self.bouncing = true;
        }
    }

    /// Advance every motion and return the current offset
    pub fn update(&mut self, delta_ms: f32) -> f32 {
        if self.bouncing {
            self.bounce.update(delta_ms);
            if !self.bounce.is_activated() {
                self.bouncing = false;
            }
        } else {
            self.lift.update(delta_ms);
            self.bob.update(delta_ms);
        }
        self.offset()
    }

    pub fn offset(&self) -> f32 {
        if self.bouncing {
            self.bounce.val()
        } else {
            self.lift.val() + self.bob.val()
        }
    }

    /// Whether the lift or the bounce is still moving
    pub fn is_animating(&self) -> bool {
        self.bouncing || self.lift.is_activated() || self.bob.is_activated()
    }

    #[inline]
    pub fn is_bouncing(&self) -> bool {
        self.bouncing
    }
}
