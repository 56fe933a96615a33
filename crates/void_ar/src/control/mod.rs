//! Gesture controllers
//!
//! Every controller shares the [`ArControl`] lifecycle:
//!
//! ```text
//! enable ─► activate(gesture) ─► set_initial_pos ─► process ─► update ─► deactivate
//! ```
//!
//! An orchestrator activates at most one controller per touch session.
//! Calls to `process`/`update` on a disabled or inactive controller are
//! silent no-ops, so callers can drive all controllers unconditionally.

mod floor_translate;
mod hover_rotate;
mod hover_translate;
mod lift;
mod scale;
mod swirl;
mod wall_translate;

pub use floor_translate::FloorTranslateControl;
pub use hover_rotate::HoverRotateControl;
pub use hover_translate::HoverTranslateControl;
pub use lift::HoverLift;
pub use scale::ScaleControl;
pub use swirl::SwirlControl;
pub use wall_translate::WallTranslateControl;

use glam::{Quat, Vec2, Vec3};
use void_math::Easing;

use crate::context::{ControlInput, XrRenderContext};
use crate::gesture::Gesture;
use crate::motion::{Motion, Range};

/// Uniform controller lifecycle
pub trait ArControl {
    fn enabled(&self) -> bool;

    fn active(&self) -> bool;

    fn enable(&mut self);

    /// Disable and deactivate
    fn disable(&mut self);

    /// Start handling `gesture`. No-op while disabled.
    fn activate(&mut self, ctx: &XrRenderContext<'_>, gesture: Gesture);

    fn deactivate(&mut self);

    /// Seed the controller with the touch points that triggered it
    fn set_initial_pos(&mut self, ctx: &XrRenderContext<'_>, coords: &[Vec2]);

    /// Consume this frame's input
    fn process(&mut self, ctx: &XrRenderContext<'_>, input: &ControlInput);

    /// Advance smoothing and write the result into the model
    fn update(&mut self, ctx: &mut XrRenderContext<'_>, delta_ms: f32);
}

/// Enabled/active flags shared by every controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ControlState {
    pub enabled: bool,
    pub active: bool,
}

impl ControlState {
    pub fn new() -> Self {
        Self {
            enabled: true,
            active: false,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.enabled && self.active
    }

    /// Returns false when the controller is disabled
    pub fn activate(&mut self) -> bool {
        if self.enabled {
            self.active = true;
        }
        self.active
    }

    pub fn disable(&mut self) {
        self.enabled = false;
        self.active = false;
    }
}

/// Slerps the model rotation from the last committed value toward a target
#[derive(Debug, Clone)]
pub struct RotationSmoother {
    from: Quat,
    to: Quat,
    motion: Motion,
}

impl RotationSmoother {
    pub fn new(duration_ms: f32) -> Self {
        let mut motion = Motion::new(duration_ms)
            .with_range(Range::UNIT)
            .with_easing(Easing::EaseOutCubic);
        motion.reset(1.0);
        Self {
            from: Quat::IDENTITY,
            to: Quat::IDENTITY,
            motion,
        }
    }

    /// Jump to `rotation` with no transition
    pub fn reset(&mut self, rotation: Quat) {
        self.from = rotation;
        self.to = rotation;
        self.motion.reset(1.0);
    }

    /// Premultiply the target by `delta` and restart the transition
    pub fn rotate_by(&mut self, delta: Quat) {
        self.from = self.current();
        self.to = (delta * self.to).normalize();
        self.motion.reset(0.0);
        self.motion.set_end_delta(1.0);
    }

    pub fn update(&mut self, delta_ms: f32) -> Quat {
        self.motion.update(delta_ms);
        self.current()
    }

    pub fn current(&self) -> Quat {
        self.from.slerp(self.to, self.motion.val())
    }

    #[inline]
    pub fn target(&self) -> Quat {
        self.to
    }

    #[inline]
    pub fn is_animating(&self) -> bool {
        self.motion.is_activated()
    }
}

/// Lerps a position from the last committed value toward a target
#[derive(Debug, Clone)]
pub struct PositionSmoother {
    from: Vec3,
    to: Vec3,
    motion: Motion,
}

impl PositionSmoother {
    pub fn new(duration_ms: f32) -> Self {
        let mut motion = Motion::new(duration_ms)
            .with_range(Range::UNIT)
            .with_easing(Easing::EaseOutCubic);
        motion.reset(1.0);
        Self {
            from: Vec3::ZERO,
            to: Vec3::ZERO,
            motion,
        }
    }

    pub fn reset(&mut self, position: Vec3) {
        self.from = position;
        self.to = position;
        self.motion.reset(1.0);
    }

    pub fn move_to(&mut self, target: Vec3) {
        self.from = self.current();
        self.to = target;
        self.motion.reset(0.0);
        self.motion.set_end_delta(1.0);
    }

    pub fn update(&mut self, delta_ms: f32) -> Vec3 {
        self.motion.update(delta_ms);
        self.current()
    }

    pub fn current(&self) -> Vec3 {
        self.from.lerp(self.to, self.motion.val())
    }

    #[inline]
    pub fn target(&self) -> Vec3 {
        self.to
    }
}
