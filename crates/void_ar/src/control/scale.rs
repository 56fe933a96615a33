//! Pinch to scale

use glam::{Vec2, Vec3};
use void_math::Easing;

use super::{ArControl, ControlState};
use crate::config::ArConfig;
use crate::context::{aspect_corrected, ArModel, ControlInput, XrRenderContext};
use crate::gesture::Gesture;
use crate::indicator::ScaleIndicator;
use crate::motion::{Motion, Range};

/// Scales the model by the change in distance between two fingers.
///
/// The multiplier lives in a [`Motion`] clamped to the configured range
/// and is applied on top of the scale the model had when placed.
#[derive(Debug, Clone)]
pub struct ScaleControl {
    state: ControlState,
    scale_speed: f32,
    initial_scale: Vec3,
    prev_distance: Option<f32>,
    motion: Motion,
    indicator: ScaleIndicator,
}

impl ScaleControl {
    pub fn new(config: &ArConfig) -> Self {
        let mut motion = Motion::new(config.scale_duration_ms)
            .with_range(Range::new(config.scale_min, config.scale_max))
            .with_easing(Easing::EaseOutCubic);
        motion.reset(1.0);

        Self {
            state: ControlState::new(),
            scale_speed: config.scale_speed,
            initial_scale: Vec3::ONE,
            prev_distance: None,
            motion,
            indicator: ScaleIndicator::new(config.indicator_fade_ms),
        }
    }

    /// Take the model's current scale as the 100% reference
    pub fn init(&mut self, model: &ArModel) {
        self.initial_scale = model.transform.scale;
        self.motion.reset(1.0);
    }

    /// Current multiplier over the initial scale
    #[inline]
    pub fn scale_multiplier(&self) -> f32 {
        self.motion.val()
    }

    /// Scale the model is shown at
    pub fn scale(&self) -> Vec3 {
        self.initial_scale * self.motion.val()
    }

    /// Multiplier the current transition is heading toward
    #[inline]
    pub fn target_multiplier(&self) -> f32 {
        self.motion.end()
    }

    #[inline]
    pub fn indicator(&self) -> &ScaleIndicator {
        &self.indicator
    }

    fn finger_distance(coords: &[Vec2], aspect: f32) -> Option<f32> {
        match coords {
            [a, b, ..] => Some(aspect_corrected(*a, aspect).distance(aspect_corrected(*b, aspect))),
            _ => None,
        }
    }
}

impl ArControl for ScaleControl {
    fn enabled(&self) -> bool {
        self.state.enabled
    }

    fn active(&self) -> bool {
        self.state.active
    }

    fn enable(&mut self) {
        self.state.enabled = true;
    }

    fn disable(&mut self) {
        if self.state.active {
            self.indicator.hide();
        }
        self.state.disable();
        self.prev_distance = None;
    }

    fn activate(&mut self, ctx: &XrRenderContext<'_>, gesture: Gesture) {
        if !self.state.activate() {
            return;
        }
        log::debug!("Scale activated by {:?}", gesture);
        self.indicator.sync(self.motion.val(), ctx.model, ctx.camera);
        self.indicator.show();
    }

    fn deactivate(&mut self) {
        if self.state.active {
            self.indicator.hide();
        }
        self.state.active = false;
        self.prev_distance = None;
    }

    fn set_initial_pos(&mut self, ctx: &XrRenderContext<'_>, coords: &[Vec2]) {
        self.prev_distance = Self::finger_distance(coords, ctx.aspect());
    }

    fn process(&mut self, ctx: &XrRenderContext<'_>, input: &ControlInput) {
        if !self.state.is_running() {
            return;
        }
        let Some(distance) = Self::finger_distance(&input.coords, ctx.aspect()) else {
            return;
        };
        let Some(prev) = self.prev_distance.replace(distance) else {
            return;
        };

        let delta = (distance - prev) * self.scale_speed;
        if delta != 0.0 {
            self.motion.set_end_delta(delta);
        }
    }

    fn update(&mut self, ctx: &mut XrRenderContext<'_>, delta_ms: f32) {
        // The readout keeps fading out after release.
        self.indicator.update(delta_ms);

        if !self.state.is_running() {
            return;
        }
        self.motion.update(delta_ms);
        ctx.model.transform.scale = self.scale();
        self.indicator.sync(self.motion.val(), ctx.model, ctx.camera);
    }
}
