//! On-screen helpers drawn next to the model
//!
//! Indicators hold only the state a renderer needs (pose, opacity, text);
//! drawing them is left to the host.

use glam::{Quat, Vec3};
use void_math::Easing;
use void_xr::XrCamera;

use crate::context::{align_up, ArModel};
use crate::motion::{Motion, Range};

/// Gap between the top of the model and the scale readout
pub const SCALE_INDICATOR_OFFSET: f32 = 0.1;

/// Opacity fade shared by both indicators
#[derive(Debug, Clone)]
struct Fade {
    motion: Motion,
}

impl Fade {
    fn new(duration_ms: f32) -> Self {
        let mut motion = Motion::new(duration_ms)
            .with_range(Range::UNIT)
            .with_easing(Easing::Linear);
        motion.reset(0.0);
        Self { motion }
    }

    fn to(&mut self, target: f32) {
        let delta = target - self.motion.end();
        if delta != 0.0 {
            self.motion.set_end_delta(delta);
        }
    }

    fn update(&mut self, delta_ms: f32) {
        self.motion.update(delta_ms);
    }

    fn opacity(&self) -> f32 {
        self.motion.val()
    }
}

/// Ring drawn on the surface under the model
#[derive(Debug, Clone)]
pub struct FloorIndicator {
    position: Vec3,
    rotation: Quat,
    radius: f32,
    fade: Fade,
}

impl FloorIndicator {
    pub fn new(fade_ms: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            radius: 0.0,
            fade: Fade::new(fade_ms),
        }
    }

    /// Size the ring to the model's footprint
    pub fn fit_model(&mut self, model: &ArModel) {
        let size = model.world_bounds().size();
        self.radius = size.x.max(size.z) * 0.5;
    }

    /// Put the ring at a floor point under the model
    pub fn place_on_floor(&mut self, position: Vec3) {
        self.position = position;
        self.rotation = Quat::IDENTITY;
    }

    /// Put the ring flat against a wall with the given normal
    pub fn place_on_wall(&mut self, position: Vec3, normal: Vec3) {
        self.position = position;
        self.rotation = align_up(normal);
    }

    pub fn fade_in(&mut self) {
        self.fade.to(1.0);
    }

    pub fn fade_out(&mut self) {
        self.fade.to(0.0);
    }

    pub fn update(&mut self, delta_ms: f32) {
        self.fade.update(delta_ms);
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn opacity(&self) -> f32 {
        self.fade.opacity()
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.opacity() > 0.0
    }
}

/// Billboarded percentage readout shown while scaling
#[derive(Debug, Clone)]
pub struct ScaleIndicator {
    text: String,
    position: Vec3,
    rotation: Quat,
    fade: Fade,
}

impl ScaleIndicator {
    pub fn new(fade_ms: f32) -> Self {
        Self {
            text: format_percent(1.0),
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            fade: Fade::new(fade_ms),
        }
    }

    pub fn show(&mut self) {
        self.fade.to(1.0);
    }

    pub fn hide(&mut self) {
        self.fade.to(0.0);
    }

    /// Refresh the readout for `multiplier` above the model, facing the camera
    pub fn sync(&mut self, multiplier: f32, model: &ArModel, camera: &XrCamera) {
        self.text = format_percent(multiplier);

        let bounds = model.world_bounds();
        let center = bounds.center();
        self.position = Vec3::new(center.x, bounds.max.y + SCALE_INDICATOR_OFFSET, center.z);
        self.rotation = camera.orientation();
    }

    pub fn update(&mut self, delta_ms: f32) {
        self.fade.update(delta_ms);
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    #[inline]
    pub fn opacity(&self) -> f32 {
        self.fade.opacity()
    }
}

fn format_percent(multiplier: f32) -> String {
    format!("{}%", (multiplier * 100.0).round() as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_floor_indicator_fades() {
        let mut indicator = FloorIndicator::new(100.0);
        assert_eq!(indicator.opacity(), 0.0);

        indicator.fade_in();
        indicator.update(50.0);
        assert_relative_eq!(indicator.opacity(), 0.5, epsilon = 1e-5);
        indicator.update(50.0);
        assert_eq!(indicator.opacity(), 1.0);

        indicator.fade_out();
        indicator.update(200.0);
        assert_eq!(indicator.opacity(), 0.0);
        assert!(!indicator.is_visible());
    }

    #[test]
    fn test_floor_indicator_fits_model() {
        let mut indicator = FloorIndicator::new(100.0);
        indicator.fit_model(&ArModel::default());
        assert_relative_eq!(indicator.radius(), 0.5, epsilon = 1e-6);

        indicator.place_on_wall(Vec3::new(0.0, 1.0, -2.0), Vec3::Z);
        assert!((indicator.rotation() * Vec3::Y).abs_diff_eq(Vec3::Z, 1e-5));
    }

    #[test]
    fn test_scale_indicator_text_and_position() {
        let mut indicator = ScaleIndicator::new(100.0);
        let model = ArModel::default();
        let camera = XrCamera::default();

        indicator.sync(1.5, &model, &camera);
        assert_eq!(indicator.text(), "150%");
        assert_relative_eq!(indicator.position().y, 0.5 + SCALE_INDICATOR_OFFSET, epsilon = 1e-6);

        indicator.sync(0.054, &model, &camera);
        assert_eq!(indicator.text(), "5%");
    }

    #[test]
    fn test_scale_indicator_show_hide() {
        let mut indicator = ScaleIndicator::new(100.0);
        indicator.show();
        indicator.update(100.0);
        assert_eq!(indicator.opacity(), 1.0);
        indicator.hide();
        indicator.update(100.0);
        assert_eq!(indicator.opacity(), 0.0);
    }
}
