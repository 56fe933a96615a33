//! Dragging the model along a wall

use glam::{Quat, Vec2, Vec3};
use void_math::Plane;

use super::{ArControl, ControlState, HoverLift};
use crate::config::ArConfig;
use crate::context::{ControlInput, XrRenderContext};
use crate::gesture::Gesture;
use crate::placement::{intersect_drag_plane, is_wall_hit, reposition_wall_plane, WALL_OFFSET_HYSTERESIS};

/// Moves the model across a vertical drag plane.
///
/// When the finger crosses onto a different wall the plane follows, and
/// the model turns with it so it keeps facing out of the surface.
#[derive(Debug, Clone)]
pub struct WallTranslateControl {
    state: ControlState,
    wall_threshold: f32,
    angle_threshold: f32,
    max_distance: f32,
    plane: Plane,
    wall_position: Vec3,
    grab_offset: Option<Vec3>,
    pending_turn: Option<Quat>,
    turned_normal: Option<Vec3>,
    lift: HoverLift,
}

impl WallTranslateControl {
    pub fn new(config: &ArConfig) -> Self {
        Self {
            state: ControlState::new(),
            wall_threshold: config.wall_threshold,
            angle_threshold: config.wall_angle_threshold_deg.to_radians(),
            max_distance: config.max_drag_distance,
            plane: Plane::from_point_normal(Vec3::ZERO, Vec3::Z),
            wall_position: Vec3::ZERO,
            grab_offset: None,
            pending_turn: None,
            turned_normal: None,
            lift: HoverLift::new(config),
        }
    }

    /// Rest the model at `position` on a wall facing `normal`
    pub fn init_wall(&mut self, position: Vec3, normal: Vec3) {
        self.wall_position = position;
        self.plane = Plane::from_point_normal(position, normal);
        self.pending_turn = None;
        self.turned_normal = None;
    }

    #[inline]
    pub fn wall_position(&self) -> Vec3 {
        self.wall_position
    }

    #[inline]
    pub fn wall_normal(&self) -> Vec3 {
        self.plane.normal
    }

    #[inline]
    pub fn drag_plane(&self) -> &Plane {
        &self.plane
    }

    /// New wall normal if the model was turned onto another wall since
    /// the last call
    pub fn take_orientation_change(&mut self) -> Option<Vec3> {
        self.turned_normal.take()
    }

    fn target_point(&mut self, ctx: &XrRenderContext<'_>, input: &ControlInput) -> Option<Vec3> {
        if let Some(hit) = input.hit_pose.filter(|hit| is_wall_hit(hit, self.wall_threshold)) {
            let old_normal = self.plane.normal;
            if reposition_wall_plane(&mut self.plane, &hit, self.angle_threshold, WALL_OFFSET_HYSTERESIS) {
                let new_normal = self.plane.normal;
                if old_normal.angle_between(new_normal) >= self.angle_threshold {
                    let turn = Quat::from_rotation_arc(old_normal, new_normal);
                    self.pending_turn = Some(self.pending_turn.map_or(turn, |prev| turn * prev));
                    // The grab point is relative to the old wall.
                    self.grab_offset = None;
                }
            }
            return Some(self.plane.project_point(hit.position()));
        }

        let finger = input.coords.first()?;
        intersect_drag_plane(ctx.camera, *finger, &self.plane, self.max_distance)
    }
}

impl ArControl for WallTranslateControl {
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
        self.state.disable();
        self.grab_offset = None;
    }

    fn activate(&mut self, _ctx: &XrRenderContext<'_>, gesture: Gesture) {
        if !self.state.activate() {
            return;
        }
        log::debug!("Wall translate activated by {:?}", gesture);
        self.grab_offset = None;
        self.lift.start();
    }

    fn deactivate(&mut self) {
        if self.state.active {
            self.lift.release();
        }
        self.state.active = false;
        self.grab_offset = None;
    }

    fn set_initial_pos(&mut self, _ctx: &XrRenderContext<'_>, _coords: &[Vec2]) {
        self.grab_offset = None;
    }

    fn process(&mut self, ctx: &XrRenderContext<'_>, input: &ControlInput) {
        if !self.state.is_running() {
            return;
        }
        let Some(point) = self.target_point(ctx, input) else {
            return;
        };

        let resting = self.wall_position;
        let offset = *self.grab_offset.get_or_insert_with(|| resting - point);
        self.wall_position = self.plane.project_point(point + offset);
    }

    fn update(&mut self, ctx: &mut XrRenderContext<'_>, delta_ms: f32) {
        if !self.state.enabled || (!self.state.active && !self.lift.is_animating()) {
            return;
        }

        if let Some(turn) = self.pending_turn.take() {
            let rotation = (turn * ctx.model.transform.rotation).normalize();
            ctx.model.transform.rotation = rotation;
            self.turned_normal = Some(self.plane.normal);
            log::debug!("Model turned onto wall with normal {:?}", self.plane.normal);
        }

        let offset = self.lift.update(delta_ms);
        ctx.model.transform.position = self.wall_position + self.plane.normal * offset;
    }
}
