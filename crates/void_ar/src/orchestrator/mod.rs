//! Placement orchestrators
//!
//! An orchestrator owns one [`DeadzoneChecker`] plus a rotate, a translate
//! and a scale controller, and turns a touch session into exactly one
//! active controller:
//!
//! ```text
//! idle ─► select start ─► deadzone check ─► one controller active ─► select end ─► idle
//! ```
//!
//! Which controller a classified gesture activates depends on the
//! placement mode and on whether the first touch landed on the model.

mod floor;
mod hover;
mod wall;

pub use floor::ArFloorControl;
pub use hover::ArHoverControl;
pub use wall::ArWallControl;

use glam::Vec3;

use crate::config::ArConfig;
use crate::context::XrRenderContext;
use crate::control::{ArControl, ScaleControl};
use crate::deadzone::DeadzoneChecker;
use crate::gesture::Gesture;

/// The three controller slots of an orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    Rotate,
    Translate,
    Scale,
}

/// Maps a gesture to a controller, depending on whether the touch
/// started on the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureRoute {
    pub gesture: Gesture,
    pub on_model: ControlKind,
    pub off_model: ControlKind,
}

impl GestureRoute {
    pub const fn new(gesture: Gesture, on_model: ControlKind, off_model: ControlKind) -> Self {
        Self {
            gesture,
            on_model,
            off_model,
        }
    }

    /// Same controller wherever the touch started
    pub const fn always(gesture: Gesture, kind: ControlKind) -> Self {
        Self::new(gesture, kind, kind)
    }

    #[inline]
    pub fn target(&self, model_hit: bool) -> ControlKind {
        if model_hit {
            self.on_model
        } else {
            self.off_model
        }
    }
}

/// Where the model was anchored on first placement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementAnchor {
    pub position: Vec3,
    /// Surface normal; +Y for floors and hover placement
    pub normal: Vec3,
}

impl PlacementAnchor {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self { position, normal }
    }

    pub fn on_floor(position: Vec3) -> Self {
        Self::new(position, Vec3::Y)
    }
}

/// Interface the AR session drives every orchestrator through
pub trait PlacementControl {
    /// Take over a freshly placed model
    fn init(&mut self, ctx: &mut XrRenderContext<'_>, anchor: &PlacementAnchor);

    /// Release everything; the orchestrator is disabled afterwards
    fn destroy(&mut self);

    fn enable(&mut self);

    fn disable(&mut self);

    fn is_enabled(&self) -> bool;

    /// Per-frame step: deadzone check, then process and update
    fn update(&mut self, ctx: &mut XrRenderContext<'_>);

    fn on_select_start(&mut self, ctx: &XrRenderContext<'_>);

    fn on_select_end(&mut self);
}

/// Deadzone checker plus the three controllers, shared by every mode
#[derive(Debug, Clone)]
pub struct GestureRouter<R, T> {
    deadzone: DeadzoneChecker,
    routes: Vec<GestureRoute>,
    model_hit: bool,
    selecting: bool,
    enabled: bool,
    pub rotate: R,
    pub translate: T,
    pub scale: ScaleControl,
}

impl<R: ArControl, T: ArControl> GestureRouter<R, T> {
    pub fn new(config: &ArConfig, routes: Vec<GestureRoute>, rotate: R, translate: T) -> Self {
        Self {
            deadzone: DeadzoneChecker::new(config.deadzone_size),
            routes,
            model_hit: false,
            selecting: false,
            enabled: true,
            rotate,
            translate,
            scale: ScaleControl::new(config),
        }
    }

    pub fn control(&self, kind: ControlKind) -> &dyn ArControl {
        match kind {
            ControlKind::Rotate => &self.rotate,
            ControlKind::Translate => &self.translate,
            ControlKind::Scale => &self.scale,
        }
    }

    pub fn control_mut(&mut self, kind: ControlKind) -> &mut dyn ArControl {
        match kind {
            ControlKind::Rotate => &mut self.rotate,
            ControlKind::Translate => &mut self.translate,
            ControlKind::Scale => &mut self.scale,
        }
    }

    #[inline]
    pub fn deadzone(&self) -> &DeadzoneChecker {
        &self.deadzone
    }

    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[inline]
    pub fn is_selecting(&self) -> bool {
        self.selecting
    }

    /// Whether the current touch session started on the model
    #[inline]
    pub fn model_hit(&self) -> bool {
        self.model_hit
    }

    /// The controller currently handling input, if any
    pub fn active_control(&self) -> Option<ControlKind> {
        [ControlKind::Rotate, ControlKind::Translate, ControlKind::Scale]
            .into_iter()
            .find(|kind| self.control(*kind).active())
    }

    pub fn enable(&mut self) {
        self.enabled = true;
        self.rotate.enable();
        self.translate.enable();
        self.scale.enable();
    }

    pub fn disable(&mut self) {
        self.on_select_end();
        self.enabled = false;
        self.rotate.disable();
        self.translate.disable();
        self.scale.disable();
    }

    pub fn deactivate_all(&mut self) {
        self.rotate.deactivate();
        self.translate.deactivate();
        self.scale.deactivate();
    }

    pub fn on_select_start(&mut self, ctx: &XrRenderContext<'_>) {
        if !self.enabled {
            return;
        }

        let coords = ctx.frame.input_coords();
        self.deadzone.cleanup();
        self.model_hit = coords
            .first()
            .is_some_and(|finger| ctx.model.is_hit_by(&ctx.camera.ray(*finger)));

        let mut requested = Gesture::NONE;
        for route in &self.routes {
            if self.control(route.target(self.model_hit)).enabled() {
                requested |= route.gesture;
            }
        }
        self.deadzone.add_testing_gestures(requested);
        self.deadzone.set_aspect(ctx.aspect());
        self.deadzone.set_first_input(&coords);
        self.selecting = true;

        log::debug!(
            "Select start: {} finger(s), model hit {}, testing {:?}",
            coords.len(),
            self.model_hit,
            requested
        );
    }

    pub fn update(&mut self, ctx: &mut XrRenderContext<'_>) {
        let delta_ms = ctx.delta_ms;

        if self.enabled && self.selecting {
            let input = ctx.control_input();
            if self.deadzone.in_deadzone() {
                let gesture = self.deadzone.check(&input.coords);
                if !gesture.is_none() {
                    self.activate_for(ctx, gesture, &input.coords);
                }
            } else {
                self.rotate.process(ctx, &input);
                self.translate.process(ctx, &input);
                self.scale.process(ctx, &input);
            }
        }

        self.rotate.update(ctx, delta_ms);
        self.translate.update(ctx, delta_ms);
        self.scale.update(ctx, delta_ms);
    }

    pub fn on_select_end(&mut self) {
        self.deactivate_all();
        self.deadzone.cleanup();
        self.selecting = false;
        self.model_hit = false;
    }

    fn activate_for(&mut self, ctx: &XrRenderContext<'_>, gesture: Gesture, coords: &[glam::Vec2]) {
        let Some(kind) = self
            .routes
            .iter()
            .find(|route| route.gesture.intersects(gesture))
            .map(|route| route.target(self.model_hit))
        else {
            return;
        };

        self.deactivate_all();
        let control = self.control_mut(kind);
        control.activate(ctx, gesture);
        control.set_initial_pos(ctx, coords);
        log::debug!("{:?} routed to {:?}", gesture, kind);
    }
}
