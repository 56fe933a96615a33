//! Hover placement: the model floats in front of the camera

use super::{ControlKind, GestureRoute, GestureRouter, PlacementAnchor, PlacementControl};
use crate::config::ArConfig;
use crate::context::XrRenderContext;
use crate::control::{HoverRotateControl, HoverTranslateControl};
use crate::gesture::Gesture;

/// One finger rotates, two fingers move, a pinch scales. The touch
/// position relative to the model does not matter.
#[derive(Debug, Clone)]
pub struct ArHoverControl {
    router: GestureRouter<HoverRotateControl, HoverTranslateControl>,
}

impl ArHoverControl {
    pub fn new(config: &ArConfig) -> Self {
        let routes = vec![
            GestureRoute::always(Gesture::ONE_FINGER, ControlKind::Rotate),
            GestureRoute::always(Gesture::TWO_FINGER, ControlKind::Translate),
            GestureRoute::always(Gesture::PINCH, ControlKind::Scale),
        ];
        Self {
            router: GestureRouter::new(
                config,
                routes,
                HoverRotateControl::new(config.rotate_speed, config.rotate_duration_ms),
                HoverTranslateControl::new(config),
            ),
        }
    }

    #[inline]
    pub fn router(&self) -> &GestureRouter<HoverRotateControl, HoverTranslateControl> {
        &self.router
    }

    #[inline]
    pub fn router_mut(&mut self) -> &mut GestureRouter<HoverRotateControl, HoverTranslateControl> {
        &mut self.router
    }
}

impl PlacementControl for ArHoverControl {
    fn init(&mut self, ctx: &mut XrRenderContext<'_>, anchor: &PlacementAnchor) {
        self.router.rotate.update_rotation(ctx.model.transform.rotation);
        self.router.scale.init(ctx.model);
        self.router.enable();
        log::info!("Hover control initialized at {:?}", anchor.position);
    }

    fn destroy(&mut self) {
        self.router.disable();
    }

    fn enable(&mut self) {
        self.router.enable();
    }

    fn disable(&mut self) {
        self.router.disable();
    }

    fn is_enabled(&self) -> bool {
        self.router.is_enabled()
    }

    fn update(&mut self, ctx: &mut XrRenderContext<'_>) {
        self.router.update(ctx);
    }

    fn on_select_start(&mut self, ctx: &XrRenderContext<'_>) {
        self.router.on_select_start(ctx);
    }

    fn on_select_end(&mut self) {
        self.router.on_select_end();
    }
}
