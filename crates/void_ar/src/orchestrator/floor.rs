//! Floor placement: swirl, drag along the floor, pinch to scale

use glam::Vec3;

use super::{ControlKind, GestureRoute, GestureRouter, PlacementAnchor, PlacementControl};
use crate::config::ArConfig;
use crate::context::XrRenderContext;
use crate::control::{FloorTranslateControl, SwirlControl};
use crate::gesture::Gesture;
use crate::indicator::FloorIndicator;

/// One finger on the model drags it, one finger elsewhere swirls it,
/// a pinch scales it.
#[derive(Debug, Clone)]
pub struct ArFloorControl {
    router: GestureRouter<SwirlControl, FloorTranslateControl>,
    indicator: FloorIndicator,
}

impl ArFloorControl {
    pub fn new(config: &ArConfig) -> Self {
        let routes = vec![
            GestureRoute::new(Gesture::ONE_FINGER, ControlKind::Translate, ControlKind::Rotate),
            GestureRoute::always(Gesture::PINCH, ControlKind::Scale),
        ];
        Self {
            router: GestureRouter::new(
                config,
                routes,
                SwirlControl::new(config.rotate_speed, config.rotate_duration_ms),
                FloorTranslateControl::new(config),
            ),
            indicator: FloorIndicator::new(config.indicator_fade_ms),
        }
    }

    #[inline]
    pub fn router(&self) -> &GestureRouter<SwirlControl, FloorTranslateControl> {
        &self.router
    }

    #[inline]
    pub fn router_mut(&mut self) -> &mut GestureRouter<SwirlControl, FloorTranslateControl> {
        &mut self.router
    }

    #[inline]
    pub fn indicator(&self) -> &FloorIndicator {
        &self.indicator
    }
}

impl PlacementControl for ArFloorControl {
    fn init(&mut self, ctx: &mut XrRenderContext<'_>, anchor: &PlacementAnchor) {
        self.router.translate.init_floor_position(anchor.position);
        self.router.rotate.set_axis(Vec3::Y);
        self.router.rotate.update_rotation(ctx.model.transform.rotation);
        self.router.scale.init(ctx.model);

        self.indicator.fit_model(ctx.model);
        self.indicator.place_on_floor(anchor.position);
        self.router.enable();
        log::info!("Floor control initialized at {:?}", anchor.position);
    }

    fn destroy(&mut self) {
        self.router.disable();
        self.indicator.fade_out();
    }

    fn enable(&mut self) {
        self.router.enable();
    }

    fn disable(&mut self) {
        self.router.disable();
        self.indicator.fade_out();
    }

    fn is_enabled(&self) -> bool {
        self.router.is_enabled()
    }

    fn update(&mut self, ctx: &mut XrRenderContext<'_>) {
        self.router.update(ctx);
        self.indicator.place_on_floor(self.router.translate.floor_position());
        self.indicator.update(ctx.delta_ms);
    }

    fn on_select_start(&mut self, ctx: &XrRenderContext<'_>) {
        if !self.router.is_enabled() {
            return;
        }
        self.router.on_select_start(ctx);
        self.indicator.fade_in();
    }

    fn on_select_end(&mut self) {
        self.router.on_select_end();
        self.indicator.fade_out();
    }
}
