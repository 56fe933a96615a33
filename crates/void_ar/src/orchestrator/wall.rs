//! Wall placement: swirl about the wall normal, drag along walls, pinch

use super::{ControlKind, GestureRoute, GestureRouter, PlacementAnchor, PlacementControl};
use crate::config::ArConfig;
use crate::context::XrRenderContext;
use crate::control::{SwirlControl, WallTranslateControl};
use crate::gesture::Gesture;
use crate::indicator::FloorIndicator;

/// Same routing as floor placement, with the drag plane and swirl axis
/// following the wall the model hangs on.
#[derive(Debug, Clone)]
pub struct ArWallControl {
    router: GestureRouter<SwirlControl, WallTranslateControl>,
    indicator: FloorIndicator,
}

impl ArWallControl {
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
                WallTranslateControl::new(config),
            ),
            indicator: FloorIndicator::new(config.indicator_fade_ms),
        }
    }

    #[inline]
    pub fn router(&self) -> &GestureRouter<SwirlControl, WallTranslateControl> {
        &self.router
    }

    #[inline]
    pub fn router_mut(&mut self) -> &mut GestureRouter<SwirlControl, WallTranslateControl> {
        &mut self.router
    }

    #[inline]
    pub fn indicator(&self) -> &FloorIndicator {
        &self.indicator
    }
}

impl PlacementControl for ArWallControl {
    fn init(&mut self, ctx: &mut XrRenderContext<'_>, anchor: &PlacementAnchor) {
        self.router.translate.init_wall(anchor.position, anchor.normal);
        self.router.rotate.set_axis(anchor.normal);
        self.router.rotate.update_rotation(ctx.model.transform.rotation);
        self.router.scale.init(ctx.model);

        self.indicator.fit_model(ctx.model);
        self.indicator.place_on_wall(anchor.position, anchor.normal);
        self.router.enable();
        log::info!("Wall control initialized at {:?}, normal {:?}", anchor.position, anchor.normal);
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

        if let Some(normal) = self.router.translate.take_orientation_change() {
            self.router.rotate.set_axis(normal);
            self.router.rotate.update_rotation(ctx.model.transform.rotation);
        }

        let translate = &self.router.translate;
        self.indicator.place_on_wall(translate.wall_position(), translate.wall_normal());
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
