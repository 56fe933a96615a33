//! WebXR AR session lifecycle
//!
//! ```text
//! NotStarted ──enter()──► Detecting ──first accepted hit──► Placed ──end()──► Ended
//!                              └──────────────end() / platform end──────────────┘
//! ```
//!
//! Setup and teardown talk to the platform asynchronously. Everything that
//! happens per frame (`on_frame`, select events) is synchronous and works on
//! the borrowed [`XrRenderContext`].

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use void_math::{Easing, Transform};
use void_xr::{
    HitTestSourceId, ReferenceSpace, SessionInit, XrEvent, XrFeature, XrPlatform, TOUCH_INPUT_PROFILE,
};

use crate::config::ArConfig;
use crate::context::{ArModel, XrRenderContext};
use crate::error::{ArError, Result};
use crate::motion::{Motion, Range};
use crate::orchestrator::{ArFloorControl, ArHoverControl, ArWallControl, PlacementAnchor, PlacementControl};
use crate::placement::{classify_with, SurfaceKind};

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArSessionState {
    #[default]
    NotStarted,
    /// Running, waiting for an acceptable surface
    Detecting,
    /// Model placed, gestures routed to the orchestrator
    Placed,
    Ended,
}

/// Where the model goes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlacementMode {
    #[default]
    Floor,
    Wall,
    /// In front of the camera, no surface needed
    Hover,
}

/// The orchestrator for the session's placement mode
#[derive(Debug, Clone)]
pub enum PlacementController {
    Floor(ArFloorControl),
    Wall(ArWallControl),
    Hover(ArHoverControl),
}

impl PlacementController {
    pub fn new(mode: PlacementMode, config: &ArConfig) -> Self {
        match mode {
            PlacementMode::Floor => PlacementController::Floor(ArFloorControl::new(config)),
            PlacementMode::Wall => PlacementController::Wall(ArWallControl::new(config)),
            PlacementMode::Hover => PlacementController::Hover(ArHoverControl::new(config)),
        }
    }

    pub fn mode(&self) -> PlacementMode {
        match self {
            PlacementController::Floor(_) => PlacementMode::Floor,
            PlacementController::Wall(_) => PlacementMode::Wall,
            PlacementController::Hover(_) => PlacementMode::Hover,
        }
    }

    pub fn as_control(&self) -> &dyn PlacementControl {
        match self {
            PlacementController::Floor(control) => control,
            PlacementController::Wall(control) => control,
            PlacementController::Hover(control) => control,
        }
    }

    pub fn as_control_mut(&mut self) -> &mut dyn PlacementControl {
        match self {
            PlacementController::Floor(control) => control,
            PlacementController::Wall(control) => control,
            PlacementController::Hover(control) => control,
        }
    }
}

/// An immersive AR session placing one model
pub struct WebArSession<P: XrPlatform> {
    platform: P,
    config: ArConfig,
    state: ArSessionState,
    controller: PlacementController,
    viewer_source: Option<HitTestSourceId>,
    transient_source: Option<HitTestSourceId>,
    original_transform: Option<Transform>,
    placed_scale: Vec3,
    surface: Option<SurfaceKind>,
    reveal: Motion,
}

impl<P: XrPlatform> WebArSession<P> {
    pub fn new(platform: P, config: ArConfig, mode: PlacementMode) -> Self {
        let reveal = Motion::new(config.reveal_duration_ms)
            .with_range(Range::UNIT)
            .with_easing(Easing::EaseOutCubic);
        Self {
            controller: PlacementController::new(mode, &config),
            platform,
            config,
            state: ArSessionState::NotStarted,
            viewer_source: None,
            transient_source: None,
            original_transform: None,
            placed_scale: Vec3::ONE,
            surface: None,
            reveal,
        }
    }

    #[inline]
    pub fn state(&self) -> ArSessionState {
        self.state
    }

    #[inline]
    pub fn mode(&self) -> PlacementMode {
        self.controller.mode()
    }

    #[inline]
    pub fn config(&self) -> &ArConfig {
        &self.config
    }

    #[inline]
    pub fn platform(&self) -> &P {
        &self.platform
    }

    #[inline]
    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    #[inline]
    pub fn controller(&self) -> &PlacementController {
        &self.controller
    }

    #[inline]
    pub fn controller_mut(&mut self) -> &mut PlacementController {
        &mut self.controller
    }

    /// Surface the model was placed on; `None` before placement and in
    /// hover mode
    #[inline]
    pub fn surface(&self) -> Option<SurfaceKind> {
        self.surface
    }

    /// Whether the AR session owns the frame loop. Once this turns false
    /// after a session, the host resumes its default render loop.
    pub fn is_presenting(&self) -> bool {
        matches!(self.state, ArSessionState::Detecting | ArSessionState::Placed)
    }

    /// Whether the reveal animation after placement is still running
    pub fn is_revealing(&self) -> bool {
        self.reveal.is_activated()
    }

    pub async fn is_available(&self) -> bool {
        self.platform.is_session_supported().await
    }

    /// Start the session: probe, request the session, then the viewer and
    /// transient-input hit-test sources.
    ///
    /// If a hit-test source cannot be created the session is ended again
    /// before the error is returned.
    pub async fn enter(&mut self, model: &ArModel) -> Result<()> {
        if self.is_presenting() {
            return Err(ArError::InvalidState(format!("cannot enter while {:?}", self.state)));
        }
        if !self.is_available().await {
            log::warn!("AR session not supported on {}", self.platform.name());
            return Err(ArError::Unavailable);
        }

        let init = SessionInit::ar().with_optional(XrFeature::DomOverlay);
        self.platform.request_session(&init).await?;

        let viewer = match self.platform.request_hit_test_source(ReferenceSpace::Viewer).await {
            Ok(id) => id,
            Err(err) => {
                self.abort_setup(&[]).await;
                return Err(err.into());
            }
        };
        let transient = match self.platform.request_transient_hit_test_source(TOUCH_INPUT_PROFILE).await {
            Ok(id) => id,
            Err(err) => {
                self.abort_setup(&[viewer]).await;
                return Err(err.into());
            }
        };

        self.viewer_source = Some(viewer);
        self.transient_source = Some(transient);
        self.original_transform = Some(model.transform);
        self.controller = PlacementController::new(self.controller.mode(), &self.config);
        self.surface = None;
        self.reveal.reset(1.0);
        self.state = ArSessionState::Detecting;

        log::info!("AR session started on {} ({:?} placement)", self.platform.name(), self.mode());
        Ok(())
    }

    /// Per-frame step
    pub fn on_frame(&mut self, ctx: &mut XrRenderContext<'_>) -> Result<()> {
        match self.state {
            ArSessionState::NotStarted => Err(ArError::NotInitialized("on_frame")),
            ArSessionState::Ended => Ok(()),
            ArSessionState::Detecting => {
                self.detect(ctx);
                Ok(())
            }
            ArSessionState::Placed => {
                if !self.reveal.is_activated() {
                    self.controller.as_control_mut().update(ctx);
                    return Ok(());
                }

                // The reveal is a factor over whatever scale the controllers
                // settle on; they always see the unrevealed size.
                ctx.model.transform.scale = self.placed_scale;
                self.controller.as_control_mut().update(ctx);
                self.placed_scale = ctx.model.transform.scale;

                self.reveal.update(ctx.delta_ms);
                ctx.model.transform.scale = self.placed_scale * self.reveal.val();
                Ok(())
            }
        }
    }

    pub fn on_select_start(&mut self, ctx: &XrRenderContext<'_>) -> Result<()> {
        match self.state {
            ArSessionState::NotStarted => Err(ArError::NotInitialized("on_select_start")),
            ArSessionState::Placed => {
                self.controller.as_control_mut().on_select_start(ctx);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    pub fn on_select_end(&mut self) -> Result<()> {
        match self.state {
            ArSessionState::NotStarted => Err(ArError::NotInitialized("on_select_end")),
            ArSessionState::Placed => {
                self.controller.as_control_mut().on_select_end();
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Dispatch a platform event
    pub fn on_event(&mut self, event: XrEvent, ctx: &mut XrRenderContext<'_>) -> Result<()> {
        match event {
            XrEvent::SelectStart => self.on_select_start(ctx),
            XrEvent::SelectEnd => self.on_select_end(),
            XrEvent::End => {
                if self.state == ArSessionState::NotStarted {
                    return Err(ArError::NotInitialized("on_event"));
                }
                self.handle_platform_end(ctx.model);
                Ok(())
            }
        }
    }

    /// The platform ended the session on its own (user left AR). Tears
    /// everything down without waiting on the platform.
    pub fn handle_platform_end(&mut self, model: &mut ArModel) {
        if !self.is_presenting() {
            return;
        }
        self.teardown(model);
        log::info!("AR session ended by the platform");
    }

    /// End the session, restore the model and hand the frame loop back.
    pub async fn end(&mut self, model: &mut ArModel) -> Result<()> {
        match self.state {
            ArSessionState::NotStarted => return Err(ArError::NotInitialized("end")),
            ArSessionState::Ended => return Ok(()),
            _ => {}
        }

        self.teardown(model);
        match self.platform.end_session().await {
            Ok(()) | Err(void_xr::XrError::SessionEnded) => {
                log::info!("AR session ended");
                Ok(())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn detect(&mut self, ctx: &mut XrRenderContext<'_>) {
        let mode = self.mode();
        if mode == PlacementMode::Hover {
            let position = ctx.camera.position() + ctx.camera.forward() * self.config.hover_distance;
            self.place(ctx, PlacementAnchor::on_floor(position), None, None);
            return;
        }

        let Some(hit) = ctx.frame.viewer_hit_pose() else {
            return;
        };

        match (mode, classify_with(&hit, &self.config)) {
            (PlacementMode::Floor, Some(SurfaceKind::Floor)) => {
                self.place(ctx, PlacementAnchor::on_floor(hit.position()), None, Some(SurfaceKind::Floor));
            }
            (PlacementMode::Wall, Some(SurfaceKind::Wall)) => {
                let normal = hit.normal();
                let facing = Quat::from_rotation_arc(Vec3::Z, normal);
                let anchor = PlacementAnchor::new(hit.position(), normal);
                self.place(ctx, anchor, Some(facing), Some(SurfaceKind::Wall));
            }
            (_, surface) => {
                log::trace!("Hit with up component {:.2} ({:?}) skipped", hit.up_component(), surface);
            }
        }
    }

    fn place(
        &mut self,
        ctx: &mut XrRenderContext<'_>,
        anchor: PlacementAnchor,
        rotation: Option<Quat>,
        surface: Option<SurfaceKind>,
    ) {
        ctx.model.transform.position = anchor.position;
        if let Some(rotation) = rotation {
            ctx.model.transform.rotation = rotation;
        }

        // The orchestrator sees the full size; the reveal starts from zero.
        self.placed_scale = ctx.model.transform.scale;
        self.controller.as_control_mut().init(ctx, &anchor);

        self.reveal.reset(0.0);
        self.reveal.set_end_delta(1.0);
        ctx.model.transform.scale = self.placed_scale * self.reveal.val();

        self.surface = surface;
        self.state = ArSessionState::Placed;
        log::info!("Model placed at {:?} ({:?})", anchor.position, surface);
    }

    fn teardown(&mut self, model: &mut ArModel) {
        self.controller.as_control_mut().destroy();

        for source in [self.viewer_source.take(), self.transient_source.take()].into_iter().flatten() {
            self.platform.cancel_hit_test_source(source);
        }
        if let Some(original) = self.original_transform.take() {
            model.transform = original;
        }
        self.reveal.reset(1.0);
        self.state = ArSessionState::Ended;
    }

    async fn abort_setup(&mut self, sources: &[HitTestSourceId]) {
        for source in sources {
            self.platform.cancel_hit_test_source(*source);
        }
        if let Err(err) = self.platform.end_session().await {
            log::warn!("Ending session after failed setup: {}", err);
        }
        log::warn!("AR session setup failed on {}", self.platform.name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ScreenSize;
    use void_xr::{HitPose, StubPlatform, XrCamera, XrFrame};

    fn session(mode: PlacementMode) -> WebArSession<StubPlatform> {
        WebArSession::new(StubPlatform::new(), ArConfig::default(), mode)
    }

    #[test]
    fn test_frame_before_enter_is_rejected() {
        let mut session = session(PlacementMode::Floor);
        let mut model = ArModel::default();
        let camera = XrCamera::default();
        let frame = XrFrame::new(0.0);
        let mut ctx = XrRenderContext::new(&mut model, &camera, &frame, ScreenSize::default(), 16.0);

        let err = session.on_frame(&mut ctx).unwrap_err();
        assert_eq!(err.code(), "not-initialized");
        assert!(session.on_select_end().is_err());
    }

    #[test]
    fn test_unavailable_platform() {
        let mut session = WebArSession::new(StubPlatform::unsupported(), ArConfig::default(), PlacementMode::Floor);
        let err = pollster::block_on(session.enter(&ArModel::default())).unwrap_err();
        assert_eq!(err, ArError::Unavailable);
        assert_eq!(session.state(), ArSessionState::NotStarted);
    }

    #[test]
    fn test_wall_mode_ignores_floor_hits() {
        let mut session = session(PlacementMode::Wall);
        let mut model = ArModel::default();
        pollster::block_on(session.enter(&model)).unwrap();

        let camera = XrCamera::default();
        let floor = XrFrame::new(0.0).with_viewer_hit(HitPose::from_position_normal(Vec3::new(0.0, -1.0, -1.0), Vec3::Y));
        let mut ctx = XrRenderContext::new(&mut model, &camera, &floor, ScreenSize::default(), 16.0);
        session.on_frame(&mut ctx).unwrap();
        assert_eq!(session.state(), ArSessionState::Detecting);

        let wall = XrFrame::new(16.0).with_viewer_hit(HitPose::from_position_normal(Vec3::new(0.0, 0.0, -2.0), Vec3::Z));
        let mut ctx = XrRenderContext::new(&mut model, &camera, &wall, ScreenSize::default(), 16.0);
        session.on_frame(&mut ctx).unwrap();
        assert_eq!(session.state(), ArSessionState::Placed);
        assert_eq!(session.surface(), Some(SurfaceKind::Wall));

        let facing = model.transform.rotation * Vec3::Z;
        assert!(facing.abs_diff_eq(Vec3::Z, 1e-5));
    }

    #[test]
    fn test_hover_places_in_front_of_camera() {
        let mut session = session(PlacementMode::Hover);
        let mut model = ArModel::default();
        pollster::block_on(session.enter(&model)).unwrap();

        let camera = XrCamera::default();
        let frame = XrFrame::new(0.0);
        let mut ctx = XrRenderContext::new(&mut model, &camera, &frame, ScreenSize::default(), 16.0);
        session.on_frame(&mut ctx).unwrap();

        assert_eq!(session.state(), ArSessionState::Placed);
        assert_eq!(session.surface(), None);
        assert!(model.transform.position.abs_diff_eq(Vec3::new(0.0, 0.0, -1.0), 1e-5));
    }
}
