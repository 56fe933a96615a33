//! Integration tests for the AR session lifecycle

use approx::assert_relative_eq;
use glam::{Mat4, Quat, Vec3};
use pollster::block_on;
use void_ar::prelude::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Hit pose at `position` whose normal has vertical component `m5`
fn hit_with_up(position: Vec3, m5: f32) -> HitPose {
    let mut cols = Mat4::from_translation(position).to_cols_array();
    cols[5] = m5;
    HitPose::from_cols_array(&cols)
}

fn camera() -> XrCamera {
    let rotation = Quat::from_rotation_x(-45f32.to_radians());
    XrCamera::perspective(Vec3::new(0.0, 1.5, 0.0), rotation, 60f32.to_radians(), 1.0)
}

fn run_frame(session: &mut WebArSession<StubPlatform>, model: &mut ArModel, frame: &XrFrame, delta_ms: f32) {
    let camera = camera();
    let mut ctx = XrRenderContext::new(model, &camera, frame, ScreenSize::default(), delta_ms);
    session.on_frame(&mut ctx).unwrap();
}

#[test]
fn test_floor_session_flow() {
    init_logging();
    let mut session = WebArSession::new(StubPlatform::new(), ArConfig::default(), PlacementMode::Floor);
    let mut model = ArModel::default();
    let original = model.transform;

    assert!(block_on(session.is_available()));
    block_on(session.enter(&model)).unwrap();
    assert_eq!(session.state(), ArSessionState::Detecting);
    assert!(session.is_presenting());
    assert_eq!(session.platform().active_sources().len(), 2);

    // No hit yet, then a slanted surface: keep detecting.
    run_frame(&mut session, &mut model, &XrFrame::new(0.0), 16.0);
    assert_eq!(session.state(), ArSessionState::Detecting);

    let slanted = XrFrame::new(16.0).with_viewer_hit(hit_with_up(Vec3::new(0.0, 0.0, -1.5), 0.5));
    run_frame(&mut session, &mut model, &slanted, 16.0);
    assert_eq!(session.state(), ArSessionState::Detecting);
    assert_eq!(model.transform, original);

    // An unresolved result is skipped too.
    let mut unresolved = XrFrame::new(32.0);
    unresolved.viewer_hits.push(HitTestResult::unresolved());
    run_frame(&mut session, &mut model, &unresolved, 16.0);
    assert_eq!(session.state(), ArSessionState::Detecting);

    let floor = XrFrame::new(48.0).with_viewer_hit(hit_with_up(Vec3::new(0.2, 0.0, -1.5), 0.9));
    run_frame(&mut session, &mut model, &floor, 16.0);
    assert_eq!(session.state(), ArSessionState::Placed);
    assert_eq!(session.surface(), Some(SurfaceKind::Floor));
    assert_eq!(model.transform.position, Vec3::new(0.2, 0.0, -1.5));
    assert!(session.is_revealing());
    assert!(model.transform.scale.x < 0.5);

    // The reveal grows the model back to its own size.
    let reveal = session.config().reveal_duration_ms;
    run_frame(&mut session, &mut model, &XrFrame::new(64.0), reveal / 2.0);
    assert!(model.transform.scale.x > 0.0 && model.transform.scale.x < 1.0);
    run_frame(&mut session, &mut model, &XrFrame::new(80.0), reveal);
    assert!(!session.is_revealing());
    assert_relative_eq!(model.transform.scale.x, 1.0, epsilon = 1e-6);

    block_on(session.end(&mut model)).unwrap();
    assert_eq!(session.state(), ArSessionState::Ended);
    assert!(!session.is_presenting());
    assert!(session.platform().active_sources().is_empty());
    assert_eq!(session.platform().cancelled_sources().len(), 2);
    assert_eq!(session.platform().session_state(), SessionState::Ended);
    assert_eq!(model.transform, original);

    // Frames after the end are ignored.
    run_frame(&mut session, &mut model, &floor, 16.0);
    assert_eq!(model.transform, original);
}

#[test]
fn test_gestures_drive_the_placed_model() {
    init_logging();
    let mut session = WebArSession::new(StubPlatform::new(), ArConfig::default(), PlacementMode::Floor);
    let mut model = ArModel::default();
    block_on(session.enter(&model)).unwrap();

    let floor = XrFrame::new(0.0).with_viewer_hit(hit_with_up(Vec3::new(0.0, 0.0, -1.5), 1.0));
    run_frame(&mut session, &mut model, &floor, 16.0);
    run_frame(&mut session, &mut model, &XrFrame::new(16.0), 1000.0);

    let camera = camera();
    let pinch = |spread: f32| {
        XrFrame::new(0.0)
            .with_touch(TransientInput::new(-spread, 0.0), None)
            .with_touch(TransientInput::new(spread, 0.0), None)
    };

    let start = pinch(0.1);
    {
        let mut ctx = XrRenderContext::new(&mut model, &camera, &start, ScreenSize::default(), 16.0);
        session.on_event(XrEvent::SelectStart, &mut ctx).unwrap();
    }
    run_frame(&mut session, &mut model, &pinch(0.3), 16.0);
    run_frame(&mut session, &mut model, &pinch(0.5), 16.0);
    run_frame(&mut session, &mut model, &pinch(0.5), 1000.0);

    assert_relative_eq!(model.transform.scale.x, 1.4, epsilon = 1e-4);

    let mut ctx = XrRenderContext::new(&mut model, &camera, &start, ScreenSize::default(), 16.0);
    session.on_event(XrEvent::SelectEnd, &mut ctx).unwrap();
    match session.controller() {
        PlacementController::Floor(control) => assert_eq!(control.router().active_control(), None),
        other => panic!("unexpected controller {:?}", other.mode()),
    }
}

#[test]
fn test_platform_end_event_tears_down() {
    init_logging();
    let mut session = WebArSession::new(StubPlatform::new(), ArConfig::default(), PlacementMode::Hover);
    let mut model = ArModel::default();
    let original = model.transform;
    block_on(session.enter(&model)).unwrap();
    run_frame(&mut session, &mut model, &XrFrame::new(0.0), 16.0);
    assert_eq!(session.state(), ArSessionState::Placed);
    assert_ne!(model.transform, original);

    let camera = camera();
    let frame = XrFrame::new(16.0);
    let mut ctx = XrRenderContext::new(&mut model, &camera, &frame, ScreenSize::default(), 16.0);
    session.on_event(XrEvent::End, &mut ctx).unwrap();

    assert_eq!(session.state(), ArSessionState::Ended);
    assert!(session.platform().active_sources().is_empty());
    assert_eq!(model.transform, original);
    assert!(!session.controller().as_control().is_enabled());

    // A later explicit end is harmless.
    block_on(session.end(&mut model)).unwrap();
}

#[test]
fn test_hit_test_failure_ends_session() {
    init_logging();
    let platform = StubPlatform::new().with_hit_test_failure("no tracking");
    let mut session = WebArSession::new(platform, ArConfig::default(), PlacementMode::Floor);

    let err = block_on(session.enter(&ArModel::default())).unwrap_err();
    assert_eq!(err.code(), "xr-platform");
    assert_eq!(err, ArError::Xr(XrError::HitTestSourceFailed("no tracking".into())));
    assert_eq!(session.state(), ArSessionState::NotStarted);
    assert_eq!(session.platform().session_state(), SessionState::Ended);
}

#[test]
fn test_session_request_failure() {
    init_logging();
    let platform = StubPlatform::new().with_session_failure("denied");
    let mut session = WebArSession::new(platform, ArConfig::default(), PlacementMode::Floor);

    let err = block_on(session.enter(&ArModel::default())).unwrap_err();
    assert_eq!(err, ArError::Xr(XrError::SessionRequestFailed("denied".into())));
    assert!(!session.is_presenting());
}

#[test]
fn test_contract_violations() {
    init_logging();
    let mut session = WebArSession::new(StubPlatform::new(), ArConfig::default(), PlacementMode::Floor);
    let mut model = ArModel::default();

    let err = block_on(session.end(&mut model)).unwrap_err();
    assert_eq!(err.code(), "not-initialized");

    block_on(session.enter(&model)).unwrap();
    let err = block_on(session.enter(&model)).unwrap_err();
    assert_eq!(err.code(), "invalid-state");

    // Select events before placement are accepted and ignored.
    let camera = camera();
    let frame = XrFrame::new(0.0);
    let ctx = XrRenderContext::new(&mut model, &camera, &frame, ScreenSize::default(), 16.0);
    assert!(session.on_select_start(&ctx).is_ok());
    assert!(session.on_select_end().is_ok());
}

#[test]
fn test_reenter_after_end() {
    init_logging();
    let mut session = WebArSession::new(StubPlatform::new(), ArConfig::default(), PlacementMode::Floor);
    let mut model = ArModel::default();

    block_on(session.enter(&model)).unwrap();
    block_on(session.end(&mut model)).unwrap();
    block_on(session.enter(&model)).unwrap();

    assert_eq!(session.state(), ArSessionState::Detecting);
    assert_eq!(session.platform().active_sources().len(), 2);
}

#[test]
fn test_places_on_first_resolved_hit() {
    init_logging();
    let mut session = WebArSession::new(StubPlatform::new(), ArConfig::default(), PlacementMode::Floor);
    let mut model = ArModel::default();
    block_on(session.enter(&model)).unwrap();

    let mut frame = XrFrame::new(0.0);
    frame.viewer_hits.push(HitTestResult::unresolved());
    frame.viewer_hits.push(HitTestResult::new(hit_with_up(Vec3::new(0.4, 0.0, -1.2), 1.0)));
    run_frame(&mut session, &mut model, &frame, 16.0);

    assert_eq!(session.state(), ArSessionState::Placed);
    assert_eq!(model.transform.position, Vec3::new(0.4, 0.0, -1.2));
}

#[test]
fn test_pinch_during_reveal_is_kept() {
    init_logging();
    let mut session = WebArSession::new(StubPlatform::new(), ArConfig::default(), PlacementMode::Floor);
    let mut model = ArModel::default();
    block_on(session.enter(&model)).unwrap();

    let floor = XrFrame::new(0.0).with_viewer_hit(hit_with_up(Vec3::new(0.0, 0.0, -1.5), 1.0));
    run_frame(&mut session, &mut model, &floor, 16.0);

    let camera = camera();
    let pinch = |spread: f32| {
        XrFrame::new(0.0)
            .with_touch(TransientInput::new(-spread, 0.0), None)
            .with_touch(TransientInput::new(spread, 0.0), None)
    };

    let start = pinch(0.1);
    {
        let ctx = XrRenderContext::new(&mut model, &camera, &start, ScreenSize::default(), 16.0);
        session.on_select_start(&ctx).unwrap();
    }
    run_frame(&mut session, &mut model, &pinch(0.3), 16.0);
    run_frame(&mut session, &mut model, &pinch(0.5), 16.0);
    run_frame(&mut session, &mut model, &pinch(0.5), 200.0);

    // Still growing in, on top of the pinched size.
    assert!(session.is_revealing());
    assert!(model.transform.scale.x < 1.4);
    session.on_select_end().unwrap();

    run_frame(&mut session, &mut model, &XrFrame::new(16.0), 1000.0);
    assert!(!session.is_revealing());
    assert_relative_eq!(model.transform.scale.x, 1.4, epsilon = 1e-4);

    let PlacementController::Floor(control) = session.controller() else {
        panic!("floor session without a floor controller");
    };
    assert_relative_eq!(control.router().scale.scale_multiplier(), 1.4, epsilon = 1e-4);
}
