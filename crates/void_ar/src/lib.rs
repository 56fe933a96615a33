//! # void_ar - AR Placement and Gesture Disambiguation
//!
//! Places a 3D model on a detected floor or wall (or hovering in front of
//! the camera) and turns a continuous multi-touch stream into one of
//! several mutually exclusive manipulations.
//!
//! ## Architecture
//!
//! ```text
//! XrFrame ─► transient input coords ─► DeadzoneChecker ─► one ArControl ─► Motion ─► model transform
//! ```
//!
//! - [`Motion`]: time-driven scalar interpolation behind every animation
//! - [`DeadzoneChecker`]: waits for movement past a radius, then locks in
//!   exactly one [`Gesture`]
//! - [`control`]: swirl / rotate, translate and scale controllers
//! - [`orchestrator`]: per-mode routing of gestures to controllers
//! - [`WebArSession`]: session setup, surface detection, first placement
//! - [`ArLauncher`]: WebXR / Scene Viewer / Quick Look selection
//!
//! ## Example
//!
//! ```ignore
//! use void_ar::prelude::*;
//!
//! let mut session = WebArSession::new(StubPlatform::new(), ArConfig::default(), PlacementMode::Floor);
//! session.enter(&model).await?;
//!
//! // every XR frame
//! let mut ctx = XrRenderContext::new(&mut model, &camera, &frame, size, delta_ms);
//! session.on_frame(&mut ctx)?;
//! ```

pub mod config;
pub mod context;
pub mod control;
pub mod deadzone;
pub mod error;
pub mod gesture;
pub mod indicator;
pub mod launcher;
pub mod motion;
pub mod orchestrator;
pub mod placement;
pub mod pose;
pub mod session;

pub use config::ArConfig;
pub use context::{ArModel, ControlInput, ScreenSize, XrRenderContext};
pub use control::ArControl;
pub use deadzone::{DeadzoneChecker, DeadzoneState};
pub use error::{ArError, Result};
pub use gesture::Gesture;
pub use indicator::{FloorIndicator, ScaleIndicator};
pub use launcher::{ArBackendKind, ArLaunchRequest, ArLauncher, DeviceCapabilities, LaunchAction};
pub use motion::{Motion, Range};
pub use orchestrator::{ArFloorControl, ArHoverControl, ArWallControl, PlacementAnchor, PlacementControl};
pub use placement::SurfaceKind;
pub use pose::{Pose, PoseAnimation};
pub use session::{ArSessionState, PlacementController, PlacementMode, WebArSession};

/// Prelude - commonly used types
pub mod prelude {
    pub use crate::control::{
        ArControl, FloorTranslateControl, HoverRotateControl, HoverTranslateControl, ScaleControl,
        SwirlControl, WallTranslateControl,
    };
    pub use crate::orchestrator::{ControlKind, GestureRoute, GestureRouter};
    pub use crate::{
        ArConfig, ArError, ArFloorControl, ArHoverControl, ArLauncher, ArModel, ArSessionState,
        ArWallControl, DeadzoneChecker, Gesture, Motion, PlacementAnchor, PlacementControl,
        PlacementController, PlacementMode, ScreenSize, SurfaceKind, WebArSession, XrRenderContext,
    };
    pub use void_xr::prelude::*;
}
