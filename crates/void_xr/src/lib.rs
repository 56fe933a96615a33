//! # void_xr - AR Platform Layer
//!
//! The narrow slice of an immersive-AR platform (WebXR in the browser) that
//! placement and gesture handling depend on:
//! - Session availability probe and session request
//! - Viewer and transient-input hit-test sources
//! - Per-frame snapshots of hit-test results and touch inputs
//! - The XR camera used for rays and screen projection
//!
//! ## Architecture
//!
//! Setup and teardown are asynchronous ([`XrPlatform`]); everything that
//! happens per frame is a plain value ([`XrFrame`], [`XrCamera`]) handed to
//! synchronous code, so the frame loop never waits on the platform.
//!
//! ## Example
//!
//! ```ignore
//! use void_xr::prelude::*;
//!
//! let mut platform = StubPlatform::new();
//! if platform.is_session_supported().await {
//!     platform.request_session(&SessionInit::ar()).await?;
//!     let source = platform.request_hit_test_source(ReferenceSpace::Viewer).await?;
//!     // ... per-frame work with XrFrame snapshots ...
//!     platform.cancel_hit_test_source(source);
//!     platform.end_session().await?;
//! }
//! ```

pub mod camera;
pub mod error;
pub mod frame;
pub mod stub;

pub use camera::XrCamera;
pub use error::{Result, XrError};
pub use frame::{HitPose, HitTestResult, TransientHitTestResult, TransientInput, XrFrame};
pub use stub::StubPlatform;

use glam::{Mat4, Quat, Vec3};

/// Pose (position + orientation)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }
}

impl Pose {
    /// Create a new pose
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        Self { position, orientation }
    }

    /// Convert to transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation, self.position)
    }

    /// Interpolate between two poses
    pub fn lerp(&self, other: &Pose, t: f32) -> Pose {
        Pose {
            position: self.position.lerp(other.position, t),
            orientation: self.orientation.slerp(other.orientation, t),
        }
    }
}

/// Tracking space reference
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ReferenceSpace {
    /// Head-relative, used for screen-center hit testing
    Viewer,
    /// Local, origin near the viewer at session start
    #[default]
    Local,
    /// Local with the origin on the floor
    LocalFloor,
}

/// XR session state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    /// No session requested
    #[default]
    Idle,
    /// Session is running
    Running,
    /// Session has ended
    Ended,
}

/// Optional or required session features
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum XrFeature {
    HitTest,
    DomOverlay,
    LightEstimation,
    Anchors,
}

impl XrFeature {
    /// WebXR feature descriptor
    pub fn descriptor(&self) -> &'static str {
        match self {
            XrFeature::HitTest => "hit-test",
            XrFeature::DomOverlay => "dom-overlay",
            XrFeature::LightEstimation => "light-estimation",
            XrFeature::Anchors => "anchors",
        }
    }
}

/// Session request parameters
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionInit {
    pub required_features: Vec<XrFeature>,
    pub optional_features: Vec<XrFeature>,
}

impl SessionInit {
    /// Immersive AR with hit testing required
    pub fn ar() -> Self {
        Self {
            required_features: vec![XrFeature::HitTest],
            optional_features: Vec::new(),
        }
    }

    /// Add an optional feature (builder pattern)
    pub fn with_optional(mut self, feature: XrFeature) -> Self {
        if !self.optional_features.contains(&feature) {
            self.optional_features.push(feature);
        }
        self
    }
}

/// Handle to a hit-test subscription
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HitTestSourceId(pub u32);

/// Input profile used for transient touch hit testing
pub const TOUCH_INPUT_PROFILE: &str = "generic-touchscreen";

/// Session events delivered between frames
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum XrEvent {
    /// A touch began
    SelectStart,
    /// All touches lifted
    SelectEnd,
    /// The session ended (user or platform)
    End,
}

/// XR platform trait
///
/// Only one-shot setup and teardown are asynchronous; per-frame data comes
/// in as [`XrFrame`] snapshots.
#[allow(async_fn_in_trait)]
pub trait XrPlatform {
    /// Get platform name
    fn name(&self) -> &str;

    /// Whether an immersive AR session with hit testing can be requested
    async fn is_session_supported(&self) -> bool;

    /// Request an immersive AR session
    async fn request_session(&mut self, init: &SessionInit) -> Result<()>;

    /// Subscribe to hit-test results for a ray from the given space
    async fn request_hit_test_source(&mut self, space: ReferenceSpace) -> Result<HitTestSourceId>;

    /// Subscribe to hit-test results for transient inputs of a profile
    async fn request_transient_hit_test_source(&mut self, profile: &str) -> Result<HitTestSourceId>;

    /// Cancel a hit-test subscription
    fn cancel_hit_test_source(&mut self, id: HitTestSourceId);

    /// End the running session
    async fn end_session(&mut self) -> Result<()>;

    /// Current session state
    fn session_state(&self) -> SessionState;
}

/// Prelude - commonly used types
pub mod prelude {
    pub use crate::{
        HitPose, HitTestResult, HitTestSourceId, Pose, ReferenceSpace, SessionInit,
        SessionState, StubPlatform, TransientHitTestResult, TransientInput, XrCamera,
        XrError, XrEvent, XrFeature, XrFrame, XrPlatform, TOUCH_INPUT_PROFILE,
    };
}
