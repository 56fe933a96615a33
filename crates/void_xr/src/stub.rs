//! Stub platform for desktop development and tests
//!
//! Resolves every request immediately. Failures can be scripted to
//! exercise the fallback paths of session setup.

use std::collections::BTreeSet;

use crate::{
    HitTestSourceId, ReferenceSpace, Result, SessionInit, SessionState, XrError, XrPlatform,
};

/// Stub XR platform
#[derive(Debug, Clone)]
pub struct StubPlatform {
    supported: bool,
    session_failure: Option<String>,
    hit_test_failure: Option<String>,
    state: SessionState,
    next_source: u32,
    active_sources: BTreeSet<HitTestSourceId>,
    cancelled_sources: Vec<HitTestSourceId>,
}

impl StubPlatform {
    /// Create a stub that supports immersive AR
    pub fn new() -> Self {
        Self {
            supported: true,
            session_failure: None,
            hit_test_failure: None,
            state: SessionState::Idle,
            next_source: 1,
            active_sources: BTreeSet::new(),
            cancelled_sources: Vec::new(),
        }
    }

    /// A platform without immersive AR
    pub fn unsupported() -> Self {
        Self {
            supported: false,
            ..Self::new()
        }
    }

    /// Reject session requests with the given reason
    pub fn with_session_failure(mut self, reason: impl Into<String>) -> Self {
        self.session_failure = Some(reason.into());
        self
    }

    /// Reject hit-test source requests with the given reason
    pub fn with_hit_test_failure(mut self, reason: impl Into<String>) -> Self {
        self.hit_test_failure = Some(reason.into());
        self
    }

    /// Hit-test sources that were requested and not cancelled
    pub fn active_sources(&self) -> &BTreeSet<HitTestSourceId> {
        &self.active_sources
    }

    /// Hit-test sources cancelled so far, in cancellation order
    pub fn cancelled_sources(&self) -> &[HitTestSourceId] {
        &self.cancelled_sources
    }

    fn allocate_source(&mut self) -> Result<HitTestSourceId> {
        if self.state != SessionState::Running {
            return Err(XrError::NoSession);
        }
        if let Some(reason) = &self.hit_test_failure {
            return Err(XrError::HitTestSourceFailed(reason.clone()));
        }
        let id = HitTestSourceId(self.next_source);
        self.next_source += 1;
        self.active_sources.insert(id);
        Ok(id)
    }
}

impl Default for StubPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl XrPlatform for StubPlatform {
    fn name(&self) -> &str {
        "stub"
    }

    async fn is_session_supported(&self) -> bool {
        self.supported
    }

    async fn request_session(&mut self, init: &SessionInit) -> Result<()> {
        if !self.supported {
            return Err(XrError::NotSupported("immersive-ar".into()));
        }
        if let Some(reason) = &self.session_failure {
            return Err(XrError::SessionRequestFailed(reason.clone()));
        }
        log::debug!(
            "Stub session started with features {:?}",
            init.required_features
        );
        self.state = SessionState::Running;
        Ok(())
    }

    async fn request_hit_test_source(&mut self, _space: ReferenceSpace) -> Result<HitTestSourceId> {
        self.allocate_source()
    }

    async fn request_transient_hit_test_source(&mut self, _profile: &str) -> Result<HitTestSourceId> {
        self.allocate_source()
    }

    fn cancel_hit_test_source(&mut self, id: HitTestSourceId) {
        if self.active_sources.remove(&id) {
            self.cancelled_sources.push(id);
        }
    }

    async fn end_session(&mut self) -> Result<()> {
        match self.state {
            SessionState::Running => {
                self.state = SessionState::Ended;
                Ok(())
            }
            SessionState::Ended => Err(XrError::SessionEnded),
            SessionState::Idle => Err(XrError::NoSession),
        }
    }

    fn session_state(&self) -> SessionState {
        self.state
    }
}
