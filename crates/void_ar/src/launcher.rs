//! Choosing how to present AR on the current device
//!
//! Backends are tried in priority order. WebXR keeps the model in the page;
//! Scene Viewer (Android) and Quick Look (iOS) hand the model file to a
//! system viewer through a URL.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use url::{form_urlencoded, Url};

use crate::error::{ArError, Result};

const SCENE_VIEWER_HOST_PATH: &str = "arvr.google.com/scene-viewer/1.0";
const SCENE_VIEWER_PACKAGE: &str = "com.google.android.googlequicksearchbox";

/// An AR presentation backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArBackendKind {
    WebXr,
    SceneViewer,
    QuickLook,
}

impl ArBackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArBackendKind::WebXr => "webxr",
            ArBackendKind::SceneViewer => "scene-viewer",
            ArBackendKind::QuickLook => "quick-look",
        }
    }
}

impl FromStr for ArBackendKind {
    type Err = ArError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "webxr" => Ok(ArBackendKind::WebXr),
            "scene-viewer" => Ok(ArBackendKind::SceneViewer),
            "quick-look" => Ok(ArBackendKind::QuickLook),
            other => Err(ArError::InvalidConfig(format!("unknown AR mode '{}'", other))),
        }
    }
}

/// What the device can do
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceCapabilities {
    /// Immersive AR sessions with hit testing
    pub webxr_ar: bool,
    /// Android with Scene Viewer installed
    pub scene_viewer: bool,
    /// iOS Safari with AR Quick Look
    pub quick_look: bool,
}

impl DeviceCapabilities {
    pub fn supports(&self, kind: ArBackendKind) -> bool {
        match kind {
            ArBackendKind::WebXr => self.webxr_ar,
            ArBackendKind::SceneViewer => self.scene_viewer,
            ArBackendKind::QuickLook => self.quick_look,
        }
    }
}

/// The model to show and how
#[derive(Debug, Clone, PartialEq)]
pub struct ArLaunchRequest {
    /// glTF/GLB model, absolute or relative to `page_url`
    pub model_url: String,
    /// USDZ model for Quick Look
    pub ios_url: Option<String>,
    /// Page the viewer lives on; base for relative URLs and the
    /// Scene Viewer browser fallback
    pub page_url: Option<Url>,
    pub title: Option<String>,
    /// Allow the system viewer to rescale the model
    pub resizable: bool,
}

impl ArLaunchRequest {
    pub fn new(model_url: impl Into<String>) -> Self {
        Self {
            model_url: model_url.into(),
            ios_url: None,
            page_url: None,
            title: None,
            resizable: true,
        }
    }

    pub fn with_ios_url(mut self, url: impl Into<String>) -> Self {
        self.ios_url = Some(url.into());
        self
    }

    pub fn with_page_url(mut self, url: Url) -> Self {
        self.page_url = Some(url);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    fn resolve(&self, url: &str) -> Result<Url> {
        match &self.page_url {
            Some(base) => Ok(base.join(url)?),
            None => Ok(Url::parse(url)?),
        }
    }
}

/// What the host should do to present AR
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchAction {
    /// Start an in-page WebXR session
    StartWebXr,
    /// Navigate to an Android intent URL
    OpenIntent(Url),
    /// Open a USDZ anchor with `rel="ar"`
    OpenQuickLook(Url),
}

impl LaunchAction {
    pub fn backend(&self) -> ArBackendKind {
        match self {
            LaunchAction::StartWebXr => ArBackendKind::WebXr,
            LaunchAction::OpenIntent(_) => ArBackendKind::SceneViewer,
            LaunchAction::OpenQuickLook(_) => ArBackendKind::QuickLook,
        }
    }
}

/// Picks the first usable backend from a priority list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArLauncher {
    priority: Vec<ArBackendKind>,
}

impl ArLauncher {
    pub fn new(priority: Vec<ArBackendKind>) -> Self {
        Self { priority }
    }

    /// Parse a space-separated mode list such as `"webxr scene-viewer"`
    pub fn from_modes(modes: &str) -> Result<Self> {
        let priority = modes
            .split_whitespace()
            .map(ArBackendKind::from_str)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(priority))
    }

    pub fn priority(&self) -> &[ArBackendKind] {
        &self.priority
    }

    /// First backend the device supports that can serve the request.
    /// Backends that fail to build a launch URL are skipped.
    pub fn resolve(&self, caps: &DeviceCapabilities, request: &ArLaunchRequest) -> Result<LaunchAction> {
        for kind in &self.priority {
            if !caps.supports(*kind) {
                continue;
            }
            let action = match kind {
                ArBackendKind::WebXr => Ok(LaunchAction::StartWebXr),
                ArBackendKind::SceneViewer => scene_viewer_intent(request).map(LaunchAction::OpenIntent),
                ArBackendKind::QuickLook => quick_look_url(request).map(LaunchAction::OpenQuickLook),
            };
            match action {
                Ok(action) => {
                    log::info!("AR launch via {}", kind.as_str());
                    return Ok(action);
                }
                Err(err) => log::warn!("AR backend {} unusable: {}", kind.as_str(), err),
            }
        }
        Err(ArError::NoBackendAvailable)
    }
}

impl Default for ArLauncher {
    fn default() -> Self {
        Self::new(vec![
            ArBackendKind::WebXr,
            ArBackendKind::SceneViewer,
            ArBackendKind::QuickLook,
        ])
    }
}

/// Android intent URL opening the model in Scene Viewer
pub fn scene_viewer_intent(request: &ArLaunchRequest) -> Result<Url> {
    let model = request.resolve(&request.model_url)?;

    let mut query = form_urlencoded::Serializer::new(String::new());
    query.append_pair("file", model.as_str());
    query.append_pair("mode", "ar_preferred");
    if let Some(title) = &request.title {
        query.append_pair("title", title);
    }
    if !request.resizable {
        query.append_pair("resizable", "false");
    }
    let query = query.finish();

    let mut intent = format!(
        "intent://{}?{}#Intent;scheme=https;package={};action=android.intent.action.VIEW;",
        SCENE_VIEWER_HOST_PATH, query, SCENE_VIEWER_PACKAGE
    );
    if let Some(page) = &request.page_url {
        let mut fallback = page.clone();
        fallback.set_fragment(None);
        let encoded: String = form_urlencoded::byte_serialize(fallback.as_str().as_bytes()).collect();
        intent.push_str("S.browser_fallback_url=");
        intent.push_str(&encoded);
        intent.push(';');
    }
    intent.push_str("end;");

    Ok(Url::parse(&intent)?)
}

/// USDZ URL for an AR Quick Look anchor
pub fn quick_look_url(request: &ArLaunchRequest) -> Result<Url> {
    let Some(ios_url) = &request.ios_url else {
        return Err(ArError::InvalidState("no USDZ model for Quick Look".into()));
    };
    let mut url = request.resolve(ios_url)?;
    if !request.resizable {
        url.set_fragment(Some("allowsContentScaling=0"));
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Url {
        Url::parse("https://example.com/shop/chair.html#reviews").unwrap()
    }

    #[test]
    fn test_webxr_wins_when_supported() {
        let caps = DeviceCapabilities {
            webxr_ar: true,
            scene_viewer: true,
            quick_look: false,
        };
        let action = ArLauncher::default().resolve(&caps, &ArLaunchRequest::new("https://example.com/a.glb")).unwrap();
        assert_eq!(action, LaunchAction::StartWebXr);
    }

    #[test]
    fn test_scene_viewer_intent_format() {
        let request = ArLaunchRequest::new("models/chair.glb")
            .with_page_url(page())
            .with_title("Chair")
            .with_resizable(false);
        let url = scene_viewer_intent(&request).unwrap();
        let text = url.as_str();

        assert!(text.starts_with("intent://arvr.google.com/scene-viewer/1.0?"));
        assert!(text.contains("file=https%3A%2F%2Fexample.com%2Fshop%2Fmodels%2Fchair.glb"));
        assert!(text.contains("mode=ar_preferred"));
        assert!(text.contains("title=Chair"));
        assert!(text.contains("resizable=false"));
        assert!(text.contains("package=com.google.android.googlequicksearchbox"));
        assert!(text.contains("S.browser_fallback_url=https%3A%2F%2Fexample.com%2Fshop%2Fchair.html;"));
        assert!(text.ends_with("end;"));
    }

    #[test]
    fn test_quick_look_fragment() {
        let request = ArLaunchRequest::new("chair.glb")
            .with_ios_url("chair.usdz")
            .with_page_url(page())
            .with_resizable(false);
        let url = quick_look_url(&request).unwrap();
        assert_eq!(url.as_str(), "https://example.com/shop/chair.usdz#allowsContentScaling=0");
    }

    #[test]
    fn test_falls_through_to_next_backend() {
        let caps = DeviceCapabilities {
            webxr_ar: false,
            scene_viewer: true,
            quick_look: true,
        };
        // No base URL: the relative GLB cannot be resolved for Scene Viewer.
        let request = ArLaunchRequest::new("chair.glb").with_ios_url("https://example.com/chair.usdz");
        let action = ArLauncher::default().resolve(&caps, &request).unwrap();
        assert_eq!(action.backend(), ArBackendKind::QuickLook);
    }

    #[test]
    fn test_no_backend() {
        let request = ArLaunchRequest::new("https://example.com/a.glb");
        let err = ArLauncher::default()
            .resolve(&DeviceCapabilities::default(), &request)
            .unwrap_err();
        assert_eq!(err, ArError::NoBackendAvailable);
    }

    #[test]
    fn test_modes_parse() {
        let launcher = ArLauncher::from_modes("quick-look  webxr").unwrap();
        assert_eq!(launcher.priority(), &[ArBackendKind::QuickLook, ArBackendKind::WebXr]);
        assert!(ArLauncher::from_modes("webxr magic").is_err());
    }
}
