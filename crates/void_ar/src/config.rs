//! AR placement configuration

use serde::{Deserialize, Serialize};

use crate::error::{ArError, Result};

/// Tuning for gesture detection, controllers and placement.
///
/// Durations are in milliseconds, distances in reference-space meters,
/// deadzone size in aspect-corrected normalized device units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArConfig {
    /// Radius a touch must travel before a gesture is classified
    pub deadzone_size: f32,

    /// Multiplier on the swirl angle / hover rotation
    pub rotate_speed: f32,

    /// Smoothing time for rotation updates
    pub rotate_duration_ms: f32,

    /// Smoothing time for hover-mode translation
    pub translate_duration_ms: f32,

    /// Smallest allowed scale multiplier
    pub scale_min: f32,

    /// Largest allowed scale multiplier
    pub scale_max: f32,

    /// Multiplier on pinch distance change
    pub scale_speed: f32,

    /// Smoothing time for scale updates
    pub scale_duration_ms: f32,

    /// How far the model lifts off the surface while dragged
    pub hover_height: f32,

    /// Amplitude of the bobbing motion while dragged
    pub hover_amplitude: f32,

    /// Period of the bobbing motion
    pub hover_period_ms: f32,

    /// Duration of the lift when a drag starts
    pub lift_duration_ms: f32,

    /// Duration of the bounce back onto the surface after a drag
    pub bounce_duration_ms: f32,

    /// Minimum normal Y component for a hit to count as floor
    pub floor_threshold: f32,

    /// Maximum absolute normal Y component for a hit to count as wall
    pub wall_threshold: f32,

    /// Minimum floor height change before the drag plane moves
    pub plane_hysteresis: f32,

    /// Minimum wall normal change (degrees) before the drag plane turns
    pub wall_angle_threshold_deg: f32,

    /// Farthest fallback drag-plane intersection that is still accepted
    pub max_drag_distance: f32,

    /// Distance in front of the camera for hover placement
    pub hover_distance: f32,

    /// Duration of the scale-up reveal after first placement
    pub reveal_duration_ms: f32,

    /// Fade time of the floor indicator and scale readout
    pub indicator_fade_ms: f32,
}

impl Default for ArConfig {
    fn default() -> Self {
        Self {
            deadzone_size: 0.1,
            rotate_speed: 1.0,
            rotate_duration_ms: 100.0,
            translate_duration_ms: 100.0,
            scale_min: 0.05,
            scale_max: 5.0,
            scale_speed: 1.0,
            scale_duration_ms: 100.0,
            hover_height: 0.1,
            hover_amplitude: 0.01,
            hover_period_ms: 1000.0,
            lift_duration_ms: 200.0,
            bounce_duration_ms: 1000.0,
            floor_threshold: 0.75,
            wall_threshold: 0.25,
            plane_hysteresis: 0.1,
            wall_angle_threshold_deg: 10.0,
            max_drag_distance: 10.0,
            hover_distance: 1.0,
            reveal_duration_ms: 500.0,
            indicator_fade_ms: 300.0,
        }
    }
}

impl ArConfig {
    /// Parse a JSON configuration; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ArError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty JSON
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ArError::InvalidConfig(e.to_string()))
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.deadzone_size < 0.0 {
            return Err(ArError::InvalidConfig("deadzone_size must not be negative".into()));
        }
        if self.scale_min <= 0.0 || self.scale_min > self.scale_max {
            return Err(ArError::InvalidConfig(format!(
                "scale range {}..{} is invalid",
                self.scale_min, self.scale_max
            )));
        }
        if !(0.0..=1.0).contains(&self.floor_threshold) || !(0.0..=1.0).contains(&self.wall_threshold) {
            return Err(ArError::InvalidConfig("surface thresholds must lie in 0..=1".into()));
        }
        if self.wall_threshold >= self.floor_threshold {
            return Err(ArError::InvalidConfig(
                "wall_threshold must be below floor_threshold".into(),
            ));
        }

        let durations = [
            ("rotate_duration_ms", self.rotate_duration_ms),
            ("translate_duration_ms", self.translate_duration_ms),
            ("scale_duration_ms", self.scale_duration_ms),
            ("hover_period_ms", self.hover_period_ms),
            ("lift_duration_ms", self.lift_duration_ms),
            ("bounce_duration_ms", self.bounce_duration_ms),
            ("reveal_duration_ms", self.reveal_duration_ms),
            ("indicator_fade_ms", self.indicator_fade_ms),
        ];
        if let Some((name, _)) = durations.iter().find(|(_, value)| *value <= 0.0) {
            return Err(ArError::InvalidConfig(format!("{} must be positive", name)));
        }
        Ok(())
    }

    /// Set the deadzone radius
    pub fn with_deadzone_size(mut self, size: f32) -> Self {
        self.deadzone_size = size;
        self
    }

    /// Set the scale multiplier range
    pub fn with_scale_range(mut self, min: f32, max: f32) -> Self {
        self.scale_min = min;
        self.scale_max = max;
        self
    }

    /// Set the rotation speed multiplier
    pub fn with_rotate_speed(mut self, speed: f32) -> Self {
        self.rotate_speed = speed;
        self
    }

    /// Set the pinch speed multiplier
    pub fn with_scale_speed(mut self, speed: f32) -> Self {
        self.scale_speed = speed;
        self
    }
}
