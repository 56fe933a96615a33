//! Deadzone gesture classification
//!
//! Buffers the first touch of an input session and waits until the touch
//! travels farther than the deadzone radius. The first qualifying movement
//! is classified into exactly one requested gesture, and that result is
//! frozen until [`DeadzoneChecker::cleanup`].

use glam::Vec2;

use crate::context::aspect_corrected;
use crate::gesture::Gesture;

/// Default deadzone radius in aspect-corrected device units
pub const DEFAULT_DEADZONE_SIZE: f32 = 0.1;

/// Checker state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeadzoneState {
    /// No input session armed
    #[default]
    Waiting,
    /// Armed, movement still inside the radius
    InDeadzone,
    /// Gesture classified and frozen
    OutOfDeadzone,
}

/// Gesture classifier with a circular deadzone
#[derive(Debug, Clone)]
pub struct DeadzoneChecker {
    size: f32,
    aspect: f32,
    state: DeadzoneState,
    testing_gestures: Gesture,
    detected_gesture: Gesture,
    last_finger_count: usize,
    prev_one_finger_pos: Vec2,
    prev_two_finger_pos: Vec2,
    initial_two_finger_distance: f32,
}

impl DeadzoneChecker {
    pub fn new(size: f32) -> Self {
        Self {
            size,
            aspect: 1.0,
            state: DeadzoneState::Waiting,
            testing_gestures: Gesture::NONE,
            detected_gesture: Gesture::NONE,
            last_finger_count: 0,
            prev_one_finger_pos: Vec2::ZERO,
            prev_two_finger_pos: Vec2::ZERO,
            initial_two_finger_distance: 0.0,
        }
    }

    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn set_size(&mut self, size: f32) {
        self.size = size;
    }

    /// Screen aspect ratio (width / height) used to make the radius circular
    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    #[inline]
    pub fn state(&self) -> DeadzoneState {
        self.state
    }

    #[inline]
    pub fn in_deadzone(&self) -> bool {
        self.state == DeadzoneState::InDeadzone
    }

    #[inline]
    pub fn testing_gestures(&self) -> Gesture {
        self.testing_gestures
    }

    #[inline]
    pub fn detected_gesture(&self) -> Gesture {
        self.detected_gesture
    }

    /// Accept `gestures` as classification candidates
    pub fn add_testing_gestures(&mut self, gestures: Gesture) {
        self.testing_gestures |= gestures;
    }

    /// Arm the baseline for the given touch points
    pub fn set_first_input(&mut self, points: &[Vec2]) {
        let corrected = self.apply_screen_aspect(points);
        self.arm(&corrected);
    }

    /// Classify the current touch points.
    ///
    /// Returns `Gesture::NONE` while the movement stays inside the radius,
    /// when the finger count changed since the last call (the baseline is
    /// re-armed), or when no requested gesture matched.
    pub fn check(&mut self, points: &[Vec2]) -> Gesture {
        match self.state {
            DeadzoneState::Waiting => return Gesture::NONE,
            DeadzoneState::OutOfDeadzone => return self.detected_gesture,
            DeadzoneState::InDeadzone => {}
        }

        let points = self.apply_screen_aspect(points);

        if points.len() != self.last_finger_count {
            self.arm(&points);
            return Gesture::NONE;
        }

        let testing = self.testing_gestures;
        match points.len() {
            1 => {
                let diff = points[0] - self.prev_one_finger_pos;
                if diff.length() > self.size {
                    let candidate = if diff.x.abs() > diff.y.abs() {
                        Gesture::ONE_FINGER_HORIZONTAL
                    } else {
                        Gesture::ONE_FINGER_VERTICAL
                    };
                    if testing.intersects(candidate) {
                        self.detected_gesture = candidate;
                    }
                }
            }
            n if n >= 2 => {
                let middle = (points[0] + points[1]) * 0.5;
                let diff = middle - self.prev_two_finger_pos;
                if diff.length() > self.size {
                    let candidate = if diff.x.abs() > diff.y.abs() {
                        Gesture::TWO_FINGER_HORIZONTAL
                    } else {
                        Gesture::TWO_FINGER_VERTICAL
                    };
                    if testing.intersects(candidate) {
                        self.detected_gesture = candidate;
                    }
                }

                // Pinch is checked independently; when both fire it wins.
                let distance = points[0].distance(points[1]);
                if (distance - self.initial_two_finger_distance).abs() > self.size
                    && testing.intersects(Gesture::PINCH)
                {
                    self.detected_gesture = Gesture::PINCH;
                }
            }
            _ => {}
        }

        if !self.detected_gesture.is_none() {
            log::debug!("Gesture classified: {:?}", self.detected_gesture);
            self.state = DeadzoneState::OutOfDeadzone;
        }
        self.detected_gesture
    }

    /// Reset for the next input session
    pub fn cleanup(&mut self) {
        self.state = DeadzoneState::Waiting;
        self.testing_gestures = Gesture::NONE;
        self.detected_gesture = Gesture::NONE;
        self.last_finger_count = 0;
        self.prev_one_finger_pos = Vec2::ZERO;
        self.prev_two_finger_pos = Vec2::ZERO;
        self.initial_two_finger_distance = 0.0;
    }

    fn arm(&mut self, points: &[Vec2]) {
        self.last_finger_count = points.len();
        if let Some(first) = points.first() {
            self.prev_one_finger_pos = *first;
        }
        if points.len() >= 2 {
            self.prev_two_finger_pos = (points[0] + points[1]) * 0.5;
            self.initial_two_finger_distance = points[0].distance(points[1]);
        }
        self.state = DeadzoneState::InDeadzone;
    }

    fn apply_screen_aspect(&self, points: &[Vec2]) -> Vec<Vec2> {
        points.iter().map(|p| aspect_corrected(*p, self.aspect)).collect()
    }
}

impl Default for DeadzoneChecker {
    fn default() -> Self {
        Self::new(DEFAULT_DEADZONE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn armed(gestures: Gesture, points: &[Vec2]) -> DeadzoneChecker {
        let mut checker = DeadzoneChecker::default();
        checker.add_testing_gestures(gestures);
        checker.set_first_input(points);
        checker
    }

    #[test]
    fn test_waiting_returns_none() {
        let mut checker = DeadzoneChecker::default();
        checker.add_testing_gestures(Gesture::ONE_FINGER);
        assert_eq!(checker.check(&[Vec2::new(0.9, 0.0)]), Gesture::NONE);
        assert_eq!(checker.state(), DeadzoneState::Waiting);
    }

    #[test]
    fn test_small_movement_stays_in_deadzone() {
        let mut checker = armed(Gesture::ONE_FINGER, &[Vec2::ZERO]);
        assert_eq!(checker.check(&[Vec2::new(0.05, 0.05)]), Gesture::NONE);
        assert!(checker.in_deadzone());
    }

    #[test]
    fn test_one_finger_horizontal_and_vertical() {
        let mut checker = armed(Gesture::ONE_FINGER, &[Vec2::ZERO]);
        assert_eq!(checker.check(&[Vec2::new(0.2, 0.05)]), Gesture::ONE_FINGER_HORIZONTAL);

        let mut checker = armed(Gesture::ONE_FINGER, &[Vec2::ZERO]);
        assert_eq!(checker.check(&[Vec2::new(0.05, -0.2)]), Gesture::ONE_FINGER_VERTICAL);
    }

    #[test]
    fn test_result_is_frozen_after_detection() {
        let mut checker = armed(Gesture::ONE_FINGER | Gesture::PINCH, &[Vec2::ZERO]);
        let detected = checker.check(&[Vec2::new(0.3, 0.0)]);
        assert_eq!(detected, Gesture::ONE_FINGER_HORIZONTAL);

        assert_eq!(checker.check(&[Vec2::new(0.0, 0.9)]), detected);
        assert_eq!(checker.check(&[Vec2::ZERO, Vec2::new(0.9, 0.9)]), detected);
        assert_eq!(checker.check(&[]), detected);
        assert_eq!(checker.state(), DeadzoneState::OutOfDeadzone);
    }

    #[test]
    fn test_finger_count_change_rearms_baseline() {
        let mut checker = armed(Gesture::ONE_FINGER | Gesture::TWO_FINGER, &[Vec2::ZERO]);

        // Second finger lands far away: never a gesture on its own.
        let two = [Vec2::new(0.5, 0.0), Vec2::new(0.9, 0.0)];
        assert_eq!(checker.check(&two), Gesture::NONE);

        // Back to one finger at a new spot: re-armed, still nothing.
        assert_eq!(checker.check(&[Vec2::new(0.5, 0.5)]), Gesture::NONE);

        // Small movement relative to the new baseline stays inside.
        assert_eq!(checker.check(&[Vec2::new(0.55, 0.5)]), Gesture::NONE);

        // Movement beyond the radius from the new baseline is detected.
        assert_eq!(checker.check(&[Vec2::new(0.7, 0.5)]), Gesture::ONE_FINGER_HORIZONTAL);
    }

    #[test]
    fn test_unrequested_gesture_is_not_returned() {
        let mut checker = armed(Gesture::PINCH, &[Vec2::ZERO]);
        assert_eq!(checker.check(&[Vec2::new(0.5, 0.0)]), Gesture::NONE);
        assert!(checker.in_deadzone());

        let mut checker = armed(Gesture::ONE_FINGER_VERTICAL, &[Vec2::ZERO]);
        assert_eq!(checker.check(&[Vec2::new(0.5, 0.0)]), Gesture::NONE);
        assert_eq!(checker.check(&[Vec2::new(0.0, 0.5)]), Gesture::ONE_FINGER_VERTICAL);
    }

    #[test]
    fn test_two_finger_pan() {
        let start = [Vec2::new(-0.2, 0.0), Vec2::new(0.2, 0.0)];
        let mut checker = armed(Gesture::TWO_FINGER | Gesture::PINCH, &start);

        let moved = [Vec2::new(-0.2, 0.3), Vec2::new(0.2, 0.3)];
        assert_eq!(checker.check(&moved), Gesture::TWO_FINGER_VERTICAL);
    }

    #[test]
    fn test_pinch_detected() {
        let start = [Vec2::new(-0.1, 0.0), Vec2::new(0.1, 0.0)];
        let mut checker = armed(Gesture::PINCH, &start);

        let spread = [Vec2::new(-0.2, 0.0), Vec2::new(0.2, 0.0)];
        assert_eq!(checker.check(&spread), Gesture::PINCH);
    }

    #[test]
    fn test_pinch_wins_over_pan_in_same_check() {
        let start = [Vec2::new(-0.1, 0.0), Vec2::new(0.1, 0.0)];
        let mut checker = armed(Gesture::TWO_FINGER | Gesture::PINCH, &start);

        // Midpoint moves 0.3 right and the fingers spread by 0.4.
        let both = [Vec2::new(0.0, 0.0), Vec2::new(0.6, 0.0)];
        assert_eq!(checker.check(&both), Gesture::PINCH);
    }

    #[test]
    fn test_aspect_correction_shrinks_short_axis() {
        let mut checker = DeadzoneChecker::default();
        checker.set_aspect(2.0);
        checker.add_testing_gestures(Gesture::ONE_FINGER);
        checker.set_first_input(&[Vec2::ZERO]);

        // 0.15 vertical in device units is 0.075 once corrected.
        assert_eq!(checker.check(&[Vec2::new(0.0, 0.15)]), Gesture::NONE);
        assert_eq!(checker.check(&[Vec2::new(0.0, 0.25)]), Gesture::ONE_FINGER_VERTICAL);
    }

    #[test]
    fn test_cleanup_resets_everything() {
        let mut checker = armed(Gesture::ONE_FINGER, &[Vec2::ZERO]);
        checker.check(&[Vec2::new(0.5, 0.0)]);
        checker.cleanup();

        assert_eq!(checker.state(), DeadzoneState::Waiting);
        assert_eq!(checker.testing_gestures(), Gesture::NONE);
        assert_eq!(checker.detected_gesture(), Gesture::NONE);
        assert_eq!(checker.check(&[Vec2::new(0.5, 0.0)]), Gesture::NONE);
    }
}
