//! Gesture flags
//!
//! Controllers opt into gestures by OR-ing flags into the deadzone
//! checker's testing set; a detection matches a controller when the flags
//! intersect.

bitflags::bitflags! {
    /// Manipulation gesture classes
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Gesture: u32 {
        const ONE_FINGER_HORIZONTAL = 1;
        const ONE_FINGER_VERTICAL = 1 << 1;
        const ONE_FINGER = Self::ONE_FINGER_HORIZONTAL.bits() | Self::ONE_FINGER_VERTICAL.bits();
        const TWO_FINGER_HORIZONTAL = 1 << 2;
        const TWO_FINGER_VERTICAL = 1 << 3;
        const TWO_FINGER = Self::TWO_FINGER_HORIZONTAL.bits() | Self::TWO_FINGER_VERTICAL.bits();
        const PINCH = 1 << 4;
    }
}

impl Gesture {
    /// No gesture
    pub const NONE: Self = Self::empty();

    #[inline]
    pub fn is_none(&self) -> bool {
        self.is_empty()
    }

    /// Number of fingers the gesture is made with
    pub fn finger_count(&self) -> usize {
        if self.intersects(Gesture::ONE_FINGER) {
            1
        } else if self.intersects(Gesture::TWO_FINGER | Gesture::PINCH) {
            2
        } else {
            0
        }
    }
}

impl Default for Gesture {
    fn default() -> Self {
        Self::NONE
    }
}
