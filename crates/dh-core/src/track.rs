//! Wound and fate counters.
//!
//! A track stores `current` and `maximum` exactly as written. Nothing keeps
//! `current <= maximum`; the clamping happens only when the value is shown.

use serde::{Deserialize, Serialize};

/// A current/maximum counter pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Current value.
    pub current: i32,
    /// Maximum value.
    pub maximum: i32,
}

impl Track {
    /// Create a track starting full.
    pub fn full(maximum: i32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    /// The current value clamped into `[0, maximum]` for display.
    pub fn display_current(&self) -> i32 {
        self.current.clamp(0, self.maximum.max(0))
    }

    /// Fill percentage, rounded, in `0..=100`. Zero when the maximum is not positive.
    pub fn percent(&self) -> u8 {
        if self.maximum <= 0 {
            return 0;
        }
        let raw = (f64::from(self.current) / f64::from(self.maximum) * 100.0).clamp(0.0, 100.0);
        raw.round() as u8
    }

    /// Reset both counters to zero.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.display_current(), self.maximum)
    }
}
