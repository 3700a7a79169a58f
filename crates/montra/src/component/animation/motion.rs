//! Motion directives for surface updates.
//!
//! Every positional change a controller pushes to its surface carries a
//! [`Motion`]: either an eased animation, or an instantaneous snap. The
//! carousel's two-phase wraparound depends on this distinction: the track
//! is first repositioned with [`Motion::Snap`] (no visible movement), then
//! re-rendered with [`Motion::Animated`] after the settle delay.

use std::time::Duration;

use super::easing::Easing;

/// Default duration of an animated track movement.
pub const SLIDE_DURATION: Duration = Duration::from_millis(500);

/// How a surface should apply a positional change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Apply instantly, with no visible transition.
    Snap,
    /// Animate from the current position.
    Animated {
        /// Animation duration.
        duration: Duration,
        /// Easing curve.
        easing: Easing,
    },
}

impl Motion {
    /// The default animated motion: 0.5 s ease-in-out.
    pub const fn animated() -> Self {
        Self::Animated {
            duration: SLIDE_DURATION,
            easing: Easing::EaseInOut,
        }
    }

    /// Whether this motion animates.
    pub fn is_animated(&self) -> bool {
        matches!(self, Self::Animated { .. })
    }
}
