//! Scroll-reveal controller.
//!
//! Elements marked for reveal stay hidden until they become sufficiently
//! visible in the viewport, then reveal exactly once. The host observes
//! element visibility however it likes (intersection callbacks, scroll
//! math) and reports ratios here; once an element reveals, the controller
//! asks the host to stop observing it.

use montra_core::Signal;

use super::surface::RevealSurface;
use crate::page::Component;

/// Default visibility ratio required to reveal an element.
pub const DEFAULT_REVEAL_THRESHOLD: f32 = 0.1;

/// What the host should do with its observation of an element after a
/// visibility report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Observation {
    /// Keep observing the element.
    Keep,
    /// Stop observing; the element has revealed and will not change again.
    Drop,
}

/// A one-shot reveal set over a fixed list of elements.
///
/// # Signals
///
/// - `item_revealed(usize)`: Emitted when an element reveals
pub struct RevealSet<S: RevealSurface> {
    revealed: Vec<bool>,
    threshold: f32,
    surface: S,

    /// Signal emitted when an element reveals.
    pub item_revealed: Signal<usize>,
}

impl<S: RevealSurface> RevealSet<S> {
    /// Create a reveal set over `item_count` elements with the default
    /// threshold.
    pub fn new(item_count: usize, surface: S) -> Self {
        Self {
            revealed: vec![false; item_count],
            threshold: DEFAULT_REVEAL_THRESHOLD,
            surface,
            item_revealed: Signal::new(),
        }
    }

    /// Set the visibility threshold using builder pattern.
    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    /// Report the visible ratio of element `index`.
    ///
    /// Reveals the element the first time its ratio reaches the threshold
    /// and returns [`Observation::Drop`] so the host stops watching it.
    /// Any other report (below threshold, already revealed, out of range)
    /// leaves state untouched.
    pub fn visibility_changed(&mut self, index: usize, ratio: f32) -> Observation {
        let Some(seen) = self.revealed.get_mut(index) else {
            return Observation::Keep;
        };
        if *seen {
            // The host should already have dropped this observation.
            return Observation::Drop;
        }
        if ratio < self.threshold {
            return Observation::Keep;
        }

        *seen = true;
        self.surface.reveal(index);
        self.item_revealed.emit(index);
        Observation::Drop
    }

    /// Whether element `index` has revealed.
    pub fn is_revealed(&self, index: usize) -> bool {
        self.revealed.get(index).copied().unwrap_or(false)
    }

    /// Number of elements still hidden.
    pub fn remaining(&self) -> usize {
        self.revealed.iter().filter(|seen| !**seen).count()
    }

    /// Get a reference to the rendering surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }
}

// Host-driven: reveals come from visibility reports, not routed events.
impl<S: RevealSurface + Send> Component for RevealSet<S> {}

impl<S: RevealSurface> std::fmt::Debug for RevealSet<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealSet")
            .field("item_count", &self.revealed.len())
            .field("remaining", &self.remaining())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSurface {
        revealed: Vec<usize>,
    }

    impl RevealSurface for RecordingSurface {
        fn reveal(&mut self, index: usize) {
            self.revealed.push(index);
        }
    }

    #[test]
    fn test_reveals_at_threshold() {
        let mut set = RevealSet::new(3, RecordingSurface::default());

        assert_eq!(set.visibility_changed(1, 0.05), Observation::Keep);
        assert!(!set.is_revealed(1));

        assert_eq!(set.visibility_changed(1, 0.1), Observation::Drop);
        assert!(set.is_revealed(1));
        assert_eq!(set.surface().revealed, vec![1]);
        assert_eq!(set.remaining(), 2);
    }

    #[test]
    fn test_reveals_only_once() {
        let mut set = RevealSet::new(2, RecordingSurface::default());

        set.visibility_changed(0, 1.0);
        assert_eq!(set.visibility_changed(0, 1.0), Observation::Drop);
        assert_eq!(set.surface().revealed, vec![0]);
    }

    #[test]
    fn test_out_of_range_kept() {
        let mut set = RevealSet::new(1, RecordingSurface::default());
        assert_eq!(set.visibility_changed(5, 1.0), Observation::Keep);
        assert!(set.surface().revealed.is_empty());
    }

    #[test]
    fn test_custom_threshold() {
        let mut set = RevealSet::new(1, RecordingSurface::default()).with_threshold(0.5);

        assert_eq!(set.visibility_changed(0, 0.4), Observation::Keep);
        assert_eq!(set.visibility_changed(0, 0.6), Observation::Drop);
    }
}
