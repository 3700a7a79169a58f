//! Accordion controller.
//!
//! An exclusive accordion: at most one item is expanded at a time, and
//! toggling the expanded item collapses it. Every expansion change is
//! pushed to the surface per item, so the host can keep styling and
//! `aria-expanded` in step.

use montra_core::Signal;

use super::surface::AccordionSurface;
use crate::page::Component;

/// An exclusive-expansion accordion over a fixed list of items.
///
/// # Signals
///
/// - `expansion_changed(Option<usize>)`: Emitted with the newly expanded
///   item, or `None` when everything is collapsed
pub struct Accordion<S: AccordionSurface> {
    item_count: usize,
    expanded: Option<usize>,
    surface: S,

    /// Signal emitted when the expanded item changes.
    pub expansion_changed: Signal<Option<usize>>,
}

impl<S: AccordionSurface> Accordion<S> {
    /// Create an accordion over `item_count` items, all collapsed.
    pub fn new(item_count: usize, surface: S) -> Self {
        Self {
            item_count,
            expanded: None,
            surface,
            expansion_changed: Signal::new(),
        }
    }

    /// Toggle the item at `index`.
    ///
    /// Expanding an item collapses the previously expanded one; toggling
    /// the expanded item collapses it. Out-of-range indices are ignored.
    /// Returns `true` if anything changed.
    pub fn toggle(&mut self, index: usize) -> bool {
        if index >= self.item_count {
            return false;
        }

        if self.expanded == Some(index) {
            self.surface.set_expanded(index, false);
            self.expanded = None;
        } else {
            if let Some(old) = self.expanded {
                self.surface.set_expanded(old, false);
            }
            self.surface.set_expanded(index, true);
            self.expanded = Some(index);
        }

        self.expansion_changed.emit(self.expanded);
        true
    }

    /// The currently expanded item, if any.
    pub fn expanded(&self) -> Option<usize> {
        self.expanded
    }

    /// Number of items.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Get a reference to the rendering surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }
}

// Host-driven: items toggle on their own clicks, not routed events.
impl<S: AccordionSurface + Send> Component for Accordion<S> {}

impl<S: AccordionSurface> std::fmt::Debug for Accordion<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Accordion")
            .field("item_count", &self.item_count)
            .field("expanded", &self.expanded)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSurface {
        changes: Vec<(usize, bool)>,
    }

    impl AccordionSurface for RecordingSurface {
        fn set_expanded(&mut self, index: usize, expanded: bool) {
            self.changes.push((index, expanded));
        }
    }

    #[test]
    fn test_expand_and_toggle_off() {
        let mut accordion = Accordion::new(3, RecordingSurface::default());

        assert!(accordion.toggle(1));
        assert_eq!(accordion.expanded(), Some(1));
        assert_eq!(accordion.surface().changes, vec![(1, true)]);

        assert!(accordion.toggle(1));
        assert_eq!(accordion.expanded(), None);
        assert_eq!(accordion.surface().changes, vec![(1, true), (1, false)]);
    }

    #[test]
    fn test_expansion_is_exclusive() {
        let mut accordion = Accordion::new(3, RecordingSurface::default());

        accordion.toggle(0);
        accordion.toggle(2);

        assert_eq!(accordion.expanded(), Some(2));
        // Item 0 was collapsed before item 2 expanded.
        assert_eq!(
            accordion.surface().changes,
            vec![(0, true), (0, false), (2, true)]
        );
    }

    #[test]
    fn test_out_of_range_ignored() {
        let mut accordion = Accordion::new(2, RecordingSurface::default());

        assert!(!accordion.toggle(2));
        assert_eq!(accordion.expanded(), None);
        assert!(accordion.surface().changes.is_empty());
    }
}
