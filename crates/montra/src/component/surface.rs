//! Surface traits: the seam between controllers and the host's visuals.
//!
//! Controllers never touch a document tree. Each one draws through a
//! narrow trait the host implements against its real elements, and tests
//! implement with recording doubles. References behind a surface are
//! captured and validated by the host once, at initialization; controllers
//! never re-query for elements.

use super::animation::Motion;

/// Host-side rendering for the carousel track and its indicators.
pub trait CarouselSurface {
    /// Apply a horizontal translation to the track, in pixels.
    ///
    /// The offset is the distance the track is shifted towards lower
    /// coordinates (a larger offset shows later slides).
    fn set_offset(&mut self, offset: f32, motion: Motion);

    /// Highlight exactly the given indicator, or none.
    fn set_active_indicator(&mut self, index: Option<usize>);

    /// Rendered width of the first slide's image, if it has loaded.
    ///
    /// Returns `None` while the image is still loading; the controller
    /// keeps its current measurement and retries on the load notification.
    fn first_image_width(&self) -> Option<f32>;
}

/// Page scroll suspension while a modal element is up.
///
/// Lock/unlock are assignments, not a counter: locking an already locked
/// page is harmless. Controllers still balance their calls.
pub trait ScrollLock {
    /// Suspend page scrolling.
    fn lock_scroll(&mut self);

    /// Restore page scrolling.
    fn unlock_scroll(&mut self);
}

/// Host-side rendering for the lightbox modal.
pub trait LightboxSurface: ScrollLock {
    /// Display the given image source and caption in the modal.
    fn show_image(&mut self, source: &str, caption: &str);

    /// Show or hide the modal overlay.
    fn set_visible(&mut self, visible: bool);
}

/// Host-side rendering for the mobile navigation menu.
pub trait MenuSurface: ScrollLock {
    /// Show or hide the menu.
    fn set_open(&mut self, open: bool);
}

/// Host-side rendering for accordion items.
pub trait AccordionSurface {
    /// Expand or collapse the item at `index`.
    ///
    /// The host is expected to mirror this into its expanded styling and
    /// any `aria-expanded` bookkeeping it maintains.
    fn set_expanded(&mut self, index: usize, expanded: bool);
}

/// Host-side rendering for scroll-reveal elements.
pub trait RevealSurface {
    /// Mark the element at `index` as revealed.
    fn reveal(&mut self, index: usize);
}
