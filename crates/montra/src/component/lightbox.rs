//! Lightbox navigator.
//!
//! This module provides [`Lightbox`], the modal full-size image viewer:
//! click an image to open it, step through the collection with circular
//! next/prev navigation, close via the close control, the backdrop, or
//! Escape. Unlike the carousel there is no animated track to keep in sync,
//! so wraparound is plain modular arithmetic in both directions.

use montra_core::Signal;

use super::events::{ClickTarget, Key, KeyPressEvent};
use super::surface::LightboxSurface;
use crate::page::Component;

/// An image eligible for lightbox display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// Image source (URL or path).
    pub source: String,
    /// Caption, taken from the image's alternative text.
    pub caption: String,
}

impl ImageRef {
    /// Create an image reference.
    pub fn new(source: impl Into<String>, caption: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            caption: caption.into(),
        }
    }
}

/// Which navigation controls the host found inside the overlay.
///
/// Arrow keys route through the corresponding control, so a missing
/// control also deadens its arrow key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavControls {
    /// A forward ("next") control exists.
    pub next: bool,
    /// A backward ("prev") control exists.
    pub prev: bool,
}

impl NavControls {
    /// Both navigation controls present.
    pub fn all() -> Self {
        Self {
            next: true,
            prev: true,
        }
    }
}

impl Default for NavControls {
    fn default() -> Self {
        Self::all()
    }
}

/// A modal image viewer with circular navigation.
///
/// The image list is fixed at construction. With an empty list the
/// navigator is inert: nothing opens, keys are ignored, the surface is
/// never touched.
///
/// # Signals
///
/// - `opened(usize)`: Emitted each time the modal shows an image
/// - `closed(())`: Emitted when the modal hides
/// - `current_changed(usize)`: Emitted when the current index changes
pub struct Lightbox<S: LightboxSurface> {
    /// All lightbox-eligible images, in page order.
    images: Vec<ImageRef>,
    /// Index of the displayed (or last displayed) image. Always in range
    /// while the modal is open.
    current: usize,
    /// Modal visibility.
    open: bool,
    /// Which navigation controls exist.
    controls: NavControls,
    /// Rendering seam.
    surface: S,

    /// Signal emitted each time the modal shows an image.
    pub opened: Signal<usize>,
    /// Signal emitted when the modal hides.
    pub closed: Signal<()>,
    /// Signal emitted when the current index changes.
    pub current_changed: Signal<usize>,
}

impl<S: LightboxSurface> Lightbox<S> {
    /// Create a navigator over the given images.
    pub fn new(images: Vec<ImageRef>, controls: NavControls, surface: S) -> Self {
        Self {
            images,
            current: 0,
            open: false,
            controls,
            surface,
            opened: Signal::new(),
            closed: Signal::new(),
            current_changed: Signal::new(),
        }
    }

    // =========================================================================
    // State machine
    // =========================================================================

    /// Open the modal at image `index`.
    ///
    /// Shows the image's source and caption, and suspends page scroll.
    /// Returns `false` (and does nothing) when inert or out of range.
    pub fn open_at(&mut self, index: usize) -> bool {
        let Some(image) = self.images.get(index) else {
            return false;
        };

        let changed = self.current != index;
        self.current = index;
        self.surface.show_image(&image.source, &image.caption);
        if !self.open {
            self.open = true;
            self.surface.set_visible(true);
            self.surface.lock_scroll();
        }

        tracing::debug!(target: "montra::lightbox", index, "opened");
        self.opened.emit(index);
        if changed {
            self.current_changed.emit(index);
        }
        true
    }

    /// Show the next image, wrapping to the first after the last.
    pub fn next(&mut self) -> bool {
        if !self.controls.next || self.images.is_empty() {
            return false;
        }
        self.open_at((self.current + 1) % self.images.len())
    }

    /// Show the previous image, wrapping to the last before the first.
    pub fn prev(&mut self) -> bool {
        if !self.controls.prev || self.images.is_empty() {
            return false;
        }
        self.open_at((self.current + self.images.len() - 1) % self.images.len())
    }

    /// Close the modal and restore page scroll.
    ///
    /// Returns `false` when already closed.
    pub fn close(&mut self) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        self.surface.set_visible(false);
        self.surface.unlock_scroll();
        tracing::debug!(target: "montra::lightbox", "closed");
        self.closed.emit(());
        true
    }

    /// A pointer click landed inside the overlay.
    ///
    /// Only a click on the backdrop itself closes the modal; clicks on the
    /// image or the controls are already consumed by their own handlers
    /// and must not fall through. Returns `true` if the modal closed.
    pub fn overlay_clicked(&mut self, target: ClickTarget) -> bool {
        if !self.open {
            return false;
        }
        match target {
            ClickTarget::Backdrop => self.close(),
            ClickTarget::Image | ClickTarget::Control => false,
        }
    }

    /// Handle a key press. No-op while closed.
    ///
    /// Returns `true` if the key was consumed.
    pub fn handle_key(&mut self, event: &KeyPressEvent) -> bool {
        if !self.open {
            return false;
        }
        match event.key() {
            Key::ArrowLeft => self.prev(),
            Key::ArrowRight => self.next(),
            Key::Escape => self.close(),
            Key::Unknown(_) => false,
        }
    }

    // =========================================================================
    // State access
    // =========================================================================

    /// Whether the modal is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Index of the displayed (or last displayed) image.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Number of images in the collection.
    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Whether the navigator has no images and therefore never opens.
    pub fn is_inert(&self) -> bool {
        self.images.is_empty()
    }

    /// Get a reference to the rendering surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }
}

impl<S: LightboxSurface + Send> Component for Lightbox<S> {
    fn on_key(&mut self, event: &KeyPressEvent) -> bool {
        self.handle_key(event)
    }
}

impl<S: LightboxSurface> std::fmt::Debug for Lightbox<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lightbox")
            .field("image_count", &self.images.len())
            .field("current", &self.current)
            .field("open", &self.open)
            .finish()
    }
}
