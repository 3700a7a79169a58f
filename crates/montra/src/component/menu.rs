//! Mobile navigation menu controller.
//!
//! A full-screen navigation drawer: an open control shows it and suspends
//! page scroll, a close control (or following any primary navigation link)
//! hides it and restores scroll. The host constructs this controller only
//! when all three of its elements (open control, close control, and nav
//! container) were found.

use montra_core::Signal;

use super::surface::MenuSurface;
use crate::page::Component;

/// An open/closed navigation menu with page scroll suspension.
///
/// Open and close are idempotent, so the scroll lock stays balanced no
/// matter how the host's controls misfire.
///
/// # Signals
///
/// - `open_changed(bool)`: Emitted on every open/close transition
pub struct Menu<S: MenuSurface> {
    open: bool,
    surface: S,

    /// Signal emitted on every open/close transition.
    pub open_changed: Signal<bool>,
}

impl<S: MenuSurface> Menu<S> {
    /// Create a closed menu.
    pub fn new(surface: S) -> Self {
        Self {
            open: false,
            surface,
            open_changed: Signal::new(),
        }
    }

    /// Open the menu and suspend page scroll. No-op while open.
    pub fn open(&mut self) -> bool {
        if self.open {
            return false;
        }
        self.open = true;
        self.surface.set_open(true);
        self.surface.lock_scroll();
        self.open_changed.emit(true);
        true
    }

    /// Close the menu and restore page scroll. No-op while closed.
    pub fn close(&mut self) -> bool {
        if !self.open {
            return false;
        }
        self.open = false;
        self.surface.set_open(false);
        self.surface.unlock_scroll();
        self.open_changed.emit(false);
        true
    }

    /// A primary navigation link was followed; close the menu.
    pub fn link_activated(&mut self) -> bool {
        self.close()
    }

    /// Whether the menu is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Get a reference to the rendering surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }
}

// Host-driven: the menu reacts to its own controls, not routed events.
impl<S: MenuSurface + Send> Component for Menu<S> {}

impl<S: MenuSurface> std::fmt::Debug for Menu<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Menu").field("open", &self.open).finish()
    }
}
