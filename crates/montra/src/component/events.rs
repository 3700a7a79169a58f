//! Input event types delivered to component controllers.
//!
//! The host translates its native input (browser events, winit events,
//! test scripts) into these types and feeds them to the page coordinator,
//! which routes them to controllers.

/// Keys the toolkit reacts to.
///
/// Names follow the W3C `KeyboardEvent.key` values the host is most likely
/// to hand over verbatim; anything else maps to [`Key::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// The left arrow key.
    ArrowLeft,
    /// The right arrow key.
    ArrowRight,
    /// The Escape key.
    Escape,
    /// Any key the toolkit has no handling for.
    Unknown(String),
}

impl Key {
    /// Parse a key from its `KeyboardEvent.key`-style name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            "Escape" => Self::Escape,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// A key-press event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPressEvent {
    key: Key,
}

impl KeyPressEvent {
    /// Create a key-press event.
    pub fn new(key: Key) -> Self {
        Self { key }
    }

    /// The pressed key.
    pub fn key(&self) -> &Key {
        &self.key
    }
}

/// What a pointer click inside a modal overlay landed on.
///
/// The lightbox closes only on [`ClickTarget::Backdrop`]; clicks on the
/// image or the navigation controls are consumed before they reach the
/// backdrop handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The overlay backdrop itself.
    Backdrop,
    /// The displayed image.
    Image,
    /// A navigation or close control.
    Control,
}

/// Navigation direction for index-based controllers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards higher indices.
    Forward,
    /// Towards lower indices.
    Backward,
}

impl Direction {
    /// The signed index delta for this direction.
    pub fn delta(self) -> i32 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}
