//! Prelude module for montra.
//!
//! Re-exports the most commonly used types for convenient importing:
//!
//! ```ignore
//! use montra::prelude::*;
//! ```

// ============================================================================
// Core Services
// ============================================================================

pub use montra_core::{ConnectionId, SharedTimers, Signal, TimerId, TimerManager};

// ============================================================================
// Page Coordination
// ============================================================================

pub use crate::page::{Component, FragmentRole, InitHook, Page};

// ============================================================================
// Components
// ============================================================================

pub use crate::component::{
    Accordion, Carousel, Controls, ImageRef, Lightbox, Menu, NavControls, Observation, RevealSet,
    TrackLayout,
};

// ============================================================================
// Events and Animation
// ============================================================================

pub use crate::component::animation::{Easing, Motion};
pub use crate::component::events::{ClickTarget, Direction, Key, KeyPressEvent};

// ============================================================================
// Surface Traits
// ============================================================================

pub use crate::component::surface::{
    AccordionSurface, CarouselSurface, LightboxSurface, MenuSurface, RevealSurface, ScrollLock,
};
