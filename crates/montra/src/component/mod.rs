//! Enhancement component controllers.
//!
//! Each controller owns one component's state machine and draws through a
//! surface trait from [`surface`]:
//!
//! - [`Carousel`]: cyclic, auto-advancing slide scroller
//! - [`Lightbox`]: modal image viewer with circular navigation
//! - [`Accordion`]: exclusive expandable items
//! - [`Menu`]: mobile navigation drawer
//! - [`RevealSet`]: one-shot scroll-reveal elements

pub mod accordion;
pub mod animation;
pub mod carousel;
pub mod events;
pub mod lightbox;
pub mod menu;
pub mod reveal;
pub mod surface;

pub use accordion::Accordion;
pub use carousel::{Carousel, Controls, TrackLayout};
pub use events::{ClickTarget, Direction, Key, KeyPressEvent};
pub use lightbox::{ImageRef, Lightbox, NavControls};
pub use menu::Menu;
pub use reveal::{Observation, RevealSet};
