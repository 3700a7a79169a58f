//! montra: headless page-enhancement controllers.
//!
//! This crate models the interactive components of an image-centric page
//! as explicit controller objects:
//!
//! - **[`Carousel`](component::Carousel)**: a cyclic, auto-advancing slide
//!   scroller with clone-extended wraparound and indicator sync
//! - **[`Lightbox`](component::Lightbox)**: a modal image viewer with
//!   circular next/prev navigation and keyboard control
//! - **[`Accordion`](component::Accordion)**: exclusive expandable items
//! - **[`Menu`](component::Menu)**: a mobile navigation drawer with page
//!   scroll suspension
//! - **[`RevealSet`](component::RevealSet)**: one-shot scroll-reveal
//!   elements
//! - **[`Page`](page::Page)**: the coordinator that owns the timer service
//!   and routes host events to the controllers
//!
//! Controllers never touch a document tree: every visual effect goes
//! through a surface trait from [`component::surface`] that the embedding
//! host implements against its real elements, and every deferred action
//! (auto-advance, wrap settling) goes through the shared timer service.
//! This keeps the index arithmetic and timing edge cases unit-testable
//! without a live document.
//!
//! # Execution model
//!
//! Single-threaded and cooperative: the host loop delivers input events
//! and drives [`Page::process_timers`](page::Page::process_timers). No
//! controller blocks, and none spawns threads.
//!
//! # Fragment loading
//!
//! Shared HTML fragments (header/footer) are fetched with the
//! `montra-net` crate, re-exported here as `montra::net` when the
//! `networking` feature is enabled. After splicing a fragment in, the host
//! calls
//! [`Page::fragment_inserted`](page::Page::fragment_inserted) to run the
//! component initializers that depend on that markup.

pub mod component;
pub mod page;
pub mod prelude;

pub use montra_core as core;

#[cfg(feature = "networking")]
pub use montra_net as net;
