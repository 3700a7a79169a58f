//! Logging facilities for montra.
//!
//! montra is instrumented with the `tracing` crate. To see logs, install a
//! subscriber in the host application:
//!
//! ```ignore
//! tracing_subscriber::fmt::init();
//! ```
//!
//! Every subsystem logs to its own target so hosts can filter, e.g.
//! `RUST_LOG=montra::carousel=trace,montra_net=debug`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal emission.
    pub const SIGNAL: &str = "montra_core::signal";
    /// Timer scheduling and firing.
    pub const TIMER: &str = "montra_core::timer";
    /// Carousel controller.
    pub const CAROUSEL: &str = "montra::carousel";
    /// Lightbox navigator.
    pub const LIGHTBOX: &str = "montra::lightbox";
    /// Page coordinator and event routing.
    pub const PAGE: &str = "montra::page";
    /// Fragment loading.
    pub const FRAGMENT: &str = "montra_net::fragment";
}
