//! Core services for montra.
//!
//! This crate provides the runtime foundations of the montra
//! page-enhancement toolkit:
//!
//! - **Signal/Slot System**: Type-safe controller-to-host notification
//! - **Timer Service**: One-shot and repeating timers, drivable with
//!   synthetic instants for deterministic tests
//! - **Errors**: Shared error types for core services
//! - **Logging**: `tracing` target constants for per-subsystem filtering
//!
//! montra models the single-threaded, cooperative execution of an
//! interactive page: all controller logic runs on one host loop, and every
//! deferred action is an explicit timer processed by that loop. There is no
//! event loop in this crate; the host owns it and drains
//! [`TimerManager::process_expired`] from it.
//!
//! # Signal/Slot Example
//!
//! ```
//! use montra_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//!
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {value}");
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Timer Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use montra_core::TimerManager;
//!
//! let mut timers = TimerManager::new();
//! let t0 = Instant::now();
//! let id = timers.start_one_shot_at(t0, Duration::from_millis(20));
//!
//! // The host loop (or a test) drains expired timers:
//! let fired = timers.process_expired_at(t0 + Duration::from_millis(20));
//! assert_eq!(fired, vec![id]);
//! ```

pub mod error;
pub mod logging;
pub mod signal;
pub mod timer;

pub use error::{CoreError, Result, SignalError, TimerError};
pub use signal::{ConnectionId, Signal};
pub use timer::{SharedTimers, TimerId, TimerKind, TimerManager};
