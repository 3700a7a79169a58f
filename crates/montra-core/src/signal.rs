//! Signal/slot system for montra.
//!
//! A type-safe observer mechanism for controller-to-host communication.
//! Controllers emit signals when their state changes; connected slots
//! (closures) are invoked in response.
//!
//! montra targets a single-threaded, cooperative host loop, so emission is
//! always direct: slots run on the emitting thread, in connection order,
//! before `emit` returns. Storage is still `Send + Sync` so a controller
//! graph can be handed to whichever single thread the host runs on.
//!
//! # Example
//!
//! ```
//! use montra_core::Signal;
//!
//! let current_changed = Signal::<i32>::new();
//!
//! let conn_id = current_changed.connect(|index| {
//!     println!("Current index is now {index}");
//! });
//!
//! current_changed.emit(2);
//! current_changed.disconnect(conn_id);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via
    /// [`Signal::disconnect`]. The ID remains valid until the connection is
    /// explicitly disconnected or the signal is dropped.
    pub struct ConnectionId;
}

/// Internal storage for a single connection.
struct Connection<Args> {
    /// The slot function to invoke (Arc-wrapped so it can be called after
    /// the connection table lock is released).
    slot: Arc<dyn Fn(&Args) + Send + Sync>,
}

/// A type-safe signal that can have multiple connected slots.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for
///   signals with no payload.
///
/// # Re-entrancy
///
/// Slots are invoked after the connection table lock has been released, so
/// a slot may connect or disconnect slots on the same signal. A connection
/// added during emission is not invoked for that emission.
pub struct Signal<Args> {
    /// All active connections.
    connections: Mutex<SlotMap<ConnectionId, Connection<Args>>>,
    /// Whether signal emission is temporarily blocked.
    blocked: AtomicBool,
}

impl<Args> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a [`ConnectionId`] that can be used to disconnect the slot
    /// later.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Connection {
            slot: Arc::new(slot),
        })
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` do nothing. Useful during
    /// initialization or batch updates to prevent cascading notifications.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots in connection order.
    ///
    /// If the signal is blocked, this does nothing.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: "montra_core::signal", "signal blocked, skipping emit");
            return;
        }

        // Snapshot the slots, then invoke outside the lock: slots may
        // connect or disconnect on this same signal.
        let slots: Vec<Arc<dyn Fn(&Args) + Send + Sync>> = {
            let connections = self.connections.lock();
            connections.values().map(|c| c.slot.clone()).collect()
        };

        tracing::trace!(
            target: "montra_core::signal",
            slot_count = slots.len(),
            "emitting signal"
        );

        for slot in slots {
            slot(&args);
        }
    }
}

impl<Args> std::fmt::Debug for Signal<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("connection_count", &self.connection_count())
            .field("blocked", &self.is_blocked())
            .finish()
    }
}

static_assertions::assert_impl_all!(Signal<i32>: Send, Sync);

#[cfg(test)]
mod tests {
    use std::sync::Mutex as StdMutex;

    use super::*;

    #[test]
    fn test_emit_invokes_connected_slot() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(StdMutex::new(Vec::new()));

        let sink = received.clone();
        signal.connect(move |value| sink.lock().unwrap().push(*value));

        signal.emit(1);
        signal.emit(2);

        assert_eq!(*received.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_emit_with_no_connections() {
        let signal = Signal::<()>::new();
        // Must not panic.
        signal.emit(());
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_disconnect() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(StdMutex::new(0));

        let sink = received.clone();
        let id = signal.connect(move |value| *sink.lock().unwrap() += value);

        signal.emit(1);
        assert!(signal.disconnect(id));
        signal.emit(1);

        assert_eq!(*received.lock().unwrap(), 1);
        // Second disconnect of the same ID fails.
        assert!(!signal.disconnect(id));
    }

    #[test]
    fn test_blocked_signal_skips_slots() {
        let signal = Signal::<i32>::new();
        let received = Arc::new(StdMutex::new(0));

        let sink = received.clone();
        signal.connect(move |value| *sink.lock().unwrap() += value);

        signal.set_blocked(true);
        assert!(signal.is_blocked());
        signal.emit(5);
        assert_eq!(*received.lock().unwrap(), 0);

        signal.set_blocked(false);
        signal.emit(5);
        assert_eq!(*received.lock().unwrap(), 5);
    }

    #[test]
    fn test_slot_may_disconnect_during_emit() {
        let signal = Arc::new(Signal::<()>::new());
        let count = Arc::new(StdMutex::new(0));

        let signal_ref = signal.clone();
        let sink = count.clone();
        let id = Arc::new(StdMutex::new(None::<ConnectionId>));
        let id_ref = id.clone();
        let conn = signal.connect(move |()| {
            *sink.lock().unwrap() += 1;
            if let Some(own_id) = *id_ref.lock().unwrap() {
                signal_ref.disconnect(own_id);
            }
        });
        *id.lock().unwrap() = Some(conn);

        signal.emit(());
        signal.emit(());

        // The slot disconnected itself during the first emission.
        assert_eq!(*count.lock().unwrap(), 1);
    }

    #[test]
    fn test_disconnect_all() {
        let signal = Signal::<i32>::new();
        signal.connect(|_| {});
        signal.connect(|_| {});
        assert_eq!(signal.connection_count(), 2);

        signal.disconnect_all();
        assert_eq!(signal.connection_count(), 0);
    }
}
