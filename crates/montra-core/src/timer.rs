//! Timer service for montra.
//!
//! Provides one-shot and repeating timers for deferred controller work
//! (auto-advance intervals, settle delays). The host loop drains expired
//! timers with [`TimerManager::process_expired`]; tests drive the same path
//! deterministically through [`TimerManager::process_expired_at`] with
//! synthetic instants, so no test ever sleeps.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::error::{Result, TimerError};

new_key_type! {
    /// A unique identifier for a timer.
    pub struct TimerId;
}

/// The type of timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Fires once after the specified duration.
    OneShot,
    /// Fires repeatedly at the specified interval.
    Repeating,
}

/// Internal timer data.
#[derive(Debug)]
struct TimerData {
    /// When this timer should next fire.
    next_fire: Instant,
    /// The interval for repeating timers.
    interval: Duration,
    /// The kind of timer.
    kind: TimerKind,
    /// Whether this timer is active.
    active: bool,
}

/// An entry in the timer queue (min-heap by fire time).
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    id: TimerId,
    fire_time: Instant,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_time == other.fire_time
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        other.fire_time.cmp(&self.fire_time)
    }
}

/// Manages all timers for a page session.
#[derive(Default)]
pub struct TimerManager {
    /// All registered timers.
    timers: SlotMap<TimerId, TimerData>,
    /// Priority queue of pending timer fires (min-heap by fire time).
    queue: BinaryHeap<TimerQueueEntry>,
}

impl TimerManager {
    /// Create a new timer manager.
    pub fn new() -> Self {
        Self {
            timers: SlotMap::with_key(),
            queue: BinaryHeap::new(),
        }
    }

    /// Start a one-shot timer that fires after the specified duration,
    /// anchored at the given instant.
    ///
    /// Returns the timer ID that can be used to cancel the timer.
    pub fn start_one_shot_at(&mut self, now: Instant, duration: Duration) -> TimerId {
        self.insert(now + duration, duration, TimerKind::OneShot)
    }

    /// Start a one-shot timer anchored at the current instant.
    pub fn start_one_shot(&mut self, duration: Duration) -> TimerId {
        self.start_one_shot_at(Instant::now(), duration)
    }

    /// Start a repeating timer that fires at the specified interval,
    /// anchored at the given instant. The first fire occurs after one
    /// interval.
    pub fn start_repeating_at(&mut self, now: Instant, interval: Duration) -> TimerId {
        self.insert(now + interval, interval, TimerKind::Repeating)
    }

    /// Start a repeating timer anchored at the current instant.
    pub fn start_repeating(&mut self, interval: Duration) -> TimerId {
        self.start_repeating_at(Instant::now(), interval)
    }

    fn insert(&mut self, next_fire: Instant, interval: Duration, kind: TimerKind) -> TimerId {
        let id = self.timers.insert(TimerData {
            next_fire,
            interval,
            kind,
            active: true,
        });
        self.queue.push(TimerQueueEntry {
            id,
            fire_time: next_fire,
        });
        id
    }

    /// Stop and remove a timer.
    ///
    /// Returns an error if the timer is unknown or already removed.
    pub fn stop(&mut self, id: TimerId) -> Result<()> {
        if let Some(timer) = self.timers.get_mut(id) {
            timer.active = false;
            self.timers.remove(id);
            Ok(())
        } else {
            Err(TimerError::InvalidTimerId.into())
        }
    }

    /// Check if a timer is currently active.
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.get(id).is_some_and(|t| t.active)
    }

    /// Get the duration from `now` until the next timer fires, if any.
    ///
    /// Returns `None` if there are no active timers.
    pub fn time_until_next_at(&mut self, now: Instant) -> Option<Duration> {
        // Clean up any stopped timers from the front of the queue.
        while let Some(entry) = self.queue.peek() {
            if !self.timers.get(entry.id).is_some_and(|t| t.active) {
                self.queue.pop();
            } else {
                break;
            }
        }

        self.queue.peek().map(|entry| {
            if entry.fire_time > now {
                entry.fire_time - now
            } else {
                Duration::ZERO
            }
        })
    }

    /// Get the duration until the next timer fires, measured from the
    /// current instant.
    pub fn time_until_next(&mut self) -> Option<Duration> {
        self.time_until_next_at(Instant::now())
    }

    /// Process all timers that should have fired by `now`.
    ///
    /// Returns the IDs of fired timers in fire-time order. Repeating timers
    /// are rescheduled one interval past `now`; one-shot timers are removed.
    pub fn process_expired_at(&mut self, now: Instant) -> Vec<TimerId> {
        let mut fired = Vec::new();

        while let Some(entry) = self.queue.peek() {
            if entry.fire_time > now {
                break;
            }

            let entry = self.queue.pop().expect("peeked entry exists");
            let id = entry.id;

            let Some(timer) = self.timers.get_mut(id) else {
                continue;
            };
            if !timer.active {
                continue;
            }

            tracing::trace!(target: "montra_core::timer", ?id, "timer fired");
            fired.push(id);

            match timer.kind {
                TimerKind::OneShot => {
                    timer.active = false;
                    self.timers.remove(id);
                }
                TimerKind::Repeating => {
                    timer.next_fire = now + timer.interval;
                    self.queue.push(TimerQueueEntry {
                        id,
                        fire_time: timer.next_fire,
                    });
                }
            }
        }

        fired
    }

    /// Process all timers that should fire now (real time).
    pub fn process_expired(&mut self) -> Vec<TimerId> {
        self.process_expired_at(Instant::now())
    }

    /// Get the number of active timers.
    pub fn active_count(&self) -> usize {
        self.timers.iter().filter(|(_, t)| t.active).count()
    }
}

impl std::fmt::Debug for TimerManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerManager")
            .field("active_count", &self.active_count())
            .finish()
    }
}

/// A cheaply-cloneable, thread-safe handle to a [`TimerManager`].
///
/// The page coordinator and every controller that schedules deferred work
/// hold clones of the same handle, so all timers for a page session drain
/// through one queue.
#[derive(Clone, Default)]
pub struct SharedTimers {
    inner: Arc<Mutex<TimerManager>>,
}

impl SharedTimers {
    /// Create a new, empty timer service.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(TimerManager::new())),
        }
    }

    /// See [`TimerManager::start_one_shot`].
    pub fn start_one_shot(&self, duration: Duration) -> TimerId {
        self.inner.lock().start_one_shot(duration)
    }

    /// See [`TimerManager::start_one_shot_at`].
    pub fn start_one_shot_at(&self, now: Instant, duration: Duration) -> TimerId {
        self.inner.lock().start_one_shot_at(now, duration)
    }

    /// See [`TimerManager::start_repeating`].
    pub fn start_repeating(&self, interval: Duration) -> TimerId {
        self.inner.lock().start_repeating(interval)
    }

    /// See [`TimerManager::start_repeating_at`].
    pub fn start_repeating_at(&self, now: Instant, interval: Duration) -> TimerId {
        self.inner.lock().start_repeating_at(now, interval)
    }

    /// See [`TimerManager::stop`].
    pub fn stop(&self, id: TimerId) -> Result<()> {
        self.inner.lock().stop(id)
    }

    /// See [`TimerManager::is_active`].
    pub fn is_active(&self, id: TimerId) -> bool {
        self.inner.lock().is_active(id)
    }

    /// See [`TimerManager::time_until_next`].
    pub fn time_until_next(&self) -> Option<Duration> {
        self.inner.lock().time_until_next()
    }

    /// See [`TimerManager::process_expired_at`].
    pub fn process_expired_at(&self, now: Instant) -> Vec<TimerId> {
        self.inner.lock().process_expired_at(now)
    }

    /// See [`TimerManager::process_expired`].
    pub fn process_expired(&self) -> Vec<TimerId> {
        self.inner.lock().process_expired()
    }

    /// See [`TimerManager::active_count`].
    pub fn active_count(&self) -> usize {
        self.inner.lock().active_count()
    }
}

impl std::fmt::Debug for SharedTimers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedTimers")
            .field("active_count", &self.active_count())
            .finish()
    }
}

static_assertions::assert_impl_all!(SharedTimers: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("montra_core=trace")
            .try_init();
    }

    #[test]
    fn test_one_shot_fires_once() {
        setup();
        let mut mgr = TimerManager::new();
        let t0 = Instant::now();
        let id = mgr.start_one_shot_at(t0, Duration::from_millis(20));

        // Not yet due.
        assert!(mgr.process_expired_at(t0 + Duration::from_millis(19)).is_empty());
        assert!(mgr.is_active(id));

        // Due exactly at the deadline.
        assert_eq!(
            mgr.process_expired_at(t0 + Duration::from_millis(20)),
            vec![id]
        );

        // One-shot timers are removed after firing.
        assert!(!mgr.is_active(id));
        assert!(mgr.process_expired_at(t0 + Duration::from_secs(10)).is_empty());
    }

    #[test]
    fn test_repeating_reschedules() {
        let mut mgr = TimerManager::new();
        let t0 = Instant::now();
        let id = mgr.start_repeating_at(t0, Duration::from_millis(100));

        assert_eq!(mgr.process_expired_at(t0 + Duration::from_millis(100)), vec![id]);
        assert_eq!(mgr.process_expired_at(t0 + Duration::from_millis(200)), vec![id]);
        assert!(mgr.is_active(id));
    }

    #[test]
    fn test_stop_removes_timer() {
        let mut mgr = TimerManager::new();
        let t0 = Instant::now();
        let id = mgr.start_one_shot_at(t0, Duration::from_millis(5));

        assert!(mgr.stop(id).is_ok());
        assert!(!mgr.is_active(id));
        assert!(mgr.process_expired_at(t0 + Duration::from_secs(1)).is_empty());

        // Stopping again is an error.
        assert!(mgr.stop(id).is_err());
    }

    #[test]
    fn test_fire_order_by_deadline() {
        let mut mgr = TimerManager::new();
        let t0 = Instant::now();
        let late = mgr.start_one_shot_at(t0, Duration::from_millis(50));
        let early = mgr.start_one_shot_at(t0, Duration::from_millis(10));

        assert_eq!(
            mgr.process_expired_at(t0 + Duration::from_millis(60)),
            vec![early, late]
        );
    }

    #[test]
    fn test_time_until_next_skips_stopped() {
        let mut mgr = TimerManager::new();
        let t0 = Instant::now();
        let first = mgr.start_one_shot_at(t0, Duration::from_millis(10));
        let _second = mgr.start_one_shot_at(t0, Duration::from_millis(30));

        mgr.stop(first).unwrap();
        assert_eq!(
            mgr.time_until_next_at(t0),
            Some(Duration::from_millis(30))
        );
        assert_eq!(mgr.active_count(), 1);
    }

    #[test]
    fn test_shared_handle_shares_queue() {
        let timers = SharedTimers::new();
        let clone = timers.clone();
        let t0 = Instant::now();

        let id = timers.start_one_shot_at(t0, Duration::from_millis(20));
        assert_eq!(clone.process_expired_at(t0 + Duration::from_millis(20)), vec![id]);
        assert_eq!(timers.active_count(), 0);
    }
}
