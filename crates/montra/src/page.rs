//! Page coordinator.
//!
//! [`Page`] ties a page session together: it owns the shared timer service,
//! holds the enhancement controllers behind the [`Component`] trait, and
//! routes host events (timer fires, key presses, viewport resizes) to
//! them. It also carries the post-insertion initialization hooks that run
//! when a loaded HTML fragment lands in the document (the header fragment
//! brings the menu markup, the footer fragment brings the carousel markup).
//!
//! Every component is independently optional: a hook that finds its markup
//! missing simply produces no component, and the rest of the page keeps
//! working.

use montra_core::{SharedTimers, TimerId};
use std::time::Instant;

use crate::component::events::KeyPressEvent;

/// An enhancement controller the page can route events to.
///
/// All methods have no-op defaults; controllers implement only what they
/// react to.
///
/// A controller the host also drives directly (lightbox clicks, menu
/// toggles) is typically wrapped in `Arc<Mutex<_>>`: one clone registered
/// with the page for event routing, one kept by the host for direct calls.
/// The blanket impl below forwards events through the lock.
pub trait Component: Send {
    /// A timer fired. Return `true` if this component owns the timer.
    fn on_timer(&mut self, id: TimerId) -> bool {
        let _ = id;
        false
    }

    /// A key was pressed. Return `true` if the key was consumed.
    fn on_key(&mut self, event: &KeyPressEvent) -> bool {
        let _ = event;
        false
    }

    /// The viewport was resized.
    fn on_resize(&mut self) {}
}

impl<C: Component + ?Sized> Component for std::sync::Arc<parking_lot::Mutex<C>> {
    fn on_timer(&mut self, id: TimerId) -> bool {
        self.lock().on_timer(id)
    }

    fn on_key(&mut self, event: &KeyPressEvent) -> bool {
        self.lock().on_key(event)
    }

    fn on_resize(&mut self) {
        self.lock().on_resize();
    }
}

/// The role a loaded fragment plays, derived from its placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FragmentRole {
    /// The shared page header (brings the navigation menu markup).
    Header,
    /// The shared page footer (brings the carousel markup).
    Footer,
}

impl FragmentRole {
    /// Map a placeholder element identifier to its role.
    pub fn from_placeholder_id(id: &str) -> Option<Self> {
        match id {
            "header-placeholder" => Some(Self::Header),
            "footer-placeholder" => Some(Self::Footer),
            _ => None,
        }
    }
}

/// A deferred component initializer, run once its fragment is in place.
///
/// Returns `None` when the fragment's markup turned out not to contain the
/// component's container, in which case the component stays disabled.
pub type InitHook = Box<dyn FnOnce(&SharedTimers) -> Option<Box<dyn Component>> + Send>;

/// Coordinates the enhancement controllers of one page session.
pub struct Page {
    timers: SharedTimers,
    components: Vec<Box<dyn Component>>,
    hooks: Vec<(FragmentRole, InitHook)>,
}

impl Page {
    /// Create an empty page with a fresh timer service.
    pub fn new() -> Self {
        Self {
            timers: SharedTimers::new(),
            components: Vec::new(),
            hooks: Vec::new(),
        }
    }

    /// The shared timer service, for constructing controllers.
    pub fn timers(&self) -> SharedTimers {
        self.timers.clone()
    }

    /// Add an already-constructed component.
    pub fn add_component(&mut self, component: Box<dyn Component>) {
        self.components.push(component);
    }

    /// Number of live components.
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Register an initializer to run when `role`'s fragment is inserted.
    pub fn on_fragment(&mut self, role: FragmentRole, hook: InitHook) {
        self.hooks.push((role, hook));
    }

    /// A fragment finished loading and its markup was spliced in.
    ///
    /// Runs (and consumes) every initializer registered for `role`.
    /// Returns how many initializers ran.
    pub fn fragment_inserted(&mut self, role: FragmentRole) -> usize {
        let mut ran = 0;
        let mut remaining = Vec::with_capacity(self.hooks.len());

        for (hook_role, hook) in self.hooks.drain(..) {
            if hook_role == role {
                ran += 1;
                if let Some(component) = hook(&self.timers) {
                    self.components.push(component);
                } else {
                    tracing::debug!(
                        target: "montra::page",
                        ?role,
                        "fragment hook found no component markup"
                    );
                }
            } else {
                remaining.push((hook_role, hook));
            }
        }

        self.hooks = remaining;
        ran
    }

    /// Drain timers expired by `now` and route each fire to its owner.
    pub fn process_timers_at(&mut self, now: Instant) {
        for id in self.timers.process_expired_at(now) {
            let handled = self
                .components
                .iter_mut()
                .any(|component| component.on_timer(id));
            if !handled {
                tracing::trace!(target: "montra::page", ?id, "unclaimed timer fire");
            }
        }
    }

    /// Drain timers expired by the current instant.
    pub fn process_timers(&mut self) {
        self.process_timers_at(Instant::now());
    }

    /// Deliver a key press to components until one consumes it.
    ///
    /// Returns `true` if any component consumed the key.
    pub fn dispatch_key(&mut self, event: &KeyPressEvent) -> bool {
        self.components
            .iter_mut()
            .any(|component| component.on_key(event))
    }

    /// Notify all components that the viewport was resized.
    pub fn dispatch_resize(&mut self) {
        for component in &mut self.components {
            component.on_resize();
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Page")
            .field("component_count", &self.components.len())
            .field("pending_hooks", &self.hooks.len())
            .finish()
    }
}

static_assertions::assert_impl_all!(Page: Send);
