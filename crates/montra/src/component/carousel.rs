//! Carousel controller.
//!
//! This module provides [`Carousel`], the cyclic horizontal slide scroller:
//! a track of slides extended with leading-slide clones, an auto-advance
//! timer, indicator synchronization, and the two-phase wraparound
//! correction that keeps forward motion visually continuous.
//!
//! # How wraparound works
//!
//! The track holds the `slide_count` original slides plus `visible` clones
//! of the first `visible` slides appended at the end. Advancing past the
//! last valid position scrolls into the cloned region, which looks
//! identical to the start of the track, so the controller then *snaps*
//! (no animation) to the equivalent early index and, after a short settle
//! delay, re-renders with animation. The viewer perceives uninterrupted
//! forward motion.
//!
//! # Example
//!
//! ```ignore
//! use montra::component::{Carousel, Controls, TrackLayout};
//!
//! let mut carousel = Carousel::new(
//!     TrackLayout::new(6),
//!     Controls::all(),
//!     surface, // your CarouselSurface
//!     timers,
//! );
//!
//! carousel.next();
//! carousel.current_changed.connect(|&index| {
//!     println!("Now at {index}");
//! });
//! ```

use std::time::Duration;

use montra_core::{SharedTimers, Signal, TimerId};

use super::animation::Motion;
use super::events::{Direction, KeyPressEvent};
use super::surface::CarouselSurface;
use crate::page::Component;

/// Default number of simultaneously visible slides.
pub const DEFAULT_VISIBLE: usize = 3;

/// Default slide image width in pixels, used until a measurement arrives.
pub const DEFAULT_IMAGE_WIDTH: f32 = 440.0;

/// Default gap between slides in pixels.
pub const DEFAULT_GAP: f32 = 22.0;

/// Interval between automatic forward advances.
pub const AUTO_ADVANCE_INTERVAL: Duration = Duration::from_millis(3500);

/// Delay between the wraparound snap and the animated re-render.
///
/// The snap must be applied (painted) by the host before the animated
/// re-render fires; this fixed delay approximates that ordering in lieu of
/// a paint-completion signal. Known flakiness risk on slow hosts.
pub const SETTLE_DELAY: Duration = Duration::from_millis(20);

/// Geometry of a carousel track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackLayout {
    /// Number of original slides.
    pub slide_count: usize,
    /// Number of simultaneously visible slides.
    pub visible: usize,
    /// Slide image width in pixels.
    pub image_width: f32,
    /// Gap between adjacent slides in pixels.
    pub gap: f32,
}

impl TrackLayout {
    /// Create a layout for `slide_count` slides with default geometry.
    pub fn new(slide_count: usize) -> Self {
        Self {
            slide_count,
            visible: DEFAULT_VISIBLE,
            image_width: DEFAULT_IMAGE_WIDTH,
            gap: DEFAULT_GAP,
        }
    }

    /// Set the visible slide count using builder pattern.
    pub fn with_visible(mut self, visible: usize) -> Self {
        self.visible = visible;
        self
    }

    /// Set the initial image width using builder pattern.
    pub fn with_image_width(mut self, width: f32) -> Self {
        self.image_width = width;
        self
    }

    /// Set the slide gap using builder pattern.
    pub fn with_gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }
}

/// Which navigation elements the host found in its document.
///
/// A missing control disables that direction; auto-advance reuses the
/// forward control's handler, so it requires `next`. Missing indicators
/// disable indicator sync only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    /// A forward ("next") control exists.
    pub next: bool,
    /// A backward ("prev") control exists.
    pub prev: bool,
    /// An indicator strip exists.
    pub indicators: bool,
}

impl Controls {
    /// All navigation elements present.
    pub fn all() -> Self {
        Self {
            next: true,
            prev: true,
            indicators: true,
        }
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::all()
    }
}

/// A cyclic, animated, auto-advancing slide carousel.
///
/// The controller owns the track index and all timing; the
/// [`CarouselSurface`] owns the pixels.
///
/// # Signals
///
/// - `current_changed(i32)`: Emitted whenever the track index changes.
pub struct Carousel<S: CarouselSurface> {
    /// Number of original slides.
    slide_count: usize,
    /// Number of simultaneously visible slides.
    visible: usize,
    /// Track length including appended clones.
    track_len: usize,
    /// Position of the leftmost fully-visible slide. Normally within
    /// `[0, track_len - visible]`; transiently outside immediately after a
    /// wrap, before the settle correction.
    index: i32,
    /// Current slide image width in pixels.
    image_width: f32,
    /// Gap between adjacent slides in pixels.
    gap: f32,
    /// Which navigation elements exist.
    controls: Controls,
    /// Rendering seam.
    surface: S,
    /// Shared timer service.
    timers: SharedTimers,
    /// Repeating auto-advance timer, when enabled.
    auto_timer: Option<TimerId>,
    /// Pending settle timer after a wraparound snap.
    settle_timer: Option<TimerId>,

    /// Signal emitted when the track index changes.
    pub current_changed: Signal<i32>,
}

impl<S: CarouselSurface> Carousel<S> {
    /// Create a carousel over `layout.slide_count` slides.
    ///
    /// Clones are appended only when there are at least `visible` slides;
    /// with fewer, the controller still operates but wraparound
    /// correctness is not guaranteed (a limitation of the cloning scheme,
    /// not a fix target). The initial position is rendered immediately,
    /// and the first image is measured if it has already loaded.
    pub fn new(layout: TrackLayout, controls: Controls, surface: S, timers: SharedTimers) -> Self {
        let track_len = if layout.slide_count >= layout.visible {
            layout.slide_count + layout.visible
        } else {
            layout.slide_count
        };

        let auto_timer = (controls.next && layout.slide_count > 0)
            .then(|| timers.start_repeating(AUTO_ADVANCE_INTERVAL));

        let mut carousel = Self {
            slide_count: layout.slide_count,
            visible: layout.visible,
            track_len,
            index: 0,
            image_width: layout.image_width,
            gap: layout.gap,
            controls,
            surface,
            timers,
            auto_timer,
            settle_timer: None,
            current_changed: Signal::new(),
        };

        carousel.refresh_measurement();
        carousel.render(Motion::Snap);
        carousel
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Advance one slide in the given direction.
    ///
    /// Returns `true` if the move was accepted. A direction without a
    /// control is disabled; an empty track never moves.
    pub fn advance(&mut self, direction: Direction) -> bool {
        match direction {
            Direction::Forward if !self.controls.next => return false,
            Direction::Backward if !self.controls.prev => return false,
            _ => {}
        }
        if self.track_len == 0 {
            return false;
        }

        self.index += direction.delta();
        let max = self.max_index();

        if direction == Direction::Forward && self.index > max {
            // Scrolled past the clones: the position is visually identical
            // to the track start, so reposition to the equivalent early
            // index without animation, then re-render animated after the
            // settle delay.
            self.index = 1;
            self.render(Motion::Snap);
            self.schedule_settle();
        } else if direction == Direction::Backward && self.index < 0 {
            self.index = max - 1;
            self.render(Motion::Snap);
            self.schedule_settle();
        } else {
            self.render(Motion::animated());
        }

        tracing::debug!(
            target: "montra::carousel",
            index = self.index,
            ?direction,
            "advanced"
        );
        self.current_changed.emit(self.index);
        true
    }

    /// Advance forward (the "next" control).
    pub fn next(&mut self) -> bool {
        self.advance(Direction::Forward)
    }

    /// Advance backward (the "prev" control).
    pub fn prev(&mut self) -> bool {
        self.advance(Direction::Backward)
    }

    /// Jump directly to an original slide (an indicator click).
    ///
    /// Returns `true` if the jump was accepted.
    pub fn go_to(&mut self, slide: usize) -> bool {
        if !self.controls.indicators || slide >= self.slide_count {
            return false;
        }

        self.index = slide as i32;
        self.render(Motion::animated());
        self.current_changed.emit(self.index);
        true
    }

    /// Complete a pending wraparound correction.
    ///
    /// Re-renders the current position with animation. Reads the *latest*
    /// index, so advances that landed within the settle window are
    /// preserved. Idempotent: calling with no correction pending simply
    /// re-applies the current offset.
    pub fn settle(&mut self) {
        self.settle_timer = None;
        self.render(Motion::animated());
    }

    // =========================================================================
    // Measurement
    // =========================================================================

    /// Re-read the first slide image's rendered width from the surface.
    ///
    /// Keeps the current measurement when the image has not loaded yet.
    /// Idempotent.
    pub fn refresh_measurement(&mut self) {
        if let Some(width) = self.surface.first_image_width() {
            self.image_width = width;
        }
    }

    /// Notification that the first slide's image finished loading.
    pub fn image_loaded(&mut self) {
        self.refresh_measurement();
    }

    /// Notification that the viewport was resized.
    pub fn resized(&mut self) {
        self.refresh_measurement();
    }

    // =========================================================================
    // State access
    // =========================================================================

    /// The current track index.
    pub fn index(&self) -> i32 {
        self.index
    }

    /// Number of original slides.
    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    /// Track length including clones.
    pub fn track_len(&self) -> usize {
        self.track_len
    }

    /// The current pixel offset for the track position.
    pub fn offset(&self) -> f32 {
        self.index as f32 * (self.image_width + self.gap)
    }

    /// The current image width measurement.
    pub fn image_width(&self) -> f32 {
        self.image_width
    }

    /// Whether a wraparound correction is waiting on its settle delay.
    pub fn pending_settle(&self) -> bool {
        self.settle_timer.is_some()
    }

    /// Whether the auto-advance timer is running.
    pub fn auto_advance_enabled(&self) -> bool {
        self.auto_timer.is_some()
    }

    /// Get a reference to the rendering surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Get a mutable reference to the rendering surface.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Largest index that keeps `visible` slides fully on screen.
    fn max_index(&self) -> i32 {
        self.track_len as i32 - self.visible as i32
    }

    fn render(&mut self, motion: Motion) {
        let offset = self.offset();
        self.surface.set_offset(offset, motion);
        self.update_indicators();
    }

    fn update_indicators(&mut self) {
        if !self.controls.indicators {
            return;
        }
        // Map any in-range-or-clone index back to its original slide.
        let active = if self.slide_count == 0 {
            None
        } else {
            Some(self.index.rem_euclid(self.slide_count as i32) as usize)
        };
        self.surface.set_active_indicator(active);
    }

    fn schedule_settle(&mut self) {
        // Only the most recent settle timer is honored; an earlier one
        // still in flight fires unclaimed.
        self.settle_timer = Some(self.timers.start_one_shot(SETTLE_DELAY));
    }
}

impl<S: CarouselSurface + Send> Component for Carousel<S> {
    fn on_timer(&mut self, id: TimerId) -> bool {
        if self.settle_timer == Some(id) {
            self.settle();
            return true;
        }
        if self.auto_timer == Some(id) {
            // Auto-advance shares the forward control's path, including its
            // overflow handling.
            self.advance(Direction::Forward);
            return true;
        }
        false
    }

    fn on_key(&mut self, _event: &KeyPressEvent) -> bool {
        false
    }

    fn on_resize(&mut self) {
        self.resized();
    }
}

impl<S: CarouselSurface> std::fmt::Debug for Carousel<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Carousel")
            .field("slide_count", &self.slide_count)
            .field("track_len", &self.track_len)
            .field("index", &self.index)
            .field("pending_settle", &self.pending_settle())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;

    /// Recording surface double.
    #[derive(Default)]
    struct RecordingSurface {
        offsets: Vec<(f32, Motion)>,
        indicators: Vec<Option<usize>>,
        image_width: Option<f32>,
    }

    impl RecordingSurface {
        fn last_offset(&self) -> (f32, Motion) {
            *self.offsets.last().expect("at least one render")
        }

        fn last_indicator(&self) -> Option<usize> {
            *self.indicators.last().expect("at least one indicator update")
        }
    }

    impl CarouselSurface for RecordingSurface {
        fn set_offset(&mut self, offset: f32, motion: Motion) {
            self.offsets.push((offset, motion));
        }

        fn set_active_indicator(&mut self, index: Option<usize>) {
            self.indicators.push(index);
        }

        fn first_image_width(&self) -> Option<f32> {
            self.image_width
        }
    }

    /// Six slides, three visible: track_len 9, valid positions 0..=6.
    fn carousel() -> (Carousel<RecordingSurface>, SharedTimers) {
        let timers = SharedTimers::new();
        let carousel = Carousel::new(
            TrackLayout::new(6),
            Controls::all(),
            RecordingSurface::default(),
            timers.clone(),
        );
        (carousel, timers)
    }

    fn fire_due_timers(carousel: &mut Carousel<RecordingSurface>, timers: &SharedTimers, after: Duration) {
        for id in timers.process_expired_at(Instant::now() + after) {
            carousel.on_timer(id);
        }
    }

    #[test]
    fn test_clone_extension() {
        let (carousel, _) = carousel();
        assert_eq!(carousel.slide_count(), 6);
        assert_eq!(carousel.track_len(), 9);
        assert_eq!(carousel.index(), 0);
    }

    #[test]
    fn test_cloning_skipped_below_visible() {
        let timers = SharedTimers::new();
        let carousel = Carousel::new(
            TrackLayout::new(2),
            Controls::all(),
            RecordingSurface::default(),
            timers,
        );
        assert_eq!(carousel.track_len(), 2);
    }

    #[test]
    fn test_offset_invariant_during_normal_advances() {
        let (mut carousel, _) = carousel();

        for expected in 1..=6 {
            assert!(carousel.next());
            assert_eq!(carousel.index(), expected);
            let (offset, motion) = carousel.surface().last_offset();
            assert_eq!(offset, expected as f32 * (DEFAULT_IMAGE_WIDTH + DEFAULT_GAP));
            assert!(motion.is_animated());
            assert!(!carousel.pending_settle());
        }
    }

    #[test]
    fn test_forward_wrap_settles_at_one() {
        let (mut carousel, timers) = carousel();

        // Walk to the last valid position (track_len - visible = 6).
        for _ in 0..6 {
            carousel.next();
        }
        assert_eq!(carousel.index(), 6);

        // The overflowing advance snaps to index 1 and schedules a settle.
        carousel.next();
        assert_eq!(carousel.index(), 1);
        let (offset, motion) = carousel.surface().last_offset();
        assert_eq!(offset, 1.0 * (DEFAULT_IMAGE_WIDTH + DEFAULT_GAP));
        assert_eq!(motion, Motion::Snap);
        assert!(carousel.pending_settle());

        // After the settle delay, the same index is re-rendered animated.
        fire_due_timers(&mut carousel, &timers, SETTLE_DELAY);
        assert!(!carousel.pending_settle());
        assert_eq!(carousel.index(), 1);
        let (offset, motion) = carousel.surface().last_offset();
        assert_eq!(offset, 1.0 * (DEFAULT_IMAGE_WIDTH + DEFAULT_GAP));
        assert!(motion.is_animated());
    }

    #[test]
    fn test_backward_wrap_settles_at_max_minus_one() {
        let (mut carousel, timers) = carousel();

        carousel.prev();
        // track_len - visible - 1 = 5.
        assert_eq!(carousel.index(), 5);
        assert_eq!(carousel.surface().last_offset().1, Motion::Snap);
        assert!(carousel.pending_settle());

        fire_due_timers(&mut carousel, &timers, SETTLE_DELAY);
        assert_eq!(carousel.index(), 5);
        assert!(carousel.surface().last_offset().1.is_animated());
    }

    #[test]
    fn test_wrap_boundary_is_exact() {
        let (mut carousel, _) = carousel();

        // No wrap while the tentative index stays within track_len - visible.
        for _ in 0..4 {
            carousel.next();
        }
        assert_eq!(carousel.index(), 4);
        assert!(!carousel.pending_settle());

        carousel.next();
        carousel.next();
        assert_eq!(carousel.index(), 6);
        assert!(!carousel.pending_settle());

        // Only the advance that would exceed the boundary wraps.
        carousel.next();
        assert_eq!(carousel.index(), 1);
        assert!(carousel.pending_settle());
    }

    #[test]
    fn test_settle_reads_latest_index() {
        let (mut carousel, timers) = carousel();

        for _ in 0..7 {
            carousel.next();
        }
        assert_eq!(carousel.index(), 1);
        assert!(carousel.pending_settle());

        // A second advance lands within the settle window.
        carousel.next();
        assert_eq!(carousel.index(), 2);

        fire_due_timers(&mut carousel, &timers, SETTLE_DELAY);
        // The correction re-rendered the latest index, not a stale capture.
        assert_eq!(carousel.index(), 2);
        let (offset, motion) = carousel.surface().last_offset();
        assert_eq!(offset, 2.0 * (DEFAULT_IMAGE_WIDTH + DEFAULT_GAP));
        assert!(motion.is_animated());
    }

    #[test]
    fn test_indicator_maps_clone_region_to_original() {
        let (mut carousel, _) = carousel();

        for _ in 0..6 {
            carousel.next();
        }
        // Index 6 is the first clone, which mirrors slide 0.
        assert_eq!(carousel.surface().last_indicator(), Some(0));

        carousel.go_to(3);
        assert_eq!(carousel.surface().last_indicator(), Some(3));
    }

    #[test]
    fn test_indicator_guard_with_zero_slides() {
        let timers = SharedTimers::new();
        let mut carousel = Carousel::new(
            TrackLayout::new(0),
            Controls::all(),
            RecordingSurface::default(),
            timers,
        );
        assert_eq!(carousel.surface().last_indicator(), None);
        // An empty track never moves and never starts auto-advance.
        assert!(!carousel.next());
        assert!(!carousel.auto_advance_enabled());
    }

    #[test]
    fn test_go_to_rejects_clone_indices() {
        let (mut carousel, _) = carousel();
        assert!(!carousel.go_to(6));
        assert!(carousel.go_to(5));
        assert_eq!(carousel.index(), 5);
    }

    #[test]
    fn test_disabled_directions() {
        let timers = SharedTimers::new();
        let mut carousel = Carousel::new(
            TrackLayout::new(6),
            Controls {
                next: false,
                prev: true,
                indicators: true,
            },
            RecordingSurface::default(),
            timers,
        );

        assert!(!carousel.next());
        assert_eq!(carousel.index(), 0);
        // Auto-advance depends on the forward control.
        assert!(!carousel.auto_advance_enabled());
        assert!(carousel.prev());
    }

    #[test]
    fn test_auto_advance_shares_forward_path() {
        let (mut carousel, timers) = carousel();
        assert!(carousel.auto_advance_enabled());

        fire_due_timers(&mut carousel, &timers, AUTO_ADVANCE_INTERVAL);
        assert_eq!(carousel.index(), 1);
        assert!(carousel.surface().last_offset().1.is_animated());
    }

    #[test]
    fn test_measurement_refresh_on_resize() {
        let (mut carousel, _) = carousel();
        assert_eq!(carousel.image_width(), DEFAULT_IMAGE_WIDTH);

        carousel.surface_mut().image_width = Some(320.0);
        carousel.resized();
        assert_eq!(carousel.image_width(), 320.0);

        carousel.next();
        assert_eq!(carousel.surface().last_offset().0, 1.0 * (320.0 + DEFAULT_GAP));
    }

    #[test]
    fn test_measurement_deferred_until_image_load() {
        let timers = SharedTimers::new();
        let mut surface = RecordingSurface::default();
        surface.image_width = None;
        let mut carousel = Carousel::new(
            TrackLayout::new(6),
            Controls::all(),
            surface,
            timers,
        );

        // Unmeasured: the default width holds.
        assert_eq!(carousel.image_width(), DEFAULT_IMAGE_WIDTH);

        carousel.surface_mut().image_width = Some(280.0);
        carousel.image_loaded();
        assert_eq!(carousel.image_width(), 280.0);
    }

    #[test]
    fn test_settle_is_idempotent() {
        let (mut carousel, _) = carousel();
        carousel.next();

        let before = carousel.offset();
        carousel.settle();
        carousel.settle();
        assert_eq!(carousel.offset(), before);
        assert_eq!(carousel.index(), 1);
    }
}
