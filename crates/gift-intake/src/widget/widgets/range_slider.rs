//! Dual-handle range slider.
//!
//! [`RangeSlider`] maps a horizontal drag to one of two bounded integer values
//! while keeping them ordered: `low <= min < max <= high` holds after every
//! change, so the handles never cross or overlap.
//!
//! A drag begins on a pointer-down delivered to the slider
//! ([`RangeSlider::press_handle`] or [`RangeSlider::press_at`]). From then on
//! the slider follows the pointer through document-level listeners, so the
//! drag continues when the pointer leaves the track. The listeners are held by
//! the drag session and detach when it ends, whether by release, cancel,
//! [`RangeSlider::cancel_drag`], or dropping the slider.
//!
//! # Signals
//!
//! - `range_changed((min, max))`: Emitted on every change, continuously during a drag
//! - `handle_pressed(handle)`: Emitted when a drag starts
//! - `handle_released(handle)`: Emitted when a drag ends
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use gift_intake::widget::{Document, RangeSlider};
//!
//! let document = Arc::new(Document::new());
//! let slider = RangeSlider::new(document, 10, 500)
//!     .unwrap()
//!     .with_values(20, 100);
//!
//! slider.range_changed.connect(|&(min, max)| {
//!     println!("budget {min}..{max}");
//! });
//! assert_eq!(slider.values(), (20, 100));
//! ```

use std::sync::{Arc, Weak};

use parking_lot::Mutex;

use gift_intake_core::logging::targets;
use gift_intake_core::{Point, Rect, Signal};

use crate::error::{Error, Result};
use crate::widget::document::{Document, DocumentListener};
use crate::widget::events::{PointerEvent, PointerId};

/// Default hit radius around a handle center, in logical pixels.
pub const DEFAULT_HANDLE_RADIUS: f32 = 22.0;

/// One of the slider's two handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeHandle {
    Min,
    Max,
}

/// Inclusive outer bounds of a range slider. Always `low < high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeBounds {
    low: i32,
    high: i32,
}

impl RangeBounds {
    /// Create bounds, rejecting ranges without room for two distinct values.
    pub fn new(low: i32, high: i32) -> Result<Self> {
        if low < high {
            Ok(Self { low, high })
        } else {
            Err(Error::InvalidBounds { low, high })
        }
    }

    #[inline]
    pub fn low(&self) -> i32 {
        self.low
    }

    #[inline]
    pub fn high(&self) -> i32 {
        self.high
    }

    /// Distance from `low` to `high`, exact in `f64` for any pair of `i32` values.
    #[inline]
    fn span(&self) -> f64 {
        f64::from(self.high) - f64::from(self.low)
    }

    /// Fraction of the way from `low` to `high` that `value` sits at.
    pub fn percentage_for(&self, value: i32) -> f32 {
        ((f64::from(value) - f64::from(self.low)) / self.span()) as f32
    }

    /// The value at `ratio` along the range, rounded to the nearest integer.
    /// A NaN ratio maps to `low`.
    pub fn value_for_ratio(&self, ratio: f32) -> i32 {
        if ratio.is_nan() {
            return self.low;
        }
        let ratio = f64::from(ratio.clamp(0.0, 1.0));
        let value = (f64::from(self.low) + ratio * self.span()).round();
        value.clamp(f64::from(self.low), f64::from(self.high)) as i32
    }

    /// Force `(min, max)` into `low <= min < max <= high`, preferring to keep `min`.
    pub fn clamp_pair(&self, min: i32, max: i32) -> (i32, i32) {
        let min = min.clamp(self.low, self.high - 1);
        let max = max.clamp(min + 1, self.high);
        (min, max)
    }
}

/// Snapshot of a slider's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeState {
    pub min: i32,
    pub max: i32,
    pub bounds: RangeBounds,
    pub active_handle: Option<RangeHandle>,
}

struct DragSession {
    handle: RangeHandle,
    pointer: PointerId,
    _listener: DocumentListener,
}

struct SliderState {
    min: i32,
    max: i32,
    bounds: RangeBounds,
    track: Rect,
    drag: Option<DragSession>,
}

impl SliderState {
    fn value_for_position(&self, x: f32) -> i32 {
        let width = self.track.width();
        if width.is_nan() || width <= 0.0 {
            return self.bounds.low;
        }
        self.bounds.value_for_ratio((x - self.track.left()) / width)
    }

    /// Apply a drag of `handle` to `x`. Returns the new pair if it changed.
    fn drag_to(&mut self, handle: RangeHandle, x: f32) -> Option<(i32, i32)> {
        let value = self.value_for_position(x);
        let (min, max) = match handle {
            RangeHandle::Min => (value.min(self.max - 1).max(self.bounds.low), self.max),
            RangeHandle::Max => (self.min, value.max(self.min + 1).min(self.bounds.high)),
        };
        if (min, max) == (self.min, self.max) {
            return None;
        }
        self.min = min;
        self.max = max;
        Some((min, max))
    }

    fn handle_center(&self, handle: RangeHandle) -> Point {
        let value = match handle {
            RangeHandle::Min => self.min,
            RangeHandle::Max => self.max,
        };
        Point::new(
            self.track.left() + self.bounds.percentage_for(value) * self.track.width(),
            self.track.top() + self.track.height() / 2.0,
        )
    }

    /// Replace the values, clamped. Returns the new pair if it changed.
    fn set_values(&mut self, min: i32, max: i32) -> Option<(i32, i32)> {
        let (min, max) = self.bounds.clamp_pair(min, max);
        if (min, max) == (self.min, self.max) {
            return None;
        }
        self.min = min;
        self.max = max;
        Some((min, max))
    }
}

/// A horizontal slider selecting an ordered integer pair within fixed bounds.
pub struct RangeSlider {
    state: Arc<Mutex<SliderState>>,
    document: Arc<Document>,
    handle_radius: f32,

    /// Signal emitted when either value changes.
    pub range_changed: Signal<(i32, i32)>,

    /// Signal emitted when a handle is grabbed.
    pub handle_pressed: Signal<RangeHandle>,

    /// Signal emitted when a grabbed handle is let go.
    pub handle_released: Signal<RangeHandle>,
}

impl RangeSlider {
    /// Create a slider spanning `low..=high`, with the handles at the bounds.
    pub fn new(document: Arc<Document>, low: i32, high: i32) -> Result<Self> {
        Ok(Self::with_bounds(document, RangeBounds::new(low, high)?))
    }

    /// Create a slider over already-validated bounds.
    pub fn with_bounds(document: Arc<Document>, bounds: RangeBounds) -> Self {
        Self {
            state: Arc::new(Mutex::new(SliderState {
                min: bounds.low,
                max: bounds.high,
                bounds,
                track: Rect::ZERO,
                drag: None,
            })),
            document,
            handle_radius: DEFAULT_HANDLE_RADIUS,
            range_changed: Signal::new(),
            handle_pressed: Signal::new(),
            handle_released: Signal::new(),
        }
    }

    /// Set initial values using the builder pattern. Values are clamped.
    pub fn with_values(self, min: i32, max: i32) -> Self {
        self.state.lock().set_values(min, max);
        self
    }

    /// Set the track geometry using the builder pattern.
    pub fn with_track(self, track: Rect) -> Self {
        self.set_track(track);
        self
    }

    /// Set the handle hit radius using the builder pattern.
    pub fn with_handle_radius(mut self, radius: f32) -> Self {
        self.handle_radius = radius.max(0.0);
        self
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Current `(min, max)`.
    pub fn values(&self) -> (i32, i32) {
        let state = self.state.lock();
        (state.min, state.max)
    }

    pub fn bounds(&self) -> RangeBounds {
        self.state.lock().bounds
    }

    /// The handle being dragged, if any.
    pub fn active_handle(&self) -> Option<RangeHandle> {
        self.state.lock().drag.as_ref().map(|d| d.handle)
    }

    pub fn is_dragging(&self) -> bool {
        self.state.lock().drag.is_some()
    }

    pub fn state(&self) -> RangeState {
        let state = self.state.lock();
        RangeState {
            min: state.min,
            max: state.max,
            bounds: state.bounds,
            active_handle: state.drag.as_ref().map(|d| d.handle),
        }
    }

    pub fn handle_radius(&self) -> f32 {
        self.handle_radius
    }

    /// The track rectangle in document coordinates.
    pub fn track(&self) -> Rect {
        self.state.lock().track
    }

    /// Update the track geometry, e.g. after a layout pass.
    pub fn set_track(&self, track: Rect) {
        self.state.lock().track = track;
    }

    /// Set both values programmatically, clamped to keep them ordered and in bounds.
    ///
    /// Emits `range_changed` if the pair changed.
    pub fn set_values(&self, min: i32, max: i32) -> (i32, i32) {
        let (changed, current) = {
            let mut state = self.state.lock();
            let changed = state.set_values(min, max);
            (changed, (state.min, state.max))
        };
        if let Some(pair) = changed {
            tracing::debug!(target: targets::RANGE, min = pair.0, max = pair.1, "range set");
            self.range_changed.emit(pair);
        }
        current
    }

    /// Replace the bounds, re-clamping the current values.
    pub fn set_bounds(&self, bounds: RangeBounds) {
        let changed = {
            let mut state = self.state.lock();
            state.bounds = bounds;
            let (min, max) = (state.min, state.max);
            let clamped = bounds.clamp_pair(min, max);
            state.min = clamped.0;
            state.max = clamped.1;
            (clamped != (min, max)).then_some(clamped)
        };
        if let Some(pair) = changed {
            self.range_changed.emit(pair);
        }
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// Fraction of the track at which `value` sits.
    pub fn percentage_for(&self, value: i32) -> f32 {
        self.state.lock().bounds.percentage_for(value)
    }

    /// The value under document x-coordinate `x`, clamped to the bounds.
    ///
    /// A track without width maps everything to the low bound.
    pub fn value_for_position(&self, x: f32) -> i32 {
        self.state.lock().value_for_position(x)
    }

    /// Center of a handle in document coordinates.
    pub fn handle_center(&self, handle: RangeHandle) -> Point {
        self.state.lock().handle_center(handle)
    }

    /// The handle under `point`, if any.
    ///
    /// When both handles are in reach the nearer one wins. Equidistant handles
    /// resolve to the min handle, unless it already sits on the low bound, so
    /// handles stacked at either end can always be pulled apart.
    pub fn handle_at(&self, point: Point) -> Option<RangeHandle> {
        let state = self.state.lock();
        let min_distance = state.handle_center(RangeHandle::Min).distance_to(point);
        let max_distance = state.handle_center(RangeHandle::Max).distance_to(point);
        let min_hit = min_distance <= self.handle_radius;
        let max_hit = max_distance <= self.handle_radius;

        match (min_hit, max_hit) {
            (false, false) => None,
            (true, false) => Some(RangeHandle::Min),
            (false, true) => Some(RangeHandle::Max),
            (true, true) if min_distance < max_distance => Some(RangeHandle::Min),
            (true, true) if max_distance < min_distance => Some(RangeHandle::Max),
            (true, true) if state.min == state.bounds.low => Some(RangeHandle::Max),
            (true, true) => Some(RangeHandle::Min),
        }
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Pointer-down anywhere on the slider: grabs the handle under the pointer.
    pub fn press_at(&self, event: &PointerEvent) -> Option<RangeHandle> {
        let handle = self.handle_at(event.position)?;
        self.press_handle(handle, event).then_some(handle)
    }

    /// Pointer-down on a specific handle: starts dragging it.
    ///
    /// Ignored (returns `false`) while another drag is in progress.
    pub fn press_handle(&self, handle: RangeHandle, event: &PointerEvent) -> bool {
        {
            let mut state = self.state.lock();
            if state.drag.is_some() {
                tracing::trace!(target: targets::RANGE, ?handle, "press ignored, drag in progress");
                return false;
            }
            let listener = self.attach_listener(event.pointer);
            state.drag = Some(DragSession {
                handle,
                pointer: event.pointer,
                _listener: listener,
            });
        }

        tracing::debug!(target: targets::RANGE, ?handle, pointer = ?event.pointer, "handle pressed");
        self.handle_pressed.emit(handle);
        true
    }

    /// End the current drag without a pointer release.
    pub fn cancel_drag(&self) {
        let session = self.state.lock().drag.take();
        if let Some(session) = session {
            let handle = session.handle;
            drop(session);
            tracing::debug!(target: targets::RANGE, ?handle, "drag cancelled");
            self.handle_released.emit(handle);
        }
    }

    fn attach_listener(&self, pointer: PointerId) -> DocumentListener {
        let move_state: Weak<Mutex<SliderState>> = Arc::downgrade(&self.state);
        let release_state = move_state.clone();
        let range_changed = self.range_changed.clone();
        let handle_released = self.handle_released.clone();

        self.document.listen(
            move |event| {
                let Some(state) = move_state.upgrade() else {
                    return;
                };
                let changed = {
                    let mut state = state.lock();
                    let Some(handle) = state
                        .drag
                        .as_ref()
                        .filter(|d| d.pointer == event.pointer)
                        .map(|d| d.handle)
                    else {
                        return;
                    };
                    state.drag_to(handle, event.position.x)
                };
                if let Some((min, max)) = changed {
                    tracing::trace!(target: targets::RANGE, min, max, "range dragged");
                    range_changed.emit((min, max));
                }
            },
            move |event| {
                if event.pointer != pointer {
                    return;
                }
                let Some(state) = release_state.upgrade() else {
                    return;
                };
                let session = state.lock().drag.take_if(|d| d.pointer == pointer);
                if let Some(session) = session {
                    let handle = session.handle;
                    drop(session);
                    tracing::debug!(target: targets::RANGE, ?handle, "handle released");
                    handle_released.emit(handle);
                }
            },
        )
    }
}

impl std::fmt::Debug for RangeSlider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RangeSlider")
            .field("state", &self.state())
            .field("handle_radius", &self.handle_radius)
            .finish()
    }
}

static_assertions::assert_impl_all!(RangeSlider: Send, Sync);
