//! Gesture-dismissible bottom sheet.
//!
//! [`BottomSheet`] is a modal surface anchored to the bottom of the viewport.
//! It is dismissed by dragging its handle downward past a threshold, by a tap
//! on the backdrop, or by the host calling [`BottomSheet::request_close`]. All
//! three take the same close path: a fixed-duration close transition that
//! cannot be interrupted, after which `open_changed(false)` fires.
//!
//! The sheet's height is computed from the viewport once, when it opens, and
//! held until it closes. Page scrolling is locked for as long as the sheet is
//! open. The scroll lock and the document listeners used while dragging are
//! guards owned by the sheet's state, so they are released on every exit
//! path, including dropping the sheet mid-drag.
//!
//! The sheet does not know about its content; it only exposes its open flag,
//! geometry, and gesture state.
//!
//! # Time
//!
//! The close transition is driven by the host: call [`BottomSheet::tick`] with
//! the current time each frame while [`BottomSheet::is_closing`] is true.

use std::sync::{Arc, Weak};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

use gift_intake_core::logging::targets;
use gift_intake_core::{Rect, Signal};

use crate::config::SheetConfig;
use crate::widget::animation::Transition;
use crate::widget::document::{Document, DocumentListener, ScrollLockGuard};
use crate::widget::events::{PointerEvent, PointerId, PointerPhase};

/// Default drag distance a release must exceed to dismiss, in logical pixels.
pub const DEFAULT_DISMISS_THRESHOLD: f32 = 100.0;

/// Default length of the close transition.
pub const DEFAULT_CLOSE_DURATION: Duration = Duration::from_millis(300);

/// Default height of the drag handle strip at the top of the sheet.
pub const DEFAULT_DRAG_HANDLE_HEIGHT: f32 = 32.0;

/// How the sheet's height is determined when it opens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SheetSize {
    /// A fraction of the viewport height plus a fixed pixel offset.
    Fraction { fraction: f32, offset_px: f32 },
    /// A fixed height in logical pixels.
    Fixed(f32),
}

impl Default for SheetSize {
    fn default() -> Self {
        Self::Fraction {
            fraction: 0.9,
            offset_px: 0.0,
        }
    }
}

impl SheetSize {
    /// The sheet height for a viewport of the given height, in whole pixels.
    pub fn height_for(&self, viewport_height: f32) -> f32 {
        let height = match *self {
            Self::Fraction {
                fraction,
                offset_px,
            } => viewport_height * fraction + offset_px,
            Self::Fixed(px) => px,
        };
        height.round().max(0.0)
    }
}

/// The drag gesture state of an open sheet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SheetGesture {
    /// Resting at its open position.
    Idle,
    /// Following a pointer. `offset` is how far below its resting position
    /// the sheet is, never negative.
    Dragging {
        start_y: f32,
        offset: f32,
        pointer: PointerId,
    },
    /// Running the close transition, starting from `from_offset`.
    Closing { from_offset: f32 },
}

impl SheetGesture {
    fn offset(&self) -> f32 {
        match *self {
            Self::Idle => 0.0,
            Self::Dragging { offset, .. } => offset,
            Self::Closing { from_offset } => from_offset,
        }
    }
}

/// Coarse lifecycle phase, for hosts that only need to branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetPhase {
    Closed,
    Open,
    Dragging,
    Closing,
}

/// What a pointer-down on the sheet's area landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetHit {
    /// The drag handle strip; a drag has started.
    DragHandle,
    /// The sheet body; the event belongs to the content.
    Content,
    /// Outside the sheet; the sheet has started closing.
    Backdrop,
}

struct SheetState {
    open: bool,
    gesture: SheetGesture,
    height: f32,
    transition: Transition,
    listener: Option<DocumentListener>,
    scroll_lock: Option<ScrollLockGuard>,
}

/// Outcome of a pointer release, computed under the lock and acted on after.
enum ReleaseOutcome {
    SnappedBack { offset: f32 },
    Closing,
}

/// A modal bottom sheet dismissed by dragging down.
///
/// # Signals
///
/// - `open_changed(bool)`: Emitted when the sheet opens and when it has finished closing
/// - `close_started(())`: Emitted once when the close transition starts
/// - `drag_offset_changed(f32)`: Emitted while dragging and on snap-back
pub struct BottomSheet {
    state: Arc<Mutex<SheetState>>,
    document: Arc<Document>,
    size: SheetSize,
    dismiss_threshold: f32,
    drag_handle_height: f32,

    /// Signal emitted when the open flag changes.
    pub open_changed: Signal<bool>,

    /// Signal emitted when the close transition starts.
    pub close_started: Signal<()>,

    /// Signal emitted when the drag offset changes.
    pub drag_offset_changed: Signal<f32>,
}

impl BottomSheet {
    /// Create a closed sheet with default settings.
    pub fn new(document: Arc<Document>) -> Self {
        Self {
            state: Arc::new(Mutex::new(SheetState {
                open: false,
                gesture: SheetGesture::Idle,
                height: 0.0,
                transition: Transition::new(DEFAULT_CLOSE_DURATION),
                listener: None,
                scroll_lock: None,
            })),
            document,
            size: SheetSize::default(),
            dismiss_threshold: DEFAULT_DISMISS_THRESHOLD,
            drag_handle_height: DEFAULT_DRAG_HANDLE_HEIGHT,
            open_changed: Signal::new(),
            close_started: Signal::new(),
            drag_offset_changed: Signal::new(),
        }
    }

    /// Create a closed sheet from configuration.
    pub fn from_config(document: Arc<Document>, config: &SheetConfig) -> Self {
        Self::new(document)
            .with_dismiss_threshold(config.dismiss_threshold_px)
            .with_close_duration(Duration::from_millis(config.close_duration_ms))
            .with_drag_handle_height(config.drag_handle_height_px)
    }

    /// Set how the height is computed using the builder pattern.
    pub fn with_size(mut self, size: SheetSize) -> Self {
        self.size = size;
        self
    }

    /// Set the dismiss threshold using the builder pattern.
    pub fn with_dismiss_threshold(mut self, threshold: f32) -> Self {
        self.dismiss_threshold = threshold.max(0.0);
        self
    }

    /// Set the close transition duration using the builder pattern.
    pub fn with_close_duration(self, duration: Duration) -> Self {
        {
            let mut state = self.state.lock();
            let easing = state.transition.easing();
            state.transition = Transition::new(duration).with_easing(easing);
        }
        self
    }

    /// Set the drag handle strip height using the builder pattern.
    pub fn with_drag_handle_height(mut self, height: f32) -> Self {
        self.drag_handle_height = height.max(0.0);
        self
    }

    // =========================================================================
    // State
    // =========================================================================

    /// Whether the sheet is open. Stays true during the close transition.
    pub fn is_open(&self) -> bool {
        self.state.lock().open
    }

    pub fn is_closing(&self) -> bool {
        matches!(self.state.lock().gesture, SheetGesture::Closing { .. })
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state.lock().gesture, SheetGesture::Dragging { .. })
    }

    pub fn phase(&self) -> SheetPhase {
        let state = self.state.lock();
        match (state.open, state.gesture) {
            (false, _) => SheetPhase::Closed,
            (true, SheetGesture::Idle) => SheetPhase::Open,
            (true, SheetGesture::Dragging { .. }) => SheetPhase::Dragging,
            (true, SheetGesture::Closing { .. }) => SheetPhase::Closing,
        }
    }

    pub fn gesture(&self) -> SheetGesture {
        self.state.lock().gesture
    }

    /// How far below its resting position the sheet currently is.
    pub fn drag_offset(&self) -> f32 {
        self.state.lock().gesture.offset()
    }

    /// The height computed at the last open.
    pub fn height(&self) -> f32 {
        self.state.lock().height
    }

    pub fn size(&self) -> SheetSize {
        self.size
    }

    pub fn dismiss_threshold(&self) -> f32 {
        self.dismiss_threshold
    }

    pub fn drag_handle_height(&self) -> f32 {
        self.drag_handle_height
    }

    pub fn close_duration(&self) -> Duration {
        self.state.lock().transition.duration()
    }

    /// Close transition progress in `[0, 1]`, eased, or `None` when not closing.
    pub fn closing_progress(&self, now: Instant) -> Option<f32> {
        let state = self.state.lock();
        match state.gesture {
            SheetGesture::Closing { .. } => state.transition.eased_progress_at(now),
            _ => None,
        }
    }

    /// The sheet's rectangle in document coordinates, including the drag
    /// offset. `None` while closed.
    pub fn sheet_rect(&self) -> Option<Rect> {
        let (open, height, offset) = {
            let state = self.state.lock();
            (state.open, state.height, state.gesture.offset())
        };
        if !open {
            return None;
        }
        let viewport = self.document.viewport();
        let top = viewport.effective_height() - height + offset;
        Some(Rect::new(0.0, top, viewport.width, height))
    }

    /// The drag handle strip at the top of the sheet. `None` while closed.
    pub fn drag_handle_rect(&self) -> Option<Rect> {
        self.sheet_rect().map(|sheet| {
            Rect::new(
                sheet.left(),
                sheet.top(),
                sheet.width(),
                self.drag_handle_height.min(sheet.height()),
            )
        })
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Open the sheet, computing its height from the current viewport.
    ///
    /// Ignored while already open, including during the close transition.
    /// Returns whether the sheet opened.
    pub fn open(&self) -> bool {
        let height = {
            let mut state = self.state.lock();
            if state.open {
                if matches!(state.gesture, SheetGesture::Closing { .. }) {
                    tracing::debug!(target: targets::SHEET, "open ignored during close transition");
                }
                return false;
            }
            let height = self.size.height_for(self.document.viewport().effective_height());
            state.open = true;
            state.gesture = SheetGesture::Idle;
            state.height = height;
            height
        };
        // Taking the lock notifies listeners, which may call back into the sheet.
        let scroll_lock = self.document.lock_scroll();
        self.state.lock().scroll_lock = Some(scroll_lock);

        tracing::debug!(target: targets::SHEET, height, "sheet opened");
        self.open_changed.emit(true);
        true
    }

    /// Start closing through the same path as a drag dismiss.
    ///
    /// Used for backdrop taps and close affordances. An in-progress drag is
    /// abandoned. Returns whether a close started.
    pub fn request_close(&self, now: Instant) -> bool {
        let listener = {
            let mut state = self.state.lock();
            if !state.open || matches!(state.gesture, SheetGesture::Closing { .. }) {
                return false;
            }
            let from_offset = state.gesture.offset();
            state.gesture = SheetGesture::Closing { from_offset };
            state.transition.start_at(now);
            state.listener.take()
        };
        drop(listener);

        tracing::debug!(target: targets::SHEET, "sheet closing");
        self.close_started.emit(());
        true
    }

    /// Advance the close transition. Returns `true` when this call finished
    /// closing the sheet.
    pub fn tick(&self, now: Instant) -> bool {
        let (scroll_lock, had_offset) = {
            let mut state = self.state.lock();
            let SheetGesture::Closing { from_offset } = state.gesture else {
                return false;
            };
            if !state.transition.is_finished_at(now) {
                return false;
            }
            state.open = false;
            state.gesture = SheetGesture::Idle;
            state.transition.stop();
            (state.scroll_lock.take(), from_offset != 0.0)
        };
        drop(scroll_lock);

        tracing::debug!(target: targets::SHEET, "sheet closed");
        if had_offset {
            self.drag_offset_changed.emit(0.0);
        }
        self.open_changed.emit(false);
        true
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Pointer-down within the sheet's area.
    ///
    /// On the drag handle this starts a drag; outside the sheet it is a
    /// backdrop tap and starts closing. Returns `None` while closed or
    /// closing, or when a drag is already in progress.
    pub fn press_at(&self, event: &PointerEvent) -> Option<SheetHit> {
        if event.phase != PointerPhase::Down {
            return None;
        }
        {
            let state = self.state.lock();
            if !state.open || !matches!(state.gesture, SheetGesture::Idle) {
                return None;
            }
        }
        let sheet = self.sheet_rect()?;
        let handle = self.drag_handle_rect()?;

        if handle.contains(event.position) {
            self.begin_drag(event).then_some(SheetHit::DragHandle)
        } else if sheet.contains(event.position) {
            Some(SheetHit::Content)
        } else {
            self.request_close(event.timestamp);
            Some(SheetHit::Backdrop)
        }
    }

    /// Start a drag from a pointer-down on the drag handle.
    ///
    /// Ignored unless the sheet is open and at rest. Returns whether a drag began.
    pub fn begin_drag(&self, event: &PointerEvent) -> bool {
        {
            let mut state = self.state.lock();
            if !state.open || !matches!(state.gesture, SheetGesture::Idle) {
                return false;
            }
            state.gesture = SheetGesture::Dragging {
                start_y: event.position.y,
                offset: 0.0,
                pointer: event.pointer,
            };
            state.listener = Some(self.attach_listener());
        }
        tracing::debug!(target: targets::SHEET, pointer = ?event.pointer, "sheet drag started");
        true
    }

    fn attach_listener(&self) -> DocumentListener {
        let move_state: Weak<Mutex<SheetState>> = Arc::downgrade(&self.state);
        let release_state = move_state.clone();
        let offset_changed = self.drag_offset_changed.clone();
        let released_offset_changed = self.drag_offset_changed.clone();
        let close_started = self.close_started.clone();
        let threshold = self.dismiss_threshold;

        self.document.listen(
            move |event| {
                let Some(state) = move_state.upgrade() else {
                    return;
                };
                let changed = {
                    let mut state = state.lock();
                    let SheetGesture::Dragging {
                        start_y,
                        offset,
                        pointer,
                    } = state.gesture
                    else {
                        return;
                    };
                    if pointer != event.pointer {
                        return;
                    }
                    let next = (event.position.y - start_y).max(0.0);
                    if next == offset {
                        return;
                    }
                    state.gesture = SheetGesture::Dragging {
                        start_y,
                        offset: next,
                        pointer,
                    };
                    next
                };
                tracing::trace!(target: targets::SHEET, offset = changed, "sheet dragged");
                offset_changed.emit(changed);
            },
            move |event| {
                let Some(state) = release_state.upgrade() else {
                    return;
                };
                let (outcome, listener) = {
                    let mut state = state.lock();
                    let SheetGesture::Dragging {
                        offset, pointer, ..
                    } = state.gesture
                    else {
                        return;
                    };
                    if pointer != event.pointer {
                        return;
                    }
                    let outcome = if event.phase == PointerPhase::Up && offset > threshold {
                        state.gesture = SheetGesture::Closing {
                            from_offset: offset,
                        };
                        state.transition.start_at(event.timestamp);
                        ReleaseOutcome::Closing
                    } else {
                        state.gesture = SheetGesture::Idle;
                        ReleaseOutcome::SnappedBack { offset }
                    };
                    (outcome, state.listener.take())
                };
                drop(listener);

                match outcome {
                    ReleaseOutcome::Closing => {
                        tracing::debug!(target: targets::SHEET, "drag dismissed sheet, closing");
                        close_started.emit(());
                    }
                    ReleaseOutcome::SnappedBack { offset } => {
                        tracing::debug!(target: targets::SHEET, offset, "sheet snapped back");
                        if offset != 0.0 {
                            released_offset_changed.emit(0.0);
                        }
                    }
                }
            },
        )
    }
}

impl std::fmt::Debug for BottomSheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BottomSheet")
            .field("phase", &self.phase())
            .field("height", &self.height())
            .field("size", &self.size)
            .field("dismiss_threshold", &self.dismiss_threshold)
            .finish()
    }
}

static_assertions::assert_impl_all!(BottomSheet: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::document::ViewportMetrics;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 390x800 viewport with a 0.9 sheet: height 720, top edge at y=80.
    fn setup() -> (Arc<Document>, BottomSheet) {
        let document = Arc::new(Document::with_viewport(ViewportMetrics::new(390.0, 800.0)));
        let sheet = BottomSheet::new(Arc::clone(&document));
        (document, sheet)
    }

    fn record_open(sheet: &BottomSheet) -> Arc<Mutex<Vec<bool>>> {
        let changes = Arc::new(Mutex::new(Vec::new()));
        let changes_clone = changes.clone();
        sheet.open_changed.connect(move |&open| changes_clone.lock().push(open));
        changes
    }

    /// Drag the handle down by `distance` and release. Returns the release time.
    fn drag_and_release(document: &Document, sheet: &BottomSheet, distance: f32) -> Instant {
        let now = Instant::now();
        let down = PointerEvent::touch(1, PointerPhase::Down, (195.0, 90.0), now);
        assert_eq!(sheet.press_at(&down), Some(SheetHit::DragHandle));
        document.dispatch(PointerEvent::touch(1, PointerPhase::Move, (195.0, 90.0 + distance / 2.0), now));
        document.dispatch(PointerEvent::touch(1, PointerPhase::Move, (195.0, 90.0 + distance), now));
        document.dispatch(PointerEvent::touch(1, PointerPhase::Up, (195.0, 90.0 + distance), now));
        now
    }

    #[test]
    fn test_height_for_size() {
        let fraction = SheetSize::Fraction {
            fraction: 0.9,
            offset_px: 12.0,
        };
        assert_eq!(fraction.height_for(700.0), 642.0);
        assert_eq!(fraction.height_for(701.0), 643.0);
        assert_eq!(SheetSize::Fixed(480.4).height_for(1000.0), 480.0);
    }

    #[test]
    fn test_open_computes_height_from_visual_viewport() {
        let document = Arc::new(Document::with_viewport(
            ViewportMetrics::new(390.0, 800.0).with_visual_height(700.0),
        ));
        let sheet = BottomSheet::new(Arc::clone(&document)).with_size(SheetSize::Fraction {
            fraction: 0.9,
            offset_px: 12.0,
        });

        assert!(sheet.open());
        assert_eq!(sheet.height(), 642.0);
    }

    #[test]
    fn test_open_falls_back_to_window_height() {
        let document = Arc::new(Document::with_viewport(
            ViewportMetrics::new(390.0, 800.0).with_visual_height(f32::NAN),
        ));
        let sheet = BottomSheet::new(document);
        sheet.open();
        assert_eq!(sheet.height(), 720.0);
    }

    #[test]
    fn test_height_stable_while_open() {
        let (document, sheet) = setup();
        sheet.open();
        assert_eq!(sheet.height(), 720.0);

        document.set_viewport(ViewportMetrics::new(390.0, 800.0).with_visual_height(500.0));
        assert_eq!(sheet.height(), 720.0);

        let now = Instant::now();
        sheet.request_close(now);
        assert!(sheet.tick(now + DEFAULT_CLOSE_DURATION));
        sheet.open();
        assert_eq!(sheet.height(), 450.0);
    }

    #[test]
    fn test_open_locks_scroll_until_closed() {
        let (document, sheet) = setup();
        let opened = record_open(&sheet);

        assert!(sheet.open());
        assert!(!sheet.open());
        assert!(document.is_scroll_locked());

        let now = Instant::now();
        assert!(sheet.request_close(now));
        assert!(sheet.is_open());
        assert!(document.is_scroll_locked());
        assert!(sheet.tick(now + DEFAULT_CLOSE_DURATION));

        assert!(!sheet.is_open());
        assert!(!document.is_scroll_locked());
        assert_eq!(*opened.lock(), vec![true, false]);
    }

    #[test]
    fn test_release_at_threshold_snaps_back() {
        let (document, sheet) = setup();
        let offsets = Arc::new(Mutex::new(Vec::new()));
        let offsets_clone = offsets.clone();
        sheet.drag_offset_changed.connect(move |&o| offsets_clone.lock().push(o));
        sheet.open();

        drag_and_release(&document, &sheet, 100.0);

        assert_eq!(sheet.phase(), SheetPhase::Open);
        assert_eq!(sheet.drag_offset(), 0.0);
        assert_eq!(*offsets.lock(), vec![50.0, 100.0, 0.0]);
        assert_eq!(document.listener_count(), 0);
    }

    #[test]
    fn test_release_past_threshold_closes_once() {
        let (document, sheet) = setup();
        let opened = record_open(&sheet);
        let close_count = Arc::new(AtomicUsize::new(0));
        let close_clone = close_count.clone();
        sheet.close_started.connect(move |_| {
            close_clone.fetch_add(1, Ordering::SeqCst);
        });
        sheet.open();

        let released = drag_and_release(&document, &sheet, 101.0);
        assert_eq!(sheet.phase(), SheetPhase::Closing);
        assert_eq!(sheet.drag_offset(), 101.0);
        assert_eq!(document.listener_count(), 0);

        assert!(!sheet.tick(released + Duration::from_millis(150)));
        let progress = sheet.closing_progress(released + Duration::from_millis(150)).unwrap();
        assert!(progress > 0.0 && progress < 1.0);

        assert!(sheet.tick(released + DEFAULT_CLOSE_DURATION));
        assert!(!sheet.tick(released + DEFAULT_CLOSE_DURATION * 2));

        assert_eq!(sheet.phase(), SheetPhase::Closed);
        assert_eq!(sheet.drag_offset(), 0.0);
        assert_eq!(close_count.load(Ordering::SeqCst), 1);
        assert_eq!(*opened.lock(), vec![true, false]);
    }

    #[test]
    fn test_upward_drag_is_clamped() {
        let (document, sheet) = setup();
        sheet.open();
        let now = Instant::now();
        sheet.press_at(&PointerEvent::mouse(PointerPhase::Down, (195.0, 90.0), now));
        document.dispatch(PointerEvent::mouse(PointerPhase::Move, (195.0, 10.0), now));
        assert_eq!(sheet.drag_offset(), 0.0);
        document.dispatch(PointerEvent::mouse(PointerPhase::Move, (195.0, 130.0), now));
        assert_eq!(sheet.drag_offset(), 40.0);
    }

    #[test]
    fn test_cancel_snaps_back_even_past_threshold() {
        let (document, sheet) = setup();
        sheet.open();
        let now = Instant::now();
        sheet.press_at(&PointerEvent::touch(4, PointerPhase::Down, (195.0, 90.0), now));
        document.dispatch(PointerEvent::touch(4, PointerPhase::Move, (195.0, 400.0), now));
        document.dispatch(PointerEvent::touch(4, PointerPhase::Cancel, (195.0, 400.0), now));

        assert_eq!(sheet.phase(), SheetPhase::Open);
        assert_eq!(sheet.drag_offset(), 0.0);
    }

    #[test]
    fn test_other_pointer_ignored() {
        let (document, sheet) = setup();
        sheet.open();
        let now = Instant::now();
        sheet.press_at(&PointerEvent::touch(1, PointerPhase::Down, (195.0, 90.0), now));
        document.dispatch(PointerEvent::touch(2, PointerPhase::Move, (195.0, 400.0), now));
        document.dispatch(PointerEvent::touch(2, PointerPhase::Up, (195.0, 400.0), now));

        assert_eq!(sheet.phase(), SheetPhase::Dragging);
        assert_eq!(sheet.drag_offset(), 0.0);
    }

    #[test]
    fn test_press_targets() {
        let (_document, sheet) = setup();
        let now = Instant::now();
        let content = PointerEvent::mouse(PointerPhase::Down, (195.0, 400.0), now);
        assert_eq!(sheet.press_at(&content), None);

        sheet.open();
        assert_eq!(sheet.press_at(&content), Some(SheetHit::Content));
        assert!(!sheet.is_dragging());

        let backdrop = PointerEvent::mouse(PointerPhase::Down, (195.0, 40.0), now);
        assert_eq!(sheet.press_at(&backdrop), Some(SheetHit::Backdrop));
        assert!(sheet.is_closing());
        assert_eq!(sheet.press_at(&backdrop), None);
    }

    #[test]
    fn test_open_ignored_during_close() {
        let (_document, sheet) = setup();
        let opened = record_open(&sheet);
        sheet.open();
        let now = Instant::now();
        sheet.request_close(now);

        assert!(!sheet.open());
        assert!(!sheet.request_close(now));
        assert!(sheet.tick(now + DEFAULT_CLOSE_DURATION));
        assert!(sheet.open());
        assert_eq!(*opened.lock(), vec![true, false, true]);
    }

    #[test]
    fn test_request_close_abandons_drag() {
        let (document, sheet) = setup();
        sheet.open();
        let now = Instant::now();
        sheet.press_at(&PointerEvent::mouse(PointerPhase::Down, (195.0, 90.0), now));
        document.dispatch(PointerEvent::mouse(PointerPhase::Move, (195.0, 120.0), now));

        assert!(sheet.request_close(now));
        assert_eq!(document.listener_count(), 0);
        assert_eq!(sheet.gesture(), SheetGesture::Closing { from_offset: 30.0 });
    }

    #[test]
    fn test_drop_mid_drag_releases_everything() {
        let (document, sheet) = setup();
        sheet.open();
        let now = Instant::now();
        sheet.press_at(&PointerEvent::mouse(PointerPhase::Down, (195.0, 90.0), now));
        assert_eq!(document.listener_count(), 2);
        assert!(document.is_scroll_locked());

        drop(sheet);
        assert_eq!(document.listener_count(), 0);
        assert!(!document.is_scroll_locked());
        document.dispatch(PointerEvent::mouse(PointerPhase::Up, (195.0, 300.0), now));
    }

    #[test]
    fn test_repeated_cycles_do_not_leak() {
        let (document, sheet) = setup();
        for _ in 0..20 {
            sheet.open();
            let released = drag_and_release(&document, &sheet, 150.0);
            assert!(sheet.tick(released + DEFAULT_CLOSE_DURATION));
        }
        assert_eq!(document.listener_count(), 0);
        assert!(!document.is_scroll_locked());
    }

    #[test]
    fn test_from_config() {
        let document = Arc::new(Document::new());
        let config = SheetConfig {
            dismiss_threshold_px: 80.0,
            close_duration_ms: 120,
            drag_handle_height_px: 48.0,
        };
        let sheet = BottomSheet::from_config(document, &config);
        assert_eq!(sheet.dismiss_threshold(), 80.0);
        assert_eq!(sheet.close_duration(), Duration::from_millis(120));
        assert_eq!(sheet.drag_handle_height(), 48.0);
    }
}
