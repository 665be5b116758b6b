//! The shared page surface the widgets attach to.
//!
//! A [`Document`] stands in for everything outside a single widget: the
//! document-wide pointer stream a drag must follow once the pointer leaves the
//! widget, the page scroll lock a modal surface holds while open, and the
//! current viewport measurements.
//!
//! Both attachments are scoped. [`Document::listen`] returns a
//! [`DocumentListener`] and [`Document::lock_scroll`] returns a
//! [`ScrollLockGuard`]; dropping either releases it, so a widget that keeps the
//! guard in its state releases it on every exit path, teardown included.
//!
//! The host feeds input with [`Document::dispatch`] after delivering pointer-down
//! events to the widget under the pointer.

use std::sync::Arc;

use parking_lot::Mutex;

use gift_intake_core::logging::targets;
use gift_intake_core::{ConnectionGuard, Signal};

use super::events::{PointerEvent, PointerPhase};

/// Viewport measurements reported by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportMetrics {
    pub width: f32,
    /// Layout viewport height (the window's inner height).
    pub window_height: f32,
    /// Visible viewport height, when the platform reports one. On mobile this
    /// excludes on-screen keyboards and collapsing browser chrome.
    pub visual_height: Option<f32>,
}

impl Default for ViewportMetrics {
    fn default() -> Self {
        Self {
            width: 390.0,
            window_height: 844.0,
            visual_height: None,
        }
    }
}

impl ViewportMetrics {
    /// Metrics without a visible viewport measurement.
    pub fn new(width: f32, window_height: f32) -> Self {
        Self {
            width,
            window_height,
            visual_height: None,
        }
    }

    pub fn with_visual_height(mut self, height: f32) -> Self {
        self.visual_height = Some(height);
        self
    }

    /// The height a viewport-relative surface should size against.
    ///
    /// Prefers the visible viewport height and falls back to the window height
    /// when it is missing or not a usable measurement.
    pub fn effective_height(&self) -> f32 {
        match self.visual_height {
            Some(h) if is_usable(h) => h,
            _ if is_usable(self.window_height) => self.window_height,
            _ => 0.0,
        }
    }
}

fn is_usable(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

/// Handle for a pair of document-level pointer listeners.
///
/// Both listeners are detached when this is dropped.
#[must_use = "dropping the listener detaches it immediately"]
#[derive(Debug)]
pub struct DocumentListener {
    _moved: ConnectionGuard<PointerEvent>,
    _released: ConnectionGuard<PointerEvent>,
}

/// Holds the page scroll lock. Scrolling is restored when the last guard drops.
#[must_use = "dropping the guard releases the scroll lock immediately"]
#[derive(Debug)]
pub struct ScrollLockGuard {
    holders: Arc<Mutex<usize>>,
    changed: Signal<bool>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        let released = {
            let mut holders = self.holders.lock();
            *holders = holders.saturating_sub(1);
            *holders == 0
        };
        if released {
            tracing::debug!(target: targets::DOCUMENT, "page scroll restored");
            self.changed.emit(false);
        }
    }
}

/// The shared page surface. Share it between widgets with an `Arc`.
pub struct Document {
    viewport: Mutex<ViewportMetrics>,
    scroll_holders: Arc<Mutex<usize>>,

    /// Emitted for every pointer move anywhere on the page.
    pub pointer_moved: Signal<PointerEvent>,
    /// Emitted for every pointer up or cancel anywhere on the page.
    pub pointer_released: Signal<PointerEvent>,
    /// Emitted when the page scroll lock is taken (`true`) or released (`false`).
    pub scroll_lock_changed: Signal<bool>,
    /// Emitted when the host reports new viewport metrics.
    pub viewport_changed: Signal<ViewportMetrics>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document with default viewport metrics.
    pub fn new() -> Self {
        Self::with_viewport(ViewportMetrics::default())
    }

    /// Create a document with the given viewport metrics.
    pub fn with_viewport(viewport: ViewportMetrics) -> Self {
        Self {
            viewport: Mutex::new(viewport),
            scroll_holders: Arc::new(Mutex::new(0)),
            pointer_moved: Signal::new(),
            pointer_released: Signal::new(),
            scroll_lock_changed: Signal::new(),
            viewport_changed: Signal::new(),
        }
    }

    /// Deliver a document-level pointer event to the attached listeners.
    ///
    /// Pointer-down events are targeted at a widget, not the document, and are
    /// ignored here.
    pub fn dispatch(&self, event: PointerEvent) {
        match event.phase {
            PointerPhase::Move => self.pointer_moved.emit(event),
            PointerPhase::Up | PointerPhase::Cancel => self.pointer_released.emit(event),
            PointerPhase::Down => {}
        }
    }

    /// Attach move and release listeners for the lifetime of the returned handle.
    pub fn listen<M, R>(&self, on_move: M, on_release: R) -> DocumentListener
    where
        M: Fn(&PointerEvent) + Send + Sync + 'static,
        R: Fn(&PointerEvent) + Send + Sync + 'static,
    {
        let listener = DocumentListener {
            _moved: self.pointer_moved.connect_scoped(on_move),
            _released: self.pointer_released.connect_scoped(on_release),
        };
        tracing::trace!(
            target: targets::DOCUMENT,
            listeners = self.listener_count(),
            "document listener attached"
        );
        listener
    }

    /// Number of attached pointer listeners, move and release counted separately.
    pub fn listener_count(&self) -> usize {
        self.pointer_moved.connection_count() + self.pointer_released.connection_count()
    }

    /// Lock page scrolling until the returned guard is dropped.
    ///
    /// Locks nest: scrolling is restored only once every guard is gone.
    pub fn lock_scroll(&self) -> ScrollLockGuard {
        let acquired = {
            let mut holders = self.scroll_holders.lock();
            *holders += 1;
            *holders == 1
        };
        if acquired {
            tracing::debug!(target: targets::DOCUMENT, "page scroll locked");
            self.scroll_lock_changed.emit(true);
        }
        ScrollLockGuard {
            holders: Arc::clone(&self.scroll_holders),
            changed: self.scroll_lock_changed.clone(),
        }
    }

    /// Whether any scroll lock is currently held.
    pub fn is_scroll_locked(&self) -> bool {
        *self.scroll_holders.lock() > 0
    }

    /// Record new viewport metrics.
    pub fn set_viewport(&self, viewport: ViewportMetrics) {
        if let Some(h) = viewport.visual_height
            && !is_usable(h)
        {
            tracing::warn!(
                target: targets::DOCUMENT,
                visual_height = h,
                "unusable visual viewport height, falling back to window height"
            );
        }
        if !is_usable(viewport.window_height) {
            tracing::warn!(
                target: targets::DOCUMENT,
                window_height = viewport.window_height,
                "unusable window height"
            );
        }
        *self.viewport.lock() = viewport;
        self.viewport_changed.emit(viewport);
    }

    /// The current viewport metrics.
    pub fn viewport(&self) -> ViewportMetrics {
        *self.viewport.lock()
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("viewport", &self.viewport())
            .field("scroll_locked", &self.is_scroll_locked())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

static_assertions::assert_impl_all!(Document: Send, Sync);
