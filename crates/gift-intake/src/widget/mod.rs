//! Headless widgets and the input plumbing they share.
//!
//! Widgets hold no rendering state. A host renders them from their accessors,
//! feeds pointer input in, and reacts to their signals:
//!
//! 1. Pointer-down events go to the widget under the pointer
//!    (`press_at` on the widget).
//! 2. Every later move, release, and cancel goes to [`Document::dispatch`],
//!    which reaches whichever widget is dragging.
//! 3. Each frame, widgets with running transitions get a `tick(now)`.

pub mod animation;
pub mod document;
pub mod events;
pub mod widgets;

pub use animation::{Easing, Transition};
pub use document::{Document, DocumentListener, ScrollLockGuard, ViewportMetrics};
pub use events::{PointerEvent, PointerId, PointerPhase, TouchPhase, TouchPoint};
pub use widgets::{BottomSheet, IntakeWizard, RangeSlider, WizardSheet};
