//! Intake widgets.
//!
//! - [`RangeSlider`]: Dual-handle bounded range
//! - [`BottomSheet`]: Modal sheet dismissed by dragging down
//! - [`IntakeWizard`]: The six-step gift intake flow
//! - [`WizardSheet`]: The wizard hosted in a bottom sheet

mod bottom_sheet;
mod range_slider;
pub mod wizard;

pub use bottom_sheet::{
    BottomSheet, DEFAULT_CLOSE_DURATION, DEFAULT_DISMISS_THRESHOLD, DEFAULT_DRAG_HANDLE_HEIGHT,
    SheetGesture, SheetHit, SheetPhase, SheetSize,
};
pub use range_slider::{
    DEFAULT_HANDLE_RADIUS, RangeBounds, RangeHandle, RangeSlider, RangeState,
};
pub use wizard::{
    IntakeWizard, STEPS, SessionState, StepInput, StepSchema, StepValidator, ValidationError,
    ValidationResult, WizardSeed, WizardSheet, WizardStep,
};
