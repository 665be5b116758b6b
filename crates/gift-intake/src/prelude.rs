//! Prelude module for Gift Intake.
//!
//! This module re-exports the most commonly used types for convenient importing:
//!
//! ```
//! use gift_intake::prelude::*;
//! ```
//!
//! This provides access to:
//! - Signal system (`Signal`, `ConnectionId`, `ConnectionGuard`)
//! - Pointer plumbing (`Document`, `PointerEvent`, `ViewportMetrics`)
//! - The widgets (`BottomSheet`, `RangeSlider`, `IntakeWizard`, `WizardSheet`)
//! - The profile model and configuration

// ============================================================================
// Signals and Geometry
// ============================================================================

pub use gift_intake_core::{ConnectionGuard, ConnectionId, Point, Rect, Signal, Size};

// ============================================================================
// Input
// ============================================================================

pub use crate::widget::{
    Document, PointerEvent, PointerId, PointerPhase, TouchPhase, TouchPoint, ViewportMetrics,
};

// ============================================================================
// Widgets
// ============================================================================

pub use crate::widget::widgets::{
    BottomSheet, IntakeWizard, RangeHandle, RangeSlider, SheetHit, SheetPhase, SheetSize,
    StepInput, WizardSeed, WizardSheet, WizardStep,
};

// ============================================================================
// Profile and Configuration
// ============================================================================

pub use crate::config::IntakeConfig;
pub use crate::profile::{
    AgeInput, ClothingSize, FavouriteDrink, Gender, Occasion, ProfileDraft, Relationship,
    Sentiment,
};
pub use crate::{Error, Result};
