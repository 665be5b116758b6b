//! Gift Intake - a headless guided-intake wizard for gift recommendations.
//!
//! The crate collects a gift recipient's profile through a six-step wizard
//! hosted in a gesture-dismissible bottom sheet, with a dual-handle range
//! slider for the budget. Everything is a plain state machine: the host
//! delivers pointer input and timestamps, renders from accessors, and listens
//! to signals.
//!
//! # Modules
//!
//! - [`profile`]: The recipient profile and its field types
//! - [`interests`]: Interest catalogs and the catalog resolver
//! - [`widget`]: Pointer plumbing and the widgets
//! - [`config`]: TOML configuration
//! - [`prelude`]: Common re-exports
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use gift_intake::{Document, IntakeConfig, WizardSheet};
//! use gift_intake::widget::widgets::WizardSeed;
//!
//! # fn main() -> gift_intake::Result<()> {
//! let document = Arc::new(Document::new());
//! let mut intake = WizardSheet::from_config(document, &IntakeConfig::default())?;
//!
//! intake.wizard().completed.connect(|profile| {
//!     println!("{}", profile.to_json().unwrap_or_default());
//! });
//! intake.open(WizardSeed::default());
//! assert!(intake.is_open());
//! # Ok(())
//! # }
//! ```

pub mod config;
mod error;
pub mod interests;
pub mod prelude;
pub mod profile;
pub mod widget;

pub use gift_intake_core::{ConnectionGuard, ConnectionId, Point, Rect, Signal, Size, logging};

pub use config::IntakeConfig;
pub use error::{Error, Result};
pub use profile::ProfileDraft;
pub use widget::{BottomSheet, Document, IntakeWizard, RangeSlider, WizardSheet};
