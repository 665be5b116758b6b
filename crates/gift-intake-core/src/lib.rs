//! Core primitives for Gift Intake.
//!
//! This crate provides the foundation the intake widgets are built on:
//!
//! - **Signal/Slot System**: Type-safe notification from components to hosts
//! - **Geometry**: [`Point`], [`Size`] and [`Rect`] in logical pixels
//! - **Errors**: The core [`Error`] type
//! - **Logging**: `tracing` target names for every subsystem
//!
//! # Signal/Slot Example
//!
//! ```
//! use gift_intake_core::Signal;
//!
//! let range_changed = Signal::<(i32, i32)>::new();
//!
//! let conn_id = range_changed.connect(|&(min, max)| {
//!     println!("Budget: {min}..{max}");
//! });
//!
//! range_changed.emit((20, 100));
//! range_changed.disconnect(conn_id);
//! ```

mod error;
pub mod logging;
pub mod signal;
mod types;

pub use error::{Error, Result, SignalError};
pub use signal::{ConnectionGuard, ConnectionId, Signal};
pub use types::{Point, Rect, Size};
