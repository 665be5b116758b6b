//! Logging targets for Gift Intake.
//!
//! Gift Intake uses the `tracing` crate for instrumentation and never installs
//! a subscriber itself. To see logs, install one in the host application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("gift_intake::sheet=debug,gift_intake::wizard=debug")
//!     .init();
//! ```
//!
//! Per-move drag updates are logged at `trace`; state transitions (step
//! changes, sheet open/close, catalog resolution) at `debug`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "gift_intake_core::signal";
    /// Wizard step engine target.
    pub const WIZARD: &str = "gift_intake::wizard";
    /// Bottom sheet gesture and lifecycle target.
    pub const SHEET: &str = "gift_intake::sheet";
    /// Range slider target.
    pub const RANGE: &str = "gift_intake::range";
    /// Interest catalog resolution target.
    pub const INTERESTS: &str = "gift_intake::interests";
    /// Document-level listeners, scroll lock and viewport target.
    pub const DOCUMENT: &str = "gift_intake::document";
    /// Configuration loading target.
    pub const CONFIG: &str = "gift_intake::config";
}
