//! Configuration for the intake widgets.
//!
//! [`IntakeConfig`] is loaded from TOML. Every field has a default, so a file
//! only needs the values it changes:
//!
//! ```toml
//! [sheet]
//! dismiss_threshold_px = 80.0
//!
//! [wizard]
//! exit_on_first_back = true
//!
//! [budget]
//! high = 1000
//! ```
//!
//! Values are validated on load; a config that parses but cannot produce
//! working widgets is rejected with [`Error::InvalidConfig`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use gift_intake_core::logging::targets;

use crate::error::{Error, Result};
use crate::widget::widgets::SheetSize;

/// Bottom sheet gesture settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Drag distance a release must exceed to dismiss.
    pub dismiss_threshold_px: f32,
    /// Length of the close transition.
    pub close_duration_ms: u64,
    /// Height of the drag handle strip.
    pub drag_handle_height_px: f32,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            dismiss_threshold_px: 100.0,
            close_duration_ms: 300,
            drag_handle_height_px: 32.0,
        }
    }
}

/// Wizard flow settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Fraction of the viewport height the wizard sheet takes.
    pub sheet_fraction: f32,
    /// Fixed pixels added to the fractional height.
    pub sheet_offset_px: f32,
    /// Whether "Back" on the first step cancels the wizard.
    pub exit_on_first_back: bool,
    /// Budget the budget step starts at.
    pub default_min_budget: i32,
    pub default_max_budget: i32,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            sheet_fraction: 0.9,
            sheet_offset_px: 12.0,
            exit_on_first_back: false,
            default_min_budget: 20,
            default_max_budget: 100,
        }
    }
}

impl WizardConfig {
    /// The wizard sheet's size.
    pub fn sheet_size(&self) -> SheetSize {
        SheetSize::Fraction {
            fraction: self.sheet_fraction,
            offset_px: self.sheet_offset_px,
        }
    }

    pub fn default_budget(&self) -> (i32, i32) {
        (self.default_min_budget, self.default_max_budget)
    }
}

/// Budget slider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetConfig {
    /// Lowest selectable budget.
    pub low: i32,
    /// Highest selectable budget.
    pub high: i32,
    /// Hit radius around each slider handle.
    pub handle_radius_px: f32,
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self {
            low: 10,
            high: 500,
            handle_radius_px: 22.0,
        }
    }
}

/// Complete intake configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    pub sheet: SheetConfig,
    pub wizard: WizardConfig,
    pub budget: BudgetConfig,
}

impl IntakeConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(target: targets::CONFIG, path = %path.display(), "loaded intake config");
        Ok(config)
    }

    /// Serialize to a TOML document.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the configuration to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_toml_string()?).map_err(|e| Error::io(path, e))
    }

    /// Check that every value can produce working widgets.
    pub fn validate(&self) -> Result<()> {
        let sheet = &self.sheet;
        if !(sheet.dismiss_threshold_px.is_finite() && sheet.dismiss_threshold_px >= 0.0) {
            return Err(Error::invalid_config(
                "sheet.dismiss_threshold_px",
                "must be a non-negative number",
            ));
        }
        if !(sheet.drag_handle_height_px.is_finite() && sheet.drag_handle_height_px > 0.0) {
            return Err(Error::invalid_config(
                "sheet.drag_handle_height_px",
                "must be a positive number",
            ));
        }

        let wizard = &self.wizard;
        if !(wizard.sheet_fraction > 0.0 && wizard.sheet_fraction <= 1.0) {
            return Err(Error::invalid_config(
                "wizard.sheet_fraction",
                format!("must be in (0, 1], got {}", wizard.sheet_fraction),
            ));
        }
        if !wizard.sheet_offset_px.is_finite() {
            return Err(Error::invalid_config("wizard.sheet_offset_px", "must be finite"));
        }

        let budget = &self.budget;
        if budget.low >= budget.high {
            return Err(Error::invalid_config(
                "budget",
                format!("low ({}) must be below high ({})", budget.low, budget.high),
            ));
        }
        if !(budget.handle_radius_px.is_finite() && budget.handle_radius_px > 0.0) {
            return Err(Error::invalid_config(
                "budget.handle_radius_px",
                "must be a positive number",
            ));
        }

        let (min, max) = wizard.default_budget();
        if !(budget.low <= min && min < max && max <= budget.high) {
            return Err(Error::invalid_config(
                "wizard.default_min_budget",
                format!(
                    "default budget {min}..{max} must be ordered and within {}..{}",
                    budget.low, budget.high
                ),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = IntakeConfig::default();
        config.validate().unwrap();
        assert_eq!(config.sheet.dismiss_threshold_px, 100.0);
        assert_eq!(config.wizard.default_budget(), (20, 100));
        assert_eq!(
            config.wizard.sheet_size(),
            SheetSize::Fraction {
                fraction: 0.9,
                offset_px: 12.0
            }
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = IntakeConfig::from_toml_str(
            r#"
            [sheet]
            dismiss_threshold_px = 80.0

            [wizard]
            exit_on_first_back = true
            "#,
        )
        .unwrap();

        assert_eq!(config.sheet.dismiss_threshold_px, 80.0);
        assert_eq!(config.sheet.close_duration_ms, 300);
        assert!(config.wizard.exit_on_first_back);
        assert_eq!(config.budget, BudgetConfig::default());
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(IntakeConfig::from_toml_str("").unwrap(), IntakeConfig::default());
    }

    #[test]
    fn test_rejects_collapsed_budget_bounds() {
        let err = IntakeConfig::from_toml_str("[budget]\nlow = 50\nhigh = 50\n").unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { field: "budget", .. }));
    }

    #[test]
    fn test_rejects_default_budget_outside_bounds() {
        let err = IntakeConfig::from_toml_str(
            "[wizard]\ndefault_min_budget = 5\n[budget]\nlow = 10\nhigh = 500\n",
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConfig {
                field: "wizard.default_min_budget",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_bad_fraction() {
        let err = IntakeConfig::from_toml_str("[wizard]\nsheet_fraction = 1.5\n").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidConfig {
                field: "wizard.sheet_fraction",
                ..
            }
        ));
    }

    #[test]
    fn test_parse_error() {
        let err = IntakeConfig::from_toml_str("[sheet\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[budget]\nhigh = 1000\nhandle_radius_px = 30.0").unwrap();

        let config = IntakeConfig::load(file.path()).unwrap();
        assert_eq!(config.budget.high, 1000);
        assert_eq!(config.budget.handle_radius_px, 30.0);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        let err = IntakeConfig::load(&path).unwrap_err();
        match err {
            Error::Io { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("intake.toml");
        let mut config = IntakeConfig::default();
        config.wizard.exit_on_first_back = true;
        config.sheet.close_duration_ms = 450;

        config.save(&path).unwrap();
        assert_eq!(IntakeConfig::load(&path).unwrap(), config);
    }
}
