//! The wizard hosted in a bottom sheet.
//!
//! [`WizardSheet`] wires an [`IntakeWizard`] into a [`BottomSheet`] and drives
//! the budget step with a [`RangeSlider`]. The two lifecycles are tied
//! together: opening the sheet starts a fresh session, finishing the wizard
//! closes the sheet, and a sheet that finishes closing on an unfinished
//! session cancels it.

use std::sync::Arc;
use std::time::Instant;

use chrono::NaiveDate;

use crate::config::IntakeConfig;
use crate::error::Result;
use crate::widget::document::Document;
use crate::widget::events::PointerEvent;
use crate::widget::widgets::{BottomSheet, RangeSlider, SheetHit};

use super::{IntakeWizard, StepInput, WizardSeed, WizardStep};

/// An intake wizard inside a dismissible bottom sheet.
pub struct WizardSheet {
    document: Arc<Document>,
    sheet: BottomSheet,
    wizard: IntakeWizard,
    budget: RangeSlider,
}

impl WizardSheet {
    /// Build the sheet, wizard, and budget slider from configuration.
    ///
    /// Fails with the first problem [`IntakeConfig::validate`] reports.
    pub fn from_config(document: Arc<Document>, config: &IntakeConfig) -> Result<Self> {
        config.validate()?;
        let (min, max) = config.wizard.default_budget();
        let sheet = BottomSheet::from_config(Arc::clone(&document), &config.sheet)
            .with_size(config.wizard.sheet_size());
        let budget = RangeSlider::new(Arc::clone(&document), config.budget.low, config.budget.high)?
            .with_values(min, max)
            .with_handle_radius(config.budget.handle_radius_px);
        let wizard = IntakeWizard::new()
            .with_exit_on_first_back(config.wizard.exit_on_first_back)
            .with_default_budget(min, max);

        Ok(Self {
            document,
            sheet,
            wizard,
            budget,
        })
    }

    /// Fix the date used for age calculations using the builder pattern.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.wizard = self.wizard.with_today(today);
        self
    }

    // =========================================================================
    // Parts
    // =========================================================================

    pub fn document(&self) -> &Arc<Document> {
        &self.document
    }

    pub fn sheet(&self) -> &BottomSheet {
        &self.sheet
    }

    pub fn wizard(&self) -> &IntakeWizard {
        &self.wizard
    }

    pub fn budget(&self) -> &RangeSlider {
        &self.budget
    }

    pub fn is_open(&self) -> bool {
        self.sheet.is_open()
    }

    pub fn current_step(&self) -> WizardStep {
        self.wizard.current_step()
    }

    /// The budget step's input, read from the slider.
    pub fn budget_input(&self) -> StepInput {
        let (min, max) = self.budget.values();
        StepInput::Budget { min, max }
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Open the sheet and start a fresh wizard session.
    ///
    /// Ignored while the sheet is open or closing.
    pub fn open(&mut self, seed: WizardSeed) -> bool {
        if !self.sheet.open() {
            return false;
        }
        let (min, max) = self.wizard.default_budget();
        self.budget.cancel_drag();
        self.budget.set_values(min, max);
        self.wizard.start(seed);
        true
    }

    /// "Next" on the current step.
    pub fn advance(&mut self, input: StepInput) -> bool {
        self.wizard.advance(input)
    }

    /// "Back" on the current step. If this cancels the wizard, the sheet closes.
    pub fn retreat(&mut self, now: Instant) -> bool {
        let moved = self.wizard.retreat();
        if moved && !self.wizard.is_active() {
            self.sheet.request_close(now);
        }
        moved
    }

    /// "Finish" on the budget step, committing the slider's values.
    ///
    /// On success the sheet starts closing.
    pub fn finish(&mut self, now: Instant) -> bool {
        self.budget.cancel_drag();
        if !self.wizard.finish(self.budget_input()) {
            return false;
        }
        self.sheet.request_close(now);
        true
    }

    /// Close the sheet as a dismissal. The session is cancelled once the
    /// sheet has finished closing.
    pub fn dismiss(&self, now: Instant) -> bool {
        self.sheet.request_close(now)
    }

    /// Advance the sheet's close transition.
    ///
    /// Returns `true` when the sheet finished closing on this call; an
    /// unfinished session is cancelled at that point.
    pub fn tick(&mut self, now: Instant) -> bool {
        if !self.sheet.tick(now) {
            return false;
        }
        self.budget.cancel_drag();
        if self.wizard.is_active() {
            self.wizard.cancel();
        }
        true
    }

    /// Route a pointer-down to the sheet, and to the budget slider when the
    /// press lands on the sheet's content during the budget step.
    pub fn press_at(&self, event: &PointerEvent) -> Option<SheetHit> {
        let hit = self.sheet.press_at(event)?;
        if hit == SheetHit::Content && self.wizard.current_step() == WizardStep::Budget {
            self.budget.press_at(event);
        }
        Some(hit)
    }
}

impl std::fmt::Debug for WizardSheet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WizardSheet")
            .field("sheet", &self.sheet)
            .field("wizard", &self.wizard)
            .field("budget", &self.budget)
            .finish()
    }
}

static_assertions::assert_impl_all!(WizardSheet: Send, Sync);
