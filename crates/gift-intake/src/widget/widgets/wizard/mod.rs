//! The gift intake wizard.
//!
//! [`IntakeWizard`] walks the user through six fixed steps, accumulating a
//! [`ProfileDraft`]. Each step edits a local [`StepInput`]; the input is
//! validated against the step's schema and merged into the draft only when
//! the wizard advances. "Back" never validates and never commits.
//!
//! Entering the interests step, from either direction, resolves which
//! interest catalog to present from the relationship, age, and gender
//! committed so far. Selections that are not in the newly resolved set are
//! pruned from the draft and reported through `interests_pruned`.
//!
//! # Example
//!
//! ```
//! use gift_intake::profile::{Occasion, Relationship};
//! use gift_intake::widget::widgets::{IntakeWizard, StepInput, WizardSeed};
//!
//! let mut wizard = IntakeWizard::new();
//! wizard.completed.connect(|draft| {
//!     println!("profile ready: {:?}", draft.relationship);
//! });
//!
//! wizard.start(WizardSeed::default());
//! assert!(wizard.advance(StepInput::RelationshipOccasion {
//!     relationship: Some(Relationship::Mother),
//!     name: String::new(),
//!     occasion: Some(Occasion::MothersDay),
//! }));
//! assert_eq!(wizard.progress(), (2, 6));
//! ```
//!
//! # Signals
//!
//! - `current_step_changed(step)`: Emitted on every step change, including the start of a session
//! - `validation_failed(result)`: Emitted when "Next" or "Finish" is refused
//! - `interests_pruned(values)`: Emitted when entering the interests step drops stale selections
//! - `completed(draft)`: Emitted exactly once per session, on finishing the last step
//! - `cancelled(())`: Emitted when an active session is abandoned
//! - `close_requested(())`: Emitted after `completed`, asking the host to close its container

mod host;
mod step;

use chrono::NaiveDate;

use gift_intake_core::Signal;
use gift_intake_core::logging::targets;

use crate::interests::{self, ResolvedInterests};
use crate::profile::{AgeInput, Gender, ProfileDraft, Relationship};

pub use host::WizardSheet;
pub use step::{
    STEPS, StepInput, StepSchema, StepValidator, ValidationError, ValidationResult, WizardStep,
};

/// Lifecycle of a wizard session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    /// No session has started yet.
    #[default]
    Idle,
    Active,
    /// Finished; `completed` has fired.
    Completed,
    /// Abandoned before completion; the draft was discarded.
    Cancelled,
}

/// Values the host may pre-fill when starting a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WizardSeed {
    pub relationship: Option<Relationship>,
    pub age: Option<AgeInput>,
    pub gender: Option<Gender>,
}

impl WizardSeed {
    pub fn with_relationship(mut self, relationship: Relationship) -> Self {
        self.relationship = Some(relationship);
        self
    }

    pub fn with_age(mut self, age: AgeInput) -> Self {
        self.age = Some(age);
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }
}

/// The six-step gift intake wizard.
pub struct IntakeWizard {
    session: SessionState,
    step: WizardStep,
    draft: ProfileDraft,
    interest_options: Option<ResolvedInterests>,
    today: Option<NaiveDate>,
    exit_on_first_back: bool,
    default_budget: (i32, i32),

    /// Signal emitted when the current step changes.
    pub current_step_changed: Signal<WizardStep>,

    /// Signal emitted when an advance or finish is refused.
    pub validation_failed: Signal<ValidationResult>,

    /// Signal emitted with the interest values dropped on entering the interests step.
    pub interests_pruned: Signal<Vec<String>>,

    /// Signal emitted with the finished profile.
    pub completed: Signal<ProfileDraft>,

    /// Signal emitted when an active session is abandoned.
    pub cancelled: Signal<()>,

    /// Signal emitted when the wizard wants its container closed.
    pub close_requested: Signal<()>,
}

impl Default for IntakeWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl IntakeWizard {
    /// Create a wizard with no session started.
    pub fn new() -> Self {
        let default_budget = (20, 100);
        Self {
            session: SessionState::Idle,
            step: WizardStep::FIRST,
            draft: ProfileDraft::with_budget(default_budget.0, default_budget.1),
            interest_options: None,
            today: None,
            exit_on_first_back: false,
            default_budget,
            current_step_changed: Signal::new(),
            validation_failed: Signal::new(),
            interests_pruned: Signal::new(),
            completed: Signal::new(),
            cancelled: Signal::new(),
            close_requested: Signal::new(),
        }
    }

    /// Fix the date used to turn a date of birth into an age.
    ///
    /// Defaults to the local calendar date at the time of each check.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Make "Back" on the first step cancel the wizard.
    pub fn with_exit_on_first_back(mut self, exit: bool) -> Self {
        self.exit_on_first_back = exit;
        self
    }

    /// Set the budget a new session starts with.
    pub fn with_default_budget(mut self, min: i32, max: i32) -> Self {
        self.default_budget = (min, max);
        if self.session != SessionState::Active {
            self.draft.min_budget = min;
            self.draft.max_budget = max;
        }
        self
    }

    // =========================================================================
    // State
    // =========================================================================

    pub fn session_state(&self) -> SessionState {
        self.session
    }

    pub fn is_active(&self) -> bool {
        self.session == SessionState::Active
    }

    pub fn current_step(&self) -> WizardStep {
        self.step
    }

    /// `(current step index, total steps)`, for a step indicator.
    pub fn progress(&self) -> (usize, usize) {
        (self.step.index(), WizardStep::COUNT)
    }

    /// The profile accumulated so far.
    pub fn draft(&self) -> &ProfileDraft {
        &self.draft
    }

    /// The option set resolved on last entering the interests step.
    pub fn interest_options(&self) -> Option<&ResolvedInterests> {
        self.interest_options.as_ref()
    }

    /// Starting values for the current step's form.
    pub fn step_defaults(&self) -> StepInput {
        StepInput::from_draft(self.step, &self.draft)
    }

    pub fn exit_on_first_back(&self) -> bool {
        self.exit_on_first_back
    }

    pub fn default_budget(&self) -> (i32, i32) {
        self.default_budget
    }

    /// The date ages are computed against.
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Start a fresh session at the first step, discarding any previous draft.
    pub fn start(&mut self, seed: WizardSeed) {
        let (min, max) = self.default_budget;
        let mut draft = ProfileDraft::with_budget(min, max);
        draft.relationship = seed.relationship;
        draft.age = seed.age;
        draft.gender = seed.gender;

        self.draft = draft;
        self.interest_options = None;
        self.step = WizardStep::FIRST;
        self.session = SessionState::Active;

        tracing::debug!(target: targets::WIZARD, ?seed, "wizard session started");
        self.current_step_changed.emit(self.step);
    }

    /// Check an input against the current step without changing anything.
    pub fn can_advance(&self, input: &StepInput) -> bool {
        self.is_active() && !self.step.is_last() && self.check(input).is_valid()
    }

    /// Commit the current step's input and move to the next step.
    ///
    /// Refused (returning `false`, leaving all state untouched) when no session
    /// is active, on the last step, or when the input fails validation. Only
    /// the validation failure emits `validation_failed`.
    pub fn advance(&mut self, input: StepInput) -> bool {
        if !self.is_active() {
            return false;
        }
        let Some(next) = self.step.next() else {
            return false;
        };
        let result = self.check(&input);
        if !result.is_valid() {
            self.validation_failed.emit(result);
            return false;
        }

        self.commit(input);
        self.enter(next);
        true
    }

    /// Move to the previous step without validating or committing.
    ///
    /// On the first step this is refused, unless the wizard exits on first
    /// back, in which case the session is cancelled.
    pub fn retreat(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        match self.step.prev() {
            Some(prev) => {
                self.enter(prev);
                true
            }
            None if self.exit_on_first_back => self.cancel(),
            None => false,
        }
    }

    /// Commit the budget and complete the session.
    ///
    /// Only accepted on the last step, once per session. Emits `completed`
    /// followed by `close_requested`.
    pub fn finish(&mut self, input: StepInput) -> bool {
        if !self.is_active() || !self.step.is_last() {
            return false;
        }
        let result = self.check(&input);
        if !result.is_valid() {
            self.validation_failed.emit(result);
            return false;
        }

        self.commit(input);
        self.session = SessionState::Completed;
        tracing::debug!(target: targets::WIZARD, "wizard completed");
        self.completed.emit(self.draft.clone());
        self.close_requested.emit(());
        true
    }

    /// Abandon the active session, discarding the draft.
    pub fn cancel(&mut self) -> bool {
        if !self.is_active() {
            return false;
        }
        let (min, max) = self.default_budget;
        self.draft = ProfileDraft::with_budget(min, max);
        self.interest_options = None;
        self.session = SessionState::Cancelled;
        tracing::debug!(target: targets::WIZARD, step = ?self.step, "wizard cancelled");
        self.cancelled.emit(());
        true
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn check(&self, input: &StepInput) -> ValidationResult {
        (self.step.schema().validate)(input, self.today())
    }

    fn commit(&mut self, input: StepInput) {
        let input = match input {
            StepInput::Interests { interests } => StepInput::Interests {
                interests: self.known_interests(interests),
            },
            other => other,
        };
        input.commit_into(&mut self.draft);
    }

    /// Drop values the current option set does not offer.
    fn known_interests(&self, values: Vec<String>) -> Vec<String> {
        match &self.interest_options {
            Some(options) => values.into_iter().filter(|v| options.contains(v)).collect(),
            None => values,
        }
    }

    fn enter(&mut self, step: WizardStep) {
        let from = self.step;
        self.step = step;
        tracing::debug!(target: targets::WIZARD, ?from, to = ?step, "wizard step changed");
        if step == WizardStep::Interests {
            self.resolve_interests();
        }
        self.current_step_changed.emit(step);
    }

    fn resolve_interests(&mut self) {
        let resolved = interests::resolve(
            self.draft.relationship.unwrap_or(Relationship::Other),
            self.draft.age_years(self.today()),
            self.draft.gender,
        );

        let (kept, pruned): (Vec<String>, Vec<String>) = std::mem::take(&mut self.draft.interests)
            .into_iter()
            .partition(|value| resolved.contains(value));
        self.draft.interests = kept;
        self.interest_options = Some(resolved);

        if !pruned.is_empty() {
            tracing::debug!(
                target: targets::INTERESTS,
                count = pruned.len(),
                "pruned interests missing from the resolved catalog"
            );
            self.interests_pruned.emit(pruned);
        }
    }
}

impl std::fmt::Debug for IntakeWizard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IntakeWizard")
            .field("session", &self.session)
            .field("step", &self.step)
            .field("draft", &self.draft)
            .finish()
    }
}

static_assertions::assert_impl_all!(IntakeWizard: Send, Sync);
