//! The wizard's steps, their inputs, and their validation.
//!
//! Each step is described by a [`StepSchema`]: display text, the profile
//! fields it requires, and a validation function over the step's local
//! [`StepInput`]. The wizard engine is generic over this table; adding a
//! step means adding a variant and a schema entry.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::profile::{
    AgeInput, ClothingSize, FavouriteDrink, Gender, MAX_AGE_YEARS, Occasion, ProfileDraft,
    ProfileField, Relationship, Sentiment,
};

// ============================================================================
// WizardStep
// ============================================================================

/// A step of the intake wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    RelationshipOccasion,
    AboutThem,
    StyleTaste,
    Interests,
    Vibe,
    Budget,
}

impl WizardStep {
    /// All steps in order.
    pub const ALL: [WizardStep; 6] = [
        Self::RelationshipOccasion,
        Self::AboutThem,
        Self::StyleTaste,
        Self::Interests,
        Self::Vibe,
        Self::Budget,
    ];

    /// Number of steps.
    pub const COUNT: usize = Self::ALL.len();

    /// The first step.
    pub const FIRST: WizardStep = Self::RelationshipOccasion;

    /// The last step.
    pub const LAST: WizardStep = Self::Budget;

    /// One-based position in the sequence, in `1..=6`.
    pub fn index(self) -> usize {
        self as usize + 1
    }

    /// The step at one-based position `index`.
    pub fn from_index(index: usize) -> Option<Self> {
        index.checked_sub(1).and_then(|i| Self::ALL.get(i).copied())
    }

    /// The following step, `None` on the last step.
    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    /// The preceding step, `None` on the first step.
    pub fn prev(self) -> Option<Self> {
        Self::from_index(self.index() - 1)
    }

    pub fn is_first(self) -> bool {
        self == Self::FIRST
    }

    pub fn is_last(self) -> bool {
        self == Self::LAST
    }

    /// This step's schema.
    pub fn schema(self) -> &'static StepSchema {
        &STEPS[self as usize]
    }

    pub fn title(self) -> &'static str {
        self.schema().title
    }

    pub fn subtitle(self) -> &'static str {
        self.schema().subtitle
    }
}

// ============================================================================
// StepInput
// ============================================================================

/// The step-local form values for one step.
///
/// A step edits its own copy of these values and only commits them into the
/// draft when the wizard advances past it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum StepInput {
    RelationshipOccasion {
        relationship: Option<Relationship>,
        #[serde(default)]
        name: String,
        occasion: Option<Occasion>,
    },
    AboutThem {
        age: Option<AgeInput>,
        gender: Option<Gender>,
    },
    StyleTaste {
        clothing_size: Option<ClothingSize>,
        favourite_drink: Option<FavouriteDrink>,
    },
    Interests {
        #[serde(default)]
        interests: Vec<String>,
    },
    Vibe {
        sentiment: Option<Sentiment>,
    },
    Budget {
        min: i32,
        max: i32,
    },
}

impl StepInput {
    /// The step this input belongs to.
    pub fn step(&self) -> WizardStep {
        match self {
            Self::RelationshipOccasion { .. } => WizardStep::RelationshipOccasion,
            Self::AboutThem { .. } => WizardStep::AboutThem,
            Self::StyleTaste { .. } => WizardStep::StyleTaste,
            Self::Interests { .. } => WizardStep::Interests,
            Self::Vibe { .. } => WizardStep::Vibe,
            Self::Budget { .. } => WizardStep::Budget,
        }
    }

    /// The values a step's form starts with, taken from the draft.
    pub fn from_draft(step: WizardStep, draft: &ProfileDraft) -> Self {
        match step {
            WizardStep::RelationshipOccasion => Self::RelationshipOccasion {
                relationship: draft.relationship,
                name: draft.name.clone(),
                occasion: draft.occasion,
            },
            WizardStep::AboutThem => Self::AboutThem {
                age: draft.age,
                gender: draft.gender,
            },
            WizardStep::StyleTaste => Self::StyleTaste {
                clothing_size: draft.clothing_size,
                favourite_drink: draft.favourite_drink,
            },
            WizardStep::Interests => Self::Interests {
                interests: draft.interests.clone(),
            },
            WizardStep::Vibe => Self::Vibe {
                sentiment: draft.sentiment,
            },
            WizardStep::Budget => Self::Budget {
                min: draft.min_budget,
                max: draft.max_budget,
            },
        }
    }

    /// Write these values into the draft.
    pub fn commit_into(self, draft: &mut ProfileDraft) {
        match self {
            Self::RelationshipOccasion {
                relationship,
                name,
                occasion,
            } => {
                draft.relationship = relationship;
                draft.name = name.trim().to_string();
                draft.occasion = occasion;
            }
            Self::AboutThem { age, gender } => {
                draft.age = age;
                draft.gender = gender;
            }
            Self::StyleTaste {
                clothing_size,
                favourite_drink,
            } => {
                draft.clothing_size = clothing_size;
                draft.favourite_drink = favourite_drink;
            }
            Self::Interests { interests } => draft.set_interests(interests),
            Self::Vibe { sentiment } => draft.sentiment = sentiment,
            Self::Budget { min, max } => {
                draft.min_budget = min;
                draft.max_budget = max;
            }
        }
    }

    /// Validate against this input's own step schema.
    pub fn validate(&self, today: NaiveDate) -> ValidationResult {
        (self.step().schema().validate)(self, today)
    }
}

// ============================================================================
// ValidationResult
// ============================================================================

/// The result of validating a step's input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a successful validation result.
    pub fn valid() -> Self {
        Self { errors: Vec::new() }
    }

    /// Create a failed validation result with a single message.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self {
            errors: vec![ValidationError::new(message)],
        }
    }

    /// Create a failed validation result with a field-specific error.
    pub fn field_error(field: ProfileField, message: impl Into<String>) -> Self {
        Self {
            errors: vec![ValidationError::with_field(field, message)],
        }
    }

    /// Create a validation result from a list of errors.
    pub fn with_errors(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Get the first error message, if any.
    pub fn first_error_message(&self) -> Option<&str> {
        self.errors.first().map(|e| e.message.as_str())
    }

    /// Fields named by the errors, in order, without repeats.
    pub fn fields(&self) -> Vec<ProfileField> {
        let mut fields = Vec::new();
        for field in self.errors.iter().filter_map(|e| e.field) {
            if !fields.contains(&field) {
                fields.push(field);
            }
        }
        fields
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Merge another validation result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::valid()
    }
}

/// A validation error with message and optional field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub message: String,
    /// The field to highlight, if the error is about one.
    pub field: Option<ProfileField>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: None,
        }
    }

    pub fn with_field(field: ProfileField, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            field: Some(field),
        }
    }

    fn missing(field: ProfileField) -> Self {
        Self::with_field(field, format!("{} is required", field.id()))
    }
}

// ============================================================================
// StepSchema
// ============================================================================

/// Validates a step's input. `today` resolves dates of birth.
pub type StepValidator = fn(&StepInput, NaiveDate) -> ValidationResult;

/// Static description of one step.
pub struct StepSchema {
    pub step: WizardStep,
    pub title: &'static str,
    pub subtitle: &'static str,
    /// Fields that must be filled before "Next" is accepted.
    pub required: &'static [ProfileField],
    pub validate: StepValidator,
}

impl std::fmt::Debug for StepSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepSchema")
            .field("step", &self.step)
            .field("title", &self.title)
            .field("required", &self.required)
            .finish()
    }
}

/// The step table, indexed by `WizardStep as usize`.
pub static STEPS: [StepSchema; WizardStep::COUNT] = [
    StepSchema {
        step: WizardStep::RelationshipOccasion,
        title: "Who's the gift for?",
        subtitle: "Tell us who you're shopping for and the occasion",
        required: &[ProfileField::Relationship, ProfileField::Occasion],
        validate: validate_relationship_occasion,
    },
    StepSchema {
        step: WizardStep::AboutThem,
        title: "About them",
        subtitle: "Their age helps us find age-appropriate ideas",
        required: &[ProfileField::Age],
        validate: validate_about_them,
    },
    StepSchema {
        step: WizardStep::StyleTaste,
        title: "Style & taste",
        subtitle: "A couple of details to personalise the picks",
        required: &[ProfileField::ClothingSize, ProfileField::FavouriteDrink],
        validate: validate_style_taste,
    },
    StepSchema {
        step: WizardStep::Interests,
        title: "What are they into?",
        subtitle: "Pick as many as you like, or skip",
        required: &[],
        validate: |_, _| ValidationResult::valid(),
    },
    StepSchema {
        step: WizardStep::Vibe,
        title: "Set the vibe",
        subtitle: "What feeling should the gift have?",
        required: &[ProfileField::Sentiment],
        validate: validate_vibe,
    },
    StepSchema {
        step: WizardStep::Budget,
        title: "Budget",
        subtitle: "How much would you like to spend?",
        required: &[ProfileField::Budget],
        validate: validate_budget,
    },
];

fn require<T>(errors: &mut Vec<ValidationError>, value: &Option<T>, field: ProfileField) {
    if value.is_none() {
        errors.push(ValidationError::missing(field));
    }
}

fn wrong_step(input: &StepInput, expected: WizardStep) -> ValidationResult {
    ValidationResult::invalid(format!(
        "input for {:?} given to {:?}",
        input.step(),
        expected
    ))
}

fn validate_relationship_occasion(input: &StepInput, _today: NaiveDate) -> ValidationResult {
    let StepInput::RelationshipOccasion {
        relationship,
        occasion,
        ..
    } = input
    else {
        return wrong_step(input, WizardStep::RelationshipOccasion);
    };
    let mut errors = Vec::new();
    require(&mut errors, relationship, ProfileField::Relationship);
    require(&mut errors, occasion, ProfileField::Occasion);
    ValidationResult::with_errors(errors)
}

fn validate_about_them(input: &StepInput, today: NaiveDate) -> ValidationResult {
    let StepInput::AboutThem { age, .. } = input else {
        return wrong_step(input, WizardStep::AboutThem);
    };
    let Some(age) = age else {
        return ValidationResult::with_errors(vec![ValidationError::missing(ProfileField::Age)]);
    };
    match age.age_years(today) {
        None => ValidationResult::field_error(
            ProfileField::Age,
            "date of birth must be a real date that is not in the future",
        ),
        Some(years) if years > MAX_AGE_YEARS => ValidationResult::field_error(
            ProfileField::Age,
            format!("age must be at most {MAX_AGE_YEARS}"),
        ),
        Some(_) => ValidationResult::valid(),
    }
}

fn validate_style_taste(input: &StepInput, _today: NaiveDate) -> ValidationResult {
    let StepInput::StyleTaste {
        clothing_size,
        favourite_drink,
    } = input
    else {
        return wrong_step(input, WizardStep::StyleTaste);
    };
    let mut errors = Vec::new();
    require(&mut errors, clothing_size, ProfileField::ClothingSize);
    require(&mut errors, favourite_drink, ProfileField::FavouriteDrink);
    ValidationResult::with_errors(errors)
}

fn validate_vibe(input: &StepInput, _today: NaiveDate) -> ValidationResult {
    let StepInput::Vibe { sentiment } = input else {
        return wrong_step(input, WizardStep::Vibe);
    };
    let mut errors = Vec::new();
    require(&mut errors, sentiment, ProfileField::Sentiment);
    ValidationResult::with_errors(errors)
}

fn validate_budget(input: &StepInput, _today: NaiveDate) -> ValidationResult {
    let StepInput::Budget { min, max } = *input else {
        return wrong_step(input, WizardStep::Budget);
    };
    if min < max {
        ValidationResult::valid()
    } else {
        ValidationResult::field_error(
            ProfileField::Budget,
            format!("minimum ({min}) must be below maximum ({max})"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 17).unwrap()
    }

    #[test]
    fn test_step_sequence() {
        assert_eq!(WizardStep::FIRST.index(), 1);
        assert_eq!(WizardStep::LAST.index(), 6);
        assert_eq!(WizardStep::StyleTaste.next(), Some(WizardStep::Interests));
        assert_eq!(WizardStep::Interests.prev(), Some(WizardStep::StyleTaste));
        assert_eq!(WizardStep::Budget.next(), None);
        assert_eq!(WizardStep::RelationshipOccasion.prev(), None);
        assert_eq!(WizardStep::from_index(0), None);
        assert_eq!(WizardStep::from_index(7), None);
    }

    #[test]
    fn test_schema_table_matches_steps() {
        for step in WizardStep::ALL {
            assert_eq!(step.schema().step, step);
            assert!(!step.title().is_empty());
        }
        assert!(WizardStep::Interests.schema().required.is_empty());
    }

    #[test]
    fn test_relationship_and_occasion_required() {
        let input = StepInput::RelationshipOccasion {
            relationship: None,
            name: String::new(),
            occasion: None,
        };
        let result = input.validate(today());
        assert!(!result.is_valid());
        assert_eq!(
            result.fields(),
            vec![ProfileField::Relationship, ProfileField::Occasion]
        );

        let input = StepInput::RelationshipOccasion {
            relationship: Some(Relationship::Father),
            name: String::new(),
            occasion: Some(Occasion::Birthday),
        };
        assert!(input.validate(today()).is_valid());
    }

    #[test]
    fn test_age_validation() {
        let gender_only = StepInput::AboutThem {
            age: None,
            gender: Some(Gender::Male),
        };
        assert_eq!(gender_only.validate(today()).fields(), vec![ProfileField::Age]);

        let age_only = StepInput::AboutThem {
            age: Some(AgeInput::years(40)),
            gender: None,
        };
        assert!(age_only.validate(today()).is_valid());

        let too_old = StepInput::AboutThem {
            age: Some(AgeInput::years(121)),
            gender: None,
        };
        assert!(!too_old.validate(today()).is_valid());

        let unborn = StepInput::AboutThem {
            age: Some(AgeInput::date_of_birth(1, 1, 2027).unwrap()),
            gender: None,
        };
        assert_eq!(unborn.validate(today()).fields(), vec![ProfileField::Age]);
    }

    #[test]
    fn test_budget_must_be_ordered() {
        assert!(StepInput::Budget { min: 20, max: 100 }.validate(today()).is_valid());
        assert!(!StepInput::Budget { min: 100, max: 100 }.validate(today()).is_valid());
    }

    #[test]
    fn test_validator_rejects_foreign_input() {
        let vibe = StepInput::Vibe { sentiment: None };
        let result = (WizardStep::Budget.schema().validate)(&vibe, today());
        assert!(!result.is_valid());
        assert!(result.fields().is_empty());
    }

    #[test]
    fn test_commit_and_reload() {
        let mut draft = ProfileDraft::default();
        StepInput::RelationshipOccasion {
            relationship: Some(Relationship::Friend),
            name: "  Sam ".to_string(),
            occasion: Some(Occasion::ThankYou),
        }
        .commit_into(&mut draft);
        StepInput::Interests {
            interests: vec!["golf".into(), "golf".into(), "tech".into()],
        }
        .commit_into(&mut draft);

        assert_eq!(draft.name, "Sam");
        assert_eq!(draft.interests, vec!["golf", "tech"]);
        assert_eq!(
            StepInput::from_draft(WizardStep::RelationshipOccasion, &draft),
            StepInput::RelationshipOccasion {
                relationship: Some(Relationship::Friend),
                name: "Sam".to_string(),
                occasion: Some(Occasion::ThankYou),
            }
        );
    }

    #[test]
    fn test_step_input_serde_shape() {
        let input: StepInput =
            serde_json::from_str(r#"{"step":"vibe","sentiment":"fun"}"#).unwrap();
        assert_eq!(
            input,
            StepInput::Vibe {
                sentiment: Some(Sentiment::Fun)
            }
        );
    }
}
