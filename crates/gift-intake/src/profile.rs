//! The gift recipient profile built by the intake wizard.
//!
//! [`ProfileDraft`] is the accumulating, not-yet-finalized profile. The wizard
//! owns exactly one draft per session; each step commits its fields into it on
//! "Next", and the finished draft is handed read-only to the host.
//!
//! All enums serialize as `snake_case` strings, which is the shape the host
//! receives through [`ProfileDraft::to_json`].

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Who the gift is for, relative to the person filling in the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    Father,
    Mother,
    Brother,
    Sister,
    Son,
    Daughter,
    Partner,
    Friend,
    Cousin,
    Colleague,
    Other,
}

impl Relationship {
    /// All relationships in display order.
    pub const ALL: [Relationship; 11] = [
        Self::Father,
        Self::Mother,
        Self::Brother,
        Self::Sister,
        Self::Son,
        Self::Daughter,
        Self::Partner,
        Self::Friend,
        Self::Cousin,
        Self::Colleague,
        Self::Other,
    ];

    /// Brother or son.
    pub fn is_male_family(self) -> bool {
        matches!(self, Self::Brother | Self::Son)
    }

    /// Sister or daughter.
    pub fn is_female_family(self) -> bool {
        matches!(self, Self::Sister | Self::Daughter)
    }
}

/// The occasion the gift is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Occasion {
    Birthday,
    Christmas,
    Anniversary,
    ValentinesDay,
    MothersDay,
    FathersDay,
    Graduation,
    Wedding,
    ThankYou,
    JustBecause,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    NonBinary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClothingSize {
    Xs,
    S,
    M,
    L,
    Xl,
    Xxl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FavouriteDrink {
    Beer,
    Wine,
    Spirits,
    Cocktails,
    Coffee,
    Tea,
    SoftDrinks,
    NonDrinker,
}

/// The emotional tone the gift should strike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Practical,
    Sentimental,
    Fun,
    Luxurious,
    Experiential,
}

/// Oldest age the wizard accepts.
pub const MAX_AGE_YEARS: u32 = 120;

/// The recipient's age, given either directly or as a date of birth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AgeInput {
    /// Age in whole years, optionally with the birthday's month and day.
    Age {
        years: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        month: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        day: Option<u32>,
    },
    /// Full date of birth.
    DateOfBirth { day: u32, month: u32, year: i32 },
}

impl AgeInput {
    /// An age in whole years.
    pub fn years(years: u32) -> Self {
        Self::Age {
            years,
            month: None,
            day: None,
        }
    }

    /// A date of birth, rejected if the date does not exist.
    pub fn date_of_birth(day: u32, month: u32, year: i32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(|_| Self::DateOfBirth { day, month, year })
            .ok_or(Error::InvalidDate { day, month, year })
    }

    /// Create from a chrono date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self::DateOfBirth {
            day: date.day(),
            month: date.month(),
            year: date.year(),
        }
    }

    /// Age in whole years as of `today`.
    ///
    /// Returns `None` for a date of birth that does not exist or lies after
    /// `today`.
    pub fn age_years(&self, today: NaiveDate) -> Option<u32> {
        match *self {
            Self::Age { years, .. } => Some(years),
            Self::DateOfBirth { day, month, year } => {
                let born = NaiveDate::from_ymd_opt(year, month, day)?;
                today.years_since(born)
            }
        }
    }
}

/// A field of the profile, used to report what a step is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    Relationship,
    Name,
    Occasion,
    Age,
    Gender,
    ClothingSize,
    FavouriteDrink,
    Interests,
    Sentiment,
    Budget,
}

impl ProfileField {
    /// Stable identifier for highlighting the field in a form.
    pub fn id(self) -> &'static str {
        match self {
            Self::Relationship => "relationship",
            Self::Name => "name",
            Self::Occasion => "occasion",
            Self::Age => "age",
            Self::Gender => "gender",
            Self::ClothingSize => "clothing_size",
            Self::FavouriteDrink => "favourite_drink",
            Self::Interests => "interests",
            Self::Sentiment => "sentiment",
            Self::Budget => "budget",
        }
    }
}

/// The in-progress profile.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProfileDraft {
    pub relationship: Option<Relationship>,
    pub name: String,
    pub occasion: Option<Occasion>,
    pub age: Option<AgeInput>,
    pub gender: Option<Gender>,
    pub clothing_size: Option<ClothingSize>,
    pub favourite_drink: Option<FavouriteDrink>,
    /// Selected interest ids, unique, in display order.
    pub interests: Vec<String>,
    pub sentiment: Option<Sentiment>,
    pub min_budget: i32,
    pub max_budget: i32,
}

impl ProfileDraft {
    /// Create an empty draft with the given starting budget.
    pub fn with_budget(min_budget: i32, max_budget: i32) -> Self {
        Self {
            min_budget,
            max_budget,
            ..Self::default()
        }
    }

    /// The recipient's age in whole years as of `today`, if known.
    pub fn age_years(&self, today: NaiveDate) -> Option<u32> {
        self.age.and_then(|age| age.age_years(today))
    }

    /// Replace the interests, dropping duplicates but keeping first-seen order.
    pub fn set_interests<I, S>(&mut self, interests: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests.clear();
        for value in interests {
            let value = value.into();
            if !self.interests.contains(&value) {
                self.interests.push(value);
            }
        }
    }

    /// Whether an interest id is selected.
    pub fn has_interest(&self, value: &str) -> bool {
        self.interests.iter().any(|v| v == value)
    }

    /// The handoff representation given to the external collaborator.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
