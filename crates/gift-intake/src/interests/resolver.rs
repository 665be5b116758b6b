//! Choosing which interest catalog to present.
//!
//! The decision is an ordered table of rules. Each rule pairs a predicate with
//! the catalog selection it produces; the first rule whose predicate holds
//! wins and later rules are not consulted. If no rule matches, the mixed
//! fallback interleaves the men's and women's catalogs, so resolution always
//! yields a usable option set.

use gift_intake_core::logging::targets;
use crate::profile::{Gender, Relationship};

use super::catalog::{Catalog, InterestOption};

/// Oldest age treated as a child.
pub const CHILD_MAX_AGE: u32 = 12;

/// Entries taken from each catalog for the mixed fallback's primary list.
pub const MIXED_PRIMARY_PER_CATALOG: usize = 12;

/// The demographic inputs the resolver decides on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recipient {
    pub relationship: Relationship,
    pub age_years: Option<u32>,
    pub gender: Option<Gender>,
}

impl Recipient {
    pub fn new(relationship: Relationship, age_years: Option<u32>, gender: Option<Gender>) -> Self {
        Self {
            relationship,
            age_years,
            gender,
        }
    }

    /// A known age of twelve or under. An unknown age is not a child.
    pub fn is_child(&self) -> bool {
        self.age_years.is_some_and(|age| age <= CHILD_MAX_AGE)
    }
}

/// Identifies which rule produced a resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionRule {
    Father,
    Mother,
    ChildMaleFamily,
    ChildFemaleFamily,
    Male,
    Female,
    UngenderedMaleFamily,
    UngenderedFemaleFamily,
    /// No rule matched; catalogs were interleaved.
    Mixed,
}

/// The option set shown at the interests step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInterests {
    pub primary: Vec<InterestOption>,
    /// Secondary list, only produced by the mixed fallback.
    pub other: Option<Vec<InterestOption>>,
    pub rule: ResolutionRule,
}

impl ResolvedInterests {
    fn single(catalog: Catalog, rule: ResolutionRule) -> Self {
        Self {
            primary: catalog.options().to_vec(),
            other: None,
            rule,
        }
    }

    /// Whether `value` appears in either list.
    pub fn contains(&self, value: &str) -> bool {
        self.primary
            .iter()
            .chain(self.other.iter().flatten())
            .any(|option| option.value == value)
    }

    /// Primary followed by other, with later duplicates of a value removed.
    ///
    /// Use this when presenting both lists together.
    pub fn merged(&self) -> Vec<InterestOption> {
        let mut merged: Vec<InterestOption> = Vec::with_capacity(self.len());
        for option in self.primary.iter().chain(self.other.iter().flatten()) {
            if !merged.iter().any(|seen| seen.value == option.value) {
                merged.push(*option);
            }
        }
        merged
    }

    /// Total entries across both lists, duplicates included.
    pub fn len(&self) -> usize {
        self.primary.len() + self.other.as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One entry of the decision table.
pub struct Rule {
    pub id: ResolutionRule,
    pub matches: fn(&Recipient) -> bool,
    pub catalog: fn(&Recipient) -> Catalog,
}

/// The decision table, evaluated top-down.
pub static RULES: [Rule; 8] = [
    Rule {
        id: ResolutionRule::Father,
        matches: |r| r.relationship == Relationship::Father,
        catalog: |_| Catalog::Men,
    },
    Rule {
        id: ResolutionRule::Mother,
        matches: |r| r.relationship == Relationship::Mother,
        catalog: |_| Catalog::Women,
    },
    Rule {
        id: ResolutionRule::ChildMaleFamily,
        matches: |r| r.is_child() && r.relationship.is_male_family(),
        catalog: |_| Catalog::Boys,
    },
    Rule {
        id: ResolutionRule::ChildFemaleFamily,
        matches: |r| r.is_child() && r.relationship.is_female_family(),
        catalog: |_| Catalog::Girls,
    },
    Rule {
        id: ResolutionRule::Male,
        matches: |r| !r.is_child() && r.gender == Some(Gender::Male),
        catalog: |_| Catalog::Men,
    },
    Rule {
        id: ResolutionRule::Female,
        matches: |r| !r.is_child() && r.gender == Some(Gender::Female),
        catalog: |_| Catalog::Women,
    },
    Rule {
        id: ResolutionRule::UngenderedMaleFamily,
        matches: |r| r.gender.is_none() && r.relationship.is_male_family(),
        catalog: |r| if r.is_child() { Catalog::Boys } else { Catalog::Men },
    },
    Rule {
        id: ResolutionRule::UngenderedFemaleFamily,
        matches: |r| r.gender.is_none() && r.relationship.is_female_family(),
        catalog: |r| if r.is_child() { Catalog::Girls } else { Catalog::Women },
    },
];

/// Resolve the interest option set for a recipient.
///
/// Pure: the result depends only on the arguments.
pub fn resolve(
    relationship: Relationship,
    age_years: Option<u32>,
    gender: Option<Gender>,
) -> ResolvedInterests {
    resolve_for(&Recipient::new(relationship, age_years, gender))
}

/// Resolve for an already-assembled [`Recipient`].
pub fn resolve_for(recipient: &Recipient) -> ResolvedInterests {
    let resolved = RULES
        .iter()
        .find(|rule| (rule.matches)(recipient))
        .map(|rule| ResolvedInterests::single((rule.catalog)(recipient), rule.id))
        .unwrap_or_else(mixed);

    tracing::debug!(
        target: targets::INTERESTS,
        rule = ?resolved.rule,
        relationship = ?recipient.relationship,
        age = ?recipient.age_years,
        gender = ?recipient.gender,
        primary = resolved.primary.len(),
        other = resolved.other.as_ref().map_or(0, Vec::len),
        "resolved interest catalog"
    );
    resolved
}

/// The mixed fallback: men and women interleaved, head into `primary`,
/// remainder into `other`.
fn mixed() -> ResolvedInterests {
    let men = Catalog::Men.options();
    let women = Catalog::Women.options();
    let (men_head, men_tail) = men.split_at(MIXED_PRIMARY_PER_CATALOG.min(men.len()));
    let (women_head, women_tail) = women.split_at(MIXED_PRIMARY_PER_CATALOG.min(women.len()));

    ResolvedInterests {
        primary: interleave(men_head, women_head),
        other: Some(interleave(men_tail, women_tail)),
        rule: ResolutionRule::Mixed,
    }
}

/// `a[0], b[0], a[1], b[1], ...`, with the longer list's leftovers appended.
fn interleave(a: &[InterestOption], b: &[InterestOption]) -> Vec<InterestOption> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut a, mut b) = (a.iter(), b.iter());
    loop {
        match (a.next(), b.next()) {
            (None, None) => break,
            (x, y) => {
                out.extend(x.copied());
                out.extend(y.copied());
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(options: &[InterestOption]) -> Vec<&'static str> {
        options.iter().map(|o| o.value).collect()
    }

    #[test]
    fn test_father_gets_full_men_catalog() {
        let resolved = resolve(Relationship::Father, Some(40), None);
        assert_eq!(resolved.primary, Catalog::Men.options());
        assert_eq!(resolved.primary.len(), 24);
        assert!(resolved.other.is_none());
        assert_eq!(resolved.rule, ResolutionRule::Father);
    }

    #[test]
    fn test_resolution_has_no_hidden_state() {
        let first = resolve(Relationship::Father, Some(40), None);
        let _ = resolve(Relationship::Friend, Some(30), None);
        let _ = resolve(Relationship::Sister, Some(9), Some(Gender::Female));
        assert_eq!(resolve(Relationship::Father, Some(40), None), first);
    }

    #[test]
    fn test_father_wins_over_gender() {
        let resolved = resolve(Relationship::Father, Some(8), Some(Gender::Female));
        assert_eq!(resolved.rule, ResolutionRule::Father);
    }

    #[test]
    fn test_mother_gets_women_catalog() {
        let resolved = resolve(Relationship::Mother, None, None);
        assert_eq!(resolved.primary, Catalog::Women.options());
        assert!(resolved.other.is_none());
    }

    #[test]
    fn test_child_sister_without_gender_gets_girls() {
        let resolved = resolve(Relationship::Sister, Some(9), None);
        assert_eq!(resolved.primary, Catalog::Girls.options());
        assert_eq!(resolved.rule, ResolutionRule::ChildFemaleFamily);
    }

    #[test]
    fn test_child_rule_ignores_gender() {
        let resolved = resolve(Relationship::Son, Some(12), Some(Gender::Female));
        assert_eq!(resolved.primary, Catalog::Boys.options());
        assert_eq!(resolved.rule, ResolutionRule::ChildMaleFamily);
    }

    #[test]
    fn test_thirteen_is_not_a_child() {
        let resolved = resolve(Relationship::Son, Some(13), None);
        assert_eq!(resolved.primary, Catalog::Men.options());
        assert_eq!(resolved.rule, ResolutionRule::UngenderedMaleFamily);
    }

    #[test]
    fn test_adult_gender_rules() {
        let male = resolve(Relationship::Friend, Some(30), Some(Gender::Male));
        assert_eq!(male.rule, ResolutionRule::Male);
        assert_eq!(male.primary, Catalog::Men.options());

        let female = resolve(Relationship::Partner, None, Some(Gender::Female));
        assert_eq!(female.rule, ResolutionRule::Female);
        assert_eq!(female.primary, Catalog::Women.options());
    }

    #[test]
    fn test_child_friend_with_gender_falls_back_to_mixed() {
        // Gender rules only apply to non-children; friends are not family.
        let resolved = resolve(Relationship::Friend, Some(7), Some(Gender::Male));
        assert_eq!(resolved.rule, ResolutionRule::Mixed);
    }

    #[test]
    fn test_ungendered_family_without_age() {
        let daughter = resolve(Relationship::Daughter, None, None);
        assert_eq!(daughter.primary, Catalog::Women.options());
        assert_eq!(daughter.rule, ResolutionRule::UngenderedFemaleFamily);
    }

    #[test]
    fn test_non_binary_adult_brother_is_mixed() {
        let resolved = resolve(Relationship::Brother, Some(30), Some(Gender::NonBinary));
        assert_eq!(resolved.rule, ResolutionRule::Mixed);
    }

    #[test]
    fn test_ambiguous_fallback_interleaves() {
        let resolved = resolve(Relationship::Friend, Some(30), None);
        let men = Catalog::Men.options();
        let women = Catalog::Women.options();

        assert_eq!(resolved.rule, ResolutionRule::Mixed);
        assert_eq!(resolved.primary.len(), 24);
        for i in 0..12 {
            assert_eq!(resolved.primary[2 * i], men[i]);
            assert_eq!(resolved.primary[2 * i + 1], women[i]);
        }

        let other = resolved.other.as_ref().unwrap();
        assert_eq!(other.len(), 26);
        assert_eq!(
            values(&other[..4]),
            vec![men[12].value, women[12].value, men[13].value, women[13].value]
        );
        // Women's catalog is two longer; its last entries trail un-paired.
        assert_eq!(values(&other[24..]), values(&women[24..]));
    }

    #[test]
    fn test_merged_dedupes_shared_values() {
        let resolved = resolve(Relationship::Cousin, None, None);
        let merged = resolved.merged();
        let tech_count = merged.iter().filter(|o| o.value == "tech").count();

        assert_eq!(tech_count, 1);
        assert!(merged.len() < resolved.len());
        assert_eq!(merged[0].value, "tech");
        assert!(resolved.contains("perfume"));
        assert!(!resolved.contains("lego"));
    }

    #[test]
    fn test_rule_table_order() {
        let ids: Vec<ResolutionRule> = RULES.iter().map(|r| r.id).collect();
        assert_eq!(
            ids,
            vec![
                ResolutionRule::Father,
                ResolutionRule::Mother,
                ResolutionRule::ChildMaleFamily,
                ResolutionRule::ChildFemaleFamily,
                ResolutionRule::Male,
                ResolutionRule::Female,
                ResolutionRule::UngenderedMaleFamily,
                ResolutionRule::UngenderedFemaleFamily,
            ]
        );
    }
}
