//! Interest catalogs and the rule table that picks one for a recipient.
//!
//! [`resolve`] is a pure function of the recipient's relationship, age and
//! gender. It always produces a non-empty option set; when the inputs are too
//! ambiguous for any curated catalog, the men's and women's catalogs are
//! interleaved.
//!
//! ```
//! use gift_intake::interests::{resolve, Catalog};
//! use gift_intake::profile::Relationship;
//!
//! let resolved = resolve(Relationship::Sister, Some(9), None);
//! assert_eq!(resolved.primary, Catalog::Girls.options());
//! ```

mod catalog;
mod resolver;

pub use catalog::{Catalog, InterestOption};
pub use resolver::{
    CHILD_MAX_AGE, MIXED_PRIMARY_PER_CATALOG, Recipient, ResolutionRule, ResolvedInterests, RULES,
    Rule, resolve, resolve_for,
};
