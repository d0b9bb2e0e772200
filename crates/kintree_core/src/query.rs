//! Member list filtering.
//!
//! # Responsibility
//! - Provide the one predicate combinator used by both the flat list view
//!   and the layout engine, so the two stay consistent.
//!
//! # Invariants
//! - Criteria combine with AND semantics; an unset criterion is a no-op.
//! - Filtering is pure: no shared state, no side effects.

use crate::model::member::{Gender, Member};

/// Combinable filter over member records.
///
/// A default-constructed filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberFilter {
    /// Case-insensitive substring match on `name`. Blank text is a no-op,
    /// so type-as-you-search callers never hit a surprising empty result.
    pub search: Option<String>,
    /// Exact generation tier match.
    pub generation: Option<u32>,
    /// Exact gender match.
    pub gender: Option<Gender>,
}

impl MemberFilter {
    /// Returns whether `member` passes every set criterion.
    pub fn matches(&self, member: &Member) -> bool {
        if let Some(search) = self.search.as_deref() {
            let needle = search.trim().to_lowercase();
            if !needle.is_empty() && !member.name.to_lowercase().contains(&needle) {
                return false;
            }
        }

        if let Some(generation) = self.generation {
            if member.generation != generation {
                return false;
            }
        }

        if let Some(gender) = self.gender {
            if member.gender != gender {
                return false;
            }
        }

        true
    }

    /// Returns whether no criterion is set (blank search counts as unset).
    pub fn is_empty(&self) -> bool {
        self.search
            .as_deref()
            .map_or(true, |text| text.trim().is_empty())
            && self.generation.is_none()
            && self.gender.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::MemberFilter;
    use crate::model::member::{Gender, Member, MemberId};

    fn member(name: &str, gender: Gender, generation: u32) -> Member {
        Member {
            id: MemberId::new_v4(),
            name: name.to_string(),
            gender,
            birth_date: None,
            death_date: None,
            generation,
            father_id: None,
            mother_id: None,
            spouse_id: None,
            description: String::new(),
        }
    }

    #[test]
    fn default_filter_matches_everything() {
        let filter = MemberFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&member("Ada", Gender::Female, 3)));
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let filter = MemberFilter {
            search: Some("aRg".to_string()),
            ..MemberFilter::default()
        };
        assert!(filter.matches(&member("Margaret", Gender::Female, 1)));
        assert!(!filter.matches(&member("Arthur", Gender::Male, 1)));
    }

    #[test]
    fn blank_search_is_a_no_op() {
        let filter = MemberFilter {
            search: Some("   ".to_string()),
            ..MemberFilter::default()
        };
        assert!(filter.is_empty());
        assert!(filter.matches(&member("Arthur", Gender::Male, 1)));
    }

    #[test]
    fn criteria_combine_with_and_semantics() {
        let filter = MemberFilter {
            search: Some("ha".to_string()),
            generation: Some(2),
            gender: Some(Gender::Male),
        };
        assert!(filter.matches(&member("Nathan", Gender::Male, 2)));
        assert!(!filter.matches(&member("Nathan", Gender::Male, 1)));
        assert!(!filter.matches(&member("Nathan", Gender::Female, 2)));
        assert!(!filter.matches(&member("Ruth", Gender::Male, 2)));
    }
}
