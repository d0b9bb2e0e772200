//! Read-only relationship queries over the member collection.
//!
//! # Responsibility
//! - Answer parent/child/spouse lookups without mutating anything.
//! - Back the store's deletion guard and the detail-view projections.
//!
//! # Invariants
//! - Result ordering matches store iteration order.
//! - Ancestry chains are not checked for cycles; a malformed import may
//!   contain one and these queries will still terminate (none of them walk
//!   the chain transitively).

use crate::model::member::{Member, MemberId};

/// Borrowing view over a member slice for relationship queries.
///
/// Construct it on demand from [`crate::store::GraphStore::members`]; it
/// holds no state of its own.
pub struct RelationshipResolver<'a> {
    members: &'a [Member],
}

impl<'a> RelationshipResolver<'a> {
    pub fn new(members: &'a [Member]) -> Self {
        Self { members }
    }

    /// Looks up one member by id.
    pub fn member(&self, id: MemberId) -> Option<&'a Member> {
        self.members.iter().find(|member| member.id == id)
    }

    /// Returns every record whose father or mother link points at `id`.
    pub fn children(&self, id: MemberId) -> Vec<&'a Member> {
        self.members
            .iter()
            .filter(|member| member.father_id == Some(id) || member.mother_id == Some(id))
            .collect()
    }

    /// Returns the layout roots: generation 1, or both parent links absent.
    ///
    /// Either criterion qualifies on its own; this is not the minimum
    /// generation present in the collection.
    pub fn root_members(&self) -> Vec<&'a Member> {
        self.members
            .iter()
            .filter(|member| {
                member.generation == 1
                    || (member.father_id.is_none() && member.mother_id.is_none())
            })
            .collect()
    }

    /// Resolves the father record, if linked and present.
    pub fn father_of(&self, member: &Member) -> Option<&'a Member> {
        member.father_id.and_then(|id| self.member(id))
    }

    /// Resolves the mother record, if linked and present.
    pub fn mother_of(&self, member: &Member) -> Option<&'a Member> {
        member.mother_id.and_then(|id| self.member(id))
    }

    /// Resolves the spouse record, if linked and present.
    pub fn spouse_of(&self, member: &Member) -> Option<&'a Member> {
        member.spouse_id.and_then(|id| self.member(id))
    }
}
