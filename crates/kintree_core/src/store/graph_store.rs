//! In-memory member store with invariant maintenance.
//!
//! # Responsibility
//! - Provide create/update/delete/get/list over the owned record collection.
//! - Propagate and clear reciprocal spouse links so the pairing stays
//!   symmetric after every successful mutation.
//! - Refuse to delete a member that other records name as a parent.
//!
//! # Invariants
//! - `a.spouse_id == Some(b.id)` implies `b.spouse_id == Some(a.id)` for any
//!   `b` present in the store.
//! - Record order is insertion order; queries and layout rely on it being
//!   stable, not on it meaning anything.
//! - `generation` written through this store is always >= 1.

use crate::model::member::{Member, MemberDraft, MemberId};
use crate::query::MemberFilter;
use crate::resolver::RelationshipResolver;
use log::{debug, warn};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub type StoreResult<T> = Result<T, StoreError>;

/// Mutation errors surfaced as values, never as panics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No record with this id exists.
    MemberNotFound(MemberId),
    /// Deletion blocked: other records name this member as father or mother.
    HasChildren { id: MemberId, child_count: usize },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MemberNotFound(id) => write!(f, "member not found: {id}"),
            Self::HasChildren { id, child_count } => write!(
                f,
                "member {id} has {child_count} linked child record(s); remove or relink them first"
            ),
        }
    }
}

impl Error for StoreError {}

/// Owner of the member collection.
///
/// Resolver, filter and layout only ever borrow from [`Self::members`]; this
/// type is the single writer.
#[derive(Debug, Default)]
pub struct GraphStore {
    members: Vec<Member>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an already-materialized collection (load and import paths).
    ///
    /// Records are taken as-is; import shape-checking happens upstream.
    pub fn from_members(members: Vec<Member>) -> Self {
        Self { members }
    }

    /// Borrows the full collection in insertion order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Looks up one record by id.
    pub fn get(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|member| member.id == id)
    }

    /// Returns filtered clones in insertion order.
    pub fn list(&self, filter: &MemberFilter) -> Vec<Member> {
        self.members
            .iter()
            .filter(|member| filter.matches(member))
            .cloned()
            .collect()
    }

    /// Returns the distinct generation tiers present, ascending.
    pub fn generations(&self) -> Vec<u32> {
        self.members
            .iter()
            .map(|member| member.generation)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Creates a record with a fresh id and appends it.
    ///
    /// `generation` defaults to 1 when unset and clamps 0 up to 1. A spouse
    /// link to an unpaired existing member is made reciprocal immediately; a
    /// link to an already-paired member is dropped with a warning, leaving
    /// the existing pairing untouched.
    pub fn create(&mut self, draft: MemberDraft) -> Member {
        let id = Uuid::new_v4();
        let spouse_id = self.claim_spouse(id, draft.spouse_id);
        let member = Member {
            id,
            name: draft.name,
            gender: draft.gender,
            birth_date: draft.birth_date,
            death_date: draft.death_date,
            generation: draft.generation.map_or(1, |tier| tier.max(1)),
            father_id: draft.father_id,
            mother_id: draft.mother_id,
            spouse_id,
            description: draft.description,
        };
        self.members.push(member.clone());
        debug!(
            "event=member_create module=store status=ok id={} generation={}",
            member.id, member.generation
        );
        member
    }

    /// Replaces every mutable field of an existing record.
    ///
    /// The id is immutable. `generation` falls back to the record's current
    /// tier when unset. Moving the spouse link away from a prior partner
    /// clears that partner's back-pointer in the same logical operation;
    /// linking to a new partner follows the create-time policy.
    pub fn update(&mut self, id: MemberId, draft: MemberDraft) -> StoreResult<Member> {
        let index = self
            .index_of(id)
            .ok_or(StoreError::MemberNotFound(id))?;
        let previous_generation = self.members[index].generation;
        let previous_spouse = self.members[index].spouse_id;

        if let Some(old_partner) = previous_spouse {
            if draft.spouse_id != Some(old_partner) {
                self.clear_back_pointer(old_partner, id);
            }
        }

        let spouse_id = self.claim_spouse(id, draft.spouse_id);
        let member = Member {
            id,
            name: draft.name,
            gender: draft.gender,
            birth_date: draft.birth_date,
            death_date: draft.death_date,
            generation: draft
                .generation
                .map_or(previous_generation, |tier| tier.max(1)),
            father_id: draft.father_id,
            mother_id: draft.mother_id,
            spouse_id,
            description: draft.description,
        };
        self.members[index] = member.clone();
        debug!(
            "event=member_update module=store status=ok id={} generation={}",
            member.id, member.generation
        );
        Ok(member)
    }

    /// Removes one record, guarding against dangling parent links.
    ///
    /// The children check runs before any state is touched, so a blocked
    /// delete has zero side effects (spouse links included).
    pub fn delete(&mut self, id: MemberId) -> StoreResult<()> {
        let index = self
            .index_of(id)
            .ok_or(StoreError::MemberNotFound(id))?;

        let child_count = RelationshipResolver::new(&self.members).children(id).len();
        if child_count > 0 {
            debug!(
                "event=member_delete module=store status=blocked id={id} child_count={child_count}"
            );
            return Err(StoreError::HasChildren { id, child_count });
        }

        if let Some(partner) = self.members[index].spouse_id {
            self.clear_back_pointer(partner, id);
        }
        self.members.remove(index);
        debug!("event=member_delete module=store status=ok id={id}");
        Ok(())
    }

    /// Atomically replaces the whole collection (import semantics).
    pub fn replace_all(&mut self, members: Vec<Member>) {
        debug!(
            "event=collection_replace module=store status=ok old_count={} new_count={}",
            self.members.len(),
            members.len()
        );
        self.members = members;
    }

    fn index_of(&self, id: MemberId) -> Option<usize> {
        self.members.iter().position(|member| member.id == id)
    }

    /// Resolves the spouse link `claimant` asked for and fixes up the
    /// target's back-pointer. Returns the value the claimant's own
    /// `spouse_id` must take for the store to stay symmetric.
    fn claim_spouse(
        &mut self,
        claimant: MemberId,
        requested: Option<MemberId>,
    ) -> Option<MemberId> {
        let target_id = requested?;
        if target_id == claimant {
            warn!(
                "event=spouse_link module=store status=dropped id={claimant} reason=self_reference"
            );
            return None;
        }

        let Some(index) = self.index_of(target_id) else {
            // No existence validation at write time: a dangling reference is
            // kept as written and simply never resolves.
            return Some(target_id);
        };

        match self.members[index].spouse_id {
            None => {
                self.members[index].spouse_id = Some(claimant);
                Some(target_id)
            }
            Some(existing) if existing == claimant => Some(target_id),
            Some(existing) => {
                warn!(
                    "event=spouse_link module=store status=dropped id={claimant} target={target_id} reason=target_already_paired existing={existing}"
                );
                None
            }
        }
    }

    /// Clears `partner`'s spouse link, but only if it points at `expected`.
    ///
    /// The guard keeps a third pairing intact when the stored data already
    /// disagrees with itself (dangling or imported asymmetry).
    fn clear_back_pointer(&mut self, partner: MemberId, expected: MemberId) {
        if let Some(index) = self.index_of(partner) {
            if self.members[index].spouse_id == Some(expected) {
                self.members[index].spouse_id = None;
            }
        }
    }
}
