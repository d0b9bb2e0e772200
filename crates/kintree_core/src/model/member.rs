//! Member domain model.
//!
//! # Responsibility
//! - Define the canonical genealogical record and its create/update payload.
//! - Fix the JSON wire shape (`camelCase` keys) used by storage and transfer.
//!
//! # Invariants
//! - `id` is stable and never reused for another member.
//! - `generation` is a positive layout tier; it is user-supplied, never
//!   derived from ancestry.
//! - Parent and spouse fields hold references by id; existence of the target
//!   is not validated at write time.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for every member record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type MemberId = Uuid;

/// Recorded gender, used for exact-match filtering and node styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Canonical genealogical record.
///
/// Relationship semantics:
/// - Parent-child is directed via `father_id`/`mother_id` pointing at the
///   parent record; zero, one or two links may be set independently.
/// - Spouse is a symmetric pairing. [`crate::store::GraphStore`] is
///   responsible for keeping `spouse_id` reciprocal after every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Stable global id used for linking and persistence.
    pub id: MemberId,
    /// Display name.
    pub name: String,
    pub gender: Gender,
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    /// Absent means the member is living.
    #[serde(default)]
    pub death_date: Option<NaiveDate>,
    /// Positive layout tier, defaults to 1.
    pub generation: u32,
    #[serde(default)]
    pub father_id: Option<MemberId>,
    #[serde(default)]
    pub mother_id: Option<MemberId>,
    #[serde(default)]
    pub spouse_id: Option<MemberId>,
    /// Free-form notes.
    #[serde(default)]
    pub description: String,
}

impl Member {
    /// Returns whether this member has no recorded death date.
    pub fn is_living(&self) -> bool {
        self.death_date.is_none()
    }
}

/// Create/update payload: every mutable member field, without the id.
///
/// `generation` is optional here so the store can apply its fallback rules
/// (1 on create, the existing tier on update).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberDraft {
    pub name: String,
    pub gender: Gender,
    pub birth_date: Option<NaiveDate>,
    pub death_date: Option<NaiveDate>,
    pub generation: Option<u32>,
    pub father_id: Option<MemberId>,
    pub mother_id: Option<MemberId>,
    pub spouse_id: Option<MemberId>,
    pub description: String,
}

impl MemberDraft {
    /// Creates a draft with the required fields and everything else unset.
    pub fn new(name: impl Into<String>, gender: Gender) -> Self {
        Self {
            name: name.into(),
            gender,
            birth_date: None,
            death_date: None,
            generation: None,
            father_id: None,
            mother_id: None,
            spouse_id: None,
            description: String::new(),
        }
    }

    /// Re-creates a draft from an existing record, dropping the id.
    ///
    /// Used by callers that edit a single field and resubmit the rest.
    pub fn from_member(member: &Member) -> Self {
        Self {
            name: member.name.clone(),
            gender: member.gender,
            birth_date: member.birth_date,
            death_date: member.death_date,
            generation: Some(member.generation),
            father_id: member.father_id,
            mother_id: member.mother_id,
            spouse_id: member.spouse_id,
            description: member.description.clone(),
        }
    }
}
