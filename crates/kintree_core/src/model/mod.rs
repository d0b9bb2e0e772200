//! Domain model for genealogical records.
//!
//! # Responsibility
//! - Define the canonical member record shared by store, resolver and layout.
//! - Keep one serde wire shape for persistence and import/export alike.
//!
//! # Invariants
//! - Every record is identified by a stable `MemberId`.
//! - Relationship fields hold ids, never embedded records.

pub mod member;
