//! Use-case services over the record store.
//!
//! # Responsibility
//! - Wire the store, persistence adapter and transfer codecs into the entry
//!   points a front end calls.
//!
//! # Invariants
//! - Services never bypass the store's invariant maintenance.
//! - A failed mutation is never persisted.

pub mod family_service;

pub use family_service::{FamilyTreeService, ServiceError, ServiceResult};
