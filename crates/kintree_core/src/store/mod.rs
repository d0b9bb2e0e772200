//! Record ownership and mutation layer.
//!
//! # Responsibility
//! - Own the one mutable member collection.
//! - Keep referential invariants (spouse symmetry, deletion guard) intact
//!   across every mutation.
//!
//! # Invariants
//! - Mutation failures are typed return values; nothing in this layer panics.
//! - A failed mutation leaves the collection untouched.

pub mod graph_store;

pub use graph_store::{GraphStore, StoreError, StoreResult};
