//! Core domain logic for KinTree.
//! This crate is the single source of truth for business invariants:
//! spouse-link symmetry, the child-deletion guard, and the deterministic
//! generation-tier layout.

pub mod layout;
pub mod logging;
pub mod model;
pub mod query;
pub mod resolver;
pub mod sample;
pub mod service;
pub mod storage;
pub mod store;
pub mod transfer;

pub use layout::{layout_tree, Connector, LayoutConfig, NodeBox, Point, Segment, TreeLayout};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::member::{Gender, Member, MemberDraft, MemberId};
pub use query::MemberFilter;
pub use resolver::RelationshipResolver;
pub use service::{FamilyTreeService, ServiceError, ServiceResult};
pub use storage::{MemoryStorage, SqliteStorage, StorageAdapter, StorageError, StorageResult};
pub use store::{GraphStore, StoreError, StoreResult};
pub use transfer::{
    export_file_name, export_members, import_members, TransferError, TransferResult,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
