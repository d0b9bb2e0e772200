//! Family tree use-case service.
//!
//! # Responsibility
//! - Own one [`GraphStore`] plus one storage adapter and keep them in sync:
//!   every successful mutation persists the whole collection.
//! - Provide the read projections a renderer consumes: filtered list, sorted
//!   roster, relationship lookups, tree layout.
//! - Apply import/export with atomic whole-collection replace semantics.
//!
//! # Invariants
//! - First open seeds the built-in sample when nothing was stored, and
//!   persists it immediately.
//! - Store mutation failures propagate before storage is touched.
//! - Import leaves the collection untouched on any decode error; asking the
//!   user to confirm the overwrite is the caller's job.

use crate::layout::{layout_tree, LayoutConfig, TreeLayout};
use crate::model::member::{Member, MemberDraft, MemberId};
use crate::query::MemberFilter;
use crate::resolver::RelationshipResolver;
use crate::sample::seed_sample;
use crate::storage::{StorageAdapter, StorageError};
use crate::store::{GraphStore, StoreError};
use crate::transfer::{export_file_name, export_members, import_members, TransferError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors from service entry points, wrapping the failing layer.
#[derive(Debug)]
pub enum ServiceError {
    Store(StoreError),
    Storage(StorageError),
    Transfer(TransferError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::Transfer(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Storage(err) => Some(err),
            Self::Transfer(err) => Some(err),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<StorageError> for ServiceError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<TransferError> for ServiceError {
    fn from(value: TransferError) -> Self {
        Self::Transfer(value)
    }
}

/// Orchestrator owning the store and its persistence adapter.
///
/// There is deliberately no ambient global instance; whoever needs the tree
/// holds a reference to one of these.
pub struct FamilyTreeService<S: StorageAdapter> {
    store: GraphStore,
    storage: S,
}

impl<S: StorageAdapter> FamilyTreeService<S> {
    /// Loads the stored collection, or seeds and persists the sample tree.
    pub fn open(storage: S) -> ServiceResult<Self> {
        let store = match storage.load()? {
            Some(members) => {
                info!(
                    "event=tree_open module=service status=ok source=storage count={}",
                    members.len()
                );
                GraphStore::from_members(members)
            }
            None => {
                let mut store = GraphStore::new();
                seed_sample(&mut store);
                storage.save(store.members())?;
                info!(
                    "event=tree_open module=service status=ok source=sample count={}",
                    store.len()
                );
                store
            }
        };
        Ok(Self { store, storage })
    }

    /// Creates a member and persists the collection.
    pub fn create_member(&mut self, draft: MemberDraft) -> ServiceResult<Member> {
        let member = self.store.create(draft);
        self.persist()?;
        Ok(member)
    }

    /// Updates a member and persists the collection.
    pub fn update_member(&mut self, id: MemberId, draft: MemberDraft) -> ServiceResult<Member> {
        let member = self.store.update(id, draft)?;
        self.persist()?;
        Ok(member)
    }

    /// Deletes a member and persists the collection.
    ///
    /// A blocked delete (linked children) propagates before anything is
    /// written, so stored and in-memory state both stay as they were.
    pub fn delete_member(&mut self, id: MemberId) -> ServiceResult<()> {
        self.store.delete(id)?;
        self.persist()
    }

    /// Looks up one member by id.
    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.store.get(id)
    }

    /// Borrows the persistence adapter (read-only).
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Borrows the full collection in insertion order.
    pub fn members(&self) -> &[Member] {
        self.store.members()
    }

    /// Filtered members in insertion order (tree view input).
    pub fn list(&self, filter: &MemberFilter) -> Vec<Member> {
        self.store.list(filter)
    }

    /// Filtered members sorted for the flat list view: generation ascending,
    /// then name lexicographic.
    pub fn roster(&self, filter: &MemberFilter) -> Vec<Member> {
        let mut members = self.store.list(filter);
        members.sort_by(|a, b| {
            a.generation
                .cmp(&b.generation)
                .then_with(|| a.name.cmp(&b.name))
        });
        members
    }

    /// Records naming `id` as father or mother.
    pub fn children(&self, id: MemberId) -> Vec<Member> {
        RelationshipResolver::new(self.store.members())
            .children(id)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Layout roots: generation 1, or no parent links at all.
    pub fn root_members(&self) -> Vec<Member> {
        RelationshipResolver::new(self.store.members())
            .root_members()
            .into_iter()
            .cloned()
            .collect()
    }

    /// Distinct generation tiers present, ascending (filter dropdown data).
    pub fn generations(&self) -> Vec<u32> {
        self.store.generations()
    }

    /// Computes the tree layout for the filtered set at the given width.
    pub fn layout(
        &self,
        filter: &MemberFilter,
        canvas_width: f64,
        config: &LayoutConfig,
    ) -> TreeLayout {
        let filtered = self.store.list(filter);
        layout_tree(&filtered, canvas_width, config)
    }

    /// Serializes the full collection as a pretty-printed record list.
    pub fn export_json(&self) -> ServiceResult<String> {
        Ok(export_members(self.store.members())?)
    }

    /// Suggested download name for today's export.
    pub fn export_file_name(&self) -> String {
        export_file_name(chrono::Local::now().date_naive())
    }

    /// Replaces the whole collection from imported bytes and persists.
    ///
    /// Returns the imported record count. Any decode failure leaves both the
    /// in-memory collection and storage untouched.
    pub fn import_json(&mut self, bytes: &[u8]) -> ServiceResult<usize> {
        let members = import_members(bytes)?;
        let count = members.len();
        self.store.replace_all(members);
        self.persist()?;
        info!("event=tree_import module=service status=ok count={count}");
        Ok(count)
    }

    fn persist(&self) -> ServiceResult<()> {
        self.storage.save(self.store.members())?;
        Ok(())
    }
}
