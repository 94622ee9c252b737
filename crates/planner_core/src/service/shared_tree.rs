//! Process-wide shared handle over one tree service.
//!
//! # Responsibility
//! - Serialize mutations so no caller observes a half-applied move/delete.
//! - Let reads run concurrently with each other.
//!
//! # Invariants
//! - Every mutation holds the write lock for its whole duration.
//! - Reads hold the read lock, so they never overlap a mutation.

use crate::model::node::{Folder, Item, List};
use crate::repo::node_store::{InMemoryNodeStore, NodeStore};
use crate::service::cascade::DeletedSubtree;
use crate::service::integrity::IntegrityViolation;
use crate::service::projection::{FolderView, ListView};
use crate::service::tree_service::{TreeOptions, TreeResult, TreeService};
use parking_lot::RwLock;
use std::sync::Arc;

/// Cloneable, thread-safe handle to one tree.
pub struct SharedTree<S: NodeStore> {
    inner: Arc<RwLock<TreeService<S>>>,
}

impl<S: NodeStore> Clone for SharedTree<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl SharedTree<InMemoryNodeStore> {
    /// Creates an in-memory tree with the root folder seeded.
    pub fn in_memory() -> Self {
        Self::new(TreeService::new(InMemoryNodeStore::new()))
    }

    /// Creates an in-memory tree with explicit bootstrap options.
    pub fn in_memory_with_options(options: TreeOptions) -> Self {
        Self::new(TreeService::with_options(InMemoryNodeStore::new(), options))
    }
}

impl<S: NodeStore> SharedTree<S> {
    pub fn new(service: TreeService<S>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(service)),
        }
    }

    /// Runs `f` under the shared read lock.
    pub fn read<T>(&self, f: impl FnOnce(&TreeService<S>) -> T) -> T {
        let guard = self.inner.read();
        f(&*guard)
    }

    /// Runs `f` under the exclusive write lock. Use this to group several
    /// operations into one atomic step.
    pub fn write<T>(&self, f: impl FnOnce(&mut TreeService<S>) -> T) -> T {
        let mut guard = self.inner.write();
        f(&mut *guard)
    }

    pub fn folder(&self, folder_id: &str) -> TreeResult<Folder> {
        self.read(|tree| tree.folder(folder_id))
    }

    pub fn list(&self, list_id: &str) -> TreeResult<List> {
        self.read(|tree| tree.list(list_id))
    }

    pub fn folder_view(&self, folder_id: &str) -> TreeResult<FolderView> {
        self.read(|tree| tree.folder_view(folder_id))
    }

    pub fn root_view(&self) -> TreeResult<FolderView> {
        self.read(|tree| tree.root_view())
    }

    pub fn list_view(&self, list_id: &str) -> TreeResult<ListView> {
        self.read(|tree| tree.list_view(list_id))
    }

    pub fn verify_integrity(&self) -> Vec<IntegrityViolation> {
        self.read(|tree| tree.verify_integrity())
    }

    pub fn create_folder(
        &self,
        name: impl Into<String>,
        sort_key: f64,
        parent_folder_id: Option<&str>,
    ) -> TreeResult<Folder> {
        self.write(|tree| tree.create_folder(name, sort_key, parent_folder_id))
    }

    pub fn create_list(
        &self,
        name: impl Into<String>,
        sort_key: f64,
        parent_folder_id: Option<&str>,
    ) -> TreeResult<List> {
        self.write(|tree| tree.create_list(name, sort_key, parent_folder_id))
    }

    pub fn move_or_rename_folder(
        &self,
        folder_id: &str,
        new_name: impl Into<String>,
        new_sort_key: f64,
        new_parent_folder_id: Option<&str>,
    ) -> TreeResult<Folder> {
        self.write(|tree| {
            tree.move_or_rename_folder(folder_id, new_name, new_sort_key, new_parent_folder_id)
        })
    }

    pub fn move_or_rename_list(
        &self,
        list_id: &str,
        new_name: impl Into<String>,
        new_sort_key: f64,
        new_parent_folder_id: Option<&str>,
    ) -> TreeResult<List> {
        self.write(|tree| {
            tree.move_or_rename_list(list_id, new_name, new_sort_key, new_parent_folder_id)
        })
    }

    pub fn delete_folder(&self, folder_id: &str, recursive: bool) -> TreeResult<DeletedSubtree> {
        self.write(|tree| tree.delete_folder(folder_id, recursive))
    }

    pub fn delete_list(&self, list_id: &str) -> TreeResult<List> {
        self.write(|tree| tree.delete_list(list_id))
    }

    pub fn add_item(
        &self,
        list_id: &str,
        value: impl Into<String>,
        sort_key: f64,
    ) -> TreeResult<Item> {
        self.write(|tree| tree.add_item(list_id, value, sort_key))
    }

    pub fn update_item(
        &self,
        list_id: &str,
        item_id: &str,
        new_value: impl Into<String>,
        new_sort_key: f64,
    ) -> TreeResult<Item> {
        self.write(|tree| tree.update_item(list_id, item_id, new_value, new_sort_key))
    }

    pub fn remove_item(&self, list_id: &str, item_id: &str) -> TreeResult<Item> {
        self.write(|tree| tree.remove_item(list_id, item_id))
    }
}
