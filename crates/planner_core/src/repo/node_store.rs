//! Node store contracts and in-memory implementation.
//!
//! # Responsibility
//! - Provide key-value storage of folders and lists by id.
//! - Keep storage details behind the `NodeStore` boundary.
//!
//! # Invariants
//! - `put_*` is an upsert keyed by entity id.
//! - The store never enforces cross-entity invariants; that is the tree
//!   service's job.

use crate::model::node::{Folder, List, NodeId};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type used by node store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from node store lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No folder is stored under this id.
    FolderNotFound(NodeId),
    /// No list is stored under this id.
    ListNotFound(NodeId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FolderNotFound(id) => write!(f, "folder not found: {id}"),
            Self::ListNotFound(id) => write!(f, "list not found: {id}"),
        }
    }
}

impl Error for StoreError {}

/// Storage interface for folder and list entities.
pub trait NodeStore {
    /// Loads one folder snapshot by id.
    fn get_folder(&self, id: &str) -> StoreResult<Folder>;
    /// Loads one list snapshot by id.
    fn get_list(&self, id: &str) -> StoreResult<List>;
    /// Inserts or replaces one folder.
    fn put_folder(&mut self, folder: Folder);
    /// Inserts or replaces one list.
    fn put_list(&mut self, list: List);
    /// Removes one folder and returns it.
    fn remove_folder(&mut self, id: &str) -> StoreResult<Folder>;
    /// Removes one list and returns it.
    fn remove_list(&mut self, id: &str) -> StoreResult<List>;
    fn contains_folder(&self, id: &str) -> bool;
    fn contains_list(&self, id: &str) -> bool;
    /// Returns every stored folder id, in no particular order.
    fn folder_ids(&self) -> Vec<NodeId>;
    /// Returns every stored list id, in no particular order.
    fn list_ids(&self) -> Vec<NodeId>;
}

/// HashMap-backed node store living for the process lifetime.
#[derive(Debug, Default, Clone)]
pub struct InMemoryNodeStore {
    folders: HashMap<NodeId, Folder>,
    lists: HashMap<NodeId, List>,
}

impl InMemoryNodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn folder_count(&self) -> usize {
        self.folders.len()
    }

    pub fn list_count(&self) -> usize {
        self.lists.len()
    }
}

impl NodeStore for InMemoryNodeStore {
    fn get_folder(&self, id: &str) -> StoreResult<Folder> {
        self.folders
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::FolderNotFound(id.to_string()))
    }

    fn get_list(&self, id: &str) -> StoreResult<List> {
        self.lists
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::ListNotFound(id.to_string()))
    }

    fn put_folder(&mut self, folder: Folder) {
        self.folders.insert(folder.id.clone(), folder);
    }

    fn put_list(&mut self, list: List) {
        self.lists.insert(list.id.clone(), list);
    }

    fn remove_folder(&mut self, id: &str) -> StoreResult<Folder> {
        self.folders
            .remove(id)
            .ok_or_else(|| StoreError::FolderNotFound(id.to_string()))
    }

    fn remove_list(&mut self, id: &str) -> StoreResult<List> {
        self.lists
            .remove(id)
            .ok_or_else(|| StoreError::ListNotFound(id.to_string()))
    }

    fn contains_folder(&self, id: &str) -> bool {
        self.folders.contains_key(id)
    }

    fn contains_list(&self, id: &str) -> bool {
        self.lists.contains_key(id)
    }

    fn folder_ids(&self) -> Vec<NodeId> {
        self.folders.keys().cloned().collect()
    }

    fn list_ids(&self) -> Vec<NodeId> {
        self.lists.keys().cloned().collect()
    }
}
