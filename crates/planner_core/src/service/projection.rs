//! Sorted, typed read views over folders and lists.
//!
//! # Responsibility
//! - Merge a folder's child folders and lists into one uniform entry list.
//! - Order entries and list items by `sort_key` for display.
//!
//! # Invariants
//! - Merge order is child folders (in `child_folder_ids` order) followed by
//!   child lists (in `child_list_ids` order); the sort is stable, so ties on
//!   `sort_key` keep that order.
//! - Projection never mutates the store. Dangling child ids are skipped.

use crate::model::node::{Folder, Item, List, NodeId};
use crate::repo::node_store::NodeStore;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Discriminant of one folder entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Folder,
    List,
}

/// Uniform record for one child of a folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderEntry {
    pub id: NodeId,
    pub name: String,
    pub sort_key: f64,
    /// Serialized as `type` to match the wire naming of the planner API.
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Folder: direct child folders plus lists. List: number of items.
    pub child_count: usize,
}

impl FolderEntry {
    fn from_folder(folder: &Folder) -> Self {
        Self {
            id: folder.id.clone(),
            name: folder.name.clone(),
            sort_key: folder.sort_key,
            kind: EntryKind::Folder,
            child_count: folder.child_count(),
        }
    }

    fn from_list(list: &List) -> Self {
        Self {
            id: list.id.clone(),
            name: list.name.clone(),
            sort_key: list.sort_key,
            kind: EntryKind::List,
            child_count: list.items.len(),
        }
    }
}

/// Folder read model with merged, ordered children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderView {
    pub id: NodeId,
    pub name: String,
    pub sort_key: f64,
    pub parent_folder_id: Option<NodeId>,
    /// Children ascending by `sort_key`.
    pub items: Vec<FolderEntry>,
}

/// List read model with items ordered for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListView {
    pub id: NodeId,
    pub name: String,
    pub sort_key: f64,
    pub parent_folder_id: Option<NodeId>,
    /// Items ascending by `sort_key`, ties in insertion order.
    pub items: Vec<Item>,
}

/// Builds the merged, sorted view of one folder's children.
pub fn project_folder<S: NodeStore + ?Sized>(store: &S, folder: &Folder) -> FolderView {
    let folders = folder
        .child_folder_ids
        .iter()
        .filter_map(|id| store.get_folder(id).ok())
        .map(|child| FolderEntry::from_folder(&child));
    let lists = folder
        .child_list_ids
        .iter()
        .filter_map(|id| store.get_list(id).ok())
        .map(|child| FolderEntry::from_list(&child));

    let mut items: Vec<FolderEntry> = folders.chain(lists).collect();
    items.sort_by(|a, b| compare_sort_keys(a.sort_key, b.sort_key));

    FolderView {
        id: folder.id.clone(),
        name: folder.name.clone(),
        sort_key: folder.sort_key,
        parent_folder_id: folder.parent_folder_id.clone(),
        items,
    }
}

/// Builds the display view of one list.
pub fn project_list(list: &List) -> ListView {
    let mut items = list.items.clone();
    items.sort_by(|a, b| compare_sort_keys(a.sort_key, b.sort_key));

    ListView {
        id: list.id.clone(),
        name: list.name.clone(),
        sort_key: list.sort_key,
        parent_folder_id: list.parent_folder_id.clone(),
        items,
    }
}

/// Numeric order: `-0.0` and `0.0` tie. NaN never reaches the store.
fn compare_sort_keys(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
