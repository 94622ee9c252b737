//! Folder/list/item domain model.
//!
//! # Responsibility
//! - Define the canonical records stored by the node store.
//! - Provide ordered-set helpers for child id collections.
//!
//! # Invariants
//! - `id` is stable and never reused for another entity.
//! - Folders reference children by id only; they never own them.
//! - Items are owned by exactly one list.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque identifier for folders, lists and items.
pub type NodeId = String;

/// Fixed identifier of the always-present root folder.
pub const ROOT_FOLDER_ID: &str = "root";

/// Default display name of the root folder.
pub const DEFAULT_ROOT_NAME: &str = "Lists";

/// Generates a fresh random identifier.
pub fn new_node_id() -> NodeId {
    Uuid::new_v4().to_string()
}

/// Hierarchical container for child folders and lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    pub id: NodeId,
    pub name: String,
    /// Caller-assigned display order among siblings. Not unique.
    pub sort_key: f64,
    /// `None` only for the root folder.
    pub parent_folder_id: Option<NodeId>,
    /// Child folder ids in arrival order, without duplicates.
    pub child_folder_ids: Vec<NodeId>,
    /// Child list ids in arrival order, without duplicates.
    pub child_list_ids: Vec<NodeId>,
}

impl Folder {
    /// Creates an empty folder with a generated id.
    pub fn new(name: impl Into<String>, sort_key: f64, parent_folder_id: Option<NodeId>) -> Self {
        Self {
            id: new_node_id(),
            name: name.into(),
            sort_key,
            parent_folder_id,
            child_folder_ids: Vec::new(),
            child_list_ids: Vec::new(),
        }
    }

    /// Creates the root folder with its fixed id.
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            id: ROOT_FOLDER_ID.to_string(),
            name: name.into(),
            sort_key: 0.0,
            parent_folder_id: None,
            child_folder_ids: Vec::new(),
            child_list_ids: Vec::new(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.id == ROOT_FOLDER_ID
    }

    /// Number of direct children (folders plus lists).
    pub fn child_count(&self) -> usize {
        self.child_folder_ids.len() + self.child_list_ids.len()
    }

    pub fn has_children(&self) -> bool {
        self.child_count() > 0
    }

    /// Appends a child folder id. Returns `false` if it was already present.
    pub fn attach_folder(&mut self, folder_id: &str) -> bool {
        push_unique(&mut self.child_folder_ids, folder_id)
    }

    /// Removes a child folder id. Returns `false` if it was absent.
    pub fn detach_folder(&mut self, folder_id: &str) -> bool {
        remove_id(&mut self.child_folder_ids, folder_id)
    }

    /// Appends a child list id. Returns `false` if it was already present.
    pub fn attach_list(&mut self, list_id: &str) -> bool {
        push_unique(&mut self.child_list_ids, list_id)
    }

    /// Removes a child list id. Returns `false` if it was absent.
    pub fn detach_list(&mut self, list_id: &str) -> bool {
        remove_id(&mut self.child_list_ids, list_id)
    }
}

/// Named ordered collection of items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub id: NodeId,
    pub name: String,
    pub sort_key: f64,
    pub parent_folder_id: Option<NodeId>,
    /// Items in arrival order. Display order comes from `Item::sort_key`.
    pub items: Vec<Item>,
}

impl List {
    /// Creates an empty list with a generated id.
    pub fn new(name: impl Into<String>, sort_key: f64, parent_folder_id: Option<NodeId>) -> Self {
        Self {
            id: new_node_id(),
            name: name.into(),
            sort_key,
            parent_folder_id,
            items: Vec::new(),
        }
    }

    pub fn item(&self, item_id: &str) -> Option<&Item> {
        self.items.iter().find(|item| item.id == item_id)
    }

    pub fn item_mut(&mut self, item_id: &str) -> Option<&mut Item> {
        self.items.iter_mut().find(|item| item.id == item_id)
    }

    /// Removes an item by identity. Returns the removed item, if any.
    pub fn take_item(&mut self, item_id: &str) -> Option<Item> {
        let index = self.items.iter().position(|item| item.id == item_id)?;
        Some(self.items.remove(index))
    }
}

/// Leaf value entry within a list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: NodeId,
    pub sort_key: f64,
    pub value: String,
}

impl Item {
    /// Creates an item with a generated id.
    pub fn new(value: impl Into<String>, sort_key: f64) -> Self {
        Self {
            id: new_node_id(),
            sort_key,
            value: value.into(),
        }
    }
}

fn push_unique(ids: &mut Vec<NodeId>, id: &str) -> bool {
    if ids.iter().any(|current| current == id) {
        return false;
    }
    ids.push(id.to_string());
    true
}

fn remove_id(ids: &mut Vec<NodeId>, id: &str) -> bool {
    let before = ids.len();
    ids.retain(|current| current != id);
    ids.len() != before
}
