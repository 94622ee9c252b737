//! Recursive folder deletion.
//!
//! # Responsibility
//! - Remove a folder together with every descendant folder, list and item.
//!
//! # Invariants
//! - Post-order: descendants are removed before the folder that owns them.
//! - Only the top-level folder is detached from its parent; transient
//!   parents inside the subtree are removed wholesale.
//! - Dangling or stale child references are skipped, never fatal.

use crate::model::node::{Folder, NodeId, ROOT_FOLDER_ID};
use crate::repo::node_store::NodeStore;
use crate::service::tree_service::{TreeError, TreeResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Outcome of one subtree deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletedSubtree {
    /// The top-level folder as it was when removed.
    pub folder: Folder,
    /// Every removed folder id, descendants first.
    pub removed_folder_ids: Vec<NodeId>,
    pub removed_list_ids: Vec<NodeId>,
    /// Items dropped together with their lists.
    pub removed_item_count: usize,
}

#[derive(Default)]
struct Removed {
    folder_ids: Vec<NodeId>,
    list_ids: Vec<NodeId>,
    item_count: usize,
}

/// Deletes `folder_id` and its whole subtree from `store`.
///
/// Fails only when the top-level folder is absent or is root; once the
/// cascade starts it cannot fail.
pub fn delete_folder_subtree<S: NodeStore + ?Sized>(
    store: &mut S,
    folder_id: &str,
) -> TreeResult<DeletedSubtree> {
    if folder_id == ROOT_FOLDER_ID {
        return Err(TreeError::RootImmutable);
    }
    store.get_folder(folder_id)?;

    let mut visited = HashSet::new();
    let mut removed = Removed::default();
    let folder = remove_subtree(store, folder_id, &mut visited, &mut removed)
        .ok_or_else(|| TreeError::FolderNotFound(folder_id.to_string()))?;

    if let Some(parent_id) = folder.parent_folder_id.as_deref() {
        if let Ok(mut parent) = store.get_folder(parent_id) {
            parent.detach_folder(folder_id);
            store.put_folder(parent);
        }
    }

    Ok(DeletedSubtree {
        folder,
        removed_folder_ids: removed.folder_ids,
        removed_list_ids: removed.list_ids,
        removed_item_count: removed.item_count,
    })
}

fn remove_subtree<S: NodeStore + ?Sized>(
    store: &mut S,
    folder_id: &str,
    visited: &mut HashSet<NodeId>,
    removed: &mut Removed,
) -> Option<Folder> {
    if !visited.insert(folder_id.to_string()) {
        return None;
    }
    let folder = store.get_folder(folder_id).ok()?;

    for child_id in &folder.child_folder_ids {
        let owned = store
            .get_folder(child_id)
            .map(|child| is_child_of(child.parent_folder_id.as_deref(), folder_id))
            .unwrap_or(false);
        if owned {
            remove_subtree(store, child_id, visited, removed);
        }
    }

    for list_id in &folder.child_list_ids {
        let owned = store
            .get_list(list_id)
            .map(|list| is_child_of(list.parent_folder_id.as_deref(), folder_id))
            .unwrap_or(false);
        if !owned {
            continue;
        }
        if let Ok(list) = store.remove_list(list_id) {
            removed.item_count += list.items.len();
            removed.list_ids.push(list.id);
        }
    }

    let folder = store.remove_folder(folder_id).ok()?;
    removed.folder_ids.push(folder.id.clone());
    Some(folder)
}

fn is_child_of(parent_folder_id: Option<&str>, folder_id: &str) -> bool {
    parent_folder_id == Some(folder_id)
}
