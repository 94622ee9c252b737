//! Whole-store structural audit.
//!
//! Walks every folder and list and reports each broken tree invariant. An
//! empty report means the store is consistent.

use crate::model::node::{NodeId, ROOT_FOLDER_ID};
use crate::repo::node_store::NodeStore;
use crate::service::projection::EntryKind;
use crate::service::tree_service::TreeService;
use std::collections::HashSet;

/// One broken invariant found by `TreeService::verify_integrity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrityViolation {
    /// The root folder is absent or has a parent.
    RootInvalid,
    /// Entity points at a parent folder that does not exist.
    MissingParent {
        child_id: NodeId,
        kind: EntryKind,
        parent_id: Option<NodeId>,
    },
    /// Entity points at a parent whose child collection does not contain it.
    UnlinkedChild {
        parent_id: NodeId,
        child_id: NodeId,
        kind: EntryKind,
    },
    /// Parent lists a child id that is absent or points elsewhere.
    StaleChildRef {
        parent_id: NodeId,
        child_id: NodeId,
        kind: EntryKind,
    },
    /// Parent lists the same child id more than once.
    DuplicateChildRef {
        parent_id: NodeId,
        child_id: NodeId,
        kind: EntryKind,
    },
    /// Folder's ancestor chain loops instead of reaching root.
    Cycle { folder_id: NodeId },
    /// One id is used by both a folder and a list.
    SharedId { id: NodeId },
    /// Two items of one list share an id.
    DuplicateItem { list_id: NodeId, item_id: NodeId },
}

impl<S: NodeStore> TreeService<S> {
    /// Audits the whole store against the tree invariants.
    pub fn verify_integrity(&self) -> Vec<IntegrityViolation> {
        let store = self.store();
        let mut violations = Vec::new();

        match store.get_folder(ROOT_FOLDER_ID) {
            Ok(root) if root.parent_folder_id.is_none() => {}
            _ => violations.push(IntegrityViolation::RootInvalid),
        }

        let mut folder_ids = store.folder_ids();
        folder_ids.sort();
        let mut list_ids = store.list_ids();
        list_ids.sort();

        let list_id_set: HashSet<&NodeId> = list_ids.iter().collect();
        for id in &folder_ids {
            if list_id_set.contains(id) {
                violations.push(IntegrityViolation::SharedId { id: id.clone() });
            }
        }

        for id in &folder_ids {
            let Ok(folder) = store.get_folder(id) else {
                continue;
            };
            if !folder.is_root() {
                check_parent(
                    store,
                    id,
                    EntryKind::Folder,
                    folder.parent_folder_id.as_deref(),
                    &mut violations,
                );
            }
            check_children(
                store,
                id,
                EntryKind::Folder,
                &folder.child_folder_ids,
                &mut violations,
            );
            check_children(
                store,
                id,
                EntryKind::List,
                &folder.child_list_ids,
                &mut violations,
            );
            if has_cycle(store, id) {
                violations.push(IntegrityViolation::Cycle {
                    folder_id: id.clone(),
                });
            }
        }

        for id in &list_ids {
            let Ok(list) = store.get_list(id) else {
                continue;
            };
            check_parent(
                store,
                id,
                EntryKind::List,
                list.parent_folder_id.as_deref(),
                &mut violations,
            );
            let mut seen = HashSet::new();
            for item in &list.items {
                if !seen.insert(item.id.as_str()) {
                    violations.push(IntegrityViolation::DuplicateItem {
                        list_id: id.clone(),
                        item_id: item.id.clone(),
                    });
                }
            }
        }

        violations
    }
}

fn check_parent<S: NodeStore + ?Sized>(
    store: &S,
    child_id: &str,
    kind: EntryKind,
    parent_id: Option<&str>,
    violations: &mut Vec<IntegrityViolation>,
) {
    let parent = parent_id.and_then(|id| store.get_folder(id).ok());
    let Some(parent) = parent else {
        violations.push(IntegrityViolation::MissingParent {
            child_id: child_id.to_string(),
            kind,
            parent_id: parent_id.map(str::to_string),
        });
        return;
    };
    let siblings = match kind {
        EntryKind::Folder => &parent.child_folder_ids,
        EntryKind::List => &parent.child_list_ids,
    };
    if !siblings.iter().any(|id| id == child_id) {
        violations.push(IntegrityViolation::UnlinkedChild {
            parent_id: parent.id.clone(),
            child_id: child_id.to_string(),
            kind,
        });
    }
}

fn check_children<S: NodeStore + ?Sized>(
    store: &S,
    parent_id: &str,
    kind: EntryKind,
    child_ids: &[NodeId],
    violations: &mut Vec<IntegrityViolation>,
) {
    let mut seen = HashSet::new();
    for child_id in child_ids {
        if !seen.insert(child_id.as_str()) {
            violations.push(IntegrityViolation::DuplicateChildRef {
                parent_id: parent_id.to_string(),
                child_id: child_id.clone(),
                kind,
            });
            continue;
        }
        let child_parent = match kind {
            EntryKind::Folder => store
                .get_folder(child_id)
                .ok()
                .map(|child| child.parent_folder_id),
            EntryKind::List => store
                .get_list(child_id)
                .ok()
                .map(|child| child.parent_folder_id),
        };
        if child_parent.flatten().as_deref() != Some(parent_id) {
            violations.push(IntegrityViolation::StaleChildRef {
                parent_id: parent_id.to_string(),
                child_id: child_id.clone(),
                kind,
            });
        }
    }
}

fn has_cycle<S: NodeStore + ?Sized>(store: &S, folder_id: &str) -> bool {
    let mut visited = HashSet::new();
    let mut cursor = Some(folder_id.to_string());
    while let Some(current) = cursor {
        if !visited.insert(current.clone()) {
            return true;
        }
        cursor = store
            .get_folder(&current)
            .ok()
            .and_then(|folder| folder.parent_folder_id);
    }
    false
}
