//! Folder/list tree use-case service.
//!
//! # Responsibility
//! - Keep parent/child references bidirectionally consistent on every
//!   create, move and delete.
//! - Validate names, sort keys and hierarchy rules above the node store.
//!
//! # Invariants
//! - Every folder except root has a parent that exists in the store.
//! - A folder's child id collections equal the set of entities whose
//!   `parent_folder_id` points at it.
//! - Move operations must not create parent-child cycles.
//! - All preconditions are checked before the first store write.

use crate::model::node::{Folder, List, NodeId, DEFAULT_ROOT_NAME, ROOT_FOLDER_ID};
use crate::repo::node_store::{NodeStore, StoreError};
use crate::service::cascade::{delete_folder_subtree, DeletedSubtree};
use crate::service::projection::{project_folder, project_list, FolderView, ListView};
use log::{debug, info};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type used by tree service operations.
pub type TreeResult<T> = Result<T, TreeError>;

/// Coarse error taxonomy exposed to transport layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced folder, list or item does not exist.
    NotFound,
    /// The mutation is structurally disallowed.
    InvalidOperation,
    /// Input is malformed.
    Validation,
}

/// Errors from tree service operations.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeError {
    /// Target folder does not exist.
    FolderNotFound(NodeId),
    /// Target list does not exist.
    ListNotFound(NodeId),
    /// Target item does not exist in the given list.
    ItemNotFound { list_id: NodeId, item_id: NodeId },
    /// Referenced parent folder (old or new) does not exist.
    ParentNotFound(NodeId),
    /// Move would place a folder under itself or one of its descendants.
    CycleDetected { folder_id: NodeId, parent_id: NodeId },
    /// Non-recursive delete of a folder that still has children.
    FolderNotEmpty(NodeId),
    /// Root folder cannot be deleted or re-parented.
    RootImmutable,
    /// Name is blank after trim.
    InvalidName,
    /// Sort key is NaN.
    InvalidSortKey,
}

impl TreeError {
    /// Maps this error onto the transport-facing taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FolderNotFound(_)
            | Self::ListNotFound(_)
            | Self::ItemNotFound { .. }
            | Self::ParentNotFound(_) => ErrorKind::NotFound,
            Self::CycleDetected { .. } | Self::FolderNotEmpty(_) | Self::RootImmutable => {
                ErrorKind::InvalidOperation
            }
            Self::InvalidName | Self::InvalidSortKey => ErrorKind::Validation,
        }
    }
}

impl Display for TreeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FolderNotFound(id) => write!(f, "folder not found: {id}"),
            Self::ListNotFound(id) => write!(f, "list not found: {id}"),
            Self::ItemNotFound { list_id, item_id } => {
                write!(f, "item not found: {item_id} in list {list_id}")
            }
            Self::ParentNotFound(id) => write!(f, "parent folder not found: {id}"),
            Self::CycleDetected {
                folder_id,
                parent_id,
            } => write!(
                f,
                "move would create cycle: folder {folder_id} under parent {parent_id}"
            ),
            Self::FolderNotEmpty(id) => {
                write!(f, "folder is not empty and delete is not recursive: {id}")
            }
            Self::RootImmutable => write!(f, "root folder cannot be deleted or moved"),
            Self::InvalidName => write!(f, "name must not be blank"),
            Self::InvalidSortKey => write!(f, "sort key must be a number, got NaN"),
        }
    }
}

impl Error for TreeError {}

impl From<StoreError> for TreeError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::FolderNotFound(id) => Self::FolderNotFound(id),
            StoreError::ListNotFound(id) => Self::ListNotFound(id),
        }
    }
}

/// Options applied when a tree service is bootstrapped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeOptions {
    /// Display name of the seeded root folder.
    pub root_name: String,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            root_name: DEFAULT_ROOT_NAME.to_string(),
        }
    }
}

/// Tree service facade owning one node store.
pub struct TreeService<S: NodeStore> {
    pub(super) store: S,
}

impl<S: NodeStore> TreeService<S> {
    /// Creates service with default options, seeding root when absent.
    pub fn new(store: S) -> Self {
        Self::with_options(store, TreeOptions::default())
    }

    /// Creates service and seeds the root folder when the store lacks one.
    ///
    /// An existing root is kept as-is, so pre-populated stores keep their
    /// root name.
    pub fn with_options(mut store: S, options: TreeOptions) -> Self {
        if !store.contains_folder(ROOT_FOLDER_ID) {
            store.put_folder(Folder::root(options.root_name));
            info!("event=root_seed module=tree status=ok folder_id={ROOT_FOLDER_ID}");
        }
        Self { store }
    }

    /// Read access to the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Releases the backing store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Loads one folder snapshot.
    pub fn folder(&self, folder_id: &str) -> TreeResult<Folder> {
        self.store.get_folder(folder_id).map_err(Into::into)
    }

    /// Loads one list snapshot with items in stored order.
    pub fn list(&self, list_id: &str) -> TreeResult<List> {
        self.store.get_list(list_id).map_err(Into::into)
    }

    /// Creates one empty folder. `None` parent means root.
    pub fn create_folder(
        &mut self,
        name: impl Into<String>,
        sort_key: f64,
        parent_folder_id: Option<&str>,
    ) -> TreeResult<Folder> {
        let name = normalize_name(name.into())?;
        ensure_sort_key(sort_key)?;
        let parent_id = resolve_parent(parent_folder_id);
        let mut parent = self.load_parent(parent_id)?;

        let folder = Folder::new(name, sort_key, Some(parent_id.to_string()));
        parent.attach_folder(&folder.id);
        self.store.put_folder(folder.clone());
        self.store.put_folder(parent);

        debug!(
            "event=folder_create module=tree status=ok folder_id={} parent_id={}",
            folder.id, parent_id
        );
        Ok(folder)
    }

    /// Creates one empty list. `None` parent means root.
    pub fn create_list(
        &mut self,
        name: impl Into<String>,
        sort_key: f64,
        parent_folder_id: Option<&str>,
    ) -> TreeResult<List> {
        let name = normalize_name(name.into())?;
        ensure_sort_key(sort_key)?;
        let parent_id = resolve_parent(parent_folder_id);
        let mut parent = self.load_parent(parent_id)?;

        let list = List::new(name, sort_key, Some(parent_id.to_string()));
        parent.attach_list(&list.id);
        self.store.put_list(list.clone());
        self.store.put_folder(parent);

        debug!(
            "event=list_create module=tree status=ok list_id={} parent_id={}",
            list.id, parent_id
        );
        Ok(list)
    }

    /// Renames a folder and optionally re-parents it. `None` parent means
    /// root. Root itself may be renamed but never given a parent.
    pub fn move_or_rename_folder(
        &mut self,
        folder_id: &str,
        new_name: impl Into<String>,
        new_sort_key: f64,
        new_parent_folder_id: Option<&str>,
    ) -> TreeResult<Folder> {
        let new_name = normalize_name(new_name.into())?;
        ensure_sort_key(new_sort_key)?;
        let mut folder = self.folder(folder_id)?;

        if folder.is_root() {
            if new_parent_folder_id.is_some() {
                return Err(TreeError::RootImmutable);
            }
            folder.name = new_name;
            folder.sort_key = new_sort_key;
            self.store.put_folder(folder.clone());
            return Ok(folder);
        }

        let target_id = resolve_parent(new_parent_folder_id);
        let reparent = if folder.parent_folder_id.as_deref() != Some(target_id) {
            if target_id == folder_id {
                return Err(TreeError::CycleDetected {
                    folder_id: folder_id.to_string(),
                    parent_id: target_id.to_string(),
                });
            }
            let old_parent = self.load_old_parent(folder.parent_folder_id.as_deref())?;
            let new_parent = self.load_parent(target_id)?;
            if self.would_create_cycle(folder_id, target_id)? {
                return Err(TreeError::CycleDetected {
                    folder_id: folder_id.to_string(),
                    parent_id: target_id.to_string(),
                });
            }
            Some((old_parent, new_parent))
        } else {
            None
        };

        folder.name = new_name;
        folder.sort_key = new_sort_key;
        if let Some((old_parent, mut new_parent)) = reparent {
            folder.parent_folder_id = Some(target_id.to_string());
            self.store.put_folder(folder.clone());
            if let Some(mut old_parent) = old_parent {
                old_parent.detach_folder(folder_id);
                self.store.put_folder(old_parent);
            }
            new_parent.attach_folder(folder_id);
            self.store.put_folder(new_parent);
            debug!(
                "event=folder_move module=tree status=ok folder_id={folder_id} parent_id={target_id}"
            );
        } else {
            self.store.put_folder(folder.clone());
        }
        Ok(folder)
    }

    /// Renames a list and optionally re-parents it. `None` parent means root.
    pub fn move_or_rename_list(
        &mut self,
        list_id: &str,
        new_name: impl Into<String>,
        new_sort_key: f64,
        new_parent_folder_id: Option<&str>,
    ) -> TreeResult<List> {
        let new_name = normalize_name(new_name.into())?;
        ensure_sort_key(new_sort_key)?;
        let mut list = self.list(list_id)?;

        let target_id = resolve_parent(new_parent_folder_id);
        let reparent = if list.parent_folder_id.as_deref() != Some(target_id) {
            let old_parent = self.load_old_parent(list.parent_folder_id.as_deref())?;
            let new_parent = self.load_parent(target_id)?;
            Some((old_parent, new_parent))
        } else {
            None
        };

        list.name = new_name;
        list.sort_key = new_sort_key;
        if let Some((old_parent, mut new_parent)) = reparent {
            list.parent_folder_id = Some(target_id.to_string());
            self.store.put_list(list.clone());
            if let Some(mut old_parent) = old_parent {
                old_parent.detach_list(list_id);
                self.store.put_folder(old_parent);
            }
            new_parent.attach_list(list_id);
            self.store.put_folder(new_parent);
            debug!(
                "event=list_move module=tree status=ok list_id={list_id} parent_id={target_id}"
            );
        } else {
            self.store.put_list(list.clone());
        }
        Ok(list)
    }

    /// Deletes a folder.
    ///
    /// Without `recursive`, only an empty folder can be deleted. With it,
    /// the whole subtree (folders, lists, items) is removed.
    pub fn delete_folder(&mut self, folder_id: &str, recursive: bool) -> TreeResult<DeletedSubtree> {
        if folder_id == ROOT_FOLDER_ID {
            return Err(TreeError::RootImmutable);
        }
        let folder = self.folder(folder_id)?;
        if !recursive && folder.has_children() {
            return Err(TreeError::FolderNotEmpty(folder_id.to_string()));
        }

        let deleted = delete_folder_subtree(&mut self.store, folder_id)?;
        debug!(
            "event=folder_delete module=tree status=ok folder_id={} recursive={} folders={} lists={} items={}",
            folder_id,
            recursive,
            deleted.removed_folder_ids.len(),
            deleted.removed_list_ids.len(),
            deleted.removed_item_count
        );
        Ok(deleted)
    }

    /// Deletes one list with its items and detaches it from its parent.
    pub fn delete_list(&mut self, list_id: &str) -> TreeResult<List> {
        let list = self.store.remove_list(list_id)?;
        if let Some(parent_id) = list.parent_folder_id.as_deref() {
            if let Ok(mut parent) = self.store.get_folder(parent_id) {
                parent.detach_list(list_id);
                self.store.put_folder(parent);
            }
        }
        debug!(
            "event=list_delete module=tree status=ok list_id={} items={}",
            list_id,
            list.items.len()
        );
        Ok(list)
    }

    /// Projects one folder with its children ordered by sort key.
    pub fn folder_view(&self, folder_id: &str) -> TreeResult<FolderView> {
        let folder = self.folder(folder_id)?;
        Ok(project_folder(&self.store, &folder))
    }

    /// Projects the root folder.
    pub fn root_view(&self) -> TreeResult<FolderView> {
        self.folder_view(ROOT_FOLDER_ID)
    }

    /// Projects one list with its items ordered by sort key.
    pub fn list_view(&self, list_id: &str) -> TreeResult<ListView> {
        let list = self.list(list_id)?;
        Ok(project_list(&list))
    }

    fn load_parent(&self, parent_id: &str) -> TreeResult<Folder> {
        self.store
            .get_folder(parent_id)
            .map_err(|_| TreeError::ParentNotFound(parent_id.to_string()))
    }

    fn load_old_parent(&self, parent_id: Option<&str>) -> TreeResult<Option<Folder>> {
        parent_id.map(|id| self.load_parent(id)).transpose()
    }

    fn would_create_cycle(&self, folder_id: &str, candidate_parent_id: &str) -> TreeResult<bool> {
        let mut visited = HashSet::new();
        let mut cursor = Some(candidate_parent_id.to_string());
        while let Some(current) = cursor {
            if current == folder_id {
                return Ok(true);
            }
            if !visited.insert(current.clone()) {
                return Ok(true);
            }
            cursor = self.load_parent(&current)?.parent_folder_id;
        }
        Ok(false)
    }
}

fn resolve_parent(parent_folder_id: Option<&str>) -> &str {
    parent_folder_id.unwrap_or(ROOT_FOLDER_ID)
}

fn normalize_name(value: String) -> TreeResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(TreeError::InvalidName);
    }
    Ok(trimmed.to_string())
}

pub(super) fn ensure_sort_key(sort_key: f64) -> TreeResult<()> {
    if sort_key.is_nan() {
        return Err(TreeError::InvalidSortKey);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{normalize_name, ErrorKind, TreeError};

    #[test]
    fn normalize_name_trims_and_rejects_blank() {
        assert_eq!(normalize_name("  Inbox ".to_string()).unwrap(), "Inbox");
        assert_eq!(
            normalize_name(" \t ".to_string()).unwrap_err(),
            TreeError::InvalidName
        );
    }

    #[test]
    fn error_kinds_follow_taxonomy() {
        assert_eq!(
            TreeError::ParentNotFound("x".to_string()).kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            TreeError::ItemNotFound {
                list_id: "l".to_string(),
                item_id: "i".to_string()
            }
            .kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            TreeError::FolderNotEmpty("x".to_string()).kind(),
            ErrorKind::InvalidOperation
        );
        assert_eq!(TreeError::RootImmutable.kind(), ErrorKind::InvalidOperation);
        assert_eq!(TreeError::InvalidSortKey.kind(), ErrorKind::Validation);
    }
}
