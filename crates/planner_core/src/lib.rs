//! Core folder/list tree engine for the planner backend.
//! This crate is the single source of truth for tree invariants.

pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{
    default_log_level, init_logging, logging_status, LogConfig, LoggingError, LoggingStatus,
};
pub use model::node::{
    new_node_id, Folder, Item, List, NodeId, DEFAULT_ROOT_NAME, ROOT_FOLDER_ID,
};
pub use repo::node_store::{InMemoryNodeStore, NodeStore, StoreError, StoreResult};
pub use service::cascade::{delete_folder_subtree, DeletedSubtree};
pub use service::integrity::IntegrityViolation;
pub use service::projection::{
    project_folder, project_list, EntryKind, FolderEntry, FolderView, ListView,
};
pub use service::shared_tree::SharedTree;
pub use service::tree_service::{ErrorKind, TreeError, TreeOptions, TreeResult, TreeService};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
