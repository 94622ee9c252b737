//! Storage abstractions for tree entities.
//!
//! # Responsibility
//! - Define the id-keyed storage contract used by the tree service.
//! - Keep the concrete backing structure swappable.
//!
//! # Invariants
//! - Store APIs return semantic errors (`FolderNotFound`/`ListNotFound`)
//!   for absent ids.

pub mod node_store;
