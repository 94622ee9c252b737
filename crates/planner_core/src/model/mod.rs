//! Domain model for the folder/list tree.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//!
//! # Invariants
//! - Every entity is identified by a stable `NodeId`.
//! - Parent/child links are ids resolved against the node store, never
//!   embedded references.

pub mod node;
