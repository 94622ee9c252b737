//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate node store calls into invariant-preserving tree operations.
//! - Keep transport layers decoupled from storage details.

pub mod cascade;
pub mod integrity;
mod list_items;
pub mod projection;
pub mod shared_tree;
pub mod tree_service;
