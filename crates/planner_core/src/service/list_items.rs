//! Item operations within one list.
//!
//! # Invariants
//! - Item ids are unique within their owning list.
//! - Items are addressed by identity, never by position.

use crate::model::node::Item;
use crate::repo::node_store::NodeStore;
use crate::service::tree_service::{ensure_sort_key, TreeError, TreeResult, TreeService};
use log::debug;

impl<S: NodeStore> TreeService<S> {
    /// Loads one item snapshot.
    pub fn item(&self, list_id: &str, item_id: &str) -> TreeResult<Item> {
        let list = self.list(list_id)?;
        list.item(item_id)
            .cloned()
            .ok_or_else(|| item_not_found(list_id, item_id))
    }

    /// Appends a new item with a fresh id.
    pub fn add_item(
        &mut self,
        list_id: &str,
        value: impl Into<String>,
        sort_key: f64,
    ) -> TreeResult<Item> {
        ensure_sort_key(sort_key)?;
        let mut list = self.list(list_id)?;

        let item = Item::new(value, sort_key);
        list.items.push(item.clone());
        self.store.put_list(list);

        debug!(
            "event=item_add module=tree status=ok list_id={list_id} item_id={}",
            item.id
        );
        Ok(item)
    }

    /// Replaces value and sort key of one item.
    pub fn update_item(
        &mut self,
        list_id: &str,
        item_id: &str,
        new_value: impl Into<String>,
        new_sort_key: f64,
    ) -> TreeResult<Item> {
        ensure_sort_key(new_sort_key)?;
        let mut list = self.list(list_id)?;

        let item = list
            .item_mut(item_id)
            .ok_or_else(|| item_not_found(list_id, item_id))?;
        item.value = new_value.into();
        item.sort_key = new_sort_key;
        let updated = item.clone();
        self.store.put_list(list);

        debug!("event=item_update module=tree status=ok list_id={list_id} item_id={item_id}");
        Ok(updated)
    }

    /// Removes one item by id and returns it.
    pub fn remove_item(&mut self, list_id: &str, item_id: &str) -> TreeResult<Item> {
        let mut list = self.list(list_id)?;

        let removed = list
            .take_item(item_id)
            .ok_or_else(|| item_not_found(list_id, item_id))?;
        self.store.put_list(list);

        debug!("event=item_remove module=tree status=ok list_id={list_id} item_id={item_id}");
        Ok(removed)
    }
}

fn item_not_found(list_id: &str, item_id: &str) -> TreeError {
    TreeError::ItemNotFound {
        list_id: list_id.to_string(),
        item_id: item_id.to_string(),
    }
}
