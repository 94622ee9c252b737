use planner_core::{ErrorKind, InMemoryNodeStore, TreeError, TreeService};

fn setup() -> TreeService<InMemoryNodeStore> {
    TreeService::new(InMemoryNodeStore::new())
}

#[test]
fn add_item_appends_with_fresh_id() {
    let mut service = setup();
    let list = service.create_list("Groceries", 1.0, None).unwrap();

    let milk = service.add_item(&list.id, "milk", 1.0).unwrap();
    let eggs = service.add_item(&list.id, "eggs", 1.0).unwrap();
    assert_ne!(milk.id, eggs.id);

    let stored = service.list(&list.id).unwrap();
    assert_eq!(stored.items, vec![milk.clone(), eggs]);
    assert_eq!(service.item(&list.id, &milk.id).unwrap(), milk);
}

#[test]
fn add_item_to_missing_list_fails() {
    let mut service = setup();
    let err = service.add_item("missing", "milk", 1.0).unwrap_err();
    assert_eq!(err, TreeError::ListNotFound("missing".to_string()));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn add_item_rejects_nan_sort_key() {
    let mut service = setup();
    let list = service.create_list("Groceries", 1.0, None).unwrap();
    let err = service.add_item(&list.id, "milk", f64::NAN).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert!(service.list(&list.id).unwrap().items.is_empty());
}

#[test]
fn update_item_replaces_value_and_sort_key() {
    let mut service = setup();
    let list = service.create_list("Groceries", 1.0, None).unwrap();
    let milk = service.add_item(&list.id, "milk", 1.0).unwrap();

    let updated = service
        .update_item(&list.id, &milk.id, "oat milk", 4.5)
        .unwrap();
    assert_eq!(updated.id, milk.id);
    assert_eq!(updated.value, "oat milk");
    assert_eq!(updated.sort_key, 4.5);
    assert_eq!(service.item(&list.id, &milk.id).unwrap(), updated);
}

#[test]
fn update_missing_item_fails_with_not_found() {
    let mut service = setup();
    let list = service.create_list("Groceries", 1.0, None).unwrap();

    let err = service.update_item(&list.id, "ghost", "x", 1.0).unwrap_err();
    assert!(matches!(
        err,
        TreeError::ItemNotFound { ref list_id, ref item_id }
            if *list_id == list.id && item_id == "ghost"
    ));
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = service.update_item("missing", "ghost", "x", 1.0).unwrap_err();
    assert_eq!(err, TreeError::ListNotFound("missing".to_string()));
}

#[test]
fn remove_item_matches_identity_not_position() {
    let mut service = setup();
    let list = service.create_list("Groceries", 1.0, None).unwrap();
    let first = service.add_item(&list.id, "same", 1.0).unwrap();
    let second = service.add_item(&list.id, "same", 1.0).unwrap();
    let third = service.add_item(&list.id, "other", 2.0).unwrap();

    let removed = service.remove_item(&list.id, &second.id).unwrap();
    assert_eq!(removed, second);
    assert_eq!(service.list(&list.id).unwrap().items, vec![first, third]);

    let err = service.remove_item(&list.id, &second.id).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn list_view_sorts_items_stably() {
    let mut service = setup();
    let list = service.create_list("Day", 1.0, None).unwrap();
    let late = service.add_item(&list.id, "late", 3.0).unwrap();
    let tie_a = service.add_item(&list.id, "tie-a", 1.0).unwrap();
    let tie_b = service.add_item(&list.id, "tie-b", 1.0).unwrap();

    let view = service.list_view(&list.id).unwrap();
    let ids: Vec<&str> = view.items.iter().map(|item| item.id.as_str()).collect();
    assert_eq!(ids, vec![tie_a.id.as_str(), tie_b.id.as_str(), late.id.as_str()]);
}

#[test]
fn item_count_shows_in_parent_view() {
    let mut service = setup();
    let folder = service.create_folder("F", 1.0, None).unwrap();
    let list = service.create_list("L", 1.0, Some(&folder.id)).unwrap();
    let item = service.add_item(&list.id, "a", 1.0).unwrap();
    service.add_item(&list.id, "b", 2.0).unwrap();
    service.remove_item(&list.id, &item.id).unwrap();

    let view = service.folder_view(&folder.id).unwrap();
    assert_eq!(view.items[0].child_count, 1);
}

#[test]
fn infinite_sort_keys_are_accepted_and_ordered() {
    let mut service = setup();
    let list = service.create_list("Someday", f64::INFINITY, None).unwrap();
    let last = service.add_item(&list.id, "last", f64::INFINITY).unwrap();
    let first = service.add_item(&list.id, "first", f64::NEG_INFINITY).unwrap();
    let middle = service.add_item(&list.id, "middle", 0.0).unwrap();

    let view = service.list_view(&list.id).unwrap();
    let ids: Vec<&str> = view.items.iter().map(|item| item.id.as_str()).collect();
    assert_eq!(ids, vec![first.id.as_str(), middle.id.as_str(), last.id.as_str()]);
}

#[test]
fn signed_zero_item_keys_tie_in_insertion_order() {
    let mut service = setup();
    let list = service.create_list("Day", 1.0, None).unwrap();
    let positive = service.add_item(&list.id, "positive", 0.0).unwrap();
    let negative = service.add_item(&list.id, "negative", -0.0).unwrap();

    let view = service.list_view(&list.id).unwrap();
    let ids: Vec<&str> = view.items.iter().map(|item| item.id.as_str()).collect();
    assert_eq!(ids, vec![positive.id.as_str(), negative.id.as_str()]);
}
