use planner_core::{EntryKind, InMemoryNodeStore, TreeService, ROOT_FOLDER_ID};

fn setup() -> TreeService<InMemoryNodeStore> {
    TreeService::new(InMemoryNodeStore::new())
}

#[test]
fn root_view_orders_folders_by_sort_key() {
    let mut service = setup();
    let f2 = service.create_folder("F2", 2.0, None).unwrap();
    let f1 = service.create_folder("F1", 1.0, None).unwrap();

    let view = service.root_view().unwrap();
    assert_eq!(view.id, ROOT_FOLDER_ID);
    let ids: Vec<&str> = view.items.iter().map(|entry| entry.id.as_str()).collect();
    assert_eq!(ids, vec![f1.id.as_str(), f2.id.as_str()]);
}

#[test]
fn view_merges_folders_and_lists_with_child_counts() {
    let mut service = setup();
    let parent = service.create_folder("parent", 1.0, None).unwrap();
    let list = service.create_list("list", 1.0, Some(&parent.id)).unwrap();
    let folder = service.create_folder("folder", 3.0, Some(&parent.id)).unwrap();
    service.create_list("nested", 1.0, Some(&folder.id)).unwrap();
    service.create_folder("nested", 2.0, Some(&folder.id)).unwrap();
    service.add_item(&list.id, "a", 1.0).unwrap();
    service.add_item(&list.id, "b", 2.0).unwrap();
    service.add_item(&list.id, "c", 3.0).unwrap();

    let view = service.folder_view(&parent.id).unwrap();
    assert_eq!(view.parent_folder_id.as_deref(), Some(ROOT_FOLDER_ID));
    assert_eq!(view.items.len(), 2);

    assert_eq!(view.items[0].id, list.id);
    assert_eq!(view.items[0].kind, EntryKind::List);
    assert_eq!(view.items[0].child_count, 3);

    assert_eq!(view.items[1].id, folder.id);
    assert_eq!(view.items[1].kind, EntryKind::Folder);
    assert_eq!(view.items[1].child_count, 2);
}

#[test]
fn equal_sort_keys_place_folders_before_lists_in_arrival_order() {
    let mut service = setup();
    let list_a = service.create_list("list-a", 1.0, None).unwrap();
    let folder_a = service.create_folder("folder-a", 1.0, None).unwrap();
    let list_b = service.create_list("list-b", 1.0, None).unwrap();
    let folder_b = service.create_folder("folder-b", 1.0, None).unwrap();

    let view = service.root_view().unwrap();
    let ids: Vec<&str> = view.items.iter().map(|entry| entry.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            folder_a.id.as_str(),
            folder_b.id.as_str(),
            list_a.id.as_str(),
            list_b.id.as_str()
        ]
    );
}

#[test]
fn signed_zero_sort_keys_tie_and_keep_merge_order() {
    let mut service = setup();
    let folder = service.create_folder("F", 0.0, None).unwrap();
    let list = service.create_list("L", -0.0, None).unwrap();

    let view = service.root_view().unwrap();
    let kinds: Vec<EntryKind> = view.items.iter().map(|entry| entry.kind).collect();
    assert_eq!(kinds, vec![EntryKind::Folder, EntryKind::List]);
    assert_eq!(view.items[0].id, folder.id);
    assert_eq!(view.items[1].id, list.id);
}

#[test]
fn infinite_sort_key_is_accepted() {
    let mut service = setup();
    let last = service.create_folder("last", f64::INFINITY, None).unwrap();
    let first = service.create_folder("first", 1.0, None).unwrap();

    let view = service.root_view().unwrap();
    let ids: Vec<&str> = view.items.iter().map(|entry| entry.id.as_str()).collect();
    assert_eq!(ids, vec![first.id.as_str(), last.id.as_str()]);
}

#[test]
fn negative_and_fractional_sort_keys_order_ascending() {
    let mut service = setup();
    let c = service.create_list("c", 0.25, None).unwrap();
    let a = service.create_folder("a", -3.0, None).unwrap();
    let b = service.create_list("b", 0.0, None).unwrap();

    let view = service.root_view().unwrap();
    let ids: Vec<&str> = view.items.iter().map(|entry| entry.id.as_str()).collect();
    assert_eq!(ids, vec![a.id.as_str(), b.id.as_str(), c.id.as_str()]);
}

#[test]
fn projection_is_deterministic_and_read_only() {
    let mut service = setup();
    service.create_folder("x", 2.0, None).unwrap();
    service.create_list("y", 2.0, None).unwrap();
    service.create_folder("z", 1.0, None).unwrap();

    let before = service.folder(ROOT_FOLDER_ID).unwrap();
    let first = service.root_view().unwrap();
    let second = service.root_view().unwrap();
    assert_eq!(first, second);
    assert_eq!(service.folder(ROOT_FOLDER_ID).unwrap(), before);
}

#[test]
fn view_of_missing_folder_fails() {
    let service = setup();
    assert!(service.folder_view("missing").is_err());
    assert!(service.list_view("missing").is_err());
}

#[test]
fn folder_view_serializes_entry_kind_as_type() {
    let mut service = setup();
    let folder = service.create_folder("F1", 1.0, None).unwrap();
    service.create_list("L1", 2.0, Some(&folder.id)).unwrap();

    let view = service.folder_view(&folder.id).unwrap();
    let json = serde_json::to_value(&view).unwrap();
    assert_eq!(json["items"][0]["type"], "list");
    assert_eq!(json["items"][0]["name"], "L1");
    assert_eq!(json["items"][0]["child_count"], 0);
    assert_eq!(json["parent_folder_id"], ROOT_FOLDER_ID);
}
