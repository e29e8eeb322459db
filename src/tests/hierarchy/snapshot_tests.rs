use super::*;

use crate::model::Board;

fn item(id: &str, subs: Vec<Item>) -> Item {
    Item {
        id: id.to_string(),
        content: format!("item {}", id),
        complete: false,
        sub_items: subs,
    }
}

fn fixture() -> Snapshot {
    let mut board = Board::new();
    board.insert(
        "list-1".to_string(),
        TodoList {
            id: "list-1".to_string(),
            title: "Work".to_string(),
            items: vec![
                item("a", vec![item("b", vec![item("c", vec![])])]),
                item("d", vec![]),
            ],
        },
    );
    board.insert(
        "list-2".to_string(),
        TodoList {
            id: "list-2".to_string(),
            title: "Home".to_string(),
            items: vec![],
        },
    );
    Snapshot::from_board(board)
}

#[test]
fn known_list_ids_classify_as_list() {
    let snap = fixture();
    assert_eq!(snap.classify_container("list-1"), ParentKind::List);
    assert_eq!(snap.classify_container("list-2"), ParentKind::List);
}

#[test]
fn any_other_container_id_classifies_as_item() {
    let snap = fixture();
    assert_eq!(snap.classify_container("a"), ParentKind::Item);
    // Unknown ids are still treated as sub-item containers.
    assert_eq!(snap.classify_container("never-seen"), ParentKind::Item);
}

#[test]
fn depth_is_distance_from_owning_list() {
    let snap = fixture();
    assert_eq!(snap.depth_of("a"), Some(0));
    assert_eq!(snap.depth_of("b"), Some(1));
    assert_eq!(snap.depth_of("c"), Some(2));
    assert_eq!(snap.depth_of("list-1"), None);
}

#[test]
fn slot_of_reports_container_and_index() {
    let snap = fixture();
    assert_eq!(
        snap.slot_of("d"),
        Some(ItemSlot {
            container_id: "list-1".to_string(),
            index: 1,
        })
    );
    assert_eq!(
        snap.slot_of("b"),
        Some(ItemSlot {
            container_id: "a".to_string(),
            index: 0,
        })
    );
    assert!(snap.slot_of("nope").is_none());
}

#[test]
fn container_len_covers_lists_and_items() {
    let snap = fixture();
    assert_eq!(snap.container_len("list-1"), Some(2));
    assert_eq!(snap.container_len("list-2"), Some(0));
    assert_eq!(snap.container_len("a"), Some(1));
    assert_eq!(snap.container_len("ghost"), None);
}

#[test]
fn find_item_searches_all_lists() {
    let snap = fixture();
    assert_eq!(snap.find_item("c").map(|i| i.id.as_str()), Some("c"));
    assert!(snap.find_item("list-1").is_none());
}
