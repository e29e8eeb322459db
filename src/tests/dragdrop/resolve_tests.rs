use super::*;

use crate::model::{Board, Item, ParentKind, TodoList};

fn fixture() -> Snapshot {
    let mut board = Board::new();
    board.insert(
        "list-1".to_string(),
        TodoList {
            id: "list-1".to_string(),
            title: "Work".to_string(),
            items: vec![
                Item {
                    id: "a".to_string(),
                    content: "email boss".to_string(),
                    complete: false,
                    sub_items: vec![Item {
                        id: "b".to_string(),
                        content: "draft reply".to_string(),
                        complete: false,
                        sub_items: vec![],
                    }],
                },
                Item {
                    id: "d".to_string(),
                    content: "file expenses".to_string(),
                    complete: false,
                    sub_items: vec![],
                },
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
fn null_destination_resolves_to_nothing() {
    let snap = fixture();
    let source = DragSpot::new("list-1", 0);
    assert!(resolve_drag(&snap, &source, None, "a").is_none());
}

#[test]
fn identical_source_and_destination_is_a_no_op() {
    let snap = fixture();
    let spot = DragSpot::new("list-1", 1);
    assert!(resolve_drag(&snap, &spot, Some(&spot.clone()), "d").is_none());
}

#[test]
fn same_container_different_index_still_moves() {
    let snap = fixture();
    let source = DragSpot::new("list-1", 1);
    let dest = DragSpot::new("list-1", 0);
    let req = resolve_drag(&snap, &source, Some(&dest), "d").expect("move resolved");
    assert_eq!(req.target_parent_type, ParentKind::List);
    assert_eq!(req.target_parent_id, "list-1");
    assert_eq!(req.target_index, 0);
}

#[test]
fn drop_into_known_list_targets_a_list() {
    let snap = fixture();
    let source = DragSpot::new("list-1", 0);
    let dest = DragSpot::new("list-2", 0);
    let req = resolve_drag(&snap, &source, Some(&dest), "a").expect("move resolved");
    assert_eq!(req.item_id, "a");
    assert_eq!(req.target_parent_type, ParentKind::List);
    assert_eq!(req.target_parent_id, "list-2");
}

#[test]
fn drop_into_item_container_targets_an_item() {
    let snap = fixture();
    let source = DragSpot::new("list-1", 1);
    let dest = DragSpot::new("a", 1);
    let req = resolve_drag(&snap, &source, Some(&dest), "d").expect("move resolved");
    assert_eq!(req.target_parent_type, ParentKind::Item);
    assert_eq!(req.target_parent_id, "a");
    assert_eq!(req.target_index, 1);
}

#[test]
fn unknown_container_id_is_treated_as_item() {
    // Container ids that key no list are sub-item slots by construction.
    let snap = fixture();
    let source = DragSpot::new("list-1", 0);
    let dest = DragSpot::new("not-a-list", 0);
    let req = resolve_drag(&snap, &source, Some(&dest), "a").expect("move resolved");
    assert_eq!(req.target_parent_type, ParentKind::Item);
    assert_eq!(req.target_parent_id, "not-a-list");
}

#[test]
fn depth_is_not_checked_at_move_time() {
    // "b" already sits at depth 1; dropping "d" under it goes through.
    let snap = fixture();
    let source = DragSpot::new("list-1", 1);
    let dest = DragSpot::new("b", 0);
    assert!(resolve_drag(&snap, &source, Some(&dest), "d").is_some());
}
