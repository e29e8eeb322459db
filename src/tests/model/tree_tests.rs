use super::*;

fn item(id: &str, subs: Vec<Item>) -> Item {
    Item {
        id: id.to_string(),
        content: format!("item {}", id),
        complete: false,
        sub_items: subs,
    }
}

fn forest() -> Vec<Item> {
    // a
    //   b
    //     c
    // d
    vec![
        item("a", vec![item("b", vec![item("c", vec![])])]),
        item("d", vec![]),
    ]
}

#[test]
fn find_item_descends_into_subtrees() {
    let items = forest();
    assert_eq!(find_item(&items, "c").map(|i| i.id.as_str()), Some("c"));
    assert_eq!(find_item(&items, "d").map(|i| i.id.as_str()), Some("d"));
    assert!(find_item(&items, "nope").is_none());
}

#[test]
fn item_depth_counts_from_forest_roots() {
    let items = forest();
    assert_eq!(item_depth(&items, "a", 0), Some(0));
    assert_eq!(item_depth(&items, "b", 0), Some(1));
    assert_eq!(item_depth(&items, "c", 0), Some(2));
    assert_eq!(item_depth(&items, "missing", 0), None);
}

#[test]
fn detach_item_removes_and_keeps_subtree() {
    let mut items = forest();
    let b = detach_item(&mut items, "b").expect("b detached");
    assert_eq!(b.sub_items.len(), 1);
    assert_eq!(b.sub_items[0].id, "c");
    assert!(find_item(&items, "b").is_none());
    assert!(find_item(&items, "c").is_none());
    assert!(find_item(&items, "a").is_some());
}

#[test]
fn detach_item_unknown_id_is_none() {
    let mut items = forest();
    assert!(detach_item(&mut items, "zzz").is_none());
    assert_eq!(items.len(), 2);
}

#[test]
fn subtree_contains_self_and_descendants() {
    let items = forest();
    let a = find_item(&items, "a").unwrap();
    assert!(subtree_contains(a, "a"));
    assert!(subtree_contains(a, "c"));
    assert!(!subtree_contains(a, "d"));
}

#[test]
fn entity_ids_are_hex_and_distinct() {
    let a = new_entity_id().unwrap();
    let b = new_entity_id().unwrap();
    assert_eq!(a.len(), 32);
    assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    assert_ne!(a, b);
}

#[test]
fn item_wire_shape_uses_sub_items_key() {
    let json = serde_json::to_value(item("a", vec![])).unwrap();
    assert!(json.get("subItems").is_some());
    assert_eq!(json.get("complete"), Some(&serde_json::Value::Bool(false)));
}

#[test]
fn move_request_wire_shape() {
    let req = MoveRequest {
        item_id: "i".to_string(),
        target_parent_type: ParentKind::List,
        target_parent_id: "l".to_string(),
        target_index: 3,
    };
    let json = serde_json::to_value(&req).unwrap();
    assert_eq!(json.get("itemId").and_then(|v| v.as_str()), Some("i"));
    assert_eq!(
        json.get("targetParentType").and_then(|v| v.as_str()),
        Some("list")
    );
    assert_eq!(json.get("targetIndex").and_then(|v| v.as_u64()), Some(3));
}
