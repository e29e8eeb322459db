use super::*;

#[test]
fn commit_requires_non_empty_changed_text() {
    assert_eq!(commit_text("old", "new"), Some("new".to_string()));
    assert_eq!(commit_text("old", "old"), None);
    assert_eq!(commit_text("old", ""), None);
    assert_eq!(commit_text("old", "   "), None);
}

#[test]
fn commit_trims_the_draft() {
    assert_eq!(commit_text("old", "  new  "), Some("new".to_string()));
    assert_eq!(commit_text("old", "  old  "), None);
}

#[test]
fn sub_items_allowed_at_depth_zero_and_one_only() {
    assert!(can_add_sub_item(0));
    assert!(can_add_sub_item(1));
    assert!(!can_add_sub_item(2));
    assert!(!can_add_sub_item(3));
}

#[test]
fn collapse_state_toggles_per_item() {
    let mut collapse = CollapseState::new();
    assert!(!collapse.is_collapsed("a"));

    collapse.toggle("a");
    assert!(collapse.is_collapsed("a"));
    assert!(!collapse.is_collapsed("b"));

    collapse.toggle("a");
    assert!(!collapse.is_collapsed("a"));
}
