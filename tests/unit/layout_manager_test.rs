//! Unit tests for the column layout engine.
//!
//! Covers the three resolution paths (saved column layout, legacy flat
//! order, default round-robin) and applying single reorder commands.

use std::collections::BTreeMap;

use homedash::managers::layout_manager::{
    apply_reorder, assign_columns, assign_from_preference, position_of,
};
use homedash::types::errors::ReorderError;
use homedash::types::layout::{ColumnLayout, LayoutPreference, ReorderCommand, COLUMN_COUNT};
use rstest::rstest;

fn ids(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

fn layout(columns: &[&[&str]]) -> ColumnLayout {
    ColumnLayout::from_columns(&columns.iter().map(|c| ids(c)).collect::<Vec<_>>())
}

#[test]
fn test_default_round_robin_over_four_columns() {
    let cols = assign_columns(&ids(&["a", "b", "c", "d", "e", "f"]), None, None);
    assert_eq!(cols.len(), COLUMN_COUNT);
    assert_eq!(
        cols,
        vec![ids(&["a", "e"]), ids(&["b", "f"]), ids(&["c"]), ids(&["d"])]
    );
}

/// A saved column layout is followed exactly.
#[test]
fn test_saved_layout_is_authoritative() {
    let roots = ids(&["a", "b", "c"]);
    let saved = layout(&[&["c"], &[], &["a", "b"], &[]]);
    let cols = assign_columns(&roots, Some(&saved), Some(&ids(&["a", "b", "c"])));
    assert_eq!(cols, vec![ids(&["c"]), ids(&[]), ids(&["a", "b"]), ids(&[])]);
}

/// Lists the saved layout has never seen are appended round-robin.
#[test]
fn test_new_lists_appended_after_saved_layout() {
    let roots = ids(&["a", "new1", "b", "new2"]);
    let saved = layout(&[&[], &["b"], &["a"], &[]]);
    let cols = assign_columns(&roots, Some(&saved), None);
    assert_eq!(cols, vec![ids(&["new1"]), ids(&["b", "new2"]), ids(&["a"]), ids(&[])]);
}

#[test]
fn test_stale_ids_in_saved_layout_are_skipped() {
    let roots = ids(&["a"]);
    let saved = layout(&[&["gone", "a"], &[], &[], &[]]);
    let cols = assign_columns(&roots, Some(&saved), None);
    assert_eq!(cols[0], ids(&["a"]));
}

/// An id saved in two columns is only placed once, in the first.
#[test]
fn test_duplicate_ids_in_saved_layout_placed_once() {
    let roots = ids(&["a"]);
    let saved = layout(&[&["a"], &["a"], &[], &[]]);
    let cols = assign_columns(&roots, Some(&saved), None);
    assert_eq!(cols[0], ids(&["a"]));
    assert!(cols[1].is_empty());
}

/// The legacy flat order is dealt round-robin, unknown roots last.
#[test]
fn test_legacy_order_round_robin() {
    let roots = ids(&["a", "b", "c", "d", "e"]);
    let order = ids(&["e", "d", "zzz", "c"]);
    let cols = assign_columns(&roots, None, Some(&order));
    assert_eq!(
        cols,
        vec![ids(&["e", "b"]), ids(&["d"]), ids(&["c"]), ids(&["a"])]
    );
}

/// Empty saved state means "no saved state".
#[test]
fn test_empty_preference_uses_default() {
    let roots = ids(&["a", "b"]);
    let prefs = LayoutPreference::default();
    assert_eq!(
        assign_from_preference(&roots, &prefs),
        vec![ids(&["a"]), ids(&["b"]), ids(&[]), ids(&[])]
    );
}

#[test]
fn test_column_layout_deserializes_string_keys() {
    let prefs: LayoutPreference = serde_json::from_str(
        r#"{"columnOrder": ["x"], "columnLayout": {"0": ["b"], "3": ["a"]}}"#,
    )
    .unwrap();
    let mut expected = BTreeMap::new();
    expected.insert(0usize, ids(&["b"]));
    expected.insert(3usize, ids(&["a"]));
    assert_eq!(prefs.column_layout, ColumnLayout(expected));
    assert_eq!(
        assign_from_preference(&ids(&["a", "b"]), &prefs),
        vec![ids(&["b"]), ids(&[]), ids(&[]), ids(&["a"])]
    );
}

#[test]
fn test_preference_from_layout_derives_order() {
    let prefs = LayoutPreference::from_layout(layout(&[&["a"], &["b", "c"], &[], &["d"]]));
    assert_eq!(prefs.column_order, ids(&["a", "b", "c", "d"]));
}

#[rstest]
#[case(0, 0, 1, 0, vec![vec!["b"], vec!["a", "c"]])]
#[case(0, 0, 1, 1, vec![vec!["b"], vec!["c", "a"]])]
#[case(0, 0, 1, 99, vec![vec!["b"], vec!["c", "a"]])]
#[case(0, 0, 0, 1, vec![vec!["b", "a"], vec!["c"]])]
#[case(1, 0, 0, 0, vec![vec!["c", "a", "b"], vec![]])]
fn test_apply_reorder(
    #[case] source_column: usize,
    #[case] source_index: usize,
    #[case] target_column: usize,
    #[case] target_index: usize,
    #[case] expected: Vec<Vec<&str>>,
) {
    let cols = vec![ids(&["a", "b"]), ids(&["c"])];
    let cmd = ReorderCommand {
        source_column,
        source_index,
        target_column,
        target_index,
    };
    let expected: Vec<Vec<String>> = expected.iter().map(|c| ids(c)).collect();
    assert_eq!(apply_reorder(&cols, cmd).unwrap(), expected);
}

#[test]
fn test_apply_reorder_rejects_bad_source_index() {
    let cols = vec![ids(&["a"]), ids(&[])];
    let cmd = ReorderCommand {
        source_column: 0,
        source_index: 3,
        target_column: 1,
        target_index: 0,
    };
    assert_eq!(apply_reorder(&cols, cmd), Err(ReorderError::ColumnOutOfRange(0)));
}

#[test]
fn test_position_of() {
    let cols = vec![ids(&["a"]), ids(&["b", "c"])];
    assert_eq!(position_of(&cols, "c"), Some((1, 1)));
    assert_eq!(position_of(&cols, "z"), None);
}
