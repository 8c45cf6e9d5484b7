//! Property-based tests for column assignment.
//!
//! Whatever the saved state looks like (stale ids, duplicates, ids spread
//! over columns that no longer exist), every current root list ends up in
//! exactly one column exactly once, and nothing else shows up.

use std::collections::BTreeMap;

use homedash::managers::layout_manager::{assign_columns, assign_columns_n};
use homedash::types::layout::{ColumnLayout, COLUMN_COUNT};
use proptest::prelude::*;

/// Root ids drawn from a small alphabet so saved state overlaps with them.
fn arb_roots() -> impl Strategy<Value = Vec<String>> {
    prop::collection::hash_set("[a-h]{1,2}", 0..16)
        .prop_map(|set| set.into_iter().collect::<Vec<_>>())
}

fn arb_saved_layout() -> impl Strategy<Value = ColumnLayout> {
    prop::collection::btree_map(0..6usize, prop::collection::vec("[a-h]{1,2}", 0..6), 0..6)
        .prop_map(|map: BTreeMap<usize, Vec<String>>| ColumnLayout(map))
}

fn arb_nonempty_layout() -> impl Strategy<Value = ColumnLayout> {
    prop::collection::btree_map(0..6usize, prop::collection::vec("[a-h]{1,2}", 0..6), 1..6)
        .prop_map(|map: BTreeMap<usize, Vec<String>>| ColumnLayout(map))
}

fn arb_saved_order() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-h]{1,2}", 0..12)
}

fn assert_partition(roots: &[String], columns: &[Vec<String>], column_count: usize) {
    assert_eq!(columns.len(), column_count);
    let mut placed: Vec<&String> = columns.iter().flatten().collect();
    placed.sort();
    let mut expected: Vec<&String> = roots.iter().collect();
    expected.sort();
    assert_eq!(placed, expected);
}

// Every root lands in exactly one column exactly once, for any combination
// of saved layout and saved order.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_every_root_placed_once(
        roots in arb_roots(),
        layout in prop::option::of(arb_saved_layout()),
        order in prop::option::of(arb_saved_order()),
    ) {
        let columns = assign_columns(&roots, layout.as_ref(), order.as_deref());
        assert_partition(&roots, &columns, COLUMN_COUNT);
    }

    #[test]
    fn prop_partition_holds_for_any_column_count(
        count in 1..8usize,
        roots in arb_roots(),
        layout in prop::option::of(arb_saved_layout()),
    ) {
        let columns = assign_columns_n(count, &roots, layout.as_ref(), None);
        assert_partition(&roots, &columns, count);
    }

    /// With nothing saved, root `i` goes to column `i % N` in order.
    #[test]
    fn prop_default_is_round_robin(roots in arb_roots()) {
        let columns = assign_columns(&roots, None, None);
        for (i, id) in roots.iter().enumerate() {
            let column = &columns[i % COLUMN_COUNT];
            prop_assert_eq!(&column[i / COLUMN_COUNT], id);
        }
    }

    /// A saved layout always wins over a saved order, even one that
    /// disagrees with it.
    #[test]
    fn prop_saved_layout_beats_order(
        roots in arb_roots(),
        layout in arb_nonempty_layout(),
        order in arb_saved_order(),
    ) {
        let expected = assign_columns(&roots, Some(&layout), None);

        let mut reversed = layout.flatten();
        reversed.reverse();
        prop_assert_eq!(&assign_columns(&roots, Some(&layout), Some(reversed.as_slice())), &expected);
        prop_assert_eq!(assign_columns(&roots, Some(&layout), Some(order.as_slice())), expected);
    }
}
