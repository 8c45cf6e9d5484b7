//! Property-based tests for applying reorder commands.
//!
//! A move never loses or duplicates a card, and moving a card back to where
//! it came from restores the original columns.

use homedash::managers::layout_manager::{apply_reorder, position_of, Columns};
use homedash::types::layout::{ReorderCommand, COLUMN_COUNT};
use proptest::prelude::*;

/// Four columns holding distinct ids.
fn arb_columns() -> impl Strategy<Value = Columns> {
    prop::collection::vec(0..COLUMN_COUNT, 1..16).prop_map(|slots| {
        let mut columns: Columns = vec![Vec::new(); COLUMN_COUNT];
        for (i, column) in slots.into_iter().enumerate() {
            columns[column].push(format!("list-{}", i));
        }
        columns
    })
}

/// Picks an existing card and an arbitrary destination.
fn arb_move() -> impl Strategy<Value = (Columns, ReorderCommand)> {
    arb_columns().prop_flat_map(|columns| {
        let occupied: Vec<(usize, usize)> = columns
            .iter()
            .enumerate()
            .filter(|(_, ids)| !ids.is_empty())
            .map(|(c, ids)| (c, ids.len()))
            .collect();
        (
            Just(columns),
            prop::sample::select(occupied),
            any::<prop::sample::Index>(),
            0..COLUMN_COUNT,
            0..20usize,
        )
            .prop_map(|(columns, (source_column, len), index, target_column, target_index)| {
                let command = ReorderCommand {
                    source_column,
                    source_index: index.index(len),
                    target_column,
                    target_index,
                };
                (columns, command)
            })
    })
}

fn sorted_ids(columns: &Columns) -> Vec<String> {
    let mut ids: Vec<String> = columns.iter().flatten().cloned().collect();
    ids.sort();
    ids
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_reorder_preserves_cards((columns, command) in arb_move()) {
        let next = apply_reorder(&columns, command).unwrap();
        prop_assert_eq!(next.len(), columns.len());
        prop_assert_eq!(sorted_ids(&next), sorted_ids(&columns));

        let moved = &columns[command.source_column][command.source_index];
        let (column, index) = position_of(&next, moved).unwrap();
        prop_assert_eq!(column, command.target_column);
        prop_assert!(index <= command.target_index);
    }

    #[test]
    fn prop_move_back_restores((columns, command) in arb_move()) {
        let moved = columns[command.source_column][command.source_index].clone();
        let next = apply_reorder(&columns, command).unwrap();
        let (column, index) = position_of(&next, &moved).unwrap();

        let back = ReorderCommand {
            source_column: column,
            source_index: index,
            target_column: command.source_column,
            target_index: command.source_index,
        };
        prop_assert_eq!(apply_reorder(&next, back).unwrap(), columns);
    }
}
