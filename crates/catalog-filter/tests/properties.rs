use std::collections::{BTreeSet, HashSet};

use catalog_filter::{ExpansionState, build, filter, is_selected, select};
use catalog_model::{FlatRecord, HierarchyNode, Level, LevelSet, leaf_count, node_ids};
use proptest::prelude::*;

fn record_strategy() -> impl Strategy<Value = FlatRecord> {
    (
        prop::sample::select(vec!["Beverages", "Snacks", "", " Dairy "]),
        prop::option::of(prop::sample::select(vec!["Soda", "Juice", ""])),
        prop::option::of(prop::sample::select(vec!["Cans", "Bottles"])),
        prop::sample::select(vec!["P1", "P2", "P3", "104", "0104"]),
        "[A-Za-z ]{0,8}",
    )
        .prop_map(|(category, subcategory, class, product_id, name)| FlatRecord {
            product_id: product_id.to_string(),
            product_name: name,
            category_name: category.to_string(),
            subcategory_name: subcategory.map(str::to_string),
            class_name: class.map(str::to_string),
            ..FlatRecord::default()
        })
}

fn records_strategy() -> impl Strategy<Value = Vec<FlatRecord>> {
    prop::collection::vec(record_strategy(), 0..24)
}

/// Level sets that always include the product level.
fn product_levels_strategy() -> impl Strategy<Value = LevelSet> {
    (any::<bool>(), any::<bool>()).prop_map(|(subcategory, class)| {
        let mut levels = LevelSet::new([Level::Product]);
        if subcategory {
            levels = levels.with(Level::Subcategory);
        }
        if class {
            levels = levels.with(Level::Class);
        }
        levels
    })
}

fn all_nodes(forest: &[HierarchyNode]) -> Vec<&HierarchyNode> {
    let mut nodes = Vec::new();
    for root in forest {
        root.walk(&mut |node| nodes.push(node));
    }
    nodes
}

proptest! {
    #[test]
    fn leaf_count_matches_distinct_chains(
        records in records_strategy(),
        levels in product_levels_strategy(),
    ) {
        let chains: HashSet<(String, Option<String>, Option<String>, String)> = records
            .iter()
            .map(|r| {
                (
                    r.category_key().to_string(),
                    r.subcategory_key()
                        .filter(|_| levels.contains(Level::Subcategory))
                        .map(str::to_string),
                    r.class_key()
                        .filter(|_| levels.contains(Level::Class))
                        .map(str::to_string),
                    r.product_id().to_string(),
                )
            })
            .collect();

        let forest = build(&records, levels);
        prop_assert_eq!(leaf_count(&forest), chains.len());
    }

    #[test]
    fn node_ids_are_unique(records in records_strategy(), levels in product_levels_strategy()) {
        let ids = node_ids(&build(&records, levels));
        let unique: HashSet<&String> = ids.iter().collect();
        prop_assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn build_is_idempotent(records in records_strategy(), levels in product_levels_strategy()) {
        prop_assert_eq!(build(&records, levels), build(&records, levels));
    }

    #[test]
    fn selection_is_reflexive_and_level_exact(records in records_strategy()) {
        let forest = build(&records, LevelSet::all());
        let nodes = all_nodes(&forest);
        for node in &nodes {
            let selected = select(node);
            prop_assert!(is_selected(node, Some(&selected)));
            for other in &nodes {
                if other.id != node.id && other.level == node.level {
                    prop_assert!(!is_selected(other, Some(&selected)));
                }
                if other.level != node.level {
                    prop_assert!(!is_selected(other, Some(&selected)));
                }
            }
        }
    }

    #[test]
    fn filtered_rows_contain_the_query(
        records in records_strategy(),
        query in "[A-Za-z0-9 ]{0,3}",
    ) {
        let needle = query.trim().to_lowercase();
        let survivors = filter(&records, &query);
        if needle.is_empty() {
            prop_assert_eq!(survivors.len(), records.len());
        }
        for record in &survivors {
            let substring = record
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(&needle));
            let numeric = needle.chars().all(|c| c.is_ascii_digit())
                && record.product_id().trim_start_matches('0') == needle.trim_start_matches('0');
            prop_assert!(substring || numeric);
        }
    }

    #[test]
    fn search_round_trip_restores_expansion(
        records in records_strategy(),
        before in prop::collection::vec(any::<prop::sample::Index>(), 0..6),
        during in prop::collection::vec(any::<prop::sample::Index>(), 0..6),
        queries in prop::collection::vec("[a-z]{1,3}", 1..4),
    ) {
        let full = build(&records, LevelSet::all());
        let ids = node_ids(&full);
        prop_assume!(!ids.is_empty());

        let mut state = ExpansionState::new();
        state.apply_forest(&full, "");
        for index in &before {
            state.toggle(index.get::<String>(&ids));
        }
        let expanded_before: BTreeSet<String> = state.expanded().clone();

        for query in &queries {
            let forest = build(&filter(&records, query), LevelSet::all());
            state.apply_forest(&forest, query);
            let visible = node_ids(&forest);
            if !visible.is_empty() {
                for index in &during {
                    state.toggle(index.get::<String>(&visible));
                }
            }
        }

        state.apply_forest(&full, "");
        prop_assert_eq!(state.expanded(), &expanded_before);
    }
}
