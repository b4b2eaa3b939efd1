use std::collections::BTreeMap;

use bin_packer_core::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_items(rng: &mut StdRng, count: usize, min: u32, max: u32) -> Vec<Item> {
    (0..count)
        .map(|i| Item::new(rng.gen_range(min..=max), rng.gen_range(min..=max), i.to_string()))
        .collect()
}

fn id_counts(bins: &[Bin]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for bin in bins {
        for item in &bin.items {
            *counts.entry(item.id.clone()).or_insert(0) += 1;
        }
    }
    counts
}

#[test]
fn every_item_lands_in_exactly_one_bin() {
    for algorithm in [
        Algorithm::Shelf,
        Algorithm::Skyline,
        Algorithm::MaxRects,
        Algorithm::Guillotine,
    ] {
        let cfg = PackConfig::builder()
            .with_bin_dimensions(64, 64)
            .algorithm(algorithm)
            .heuristic(Heuristic::BestAreaFit)
            .sort(SortKey::AreaDesc)
            .build();
        let mut m = BinManager::new(cfg).expect("valid config");
        let mut rng = StdRng::seed_from_u64(7);
        let items = random_items(&mut rng, 30, 4, 30);
        let bins = m.execute(items).expect("packs");

        let counts = id_counts(bins);
        assert_eq!(counts.len(), 30, "{algorithm:?} lost items");
        assert!(counts.values().all(|&c| c == 1), "{algorithm:?} duplicated items");
    }
}

#[test]
fn oversized_item_is_a_distinct_error() {
    let cfg = PackConfig::builder()
        .with_bin_dimensions(10, 10)
        .algorithm(Algorithm::Shelf)
        .heuristic(Heuristic::FirstFit)
        .build();
    let mut m = BinManager::new(cfg).expect("valid config");
    let err = m.execute(vec![Item::new(11, 1, "slab")]).unwrap_err();
    match err {
        PackError::ItemTooLarge { id, width, height, bin_width, bin_height } => {
            assert_eq!(id, "slab");
            assert_eq!((width, height), (11, 1));
            assert_eq!((bin_width, bin_height), (10, 10));
        }
        other => panic!("expected ItemTooLarge, got {other}"),
    }
}

#[test]
fn rotation_does_not_rescue_an_item_too_long_for_both_axes() {
    let cfg = PackConfig::builder()
        .with_bin_dimensions(10, 10)
        .algorithm(Algorithm::MaxRects)
        .heuristic(Heuristic::BestAreaFit)
        .allow_rotation(true)
        .build();
    let mut m = BinManager::new(cfg).expect("valid config");
    let err = m.execute(vec![Item::new(11, 5, "beam")]).unwrap_err();
    assert!(matches!(err, PackError::ItemTooLarge { .. }));
}

#[test]
fn rotation_rescues_an_item_when_one_orientation_fits() {
    let cfg = PackConfig::builder()
        .with_bin_dimensions(20, 10)
        .algorithm(Algorithm::Skyline)
        .heuristic(Heuristic::FirstFit)
        .allow_rotation(true)
        .build();
    let mut m = BinManager::new(cfg).expect("valid config");
    let bins = m.execute(vec![Item::new(5, 15, "pole")]).expect("packs");
    let pole = &bins[0].items[0];
    assert!(pole.rotated);
    assert_eq!((pole.width, pole.height), (15, 5));
}

#[test]
fn first_fit_prefers_the_earliest_bin_with_room() {
    let cfg = PackConfig::builder()
        .with_bin_dimensions(10, 10)
        .algorithm(Algorithm::Shelf)
        .heuristic(Heuristic::FirstFit)
        .build();
    let mut m = BinManager::new(cfg).expect("valid config");
    let bins = m
        .execute(vec![
            Item::new(6, 5, "a"),
            Item::new(6, 5, "b"),
            Item::new(6, 5, "c"),
            Item::new(4, 5, "probe"),
        ])
        .expect("packs");
    assert_eq!(bins.len(), 2);
    // The probe fits the leftover of bin 1's first shelf even though bin 2
    // is emptier.
    let probe_bin = bins
        .iter()
        .position(|b| b.items.iter().any(|i| i.id == "probe"))
        .unwrap();
    assert_eq!(probe_bin, 0);
}

#[test]
fn repeated_runs_are_deterministic() {
    let run = || -> Vec<(String, i32, i32, u32, u32, bool)> {
        let cfg = PackConfig::builder()
            .with_bin_dimensions(100, 100)
            .algorithm(Algorithm::Shelf)
            .heuristic(Heuristic::BestHeightFit)
            .allow_rotation(true)
            .sort(SortKey::HeightDesc)
            .build();
        let mut m = BinManager::new(cfg).expect("valid config");
        let mut rng = StdRng::seed_from_u64(1);
        let items = random_items(&mut rng, 42, 5, 45);
        let bins = m.execute(items).expect("packs");
        bins.iter()
            .flat_map(|b| {
                b.items
                    .iter()
                    .map(|i| (i.id.clone(), i.x, i.y, i.width, i.height, i.rotated))
            })
            .collect()
    };
    let first = run();
    let second = run();
    assert!(!first.is_empty());
    assert_eq!(first, second);
}

#[test]
fn sort_keys_reorder_and_none_preserves_input() {
    let items = || {
        vec![
            Item::new(2, 9, "a"), // area 18, perim 22, short 2, long 9, diff 7
            Item::new(5, 5, "b"), // area 25, perim 20, short 5, long 5, diff 0
            Item::new(8, 3, "c"), // area 24, perim 22, short 3, long 8, diff 5
        ]
    };
    let order = |key: SortKey| -> Vec<String> {
        let mut v = items();
        key.apply(&mut v);
        v.into_iter().map(|i| i.id).collect()
    };

    assert_eq!(order(SortKey::None), ["a", "b", "c"]);
    assert_eq!(order(SortKey::AreaAsc), ["a", "c", "b"]);
    assert_eq!(order(SortKey::AreaDesc), ["b", "c", "a"]);
    assert_eq!(order(SortKey::WidthAsc), ["a", "b", "c"]);
    assert_eq!(order(SortKey::WidthDesc), ["c", "b", "a"]);
    assert_eq!(order(SortKey::HeightAsc), ["c", "b", "a"]);
    assert_eq!(order(SortKey::HeightDesc), ["a", "b", "c"]);
    // Perimeter ties between a and c resolve by input order (stable sort).
    assert_eq!(order(SortKey::PerimeterAsc), ["b", "a", "c"]);
    assert_eq!(order(SortKey::PerimeterDesc), ["a", "c", "b"]);
    assert_eq!(order(SortKey::ShorterSideAsc), ["a", "c", "b"]);
    assert_eq!(order(SortKey::ShorterSideDesc), ["b", "c", "a"]);
    assert_eq!(order(SortKey::LongerSideAsc), ["b", "c", "a"]);
    assert_eq!(order(SortKey::LongerSideDesc), ["a", "c", "b"]);
    assert_eq!(order(SortKey::SideDiffAsc), ["b", "c", "a"]);
    assert_eq!(order(SortKey::SideDiffDesc), ["a", "c", "b"]);
}
