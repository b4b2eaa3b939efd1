use std::collections::HashSet;

use bin_packer_core::prelude::*;

#[test]
fn eleven_squares_make_a_grid_and_overflow() {
    let cfg = PackConfig::builder()
        .with_bin_dimensions(10, 10)
        .algorithm(Algorithm::MaxRects)
        .heuristic(Heuristic::BestAreaFit)
        .build();
    let mut m = BinManager::new(cfg).expect("valid config");
    let items = (0..11).map(|i| Item::new(3, 3, i.to_string())).collect();
    let bins = m.execute(items).expect("packs");

    assert_eq!(bins.len(), 2);
    assert_eq!(bins[0].items.len(), 9);
    assert_eq!(bins[1].items.len(), 2);

    // The first bin fills as a 3x3 grid with a 1-wide margin left over.
    let positions: HashSet<(i32, i32)> = bins[0].items.iter().map(|i| (i.x, i.y)).collect();
    let expected: HashSet<(i32, i32)> = [0, 3, 6]
        .iter()
        .flat_map(|&x| [0, 3, 6].iter().map(move |&y| (x, y)))
        .collect();
    assert_eq!(positions, expected);
}

#[test]
fn free_set_stays_maximal_after_every_insert() {
    let mut strategy = MaxRectsStrategy::new(Heuristic::BestAreaFit, true);
    let mut bin = Bin::new(64, 64);
    let sizes = [
        (30, 12),
        (9, 40),
        (25, 25),
        (5, 5),
        (18, 7),
        (7, 18),
        (12, 30),
        (3, 50),
    ];
    for (i, (w, h)) in sizes.into_iter().enumerate() {
        let _ = strategy.pack_item(&mut bin, Item::new(w, h, format!("m{i}")));
        let free = strategy.free_rects(&bin).expect("state exists");
        for a in 0..free.len() {
            for b in 0..free.len() {
                assert!(
                    a == b || !free[b].contains(&free[a]),
                    "free rect {:?} contained in {:?} after insert {}",
                    free[a],
                    free[b],
                    i
                );
            }
        }
    }
}

#[test]
fn free_rects_never_overlap_placed_items() {
    let mut strategy = MaxRectsStrategy::new(Heuristic::BestAreaFit, false);
    let mut bin = Bin::new(32, 32);
    for (i, (w, h)) in [(10, 10), (20, 6), (6, 20), (11, 11)].into_iter().enumerate() {
        let _ = strategy.pack_item(&mut bin, Item::new(w, h, format!("m{i}")));
    }
    let free = strategy.free_rects(&bin).expect("state exists");
    for item in &bin.items {
        let footprint = item.footprint().expect("placed");
        for rect in free {
            assert!(
                !rect.intersects(&footprint),
                "free rect {:?} overlaps item {}",
                rect,
                item.id
            );
        }
    }
}

#[test]
fn rotated_fit_is_used_when_upright_fails() {
    let mut strategy = MaxRectsStrategy::new(Heuristic::BestAreaFit, true);
    let mut bin = Bin::new(10, 10);
    assert!(strategy.pack_item(&mut bin, Item::new(10, 4, "base")).is_ok());
    // Only a 10x6 band remains; 6x8 fits it rotated.
    assert!(strategy.pack_item(&mut bin, Item::new(6, 8, "turn")).is_ok());
    let turn = &bin.items[1];
    assert!(turn.rotated);
    assert_eq!((turn.width, turn.height), (8, 6));
    assert_eq!((turn.x, turn.y), (0, 4));
}

#[test]
fn perfect_fit_short_circuits_to_the_first_exact_rect() {
    let mut strategy = MaxRectsStrategy::new(Heuristic::BestAreaFit, false);
    let mut bin = Bin::new(12, 12);
    // Split the bin into a 12x4 band and a 12x8 band.
    assert!(strategy.pack_item(&mut bin, Item::new(12, 4, "band")).is_ok());
    // An exact match for the remaining band scores 1 and is taken at once.
    assert!(strategy.pack_item(&mut bin, Item::new(12, 8, "rest")).is_ok());
    assert_eq!(bin.items[1].x, 0);
    assert_eq!(bin.items[1].y, 4);
    assert!(strategy.free_rects(&bin).expect("state exists").is_empty());
}
