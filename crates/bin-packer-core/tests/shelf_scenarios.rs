use bin_packer_core::prelude::*;

fn manager(heuristic: Heuristic, rotation: bool, sort: SortKey) -> BinManager {
    let cfg = PackConfig::builder()
        .with_bin_dimensions(10, 10)
        .algorithm(Algorithm::Shelf)
        .heuristic(heuristic)
        .allow_rotation(rotation)
        .sort(sort)
        .build();
    BinManager::new(cfg).expect("valid config")
}

fn placement<'a>(bins: &'a [Bin], id: &str) -> &'a Item {
    bins.iter()
        .flat_map(|b| b.items.iter())
        .find(|i| i.id == id)
        .unwrap_or_else(|| panic!("item {id} not placed"))
}

#[test]
fn four_squares_fill_one_bin_on_two_shelves() {
    let mut m = manager(Heuristic::FirstFit, false, SortKey::None);
    let items = vec![
        Item::new(5, 5, "a"),
        Item::new(5, 5, "b"),
        Item::new(5, 5, "c"),
        Item::new(5, 5, "d"),
    ];
    let bins = m.execute(items).expect("packs");
    assert_eq!(bins.len(), 1);
    assert_eq!((placement(bins, "a").x, placement(bins, "a").y), (0, 0));
    assert_eq!((placement(bins, "b").x, placement(bins, "b").y), (5, 0));
    assert_eq!((placement(bins, "c").x, placement(bins, "c").y), (0, 5));
    assert_eq!((placement(bins, "d").x, placement(bins, "d").y), (5, 5));
}

#[test]
fn insufficient_headroom_opens_second_bin() {
    // After a 10x6 shelf only 4 rows remain; a height-5 item cannot open a
    // shelf there and must go to a fresh bin.
    let mut m = manager(Heuristic::FirstFit, false, SortKey::None);
    let items = vec![Item::new(10, 6, "a"), Item::new(10, 5, "b")];
    let bins = m.execute(items).expect("packs");
    assert_eq!(bins.len(), 2);
    assert_eq!((placement(bins, "a").x, placement(bins, "a").y), (0, 0));
    let b = placement(bins, "b");
    assert_eq!((b.x, b.y), (0, 0));
    assert_eq!(bins[1].items.len(), 1);
}

#[test]
fn empty_bin_scores_positive_via_hypothetical_shelf() {
    let strategy = ShelfStrategy::new(Heuristic::BestAreaFit, false);
    let bin = Bin::new(10, 10);
    let item = Item::new(4, 4, "x");
    assert!(strategy.evaluate_bin(&bin, &item) > 0.0);

    let too_tall = Item::new(4, 11, "y");
    assert_eq!(strategy.evaluate_bin(&bin, &too_tall), 0.0);
}

#[test]
fn best_height_fit_prefers_the_closest_shelf() {
    let cfg = PackConfig::builder()
        .with_bin_dimensions(20, 20)
        .algorithm(Algorithm::Shelf)
        .heuristic(Heuristic::BestHeightFit)
        .build();
    let mut m = BinManager::new(cfg).expect("valid config");
    let items = vec![
        Item::new(12, 10, "tall"),
        Item::new(12, 6, "mid"),
        Item::new(5, 5, "probe"),
    ];
    let bins = m.execute(items).expect("packs");
    assert_eq!(bins.len(), 1);
    // "mid" opens a second shelf at y=10; the probe's height is closer to 6
    // than to 10 so it lands there, right of "mid".
    let probe = placement(bins, "probe");
    assert_eq!((probe.x, probe.y), (12, 10));
}

#[test]
fn shelf_height_is_fixed_by_first_item() {
    let mut m = manager(Heuristic::FirstFit, false, SortKey::None);
    let items = vec![
        Item::new(3, 4, "first"),
        Item::new(3, 2, "short"),
        Item::new(3, 4, "exact"),
    ];
    let bins = m.execute(items).expect("packs");
    assert_eq!(bins.len(), 1);
    // All three share the height-4 shelf at y=0; the short item does not
    // shrink it.
    for id in ["first", "short", "exact"] {
        assert_eq!(placement(bins, id).y, 0);
    }
    assert_eq!(placement(bins, "short").x, 3);
    assert_eq!(placement(bins, "exact").x, 6);
}

#[test]
fn wide_item_opens_rotated_shelf() {
    // 12x8 cannot fit a 10-wide bin upright; the new shelf takes the
    // rotated orientation and its height comes from the rotated item.
    let cfg = PackConfig::builder()
        .with_bin_dimensions(10, 20)
        .algorithm(Algorithm::Shelf)
        .heuristic(Heuristic::FirstFit)
        .allow_rotation(true)
        .build();
    let mut m = BinManager::new(cfg).expect("valid config");
    let bins = m.execute(vec![Item::new(12, 8, "wide")]).expect("packs");
    let w = placement(bins, "wide");
    assert!(w.rotated);
    assert_eq!((w.width, w.height), (8, 12));
    assert_eq!((w.x, w.y), (0, 0));
}
