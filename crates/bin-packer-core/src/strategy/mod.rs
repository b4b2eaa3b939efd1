use crate::config::{Algorithm, Heuristic};
use crate::model::{Bin, Item};
use crate::score::fits;

pub mod guillotine;
pub mod maxrects;
pub mod shelf;
pub mod skyline;

pub use guillotine::{GuillotineStrategy, SplitAxis};
pub use maxrects::MaxRectsStrategy;
pub use shelf::ShelfStrategy;
pub use skyline::{SkylineSegment, SkylineStrategy};

/// A strategy maintains per-bin free-space state, scores candidate
/// placements and commits them.
///
/// Implementations must keep their state consistent with the items owned by
/// each bin: placed items never overlap and lie entirely within their bin.
/// `evaluate_bin` reports the best achievable score for `item` inside `bin`
/// (0.0 when it fits nowhere); a bin without state yet is scored as empty.
/// `pack_item` commits the placement, mutating the item exactly once and
/// handing ownership to the bin; on failure the item is returned unchanged.
pub trait Strategy {
    fn evaluate_bin(&self, bin: &Bin, item: &Item) -> f64;
    fn pack_item(&mut self, bin: &mut Bin, item: Item) -> Result<(), Item>;
}

/// Instantiate the engine for `algorithm`.
pub fn create_strategy(
    algorithm: Algorithm,
    heuristic: Heuristic,
    allow_rotation: bool,
) -> Box<dyn Strategy> {
    match algorithm {
        Algorithm::Shelf => Box::new(ShelfStrategy::new(heuristic, allow_rotation)),
        Algorithm::Skyline => Box::new(SkylineStrategy::new(heuristic, allow_rotation)),
        Algorithm::MaxRects => Box::new(MaxRectsStrategy::new(heuristic, allow_rotation)),
        Algorithm::Guillotine => Box::new(GuillotineStrategy::new(heuristic, allow_rotation)),
    }
}

/// Quick bin-level reject: the item cannot be placed anywhere in a bin it
/// does not even fit empty.
pub(crate) fn fits_bin(bin: &Bin, item: &Item, allow_rotation: bool) -> bool {
    fits(bin.width, bin.height, item.width, item.height)
        || (allow_rotation && fits(bin.width, bin.height, item.height, item.width))
}

/// Orientation chosen for a candidate region: unrotated first, rotated only
/// when allowed and the unrotated form does not fit. Returns the effective
/// (width, height) and whether rotation is required.
pub(crate) fn orient(
    region_w: u32,
    region_h: u32,
    item: &Item,
    allow_rotation: bool,
) -> Option<(u32, u32, bool)> {
    if fits(region_w, region_h, item.width, item.height) {
        Some((item.width, item.height, false))
    } else if allow_rotation && fits(region_w, region_h, item.height, item.width) {
        Some((item.height, item.width, true))
    } else {
        None
    }
}
