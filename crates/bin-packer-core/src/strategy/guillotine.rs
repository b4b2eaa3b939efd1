use std::collections::HashMap;

use super::{fits_bin, orient, Strategy};
use crate::config::Heuristic;
use crate::model::{Bin, BinId, FreeRect, Item};
use crate::score::{score_fit, PERFECT};

/// Axis of the edge-to-edge cut applied when a free rectangle is split
/// around a placed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitAxis {
    /// Full-width top remainder, right remainder capped at the item height.
    Horizontal,
    /// Full-height right remainder, top remainder capped at the item width.
    Vertical,
}

#[derive(Debug, Clone)]
struct GuillotineState {
    free: Vec<FreeRect>,
}

impl GuillotineState {
    fn initial(bin: &Bin) -> Self {
        Self {
            free: vec![FreeRect::new(0, 0, bin.width, bin.height)],
        }
    }
}

/// Guillotine engine: the free set is a disjoint partition of the uncovered
/// bin area, maintained purely by splitting. Nothing is merged or pruned, so
/// free area plus item area always equals the bin area.
pub struct GuillotineStrategy {
    heuristic: Heuristic,
    allow_rotation: bool,
    split_axis: SplitAxis,
    states: HashMap<BinId, GuillotineState>,
}

impl GuillotineStrategy {
    pub fn new(heuristic: Heuristic, allow_rotation: bool) -> Self {
        Self {
            heuristic,
            allow_rotation,
            split_axis: SplitAxis::Horizontal,
            states: HashMap::new(),
        }
    }

    pub fn with_split_axis(mut self, axis: SplitAxis) -> Self {
        self.split_axis = axis;
        self
    }

    /// Current free rectangles for `bin`, if it has been packed into.
    pub fn free_rects(&self, bin: &Bin) -> Option<&[FreeRect]> {
        self.states.get(bin.id()).map(|s| s.free.as_slice())
    }
}

/// Best fitting free rectangle by score; insertion order wins ties and a
/// perfect score stops the scan. Returns (index, effective w, effective h,
/// rotated).
fn find_best_rect(
    heuristic: Heuristic,
    allow_rotation: bool,
    free: &[FreeRect],
    item: &Item,
) -> Option<(usize, u32, u32, bool)> {
    let mut best: Option<(usize, u32, u32, bool)> = None;
    let mut best_score = 0.0;
    for (idx, rect) in free.iter().enumerate() {
        let Some((w, h, rotated)) = orient(rect.width, rect.height, item, allow_rotation) else {
            continue;
        };
        let score = score_fit(heuristic, rect.width, rect.height, w, h);
        if score > best_score {
            best = Some((idx, w, h, rotated));
            best_score = score;
        }
        if best_score >= PERFECT {
            break;
        }
    }
    best
}

/// Split `rect` around an item of `iw` x `ih` pinned to its bottom-left
/// corner. Children with zero width or height are discarded.
fn split_rect(rect: &FreeRect, iw: u32, ih: u32, axis: SplitAxis) -> (Option<FreeRect>, Option<FreeRect>) {
    let (top, right) = match axis {
        SplitAxis::Horizontal => (
            FreeRect::new(rect.x, rect.y + ih, rect.width, rect.height - ih),
            FreeRect::new(rect.x + iw, rect.y, rect.width - iw, ih),
        ),
        SplitAxis::Vertical => (
            FreeRect::new(rect.x, rect.y + ih, iw, rect.height - ih),
            FreeRect::new(rect.x + iw, rect.y, rect.width - iw, rect.height),
        ),
    };
    let keep = |r: FreeRect| (r.width > 0 && r.height > 0).then_some(r);
    (keep(top), keep(right))
}

impl Strategy for GuillotineStrategy {
    fn evaluate_bin(&self, bin: &Bin, item: &Item) -> f64 {
        if !fits_bin(bin, item, self.allow_rotation) {
            return 0.0;
        }
        let initial;
        let state = match self.states.get(bin.id()) {
            Some(state) => state,
            None => {
                initial = GuillotineState::initial(bin);
                &initial
            }
        };
        let mut best_score = 0.0;
        for rect in &state.free {
            let Some((w, h, _)) = orient(rect.width, rect.height, item, self.allow_rotation) else {
                continue;
            };
            let score = score_fit(self.heuristic, rect.width, rect.height, w, h);
            if score > best_score {
                best_score = score;
            }
            if best_score >= PERFECT {
                break;
            }
        }
        best_score
    }

    fn pack_item(&mut self, bin: &mut Bin, mut item: Item) -> Result<(), Item> {
        let state = self
            .states
            .entry(bin.id().clone())
            .or_insert_with(|| GuillotineState::initial(bin));

        let Some((idx, w, h, rotated)) =
            find_best_rect(self.heuristic, self.allow_rotation, &state.free, &item)
        else {
            return Err(item);
        };

        let rect = state.free.remove(idx);
        if rotated {
            item.rotate();
        }
        item.x = rect.x as i32;
        item.y = rect.y as i32;

        let (top, right) = split_rect(&rect, w, h, self.split_axis);
        state.free.extend(top);
        state.free.extend(right);

        bin.items.push(item);
        Ok(())
    }
}
