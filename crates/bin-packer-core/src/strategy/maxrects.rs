use std::collections::HashMap;

use super::{fits_bin, orient, Strategy};
use crate::config::Heuristic;
use crate::model::{Bin, BinId, FreeRect, Item};
use crate::score::{score_fit, PERFECT};

#[derive(Debug, Clone)]
struct MaxRectsState {
    free: Vec<FreeRect>,
}

impl MaxRectsState {
    fn initial(bin: &Bin) -> Self {
        Self {
            free: vec![FreeRect::new(0, 0, bin.width, bin.height)],
        }
    }
}

/// Maximal-rectangles engine: free rectangles may overlap, and the set is
/// kept maximal (no rectangle fully contained in another). Every insert
/// clips all overlapping free rectangles against the placed footprint and
/// prunes contained leftovers.
pub struct MaxRectsStrategy {
    heuristic: Heuristic,
    allow_rotation: bool,
    states: HashMap<BinId, MaxRectsState>,
}

impl MaxRectsStrategy {
    pub fn new(heuristic: Heuristic, allow_rotation: bool) -> Self {
        Self {
            heuristic,
            allow_rotation,
            states: HashMap::new(),
        }
    }

    /// Current free rectangles for `bin`, if it has been packed into.
    pub fn free_rects(&self, bin: &Bin) -> Option<&[FreeRect]> {
        self.states.get(bin.id()).map(|s| s.free.as_slice())
    }
}

/// Best fitting free rectangle by score; insertion order wins ties and a
/// perfect score stops the scan.
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

/// Replace `rect` with the parts not covered by `overlap` (the intersection
/// of `rect` and a placed footprint): full-height slabs left and right of
/// it, full-width slabs below and above.
fn clip_overlap(rect: &FreeRect, overlap: &FreeRect, out: &mut Vec<FreeRect>) {
    if overlap.x > rect.x {
        out.push(FreeRect::new(rect.x, rect.y, overlap.x - rect.x, rect.height));
    }
    if overlap.right() < rect.right() {
        out.push(FreeRect::new(
            overlap.right(),
            rect.y,
            rect.right() - overlap.right(),
            rect.height,
        ));
    }
    if overlap.y > rect.y {
        out.push(FreeRect::new(rect.x, rect.y, rect.width, overlap.y - rect.y));
    }
    if overlap.top() < rect.top() {
        out.push(FreeRect::new(
            rect.x,
            overlap.top(),
            rect.width,
            rect.top() - overlap.top(),
        ));
    }
}

fn intersection(a: &FreeRect, b: &FreeRect) -> FreeRect {
    let x1 = a.x.max(b.x);
    let y1 = a.y.max(b.y);
    let x2 = a.right().min(b.right());
    let y2 = a.top().min(b.top());
    FreeRect::new(x1, y1, x2 - x1, y2 - y1)
}

/// Clip every free rectangle overlapping `footprint`, then restore
/// maximality by dropping rectangles contained in another.
fn prune_overlaps(free: &mut Vec<FreeRect>, footprint: &FreeRect) {
    let mut result: Vec<FreeRect> = Vec::with_capacity(free.len());
    for rect in free.drain(..) {
        if rect.intersects(footprint) {
            let overlap = intersection(&rect, footprint);
            clip_overlap(&rect, &overlap, &mut result);
        } else {
            result.push(rect);
        }
    }
    *free = result;
    remove_contained(free);
}

/// Delete any free rectangle fully contained in another. Duplicates keep
/// one copy.
fn remove_contained(free: &mut Vec<FreeRect>) {
    let mut i = 0;
    while i < free.len() {
        let a = free[i];
        let mut remove_i = false;
        let mut j = i + 1;
        while j < free.len() {
            let b = free[j];
            if b.contains(&a) {
                remove_i = true;
                break;
            }
            if a.contains(&b) {
                free.remove(j);
                continue;
            }
            j += 1;
        }
        if remove_i {
            free.remove(i);
        } else {
            i += 1;
        }
    }
}

impl Strategy for MaxRectsStrategy {
    fn evaluate_bin(&self, bin: &Bin, item: &Item) -> f64 {
        if !fits_bin(bin, item, self.allow_rotation) {
            return 0.0;
        }
        let initial;
        let state = match self.states.get(bin.id()) {
            Some(state) => state,
            None => {
                initial = MaxRectsState::initial(bin);
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
            .or_insert_with(|| MaxRectsState::initial(bin));

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

        // Split the host rectangle around the item, then clip every other
        // free rectangle against the footprint.
        if rect.width > w {
            state.free.push(FreeRect::new(rect.x + w, rect.y, rect.width - w, h));
        }
        if rect.height > h {
            state
                .free
                .push(FreeRect::new(rect.x, rect.y + h, rect.width, rect.height - h));
        }
        let footprint = FreeRect::new(rect.x, rect.y, w, h);
        prune_overlaps(&mut state.free, &footprint);

        bin.items.push(item);
        Ok(())
    }
}
