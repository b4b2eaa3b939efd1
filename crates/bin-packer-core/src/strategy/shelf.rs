use std::collections::HashMap;

use super::{fits_bin, orient, Strategy};
use crate::config::Heuristic;
use crate::model::{Bin, BinId, Item};
use crate::score::{score_fit, PERFECT};

/// Horizontal band inside a bin. Its height is fixed by the first item
/// placed on it; items consume width left to right and shelves never shrink.
#[derive(Debug, Clone)]
struct Shelf {
    y_offset: u32,
    height: u32,
    width: u32,
    available_width: u32,
}

impl Shelf {
    fn new(y_offset: u32, height: u32, width: u32) -> Self {
        Self {
            y_offset,
            height,
            width,
            available_width: width,
        }
    }
}

#[derive(Debug, Clone)]
struct ShelfState {
    shelves: Vec<Shelf>,
    available_height: u32,
}

impl ShelfState {
    fn initial(bin: &Bin) -> Self {
        Self {
            shelves: Vec::new(),
            available_height: bin.height,
        }
    }

    fn next_offset(&self, bin_height: u32) -> u32 {
        bin_height - self.available_height
    }
}

pub struct ShelfStrategy {
    heuristic: Heuristic,
    allow_rotation: bool,
    states: HashMap<BinId, ShelfState>,
}

impl ShelfStrategy {
    pub fn new(heuristic: Heuristic, allow_rotation: bool) -> Self {
        Self {
            heuristic,
            allow_rotation,
            states: HashMap::new(),
        }
    }
}

/// Score `item` on `shelf`; 0.0 when it does not fit even rotated.
fn score_shelf(heuristic: Heuristic, allow_rotation: bool, shelf: &Shelf, item: &Item) -> f64 {
    match orient(shelf.available_width, shelf.height, item, allow_rotation) {
        Some((w, h, _)) => score_fit(heuristic, shelf.available_width, shelf.height, w, h),
        None => 0.0,
    }
}

/// Best existing shelf by score. Earlier shelves win ties; a perfect score
/// stops the scan.
fn find_best_shelf(
    heuristic: Heuristic,
    allow_rotation: bool,
    state: &ShelfState,
    item: &Item,
) -> Option<usize> {
    let mut best: Option<usize> = None;
    let mut best_score = 0.0;
    for (idx, shelf) in state.shelves.iter().enumerate() {
        let score = score_shelf(heuristic, allow_rotation, shelf, item);
        if score > best_score {
            best = Some(idx);
            best_score = score;
        }
        if best_score >= PERFECT {
            break;
        }
    }
    best
}

/// Hypothetical shelf opened for `item` at the current top of the bin, or
/// None if the remaining height cannot take it. The orientation is settled
/// here: an item wider than the bin opens a rotated shelf.
fn plan_new_shelf(
    state: &ShelfState,
    bin: &Bin,
    item: &Item,
    allow_rotation: bool,
) -> Option<Shelf> {
    let (_, h, _) = orient(bin.width, state.available_height, item, allow_rotation)?;
    Some(Shelf::new(state.next_offset(bin.height), h, bin.width))
}

fn insert(shelf: &mut Shelf, bin: &mut Bin, mut item: Item, allow_rotation: bool) -> Result<(), Item> {
    let Some((_, _, rotated)) = orient(shelf.available_width, shelf.height, &item, allow_rotation)
    else {
        return Err(item);
    };
    if rotated {
        item.rotate();
    }
    item.x = (shelf.width - shelf.available_width) as i32;
    item.y = shelf.y_offset as i32;
    shelf.available_width -= item.width;
    bin.items.push(item);
    Ok(())
}

impl Strategy for ShelfStrategy {
    fn evaluate_bin(&self, bin: &Bin, item: &Item) -> f64 {
        if !fits_bin(bin, item, self.allow_rotation) {
            return 0.0;
        }
        let initial;
        let state = match self.states.get(bin.id()) {
            Some(state) => state,
            None => {
                initial = ShelfState::initial(bin);
                &initial
            }
        };

        let mut best_score = 0.0;
        for shelf in &state.shelves {
            let score = score_shelf(self.heuristic, self.allow_rotation, shelf, item);
            if score > best_score {
                best_score = score;
            }
            if best_score >= PERFECT {
                return best_score;
            }
        }
        // No existing shelf takes the item; a bin with enough headroom can
        // still open one, and scores as that hypothetical shelf would.
        if best_score == 0.0 {
            if let Some(shelf) = plan_new_shelf(state, bin, item, self.allow_rotation) {
                best_score = score_shelf(self.heuristic, self.allow_rotation, &shelf, item);
            }
        }
        best_score
    }

    fn pack_item(&mut self, bin: &mut Bin, item: Item) -> Result<(), Item> {
        let state = self
            .states
            .entry(bin.id().clone())
            .or_insert_with(|| ShelfState::initial(bin));

        if let Some(idx) = find_best_shelf(self.heuristic, self.allow_rotation, state, &item) {
            return insert(&mut state.shelves[idx], bin, item, self.allow_rotation);
        }

        match plan_new_shelf(state, bin, &item, self.allow_rotation) {
            Some(shelf) => {
                state.available_height -= shelf.height;
                state.shelves.push(shelf);
                let idx = state.shelves.len() - 1;
                insert(&mut state.shelves[idx], bin, item, self.allow_rotation)
            }
            None => Err(item),
        }
    }
}
