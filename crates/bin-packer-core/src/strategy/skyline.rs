use std::collections::HashMap;

use super::{fits_bin, Strategy};
use crate::config::Heuristic;
use crate::model::{Bin, BinId, Item};
use crate::score::{EPSILON, PERFECT};

/// Horizontal span of the current top contour at height `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkylineSegment {
    pub x: u32,
    pub y: u32,
    pub width: u32,
}

impl SkylineSegment {
    fn right(&self) -> u32 {
        self.x + self.width
    }
}

#[derive(Debug, Clone)]
struct SkylineState {
    segments: Vec<SkylineSegment>,
}

impl SkylineState {
    fn initial(bin: &Bin) -> Self {
        Self {
            segments: vec![SkylineSegment {
                x: 0,
                y: 0,
                width: bin.width,
            }],
        }
    }
}

/// Candidate placement above one segment.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    index: usize,
    y: u32,
    width: u32,
    height: u32,
    rotated: bool,
    score: f64,
}

/// Skyline engine: per bin, an ordered list of segments covering
/// `[0, bin_width)` describes the top contour of everything placed so far.
/// Items rest on the contour; the contour is then lifted, re-sorted and
/// merged.
pub struct SkylineStrategy {
    heuristic: Heuristic,
    allow_rotation: bool,
    states: HashMap<BinId, SkylineState>,
}

impl SkylineStrategy {
    pub fn new(heuristic: Heuristic, allow_rotation: bool) -> Self {
        Self {
            heuristic,
            allow_rotation,
            states: HashMap::new(),
        }
    }

    /// Current contour for `bin`, if it has been packed into. Segments are
    /// sorted by `x` and cover `[0, bin_width)` without gaps.
    pub fn segments(&self, bin: &Bin) -> Option<&[SkylineSegment]> {
        self.states.get(bin.id()).map(|s| s.segments.as_slice())
    }
}

/// Resting height for an item of `w` x `h` placed at segment `index`, or
/// None when it would cross the right edge or the ceiling. The item may span
/// several segments; it rests on the highest of them.
fn fit_above(state: &SkylineState, bin: &Bin, index: usize, w: u32, h: u32) -> Option<u32> {
    let segments = &state.segments;
    let x = segments[index].x;
    if x + w > bin.width {
        return None;
    }
    let mut y = segments[index].y;
    let mut width_left = w;
    let mut i = index;
    loop {
        y = y.max(segments[i].y);
        if y + h > bin.height {
            return None;
        }
        if segments[i].width >= width_left {
            return Some(y);
        }
        width_left -= segments[i].width;
        i += 1;
        if i == segments.len() {
            return None;
        }
    }
}

/// Area trapped between the contour and the bottom edge of an item of width
/// `w` resting at height `y` above segment `index`.
fn wasted_area(state: &SkylineState, index: usize, w: u32, y: u32) -> u64 {
    let segments = &state.segments;
    let left = segments[index].x;
    let right = left + w;
    let mut area = 0u64;
    for seg in &segments[index..] {
        if seg.x >= right || seg.right() <= left {
            break;
        }
        let span = seg.right().min(right) - seg.x.max(left);
        area += span as u64 * (y - seg.y) as u64;
    }
    area
}

/// Normalised score in `[EPSILON, 1]`, higher is better. Area heuristics
/// measure trapped waste against the bin area; width/height heuristics
/// measure the gap between the segment and the effective item dimension.
fn score_candidate(
    heuristic: Heuristic,
    state: &SkylineState,
    bin: &Bin,
    index: usize,
    w: u32,
    h: u32,
    y: u32,
) -> f64 {
    let seg = &state.segments[index];
    let raw = match heuristic {
        Heuristic::NextFit | Heuristic::FirstFit => PERFECT,
        Heuristic::BestAreaFit => {
            1.0 - wasted_area(state, index, w, y) as f64 / (bin.area() as f64 + EPSILON)
        }
        Heuristic::WorstAreaFit => {
            wasted_area(state, index, w, y) as f64 / (bin.area() as f64 + EPSILON)
        }
        Heuristic::BestWidthFit => {
            1.0 - (seg.width as f64 - w as f64).abs() / (bin.width as f64 + EPSILON)
        }
        Heuristic::WorstWidthFit => {
            (seg.width as f64 - w as f64).abs() / (bin.width as f64 + EPSILON)
        }
        Heuristic::BestHeightFit => {
            1.0 - (seg.y as f64 - h as f64).abs() / (bin.height as f64 + EPSILON)
        }
        Heuristic::WorstHeightFit => {
            (seg.y as f64 - h as f64).abs() / (bin.height as f64 + EPSILON)
        }
    };
    raw.clamp(EPSILON, PERFECT)
}

/// Best candidate across all segments. Lower indices win ties; a perfect
/// score stops the scan. Rotation follows the usual policy: only tried for
/// segments where the unrotated orientation does not fit.
fn find_best_candidate(
    heuristic: Heuristic,
    allow_rotation: bool,
    state: &SkylineState,
    bin: &Bin,
    item: &Item,
) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    let mut best_score = 0.0;
    for index in 0..state.segments.len() {
        let candidate = if let Some(y) = fit_above(state, bin, index, item.width, item.height) {
            Some((y, item.width, item.height, false))
        } else if allow_rotation {
            fit_above(state, bin, index, item.height, item.width)
                .map(|y| (y, item.height, item.width, true))
        } else {
            None
        };
        let Some((y, w, h, rotated)) = candidate else {
            continue;
        };
        let score = score_candidate(heuristic, state, bin, index, w, h, y);
        if score > best_score {
            best = Some(Candidate {
                index,
                y,
                width: w,
                height: h,
                rotated,
                score,
            });
            best_score = score;
        }
        if best_score >= PERFECT {
            break;
        }
    }
    best
}

/// Parts of `seg` outside the span `[left, right)`.
fn clip_segment(seg: SkylineSegment, left: u32, right: u32, out: &mut Vec<SkylineSegment>) {
    if seg.x >= right || seg.right() <= left {
        out.push(seg);
        return;
    }
    if seg.x < left {
        out.push(SkylineSegment {
            x: seg.x,
            y: seg.y,
            width: left - seg.x,
        });
    }
    if seg.right() > right {
        out.push(SkylineSegment {
            x: right,
            y: seg.y,
            width: seg.right() - right,
        });
    }
}

/// Lift the contour over a placed item: clip everything under its span,
/// insert the replacement segment at its top edge (clamped to the ceiling so
/// coverage of `[0, bin_width)` never breaks), sort and merge.
fn raise_contour(state: &mut SkylineState, bin: &Bin, x: u32, y: u32, w: u32, h: u32) {
    let mut segments = Vec::with_capacity(state.segments.len() + 1);
    for seg in state.segments.drain(..) {
        clip_segment(seg, x, x + w, &mut segments);
    }
    segments.push(SkylineSegment {
        x,
        y: (y + h).min(bin.height),
        width: w,
    });
    segments.sort_by_key(|seg| seg.x);

    let mut merged: Vec<SkylineSegment> = Vec::with_capacity(segments.len());
    for seg in segments {
        if let Some(last) = merged.last_mut() {
            if last.y == seg.y && last.right() == seg.x {
                last.width += seg.width;
                continue;
            }
        }
        merged.push(seg);
    }
    state.segments = merged;
}

impl Strategy for SkylineStrategy {
    fn evaluate_bin(&self, bin: &Bin, item: &Item) -> f64 {
        if !fits_bin(bin, item, self.allow_rotation) {
            return 0.0;
        }
        let initial;
        let state = match self.states.get(bin.id()) {
            Some(state) => state,
            None => {
                initial = SkylineState::initial(bin);
                &initial
            }
        };
        find_best_candidate(self.heuristic, self.allow_rotation, state, bin, item)
            .map_or(0.0, |c| c.score)
    }

    fn pack_item(&mut self, bin: &mut Bin, mut item: Item) -> Result<(), Item> {
        let state = self
            .states
            .entry(bin.id().clone())
            .or_insert_with(|| SkylineState::initial(bin));

        let Some(candidate) = find_best_candidate(self.heuristic, self.allow_rotation, state, bin, &item)
        else {
            return Err(item);
        };

        if candidate.rotated {
            item.rotate();
        }
        let x = state.segments[candidate.index].x;
        item.x = x as i32;
        item.y = candidate.y as i32;

        raise_contour(state, bin, x, candidate.y, candidate.width, candidate.height);
        bin.items.push(item);
        Ok(())
    }
}
