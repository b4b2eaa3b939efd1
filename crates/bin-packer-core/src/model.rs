use std::fmt;

use serde::{Deserialize, Serialize};

/// Sentinel coordinate for an item that has not been placed yet.
pub const UNPLACED: i32 = -1;

/// Axis-aligned rectangular item. `x,y` is the bottom-left corner once
/// placed; before placement both hold [`UNPLACED`]. Dimensions are strictly
/// positive. An item is mutated exactly once, when a strategy commits it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub width: u32,
    pub height: u32,
    pub x: i32,
    pub y: i32,
    pub rotated: bool,
    pub id: String,
}

impl Item {
    pub fn new(width: u32, height: u32, id: impl Into<String>) -> Self {
        debug_assert!(width > 0 && height > 0, "item dimensions must be positive");
        Self {
            width,
            height,
            x: UNPLACED,
            y: UNPLACED,
            rotated: false,
            id: id.into(),
        }
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Swap width and height and toggle the rotation flag. Applying it twice
    /// restores the original orientation.
    pub fn rotate(&mut self) {
        std::mem::swap(&mut self.width, &mut self.height);
        self.rotated = !self.rotated;
    }

    pub fn is_placed(&self) -> bool {
        self.x >= 0 && self.y >= 0
    }

    /// Occupied region once placed (post-rotation dimensions).
    pub fn footprint(&self) -> Option<FreeRect> {
        if self.is_placed() {
            Some(FreeRect::new(
                self.x as u32,
                self.y as u32,
                self.width,
                self.height,
            ))
        } else {
            None
        }
    }
}

/// Process-unique opaque bin identifier. Strategy engines key their per-bin
/// free-space state by it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BinId(String);

impl BinId {
    fn generate() -> Self {
        let token: u128 = rand::random();
        Self(format!("{token:032x}"))
    }
}

impl fmt::Display for BinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Container of fixed dimensions. Owns the items placed into it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bin {
    pub width: u32,
    pub height: u32,
    id: BinId,
    pub items: Vec<Item>,
}

impl Bin {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            id: BinId::generate(),
            items: Vec::new(),
        }
    }

    pub fn id(&self) -> &BinId {
        &self.id
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    pub fn used_area(&self) -> u64 {
        self.items.iter().map(Item::area).sum()
    }

    pub fn remaining_area(&self) -> u64 {
        self.area() - self.used_area()
    }
}

/// Axis-aligned rectangular region known to be empty. `x,y` is the
/// bottom-left corner; edges are exclusive on the far side.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FreeRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl FreeRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Exclusive right edge (`x + width`).
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive top edge (`y + height`).
    pub fn top(&self) -> u32 {
        self.y + self.height
    }

    /// Returns true if `other` lies fully inside `self`.
    pub fn contains(&self, other: &FreeRect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.top() <= self.top()
    }

    /// Returns true if the interiors of `self` and `other` overlap.
    pub fn intersects(&self, other: &FreeRect) -> bool {
        !(self.x >= other.right()
            || other.x >= self.right()
            || self.y >= other.top()
            || other.y >= self.top())
    }
}
