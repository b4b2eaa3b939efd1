//! Layout reporting for downstream tooling (CLI, renderers).

use serde::{Deserialize, Serialize};

use crate::model::Bin;

/// Aggregate statistics over a packing result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PackStats {
    pub bins: usize,
    pub items: usize,
    pub used_area: u64,
    pub total_area: u64,
    /// Used area over total bin area, in `[0, 1]`. Zero when no bins exist.
    pub occupancy: f64,
}

pub fn stats(bins: &[Bin]) -> PackStats {
    let used_area: u64 = bins.iter().map(Bin::used_area).sum();
    let total_area: u64 = bins.iter().map(Bin::area).sum();
    PackStats {
        bins: bins.len(),
        items: bins.iter().map(|b| b.items.len()).sum(),
        used_area,
        total_area,
        occupancy: if total_area == 0 {
            0.0
        } else {
            used_area as f64 / total_area as f64
        },
    }
}

/// Serialisable snapshot of one placed item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemReport {
    pub id: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub rotated: bool,
}

/// Serialisable snapshot of one bin and its placements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BinReport {
    pub id: String,
    pub width: u32,
    pub height: u32,
    pub items: Vec<ItemReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutReport {
    pub bins: Vec<BinReport>,
    pub stats: PackStats,
}

pub fn layout_report(bins: &[Bin]) -> LayoutReport {
    LayoutReport {
        bins: bins
            .iter()
            .map(|bin| BinReport {
                id: bin.id().to_string(),
                width: bin.width,
                height: bin.height,
                items: bin
                    .items
                    .iter()
                    .map(|item| ItemReport {
                        id: item.id.clone(),
                        x: item.x,
                        y: item.y,
                        width: item.width,
                        height: item.height,
                        rotated: item.rotated,
                    })
                    .collect(),
            })
            .collect(),
        stats: stats(bins),
    }
}

/// Pretty-printed JSON form of [`layout_report`].
pub fn layout_json(bins: &[Bin]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&layout_report(bins))
}
