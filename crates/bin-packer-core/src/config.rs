use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PackError;
use crate::model::Item;

/// Placement strategy families.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Horizontal shelves whose height is fixed by their first item.
    Shelf,
    /// Top-contour segments; good baseline quality.
    Skyline,
    /// Overlapping maximal free rectangles; best offline quality.
    MaxRects,
    /// Disjoint free rectangles maintained by axis-aligned splits.
    Guillotine,
}

impl FromStr for Algorithm {
    type Err = PackError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "shelf" => Ok(Self::Shelf),
            "skyline" => Ok(Self::Skyline),
            "maxrects" => Ok(Self::MaxRects),
            "guillotine" => Ok(Self::Guillotine),
            _ => Err(PackError::UnknownAlgorithm(s.to_string())),
        }
    }
}

/// Placement heuristics shared by all strategy families.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Heuristic {
    NextFit,
    FirstFit,
    BestAreaFit,
    WorstAreaFit,
    BestWidthFit,
    WorstWidthFit,
    BestHeightFit,
    WorstHeightFit,
}

impl FromStr for Heuristic {
    type Err = PackError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nf" | "next_fit" => Ok(Self::NextFit),
            "ff" | "first_fit" => Ok(Self::FirstFit),
            "baf" | "best_area_fit" => Ok(Self::BestAreaFit),
            "waf" | "worst_area_fit" => Ok(Self::WorstAreaFit),
            "bwf" | "best_width_fit" => Ok(Self::BestWidthFit),
            "wwf" | "worst_width_fit" => Ok(Self::WorstWidthFit),
            "bhf" | "best_height_fit" => Ok(Self::BestHeightFit),
            "whf" | "worst_height_fit" => Ok(Self::WorstHeightFit),
            _ => Err(PackError::UnknownHeuristic(s.to_string())),
        }
    }
}

/// Input ordering applied before packing. The sort is stable; `None`
/// preserves the caller's order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    None,
    AreaAsc,
    AreaDesc,
    WidthAsc,
    WidthDesc,
    HeightAsc,
    HeightDesc,
    PerimeterAsc,
    PerimeterDesc,
    ShorterSideAsc,
    ShorterSideDesc,
    LongerSideAsc,
    LongerSideDesc,
    SideDiffAsc,
    SideDiffDesc,
}

impl SortKey {
    /// Stable in-place reorder of `items` by this key.
    pub fn apply(&self, items: &mut [Item]) {
        if matches!(self, SortKey::None) {
            return;
        }
        items.sort_by_key(|item| self.rank(item));
    }

    fn rank(&self, item: &Item) -> i64 {
        let w = item.width as i64;
        let h = item.height as i64;
        match self {
            SortKey::None => 0,
            SortKey::AreaAsc => w * h,
            SortKey::AreaDesc => -(w * h),
            SortKey::WidthAsc => w,
            SortKey::WidthDesc => -w,
            SortKey::HeightAsc => h,
            SortKey::HeightDesc => -h,
            SortKey::PerimeterAsc => 2 * (w + h),
            SortKey::PerimeterDesc => -2 * (w + h),
            SortKey::ShorterSideAsc => w.min(h),
            SortKey::ShorterSideDesc => -w.min(h),
            SortKey::LongerSideAsc => w.max(h),
            SortKey::LongerSideDesc => -w.max(h),
            SortKey::SideDiffAsc => (w - h).abs(),
            SortKey::SideDiffDesc => -(w - h).abs(),
        }
    }
}

impl FromStr for SortKey {
    type Err = PackError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(Self::None),
            "area_asc" => Ok(Self::AreaAsc),
            "area_desc" => Ok(Self::AreaDesc),
            "width_asc" => Ok(Self::WidthAsc),
            "width_desc" => Ok(Self::WidthDesc),
            "height_asc" => Ok(Self::HeightAsc),
            "height_desc" => Ok(Self::HeightDesc),
            "perimeter_asc" => Ok(Self::PerimeterAsc),
            "perimeter_desc" => Ok(Self::PerimeterDesc),
            "shorter_side_asc" => Ok(Self::ShorterSideAsc),
            "shorter_side_desc" => Ok(Self::ShorterSideDesc),
            "longer_side_asc" => Ok(Self::LongerSideAsc),
            "longer_side_desc" => Ok(Self::LongerSideDesc),
            "side_diff_asc" => Ok(Self::SideDiffAsc),
            "side_diff_desc" => Ok(Self::SideDiffDesc),
            _ => Err(PackError::UnknownSortKey(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackConfig {
    /// Bin width, fixed for every bin of the session.
    pub bin_width: u32,
    /// Bin height, fixed for every bin of the session.
    pub bin_height: u32,
    /// Allow 90 degree rotations where the unrotated orientation does not fit.
    pub allow_rotation: bool,
    #[serde(default = "default_algorithm")]
    pub algorithm: Algorithm,
    #[serde(default = "default_heuristic")]
    pub heuristic: Heuristic,
    #[serde(default = "default_sort")]
    pub sort: SortKey,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            bin_width: 1024,
            bin_height: 1024,
            allow_rotation: false,
            algorithm: default_algorithm(),
            heuristic: default_heuristic(),
            sort: default_sort(),
        }
    }
}

impl PackConfig {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> crate::error::Result<()> {
        if self.bin_width == 0 || self.bin_height == 0 {
            return Err(PackError::InvalidDimensions {
                width: self.bin_width,
                height: self.bin_height,
            });
        }
        Ok(())
    }

    /// Create a fluent builder for `PackConfig`.
    pub fn builder() -> PackConfigBuilder {
        PackConfigBuilder::new()
    }
}

fn default_algorithm() -> Algorithm {
    Algorithm::Skyline
}
fn default_heuristic() -> Heuristic {
    Heuristic::FirstFit
}
fn default_sort() -> SortKey {
    SortKey::None
}

/// Builder for `PackConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct PackConfigBuilder {
    cfg: PackConfig,
}

impl PackConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: PackConfig::default(),
        }
    }
    pub fn with_bin_dimensions(mut self, w: u32, h: u32) -> Self {
        self.cfg.bin_width = w;
        self.cfg.bin_height = h;
        self
    }
    pub fn allow_rotation(mut self, v: bool) -> Self {
        self.cfg.allow_rotation = v;
        self
    }
    pub fn algorithm(mut self, v: Algorithm) -> Self {
        self.cfg.algorithm = v;
        self
    }
    pub fn heuristic(mut self, v: Heuristic) -> Self {
        self.cfg.heuristic = v;
        self
    }
    pub fn sort(mut self, v: SortKey) -> Self {
        self.cfg.sort = v;
        self
    }
    pub fn build(self) -> PackConfig {
        self.cfg
    }
}
