//! Item sources: seeded random generation and CSV round-trip.

use std::fs;
use std::path::Path;

use anyhow::Context;
use bin_packer_core::Item;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Random item source. Item dimensions are drawn uniformly from the
/// configured ranges, capped at the bin dimensions so every generated item
/// is packable without rotation.
pub struct ItemGenerator {
    pub bin_width: u32,
    pub bin_height: u32,
    pub min_width: u32,
    pub max_width: u32,
    pub min_height: u32,
    pub max_height: u32,
}

impl ItemGenerator {
    pub fn generate(&self, count: usize, seed: u64) -> Vec<Item> {
        let mut rng = StdRng::seed_from_u64(seed);
        let min_w = self.min_width.max(1);
        let min_h = self.min_height.max(1);
        let max_w = self.max_width.min(self.bin_width).max(min_w);
        let max_h = self.max_height.min(self.bin_height).max(min_h);
        (0..count)
            .map(|i| {
                Item::new(
                    rng.gen_range(min_w..=max_w),
                    rng.gen_range(min_h..=max_h),
                    i.to_string(),
                )
            })
            .collect()
    }

    fn admits(&self, width: u32, height: u32) -> bool {
        width > 0 && width <= self.bin_width && height > 0 && height <= self.bin_height
    }

    /// Load `width,height` rows from a CSV file. Malformed rows and rows
    /// that cannot fit the bin are skipped silently; item ids are the source
    /// row indices.
    pub fn load_csv(&self, path: &Path) -> anyhow::Result<Vec<Item>> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("read items from {}", path.display()))?;
        let mut items = Vec::new();
        for (row, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut fields = line.split(',').map(str::trim);
            let parsed = match (fields.next(), fields.next()) {
                (Some(w), Some(h)) => w.parse::<u32>().ok().zip(h.parse::<u32>().ok()),
                _ => None,
            };
            match parsed {
                Some((width, height)) if self.admits(width, height) => {
                    items.push(Item::new(width, height, row.to_string()));
                }
                _ => debug!(row, line, "skipping row"),
            }
        }
        Ok(items)
    }

    /// Write items as `width,height` rows, applying the same fit filter as
    /// [`Self::load_csv`].
    pub fn save_csv(&self, path: &Path, items: &[Item]) -> anyhow::Result<()> {
        let mut out = String::new();
        for item in items {
            if self.admits(item.width, item.height) {
                out.push_str(&format!("{},{}\n", item.width, item.height));
            }
        }
        fs::write(path, out).with_context(|| format!("write items to {}", path.display()))
    }
}
