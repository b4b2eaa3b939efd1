use tracing::{debug, instrument};

use crate::config::PackConfig;
use crate::error::{PackError, Result};
use crate::model::{Bin, Item};
use crate::score::PERFECT;
use crate::strategy::{create_strategy, Strategy};

/// Drives end-to-end packing: sort the input, then place each item into the
/// best-scoring existing bin, opening a new bin on overflow. Bins are
/// scanned in creation order and ties break on the first bin reaching the
/// current maximum, so the whole pipeline is deterministic for a given
/// configuration and input order.
pub struct BinManager {
    config: PackConfig,
    strategy: Box<dyn Strategy>,
    bins: Vec<Bin>,
}

impl BinManager {
    /// Configuration errors are reported here, before any packing starts;
    /// unknown enum names are already caught by `FromStr` while building a
    /// `PackConfig`.
    pub fn new(config: PackConfig) -> Result<Self> {
        config.validate()?;
        let strategy = create_strategy(config.algorithm, config.heuristic, config.allow_rotation);
        Ok(Self {
            config,
            strategy,
            bins: Vec::new(),
        })
    }

    pub fn config(&self) -> &PackConfig {
        &self.config
    }

    pub fn bins(&self) -> &[Bin] {
        &self.bins
    }

    pub fn into_bins(self) -> Vec<Bin> {
        self.bins
    }

    /// Index of the best existing bin for `item`, or None when no bin admits
    /// it. The first bin with a perfect score wins outright.
    fn find_best_bin(&self, item: &Item) -> Option<usize> {
        let mut best: Option<usize> = None;
        let mut best_score = 0.0;
        for (idx, bin) in self.bins.iter().enumerate() {
            let score = self.strategy.evaluate_bin(bin, item);
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

    /// Pack every item, in sorted order, returning the bins. An item that
    /// does not fit a fresh bin even rotated aborts with
    /// [`PackError::ItemTooLarge`]; nothing is dropped silently.
    #[instrument(skip_all, fields(items = items.len()))]
    pub fn execute(&mut self, mut items: Vec<Item>) -> Result<&[Bin]> {
        self.config.sort.apply(&mut items);

        for item in items {
            let item = match self.find_best_bin(&item) {
                Some(idx) => match self.strategy.pack_item(&mut self.bins[idx], item) {
                    Ok(()) => continue,
                    // A positive bin score must be realisable; reaching this
                    // arm means the strategy's evaluate and pack disagree.
                    Err(item) => {
                        debug_assert!(false, "evaluate_bin accepted an unpackable item");
                        item
                    }
                },
                None => item,
            };

            let mut bin = Bin::new(self.config.bin_width, self.config.bin_height);
            debug!(bin = %bin.id(), total = self.bins.len() + 1, "opening new bin");
            match self.strategy.pack_item(&mut bin, item) {
                Ok(()) => self.bins.push(bin),
                Err(item) => {
                    return Err(PackError::ItemTooLarge {
                        id: item.id,
                        width: item.width,
                        height: item.height,
                        bin_width: self.config.bin_width,
                        bin_height: self.config.bin_height,
                    });
                }
            }
        }
        Ok(&self.bins)
    }
}
