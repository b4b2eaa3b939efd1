//! Core library for 2D offline bin packing.
//!
//! - Strategies: Shelf, Skyline, MaxRects, Guillotine — four engines behind
//!   one [`strategy::Strategy`] contract, each keeping per-bin free-space
//!   state keyed by opaque bin id.
//! - Heuristics: next/first fit, best/worst x area/width/height, one shared
//!   scoring convention (`[0, 1]`, higher is better, 1 short-circuits).
//! - Orchestration: [`manager::BinManager`] sorts the input, picks the best
//!   existing bin per item and opens new bins on overflow.
//!
//! Quick example:
//! ```
//! use bin_packer_core::prelude::*;
//!
//! # fn main() -> bin_packer_core::Result<()> {
//! let cfg = PackConfig::builder()
//!     .with_bin_dimensions(100, 100)
//!     .algorithm(Algorithm::MaxRects)
//!     .heuristic(Heuristic::BestAreaFit)
//!     .sort(SortKey::AreaDesc)
//!     .build();
//! let mut manager = BinManager::new(cfg)?;
//! let items = vec![Item::new(40, 30, "a"), Item::new(25, 60, "b")];
//! let bins = manager.execute(items)?;
//! println!("bins: {}", bins.len());
//! # Ok(()) }
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod manager;
pub mod model;
pub mod score;
pub mod strategy;

pub use config::*;
pub use error::*;
pub use export::*;
pub use manager::*;
pub use model::*;

/// Convenience prelude for common types and functions.
/// Importing `bin_packer_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::config::{Algorithm, Heuristic, PackConfig, PackConfigBuilder, SortKey};
    pub use crate::error::{PackError, Result};
    pub use crate::export::{layout_json, layout_report, stats, LayoutReport, PackStats};
    pub use crate::manager::BinManager;
    pub use crate::model::{Bin, BinId, FreeRect, Item, UNPLACED};
    pub use crate::strategy::{
        create_strategy, GuillotineStrategy, MaxRectsStrategy, ShelfStrategy, SkylineStrategy,
        SplitAxis, Strategy,
    };
}
