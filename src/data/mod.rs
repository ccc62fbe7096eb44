//! In-memory single-cell data container and split utilities

mod celldata;
mod split;


pub use celldata::CellData;
pub use split::{assign_splits, KFold, Split, SplitFractions};
