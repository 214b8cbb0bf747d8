//! Location data pipeline for collection-bin records.
//!
//! Loads the raw CSV source, normalizes it into a clean, de-duplicated
//! table of pickup points, and answers filter queries against it.
//! Tables are cached per source path and invalidated when the file's
//! modification time changes.

mod cache;
mod error;
mod load;
mod model;
mod table;

pub use cache::{BinCacheConfig, CachedBinSource};
pub use error::DataError;
pub use load::{
    ADDRESS_COLUMN, LATITUDE_COLUMN, LONGITUDE_COLUMN, NAME_COLUMN, load_table,
};
pub use model::PickupPoint;
pub use table::{BinTable, DistrictFilter};
