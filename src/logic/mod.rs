//! Logic Module - Dashboard Core
//!
//! - `dataset/` - CSV loading (raw rows)
//! - `normalize` - raw row → classifier record
//! - `classifier/` - prediction endpoint seam + HTTP client
//! - `dispatch/` - batched prediction runs
//! - `store`, `summary`, `view`, `state` - what the console renders

pub mod classifier;
pub mod dataset;
pub mod debounce;
pub mod dispatch;
pub mod normalize;
pub mod state;
pub mod store;
pub mod summary;
pub mod view;
