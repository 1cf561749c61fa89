//! Dataset Module - Transaction Table
//!
//! Raw rows as imported from the CSV source. Loaded once, immutable afterwards.

pub mod loader;
pub mod record;


pub use loader::load_csv;
pub use record::{Dataset, RawRecord};
