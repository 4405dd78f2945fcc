//! `addrstat-core` — address records and the statistics computed over them.
//!
//! Pure crate: receives already-parsed records, returns aggregated results.
//! No IO dependencies.

pub mod address;
pub mod stats;

pub use address::Address;
pub use stats::{find_duplicates, floor_statistics, FloorHistogram, Report, ReportSummary};
