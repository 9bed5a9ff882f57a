//! Report writers
//!
//! - Table: daily records as CSV with Danish headers
//! - Hourly: raw hourly series as JSON
//! - Summary: counts, averages and the Danish interpretation
//! - Detail: hour-by-hour comparison for one record
//! - Html: the static interactive page

pub mod detail;
pub mod hourly;
pub mod html;
pub mod summary;
pub mod table;

pub use detail::{DayDetail, HourComparison, HourFlag};
pub use hourly::{HourlyMap, read_hourly, write_hourly};
pub use html::render_html;
pub use summary::{Summary, Verdict};
pub use table::{read_table, write_table};
