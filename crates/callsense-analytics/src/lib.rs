//! Aggregation and reporting for callsense sessions.
//!
//! Computes per-emotion percentages, eye-contact share, and a duration proxy
//! from a participant's sample sequence, and renders the post-call report.

pub mod aggregations;
pub mod reports;

pub use aggregations::CallReport;
pub use reports::{escape_html, ReportGenerator};
