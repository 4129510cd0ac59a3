//! Spending reports over a date range.

mod aggregation;
mod endpoint;

pub use aggregation::{Bucket, Buckets, GroupBy, SummaryResult, summarize};
pub use endpoint::{SummaryEndpointState, SummaryQuery, get_summary_endpoint};
