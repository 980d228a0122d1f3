//! Search URL building
//!
//! This module turns a date range and page type into the ordered set of
//! query URLs to fetch:
//! - date ranges with midpoint splitting
//! - query URL construction per page type
//! - range subdivision against the site's result-page cap

mod builder;
mod query;
mod range;

pub use builder::{plan_slices, result_pages, ResultEstimator, SearchSlice};
pub use query::SearchQuery;
pub use range::DateRange;
