//! Search plan construction
//!
//! The portal caps how many result pages a single query may serve. The
//! builder binary-subdivides the requested date range until every
//! sub-range's estimated page count fits the cap, producing an ordered
//! plan whose sub-ranges partition the original range with no gaps or
//! overlaps. Sub-ranges with zero results are skipped.

use crate::records::PageType;
use crate::search::range::DateRange;
use async_trait::async_trait;

/// Capability for estimating how many results a search over a range returns
///
/// The live implementation probes the first result page and reads the total
/// counter; tests substitute deterministic fakes.
#[async_trait]
pub trait ResultEstimator: Send + Sync {
    async fn result_count(&self, page_type: PageType, range: &DateRange) -> crate::Result<u64>;
}

/// One sub-range of the plan together with its result page count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSlice {
    pub range: DateRange,
    /// Number of result pages to paginate through for this sub-range
    pub result_pages: u32,
}

/// Converts a result count into a page count
pub fn result_pages(count: u64, records_per_page: u32) -> u32 {
    u32::try_from(count.div_ceil(u64::from(records_per_page))).unwrap_or(u32::MAX)
}

/// Builds the ordered search plan for a range
///
/// Each returned slice fits within `max_result_pages`, except a single-day
/// range that still exceeds the cap: it cannot be split further and is
/// emitted clamped to the cap (the portal truncates past its limit anyway).
///
/// A failed probe is logged and its sub-range dropped from the plan; only
/// storage failures halt a run, never fetch failures.
pub async fn plan_slices(
    page_type: PageType,
    range: DateRange,
    max_result_pages: u32,
    records_per_page: u32,
    estimator: &dyn ResultEstimator,
) -> Vec<SearchSlice> {
    let mut pending = vec![range];
    let mut slices = Vec::new();

    while let Some(current) = pending.pop() {
        let count = match estimator.result_count(page_type, &current).await {
            Ok(count) => count,
            Err(err) => {
                tracing::warn!("probe failed for {current}, dropping sub-range: {err}");
                continue;
            }
        };
        if count == 0 {
            tracing::debug!("no results in {current}, skipping");
            continue;
        }

        let pages = result_pages(count, records_per_page);
        if pages <= max_result_pages {
            slices.push(SearchSlice {
                range: current,
                result_pages: pages,
            });
        } else if let Some((left, right)) = current.split() {
            tracing::debug!("{current}: {pages} pages exceeds cap, splitting");
            // Right half first so the left half is processed next,
            // keeping the output in ascending date order.
            pending.push(right);
            pending.push(left);
        } else {
            tracing::warn!(
                "single day {current} has {pages} result pages, over the cap of {max_result_pages}"
            );
            slices.push(SearchSlice {
                range: current,
                result_pages: max_result_pages,
            });
        }
    }

    slices
}
