//! Page parsers
//!
//! One parser per page type, all implementing the `PageParser` capability:
//! given the raw HTML of a search-result page, emit the records for every
//! registry entry on it. An entry missing a required field is logged and
//! skipped; it never fails the page, and a page with no entries is simply
//! empty.

mod auction;
mod contract;
pub mod fields;
pub mod listing;
mod organization;

pub use auction::AuctionParser;
pub use contract::ContractParser;
pub use listing::extract_total;
pub use organization::OrganizationParser;

use crate::records::{PageRecord, PageType};
use thiserror::Error;

/// Errors from extracting fields out of listing markup
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("missing field `{field}` in {context} entry")]
    MissingField {
        field: &'static str,
        context: &'static str,
    },

    #[error("invalid date `{0}`")]
    InvalidDate(String),

    #[error("invalid amount `{0}`")]
    InvalidAmount(String),

    #[error("invalid result total `{0}`")]
    InvalidTotal(String),

    #[error("unrecognized role label `{0}`")]
    UnknownRole(String),

    #[error("invalid selector: {0}")]
    Selector(String),
}

/// Capability implemented by every page parser
pub trait PageParser: Send + Sync {
    /// The page type this parser handles
    fn page_type(&self) -> PageType;

    /// Parses one search-result page into records
    fn parse(&self, html: &str) -> Result<Vec<PageRecord>, ParseError>;
}

/// Returns the parser for a page type
pub fn parser_for(page_type: PageType) -> Box<dyn PageParser> {
    match page_type {
        PageType::Auction => Box::new(AuctionParser),
        PageType::Contract => Box::new(ContractParser),
        PageType::Organization => Box::new(OrganizationParser),
    }
}
