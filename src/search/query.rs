//! Search query construction
//!
//! A `SearchQuery` identifies one result page of one sub-range: the page
//! type selects the endpoint and its fixed parameters, the range fills the
//! publication date bounds, and the page number drives pagination.

use crate::records::PageType;
use crate::search::range::DateRange;
use url::Url;

impl PageType {
    /// Search endpoint path for this page type
    pub fn search_path(&self) -> &'static str {
        match self {
            PageType::Auction => "/epz/order/extendedsearch/results.html",
            PageType::Contract => "/epz/contract/search/results.html",
            PageType::Organization => "/epz/organization/extendedsearch/results.html",
        }
    }

    /// Fixed query parameters the portal expects on this endpoint
    pub fn fixed_params(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            PageType::Auction | PageType::Contract => {
                &[("fz44", "on"), ("sortBy", "UPDATE_DATE")]
            }
            PageType::Organization => &[("sortBy", "UPDATE_DATE")],
        }
    }
}

/// One result page of a search over a date sub-range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchQuery {
    pub page_type: PageType,
    pub range: DateRange,
    /// 1-based result page number
    pub page_number: u32,
}

impl SearchQuery {
    /// Builds the fully-formed query URL against the portal base URL
    pub fn url(&self, base: &Url, records_per_page: u32) -> Result<Url, url::ParseError> {
        let mut url = base.join(self.page_type.search_path())?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in self.page_type.fixed_params() {
                pairs.append_pair(key, value);
            }
            pairs.append_pair("publishDateFrom", &self.range.from_param());
            pairs.append_pair("publishDateTo", &self.range.to_param());
            pairs.append_pair("pageNumber", &self.page_number.to_string());
            pairs.append_pair("recordsPerPage", &format!("_{records_per_page}"));
        }
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn range() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2020, 3, 31).unwrap(),
        )
    }

    #[test]
    fn test_contract_query_url() {
        let base = Url::parse("https://zakupki.gov.ru").unwrap();
        let query = SearchQuery {
            page_type: PageType::Contract,
            range: range(),
            page_number: 3,
        };

        let url = query.url(&base, 50).unwrap();
        assert_eq!(url.path(), "/epz/contract/search/results.html");

        let qs = url.query().unwrap();
        assert!(qs.contains("fz44=on"));
        assert!(qs.contains("sortBy=UPDATE_DATE"));
        assert!(qs.contains("publishDateFrom=01.01.2020"));
        assert!(qs.contains("publishDateTo=31.03.2020"));
        assert!(qs.contains("pageNumber=3"));
        assert!(qs.contains("recordsPerPage=_50"));
    }

    #[test]
    fn test_organization_query_has_no_law_filter() {
        let base = Url::parse("https://zakupki.gov.ru").unwrap();
        let query = SearchQuery {
            page_type: PageType::Organization,
            range: range(),
            page_number: 1,
        };

        let url = query.url(&base, 50).unwrap();
        assert_eq!(url.path(), "/epz/organization/extendedsearch/results.html");
        assert!(!url.query().unwrap().contains("fz44"));
    }

    #[test]
    fn test_url_against_non_root_base() {
        // Absolute endpoint paths must work even if the base has a path
        let base = Url::parse("http://127.0.0.1:8080/mock/").unwrap();
        let query = SearchQuery {
            page_type: PageType::Auction,
            range: range(),
            page_number: 1,
        };

        let url = query.url(&base, 10).unwrap();
        assert_eq!(url.path(), "/epz/order/extendedsearch/results.html");
    }
}
