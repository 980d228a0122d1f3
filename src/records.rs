//! Record types emitted by the page parsers
//!
//! Each page type has a fixed field set; a parsed result page yields a
//! sequence of records which are handed to storage and then dropped.
//! There are no cross-record relationships.

use chrono::NaiveDate;
use serde::Deserialize;

/// The kind of search-result page being scraped
///
/// Determines which endpoint is queried and which parser handles the
/// response. Adding a page type means adding a record variant and a parser;
/// the driving loop is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    Auction,
    Contract,
    Organization,
}

impl PageType {
    /// Stable lowercase name, used in logs and CSV file names
    pub fn as_str(&self) -> &'static str {
        match self {
            PageType::Auction => "auction",
            PageType::Contract => "contract",
            PageType::Organization => "organization",
        }
    }

    /// Database table holding records of this type
    pub fn table_name(&self) -> &'static str {
        match self {
            PageType::Auction => "auctions",
            PageType::Contract => "contracts",
            PageType::Organization => "organizations",
        }
    }
}

impl std::fmt::Display for PageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an organization acts as a purchaser or a supplier on the portal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrgRole {
    Buyer,
    Seller,
}

impl OrgRole {
    /// Maps the portal's role label to a role
    ///
    /// The portal renders roles in Russian ("Заказчик" for purchasers,
    /// "Поставщик" / "Участник закупки" for suppliers).
    pub fn from_label(label: &str) -> Option<OrgRole> {
        let label = label.to_lowercase();
        if label.contains("заказчик") {
            Some(OrgRole::Buyer)
        } else if label.contains("поставщик") || label.contains("участник") {
            Some(OrgRole::Seller)
        } else {
            None
        }
    }

    pub fn to_db_string(&self) -> &'static str {
        match self {
            OrgRole::Buyer => "buyer",
            OrgRole::Seller => "seller",
        }
    }

    pub fn from_db_string(s: &str) -> Option<OrgRole> {
        match s {
            "buyer" => Some(OrgRole::Buyer),
            "seller" => Some(OrgRole::Seller),
            _ => None,
        }
    }
}

/// A procurement notice from the auction search listing
#[derive(Debug, Clone, PartialEq)]
pub struct AuctionRecord {
    /// Registry number of the notice
    pub reg_number: String,
    /// Purchase object description
    pub title: String,
    /// Lifecycle status as shown on the listing
    pub status: String,
    /// Purchasing organization name
    pub customer: String,
    /// Date the notice was published
    pub published: NaiveDate,
    /// Date of the last update, when shown
    pub updated: Option<NaiveDate>,
    /// Initial (maximum) contract price, when shown
    pub initial_price: Option<f64>,
}

/// A signed contract from the contract search listing
#[derive(Debug, Clone, PartialEq)]
pub struct ContractRecord {
    pub reg_number: String,
    pub status: String,
    pub customer: String,
    pub supplier: String,
    /// Date the contract was signed
    pub signed: NaiveDate,
    /// Contract price
    pub price: f64,
}

/// An organization from the organization search listing
#[derive(Debug, Clone, PartialEq)]
pub struct OrganizationRecord {
    pub name: String,
    /// Registration identifier assigned by the portal
    pub registration_id: String,
    pub role: OrgRole,
}

/// A parsed record, polymorphic over page type
#[derive(Debug, Clone, PartialEq)]
pub enum PageRecord {
    Auction(AuctionRecord),
    Contract(ContractRecord),
    Organization(OrganizationRecord),
}

impl PageRecord {
    pub fn page_type(&self) -> PageType {
        match self {
            PageRecord::Auction(_) => PageType::Auction,
            PageRecord::Contract(_) => PageType::Contract,
            PageRecord::Organization(_) => PageType::Organization,
        }
    }
}
