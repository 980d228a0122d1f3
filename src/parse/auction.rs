//! Auction notice listing parser

use crate::parse::listing;
use crate::parse::fields;
use crate::parse::{PageParser, ParseError};
use crate::records::{AuctionRecord, PageRecord, PageType};
use scraper::{ElementRef, Html};

/// Parser for the auction (order notice) search listing
pub struct AuctionParser;

impl PageParser for AuctionParser {
    fn page_type(&self) -> PageType {
        PageType::Auction
    }

    fn parse(&self, html: &str) -> Result<Vec<PageRecord>, ParseError> {
        let document = Html::parse_document(html);
        let mut records = Vec::new();

        for block in listing::entry_blocks(&document)? {
            match entry(block) {
                Ok(record) => records.push(PageRecord::Auction(record)),
                Err(err) => tracing::warn!("skipping auction entry: {err}"),
            }
        }

        Ok(records)
    }
}

fn entry(block: ElementRef<'_>) -> Result<AuctionRecord, ParseError> {
    let reg_number = listing::text_in(block, ".registry-entry__header-mid__number a")?
        .map(|s| fields::digits(&s))
        .filter(|s| !s.is_empty())
        .ok_or(ParseError::MissingField {
            field: "reg_number",
            context: "auction",
        })?;

    let status = listing::text_in(block, ".registry-entry__header-mid__title")?.ok_or(
        ParseError::MissingField {
            field: "status",
            context: "auction",
        },
    )?;

    let title = listing::body_value(block, "Объект")?.ok_or(ParseError::MissingField {
        field: "title",
        context: "auction",
    })?;

    let customer = listing::body_value(block, "Заказчик")?.ok_or(ParseError::MissingField {
        field: "customer",
        context: "auction",
    })?;

    let published = listing::data_value(block, "Размещено")?
        .ok_or(ParseError::MissingField {
            field: "published",
            context: "auction",
        })
        .and_then(|s| fields::parse_date(&s))?;

    let updated = match listing::data_value(block, "Обновлено")? {
        Some(raw) => Some(fields::parse_date(&raw)?),
        None => None,
    };

    let initial_price = match listing::text_in(block, ".price-block__value")? {
        Some(raw) => Some(fields::parse_amount(&raw)?),
        None => None,
    };

    Ok(AuctionRecord {
        reg_number,
        title,
        status,
        customer,
        published,
        updated,
        initial_price,
    })
}
