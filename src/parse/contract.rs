//! Contract listing parser

use crate::parse::fields;
use crate::parse::listing;
use crate::parse::{PageParser, ParseError};
use crate::records::{ContractRecord, PageRecord, PageType};
use scraper::{ElementRef, Html};

/// Parser for the contract registry search listing
pub struct ContractParser;

impl PageParser for ContractParser {
    fn page_type(&self) -> PageType {
        PageType::Contract
    }

    fn parse(&self, html: &str) -> Result<Vec<PageRecord>, ParseError> {
        let document = Html::parse_document(html);
        let mut records = Vec::new();

        for block in listing::entry_blocks(&document)? {
            match entry(block) {
                Ok(record) => records.push(PageRecord::Contract(record)),
                Err(err) => tracing::warn!("skipping contract entry: {err}"),
            }
        }

        Ok(records)
    }
}

fn entry(block: ElementRef<'_>) -> Result<ContractRecord, ParseError> {
    let reg_number = listing::text_in(block, ".registry-entry__header-mid__number a")?
        .map(|s| fields::digits(&s))
        .filter(|s| !s.is_empty())
        .ok_or(ParseError::MissingField {
            field: "reg_number",
            context: "contract",
        })?;

    let status = listing::text_in(block, ".registry-entry__header-mid__title")?.ok_or(
        ParseError::MissingField {
            field: "status",
            context: "contract",
        },
    )?;

    let customer = listing::body_value(block, "Заказчик")?.ok_or(ParseError::MissingField {
        field: "customer",
        context: "contract",
    })?;

    let supplier = listing::body_value(block, "Поставщик")?.ok_or(ParseError::MissingField {
        field: "supplier",
        context: "contract",
    })?;

    let signed = listing::data_value(block, "Заключен")?
        .ok_or(ParseError::MissingField {
            field: "signed",
            context: "contract",
        })
        .and_then(|s| fields::parse_date(&s))?;

    let price = listing::text_in(block, ".price-block__value")?
        .ok_or(ParseError::MissingField {
            field: "price",
            context: "contract",
        })
        .and_then(|s| fields::parse_amount(&s))?;

    Ok(ContractRecord {
        reg_number,
        status,
        customer,
        supplier,
        signed,
        price,
    })
}
