//! Organization listing parser

use crate::parse::fields;
use crate::parse::listing;
use crate::parse::{PageParser, ParseError};
use crate::records::{OrgRole, OrganizationRecord, PageRecord, PageType};
use scraper::{ElementRef, Html};

/// Parser for the organization registry search listing
pub struct OrganizationParser;

impl PageParser for OrganizationParser {
    fn page_type(&self) -> PageType {
        PageType::Organization
    }

    fn parse(&self, html: &str) -> Result<Vec<PageRecord>, ParseError> {
        let document = Html::parse_document(html);
        let mut records = Vec::new();

        for block in listing::entry_blocks(&document)? {
            match entry(block) {
                Ok(record) => records.push(PageRecord::Organization(record)),
                Err(err) => tracing::warn!("skipping organization entry: {err}"),
            }
        }

        Ok(records)
    }
}

fn entry(block: ElementRef<'_>) -> Result<OrganizationRecord, ParseError> {
    let name = listing::text_in(block, ".registry-entry__header-mid__number a")?.ok_or(
        ParseError::MissingField {
            field: "name",
            context: "organization",
        },
    )?;

    let registration_id = listing::body_value(block, "ИКУ")?
        .map(|s| fields::digits(&s))
        .filter(|s| !s.is_empty())
        .ok_or(ParseError::MissingField {
            field: "registration_id",
            context: "organization",
        })?;

    let role_label = listing::body_value(block, "Полномочия")?.ok_or(
        ParseError::MissingField {
            field: "role",
            context: "organization",
        },
    )?;
    let role = OrgRole::from_label(&role_label).ok_or(ParseError::UnknownRole(role_label))?;

    Ok(OrganizationRecord {
        name,
        registration_id,
        role,
    })
}
