//! In-memory tabular storage backend
//!
//! All rows stay resident, grouped by page type, and are released at
//! process end. Suitable for short runs; optionally dumps its tables to
//! semicolon-separated CSV files when the run finishes.

use crate::records::{AuctionRecord, ContractRecord, OrganizationRecord, PageRecord, PageType};
use crate::storage::traits::{StorageAdapter, StorageResult};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// In-memory storage adapter
#[derive(Debug, Default)]
pub struct MemoryStorage {
    auctions: Vec<AuctionRecord>,
    contracts: Vec<ContractRecord>,
    organizations: Vec<OrganizationRecord>,
    csv_dir: Option<PathBuf>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that exports CSV files to `dir` on finish
    pub fn with_csv_export(dir: &Path) -> Self {
        Self {
            csv_dir: Some(dir.to_path_buf()),
            ..Self::default()
        }
    }

    pub fn auctions(&self) -> &[AuctionRecord] {
        &self.auctions
    }

    pub fn contracts(&self) -> &[ContractRecord] {
        &self.contracts
    }

    pub fn organizations(&self) -> &[OrganizationRecord] {
        &self.organizations
    }

    /// Number of rows held for a page type
    pub fn count(&self, page_type: PageType) -> usize {
        match page_type {
            PageType::Auction => self.auctions.len(),
            PageType::Contract => self.contracts.len(),
            PageType::Organization => self.organizations.len(),
        }
    }

    /// Writes one semicolon-separated CSV file per non-empty table
    pub fn export_csv(&self, dir: &Path) -> StorageResult<()> {
        if !self.auctions.is_empty() {
            let mut out = String::new();
            out.push_str("reg_number;title;status;customer;published;updated;initial_price\n");
            for a in &self.auctions {
                out.push_str(&format!(
                    "{};{};{};{};{};{};{}\n",
                    field(&a.reg_number),
                    field(&a.title),
                    field(&a.status),
                    field(&a.customer),
                    a.published,
                    a.updated.map(|d| d.to_string()).unwrap_or_default(),
                    a.initial_price.map(|p| p.to_string()).unwrap_or_default(),
                ));
            }
            write_file(&dir.join("auctions.csv"), &out)?;
        }

        if !self.contracts.is_empty() {
            let mut out = String::new();
            out.push_str("reg_number;status;customer;supplier;signed;price\n");
            for c in &self.contracts {
                out.push_str(&format!(
                    "{};{};{};{};{};{}\n",
                    field(&c.reg_number),
                    field(&c.status),
                    field(&c.customer),
                    field(&c.supplier),
                    c.signed,
                    c.price,
                ));
            }
            write_file(&dir.join("contracts.csv"), &out)?;
        }

        if !self.organizations.is_empty() {
            let mut out = String::new();
            out.push_str("name;registration_id;role\n");
            for o in &self.organizations {
                out.push_str(&format!(
                    "{};{};{}\n",
                    field(&o.name),
                    field(&o.registration_id),
                    o.role.to_db_string(),
                ));
            }
            write_file(&dir.join("organizations.csv"), &out)?;
        }

        Ok(())
    }
}

/// Sanitizes a text field for the semicolon-separated format
fn field(value: &str) -> String {
    value.replace(';', ",")
}

fn write_file(path: &Path, content: &str) -> StorageResult<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

impl StorageAdapter for MemoryStorage {
    fn write(&mut self, records: &[PageRecord]) -> StorageResult<()> {
        for record in records {
            match record {
                PageRecord::Auction(a) => self.auctions.push(a.clone()),
                PageRecord::Contract(c) => self.contracts.push(c.clone()),
                PageRecord::Organization(o) => self.organizations.push(o.clone()),
            }
        }
        Ok(())
    }

    fn finish(&mut self) -> StorageResult<()> {
        if let Some(dir) = self.csv_dir.clone() {
            self.export_csv(&dir)?;
        }
        Ok(())
    }
}
