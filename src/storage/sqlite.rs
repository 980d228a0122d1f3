//! SQLite storage backend
//!
//! File-backed and incremental: every batch is committed as it arrives, so
//! the store survives process restarts. One table per page type.

use crate::records::{
    AuctionRecord, ContractRecord, OrgRole, OrganizationRecord, PageRecord, PageType,
};
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{StorageAdapter, StorageError, StorageResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OpenFlags};
use std::path::Path;

/// SQLite storage adapter
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens or creates a database at the given path
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Opens an existing database without creating or modifying it
    ///
    /// Fails when the file does not exist instead of fabricating an
    /// empty database.
    pub fn open_read_only(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Counts rows of a page type
    pub fn count(&self, page_type: PageType) -> StorageResult<u64> {
        let query = format!("SELECT COUNT(*) FROM {}", page_type.table_name());
        let count: i64 = self.conn.query_row(&query, [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Loads all rows of a page type back as records, in insertion order
    pub fn load(&self, page_type: PageType) -> StorageResult<Vec<PageRecord>> {
        match page_type {
            PageType::Auction => self.load_auctions(),
            PageType::Contract => self.load_contracts(),
            PageType::Organization => self.load_organizations(),
        }
    }

    fn load_auctions(&self) -> StorageResult<Vec<PageRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT reg_number, title, status, customer, published, updated, initial_price
             FROM auctions ORDER BY id",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, Option<String>>(5)?,
                    row.get::<_, Option<f64>>(6)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut records = Vec::with_capacity(rows.len());
        for (reg_number, title, status, customer, published, updated, initial_price) in rows {
            records.push(PageRecord::Auction(AuctionRecord {
                reg_number,
                title,
                status,
                customer,
                published: parse_stored_date(&published)?,
                updated: updated.as_deref().map(parse_stored_date).transpose()?,
                initial_price,
            }));
        }
        Ok(records)
    }

    fn load_contracts(&self) -> StorageResult<Vec<PageRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT reg_number, status, customer, supplier, signed, price
             FROM contracts ORDER BY id",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, f64>(5)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut records = Vec::with_capacity(rows.len());
        for (reg_number, status, customer, supplier, signed, price) in rows {
            records.push(PageRecord::Contract(ContractRecord {
                reg_number,
                status,
                customer,
                supplier,
                signed: parse_stored_date(&signed)?,
                price,
            }));
        }
        Ok(records)
    }

    fn load_organizations(&self) -> StorageResult<Vec<PageRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT name, registration_id, role FROM organizations ORDER BY id",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut records = Vec::with_capacity(rows.len());
        for (name, registration_id, role) in rows {
            let role = OrgRole::from_db_string(&role)
                .ok_or_else(|| StorageError::Backend(format!("unknown role `{role}`")))?;
            records.push(PageRecord::Organization(OrganizationRecord {
                name,
                registration_id,
                role,
            }));
        }
        Ok(records)
    }
}

impl StorageAdapter for SqliteStorage {
    fn write(&mut self, records: &[PageRecord]) -> StorageResult<()> {
        let tx = self.conn.transaction()?;

        for record in records {
            match record {
                PageRecord::Auction(a) => {
                    tx.execute(
                        "INSERT INTO auctions
                         (reg_number, title, status, customer, published, updated, initial_price)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                        params![
                            a.reg_number,
                            a.title,
                            a.status,
                            a.customer,
                            a.published.to_string(),
                            a.updated.map(|d| d.to_string()),
                            a.initial_price,
                        ],
                    )?;
                }
                PageRecord::Contract(c) => {
                    tx.execute(
                        "INSERT INTO contracts
                         (reg_number, status, customer, supplier, signed, price)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                        params![
                            c.reg_number,
                            c.status,
                            c.customer,
                            c.supplier,
                            c.signed.to_string(),
                            c.price,
                        ],
                    )?;
                }
                PageRecord::Organization(o) => {
                    tx.execute(
                        "INSERT INTO organizations (name, registration_id, role)
                         VALUES (?1, ?2, ?3)",
                        params![o.name, o.registration_id, o.role.to_db_string()],
                    )?;
                }
            }
        }

        tx.commit()?;
        Ok(())
    }
}

/// Parses a date stored in ISO form (`%Y-%m-%d`)
fn parse_stored_date(raw: &str) -> StorageResult<NaiveDate> {
    raw.parse::<NaiveDate>()
        .map_err(|_| StorageError::Backend(format!("invalid stored date `{raw}`")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_auction() -> PageRecord {
        PageRecord::Auction(AuctionRecord {
            reg_number: "0173200001420000123".to_string(),
            title: "Поставка протезов клапанов сердца".to_string(),
            status: "Подача заявок".to_string(),
            customer: "ГБУЗ Городская больница № 1".to_string(),
            published: date(2020, 3, 15),
            updated: Some(date(2020, 3, 18)),
            initial_price: Some(1_234_567.89),
        })
    }

    fn sample_organization() -> PageRecord {
        PageRecord::Organization(OrganizationRecord {
            name: "ГБУЗ Городская больница № 1".to_string(),
            registration_id: "01732000014".to_string(),
            role: OrgRole::Buyer,
        })
    }

    #[test]
    fn test_write_and_load_roundtrip() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let records = vec![sample_auction(), sample_auction()];

        storage.write(&records).unwrap();

        assert_eq!(storage.count(PageType::Auction).unwrap(), 2);
        let loaded = storage.load(PageType::Auction).unwrap();
        assert_eq!(loaded, records);
    }

    #[test]
    fn test_mixed_batch_goes_to_per_type_tables() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();

        storage
            .write(&[sample_auction(), sample_organization()])
            .unwrap();

        assert_eq!(storage.count(PageType::Auction).unwrap(), 1);
        assert_eq!(storage.count(PageType::Organization).unwrap(), 1);
        assert_eq!(storage.count(PageType::Contract).unwrap(), 0);
    }

    #[test]
    fn test_optional_fields_survive_roundtrip() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        let record = PageRecord::Auction(AuctionRecord {
            reg_number: "1".to_string(),
            title: "t".to_string(),
            status: "s".to_string(),
            customer: "c".to_string(),
            published: date(2020, 1, 1),
            updated: None,
            initial_price: None,
        });

        storage.write(std::slice::from_ref(&record)).unwrap();

        let loaded = storage.load(PageType::Auction).unwrap();
        assert_eq!(loaded, vec![record]);
    }

    #[test]
    fn test_open_read_only_rejects_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = SqliteStorage::open_read_only(&dir.path().join("no-such.db"));
        assert!(result.is_err());
    }

    #[test]
    fn test_open_read_only_counts_existing_rows() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("records.db");
        {
            let mut storage = SqliteStorage::new(&db_path).unwrap();
            storage.write(&[sample_auction()]).unwrap();
        }

        let storage = SqliteStorage::open_read_only(&db_path).unwrap();
        assert_eq!(storage.count(PageType::Auction).unwrap(), 1);
    }

    #[test]
    fn test_writes_append() {
        let mut storage = SqliteStorage::new_in_memory().unwrap();
        storage.write(&[sample_auction()]).unwrap();
        storage.write(&[sample_auction()]).unwrap();
        assert_eq!(storage.count(PageType::Auction).unwrap(), 2);
    }
}
