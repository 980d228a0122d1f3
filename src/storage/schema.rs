//! Database schema definitions
//!
//! One table per page type; columns are that type's fields. Rows are only
//! ever appended.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS auctions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    reg_number TEXT NOT NULL,
    title TEXT NOT NULL,
    status TEXT NOT NULL,
    customer TEXT NOT NULL,
    published TEXT NOT NULL,
    updated TEXT,
    initial_price REAL
);

CREATE INDEX IF NOT EXISTS idx_auctions_reg_number ON auctions(reg_number);

CREATE TABLE IF NOT EXISTS contracts (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    reg_number TEXT NOT NULL,
    status TEXT NOT NULL,
    customer TEXT NOT NULL,
    supplier TEXT NOT NULL,
    signed TEXT NOT NULL,
    price REAL NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_contracts_reg_number ON contracts(reg_number);

CREATE TABLE IF NOT EXISTS organizations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    registration_id TEXT NOT NULL,
    role TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_organizations_registration_id
    ON organizations(registration_id);
"#;

/// Initializes the database schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)
}
