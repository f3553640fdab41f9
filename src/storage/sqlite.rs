//! SQLite storage implementation

use std::path::Path;
use std::str::FromStr;
use rusqlite::{Connection, OpenFlags, OptionalExtension, Params, params};
use crate::{Result, Error};
use crate::models::{Claim, ClaimStatus, FoodListing, NewClaim, NewProvider, Provider, Receiver};
use super::schema;
use super::table::{Cell, Table};

/// The four base tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableName {
    Providers,
    Receivers,
    FoodListings,
    Claims,
}

impl TableName {
    /// Get the SQL table name
    pub fn as_str(&self) -> &'static str {
        match self {
            TableName::Providers => "Providers",
            TableName::Receivers => "Receivers",
            TableName::FoodListings => "Food_Listings",
            TableName::Claims => "Claims",
        }
    }

    pub fn all() -> &'static [TableName] {
        &[
            TableName::Providers,
            TableName::Receivers,
            TableName::FoodListings,
            TableName::Claims,
        ]
    }
}

impl FromStr for TableName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "providers" => Ok(TableName::Providers),
            "receivers" => Ok(TableName::Receivers),
            "food_listings" | "food-listings" | "listings" | "food" => Ok(TableName::FoodListings),
            "claims" => Ok(TableName::Claims),
            _ => Err(Error::UnknownTable(s.to_string())),
        }
    }
}

impl std::fmt::Display for TableName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// SQLite-backed storage for the donation tables.
///
/// Holds exactly one connection for its whole lifetime. Every write runs in
/// autocommit mode; there are no multi-statement transactions.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open an existing database file.
    ///
    /// A missing file is reported as `Error::DatabaseNotFound` instead of
    /// silently creating an empty database. SQLite reads the file header
    /// lazily, so the catalog is read once here to reject files that are not
    /// databases before any view runs.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::DatabaseNotFound(path.to_path_buf()));
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_URI | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        let objects: i64 = conn.query_row("SELECT COUNT(*) FROM sqlite_master", [], |row| row.get(0))?;
        tracing::debug!(objects, "Opened database {}", path.display());
        Ok(Self { conn })
    }

    /// Open a database file, creating it and the schema if needed
    pub fn create(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        tracing::debug!("Initialized database {}", path.display());
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<()> {
        for stmt in schema::all_schema_statements() {
            self.conn.execute(stmt, [])?;
        }
        Ok(())
    }

    // ========== Query Executor ==========

    /// Run a parameterized read and collect the full result set.
    ///
    /// Column names come from the statement metadata. A statement without
    /// result columns yields an empty table.
    pub fn query<P: Params>(&self, sql: &str, params: P) -> Result<Table> {
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        if columns.is_empty() {
            return Ok(Table::empty());
        }

        let width = columns.len();
        let mut rows = Vec::new();
        let mut cursor = stmt.query(params)?;
        while let Some(row) = cursor.next()? {
            let mut cells = Vec::with_capacity(width);
            for idx in 0..width {
                cells.push(Cell::from(row.get_ref(idx)?));
            }
            rows.push(cells);
        }

        tracing::debug!(rows = rows.len(), "query: {}", sql.trim());
        Ok(Table::new(columns, rows))
    }

    /// Run a parameterized INSERT/UPDATE/DELETE.
    ///
    /// Returns the new row id for INSERT/REPLACE statements, `None` otherwise.
    pub fn execute<P: Params>(&self, sql: &str, params: P) -> Result<Option<i64>> {
        let changed = self.conn.execute(sql, params)?;
        tracing::debug!(changed, "execute: {}", sql.trim());
        if is_insert(sql) {
            Ok(Some(self.conn.last_insert_rowid()))
        } else {
            Ok(None)
        }
    }

    // ========== Table Loader ==========

    /// Load every row of a base table, in storage scan order
    pub fn load(&self, table: TableName) -> Result<Table> {
        // Table names come from the enum, never from the caller.
        self.query(&format!("SELECT * FROM {}", table.as_str()), [])
    }

    /// Count rows in a base table
    pub fn count(&self, table: TableName) -> Result<usize> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", table.as_str()),
            [],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    // ========== Provider Operations ==========

    /// Insert a provider and return its id
    pub fn insert_provider(&self, provider: &NewProvider) -> Result<i64> {
        self.insert(
            "INSERT INTO Providers (Name, Type, Address, City, Contact) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                provider.name,
                provider.provider_type,
                provider.address,
                provider.city,
                provider.contact,
            ],
        )
    }

    pub fn providers(&self) -> Result<Vec<Provider>> {
        let mut stmt = self.conn.prepare(
            "SELECT Provider_ID, Name, Type, Address, City, Contact FROM Providers ORDER BY Provider_ID"
        )?;
        let providers = stmt
            .query_map([], |row| self.row_to_provider(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(providers)
    }

    fn row_to_provider(&self, row: &rusqlite::Row) -> rusqlite::Result<Provider> {
        Ok(Provider {
            provider_id: row.get(0)?,
            name: text_or_default(row, 1)?,
            provider_type: text_or_default(row, 2)?,
            address: text_or_default(row, 3)?,
            city: text_or_default(row, 4)?,
            contact: text_or_default(row, 5)?,
        })
    }

    // ========== Receiver Operations ==========

    pub fn receivers(&self) -> Result<Vec<Receiver>> {
        let mut stmt = self.conn.prepare(
            "SELECT Receiver_ID, Name, City FROM Receivers ORDER BY Receiver_ID"
        )?;
        let receivers = stmt
            .query_map([], |row| self.row_to_receiver(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(receivers)
    }

    /// Get a receiver by id
    pub fn get_receiver(&self, id: i64) -> Result<Option<Receiver>> {
        self.conn
            .query_row(
                "SELECT Receiver_ID, Name, City FROM Receivers WHERE Receiver_ID = ?1",
                [id],
                |row| self.row_to_receiver(row),
            )
            .optional()
            .map_err(Into::into)
    }

    fn row_to_receiver(&self, row: &rusqlite::Row) -> rusqlite::Result<Receiver> {
        Ok(Receiver {
            receiver_id: row.get(0)?,
            name: text_or_default(row, 1)?,
            city: text_or_default(row, 2)?,
        })
    }

    // ========== Food Listing Operations ==========

    pub fn food_listings(&self) -> Result<Vec<FoodListing>> {
        let mut stmt = self.conn.prepare(
            "SELECT Food_ID, Food_Name, Quantity, Expiry_Date, Location, Food_Type, Meal_Type, Provider_ID
             FROM Food_Listings ORDER BY Food_ID"
        )?;
        let listings = stmt
            .query_map([], |row| self.row_to_food_listing(row))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(listings)
    }

    /// Get a food listing by id
    pub fn get_food_listing(&self, id: i64) -> Result<Option<FoodListing>> {
        self.conn
            .query_row(
                "SELECT Food_ID, Food_Name, Quantity, Expiry_Date, Location, Food_Type, Meal_Type, Provider_ID
                 FROM Food_Listings WHERE Food_ID = ?1",
                [id],
                |row| self.row_to_food_listing(row),
            )
            .optional()
            .map_err(Into::into)
    }

    fn row_to_food_listing(&self, row: &rusqlite::Row) -> rusqlite::Result<FoodListing> {
        Ok(FoodListing {
            food_id: row.get(0)?,
            food_name: text_or_default(row, 1)?,
            quantity: row.get::<_, Option<i64>>(2)?.unwrap_or_default(),
            expiry_date: text_or_default(row, 3)?,
            location: text_or_default(row, 4)?,
            food_type: text_or_default(row, 5)?,
            meal_type: text_or_default(row, 6)?,
            provider_id: row.get::<_, Option<i64>>(7)?.unwrap_or_default(),
        })
    }

    // ========== Claim Operations ==========

    /// Insert a claim stamped with `timestamp` and return its id.
    ///
    /// Existing claims on the same food are not checked.
    pub fn insert_claim(&self, claim: &NewClaim, timestamp: &str) -> Result<i64> {
        self.insert(
            "INSERT INTO Claims (Food_ID, Receiver_ID, Status, Timestamp) VALUES (?1, ?2, ?3, ?4)",
            params![claim.food_id, claim.receiver_id, claim.status.as_str(), timestamp],
        )
    }

    /// Get a claim by id
    pub fn get_claim(&self, id: i64) -> Result<Option<Claim>> {
        self.conn
            .query_row(
                "SELECT Claim_ID, Food_ID, Receiver_ID, Status, Timestamp FROM Claims WHERE Claim_ID = ?1",
                [id],
                |row| self.row_to_claim(row),
            )
            .optional()
            .map_err(Into::into)
    }

    fn row_to_claim(&self, row: &rusqlite::Row) -> rusqlite::Result<Claim> {
        let status_str: String = row.get(3)?;
        let status = ClaimStatus::from_str(&status_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
        })?;

        Ok(Claim {
            claim_id: row.get(0)?,
            food_id: row.get(1)?,
            receiver_id: row.get(2)?,
            status,
            timestamp: text_or_default(row, 4)?,
        })
    }

    fn insert<P: Params>(&self, sql: &str, params: P) -> Result<i64> {
        self.conn.execute(sql, params)?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, "insert: {}", sql.trim());
        Ok(id)
    }
}

fn is_insert(sql: &str) -> bool {
    let head = sql.split_whitespace().next().unwrap_or("");
    head.eq_ignore_ascii_case("INSERT") || head.eq_ignore_ascii_case("REPLACE")
}

fn text_or_default(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<String> {
    Ok(row.get::<_, Option<String>>(idx)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded_store() -> SqliteStore {
        let store = SqliteStore::open_in_memory().unwrap();
        store.execute(
            "INSERT INTO Receivers (Name, City) VALUES ('Hope Shelter', 'Pune'), ('Food Bank', 'Delhi')",
            [],
        ).unwrap();
        store.execute(
            "INSERT INTO Food_Listings (Food_Name, Quantity, Expiry_Date, Location, Food_Type, Meal_Type, Provider_ID)
             VALUES ('Rice', 10, '2025-03-01', 'Pune', 'Vegetarian', 'Lunch', 1)",
            [],
        ).unwrap();
        store
    }

    #[test]
    fn test_load_returns_every_row() {
        let store = seeded_store();
        assert_eq!(store.load(TableName::Receivers).unwrap().len(), 2);
        assert_eq!(store.load(TableName::FoodListings).unwrap().len(), 1);
        assert_eq!(store.load(TableName::Providers).unwrap().len(), 0);
        assert_eq!(store.load(TableName::Claims).unwrap().len(), 0);

        for table in TableName::all() {
            assert_eq!(store.load(*table).unwrap().len(), store.count(*table).unwrap());
        }
    }

    #[test]
    fn test_query_binds_parameters() {
        let store = seeded_store();
        let table = store
            .query("SELECT Name FROM Receivers WHERE City = ?1", ["Delhi"])
            .unwrap();
        assert_eq!(table.columns, vec!["Name".to_string()]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(0, "Name").and_then(Cell::as_str), Some("Food Bank"));

        // A quote in the value is data, not SQL
        let none = store
            .query("SELECT Name FROM Receivers WHERE City = ?1", ["x' OR '1'='1"])
            .unwrap();
        assert!(none.is_empty());
        assert_eq!(none.columns, vec!["Name".to_string()]);
    }

    #[test]
    fn test_execute_returns_insert_id_only_for_inserts() {
        let store = seeded_store();
        let id = store
            .execute("INSERT INTO Receivers (Name, City) VALUES (?1, ?2)", ["Annapurna", "Mumbai"])
            .unwrap();
        assert_eq!(id, Some(3));

        let updated = store
            .execute("UPDATE Receivers SET City = ?1 WHERE Receiver_ID = ?2", params!["Thane", 3])
            .unwrap();
        assert_eq!(updated, None);
        assert_eq!(store.get_receiver(3).unwrap().unwrap().city, "Thane");
    }

    #[test]
    fn test_malformed_statement_is_an_error() {
        let store = seeded_store();
        assert!(matches!(store.query("SELEC * FROM Receivers", []), Err(Error::Storage(_))));
        assert!(matches!(store.execute("INSERT INTO Nowhere VALUES (1)", []), Err(Error::Storage(_))));
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.db");
        assert!(matches!(SqliteStore::open(&path), Err(Error::DatabaseNotFound(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_open_rejects_non_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.db");
        std::fs::write(&path, "Food_ID,Food_Name\n1,Bread\n".repeat(64)).unwrap();
        assert!(matches!(SqliteStore::open(&path), Err(Error::Storage(_))));
    }

    #[test]
    fn test_create_then_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("food.db");
        {
            let store = SqliteStore::create(&path).unwrap();
            store.insert_provider(&NewProvider {
                name: "Corner Bakery".into(),
                provider_type: "Restaurant".into(),
                address: "12 Main St".into(),
                city: "Pune".into(),
                contact: "555-0101".into(),
            }).unwrap();
        }

        let store = SqliteStore::open(&path).unwrap();
        let providers = store.providers().unwrap();
        assert_eq!(providers.len(), 1);
        assert_eq!(providers[0].name, "Corner Bakery");
    }

    #[test]
    fn test_claim_crud() {
        let store = seeded_store();
        let claim = NewClaim { receiver_id: 2, food_id: 1, status: ClaimStatus::Completed };
        let id = store.insert_claim(&claim, "2025-02-01 09:30:00").unwrap();

        let stored = store.get_claim(id).unwrap().unwrap();
        assert_eq!(stored.receiver_id, 2);
        assert_eq!(stored.food_id, 1);
        assert_eq!(stored.status, ClaimStatus::Completed);
        assert_eq!(stored.timestamp, "2025-02-01 09:30:00");
        assert!(store.get_claim(id + 1).unwrap().is_none());
    }

    #[test]
    fn test_table_name_parse() {
        assert_eq!("Food_Listings".parse::<TableName>().unwrap(), TableName::FoodListings);
        assert_eq!("claims".parse::<TableName>().unwrap(), TableName::Claims);
        assert!(matches!("users".parse::<TableName>(), Err(Error::UnknownTable(_))));
    }
}
