//! Storage Layer - SQLite-backed persistence
//!
//! System of record is a single SQLite file with tables:
//! - Providers(Provider_ID, Name, Type, Address, City, Contact)
//! - Receivers(Receiver_ID, Name, City)
//! - Food_Listings(Food_ID, Food_Name, Quantity, Expiry_Date, Location, Food_Type, Meal_Type, Provider_ID)
//! - Claims(Claim_ID, Food_ID, Receiver_ID, Status, Timestamp)
//!
//! Foreign keys are a naming convention only; nothing declares or enforces them.

pub mod schema;
pub mod sqlite;
pub mod table;

pub use sqlite::{SqliteStore, TableName};
pub use table::{Cell, Table};
