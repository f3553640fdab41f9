//! Database schema definitions

/// SQL to create the Providers table
pub const CREATE_PROVIDERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS Providers (
    Provider_ID INTEGER PRIMARY KEY AUTOINCREMENT,
    Name TEXT,
    Type TEXT,
    Address TEXT,
    City TEXT,
    Contact TEXT
)
"#;

/// SQL to create the Receivers table
/// Type and Contact are carried by imported data but unused by the views
pub const CREATE_RECEIVERS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS Receivers (
    Receiver_ID INTEGER PRIMARY KEY AUTOINCREMENT,
    Name TEXT,
    Type TEXT,
    City TEXT,
    Contact TEXT
)
"#;

/// SQL to create the Food_Listings table
pub const CREATE_FOOD_LISTINGS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS Food_Listings (
    Food_ID INTEGER PRIMARY KEY AUTOINCREMENT,
    Food_Name TEXT,
    Quantity INTEGER,
    Expiry_Date TEXT,
    Provider_ID INTEGER,
    Provider_Type TEXT,
    Location TEXT,
    Food_Type TEXT,
    Meal_Type TEXT
)
"#;

/// SQL to create the Claims table
pub const CREATE_CLAIMS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS Claims (
    Claim_ID INTEGER PRIMARY KEY AUTOINCREMENT,
    Food_ID INTEGER,
    Receiver_ID INTEGER,
    Status TEXT,
    Timestamp TEXT
)
"#;

/// All schema creation statements
pub fn all_schema_statements() -> Vec<&'static str> {
    vec![
        CREATE_PROVIDERS_TABLE,
        CREATE_RECEIVERS_TABLE,
        CREATE_FOOD_LISTINGS_TABLE,
        CREATE_CLAIMS_TABLE,
    ]
}
