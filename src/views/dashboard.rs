//! Dashboard: summary counters and the most recent listings

use serde::Serialize;
use crate::Result;
use crate::storage::{SqliteStore, Table, TableName};

/// Number of listings shown under "Recently Added Listings"
pub const RECENT_LISTINGS_LIMIT: i64 = 10;

const RECENT_LISTINGS_SQL: &str = r#"
SELECT Food_ID, Food_Name, Quantity, Expiry_Date, Location, Food_Type, Meal_Type, Provider_ID
FROM Food_Listings
ORDER BY Food_ID DESC
LIMIT ?1
"#;

/// Row counts of the four base tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub providers: usize,
    pub receivers: usize,
    pub food_listings: usize,
    pub claims: usize,
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Total Providers: {}", self.providers)?;
        writeln!(f, "Total Receivers: {}", self.receivers)?;
        writeln!(f, "Food Listings: {}", self.food_listings)?;
        writeln!(f, "Claims: {}", self.claims)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub summary: Summary,
    pub recent_listings: Table,
}

pub fn summary(store: &SqliteStore) -> Result<Summary> {
    Ok(Summary {
        providers: store.count(TableName::Providers)?,
        receivers: store.count(TableName::Receivers)?,
        food_listings: store.count(TableName::FoodListings)?,
        claims: store.count(TableName::Claims)?,
    })
}

/// Newest listings first, by descending Food_ID
pub fn recent_listings(store: &SqliteStore) -> Result<Table> {
    store.query(RECENT_LISTINGS_SQL, [RECENT_LISTINGS_LIMIT])
}

pub fn dashboard(store: &SqliteStore) -> Result<Dashboard> {
    Ok(Dashboard {
        summary: summary(store)?,
        recent_listings: recent_listings(store)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Cell;
    use crate::views::fixtures::seeded_store;

    #[test]
    fn test_summary_counts() {
        let store = seeded_store();
        let summary = summary(&store).unwrap();
        assert_eq!(summary, Summary { providers: 3, receivers: 2, food_listings: 4, claims: 0 });
    }

    #[test]
    fn test_recent_listings_newest_first() {
        let store = seeded_store();
        let recent = recent_listings(&store).unwrap();
        let ids: Vec<i64> = recent.column("Food_ID").unwrap().filter_map(Cell::as_i64).collect();
        assert_eq!(ids, vec![4, 3, 2, 1]);
        assert_eq!(recent.columns.len(), 8);
    }

    #[test]
    fn test_recent_listings_capped() {
        let store = seeded_store();
        for i in 0..12 {
            store.execute(
                "INSERT INTO Food_Listings (Food_Name, Quantity, Location) VALUES (?1, 1, 'Pune')",
                [format!("Item {}", i)],
            ).unwrap();
        }
        let dashboard = dashboard(&store).unwrap();
        assert_eq!(dashboard.summary.food_listings, 16);
        assert_eq!(dashboard.recent_listings.len(), RECENT_LISTINGS_LIMIT as usize);
        assert_eq!(dashboard.recent_listings.get(0, "Food_ID").and_then(Cell::as_i64), Some(16));
    }

    #[test]
    fn test_empty_database() {
        let store = SqliteStore::open_in_memory().unwrap();
        let dashboard = dashboard(&store).unwrap();
        assert_eq!(dashboard.summary.claims, 0);
        assert!(dashboard.recent_listings.is_empty());
    }
}
