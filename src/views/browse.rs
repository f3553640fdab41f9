//! Browse listings: the full listing table joined with provider details,
//! narrowed by the sidebar filters.

use serde::Serialize;
use crate::Result;
use crate::filter::{FilterSet, Filters, Selection};
use crate::storage::{SqliteStore, Table};

const LISTINGS_SQL: &str = r#"
SELECT f.Food_ID, f.Food_Name, f.Quantity, f.Expiry_Date, f.Location, f.Food_Type, f.Meal_Type,
       p.Name AS Provider_Name, p.Type AS Provider_Type, p.Contact AS Provider_Contact
FROM Food_Listings f
LEFT JOIN Providers p ON p.Provider_ID = f.Provider_ID
"#;

/// Output columns of the browse query, in order
pub const LISTING_COLUMNS: &[&str] = &[
    "Food_ID",
    "Food_Name",
    "Quantity",
    "Expiry_Date",
    "Location",
    "Food_Type",
    "Meal_Type",
    "Provider_Name",
    "Provider_Type",
    "Provider_Contact",
];

const CITY_OPTIONS_SQL: &str = r#"
SELECT City FROM Providers WHERE City IS NOT NULL
UNION
SELECT Location FROM Food_Listings WHERE Location IS NOT NULL
ORDER BY 1
"#;
const PROVIDER_TYPE_OPTIONS_SQL: &str =
    "SELECT DISTINCT Type FROM Providers WHERE Type IS NOT NULL ORDER BY Type";
const FOOD_TYPE_OPTIONS_SQL: &str =
    "SELECT DISTINCT Food_Type FROM Food_Listings WHERE Food_Type IS NOT NULL ORDER BY Food_Type";
const MEAL_TYPE_OPTIONS_SQL: &str =
    "SELECT DISTINCT Meal_Type FROM Food_Listings WHERE Meal_Type IS NOT NULL ORDER BY Meal_Type";

/// Listings matching `filters`
pub fn browse(store: &SqliteStore, filters: &Filters) -> Result<Table> {
    let filter_set = FilterSet::new(LISTING_COLUMNS, filters.predicates())?;
    let listings = store.query(LISTINGS_SQL, [])?;
    let filtered = filter_set.apply(&listings)?;
    tracing::debug!(total = listings.len(), shown = filtered.len(), "browse listings");
    Ok(filtered)
}

/// Distinct values offered by each sidebar filter, sorted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub cities: Vec<String>,
    pub provider_types: Vec<String>,
    pub food_types: Vec<String>,
    pub meal_types: Vec<String>,
}

impl FilterOptions {
    /// Widget choices: the "All" sentinel followed by the values
    pub fn with_all(values: &[String]) -> Vec<String> {
        std::iter::once(Selection::ALL.to_string())
            .chain(values.iter().cloned())
            .collect()
    }
}

pub fn filter_options(store: &SqliteStore) -> Result<FilterOptions> {
    Ok(FilterOptions {
        cities: distinct_values(store, CITY_OPTIONS_SQL)?,
        provider_types: distinct_values(store, PROVIDER_TYPE_OPTIONS_SQL)?,
        food_types: distinct_values(store, FOOD_TYPE_OPTIONS_SQL)?,
        meal_types: distinct_values(store, MEAL_TYPE_OPTIONS_SQL)?,
    })
}

fn distinct_values(store: &SqliteStore, sql: &str) -> Result<Vec<String>> {
    let table = store.query(sql, [])?;
    Ok(table
        .rows
        .iter()
        .filter_map(|row| row.first().and_then(|cell| cell.text()))
        .map(|text| text.into_owned())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Cell;
    use crate::views::fixtures::seeded_store;

    fn food_ids(table: &Table) -> Vec<i64> {
        table.column("Food_ID").unwrap().filter_map(Cell::as_i64).collect()
    }

    #[test]
    fn test_unfiltered_browse_returns_all_listings() {
        let store = seeded_store();
        let listings = browse(&store, &Filters::default()).unwrap();
        assert_eq!(listings.len(), 4);
        assert_eq!(listings.columns, LISTING_COLUMNS.iter().map(|c| c.to_string()).collect::<Vec<_>>());
        assert_eq!(listings.get(0, "Provider_Name").and_then(Cell::as_str), Some("Corner Bakery"));
    }

    #[test]
    fn test_browse_by_city_and_food_type() {
        let store = seeded_store();
        let filters = Filters {
            city: Selection::parse("Pune"),
            food_type: Selection::parse("Vegan"),
            ..Filters::default()
        };
        assert_eq!(food_ids(&browse(&store, &filters).unwrap()), vec![3]);
    }

    #[test]
    fn test_browse_by_provider_type() {
        let store = seeded_store();
        let filters = Filters {
            provider_type: Selection::parse("Grocery Store"),
            ..Filters::default()
        };
        assert_eq!(food_ids(&browse(&store, &filters).unwrap()), vec![2, 4]);
    }

    #[test]
    fn test_browse_with_no_match() {
        let store = seeded_store();
        let filters = Filters { meal_type: Selection::parse("Snacks"), ..Filters::default() };
        let listings = browse(&store, &filters).unwrap();
        assert!(listings.is_empty());
    }

    #[test]
    fn test_listing_without_provider_is_kept() {
        let store = seeded_store();
        store.execute(
            "INSERT INTO Food_Listings (Food_Name, Quantity, Location, Food_Type, Meal_Type, Provider_ID)
             VALUES ('Dal', 3, 'Pune', 'Vegan', 'Lunch', 99)",
            [],
        ).unwrap();
        let listings = browse(&store, &Filters::default()).unwrap();
        assert_eq!(listings.len(), 5);
        assert_eq!(listings.get(4, "Provider_Name"), Some(&Cell::Null));
    }

    #[test]
    fn test_filter_options() {
        let store = seeded_store();
        let options = filter_options(&store).unwrap();
        assert_eq!(options.cities, vec!["Delhi", "Mumbai", "Pune"]);
        assert_eq!(options.provider_types, vec!["Grocery Store", "Restaurant", "Supermarket"]);
        assert_eq!(options.food_types, vec!["Non-Vegetarian", "Vegan", "Vegetarian"]);
        assert_eq!(options.meal_types, vec!["Breakfast", "Dinner", "Lunch"]);
        assert_eq!(FilterOptions::with_all(&options.cities)[0], "All");
    }
}
