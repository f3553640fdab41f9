//! Filter engine - equality predicates over in-memory tables
//!
//! Predicates are AND-combined and compare the cell's textual form to the
//! selected value exactly (no case folding, no partial matches). A predicate
//! set is bound to a declared column list up front, so a predicate naming a
//! column the query never selects fails at construction.

use serde::{Deserialize, Serialize};
use crate::{Error, Result};
use crate::storage::{Cell, Table};

/// A filter value: either no constraint or an exact match
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selection {
    #[default]
    All,
    Exact(String),
}

impl Selection {
    /// Sentinel label meaning "no filter"
    pub const ALL: &'static str = "All";

    /// Parse a widget value; the literal "All" disables the predicate
    pub fn parse(value: &str) -> Self {
        if value == Self::ALL {
            Selection::All
        } else {
            Selection::Exact(value.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    /// NULL never matches an exact selection
    pub fn matches(&self, cell: &Cell) -> bool {
        match self {
            Selection::All => true,
            Selection::Exact(expected) => cell.text().is_some_and(|t| t == expected.as_str()),
        }
    }
}

/// A missing or blank value means no filter
impl From<Option<String>> for Selection {
    fn from(value: Option<String>) -> Self {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(Selection::parse)
            .unwrap_or_default()
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Selection::All => write!(f, "{}", Self::ALL),
            Selection::Exact(v) => write!(f, "{}", v),
        }
    }
}

/// Equality condition over one column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub column: String,
    pub selection: Selection,
}

impl Predicate {
    pub fn new(column: impl Into<String>, selection: Selection) -> Self {
        Self { column: column.into(), selection }
    }
}

/// The sidebar filter state shared by listing views
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filters {
    pub city: Selection,
    pub provider_type: Selection,
    pub food_type: Selection,
    pub meal_type: Selection,
}

impl Filters {
    /// Predicates over the listing columns each filter constrains
    pub fn predicates(&self) -> Vec<Predicate> {
        vec![
            Predicate::new("Location", self.city.clone()),
            Predicate::new("Provider_Type", self.provider_type.clone()),
            Predicate::new("Food_Type", self.food_type.clone()),
            Predicate::new("Meal_Type", self.meal_type.clone()),
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.predicates().iter().all(|p| p.selection.is_all())
    }
}

/// Predicates validated against a declared output schema
#[derive(Debug, Clone)]
pub struct FilterSet {
    predicates: Vec<Predicate>,
}

impl FilterSet {
    /// Bind predicates to `schema`.
    ///
    /// An active predicate on a column the schema does not declare is rejected.
    /// `All` predicates never read their column and are not checked.
    pub fn new<S: AsRef<str>>(schema: &[S], predicates: Vec<Predicate>) -> Result<Self> {
        for predicate in predicates.iter().filter(|p| !p.selection.is_all()) {
            if !schema.iter().any(|c| c.as_ref() == predicate.column) {
                return Err(unknown_column(&predicate.column, schema));
            }
        }
        Ok(Self { predicates })
    }

    /// Predicates that actually constrain rows
    pub fn active(&self) -> impl Iterator<Item = &Predicate> {
        self.predicates.iter().filter(|p| !p.selection.is_all())
    }

    /// Keep the rows satisfying every active predicate.
    ///
    /// Fails if `table` lacks a column the set was declared with.
    pub fn apply(&self, table: &Table) -> Result<Table> {
        if table.is_empty() {
            return Ok(table.clone());
        }

        let mut bound = Vec::new();
        for predicate in self.active() {
            let idx = table
                .column_index(&predicate.column)
                .ok_or_else(|| unknown_column(&predicate.column, &table.columns))?;
            bound.push((idx, &predicate.selection));
        }
        if bound.is_empty() {
            return Ok(table.clone());
        }

        Ok(table.retain_rows(|row| {
            bound
                .iter()
                .all(|(idx, selection)| row.get(*idx).is_some_and(|cell| selection.matches(cell)))
        }))
    }
}

/// Filter `table` by `predicates`, validating columns against the table itself
pub fn apply(table: &Table, predicates: Vec<Predicate>) -> Result<Table> {
    if table.is_empty() {
        return Ok(table.clone());
    }
    FilterSet::new(&table.columns, predicates)?.apply(table)
}

fn unknown_column<S: AsRef<str>>(column: &str, available: &[S]) -> Error {
    Error::UnknownColumn {
        column: column.to_string(),
        available: available.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(", "),
    }
}
