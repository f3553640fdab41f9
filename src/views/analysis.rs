//! Analysis: a fixed menu of read-only aggregate queries

use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::{Error, Result};
use crate::storage::{SqliteStore, Table};

/// The named aggregate queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisQuery {
    ProvidersPerCity,
    ReceiversPerCity,
    TopProviderTypes,
    TopFoodTypes,
    ClaimsStatusPercent,
    TopMealTypesClaimed,
}

impl AnalysisQuery {
    /// Menu label
    pub fn name(&self) -> &'static str {
        match self {
            AnalysisQuery::ProvidersPerCity => "Providers per City",
            AnalysisQuery::ReceiversPerCity => "Receivers per City",
            AnalysisQuery::TopProviderTypes => "Top Provider Types",
            AnalysisQuery::TopFoodTypes => "Top Food Types",
            AnalysisQuery::ClaimsStatusPercent => "Claims Status %",
            AnalysisQuery::TopMealTypesClaimed => "Top Meal Types Claimed",
        }
    }

    /// URL/CLI friendly identifier
    pub fn slug(&self) -> &'static str {
        match self {
            AnalysisQuery::ProvidersPerCity => "providers-per-city",
            AnalysisQuery::ReceiversPerCity => "receivers-per-city",
            AnalysisQuery::TopProviderTypes => "top-provider-types",
            AnalysisQuery::TopFoodTypes => "top-food-types",
            AnalysisQuery::ClaimsStatusPercent => "claims-status-percent",
            AnalysisQuery::TopMealTypesClaimed => "top-meal-types-claimed",
        }
    }

    pub fn sql(&self) -> &'static str {
        match self {
            AnalysisQuery::ProvidersPerCity => {
                "SELECT City, COUNT(*) AS Total_Providers FROM Providers GROUP BY City"
            }
            AnalysisQuery::ReceiversPerCity => {
                "SELECT City, COUNT(*) AS Total_Receivers FROM Receivers GROUP BY City"
            }
            AnalysisQuery::TopProviderTypes => {
                "SELECT Type, COUNT(*) AS Contribution_Count FROM Providers GROUP BY Type ORDER BY Contribution_Count DESC"
            }
            AnalysisQuery::TopFoodTypes => {
                "SELECT Food_Type, COUNT(*) AS Count FROM Food_Listings GROUP BY Food_Type ORDER BY Count DESC"
            }
            AnalysisQuery::ClaimsStatusPercent => {
                "SELECT Status, COUNT(*) * 100.0 / (SELECT COUNT(*) FROM Claims) AS Percentage FROM Claims GROUP BY Status"
            }
            AnalysisQuery::TopMealTypesClaimed => {
                r#"
                SELECT Meal_Type, COUNT(*) AS Total_Claims
                FROM Food_Listings f
                JOIN Claims c ON f.Food_ID = c.Food_ID
                GROUP BY Meal_Type
                ORDER BY Total_Claims DESC
                "#
            }
        }
    }

    /// All queries in menu order
    pub fn all() -> &'static [AnalysisQuery] {
        &[
            AnalysisQuery::ProvidersPerCity,
            AnalysisQuery::ReceiversPerCity,
            AnalysisQuery::TopProviderTypes,
            AnalysisQuery::TopFoodTypes,
            AnalysisQuery::ClaimsStatusPercent,
            AnalysisQuery::TopMealTypesClaimed,
        ]
    }

    /// Execute the query and return its result verbatim
    pub fn run(&self, store: &SqliteStore) -> Result<Table> {
        tracing::debug!("Running analysis '{}'", self.name());
        store.query(self.sql(), [])
    }
}

impl FromStr for AnalysisQuery {
    type Err = Error;

    /// Accepts either the menu label or the slug
    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|q| q.name() == s || q.slug().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownAnalysis(s.to_string()))
    }
}

impl std::fmt::Display for AnalysisQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Run an analysis selected by label or slug
pub fn run_named(store: &SqliteStore, name: &str) -> Result<Table> {
    name.parse::<AnalysisQuery>()?.run(store)
}
