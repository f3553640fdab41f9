//! View controllers
//!
//! Each view composes the query executor and filter engine into one flow:
//! - `dashboard`: summary counters and recently added listings
//! - `browse`: filterable listings joined with provider details
//! - `claims`: receiver/food choices and claim creation
//! - `admin`: provider creation
//! - `analysis`: fixed menu of aggregate queries

pub mod admin;
pub mod analysis;
pub mod browse;
pub mod claims;
pub mod dashboard;

pub use admin::add_provider;
pub use analysis::AnalysisQuery;
pub use browse::{browse, filter_options, FilterOptions};
pub use claims::{claim_choices, create_claim, create_claim_at, ClaimChoices, Choices};
pub use dashboard::{dashboard, Dashboard, Summary};
