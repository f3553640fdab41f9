//! Record types for the four donation tables
//!
//! - `Provider`: lists surplus food
//! - `Receiver`: claims listed food
//! - `FoodListing`: one unit of donatable food
//! - `Claim`: a receiver's request against a food listing

use crate::{Error, Result, ValidationError};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle status of a claim.
///
/// Claims are never updated in place, so the status is fixed at insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ClaimStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

impl ClaimStatus {
    /// Get the string representation stored in the Status column
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimStatus::Pending => "Pending",
            ClaimStatus::Completed => "Completed",
            ClaimStatus::Cancelled => "Cancelled",
        }
    }

    /// Get all statuses in display order
    pub fn all() -> &'static [ClaimStatus] {
        &[ClaimStatus::Pending, ClaimStatus::Completed, ClaimStatus::Cancelled]
    }
}

impl FromStr for ClaimStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(ClaimStatus::Pending),
            "completed" => Ok(ClaimStatus::Completed),
            "cancelled" | "canceled" => Ok(ClaimStatus::Cancelled),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A food provider (restaurant, grocery store, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub provider_id: i64,
    pub name: String,
    /// Free-text category
    #[serde(rename = "type")]
    pub provider_type: String,
    pub address: String,
    pub city: String,
    pub contact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receiver {
    pub receiver_id: i64,
    pub name: String,
    pub city: String,
}

impl Receiver {
    /// Label shown in receiver selection widgets
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.city)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodListing {
    pub food_id: i64,
    pub food_name: String,
    pub quantity: i64,
    pub expiry_date: String,
    /// City the food can be picked up in
    pub location: String,
    pub food_type: String,
    pub meal_type: String,
    /// Owning provider (not enforced)
    pub provider_id: i64,
}

impl FoodListing {
    /// Label shown in food selection widgets
    pub fn label(&self) -> String {
        format!("{} | {} (Qty: {})", self.food_name, self.location, self.quantity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub claim_id: i64,
    pub food_id: i64,
    pub receiver_id: i64,
    pub status: ClaimStatus,
    /// Local wall-clock time, `YYYY-MM-DD HH:MM:SS`
    pub timestamp: String,
}

/// Provider fields submitted through the admin form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewProvider {
    pub name: String,
    #[serde(rename = "type")]
    pub provider_type: String,
    pub address: String,
    pub city: String,
    pub contact: String,
}

impl NewProvider {
    /// Reject blank fields before they reach the database
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        let fields = [
            ("Name", &self.name),
            ("Type", &self.provider_type),
            ("Address", &self.address),
            ("City", &self.city),
            ("Contact", &self.contact),
        ];
        for (column, value) in fields {
            if value.trim().is_empty() {
                return Err(ValidationError::EmptyField(column));
            }
        }
        Ok(())
    }
}

/// A claim request before insertion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClaim {
    pub receiver_id: i64,
    pub food_id: i64,
    #[serde(default)]
    pub status: ClaimStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!("Pending".parse::<ClaimStatus>().unwrap(), ClaimStatus::Pending);
        assert_eq!("completed".parse::<ClaimStatus>().unwrap(), ClaimStatus::Completed);
        assert_eq!("CANCELLED".parse::<ClaimStatus>().unwrap(), ClaimStatus::Cancelled);
        assert!(matches!("Expired".parse::<ClaimStatus>(), Err(Error::InvalidStatus(_))));
    }

    #[test]
    fn test_labels() {
        let receiver = Receiver { receiver_id: 1, name: "Hope Shelter".into(), city: "Pune".into() };
        assert_eq!(receiver.label(), "Hope Shelter (Pune)");

        let food = FoodListing {
            food_id: 7,
            food_name: "Rice".into(),
            quantity: 12,
            expiry_date: "2025-03-01".into(),
            location: "Pune".into(),
            food_type: "Vegetarian".into(),
            meal_type: "Lunch".into(),
            provider_id: 2,
        };
        assert_eq!(food.label(), "Rice | Pune (Qty: 12)");
    }

    #[test]
    fn test_new_provider_validation() {
        let mut provider = NewProvider {
            name: "Corner Bakery".into(),
            provider_type: "Restaurant".into(),
            address: "12 Main St".into(),
            city: "Pune".into(),
            contact: "555-0101".into(),
        };
        assert!(provider.validate().is_ok());

        provider.city = "   ".into();
        assert_eq!(provider.validate(), Err(ValidationError::EmptyField("City")));
    }

    #[test]
    fn test_new_claim_defaults_to_pending() {
        let claim: NewClaim = serde_json::from_str(r#"{"receiver_id": 1, "food_id": 2}"#).unwrap();
        assert_eq!(claim.status, ClaimStatus::Pending);
    }
}
