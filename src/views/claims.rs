//! Claim creation: selection choices and the validated insert

use std::collections::BTreeMap;
use chrono::{Local, NaiveDateTime};
use serde::{Serialize, Serializer};
use crate::{Result, ValidationError};
use crate::models::{ClaimStatus, FoodListing, NewClaim, Receiver};
use crate::storage::SqliteStore;

/// Format of the Claims.Timestamp column
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Selection entries keyed by row id, each with a display label
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Choices {
    entries: BTreeMap<i64, String>,
}

impl Choices {
    pub fn from_receivers(receivers: &[Receiver]) -> Self {
        receivers.iter().map(|r| (r.receiver_id, r.label())).collect()
    }

    pub fn from_food_listings(listings: &[FoodListing]) -> Self {
        listings.iter().map(|f| (f.food_id, f.label())).collect()
    }

    pub fn label(&self, id: i64) -> Option<&str> {
        self.entries.get(&id).map(String::as_str)
    }

    /// Id of the first entry (lowest id) showing `label`
    pub fn find(&self, label: &str) -> Option<i64> {
        self.entries
            .iter()
            .find(|(_, l)| l.as_str() == label)
            .map(|(id, _)| *id)
    }

    /// Entries in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = (i64, &str)> {
        self.entries.iter().map(|(id, label)| (*id, label.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(i64, String)> for Choices {
    fn from_iter<I: IntoIterator<Item = (i64, String)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().collect() }
    }
}

#[derive(Serialize)]
struct Choice<'a> {
    id: i64,
    label: &'a str,
}

impl Serialize for Choices {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter().map(|(id, label)| Choice { id, label }))
    }
}

/// Everything the claim form offers
#[derive(Debug, Clone, Serialize)]
pub struct ClaimChoices {
    pub receivers: Choices,
    pub food: Choices,
    pub statuses: Vec<ClaimStatus>,
}

impl ClaimChoices {
    /// A claim needs at least one receiver and one food listing
    pub fn is_available(&self) -> bool {
        !self.receivers.is_empty() && !self.food.is_empty()
    }
}

pub fn claim_choices(store: &SqliteStore) -> Result<ClaimChoices> {
    Ok(ClaimChoices {
        receivers: Choices::from_receivers(&store.receivers()?),
        food: Choices::from_food_listings(&store.food_listings()?),
        statuses: ClaimStatus::all().to_vec(),
    })
}

/// Create a claim stamped with the current local time
pub fn create_claim(store: &SqliteStore, claim: &NewClaim) -> Result<i64> {
    create_claim_at(store, claim, Local::now().naive_local())
}

/// Create a claim stamped with `at`.
///
/// The receiver and food listing must exist. Remaining quantity and earlier
/// claims on the same food are not checked.
pub fn create_claim_at(store: &SqliteStore, claim: &NewClaim, at: NaiveDateTime) -> Result<i64> {
    if store.get_receiver(claim.receiver_id)?.is_none() {
        return Err(ValidationError::UnknownReceiver(claim.receiver_id).into());
    }
    if store.get_food_listing(claim.food_id)?.is_none() {
        return Err(ValidationError::UnknownFood(claim.food_id).into());
    }

    let timestamp = at.format(TIMESTAMP_FORMAT).to_string();
    let id = store.insert_claim(claim, &timestamp)?;
    tracing::info!(
        claim_id = id,
        receiver_id = claim.receiver_id,
        food_id = claim.food_id,
        status = %claim.status,
        "Claim created"
    );
    Ok(id)
}
