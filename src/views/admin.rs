//! Admin: add a provider

use crate::Result;
use crate::models::NewProvider;
use crate::storage::SqliteStore;

/// Validate and insert a provider, returning its id
pub fn add_provider(store: &SqliteStore, provider: &NewProvider) -> Result<i64> {
    provider.validate()?;
    let id = store.insert_provider(provider)?;
    tracing::info!(provider_id = id, name = %provider.name, "Provider added");
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, ValidationError};
    use crate::storage::{Cell, TableName};
    use crate::views::fixtures::seeded_store;

    fn sample() -> NewProvider {
        NewProvider {
            name: "Sunrise Hotel".into(),
            provider_type: "Restaurant".into(),
            address: "1 Lake View".into(),
            city: "Nagpur".into(),
            contact: "+91 98765 43210".into(),
        }
    }

    #[test]
    fn test_add_provider_visible_in_load() {
        let store = seeded_store();
        let before = store.load(TableName::Providers).unwrap().len();

        let id = add_provider(&store, &sample()).unwrap();

        let providers = store.load(TableName::Providers).unwrap();
        assert_eq!(providers.len(), before + 1);
        let row = providers.column("Provider_ID").unwrap().position(|c| c.as_i64() == Some(id)).unwrap();
        assert_eq!(providers.get(row, "Name"), Some(&Cell::Text("Sunrise Hotel".into())));
        assert_eq!(providers.get(row, "Type"), Some(&Cell::Text("Restaurant".into())));
        assert_eq!(providers.get(row, "Address"), Some(&Cell::Text("1 Lake View".into())));
        assert_eq!(providers.get(row, "City"), Some(&Cell::Text("Nagpur".into())));
        assert_eq!(providers.get(row, "Contact"), Some(&Cell::Text("+91 98765 43210".into())));
    }

    #[test]
    fn test_blank_field_rejected_before_insert() {
        let store = seeded_store();
        let provider = NewProvider { contact: String::new(), ..sample() };

        let err = add_provider(&store, &provider).unwrap_err();
        assert!(matches!(err, Error::Validation(ValidationError::EmptyField("Contact"))));
        assert_eq!(store.count(TableName::Providers).unwrap(), 3);
    }
}
