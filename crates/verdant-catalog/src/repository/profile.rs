//! # Profile Repository
//!
//! The single shopper profile the demo session runs as.

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tracing::info;
use verdant_core::{ShippingAddress, UserProfile};

use super::{read, write};
use crate::error::CatalogResult;

const TABLE: &str = "profile";

/// Profile edit. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    /// `Some("")` clears the phone number.
    pub phone: Option<String>,
    pub address: Option<ShippingAddress>,
}

#[derive(Debug, Clone)]
pub struct ProfileRepository {
    table: Arc<RwLock<UserProfile>>,
}

impl ProfileRepository {
    pub fn new(table: Arc<RwLock<UserProfile>>) -> Self {
        ProfileRepository { table }
    }

    pub fn get(&self) -> CatalogResult<UserProfile> {
        Ok(read(TABLE, &self.table)?.clone())
    }

    /// Applies an edit and returns the updated profile. Input is assumed
    /// validated by the caller.
    pub fn update(&self, update: ProfileUpdate) -> CatalogResult<UserProfile> {
        let mut profile = write(TABLE, &self.table)?;

        if let Some(name) = update.name {
            profile.name = name.trim().to_string();
        }
        if let Some(email) = update.email {
            profile.email = email.trim().to_string();
        }
        if let Some(phone) = update.phone {
            let phone = phone.trim();
            profile.phone = (!phone.is_empty()).then(|| phone.to_string());
        }
        if let Some(address) = update.address {
            profile.address = Some(address);
        }

        info!(id = %profile.id, "Profile updated");
        Ok(profile.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Catalog;

    #[test]
    fn test_update_profile_fields() {
        let repo = Catalog::seeded().profile();
        let before = repo.get().unwrap();

        let after = repo
            .update(ProfileUpdate {
                name: Some("  Sam Birch ".into()),
                phone: Some(String::new()),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(after.name, "Sam Birch");
        assert_eq!(after.phone, None);
        assert_eq!(after.email, before.email);
        assert_eq!(repo.get().unwrap(), after);
    }
}
