//! # Profile Commands

use tracing::debug;
use verdant_catalog::ProfileUpdate;
use verdant_core::validation::{
    validate_email, validate_required, validate_shipping_address,
};
use verdant_core::{Order, UserProfile, ValidationError};

use crate::error::ApiError;
use crate::state::CatalogState;

const MAX_NAME_LENGTH: usize = 80;
const MAX_PHONE_LENGTH: usize = 20;

pub fn get_profile(catalog: &CatalogState) -> Result<UserProfile, ApiError> {
    debug!("get_profile command");
    Ok(catalog.inner().profile().get()?)
}

/// Edits account details. Only fields present in `update` change.
pub fn update_profile(
    catalog: &CatalogState,
    update: ProfileUpdate,
) -> Result<UserProfile, ApiError> {
    debug!("update_profile command");

    if let Some(name) = &update.name {
        validate_required("name", name)?;
        if name.trim().chars().count() > MAX_NAME_LENGTH {
            return Err(ValidationError::TooLong {
                field: "name".to_string(),
                max: MAX_NAME_LENGTH,
            }
            .into());
        }
    }
    if let Some(email) = &update.email {
        validate_email(email)?;
    }
    if let Some(phone) = &update.phone {
        let phone = phone.trim();
        if phone.len() > MAX_PHONE_LENGTH {
            return Err(ValidationError::TooLong {
                field: "phone".to_string(),
                max: MAX_PHONE_LENGTH,
            }
            .into());
        }
        if !phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'))
        {
            return Err(ValidationError::InvalidFormat {
                field: "phone".to_string(),
                reason: "may only contain digits, spaces and + - ( )".to_string(),
            }
            .into());
        }
    }
    if let Some(address) = &update.address {
        validate_shipping_address(address)?;
    }

    Ok(catalog.inner().profile().update(update)?)
}

/// The shopper's orders, newest first.
pub fn order_history(catalog: &CatalogState) -> Result<Vec<Order>, ApiError> {
    debug!("order_history command");
    let user_id = catalog.inner().profile().get()?.id;
    Ok(catalog.inner().orders().for_user(&user_id)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_update_validates_before_writing() {
        let catalog = CatalogState::default();
        let before = get_profile(&catalog).unwrap();

        let err = update_profile(
            &catalog,
            ProfileUpdate {
                name: Some("Sam".into()),
                email: Some("not-an-email".into()),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(get_profile(&catalog).unwrap(), before);

        let err = update_profile(
            &catalog,
            ProfileUpdate {
                phone: Some("call me".into()),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_update_applies_fields() {
        let catalog = CatalogState::default();
        let updated = update_profile(
            &catalog,
            ProfileUpdate {
                email: Some("sam@example.com".into()),
                phone: Some("+1 (503) 555-0142".into()),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(updated.email, "sam@example.com");
        assert_eq!(updated.phone.as_deref(), Some("+1 (503) 555-0142"));
    }

    #[test]
    fn test_order_history_is_newest_first() {
        let catalog = CatalogState::default();
        let orders = order_history(&catalog).unwrap();
        assert_eq!(orders.len(), 4);
        assert!(orders.windows(2).all(|w| w[0].placed_at >= w[1].placed_at));
    }
}
