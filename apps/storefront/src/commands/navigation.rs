//! # Navigation Commands
//!
//! The router decides; these commands gather what it needs to decide with.

use tracing::{debug, info};
use verdant_core::{Navigation, RouteContext, View};

use crate::error::ApiError;
use crate::state::{CartState, CatalogState, SessionState};

/// Requests a view change.
///
/// ## Errors
/// * `NAVIGATION_DENIED` - a guard refused; the current view is unchanged
pub fn navigate(
    cart: &CartState,
    catalog: &CatalogState,
    session: &SessionState,
    target: View,
) -> Result<Navigation, ApiError> {
    debug!(target = %target, "navigate command");

    let ctx = RouteContext {
        cart_is_empty: cart.is_empty(),
        is_admin: catalog.inner().profile().get()?.is_admin,
    };

    match session.with_session_mut(|s| s.router.navigate(target, &ctx)) {
        Navigation::Denied { requested, reason } => {
            info!(requested = %requested, reason = %reason, "Navigation denied");
            Err(ApiError::navigation_denied(reason))
        }
        outcome => Ok(outcome),
    }
}

/// Returns to the previous view. Stays put when there is no history.
pub fn go_back(session: &SessionState) -> View {
    debug!("go_back command");
    session.with_session_mut(|s| {
        s.router.back();
        s.router.current().clone()
    })
}

pub fn current_view(session: &SessionState) -> View {
    session.with_session(|s| s.router.current().clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::add_to_cart;
    use crate::error::ErrorCode;
    use verdant_core::AdminTab;

    #[test]
    fn test_checkout_redirects_with_empty_cart() {
        let (cart, catalog, session) = (CartState::new(), CatalogState::default(), SessionState::new());

        let outcome = navigate(&cart, &catalog, &session, View::Checkout).unwrap();
        assert_eq!(
            outcome,
            Navigation::Redirected {
                requested: View::Checkout,
                to: View::Cart
            }
        );

        let err = navigate(&cart, &catalog, &session, View::Checkout).unwrap_err();
        assert_eq!(err.code, ErrorCode::NavigationDenied);
        assert_eq!(current_view(&session), View::Cart);

        add_to_cart(&catalog, &cart, "lavender", None).unwrap();
        let outcome = navigate(&cart, &catalog, &session, View::Checkout).unwrap();
        assert_eq!(outcome, Navigation::Moved { to: View::Checkout });
    }

    #[test]
    fn test_confirmation_cannot_be_reached_directly() {
        let (cart, catalog, session) = (CartState::new(), CatalogState::default(), SessionState::new());

        let err = navigate(
            &cart,
            &catalog,
            &session,
            View::OrderConfirmation {
                order_id: "ord-1001".into(),
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::NavigationDenied);
        assert_eq!(current_view(&session), View::Home);
    }

    #[test]
    fn test_admin_and_back() {
        let (cart, catalog, session) = (CartState::new(), CatalogState::default(), SessionState::new());

        navigate(&cart, &catalog, &session, View::Shop).unwrap();
        navigate(
            &cart,
            &catalog,
            &session,
            View::Admin {
                tab: AdminTab::Orders,
            },
        )
        .unwrap();

        assert_eq!(go_back(&session), View::Shop);
        assert_eq!(go_back(&session), View::Home);
        assert_eq!(go_back(&session), View::Home);
    }
}
