//! Cart state: a local snapshot of the server-side cart.
//!
//! Every successful mutation replaces the snapshot wholesale with the cart
//! the server returned. Concurrent mutations are deliberately not
//! serialized; when two race, the last response to arrive wins, exactly as
//! the server-authoritative model implies.
//!
//! Anonymous visitors and admins have no cart: the snapshot is forced
//! empty for them no matter what the holder is asked to do.

use std::sync::{PoisonError, RwLock};

use tokio::sync::watch;

use orchard_core::{Cart, ProductId, User};

use crate::api::ApiClient;
use crate::error::ApiError;
use crate::notify::{Notice, SharedNotifier};

// =============================================================================
// Provider trait
// =============================================================================

/// The slice of the HTTP API the cart holder needs.
#[allow(async_fn_in_trait)]
pub trait CartApi: Send + Sync {
    async fn cart(&self) -> Result<Cart, ApiError>;
    async fn add_to_cart(&self, product_id: &ProductId, quantity: u32) -> Result<Cart, ApiError>;
    async fn update_cart_item(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<Cart, ApiError>;
    async fn remove_from_cart(&self, product_id: &ProductId) -> Result<Cart, ApiError>;
    async fn clear_cart(&self) -> Result<(), ApiError>;
}

impl CartApi for ApiClient {
    async fn cart(&self) -> Result<Cart, ApiError> {
        Self::cart(self).await
    }

    async fn add_to_cart(&self, product_id: &ProductId, quantity: u32) -> Result<Cart, ApiError> {
        Self::add_to_cart(self, product_id, quantity).await
    }

    async fn update_cart_item(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<Cart, ApiError> {
        Self::update_cart_item(self, product_id, quantity).await
    }

    async fn remove_from_cart(&self, product_id: &ProductId) -> Result<Cart, ApiError> {
        Self::remove_from_cart(self, product_id).await
    }

    async fn clear_cart(&self) -> Result<(), ApiError> {
        Self::clear_cart(self).await
    }
}

// =============================================================================
// CartState
// =============================================================================

/// Local view of the server-side cart, tied to a session's identity.
pub struct CartState<A = ApiClient> {
    api: A,
    notifier: SharedNotifier,
    identity: watch::Receiver<Option<User>>,
    snapshot: RwLock<Option<Cart>>,
}

impl<A: CartApi> CartState<A> {
    /// Create a cart holder following the given identity channel
    /// (obtained from [`crate::Session::subscribe`]).
    pub fn new(api: A, notifier: SharedNotifier, identity: watch::Receiver<Option<User>>) -> Self {
        Self {
            api,
            notifier,
            identity,
            snapshot: RwLock::new(None),
        }
    }

    /// The current snapshot, if the last refresh produced one.
    #[must_use]
    pub fn snapshot(&self) -> Option<Cart> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Total item quantity across all lines. Zero with no snapshot.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.snapshot().map_or(0, |cart| cart.item_count())
    }

    fn replace(&self, cart: Option<Cart>) {
        *self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner) = cart;
    }

    /// Whether the current identity can hold a cart at all.
    fn has_cart_identity(&self) -> bool {
        self.identity
            .borrow()
            .as_ref()
            .is_some_and(|user| !user.is_admin())
    }

    fn is_anonymous(&self) -> bool {
        self.identity.borrow().is_none()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Operations
    // ─────────────────────────────────────────────────────────────────────

    /// Re-fetch the cart for the current identity.
    ///
    /// Anonymous and admin identities get a forced-empty snapshot without
    /// touching the network. A fetch error also empties the snapshot, with
    /// only a log line; a transient failure must not leave a stale cart on
    /// screen.
    pub async fn refresh(&self) {
        if !self.has_cart_identity() {
            self.replace(None);
            return;
        }

        match self.api.cart().await {
            Ok(cart) => self.replace(Some(cart)),
            Err(error) => {
                tracing::warn!(%error, "cart refresh failed");
                self.replace(None);
            }
        }
    }

    /// Add a product to the cart.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotAuthenticated`] without a network call when
    /// nobody is logged in, or the API error when the server rejects the
    /// add. Either way the failure is also reported as a [`Notice`].
    pub async fn add(&self, product_id: &ProductId, quantity: u32) -> Result<(), ApiError> {
        if self.is_anonymous() {
            let error = ApiError::NotAuthenticated;
            self.notifier
                .notify(Notice::error("Error", error.to_string()));
            return Err(error);
        }

        match self.api.add_to_cart(product_id, quantity).await {
            Ok(cart) => {
                self.replace(Some(cart));
                self.notifier.notify(Notice::info(
                    "Added to cart",
                    "Item has been added to your cart",
                ));
                Ok(())
            }
            Err(error) => {
                self.notifier
                    .notify(Notice::error("Error", error.to_string()));
                Err(error)
            }
        }
    }

    /// Set the quantity of a cart line.
    ///
    /// # Errors
    ///
    /// Returns the API error when the server rejects the change; no
    /// success notice, quantity steps are too frequent to toast.
    pub async fn update_item(&self, product_id: &ProductId, quantity: u32) -> Result<(), ApiError> {
        match self.api.update_cart_item(product_id, quantity).await {
            Ok(cart) => {
                self.replace(Some(cart));
                Ok(())
            }
            Err(error) => {
                self.notifier
                    .notify(Notice::error("Error", error.to_string()));
                Err(error)
            }
        }
    }

    /// Remove a line from the cart.
    ///
    /// # Errors
    ///
    /// Returns the API error when the server rejects the removal.
    pub async fn remove(&self, product_id: &ProductId) -> Result<(), ApiError> {
        match self.api.remove_from_cart(product_id).await {
            Ok(cart) => {
                self.replace(Some(cart));
                self.notifier
                    .notify(Notice::info("Success", "Item removed from cart"));
                Ok(())
            }
            Err(error) => {
                self.notifier
                    .notify(Notice::error("Error", error.to_string()));
                Err(error)
            }
        }
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns the API error when the request fails.
    pub async fn clear(&self) -> Result<(), ApiError> {
        match self.api.clear_cart().await {
            Ok(()) => {
                self.replace(None);
                self.notifier
                    .notify(Notice::info("Success", "Cart cleared successfully"));
                Ok(())
            }
            Err(error) => {
                self.notifier
                    .notify(Notice::error("Error", error.to_string()));
                Err(error)
            }
        }
    }

    /// Follow identity changes, re-fetching the cart after each one.
    ///
    /// Runs until the session side of the channel is dropped. Spawn it
    /// alongside the UI loop; one initial refresh happens immediately.
    pub async fn sync_with_session(&self) {
        let mut identity = self.identity.clone();
        loop {
            self.refresh().await;
            if identity.changed().await.is_err() {
                return;
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use reqwest::StatusCode;
    use rust_decimal::Decimal;

    use orchard_core::{CartId, CartItem, Product, Role, UserId};

    use super::*;
    use crate::notify::NoticeLog;

    fn user(role: Role) -> User {
        User {
            id: UserId::new("u1"),
            username: "farida".to_owned(),
            email: "farida@example.com".to_owned(),
            role,
            created_at: None,
        }
    }

    fn product(id: &str, price: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("product {id}"),
            description: String::new(),
            price: Decimal::from(price),
            image: String::new(),
            category: "Kitchen".to_owned(),
            stock: 10,
            featured: false,
            created_at: None,
            updated_at: None,
        }
    }

    fn cart_with(lines: &[(&str, u32, u32)]) -> Cart {
        let items: Vec<CartItem> = lines
            .iter()
            .map(|&(id, price, quantity)| CartItem {
                product: product(id, price),
                quantity,
                price: Decimal::from(price),
            })
            .collect();
        let total = items.iter().map(CartItem::line_total).sum();
        Cart {
            id: CartId::new("cart1"),
            user: UserId::new("u1"),
            items,
            total,
            created_at: None,
            updated_at: None,
        }
    }

    /// In-memory stand-in for the cart endpoints.
    struct FakeCart {
        server_cart: Mutex<Cart>,
        fail_next: Mutex<bool>,
        fetches: Mutex<u32>,
    }

    impl FakeCart {
        fn empty() -> Self {
            Self::with_cart(cart_with(&[]))
        }

        fn with_cart(cart: Cart) -> Self {
            Self {
                server_cart: Mutex::new(cart),
                fail_next: Mutex::new(false),
                fetches: Mutex::new(0),
            }
        }

        fn fail_next(&self) {
            *self.fail_next.lock().unwrap() = true;
        }

        fn fetch_count(&self) -> u32 {
            *self.fetches.lock().unwrap()
        }

        fn check_failure(&self) -> Result<(), ApiError> {
            if std::mem::take(&mut *self.fail_next.lock().unwrap()) {
                Err(ApiError::Api {
                    status: StatusCode::BAD_REQUEST,
                    message: "Not enough stock".to_owned(),
                })
            } else {
                Ok(())
            }
        }
    }

    impl CartApi for &FakeCart {
        async fn cart(&self) -> Result<Cart, ApiError> {
            *self.fetches.lock().unwrap() += 1;
            self.check_failure()?;
            Ok(self.server_cart.lock().unwrap().clone())
        }

        async fn add_to_cart(
            &self,
            product_id: &ProductId,
            quantity: u32,
        ) -> Result<Cart, ApiError> {
            self.check_failure()?;
            let mut cart = self.server_cart.lock().unwrap();
            cart.items.push(CartItem {
                product: product(product_id.as_str(), 10),
                quantity,
                price: Decimal::from(10u32),
            });
            cart.total = cart.items.iter().map(CartItem::line_total).sum();
            Ok(cart.clone())
        }

        async fn update_cart_item(
            &self,
            product_id: &ProductId,
            quantity: u32,
        ) -> Result<Cart, ApiError> {
            self.check_failure()?;
            let mut cart = self.server_cart.lock().unwrap();
            for item in &mut cart.items {
                if item.product.id == *product_id {
                    item.quantity = quantity;
                }
            }
            cart.total = cart.items.iter().map(CartItem::line_total).sum();
            Ok(cart.clone())
        }

        async fn remove_from_cart(&self, product_id: &ProductId) -> Result<Cart, ApiError> {
            self.check_failure()?;
            let mut cart = self.server_cart.lock().unwrap();
            cart.items.retain(|item| item.product.id != *product_id);
            cart.total = cart.items.iter().map(CartItem::line_total).sum();
            Ok(cart.clone())
        }

        async fn clear_cart(&self) -> Result<(), ApiError> {
            self.check_failure()?;
            self.server_cart.lock().unwrap().items.clear();
            Ok(())
        }
    }

    fn identity_channel(user: Option<User>) -> watch::Sender<Option<User>> {
        let (sender, _) = watch::channel(user);
        sender
    }

    #[tokio::test]
    async fn test_refresh_fills_snapshot_for_buyer() {
        let api = FakeCart::with_cart(cart_with(&[("p1", 10, 2), ("p2", 5, 1)]));
        let identity = identity_channel(Some(user(Role::Buyer)));
        let cart = CartState::new(&api, NoticeLog::new(), identity.subscribe());

        cart.refresh().await;
        assert_eq!(cart.count(), 3);
        assert_eq!(cart.snapshot().unwrap().items.len(), 2);
    }

    #[tokio::test]
    async fn test_refresh_forces_empty_for_anonymous_and_admin() {
        let api = FakeCart::with_cart(cart_with(&[("p1", 10, 2)]));

        let anonymous = identity_channel(None);
        let cart = CartState::new(&api, NoticeLog::new(), anonymous.subscribe());
        cart.refresh().await;
        assert_eq!(cart.count(), 0);

        let admin = identity_channel(Some(user(Role::Admin)));
        let cart = CartState::new(&api, NoticeLog::new(), admin.subscribe());
        cart.refresh().await;
        assert!(cart.snapshot().is_none());

        // Neither identity reached the network.
        assert_eq!(api.fetch_count(), 0);
    }

    #[tokio::test]
    async fn test_refresh_error_empties_snapshot_without_notice() {
        let api = FakeCart::with_cart(cart_with(&[("p1", 10, 2)]));
        let identity = identity_channel(Some(user(Role::Buyer)));
        let log = NoticeLog::new();
        let cart = CartState::new(&api, log.clone(), identity.subscribe());

        cart.refresh().await;
        assert_eq!(cart.count(), 2);

        api.fail_next();
        cart.refresh().await;
        assert_eq!(cart.count(), 0);
        assert!(log.recorded().is_empty());
    }

    #[tokio::test]
    async fn test_add_requires_identity() {
        let api = FakeCart::empty();
        let identity = identity_channel(None);
        let log = NoticeLog::new();
        let cart = CartState::new(&api, log.clone(), identity.subscribe());

        let result = cart.add(&ProductId::new("p1"), 1).await;
        assert!(matches!(result, Err(ApiError::NotAuthenticated)));
        assert_eq!(
            log.recorded()[0].body,
            "Please login to add items to cart"
        );
    }

    #[tokio::test]
    async fn test_add_replaces_snapshot_and_notifies() {
        let api = FakeCart::empty();
        let identity = identity_channel(Some(user(Role::Buyer)));
        let log = NoticeLog::new();
        let cart = CartState::new(&api, log.clone(), identity.subscribe());

        cart.add(&ProductId::new("p1"), 2).await.unwrap();
        assert_eq!(cart.count(), 2);
        assert!(log.contains_title("Added to cart"));
    }

    #[tokio::test]
    async fn test_add_failure_notifies_and_keeps_snapshot() {
        let api = FakeCart::with_cart(cart_with(&[("p1", 10, 1)]));
        let identity = identity_channel(Some(user(Role::Buyer)));
        let log = NoticeLog::new();
        let cart = CartState::new(&api, log.clone(), identity.subscribe());
        cart.refresh().await;

        api.fail_next();
        assert!(cart.add(&ProductId::new("p2"), 99).await.is_err());

        // The pre-failure snapshot stays; the error surfaces as a notice.
        assert_eq!(cart.count(), 1);
        assert_eq!(log.recorded()[0].body, "Not enough stock");
    }

    #[tokio::test]
    async fn test_update_and_remove_follow_server_snapshot() {
        let api = FakeCart::with_cart(cart_with(&[("p1", 10, 1), ("p2", 5, 1)]));
        let identity = identity_channel(Some(user(Role::Buyer)));
        let log = NoticeLog::new();
        let cart = CartState::new(&api, log.clone(), identity.subscribe());
        cart.refresh().await;

        cart.update_item(&ProductId::new("p1"), 4).await.unwrap();
        assert_eq!(cart.count(), 5);

        cart.remove(&ProductId::new("p2")).await.unwrap();
        assert_eq!(cart.count(), 4);
        assert!(log.contains_title("Success"));
    }

    #[tokio::test]
    async fn test_clear_resets_snapshot() {
        let api = FakeCart::with_cart(cart_with(&[("p1", 10, 3)]));
        let identity = identity_channel(Some(user(Role::Buyer)));
        let log = NoticeLog::new();
        let cart = CartState::new(&api, log.clone(), identity.subscribe());
        cart.refresh().await;

        cart.clear().await.unwrap();
        assert!(cart.snapshot().is_none());
        assert_eq!(cart.count(), 0);
        assert!(log.contains_title("Success"));
    }

    #[tokio::test]
    async fn test_sync_refreshes_on_identity_change() {
        let api = FakeCart::with_cart(cart_with(&[("p1", 10, 2)]));
        let identity = identity_channel(None);
        let cart = CartState::new(&api, NoticeLog::new(), identity.subscribe());

        let logout_then_login = async {
            identity.send_replace(Some(user(Role::Buyer)));
            // Give the sync loop a chance to observe the change.
            tokio::task::yield_now().await;
            drop(identity);
        };
        tokio::join!(cart.sync_with_session(), logout_then_login);

        assert_eq!(cart.count(), 2);
    }
}
