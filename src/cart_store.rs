use std::sync::Arc;

use tokio::sync::{RwLock, broadcast};
use uuid::Uuid;

use crate::{
    client::ApiClient,
    dto::cart::{AddToCartRequest, ApplyCouponRequest, ApplyShippingRequest, UpdateCartItemRequest},
    error::{ApiError, ApiResult},
    models::Cart,
    services::cart_service,
};

/// Process-wide notification channel for cart snapshots. Widgets that do not
/// share an ancestor publish here, and every subscriber receives the whole
/// replacement snapshot.
#[derive(Debug, Clone)]
pub struct CartBus {
    tx: broadcast::Sender<Cart>,
}

impl CartBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(16);
        Self { tx }
    }

    pub fn publish(&self, cart: Cart) {
        // No subscribers is fine; the store may not be mounted yet.
        let _ = self.tx.send(cart);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Cart> {
        self.tx.subscribe()
    }
}

impl Default for CartBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Single source of truth for the active cart. Every mutation goes to the
/// backend first and the acknowledged cart replaces the stored one whole;
/// nothing is merged or recomputed client-side. Externally published carts
/// on the bus are adopted the same way.
#[derive(Debug)]
pub struct CartStore {
    client: ApiClient,
    bus: CartBus,
    current: Arc<RwLock<Option<Cart>>>,
}

impl CartStore {
    pub fn new(client: ApiClient, bus: CartBus) -> Arc<Self> {
        let store = Arc::new(Self {
            client,
            bus,
            current: Arc::new(RwLock::new(None)),
        });

        let mut rx = store.bus.subscribe();
        let weak = Arc::downgrade(&store);
        tokio::spawn(async move {
            loop {
                let cart = match rx.recv().await {
                    Ok(cart) => cart,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        // Snapshots are whole replacements; only the newest
                        // one matters.
                        tracing::debug!(skipped, "cart bus lagged");
                        continue;
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                };
                let Some(store) = weak.upgrade() else { break };
                *store.current.write().await = Some(cart);
            }
        });

        store
    }

    /// Current snapshot; `None` before the first load or when signed out.
    pub async fn get(&self) -> Option<Cart> {
        self.current.read().await.clone()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Cart> {
        self.bus.subscribe()
    }

    /// One fetch of the current cart on startup. Failure means "no cart
    /// yet", never an error.
    pub async fn init(&self) {
        match cart_service::fetch_cart(&self.client).await {
            Ok(cart) => self.replace(cart).await,
            Err(err) => tracing::debug!(error = %err, "no cart to restore"),
        }
    }

    pub async fn add_item(&self, product_id: Uuid, quantity: i32) -> ApiResult<Cart> {
        self.client.require_token().await?;
        if quantity < 1 {
            return Err(ApiError::Validation("quantity must be at least 1".into()));
        }
        let cart = cart_service::add_item(
            &self.client,
            &AddToCartRequest {
                product_id,
                quantity,
            },
        )
        .await?;
        self.replace(cart.clone()).await;
        Ok(cart)
    }

    pub async fn update_item(&self, item_id: Uuid, quantity: i32) -> ApiResult<Cart> {
        self.client.require_token().await?;
        if quantity < 1 {
            return Err(ApiError::Validation("quantity must be at least 1".into()));
        }
        let cart =
            cart_service::update_item(&self.client, item_id, &UpdateCartItemRequest { quantity })
                .await?;
        self.replace(cart.clone()).await;
        Ok(cart)
    }

    pub async fn remove_item(&self, item_id: Uuid) -> ApiResult<Cart> {
        self.client.require_token().await?;
        let cart = cart_service::remove_item(&self.client, item_id).await?;
        self.replace(cart.clone()).await;
        Ok(cart)
    }

    pub async fn apply_coupon(&self, code: &str) -> ApiResult<Cart> {
        self.client.require_token().await?;
        let code = code.trim();
        if code.is_empty() {
            return Err(ApiError::Validation("coupon code is required".into()));
        }
        let cart = cart_service::apply_coupon(
            &self.client,
            &ApplyCouponRequest {
                code: code.to_owned(),
            },
        )
        .await?;
        self.replace(cart.clone()).await;
        Ok(cart)
    }

    pub async fn remove_coupon(&self) -> ApiResult<Cart> {
        self.client.require_token().await?;
        let cart = cart_service::remove_coupon(&self.client).await?;
        self.replace(cart.clone()).await;
        Ok(cart)
    }

    pub async fn apply_shipping(&self, shipping_method_id: Uuid) -> ApiResult<Cart> {
        self.client.require_token().await?;
        let cart = cart_service::apply_shipping(
            &self.client,
            &ApplyShippingRequest { shipping_method_id },
        )
        .await?;
        self.replace(cart.clone()).await;
        Ok(cart)
    }

    pub async fn clear(&self) -> ApiResult<Cart> {
        self.client.require_token().await?;
        let cart = cart_service::clear(&self.client).await?;
        self.replace(cart.clone()).await;
        Ok(cart)
    }

    async fn replace(&self, cart: Cart) {
        *self.current.write().await = Some(cart.clone());
        self.bus.publish(cart);
    }
}
