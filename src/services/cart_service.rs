use serde_json::json;
use uuid::Uuid;

use crate::{
    client::ApiClient,
    dto::cart::{AddToCartRequest, ApplyCouponRequest, ApplyShippingRequest, UpdateCartItemRequest},
    error::ApiResult,
    models::Cart,
};

// Every mutation returns the server's whole recomputed cart; the store
// adopts it verbatim.

pub async fn fetch_cart(client: &ApiClient) -> ApiResult<Cart> {
    client.require_token().await?;
    client.get("cart").await
}

pub async fn add_item(client: &ApiClient, payload: &AddToCartRequest) -> ApiResult<Cart> {
    client.post("cart", payload).await
}

pub async fn update_item(
    client: &ApiClient,
    item_id: Uuid,
    payload: &UpdateCartItemRequest,
) -> ApiResult<Cart> {
    client.put(&format!("cart/items/{item_id}"), payload).await
}

pub async fn remove_item(client: &ApiClient, item_id: Uuid) -> ApiResult<Cart> {
    client.delete(&format!("cart/items/{item_id}")).await
}

pub async fn clear(client: &ApiClient) -> ApiResult<Cart> {
    client.delete("cart").await
}

pub async fn apply_coupon(client: &ApiClient, payload: &ApplyCouponRequest) -> ApiResult<Cart> {
    client.post("cart/apply-coupon", payload).await
}

pub async fn remove_coupon(client: &ApiClient) -> ApiResult<Cart> {
    client.post("cart/remove-coupon", &json!({})).await
}

pub async fn apply_shipping(client: &ApiClient, payload: &ApplyShippingRequest) -> ApiResult<Cart> {
    client.post("cart/apply-shipping", payload).await
}
