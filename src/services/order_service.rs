use uuid::Uuid;

use crate::{
    client::ApiClient,
    dto::orders::{OrderListQuery, UpdateOrderStatusRequest},
    error::ApiResult,
    models::Order,
    status::OrderStatus,
};

pub async fn my_orders(client: &ApiClient) -> ApiResult<Vec<Order>> {
    client.require_token().await?;
    client.get("orders/me").await
}

pub async fn get_order(client: &ApiClient, id: Uuid) -> ApiResult<Order> {
    client.require_token().await?;
    client.get(&format!("orders/{id}")).await
}

/// Admin: all orders, filtered and paged.
pub async fn list_all_orders(client: &ApiClient, query: &OrderListQuery) -> ApiResult<Vec<Order>> {
    client.require_token().await?;
    client.get_query("orders", &query.to_query()).await
}

/// Persist a status transition. Legality is the backend's call; the client
/// sends the candidate as-is, never updates local state ahead of the
/// acknowledgement, and hands rejections back verbatim. Callers re-fetch the
/// order list afterwards to pick up server-side effects such as inventory
/// release on cancellation.
pub async fn set_order_status(
    client: &ApiClient,
    id: Uuid,
    status: OrderStatus,
) -> ApiResult<Order> {
    client.require_token().await?;
    client
        .put(
            &format!("admin/orders/{id}/status"),
            &UpdateOrderStatusRequest { status },
        )
        .await
}
