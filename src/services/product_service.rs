use serde_json::Value;
use uuid::Uuid;

use crate::{
    client::ApiClient,
    error::ApiResult,
    models::{Brand, Product},
    params::ListingQuery,
};

/// Raw listing body; the shape varies, so the listing controller normalizes
/// it rather than decoding here.
pub async fn list_products(client: &ApiClient, query: &ListingQuery) -> ApiResult<Value> {
    client.get_raw("products", &query.to_query()).await
}

pub async fn get_product(client: &ApiClient, id: Uuid) -> ApiResult<Product> {
    client.get(&format!("products/{id}")).await
}

pub async fn list_brands(client: &ApiClient) -> ApiResult<Vec<Brand>> {
    client.get("brands").await
}
