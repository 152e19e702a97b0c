use uuid::Uuid;

use crate::{
    client::ApiClient, dto::shipping::ShippingMethodInput, error::ApiResult,
    models::ShippingMethod,
};

/// Active methods, for checkout.
pub async fn list_methods(client: &ApiClient) -> ApiResult<Vec<ShippingMethod>> {
    client.get("shipping-methods").await
}

/// Admin: every method, active or not.
pub async fn list_all_methods(client: &ApiClient) -> ApiResult<Vec<ShippingMethod>> {
    client.require_token().await?;
    client.get("shipping-methods/admin/all").await
}

pub async fn create_method(
    client: &ApiClient,
    input: &ShippingMethodInput,
) -> ApiResult<ShippingMethod> {
    client.require_token().await?;
    input.validate()?;
    client.post("shipping-methods", input).await
}

pub async fn update_method(
    client: &ApiClient,
    id: Uuid,
    input: &ShippingMethodInput,
) -> ApiResult<ShippingMethod> {
    client.require_token().await?;
    input.validate()?;
    client.put(&format!("shipping-methods/{id}"), input).await
}

pub async fn delete_method(client: &ApiClient, id: Uuid) -> ApiResult<()> {
    client.require_token().await?;
    client.delete(&format!("shipping-methods/{id}")).await
}
