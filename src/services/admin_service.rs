use uuid::Uuid;

use crate::{
    client::ApiClient,
    dto::admin::{UpdateUserRoleRequest, UpdateUserStatusRequest},
    error::ApiResult,
    models::{DashboardStats, User},
    params::Pagination,
};

/// Aggregate totals and recent orders for the admin landing page. Callers
/// fail soft to zeroes on error, as with the listing views.
pub async fn dashboard(client: &ApiClient) -> ApiResult<DashboardStats> {
    client.require_token().await?;
    client.get("admin/dashboard").await
}

pub async fn list_users(client: &ApiClient, pagination: Pagination) -> ApiResult<Vec<User>> {
    client.require_token().await?;
    let (page, per_page) = pagination.normalize();
    client
        .get_query(
            "admin/users",
            &[("page", page.to_string()), ("limit", per_page.to_string())],
        )
        .await
}

pub async fn set_user_status(client: &ApiClient, id: Uuid, active: bool) -> ApiResult<User> {
    client.require_token().await?;
    client
        .put(
            &format!("admin/users/{id}/status"),
            &UpdateUserStatusRequest { active },
        )
        .await
}

pub async fn set_user_role(client: &ApiClient, id: Uuid, role: &str) -> ApiResult<User> {
    client.require_token().await?;
    let payload = UpdateUserRoleRequest {
        role: role.to_owned(),
    };
    payload.validate()?;
    client
        .put(&format!("admin/users/{id}/role"), &payload)
        .await
}
