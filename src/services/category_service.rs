use std::collections::HashMap;

use uuid::Uuid;

use crate::{
    client::ApiClient,
    dto::categories::CategoryInput,
    error::{ApiError, ApiResult},
    models::Category,
};

pub async fn list_categories(client: &ApiClient) -> ApiResult<Vec<Category>> {
    client.get("categories").await
}

pub async fn get_category(client: &ApiClient, id: Uuid) -> ApiResult<Category> {
    client.get(&format!("categories/{id}")).await
}

pub async fn create_category(client: &ApiClient, input: &CategoryInput) -> ApiResult<Category> {
    client.require_token().await?;
    input.validate()?;
    if let Some(parent) = input.parent {
        let categories = list_categories(client).await?;
        ensure_known(&categories, parent)?;
    }
    client.post("categories", input).await
}

pub async fn update_category(
    client: &ApiClient,
    id: Uuid,
    input: &CategoryInput,
) -> ApiResult<Category> {
    client.require_token().await?;
    input.validate()?;
    if let Some(parent) = input.parent {
        let categories = list_categories(client).await?;
        validate_parent(&categories, id, parent)?;
    }
    client.put(&format!("categories/{id}"), input).await
}

pub async fn delete_category(client: &ApiClient, id: Uuid) -> ApiResult<()> {
    client.require_token().await?;
    client.delete(&format!("categories/{id}")).await
}

fn ensure_known(categories: &[Category], parent: Uuid) -> ApiResult<()> {
    if categories.iter().any(|c| c.id == parent) {
        Ok(())
    } else {
        Err(ApiError::Validation("unknown parent category".into()))
    }
}

/// Reject a parent assignment that would make `id` its own ancestor: walk up
/// from the proposed parent and fail if the chain reaches `id`, dangles on an
/// unknown id, or loops.
fn validate_parent(categories: &[Category], id: Uuid, parent: Uuid) -> ApiResult<()> {
    if parent == id {
        return Err(ApiError::Validation(
            "category cannot be its own parent".into(),
        ));
    }

    let by_id: HashMap<Uuid, &Category> = categories.iter().map(|c| (c.id, c)).collect();
    let mut cursor = Some(parent);
    let mut hops = 0usize;
    while let Some(current) = cursor {
        if current == id {
            return Err(ApiError::Validation(
                "category cannot be moved under one of its own subcategories".into(),
            ));
        }
        let Some(category) = by_id.get(&current) else {
            return Err(ApiError::Validation("unknown parent category".into()));
        };
        cursor = category.parent;
        hops += 1;
        if hops > categories.len() {
            return Err(ApiError::Validation(
                "category hierarchy contains a cycle".into(),
            ));
        }
    }
    Ok(())
}
