use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShippingMethodInput {
    pub name: String,
    pub price: i64,
    pub active: bool,
}

impl ShippingMethodInput {
    pub fn validate(&self) -> ApiResult<()> {
        if self.name.trim().is_empty() {
            return Err(ApiError::Validation("shipping method name is required".into()));
        }
        if self.price < 0 {
            return Err(ApiError::Validation("shipping price cannot be negative".into()));
        }
        Ok(())
    }
}
