use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserStatusRequest {
    pub active: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserRoleRequest {
    pub role: String,
}

impl UpdateUserRoleRequest {
    pub fn validate(&self) -> ApiResult<()> {
        if self.role.trim().is_empty() {
            return Err(ApiError::Validation("role is required".into()));
        }
        Ok(())
    }
}
