use serde::{Deserialize, Serialize};

use crate::params::{Pagination, SortOrder};
use crate::status::OrderStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

/// Admin order-list filters.
#[derive(Debug, Clone)]
pub struct OrderListQuery {
    pub pagination: Pagination,
    pub status: Option<OrderStatus>,
    pub sort_order: Option<SortOrder>,
}

impl Default for OrderListQuery {
    fn default() -> Self {
        Self {
            pagination: Pagination {
                page: None,
                per_page: None,
            },
            status: None,
            sort_order: None,
        }
    }
}

impl OrderListQuery {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let (page, per_page) = self.pagination.normalize();
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_owned()));
        }
        if let Some(order) = self.sort_order {
            pairs.push(("sort_order", order.as_query().to_owned()));
        }
        pairs.push(("page", page.to_string()));
        pairs.push(("limit", per_page.to_string()));
        pairs
    }
}
