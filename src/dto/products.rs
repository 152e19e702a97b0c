use serde::{Deserialize, Serialize};

use crate::models::Product;

/// One page of listing results, after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total: i64,
}

impl ProductPage {
    pub fn empty() -> Self {
        Self {
            products: Vec::new(),
            total: 0,
        }
    }
}
