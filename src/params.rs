use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fixed page size for shop listing and search.
pub const PAGE_SIZE: i64 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_query(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSortBy {
    CreatedAt,
    Price,
    Name,
}

impl ProductSortBy {
    pub fn as_query(self) -> &'static str {
        match self {
            ProductSortBy::CreatedAt => "created_at",
            ProductSortBy::Price => "price",
            ProductSortBy::Name => "name",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self) -> (i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        (page, per_page)
    }
}

/// The listing state: free-text search, category/brand filters, sort key and
/// page. Changing anything but the page invalidates the page position, so
/// every filter setter snaps back to page 1.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingQuery {
    search: Option<String>,
    category: Option<Uuid>,
    brand: Option<Uuid>,
    sort_by: Option<ProductSortBy>,
    sort_order: Option<SortOrder>,
    page: i64,
}

impl Default for ListingQuery {
    fn default() -> Self {
        Self {
            search: None,
            category: None,
            brand: None,
            sort_by: None,
            sort_order: None,
            page: 1,
        }
    }
}

impl ListingQuery {
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn category(&self) -> Option<Uuid> {
        self.category
    }

    pub fn brand(&self) -> Option<Uuid> {
        self.brand
    }

    pub fn sort(&self) -> Option<(ProductSortBy, SortOrder)> {
        self.sort_by.map(|by| (by, self.sort_order.unwrap_or(SortOrder::Desc)))
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn set_search(&mut self, term: &str) {
        let term = term.trim();
        self.search = (!term.is_empty()).then(|| term.to_owned());
        self.page = 1;
    }

    pub fn set_category(&mut self, category: Option<Uuid>) {
        self.category = category;
        self.page = 1;
    }

    pub fn set_brand(&mut self, brand: Option<Uuid>) {
        self.brand = brand;
        self.page = 1;
    }

    pub fn set_sort(&mut self, by: ProductSortBy, order: SortOrder) {
        self.sort_by = Some(by);
        self.sort_order = Some(order);
        self.page = 1;
    }

    pub fn clear_sort(&mut self) {
        self.sort_by = None;
        self.sort_order = None;
        self.page = 1;
    }

    pub fn set_page(&mut self, page: i64) {
        self.page = page.max(1);
    }

    /// Outgoing query string pairs for `GET /products`.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(search) = self.search.as_deref() {
            pairs.push(("search", search.to_owned()));
        }
        if let Some(category) = self.category {
            pairs.push(("category", category.to_string()));
        }
        if let Some(brand) = self.brand {
            pairs.push(("brand", brand.to_string()));
        }
        if let Some(by) = self.sort_by {
            pairs.push(("sort", by.as_query().to_owned()));
            let order = self.sort_order.unwrap_or(SortOrder::Desc);
            pairs.push(("sort_order", order.as_query().to_owned()));
        }
        pairs.push(("page", self.page.to_string()));
        pairs.push(("limit", PAGE_SIZE.to_string()));
        pairs
    }
}
