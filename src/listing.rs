use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    client::ApiClient,
    dto::products::ProductPage,
    error::ApiResult,
    models::Product,
    params::{ListingQuery, PAGE_SIZE, ProductSortBy, SortOrder},
    response::{meta_total, peel_envelope},
    services::product_service,
};

#[derive(Debug, Default)]
struct ListingState {
    query: ListingQuery,
    products: Vec<Product>,
    total: i64,
    loading: bool,
    // Query snapshot that produced the visible results; what the host UI
    // mirrors into the URL so a reload reproduces them.
    synced: Option<ListingQuery>,
}

/// Owns the search/filter/sort/page state for product browsing: one outgoing
/// query, one resulting product list. Every fetch carries a monotonically
/// increasing ticket and a response only lands if its ticket is still the
/// newest issued, so rapid filter edits cannot interleave out of order.
#[derive(Debug, Clone)]
pub struct ListingController {
    client: ApiClient,
    state: Arc<RwLock<ListingState>>,
    ticket: Arc<AtomicU64>,
}

impl ListingController {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: Arc::new(RwLock::new(ListingState::default())),
            ticket: Arc::new(AtomicU64::new(0)),
        }
    }

    pub async fn query(&self) -> ListingQuery {
        self.state.read().await.query.clone()
    }

    pub async fn products(&self) -> Vec<Product> {
        self.state.read().await.products.clone()
    }

    pub async fn total(&self) -> i64 {
        self.state.read().await.total
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn synced_query(&self) -> Option<ListingQuery> {
        self.state.read().await.synced.clone()
    }

    /// "Previous" is available on every page but the first.
    pub async fn has_prev(&self) -> bool {
        self.state.read().await.query.page() > 1
    }

    /// A short page means there is nothing further; a full page may have a
    /// successor.
    pub async fn has_next(&self) -> bool {
        self.state.read().await.products.len() as i64 == PAGE_SIZE
    }

    pub async fn set_search(&self, term: &str) {
        self.state.write().await.query.set_search(term);
        self.refresh().await;
    }

    pub async fn set_category(&self, category: Option<Uuid>) {
        self.state.write().await.query.set_category(category);
        self.refresh().await;
    }

    pub async fn set_brand(&self, brand: Option<Uuid>) {
        self.state.write().await.query.set_brand(brand);
        self.refresh().await;
    }

    pub async fn set_sort(&self, by: ProductSortBy, order: SortOrder) {
        self.state.write().await.query.set_sort(by, order);
        self.refresh().await;
    }

    pub async fn set_page(&self, page: i64) {
        self.state.write().await.query.set_page(page);
        self.refresh().await;
    }

    pub async fn next_page(&self) {
        let page = self.state.read().await.query.page();
        self.set_page(page + 1).await;
    }

    pub async fn prev_page(&self) {
        let page = self.state.read().await.query.page();
        self.set_page(page - 1).await;
    }

    /// Issue exactly one fetch for the current state. Failures never
    /// propagate: the list clears and the error is logged.
    pub async fn refresh(&self) {
        let (ticket, query) = {
            let mut state = self.state.write().await;
            state.loading = true;
            let ticket = self.ticket.fetch_add(1, Ordering::SeqCst) + 1;
            (ticket, state.query.clone())
        };

        let outcome = match product_service::list_products(&self.client, &query).await {
            Ok(body) => normalize_listing(body),
            Err(err) => Err(err),
        };

        self.apply(ticket, query, outcome).await;
    }

    async fn apply(&self, ticket: u64, query: ListingQuery, outcome: ApiResult<ProductPage>) {
        if ticket != self.ticket.load(Ordering::SeqCst) {
            tracing::debug!(ticket, "discarding superseded listing response");
            return;
        }

        let mut state = self.state.write().await;
        state.loading = false;
        match outcome {
            Ok(page) => {
                state.products = page.products;
                state.total = page.total;
                state.synced = Some(query);
            }
            Err(err) => {
                tracing::warn!(error = %err, "listing fetch failed");
                state.products.clear();
                state.total = 0;
            }
        }
    }
}

/// Flatten the backend's listing shapes into one page. Accepted payloads:
/// `{ products: [...], total }`, `{ products: {...} }` with a single object,
/// and a bare array; `total` falls back to the envelope meta, then to the
/// item count.
pub fn normalize_listing(body: Value) -> ApiResult<ProductPage> {
    let fallback_total = meta_total(&body);
    let payload = peel_envelope(body);

    let (raw_items, explicit_total) = match payload {
        Value::Array(items) => (items, None),
        Value::Object(mut map) => {
            let total = map.get("total").and_then(Value::as_i64);
            match map.remove("products") {
                Some(Value::Array(items)) => (items, total),
                Some(Value::Null) | None => (Vec::new(), total),
                Some(single) => (vec![single], total),
            }
        }
        Value::Null => (Vec::new(), None),
        other => {
            // Scalar bodies are not a listing in any shape the backend emits.
            let _: Vec<Product> = serde_json::from_value(other)?;
            (Vec::new(), None)
        }
    };

    let products = raw_items
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<Product>, _>>()?;
    let total = explicit_total
        .or(fallback_total)
        .unwrap_or(products.len() as i64);

    Ok(ProductPage { products, total })
}
