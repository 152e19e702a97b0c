#![allow(dead_code)]

//! In-process stand-in for the Shrix backend: serves the real wire envelope
//! on an ephemeral port so flows run end to end without a deployed service.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    routing::{get, post, put},
};
use chrono::Utc;
use serde::Serialize;
use serde_json::{Value, json};
use uuid::Uuid;

use shrix_storefront::dto::categories::CategoryInput;
use shrix_storefront::dto::shipping::ShippingMethodInput;
use shrix_storefront::models::{
    Cart, CartItem, Category, Order, OrderItem, Product, ShippingMethod, User,
};
use shrix_storefront::response::{ApiResponse, Meta};
use shrix_storefront::status::{OrderStatus, PaymentStatus, can_cancel, is_selectable};

#[derive(Clone, Default)]
pub struct StubState(Arc<Mutex<Inner>>);

#[derive(Default)]
pub struct Inner {
    pub products: Vec<Product>,
    pub cart: Option<Cart>,
    pub orders: Vec<Order>,
    pub categories: Vec<Category>,
    pub shipping_methods: Vec<ShippingMethod>,
    pub users: Vec<User>,
}

impl StubState {
    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.0.lock().unwrap()
    }

    pub fn seed_product(&self, name: &str, price: i64, stock: i32) -> Product {
        let product = Product {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            description: None,
            price,
            stock,
            images: vec![],
            category: None,
            brand: None,
            discount: 0,
            created_at: Some(Utc::now()),
        };
        self.lock().products.push(product.clone());
        product
    }

    pub fn seed_order(&self, status: OrderStatus) -> Order {
        let order = Order {
            id: Uuid::new_v4(),
            status,
            payment_status: PaymentStatus::Pending,
            items: vec![OrderItem {
                name: "Widget".into(),
                unit_price: 1000,
                quantity: 2,
                line_total: 2000,
            }],
            subtotal: 2000,
            discount: 0,
            shipping: 300,
            total: 2300,
            invoice_number: Some("INV-20260807-0001".into()),
            created_at: Some(Utc::now()),
            updated_at: Some(Utc::now()),
        };
        self.lock().orders.push(order.clone());
        order
    }

    pub fn seed_category(&self, name: &str, parent: Option<Uuid>) -> Category {
        let category = Category {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            description: None,
            image: None,
            parent,
        };
        self.lock().categories.push(category.clone());
        category
    }

    pub fn seed_shipping_method(&self, name: &str, price: i64, active: bool) -> ShippingMethod {
        let method = ShippingMethod {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            price,
            active,
        };
        self.lock().shipping_methods.push(method.clone());
        method
    }

    pub fn seed_user(&self, email: &str, role: &str) -> User {
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_owned(),
            role: role.to_owned(),
            active: true,
        };
        self.lock().users.push(user.clone());
        user
    }
}

pub async fn spawn_stub(state: StubState) -> anyhow::Result<String> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, app).await {
            eprintln!("stub backend error: {err}");
        }
    });
    Ok(format!("http://{addr}"))
}

fn router(state: StubState) -> Router {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/{id}", get(get_product))
        .route("/brands", get(list_brands))
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
        .route("/cart", get(get_cart).post(add_to_cart).delete(clear_cart))
        .route(
            "/cart/items/{id}",
            put(update_cart_item).delete(remove_cart_item),
        )
        .route("/cart/apply-coupon", post(apply_coupon))
        .route("/cart/remove-coupon", post(remove_coupon))
        .route("/cart/apply-shipping", post(apply_shipping))
        .route("/orders", get(list_all_orders))
        .route("/orders/me", get(my_orders))
        .route("/orders/{id}", get(get_order))
        .route("/admin/orders/{id}/status", put(update_order_status))
        .route("/admin/dashboard", get(dashboard))
        .route("/admin/users", get(list_users))
        .route("/admin/users/{id}/status", put(update_user_status))
        .route("/admin/users/{id}/role", put(update_user_role))
        .route(
            "/shipping-methods",
            get(list_shipping_methods).post(create_shipping_method),
        )
        .route("/shipping-methods/admin/all", get(list_all_shipping_methods))
        .route(
            "/shipping-methods/{id}",
            put(update_shipping_method).delete(delete_shipping_method),
        )
        .with_state(state)
}

type Reply = Result<Json<Value>, (StatusCode, Json<Value>)>;

fn ok(data: impl Serialize) -> Json<Value> {
    let data = serde_json::to_value(data).unwrap();
    let body = ApiResponse::success("Ok", data, None);
    Json(serde_json::to_value(body).unwrap())
}

fn ok_paged(message: &str, data: impl Serialize, meta: Meta) -> Json<Value> {
    let data = serde_json::to_value(data).unwrap();
    let body = ApiResponse::success(message, data, Some(meta));
    Json(serde_json::to_value(body).unwrap())
}

fn reject(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "message": message })))
}

fn authed(headers: &HeaderMap) -> Result<(), (StatusCode, Json<Value>)> {
    match headers.get(header::AUTHORIZATION).and_then(|v| v.to_str().ok()) {
        Some(value) if value.starts_with("Bearer ") => Ok(()),
        _ => Err(reject(StatusCode::UNAUTHORIZED, "Authentication required")),
    }
}

fn empty_cart() -> Cart {
    Cart {
        items: vec![],
        subtotal: 0,
        discount: 0,
        shipping: 0,
        total: 0,
        coupon: None,
        shipping_method: None,
    }
}

fn recompute(cart: &mut Cart) {
    cart.subtotal = cart.items.iter().map(|i| i.line_total).sum();
    cart.total = cart.subtotal - cart.discount + cart.shipping;
}

async fn list_products(
    State(state): State<StubState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let inner = state.lock();
    let search = params.get("search").map(|s| s.to_lowercase());
    let filtered: Vec<&Product> = inner
        .products
        .iter()
        .filter(|p| {
            search
                .as_deref()
                .is_none_or(|s| p.name.to_lowercase().contains(s))
        })
        .collect();
    let page: i64 = params
        .get("page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(1)
        .max(1);
    let limit: i64 = params
        .get("limit")
        .and_then(|p| p.parse().ok())
        .unwrap_or(12);
    let total = filtered.len() as i64;
    let start = ((page - 1) * limit) as usize;
    let slice: Vec<&Product> = filtered
        .into_iter()
        .skip(start)
        .take(limit as usize)
        .collect();
    ok_paged(
        "Products",
        json!({ "products": slice, "total": total }),
        Meta::new(page, limit, total),
    )
}

async fn get_product(State(state): State<StubState>, Path(id): Path<Uuid>) -> Reply {
    let inner = state.lock();
    let product = inner
        .products
        .iter()
        .find(|p| p.id == id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Product not found"))?;
    Ok(ok(product))
}

async fn list_brands() -> Json<Value> {
    ok(Vec::<Value>::new())
}

async fn list_categories(State(state): State<StubState>) -> Json<Value> {
    ok(&state.lock().categories)
}

async fn get_category(State(state): State<StubState>, Path(id): Path<Uuid>) -> Reply {
    let inner = state.lock();
    let category = inner
        .categories
        .iter()
        .find(|c| c.id == id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Category not found"))?;
    Ok(ok(category))
}

async fn create_category(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    authed(&headers)?;
    let input: CategoryInput = serde_json::from_value(body)
        .map_err(|_| reject(StatusCode::BAD_REQUEST, "Invalid category payload"))?;
    let category = Category {
        id: Uuid::new_v4(),
        name: input.name,
        description: input.description,
        image: input.image,
        parent: input.parent,
    };
    state.lock().categories.push(category.clone());
    Ok(ok(category))
}

async fn update_category(
    State(state): State<StubState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    authed(&headers)?;
    let input: CategoryInput = serde_json::from_value(body)
        .map_err(|_| reject(StatusCode::BAD_REQUEST, "Invalid category payload"))?;
    let mut inner = state.lock();
    let category = inner
        .categories
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Category not found"))?;
    category.name = input.name;
    category.description = input.description;
    category.image = input.image;
    category.parent = input.parent;
    Ok(ok(category.clone()))
}

async fn delete_category(
    State(state): State<StubState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Reply {
    authed(&headers)?;
    state.lock().categories.retain(|c| c.id != id);
    Ok(ok(Value::Null))
}

async fn get_cart(State(state): State<StubState>, headers: HeaderMap) -> Reply {
    authed(&headers)?;
    let inner = state.lock();
    match &inner.cart {
        Some(cart) => Ok(ok(cart)),
        None => Err(reject(StatusCode::NOT_FOUND, "No cart")),
    }
}

async fn add_to_cart(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    authed(&headers)?;
    let product_id: Uuid =
        serde_json::from_value(body.get("productId").cloned().unwrap_or(Value::Null))
            .map_err(|_| reject(StatusCode::BAD_REQUEST, "productId is required"))?;
    let quantity = body.get("quantity").and_then(Value::as_i64).unwrap_or(0) as i32;
    if quantity < 1 {
        return Err(reject(StatusCode::BAD_REQUEST, "quantity must be at least 1"));
    }

    let mut inner = state.lock();
    let product = inner
        .products
        .iter()
        .find(|p| p.id == product_id)
        .cloned()
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Product not found"))?;
    if product.stock < quantity {
        return Err(reject(StatusCode::BAD_REQUEST, "Insufficient stock"));
    }

    let cart = inner.cart.get_or_insert_with(empty_cart);
    if let Some(item) = cart.items.iter_mut().find(|i| i.product_id == product_id) {
        item.quantity += quantity;
        item.line_total = item.unit_price * i64::from(item.quantity);
    } else {
        cart.items.push(CartItem {
            id: Uuid::new_v4(),
            product_id,
            name: product.name.clone(),
            unit_price: product.price,
            quantity,
            line_total: product.price * i64::from(quantity),
        });
    }
    recompute(cart);
    Ok(ok(cart.clone()))
}

async fn update_cart_item(
    State(state): State<StubState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    authed(&headers)?;
    let quantity = body.get("quantity").and_then(Value::as_i64).unwrap_or(0) as i32;
    if quantity < 1 {
        return Err(reject(StatusCode::BAD_REQUEST, "quantity must be at least 1"));
    }
    let mut inner = state.lock();
    let cart = inner
        .cart
        .as_mut()
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "No cart"))?;
    let item = cart
        .items
        .iter_mut()
        .find(|i| i.id == id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Cart item not found"))?;
    item.quantity = quantity;
    item.line_total = item.unit_price * i64::from(quantity);
    recompute(cart);
    Ok(ok(cart.clone()))
}

async fn remove_cart_item(
    State(state): State<StubState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Reply {
    authed(&headers)?;
    let mut inner = state.lock();
    let cart = inner
        .cart
        .as_mut()
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "No cart"))?;
    cart.items.retain(|i| i.id != id);
    recompute(cart);
    Ok(ok(cart.clone()))
}

async fn clear_cart(State(state): State<StubState>, headers: HeaderMap) -> Reply {
    authed(&headers)?;
    let mut inner = state.lock();
    let cart = empty_cart();
    inner.cart = Some(cart.clone());
    Ok(ok(cart))
}

async fn apply_coupon(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    authed(&headers)?;
    let code = body.get("code").and_then(Value::as_str).unwrap_or("");
    let mut inner = state.lock();
    let cart = inner
        .cart
        .as_mut()
        .ok_or_else(|| reject(StatusCode::BAD_REQUEST, "Cart is empty"))?;
    if code != "SAVE5" {
        return Err(reject(StatusCode::BAD_REQUEST, "Invalid coupon code"));
    }
    cart.coupon = Some(code.to_owned());
    cart.discount = 500;
    recompute(cart);
    Ok(ok(cart.clone()))
}

async fn remove_coupon(State(state): State<StubState>, headers: HeaderMap) -> Reply {
    authed(&headers)?;
    let mut inner = state.lock();
    let cart = inner
        .cart
        .as_mut()
        .ok_or_else(|| reject(StatusCode::BAD_REQUEST, "Cart is empty"))?;
    cart.coupon = None;
    cart.discount = 0;
    recompute(cart);
    Ok(ok(cart.clone()))
}

async fn apply_shipping(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    authed(&headers)?;
    let method_id: Uuid =
        serde_json::from_value(body.get("shippingMethodId").cloned().unwrap_or(Value::Null))
            .map_err(|_| reject(StatusCode::BAD_REQUEST, "shippingMethodId is required"))?;
    let mut inner = state.lock();
    let method = inner
        .shipping_methods
        .iter()
        .find(|m| m.id == method_id && m.active)
        .cloned()
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Shipping method not found"))?;
    let cart = inner
        .cart
        .as_mut()
        .ok_or_else(|| reject(StatusCode::BAD_REQUEST, "Cart is empty"))?;
    cart.shipping = method.price;
    cart.shipping_method = Some(method.id);
    recompute(cart);
    Ok(ok(cart.clone()))
}

async fn my_orders(State(state): State<StubState>, headers: HeaderMap) -> Reply {
    authed(&headers)?;
    Ok(ok(&state.lock().orders))
}

async fn list_all_orders(
    State(state): State<StubState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Reply {
    authed(&headers)?;
    let inner = state.lock();
    let status = params.get("status").cloned();
    let orders: Vec<&Order> = inner
        .orders
        .iter()
        .filter(|o| {
            status
                .as_deref()
                .is_none_or(|s| o.status.as_str() == s)
        })
        .collect();
    let total = orders.len() as i64;
    Ok(ok_paged("Ok", orders, Meta::new(1, total.max(1), total)))
}

async fn get_order(
    State(state): State<StubState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Reply {
    authed(&headers)?;
    let inner = state.lock();
    let order = inner
        .orders
        .iter()
        .find(|o| o.id == id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Order not found"))?;
    Ok(ok(order))
}

async fn update_order_status(
    State(state): State<StubState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    authed(&headers)?;
    let candidate: OrderStatus =
        serde_json::from_value(body.get("status").cloned().unwrap_or(Value::Null))
            .map_err(|_| reject(StatusCode::BAD_REQUEST, "Unknown order status"))?;

    let mut inner = state.lock();
    let order = inner
        .orders
        .iter_mut()
        .find(|o| o.id == id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Order not found"))?;

    // The backend enforces the progression no matter what the client sends.
    let legal = if candidate == OrderStatus::Cancelled {
        can_cancel(order.status)
    } else {
        is_selectable(order.status, candidate)
    };
    if !legal {
        let message = format!("Cannot transition from {} to {}", order.status, candidate);
        return Err(reject(StatusCode::BAD_REQUEST, &message));
    }

    order.status = candidate;
    order.updated_at = Some(Utc::now());
    Ok(ok(order.clone()))
}

async fn dashboard(State(state): State<StubState>, headers: HeaderMap) -> Reply {
    authed(&headers)?;
    let inner = state.lock();
    let recent: Vec<&Order> = inner.orders.iter().rev().take(5).collect();
    Ok(ok(json!({
        "totalOrders": inner.orders.len(),
        "totalRevenue": inner.orders.iter().map(|o| o.total).sum::<i64>(),
        "totalUsers": inner.users.len(),
        "totalProducts": inner.products.len(),
        "recentOrders": recent
    })))
}

async fn list_users(State(state): State<StubState>, headers: HeaderMap) -> Reply {
    authed(&headers)?;
    Ok(ok(&state.lock().users))
}

async fn update_user_status(
    State(state): State<StubState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    authed(&headers)?;
    let active = body
        .get("active")
        .and_then(Value::as_bool)
        .ok_or_else(|| reject(StatusCode::BAD_REQUEST, "active is required"))?;
    let mut inner = state.lock();
    let user = inner
        .users
        .iter_mut()
        .find(|u| u.id == id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "User not found"))?;
    user.active = active;
    Ok(ok(user.clone()))
}

async fn update_user_role(
    State(state): State<StubState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    authed(&headers)?;
    let role = body
        .get("role")
        .and_then(Value::as_str)
        .ok_or_else(|| reject(StatusCode::BAD_REQUEST, "role is required"))?;
    let mut inner = state.lock();
    let user = inner
        .users
        .iter_mut()
        .find(|u| u.id == id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "User not found"))?;
    user.role = role.to_owned();
    Ok(ok(user.clone()))
}

async fn list_shipping_methods(State(state): State<StubState>) -> Json<Value> {
    let inner = state.lock();
    let active: Vec<&ShippingMethod> = inner.shipping_methods.iter().filter(|m| m.active).collect();
    ok(active)
}

async fn list_all_shipping_methods(State(state): State<StubState>, headers: HeaderMap) -> Reply {
    authed(&headers)?;
    Ok(ok(&state.lock().shipping_methods))
}

async fn create_shipping_method(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    authed(&headers)?;
    let input: ShippingMethodInput = serde_json::from_value(body)
        .map_err(|_| reject(StatusCode::BAD_REQUEST, "Invalid shipping method payload"))?;
    let method = ShippingMethod {
        id: Uuid::new_v4(),
        name: input.name,
        price: input.price,
        active: input.active,
    };
    state.lock().shipping_methods.push(method.clone());
    Ok(ok(method))
}

async fn update_shipping_method(
    State(state): State<StubState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    authed(&headers)?;
    let input: ShippingMethodInput = serde_json::from_value(body)
        .map_err(|_| reject(StatusCode::BAD_REQUEST, "Invalid shipping method payload"))?;
    let mut inner = state.lock();
    let method = inner
        .shipping_methods
        .iter_mut()
        .find(|m| m.id == id)
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Shipping method not found"))?;
    method.name = input.name;
    method.price = input.price;
    method.active = input.active;
    Ok(ok(method.clone()))
}

async fn delete_shipping_method(
    State(state): State<StubState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Reply {
    authed(&headers)?;
    state.lock().shipping_methods.retain(|m| m.id != id);
    Ok(ok(Value::Null))
}
