//! Storefront and admin orchestration client for the Shrix commerce backend.
//! All business logic lives behind the REST API; this crate owns the gateway
//! client, the order-status rules, the listing controller and the shared
//! cart session store a UI embeds.

pub mod cart_store;
pub mod client;
pub mod config;
pub mod dto;
pub mod error;
pub mod listing;
pub mod models;
pub mod params;
pub mod response;
pub mod services;
pub mod status;
pub mod telemetry;

pub use cart_store::{CartBus, CartStore};
pub use client::ApiClient;
pub use config::StorefrontConfig;
pub use error::{ApiError, ApiResult};
pub use listing::ListingController;
