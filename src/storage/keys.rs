//! Fixed storage key table.
//!
//! Durable-scope keys hold whole collections as JSON arrays; the two
//! session-scope keys hold bare account ids used to restore identity on
//! reload without persisting credentials.

pub const PRODUCTS: &str = "market_products";
pub const SELLERS: &str = "market_sellers";
pub const BUYERS: &str = "market_buyers";
pub const ORDERS: &str = "market_orders";
pub const THEME: &str = "market_theme";

pub const ACTIVE_SELLER: &str = "active_seller_id";
pub const ACTIVE_BUYER: &str = "active_buyer_id";

/// Per-seller queue of order ids not yet acknowledged on the dashboard.
pub fn unseen_orders(seller_id: &str) -> String {
    format!("unseen_orders_{seller_id}")
}
