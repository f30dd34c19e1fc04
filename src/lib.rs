//! Salone Market Storefront Engine
//!
//! Embeddable state engine for a Sierra Leonean gadget marketplace.
//! The whole storefront lives client side: one [`Storefront`] mirrors
//! the catalog, cart, orders and signed-in identities in memory and
//! persists them through a pluggable key-value store.
//!
//! ## Features
//! - Product catalog with search, category, price and rating filters
//! - Cart lines keyed by product, options, subscription and negotiated price
//! - Order placement with per-seller notification fan-out and tracking
//! - Seller and buyer accounts, loyalty tiers and shopping quests
//! - Seller analytics over configurable time periods
//! - Offline-safe AI assistant facade for conversational shopping
//!
//! Durable writes always happen before the in-memory mirror moves, so a
//! failed write leaves the engine on its last consistent state.

pub mod ai;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod storage;

pub use ai::{OfflineAssistant, ShoppingAssistant};
pub use app::{Command, Storefront};
pub use config::StoreConfig;
pub use error::{Result, StorefrontError};
