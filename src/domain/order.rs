//! Orders and fulfilment status

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::cart::CartItem;
use super::ids::{BuyerId, OrderId, SellerId};
use super::money::Money;
use crate::error::OrderError;

/// Prefix carried by every public order id and expected by tracking lookups.
pub const TRACKING_PREFIX: &str = "SK";

/// Fulfilment stages in their only legal direction. A status may skip ahead
/// but never move backwards and never restate itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Shipped,
    Delivered,
    Completed,
}

impl OrderStatus {
    fn rank(&self) -> u8 {
        match self {
            OrderStatus::Pending => 0,
            OrderStatus::Shipped => 1,
            OrderStatus::Delivered => 2,
            OrderStatus::Completed => 3,
        }
    }

    pub fn can_advance_to(&self, next: OrderStatus) -> bool {
        next.rank() > self.rank()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Completed => "Completed",
        };
        write!(f, "{name}")
    }
}

/// Checkout contact details captured with the order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BuyerInfo {
    pub full_name: String,
    pub phone_number: String,
    pub delivery_address: String,
}

/// A placed order. The total is frozen at placement and never recomputed
/// from the catalog again.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    id: OrderId,
    date: DateTime<Utc>,
    buyer_info: BuyerInfo,
    items: Vec<CartItem>,
    total: Money,
    buyer_id: Option<BuyerId>,
    status: OrderStatus,
}

impl Order {
    pub fn place(
        id: OrderId,
        buyer_info: BuyerInfo,
        items: Vec<CartItem>,
        buyer_id: Option<BuyerId>,
    ) -> Self {
        let total = items
            .iter()
            .fold(Money::zero(), |sum, item| sum + item.line_total());
        Self {
            id,
            date: Utc::now(),
            buyer_info,
            items,
            total,
            buyer_id,
            status: OrderStatus::Pending,
        }
    }

    pub fn id(&self) -> &OrderId {
        &self.id
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn buyer_info(&self) -> &BuyerInfo {
        &self.buyer_info
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn buyer_id(&self) -> Option<&BuyerId> {
        self.buyer_id.as_ref()
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn units(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn set_status(&mut self, next: OrderStatus) -> Result<(), OrderError> {
        if !self.status.can_advance_to(next) {
            return Err(OrderError::InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }

    /// Sellers with at least one line in this order, first-seen order.
    pub fn distinct_seller_ids(&self) -> Vec<SellerId> {
        let mut sellers: Vec<SellerId> = Vec::new();
        for item in &self.items {
            if !sellers.contains(&item.product.seller_id) {
                sellers.push(item.product.seller_id.clone());
            }
        }
        sellers
    }

    /// Narrows the order to one seller's lines, repricing the total over
    /// just those lines. Orders with nothing for the seller yield `None`.
    pub fn for_seller(&self, seller_id: &SellerId) -> Option<Order> {
        let items: Vec<CartItem> = self
            .items
            .iter()
            .filter(|item| &item.product.seller_id == seller_id)
            .cloned()
            .collect();
        if items.is_empty() {
            return None;
        }
        let total = items
            .iter()
            .fold(Money::zero(), |sum, item| sum + item.line_total());
        Some(Order {
            id: self.id.clone(),
            date: self.date,
            buyer_info: self.buyer_info.clone(),
            items,
            total,
            buyer_id: self.buyer_id.clone(),
            status: self.status,
        })
    }
}
