//! Checkout, fulfilment, seller notifications and analytics

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use tracing::{info, warn};

use crate::domain::events::{CartEvent, OrderEvent, StorefrontEvent};
use crate::domain::ids::OrderId;
use crate::domain::money::Money;
use crate::domain::order::{BuyerInfo, Order, OrderStatus, TRACKING_PREFIX};
use crate::error::OrderError;
use crate::storage::{self, keys, write_json};

use super::Storefront;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimePeriod {
    Last7Days,
    Last30Days,
    AllTime,
}

impl TimePeriod {
    fn cutoff(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            TimePeriod::Last7Days => Some(now - Duration::days(7)),
            TimePeriod::Last30Days => Some(now - Duration::days(30)),
            TimePeriod::AllTime => None,
        }
    }
}

/// Dashboard figures over the signed-in seller's slice of the order book.
/// Sales figures honor the period; review figures always cover all time.
#[derive(Clone, Debug, PartialEq)]
pub struct SellerStats {
    pub total_sales: Money,
    pub units_sold: u32,
    pub average_rating: f64,
    pub review_count: usize,
    pub sales_by_day: Vec<(NaiveDate, Money)>,
}

impl Storefront {
    /// Turns the cart into an order: the order book is written first, then
    /// every non-system seller involved gets the order id queued on their
    /// notification list, then the cart empties. A failed order-book write
    /// abandons the whole checkout; a failed notification write only logs,
    /// because the order already stands.
    pub fn place_order(&mut self, buyer_info: BuyerInfo) -> Result<Order, OrderError> {
        if self.cart.is_empty() {
            return Err(OrderError::EmptyCart);
        }
        let id = OrderId::new(self.ids.next(TRACKING_PREFIX));
        let order = Order::place(
            id,
            buyer_info,
            self.cart.items().to_vec(),
            self.buyer.as_ref().map(|b| b.id.clone()),
        );

        let mut updated = self.orders.clone();
        updated.push(order.clone());
        write_json(self.durable(), keys::ORDERS, &updated)?;
        self.orders = updated;

        for seller_id in order.distinct_seller_ids() {
            if seller_id.is_system() {
                continue;
            }
            let key = keys::unseen_orders(seller_id.as_str());
            let mut unseen: Vec<OrderId> = storage::read_or_default(self.durable(), &key);
            if !unseen.contains(order.id()) {
                unseen.push(order.id().clone());
            }
            if let Err(err) = write_json(self.durable(), &key, &unseen) {
                warn!(seller = %seller_id, error = %err, "seller notification not stored");
                continue;
            }
            if self.seller.as_ref().map(|s| &s.id) == Some(&seller_id) {
                self.unseen_orders = unseen;
            }
        }

        self.cart.clear();
        info!(order = %order.id(), total = %order.total(), "order placed");
        self.push_event(StorefrontEvent::Cart(CartEvent::Cleared));
        self.push_event(StorefrontEvent::Order(OrderEvent::Placed {
            order_id: order.id().clone(),
            total: order.total(),
        }));
        Ok(order)
    }

    /// Moves an order forward through fulfilment. Backward and repeated
    /// moves are rejected before anything is written.
    pub fn update_order_status(
        &mut self,
        order_id: &OrderId,
        status: OrderStatus,
    ) -> Result<(), OrderError> {
        let index = self
            .orders
            .iter()
            .position(|o| o.id() == order_id)
            .ok_or_else(|| OrderError::NotFound(order_id.clone()))?;
        let mut updated = self.orders.clone();
        updated[index].set_status(status)?;
        write_json(self.durable(), keys::ORDERS, &updated)?;
        self.orders = updated;
        self.push_event(StorefrontEvent::Order(OrderEvent::StatusChanged {
            order_id: order_id.clone(),
            status,
        }));
        Ok(())
    }

    /// Clears the signed-in seller's notification queue. Without a seller,
    /// or with nothing queued, this does nothing.
    pub fn mark_orders_seen(&mut self) -> Result<(), OrderError> {
        let Some(seller) = &self.seller else {
            return Ok(());
        };
        if self.unseen_orders.is_empty() {
            return Ok(());
        }
        let seller_id = seller.id.clone();
        self.durable()
            .remove(&keys::unseen_orders(seller_id.as_str()))?;
        self.unseen_orders.clear();
        self.push_event(StorefrontEvent::Order(OrderEvent::MarkedSeen { seller_id }));
        Ok(())
    }

    /// The signed-in seller's slice of the order book: each order narrowed
    /// to their lines and repriced over just those lines, newest first.
    pub fn seller_orders(&self) -> Vec<Order> {
        let Some(seller) = &self.seller else {
            return Vec::new();
        };
        let mut orders: Vec<Order> = self
            .orders
            .iter()
            .filter_map(|order| order.for_seller(&seller.id))
            .collect();
        orders.sort_by_key(|order| std::cmp::Reverse(order.date()));
        orders
    }

    /// Orders the signed-in buyer placed while signed in, newest first.
    pub fn buyer_orders(&self) -> Vec<&Order> {
        let Some(buyer) = &self.buyer else {
            return Vec::new();
        };
        let mut orders: Vec<&Order> = self
            .orders
            .iter()
            .filter(|order| order.buyer_id() == Some(&buyer.id))
            .collect();
        orders.sort_by_key(|order| std::cmp::Reverse(order.date()));
        orders
    }

    /// Public tracking lookup. The code must carry the tracking prefix;
    /// both the prefix check and the id match ignore case.
    pub fn track_order(&self, code: &str) -> Result<&Order, OrderError> {
        let code = code.trim();
        let prefix = format!("{TRACKING_PREFIX}-");
        if !code.to_uppercase().starts_with(&prefix) {
            return Err(OrderError::InvalidTrackingCode);
        }
        self.orders
            .iter()
            .find(|order| order.id().as_str().eq_ignore_ascii_case(code))
            .ok_or_else(|| OrderError::NotFound(OrderId::new(code)))
    }

    pub fn seller_analytics(&self, period: TimePeriod) -> SellerStats {
        let seller_products = match &self.seller {
            Some(seller) => self.seller_products(&seller.id),
            None => Vec::new(),
        };
        let orders = self.seller_orders();
        let cutoff = period.cutoff(Utc::now());
        let in_window: Vec<&Order> = orders
            .iter()
            .filter(|order| cutoff.map_or(true, |c| order.date() >= c))
            .collect();

        let total_sales = in_window
            .iter()
            .fold(Money::zero(), |sum, order| sum + order.total());
        let units_sold = in_window.iter().map(|order| order.units()).sum();

        let ratings: Vec<u8> = seller_products
            .iter()
            .flat_map(|p| p.reviews.iter().map(|r| r.rating))
            .collect();
        let review_count = ratings.len();
        let average_rating = if review_count == 0 {
            0.0
        } else {
            ratings.iter().map(|r| f64::from(*r)).sum::<f64>() / review_count as f64
        };

        let mut by_day: BTreeMap<NaiveDate, Money> = BTreeMap::new();
        for order in &in_window {
            let day = order.date().date_naive();
            let entry = by_day.entry(day).or_insert_with(Money::zero);
            *entry = *entry + order.total();
        }

        SellerStats {
            total_sales,
            units_sold,
            average_rating,
            review_count,
            sales_by_day: by_day.into_iter().collect(),
        }
    }
}
