//! Shopping cart aggregate

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ids::{LineId, ProductId, SellerId};
use super::money::Money;
use super::product::Product;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Monthly,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Monthly => "monthly",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    pub frequency: Frequency,
}

/// One cart line. Carries a full snapshot of the product as it looked when
/// added, so later catalog edits never reprice an order retroactively.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub product: Product,
    pub quantity: u32,
    pub variant: BTreeMap<String, String>,
    pub line_id: LineId,
    pub subscription: Option<Subscription>,
    pub negotiated_price: Option<Money>,
}

impl CartItem {
    pub fn unit_price(&self) -> Money {
        self.negotiated_price.unwrap_or(self.product.price)
    }

    pub fn line_total(&self) -> Money {
        self.unit_price().times(self.quantity)
    }
}

/// Derives the identity of a cart line. Two adds collapse into one line
/// exactly when every component below matches.
pub fn line_id_for(
    product_id: ProductId,
    variant: &BTreeMap<String, String>,
    subscription: Option<Subscription>,
    negotiated_price: Option<Money>,
) -> LineId {
    let variant_part = if variant.is_empty() {
        "none".to_string()
    } else {
        variant
            .iter()
            .map(|(axis, choice)| format!("{axis}={choice}"))
            .collect::<Vec<_>>()
            .join("|")
    };
    let mut id = format!("{product_id}-{variant_part}");
    if let Some(subscription) = subscription {
        id.push('-');
        id.push_str(subscription.frequency.as_str());
    }
    if let Some(price) = negotiated_price {
        id.push_str("-neg");
        id.push_str(&price.canonical());
    }
    LineId::new(id)
}

#[derive(Debug, Default)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    pub fn find(&self, line_id: &LineId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.line_id == line_id)
    }

    /// Adds a snapshot of `product` to the cart, merging into an existing
    /// line when the derived line id matches. Quantity is clamped to at
    /// least one.
    pub fn add(
        &mut self,
        product: &Product,
        quantity: u32,
        variant: BTreeMap<String, String>,
        subscription: Option<Subscription>,
        negotiated_price: Option<Money>,
    ) -> LineId {
        let quantity = quantity.max(1);
        let line_id = line_id_for(product.id, &variant, subscription, negotiated_price);
        if let Some(existing) = self.items.iter_mut().find(|item| item.line_id == line_id) {
            existing.quantity += quantity;
        } else {
            self.items.push(CartItem {
                product: product.clone(),
                quantity,
                variant,
                line_id: line_id.clone(),
                subscription,
                negotiated_price,
            });
        }
        line_id
    }

    /// Removing an unknown line is a no-op.
    pub fn remove(&mut self, line_id: &LineId) {
        self.items.retain(|item| &item.line_id != line_id);
    }

    /// Zero removes the line; any other value replaces the quantity.
    pub fn set_quantity(&mut self, line_id: &LineId, quantity: u32) {
        if quantity == 0 {
            self.remove(line_id);
        } else if let Some(item) = self.items.iter_mut().find(|item| &item.line_id == line_id) {
            item.quantity = quantity;
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Negotiated prices override the catalog price per line.
    pub fn total(&self) -> Money {
        self.items
            .iter()
            .fold(Money::zero(), |sum, item| sum + item.line_total())
    }

    /// Sellers with at least one line in the cart, first-seen order.
    pub fn distinct_seller_ids(&self) -> Vec<SellerId> {
        let mut sellers: Vec<SellerId> = Vec::new();
        for item in &self.items {
            if !sellers.contains(&item.product.seller_id) {
                sellers.push(item.product.seller_id.clone());
            }
        }
        sellers
    }
}
