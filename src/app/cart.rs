//! Cart operations

use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::cart::Subscription;
use crate::domain::events::{CartEvent, StorefrontEvent};
use crate::domain::ids::{LineId, ProductId};
use crate::domain::money::Money;
use crate::error::CatalogError;

use super::Storefront;

impl Storefront {
    /// Snapshots the catalog product into the cart. Lines with the same
    /// product, options, subscription and negotiated price merge.
    pub fn add_to_cart(
        &mut self,
        product_id: ProductId,
        quantity: u32,
        variant: BTreeMap<String, String>,
        subscription: Option<Subscription>,
        negotiated_price: Option<Money>,
    ) -> Result<LineId, CatalogError> {
        let product = self
            .product(product_id)
            .cloned()
            .ok_or(CatalogError::ProductNotFound(product_id))?;
        let line_id = self
            .cart
            .add(&product, quantity, variant, subscription, negotiated_price);
        debug!(line = %line_id, quantity, "cart line added");
        self.push_event(StorefrontEvent::Cart(CartEvent::LineAdded {
            line_id: line_id.clone(),
        }));
        Ok(line_id)
    }

    /// Removing a line that is not there is a quiet no-op.
    pub fn remove_from_cart(&mut self, line_id: &LineId) {
        let before = self.cart.line_count();
        self.cart.remove(line_id);
        if self.cart.line_count() != before {
            self.push_event(StorefrontEvent::Cart(CartEvent::LineRemoved {
                line_id: line_id.clone(),
            }));
        }
    }

    /// Zero removes the line, anything else replaces its quantity.
    pub fn update_cart_quantity(&mut self, line_id: &LineId, quantity: u32) {
        if quantity == 0 {
            self.remove_from_cart(line_id);
            return;
        }
        if self.cart.find(line_id).is_none() {
            return;
        }
        self.cart.set_quantity(line_id, quantity);
        self.push_event(StorefrontEvent::Cart(CartEvent::QuantityChanged {
            line_id: line_id.clone(),
            quantity,
        }));
    }

    pub fn clear_cart(&mut self) {
        if self.cart.is_empty() {
            return;
        }
        self.cart.clear();
        self.push_event(StorefrontEvent::Cart(CartEvent::Cleared));
    }

    pub fn cart_total(&self) -> Money {
        self.cart.total()
    }
}
