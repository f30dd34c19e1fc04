//! Domain events
use super::ids::{BuyerId, LineId, OrderId, ProductId, SellerId};
use super::money::Money;
use super::order::OrderStatus;
use super::session::{Theme, View};

/// Everything observable that happened since the last drain. The embedding
/// UI reads these instead of diffing state.
#[derive(Clone, Debug)]
pub enum StorefrontEvent {
    Product(ProductEvent),
    Cart(CartEvent),
    Order(OrderEvent),
    Account(AccountEvent),
    Session(SessionEvent),
}

#[derive(Clone, Debug)]
pub enum ProductEvent {
    Added { product_id: ProductId },
    Updated { product_id: ProductId },
    ReviewRecorded { product_id: ProductId, rating: u8 },
}

#[derive(Clone, Debug)]
pub enum CartEvent {
    LineAdded { line_id: LineId },
    LineRemoved { line_id: LineId },
    QuantityChanged { line_id: LineId, quantity: u32 },
    Cleared,
}

#[derive(Clone, Debug)]
pub enum OrderEvent {
    Placed { order_id: OrderId, total: Money },
    StatusChanged { order_id: OrderId, status: OrderStatus },
    MarkedSeen { seller_id: SellerId },
}

#[derive(Clone, Debug)]
pub enum AccountEvent {
    SellerSignedIn { seller_id: SellerId },
    BuyerSignedIn { buyer_id: BuyerId },
    SignedOut,
    SellerProfileUpdated { seller_id: SellerId },
    SellerRenamed { seller_id: SellerId, store_name: String },
    BuyerProfileUpdated { buyer_id: BuyerId },
}

#[derive(Clone, Debug)]
pub enum SessionEvent {
    Navigated { view: View },
    ThemeChanged { theme: Theme },
}
