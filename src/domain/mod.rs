//! Domain model: catalog, cart, orders, accounts and the events they raise
pub mod account;
pub mod cart;
pub mod events;
pub mod ids;
pub mod money;
pub mod order;
pub mod product;
pub mod session;

pub use account::{Buyer, BuyerPatch, BuyerQuest, Loyalty, LoyaltyTier, Password, Seller, SellerPatch};
pub use cart::{Cart, CartItem, Frequency, Subscription};
pub use events::{AccountEvent, CartEvent, OrderEvent, ProductEvent, SessionEvent, StorefrontEvent};
pub use ids::{BuyerId, IdGenerator, LineId, OrderId, ProductId, SellerId};
pub use money::Money;
pub use order::{BuyerInfo, Order, OrderStatus, TRACKING_PREFIX};
pub use product::{Category, Product, Review, Variant, VariantOption};
pub use session::{ShopTab, Theme, View};
