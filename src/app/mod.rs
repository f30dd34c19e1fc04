//! Storefront controller
//!
//! One [`Storefront`] owns the whole client-side state of the marketplace:
//! catalog and order mirrors, the cart, both signed-in identities, navigation
//! and the pending event queue. Mutations follow one discipline everywhere:
//! write the durable store first, commit memory only once the write stuck.
//! Reads at load time degrade to defaults so a damaged store never blocks
//! the shop from opening.

use tracing::{debug, info};

use crate::config::StoreConfig;
use crate::domain::account::{Buyer, Seller};
use crate::domain::cart::Cart;
use crate::domain::events::StorefrontEvent;
use crate::domain::ids::{IdGenerator, OrderId, ProductId};
use crate::domain::order::Order;
use crate::domain::product::Product;
use crate::domain::session::{ShopTab, Theme, View};
use crate::storage::{self, keys, JsonFileStore, KeyValueStore, MemoryStore};

mod accounts;
mod cart;
mod catalog;
mod commands;
mod orders;
mod session;

pub use accounts::{BuyerSignup, SellerSignup};
pub use catalog::{CatalogFilter, PriceRange, RatingFilter, SortOrder};
pub use commands::Command;
pub use orders::{SellerStats, TimePeriod};

pub struct Storefront {
    config: StoreConfig,
    durable: Box<dyn KeyValueStore>,
    session: Box<dyn KeyValueStore>,
    products: Vec<Product>,
    orders: Vec<Order>,
    cart: Cart,
    seller: Option<Seller>,
    buyer: Option<Buyer>,
    unseen_orders: Vec<OrderId>,
    view: View,
    shop_tab: ShopTab,
    filter: CatalogFilter,
    visual_results: Option<Vec<ProductId>>,
    compare: Vec<ProductId>,
    theme: Theme,
    ids: IdGenerator,
    events: Vec<StorefrontEvent>,
}

impl Storefront {
    /// Builds a storefront over explicit stores and restores state from them.
    pub fn new(
        durable: Box<dyn KeyValueStore>,
        session: Box<dyn KeyValueStore>,
        config: StoreConfig,
    ) -> Self {
        let default_theme = config.default_theme;
        let mut storefront = Self {
            config,
            durable,
            session,
            products: Vec::new(),
            orders: Vec::new(),
            cart: Cart::new(),
            seller: None,
            buyer: None,
            unseen_orders: Vec::new(),
            view: View::Shop,
            shop_tab: ShopTab::AllProducts,
            filter: CatalogFilter::default(),
            visual_results: None,
            compare: Vec::new(),
            theme: default_theme,
            ids: IdGenerator::new(),
            events: Vec::new(),
        };
        storefront.load();
        storefront
    }

    /// Opens the storefront over a file-backed durable store in the
    /// configured data directory and a fresh in-memory session store.
    pub fn open(config: StoreConfig) -> Self {
        let durable = JsonFileStore::open(config.store_path());
        Self::new(Box::new(durable), Box::new(MemoryStore::new()), config)
    }

    /// Restores catalog, orders, theme and both identities. Failed or
    /// malformed reads fall back to defaults; a missing session pointer
    /// just means nobody is signed in.
    fn load(&mut self) {
        self.products = storage::read_or_default(self.durable.as_ref(), keys::PRODUCTS);
        self.orders = storage::read_or_default(self.durable.as_ref(), keys::ORDERS);
        self.theme = match storage::read_json::<Theme>(self.durable.as_ref(), keys::THEME) {
            Ok(Some(theme)) => theme,
            Ok(None) => self.config.default_theme,
            Err(err) => {
                tracing::error!(error = %err, "theme unreadable, using configured default");
                self.config.default_theme
            }
        };

        if let Ok(Some(seller_id)) =
            storage::read_json::<String>(self.session.as_ref(), keys::ACTIVE_SELLER)
        {
            let sellers: Vec<Seller> = storage::read_or_default(self.durable.as_ref(), keys::SELLERS);
            if let Some(seller) = sellers.into_iter().find(|s| s.id.as_str() == seller_id) {
                self.unseen_orders = storage::read_or_default(
                    self.durable.as_ref(),
                    &keys::unseen_orders(seller.id.as_str()),
                );
                debug!(seller = %seller.id, "restored seller session");
                self.seller = Some(seller);
            }
        }
        if let Ok(Some(buyer_id)) =
            storage::read_json::<String>(self.session.as_ref(), keys::ACTIVE_BUYER)
        {
            let buyers: Vec<Buyer> = storage::read_or_default(self.durable.as_ref(), keys::BUYERS);
            if let Some(buyer) = buyers.into_iter().find(|b| b.id.as_str() == buyer_id) {
                debug!(buyer = %buyer.id, "restored buyer session");
                self.buyer = Some(buyer);
            }
        }

        info!(
            products = self.products.len(),
            orders = self.orders.len(),
            "storefront loaded"
        );
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn current_seller(&self) -> Option<&Seller> {
        self.seller.as_ref()
    }

    pub fn current_buyer(&self) -> Option<&Buyer> {
        self.buyer.as_ref()
    }

    /// Order ids placed for the signed-in seller and not yet acknowledged.
    pub fn unseen_order_ids(&self) -> &[OrderId] {
        &self.unseen_orders
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn shop_tab(&self) -> ShopTab {
        self.shop_tab
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn filter(&self) -> &CatalogFilter {
        &self.filter
    }

    pub fn comparison(&self) -> &[ProductId] {
        &self.compare
    }

    pub fn visual_search_results(&self) -> Option<&[ProductId]> {
        self.visual_results.as_deref()
    }

    /// Drains everything that happened since the last drain, oldest first.
    pub fn take_events(&mut self) -> Vec<StorefrontEvent> {
        std::mem::take(&mut self.events)
    }

    fn push_event(&mut self, event: StorefrontEvent) {
        self.events.push(event);
    }

    fn durable(&self) -> &dyn KeyValueStore {
        self.durable.as_ref()
    }

    fn session_store(&self) -> &dyn KeyValueStore {
        self.session.as_ref()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::domain::ids::SellerId;
    use crate::domain::money::Money;
    use crate::domain::product::Category;
    use crate::storage::MemoryStore;

    /// Storefront over fresh in-memory stores, the baseline for app tests.
    pub(crate) fn storefront() -> Storefront {
        Storefront::new(
            Box::new(MemoryStore::new()),
            Box::new(MemoryStore::new()),
            StoreConfig::default(),
        )
    }

    /// Storefront whose durable store rejects writes to the given keys.
    pub(crate) fn storefront_with_broken_keys(broken: &[&str]) -> Storefront {
        Storefront::new(
            Box::new(crate::storage::FailingStore::broken_on(broken)),
            Box::new(MemoryStore::new()),
            StoreConfig::default(),
        )
    }

    /// Minimal catalog product owned by `seller`.
    pub(crate) fn listed_product(id: u64, seller: &str, price: i64) -> Product {
        Product {
            id: crate::domain::ids::ProductId(id),
            name: format!("Product {id}"),
            description: String::new(),
            price: Money::leones(price),
            original_price: None,
            stock: Some(10),
            sale_end_date: None,
            images: vec![],
            category: Category::Electronics,
            rating: 0.0,
            reviews_count: 0,
            vendor: format!("Store of {seller}"),
            seller_id: SellerId::new(seller),
            variants: vec![],
            reviews: vec![],
            is_subscribable: false,
            is_negotiable: false,
            min_price: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::storefront;
    use super::*;
    use crate::domain::session::Theme;
    use crate::storage::MemoryStore;

    #[test]
    fn test_fresh_storefront_is_empty() {
        let mut shop = storefront();
        assert!(shop.products().is_empty());
        assert!(shop.orders().is_empty());
        assert!(shop.cart().is_empty());
        assert!(shop.current_seller().is_none());
        assert!(shop.current_buyer().is_none());
        assert_eq!(shop.view(), View::Shop);
        assert_eq!(shop.theme(), Theme::Light);
        assert!(shop.take_events().is_empty());
    }

    #[test]
    fn test_damaged_durable_store_still_opens() {
        let durable = MemoryStore::new();
        durable.set(keys::PRODUCTS, "[{malformed").unwrap();
        durable.set(keys::THEME, "\"dark\"").unwrap();
        let shop = Storefront::new(
            Box::new(durable),
            Box::new(MemoryStore::new()),
            StoreConfig::default(),
        );
        assert!(shop.products().is_empty());
        assert_eq!(shop.theme(), Theme::Dark);
    }

    #[test]
    fn test_storefront_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<Storefront>();
    }
}
