//! Single dispatch entry for hosts that drive the storefront as a reducer

use std::collections::BTreeMap;

use crate::ai::QuestDraft;
use crate::domain::account::{BuyerPatch, SellerPatch};
use crate::domain::cart::Subscription;
use crate::domain::ids::{LineId, OrderId, ProductId};
use crate::domain::money::Money;
use crate::domain::order::{BuyerInfo, OrderStatus};
use crate::domain::product::{Category, Product, Review};
use crate::domain::session::{ShopTab, Theme, View};
use crate::error::Result;

use super::{
    BuyerSignup, PriceRange, RatingFilter, SellerSignup, SortOrder, Storefront,
};

/// Every state change the storefront supports, as data. UIs that keep a
/// message loop can funnel user intent through [`Storefront::dispatch`]
/// instead of calling the typed methods directly.
#[derive(Clone, Debug)]
pub enum Command {
    AddProduct(Product),
    UpdateProduct(Product),
    SetStock {
        product_id: ProductId,
        stock: u32,
    },
    AddReview {
        product_id: ProductId,
        review: Review,
    },
    AddToCart {
        product_id: ProductId,
        quantity: u32,
        variant: BTreeMap<String, String>,
        subscription: Option<Subscription>,
        negotiated_price: Option<Money>,
    },
    RemoveFromCart {
        line_id: LineId,
    },
    SetCartQuantity {
        line_id: LineId,
        quantity: u32,
    },
    ClearCart,
    PlaceOrder {
        buyer_info: BuyerInfo,
    },
    UpdateOrderStatus {
        order_id: OrderId,
        status: OrderStatus,
    },
    MarkOrdersSeen,
    SignupSeller(SellerSignup),
    SignupBuyer(BuyerSignup),
    LoginSeller {
        email: String,
        password: String,
    },
    LoginBuyer {
        email: String,
        password: String,
    },
    Logout,
    UpdateSellerProfile(SellerPatch),
    UpdateBuyerProfile(BuyerPatch),
    SaveVendorStory {
        story: String,
        inputs: String,
    },
    ToggleWishlist {
        product_id: ProductId,
    },
    RecordProductView {
        product_id: ProductId,
    },
    CompleteQuest {
        quest_id: String,
    },
    GrantQuests(Vec<QuestDraft>),
    Navigate(View),
    ToggleTheme,
    SetTheme(Theme),
    ToggleCompare {
        product_id: ProductId,
    },
    ClearCompare,
    ApplyVisualSearch(Vec<ProductId>),
    ClearVisualSearch,
    SetShopTab(ShopTab),
    SetSearch(String),
    SetCategory(Option<Category>),
    SetPriceRange(PriceRange),
    SetMinRating(RatingFilter),
    SetSort(SortOrder),
}

impl Storefront {
    /// Routes a command to its typed handler. Return values the typed
    /// methods produce for callers, like new line ids, are dropped here;
    /// dispatchers observe results through the event stream and accessors.
    pub fn dispatch(&mut self, command: Command) -> Result<()> {
        match command {
            Command::AddProduct(product) => self.add_product(product)?,
            Command::UpdateProduct(product) => self.update_product(product)?,
            Command::SetStock { product_id, stock } => self.set_stock(product_id, stock)?,
            Command::AddReview { product_id, review } => {
                self.add_product_review(product_id, review)?
            }
            Command::AddToCart {
                product_id,
                quantity,
                variant,
                subscription,
                negotiated_price,
            } => {
                self.add_to_cart(product_id, quantity, variant, subscription, negotiated_price)?;
            }
            Command::RemoveFromCart { line_id } => self.remove_from_cart(&line_id),
            Command::SetCartQuantity { line_id, quantity } => {
                self.update_cart_quantity(&line_id, quantity)
            }
            Command::ClearCart => self.clear_cart(),
            Command::PlaceOrder { buyer_info } => {
                self.place_order(buyer_info)?;
            }
            Command::UpdateOrderStatus { order_id, status } => {
                self.update_order_status(&order_id, status)?
            }
            Command::MarkOrdersSeen => self.mark_orders_seen()?,
            Command::SignupSeller(form) => self.signup_seller(form)?,
            Command::SignupBuyer(form) => self.signup_buyer(form)?,
            Command::LoginSeller { email, password } => self.login_seller(&email, &password)?,
            Command::LoginBuyer { email, password } => self.login_buyer(&email, &password)?,
            Command::Logout => self.logout(),
            Command::UpdateSellerProfile(patch) => self.update_seller_profile(patch)?,
            Command::UpdateBuyerProfile(patch) => self.update_buyer_profile(patch)?,
            Command::SaveVendorStory { story, inputs } => self.save_vendor_story(story, inputs)?,
            Command::ToggleWishlist { product_id } => {
                self.toggle_wishlist(product_id)?;
            }
            Command::RecordProductView { product_id } => self.record_product_view(product_id)?,
            Command::CompleteQuest { quest_id } => self.complete_quest(&quest_id)?,
            Command::GrantQuests(drafts) => self.grant_quests(drafts)?,
            Command::Navigate(view) => self.navigate(view),
            Command::ToggleTheme => self.toggle_theme(),
            Command::SetTheme(theme) => self.set_theme(theme),
            Command::ToggleCompare { product_id } => {
                self.toggle_compare(product_id)?;
            }
            Command::ClearCompare => self.clear_compare(),
            Command::ApplyVisualSearch(results) => self.apply_visual_search(results),
            Command::ClearVisualSearch => self.clear_visual_search(),
            Command::SetShopTab(tab) => self.set_shop_tab(tab),
            Command::SetSearch(term) => self.set_search(term),
            Command::SetCategory(category) => self.set_category(category),
            Command::SetPriceRange(range) => self.set_price_range(range),
            Command::SetMinRating(rating) => self.set_min_rating(rating),
            Command::SetSort(sort) => self.set_sort(sort),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{listed_product, storefront};
    use super::*;
    use crate::domain::events::{OrderEvent, StorefrontEvent};

    fn delivery() -> BuyerInfo {
        BuyerInfo {
            full_name: "Abu Bangura".to_string(),
            phone_number: "+232 76 111222".to_string(),
            delivery_address: "12 Siaka Stevens St, Freetown".to_string(),
        }
    }

    #[test]
    fn test_dispatch_runs_a_shopping_flow() {
        let mut shop = storefront();
        shop.dispatch(Command::AddProduct(listed_product(1, "seller-1", 150)))
            .unwrap();
        shop.dispatch(Command::AddToCart {
            product_id: ProductId(1),
            quantity: 2,
            variant: BTreeMap::new(),
            subscription: None,
            negotiated_price: None,
        })
        .unwrap();
        shop.dispatch(Command::PlaceOrder {
            buyer_info: delivery(),
        })
        .unwrap();

        assert_eq!(shop.orders().len(), 1);
        assert!(shop.cart().is_empty());
        assert!(shop.take_events().iter().any(|e| matches!(
            e,
            StorefrontEvent::Order(OrderEvent::Placed { .. })
        )));
    }

    #[test]
    fn test_dispatch_surfaces_domain_errors() {
        let mut shop = storefront();
        let err = shop
            .dispatch(Command::UpdateOrderStatus {
                order_id: OrderId::new("SK-123"),
                status: OrderStatus::Shipped,
            })
            .unwrap_err();
        assert_eq!(err.token(), "order_not_found_error");

        let err = shop
            .dispatch(Command::PlaceOrder {
                buyer_info: delivery(),
            })
            .unwrap_err();
        assert_eq!(err.token(), "empty_cart_error");
    }

    #[test]
    fn test_dispatch_session_commands_mutate_state() {
        let mut shop = storefront();
        shop.dispatch(Command::SetSearch("drone".to_string())).unwrap();
        shop.dispatch(Command::SetCategory(Some(Category::Gaming)))
            .unwrap();
        shop.dispatch(Command::Navigate(View::TrackOrder)).unwrap();

        assert_eq!(shop.filter().search, "drone");
        assert_eq!(shop.filter().category, Some(Category::Gaming));
        assert_eq!(shop.view(), View::TrackOrder);
    }
}
