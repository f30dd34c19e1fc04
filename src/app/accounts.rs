//! Accounts: signup, login, profiles and buyer engagement

use tracing::{info, warn};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::ai::QuestDraft;
use crate::domain::account::{Buyer, BuyerPatch, Loyalty, Password, Seller, SellerPatch};
use crate::domain::events::{AccountEvent, SessionEvent, StorefrontEvent};
use crate::domain::ids::{BuyerId, ProductId, SellerId};
use crate::domain::session::View;
use crate::error::AuthError;
use crate::storage::{self, keys, read_json, write_json};

use super::Storefront;

/// Most recent products remembered per buyer for personalization.
const BROWSING_HISTORY_LIMIT: usize = 20;

const PASSWORD_SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";

fn password_strength(value: &str) -> Result<(), ValidationError> {
    let has_digit = value.chars().any(|c| c.is_ascii_digit());
    let has_symbol = value.chars().any(|c| PASSWORD_SYMBOLS.contains(c));
    if has_digit && has_symbol {
        Ok(())
    } else {
        Err(ValidationError::new("password_strength"))
    }
}

/// Email failures outrank password failures, mirroring the signup form.
fn credential_errors(outcome: Result<(), ValidationErrors>) -> Result<(), AuthError> {
    match outcome {
        Ok(()) => Ok(()),
        Err(errors) => {
            if errors.field_errors().contains_key("email") {
                Err(AuthError::InvalidEmail)
            } else {
                Err(AuthError::WeakPassword)
            }
        }
    }
}

#[derive(Clone, Debug, Validate)]
pub struct SellerSignup {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8), custom = "password_strength")]
    pub password: String,
    pub password_confirm: String,
    pub store_name: String,
}

#[derive(Clone, Debug, Validate)]
pub struct BuyerSignup {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8), custom = "password_strength")]
    pub password: String,
    pub password_confirm: String,
    pub full_name: String,
    pub phone_number: String,
}

impl Storefront {
    /// Creates a seller account and signs it in. Check order: store name,
    /// email shape, password strength, confirmation, then uniqueness
    /// against the stored list (case-insensitive).
    pub fn signup_seller(&mut self, form: SellerSignup) -> Result<(), AuthError> {
        if form.store_name.trim().is_empty() {
            return Err(AuthError::MissingStoreName);
        }
        credential_errors(form.validate())?;
        if form.password != form.password_confirm {
            return Err(AuthError::PasswordMismatch);
        }

        let sellers: Vec<Seller> = read_json(self.durable(), keys::SELLERS)?.unwrap_or_default();
        let email = form.email.trim().to_lowercase();
        if sellers.iter().any(|s| s.email.to_lowercase() == email) {
            return Err(AuthError::EmailTaken);
        }

        let seller = Seller {
            id: SellerId::new(self.ids.next("seller")),
            email,
            password: Password::new(form.password),
            store_name: form.store_name.trim().to_string(),
            story: None,
            story_inputs: None,
        };
        let mut updated = sellers;
        updated.push(seller.clone());
        write_json(self.durable(), keys::SELLERS, &updated)?;
        info!(seller = %seller.id, "seller account created");
        self.finish_seller_login(seller);
        Ok(())
    }

    /// Creates a buyer account with fresh loyalty state and signs it in.
    pub fn signup_buyer(&mut self, form: BuyerSignup) -> Result<(), AuthError> {
        if form.full_name.trim().is_empty() || form.phone_number.trim().is_empty() {
            return Err(AuthError::MissingFields);
        }
        credential_errors(form.validate())?;
        if form.password != form.password_confirm {
            return Err(AuthError::PasswordMismatch);
        }

        let buyers: Vec<Buyer> = read_json(self.durable(), keys::BUYERS)?.unwrap_or_default();
        let email = form.email.trim().to_lowercase();
        if buyers.iter().any(|b| b.email.to_lowercase() == email) {
            return Err(AuthError::EmailTaken);
        }

        let buyer = Buyer {
            id: BuyerId::new(self.ids.next("buyer")),
            email,
            password: Password::new(form.password),
            full_name: form.full_name.trim().to_string(),
            phone_number: form.phone_number.trim().to_string(),
            browsing_history: Vec::new(),
            wishlist: Vec::new(),
            loyalty: Loyalty::default(),
            quests: Vec::new(),
        };
        let mut updated = buyers;
        updated.push(buyer.clone());
        write_json(self.durable(), keys::BUYERS, &updated)?;
        info!(buyer = %buyer.id, "buyer account created");
        self.finish_buyer_login(buyer);
        Ok(())
    }

    /// Both an unknown email and a wrong password answer the same way.
    pub fn login_seller(&mut self, email: &str, password: &str) -> Result<(), AuthError> {
        let sellers: Vec<Seller> = read_json(self.durable(), keys::SELLERS)?.unwrap_or_default();
        let probe = email.trim().to_lowercase();
        match sellers.into_iter().find(|s| s.email.to_lowercase() == probe) {
            Some(seller) if seller.password.verify(password) => {
                self.finish_seller_login(seller);
                Ok(())
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    pub fn login_buyer(&mut self, email: &str, password: &str) -> Result<(), AuthError> {
        let buyers: Vec<Buyer> = read_json(self.durable(), keys::BUYERS)?.unwrap_or_default();
        let probe = email.trim().to_lowercase();
        match buyers.into_iter().find(|b| b.email.to_lowercase() == probe) {
            Some(buyer) if buyer.password.verify(password) => {
                self.finish_buyer_login(buyer);
                Ok(())
            }
            _ => Err(AuthError::InvalidCredentials),
        }
    }

    fn finish_seller_login(&mut self, seller: Seller) {
        if let Err(err) = write_json(self.session_store(), keys::ACTIVE_SELLER, seller.id.as_str())
        {
            warn!(error = %err, "seller session pointer not recorded");
        }
        self.unseen_orders =
            storage::read_or_default(self.durable(), &keys::unseen_orders(seller.id.as_str()));
        let seller_id = seller.id.clone();
        self.seller = Some(seller);
        self.view = View::SellerDashboard;
        self.push_event(StorefrontEvent::Account(AccountEvent::SellerSignedIn {
            seller_id,
        }));
        self.push_event(StorefrontEvent::Session(SessionEvent::Navigated {
            view: View::SellerDashboard,
        }));
    }

    fn finish_buyer_login(&mut self, buyer: Buyer) {
        if let Err(err) = write_json(self.session_store(), keys::ACTIVE_BUYER, buyer.id.as_str()) {
            warn!(error = %err, "buyer session pointer not recorded");
        }
        let buyer_id = buyer.id.clone();
        self.buyer = Some(buyer);
        self.view = View::Shop;
        self.push_event(StorefrontEvent::Account(AccountEvent::BuyerSignedIn {
            buyer_id,
        }));
        self.push_event(StorefrontEvent::Session(SessionEvent::Navigated {
            view: View::Shop,
        }));
    }

    /// Drops both identities, clears the notification mirror and the
    /// session pointers, and lands back on the shop.
    pub fn logout(&mut self) {
        self.seller = None;
        self.buyer = None;
        self.unseen_orders.clear();
        for key in [keys::ACTIVE_SELLER, keys::ACTIVE_BUYER] {
            if let Err(err) = self.session_store().remove(key) {
                warn!(key, error = %err, "session pointer not cleared");
            }
        }
        self.view = View::Shop;
        self.push_event(StorefrontEvent::Account(AccountEvent::SignedOut));
        self.push_event(StorefrontEvent::Session(SessionEvent::Navigated {
            view: View::Shop,
        }));
    }

    /// Merges the patch into the signed-in seller. An email move onto
    /// another account's address is rejected; changing the store name
    /// rewrites the vendor label on every product the seller owns.
    pub fn update_seller_profile(&mut self, patch: SellerPatch) -> Result<(), AuthError> {
        let Some(current) = self.seller.clone() else {
            return Err(AuthError::NotSignedIn);
        };
        let sellers: Vec<Seller> = read_json(self.durable(), keys::SELLERS)?.unwrap_or_default();
        if let Some(new_email) = &patch.email {
            let lowered = new_email.to_lowercase();
            if sellers
                .iter()
                .any(|s| s.id != current.id && s.email.to_lowercase() == lowered)
            {
                return Err(AuthError::EmailInUse);
            }
        }

        let mut updated_seller = current.clone();
        patch.apply(&mut updated_seller);
        let renamed = patch
            .store_name
            .as_ref()
            .is_some_and(|name| *name != current.store_name);

        let mut updated_sellers = sellers;
        match updated_sellers.iter_mut().find(|s| s.id == current.id) {
            Some(slot) => *slot = updated_seller.clone(),
            None => updated_sellers.push(updated_seller.clone()),
        }
        write_json(self.durable(), keys::SELLERS, &updated_sellers)?;

        let seller_id = updated_seller.id.clone();
        let store_name = updated_seller.store_name.clone();
        self.seller = Some(updated_seller);
        self.push_event(StorefrontEvent::Account(AccountEvent::SellerProfileUpdated {
            seller_id: seller_id.clone(),
        }));

        if renamed {
            let mut updated_products = self.products.clone();
            for product in updated_products
                .iter_mut()
                .filter(|p| p.seller_id == seller_id)
            {
                product.vendor = store_name.clone();
            }
            write_json(self.durable(), keys::PRODUCTS, &updated_products)?;
            self.products = updated_products;
            info!(seller = %seller_id, store = %store_name, "store renamed across catalog");
            self.push_event(StorefrontEvent::Account(AccountEvent::SellerRenamed {
                seller_id,
                store_name,
            }));
        }
        Ok(())
    }

    /// Merges the patch into the signed-in buyer, with the same email
    /// collision rule as sellers.
    pub fn update_buyer_profile(&mut self, patch: BuyerPatch) -> Result<(), AuthError> {
        let Some(current) = self.buyer.clone() else {
            return Err(AuthError::NotSignedIn);
        };
        let buyers: Vec<Buyer> = read_json(self.durable(), keys::BUYERS)?.unwrap_or_default();
        if let Some(new_email) = &patch.email {
            let lowered = new_email.to_lowercase();
            if buyers
                .iter()
                .any(|b| b.id != current.id && b.email.to_lowercase() == lowered)
            {
                return Err(AuthError::EmailInUse);
            }
        }

        let mut updated_buyer = current.clone();
        patch.apply(&mut updated_buyer);
        let mut updated_buyers = buyers;
        match updated_buyers.iter_mut().find(|b| b.id == current.id) {
            Some(slot) => *slot = updated_buyer.clone(),
            None => updated_buyers.push(updated_buyer.clone()),
        }
        write_json(self.durable(), keys::BUYERS, &updated_buyers)?;

        let buyer_id = updated_buyer.id.clone();
        self.buyer = Some(updated_buyer);
        self.push_event(StorefrontEvent::Account(AccountEvent::BuyerProfileUpdated {
            buyer_id,
        }));
        Ok(())
    }

    /// Adds or removes the product on the signed-in buyer's wishlist and
    /// reports whether it is on the list afterwards. Signed-out visitors
    /// are sent to the auth screen instead.
    pub fn toggle_wishlist(&mut self, product_id: ProductId) -> Result<bool, AuthError> {
        if self.buyer.is_none() {
            self.navigate(View::Auth);
            return Err(AuthError::NotSignedIn);
        }
        let wishlist = self
            .buyer
            .as_ref()
            .map(|b| b.wishlist.clone())
            .unwrap_or_default();
        let (next, added) = if wishlist.contains(&product_id) {
            (
                wishlist.into_iter().filter(|id| *id != product_id).collect(),
                false,
            )
        } else {
            let mut grown = wishlist;
            grown.push(product_id);
            (grown, true)
        };
        self.update_buyer_profile(BuyerPatch {
            wishlist: Some(next),
            ..Default::default()
        })?;
        Ok(added)
    }

    /// Remembers a product open for personalization: most recent first,
    /// duplicates collapsed, capped. Anonymous browsing is not tracked.
    pub fn record_product_view(&mut self, product_id: ProductId) -> Result<(), AuthError> {
        let Some(buyer) = &self.buyer else {
            return Ok(());
        };
        let mut history = vec![product_id];
        history.extend(
            buyer
                .browsing_history
                .iter()
                .copied()
                .filter(|id| *id != product_id),
        );
        history.truncate(BROWSING_HISTORY_LIMIT);
        self.update_buyer_profile(BuyerPatch {
            browsing_history: Some(history),
            ..Default::default()
        })
    }

    /// Marks the quest completed and credits its points once. Unknown and
    /// already completed quests change nothing.
    pub fn complete_quest(&mut self, quest_id: &str) -> Result<(), AuthError> {
        let Some(buyer) = &self.buyer else {
            return Err(AuthError::NotSignedIn);
        };
        let Some(quest) = buyer.quests.iter().find(|q| q.id == quest_id) else {
            return Ok(());
        };
        if quest.is_completed {
            return Ok(());
        }
        let points = quest.points;
        let mut quests = buyer.quests.clone();
        if let Some(slot) = quests.iter_mut().find(|q| q.id == quest_id) {
            slot.is_completed = true;
        }
        let mut loyalty = buyer.loyalty;
        loyalty.credit(points);
        info!(quest = quest_id, points, "quest completed");
        self.update_buyer_profile(BuyerPatch {
            quests: Some(quests),
            loyalty: Some(loyalty),
            ..Default::default()
        })
    }

    /// Adopts assistant-drafted quests onto the signed-in buyer. An empty
    /// batch changes nothing.
    pub fn grant_quests(&mut self, drafts: Vec<QuestDraft>) -> Result<(), AuthError> {
        let Some(buyer) = &self.buyer else {
            return Err(AuthError::NotSignedIn);
        };
        if drafts.is_empty() {
            return Ok(());
        }
        let mut quests = buyer.quests.clone();
        quests.extend(drafts.into_iter().map(QuestDraft::into_quest));
        self.update_buyer_profile(BuyerPatch {
            quests: Some(quests),
            ..Default::default()
        })
    }

    /// Stores a generated spotlight story with the inputs that produced it.
    pub fn save_vendor_story(&mut self, story: String, inputs: String) -> Result<(), AuthError> {
        self.update_seller_profile(SellerPatch {
            story: Some(story),
            story_inputs: Some(inputs),
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::{listed_product, storefront, storefront_with_broken_keys};
    use super::*;
    use crate::config::StoreConfig;
    use crate::storage::MemoryStore;
    use std::sync::Arc;

    fn seller_form() -> SellerSignup {
        SellerSignup {
            email: "kadija@krio.market".to_string(),
            password: "str0ng-pass!".to_string(),
            password_confirm: "str0ng-pass!".to_string(),
            store_name: "Kadija Gadgets".to_string(),
        }
    }

    fn buyer_form() -> BuyerSignup {
        BuyerSignup {
            email: "abu@krio.market".to_string(),
            password: "str0ng-pass!".to_string(),
            password_confirm: "str0ng-pass!".to_string(),
            full_name: "Abu Bangura".to_string(),
            phone_number: "+232 76 111222".to_string(),
        }
    }

    #[test]
    fn test_seller_signup_validation_order() {
        let mut shop = storefront();

        let mut form = seller_form();
        form.store_name = "  ".to_string();
        form.email = "broken".to_string();
        assert_eq!(
            shop.signup_seller(form).unwrap_err().token(),
            "store_name_required"
        );

        let mut form = seller_form();
        form.email = "not-an-email".to_string();
        assert_eq!(
            shop.signup_seller(form).unwrap_err().token(),
            "signup_invalid_email"
        );

        let mut form = seller_form();
        form.password = "letters-only!".to_string();
        form.password_confirm = "letters-only!".to_string();
        assert_eq!(
            shop.signup_seller(form).unwrap_err().token(),
            "signup_password_weak"
        );

        let mut form = seller_form();
        form.password_confirm = "different9!".to_string();
        assert_eq!(
            shop.signup_seller(form).unwrap_err().token(),
            "signup_password_mismatch"
        );

        shop.signup_seller(seller_form()).unwrap();
        shop.logout();

        let mut form = seller_form();
        form.email = "KADIJA@krio.market".to_string();
        assert_eq!(
            shop.signup_seller(form).unwrap_err().token(),
            "signup_email_exists"
        );
    }

    #[test]
    fn test_buyer_signup_requires_contact_fields_first() {
        let mut shop = storefront();
        let mut form = buyer_form();
        form.full_name = " ".to_string();
        form.email = "broken".to_string();
        assert_eq!(
            shop.signup_buyer(form).unwrap_err().token(),
            "fill_all_fields"
        );
    }

    #[test]
    fn test_buyer_signup_defaults_and_landing() {
        let mut shop = storefront();
        shop.signup_buyer(buyer_form()).unwrap();

        let buyer = shop.current_buyer().unwrap();
        assert_eq!(buyer.email, "abu@krio.market");
        assert_eq!(buyer.loyalty, Loyalty::default());
        assert!(buyer.wishlist.is_empty());
        assert!(buyer.browsing_history.is_empty());
        assert!(buyer.quests.is_empty());
        assert_eq!(shop.view(), View::Shop);
    }

    #[test]
    fn test_seller_signup_lands_on_dashboard() {
        let mut shop = storefront();
        shop.signup_seller(seller_form()).unwrap();
        assert!(shop.current_seller().is_some());
        assert_eq!(shop.view(), View::SellerDashboard);
    }

    #[test]
    fn test_signup_storage_failure_leaves_no_identity() {
        let mut shop = storefront_with_broken_keys(&[keys::SELLERS]);
        let err = shop.signup_seller(seller_form()).unwrap_err();
        assert_eq!(err.token(), "auth_storage_error");
        assert!(shop.current_seller().is_none());
    }

    #[test]
    fn test_login_answers_uniformly() {
        let mut shop = storefront();
        shop.signup_seller(seller_form()).unwrap();
        shop.logout();

        let err = shop.login_seller("kadija@krio.market", "wrong").unwrap_err();
        assert_eq!(err.token(), "login_error");
        let err = shop.login_seller("nobody@krio.market", "str0ng-pass!").unwrap_err();
        assert_eq!(err.token(), "login_error");

        shop.login_seller(" KADIJA@krio.market ", "str0ng-pass!")
            .unwrap();
        assert!(shop.current_seller().is_some());
    }

    #[test]
    fn test_session_restores_identity_on_reload() {
        let durable: Arc<MemoryStore> = Arc::new(MemoryStore::new());
        let session: Arc<MemoryStore> = Arc::new(MemoryStore::new());

        let mut first = Storefront::new(
            Box::new(durable.clone()),
            Box::new(session.clone()),
            StoreConfig::default(),
        );
        first.signup_seller(seller_form()).unwrap();
        let seller_id = first.current_seller().unwrap().id.clone();
        drop(first);

        let second = Storefront::new(
            Box::new(durable.clone()),
            Box::new(session.clone()),
            StoreConfig::default(),
        );
        assert_eq!(
            second.current_seller().map(|s| s.id.clone()),
            Some(seller_id)
        );

        // logout wipes the pointer for the next load
        let mut third = Storefront::new(
            Box::new(durable.clone()),
            Box::new(session.clone()),
            StoreConfig::default(),
        );
        third.logout();
        drop(third);
        let fourth = Storefront::new(
            Box::new(durable),
            Box::new(session),
            StoreConfig::default(),
        );
        assert!(fourth.current_seller().is_none());
    }

    #[test]
    fn test_profile_update_requires_identity() {
        let mut shop = storefront();
        let err = shop
            .update_seller_profile(SellerPatch::default())
            .unwrap_err();
        assert_eq!(err.token(), "not_signed_in_error");
    }

    #[test]
    fn test_email_move_respects_other_accounts() {
        let mut shop = storefront();
        shop.signup_seller(seller_form()).unwrap();
        shop.logout();
        let mut other = seller_form();
        other.email = "second@krio.market".to_string();
        other.store_name = "Second Shop".to_string();
        shop.signup_seller(other).unwrap();

        let err = shop
            .update_seller_profile(SellerPatch {
                email: Some("Kadija@krio.market".to_string()),
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(err.token(), "email_in_use_error");

        // re-asserting your own address is not a collision
        shop.update_seller_profile(SellerPatch {
            email: Some("second@krio.market".to_string()),
            ..Default::default()
        })
        .unwrap();
    }

    #[test]
    fn test_store_rename_cascades_to_vendor_labels() {
        let mut shop = storefront();
        shop.signup_seller(seller_form()).unwrap();
        let seller_id = shop.current_seller().unwrap().id.clone();

        let mut mine = listed_product(1, "placeholder", 100);
        mine.seller_id = seller_id.clone();
        shop.add_product(mine).unwrap();
        shop.add_product(listed_product(2, "seller-2", 50)).unwrap();

        shop.update_seller_profile(SellerPatch {
            store_name: Some("Kadija Electronics".to_string()),
            ..Default::default()
        })
        .unwrap();

        assert_eq!(
            shop.product(crate::domain::ids::ProductId(1)).unwrap().vendor,
            "Kadija Electronics"
        );
        assert_eq!(
            shop.product(crate::domain::ids::ProductId(2)).unwrap().vendor,
            "Store of seller-2"
        );
    }

    #[test]
    fn test_wishlist_toggle_and_gate() {
        let mut shop = storefront();
        shop.add_product(listed_product(1, "seller-1", 100)).unwrap();
        shop.add_product(listed_product(2, "seller-1", 120)).unwrap();

        let err = shop.toggle_wishlist(ProductId(1)).unwrap_err();
        assert_eq!(err.token(), "not_signed_in_error");
        assert_eq!(shop.view(), View::Auth);

        shop.signup_buyer(buyer_form()).unwrap();
        assert!(shop.toggle_wishlist(ProductId(1)).unwrap());
        assert!(shop.toggle_wishlist(ProductId(2)).unwrap());
        assert!(!shop.toggle_wishlist(ProductId(1)).unwrap());
        assert_eq!(shop.current_buyer().unwrap().wishlist, vec![ProductId(2)]);
    }

    #[test]
    fn test_browsing_history_dedupes_and_caps() {
        let mut shop = storefront();
        // anonymous views leave nothing behind even after signing in later
        shop.record_product_view(ProductId(500)).unwrap();
        shop.signup_buyer(buyer_form()).unwrap();
        assert!(shop.current_buyer().unwrap().browsing_history.is_empty());

        for id in 1..=22u64 {
            shop.record_product_view(ProductId(id)).unwrap();
        }
        shop.record_product_view(ProductId(21)).unwrap();

        let history = &shop.current_buyer().unwrap().browsing_history;
        assert_eq!(history.len(), BROWSING_HISTORY_LIMIT);
        assert_eq!(history[0], ProductId(21));
        assert_eq!(history[1], ProductId(22));
        assert!(!history.contains(&ProductId(1)));
        assert!(!history.contains(&ProductId(2)));
    }

    #[test]
    fn test_quests_grant_and_complete_once() {
        let mut shop = storefront();
        shop.signup_buyer(buyer_form()).unwrap();

        shop.grant_quests(Vec::new()).unwrap();
        assert!(shop.current_buyer().unwrap().quests.is_empty());

        shop.grant_quests(vec![
            QuestDraft {
                title: "Review a purchase".to_string(),
                description: "Leave a review on something you bought".to_string(),
                points: 150,
            },
            QuestDraft {
                title: "Visit For You".to_string(),
                description: "Open the For You tab".to_string(),
                points: 50,
            },
        ])
        .unwrap();

        let quest_id = shop.current_buyer().unwrap().quests[0].id.clone();
        shop.complete_quest(&quest_id).unwrap();
        let buyer = shop.current_buyer().unwrap();
        assert!(buyer.quests[0].is_completed);
        assert_eq!(buyer.loyalty.points, 150);

        // a second completion credits nothing
        shop.complete_quest(&quest_id).unwrap();
        assert_eq!(shop.current_buyer().unwrap().loyalty.points, 150);

        // unknown quests are ignored
        shop.complete_quest("quest-missing").unwrap();
    }

    #[test]
    fn test_vendor_story_saved_with_inputs() {
        let mut shop = storefront();
        shop.signup_seller(seller_form()).unwrap();
        shop.save_vendor_story(
            "Kadija started fixing radios in Makeni.".to_string(),
            "radios, Makeni, since 2015".to_string(),
        )
        .unwrap();

        let seller = shop.current_seller().unwrap();
        assert_eq!(
            seller.story.as_deref(),
            Some("Kadija started fixing radios in Makeni.")
        );
        assert_eq!(seller.story_inputs.as_deref(), Some("radios, Makeni, since 2015"));
    }
}
