//! Seller and buyer accounts

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BuyerId, ProductId, SellerId};

/// Stored credential. Comparison is verbatim; the wrapper exists so the
/// value never leaks through `Debug` output or logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Password(String);

impl Password {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn verify(&self, candidate: &str) -> bool {
        self.0 == candidate
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(****)")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LoyaltyTier {
    Bronze,
    Silver,
    Gold,
}

impl LoyaltyTier {
    pub fn for_points(points: u32) -> Self {
        match points {
            0..=999 => LoyaltyTier::Bronze,
            1000..=4999 => LoyaltyTier::Silver,
            _ => LoyaltyTier::Gold,
        }
    }
}

impl fmt::Display for LoyaltyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LoyaltyTier::Bronze => "Bronze",
            LoyaltyTier::Silver => "Silver",
            LoyaltyTier::Gold => "Gold",
        };
        write!(f, "{name}")
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loyalty {
    pub points: u32,
    pub tier: LoyaltyTier,
}

impl Default for Loyalty {
    fn default() -> Self {
        Self {
            points: 0,
            tier: LoyaltyTier::Bronze,
        }
    }
}

impl Loyalty {
    /// Credits points and re-derives the tier from the new balance.
    pub fn credit(&mut self, points: u32) {
        self.points += points;
        self.tier = LoyaltyTier::for_points(self.points);
    }
}

/// A personal shopping challenge. Completing one credits its points once.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BuyerQuest {
    pub id: String,
    pub title: String,
    pub description: String,
    pub points: u32,
    pub is_completed: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Seller {
    pub id: SellerId,
    pub email: String,
    pub password: Password,
    pub store_name: String,
    pub story: Option<String>,
    pub story_inputs: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Buyer {
    pub id: BuyerId,
    pub email: String,
    pub password: Password,
    pub full_name: String,
    pub phone_number: String,
    #[serde(default)]
    pub browsing_history: Vec<ProductId>,
    #[serde(default)]
    pub wishlist: Vec<ProductId>,
    #[serde(default)]
    pub loyalty: Loyalty,
    #[serde(default)]
    pub quests: Vec<BuyerQuest>,
}

/// Partial update for a seller profile. `None` keeps the stored value.
#[derive(Clone, Debug, Default)]
pub struct SellerPatch {
    pub email: Option<String>,
    pub password: Option<Password>,
    pub store_name: Option<String>,
    pub story: Option<String>,
    pub story_inputs: Option<String>,
}

impl SellerPatch {
    pub fn apply(&self, seller: &mut Seller) {
        if let Some(email) = &self.email {
            seller.email = email.clone();
        }
        if let Some(password) = &self.password {
            seller.password = password.clone();
        }
        if let Some(store_name) = &self.store_name {
            seller.store_name = store_name.clone();
        }
        if let Some(story) = &self.story {
            seller.story = Some(story.clone());
        }
        if let Some(story_inputs) = &self.story_inputs {
            seller.story_inputs = Some(story_inputs.clone());
        }
    }
}

/// Partial update for a buyer profile. `None` keeps the stored value.
#[derive(Clone, Debug, Default)]
pub struct BuyerPatch {
    pub email: Option<String>,
    pub password: Option<Password>,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub browsing_history: Option<Vec<ProductId>>,
    pub wishlist: Option<Vec<ProductId>>,
    pub loyalty: Option<Loyalty>,
    pub quests: Option<Vec<BuyerQuest>>,
}

impl BuyerPatch {
    pub fn apply(&self, buyer: &mut Buyer) {
        if let Some(email) = &self.email {
            buyer.email = email.clone();
        }
        if let Some(password) = &self.password {
            buyer.password = password.clone();
        }
        if let Some(full_name) = &self.full_name {
            buyer.full_name = full_name.clone();
        }
        if let Some(phone_number) = &self.phone_number {
            buyer.phone_number = phone_number.clone();
        }
        if let Some(browsing_history) = &self.browsing_history {
            buyer.browsing_history = browsing_history.clone();
        }
        if let Some(wishlist) = &self.wishlist {
            buyer.wishlist = wishlist.clone();
        }
        if let Some(loyalty) = self.loyalty {
            buyer.loyalty = loyalty;
        }
        if let Some(quests) = &self.quests {
            buyer.quests = quests.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_redacted_in_debug() {
        let password = Password::new("hunter2!1");
        assert_eq!(format!("{password:?}"), "Password(****)");
        assert!(password.verify("hunter2!1"));
        assert!(!password.verify("Hunter2!1"));
    }

    #[test]
    fn test_tier_thresholds() {
        assert_eq!(LoyaltyTier::for_points(0), LoyaltyTier::Bronze);
        assert_eq!(LoyaltyTier::for_points(999), LoyaltyTier::Bronze);
        assert_eq!(LoyaltyTier::for_points(1000), LoyaltyTier::Silver);
        assert_eq!(LoyaltyTier::for_points(4999), LoyaltyTier::Silver);
        assert_eq!(LoyaltyTier::for_points(5000), LoyaltyTier::Gold);
    }

    #[test]
    fn test_loyalty_credit_rederives_tier() {
        let mut loyalty = Loyalty::default();
        loyalty.credit(600);
        assert_eq!(loyalty.tier, LoyaltyTier::Bronze);
        loyalty.credit(600);
        assert_eq!(loyalty.points, 1200);
        assert_eq!(loyalty.tier, LoyaltyTier::Silver);
    }

    #[test]
    fn test_patch_keeps_unset_fields() {
        let mut seller = Seller {
            id: SellerId::new("seller-1"),
            email: "shop@example.com".to_string(),
            password: Password::new("secret99!"),
            store_name: "Kroo Bay Crafts".to_string(),
            story: None,
            story_inputs: None,
        };
        let patch = SellerPatch {
            store_name: Some("Kroo Bay Arts".to_string()),
            ..Default::default()
        };
        patch.apply(&mut seller);
        assert_eq!(seller.store_name, "Kroo Bay Arts");
        assert_eq!(seller.email, "shop@example.com");
        assert!(seller.password.verify("secret99!"));
    }
}
