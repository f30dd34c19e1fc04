//! Navigation and presentation state shared with the embedding UI

use serde::{Deserialize, Serialize};

/// Every screen the storefront can show. Role-gated variants are resolved
/// by the controller at navigation time, not here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Shop,
    SellerDashboard,
    Auth,
    HelpCenter,
    HowToBuy,
    TrackOrder,
    ReturnsRefunds,
    AboutUs,
    Careers,
    TermsConditions,
    PrivacyPolicy,
    VendorHub,
    SuccessStories,
    BuyerDashboard,
    Checkout,
    Wishlist,
}

impl View {
    /// Views that only make sense with a seller signed in.
    pub fn requires_seller(&self) -> bool {
        matches!(self, View::SellerDashboard | View::VendorHub)
    }

    /// Views that only make sense with a buyer signed in.
    pub fn requires_buyer(&self) -> bool {
        matches!(self, View::BuyerDashboard | View::Wishlist)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Lenient parse for config values; anything unrecognized reads as light.
    pub fn from_name(name: &str) -> Theme {
        match name {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Tabs inside the shop view.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShopTab {
    #[default]
    AllProducts,
    ForYou,
}
