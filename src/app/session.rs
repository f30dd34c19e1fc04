//! Session surface: navigation, theme, comparison tray and shop filters

use tracing::warn;

use crate::domain::events::{SessionEvent, StorefrontEvent};
use crate::domain::ids::ProductId;
use crate::domain::product::{Category, Product};
use crate::domain::session::{ShopTab, Theme, View};
use crate::error::StorefrontError;
use crate::storage::{keys, write_json};

use super::{PriceRange, RatingFilter, SortOrder, Storefront};

/// The comparison tray renders side by side and holds at most this many.
const COMPARE_LIMIT: usize = 4;

impl Storefront {
    /// Switches the current view. Leaving a view always discards visual
    /// search results and returns the shop to its first tab. Views that
    /// need an identity bounce signed-out visitors to the auth screen.
    pub fn navigate(&mut self, view: View) {
        self.visual_results = None;
        self.shop_tab = ShopTab::AllProducts;

        let target = if (view.requires_seller() && self.seller.is_none())
            || (view.requires_buyer() && self.buyer.is_none())
        {
            View::Auth
        } else {
            view
        };
        self.view = target;
        self.push_event(StorefrontEvent::Session(SessionEvent::Navigated {
            view: target,
        }));
    }

    pub fn toggle_theme(&mut self) {
        self.set_theme(self.theme.toggled());
    }

    /// Applies the theme immediately; persistence is best effort and a
    /// failed write only costs the preference on the next load.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        if let Err(err) = write_json(self.durable(), keys::THEME, &theme) {
            warn!(error = %err, "theme preference not persisted");
        }
        self.push_event(StorefrontEvent::Session(SessionEvent::ThemeChanged {
            theme,
        }));
    }

    /// Adds the product to the comparison tray, or removes it when already
    /// there. Returns whether the product is in the tray afterwards.
    pub fn toggle_compare(&mut self, product_id: ProductId) -> Result<bool, StorefrontError> {
        if self.compare.contains(&product_id) {
            self.compare.retain(|id| *id != product_id);
            return Ok(false);
        }
        if self.compare.len() >= COMPARE_LIMIT {
            return Err(StorefrontError::ComparisonFull);
        }
        self.compare.push(product_id);
        Ok(true)
    }

    pub fn clear_compare(&mut self) {
        self.compare.clear();
    }

    /// Tray contents in the order they were added. Products that have left
    /// the catalog since are skipped.
    pub fn comparison_products(&self) -> Vec<&Product> {
        self.compare
            .iter()
            .filter_map(|id| self.product(*id))
            .collect()
    }

    /// Pins the shop to an externally ranked result set, as produced by
    /// an image search. Cleared by any navigation.
    pub fn apply_visual_search(&mut self, results: Vec<ProductId>) {
        self.visual_results = Some(results);
    }

    pub fn clear_visual_search(&mut self) {
        self.visual_results = None;
    }

    pub fn set_shop_tab(&mut self, tab: ShopTab) {
        self.shop_tab = tab;
    }

    pub fn set_search(&mut self, term: String) {
        self.filter.search = term;
    }

    pub fn set_category(&mut self, category: Option<Category>) {
        self.filter.category = category;
    }

    pub fn set_price_range(&mut self, range: PriceRange) {
        self.filter.price = range;
    }

    pub fn set_min_rating(&mut self, rating: RatingFilter) {
        self.filter.min_rating = rating;
    }

    pub fn set_sort(&mut self, sort: SortOrder) {
        self.filter.sort = sort;
    }
}
