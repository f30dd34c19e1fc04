//! Catalog operations and the shop filter pipeline

use tracing::info;

use crate::domain::events::{ProductEvent, StorefrontEvent};
use crate::domain::ids::{ProductId, SellerId};
use crate::domain::money::Money;
use crate::domain::product::{Category, Product, Review};
use crate::domain::session::View;
use crate::error::CatalogError;
use crate::storage::{keys, write_json};

use super::Storefront;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RatingFilter {
    #[default]
    Any,
    ThreeUp,
    FourUp,
}

impl RatingFilter {
    fn threshold(&self) -> f64 {
        match self {
            RatingFilter::Any => 0.0,
            RatingFilter::ThreeUp => 3.0,
            RatingFilter::FourUp => 4.0,
        }
    }
}

/// Price bands offered by the sidebar. Bounds are inclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PriceRange {
    #[default]
    Any,
    Between(Money, Money),
    AtLeast(Money),
}

impl PriceRange {
    fn admits(&self, price: Money) -> bool {
        match self {
            PriceRange::Any => true,
            PriceRange::Between(min, max) => price >= *min && price <= *max,
            PriceRange::AtLeast(min) => price >= *min,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Default,
    PriceAscending,
    PriceDescending,
}

/// Combined shop filter. An empty search term admits everything.
#[derive(Clone, Debug, Default)]
pub struct CatalogFilter {
    pub category: Option<Category>,
    pub search: String,
    pub price: PriceRange,
    pub min_rating: RatingFilter,
    pub sort: SortOrder,
}

impl CatalogFilter {
    fn admits(&self, product: &Product) -> bool {
        if let Some(category) = self.category {
            if product.category != category {
                return false;
            }
        }
        if !self.search.is_empty()
            && !product
                .name
                .to_lowercase()
                .contains(&self.search.to_lowercase())
        {
            return false;
        }
        self.price.admits(product.price) && product.rating >= self.min_rating.threshold()
    }
}

impl Storefront {
    pub fn product(&self, product_id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == product_id)
    }

    pub fn seller_products(&self, seller_id: &SellerId) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| &p.seller_id == seller_id)
            .collect()
    }

    /// Resolves ids against the catalog, keeping catalog order and skipping
    /// ids that no longer exist.
    pub fn pick_products(&self, ids: &[ProductId]) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| ids.contains(&p.id))
            .collect()
    }

    /// What the shop grid shows right now. Visual-search results override
    /// the filter pipeline entirely; any view other than the shop shows
    /// nothing.
    pub fn visible_products(&self) -> Vec<&Product> {
        if self.view != View::Shop {
            return Vec::new();
        }
        if let Some(ids) = &self.visual_results {
            return self.pick_products(ids);
        }
        let mut visible: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| self.filter.admits(p))
            .collect();
        match self.filter.sort {
            SortOrder::Default => {}
            SortOrder::PriceAscending => visible.sort_by_key(|p| p.price),
            SortOrder::PriceDescending => {
                visible.sort_by_key(|p| std::cmp::Reverse(p.price));
            }
        }
        visible
    }

    /// Adds a product to the catalog. The stored list is written before the
    /// in-memory mirror changes.
    pub fn add_product(&mut self, product: Product) -> Result<(), CatalogError> {
        let mut updated = self.products.clone();
        updated.push(product.clone());
        write_json(self.durable(), keys::PRODUCTS, &updated)?;
        self.products = updated;
        info!(product = %product.id, seller = %product.seller_id, "product added");
        self.push_event(StorefrontEvent::Product(ProductEvent::Added {
            product_id: product.id,
        }));
        Ok(())
    }

    /// Replaces the stored product with the same id.
    pub fn update_product(&mut self, product: Product) -> Result<(), CatalogError> {
        let index = self
            .products
            .iter()
            .position(|p| p.id == product.id)
            .ok_or(CatalogError::ProductNotFound(product.id))?;
        let mut updated = self.products.clone();
        updated[index] = product.clone();
        write_json(self.durable(), keys::PRODUCTS, &updated)?;
        self.products = updated;
        self.push_event(StorefrontEvent::Product(ProductEvent::Updated {
            product_id: product.id,
        }));
        Ok(())
    }

    /// Narrow stock adjustment used by the dashboard inventory table.
    pub fn set_stock(&mut self, product_id: ProductId, stock: u32) -> Result<(), CatalogError> {
        let mut product = self
            .product(product_id)
            .cloned()
            .ok_or(CatalogError::ProductNotFound(product_id))?;
        product.stock = Some(stock);
        self.update_product(product)
    }

    /// Appends a review; rating and review count are re-derived from the
    /// full list before anything is written.
    pub fn add_product_review(
        &mut self,
        product_id: ProductId,
        review: Review,
    ) -> Result<(), CatalogError> {
        let index = self
            .products
            .iter()
            .position(|p| p.id == product_id)
            .ok_or(CatalogError::ProductNotFound(product_id))?;
        let rating = review.rating;
        let mut updated = self.products.clone();
        updated[index].record_review(review);
        write_json(self.durable(), keys::PRODUCTS, &updated)?;
        self.products = updated;
        self.push_event(StorefrontEvent::Product(ProductEvent::ReviewRecorded {
            product_id,
            rating,
        }));
        Ok(())
    }
}
